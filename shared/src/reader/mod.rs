//! Reading log files from the end.
//!
//! - [`reverse`] - chunked backward line iterator
//! - [`file`] - full and bounded reads of one file built on it

pub mod file;
pub mod reverse;

pub use file::{read_all, read_last, LogReadError};
pub use reverse::{
    clamp_chunk_size, ReverseLines, DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE, MIN_CHUNK_SIZE,
};
