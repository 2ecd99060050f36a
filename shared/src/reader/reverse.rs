//! Backward line iteration over seekable byte sources.
//!
//! [`ReverseLines`] walks a file from its end towards its start in fixed-size
//! chunks and yields one line at a time, most recent first. Nothing past the
//! lines actually consumed is ever read, so taking the last few entries of a
//! multi-gigabyte log costs a handful of chunk reads.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

/// Default number of bytes read per backward step.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Smallest chunk size accepted by [`clamp_chunk_size`].
pub const MIN_CHUNK_SIZE: usize = 1024;

/// Largest chunk size accepted by [`clamp_chunk_size`].
pub const MAX_CHUNK_SIZE: usize = 1024 * 1024;

/// Clamps a configured chunk size into the supported range.
#[must_use]
pub fn clamp_chunk_size(chunk_size: usize) -> usize {
    chunk_size.clamp(MIN_CHUNK_SIZE, MAX_CHUNK_SIZE)
}

/// Lazy iterator over the lines of a byte source, last line first.
///
/// Lines are returned without their terminating `\n` (a preceding `\r` is
/// dropped as well). A single trailing newline at the end of the source does
/// not produce an empty line; blank lines inside the file do. Bytes that are
/// not valid UTF-8 are replaced with `U+FFFD`, line by line.
///
/// Once an I/O error has been yielded the iterator is exhausted.
///
/// # Example
///
/// ```
/// use shared::reader::ReverseLines;
/// use std::io::Cursor;
///
/// let lines = ReverseLines::new(Cursor::new("a\nb\nc\n"), 2).unwrap();
/// let lines: Vec<String> = lines.collect::<Result<_, _>>().unwrap();
///
/// assert_eq!(lines, vec!["c", "b", "a"]);
/// ```
#[derive(Debug)]
pub struct ReverseLines<R> {
    source: R,
    chunk_size: usize,
    /// Offset of the first byte already pulled into `buffer`.
    cursor: u64,
    /// Bytes between `cursor` and the start of the last emitted line.
    buffer: VecDeque<u8>,
    /// Length of the tail of `buffer` already known to hold no newline.
    scanned: usize,
    at_end_of_source: bool,
    finished: bool,
}

impl ReverseLines<File> {
    /// Opens `path` for backward reading.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or its length cannot be
    /// determined.
    pub fn open(path: impl AsRef<Path>, chunk_size: usize) -> io::Result<Self> {
        Self::new(File::open(path)?, chunk_size)
    }
}

impl<R> ReverseLines<R> {
    /// Gets a reference to the underlying source.
    pub fn get_ref(&self) -> &R {
        &self.source
    }
}

impl<R: Read + Seek> ReverseLines<R> {
    /// Wraps a seekable source. A `chunk_size` of zero is treated as one.
    ///
    /// # Errors
    ///
    /// Returns an error if seeking to the end of the source fails.
    pub fn new(mut source: R, chunk_size: usize) -> io::Result<Self> {
        let len = source.seek(SeekFrom::End(0))?;

        Ok(Self {
            source,
            chunk_size: chunk_size.max(1),
            cursor: len,
            buffer: VecDeque::new(),
            scanned: 0,
            at_end_of_source: true,
            finished: false,
        })
    }

    /// Reads the chunk just before `cursor` and prepends it to the buffer.
    fn read_previous_chunk(&mut self) -> io::Result<()> {
        let step = self
            .cursor
            .min(u64::try_from(self.chunk_size).unwrap_or(u64::MAX));
        self.cursor -= step;

        // `step` never exceeds `chunk_size`, which is a usize.
        let mut chunk = vec![0; usize::try_from(step).unwrap_or(self.chunk_size)];
        self.source.seek(SeekFrom::Start(self.cursor))?;
        self.source.read_exact(&mut chunk)?;

        if self.at_end_of_source {
            self.at_end_of_source = false;
            if chunk.last() == Some(&b'\n') {
                chunk.pop();
            }
        }

        self.buffer.reserve(chunk.len());
        for &byte in chunk.iter().rev() {
            self.buffer.push_front(byte);
        }
        Ok(())
    }

    /// Splits the text after the last newline off the buffer, if any.
    ///
    /// Only bytes not covered by an earlier unsuccessful search are scanned.
    fn split_last_line(&mut self) -> Option<String> {
        let unscanned = self.buffer.len() - self.scanned;
        let Some(newline) = self.buffer.range(..unscanned).rposition(|&b| b == b'\n') else {
            self.scanned = self.buffer.len();
            return None;
        };

        let line = Vec::from(self.buffer.split_off(newline + 1));
        self.buffer.truncate(newline);
        self.scanned = 0;
        Some(decode_line(&line))
    }
}

impl<R: Read + Seek> Iterator for ReverseLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            if let Some(line) = self.split_last_line() {
                return Some(Ok(line));
            }

            if self.cursor == 0 {
                self.finished = true;
                if self.at_end_of_source {
                    // Nothing was ever read: the source is empty.
                    return None;
                }
                // The earliest line has no newline in front of it.
                let first = Vec::from(std::mem::take(&mut self.buffer));
                return Some(Ok(decode_line(&first)));
            }

            if let Err(e) = self.read_previous_chunk() {
                self.finished = true;
                return Some(Err(e));
            }
        }
    }
}

fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}
