//! Integration tests for the Logscope API.
//!
//! These tests drive the complete router against real files on disk and, for
//! the remote endpoint, against a second server listening on localhost.

mod common;
mod health_tests;
mod logs_tests;
mod remote_tests;
mod search_tests;
