//! Relays attendance CSV exports to the attendance API.
//!
//! Files named `attendance_<YYYYMMDD>_<suffix>.csv` are picked up from one directory, posted one
//! at a time as multipart form data, and removed once the API answers 200. A file that fails
//! stays in place and is picked up again by the next run.
//!
//! Only one process may sync a directory at a time. Nothing locks the directory, two concurrent
//! runs can post the same file twice.

pub mod config;
pub mod date_token;
pub mod report;
pub mod selector;
pub mod sync;
pub mod uploader;

#[cfg(test)]
mod test_server;
