pub mod asset;
#[macro_use]
pub mod exception;
pub mod fs;
pub mod http;
pub mod json;
pub mod log;
pub mod schedule;
pub mod shutdown;
pub mod web;
