//! gotidy driver.
//!
//! Turns command-line paths into a batch of Go files, formats them with
//! [`tidy_fmt`], and commits the results only when every file succeeded.

pub mod commands;
mod tracing_setup;

pub use tracing_setup::init_tracing;
