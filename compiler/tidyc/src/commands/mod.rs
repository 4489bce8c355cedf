//! Command handlers for the gotidy CLI.

pub mod fmt;

pub use fmt::{run_format, FileError, FormatConfig, OutputMode};
