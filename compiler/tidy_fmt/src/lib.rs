//! gotidy Formatter
//!
//! Formats Go source in three passes over one parse:
//!
//! 1. **Normalize**: merge lines in the [`tidy_ir::LineTable`] so that blocks
//!    have no blank line right inside their braces and grouped imports have
//!    none between specs. Text and tree stay untouched.
//! 2. **Print**: render tree and comments, taking every vertical spacing
//!    decision from the line table.
//! 3. **Organize imports**: prune, sort and group the import section of the
//!    printed text.
//!
//! # Modules
//!
//! - [`normalize`]: anchors and line merges
//! - [`printer`]: canonical rendering
//! - [`imports`]: import organizer
//! - `emitter`: output buffer

mod emitter;
pub mod imports;
pub mod normalize;
mod options;
pub mod printer;

use std::path::Path;

use tidy_parse::{ParseError, ParseMode};
use tracing::trace;

pub use imports::{organize_imports, ImportError, ImportOptions};
pub use normalize::normalize;
pub use options::FormatOptions;
pub use printer::print_file;

/// Failure of one file's formatting pipeline.
#[derive(Clone, Debug, thiserror::Error)]
pub enum FormatError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Imports(#[from] ImportError),
}

/// Format one Go source file.
///
/// `path` only labels errors and logs.
pub fn format_source(
    path: &Path,
    source: &str,
    options: &FormatOptions,
) -> Result<String, FormatError> {
    let mut parsed = tidy_parse::parse(source, ParseMode::PARSE_COMMENTS)?;
    normalize(&mut parsed);
    let printed = print_file(source, &parsed);
    trace!(path = %path.display(), bytes = printed.len(), "printed");
    if !options.organize_imports {
        return Ok(printed);
    }
    Ok(organize_imports(path, &printed, &options.imports)?)
}
