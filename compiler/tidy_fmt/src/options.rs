//! Formatting options.

use crate::imports::ImportOptions;

/// Configuration for one formatting run.
///
/// The layout itself has no knobs; options only steer the import pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Run the import organizer after printing.
    pub organize_imports: bool,
    pub imports: ImportOptions,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            organize_imports: true,
            imports: ImportOptions::default(),
        }
    }
}

impl FormatOptions {
    /// Print only, leaving imports as written apart from blank lines.
    pub fn layout_only() -> Self {
        FormatOptions {
            organize_imports: false,
            ..Self::default()
        }
    }
}
