//! The `fmt` command: format a batch of Go source files.
//!
//! Runs in two phases. The first reads and formats every file in memory,
//! in parallel, keeping results in input order. The second commits the
//! results (print, write, diff, or list) and only runs when the first phase
//! produced no error at all.

mod diff;
mod report;
mod walk;

use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tidy_fmt::{format_source, FormatError, FormatOptions};
use tracing::{debug, warn};

pub use diff::write_diff;
pub use report::render_error;
pub use walk::collect_files;

/// What the commit phase does with formatted files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Print every result to stdout under a `// File:` header.
    #[default]
    Stdout,
    /// Rewrite changed files in place.
    Write,
    /// Print a line diff for changed files.
    Diff,
    /// Print the paths of changed files.
    List,
}

/// Configuration for the format command.
#[derive(Clone, Debug, Default)]
pub struct FormatConfig {
    pub mode: OutputMode,
    pub options: FormatOptions,
}

/// Failure of one file, with its path.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("{}: cannot read: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}", format_message(.path, .error))]
    Format {
        path: PathBuf,
        /// The file's text, for snippets.
        text: String,
        #[source]
        error: FormatError,
    },
    #[error("{}: cannot write: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FileError {
    pub fn path(&self) -> &Path {
        match self {
            FileError::Read { path, .. }
            | FileError::Format { path, .. }
            | FileError::Write { path, .. } => path,
        }
    }
}

fn format_message(path: &Path, error: &FormatError) -> String {
    match error {
        // Import errors already name their file.
        FormatError::Imports(error) => error.to_string(),
        FormatError::Parse(error) => format!("{}: {error}", path.display()),
    }
}

/// A file after the first phase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Formatted {
    pub path: PathBuf,
    pub original: String,
    pub formatted: String,
}

impl Formatted {
    pub fn changed(&self) -> bool {
        self.original != self.formatted
    }
}

/// Read and format one file.
pub fn format_file(path: &Path, options: &FormatOptions) -> Result<Formatted, FileError> {
    let original = std::fs::read_to_string(path).map_err(|source| FileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    match format_source(path, &original, options) {
        Ok(formatted) => Ok(Formatted {
            path: path.to_path_buf(),
            original,
            formatted,
        }),
        Err(error) => Err(FileError::Format {
            path: path.to_path_buf(),
            text: original,
            error,
        }),
    }
}

/// First phase: format every file in parallel.
///
/// Returns the results in input order, or every error if any file failed.
pub fn format_files(
    files: &[PathBuf],
    options: &FormatOptions,
) -> Result<Vec<Formatted>, Vec<FileError>> {
    let results: Vec<Result<Formatted, FileError>> = files
        .par_iter()
        .map(|path| format_file(path, options))
        .collect();

    let mut formatted = Vec::with_capacity(results.len());
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(file) => formatted.push(file),
            Err(error) => errors.push(error),
        }
    }
    if errors.is_empty() {
        Ok(formatted)
    } else {
        Err(errors)
    }
}

/// Second phase: apply `mode` to the formatted files.
///
/// Write failures do not stop the other writes; they are returned.
pub fn commit(
    files: &[Formatted],
    mode: OutputMode,
    out: &mut impl Write,
) -> io::Result<Vec<FileError>> {
    let mut errors = Vec::new();
    for file in files {
        match mode {
            OutputMode::Stdout => {
                writeln!(out, "// File:  {}", file.path.display())?;
                out.write_all(file.formatted.as_bytes())?;
            }
            OutputMode::Write if file.changed() => {
                debug!(path = %file.path.display(), "rewriting");
                if let Err(source) = std::fs::write(&file.path, &file.formatted) {
                    errors.push(FileError::Write {
                        path: file.path.clone(),
                        source,
                    });
                }
            }
            OutputMode::Diff if file.changed() => {
                write_diff(out, &file.path, &file.original, &file.formatted)?;
            }
            OutputMode::List if file.changed() => {
                writeln!(out, "{}", file.path.display())?;
            }
            OutputMode::Write | OutputMode::Diff | OutputMode::List => {}
        }
    }
    Ok(errors)
}

/// Format `paths` and commit with `config.mode`.
///
/// Errors go to `err`, rendered with colors when `color` is set. Returns
/// the number of failures; nothing is committed unless it is zero before
/// the commit phase.
pub fn run_batch(
    paths: &[PathBuf],
    config: &FormatConfig,
    out: &mut impl Write,
    err: &mut impl Write,
    color: bool,
) -> io::Result<usize> {
    let (files, mut errors) = collect_files(paths);
    debug!(files = files.len(), mode = ?config.mode, "formatting");

    match format_files(&files, &config.options) {
        Ok(formatted) if errors.is_empty() => {
            errors = commit(&formatted, config.mode, out)?;
        }
        Ok(_) => {}
        Err(format_errors) => errors.extend(format_errors),
    }

    if !errors.is_empty() {
        warn!(failed = errors.len(), "batch failed");
    }
    for error in &errors {
        err.write_all(render_error(error, color).as_bytes())?;
    }
    out.flush()?;
    Ok(errors.len())
}

/// Run the format command on stdout and stderr.
///
/// Returns true if every file succeeded.
pub fn run_format(paths: &[PathBuf], config: &FormatConfig) -> bool {
    let color = use_colors();
    let stdout = io::stdout();
    let stderr = io::stderr();
    match run_batch(paths, config, &mut stdout.lock(), &mut stderr.lock(), color) {
        Ok(failed) => failed == 0,
        Err(error) => {
            eprintln!("gotidy: {error}");
            false
        }
    }
}

/// Check if stderr is a terminal (for color output).
fn use_colors() -> bool {
    std::io::stderr().is_terminal()
}

#[cfg(test)]
mod tests;
