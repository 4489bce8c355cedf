//! gotidy: format Go source files.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tidy_fmt::{FormatOptions, ImportOptions};
use tidyc::commands::{run_format, FormatConfig, OutputMode};

#[derive(Debug, Parser)]
#[command(
    name = "gotidy",
    version,
    about = "Format Go source files",
    after_help = "Without -w, -d or -l every result is printed to stdout. \
                  Nothing is printed or written unless every file formats."
)]
struct Cli {
    /// Write results back to the source files
    #[arg(short, long, conflicts_with_all = ["diff", "list"])]
    write: bool,

    /// Print a diff for files whose formatting differs
    #[arg(short, long, conflicts_with = "list")]
    diff: bool,

    /// List files whose formatting differs
    #[arg(short, long)]
    list: bool,

    /// Comma-separated import path prefixes grouped after third-party imports
    #[arg(long, value_name = "PREFIXES", value_delimiter = ',')]
    local: Vec<String>,

    /// Keep imports that are never used
    #[arg(long)]
    no_prune: bool,

    /// Files or directories to format
    #[arg(required = true, value_name = "PATH")]
    paths: Vec<PathBuf>,
}

impl Cli {
    fn config(&self) -> FormatConfig {
        let mode = if self.write {
            OutputMode::Write
        } else if self.diff {
            OutputMode::Diff
        } else if self.list {
            OutputMode::List
        } else {
            OutputMode::Stdout
        };
        FormatConfig {
            mode,
            options: FormatOptions {
                imports: ImportOptions {
                    local_prefixes: self
                        .local
                        .iter()
                        .filter(|prefix| !prefix.is_empty())
                        .cloned()
                        .collect(),
                    prune_unused: !self.no_prune,
                },
                ..FormatOptions::default()
            },
        }
    }
}

fn main() -> ExitCode {
    tidyc::init_tracing();
    let cli = Cli::parse();
    if run_format(&cli.paths, &cli.config()) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_map_onto_config() {
        let cli = Cli::parse_from([
            "gotidy",
            "-l",
            "--local",
            "example.com/a,example.com/b",
            "--no-prune",
            "x.go",
        ]);
        let config = cli.config();
        assert_eq!(config.mode, OutputMode::List);
        assert_eq!(
            config.options.imports.local_prefixes,
            vec!["example.com/a".to_string(), "example.com/b".to_string()]
        );
        assert!(!config.options.imports.prune_unused);
        assert!(config.options.organize_imports);
    }

    #[test]
    fn modes_conflict() {
        assert!(Cli::try_parse_from(["gotidy", "-w", "-d", "x.go"]).is_err());
        assert!(Cli::try_parse_from(["gotidy", "-d", "-l", "x.go"]).is_err());
    }

    #[test]
    fn paths_are_required() {
        assert!(Cli::try_parse_from(["gotidy", "-w"]).is_err());
    }
}
