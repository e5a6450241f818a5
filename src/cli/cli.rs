use std::path::PathBuf;

use clap::Parser;

use crate::application::data::{ColorChoice, LogLevel, OutputMode};

/// Print a snapshot of a directory tree.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// The directory to scan
    #[clap(default_value = ".")]
    pub root: PathBuf,

    /// Wildcard pattern matched against entry names; prefix with `!` to exclude.
    /// Repeatable, the last matching pattern wins. Replaces `patterns` from
    /// `.scantree.yaml`.
    #[clap(long = "pattern", short = 'p', value_name = "PATTERN")]
    pub patterns: Vec<String>,

    /// Do not descend into symlinked directories
    #[clap(long)]
    pub no_follow_links: bool,

    /// Fail instead of marking symlink cycles
    #[clap(long)]
    pub no_cyclic_links: bool,

    /// Drop directories left empty after filtering
    #[clap(long)]
    pub exclude_empty: bool,

    #[clap(long, short, default_value = "tree", value_enum)]
    pub mode: OutputMode,

    #[clap(long, default_value = "auto", value_enum)]
    pub color: ColorChoice,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults() {
        let cli = Cli::try_parse_from(["scantree"]).unwrap();

        assert_eq!(cli.root, PathBuf::from("."));
        assert!(cli.patterns.is_empty());
        assert_eq!(cli.mode, OutputMode::Tree);
        assert_eq!(cli.color, ColorChoice::Auto);
        assert!(!cli.no_follow_links);
    }

    #[test]
    fn cli_collects_repeated_patterns_in_order() {
        let cli = Cli::try_parse_from([
            "scantree", "some/dir", "-p", "*", "--pattern", "!.*", "--mode", "count",
        ])
        .unwrap();

        assert_eq!(cli.root, PathBuf::from("some/dir"));
        assert_eq!(cli.patterns, vec!["*", "!.*"]);
        assert_eq!(cli.mode, OutputMode::Count);
    }

    #[test]
    fn cli_rejects_unknown_modes() {
        let result = Cli::try_parse_from(["scantree", "--mode", "json"]);

        assert!(result.is_err());
    }
}
