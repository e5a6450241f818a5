use std::path::PathBuf;

use scantree::ScanConfig;

use crate::application::data::{ColorChoice, OutputMode};
use crate::cli::Cli;

/// Command-line values that take precedence over `.scantree.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOverrides {
    pub patterns: Vec<String>,
    pub no_follow_links: bool,
    pub no_cyclic_links: bool,
    pub exclude_empty: bool,
}

impl ScanOverrides {
    pub fn apply_to(&self, mut config: ScanConfig) -> ScanConfig {
        if !self.patterns.is_empty() {
            config.patterns = self.patterns.clone();
        }
        if self.no_follow_links {
            config.follow_links = false;
        }
        if self.no_cyclic_links {
            config.allow_cyclic_links = false;
        }
        if self.exclude_empty {
            config.include_empty = false;
        }
        config
    }
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub root: PathBuf,
    pub mode: OutputMode,
    pub color: ColorChoice,
    pub overrides: ScanOverrides,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            root: cli.root,
            mode: cli.mode,
            color: cli.color,
            overrides: ScanOverrides {
                patterns: cli.patterns,
                no_follow_links: cli.no_follow_links,
                no_cyclic_links: cli.no_cyclic_links,
                exclude_empty: cli.exclude_empty,
            },
        }
    }
}
