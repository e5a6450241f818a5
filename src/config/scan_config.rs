use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::{debug, info};

use crate::ext::PathExt;
use crate::filter::{Filter, FilterError, WildcardFilter};
use crate::scan::Scanner;

/// Name of the optional per-root configuration file.
pub const CONFIG_FILE_NAME: &str = ".scantree.yaml";

fn get_config_file_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

/// Scan settings as read from `.scantree.yaml`.
///
/// ```yaml
/// patterns: ["*", "!.*"]
/// follow_links: true
/// allow_cyclic_links: true
/// include_empty: false
/// linked_dirs: true
/// linked_files: true
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub patterns: Vec<String>,
    pub follow_links: bool,
    pub allow_cyclic_links: bool,
    pub include_empty: bool,
    pub linked_dirs: bool,
    pub linked_files: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            patterns: Vec::new(),
            follow_links: true,
            allow_cyclic_links: true,
            include_empty: true,
            linked_dirs: true,
            linked_files: true,
        }
    }
}

impl ScanConfig {
    /// Reads the configuration file of `root`, falling back to the defaults
    /// when there is none.
    pub fn read(root: &Path) -> Result<Self, ConfigError> {
        let path = get_config_file_path(root);
        match Self::from_path(&path) {
            Err(ConfigError::ReadError { source, .. })
                if matches!(
                    source.kind(),
                    io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
                ) =>
            {
                info!("No {} found, using default scan settings", CONFIG_FILE_NAME);
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        debug!("Opening config file: {}", path.best_effort_path_display());
        let contents = fs::read_to_string(path).context(ReadSnafu {
            file_path: path.best_effort_path_display(),
        })?;
        debug!("Successfully read config file: {} bytes", contents.len());
        contents.as_str().try_into()
    }

    /// The filter described by `patterns` and the link switches.
    pub fn filter(&self) -> Result<Filter, FilterError> {
        if self.patterns.is_empty() && self.linked_dirs && self.linked_files {
            return Ok(Filter::All);
        }
        let filter = WildcardFilter::new(self.patterns.iter().cloned())?
            .with_linked_dirs(self.linked_dirs)
            .with_linked_files(self.linked_files);
        Ok(filter.into())
    }

    pub fn scanner(&self, root: impl Into<PathBuf>) -> Result<Scanner, FilterError> {
        Ok(Scanner::new(root)
            .filter(self.filter()?)
            .follow_links(self.follow_links)
            .allow_cyclic_links(self.allow_cyclic_links)
            .include_empty(self.include_empty))
    }

    fn parse_patterns(
        top_level: &LinkedHashMap<Yaml, Yaml>,
    ) -> Result<Option<Vec<String>>, ConfigError> {
        let key = Yaml::Value(Scalar::String(Cow::Borrowed("patterns")));
        let Some(patterns) = top_level.get(&key) else {
            return Ok(None);
        };

        patterns
            .as_sequence()
            .context(PatternsNotSequenceSnafu)?
            .iter()
            .enumerate()
            .map(|(index, item)| {
                item.as_str()
                    .map(str::to_string)
                    .context(PatternNotStringSnafu { index })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    fn parse_bool(
        top_level: &LinkedHashMap<Yaml, Yaml>,
        key: &'static str,
    ) -> Result<Option<bool>, ConfigError> {
        match top_level.get(&Yaml::Value(Scalar::String(Cow::Borrowed(key)))) {
            None => Ok(None),
            Some(Yaml::Value(Scalar::Boolean(value))) => Ok(Some(*value)),
            Some(_) => NotBooleanSnafu { key }.fail(),
        }
    }
}

impl TryFrom<&str> for ScanConfig {
    type Error = ConfigError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let contents_vec = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let contents = contents_vec.first().context(MalformedConfigSnafu)?;
        let top_level = contents.as_mapping().context(TopLevelNotMapSnafu)?;

        for key in top_level.keys() {
            match key.as_str() {
                Some(
                    "patterns" | "follow_links" | "allow_cyclic_links" | "include_empty"
                    | "linked_dirs" | "linked_files",
                ) => {}
                _ => debug!("Skipping unknown config entry: {:?}", key),
            }
        }

        let defaults = ScanConfig::default();
        Ok(ScanConfig {
            patterns: Self::parse_patterns(top_level)?.unwrap_or(defaults.patterns),
            follow_links: Self::parse_bool(top_level, "follow_links")?
                .unwrap_or(defaults.follow_links),
            allow_cyclic_links: Self::parse_bool(top_level, "allow_cyclic_links")?
                .unwrap_or(defaults.allow_cyclic_links),
            include_empty: Self::parse_bool(top_level, "include_empty")?
                .unwrap_or(defaults.include_empty),
            linked_dirs: Self::parse_bool(top_level, "linked_dirs")?
                .unwrap_or(defaults.linked_dirs),
            linked_files: Self::parse_bool(top_level, "linked_files")?
                .unwrap_or(defaults.linked_files),
        })
    }
}

#[derive(Debug, Snafu)]
pub enum ConfigError {
    #[snafu(display("Failed to read the config file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Failed to parse the config file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Improperly formatted config file"))]
    MalformedConfig,
    #[snafu(display("Top level of config should be a map"))]
    TopLevelNotMap,
    #[snafu(display("'patterns' should be a list"))]
    PatternsNotSequence,
    #[snafu(display("Pattern #{} should be a string", index))]
    PatternNotString { index: usize },
    #[snafu(display("'{}' should be true or false", key))]
    NotBoolean { key: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::write_file;
    use tempfile::TempDir;

    #[test]
    fn config_defaults_when_file_is_missing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        let config = ScanConfig::read(temp_dir.path()).unwrap();

        assert_eq!(config, ScanConfig::default());
    }

    #[test]
    fn config_is_read_from_the_root() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        write_file(
            temp_dir.path(),
            CONFIG_FILE_NAME,
            "patterns:\n  - \"*\"\n  - \"!.*\"\ninclude_empty: false\n",
        );

        let config = ScanConfig::read(temp_dir.path()).unwrap();

        assert_eq!(config.patterns, vec!["*", "!.*"]);
        assert!(!config.include_empty);
        assert!(config.follow_links);
    }

    #[test]
    fn config_returns_error_on_nonexistent_file() {
        let result = ScanConfig::from_path(Path::new("nonexistent.yaml"));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn config_returns_error_on_invalid_yaml() {
        let result: Result<ScanConfig, _> = "invalid: yaml: content: [unclosed".try_into();
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn config_returns_error_on_empty_file() {
        let result: Result<ScanConfig, _> = "".try_into();
        assert!(matches!(result, Err(ConfigError::MalformedConfig)));
    }

    #[test]
    fn config_returns_error_when_top_level_is_not_map() {
        let result: Result<ScanConfig, _> = "- item1\n- item2".try_into();
        assert!(matches!(result, Err(ConfigError::TopLevelNotMap)));
    }

    #[test]
    fn config_returns_error_when_patterns_is_not_a_list() {
        let result: Result<ScanConfig, _> = "patterns: \"*.txt\"".try_into();
        assert!(matches!(result, Err(ConfigError::PatternsNotSequence)));
    }

    #[test]
    fn config_returns_error_when_a_pattern_is_not_a_string() {
        let result: Result<ScanConfig, _> = "patterns:\n  - \"*.txt\"\n  - [nested]".try_into();
        assert!(matches!(
            result,
            Err(ConfigError::PatternNotString { index: 1 })
        ));
    }

    #[test]
    fn config_returns_error_when_flag_is_not_boolean() {
        let result: Result<ScanConfig, _> = "follow_links: sometimes".try_into();
        assert!(matches!(
            result,
            Err(ConfigError::NotBoolean {
                key: "follow_links"
            })
        ));
    }

    #[test]
    fn config_skips_unknown_entries() {
        let result: Result<ScanConfig, _> = "other_config: value\nfollow_links: false".try_into();
        let config = result.unwrap();
        assert!(!config.follow_links);
        assert!(config.patterns.is_empty());
    }

    #[test]
    fn config_without_patterns_accepts_everything() {
        let filter = ScanConfig::default().filter().unwrap();
        assert!(matches!(filter, Filter::All));
    }

    #[test]
    fn config_link_switches_produce_a_wildcard_filter() {
        let config = ScanConfig {
            linked_dirs: false,
            ..ScanConfig::default()
        };

        let filter = config.filter().unwrap();

        assert!(matches!(filter, Filter::Wildcard(_)));
    }

    #[test]
    fn config_reports_invalid_patterns() {
        let config = ScanConfig {
            patterns: vec!["[".to_string()],
            ..ScanConfig::default()
        };

        assert!(matches!(
            config.scanner("."),
            Err(FilterError::InvalidPattern { .. })
        ));
    }
}
