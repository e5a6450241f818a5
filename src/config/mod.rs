mod scan_config;

pub use scan_config::{CONFIG_FILE_NAME, ConfigError, ScanConfig};
