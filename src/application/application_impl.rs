use std::io::{self, Write};

use scantree::config::ConfigError;
use scantree::{FilterError, ScanConfig, ScanError};
use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info};

use crate::application::RuntimeConfig;
use crate::render::Renderer;

pub struct Application;

impl Application {
    pub fn run(runtime_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let runtime_config: RuntimeConfig = runtime_config.into();

        let file_config = ScanConfig::read(&runtime_config.root).context(ConfigSnafu)?;
        let config = runtime_config.overrides.apply_to(file_config);
        debug!("Effective scan settings: {:?}", config);

        let tree = config
            .scanner(&runtime_config.root)
            .context(FilterSnafu)?
            .scan()
            .context(ScanSnafu)?;
        info!(
            "Scanned {} ({} files)",
            tree.path().absolute().display(),
            tree.filepaths().count()
        );

        let renderer = Renderer::new(runtime_config.mode, runtime_config.color.enabled());
        let mut stdout = io::stdout().lock();
        for line in renderer.render(&tree) {
            writeln!(stdout, "{line}").context(OutputSnafu)?;
        }

        Ok(())
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while reading the configuration"))]
    ConfigError { source: ConfigError },
    #[snafu(display("Critical failure encountered while compiling the filter"))]
    FilterError { source: FilterError },
    #[snafu(display("Critical failure encountered while scanning"))]
    ScanError { source: ScanError },
    #[snafu(display("Failed to write the output"))]
    OutputError { source: io::Error },
}
