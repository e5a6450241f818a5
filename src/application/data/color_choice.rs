use clap::ValueEnum;
use derive_more::Display;
use supports_color::Stream;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default, Display)]
pub enum ColorChoice {
    #[default]
    #[display("auto")]
    Auto,
    #[display("always")]
    Always,
    #[display("never")]
    Never,
}

impl ColorChoice {
    /// Resolves `Auto` against what stdout supports.
    pub fn enabled(self) -> bool {
        match self {
            ColorChoice::Auto => supports_color::on(Stream::Stdout).is_some(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}
