mod color_choice;
mod log_level;
mod output_mode;

pub use color_choice::ColorChoice;
pub use log_level::LogLevel;
pub use output_mode::OutputMode;
