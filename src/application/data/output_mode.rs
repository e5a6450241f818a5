use clap::ValueEnum;
use derive_more::Display;

/// What the command prints for a scanned tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default, Display)]
pub enum OutputMode {
    /// Indented tree of every node
    #[default]
    #[display("tree")]
    Tree,
    /// Relative paths of all files
    #[display("files")]
    Files,
    /// Relative paths of files and link markers
    #[display("leaves")]
    Leaves,
    /// Relative paths of all directories below the root
    #[display("dirs")]
    Dirs,
    /// Number of files
    #[display("count")]
    Count,
}
