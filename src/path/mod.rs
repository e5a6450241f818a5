//! Identity of a single filesystem entry discovered during a scan.
//!
//! Every entry carries three views of where it lives: the absolute path it was
//! reached through, its path relative to the scan root, and its real path with
//! all symlinks resolved.

mod path_identity;

pub use path_identity::{EntryKind, PathIdentity};
