//! Building a tree snapshot from the filesystem.
//!
//! A scan is a single depth-first walk from a root directory. The filter is
//! consulted once per directory, rejected sub-directories are never entered,
//! and symlinked directories that lead back into the current descent become
//! [`CyclicLinkedDir`](crate::node::CyclicLinkedDir) markers instead of being
//! walked again.

mod cycle_guard;
mod scan_error;
mod tree_builder;

pub use cycle_guard::CycleGuard;
pub(crate) use scan_error::{NotADirectorySnafu, NotFoundSnafu, UnreadableSnafu};
pub use scan_error::ScanError;
pub use tree_builder::{Scanner, scan};
