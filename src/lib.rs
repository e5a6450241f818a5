//! Deterministic, comparable in-memory snapshots of directory trees.
//!
//! [`scan`] walks a directory once and returns a [`DirNode`] tree in which
//! every entry knows its absolute, root-relative and symlink-resolved path.
//! A [`Filter`] prunes entries directory by directory, and symlinks that lead
//! back into the directories being walked end in [`CyclicLinkedDir`] markers.
//! The finished tree never touches the filesystem again: it can be folded
//! bottom-up with [`DirNode::apply`] and enumerated with
//! [`DirNode::filepaths`], [`DirNode::leafpaths`] and [`DirNode::dirpaths`]
//! as often as needed, and two scans compare equal only when they describe
//! the same entries at the same locations.

pub mod config;
pub mod ext;
pub mod filter;
pub mod node;
pub mod path;
pub mod scan;

#[cfg(test)]
mod test_utils;

pub use config::ScanConfig;
pub use filter::{CustomFilter, Filter, FilterError, WildcardFilter};
pub use node::{
    CyclicLinkedDir, DirNode, DirView, FileNode, Fold, FoldFn, LinkView, LinkedDir, Node,
    RealPathCache, Subdir,
};
pub use path::{EntryKind, PathIdentity};
pub use scan::{ScanError, Scanner, scan};
