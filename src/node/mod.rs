//! The scanned tree: files, directories and the terminal markers that stand in
//! for symlinked directories which were not descended.

mod fold;
mod node;
mod sequence;

pub use fold::{DirView, Fold, FoldFn, LinkView, RealPathCache};
pub use node::{CyclicLinkedDir, DirNode, Entries, Entry, FileNode, LinkedDir, Node, Subdir};
pub use sequence::Walk;
