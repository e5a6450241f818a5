use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use derive_more::IsVariant;

use crate::path::PathIdentity;

/// A file leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    path: PathIdentity,
}

impl FileNode {
    pub(crate) fn new(path: PathIdentity) -> Self {
        FileNode { path }
    }

    pub fn path(&self) -> &PathIdentity {
        &self.path
    }
}

/// A symlinked directory whose real path is already being descended by one of
/// its ancestors. Holds the ancestor's real path by value and has no children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CyclicLinkedDir {
    path: PathIdentity,
    target_path: PathBuf,
}

impl CyclicLinkedDir {
    pub(crate) fn new(path: PathIdentity, target_path: PathBuf) -> Self {
        CyclicLinkedDir { path, target_path }
    }

    pub fn path(&self) -> &PathIdentity {
        &self.path
    }

    /// Real path of the ancestor this link cycles back to.
    pub fn target_path(&self) -> &Path {
        &self.target_path
    }
}

/// A symlinked directory left undescended because links were not followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedDir {
    path: PathIdentity,
}

impl LinkedDir {
    pub(crate) fn new(path: PathIdentity) -> Self {
        LinkedDir { path }
    }

    pub fn path(&self) -> &PathIdentity {
        &self.path
    }
}

/// One entry of [`DirNode::directories`].
#[derive(Debug, Clone, PartialEq, Eq, IsVariant)]
pub enum Subdir {
    Dir(DirNode),
    Cyclic(CyclicLinkedDir),
    Linked(LinkedDir),
}

impl Subdir {
    pub fn path(&self) -> &PathIdentity {
        match self {
            Subdir::Dir(dir) => dir.path(),
            Subdir::Cyclic(link) => link.path(),
            Subdir::Linked(link) => link.path(),
        }
    }

    pub fn as_dir(&self) -> Option<&DirNode> {
        match self {
            Subdir::Dir(dir) => Some(dir),
            _ => None,
        }
    }

    pub fn as_cyclic(&self) -> Option<&CyclicLinkedDir> {
        match self {
            Subdir::Cyclic(link) => Some(link),
            _ => None,
        }
    }
}

/// A scanned directory owning its filtered children.
///
/// Files and sub-directories are stored separately, each in name order.
/// Equality is structural and includes every [`PathIdentity`], so the same
/// content scanned from two locations is unequal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirNode {
    path: PathIdentity,
    files: Vec<FileNode>,
    directories: Vec<Subdir>,
}

impl DirNode {
    pub(crate) fn new(path: PathIdentity, files: Vec<FileNode>, directories: Vec<Subdir>) -> Self {
        DirNode {
            path,
            files,
            directories,
        }
    }

    pub fn path(&self) -> &PathIdentity {
        &self.path
    }

    pub fn files(&self) -> &[FileNode] {
        &self.files
    }

    pub fn directories(&self) -> &[Subdir] {
        &self.directories
    }

    /// Files and sub-directories merged back into candidate (name) order.
    pub fn entries(&self) -> Entries<'_> {
        Entries {
            files: &self.files,
            directories: &self.directories,
        }
    }

    /// A directory with neither files nor sub-directories.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.directories.is_empty()
    }
}

/// Borrowed view of any node of a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IsVariant)]
pub enum Node<'a> {
    File(&'a FileNode),
    Dir(&'a DirNode),
    Cyclic(&'a CyclicLinkedDir),
    Linked(&'a LinkedDir),
}

impl<'a> Node<'a> {
    pub fn path(&self) -> &'a PathIdentity {
        match *self {
            Node::File(file) => file.path(),
            Node::Dir(dir) => dir.path(),
            Node::Cyclic(link) => link.path(),
            Node::Linked(link) => link.path(),
        }
    }
}

impl<'a> From<&'a Subdir> for Node<'a> {
    fn from(subdir: &'a Subdir) -> Self {
        match subdir {
            Subdir::Dir(dir) => Node::Dir(dir),
            Subdir::Cyclic(link) => Node::Cyclic(link),
            Subdir::Linked(link) => Node::Linked(link),
        }
    }
}

/// One item of [`DirNode::entries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, IsVariant)]
pub enum Entry<'a> {
    File(&'a FileNode),
    Dir(&'a Subdir),
}

impl<'a> Entry<'a> {
    pub fn path(&self) -> &'a PathIdentity {
        match *self {
            Entry::File(file) => file.path(),
            Entry::Dir(dir) => dir.path(),
        }
    }
}

/// Merges the two name-ordered child lists of a [`DirNode`].
#[derive(Debug, Clone)]
pub struct Entries<'a> {
    files: &'a [FileNode],
    directories: &'a [Subdir],
}

impl<'a> Iterator for Entries<'a> {
    type Item = Entry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let take_file = match (self.files.first(), self.directories.first()) {
            (None, None) => return None,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (Some(file), Some(dir)) => {
                file.path().name().cmp(dir.path().name()) != Ordering::Greater
            }
        };

        if take_file {
            let (file, rest) = self.files.split_first()?;
            self.files = rest;
            Some(Entry::File(file))
        } else {
            let (dir, rest) = self.directories.split_first()?;
            self.directories = rest;
            Some(Entry::Dir(dir))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.files.len() + self.directories.len();
        (len, Some(len))
    }
}

impl ExactSizeIterator for Entries<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::EntryKind;

    fn file(relative: &str) -> FileNode {
        FileNode::new(PathIdentity::mock(relative, EntryKind::File, false))
    }

    fn dir(relative: &str, files: Vec<FileNode>, directories: Vec<Subdir>) -> DirNode {
        DirNode::new(
            PathIdentity::mock(relative, EntryKind::Dir, false),
            files,
            directories,
        )
    }

    #[test]
    fn entries_merge_files_and_directories_by_name() {
        let tree = dir(
            "",
            vec![file("a.txt"), file("c.txt"), file("e.txt")],
            vec![
                Subdir::Dir(dir("b", vec![], vec![])),
                Subdir::Dir(dir("d", vec![], vec![])),
            ],
        );

        let names = tree
            .entries()
            .map(|entry| entry.path().name().to_string_lossy().into_owned())
            .collect::<Vec<_>>();

        assert_eq!(names, vec!["a.txt", "b", "c.txt", "d", "e.txt"]);
        assert_eq!(tree.entries().len(), 5);
        assert!(tree.entries().next().unwrap().is_file());
    }

    #[test]
    fn empty_directory_has_no_entries() {
        let tree = dir("", vec![], vec![]);

        assert!(tree.is_empty());
        assert_eq!(tree.entries().count(), 0);
    }

    #[test]
    fn markers_are_not_descendable() {
        let cyclic = Subdir::Cyclic(CyclicLinkedDir::new(
            PathIdentity::mock("a/back", EntryKind::Dir, true),
            PathBuf::from("/mock/a"),
        ));
        let linked = Subdir::Linked(LinkedDir::new(PathIdentity::mock(
            "a/other",
            EntryKind::Dir,
            true,
        )));

        assert!(cyclic.is_cyclic());
        assert!(cyclic.as_dir().is_none());
        assert_eq!(
            cyclic.as_cyclic().unwrap().target_path(),
            Path::new("/mock/a")
        );
        assert!(linked.is_linked());
        assert_eq!(linked.path().relative(), Path::new("a/other"));
    }

    #[test]
    fn equality_covers_identities_and_children() {
        let first = dir(
            "",
            vec![file("a")],
            vec![Subdir::Dir(dir("d", vec![], vec![]))],
        );
        let same = first.clone();
        let fewer_children = dir("", vec![file("a")], vec![]);
        let different_file = dir(
            "",
            vec![file("b")],
            vec![Subdir::Dir(dir("d", vec![], vec![]))],
        );

        assert_eq!(first, same);
        assert_ne!(first, fewer_children);
        assert_ne!(first, different_file);
    }
}
