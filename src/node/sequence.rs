use crate::node::{DirNode, Node};
use crate::path::PathIdentity;

/// Depth-first, pre-order traversal of an already scanned tree.
///
/// A directory is yielded before its contents; its files come next in name
/// order, followed by each sub-directory (and its contents) in name order.
/// Cloning the iterator, or asking the tree for a new one, starts an
/// independent traversal that yields the same sequence.
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    stack: Vec<Node<'a>>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Node::Dir(dir) = node {
            // reversed so the stack pops them in stored order
            self.stack
                .extend(dir.directories().iter().rev().map(Node::from));
            self.stack.extend(dir.files().iter().rev().map(Node::File));
        }
        Some(node)
    }
}

impl DirNode {
    /// Every node of the tree, starting with `self`.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![Node::Dir(self)],
        }
    }

    /// Identities of all files in the tree, in [`Walk`] order.
    pub fn filepaths(&self) -> impl Iterator<Item = &PathIdentity> + Clone + '_ {
        self.walk().filter_map(|node| match node {
            Node::File(file) => Some(file.path()),
            _ => None,
        })
    }

    /// Identities of all leaves: files plus cyclic and unfollowed link markers.
    /// Empty directories are not leaves.
    pub fn leafpaths(&self) -> impl Iterator<Item = &PathIdentity> + Clone + '_ {
        self.walk().filter_map(|node| match node {
            Node::Dir(_) => None,
            leaf => Some(leaf.path()),
        })
    }

    /// Identities of every scanned directory below `self`.
    pub fn dirpaths(&self) -> impl Iterator<Item = &PathIdentity> + Clone + '_ {
        self.walk().skip(1).filter_map(|node| match node {
            Node::Dir(dir) => Some(dir.path()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{CyclicLinkedDir, FileNode, LinkedDir, Subdir};
    use crate::path::EntryKind;
    use std::path::PathBuf;

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

    fn sample_tree() -> DirNode {
        dir(
            "",
            vec![file("f1")],
            vec![
                Subdir::Dir(dir(
                    "d1",
                    vec![file("d1/f1")],
                    vec![
                        Subdir::Dir(dir("d1/d11", vec![file("d1/d11/f1")], vec![])),
                        Subdir::Cyclic(CyclicLinkedDir::new(
                            PathIdentity::mock("d1/loop", EntryKind::Dir, true),
                            PathBuf::from("/mock/d1"),
                        )),
                    ],
                )),
                Subdir::Dir(dir("d2", vec![], vec![])),
                Subdir::Linked(LinkedDir::new(PathIdentity::mock(
                    "ext",
                    EntryKind::Dir,
                    true,
                ))),
            ],
        )
    }

    fn relatives<'a>(paths: impl Iterator<Item = &'a PathIdentity>) -> Vec<String> {
        paths
            .map(|path| path.relative().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn walk_is_pre_order_with_files_first() {
        let tree = sample_tree();

        let order = relatives(tree.walk().map(|node| node.path()));

        assert_eq!(
            order,
            vec![
                "", "f1", "d1", "d1/f1", "d1/d11", "d1/d11/f1", "d1/loop", "d2", "ext"
            ]
        );
    }

    #[test]
    fn filepaths_yields_only_files() {
        let tree = sample_tree();

        assert_eq!(
            relatives(tree.filepaths()),
            vec!["f1", "d1/f1", "d1/d11/f1"]
        );
    }

    #[test]
    fn leafpaths_includes_link_markers_but_not_empty_dirs() {
        let tree = sample_tree();

        assert_eq!(
            relatives(tree.leafpaths()),
            vec!["f1", "d1/f1", "d1/d11/f1", "d1/loop", "ext"]
        );
    }

    #[test]
    fn dirpaths_excludes_root_and_markers() {
        let tree = sample_tree();

        assert_eq!(relatives(tree.dirpaths()), vec!["d1", "d1/d11", "d2"]);
    }

    #[test]
    fn sequences_are_restartable() {
        let tree = sample_tree();

        let first = relatives(tree.leafpaths());
        let second = relatives(tree.leafpaths());
        assert_eq!(first, second);

        let mut partially_consumed = tree.filepaths();
        partially_consumed.next();
        let resumed = partially_consumed.clone();
        assert_eq!(relatives(partially_consumed), relatives(resumed));
        assert_eq!(relatives(tree.filepaths()).len(), 3);
    }

    #[test]
    fn walk_reports_node_kinds() {
        let tree = sample_tree();

        let kinds = tree
            .walk()
            .map(|node| (node.is_file(), node.is_dir(), node.is_cyclic(), node.is_linked()))
            .collect::<Vec<_>>();

        assert_eq!(kinds.iter().filter(|k| k.0).count(), 3);
        assert_eq!(kinds.iter().filter(|k| k.1).count(), 4);
        assert_eq!(kinds.iter().filter(|k| k.2).count(), 1);
        assert_eq!(kinds.iter().filter(|k| k.3).count(), 1);
    }
}
