use std::path::{Path, PathBuf};
use std::vec;

use tracing::{debug, trace};

use crate::filter::Filter;
use crate::node::{CyclicLinkedDir, DirNode, FileNode, LinkedDir, Subdir};
use crate::path::{EntryKind, PathIdentity};
use crate::scan::scan_error::SymlinkRecursionSnafu;
use crate::scan::{CycleGuard, ScanError};

/// Scans `root` with `filter` and default options.
pub fn scan(root: impl AsRef<Path>, filter: Filter) -> Result<DirNode, ScanError> {
    Scanner::new(root.as_ref()).filter(filter).scan()
}

/// Configures and runs a scan.
#[derive(Debug, Clone)]
pub struct Scanner {
    root: PathBuf,
    filter: Filter,
    follow_links: bool,
    allow_cyclic_links: bool,
    include_empty: bool,
}

impl Scanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Scanner {
            root: root.into(),
            filter: Filter::default(),
            follow_links: true,
            allow_cyclic_links: true,
            include_empty: true,
        }
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// When disabled, symlinked directories become [`LinkedDir`] markers.
    pub fn follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    /// When disabled, a symlink cycle fails the scan with
    /// [`ScanError::SymlinkRecursion`] instead of yielding a [`CyclicLinkedDir`].
    pub fn allow_cyclic_links(mut self, allow_cyclic_links: bool) -> Self {
        self.allow_cyclic_links = allow_cyclic_links;
        self
    }

    /// When disabled, directories left without files or sub-directories after
    /// filtering are dropped. The root is always kept.
    pub fn include_empty(mut self, include_empty: bool) -> Self {
        self.include_empty = include_empty;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walks the filesystem once and returns the complete tree, or the first
    /// error encountered. There is no partial result.
    pub fn scan(&self) -> Result<DirNode, ScanError> {
        let root = PathIdentity::from_root(&self.root)?;
        debug!("Scanning {}", root.absolute().display());

        let tree = TreeBuilder::new(self).build(root)?;
        debug!(
            "Scanned {}: {} files, {} directories",
            tree.path().absolute().display(),
            tree.filepaths().count(),
            tree.dirpaths().count()
        );
        Ok(tree)
    }
}

/// A directory being assembled.
struct Frame {
    path: PathIdentity,
    files: Vec<FileNode>,
    directories: Vec<Subdir>,
    pending: vec::IntoIter<PathIdentity>,
}

impl Frame {
    fn finish(self) -> DirNode {
        DirNode::new(self.path, self.files, self.directories)
    }
}

/// Depth-first construction on an explicit stack. The cycle guard holds the
/// real path of every open frame; frames are closed in lock step with the
/// guard, and everything still open is unwound when the build fails.
struct TreeBuilder<'a> {
    options: &'a Scanner,
    guard: CycleGuard,
    stack: Vec<Frame>,
}

impl<'a> TreeBuilder<'a> {
    fn new(options: &'a Scanner) -> Self {
        TreeBuilder {
            options,
            guard: CycleGuard::new(),
            stack: Vec::new(),
        }
    }

    fn build(&mut self, root: PathIdentity) -> Result<DirNode, ScanError> {
        let result = self.descend(root);
        if result.is_err() {
            let unwound = self.guard.unwind();
            self.stack.clear();
            trace!("Unwound {} open directories after failure", unwound);
        }
        result
    }

    fn descend(&mut self, root: PathIdentity) -> Result<DirNode, ScanError> {
        let mut current = self.open(root)?;

        loop {
            match current.pending.next() {
                Some(child) => {
                    if let Some(frame) = self.visit(&mut current, child)? {
                        self.stack.push(std::mem::replace(&mut current, frame));
                    }
                }
                None => {
                    let node = self.close(current);
                    match self.stack.pop() {
                        Some(mut parent) => {
                            if self.options.include_empty || !node.is_empty() {
                                parent.directories.push(Subdir::Dir(node));
                            } else {
                                trace!(
                                    "Dropping empty directory {}",
                                    node.path().relative().display()
                                );
                            }
                            current = parent;
                        }
                        None => return Ok(node),
                    }
                }
            }
        }
    }

    /// Reads and filters the children of `path` and enters it on the guard.
    fn open(&mut self, path: PathIdentity) -> Result<Frame, ScanError> {
        let candidates = path.read_children()?;
        let mut accepted = self.options.filter.accept(candidates);
        // whatever the filter returned, siblings stay unique and in name order
        accepted.sort_by(|a, b| a.name().cmp(b.name()));
        accepted.dedup_by(|a, b| a.name() == b.name());

        let mut files = Vec::new();
        let mut directories = Vec::new();
        for entry in accepted {
            match entry.kind() {
                EntryKind::File => files.push(FileNode::new(entry)),
                EntryKind::Dir => directories.push(entry),
                EntryKind::Other => {
                    trace!("Skipping {}", entry.absolute().display());
                }
            }
        }

        trace!("Entering {}", path.absolute().display());
        self.guard.enter(&path);
        Ok(Frame {
            path,
            files,
            directories: Vec::with_capacity(directories.len()),
            pending: directories.into_iter(),
        })
    }

    fn close(&mut self, frame: Frame) -> DirNode {
        self.guard.leave();
        frame.finish()
    }

    /// Handles one accepted sub-directory of `parent`: either records a marker
    /// in `parent` or opens a frame to descend into.
    fn visit(
        &mut self,
        parent: &mut Frame,
        child: PathIdentity,
    ) -> Result<Option<Frame>, ScanError> {
        if child.is_symlink() && !self.options.follow_links {
            parent.directories.push(Subdir::Linked(LinkedDir::new(child)));
            return Ok(None);
        }

        if let Some(ancestor) = self.guard.ancestor(child.real()) {
            if !self.options.allow_cyclic_links {
                return SymlinkRecursionSnafu {
                    real: child.real(),
                    first: ancestor.absolute(),
                    second: child.absolute(),
                }
                .fail();
            }

            debug!(
                "Cyclic link {} points back to {}",
                child.absolute().display(),
                ancestor.absolute().display()
            );
            let target_path = ancestor.real().to_path_buf();
            parent
                .directories
                .push(Subdir::Cyclic(CyclicLinkedDir::new(child, target_path)));
            return Ok(None);
        }

        self.open(child).map(Some)
    }
}
