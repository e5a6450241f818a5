use std::collections::HashMap;
use std::convert::Infallible;
use std::hash::BuildHasherDefault;
use std::marker::PhantomData;
use std::path::PathBuf;
use std::slice;

use metrohash::MetroHash64;

use crate::node::{CyclicLinkedDir, DirNode, FileNode, LinkedDir, Subdir};
use crate::path::PathIdentity;

/// Bottom-up computation over a scanned tree.
///
/// Children are always folded before their parent. Within a directory the
/// files are folded first, then the sub-directories, both in stored order.
/// Markers for undescended symlinked directories go to [`Fold::link`], never to
/// [`Fold::dir`], since they have no children.
pub trait Fold {
    type Output;
    type Error;

    fn file(&mut self, file: &FileNode) -> Result<Self::Output, Self::Error>;

    fn dir(&mut self, dir: DirView<'_, Self::Output>) -> Result<Self::Output, Self::Error>;

    fn link(&mut self, link: LinkView<'_>) -> Result<Self::Output, Self::Error>;
}

/// A terminal directory marker handed to [`Fold::link`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkView<'a> {
    Cyclic(&'a CyclicLinkedDir),
    Unfollowed(&'a LinkedDir),
}

impl<'a> LinkView<'a> {
    pub fn path(&self) -> &'a PathIdentity {
        match *self {
            LinkView::Cyclic(link) => link.path(),
            LinkView::Unfollowed(link) => link.path(),
        }
    }
}

/// A directory together with the already computed results of its children.
#[derive(Debug)]
pub struct DirView<'a, R> {
    node: &'a DirNode,
    files: Vec<R>,
    directories: Vec<R>,
}

impl<'a, R> DirView<'a, R> {
    pub fn path(&self) -> &'a PathIdentity {
        self.node.path()
    }

    /// The directory as it was scanned.
    pub fn node(&self) -> &'a DirNode {
        self.node
    }

    pub fn files(&self) -> &[R] {
        &self.files
    }

    pub fn directories(&self) -> &[R] {
        &self.directories
    }

    /// Results of all children, files first.
    pub fn children(&self) -> impl Iterator<Item = &R> {
        self.files.iter().chain(self.directories.iter())
    }

    pub fn into_children(self) -> impl Iterator<Item = R> {
        self.files.into_iter().chain(self.directories)
    }

    pub fn into_parts(self) -> (&'a PathIdentity, Vec<R>, Vec<R>) {
        (self.node.path(), self.files, self.directories)
    }
}

struct FoldFrame<'a, R> {
    node: &'a DirNode,
    files: Vec<R>,
    directories: Vec<R>,
    pending: slice::Iter<'a, Subdir>,
}

impl<'a, R> FoldFrame<'a, R> {
    fn open<F>(node: &'a DirNode, folder: &mut F) -> Result<Self, F::Error>
    where
        F: Fold<Output = R>,
    {
        let files = node
            .files()
            .iter()
            .map(|file| folder.file(file))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FoldFrame {
            node,
            files,
            directories: Vec::with_capacity(node.directories().len()),
            pending: node.directories().iter(),
        })
    }

    fn into_view(self) -> DirView<'a, R> {
        DirView {
            node: self.node,
            files: self.files,
            directories: self.directories,
        }
    }
}

impl DirNode {
    /// Runs `folder` over this tree and returns the result computed for `self`.
    ///
    /// Uses an explicit stack, so the depth of the tree is bounded by memory
    /// rather than by the call stack. The first error returned by `folder`
    /// stops the fold and is returned unchanged.
    pub fn fold<F: Fold>(&self, folder: &mut F) -> Result<F::Output, F::Error> {
        let mut stack = Vec::new();
        let mut current = FoldFrame::open(self, folder)?;

        loop {
            match current.pending.next() {
                Some(Subdir::Dir(dir)) => {
                    let frame = FoldFrame::open(dir, folder)?;
                    stack.push(std::mem::replace(&mut current, frame));
                }
                Some(Subdir::Cyclic(link)) => {
                    let result = folder.link(LinkView::Cyclic(link))?;
                    current.directories.push(result);
                }
                Some(Subdir::Linked(link)) => {
                    let result = folder.link(LinkView::Unfollowed(link))?;
                    current.directories.push(result);
                }
                None => {
                    let result = folder.dir(current.into_view())?;
                    match stack.pop() {
                        Some(mut parent) => {
                            parent.directories.push(result);
                            current = parent;
                        }
                        None => return Ok(result),
                    }
                }
            }
        }
    }

    /// Fallible closure form of [`DirNode::fold`].
    pub fn try_apply<R, E, FF, DF, LF>(
        &self,
        file_apply: FF,
        dir_apply: DF,
        link_apply: LF,
    ) -> Result<R, E>
    where
        FF: FnMut(&FileNode) -> Result<R, E>,
        DF: FnMut(DirView<'_, R>) -> Result<R, E>,
        LF: FnMut(LinkView<'_>) -> Result<R, E>,
    {
        self.fold(&mut FoldFn::new(file_apply, dir_apply, link_apply))
    }

    /// Closure form of [`DirNode::fold`].
    ///
    /// `dir_apply` may reduce its children to a scalar or embed them verbatim
    /// to build a parallel tree; `link_apply` receives every cyclic or
    /// unfollowed link marker.
    pub fn apply<R, FF, DF, LF>(
        &self,
        mut file_apply: FF,
        mut dir_apply: DF,
        mut link_apply: LF,
    ) -> R
    where
        FF: FnMut(&FileNode) -> R,
        DF: FnMut(DirView<'_, R>) -> R,
        LF: FnMut(LinkView<'_>) -> R,
    {
        let Ok(result) = self.try_apply(
            |file| Ok::<_, Infallible>(file_apply(file)),
            |view| Ok(dir_apply(view)),
            |link| Ok(link_apply(link)),
        );
        result
    }
}

/// Adapts three closures into a [`Fold`].
pub struct FoldFn<FF, DF, LF, R, E> {
    file_apply: FF,
    dir_apply: DF,
    link_apply: LF,
    _output: PhantomData<fn() -> Result<R, E>>,
}

impl<FF, DF, LF, R, E> FoldFn<FF, DF, LF, R, E>
where
    FF: FnMut(&FileNode) -> Result<R, E>,
    DF: FnMut(DirView<'_, R>) -> Result<R, E>,
    LF: FnMut(LinkView<'_>) -> Result<R, E>,
{
    pub fn new(file_apply: FF, dir_apply: DF, link_apply: LF) -> Self {
        FoldFn {
            file_apply,
            dir_apply,
            link_apply,
            _output: PhantomData,
        }
    }
}

impl<FF, DF, LF, R, E> Fold for FoldFn<FF, DF, LF, R, E>
where
    FF: FnMut(&FileNode) -> Result<R, E>,
    DF: FnMut(DirView<'_, R>) -> Result<R, E>,
    LF: FnMut(LinkView<'_>) -> Result<R, E>,
{
    type Output = R;
    type Error = E;

    fn file(&mut self, file: &FileNode) -> Result<R, E> {
        (self.file_apply)(file)
    }

    fn dir(&mut self, dir: DirView<'_, R>) -> Result<R, E> {
        (self.dir_apply)(dir)
    }

    fn link(&mut self, link: LinkView<'_>) -> Result<R, E> {
        (self.link_apply)(link)
    }
}

/// Evaluates the inner fold's file step at most once per real path.
///
/// Every further file resolving to an already seen real path (typically
/// through symlinks) gets a clone of the first result.
pub struct RealPathCache<F: Fold> {
    inner: F,
    cache: HashMap<PathBuf, F::Output, BuildHasherDefault<MetroHash64>>,
}

impl<F: Fold> RealPathCache<F> {
    pub fn new(inner: F) -> Self {
        RealPathCache {
            inner,
            cache: HashMap::default(),
        }
    }

    /// Number of distinct real paths evaluated so far.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn into_inner(self) -> F {
        self.inner
    }
}

impl<F> Fold for RealPathCache<F>
where
    F: Fold,
    F::Output: Clone,
{
    type Output = F::Output;
    type Error = F::Error;

    fn file(&mut self, file: &FileNode) -> Result<Self::Output, Self::Error> {
        if let Some(cached) = self.cache.get(file.path().real()) {
            return Ok(cached.clone());
        }
        let result = self.inner.file(file)?;
        self.cache
            .insert(file.path().real().to_path_buf(), result.clone());
        Ok(result)
    }

    fn dir(&mut self, dir: DirView<'_, Self::Output>) -> Result<Self::Output, Self::Error> {
        self.inner.dir(dir)
    }

    fn link(&mut self, link: LinkView<'_>) -> Result<Self::Output, Self::Error> {
        self.inner.link(link)
    }
}
