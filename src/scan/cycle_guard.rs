use std::path::{Path, PathBuf};

use hashlink::LinkedHashMap;

use crate::path::PathIdentity;

/// The chain of directories currently being descended, keyed by real path,
/// outermost first.
#[derive(Debug, Default)]
pub struct CycleGuard {
    chain: LinkedHashMap<PathBuf, PathIdentity>,
}

impl CycleGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The ancestor on the chain that resolves to `real`, if any.
    pub fn ancestor(&self, real: &Path) -> Option<&PathIdentity> {
        self.chain.get(real)
    }

    /// Pushes `dir` onto the chain. Returns `false`, leaving the chain as it
    /// was, when its real path is already on it.
    pub fn enter(&mut self, dir: &PathIdentity) -> bool {
        if self.chain.contains_key(dir.real()) {
            return false;
        }
        self.chain.insert(dir.real().to_path_buf(), dir.clone());
        true
    }

    /// Pops the innermost directory.
    pub fn leave(&mut self) -> Option<PathIdentity> {
        self.chain.pop_back().map(|(_, dir)| dir)
    }

    /// Pops every directory still on the chain, innermost first.
    pub fn unwind(&mut self) -> usize {
        let mut popped = 0;
        while self.leave().is_some() {
            popped += 1;
        }
        popped
    }

    pub fn depth(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Real paths on the chain, outermost first.
    pub fn chain(&self) -> impl Iterator<Item = &Path> {
        self.chain.keys().map(|real| real.as_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::EntryKind;

    fn dir(relative: &str) -> PathIdentity {
        PathIdentity::mock(relative, EntryKind::Dir, false)
    }

    #[test]
    fn enter_rejects_real_paths_already_on_the_chain() {
        let mut guard = CycleGuard::new();

        assert!(guard.enter(&dir("a")));
        assert!(guard.enter(&dir("a/b")));
        assert!(!guard.enter(&dir("a")));

        assert_eq!(guard.depth(), 2);
        assert_eq!(
            guard.ancestor(Path::new("/mock/a")).map(|p| p.relative()),
            Some(Path::new("a"))
        );
        assert!(guard.ancestor(Path::new("/mock/c")).is_none());
    }

    #[test]
    fn leave_pops_innermost_first() {
        let mut guard = CycleGuard::new();
        guard.enter(&dir("a"));
        guard.enter(&dir("a/b"));

        assert_eq!(
            guard.chain().collect::<Vec<_>>(),
            vec![Path::new("/mock/a"), Path::new("/mock/a/b")]
        );
        assert_eq!(
            guard.leave().map(|p| p.relative().to_path_buf()),
            Some("a/b".into())
        );
        assert!(guard.enter(&dir("a/b")));
    }

    #[test]
    fn unwind_empties_the_chain() {
        let mut guard = CycleGuard::new();
        guard.enter(&dir("a"));
        guard.enter(&dir("a/b"));
        guard.enter(&dir("a/b/c"));

        assert_eq!(guard.unwind(), 3);
        assert!(guard.is_empty());
        assert!(guard.leave().is_none());
    }
}
