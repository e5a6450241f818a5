use std::fmt;
use std::sync::Arc;

use crate::path::PathIdentity;

type Predicate = dyn Fn(Vec<PathIdentity>) -> Vec<PathIdentity> + Send + Sync;

/// A caller-supplied filter deciding over all siblings at once, which allows
/// decisions that depend on the other entries of the same directory.
///
/// The returned entries may come back in any order and may repeat; the scan
/// keeps one entry per name, in name order.
#[derive(Clone)]
pub struct CustomFilter {
    predicate: Arc<Predicate>,
}

impl CustomFilter {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(Vec<PathIdentity>) -> Vec<PathIdentity> + Send + Sync + 'static,
    {
        CustomFilter {
            predicate: Arc::new(predicate),
        }
    }

    pub fn accept(&self, candidates: Vec<PathIdentity>) -> Vec<PathIdentity> {
        (self.predicate)(candidates)
    }
}

impl fmt::Debug for CustomFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomFilter").finish_non_exhaustive()
    }
}
