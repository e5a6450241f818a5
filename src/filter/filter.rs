use crate::filter::{CustomFilter, FilterError, WildcardFilter};
use crate::path::PathIdentity;

#[derive(Debug, Clone, Default)]
pub enum Filter {
    /// Accepts every candidate.
    #[default]
    All,
    Wildcard(WildcardFilter),
    Custom(CustomFilter),
}

impl Filter {
    /// Compiles shell-style patterns matched against entry names; a leading
    /// `!` turns a pattern into an exclusion. See [`WildcardFilter`].
    pub fn wildcard<I, S>(patterns: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        WildcardFilter::new(patterns).map(Filter::Wildcard)
    }

    /// Wraps a predicate receiving all candidates of one directory.
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(Vec<PathIdentity>) -> Vec<PathIdentity> + Send + Sync + 'static,
    {
        Filter::Custom(CustomFilter::new(predicate))
    }

    /// Returns the accepted subset of the children of one directory.
    pub fn accept(&self, candidates: Vec<PathIdentity>) -> Vec<PathIdentity> {
        match self {
            Filter::All => candidates,
            Filter::Wildcard(filter) => filter.accept(candidates),
            Filter::Custom(filter) => filter.accept(candidates),
        }
    }
}

impl From<WildcardFilter> for Filter {
    fn from(filter: WildcardFilter) -> Self {
        Filter::Wildcard(filter)
    }
}

impl From<CustomFilter> for Filter {
    fn from(filter: CustomFilter) -> Self {
        Filter::Custom(filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::EntryKind;

    fn candidates() -> Vec<PathIdentity> {
        vec![
            PathIdentity::mock("a.txt", EntryKind::File, false),
            PathIdentity::mock("b.log", EntryKind::File, false),
            PathIdentity::mock("sub", EntryKind::Dir, false),
        ]
    }

    #[test]
    fn default_filter_accepts_everything() {
        let accepted = Filter::default().accept(candidates());

        assert_eq!(accepted, candidates());
    }

    #[test]
    fn wildcard_filter_is_dispatched() {
        let filter = Filter::wildcard(["*.txt"]).unwrap();

        let accepted = filter.accept(candidates());

        let names = accepted.iter().map(|c| c.name()).collect::<Vec<_>>();
        assert_eq!(names, vec!["a.txt", "sub"]);
    }

    #[test]
    fn custom_filter_is_dispatched() {
        let filter = Filter::custom(|candidates| {
            candidates.into_iter().filter(|c| c.is_dir()).collect()
        });

        let accepted = filter.accept(candidates());

        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].name(), "sub");
    }
}
