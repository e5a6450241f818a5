//! Deciding which children of a directory make it into the tree.
//!
//! A filter sees the complete, name-ordered candidate list of one directory
//! at a time and returns the accepted subset. Rejected directories are pruned
//! before the scan descends into them.

mod custom_filter;
mod filter;
mod wildcard_filter;

pub use custom_filter::CustomFilter;
pub use filter::Filter;
pub use wildcard_filter::{FilterError, WildcardFilter};
