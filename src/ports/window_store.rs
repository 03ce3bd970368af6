use crate::domain::{Category, Number};

/// Port for the per-category rolling windows
pub trait WindowStore: Send + Sync {
    /// Current contents of the category's window, oldest first
    fn snapshot(&self, category: Category) -> Vec<Number>;

    /// Append every candidate not already in the window, in input order, evicting
    /// the oldest entries on overflow. Returns the accepted values.
    ///
    /// Applied atomically with respect to other merges on the same category.
    fn merge_unique(&self, category: Category, candidates: &[Number]) -> Vec<Number>;
}
