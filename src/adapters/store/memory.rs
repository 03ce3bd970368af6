use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::domain::{Category, Number, Window};
use crate::ports::WindowStore;

/// In-memory window store with one lock per category
pub struct MemoryWindowStore {
    windows: [Mutex<Window>; Category::COUNT],
}

impl MemoryWindowStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            windows: Category::ALL.map(|_| Mutex::new(Window::new(capacity))),
        }
    }

    // A panicking holder cannot leave a window half-updated, so poisoned locks are reused.
    fn window(&self, category: Category) -> MutexGuard<'_, Window> {
        self.windows[category as usize]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl WindowStore for MemoryWindowStore {
    fn snapshot(&self, category: Category) -> Vec<Number> {
        self.window(category).to_vec()
    }

    fn merge_unique(&self, category: Category, candidates: &[Number]) -> Vec<Number> {
        let mut window = self.window(category);
        let accepted: Vec<Number> = candidates
            .iter()
            .copied()
            .filter(|&value| window.push_unique(value))
            .collect();

        debug!(
            category = %category,
            offered = candidates.len(),
            accepted = accepted.len(),
            size = window.len(),
            "merged candidates"
        );
        accepted
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn nums(values: &[i64]) -> Vec<Number> {
        values.iter().copied().map(Number::from).collect()
    }

    #[test]
    fn new_store_starts_empty() {
        let store = MemoryWindowStore::new(10);
        for category in Category::ALL {
            assert!(store.snapshot(category).is_empty());
        }
    }

    #[test]
    fn intra_batch_duplicates_accepted_once() {
        let store = MemoryWindowStore::new(10);
        let accepted = store.merge_unique(Category::Even, &nums(&[4, 8, 4, 12, 20]));
        assert_eq!(accepted, vec![4, 8, 12, 20]);
        assert_eq!(store.snapshot(Category::Even), vec![4, 8, 12, 20]);
    }

    #[test]
    fn values_already_present_are_dropped() {
        let store = MemoryWindowStore::new(10);
        store.merge_unique(Category::Prime, &nums(&[2, 3, 5]));

        let accepted = store.merge_unique(Category::Prime, &nums(&[5, 7]));
        assert_eq!(accepted, vec![7]);
        assert_eq!(store.snapshot(Category::Prime), vec![2, 3, 5, 7]);
    }

    #[test]
    fn full_duplicate_batch_leaves_window_unchanged() {
        let store = MemoryWindowStore::new(10);
        store.merge_unique(Category::Random, &nums(&[10, 20, 30]));
        let before = store.snapshot(Category::Random);

        let accepted = store.merge_unique(Category::Random, &nums(&[30, 10, 20, 10]));
        assert!(accepted.is_empty());
        assert_eq!(store.snapshot(Category::Random), before);
    }

    #[test]
    fn overflow_evicts_oldest_in_fifo_order() {
        let store = MemoryWindowStore::new(10);
        let values: Vec<i64> = (1..=11).collect();
        let accepted = store.merge_unique(Category::Random, &nums(&values));

        assert_eq!(accepted, values);
        assert_eq!(store.snapshot(Category::Random), (2..=11).collect::<Vec<i64>>());
    }

    #[test]
    fn full_window_takes_new_value_at_the_end() {
        let store = MemoryWindowStore::new(10);
        store.merge_unique(Category::Prime, &nums(&[2, 3, 5, 7, 11, 13, 17, 19, 23, 29]));

        let accepted = store.merge_unique(Category::Prime, &nums(&[31]));
        assert_eq!(accepted, vec![31]);

        let window = store.snapshot(Category::Prime);
        assert_eq!(window.len(), 10);
        assert_eq!(window.first().copied(), Some(Number::from(3)));
        assert_eq!(window.last().copied(), Some(Number::from(31)));
    }

    #[test]
    fn categories_are_independent() {
        let store = MemoryWindowStore::new(10);
        store.merge_unique(Category::Prime, &nums(&[2, 3]));
        let accepted = store.merge_unique(Category::Fibonacci, &nums(&[2, 3]));

        assert_eq!(accepted, vec![2, 3]);
        assert!(store.snapshot(Category::Even).is_empty());
        assert!(store.snapshot(Category::Random).is_empty());
    }

    #[test]
    fn window_never_exceeds_capacity() {
        let store = MemoryWindowStore::new(10);
        for round in 0..50i64 {
            let batch: Vec<i64> = (0..7).map(|i| (round * 7 + i) % 23).collect();
            for category in Category::ALL {
                store.merge_unique(category, &nums(&batch));
                assert!(store.snapshot(category).len() <= 10);
            }
        }
    }

    #[test]
    fn zero_capacity_keeps_one_slot() {
        let store = MemoryWindowStore::new(0);
        store.merge_unique(Category::Even, &nums(&[2, 4]));
        assert_eq!(store.snapshot(Category::Even), vec![4]);
    }

    #[test]
    fn concurrent_merges_never_duplicate_values() {
        let store = Arc::new(MemoryWindowStore::new(64));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.merge_unique(Category::Random, &nums(&(0..32).collect::<Vec<i64>>())))
            })
            .collect();

        let total_accepted: usize = handles
            .into_iter()
            .map(|h| h.join().unwrap().len())
            .sum();

        assert_eq!(total_accepted, 32);
        let mut window = store.snapshot(Category::Random);
        window.sort_unstable();
        assert_eq!(window, (0..32).collect::<Vec<i64>>());
    }
}
