use std::time::Duration;

use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;

use crate::domain::{Category, Number};
use crate::ports::{FetchError, NumberSource};

pub const MOCK_BATCH_SIZE: usize = 5;

const PRIME_POOL: [i64; 15] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47];

// The sequence starts 1, 1 so the pool carries 1 twice.
const FIBONACCI_POOL: [i64; 13] = [1, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89, 144, 233];

/// Synthesize a plausible batch for `category`
pub fn generate<R: Rng + ?Sized>(category: Category, rng: &mut R) -> Vec<Number> {
    let values: Vec<i64> = match category {
        Category::Prime => sample(&PRIME_POOL, rng),
        Category::Fibonacci => sample(&FIBONACCI_POOL, rng),
        Category::Even => (0..MOCK_BATCH_SIZE)
            .map(|_| rng.gen_range(1..=10) * 2)
            .collect(),
        Category::Random => (0..MOCK_BATCH_SIZE)
            .map(|_| rng.gen_range(1..=100))
            .collect(),
    };
    values.into_iter().map(Number::from).collect()
}

fn sample<R: Rng + ?Sized>(pool: &[i64], rng: &mut R) -> Vec<i64> {
    pool.choose_multiple(rng, MOCK_BATCH_SIZE).copied().collect()
}

/// Number source that never leaves the process
///
/// Each fetch waits a random delay in `[0, delay_max]` to imitate network
/// latency, then returns a generated batch. It cannot fail.
#[derive(Debug, Clone)]
pub struct MockNumberSource {
    delay_max: Duration,
}

impl MockNumberSource {
    pub fn new(delay_max: Duration) -> Self {
        Self { delay_max }
    }

    /// Generated batch without the artificial delay
    pub fn batch(&self, category: Category) -> Vec<Number> {
        generate(category, &mut rand::thread_rng())
    }

    fn pick_delay(&self) -> Duration {
        let max_ms = u64::try_from(self.delay_max.as_millis()).unwrap_or(u64::MAX);
        if max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::thread_rng().gen_range(0..=max_ms))
    }
}

#[async_trait]
impl NumberSource for MockNumberSource {
    async fn fetch(&self, category: Category) -> Result<Vec<Number>, FetchError> {
        let delay = self.pick_delay();
        if !delay.is_zero() {
            trace!(category = %category, delay_ms = delay.as_millis() as u64, "simulating latency");
            tokio::time::sleep(delay).await;
        }
        Ok(self.batch(category))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn as_ints(batch: Vec<Number>) -> Vec<i64> {
        batch.iter().map(|n| n.as_f64() as i64).collect()
    }

    #[test]
    fn primes_sampled_without_replacement_from_pool() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let batch = as_ints(generate(Category::Prime, &mut rng));
            assert_eq!(batch.len(), MOCK_BATCH_SIZE);
            assert!(batch.iter().all(|v| PRIME_POOL.contains(v)));
            let distinct: HashSet<_> = batch.iter().collect();
            assert_eq!(distinct.len(), MOCK_BATCH_SIZE);
        }
    }

    #[test]
    fn fibonacci_drawn_from_pool() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let batch = as_ints(generate(Category::Fibonacci, &mut rng));
            assert_eq!(batch.len(), MOCK_BATCH_SIZE);
            assert!(batch.iter().all(|v| FIBONACCI_POOL.contains(v)));
            // only the doubled leading 1 can repeat
            assert!(batch.iter().filter(|&&v| v != 1).count() >= MOCK_BATCH_SIZE - 2);
        }
    }

    #[test]
    fn evens_are_doubled_small_integers() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let batch = as_ints(generate(Category::Even, &mut rng));
            assert_eq!(batch.len(), MOCK_BATCH_SIZE);
            assert!(batch.iter().all(|v| v % 2 == 0 && (2..=20).contains(v)));
        }
    }

    #[test]
    fn randoms_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let batch = as_ints(generate(Category::Random, &mut rng));
            assert_eq!(batch.len(), MOCK_BATCH_SIZE);
            assert!(batch.iter().all(|v| (1..=100).contains(v)));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_waits_at_most_delay_max() {
        let source = MockNumberSource::new(Duration::from_millis(300));
        let started = tokio::time::Instant::now();
        let batch = source.fetch(Category::Even).await.unwrap();

        assert_eq!(batch.len(), MOCK_BATCH_SIZE);
        assert!(started.elapsed() <= Duration::from_millis(300));
    }

    #[tokio::test]
    async fn zero_delay_source_does_not_sleep() {
        let source = MockNumberSource::new(Duration::ZERO);
        let started = std::time::Instant::now();
        source.fetch(Category::Prime).await.unwrap();
        assert!(started.elapsed() < Duration::from_millis(100));
    }
}
