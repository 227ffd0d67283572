//! Kernel row cache
//!
//! Memoizes rows of the kernel matrix on first access, with LRU eviction
//! under a configurable row budget. The SMO inner loop consumes whole rows
//! (pair values plus the error-cache update), so row granularity amortizes
//! far better than single entries. Cached rows are recomputed from the
//! kernel on a miss and are therefore bit-identical to direct evaluation.

use crate::core::Sample;
use crate::kernel::Kernel;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// LRU cache of kernel matrix rows for one training set
pub struct KernelCache<'a> {
    kernel: Kernel,
    samples: &'a [Sample],
    rows: LruCache<usize, Arc<Vec<f64>>>,
    hits: u64,
    misses: u64,
}

impl<'a> KernelCache<'a> {
    /// Create a cache holding at most `capacity` rows
    pub fn new(kernel: Kernel, samples: &'a [Sample], capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::new(1).unwrap());
        Self {
            kernel,
            samples,
            rows: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Row `i` of the kernel matrix: K(x_i, x_j) for every j
    ///
    /// Rows are shared via `Arc` so a caller can hold two rows across
    /// further cache accesses.
    pub fn row(&mut self, i: usize) -> Arc<Vec<f64>> {
        if let Some(row) = self.rows.get(&i) {
            self.hits += 1;
            return Arc::clone(row);
        }
        self.misses += 1;

        let xi = &self.samples[i].features;
        let row: Arc<Vec<f64>> = Arc::new(
            self.samples
                .iter()
                .map(|s| self.kernel.compute(xi, &s.features))
                .collect(),
        );
        self.rows.put(i, Arc::clone(&row));
        row
    }

    /// Single kernel value K(x_i, x_j) through the row cache
    pub fn value(&mut self, i: usize, j: usize) -> f64 {
        self.row(i)[j]
    }

    /// Get cache hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            capacity: self.rows.cap().get(),
            size: self.rows.len(),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub capacity: usize,
    pub size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<Sample> {
        vec![
            Sample::new(vec![1.0, 0.0], 1.0),
            Sample::new(vec![0.0, 1.0], -1.0),
            Sample::new(vec![2.0, 2.0], 1.0),
        ]
    }

    #[test]
    fn test_rows_match_direct_evaluation() {
        let samples = samples();
        let kernel = Kernel::rbf(0.5);
        let mut cache = KernelCache::new(kernel, &samples, 8);

        for i in 0..samples.len() {
            let row = cache.row(i);
            for j in 0..samples.len() {
                let direct = kernel.compute(&samples[i].features, &samples[j].features);
                assert_eq!(row[j], direct);
            }
        }
    }

    #[test]
    fn test_value_is_symmetric() {
        let samples = samples();
        let mut cache = KernelCache::new(Kernel::Linear, &samples, 8);

        assert_eq!(cache.value(0, 2), cache.value(2, 0));
    }

    #[test]
    fn test_hit_and_miss_accounting() {
        let samples = samples();
        let mut cache = KernelCache::new(Kernel::Linear, &samples, 8);

        assert_eq!(cache.hit_rate(), 0.0);

        cache.row(0); // miss
        cache.row(0); // hit
        cache.row(1); // miss
        cache.row(0); // hit

        let stats = cache.stats();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.size, 2);
        assert_eq!(cache.hit_rate(), 0.5);
    }

    #[test]
    fn test_lru_eviction() {
        let samples = samples();
        let mut cache = KernelCache::new(Kernel::Linear, &samples, 1);

        cache.row(0);
        cache.row(1); // evicts row 0
        cache.row(0); // miss again

        let stats = cache.stats();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 3);
        assert_eq!(stats.size, 1);
    }

    #[test]
    fn test_zero_capacity_clamps_to_one() {
        let samples = samples();
        let cache = KernelCache::new(Kernel::Linear, &samples, 0);
        assert_eq!(cache.stats().capacity, 1);
    }
}
