//! Sequential Minimal Optimization (SMO) solver
//!
//! Solves the SVM dual problem
//! `maximize sum(alpha_i) - 1/2 sum_ij alpha_i alpha_j y_i y_j K(x_i, x_j)`
//! subject to `0 <= alpha_i <= C` and `sum(alpha_i y_i) = 0` by repeatedly
//! optimizing one pair of multipliers in closed form (Platt, "Fast Training
//! of Support Vector Machines using Sequential Minimal Optimization").
//!
//! Candidate scans are shuffled with an RNG seeded from the configuration,
//! so identical seeds produce identical training trajectories.

use crate::cache::KernelCache;
use crate::core::{OptimizationResult, OptimizerConfig, Result, SVMError, Sample};
use crate::kernel::Kernel;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Multipliers at or below this value are treated as zero when extracting
/// support vectors.
pub const SV_THRESHOLD: f64 = 1e-8;

/// SMO solver for the SVM dual problem
pub struct SMOSolver {
    kernel: Kernel,
    config: OptimizerConfig,
}

/// Mutable training state: multipliers, threshold, error cache
///
/// `errors[i]` tracks `f(x_i) - y_i` and is authoritative only while
/// `alpha[i]` is strictly between the bounds; for bound multipliers the
/// error is recomputed from the current support set on demand.
struct State {
    alpha: Vec<f64>,
    errors: Vec<f64>,
    /// Platt's threshold b; the decision function during training is
    /// `sum(alpha_i y_i K(x_i, x)) - threshold`
    threshold: f64,
}

impl SMOSolver {
    /// Create a new solver with the given kernel and configuration
    pub fn new(kernel: Kernel, config: OptimizerConfig) -> Self {
        Self { kernel, config }
    }

    /// Get the solver configuration
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Solve the dual problem for the given training set
    ///
    /// Validates the configuration and the training set before any
    /// optimization work. Hitting the iteration cap is a normal termination
    /// path, reported through [`OptimizationResult::converged`].
    pub fn solve(&self, samples: &[Sample]) -> Result<OptimizationResult> {
        self.validate(samples)?;

        let n = samples.len();
        let c = self.config.c;
        let mut cache = KernelCache::new(self.kernel, samples, self.config.cache_rows);
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut state = State {
            alpha: vec![0.0; n],
            errors: vec![0.0; n],
            threshold: 0.0,
        };

        info!(
            "fitting {n} samples, C={c}, up to {} passes",
            self.config.max_iterations
        );

        let mut iterations = 0;
        let mut num_changed = 0;
        let mut examine_all = true;

        while (num_changed > 0 || examine_all) && iterations < self.config.max_iterations {
            num_changed = 0;

            if examine_all {
                for i in 0..n {
                    if self.examine_example(i, samples, &mut state, &mut cache, &mut rng) {
                        num_changed += 1;
                    }
                }
            } else {
                // Only multipliers strictly inside the box can still violate
                // the KKT conditions silently.
                for i in 0..n {
                    if self.is_non_bound(state.alpha[i])
                        && self.examine_example(i, samples, &mut state, &mut cache, &mut rng)
                    {
                        num_changed += 1;
                    }
                }
            }

            if examine_all {
                examine_all = false;
            } else if num_changed == 0 {
                examine_all = true;
            }

            iterations += 1;
            debug!("pass {iterations}: {num_changed} multipliers changed");
        }

        // The loop exits naturally only after a full pass changed nothing.
        let converged = num_changed == 0 && !examine_all;

        let support_vectors: Vec<usize> = state
            .alpha
            .iter()
            .enumerate()
            .filter_map(|(i, &a)| if a > SV_THRESHOLD { Some(i) } else { None })
            .collect();

        info!(
            "finished after {iterations} passes (converged: {converged}), \
             {} support vectors, cache hit rate {:.2}",
            support_vectors.len(),
            cache.hit_rate()
        );

        Ok(OptimizationResult {
            alpha: state.alpha,
            threshold: state.threshold,
            support_vectors,
            iterations,
            converged,
        })
    }

    /// Eager validation of configuration and training set
    fn validate(&self, samples: &[Sample]) -> Result<()> {
        if !(self.config.c > 0.0) {
            return Err(SVMError::InvalidParameter(format!(
                "C must be positive, got {}",
                self.config.c
            )));
        }
        if !(self.config.tolerance > 0.0) {
            return Err(SVMError::InvalidParameter(format!(
                "tolerance must be positive, got {}",
                self.config.tolerance
            )));
        }
        if self.config.max_iterations == 0 {
            return Err(SVMError::InvalidParameter(
                "max_iterations must be positive".to_string(),
            ));
        }
        self.kernel.validate()?;

        if samples.is_empty() {
            return Err(SVMError::EmptyDataset);
        }
        let dim = samples[0].dim();
        if dim == 0 {
            return Err(SVMError::InvalidParameter(
                "samples must have at least one feature".to_string(),
            ));
        }
        for sample in samples {
            if sample.dim() != dim {
                return Err(SVMError::DimensionMismatch {
                    expected: dim,
                    actual: sample.dim(),
                });
            }
            if sample.label != 1.0 && sample.label != -1.0 {
                return Err(SVMError::InvalidLabel(sample.label));
            }
        }
        let has_positive = samples.iter().any(|s| s.label > 0.0);
        let has_negative = samples.iter().any(|s| s.label < 0.0);
        if !has_positive || !has_negative {
            return Err(SVMError::SingleClass);
        }
        Ok(())
    }

    fn is_non_bound(&self, alpha: f64) -> bool {
        alpha > self.config.tolerance && alpha < self.config.c - self.config.tolerance
    }

    /// Training-time decision value for sample `i`, without the label
    fn output(&self, i: usize, samples: &[Sample], state: &State, cache: &mut KernelCache) -> f64 {
        let row = cache.row(i);
        let mut sum = 0.0;
        for (k, sample) in samples.iter().enumerate() {
            if state.alpha[k] > 0.0 {
                sum += state.alpha[k] * sample.label * row[k];
            }
        }
        sum - state.threshold
    }

    /// Error `f(x_i) - y_i`, from the cache when valid
    fn error(&self, i: usize, samples: &[Sample], state: &State, cache: &mut KernelCache) -> f64 {
        if self.is_non_bound(state.alpha[i]) {
            state.errors[i]
        } else {
            self.output(i, samples, state, cache) - samples[i].label
        }
    }

    /// Examine one example for a KKT violation and try to optimize it
    /// against a partner
    fn examine_example(
        &self,
        i2: usize,
        samples: &[Sample],
        state: &mut State,
        cache: &mut KernelCache,
        rng: &mut StdRng,
    ) -> bool {
        let y2 = samples[i2].label;
        let alph2 = state.alpha[i2];
        let e2 = self.error(i2, samples, state, cache);
        let r2 = e2 * y2;

        let violates = (r2 < -self.config.tolerance && alph2 < self.config.c)
            || (r2 > self.config.tolerance && alph2 > 0.0);
        if !violates {
            return false;
        }

        // Second-choice heuristic: the non-bound partner with the largest
        // error gap promises the biggest step.
        let non_bound: Vec<usize> = (0..samples.len())
            .filter(|&k| self.is_non_bound(state.alpha[k]))
            .collect();
        if non_bound.len() > 1 {
            let mut best = None;
            let mut best_gap = 0.0;
            for &k in &non_bound {
                let gap = (state.errors[k] - e2).abs();
                if gap > best_gap {
                    best_gap = gap;
                    best = Some(k);
                }
            }
            if let Some(i1) = best {
                if self.take_step(i1, i2, samples, state, cache) {
                    return true;
                }
            }
        }

        // Fall back to a seeded shuffled scan over the non-bound set, then
        // over the whole training set.
        let mut candidates = non_bound;
        candidates.shuffle(rng);
        for i1 in candidates {
            if self.take_step(i1, i2, samples, state, cache) {
                return true;
            }
        }

        let mut all: Vec<usize> = (0..samples.len()).collect();
        all.shuffle(rng);
        for i1 in all {
            if self.take_step(i1, i2, samples, state, cache) {
                return true;
            }
        }

        false
    }

    /// Jointly optimize the pair (i1, i2)
    ///
    /// Returns false when the pair makes no progress: equal indices, an
    /// empty feasible segment, degenerate curvature with no better
    /// endpoint, or an update below the minimum-progress threshold. Both
    /// multipliers move together, which preserves `sum(alpha_i y_i) = 0`
    /// at every step.
    fn take_step(
        &self,
        i1: usize,
        i2: usize,
        samples: &[Sample],
        state: &mut State,
        cache: &mut KernelCache,
    ) -> bool {
        if i1 == i2 {
            return false;
        }

        let c = self.config.c;
        let tol = self.config.tolerance;
        let y1 = samples[i1].label;
        let y2 = samples[i2].label;
        let alph1 = state.alpha[i1];
        let alph2 = state.alpha[i2];
        let e1 = self.error(i1, samples, state, cache);
        let e2 = self.error(i2, samples, state, cache);
        let s = y1 * y2;

        // Feasible segment for alpha_2 along the constraint line.
        let (low, high) = if y1 != y2 {
            ((alph2 - alph1).max(0.0), (c + alph2 - alph1).min(c))
        } else {
            ((alph2 + alph1 - c).max(0.0), (alph2 + alph1).min(c))
        };
        if low >= high {
            return false;
        }

        let row1 = cache.row(i1);
        let row2 = cache.row(i2);
        let k11 = row1[i1];
        let k12 = row1[i2];
        let k22 = row2[i2];
        let eta = k11 + k22 - 2.0 * k12;

        let a2 = if eta > 0.0 {
            clip_value(alph2 + y2 * (e1 - e2) / eta, high, low)
        } else {
            // Zero or negative curvature (duplicate or degenerate points):
            // the objective is linear or concave along the segment, so the
            // optimum sits at an endpoint. No division by eta here.
            let l_obj =
                self.endpoint_objective(low, alph1, alph2, k11, k12, k22, s, y1, y2, e1, e2, state);
            let h_obj = self
                .endpoint_objective(high, alph1, alph2, k11, k12, k22, s, y1, y2, e1, e2, state);
            if l_obj < h_obj - tol {
                low
            } else if l_obj > h_obj + tol {
                high
            } else {
                return false;
            }
        };

        if (a2 - alph2).abs() < tol * (a2 + alph2 + tol) {
            return false;
        }

        let a1 = alph1 + s * (alph2 - a2);

        // Threshold update: exact when either new multiplier is on the
        // margin, averaged otherwise.
        let b1 = e1 + y1 * (a1 - alph1) * k11 + y2 * (a2 - alph2) * k12 + state.threshold;
        let b2 = e2 + y1 * (a1 - alph1) * k12 + y2 * (a2 - alph2) * k22 + state.threshold;
        let new_threshold = if a1 > 0.0 && a1 < c {
            b1
        } else if a2 > 0.0 && a2 < c {
            b2
        } else {
            (b1 + b2) / 2.0
        };
        let delta_threshold = new_threshold - state.threshold;
        state.threshold = new_threshold;

        // Incremental error-cache update for non-bound multipliers.
        let t1 = y1 * (a1 - alph1);
        let t2 = y2 * (a2 - alph2);
        for k in 0..samples.len() {
            if state.alpha[k] > 0.0 && state.alpha[k] < c {
                state.errors[k] += t1 * row1[k] + t2 * row2[k] - delta_threshold;
            }
        }
        state.errors[i1] = 0.0;
        state.errors[i2] = 0.0;

        state.alpha[i1] = a1;
        state.alpha[i2] = a2;

        true
    }

    /// Dual objective evaluated with alpha_2 moved to `v` (and alpha_1
    /// adjusted along the constraint line), used to compare the segment
    /// endpoints when the curvature is not positive
    #[allow(clippy::too_many_arguments)]
    fn endpoint_objective(
        &self,
        v: f64,
        alph1: f64,
        alph2: f64,
        k11: f64,
        k12: f64,
        k22: f64,
        s: f64,
        y1: f64,
        y2: f64,
        e1: f64,
        e2: f64,
        state: &State,
    ) -> f64 {
        let f1 = y1 * (e1 + state.threshold) - alph1 * k11 - s * alph2 * k12;
        let f2 = y2 * (e2 + state.threshold) - s * alph1 * k12 - alph2 * k22;
        let v1 = alph1 + s * (alph2 - v);
        v1 * f1 + v * f2 + 0.5 * v1 * v1 * k11 + 0.5 * v * v * k22 + s * v * v1 * k12
    }
}

fn clip_value(value: f64, high: f64, low: f64) -> f64 {
    if value < low {
        low
    } else if value > high {
        high
    } else {
        value
    }
}
