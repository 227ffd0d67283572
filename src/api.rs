//! High-level two-phase API for SVM training and prediction
//!
//! [`SVM`] is a configuration value built up with the builder methods; it
//! owns no training state. [`SVM::fit`] runs the solver and produces an
//! immutable [`TrainedModel`] for the read-only prediction path.
//!
//! # Quick Start
//!
//! ```
//! use svmkit::{Kernel, SVM};
//!
//! # fn main() -> Result<(), svmkit::SVMError> {
//! let x = vec![vec![2.0], vec![1.5], vec![-2.0], vec![-1.5]];
//! let y = vec![1.0, 1.0, -1.0, -1.0];
//!
//! let model = SVM::new()
//!     .with_kernel(Kernel::rbf(0.5))
//!     .with_c(1.0)
//!     .with_tolerance(1e-4)
//!     .with_seed(16)
//!     .fit(&x, &y)?;
//!
//! let labels = model.predict_batch(&x)?;
//! assert_eq!(labels[0].label, 1.0);
//! # Ok(())
//! # }
//! ```

use crate::core::{OptimizerConfig, Prediction, Result, SVMError, Sample};
use crate::kernel::Kernel;
use crate::model::TrainedModel;
use crate::solver::SMOSolver;

/// SVM training configuration with builder pattern
#[derive(Debug, Clone)]
pub struct SVM {
    kernel: Kernel,
    config: OptimizerConfig,
}

impl SVM {
    /// Create a new SVM with linear kernel and default parameters
    pub fn new() -> Self {
        Self {
            kernel: Kernel::Linear,
            config: OptimizerConfig::default(),
        }
    }

    /// Set the kernel
    pub fn with_kernel(mut self, kernel: Kernel) -> Self {
        self.kernel = kernel;
        self
    }

    /// Set regularization parameter C
    pub fn with_c(mut self, c: f64) -> Self {
        self.config.c = c;
        self
    }

    /// Set convergence tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.config.tolerance = tolerance;
        self
    }

    /// Set maximum number of optimization passes
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.config.max_iterations = max_iterations;
        self
    }

    /// Set the reproducibility seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Set the kernel cache budget in rows
    pub fn with_cache_rows(mut self, cache_rows: usize) -> Self {
        self.config.cache_rows = cache_rows;
        self
    }

    /// Train on feature rows and labels
    ///
    /// Fails eagerly on an empty set, mismatched lengths or dimensions,
    /// labels outside {-1, +1}, a single-class set, or invalid
    /// hyperparameters. Hitting the iteration cap is not an error; check
    /// [`TrainedModel::converged`].
    pub fn fit(&self, x: &[Vec<f64>], y: &[f64]) -> Result<TrainedModel> {
        if x.len() != y.len() {
            return Err(SVMError::DimensionMismatch {
                expected: x.len(),
                actual: y.len(),
            });
        }
        let samples: Vec<Sample> = x
            .iter()
            .zip(y)
            .map(|(features, &label)| Sample::new(features.clone(), label))
            .collect();
        self.fit_samples(&samples)
    }

    /// Train on pre-built samples
    pub fn fit_samples(&self, samples: &[Sample]) -> Result<TrainedModel> {
        let solver = SMOSolver::new(self.kernel, self.config.clone());
        let result = solver.solve(samples)?;
        Ok(TrainedModel::new(self.kernel, samples, result))
    }

    /// Train and immediately predict the training points
    pub fn fit_predict(&self, x: &[Vec<f64>], y: &[f64]) -> Result<Vec<Prediction>> {
        let model = self.fit(x, y)?;
        model.predict_batch(x)
    }
}

impl Default for SVM {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_pattern() {
        let svm = SVM::new()
            .with_c(2.0)
            .with_tolerance(0.01)
            .with_max_iterations(500)
            .with_seed(7)
            .with_cache_rows(64);

        assert_eq!(svm.config.c, 2.0);
        assert_eq!(svm.config.tolerance, 0.01);
        assert_eq!(svm.config.max_iterations, 500);
        assert_eq!(svm.config.seed, 7);
        assert_eq!(svm.config.cache_rows, 64);
        assert_eq!(svm.kernel, Kernel::Linear);
    }

    #[test]
    fn test_fit_rejects_mismatched_lengths() {
        let x = vec![vec![1.0], vec![-1.0]];
        let y = vec![1.0];

        let result = SVM::new().fit(&x, &y);
        assert!(matches!(
            result,
            Err(SVMError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_fit_and_predict() {
        let x = vec![vec![2.0], vec![1.5], vec![-2.0], vec![-1.5]];
        let y = vec![1.0, 1.0, -1.0, -1.0];

        let model = SVM::new().fit(&x, &y).expect("training should succeed");

        assert!(model.n_support_vectors() > 0);
        let prediction = model.predict(&[1.0]).unwrap();
        assert_eq!(prediction.label, 1.0);
        let prediction = model.predict(&[-1.0]).unwrap();
        assert_eq!(prediction.label, -1.0);
    }

    #[test]
    fn test_fit_predict_training_accuracy() {
        let x = vec![vec![2.0], vec![1.5], vec![-2.0], vec![-1.5]];
        let y = vec![1.0, 1.0, -1.0, -1.0];

        let predictions = SVM::new().fit_predict(&x, &y).expect("should fit");
        for (prediction, &label) in predictions.iter().zip(&y) {
            assert_eq!(prediction.label, label);
        }
    }

    #[test]
    fn test_rbf_kernel_configuration_error() {
        let x = vec![vec![1.0], vec![-1.0]];
        let y = vec![1.0, -1.0];

        let result = SVM::new().with_kernel(Kernel::rbf(-0.5)).fit(&x, &y);
        assert!(matches!(result, Err(SVMError::InvalidParameter(_))));
    }
}
