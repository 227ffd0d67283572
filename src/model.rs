//! Trained SVM model and decision function
//!
//! A [`TrainedModel`] is produced by a fit and is immutable afterwards, so
//! concurrent predictions need no synchronization. It retains only the
//! support vectors, their multipliers and the bias; every other training
//! sample is dropped.

use crate::core::{OptimizationResult, Prediction, Result, SVMError, Sample};
use crate::kernel::Kernel;

/// Immutable trained model
pub struct TrainedModel {
    kernel: Kernel,
    support_vectors: Vec<Sample>,
    alpha: Vec<f64>,
    bias: f64,
    support_indices: Vec<usize>,
    dim: usize,
    iterations: usize,
    converged: bool,
}

impl TrainedModel {
    /// Build a model from the optimization result, keeping only the
    /// support vectors
    pub(crate) fn new(
        kernel: Kernel,
        training_samples: &[Sample],
        result: OptimizationResult,
    ) -> Self {
        let mut support_vectors = Vec::with_capacity(result.support_vectors.len());
        let mut alpha = Vec::with_capacity(result.support_vectors.len());
        for &idx in &result.support_vectors {
            support_vectors.push(training_samples[idx].clone());
            alpha.push(result.alpha[idx]);
        }

        Self {
            kernel,
            support_vectors,
            alpha,
            // The solver carries Platt's threshold, which the decision
            // function subtracts; expose the additive convention instead.
            bias: -result.threshold,
            support_indices: result.support_vectors,
            dim: training_samples[0].dim(),
            iterations: result.iterations,
            converged: result.converged,
        }
    }

    /// Raw decision value `sum(alpha_i y_i K(x_i, x)) + b`
    pub fn decision_function(&self, x: &[f64]) -> Result<f64> {
        if x.len() != self.dim {
            return Err(SVMError::DimensionMismatch {
                expected: self.dim,
                actual: x.len(),
            });
        }

        let mut sum = self.bias;
        for (sv, &a) in self.support_vectors.iter().zip(&self.alpha) {
            sum += a * sv.label * self.kernel.compute(&sv.features, x);
        }
        Ok(sum)
    }

    /// Predict the class of a single point
    ///
    /// A decision value of exactly zero resolves to +1.
    pub fn predict(&self, x: &[f64]) -> Result<Prediction> {
        let decision_value = self.decision_function(x)?;
        let label = if decision_value >= 0.0 { 1.0 } else { -1.0 };
        Ok(Prediction::new(label, decision_value))
    }

    /// Predict a batch of points, one prediction per point
    pub fn predict_batch(&self, points: &[Vec<f64>]) -> Result<Vec<Prediction>> {
        points.iter().map(|p| self.predict(p)).collect()
    }

    /// Get the support vectors
    pub fn support_vectors(&self) -> &[Sample] {
        &self.support_vectors
    }

    /// Get the alpha values for support vectors
    pub fn alpha_values(&self) -> &[f64] {
        &self.alpha
    }

    /// Get the indices of support vectors in the original training set
    pub fn support_vector_indices(&self) -> &[usize] {
        &self.support_indices
    }

    /// Get the number of support vectors
    pub fn n_support_vectors(&self) -> usize {
        self.support_vectors.len()
    }

    /// Get the bias term
    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Dimensionality the model was trained on
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of optimization passes the fit performed
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Whether the fit converged before hitting the iteration cap
    pub fn converged(&self) -> bool {
        self.converged
    }
}
