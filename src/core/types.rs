//! Core type definitions for SVM

/// Prediction result containing label and decision value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Predicted class label (+1 or -1)
    pub label: f64,
    /// Raw decision function value
    pub decision_value: f64,
}

impl Prediction {
    /// Create a new prediction
    pub fn new(label: f64, decision_value: f64) -> Self {
        Self {
            label,
            decision_value,
        }
    }

    /// Get confidence as absolute value of decision value
    pub fn confidence(&self) -> f64 {
        self.decision_value.abs()
    }
}

/// Training sample with a dense feature vector and a binary label
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    /// Feature vector
    pub features: Vec<f64>,
    /// Class label (+1 or -1)
    pub label: f64,
}

impl Sample {
    /// Create a new sample
    pub fn new(features: Vec<f64>, label: f64) -> Self {
        Self { features, label }
    }

    /// Dimensionality of the feature vector
    pub fn dim(&self) -> usize {
        self.features.len()
    }
}

/// Result of the dual optimization
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Lagrange multipliers (alpha values), one per training sample
    pub alpha: Vec<f64>,
    /// Platt's threshold; the decision function subtracts it
    pub threshold: f64,
    /// Indices of support vectors (alpha above the numeric threshold)
    pub support_vectors: Vec<usize>,
    /// Number of optimization passes performed
    pub iterations: usize,
    /// Whether a full pass completed without any multiplier change
    pub converged: bool,
}

/// Configuration for the SMO optimizer
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    /// Regularization parameter (upper bound for alpha)
    pub c: f64,
    /// Tolerance for KKT conditions and convergence
    pub tolerance: f64,
    /// Maximum number of optimization passes
    pub max_iterations: usize,
    /// Seed for the solver's candidate-scan shuffles
    pub seed: u64,
    /// Number of kernel matrix rows kept in the cache
    pub cache_rows: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            c: 1.0,
            tolerance: 1e-4,
            max_iterations: 1000,
            seed: 16,
            cache_rows: 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction() {
        let pred = Prediction::new(1.0, 2.5);
        assert_eq!(pred.label, 1.0);
        assert_eq!(pred.decision_value, 2.5);
        assert_eq!(pred.confidence(), 2.5);

        let neg_pred = Prediction::new(-1.0, -1.8);
        assert_eq!(neg_pred.confidence(), 1.8);
    }

    #[test]
    fn test_sample() {
        let sample = Sample::new(vec![1.0, 0.0, 3.0], 1.0);
        assert_eq!(sample.label, 1.0);
        assert_eq!(sample.dim(), 3);
    }

    #[test]
    fn test_optimizer_config_default() {
        let config = OptimizerConfig::default();
        assert_eq!(config.c, 1.0);
        assert_eq!(config.tolerance, 1e-4);
        assert_eq!(config.max_iterations, 1000);
        assert_eq!(config.seed, 16);
        assert_eq!(config.cache_rows, 1024);
    }
}
