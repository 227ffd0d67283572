//! Kernel functions for SVM
//!
//! The kernel is a closed set of variants; hyperparameters live on the
//! variant that needs them, so an unused parameter is unrepresentable.

use crate::core::{Result, SVMError};

/// Similarity function between two feature vectors
///
/// Both variants are symmetric and deterministic. Dimension equality is
/// enforced by the fit/predict validation layer before any kernel call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kernel {
    /// Linear kernel: K(x, y) = x^T y
    Linear,
    /// RBF kernel: K(x, y) = exp(-gamma * ||x - y||^2)
    Rbf { gamma: f64 },
}

impl Kernel {
    /// Create an RBF kernel with the given width parameter
    pub fn rbf(gamma: f64) -> Self {
        Kernel::Rbf { gamma }
    }

    /// Check kernel hyperparameters
    ///
    /// Called before training starts so a bad gamma is a configuration
    /// error, not a mid-loop surprise.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Kernel::Linear => Ok(()),
            Kernel::Rbf { gamma } if gamma > 0.0 && gamma.is_finite() => Ok(()),
            Kernel::Rbf { gamma } => Err(SVMError::InvalidParameter(format!(
                "RBF gamma must be positive and finite, got {gamma}"
            ))),
        }
    }

    /// Compute the kernel value K(x, y)
    pub fn compute(&self, x: &[f64], y: &[f64]) -> f64 {
        debug_assert_eq!(x.len(), y.len());
        match *self {
            Kernel::Linear => dot(x, y),
            Kernel::Rbf { gamma } => (-gamma * squared_distance(x, y)).exp(),
        }
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Kernel::Linear
    }
}

fn dot(x: &[f64], y: &[f64]) -> f64 {
    x.iter().zip(y).map(|(a, b)| a * b).sum()
}

/// Squared Euclidean distance ||x - y||^2
fn squared_distance(x: &[f64], y: &[f64]) -> f64 {
    x.iter()
        .zip(y)
        .map(|(a, b)| {
            let d = a - b;
            d * d
        })
        .sum()
}
