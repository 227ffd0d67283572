//! Kernelized binary SVM classifier trained with Sequential Minimal Optimization
//!
//! The API is two-phase: an [`SVM`] value holds the training configuration,
//! [`SVM::fit`] runs the solver and returns an immutable [`TrainedModel`],
//! and the model answers any number of concurrent [`TrainedModel::predict`]
//! calls.
//!
//! ```
//! use svmkit::SVM;
//!
//! let x = vec![
//!     vec![2.0, 2.0],
//!     vec![1.5, 1.8],
//!     vec![-2.0, -2.0],
//!     vec![-1.6, -1.9],
//! ];
//! let y = vec![1.0, 1.0, -1.0, -1.0];
//!
//! let model = SVM::new().with_c(1.0).with_seed(16).fit(&x, &y)?;
//! let prediction = model.predict(&[1.0, 1.2])?;
//! assert_eq!(prediction.label, 1.0);
//! # Ok::<(), svmkit::SVMError>(())
//! ```

pub mod api;
pub mod cache;
pub mod core;
pub mod kernel;
pub mod model;
pub mod solver;

// Re-export main types for convenience
pub use crate::api::SVM;
pub use crate::cache::{CacheStats, KernelCache};
pub use crate::core::error::{Result, SVMError};
pub use crate::core::types::{OptimizationResult, OptimizerConfig, Prediction, Sample};
pub use crate::kernel::Kernel;
pub use crate::model::TrainedModel;
pub use crate::solver::SMOSolver;

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
