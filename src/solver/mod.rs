//! Dual optimization for SVM training

pub mod smo;

pub use smo::SMOSolver;
