//! Core types and errors

pub mod error;
pub mod types;

pub use error::{Result, SVMError};
pub use types::*;
