//! Shared utilities for feature modules
//!
//! - **validation**: Input validation for path parameters
//! - **test_helpers**: Test stores and fixtures (test-only)

pub mod validation;

#[cfg(test)]
pub mod test_helpers;

pub use validation::{validate_hsn_id, HsnIdValidationError};
