//! Error types for HSNDB

use thiserror::Error;

/// Errors raised by the shared types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HsndbError {
    #[error("Invalid search field: {0}")]
    InvalidSearchField(String),
}
