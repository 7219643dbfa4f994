//! Shared validation utilities

use thiserror::Error;

/// Longest identifier the `proteins` table accepts
pub const MAX_HSN_ID_LENGTH: usize = 32;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HsnIdValidationError {
    #[error("HSNDB identifier is required and cannot be empty")]
    Required,

    #[error("HSNDB identifier must be at most {max_length} characters")]
    TooLong { max_length: usize },

    #[error("HSNDB identifier can only contain letters and digits")]
    InvalidFormat,
}

/// Validate an HSNDB record identifier such as `HSN0001`.
pub fn validate_hsn_id(id: &str) -> Result<(), HsnIdValidationError> {
    if id.is_empty() {
        return Err(HsnIdValidationError::Required);
    }

    if id.len() > MAX_HSN_ID_LENGTH {
        return Err(HsnIdValidationError::TooLong {
            max_length: MAX_HSN_ID_LENGTH,
        });
    }

    if !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(HsnIdValidationError::InvalidFormat);
    }

    Ok(())
}
