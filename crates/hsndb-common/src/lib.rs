//! HSNDB Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, logging, and error handling for the HSNDB project.
//!
//! # Overview
//!
//! - **Error Handling**: [`HsndbError`] for invalid shared values
//! - **Logging**: Centralized `tracing` subscriber setup
//! - **Types**: Protein and category records shared by the server and its stores
//!
//! # Example
//!
//! ```no_run
//! use hsndb_common::logging::{init_logging, LogConfig};
//! use hsndb_common::types::ProteinRecord;
//!
//! fn main() -> anyhow::Result<()> {
//!     let _guard = init_logging(&LogConfig::from_env()?)?;
//!     let record = ProteinRecord::new("HSN0001", "Tumor suppressor p53", "P04637", 3);
//!     tracing::info!(hsn_id = %record.hsn_id, "Loaded record");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::HsndbError;
