//! caskdb - Custom Error Types
//! Defines the error hierarchy for the cask storage engine.

use thiserror::Error;

/// Custom Result type for the cask engine.
pub type Result<T> = std::result::Result<T, CaskError>;

/// Error types for the cask storage engine.
#[derive(Error, Debug)]
pub enum CaskError {
    /// I/O errors from file operations (log appends, recovery scans, value reads).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key not found in the store (never written, or deleted).
    #[error("Key not found")]
    KeyNotFound,
}
