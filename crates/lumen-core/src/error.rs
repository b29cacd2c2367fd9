//! Error types for LUMEN
//!
//! Rendering and identity paths never fail; these cover the boundaries
//! that accept untrusted input or touch process-wide state.

use thiserror::Error;

/// Core LUMEN errors
#[derive(Error, Debug)]
pub enum LumenError {
    // Decode errors
    #[error("Unknown value type: {0}")]
    UnknownValueType(u8),

    #[error("Unknown mutator op: {0}")]
    UnknownMutatorOp(u8),

    // Registry errors
    #[error("Duplicate definition: {0}")]
    DuplicateDefinition(String),

    #[error("Invalid name: {0:?}")]
    InvalidName(String),

    // Runtime errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

/// Result type for LUMEN operations
pub type LumenResult<T> = Result<T, LumenError>;
