//! Error types for the latch binding system.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::options::FieldKind;

/// Main error type for registry and binding operations.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LatchError {
    /// A token too short to be meaningful in any position
    #[error("Invalid Option: '{0}'")]
    InvalidOption(String),

    /// The requested command is not registered
    #[error("'{0}' is not a known command")]
    UnknownCommand(String),

    /// A command that carries an options holder was invoked with no tokens
    #[error("Not enough arguments to the '{0}' command")]
    InsufficientArguments(String),

    /// The supplied options holder cannot be mutated in place
    #[error("Expected a mutable options holder, got an unborrowable value")]
    InvalidHolderKind,

    /// The rest-args field is declared with the wrong type
    #[error("The RestArgs field should be a list of strings")]
    InvalidRestArgsType,

    /// A value token failed to parse or fit the field's declared type
    #[error("Expected {expected}, got '{token}'")]
    TypeMismatch { expected: FieldKind, token: String },

    /// Generic error with custom message
    #[error("{0}")]
    Other(String),
}

/// Result type alias for latch operations
pub type Result<T> = std::result::Result<T, LatchError>;

impl From<std::io::Error> for LatchError {
    fn from(err: std::io::Error) -> Self {
        LatchError::Other(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for LatchError {
    fn from(err: serde_json::Error) -> Self {
        LatchError::Other(format!("Serialization error: {}", err))
    }
}
