//! Error types for memberkit.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the memberkit crates.
///
/// The first four variants are the failure kinds a profile screen reports to
/// the user. The rest describe misuse of the view model or problems below
/// the transport boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberkitError {
    /// Profile read failed; view model state is untouched.
    #[error("Failed to load profile: {0}")]
    LoadFailure(String),

    /// Profile write failed; draft and edit mode are retained.
    #[error("Failed to save profile: {0}")]
    SaveFailure(String),

    /// Identity token could not be issued. Never fatal.
    #[error("Identity token issuance failed: {0}")]
    TokenIssuance(String),

    /// Clipboard write failed. Never fatal.
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// Operation is not valid in the current view model mode
    #[error("Invalid state: {operation} is not allowed while {mode}")]
    InvalidState { operation: String, mode: String },

    /// Unrecognized profile field key
    #[error("Unknown profile field: '{0}'")]
    UnknownField(String),

    /// Field may not be changed once set
    #[error("Profile field '{0}' is immutable once set")]
    ImmutableField(String),

    /// HTTP/transport level error
    #[error("Transport error: {0}")]
    Transport(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl MemberkitError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a LoadFailure error
    pub fn load_failure(message: impl Into<String>) -> Self {
        Self::LoadFailure(message.into())
    }

    /// Creates a SaveFailure error
    pub fn save_failure(message: impl Into<String>) -> Self {
        Self::SaveFailure(message.into())
    }

    /// Creates a TokenIssuance error
    pub fn token_issuance(message: impl Into<String>) -> Self {
        Self::TokenIssuance(message.into())
    }

    /// Creates a Clipboard error
    pub fn clipboard(message: impl Into<String>) -> Self {
        Self::Clipboard(message.into())
    }

    /// Creates an InvalidState error
    pub fn invalid_state(operation: impl Into<String>, mode: impl Into<String>) -> Self {
        Self::InvalidState {
            operation: operation.into(),
            mode: mode.into(),
        }
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_load_failure(&self) -> bool {
        matches!(self, Self::LoadFailure(_))
    }

    pub fn is_save_failure(&self) -> bool {
        matches!(self, Self::SaveFailure(_))
    }

    pub fn is_token_issuance(&self) -> bool {
        matches!(self, Self::TokenIssuance(_))
    }

    pub fn is_clipboard(&self) -> bool {
        matches!(self, Self::Clipboard(_))
    }

    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<serde_json::Error> for MemberkitError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for MemberkitError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for MemberkitError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Transport(format!("request timed out: {}", err))
        } else if err.is_decode() {
            Self::Serialization {
                format: "JSON".to_string(),
                message: err.to_string(),
            }
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// A type alias for `Result<T, MemberkitError>`.
pub type Result<T> = std::result::Result<T, MemberkitError>;
