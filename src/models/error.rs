// Network Selection - Error Types
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Shared error types for the network selection store.

use thiserror::Error;

/// Result type alias for network selection operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for network selection operations.
#[derive(Debug, Error)]
pub enum Error {
    // ========================================
    // Selection Errors
    // ========================================
    #[error("Invalid network identifier: {0}")]
    InvalidNetworkIdentifier(String),

    // ========================================
    // Network List Errors
    // ========================================
    #[error("Network list is empty")]
    EmptyNetworkList,

    #[error("Duplicate network key: {0}")]
    DuplicateNetworkKey(String),

    #[error("Invalid network key: {0}")]
    InvalidNetworkKey(String),

    // ========================================
    // Storage Errors
    // ========================================
    #[error("Failed to write configuration: {0}")]
    ConfigWriteFailed(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParseFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this error was caused by an unknown or malformed network key.
    pub fn is_selection_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidNetworkIdentifier(_) | Self::InvalidNetworkKey(_)
        )
    }
}

// Convert from toml parse errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::ConfigParseFailed(err.to_string())
    }
}

// Convert from toml serialize errors
impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::ConfigWriteFailed(err.to_string())
    }
}

// Convert from serde_json errors
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigParseFailed(err.to_string())
    }
}
