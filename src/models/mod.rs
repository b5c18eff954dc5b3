// Network Selection - Shared Models
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! # Shared Models
//!
//! Types used by the selection store, the settings storage and the CLI:
//!
//! - **Network**: Selectable network entries and the ordered network list
//! - **Config**: Persisted application settings
//! - **Validation**: Network key and list validation
//! - **Error**: Shared error types

pub mod config;
pub mod error;
pub mod network;
pub mod validation;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use network::{NetworkEntry, NetworkList};

/// Configuration directory name (under XDG_CONFIG_HOME).
pub const CONFIG_DIR_NAME: &str = "network-selection";

/// Settings file name inside the configuration directory.
pub const SETTINGS_FILE_NAME: &str = "settings.toml";
