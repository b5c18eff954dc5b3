// Network Selection - Shared Library
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! # Network Selection
//!
//! Process-wide state for the currently selected network:
//!
//! - **Store**: the default selection, the live provider and change subscriptions
//! - **Storage**: settings persisted as TOML (network list, last selection)
//! - **Models**: network entries, configuration and shared error types
//!
//! ```no_run
//! use std::sync::Arc;
//! use network_selection::{NetworkContext, SettingsStore};
//!
//! let settings = Arc::new(SettingsStore::new());
//! let store = Arc::new(settings.open_network_store());
//! settings.persist_selection(&store);
//!
//! store.subscribe(|change| println!("{} -> {}", change.previous, change.current));
//! store.set_network("testnet")?;
//! # Ok::<(), network_selection::Error>(())
//! ```

mod lock;
pub mod models;
pub mod storage;
pub mod store;

pub use models::{AppConfig, Error, NetworkEntry, NetworkList, Result};
pub use storage::SettingsStore;
pub use store::{
    default_selection, NetworkContext, NetworkSelection, SelectedNetworkStore, SelectionChange,
    SubscriptionId,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
