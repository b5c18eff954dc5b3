// Network Selection - Local Storage
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Local settings storage.
//!
//! Handles:
//! - Loading the configured network list
//! - Remembering the last selected network across runs
//!
//! Settings live in a TOML file inside the configuration directory and are
//! cached in memory behind a RwLock. A settings file that fails to parse is
//! moved aside to `settings.toml.bak` before anything is written over it.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use tracing::{error, info, warn};

use crate::lock::{read_lock, write_lock};
use crate::models::{AppConfig, Error, Result, CONFIG_DIR_NAME, SETTINGS_FILE_NAME};
use crate::store::{SelectedNetworkStore, SubscriptionId};

/// Settings store backed by `settings.toml`.
#[derive(Debug)]
pub struct SettingsStore {
    /// Configuration directory path.
    config_dir: PathBuf,
    /// Settings file path.
    settings_file: PathBuf,
    /// Application settings.
    settings: RwLock<AppConfig>,
    /// Set when an unreadable settings file could not be moved aside.
    writes_blocked: AtomicBool,
}

impl SettingsStore {
    /// Create a settings store in the default config directory.
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME);
        Self::with_config_dir(config_dir)
    }

    /// Create a settings store in a specific config directory.
    pub fn with_config_dir(config_dir: PathBuf) -> Self {
        if let Err(e) = fs::create_dir_all(&config_dir) {
            error!("Failed to create config directory: {}", e);
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = fs::set_permissions(&config_dir, fs::Permissions::from_mode(0o700));
        }

        let store = Self {
            settings_file: config_dir.join(SETTINGS_FILE_NAME),
            config_dir,
            settings: RwLock::new(AppConfig::default()),
            writes_blocked: AtomicBool::new(false),
        };

        store.load_settings();
        store
    }

    /// Load the application configuration from the default location.
    ///
    /// Used before logging is set up, so failures are silent.
    pub fn load_config() -> Option<AppConfig> {
        let settings_file = dirs::config_dir()?
            .join(CONFIG_DIR_NAME)
            .join(SETTINGS_FILE_NAME);

        if settings_file.exists() {
            AppConfig::load_from_file(&settings_file).ok()
        } else {
            None
        }
    }

    /// Load settings from disk, keeping defaults if the file is missing or invalid.
    fn load_settings(&self) {
        if !self.settings_file.exists() {
            return;
        }

        match AppConfig::load_from_file(&self.settings_file) {
            Ok(config) => {
                write_lock(&self.settings, "settings", |s| *s = config);
                info!("Loaded settings from {:?}", self.settings_file);
            }
            Err(e) => {
                error!("Failed to load settings: {}", e);
                self.back_up_settings();
            }
        }
    }

    /// Move an unreadable settings file aside so saving cannot destroy it.
    fn back_up_settings(&self) {
        let backup = self.backup_file();
        match fs::rename(&self.settings_file, &backup) {
            Ok(()) => warn!("Moved unreadable settings to {:?}", backup),
            Err(e) => {
                error!("Failed to back up settings, not saving changes: {}", e);
                self.writes_blocked.store(true, Ordering::SeqCst);
            }
        }
    }

    /// Get the current settings.
    pub fn settings(&self) -> AppConfig {
        read_lock(&self.settings, "settings", |s| s.clone())
    }

    /// Replace the settings and save them to disk.
    pub fn update_settings(&self, settings: AppConfig) -> Result<()> {
        write_lock(&self.settings, "settings", |s| *s = settings);
        self.save()
    }

    /// Remember the last selected network and save to disk.
    pub fn set_last_selected_network(&self, key: &str) -> Result<()> {
        write_lock(&self.settings, "settings", |s| {
            s.last_selected_network = Some(key.to_string());
        });
        self.save()
    }

    fn save(&self) -> Result<()> {
        if self.writes_blocked.load(Ordering::SeqCst) {
            return Err(Error::ConfigWriteFailed(format!(
                "{:?} could not be parsed or backed up",
                self.settings_file
            )));
        }
        self.settings().save_to_file(&self.settings_file)
    }

    /// Build a network store from these settings.
    ///
    /// The store starts at the last selected network when it is still
    /// configured, otherwise at the first one.
    pub fn open_network_store(&self) -> SelectedNetworkStore {
        let settings = self.settings();
        SelectedNetworkStore::with_initial(
            settings.networks,
            settings.last_selected_network.as_deref(),
        )
    }

    /// Save every change of `store` as the last selected network.
    pub fn persist_selection(self: &Arc<Self>, store: &SelectedNetworkStore) -> SubscriptionId {
        let settings = Arc::clone(self);
        store.subscribe(move |change| {
            if let Err(e) = settings.set_last_selected_network(&change.current) {
                error!("Failed to save selected network: {}", e);
            }
        })
    }

    /// Get the config directory path.
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Get the settings file path.
    pub fn settings_file(&self) -> &Path {
        &self.settings_file
    }

    /// Where an unreadable settings file is moved to.
    pub fn backup_file(&self) -> PathBuf {
        self.settings_file.with_extension("toml.bak")
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}
