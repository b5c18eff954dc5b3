// Network Selection - Network Configuration
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Selectable network definitions.
//!
//! A [`NetworkList`] is the ordered set of networks a user can choose from.
//! The first entry is the default selection.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::{Error, Result};
use super::validation::validate_network_entries;

/// A single selectable network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkEntry {
    /// Identifier used for selection (e.g., "mainnet").
    pub key: String,

    /// Human-readable name.
    #[serde(default)]
    pub name: String,

    /// Chain ID served by this network.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub chain_id: String,

    /// Light-client endpoint URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lcd: Option<String>,
}

impl NetworkEntry {
    /// Create an entry with just a key and a display name.
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            chain_id: String::new(),
            lcd: None,
        }
    }

    /// Set the chain ID.
    pub fn with_chain_id(mut self, chain_id: impl Into<String>) -> Self {
        self.chain_id = chain_id.into();
        self
    }

    /// Set the light-client endpoint.
    pub fn with_lcd(mut self, lcd: impl Into<String>) -> Self {
        self.lcd = Some(lcd.into());
        self
    }

    /// Name to show the user, falling back to the key.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.key
        } else {
            &self.name
        }
    }
}

impl fmt::Display for NetworkEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.chain_id.is_empty() {
            write!(f, "{}", self.display_name())
        } else {
            write!(f, "{} ({})", self.display_name(), self.chain_id)
        }
    }
}

/// Ordered, non-empty list of networks with unique keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<NetworkEntry>", into = "Vec<NetworkEntry>")]
pub struct NetworkList {
    entries: Vec<NetworkEntry>,
}

impl NetworkList {
    /// Build a list, validating that it is non-empty with unique, well-formed keys.
    pub fn new(entries: Vec<NetworkEntry>) -> Result<Self> {
        validate_network_entries(&entries)?;
        Ok(Self { entries })
    }

    /// The networks shipped with the application.
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                NetworkEntry::new("mainnet", "Mainnet"),
                NetworkEntry::new("testnet", "Testnet")
                    .with_chain_id("soju-0007")
                    .with_lcd("https://lcd.terra.money"),
                NetworkEntry::new("localnet", "Local Network"),
            ],
        }
    }

    /// Key of the first entry, used as the default selection.
    pub fn first_key(&self) -> &str {
        // Non-empty by construction.
        &self.entries[0].key
    }

    /// Look up an entry by key.
    pub fn get(&self, key: &str) -> Option<&NetworkEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Index of the entry with the given key.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.key == key)
    }

    /// Entry at an index obtained from [`NetworkList::position`].
    pub(crate) fn entry_at(&self, index: usize) -> &NetworkEntry {
        &self.entries[index]
    }

    /// Check whether a key is part of this list.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// All keys, in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NetworkEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true for a list built through [`NetworkList::new`].
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for NetworkList {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TryFrom<Vec<NetworkEntry>> for NetworkList {
    type Error = Error;

    fn try_from(entries: Vec<NetworkEntry>) -> Result<Self> {
        Self::new(entries)
    }
}

impl From<NetworkList> for Vec<NetworkEntry> {
    fn from(list: NetworkList) -> Self {
        list.entries
    }
}

impl<'a> IntoIterator for &'a NetworkList {
    type Item = &'a NetworkEntry;
    type IntoIter = std::slice::Iter<'a, NetworkEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
