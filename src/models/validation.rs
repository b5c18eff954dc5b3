// Network Selection - Validation Utilities
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Input validation utilities for network keys and network lists.

use std::collections::HashSet;

use super::error::{Error, Result};
use super::network::NetworkEntry;

/// Maximum length of a network key.
const MAX_KEY_LEN: usize = 64;

/// Validate a network key.
///
/// Keys are 1-64 characters of ASCII letters, digits, `-` or `_`.
pub fn validate_network_key(s: &str) -> Result<&str> {
    if s.is_empty() || s.len() > MAX_KEY_LEN {
        return Err(Error::InvalidNetworkKey(format!(
            "Key must be 1-{} characters: {:?}",
            MAX_KEY_LEN, s
        )));
    }

    if !s
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(Error::InvalidNetworkKey(format!(
            "Invalid characters in key: {:?}",
            s
        )));
    }

    Ok(s)
}

/// Validate a list of network entries.
///
/// The list must be non-empty, every key must be well formed, and no key
/// may appear twice.
pub fn validate_network_entries(entries: &[NetworkEntry]) -> Result<()> {
    if entries.is_empty() {
        return Err(Error::EmptyNetworkList);
    }

    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        validate_network_key(&entry.key)?;
        if !seen.insert(entry.key.as_str()) {
            return Err(Error::DuplicateNetworkKey(entry.key.clone()));
        }
    }

    Ok(())
}
