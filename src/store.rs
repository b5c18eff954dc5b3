// Network Selection - Selected Network Store
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Shared state for the currently selected network.
//!
//! Two implementations of [`NetworkContext`] live here:
//!
//! - [`NetworkSelection`]: the default value. Its network is the first
//!   configured key and its setter only records a diagnostic; it never
//!   changes state. [`default_selection`] hands out the process-wide instance.
//! - [`SelectedNetworkStore`]: the provider. It validates requested keys,
//!   updates the selection and notifies subscribers synchronously, and also
//!   publishes the current key on a watch channel for async consumers.
//!
//! Consumers take the context explicitly (`&dyn NetworkContext` or an
//! `Arc<SelectedNetworkStore>`) instead of looking it up.

use chrono::{DateTime, Local};
use once_cell::sync::Lazy;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::lock::{mutex_lock, read_lock, write_lock};
use crate::models::{Error, NetworkEntry, NetworkList, Result};

/// Read access to the selected network plus a way to request a change.
pub trait NetworkContext: Send + Sync {
    /// Key of the currently selected network.
    fn network(&self) -> String;

    /// Request a change of network.
    ///
    /// Returns `Ok(true)` when the selection changed.
    fn set_network(&self, identifier: &str) -> Result<bool>;
}

impl<T: NetworkContext + ?Sized> NetworkContext for Arc<T> {
    fn network(&self) -> String {
        (**self).network()
    }

    fn set_network(&self, identifier: &str) -> Result<bool> {
        (**self).set_network(identifier)
    }
}

// ============================================================================
// Default selection
// ============================================================================

/// Selection value used when no provider is wired in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSelection {
    network: String,
}

impl NetworkSelection {
    /// Default selection for a network list: its first key.
    pub fn from_networks(networks: &NetworkList) -> Self {
        Self {
            network: networks.first_key().to_string(),
        }
    }

    /// Selected network key.
    pub fn key(&self) -> &str {
        &self.network
    }
}

impl NetworkContext for NetworkSelection {
    fn network(&self) -> String {
        self.network.clone()
    }

    /// Records the request and nothing else.
    ///
    /// The identifier is neither validated nor applied, and nobody is
    /// notified. A provider must be supplied for selection to take effect.
    fn set_network(&self, identifier: &str) -> Result<bool> {
        info!(network = identifier, "set_network called without a provider");
        Ok(false)
    }
}

impl fmt::Display for NetworkSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.network)
    }
}

static DEFAULT_SELECTION: Lazy<NetworkSelection> =
    Lazy::new(|| NetworkSelection::from_networks(&NetworkList::builtin()));

/// Process-wide default selection built from the built-in network list.
///
/// Every call returns the same instance.
pub fn default_selection() -> &'static NetworkSelection {
    &DEFAULT_SELECTION
}

// ============================================================================
// Provider
// ============================================================================

/// Change delivered to subscribers after a successful selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    pub previous: String,
    pub current: String,
    pub changed_at: DateTime<Local>,
}

/// Handle returned by [`SelectedNetworkStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

type Listener = dyn Fn(&SelectionChange) + Send + Sync;

/// Live network selection shared across the application.
pub struct SelectedNetworkStore {
    networks: NetworkList,
    /// Index into `networks` of the current selection.
    current: RwLock<usize>,
    subscribers: RwLock<Vec<(SubscriptionId, Arc<Listener>)>>,
    /// Held from commit through notification so listeners see changes in commit order.
    change_lock: Mutex<()>,
    next_subscription: AtomicU64,
    watch_tx: watch::Sender<String>,
}

impl SelectedNetworkStore {
    /// Create a store selecting the first network in the list.
    pub fn new(networks: NetworkList) -> Self {
        Self::at_index(networks, 0)
    }

    /// Create a store starting at `initial`, if it names a known network.
    ///
    /// Unknown or missing keys fall back to the first network.
    pub fn with_initial(networks: NetworkList, initial: Option<&str>) -> Self {
        let index = match initial {
            Some(key) => networks.position(key).unwrap_or_else(|| {
                warn!(
                    "Initial network {:?} is not configured, using {:?}",
                    key,
                    networks.first_key()
                );
                0
            }),
            None => 0,
        };
        Self::at_index(networks, index)
    }

    fn at_index(networks: NetworkList, index: usize) -> Self {
        let key = networks.entry_at(index).key.clone();
        debug!("Network store initialized with {:?}", key);
        let (watch_tx, _) = watch::channel(key);
        Self {
            networks,
            current: RwLock::new(index),
            subscribers: RwLock::new(Vec::new()),
            change_lock: Mutex::new(()),
            next_subscription: AtomicU64::new(1),
            watch_tx,
        }
    }

    /// Configured networks.
    pub fn networks(&self) -> &NetworkList {
        &self.networks
    }

    /// Entry of the currently selected network.
    pub fn current_entry(&self) -> &NetworkEntry {
        let index = read_lock(&self.current, "current", |i| *i);
        self.networks.entry_at(index)
    }

    /// Snapshot of the current selection.
    pub fn selection(&self) -> NetworkSelection {
        NetworkSelection {
            network: self.current_entry().key.clone(),
        }
    }

    /// Register a listener called after every change of selection.
    ///
    /// Listeners run on the thread that made the change, in subscription
    /// order. They may read the store but must not call `set_network` on
    /// it: changes are serialized until every listener has returned.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&SelectionChange) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        write_lock(&self.subscribers, "subscribers", |subs| {
            subs.push((id, Arc::new(listener)));
        });
        debug!("Added network subscriber {}", id);
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = write_lock(&self.subscribers, "subscribers", |subs| {
            let before = subs.len();
            subs.retain(|(sub_id, _)| *sub_id != id);
            subs.len() != before
        });
        if removed {
            debug!("Removed network subscriber {}", id);
        }
        removed
    }

    /// Number of registered listeners.
    pub fn subscriber_count(&self) -> usize {
        read_lock(&self.subscribers, "subscribers", |subs| subs.len())
    }

    /// Receiver that always holds the current network key.
    pub fn watch(&self) -> watch::Receiver<String> {
        self.watch_tx.subscribe()
    }

    fn notify(&self, change: &SelectionChange) {
        let listeners: Vec<Arc<Listener>> = read_lock(&self.subscribers, "subscribers", |subs| {
            subs.iter().map(|(_, l)| Arc::clone(l)).collect()
        });
        for listener in listeners {
            listener(change);
        }
    }
}

impl NetworkContext for SelectedNetworkStore {
    fn network(&self) -> String {
        self.current_entry().key.clone()
    }

    fn set_network(&self, identifier: &str) -> Result<bool> {
        let Some(index) = self.networks.position(identifier) else {
            warn!("Rejected unknown network {:?}", identifier);
            return Err(Error::InvalidNetworkIdentifier(identifier.to_string()));
        };

        let _change = mutex_lock(&self.change_lock, "change");
        let previous = write_lock(&self.current, "current", |current| {
            if *current == index {
                return None;
            }
            let previous = std::mem::replace(current, index);
            self.watch_tx.send_replace(identifier.to_string());
            Some(previous)
        });

        let Some(previous) = previous else {
            debug!("Network {:?} already selected", identifier);
            return Ok(false);
        };

        let change = SelectionChange {
            previous: self.networks.entry_at(previous).key.clone(),
            current: identifier.to_string(),
            changed_at: Local::now(),
        };
        info!("Selected network {:?} (was {:?})", change.current, change.previous);
        self.notify(&change);
        Ok(true)
    }
}

impl fmt::Debug for SelectedNetworkStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedNetworkStore")
            .field("networks", &self.networks)
            .field("current", &self.current_entry().key)
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::Mutex;

    fn two_networks() -> NetworkList {
        NetworkList::new(vec![
            NetworkEntry::new("mainnet", "Mainnet"),
            NetworkEntry::new("testnet", "Testnet"),
        ])
        .expect("valid list")
    }

    /// Writer collecting formatted log output for assertions.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("log buffer").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn lines(&self) -> Vec<String> {
            let buf = self.0.lock().expect("log buffer");
            String::from_utf8_lossy(&buf).lines().map(str::to_string).collect()
        }
    }

    fn capture_logs<F: FnOnce()>(f: F) -> CapturedLogs {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        logs
    }

    #[test]
    fn test_default_uses_first_key() {
        let selection = NetworkSelection::from_networks(&two_networks());
        assert_eq!(selection.key(), "mainnet");
        assert_eq!(selection.network(), "mainnet");
    }

    #[test]
    fn test_default_setter_does_not_mutate() {
        let selection = NetworkSelection::from_networks(&two_networks());
        let changed = selection.set_network("testnet").expect("never fails");
        assert!(!changed);
        assert_eq!(selection.network(), "mainnet");

        // Unknown identifiers are accepted without validation.
        assert!(selection.set_network("no such network").is_ok());
        assert_eq!(selection.network(), "mainnet");
    }

    #[test]
    fn test_default_setter_logs_once() {
        let selection = NetworkSelection::from_networks(&two_networks());
        let logs = capture_logs(|| {
            let _ = selection.set_network("testnet");
        });
        let matching: Vec<_> = logs
            .lines()
            .into_iter()
            .filter(|line| line.contains("testnet"))
            .collect();
        assert_eq!(matching.len(), 1, "log output: {:?}", logs.lines());
        assert!(matching[0].contains("INFO"));
    }

    #[test]
    fn test_default_selection_is_stable() {
        let first = default_selection();
        let second = default_selection();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.network(), NetworkList::builtin().first_key());
    }

    #[test]
    fn test_store_rejects_unknown_network() {
        let store = SelectedNetworkStore::new(two_networks());
        let calls = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&calls);
        store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        match store.set_network("devnet") {
            Err(Error::InvalidNetworkIdentifier(key)) => assert_eq!(key, "devnet"),
            other => panic!("expected invalid identifier, got {:?}", other),
        }
        assert_eq!(store.network(), "mainnet");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_store_notifies_subscribers_in_order() {
        let store = SelectedNetworkStore::new(two_networks());
        let seen = Arc::new(Mutex::new(Vec::new()));

        for name in ["first", "second"] {
            let seen = Arc::clone(&seen);
            store.subscribe(move |change| {
                seen.lock().expect("seen").push((
                    name,
                    change.previous.clone(),
                    change.current.clone(),
                ));
            });
        }

        assert!(store.set_network("testnet").expect("known network"));
        assert_eq!(store.network(), "testnet");
        assert_eq!(
            *seen.lock().expect("seen"),
            vec![
                ("first", "mainnet".to_string(), "testnet".to_string()),
                ("second", "mainnet".to_string(), "testnet".to_string()),
            ]
        );
    }

    #[test]
    fn test_store_same_network_is_noop() {
        let store = SelectedNetworkStore::new(two_networks());
        let calls = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&calls);
        store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!store.set_network("mainnet").expect("known network"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let store = SelectedNetworkStore::new(two_networks());
        let calls = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&calls);
        let id = store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store.set_network("testnet").expect("known network");
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        assert_eq!(store.subscriber_count(), 0);

        store.set_network("mainnet").expect("known network");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_listener_can_read_store() {
        let store = Arc::new(SelectedNetworkStore::new(two_networks()));
        let observed = Arc::new(Mutex::new(None));

        let reader = Arc::downgrade(&store);
        let slot = Arc::clone(&observed);
        store.subscribe(move |_| {
            if let Some(store) = reader.upgrade() {
                *slot.lock().expect("slot") = Some(store.network());
            }
        });

        store.set_network("testnet").expect("known network");
        assert_eq!(observed.lock().expect("slot").as_deref(), Some("testnet"));
    }

    #[test]
    fn test_watch_receives_changes() {
        let store = SelectedNetworkStore::new(two_networks());
        let mut rx = store.watch();
        assert_eq!(*rx.borrow(), "mainnet");
        assert!(!rx.has_changed().expect("sender alive"));

        store.set_network("testnet").expect("known network");
        assert!(rx.has_changed().expect("sender alive"));
        assert_eq!(*rx.borrow_and_update(), "testnet");
    }

    #[test]
    fn test_last_notification_matches_state_under_contention() {
        for _ in 0..200 {
            let store = SelectedNetworkStore::new(NetworkList::builtin());
            let last_seen = Arc::new(Mutex::new(None));
            let slot = Arc::clone(&last_seen);
            store.subscribe(move |change| {
                *slot.lock().expect("slot") = Some(change.current.clone());
            });

            std::thread::scope(|scope| {
                scope.spawn(|| store.set_network("testnet"));
                scope.spawn(|| store.set_network("localnet"));
            });

            assert_eq!(
                last_seen.lock().expect("slot").as_deref(),
                Some(store.network().as_str())
            );
        }
    }

    #[test]
    fn test_with_initial_falls_back_to_first() {
        let store = SelectedNetworkStore::with_initial(two_networks(), Some("testnet"));
        assert_eq!(store.network(), "testnet");
        assert_eq!(*store.watch().borrow(), "testnet");

        let store = SelectedNetworkStore::with_initial(two_networks(), Some("gone"));
        assert_eq!(store.network(), "mainnet");

        let store = SelectedNetworkStore::with_initial(two_networks(), None);
        assert_eq!(store.selection().key(), "mainnet");
    }

    #[test]
    fn test_context_through_trait_object() {
        fn switch(ctx: &dyn NetworkContext, key: &str) -> Result<bool> {
            ctx.set_network(key)
        }

        let store: Arc<SelectedNetworkStore> = Arc::new(SelectedNetworkStore::new(two_networks()));
        assert!(switch(&store, "testnet").expect("known network"));
        assert_eq!(store.current_entry().name, "Testnet");

        assert!(!switch(default_selection(), "testnet").expect("never fails"));
        assert_eq!(default_selection().network(), "mainnet");
    }
}
