// Network Selection - Lock Helpers
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Lock helpers shared by the store and the settings storage.
//!
//! Lock poisoning is handled by recovering the inner value: poison means a
//! panic happened in another thread while holding the lock, but the data
//! itself is still a complete value.

use std::sync::{Mutex, MutexGuard, RwLock};
use tracing::warn;

/// Read from RwLock, recovering from poison if needed.
pub(crate) fn read_lock<T, F, R>(lock: &RwLock<T>, context: &str, reader: F) -> R
where
    F: FnOnce(&T) -> R,
{
    match lock.read() {
        Ok(guard) => reader(&*guard),
        Err(poisoned) => {
            warn!("RwLock poisoned reading {}, recovering", context);
            reader(&*poisoned.into_inner())
        }
    }
}

/// Write to RwLock, recovering from poison if needed.
pub(crate) fn write_lock<T, F, R>(lock: &RwLock<T>, context: &str, writer: F) -> R
where
    F: FnOnce(&mut T) -> R,
{
    match lock.write() {
        Ok(mut guard) => writer(&mut *guard),
        Err(poisoned) => {
            warn!("RwLock poisoned writing {}, recovering", context);
            writer(&mut *poisoned.into_inner())
        }
    }
}

/// Lock a Mutex, recovering from poison if needed.
pub(crate) fn mutex_lock<'a, T>(lock: &'a Mutex<T>, context: &str) -> MutexGuard<'a, T> {
    match lock.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            warn!("Mutex poisoned locking {}, recovering", context);
            poisoned.into_inner()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_recovers_from_poisoned_lock() {
        let lock = Arc::new(RwLock::new(1u32));
        let poisoner = Arc::clone(&lock);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.write().expect("first lock");
            panic!("poison the lock");
        })
        .join();
        assert!(lock.is_poisoned());

        write_lock(&lock, "test", |v| *v = 2);
        assert_eq!(read_lock(&lock, "test", |v| *v), 2);
    }
}
