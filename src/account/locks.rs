// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Vaulter Contributors

//! Per-account-name locks.
//!
//! The existence check and the directory creation in `begin_create` are
//! two separate storage calls, as are the marker lookup and the rename in
//! `confirm_create`. Holding the name lock across each sequence closes
//! the window in which two concurrent requests for the same name could
//! both pass their checks. Different names never contend.

use std::collections::HashSet;
use std::sync::{Arc, Condvar, Mutex};

/// Set of currently locked account names.
#[derive(Debug, Clone, Default)]
pub struct NameLocks {
    inner: Arc<LockState>,
}

#[derive(Debug, Default)]
struct LockState {
    held: Mutex<HashSet<String>>,
    released: Condvar,
}

impl NameLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for `name`, blocking until it is free.
    pub fn lock(&self, name: &str) -> NameLockGuard {
        let mut held = self
            .inner
            .held
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        while held.contains(name) {
            held = self
                .inner
                .released
                .wait(held)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
        held.insert(name.to_string());
        NameLockGuard {
            locks: Arc::clone(&self.inner),
            name: name.to_string(),
        }
    }
}

/// RAII guard releasing the name lock on drop.
#[derive(Debug)]
pub struct NameLockGuard {
    locks: Arc<LockState>,
    name: String,
}

impl Drop for NameLockGuard {
    fn drop(&mut self) {
        let mut held = self
            .locks
            .held
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        held.remove(&self.name);
        self.locks.released.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn same_name_serializes() {
        let locks = NameLocks::new();
        let guard = locks.lock("alice");

        let contender = {
            let locks = locks.clone();
            thread::spawn(move || {
                let _guard = locks.lock("alice");
            })
        };

        // The contender must still be blocked while we hold the guard.
        thread::sleep(Duration::from_millis(50));
        assert!(!contender.is_finished());

        drop(guard);
        contender.join().expect("contender finishes after release");
    }

    #[test]
    fn different_names_do_not_contend() {
        let locks = NameLocks::new();
        let _alice = locks.lock("alice");
        // Completes immediately; would deadlock if names contended.
        let _bob = locks.lock("bob");
    }
}
