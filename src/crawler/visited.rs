//! Visited-address set shared by every crawl task
//!
//! The only way to add an address is [`VisitedSet::insert_if_absent`], which
//! checks and inserts under a single lock acquisition. There is no removal.
//! The set is private to the crawler; callers see its membership only once
//! the crawl has finished.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

/// Set of addresses that have been claimed for fetching
#[derive(Debug, Default)]
pub struct VisitedSet {
    inner: Mutex<HashSet<String>>,
}

impl VisitedSet {
    /// Creates an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically marks `address` as visited
    ///
    /// # Returns
    ///
    /// * `true` - The address was absent and is now claimed by the caller
    /// * `false` - Another task already claimed it
    pub fn insert_if_absent(&self, address: &str) -> bool {
        let mut set = self.lock();
        if set.contains(address) {
            return false;
        }
        set.insert(address.to_string())
    }

    #[cfg(test)]
    pub fn contains(&self, address: &str) -> bool {
        self.lock().contains(address)
    }

    /// Number of claimed addresses
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copies the current membership, sorted
    pub fn snapshot(&self) -> Vec<String> {
        let mut addresses: Vec<String> = self.lock().iter().cloned().collect();
        addresses.sort();
        addresses
    }

    // A panic while holding the lock cannot leave the set half-updated, so a
    // poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
