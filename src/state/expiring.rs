//! Map whose entries lapse after a fixed time-to-live
//!
//! Expired entries are never returned. They are dropped lazily when touched
//! and in bulk by `sweep_at`. Time-dependent methods take the current
//! instant explicitly; the owner decides which clock to read.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug)]
struct Entry<V> {
    inserted_at: Instant,
    value: V,
}

#[derive(Debug)]
pub struct ExpiringMap<K, V> {
    entries: HashMap<K, Entry<V>>,
    ttl: Duration,
}

impl<K: Eq + Hash, V> ExpiringMap<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Insert or replace, returning the previous live value
    pub fn insert_at(&mut self, key: K, value: V, now: Instant) -> Option<V> {
        let previous = self.entries.insert(key, Entry { inserted_at: now, value })?;
        self.is_live(&previous, now).then_some(previous.value)
    }

    /// Remove and return a live entry only if `accept` approves it.
    /// A rejected entry stays in place; an expired one is dropped.
    pub fn take_if_at<F>(&mut self, key: &K, accept: F, now: Instant) -> Option<V>
    where
        F: FnOnce(&V) -> bool,
    {
        let entry = self.entries.get(key)?;
        if !self.is_live(entry, now) {
            self.entries.remove(key);
            return None;
        }
        if !accept(&entry.value) {
            return None;
        }
        self.entries.remove(key).map(|entry| entry.value)
    }

    pub fn peek_at(&self, key: &K, now: Instant) -> Option<&V> {
        self.entries
            .get(key)
            .filter(|entry| self.is_live(entry, now))
            .map(|entry| &entry.value)
    }

    /// Drop every expired entry, returning how many were removed
    pub fn sweep_at(&mut self, now: Instant) -> usize {
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| now.saturating_duration_since(entry.inserted_at) < ttl);
        before - self.entries.len()
    }

    /// Number of stored entries, including expired ones not yet swept
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_live(&self, entry: &Entry<V>, now: Instant) -> bool {
        now.saturating_duration_since(entry.inserted_at) < self.ttl
    }
}
