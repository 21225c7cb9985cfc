//! Synthesis cache implementation.

use derive_getters::Getters;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

/// Cached payload with its creation time.
#[derive(Debug, Clone, Getters)]
pub struct CacheEntry {
    value: String,
    created_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    /// Check if this entry is expired.
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.ttl
    }

    /// Get remaining time until expiration.
    pub fn time_remaining(&self) -> Option<Duration> {
        self.ttl.checked_sub(self.created_at.elapsed())
    }
}

/// Configuration for the synthesis cache.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
pub struct CacheConfig {
    /// Lifetime of an entry (seconds)
    #[serde(default = "default_ttl_secs")]
    #[builder(default = "default_ttl_secs()")]
    ttl_secs: u64,

    /// Maximum number of live entries
    #[serde(default = "default_max_entries")]
    #[builder(default = "default_max_entries()")]
    max_entries: usize,
}

fn default_ttl_secs() -> u64 {
    1800 // 30 minutes
}

fn default_max_entries() -> usize {
    1000
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            max_entries: default_max_entries(),
        }
    }
}

/// Cache for synthesized media payloads.
///
/// Keys are fingerprints of the exact synthesis input (see [`SynthesisCache::key`]).
/// Expired entries are dropped lazily on lookup and in bulk on every insert.
/// The cache is shared between concurrent panel tasks behind an `Arc`; all
/// methods take `&self`.
///
/// # Example
///
/// ```
/// use moodcomic_cache::{CacheConfig, SynthesisCache};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let cache = SynthesisCache::new(CacheConfig::default());
/// let key = SynthesisCache::key("lighthouse at dawn", "healing");
///
/// cache.put(&key, "data:image/png;base64,AAAA".to_string());
/// assert!(cache.has(&key));
/// assert_eq!(cache.get(&key).as_deref(), Some("data:image/png;base64,AAAA"));
/// # }
/// ```
#[derive(Debug)]
pub struct SynthesisCache {
    config: CacheConfig,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl SynthesisCache {
    /// Create a new cache with configuration.
    pub fn new(config: CacheConfig) -> Self {
        tracing::debug!(
            ttl_secs = config.ttl_secs,
            max_entries = config.max_entries,
            "Creating new SynthesisCache"
        );
        Self {
            config,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Cache configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Deterministic fingerprint of a synthesis input and its parameters.
    ///
    /// SHA-256 over `"{input}|{params}"`, rendered as lowercase hex.
    pub fn key(input: &str, params: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(input.as_bytes());
        hasher.update(b"|");
        hasher.update(params.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// True when a live entry exists for `key`.
    pub fn has(&self, key: &str) -> bool {
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if entry.is_expired() => {
                tracing::debug!(key, "Cache entry expired, removing");
                entries.remove(key);
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    /// Get the cached payload for `key`.
    ///
    /// Returns None if the entry doesn't exist or is expired.
    #[tracing::instrument(skip(self), fields(cache_size))]
    pub fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.lock();
        tracing::Span::current().record("cache_size", entries.len());

        let entry = entries.get(key)?;
        if entry.is_expired() {
            tracing::debug!("Cache entry expired, removing");
            entries.remove(key);
            return None;
        }

        tracing::debug!(time_remaining = ?entry.time_remaining(), "Cache hit");
        Some(entry.value.clone())
    }

    /// Store a payload under `key`, replacing any previous value.
    #[tracing::instrument(skip(self, value), fields(payload_len = value.len()))]
    pub fn put(&self, key: &str, value: String) {
        let mut entries = self.entries.lock();

        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired());
        let swept = before - entries.len();
        if swept > 0 {
            tracing::debug!(swept, "Swept expired entries on insert");
        }

        if entries.len() >= self.config.max_entries && !entries.contains_key(key) {
            Self::evict_oldest(&mut entries);
        }

        let entry = CacheEntry {
            value,
            created_at: Instant::now(),
            ttl: Duration::from_secs(self.config.ttl_secs),
        };
        entries.insert(key.to_string(), entry);
        tracing::debug!(cache_size = entries.len(), "Inserted entry into cache");
    }

    /// Remove expired entries from cache.
    pub fn sweep_expired(&self) -> usize {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired());

        let removed = before - entries.len();
        if removed > 0 {
            tracing::info!(removed, remaining = entries.len(), "Cleaned up expired cache entries");
        }
        removed
    }

    /// Clear all cache entries.
    pub fn clear(&self) {
        let mut entries = self.entries.lock();
        let count = entries.len();
        entries.clear();
        tracing::info!(cleared = count, "Cleared cache");
    }

    /// Get number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    fn evict_oldest(entries: &mut HashMap<String, CacheEntry>) {
        let oldest = entries
            .iter()
            .min_by_key(|(_, entry)| entry.created_at)
            .map(|(key, _)| key.clone());

        if let Some(key) = oldest {
            tracing::debug!(key = %key, "Evicting oldest entry");
            entries.remove(&key);
        }
    }
}

impl Default for SynthesisCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
