//! Tests for the synthesis cache.

use moodcomic_cache::{CacheConfig, CacheConfigBuilder, SynthesisCache};
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn test_put_then_get_within_ttl() {
    let cache = SynthesisCache::new(CacheConfig::default().with_ttl_secs(60));
    let key = SynthesisCache::key("a red umbrella", "cute");

    cache.put(&key, "payload".to_string());
    tokio::time::advance(Duration::from_secs(59)).await;

    assert!(cache.has(&key));
    assert_eq!(cache.get(&key).as_deref(), Some("payload"));
}

#[tokio::test(start_paused = true)]
async fn test_entry_expires_after_ttl() {
    let cache = SynthesisCache::new(CacheConfig::default().with_ttl_secs(60));
    let key = SynthesisCache::key("a red umbrella", "cute");

    cache.put(&key, "payload".to_string());
    tokio::time::advance(Duration::from_secs(61)).await;

    assert!(!cache.has(&key));
    assert_eq!(cache.get(&key), None);
    assert!(cache.is_empty(), "expired entry should be evicted on lookup");
}

#[tokio::test(start_paused = true)]
async fn test_put_sweeps_expired_entries() {
    let cache = SynthesisCache::new(CacheConfig::default().with_ttl_secs(10));
    cache.put("old-1", "x".to_string());
    cache.put("old-2", "y".to_string());
    tokio::time::advance(Duration::from_secs(11)).await;

    cache.put("fresh", "z".to_string());

    assert_eq!(cache.len(), 1);
    assert!(cache.has("fresh"));
}

#[tokio::test(start_paused = true)]
async fn test_sweep_expired_reports_removed_count() {
    let cache = SynthesisCache::new(CacheConfig::default().with_ttl_secs(10));
    cache.put("a", "1".to_string());
    tokio::time::advance(Duration::from_secs(5)).await;
    cache.put("b", "2".to_string());
    tokio::time::advance(Duration::from_secs(6)).await;

    assert_eq!(cache.sweep_expired(), 1);
    assert_eq!(cache.len(), 1);
    assert!(cache.has("b"));
}

#[tokio::test(start_paused = true)]
async fn test_full_cache_evicts_oldest() {
    let config = CacheConfigBuilder::default()
        .ttl_secs(600)
        .max_entries(2)
        .build()
        .unwrap();
    let cache = SynthesisCache::new(config);

    cache.put("first", "1".to_string());
    tokio::time::advance(Duration::from_secs(1)).await;
    cache.put("second", "2".to_string());
    tokio::time::advance(Duration::from_secs(1)).await;
    cache.put("third", "3".to_string());

    assert_eq!(cache.len(), 2);
    assert!(!cache.has("first"));
    assert!(cache.has("second"));
    assert!(cache.has("third"));
}

#[tokio::test]
async fn test_overwrite_keeps_single_entry() {
    let cache = SynthesisCache::default();
    cache.put("k", "old".to_string());
    cache.put("k", "new".to_string());

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get("k").as_deref(), Some("new"));
}

#[tokio::test]
async fn test_clear_removes_everything() {
    let cache = SynthesisCache::default();
    cache.put("a", "1".to_string());
    cache.put("b", "2".to_string());

    cache.clear();

    assert!(cache.is_empty());
    assert_eq!(cache.get("a"), None);
}

#[test]
fn test_key_is_deterministic() {
    let first = SynthesisCache::key("night market", "dreamy");
    let second = SynthesisCache::key("night market", "dreamy");
    assert_eq!(first, second);
    assert_eq!(first.len(), 64);
    assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_key_depends_on_input_and_params() {
    let base = SynthesisCache::key("night market", "dreamy");
    assert_ne!(base, SynthesisCache::key("night market", "raw"));
    assert_ne!(base, SynthesisCache::key("night markets", "dreamy"));
}

#[test]
fn test_default_config() {
    let config = CacheConfig::default();
    assert_eq!(*config.ttl_secs(), 1800);
    assert_eq!(*config.max_entries(), 1000);
}
