//! Serializes downloads that would write the same file.
//!
//! Output names come from the media title, so two sessions asking for the
//! same URL target the same path whatever they picked. Such requests run
//! one after another; requests for different URLs never wait on each other.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Keyed async lock over in-flight download requests.
#[derive(Debug, Default)]
pub struct InflightDownloads {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl InflightDownloads {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no other holder of `key` remains, then holds it until the guard drops.
    pub async fn acquire(self: &Arc<Self>, key: impl Into<String>) -> InflightGuard {
        let key = key.into();
        let lock = Arc::clone(&self.locks.entry(key.clone()).or_default());

        let guard = match Arc::clone(&lock).try_lock_owned() {
            Ok(guard) => guard,
            Err(_) => {
                tracing::info!("Identical download in progress, waiting: {}", key);
                lock.lock_owned().await
            }
        };

        InflightGuard {
            registry: Arc::clone(self),
            key,
            guard: Some(guard),
        }
    }

    /// Number of keys currently held or waited on
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

/// Held for the duration of one download.
pub struct InflightGuard {
    registry: Arc<InflightDownloads>,
    key: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl InflightGuard {
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for InflightGuard {
    fn drop(&mut self) {
        // Release first so the strong count below only sees the map and waiters.
        drop(self.guard.take());
        self.registry
            .locks
            .remove_if(&self.key, |_, lock| Arc::strong_count(lock) == 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_entry_removed_after_release() {
        let registry = Arc::new(InflightDownloads::new());
        {
            let guard = registry.acquire("https://example.com/v1|high quality video").await;
            assert_eq!(guard.key(), "https://example.com/v1|high quality video");
            assert_eq!(registry.len(), 1);
        }
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_different_keys_do_not_block() {
        let registry = Arc::new(InflightDownloads::new());
        let _a = registry.acquire("a").await;
        let b = tokio::time::timeout(Duration::from_secs(1), registry.acquire("b")).await;
        assert!(b.is_ok());
        assert_eq!(registry.len(), 2);
    }

    #[tokio::test]
    async fn test_same_key_waits_for_release() {
        let registry = Arc::new(InflightDownloads::new());
        let first = registry.acquire("same").await;

        let waiter = {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move {
                let _guard = registry.acquire("same").await;
            })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!waiter.is_finished());

        drop(first);
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should acquire after release")
            .unwrap();
        assert!(registry.is_empty());
    }
}
