//! Single-value cache with a time-to-live

use std::future::Future;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

struct Entry<T> {
    value: T,
    expires_at: Instant,
}

/// Holds one value until it expires
///
/// `get_or_refresh` keeps the lock across the refill, so callers racing on
/// an expired entry wait for one fetch instead of each starting their own.
pub struct ExpiringCache<T> {
    ttl: Duration,
    entry: Mutex<Option<Entry<T>>>,
}

impl<T: Clone> ExpiringCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: Mutex::new(None),
        }
    }

    /// Cached value, or the result of `fetch` stored for one TTL
    ///
    /// A failed fetch leaves the cache empty.
    pub async fn get_or_refresh<F, Fut, E>(&self, fetch: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut entry = self.entry.lock().await;
        if let Some(cached) = entry.as_ref() {
            if cached.expires_at > Instant::now() {
                return Ok(cached.value.clone());
            }
        }

        let value = fetch().await?;
        *entry = Some(Entry {
            value: value.clone(),
            expires_at: Instant::now() + self.ttl,
        });
        Ok(value)
    }

    /// Drop the cached value
    pub async fn invalidate(&self) {
        *self.entry.lock().await = None;
    }
}
