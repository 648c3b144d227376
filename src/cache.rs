use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::{db::DbPool, error::AppResult};

/// Process-wide cache of known category names.
///
/// Holds the full list plus the instant it was loaded; reads past the TTL
/// reload the list wholesale. Mutations that add a category call
/// [`CategoryCache::invalidate`] so the next read refreshes immediately.
#[derive(Clone)]
pub struct CategoryCache {
    inner: Arc<Mutex<Option<Entry>>>,
    ttl: Duration,
}

struct Entry {
    names: Vec<String>,
    refreshed_at: Instant,
}

impl Entry {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.refreshed_at.elapsed() < ttl
    }
}

impl CategoryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(None)),
            ttl,
        }
    }

    /// Return the cached category names, reloading from the database when the
    /// cache is empty or stale. Refreshes are serialized by the mutex.
    pub async fn get_or_refresh(&self, pool: &DbPool) -> AppResult<Vec<String>> {
        let mut guard = self.inner.lock().await;
        if let Some(entry) = guard.as_ref() {
            if entry.is_fresh(self.ttl) {
                return Ok(entry.names.clone());
            }
        }

        let names: Vec<String> =
            sqlx::query_scalar("SELECT product_type FROM categories ORDER BY product_type")
                .fetch_all(pool)
                .await?;
        tracing::debug!(count = names.len(), "category cache refreshed");
        *guard = Some(Entry {
            names: names.clone(),
            refreshed_at: Instant::now(),
        });
        Ok(names)
    }

    pub async fn invalidate(&self) {
        *self.inner.lock().await = None;
    }

    #[cfg(test)]
    async fn prime(&self, names: Vec<String>) {
        *self.inner.lock().await = Some(Entry {
            names,
            refreshed_at: Instant::now(),
        });
    }

    #[cfg(test)]
    async fn cached(&self) -> Option<Vec<String>> {
        let guard = self.inner.lock().await;
        guard
            .as_ref()
            .filter(|e| e.is_fresh(self.ttl))
            .map(|e| e.names.clone())
    }
}
