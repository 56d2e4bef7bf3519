use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cache miss: {0}")]
    CacheMiss(String),
}

/// How long a Storefront response may be reused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    NoStore,
    /// Volatile data such as search results and catalog pages
    Short,
    /// Data that rarely changes, such as filter definitions
    Long,
}

/// In-memory cache of Storefront query results
///
/// Two tiers with separate TTLs back the `Short` and `Long` policies.
/// Values are stored as serialized JSON so a single cache can hold any response type.
pub struct QueryCache {
    short: moka::future::Cache<String, Vec<u8>>,
    long: moka::future::Cache<String, Vec<u8>>,
}

impl QueryCache {
    /// Create a new query cache
    pub fn new(max_entries: u64, short_ttl_secs: u64, long_ttl_secs: u64) -> Self {
        let short = moka::future::CacheBuilder::new(max_entries)
            .time_to_live(Duration::from_secs(short_ttl_secs))
            .build();
        let long = moka::future::CacheBuilder::new(max_entries)
            .time_to_live(Duration::from_secs(long_ttl_secs))
            .build();

        Self { short, long }
    }

    fn tier(&self, policy: CachePolicy) -> Option<&moka::future::Cache<String, Vec<u8>>> {
        match policy {
            CachePolicy::NoStore => None,
            CachePolicy::Short => Some(&self.short),
            CachePolicy::Long => Some(&self.long),
        }
    }

    /// Get a value cached under the given policy
    pub async fn get<T>(&self, policy: CachePolicy, key: &str) -> Result<T, CacheError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let cached = match self.tier(policy) {
            Some(tier) => tier.get(key).await,
            None => None,
        };

        if let Some(bytes) = cached {
            tracing::trace!("Cache hit: {}", key);
            return Ok(serde_json::from_slice(&bytes)?);
        }

        tracing::trace!("Cache miss: {}", key);
        Err(CacheError::CacheMiss(key.to_string()))
    }

    /// Store a value under the given policy; `NoStore` is a no-op
    pub async fn set<T>(&self, policy: CachePolicy, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let Some(tier) = self.tier(policy) else {
            return Ok(());
        };

        let bytes = serde_json::to_vec(value)?;
        tier.insert(key.to_string(), bytes).await;

        tracing::trace!("Cache set: {}", key);
        Ok(())
    }

    /// Drop every cached response
    pub async fn clear(&self) {
        self.short.invalidate_all();
        self.long.invalidate_all();
        self.short.run_pending_tasks().await;
        self.long.run_pending_tasks().await;
    }

    /// Get cache statistics once pending inserts and evictions have been applied
    pub async fn stats(&self) -> CacheStats {
        self.short.run_pending_tasks().await;
        self.long.run_pending_tasks().await;

        CacheStats {
            short_entries: self.short.entry_count(),
            long_entries: self.long.entry_count(),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub short_entries: u64,
    pub long_entries: u64,
}

impl CacheStats {
    pub fn total(&self) -> u64 {
        self.short_entries + self.long_entries
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for a GraphQL operation and its variables
    pub fn query(operation: &str, variables: &serde_json::Value) -> String {
        format!("sf:{}:{}", operation, variables)
    }
}
