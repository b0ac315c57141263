//! Per-session state (visit counter)

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AppResult;

/// Session key holding the number of visits to the home page
pub const NUM_VISITS: &str = "num_visits";

/// Key/value store scoped by session id
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Increment an integer value (missing counts as 0) and return the new value.
    /// The session's lifetime is extended to `ttl_seconds`.
    async fn increment(&self, session_id: &str, key: &str, ttl_seconds: u64) -> AppResult<i64>;
}

#[derive(Clone)]
pub struct SessionService {
    store: Arc<dyn SessionStore>,
    ttl_seconds: u64,
}

impl SessionService {
    pub fn new(store: Arc<dyn SessionStore>, ttl_seconds: u64) -> Self {
        Self { store, ttl_seconds }
    }

    /// Count this visit; returns the number of visits before it
    pub async fn record_visit(&self, session_id: &str) -> AppResult<i64> {
        let visits = self
            .store
            .increment(session_id, NUM_VISITS, self.ttl_seconds)
            .await?;
        Ok((visits - 1).max(0))
    }
}
