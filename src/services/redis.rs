//! Redis-backed session store

use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, Client};

use crate::{
    error::{AppError, AppResult},
    services::sessions::SessionStore,
};

#[derive(Clone)]
pub struct RedisService {
    conn: MultiplexedConnection,
}

impl RedisService {
    /// Connect once; clones of the multiplexed connection share it
    pub async fn new(url: &str) -> AppResult<Self> {
        let client = Client::open(url)
            .map_err(|e| AppError::Internal(format!("Failed to create Redis client: {}", e)))?;

        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to connect to Redis: {}", e)))?;

        // Test connection
        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::Internal(format!("Redis connection test failed: {}", e)))?;

        Ok(Self { conn })
    }
}

fn session_key(session_id: &str, key: &str) -> String {
    format!("session:{}:{}", session_id, key)
}

/// INCR and EXPIRE in one MULTI/EXEC, so a counter never outlives its session
fn visit_pipeline(key: &str, ttl_seconds: u64) -> redis::Pipeline {
    let mut pipe = redis::pipe();
    pipe.atomic()
        .incr(key, 1)
        .expire(key, ttl_seconds as i64)
        .ignore();
    pipe
}

#[async_trait]
impl SessionStore for RedisService {
    async fn increment(&self, session_id: &str, key: &str, ttl_seconds: u64) -> AppResult<i64> {
        let mut conn = self.conn.clone();
        let key = session_key(session_id, key);

        let (value,) = visit_pipeline(&key, ttl_seconds)
            .query_async::<_, (i64,)>(&mut conn)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to increment session value: {}", e)))?;

        Ok(value)
    }
}
