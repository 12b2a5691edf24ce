// src/infrastructure/security/redis_session_store.rs
use crate::application::ApplicationResult;
use crate::application::error::ApplicationError;
use crate::application::ports::session_revocation::SessionRevocationStore;
use async_trait::async_trait;
use deadpool_redis::{Config as DeadpoolConfig, Connection, Pool, Runtime};
use redis::AsyncCommands;
use std::time::Duration;

/// Redis-backed revocation list shared by every instance. Entries expire
/// once no token of the session can still be valid.
#[derive(Clone)]
pub struct RedisSessionRevocationStore {
    pool: Pool,
    retention: Duration,
}

impl RedisSessionRevocationStore {
    /// `url` like `redis://:password@host:6379/0`; `retention` should be at
    /// least the longest token lifetime.
    pub fn from_url(url: &str, retention: Duration) -> Result<Self, ApplicationError> {
        let cfg = DeadpoolConfig::from_url(url);
        let pool = cfg
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

        Ok(Self { pool, retention })
    }

    async fn connection(&self) -> ApplicationResult<Connection> {
        self.pool
            .get()
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))
    }
}

fn revoked_key(session_id: &str) -> String {
    format!("revoked:session:{session_id}")
}

#[async_trait]
impl SessionRevocationStore for RedisSessionRevocationStore {
    async fn is_revoked(&self, session_id: &str) -> ApplicationResult<bool> {
        let mut conn = self.connection().await?;
        let exists: bool = conn
            .exists(revoked_key(session_id))
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        Ok(exists)
    }

    async fn revoke(&self, session_id: &str) -> ApplicationResult<()> {
        let mut conn = self.connection().await?;
        conn.set_ex::<_, _, ()>(revoked_key(session_id), 1, self.retention.as_secs().max(1))
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        Ok(())
    }
}
