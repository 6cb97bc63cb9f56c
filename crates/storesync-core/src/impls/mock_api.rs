//! MockUserApi - 開発用の UserSource
//!
//! 固定の 3 ユーザーを、設定されたレイテンシの後に返します。

use std::time::Duration;

use async_trait::async_trait;

use crate::config::SyncConfig;
use crate::domain::{FetchError, User};
use crate::ports::UserSource;

#[derive(Debug, Clone)]
pub struct MockUserApi {
    users_latency: Duration,
    detail_latency: Duration,
    outage: Option<String>,
}

impl MockUserApi {
    pub fn new(config: &SyncConfig) -> Self {
        Self::with_latency(config.users_latency(), config.detail_latency())
    }

    pub fn with_latency(users_latency: Duration, detail_latency: Duration) -> Self {
        Self {
            users_latency,
            detail_latency,
            outage: None,
        }
    }

    /// 全ての呼び出しを `FetchError::Unavailable` で失敗させる
    pub fn with_outage(mut self, reason: impl Into<String>) -> Self {
        self.outage = Some(reason.into());
        self
    }

    fn check_outage(&self) -> Result<(), FetchError> {
        match &self.outage {
            Some(reason) => Err(FetchError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

impl Default for MockUserApi {
    fn default() -> Self {
        Self::new(&SyncConfig::default())
    }
}

fn millis(latency: Duration) -> u64 {
    u64::try_from(latency.as_millis()).unwrap_or(u64::MAX)
}

fn seed_users() -> Vec<User> {
    vec![
        User::new(1, "John Doe", "john@example.com"),
        User::new(2, "Jane Smith", "jane@example.com"),
        User::new(3, "Bob Johnson", "bob@example.com"),
    ]
}

#[async_trait]
impl UserSource for MockUserApi {
    async fn fetch_users(&self) -> Result<Vec<User>, FetchError> {
        tracing::debug!(latency_ms = millis(self.users_latency), "fetching user list");
        tokio::time::sleep(self.users_latency).await;
        self.check_outage()?;
        Ok(seed_users())
    }

    async fn fetch_user_details(&self, id: &str) -> Result<Option<User>, FetchError> {
        tracing::debug!(%id, latency_ms = millis(self.detail_latency), "fetching user details");
        tokio::time::sleep(self.detail_latency).await;

        let users = self.fetch_users().await?;
        let Some(mut user) = users.into_iter().find(|u| u.matches_id(id)) else {
            tracing::warn!(%id, "user not found");
            return Ok(None);
        };

        let key = user.id.to_string();
        user.address = Some(format!("{key} Mock St, Sample City"));
        user.phone = Some(format!("555-01{key:0>2}"));
        Ok(Some(user))
    }
}
