//! SyncSink port - envelope の適用先

use async_trait::async_trait;

use crate::domain::{SyncEnvelope, SyncError};

/// SyncSink は検証済みの envelope を store に適用する
///
/// hydrate はこの trait 越しに dispatcher を呼びます。
#[async_trait]
pub trait SyncSink: Send + Sync {
    async fn apply(&self, envelope: SyncEnvelope) -> Result<bool, SyncError>;
}
