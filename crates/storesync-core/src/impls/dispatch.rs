//! Dispatcher - envelope を名前の store に適用する
//!
//! # 適用フロー
//! 1. `loading = true`
//! 2. data が Pending なら await
//! 3. 成功: 値を書き込み、`error = None`
//!    失敗: `error = Some(err)` を書き込み、エラーを返す
//! 4. `loading = false`（成功・失敗どちらでも）
//!
//! Pending の await 中に future が drop された場合（timeout, select!, abort）は
//! `loading = false`、`error = Some(FetchError::Cancelled)` になり、値は変わりません。
//!
//! 同じ store への apply が並行に走った場合は後勝ちです（ロックもバージョン確認もしない）。

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Envelope, FetchError, Payload, StoreName, SyncEnvelope, SyncError};
use crate::ports::SyncSink;
use crate::store::{LoadableStore, Writable};
use crate::typed::{StoreRegistry, SyncTarget, UserDetailStore, UsersStore};

/// Dispatcher は registry の唯一の書き込み手
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<StoreRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<StoreRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &StoreRegistry {
        &self.registry
    }

    /// Apply one envelope. Returns `Ok(true)` once the value is in the store.
    pub async fn apply(&self, envelope: SyncEnvelope) -> Result<bool, SyncError> {
        let name = envelope.name();
        tracing::info!(store = %name, pending = envelope.is_pending(), "updating store from envelope");

        // store ごとに具体的な型で適用する（網羅的な match）
        match envelope {
            SyncEnvelope::Users(payload) => {
                apply_to(self.registry.get::<UsersStore>(), name, payload).await?
            }
            SyncEnvelope::UserDetail(payload) => {
                apply_to(self.registry.get::<UserDetailStore>(), name, payload).await?
            }
        }
        Ok(true)
    }

    pub async fn apply_typed<K: SyncTarget>(&self, envelope: Envelope<K>) -> Result<bool, SyncError> {
        self.apply(envelope.into_sync()).await
    }
}

#[async_trait]
impl SyncSink for Dispatcher {
    async fn apply(&self, envelope: SyncEnvelope) -> Result<bool, SyncError> {
        Dispatcher::apply(self, envelope).await
    }
}

/// await 中に apply の future が drop されたときの後始末
///
/// 解決前に drop されたら `loading = false`、`error = Some(Cancelled)` に戻す。
struct PendingGuard<'a> {
    loading: &'a Writable<bool>,
    error: &'a Writable<Option<FetchError>>,
    name: StoreName,
    armed: bool,
}

impl<'a> PendingGuard<'a> {
    fn arm<T>(store: &'a LoadableStore<T>, name: StoreName) -> Self {
        store.loading.set(true);
        Self {
            loading: &store.loading,
            error: &store.error,
            name,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            tracing::warn!(store = %self.name, "apply dropped before the pending value resolved");
            self.error.set(Some(FetchError::Cancelled));
            self.loading.set(false);
        }
    }
}

async fn apply_to<T>(
    store: &LoadableStore<T>,
    name: StoreName,
    payload: Payload<T>,
) -> Result<(), FetchError> {
    let guard = PendingGuard::arm(store, name);
    let result = payload.resolve().await;
    guard.disarm();
    match result {
        Ok(value) => {
            store.set(value);
            store.error.set(None);
            store.loading.set(false);
            tracing::debug!(store = %name, "store updated");
            Ok(())
        }
        Err(err) => {
            tracing::warn!(store = %name, %err, "pending value failed, store left unchanged");
            store.error.set(Some(err.clone()));
            store.loading.set(false);
            Err(err)
        }
    }
}
