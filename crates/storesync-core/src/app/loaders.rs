//! Loaders - サーバー側のページ loader
//!
//! loader は取得の完了を待たずに PageData を返します。
//! 同期対象のフィールドは Pending の envelope として運ばれ、
//! クライアント側の hydrate で解決されます。

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use crate::app::producer::mark_for_sync;
use crate::domain::{LoadError, Payload, SyncEnvelope, SyncError};
use crate::ports::UserSource;
use crate::typed::{codec, UserDetailStore, UsersStore};

/// ページの 1 フィールド
#[derive(Debug)]
pub enum PageField {
    /// store に同期する envelope
    Sync(SyncEnvelope),
    /// そのまま描画層に渡す値
    Raw(Value),
}

/// loader が返すページデータ（フィールド名 → 値）
#[derive(Debug, Default)]
pub struct PageData {
    fields: BTreeMap<String, PageField>,
}

impl PageData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sync(mut self, key: impl Into<String>, envelope: impl Into<SyncEnvelope>) -> Self {
        self.fields.insert(key.into(), PageField::Sync(envelope.into()));
        self
    }

    pub fn with_raw(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), PageField::Raw(value));
        self
    }

    pub fn get(&self, key: &str) -> Option<&PageField> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_fields(self) -> impl Iterator<Item = (String, PageField)> {
        self.fields.into_iter()
    }

    /// サーバー → クライアントの境界を越えるための JSON にする
    ///
    /// Pending の envelope はここで解決されます。
    pub async fn into_json(self) -> Result<Value, SyncError> {
        let mut object = serde_json::Map::new();
        for (key, field) in self.fields {
            let value = match field {
                PageField::Sync(envelope) => codec::encode(envelope).await?,
                PageField::Raw(value) => value,
            };
            object.insert(key, value);
        }
        Ok(Value::Object(object))
    }
}

/// `/` - ユーザー一覧ページ
///
/// # フィールド
/// - `users`: `usersStore` 宛ての Pending envelope
pub fn load_users_page(source: Arc<dyn UserSource>) -> PageData {
    let users = Payload::pending(async move { source.fetch_users().await });
    PageData::new().with_sync("users", mark_for_sync::<UsersStore>(users))
}

/// `/user/{id}/detail` - ユーザー詳細ページ
///
/// # フィールド
/// - `userDetail`: `userDetailStore` 宛ての Pending envelope
/// - `userId`: ルートパラメータ（そのまま）
///
/// id が無い・空の場合は `LoadError::MissingParameter`（400）
pub fn load_user_detail_page(
    source: Arc<dyn UserSource>,
    id: Option<&str>,
) -> Result<PageData, LoadError> {
    let id = id
        .filter(|id| !id.is_empty())
        .ok_or(LoadError::MissingParameter("User ID"))?
        .to_string();

    let detail = Payload::pending({
        let id = id.clone();
        async move { source.fetch_user_details(&id).await }
    });

    Ok(PageData::new()
        .with_sync("userDetail", mark_for_sync::<UserDetailStore>(detail))
        .with_raw("userId", Value::String(id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FetchError, StoreName};
    use crate::impls::MockUserApi;
    use std::time::Duration;

    fn source() -> Arc<dyn UserSource> {
        Arc::new(MockUserApi::with_latency(
            Duration::from_millis(500),
            Duration::from_millis(800),
        ))
    }

    #[test]
    fn users_page_carries_a_pending_envelope() {
        let page = load_users_page(source());
        assert_eq!(page.len(), 1);
        match page.get("users") {
            Some(PageField::Sync(envelope)) => {
                assert_eq!(envelope.name(), StoreName::Users);
                assert!(envelope.is_pending());
            }
            other => panic!("unexpected field: {other:?}"),
        }
    }

    #[test]
    fn detail_page_keeps_the_id_raw() {
        let page = load_user_detail_page(source(), Some("2")).unwrap();
        assert!(matches!(
            page.get("userDetail"),
            Some(PageField::Sync(SyncEnvelope::UserDetail(_)))
        ));
        assert!(matches!(page.get("userId"), Some(PageField::Raw(Value::String(id))) if id == "2"));
    }

    #[test]
    fn detail_page_requires_an_id() {
        let err = load_user_detail_page(source(), None).unwrap_err();
        assert_eq!(err.status_code(), 400);
        let err = load_user_detail_page(source(), Some("")).unwrap_err();
        assert!(matches!(err, LoadError::MissingParameter(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn into_json_resolves_pending_fields() {
        let json = load_user_detail_page(source(), Some("1"))
            .unwrap()
            .into_json()
            .await
            .unwrap();

        assert_eq!(json["userId"], "1");
        assert!(codec::is_valid_envelope(&json["userDetail"]));
        assert_eq!(json["userDetail"]["data"]["phone"], "555-0101");
    }

    #[tokio::test(start_paused = true)]
    async fn into_json_propagates_fetch_failures() {
        let source: Arc<dyn UserSource> = Arc::new(MockUserApi::default().with_outage("down"));
        let err = load_users_page(source).into_json().await.unwrap_err();
        assert!(matches!(err, SyncError::Fetch(FetchError::Unavailable(_))));
    }
}
