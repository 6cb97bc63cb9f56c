//! Hydrate - クライアント側でページデータを store に反映する
//!
//! 型判定に通ったフィールドだけを dispatcher に渡し、
//! それ以外は raw のまま描画層に返します。
//!
//! フィールドは互いに独立しています。1 つが失敗しても残りのフィールドは適用し、
//! 失敗は `HydrationReport::failed` にまとめて返します。

use std::collections::BTreeMap;

use serde_json::Value;

use crate::app::loaders::{PageData, PageField};
use crate::domain::{LoadError, StoreName, SyncEnvelope, SyncError, User};
use crate::ports::SyncSink;
use crate::typed::{codec, StoreRegistry, UserDetailStore};

/// hydrate の結果
#[derive(Debug, Default)]
pub struct HydrationReport {
    /// 更新した store（適用順）
    pub applied: Vec<StoreName>,
    /// envelope ではなかったフィールド
    pub raw: BTreeMap<String, Value>,
    /// 適用に失敗したフィールド
    pub failed: BTreeMap<String, SyncError>,
}

impl HydrationReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// 失敗があれば最初の 1 件をページ層のエラーとして返す
    pub fn into_result(mut self) -> Result<Self, LoadError> {
        match self.failed.pop_first() {
            Some((_, err)) => Err(LoadError::Internal(err)),
            None => Ok(self),
        }
    }

    async fn apply_field<S>(
        &mut self,
        sink: &S,
        key: String,
        result: Result<SyncEnvelope, SyncError>,
    )
    where
        S: SyncSink + ?Sized,
    {
        let outcome = match result {
            Ok(envelope) => {
                let name = envelope.name();
                sink.apply(envelope).await.map(|_| name)
            }
            Err(err) => Err(err),
        };
        match outcome {
            Ok(name) => self.applied.push(name),
            Err(err) => {
                tracing::warn!(field = %key, %err, "page field was not applied");
                self.failed.insert(key, err);
            }
        }
    }
}

/// 同一プロセス内で受け取ったページデータを反映する
pub async fn hydrate<S>(sink: &S, page: PageData) -> HydrationReport
where
    S: SyncSink + ?Sized,
{
    let mut report = HydrationReport::default();
    for (key, field) in page.into_fields() {
        match field {
            PageField::Sync(envelope) => report.apply_field(sink, key, Ok(envelope)).await,
            PageField::Raw(value) => {
                report.raw.insert(key, value);
            }
        }
    }
    report
}

/// 境界を越えてきた JSON のページデータを反映する
///
/// 各トップレベルのフィールドに型判定をかけます。
/// オブジェクトでないページデータは `""` キーの raw として返します。
pub async fn hydrate_json<S>(sink: &S, page: Value) -> HydrationReport
where
    S: SyncSink + ?Sized,
{
    let mut report = HydrationReport::default();
    let fields = match page {
        Value::Object(fields) => fields,
        other => {
            report.raw.insert(String::new(), other);
            return report;
        }
    };

    for (key, value) in fields {
        if !codec::is_valid_envelope(&value) {
            report.raw.insert(key, value);
            continue;
        }
        let decoded = codec::decode(value).map_err(SyncError::from);
        report.apply_field(sink, key, decoded).await;
    }
    report
}

/// 詳細ページの描画用: store が空なら 404 扱い
pub fn user_detail_view(registry: &StoreRegistry, id: &str) -> Result<User, LoadError> {
    registry
        .get::<UserDetailStore>()
        .get()
        .ok_or_else(|| LoadError::NotFound(format!("user {id}")))
}
