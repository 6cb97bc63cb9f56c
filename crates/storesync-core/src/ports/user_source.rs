//! UserSource port - ユーザーデータの取得元

use async_trait::async_trait;

use crate::domain::{FetchError, User};

/// UserSource はページの loader にデータを供給する
///
/// # 実装
/// - MockUserApi: 固定データ + 疑似レイテンシ（開発用）
#[async_trait]
pub trait UserSource: Send + Sync {
    async fn fetch_users(&self) -> Result<Vec<User>, FetchError>;

    /// 見つからなければ `Ok(None)`
    async fn fetch_user_details(&self, id: &str) -> Result<Option<User>, FetchError>;
}
