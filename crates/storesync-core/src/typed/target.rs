//! SyncTarget trait - store 名と値の型の対応付け
//!
//! # Trait Bounds
//! - `Value: Serialize + DeserializeOwned`: 境界を越えるときの JSON 変換のため
//! - `Value: Clone`: store の現在値を取り出すため
//! - `Send + Sync + 'static`: tokio の task をまたいで使うため

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::{Envelope, StoreName, SyncEnvelope, User};
use crate::store::LoadableStore;
use crate::typed::registry::StoreRegistry;

/// SyncTarget は 1 つの store を表すマーカー
///
/// # 使用例
/// ```ignore
/// pub enum PostsStore {}
///
/// impl SyncTarget for PostsStore {
///     const NAME: StoreName = StoreName::Posts;
///     type Value = Vec<Post>;
///     ...
/// }
/// ```
///
/// `NAME` と `Value` が同じ impl に書かれるので、名前とデータ型がずれません。
pub trait SyncTarget: Sized + Send + Sync + 'static {
    const NAME: StoreName;

    type Value: Serialize + DeserializeOwned + Clone + Send + Sync + 'static;

    /// registry 内の対応する store
    fn slot(registry: &StoreRegistry) -> &LoadableStore<Self::Value>;

    /// 型付き envelope を判別共用体に変換
    fn into_sync(envelope: Envelope<Self>) -> SyncEnvelope;
}

/// `usersStore`: ユーザー一覧（初期値は空）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UsersStore {}

impl SyncTarget for UsersStore {
    const NAME: StoreName = StoreName::Users;

    type Value = Vec<User>;

    fn slot(registry: &StoreRegistry) -> &LoadableStore<Self::Value> {
        registry.users()
    }

    fn into_sync(envelope: Envelope<Self>) -> SyncEnvelope {
        SyncEnvelope::Users(envelope.into_data())
    }
}

/// `userDetailStore`: 単一ユーザーの詳細（初期値は None）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserDetailStore {}

impl SyncTarget for UserDetailStore {
    const NAME: StoreName = StoreName::UserDetail;

    type Value = Option<User>;

    fn slot(registry: &StoreRegistry) -> &LoadableStore<Self::Value> {
        registry.user_detail()
    }

    fn into_sync(envelope: Envelope<Self>) -> SyncEnvelope {
        SyncEnvelope::UserDetail(envelope.into_data())
    }
}
