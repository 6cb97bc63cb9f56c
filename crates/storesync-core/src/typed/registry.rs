//! StoreRegistry - store 名と store の対応表
//!
//! # 設計
//! - 起動時に 1 回だけ構築し、以後は読み取り専用
//! - グローバルな singleton にはせず、`Arc<StoreRegistry>` として必要な層に渡す
//! - 実行時の文字列での lookup は `resolve()`、型での lookup は `get::<K>()`

use crate::domain::{CodecError, FetchError, StoreName, User};
use crate::store::LoadableStore;
use crate::typed::target::SyncTarget;

/// StoreRegistry は全ての同期対象 store を保持
///
/// # 使用例
/// ```ignore
/// let registry = Arc::new(StoreRegistry::new());
/// let users = registry.get::<UsersStore>().get();
///
/// // 実行時の名前で引く
/// let handle = registry.resolve("usersStore");
/// ```
#[derive(Debug)]
pub struct StoreRegistry {
    users: LoadableStore<Vec<User>>,
    user_detail: LoadableStore<Option<User>>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self {
            users: LoadableStore::new(Vec::new()),
            user_detail: LoadableStore::new(None),
        }
    }

    pub fn users(&self) -> &LoadableStore<Vec<User>> {
        &self.users
    }

    pub fn user_detail(&self) -> &LoadableStore<Option<User>> {
        &self.user_detail
    }

    pub fn get<K: SyncTarget>(&self) -> &LoadableStore<K::Value> {
        K::slot(self)
    }

    pub fn handle(&self, name: StoreName) -> StoreRef<'_> {
        match name {
            StoreName::Users => StoreRef::Users(&self.users),
            StoreName::UserDetail => StoreRef::UserDetail(&self.user_detail),
        }
    }

    /// 名前で store を引く。registry に無い名前なら None
    pub fn resolve(&self, name: &str) -> Option<StoreRef<'_>> {
        name.parse::<StoreName>().ok().map(|name| self.handle(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        StoreName::is_known(name)
    }

    pub fn names(&self) -> [StoreName; 2] {
        StoreName::ALL
    }
}

impl Default for StoreRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// 名前で引いた store への参照
#[derive(Debug, Clone, Copy)]
pub enum StoreRef<'a> {
    Users(&'a LoadableStore<Vec<User>>),
    UserDetail(&'a LoadableStore<Option<User>>),
}

impl StoreRef<'_> {
    pub fn name(&self) -> StoreName {
        match self {
            StoreRef::Users(_) => StoreName::Users,
            StoreRef::UserDetail(_) => StoreName::UserDetail,
        }
    }

    pub fn is_loading(&self) -> bool {
        match self {
            StoreRef::Users(store) => store.is_loading(),
            StoreRef::UserDetail(store) => store.is_loading(),
        }
    }

    pub fn last_error(&self) -> Option<FetchError> {
        match self {
            StoreRef::Users(store) => store.last_error(),
            StoreRef::UserDetail(store) => store.last_error(),
        }
    }

    /// 現在値を JSON で取り出す（描画層向け）
    pub fn snapshot(&self) -> Result<serde_json::Value, CodecError> {
        let value = match self {
            StoreRef::Users(store) => store.value.read(|v| serde_json::to_value(v)),
            StoreRef::UserDetail(store) => store.value.read(|v| serde_json::to_value(v)),
        };
        value.map_err(CodecError::Encode)
    }
}
