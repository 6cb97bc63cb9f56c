//! Envelope - store 名とデータの組
//!
//! # 二層構造
//! - **表層（Typed）**: `Envelope<K>` - `K: SyncTarget` が名前と値の型を同時に決める
//! - **内部（Erased）**: `SyncEnvelope` - store ごとに 1 variant を持つ判別共用体
//!
//! `Envelope<K>` から `SyncEnvelope` への変換は `K::into_sync` が担うので、
//! 名前とデータ型の組み合わせがずれることはありません。

use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;

use super::errors::FetchError;
use super::store_name::StoreName;
use super::user::User;
use crate::typed::SyncTarget;

/// まだ解決していない値
pub type PendingValue<T> = Pin<Box<dyn Future<Output = Result<T, FetchError>> + Send + 'static>>;

/// Payload は「値」または「まだ解決していない値」
///
/// dispatcher の suspension point は `Pending` の await だけです。
pub enum Payload<T> {
    Ready(T),
    Pending(PendingValue<T>),
}

impl<T> Payload<T> {
    pub fn ready(value: T) -> Self {
        Payload::Ready(value)
    }

    pub fn pending<F>(future: F) -> Self
    where
        F: Future<Output = Result<T, FetchError>> + Send + 'static,
    {
        Payload::Pending(Box::pin(future))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Payload::Pending(_))
    }

    /// 値を取り出す（Pending なら await する）
    pub async fn resolve(self) -> Result<T, FetchError> {
        match self {
            Payload::Ready(value) => Ok(value),
            Payload::Pending(future) => future.await,
        }
    }
}

impl<T> From<T> for Payload<T> {
    fn from(value: T) -> Self {
        Payload::Ready(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Payload<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Ready(value) => f.debug_tuple("Ready").field(value).finish(),
            Payload::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

/// 型付き envelope
///
/// # 使用例
/// ```ignore
/// let envelope = Envelope::<UsersStore>::new(users);
/// assert_eq!(envelope.name(), StoreName::Users);
/// ```
///
/// `Envelope::<UsersStore>::new(Some(user))` はコンパイルできません。
pub struct Envelope<K: SyncTarget> {
    data: Payload<K::Value>,
    _marker: PhantomData<fn() -> K>,
}

impl<K: SyncTarget> Envelope<K> {
    pub fn new(data: impl Into<Payload<K::Value>>) -> Self {
        Self {
            data: data.into(),
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> StoreName {
        K::NAME
    }

    pub fn data(&self) -> &Payload<K::Value> {
        &self.data
    }

    pub fn into_data(self) -> Payload<K::Value> {
        self.data
    }

    pub fn into_sync(self) -> SyncEnvelope {
        K::into_sync(self)
    }
}

impl<K: SyncTarget> fmt::Debug for Envelope<K>
where
    K::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Envelope")
            .field("name", &K::NAME)
            .field("data", &self.data)
            .finish()
    }
}

/// SyncEnvelope は全 store の envelope の判別共用体
///
/// store を追加したら variant も追加します。dispatcher と codec の match が
/// 網羅的なので、対応漏れはコンパイルエラーになります。
#[derive(Debug)]
pub enum SyncEnvelope {
    Users(Payload<Vec<User>>),
    UserDetail(Payload<Option<User>>),
}

impl SyncEnvelope {
    pub fn name(&self) -> StoreName {
        match self {
            SyncEnvelope::Users(_) => StoreName::Users,
            SyncEnvelope::UserDetail(_) => StoreName::UserDetail,
        }
    }

    pub fn is_pending(&self) -> bool {
        match self {
            SyncEnvelope::Users(payload) => payload.is_pending(),
            SyncEnvelope::UserDetail(payload) => payload.is_pending(),
        }
    }
}

impl<K: SyncTarget> From<Envelope<K>> for SyncEnvelope {
    fn from(envelope: Envelope<K>) -> Self {
        envelope.into_sync()
    }
}
