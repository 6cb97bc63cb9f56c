//! Producer helper - データに同期先の store 名を付ける

use crate::domain::{Envelope, Payload};
use crate::typed::SyncTarget;

/// data を store `K` に同期するよう印を付ける
///
/// 同期的で副作用はありません。Pending の data も await しません。
///
/// # 使用例
/// ```ignore
/// let envelope = mark_for_sync::<UsersStore>(Payload::pending(fetch_users()));
/// ```
pub fn mark_for_sync<K: SyncTarget>(data: impl Into<Payload<K::Value>>) -> Envelope<K> {
    Envelope::new(data)
}
