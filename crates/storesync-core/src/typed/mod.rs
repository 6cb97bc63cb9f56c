//! Typed - 型付き同期 API
//!
//! このモジュールは store 名の typo を型で排除し、
//! store 名とデータ型の対応付けを静的に保証します。
//!
//! # 二層構造
//! - **表層（Typed）**: `SyncTarget` trait, `Envelope<K>` - 型安全
//! - **内部（Erased）**: `SyncEnvelope`, `StoreRef` - 実行時の名前で扱う

pub mod target;
pub mod registry;
pub mod codec;

pub use self::target::{SyncTarget, UserDetailStore, UsersStore};
pub use self::registry::{StoreRef, StoreRegistry};
pub use self::codec::{decode, encode, is_valid_envelope, wrap, NAME_KEY, SIGNATURE_KEY};
