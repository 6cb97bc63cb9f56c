//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **Dispatcher**: SyncSink の実装。envelope を registry の store に適用する
//! - **MockUserApi**: 開発用の UserSource

pub mod dispatch;
pub mod mock_api;

pub use self::dispatch::Dispatcher;
pub use self::mock_api::MockUserApi;
