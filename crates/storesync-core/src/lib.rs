//! storesync-core
//!
//! サーバー側で取得したデータを、名前付きのクライアント store に型安全に同期するための部品。
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（User, StoreName, Envelope / SyncEnvelope, errors）
//! - **store**: リアクティブな値スロット（Writable, LoadableStore）
//! - **typed**: 型付き同期 API（SyncTarget trait, StoreRegistry, codec）
//! - **ports**: 抽象化レイヤー（UserSource, SyncSink）
//! - **impls**: 実装（Dispatcher, MockUserApi）
//! - **app**: アプリケーション層（producer, loaders, hydrate）
//! - **config**: 設定（SyncConfig）

pub mod domain;
pub mod store;
pub mod typed;
pub mod ports;
pub mod impls;
pub mod app;
pub mod config;

pub use self::config::SyncConfig;
