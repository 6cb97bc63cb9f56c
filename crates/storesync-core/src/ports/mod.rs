//! Ports - 抽象化レイヤー
//!
//! 各 trait は外部の協力者（データ取得元、envelope の適用先）への
//! インターフェースを提供し、実装の詳細を隠蔽します。

pub mod user_source;
pub mod sync_sink;

pub use self::user_source::UserSource;
pub use self::sync_sink::SyncSink;
