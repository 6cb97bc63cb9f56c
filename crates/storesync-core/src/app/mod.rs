//! App - アプリケーション層
//!
//! ports と typed を組み合わせて、ページ単位の同期を実装します。
//!
//! # 主要コンポーネント
//! - **producer**: loader がデータに store 名の印を付けるための helper
//! - **loaders**: サーバー側のページ loader（PageData を返す）
//! - **hydrate**: クライアント側で PageData を store に反映する

pub mod producer;
pub mod loaders;
pub mod hydrate;

pub use self::producer::mark_for_sync;
pub use self::loaders::{load_user_detail_page, load_users_page, PageData, PageField};
pub use self::hydrate::{hydrate, hydrate_json, user_detail_view, HydrationReport};
