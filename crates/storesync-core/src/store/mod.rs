//! Store - リアクティブな値スロット
//!
//! - **Writable**: get / set / update / subscribe を持つ単一の値スロット
//! - **LoadableStore**: 値スロット + loading / error の派生スロット

pub mod writable;
pub mod loadable;

pub use self::writable::Writable;
pub use self::loadable::LoadableStore;
