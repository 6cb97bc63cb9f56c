//! LoadableStore - loading / error スロット付きの store

use tokio::sync::watch;

use super::writable::Writable;
use crate::domain::FetchError;

/// 値スロットと、その派生スロット（loading, error）をまとめた store
///
/// # 初期状態
/// - value: 生成時に渡した値
/// - loading: false
/// - error: None
///
/// 書き込むのは dispatcher だけで、その他の利用者は読むだけです。
#[derive(Debug, Clone)]
pub struct LoadableStore<T> {
    pub value: Writable<T>,
    pub loading: Writable<bool>,
    pub error: Writable<Option<FetchError>>,
}

impl<T> LoadableStore<T> {
    pub fn new(initial: T) -> Self {
        Self {
            value: Writable::new(initial),
            loading: Writable::new(false),
            error: Writable::new(None),
        }
    }

    pub fn set(&self, value: T) {
        self.value.set(value);
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.value.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    pub fn last_error(&self) -> Option<FetchError> {
        self.error.get()
    }
}

impl<T: Clone> LoadableStore<T> {
    pub fn get(&self) -> T {
        self.value.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_store_is_idle() {
        let store = LoadableStore::new(Vec::<u32>::new());
        assert!(store.get().is_empty());
        assert!(!store.is_loading());
        assert_eq!(store.last_error(), None);
    }

    #[test]
    fn derived_slots_are_independent_of_value() {
        let store = LoadableStore::new(None::<u32>);
        store.loading.set(true);
        store.error.set(Some(FetchError::Cancelled));
        assert_eq!(store.get(), None);

        store.set(Some(3));
        assert_eq!(store.get(), Some(3));
        assert!(store.is_loading());
        assert_eq!(store.last_error(), Some(FetchError::Cancelled));
    }
}
