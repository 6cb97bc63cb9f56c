//! Writable - tokio::sync::watch を使った値スロット

use tokio::sync::watch;

/// A shared, observable value slot.
///
/// Clones share the same slot. `set` never fails, even when nobody is
/// subscribed.
#[derive(Debug)]
pub struct Writable<T> {
    tx: watch::Sender<T>,
}

impl<T> Writable<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Replace the value and notify subscribers.
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Mutate the value in place and notify subscribers.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        self.tx.send_modify(f);
    }

    /// Subscribe to changes.
    ///
    /// 返り値の receiver は購読時点の値をすぐに `borrow()` できます。
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// Read the value without cloning it.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.tx.borrow())
    }
}

impl<T: Clone> Writable<T> {
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }
}

impl<T> Clone for Writable<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T: Default> Default for Writable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
