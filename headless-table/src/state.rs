//! Shared, observable state

use std::sync::Arc;
use std::sync::RwLock;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

/// Shared state handle with interior mutability and a dirty flag.
///
/// `State<T>` uses `Arc<RwLock<T>>` internally, so clones are cheap and all
/// point at the same value. Every write marks the state dirty; a host polls
/// [`take_dirty`](Self::take_dirty) to learn that it should re-read.
///
/// Writes are last-writer-wins. A poisoned lock is recovered for reads and
/// skipped for writes.
///
/// # Example
///
/// ```
/// use headless_table::State;
///
/// let counter = State::new(0);
/// let handle = counter.clone();
/// handle.update(|v| *v += 1);
///
/// assert_eq!(counter.get(), 1);
/// assert!(counter.take_dirty());
/// assert!(!counter.is_dirty());
/// ```
#[derive(Debug)]
pub struct State<T> {
    inner: Arc<RwLock<T>>,
    dirty: Arc<AtomicBool>,
}

impl<T> State<T> {
    /// Create a new, clean state with the given value
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get a clone of the current value
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.read(T::clone)
    }

    /// Runs `f` with shared access to the value.
    pub fn read<U>(&self, f: impl FnOnce(&T) -> U) -> U {
        match self.inner.read() {
            Ok(guard) => f(&guard),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }

    /// Set a new value
    pub fn set(&self, value: T) {
        self.update(|current| *current = value);
    }

    /// Runs `f` with exclusive access and marks the state dirty. Returns
    /// `None` if the lock is poisoned.
    pub fn update<U>(&self, f: impl FnOnce(&mut T) -> U) -> Option<U> {
        let mut guard = self.inner.write().ok()?;
        let result = f(&mut guard);
        self.dirty.store(true, Ordering::SeqCst);
        Some(result)
    }

    /// Check if the state has been modified since the last clear
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clears the dirty flag, returning whether it was set.
    pub fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::SeqCst)
    }

    /// Clear the dirty flag
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl<T: Default> Default for State<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_value_and_flag() {
        let a = State::new(String::from("x"));
        let b = a.clone();
        assert!(!a.is_dirty());

        b.set("y".to_string());
        assert_eq!(a.get(), "y");
        assert!(a.is_dirty());

        a.clear_dirty();
        assert!(!b.is_dirty());
    }

    #[test]
    fn test_update_returns_result() {
        let state = State::new(vec![1, 2]);
        let len = state.update(|v| {
            v.push(3);
            v.len()
        });
        assert_eq!(len, Some(3));
        assert_eq!(state.read(|v| v.iter().sum::<i32>()), 6);
    }
}
