//! Mutex helpers.
//!
//! The crate's only shared mutable state is the style parse cache and the
//! logger's output sink. Both stay usable after a panicking thread poisoned
//! their mutex: a stale cache entry or an interleaved log line is preferable
//! to a second panic.

use std::sync::{Mutex, MutexGuard};

/// Lock a mutex, recovering from poison if necessary.
///
/// ```rust
/// use std::sync::Mutex;
/// use tablecloth::sync::lock_recover;
///
/// let mutex = Mutex::new(42);
/// let guard = lock_recover(&mutex);
/// assert_eq!(*guard, 42);
/// ```
#[inline]
pub fn lock_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
