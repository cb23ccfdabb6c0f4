//! # Singleton Cell
//!
//! Process-wide lazy single-instance holder.
//!
//! A `SingletonCell` holds either "uninitialized" or "initialized(instance)".
//! The transition is one-directional for the life of the process: once a
//! value is stored, every access returns the identical `Arc`. First-access
//! construction is synchronized so concurrent callers racing on an
//! uninitialized cell construct exactly once and never observe a
//! half-built instance.
//!
//! Cells are `const`-constructible so they can back `static` accessors:
//!
//! ```
//! use fabrica_core::SingletonCell;
//!
//! static COUNTER_SEED: SingletonCell<u64> = SingletonCell::new();
//!
//! let seed = COUNTER_SEED.get_or_init(|| 42);
//! assert_eq!(*seed, 42);
//! ```

use crate::FabricaError;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

// =============================================================================
// SINGLETON CELL
// =============================================================================

/// Lazy-initialized single-instance holder with thread-safe first access.
///
/// Not `std::sync::OnceLock`: initialization here may fail, and a failed
/// attempt must leave the cell uninitialized so a later call can retry
/// instead of observing a poisoned instance.
#[derive(Debug)]
pub struct SingletonCell<T> {
    slot: RwLock<Option<Arc<T>>>,
}

impl<T> SingletonCell<T> {
    /// Create an uninitialized cell.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    /// The stored instance, if the cell has been initialized.
    #[must_use]
    pub fn get(&self) -> Option<Arc<T>> {
        self.read_slot().clone()
    }

    /// Whether first-access construction has happened.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.read_slot().is_some()
    }

    /// Return the stored instance, constructing it on first access.
    ///
    /// Under concurrent first access, `init` runs exactly once; all callers
    /// receive the identical `Arc`. After initialization this is a
    /// read-lock-only operation.
    pub fn get_or_init<F>(&self, init: F) -> Arc<T>
    where
        F: FnOnce() -> T,
    {
        if let Some(existing) = self.get() {
            return existing;
        }

        let mut slot = self.write_slot();

        // Re-check under the write lock: another caller may have won the race.
        if let Some(existing) = slot.as_ref() {
            return Arc::clone(existing);
        }

        let instance = Arc::new(init());
        *slot = Some(Arc::clone(&instance));
        instance
    }

    /// Fallible variant of [`get_or_init`](Self::get_or_init).
    ///
    /// If `init` fails, the error propagates to this caller and the cell
    /// stays uninitialized — the next call retries construction rather
    /// than returning a poisoned instance.
    pub fn get_or_try_init<F>(&self, init: F) -> Result<Arc<T>, FabricaError>
    where
        F: FnOnce() -> Result<T, FabricaError>,
    {
        if let Some(existing) = self.get() {
            return Ok(existing);
        }

        let mut slot = self.write_slot();

        if let Some(existing) = slot.as_ref() {
            return Ok(Arc::clone(existing));
        }

        let instance = Arc::new(init()?);
        *slot = Some(Arc::clone(&instance));
        Ok(instance)
    }

    /// Return the cell to its uninitialized state.
    ///
    /// Available only with the `test-reset` feature, for test isolation.
    /// Production builds keep the cell transition one-directional.
    #[cfg(feature = "test-reset")]
    pub fn reset(&self) {
        *self.write_slot() = None;
    }

    // A panicking initializer poisons the lock but cannot leave the slot
    // logically torn: the Arc is stored only after construction completes.
    // Recovering the inner value is therefore always sound.
    fn read_slot(&self) -> RwLockReadGuard<'_, Option<Arc<T>>> {
        self.slot.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_slot(&self) -> RwLockWriteGuard<'_, Option<Arc<T>>> {
        self.slot.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Default for SingletonCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================
