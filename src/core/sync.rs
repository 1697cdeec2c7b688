//! Interrupt-safe shared state.
//!
//! State written from interrupt context (the sampler buffers, the
//! millisecond counter) and read from the main loop is a multi-byte shared
//! resource; reads must happen with the producer suspended. This module
//! wraps that discipline in a closure-based accessor so no caller can
//! forget the critical section.

use core::cell::RefCell;
use critical_section::Mutex;

/// State shared between interrupt and main-loop context.
///
/// Every access runs inside a critical section, so the interrupt source is
/// suspended for the (bounded, short) duration of the closure. `new` is
/// const, allowing static instances for interrupt handlers to reach.
///
/// # Example
///
/// ```
/// use serial_accel::core::sync::CriticalSectionState;
///
/// static COUNTER: CriticalSectionState<u32> = CriticalSectionState::new(0);
///
/// COUNTER.with_mut(|c| *c += 1);
/// assert_eq!(COUNTER.with(|c| *c), 1);
/// ```
pub struct CriticalSectionState<T> {
    inner: Mutex<RefCell<T>>,
}

impl<T> CriticalSectionState<T> {
    /// Creates a new `CriticalSectionState` wrapping the given value.
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(value)),
        }
    }

    /// Access state immutably.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        critical_section::with(|cs| f(&self.inner.borrow_ref(cs)))
    }

    /// Access state mutably.
    pub fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        critical_section::with(|cs| f(&mut self.inner.borrow_ref_mut(cs)))
    }
}
