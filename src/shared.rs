//! State shared between interrupt handlers and the foreground loop.
//!
//! On an 8-bit target none of the cross-context values (a `u16` frame, two
//! flags) can be read-modify-written atomically, so every access runs inside
//! a `critical_section`. The cells are `const`-constructible and meant to
//! live in `static`s owned by the board crate.

use core::cell::Cell;
use critical_section::Mutex;

/// A single-slot mailbox guarded by a critical section.
///
/// The producer overwrites, the consumer takes. A value published twice
/// before being taken is coalesced into the latest one.
pub struct SharedCell<T: Copy> {
    inner: Mutex<Cell<T>>,
    empty: T,
}

impl<T: Copy> SharedCell<T> {
    /// Creates a cell holding `empty`, the value `take` leaves behind.
    pub const fn new(empty: T) -> Self {
        Self {
            inner: Mutex::new(Cell::new(empty)),
            empty,
        }
    }

    /// Stores `value`, replacing any unconsumed one.
    pub fn publish(&self, value: T) {
        critical_section::with(|cs| self.inner.borrow(cs).set(value));
    }

    /// Reads the current value and resets the cell to empty in one step.
    pub fn take(&self) -> T {
        critical_section::with(|cs| self.inner.borrow(cs).replace(self.empty))
    }

    /// Reads the current value without consuming it.
    pub fn peek(&self) -> T {
        critical_section::with(|cs| self.inner.borrow(cs).get())
    }
}

/// A set-by-interrupt, cleared-by-reader flag.
pub type Flag = SharedCell<bool>;

impl Flag {
    /// A cleared flag.
    pub const fn cleared() -> Self {
        SharedCell::new(false)
    }

    /// Sets the flag.
    pub fn raise(&self) {
        self.publish(true);
    }

    /// Clears the flag, returning whether it was set.
    pub fn take_raised(&self) -> bool {
        self.take()
    }
}

/// Completed RC5 frames handed from the sampling interrupt to the arbiter.
pub type Rc5Mailbox = SharedCell<Option<u16>>;

impl Rc5Mailbox {
    /// An empty mailbox.
    pub const fn empty() -> Self {
        SharedCell::new(None)
    }
}
