//! Synchronous observable value cells.
//!
//! Every state holder in this crate owns one [`Signal`] per value other
//! components observe. Subscribers are plain closures invoked on the
//! mutator's stack: a mutation stores the new value, every subscriber sees
//! it, and only then does the mutating call return. There is no task queue
//! and no unsubscribe -- subscriptions live as long as the owning store.
//!
//! Subscribers must not call back into the store that is publishing; the
//! whole crate runs on one logical thread and re-entrant borrows would
//! panic.

use std::fmt;
use std::rc::Rc;

/// An observable value with a synchronous listener list.
///
/// Equal values are conflated: `set` stores and notifies only when the new
/// value differs from the current one. Subscribing delivers the current
/// value immediately, so a late subscriber never observes stale state.
pub struct Signal<T> {
    value: T,
    subscribers: Vec<Rc<dyn Fn(&T)>>,
}

impl<T: Clone + PartialEq> Signal<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            subscribers: Vec::new(),
        }
    }

    /// Current value.
    pub fn get(&self) -> T {
        self.value.clone()
    }

    /// Register a subscriber and immediately deliver the current value.
    pub fn subscribe(&mut self, f: impl Fn(&T) + 'static) {
        let f: Rc<dyn Fn(&T)> = Rc::new(f);
        f(&self.value);
        self.subscribers.push(f);
    }

    /// Store a new value and notify every subscriber. No-op when the value
    /// is unchanged.
    pub fn set(&mut self, value: T) {
        if self.value == value {
            return;
        }
        self.value = value;
        for subscriber in &self.subscribers {
            subscriber(&self.value);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("value", &self.value)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
