//! Observer registration with explicit cancellation handles.
//!
//! Signals are single-threaded: subscribers run synchronously, in the order
//! they subscribed, on the thread that emits. Dropping a [`Subscription`]
//! does not cancel it; call [`Subscription::unsubscribe`].

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = Box<dyn FnMut(&T)>;

struct Slot<T> {
    alive: Rc<Cell<bool>>,
    once: bool,
    callback: Callback<T>,
}

struct Slots<T> {
    slots: Vec<Slot<T>>,
}

/// A multicast event source.
pub struct Signal<T> {
    inner: Rc<RefCell<Slots<T>>>,
}

impl<T: 'static> Signal<T> {
    /// Create a signal with no subscribers.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Slots { slots: Vec::new() })),
        }
    }

    /// Register a callback that runs on every emission until unsubscribed.
    pub fn subscribe(&self, callback: impl FnMut(&T) + 'static) -> Subscription<T> {
        self.attach(Box::new(callback), false)
    }

    /// Register a callback that runs on the next emission only.
    pub fn subscribe_once(&self, callback: impl FnMut(&T) + 'static) -> Subscription<T> {
        self.attach(Box::new(callback), true)
    }

    fn attach(&self, callback: Callback<T>, once: bool) -> Subscription<T> {
        let alive = Rc::new(Cell::new(true));
        self.inner.borrow_mut().slots.push(Slot {
            alive: alive.clone(),
            once,
            callback,
        });
        Subscription {
            alive,
            slots: Rc::downgrade(&self.inner),
        }
    }

    /// Deliver `payload` to every live subscriber. Returns how many ran.
    pub fn emit(&self, payload: &T) -> usize {
        // Check the slots out so callbacks may subscribe or cancel freely.
        let mut slots = std::mem::take(&mut self.inner.borrow_mut().slots);

        let mut delivered = 0;
        for slot in slots.iter_mut() {
            if !slot.alive.get() {
                continue;
            }
            if slot.once {
                slot.alive.set(false);
            }
            (slot.callback)(payload);
            delivered += 1;
        }

        let mut inner = self.inner.borrow_mut();
        slots.append(&mut inner.slots);
        slots.retain(|slot| slot.alive.get());
        inner.slots = slots;
        delivered
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .borrow()
            .slots
            .iter()
            .filter(|slot| slot.alive.get())
            .count()
    }
}

impl<T: 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.inner.try_borrow().map(|s| s.slots.len()).ok();
        f.debug_struct("Signal").field("subscribers", &count).finish()
    }
}

/// Cancellation handle returned by [`Signal::subscribe`].
pub struct Subscription<T> {
    alive: Rc<Cell<bool>>,
    slots: Weak<RefCell<Slots<T>>>,
}

impl<T> Subscription<T> {
    /// Whether the callback is still registered.
    ///
    /// A one-shot subscription becomes inactive once it has fired.
    pub fn is_active(&self) -> bool {
        self.alive.get() && self.slots.strong_count() > 0
    }

    /// Remove the callback from its signal.
    pub fn unsubscribe(self) {
        self.alive.set(false);
        if let Some(inner) = self.slots.upgrade() {
            // Busy means an emission is in flight; it prunes dead slots itself.
            if let Ok(mut inner) = inner.try_borrow_mut() {
                inner.slots.retain(|slot| slot.alive.get());
            }
        }
    }
}

impl<T> fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.alive.get())
            .finish()
    }
}
