//! Multi-subscriber event channels.
//!
//! Each [`DualShockPad`](crate::pad::DualShockPad) owns one [`EventChannel`] per
//! [`EventCategory`](crate::event::EventCategory). Subscribers are called in subscription order.
//! A subscriber that panics is logged and skipped; the remaining subscribers still receive the
//! event.

use std::any::Any;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};

use tracing::error;

/// Receives events published on an [`EventChannel`].
///
/// Any `FnMut(&T)` closure is a listener.
pub trait Listener<T> {
    fn on_event(&mut self, event: &T);
}

impl<T, F: FnMut(&T)> Listener<T> for F {
    fn on_event(&mut self, event: &T) {
        self(event)
    }
}

/// Wraps a listener and forwards only events accepted by a predicate.
pub struct FilteredListener<T> {
    predicate: Box<dyn Fn(&T) -> bool>,
    inner: Box<dyn Listener<T>>,
}

impl<T> FilteredListener<T> {
    pub fn new(
        predicate: impl Fn(&T) -> bool + 'static,
        inner: impl Listener<T> + 'static,
    ) -> Self {
        Self {
            predicate: Box::new(predicate),
            inner: Box::new(inner),
        }
    }
}

impl<T> Listener<T> for FilteredListener<T> {
    fn on_event(&mut self, event: &T) {
        if (self.predicate)(event) {
            self.inner.on_event(event);
        }
    }
}

/// Handle returned by [`EventChannel::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

struct ListenerEntry<T> {
    listener: Box<dyn Listener<T>>,
    enabled: bool,
}

pub struct EventChannel<T> {
    next_id: u64,
    listeners: BTreeMap<SubscriptionId, ListenerEntry<T>>,
}

impl<T> Default for EventChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EventChannel<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            listeners: BTreeMap::new(),
        }
    }

    /// Registers a listener; it receives every event published from now on.
    pub fn subscribe(&mut self, listener: impl Listener<T> + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.insert(
            id,
            ListenerEntry {
                listener: Box::new(listener),
                enabled: true,
            },
        );
        id
    }

    /// Enables a previously muted listener.
    pub fn enable(&mut self, id: SubscriptionId) {
        if let Some(entry) = self.listeners.get_mut(&id) {
            entry.enabled = true;
        }
    }

    /// Mutes a listener without removing it.
    pub fn disable(&mut self, id: SubscriptionId) {
        if let Some(entry) = self.listeners.get_mut(&id) {
            entry.enabled = false;
        }
    }

    /// Unregisters a listener. Returns `false` if the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    /// Drops every listener.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Delivers one event to all enabled listeners.
    pub fn publish(&mut self, event: &T) {
        for (id, entry) in self.listeners.iter_mut() {
            if !entry.enabled {
                continue;
            }
            let listener = &mut entry.listener;
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| listener.on_event(event))) {
                error!(subscription = id.0, "subscriber panicked: {}", panic_message(&*payload));
            }
        }
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        *msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder(log: &Rc<RefCell<Vec<(u8, i32)>>>, tag: u8) -> impl FnMut(&i32) + 'static {
        let log = Rc::clone(log);
        move |v: &i32| log.borrow_mut().push((tag, *v))
    }

    #[test]
    fn publishes_in_subscription_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut channel = EventChannel::<i32>::new();
        channel.subscribe(recorder(&log, 1));
        channel.subscribe(recorder(&log, 2));

        channel.publish(&7);
        assert_eq!(*log.borrow(), vec![(1, 7), (2, 7)]);
    }

    #[test]
    fn disable_enable_and_unsubscribe() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut channel = EventChannel::<i32>::new();
        let a = channel.subscribe(recorder(&log, 1));
        let b = channel.subscribe(recorder(&log, 2));

        channel.disable(a);
        channel.publish(&1);
        channel.enable(a);
        assert!(channel.unsubscribe(b));
        assert!(!channel.unsubscribe(b));
        channel.publish(&2);

        assert_eq!(*log.borrow(), vec![(2, 1), (1, 2)]);
        assert_eq!(channel.len(), 1);
    }

    #[test]
    fn clear_detaches_everyone() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut channel = EventChannel::<i32>::new();
        channel.subscribe(recorder(&log, 1));
        channel.clear();
        channel.publish(&3);

        assert!(channel.is_empty());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn panicking_subscriber_does_not_starve_the_rest() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut channel = EventChannel::<i32>::new();
        channel.subscribe(|v: &i32| {
            if *v > 0 {
                panic!("subscriber failed on {v}");
            }
        });
        channel.subscribe(recorder(&log, 2));

        channel.publish(&1);
        channel.publish(&2);
        assert_eq!(*log.borrow(), vec![(2, 1), (2, 2)]);
        assert_eq!(channel.len(), 2);
    }

    #[test]
    fn panic_messages_are_extracted() {
        let payload = panic::catch_unwind(|| panic!("static")).unwrap_err();
        assert_eq!(panic_message(&*payload), "static");
        let payload = panic::catch_unwind(|| panic!("formatted {}", 1)).unwrap_err();
        assert_eq!(panic_message(&*payload), "formatted 1");
    }

    #[test]
    fn filtered_listener_drops_rejected_events() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut channel = EventChannel::<i32>::new();
        channel.subscribe(FilteredListener::new(|v: &i32| *v > 0, recorder(&log, 9)));

        channel.publish(&-1);
        channel.publish(&4);
        assert_eq!(*log.borrow(), vec![(9, 4)]);
    }
}
