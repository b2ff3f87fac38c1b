//! Synchronous structural-change notifications.
//!
//! A plain in-process observer list, replacing what a DOM embedding would do
//! with CustomEvents. Listeners run in registration order before the command
//! call returns; a panicking listener is isolated and never blocks later
//! listeners or rolls back the already-applied mutation.

use std::panic::{AssertUnwindSafe, catch_unwind};

/// A structural change in the outline document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlineEvent {
    /// A new node was inserted by a split.
    Created { position: usize },
    /// A node moved one level deeper.
    Indented { position: usize, level: usize },
    /// A node moved one level shallower.
    Unindented { position: usize, level: usize },
    /// The host reported an inline content edit inside a node.
    ContentChanged { position: usize },
}

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&OutlineEvent)>;

/// Registration-order, synchronous fan-out of [`OutlineEvent`]s.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u64,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. It will receive every subsequent event until
    /// unsubscribed.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&OutlineEvent) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false for an unknown id.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Deliver an event to all listeners in registration order. A panic in
    /// one listener is caught and logged; delivery continues.
    pub fn emit(&mut self, event: &OutlineEvent) {
        for (id, listener) in &mut self.listeners {
            if catch_unwind(AssertUnwindSafe(|| listener(event))).is_err() {
                tracing::warn!(
                    listener = id.0,
                    ?event,
                    "outline event listener panicked, continuing dispatch"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_delivery_in_registration_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();

        let s = seen.clone();
        bus.subscribe(move |_| s.borrow_mut().push("first"));
        let s = seen.clone();
        bus.subscribe(move |_| s.borrow_mut().push("second"));

        bus.emit(&OutlineEvent::Created { position: 1 });
        assert_eq!(*seen.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_unsubscribe() {
        let seen = Rc::new(RefCell::new(0usize));
        let mut bus = EventBus::new();

        let s = seen.clone();
        let id = bus.subscribe(move |_| *s.borrow_mut() += 1);
        bus.emit(&OutlineEvent::ContentChanged { position: 0 });

        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.emit(&OutlineEvent::ContentChanged { position: 0 });

        assert_eq!(*seen.borrow(), 1);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn test_panicking_listener_is_isolated() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();

        let s = seen.clone();
        bus.subscribe(move |_| s.borrow_mut().push("before"));
        bus.subscribe(|_| panic!("listener bug"));
        let s = seen.clone();
        bus.subscribe(move |_| s.borrow_mut().push("after"));

        bus.emit(&OutlineEvent::Indented {
            position: 0,
            level: 1,
        });
        assert_eq!(*seen.borrow(), vec!["before", "after"]);

        // The bus stays usable for the next emit.
        bus.emit(&OutlineEvent::Unindented {
            position: 0,
            level: 0,
        });
        assert_eq!(*seen.borrow(), vec!["before", "after", "before", "after"]);
    }
}
