// File: crates/chartboard-core/src/event.rs
// Summary: Single-threaded change notification with explicit subscribe/unsubscribe.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler<A> = Rc<dyn Fn(&A)>;

/// Handlers are closures, so whatever context they need is captured when
/// they are created; nothing is looked up through the emitter.
pub struct Event<A> {
    handlers: RefCell<Vec<(SubscriptionId, Handler<A>)>>,
    next_id: Cell<u64>,
}

impl<A> Default for Event<A> {
    fn default() -> Self {
        Self { handlers: RefCell::new(Vec::new()), next_id: Cell::new(0) }
    }
}

impl<A> Event<A> {
    pub fn new() -> Self { Self::default() }

    pub fn subscribe(&self, handler: impl Fn(&A) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.handlers.borrow_mut().push((id, Rc::new(handler)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(h, _)| *h != id);
        handlers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Handlers may (un)subscribe while being notified; they see the list as
    /// it was when `emit` started.
    pub fn emit(&self, args: &A) {
        let snapshot: Vec<Handler<A>> = self.handlers.borrow().iter().map(|(_, h)| h.clone()).collect();
        for handler in snapshot {
            handler(args);
        }
    }
}
