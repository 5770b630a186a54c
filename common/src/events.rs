//! Typed publish/subscribe channel shared by the components of the application.
//!
//! Components publish `AppEvent`s without knowing who listens: the toast host
//! renders `UserMessage`s, views showing collection lists refresh on
//! `CollectionAddedOrArchived`, and so on. Publishing is fire-and-forget.
//!
//! The bus is single-threaded (`Rc`/`RefCell`) because it lives on the browser
//! event loop. Handlers are snapshotted before dispatch, so a handler may
//! publish or (un)subscribe re-entrantly.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::model::collection::Collection;

/// Messages carried by the bus.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Human-readable text to show to the user.
    UserMessage(String),
    /// A collection was created or archived; lists of collections are stale.
    CollectionAddedOrArchived(Collection),
    /// A batch of images finished uploading into a collection.
    CollectionImagesUploaded { collection_id: String, count: usize },
}

/// Anything events can be published to.
pub trait NotificationChannel {
    fn publish(&self, event: AppEvent);
}

impl<T: NotificationChannel + ?Sized> NotificationChannel for Rc<T> {
    fn publish(&self, event: AppEvent) {
        (**self).publish(event)
    }
}

impl<T: NotificationChannel + ?Sized> NotificationChannel for &T {
    fn publish(&self, event: AppEvent) {
        (**self).publish(event)
    }
}

type Handler = Rc<dyn Fn(&AppEvent)>;

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    handlers: Vec<(u64, Handler)>,
}

/// In-process event bus. Cloning yields another handle to the same bus.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Rc<RefCell<Subscribers>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for every future event.
    ///
    /// The handler stays registered as long as the returned `Subscription` is alive.
    #[must_use = "dropping the subscription unsubscribes the handler"]
    pub fn subscribe(&self, handler: impl Fn(&AppEvent) + 'static) -> Subscription {
        let mut subscribers = self.inner.borrow_mut();
        let id = subscribers.next_id;
        subscribers.next_id += 1;
        subscribers.handlers.push((id, Rc::new(handler)));
        Subscription {
            id,
            bus: Rc::downgrade(&self.inner),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().handlers.len()
    }
}

impl NotificationChannel for EventBus {
    fn publish(&self, event: AppEvent) {
        let handlers: Vec<Handler> = self
            .inner
            .borrow()
            .handlers
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        log::debug!("publishing {:?} to {} subscriber(s)", event, handlers.len());
        for handler in handlers {
            handler(&event);
        }
    }
}

impl PartialEq for EventBus {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Keeps a handler registered on its `EventBus`; unsubscribes on drop.
pub struct Subscription {
    id: u64,
    bus: Weak<RefCell<Subscribers>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.borrow_mut().handlers.retain(|(id, _)| *id != self.id);
        }
    }
}
