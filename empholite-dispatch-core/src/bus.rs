//! Action bus: typed publish/subscribe channel for actions
//!
//! The bus is the dispatcher half of the architecture. Anything may publish
//! an action (components via the runtime, async tasks, tests); every live
//! subscriber receives its own clone, in subscription order.
//!
//! Subscriptions are RAII handles: dropping a [`Subscription`] removes it
//! from the bus, so a listener can never leak past its owner.
//!
//! # Example
//!
//! ```ignore
//! use empholite_dispatch::ActionBus;
//!
//! let bus = ActionBus::<Action>::new();
//! let mut store_listener = bus.subscribe();
//!
//! bus.publish(Action::ResponsesFetch);
//! assert!(matches!(store_listener.try_recv(), Some(Action::ResponsesFetch)));
//!
//! drop(store_listener);
//! assert_eq!(bus.subscriber_count(), 0);
//! ```

use std::collections::BTreeMap;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::trace;

use crate::Action;

/// Identifies a subscriber on a bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriberId(u64);

impl SubscriberId {
    /// Raw numeric id
    pub fn get(self) -> u64 {
        self.0
    }
}

struct Registry<A> {
    next_id: u64,
    // BTreeMap keeps delivery in subscription order
    subscribers: BTreeMap<SubscriberId, mpsc::UnboundedSender<A>>,
}

impl<A> Registry<A> {
    fn remove(&mut self, id: SubscriberId) -> bool {
        self.subscribers.remove(&id).is_some()
    }
}

/// Cloneable handle to a shared action bus
pub struct ActionBus<A: Action> {
    registry: Arc<Mutex<Registry<A>>>,
}

impl<A: Action> Clone for ActionBus<A> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<A: Action> Default for ActionBus<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Action> std::fmt::Debug for ActionBus<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl<A: Action> ActionBus<A> {
    /// Create a bus with no subscribers
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                next_id: 0,
                subscribers: BTreeMap::new(),
            })),
        }
    }

    /// Register a new listener
    pub fn subscribe(&self) -> Subscription<A> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut registry = self.registry.lock();
        let id = SubscriberId(registry.next_id);
        registry.next_id += 1;
        registry.subscribers.insert(id, tx);
        trace!(subscriber = id.0, "Subscribed to action bus");

        Subscription {
            id,
            rx,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Publish an action to every live subscriber
    ///
    /// Returns the number of subscribers the action was delivered to.
    /// Subscribers whose receiving half is gone are pruned.
    pub fn publish(&self, action: A) -> usize {
        let mut registry = self.registry.lock();
        let mut delivered = 0;
        let mut closed = Vec::new();

        for (&id, tx) in &registry.subscribers {
            if tx.send(action.clone()).is_ok() {
                delivered += 1;
            } else {
                closed.push(id);
            }
        }
        for id in closed {
            registry.remove(id);
        }

        trace!(action = %action.name(), delivered, "Published action");
        delivered
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.registry.lock().subscribers.len()
    }
}

/// A registered listener on an [`ActionBus`]
///
/// Unsubscribes on drop.
pub struct Subscription<A> {
    id: SubscriberId,
    rx: mpsc::UnboundedReceiver<A>,
    registry: Weak<Mutex<Registry<A>>>,
}

impl<A> std::fmt::Debug for Subscription<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl<A> Subscription<A> {
    /// This subscription's id
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Wait for the next action
    ///
    /// Returns `None` once the bus has been dropped and the queue is drained.
    pub async fn recv(&mut self) -> Option<A> {
        self.rx.recv().await
    }

    /// Take the next queued action without waiting
    pub fn try_recv(&mut self) -> Option<A> {
        self.rx.try_recv().ok()
    }

    /// Drain every queued action
    pub fn drain(&mut self) -> Vec<A> {
        let mut actions = Vec::new();
        while let Ok(action) = self.rx.try_recv() {
            actions.push(action);
        }
        actions
    }

    /// Remove this subscription from the bus
    pub fn unsubscribe(self) {
        // Drop does the work
    }
}

impl<A> Drop for Subscription<A> {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if registry.lock().remove(self.id) {
                trace!(subscriber = self.id.0, "Unsubscribed from action bus");
            }
        }
    }
}
