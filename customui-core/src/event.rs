// customui-core/src/event.rs
use crossbeam::channel::{Receiver, Sender, unbounded};
use std::any::Any;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

pub const WIDGET_REGISTERED: &str = "customize.widget.registered";
pub const WIDGET_DESTROYED: &str = "customize.widget.destroyed";
pub const PLACEMENT_INSERTED: &str = "customize.placement.inserted";
pub const PLACEMENT_REMOVED: &str = "customize.placement.removed";
pub const PLACEMENT_MOVED: &str = "customize.placement.moved";
pub const STATE_SAVED: &str = "customize.state.saved";
pub const STATE_RESET: &str = "customize.state.reset";

/// Event payload - can be any type
#[derive(Clone)]
pub struct EventPayload(Arc<dyn Any + Send + Sync>);

impl EventPayload {
    pub fn new<T: Any + Send + Sync>(data: T) -> Self {
        Self(Arc::new(data))
    }

    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::downcast(self.0.clone()).ok()
    }
}

/// Event with topic and payload
#[derive(Clone)]
pub struct Event {
    pub topic: String,
    pub payload: EventPayload,
}

impl Event {
    pub fn new<T: Any + Send + Sync>(topic: impl Into<String>, data: T) -> Self {
        Self {
            topic: topic.into(),
            payload: EventPayload::new(data),
        }
    }
}

/// Subscription handle - dropping this unsubscribes
pub struct Subscription {
    id: usize,
    bus: Arc<EventBusInner>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.bus
            .subscriptions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.id);
    }
}

struct EventBusInner {
    subscriptions: RwLock<HashMap<usize, (String, Sender<Event>)>>,
    next_id: AtomicUsize,
}

/// Topic-based pub/sub for customization changes
#[derive(Clone)]
pub struct EventBus {
    inner: Arc<EventBusInner>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(EventBusInner {
                subscriptions: RwLock::new(HashMap::new()),
                next_id: AtomicUsize::new(0),
            }),
        }
    }

    /// Publish an event to all matching subscribers
    pub fn publish(&self, event: Event) {
        let subs = self
            .inner
            .subscriptions
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        for (pattern, tx) in subs.values() {
            if Self::topic_matches(&event.topic, pattern) {
                // Ignore send errors (subscriber dropped)
                let _ = tx.send(event.clone());
            }
        }
    }

    /// Subscribe to topics with wildcard support
    /// Returns (Subscription, Receiver) - drop Subscription to unsubscribe
    pub fn subscribe(&self, pattern: impl Into<String>) -> (Subscription, Receiver<Event>) {
        let (tx, rx) = unbounded();
        let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst);

        self.inner
            .subscriptions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, (pattern.into(), tx));

        let sub = Subscription {
            id,
            bus: self.inner.clone(),
        };

        (sub, rx)
    }

    /// Check if topic matches pattern (supports * wildcard)
    fn topic_matches(topic: &str, pattern: &str) -> bool {
        if topic == pattern {
            return true;
        }

        let topic_parts: Vec<&str> = topic.split('.').collect();
        let pattern_parts: Vec<&str> = pattern.split('.').collect();

        if pattern_parts.len() > topic_parts.len() {
            return false;
        }

        for (i, pattern_part) in pattern_parts.iter().enumerate() {
            if *pattern_part == "*" {
                // Wildcard at end matches everything remaining
                if i == pattern_parts.len() - 1 {
                    return true;
                }
                continue;
            }

            if topic_parts[i] != *pattern_part {
                return false;
            }
        }

        pattern_parts.len() == topic_parts.len()
    }
}

/// Payload of `customize.widget.*` events
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetChange {
    pub widget_id: String,
}

/// Payload of `customize.placement.inserted` and `customize.placement.removed`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementChange {
    pub widget_id: String,
    pub area_id: String,
    pub index: usize,
}

/// Payload of `customize.placement.moved`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementMove {
    pub widget_id: String,
    /// Previous area and index, `None` if the widget was not placed
    pub from: Option<(String, usize)>,
    pub to: (String, usize),
}

/// Payload of `customize.state.*` events
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateChange {
    pub version: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_matching() {
        assert!(EventBus::topic_matches(PLACEMENT_MOVED, PLACEMENT_MOVED));
        assert!(EventBus::topic_matches(PLACEMENT_MOVED, "customize.placement.*"));
        assert!(EventBus::topic_matches(WIDGET_DESTROYED, "customize.*"));
        assert!(!EventBus::topic_matches(STATE_SAVED, "customize.placement.*"));
        assert!(!EventBus::topic_matches("customize", "customize.placement"));
        assert!(EventBus::topic_matches("any.thing.here", "*"));
    }

    #[test]
    fn test_pubsub() {
        let bus = EventBus::new();
        let (_sub, rx) = bus.subscribe("customize.placement.*");

        bus.publish(Event::new(
            PLACEMENT_INSERTED,
            PlacementChange {
                widget_id: "back-button".to_string(),
                area_id: "nav-bar".to_string(),
                index: 0,
            },
        ));
        bus.publish(Event::new(STATE_SAVED, StateChange { version: 1 }));

        let event = rx.recv().unwrap();
        assert_eq!(event.topic, PLACEMENT_INSERTED);

        let received: Arc<PlacementChange> = event.payload.downcast().unwrap();
        assert_eq!(received.area_id, "nav-bar");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_unsubscribe() {
        let bus = EventBus::new();
        let (sub, rx) = bus.subscribe(STATE_SAVED);

        bus.publish(Event::new(STATE_SAVED, StateChange { version: 1 }));
        assert!(rx.recv().is_ok());

        drop(sub);

        bus.publish(Event::new(STATE_SAVED, StateChange { version: 2 }));
        assert!(rx.recv().is_err()); // Channel closed
    }
}
