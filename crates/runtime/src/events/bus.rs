//! Topic-based event bus implementation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use sparkle_core::GameEvent;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Dice changes within a turn (toggle, roll, bank, extra die, discard)
    Dice,
    /// Turn boundaries and resets
    Turn,
    /// Upgrade offers and picks
    Upgrade,
    /// Rejected commands
    Error,
    /// Follow-up commands the host should submit later
    Scheduling,
}

impl Topic {
    pub const ALL: [Topic; 5] = [
        Topic::Dice,
        Topic::Turn,
        Topic::Upgrade,
        Topic::Error,
        Topic::Scheduling,
    ];

    pub fn of(event: &GameEvent) -> Topic {
        match event {
            GameEvent::DieToggled { .. }
            | GameEvent::DiceRolled { .. }
            | GameEvent::DiceBanked { .. }
            | GameEvent::ExtraDieAdded { .. }
            | GameEvent::UnscoredDiscarded { .. } => Topic::Dice,
            GameEvent::TurnEnded { .. } | GameEvent::GameReset => Topic::Turn,
            GameEvent::UpgradeOffered { .. } | GameEvent::UpgradeSelected { .. } => Topic::Upgrade,
            GameEvent::Error { .. } => Topic::Error,
            GameEvent::DelayedAction { .. } => Topic::Scheduling,
        }
    }
}

type Callback = Arc<dyn Fn(&GameEvent) + Send + Sync>;

struct Listener {
    id: u64,
    topic: Option<Topic>,
    callback: Callback,
}

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<Listener>,
}

struct Inner {
    listeners: Mutex<Listeners>,
    all: broadcast::Sender<GameEvent>,
    topics: HashMap<Topic, broadcast::Sender<GameEvent>>,
}

impl Inner {
    fn listeners(&self) -> MutexGuard<'_, Listeners> {
        // A panicking callback runs outside the lock, so poisoning leaves the list intact.
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// In-process publish/subscribe for [`GameEvent`]s.
///
/// Two kinds of consumers are supported:
/// - synchronous listeners ([`EventBus::subscribe`], [`EventBus::subscribe_topic`])
///   called on the publishing thread, in emission order, before `publish` returns;
/// - async receivers ([`EventBus::stream`], [`EventBus::stream_topic`]) backed by
///   bounded broadcast channels.
///
/// Cloning the bus yields another handle to the same subscriber lists.
#[derive(Clone)]
pub struct EventBus {
    inner: Arc<Inner>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each channel
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with the given broadcast capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero, as [`broadcast::channel`] does.
    pub fn with_capacity(capacity: usize) -> Self {
        let topics = Topic::ALL
            .into_iter()
            .map(|topic| (topic, broadcast::channel(capacity).0))
            .collect();

        Self {
            inner: Arc::new(Inner {
                listeners: Mutex::new(Listeners::default()),
                all: broadcast::channel(capacity).0,
                topics,
            }),
        }
    }

    /// Publishes one event to every listener and channel that wants it.
    pub fn publish(&self, event: &GameEvent) {
        let topic = Topic::of(event);

        // Snapshot so listeners may (un)subscribe while being called.
        let callbacks: Vec<Callback> = self
            .inner
            .listeners()
            .entries
            .iter()
            .filter(|listener| listener.topic.is_none_or(|wanted| wanted == topic))
            .map(|listener| Arc::clone(&listener.callback))
            .collect();

        for callback in &callbacks {
            callback(event);
        }

        let mut delivered = callbacks.len();
        if self.inner.all.send(event.clone()).is_ok() {
            delivered += 1;
        }
        if let Some(tx) = self.inner.topics.get(&topic)
            && tx.send(event.clone()).is_ok()
        {
            delivered += 1;
        }

        if delivered == 0 {
            tracing::trace!(event = event.name(), ?topic, "no subscribers for event");
        }
    }

    /// Publishes events in order.
    pub fn publish_all(&self, events: &[GameEvent]) {
        for event in events {
            self.publish(event);
        }
    }

    /// Registers a listener for every event.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&GameEvent) + Send + Sync + 'static,
    {
        self.register(None, Arc::new(callback))
    }

    /// Registers a listener for events on one topic.
    pub fn subscribe_topic<F>(&self, topic: Topic, callback: F) -> Subscription
    where
        F: Fn(&GameEvent) + Send + Sync + 'static,
    {
        self.register(Some(topic), Arc::new(callback))
    }

    /// Async receiver for every event.
    pub fn stream(&self) -> broadcast::Receiver<GameEvent> {
        self.inner.all.subscribe()
    }

    /// Async receiver for a single topic.
    pub fn stream_topic(&self, topic: Topic) -> broadcast::Receiver<GameEvent> {
        match self.inner.topics.get(&topic) {
            Some(tx) => tx.subscribe(),
            // every topic is created in `with_capacity`
            None => self.inner.all.subscribe(),
        }
    }

    /// Async receivers for several topics at once.
    pub fn stream_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<GameEvent>> {
        topics
            .iter()
            .map(|&topic| (topic, self.stream_topic(topic)))
            .collect()
    }

    /// Number of synchronous listeners currently attached.
    pub fn listener_count(&self) -> usize {
        self.inner.listeners().entries.len()
    }

    fn register(&self, topic: Option<Topic>, callback: Callback) -> Subscription {
        let mut listeners = self.inner.listeners();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push(Listener {
            id,
            topic,
            callback,
        });

        Subscription {
            id,
            bus: Arc::downgrade(&self.inner),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Returned by the `subscribe*` methods; detaches the listener when
/// [`Subscription::unsubscribe`] is called.
///
/// Dropping a subscription without calling `unsubscribe` leaves the listener
/// attached for the lifetime of the bus.
#[must_use = "keep the subscription to be able to unsubscribe"]
pub struct Subscription {
    id: u64,
    bus: Weak<Inner>,
}

impl Subscription {
    /// Detaches the listener. Returns `false` if it was already gone.
    pub fn unsubscribe(self) -> bool {
        let Some(inner) = self.bus.upgrade() else {
            return false;
        };
        let mut listeners = inner.listeners();
        let before = listeners.entries.len();
        listeners.entries.retain(|listener| listener.id != self.id);
        listeners.entries.len() != before
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparkle_core::{Command, DieId};

    fn recorder(bus: &EventBus, topic: Option<Topic>) -> (Subscription, Arc<Mutex<Vec<&'static str>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback = move |event: &GameEvent| sink.lock().unwrap().push(event.name());
        let subscription = match topic {
            Some(topic) => bus.subscribe_topic(topic, callback),
            None => bus.subscribe(callback),
        };
        (subscription, seen)
    }

    fn sample() -> Vec<GameEvent> {
        vec![
            GameEvent::DieToggled {
                die: DieId(1),
                staged: true,
            },
            GameEvent::DiceRolled {
                dice: vec![DieId(2)],
                auto_rerolled: vec![],
                busted: true,
            },
            GameEvent::DelayedAction {
                command: Command::end_turn(true),
                delay_ms: 1500,
            },
        ]
    }

    #[test]
    fn listeners_see_events_in_emission_order() {
        let bus = EventBus::new();
        let (_subscription, seen) = recorder(&bus, None);

        bus.publish_all(&sample());

        assert_eq!(
            *seen.lock().unwrap(),
            vec!["DIE_TOGGLED", "DICE_ROLLED", "DELAYED_ACTION"]
        );
    }

    #[test]
    fn topic_listeners_are_filtered() {
        let bus = EventBus::new();
        let (_subscription, seen) = recorder(&bus, Some(Topic::Scheduling));

        bus.publish_all(&sample());

        assert_eq!(*seen.lock().unwrap(), vec!["DELAYED_ACTION"]);
    }

    #[test]
    fn unsubscribe_detaches_listener() {
        let bus = EventBus::new();
        let (subscription, seen) = recorder(&bus, None);
        assert_eq!(bus.listener_count(), 1);

        assert!(subscription.unsubscribe());
        bus.publish(&GameEvent::GameReset);

        assert_eq!(bus.listener_count(), 0);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn listener_may_subscribe_during_delivery() {
        let bus = EventBus::new();
        let inner_bus = bus.clone();
        let _subscription = bus.subscribe(move |_| {
            let _nested = inner_bus.subscribe(|_| {});
        });

        bus.publish(&GameEvent::GameReset);

        assert_eq!(bus.listener_count(), 2);
    }

    #[tokio::test]
    async fn streams_receive_by_topic() {
        let bus = EventBus::new();
        let mut all = bus.stream();
        let mut turns = bus.stream_topic(Topic::Turn);

        bus.publish(&GameEvent::DieToggled {
            die: DieId(1),
            staged: false,
        });
        bus.publish(&GameEvent::GameReset);

        assert_eq!(all.recv().await.unwrap().name(), "DIE_TOGGLED");
        assert_eq!(all.recv().await.unwrap(), GameEvent::GameReset);
        assert_eq!(turns.recv().await.unwrap(), GameEvent::GameReset);
        assert!(turns.try_recv().is_err());
    }

    #[test]
    fn every_event_has_a_topic() {
        assert_eq!(Topic::of(&GameEvent::GameReset), Topic::Turn);
        assert_eq!(
            Topic::of(&GameEvent::Error {
                code: "BOARD_FULL".into(),
                message: "board full".into(),
            }),
            Topic::Error
        );
    }
}
