//! Topic-based event bus implementation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::CombatEvent;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Selection, cursor and per-unit feedback
    Selection,
    /// Phase changes and turn boundaries
    Turn,
    /// Triggers, deaths and encounter lifecycle
    Encounter,
    /// Requests addressed to the AI and encounter loader
    Ai,
}

impl Topic {
    pub const ALL: [Topic; 4] = [Topic::Selection, Topic::Turn, Topic::Encounter, Topic::Ai];
}

/// Topic-based event bus
///
/// Publishing never blocks and never fails: an event nobody listens to is
/// dropped. Clones share the same channels.
///
/// Receivers of different topics are independent, so draining them one after
/// another loses the order events were published in. Consumers that need
/// that order use [`EventBus::subscribe_all`].
#[derive(Clone)]
pub struct EventBus {
    selection: broadcast::Sender<CombatEvent>,
    turn: broadcast::Sender<CombatEvent>,
    encounter: broadcast::Sender<CombatEvent>,
    ai: broadcast::Sender<CombatEvent>,
    all: broadcast::Sender<CombatEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(crate::RuntimeConfig::DEFAULT_EVENT_BUFFER_SIZE)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            selection: broadcast::channel(capacity).0,
            turn: broadcast::channel(capacity).0,
            encounter: broadcast::channel(capacity).0,
            ai: broadcast::channel(capacity).0,
            all: broadcast::channel(capacity.saturating_mul(Topic::ALL.len())).0,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: CombatEvent) {
        let topic = event.topic();
        // Ignored for the same reason as below.
        let _ = self.all.send(event.clone());
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<CombatEvent> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to every topic through one receiver that yields events in
    /// publication order
    pub fn subscribe_all(&self) -> broadcast::Receiver<CombatEvent> {
        self.all.subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<CombatEvent>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<CombatEvent> {
        match topic {
            Topic::Selection => &self.selection,
            Topic::Turn => &self.turn,
            Topic::Encounter => &self.encounter,
            Topic::Ai => &self.ai,
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
