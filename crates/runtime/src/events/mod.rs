//! Topic-based event bus for combat events.
//!
//! The controller owns the bus and publishes every domain event to the topic
//! it belongs to; UI, AI and audio layers subscribe only to what they need.

mod bus;
mod types;

pub use bus::{EventBus, Topic};
pub use types::{CombatEvent, CursorKind};
