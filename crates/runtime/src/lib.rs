//! Runtime orchestration for turn-based tactical combat.
//!
//! This crate drives the pure model in `tactics-core` one host frame at a
//! time. Consumers build a [`CombatController`], call
//! [`tick`](CombatController::tick) every frame with the pointer and the
//! decoded intents, and subscribe to the [`EventBus`] for everything the
//! UI, AI and audio layers react to.
//!
//! Modules are organized by responsibility:
//! - [`controller`] hosts the tick loop, selection and order merging
//! - [`execution`] resolves a sealed order queue one action per step
//! - [`events`] provides the topic-based event bus
//! - [`edge`] and [`highlight`] turn state changes into repaints
//! - [`oracle`] provides in-memory collaborators reused by other crates
//! - [`ai`] is a minimal Red-team driver
pub mod ai;
pub mod controller;
pub mod edge;
pub mod events;
pub mod execution;
pub mod highlight;
pub mod oracle;
pub mod policy;

mod config;
mod error;

pub use ai::ApproachAndStrike;
pub use config::RuntimeConfig;
pub use controller::{CombatController, CombatControllerBuilder, Intent, TickInput};
pub use edge::{EdgeDetector, FrameDiff, FrameSample};
pub use error::{Result, RuntimeError};
pub use events::{CombatEvent, CursorKind, EventBus, Topic};
pub use execution::{StepOutcome, StepReport, TurnExecution};
pub use oracle::{BfsPathfinder, EffectLog, HighlightLog, InMemoryGrid, RecordingEffects};
pub use policy::RandomInitiative;
