//! Turn-based tactical combat rules shared by the runtime and tools.
//!
//! `tactics-core` holds the pure pieces of the combat controller: unit
//! actions and their per-unit queues, the initiative-ranked order queue, the
//! turn-phase state machine and the collaborator contracts (grid, paths,
//! highlights, effects) the controller drives. Nothing here logs, blocks or
//! draws random numbers; the runtime crate layers those on top.
pub mod action;
pub mod config;
pub mod env;
pub mod error;
pub mod order;
pub mod phase;
pub mod state;
pub mod trigger;

pub use action::{Action, ActionKind, ActionQueue, AttackStyle, Waypoint};
pub use config::CombatConfig;
pub use env::{
    ActionEffects, CombatEnv, EffectStatus, GridDimensions, GridOracle, HighlightLayer,
    HighlightSink, Interactable, PathOracle, TileSprite,
};
pub use error::{CombatError, ErrorSeverity};
pub use order::{
    CostContribution, CostScaledInitiative, FixedInitiative, InitiativePolicy, Order, OrderQueue,
    OrderQueueError, ScriptedInitiative, accumulate_cost,
};
pub use phase::{PhaseChange, PhaseError, PhaseEvent, PhaseMachine, TurnPhase};
pub use state::{AttackProfile, Position, ResourceMeter, Roster, Team, Unit, UnitId, WorldPos};
pub use trigger::{BossTrigger, CellTrigger, LevelTransition};
