//! Reference collaborator implementations.
//!
//! In-memory versions of the grid, pathfinding, highlight and effect
//! contracts. Hosts with their own engine plug in their own; the client
//! binary and the integration tests use these.
mod effects;
mod grid;
mod highlights;
mod paths;

pub use effects::{EffectLog, RecordingEffects};
pub use grid::InMemoryGrid;
pub use highlights::HighlightLog;
pub use paths::BfsPathfinder;
