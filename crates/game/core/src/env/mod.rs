//! Collaborator contracts the combat controller consumes.
//!
//! The grid, pathfinding, highlight layer and effect layer are owned by the
//! host. [`CombatEnv`] bundles borrowed handles to them for the duration of
//! one controller call so the controller never stores them.
mod effects;
mod grid;
mod highlight;
mod paths;

pub use effects::{ActionEffects, EffectStatus};
pub use grid::{GridDimensions, GridOracle, Interactable};
pub use highlight::{HighlightLayer, HighlightSink, TileSprite};
pub use paths::PathOracle;

/// Borrowed collaborators for one controller call.
pub struct CombatEnv<'a> {
    pub grid: &'a mut dyn GridOracle,
    pub paths: &'a dyn PathOracle,
    pub highlights: &'a mut dyn HighlightSink,
    pub effects: &'a mut dyn ActionEffects,
}

impl<'a> CombatEnv<'a> {
    pub fn new(
        grid: &'a mut dyn GridOracle,
        paths: &'a dyn PathOracle,
        highlights: &'a mut dyn HighlightSink,
        effects: &'a mut dyn ActionEffects,
    ) -> Self {
        Self {
            grid,
            paths,
            highlights,
            effects,
        }
    }
}
