use crate::action::Action;
use crate::state::{Position, UnitId};

/// Whether an effect finished synchronously.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectStatus {
    Finished,
    /// Still playing out; the host reports completion to the controller later.
    InProgress,
}

/// Visible consequences of unit actions: animation, damage, doors opening.
pub trait ActionEffects {
    /// Carries out one queued action during turn resolution.
    fn execute(&mut self, action: &Action) -> EffectStatus;

    /// Starts a free-roam walk. Completion is always reported later.
    fn begin_move(&mut self, unit: UnitId, from: Position, to: Position);

    /// Free-roam interaction, resolved on the spot.
    fn interact(&mut self, unit: UnitId, at: Position);
}
