//! Effect layer that records what it was asked to do.
use tactics_core::{Action, ActionEffects, ActionKind, EffectStatus, Position, UnitId};

/// Everything a [`RecordingEffects`] saw, in call order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectLog {
    pub executed: Vec<Action>,
    pub moves_started: Vec<(UnitId, Position, Position)>,
    pub interactions: Vec<(UnitId, Position)>,
}

/// Resolves every queued action instantly, unless told to leave moves
/// playing so the host completes them later.
#[derive(Debug, Clone, Default)]
pub struct RecordingEffects {
    log: EffectLog,
    defer_moves: bool,
}

impl RecordingEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queued moves report [`EffectStatus::InProgress`].
    pub fn deferring_moves() -> Self {
        Self {
            defer_moves: true,
            ..Self::default()
        }
    }

    pub fn log(&self) -> &EffectLog {
        &self.log
    }

    pub fn executed_by(&self) -> Vec<UnitId> {
        self.log.executed.iter().map(Action::actor).collect()
    }
}

impl ActionEffects for RecordingEffects {
    fn execute(&mut self, action: &Action) -> EffectStatus {
        self.log.executed.push(action.clone());
        if self.defer_moves && action.kind() == ActionKind::Move {
            EffectStatus::InProgress
        } else {
            EffectStatus::Finished
        }
    }

    fn begin_move(&mut self, unit: UnitId, from: Position, to: Position) {
        self.log.moves_started.push((unit, from, to));
    }

    fn interact(&mut self, unit: UnitId, at: Position) {
        self.log.interactions.push((unit, at));
    }
}
