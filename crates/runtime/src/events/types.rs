//! Event payloads published by the combat controller.

use serde::{Deserialize, Serialize};
use tactics_core::{ActionKind, Position, Team, TurnPhase, UnitId};

use super::Topic;

/// Pointer shape requested from the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CursorKind {
    Arrow,
    Attack,
    Move,
    Select,
}

impl CursorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CursorKind::Arrow => "arrow",
            CursorKind::Attack => "attack",
            CursorKind::Move => "move",
            CursorKind::Select => "select",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// A unit became the focus of selection or of the camera. `position` is
    /// where the unit will stand once its queued actions resolve.
    UnitSelected { unit: UnitId, position: Position },
    UnitDeselected,
    /// Remaining action points of the selected unit; `None` when nothing is selected.
    ActionPointsChanged {
        unit: Option<UnitId>,
        remaining: Option<u32>,
    },
    CursorChanged { cursor: CursorKind },
    WeaponChanged {
        unit: UnitId,
        slot: usize,
        name: String,
    },
    UnitMoved {
        unit: UnitId,
        from: Position,
        to: Position,
    },
    ActionQueued {
        unit: UnitId,
        kind: ActionKind,
        cost: u32,
        total_cost: u32,
        initiative: i32,
    },
    PhaseChanged { from: TurnPhase, to: TurnPhase },
    TurnEnded { turn: u32 },
    UnitDied { unit: UnitId, team: Team },
    GameEnded { won: bool },
    CutsceneTriggered { index: u32 },
    LevelTransitionStarted {
        current_level: String,
        next_level: String,
        cutscene_index: u32,
    },
    BossStarted,
    BossEnded,
    BossReenabled,
    AiStageLoadRequested { stage: u32 },
    AiStageUnloaded { stage: u32 },
    /// The player's turn is over; the AI should queue its orders and acknowledge.
    AiTurnRequested { turn: u32 },
    AiTurnAcknowledged { turn: u32 },
}

impl CombatEvent {
    pub fn topic(&self) -> Topic {
        match self {
            CombatEvent::UnitSelected { .. }
            | CombatEvent::UnitDeselected
            | CombatEvent::ActionPointsChanged { .. }
            | CombatEvent::CursorChanged { .. }
            | CombatEvent::WeaponChanged { .. }
            | CombatEvent::UnitMoved { .. }
            | CombatEvent::ActionQueued { .. } => Topic::Selection,

            CombatEvent::PhaseChanged { .. } | CombatEvent::TurnEnded { .. } => Topic::Turn,

            CombatEvent::UnitDied { .. }
            | CombatEvent::GameEnded { .. }
            | CombatEvent::CutsceneTriggered { .. }
            | CombatEvent::LevelTransitionStarted { .. }
            | CombatEvent::BossStarted
            | CombatEvent::BossEnded
            | CombatEvent::BossReenabled => Topic::Encounter,

            CombatEvent::AiStageLoadRequested { .. }
            | CombatEvent::AiStageUnloaded { .. }
            | CombatEvent::AiTurnRequested { .. }
            | CombatEvent::AiTurnAcknowledged { .. } => Topic::Ai,
        }
    }
}
