//! Turn-phase state machine.
//!
//! [`PhaseMachine::apply`] is the only way the phase changes. Every request
//! is a [`PhaseEvent`] checked against the transition table in
//! [`TurnPhase::next`]; anything not in the table is rejected and leaves the
//! phase untouched.

use crate::error::{CombatError, ErrorSeverity};

/// Macro mode controlling which input and selection behaviour is legal.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TurnPhase {
    /// Combat, nothing selected.
    Normal,
    /// Like `Normal`, under the boss-encounter ruleset.
    Boss,
    /// A Blue unit is accumulating actions.
    UnitSelected,
    /// An action was just committed; settles on the next tick.
    Waiting,
    /// Turn is over; hands control to the AI and then to execution.
    EndingTurn,
    /// Free roam before an encounter. Movement resolves immediately.
    OutOfCombat,
    Cutscene,
    Transition,
}

impl TurnPhase {
    /// Cutscene and level transition freeze interaction and highlight feedback.
    pub const fn is_frozen(self) -> bool {
        matches!(self, TurnPhase::Cutscene | TurnPhase::Transition)
    }

    /// Phases in which orders are being built for the current turn.
    pub const fn is_combat(self) -> bool {
        matches!(
            self,
            TurnPhase::Normal
                | TurnPhase::Boss
                | TurnPhase::UnitSelected
                | TurnPhase::Waiting
                | TurnPhase::EndingTurn
        )
    }

    /// Resting phase for "nothing selected" under the current ruleset.
    pub const fn idle(in_boss_fight: bool) -> Self {
        if in_boss_fight {
            TurnPhase::Boss
        } else {
            TurnPhase::Normal
        }
    }

    /// Transition table. `None` means the event is illegal from `self`.
    pub fn next(self, event: PhaseEvent) -> Option<TurnPhase> {
        use PhaseEvent as E;
        use TurnPhase as P;

        match (self, event) {
            // Selection only happens in combat phases that are not resolving.
            (P::Normal | P::Boss | P::UnitSelected, E::SelectUnit) => Some(P::UnitSelected),
            (P::UnitSelected, E::CommitAction) => Some(P::Waiting),
            (P::UnitSelected, E::CommitFinalAction) => Some(P::EndingTurn),
            (
                P::Waiting,
                E::Settle {
                    units_have_action_points,
                },
            ) => Some(if units_have_action_points {
                P::UnitSelected
            } else {
                P::EndingTurn
            }),
            (P::UnitSelected | P::Waiting, E::Deselect { in_boss_fight }) => {
                Some(P::idle(in_boss_fight))
            }
            (
                P::Normal | P::Boss | P::UnitSelected | P::Waiting | P::EndingTurn,
                E::EndTurn,
            ) => Some(P::EndingTurn),
            (P::EndingTurn, E::BeginExecution { in_boss_fight }) => Some(P::idle(in_boss_fight)),

            // Triggers.
            (P::OutOfCombat, E::CutsceneTriggered) => Some(P::Cutscene),
            (_, E::LevelTransition) => Some(P::Transition),
            (phase, E::BossStarted) if !phase.is_frozen() => Some(P::Boss),

            // Encounter lifecycle.
            (P::OutOfCombat, E::StageLoaded) => Some(P::Normal),
            (phase, E::EncounterCleared) if phase != P::Boss && !phase.is_frozen() => {
                Some(P::OutOfCombat)
            }
            (phase, E::BossEnded) if !phase.is_frozen() => Some(P::OutOfCombat),

            // Cutscene and transition are resolved by their collaborators.
            (P::Cutscene | P::Transition, E::Resume) => Some(P::Normal),

            _ => None,
        }
    }
}

/// Everything that may ask the phase to change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PhaseEvent {
    /// A Blue unit was picked.
    SelectUnit,
    /// A Move or Attack was queued.
    CommitAction,
    /// An action that ends the unit's turn outright (Interact) was queued.
    CommitFinalAction,
    /// The tick after a commit: stay in selection while any Blue unit can act.
    Settle { units_have_action_points: bool },
    /// Explicit cancel, or the selected unit is gone.
    Deselect { in_boss_fight: bool },
    EndTurn,
    /// The AI acknowledged its turn; queued orders start resolving.
    BeginExecution { in_boss_fight: bool },
    CutsceneTriggered,
    LevelTransition,
    BossStarted,
    StageLoaded,
    /// The last enemy died outside a boss fight.
    EncounterCleared,
    BossEnded,
    /// Cutscene or level load finished.
    Resume,
}

impl PhaseEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseEvent::SelectUnit => "select_unit",
            PhaseEvent::CommitAction => "commit_action",
            PhaseEvent::CommitFinalAction => "commit_final_action",
            PhaseEvent::Settle { .. } => "settle",
            PhaseEvent::Deselect { .. } => "deselect",
            PhaseEvent::EndTurn => "end_turn",
            PhaseEvent::BeginExecution { .. } => "begin_execution",
            PhaseEvent::CutsceneTriggered => "cutscene_triggered",
            PhaseEvent::LevelTransition => "level_transition",
            PhaseEvent::BossStarted => "boss_started",
            PhaseEvent::StageLoaded => "stage_loaded",
            PhaseEvent::EncounterCleared => "encounter_cleared",
            PhaseEvent::BossEnded => "boss_ended",
            PhaseEvent::Resume => "resume",
        }
    }
}

/// Rejected phase change.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PhaseError {
    #[error("transition {} is not legal from phase {from}", .event.as_str())]
    IllegalTransition { from: TurnPhase, event: PhaseEvent },
}

impl CombatError for PhaseError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        "PHASE_ILLEGAL_TRANSITION"
    }
}

/// A phase change that happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseChange {
    pub from: TurnPhase,
    pub to: TurnPhase,
}

/// Owner of the current phase.
#[derive(Clone, Debug)]
pub struct PhaseMachine {
    phase: TurnPhase,
}

impl PhaseMachine {
    pub fn new(initial: TurnPhase) -> Self {
        Self { phase: initial }
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn apply(&mut self, event: PhaseEvent) -> Result<PhaseChange, PhaseError> {
        let from = self.phase;
        let to = from
            .next(event)
            .ok_or(PhaseError::IllegalTransition { from, event })?;
        self.phase = to;
        Ok(PhaseChange { from, to })
    }
}

impl Default for PhaseMachine {
    fn default() -> Self {
        Self::new(TurnPhase::OutOfCombat)
    }
}
