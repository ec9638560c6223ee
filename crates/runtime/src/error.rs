//! Errors surfaced by the combat controller API.
//!
//! Player intents never produce errors: an intent that is not legal right
//! now is dropped. These variants cover the calls collaborators make (AI,
//! movement callbacks, encounter loader) with arguments that do not match
//! the controller's state.
use tactics_core::{
    CombatError, ErrorSeverity, OrderQueueError, PhaseError, Position, TurnPhase, UnitId,
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    OrderQueue(#[from] OrderQueueError),

    #[error(transparent)]
    Phase(#[from] PhaseError),

    #[error("unit {0} is not on the roster")]
    UnknownUnit(UnitId),

    #[error("a turn execution pass is already in flight")]
    ExecutionInFlight,

    #[error("no turn execution pass is in flight")]
    NoExecution,

    #[error("unit {unit} has no free-roam move in progress")]
    NoPendingMove { unit: UnitId },

    #[error("unit {unit} has no action awaiting completion")]
    NoPendingAction { unit: UnitId },

    #[error("unit {unit} cannot pay {cost} action points")]
    InsufficientActionPoints { unit: UnitId, cost: u32 },

    #[error("action for unit {unit} starts at {origin}, expected {anchor}")]
    BrokenChain {
        unit: UnitId,
        origin: Position,
        anchor: Position,
    },

    #[error("unit {unit} cannot move to {cell}: another unit's queued move ends there")]
    CellClaimed { unit: UnitId, cell: Position },

    #[error("orders are not accepted in phase {phase}")]
    NotAcceptingOrders { phase: TurnPhase },
}

impl CombatError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::OrderQueue(err) => err.severity(),
            Self::Phase(err) => err.severity(),
            Self::ExecutionInFlight => ErrorSeverity::Internal,
            Self::UnknownUnit(_)
            | Self::NoExecution
            | Self::NoPendingMove { .. }
            | Self::NoPendingAction { .. }
            | Self::InsufficientActionPoints { .. }
            | Self::BrokenChain { .. }
            | Self::CellClaimed { .. }
            | Self::NotAcceptingOrders { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OrderQueue(err) => err.error_code(),
            Self::Phase(err) => err.error_code(),
            Self::UnknownUnit(_) => "RUNTIME_UNKNOWN_UNIT",
            Self::ExecutionInFlight => "RUNTIME_EXECUTION_IN_FLIGHT",
            Self::NoExecution => "RUNTIME_NO_EXECUTION",
            Self::NoPendingMove { .. } => "RUNTIME_NO_PENDING_MOVE",
            Self::NoPendingAction { .. } => "RUNTIME_NO_PENDING_ACTION",
            Self::InsufficientActionPoints { .. } => "RUNTIME_INSUFFICIENT_AP",
            Self::BrokenChain { .. } => "RUNTIME_BROKEN_CHAIN",
            Self::CellClaimed { .. } => "RUNTIME_CELL_CLAIMED",
            Self::NotAcceptingOrders { .. } => "RUNTIME_NOT_ACCEPTING_ORDERS",
        }
    }
}
