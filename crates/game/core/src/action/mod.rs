//! Unit intents and the per-unit queue that holds them until execution.
//!
//! An [`Action`] is immutable once built: it is appended to its actor's
//! [`ActionQueue`] when the player commits it and consumed, never mutated,
//! when the turn resolves.

mod queue;

pub use queue::ActionQueue;

use crate::state::{Position, UnitId, WorldPos};

/// Flavour of an attack, carried through to the effect layer.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AttackStyle {
    #[default]
    Melee,
    Ranged,
    Area,
}

/// What an action does once executed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    Move,
    Attack(AttackStyle),
    Interact,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Move => "move",
            ActionKind::Attack(_) => "attack",
            ActionKind::Interact => "interact",
        }
    }
}

/// A cell together with the world-space point it was picked at.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    pub cell: Position,
    pub world: WorldPos,
}

impl Waypoint {
    pub const fn new(cell: Position, world: WorldPos) -> Self {
        Self { cell, world }
    }
}

/// One committed unit intent with its resolved cost.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    kind: ActionKind,
    origin: Waypoint,
    destination: Waypoint,
    actor: UnitId,
    target: Option<UnitId>,
    cost: u32,
}

impl Action {
    /// Walk from `origin` to `destination`; `cost` is already scaled by path length.
    pub fn movement(actor: UnitId, origin: Waypoint, destination: Waypoint, cost: u32) -> Self {
        Self {
            kind: ActionKind::Move,
            origin,
            destination,
            actor,
            target: None,
            cost,
        }
    }

    /// Attack `target` without moving: origin and destination are both `at`.
    pub fn attack(
        actor: UnitId,
        at: Waypoint,
        target: UnitId,
        style: AttackStyle,
        cost: u32,
    ) -> Self {
        Self {
            kind: ActionKind::Attack(style),
            origin: at,
            destination: at,
            actor,
            target: Some(target),
            cost,
        }
    }

    /// Use the interactable at `destination` while standing on `origin`.
    ///
    /// The actor does not move, so the queue anchor stays on `origin`.
    pub fn interact(actor: UnitId, origin: Waypoint, destination: Waypoint, cost: u32) -> Self {
        Self {
            kind: ActionKind::Interact,
            origin,
            destination,
            actor,
            target: None,
            cost,
        }
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn origin(&self) -> Waypoint {
        self.origin
    }

    pub fn destination(&self) -> Waypoint {
        self.destination
    }

    pub fn actor(&self) -> UnitId {
        self.actor
    }

    pub fn target(&self) -> Option<UnitId> {
        self.target
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Cell the actor stands on after this action resolves.
    pub fn resting_cell(&self) -> Position {
        match self.kind {
            ActionKind::Move => self.destination.cell,
            ActionKind::Attack(_) | ActionKind::Interact => self.origin.cell,
        }
    }
}
