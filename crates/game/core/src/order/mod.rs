//! Per-unit orders and the initiative-ranked queue that resolves them.

mod policy;
mod queue;

pub use policy::{
    CostContribution, CostScaledInitiative, FixedInitiative, InitiativePolicy, ScriptedInitiative,
    accumulate_cost,
};
pub use queue::{OrderQueue, OrderQueueError};

use crate::state::UnitId;

/// Aggregate of one unit's pending actions for the current turn.
///
/// `executed` is set while the unit's current action is being carried out
/// and cleared once it finishes; `complete` is set when no action is left.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Order {
    initiative: i32,
    unit: UnitId,
    total_cost: u32,
    executed: bool,
    complete: bool,
}

impl Order {
    pub fn new(initiative: i32, unit: UnitId, total_cost: u32) -> Self {
        Self {
            initiative,
            unit,
            total_cost,
            executed: false,
            complete: false,
        }
    }

    pub fn initiative(&self) -> i32 {
        self.initiative
    }

    pub fn unit(&self) -> UnitId {
        self.unit
    }

    pub fn total_cost(&self) -> u32 {
        self.total_cost
    }

    pub fn has_executed(&self) -> bool {
        self.executed
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn mark_executed(&mut self) {
        self.executed = true;
    }

    /// The in-flight action finished; the next one may be dispatched.
    pub fn mark_ready(&mut self) {
        self.executed = false;
    }

    pub fn mark_complete(&mut self) {
        self.complete = true;
    }

    pub(crate) fn set_initiative(&mut self, initiative: i32) {
        self.initiative = initiative;
    }

    pub(crate) fn set_total_cost(&mut self, total_cost: u32) {
        self.total_cost = total_cost;
    }
}
