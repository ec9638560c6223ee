//! Cost accumulation and initiative policies.
//!
//! Cost is additive per unit: each queued action contributes its own cost
//! and merging never resets what came before. Initiative is redrawn on every
//! merge from the policy; it is never summed.

use std::collections::VecDeque;

/// What one queued action adds to its unit's order.
///
/// Movement and interaction report their cost as `path_length`, attacks as
/// `attack`; the split only matters to initiative policies that weigh them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CostContribution {
    pub path_length: u32,
    pub attack: u32,
}

impl CostContribution {
    pub const fn movement(cost: u32) -> Self {
        Self {
            path_length: cost,
            attack: 0,
        }
    }

    pub const fn attack(cost: u32) -> Self {
        Self {
            path_length: 0,
            attack: cost,
        }
    }

    pub const fn interaction(cost: u32) -> Self {
        Self::movement(cost)
    }

    pub const fn total(self) -> u32 {
        self.path_length.saturating_add(self.attack)
    }
}

/// New running total after adding `contribution` to `current`.
pub fn accumulate_cost(current: u32, contribution: CostContribution) -> u32 {
    current.saturating_add(contribution.total())
}

/// Draws an order's initiative. Lower values act first.
///
/// Called on creation and again on every merge with the unit's updated
/// total cost and the contribution that was just added.
pub trait InitiativePolicy {
    fn initiative(&mut self, total_cost: u32, contribution: CostContribution) -> i32;
}

impl<F> InitiativePolicy for F
where
    F: FnMut(u32, CostContribution) -> i32,
{
    fn initiative(&mut self, total_cost: u32, contribution: CostContribution) -> i32 {
        self(total_cost, contribution)
    }
}

/// Deterministic policy: cheaper orders act first.
#[derive(Clone, Copy, Debug, Default)]
pub struct CostScaledInitiative;

impl InitiativePolicy for CostScaledInitiative {
    fn initiative(&mut self, total_cost: u32, _contribution: CostContribution) -> i32 {
        i32::try_from(total_cost).unwrap_or(i32::MAX)
    }
}

/// Always returns the same initiative.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedInitiative(pub i32);

impl InitiativePolicy for FixedInitiative {
    fn initiative(&mut self, _total_cost: u32, _contribution: CostContribution) -> i32 {
        self.0
    }
}

/// Replays a fixed sequence of initiative values, then repeats the last one.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInitiative {
    values: VecDeque<i32>,
    last: i32,
}

impl ScriptedInitiative {
    pub fn new(values: impl IntoIterator<Item = i32>) -> Self {
        Self {
            values: values.into_iter().collect(),
            last: 0,
        }
    }
}

impl InitiativePolicy for ScriptedInitiative {
    fn initiative(&mut self, _total_cost: u32, _contribution: CostContribution) -> i32 {
        if let Some(value) = self.values.pop_front() {
            self.last = value;
        }
        self.last
    }
}
