//! Reference AI driver.
//!
//! [`ApproachAndStrike`] answers an `AiTurnRequested` by walking every Red
//! unit toward the nearest Blue unit and attacking once it is in reach. It
//! queues through [`CombatController::submit_action`] like any other
//! driver, then acknowledges the turn.

use std::collections::BTreeSet;

use tactics_core::{
    Action, CombatConfig, GridOracle, PathOracle, Position, Roster, Team, Unit, Waypoint,
};

use crate::controller::CombatController;
use crate::error::Result;

#[derive(Debug, Clone, Copy, Default)]
pub struct ApproachAndStrike;

impl ApproachAndStrike {
    /// Queues the Red team's actions and hands the turn back for execution.
    /// Returns how many actions were queued.
    pub fn take_turn(
        &self,
        controller: &mut CombatController,
        grid: &dyn GridOracle,
        paths: &dyn PathOracle,
    ) -> Result<usize> {
        let actions = self.plan(controller.roster(), controller.config(), grid, paths);
        let queued = actions.len();
        for action in actions {
            controller.submit_action(action)?;
        }
        controller.acknowledge_ai_turn()?;
        tracing::debug!("AI queued {} actions", queued);
        Ok(queued)
    }

    /// Actions for every Red unit, in roster order.
    pub fn plan(
        &self,
        roster: &Roster,
        config: &CombatConfig,
        grid: &dyn GridOracle,
        paths: &dyn PathOracle,
    ) -> Vec<Action> {
        let targets: Vec<&Unit> = roster.team_units(Team::Blue).collect();
        // Cells the Blue team's queued moves end on are off limits too.
        let mut claimed = roster.claimed_cells(None);
        let mut actions = Vec::new();

        for unit in roster.team_units(Team::Red) {
            let Some(target) = targets
                .iter()
                .min_by_key(|target| (unit.cell().chebyshev(target.cell()), target.id()))
            else {
                continue;
            };
            let mut at = unit.cell();
            let mut budget = unit.action_points();

            if !unit.can_attack(target.cell(), at)
                && let Some((destination, cost)) =
                    approach(unit, target.cell(), budget, config, grid, paths, &claimed)
            {
                actions.push(Action::movement(
                    unit.id(),
                    Waypoint::new(at, grid.world_of(at)),
                    Waypoint::new(destination, grid.world_of(destination)),
                    cost,
                ));
                claimed.insert(destination);
                budget -= cost;
                at = destination;
            }

            let profile = unit.attack();
            if unit.can_attack(target.cell(), at) && profile.cost <= budget {
                actions.push(Action::attack(
                    unit.id(),
                    Waypoint::new(at, grid.world_of(at)),
                    target.id(),
                    profile.style,
                    profile.cost,
                ));
            }
        }
        actions
    }
}

/// Furthest affordable free cell along the path to `target`, stopping
/// early once the target is in reach.
fn approach(
    unit: &Unit,
    target: Position,
    budget: u32,
    config: &CombatConfig,
    grid: &dyn GridOracle,
    paths: &dyn PathOracle,
    claimed: &BTreeSet<Position>,
) -> Option<(Position, u32)> {
    let path = paths.path(unit.cell(), target);
    let mut steps = 0;
    for (index, cell) in path.iter().enumerate() {
        if *cell == target || config.move_cost(index + 1) > budget {
            break;
        }
        steps = index + 1;
        if unit.can_attack(target, *cell) {
            break;
        }
    }
    while steps > 0 {
        let cell = path[steps - 1];
        if grid.occupant(cell).is_none() && !claimed.contains(&cell) {
            return Some((cell, config.move_cost(steps)));
        }
        steps -= 1;
    }
    None
}
