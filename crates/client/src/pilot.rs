//! Scripted stand-in for the player.
//!
//! Produces the pointer position and intents a person would: click a Blue
//! unit, click where it should go or whom it should shoot, end the turn.
//! Everything goes through [`CombatController::tick`], so the skirmish
//! exercises the same input path as an interactive host.

use std::collections::HashSet;

use tactics_core::{GridOracle, PathOracle, Position, Team, TurnPhase, Unit, UnitId};
use tactics_runtime::{CombatController, InMemoryGrid, Intent, TickInput};

#[derive(Debug, Default)]
pub struct Pilot {
    /// Units that have nothing more to do this turn.
    done: HashSet<UnitId>,
    /// Where the party heads while roaming.
    goal: Option<Position>,
}

impl Pilot {
    pub fn new(goal: Option<Position>) -> Self {
        Self {
            done: HashSet::new(),
            goal,
        }
    }

    pub fn turn_ended(&mut self) {
        self.done.clear();
    }

    pub fn next_input(
        &mut self,
        controller: &CombatController,
        grid: &InMemoryGrid,
        paths: &dyn PathOracle,
    ) -> TickInput {
        if controller.is_executing() {
            return TickInput::idle();
        }
        match controller.phase() {
            TurnPhase::OutOfCombat => self.roam(controller, grid),
            TurnPhase::Normal | TurnPhase::Boss => self.pick_unit(controller, grid),
            TurnPhase::UnitSelected => self.command(controller, grid, paths),
            TurnPhase::Waiting
            | TurnPhase::EndingTurn
            | TurnPhase::Cutscene
            | TurnPhase::Transition => TickInput::idle(),
        }
    }

    fn roam(&mut self, controller: &CombatController, grid: &InMemoryGrid) -> TickInput {
        let Some(goal) = self.goal else {
            return TickInput::idle();
        };
        let Some(leader) = controller.roster().team_units(Team::Blue).next() else {
            return TickInput::idle();
        };
        if leader.cell() == goal {
            self.goal = None;
            return TickInput::idle();
        }
        if controller.selected() != Some(leader.id()) {
            return press(grid, leader.cell(), Intent::Select);
        }
        match grid
            .valid_move_targets()
            .into_iter()
            .min_by_key(|cell| cell.chebyshev(goal))
        {
            Some(cell) => press(grid, cell, Intent::ConfirmMoveOrAttack),
            None => press(grid, leader.cell(), Intent::Cancel),
        }
    }

    fn pick_unit(&mut self, controller: &CombatController, grid: &InMemoryGrid) -> TickInput {
        let minimum = controller.config().min_action_points_to_act;
        let next = controller
            .roster()
            .team_units(Team::Blue)
            .find(|unit| !self.done.contains(&unit.id()) && unit.has_action_points(minimum));
        match next {
            Some(unit) => press(grid, unit.cell(), Intent::Select),
            None => TickInput::idle().with_intent(Intent::EndTurn),
        }
    }

    fn command(
        &mut self,
        controller: &CombatController,
        grid: &InMemoryGrid,
        paths: &dyn PathOracle,
    ) -> TickInput {
        let Some(unit) = controller
            .selected()
            .and_then(|id| controller.roster().get(id))
        else {
            return TickInput::idle();
        };
        let anchor = unit.anchor();
        let Some(enemy) = nearest_enemy(controller, anchor) else {
            return self.stand_down(grid, unit);
        };

        if unit.can_attack(enemy.cell(), anchor) {
            if unit.action_points() >= unit.attack().cost {
                self.done.insert(unit.id());
                return press(grid, enemy.cell(), Intent::ConfirmMoveOrAttack);
            }
            return self.stand_down(grid, unit);
        }
        // One approach per turn; the strike above may follow it.
        if unit.pending_actions() > 0 {
            return self.stand_down(grid, unit);
        }

        let distance = anchor.chebyshev(enemy.cell());
        let closer = grid
            .valid_move_targets()
            .into_iter()
            .filter(|cell| cell.chebyshev(enemy.cell()) < distance)
            .min_by_key(|cell| {
                (
                    cell.chebyshev(enemy.cell()),
                    paths.path_length(anchor, *cell),
                )
            });
        match closer {
            Some(cell) => press(grid, cell, Intent::ConfirmMoveOrAttack),
            None => self.stand_down(grid, unit),
        }
    }

    fn stand_down(&mut self, grid: &InMemoryGrid, unit: &Unit) -> TickInput {
        self.done.insert(unit.id());
        press(grid, unit.cell(), Intent::Cancel)
    }
}

fn nearest_enemy(controller: &CombatController, from: Position) -> Option<&Unit> {
    controller
        .roster()
        .team_units(Team::Red)
        .min_by_key(|unit| (from.chebyshev(unit.cell()), unit.id()))
}

fn press(grid: &InMemoryGrid, cell: Position, intent: Intent) -> TickInput {
    TickInput::hover(grid.world_of(cell)).with_intent(intent)
}
