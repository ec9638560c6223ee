//! The skirmish's collaborators: grid, pathfinding, highlights and a small
//! hit-point model standing in for animation and damage.
use std::collections::HashMap;

use tactics_content::{EncounterData, TriggerSpec};
use tactics_core::{Action, ActionEffects, ActionKind, CombatEnv, EffectStatus, Position, UnitId};
use tactics_runtime::{BfsPathfinder, HighlightLog, InMemoryGrid};

/// Grid and effect collaborators the controller is ticked against.
pub struct Table {
    pub grid: InMemoryGrid,
    pub paths: BfsPathfinder,
    pub highlights: HighlightLog,
    pub effects: SkirmishEffects,
}

impl Table {
    pub fn from_encounter(data: &EncounterData) -> Self {
        let mut grid = InMemoryGrid::new(data.dimensions);
        for (cell, trigger) in &data.triggers {
            grid = match trigger {
                TriggerSpec::Cell(trigger) => grid.with_trigger(*cell, *trigger),
                TriggerSpec::LevelTransition(transition) => {
                    grid.with_level_transition(*cell, transition.clone())
                }
                TriggerSpec::Boss => grid.with_boss_trigger(*cell),
            };
        }
        for (cell, interactable) in &data.interactables {
            grid = grid.with_interactable(*cell, *interactable);
        }

        let hit_points = data
            .party
            .iter()
            .chain(data.stages.iter().flatten())
            .map(|unit| (unit.id(), SkirmishEffects::HIT_POINTS));

        Self {
            grid,
            paths: BfsPathfinder::new(data.dimensions, data.walls.iter().copied()),
            highlights: HighlightLog::new(),
            effects: SkirmishEffects::new(hit_points),
        }
    }

    pub fn env(&mut self) -> CombatEnv<'_> {
        CombatEnv::new(
            &mut self.grid,
            &self.paths,
            &mut self.highlights,
            &mut self.effects,
        )
    }
}

/// Resolves every action on the spot. Attacks deal damage proportional to
/// their cost; units that drop to zero are reported as casualties.
#[derive(Debug, Default)]
pub struct SkirmishEffects {
    hit_points: HashMap<UnitId, i32>,
    casualties: Vec<UnitId>,
    walking: Vec<UnitId>,
}

impl SkirmishEffects {
    pub const HIT_POINTS: i32 = 8;
    pub const DAMAGE_PER_COST: i32 = 2;

    pub fn new(hit_points: impl IntoIterator<Item = (UnitId, i32)>) -> Self {
        Self {
            hit_points: hit_points.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn hit_points(&self, unit: UnitId) -> Option<i32> {
        self.hit_points.get(&unit).copied()
    }

    /// Units killed since the last call.
    pub fn take_casualties(&mut self) -> Vec<UnitId> {
        std::mem::take(&mut self.casualties)
    }

    /// Free-roam walks started since the last call; they finish instantly.
    pub fn take_finished_walks(&mut self) -> Vec<UnitId> {
        std::mem::take(&mut self.walking)
    }
}

impl ActionEffects for SkirmishEffects {
    fn execute(&mut self, action: &Action) -> EffectStatus {
        if let ActionKind::Attack(style) = action.kind()
            && let Some(target) = action.target()
            && let Some(hit_points) = self.hit_points.get_mut(&target)
        {
            let damage = action.cost() as i32 * Self::DAMAGE_PER_COST;
            *hit_points -= damage;
            tracing::info!(
                "Unit {} hits {} ({}) for {}, {} left",
                action.actor(),
                target,
                style,
                damage,
                (*hit_points).max(0)
            );
            if *hit_points <= 0 {
                self.hit_points.remove(&target);
                self.casualties.push(target);
            }
        }
        EffectStatus::Finished
    }

    fn begin_move(&mut self, unit: UnitId, from: Position, to: Position) {
        tracing::debug!("Unit {} walking {} -> {}", unit, from, to);
        self.walking.push(unit);
    }

    fn interact(&mut self, unit: UnitId, at: Position) {
        tracing::info!("Unit {} interacts at {}", unit, at);
    }
}
