use tactics_core::{CombatEnv, PhaseEvent, Team, UnitId};

use super::CombatController;
use crate::error::{Result, RuntimeError};
use crate::events::CombatEvent;

impl CombatController {
    /// Removes a dead unit from the roster, the order queue, any in-flight
    /// execution and the grid, then checks the encounter's end conditions.
    ///
    /// Safe to call mid-execution: the queue may be sealed.
    pub fn unit_died(&mut self, env: &mut CombatEnv<'_>, unit_id: UnitId) -> Result<()> {
        let unit = self
            .roster
            .remove(unit_id)
            .ok_or(RuntimeError::UnknownUnit(unit_id))?;
        let team = unit.team();

        let purged = self.orders.remove_unit(unit_id);
        if let Some(execution) = self.execution.as_mut() {
            execution.forget(unit_id);
        }
        self.roaming.remove(&unit_id);
        if env.grid.occupant(unit.cell()) == Some(unit_id) {
            env.grid.clear_occupant(unit.cell());
        }
        if self.selected == Some(unit_id) {
            self.deselect(env);
            let in_boss_fight = self.in_boss_fight;
            self.try_phase(PhaseEvent::Deselect { in_boss_fight });
        }
        if self.camera_unit == Some(unit_id) {
            self.camera_unit = None;
        }

        tracing::info!("Unit {} ({}) died, {} orders purged", unit_id, team, purged);
        self.events.publish(CombatEvent::UnitDied {
            unit: unit_id,
            team,
        });

        let remaining = self.roster.count(team);
        match team {
            Team::Blue if remaining == 0 => {
                tracing::info!("Party wiped out");
                self.events.publish(CombatEvent::GameEnded { won: false });
            }
            Team::Red if remaining == 0 && !self.in_boss_fight => {
                tracing::info!("Encounter cleared");
                self.events
                    .publish(CombatEvent::AiStageUnloaded { stage: 0 });
                self.try_phase(PhaseEvent::EncounterCleared);
            }
            Team::Red if remaining == 1 && self.in_boss_fight => {
                self.events.publish(CombatEvent::BossReenabled);
            }
            _ => {}
        }
        Ok(())
    }
}
