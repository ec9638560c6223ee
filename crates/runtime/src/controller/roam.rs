//! Free roam: movement resolves immediately, interactions fire on the spot.

use tactics_core::{CombatEnv, Position, UnitId};

use super::{CombatController, Intent};

impl CombatController {
    pub(super) fn handle_roam_intent(&mut self, env: &mut CombatEnv<'_>, intent: Intent) {
        match intent {
            Intent::Select => {
                if let Some(unit) = self.blue_unit_at(env, self.hover) {
                    self.selected = Some(unit);
                    self.camera_unit = Some(unit);
                }
            }
            Intent::ConfirmMoveOrAttack => {
                if let (Some(unit), Some(cell)) = (self.selected, self.hover) {
                    self.roam_to(env, unit, cell);
                }
            }
            Intent::Cancel => self.deselect(env),
            // No turns out of combat.
            Intent::EndTurn | Intent::ResetUnitActions => {}
        }
    }

    fn roam_to(&mut self, env: &mut CombatEnv<'_>, unit_id: UnitId, cell: Position) {
        let Some(from) = self.roster.get(unit_id).map(|unit| unit.cell()) else {
            return;
        };

        if env.grid.is_valid_move_target(cell) {
            env.grid.clear_occupant(from);
            env.effects.begin_move(unit_id, from, cell);
            self.roaming.insert(unit_id, cell);
            tracing::debug!("Unit {} roaming {} -> {}", unit_id, from, cell);
            self.deselect(env);
        } else if let Some(interactable) = env.grid.interactable(cell) {
            if interactable.is_in_range(cell, from) {
                env.effects.interact(unit_id, cell);
                tracing::debug!("Unit {} used interactable {}", unit_id, interactable.id);
                self.scan_triggers(env);
            }
            self.deselect(env);
        }
    }
}
