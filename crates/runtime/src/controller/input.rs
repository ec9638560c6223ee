use tactics_core::{
    Action, ActionKind, CombatEnv, CostContribution, HighlightLayer, Interactable, PhaseEvent,
    Position, Team, TurnPhase, UnitId, Waypoint,
};

use super::{CombatController, Intent};
use crate::error::Result;
use crate::events::CombatEvent;
use crate::highlight;

impl CombatController {
    pub(super) fn handle_combat_intent(&mut self, env: &mut CombatEnv<'_>, intent: Intent) {
        match intent {
            Intent::Select => {
                if let Some(unit) = self.blue_unit_at(env, self.hover) {
                    self.select_unit(unit);
                }
            }
            Intent::ConfirmMoveOrAttack => {
                if self.phase.phase() == TurnPhase::UnitSelected
                    && let Some(cell) = self.hover
                {
                    self.commit(env, cell);
                }
            }
            Intent::Cancel => {
                if self.phase.phase() == TurnPhase::UnitSelected {
                    self.deselect(env);
                    let in_boss_fight = self.in_boss_fight;
                    self.try_phase(PhaseEvent::Deselect { in_boss_fight });
                }
            }
            Intent::EndTurn => {
                if self.try_phase(PhaseEvent::EndTurn) {
                    tracing::debug!("Player ended turn {}", self.turn);
                }
            }
            Intent::ResetUnitActions => self.reset_selected(env),
        }
    }

    /// Blue unit standing on `cell`, if any.
    pub(super) fn blue_unit_at(
        &self,
        env: &CombatEnv<'_>,
        cell: Option<Position>,
    ) -> Option<UnitId> {
        let occupant = env.grid.occupant(cell?)?;
        self.roster
            .get(occupant)
            .filter(|unit| unit.team() == Team::Blue)
            .map(|unit| unit.id())
    }

    fn select_unit(&mut self, unit: UnitId) {
        if !self.try_phase(PhaseEvent::SelectUnit) {
            return;
        }
        if self.selected != Some(unit) {
            tracing::debug!("Selected unit {}", unit);
        }
        self.selected = Some(unit);
        self.camera_unit = Some(unit);
    }

    /// Drops the selection and its highlights. Phase changes are the caller's.
    pub(super) fn deselect(&mut self, env: &mut CombatEnv<'_>) {
        let Some(unit) = self.selected.take() else {
            return;
        };
        highlight::clear_ranges(env.grid, env.highlights);
        self.events.publish(CombatEvent::ActionPointsChanged {
            unit: None,
            remaining: None,
        });
        self.events.publish(CombatEvent::UnitDeselected);
        self.edges.invalidate();
        tracing::debug!("Deselected unit {}", unit);
    }

    /// Confirm under the pointer: move, attack or interact, first match wins.
    fn commit(&mut self, env: &mut CombatEnv<'_>, cell: Position) {
        let Some(unit_id) = self.selected else {
            return;
        };
        let Some(anchor) = self.roster.get(unit_id).map(|unit| unit.anchor()) else {
            return;
        };

        if env.grid.is_valid_move_target(cell) {
            self.commit_move(env, unit_id, anchor, cell);
        } else if let Some(target) = env.grid.occupant(cell)
            && self
                .roster
                .get(target)
                .is_some_and(|unit| unit.team() != Team::Blue)
        {
            self.commit_attack(env, unit_id, anchor, target, cell);
        } else if let Some(interactable) = env.grid.interactable(cell)
            && interactable.is_in_range(cell, anchor)
        {
            self.commit_interact(env, unit_id, anchor, cell, interactable);
        }
    }

    fn commit_move(
        &mut self,
        env: &mut CombatEnv<'_>,
        unit_id: UnitId,
        anchor: Position,
        cell: Position,
    ) {
        if self.roster.claimed_cells(Some(unit_id)).contains(&cell) {
            tracing::debug!("Cell {} is already claimed by a queued move", cell);
            return;
        }
        let path = env.paths.path(anchor, cell);
        let cost = self.config.move_cost(path.len());
        if cost == 0 {
            tracing::debug!("No path from {} to {}", anchor, cell);
            return;
        }
        let origin = Waypoint::new(anchor, env.grid.world_of(anchor));
        let destination = Waypoint::new(
            cell,
            self.pointer.unwrap_or_else(|| env.grid.world_of(cell)),
        );
        let action = Action::movement(unit_id, origin, destination, cost);
        if !self.queue_for(unit_id, action) {
            return;
        }
        self.try_phase(PhaseEvent::CommitAction);
        highlight::clear_ranges(env.grid, env.highlights);
        self.record_commit(unit_id, ActionKind::Move, cost);
    }

    fn commit_attack(
        &mut self,
        env: &mut CombatEnv<'_>,
        unit_id: UnitId,
        anchor: Position,
        target: UnitId,
        cell: Position,
    ) {
        let Some(unit) = self.roster.get(unit_id) else {
            return;
        };
        if !unit.can_attack(cell, anchor) {
            tracing::debug!("Unit {} cannot reach {} from {}", unit_id, cell, anchor);
            return;
        }
        let profile = unit.attack();
        let (cost, style) = (profile.cost, profile.style);
        let at = Waypoint::new(anchor, env.grid.world_of(anchor));
        let action = Action::attack(unit_id, at, target, style, cost);
        if !self.queue_for(unit_id, action) {
            return;
        }
        self.try_phase(PhaseEvent::CommitAction);
        highlight::clear_ranges(env.grid, env.highlights);
        self.record_commit(unit_id, ActionKind::Attack(style), cost);
    }

    /// Interacting ends the turn outright.
    fn commit_interact(
        &mut self,
        env: &mut CombatEnv<'_>,
        unit_id: UnitId,
        anchor: Position,
        cell: Position,
        interactable: Interactable,
    ) {
        let origin = Waypoint::new(anchor, env.grid.world_of(anchor));
        let destination = Waypoint::new(cell, env.grid.world_of(cell));
        let action = Action::interact(unit_id, origin, destination, interactable.cost);
        if !self.queue_for(unit_id, action) {
            return;
        }
        self.try_phase(PhaseEvent::CommitFinalAction);
        highlight::clear_ranges(env.grid, env.highlights);
        self.record_commit(unit_id, ActionKind::Interact, interactable.cost);
    }

    fn queue_for(&mut self, unit_id: UnitId, action: Action) -> bool {
        let cost = action.cost();
        let queued = self
            .roster
            .get_mut(unit_id)
            .is_some_and(|unit| unit.queue_action(action));
        if !queued {
            tracing::debug!("Unit {} cannot afford {} action points", unit_id, cost);
        }
        queued
    }

    /// Player commits only happen while the queue is open, so a rejection
    /// here means the controller's own bookkeeping is broken.
    fn record_commit(&mut self, unit: UnitId, kind: ActionKind, cost: u32) {
        let result = self.record_order(unit, kind, cost);
        debug_assert!(result.is_ok(), "player commit rejected: {result:?}");
        if let Err(err) = result {
            tracing::error!("Dropped order for unit {}: {}", unit, err);
        }
    }

    /// Merges an already-queued action into its unit's order.
    pub(super) fn record_order(&mut self, unit: UnitId, kind: ActionKind, cost: u32) -> Result<()> {
        let contribution = match kind {
            ActionKind::Move => CostContribution::movement(cost),
            ActionKind::Attack(_) => CostContribution::attack(cost),
            ActionKind::Interact => CostContribution::interaction(cost),
        };
        let order = self
            .orders
            .record(unit, contribution, self.policy.as_mut())?;
        let (total_cost, initiative) = (order.total_cost(), order.initiative());
        tracing::debug!(
            "Unit {} queued {} (cost {}, total {}, initiative {})",
            unit,
            kind.as_str(),
            cost,
            total_cost,
            initiative
        );
        self.events.publish(CombatEvent::ActionQueued {
            unit,
            kind,
            cost,
            total_cost,
            initiative,
        });
        Ok(())
    }

    /// Drops the selected unit's queued actions. The unit's order stays
    /// queued and is skipped at execution.
    fn reset_selected(&mut self, env: &mut CombatEnv<'_>) {
        let Some(unit_id) = self.selected else {
            return;
        };
        if self.orders.is_sealed() {
            return;
        }
        let Some(unit) = self.roster.get_mut(unit_id) else {
            return;
        };
        let dropped = unit.reset_actions();
        if dropped.is_empty() {
            return;
        }
        tracing::debug!("Unit {} reset {} queued actions", unit_id, dropped.len());
        env.highlights.clear_layer(HighlightLayer::Arrow);
    }
}
