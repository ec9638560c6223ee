//! Selection events, cursor and highlight repaints, all edge-triggered.

use tactics_core::{ActionKind, CombatEnv, HighlightLayer, Team, TurnPhase, Unit, UnitId};

use super::CombatController;
use crate::edge::FrameSample;
use crate::events::{CombatEvent, CursorKind};
use crate::highlight;

impl CombatController {
    pub(super) fn refresh_feedback(&mut self, env: &mut CombatEnv<'_>) {
        let phase = self.phase.phase();
        let selected = self.selected.and_then(|id| self.roster.get(id));
        let sample = FrameSample {
            hover: self.hover,
            unit: selected.map(Unit::id),
            action_count: selected.map_or(0, Unit::pending_actions),
            anchor: selected.map(Unit::anchor),
            action_points: selected.map(Unit::action_points),
            cursor: self.cursor_for(env, phase),
            phase,
        };
        let diff = self.edges.observe(sample);

        if diff.hover_changed {
            highlight::paint_selector(env.highlights, diff.previous_hover, sample.hover);
        }
        if diff.cursor_changed {
            self.events.publish(CombatEvent::CursorChanged {
                cursor: sample.cursor,
            });
        }

        let (Some(unit_id), Some(anchor)) = (sample.unit, sample.anchor) else {
            return;
        };
        if diff.selection_changed() {
            self.events.publish(CombatEvent::UnitSelected {
                unit: unit_id,
                position: anchor,
            });
            self.events.publish(CombatEvent::ActionPointsChanged {
                unit: Some(unit_id),
                remaining: sample.action_points,
            });
            self.paint_ranges(env, unit_id, phase);
        }
        if diff.selection_changed() || diff.hover_changed {
            self.paint_arrows(env, unit_id);
        }
    }

    /// Cutscene or transition: plain cursor, no selector.
    pub(super) fn freeze_feedback(&mut self, env: &mut CombatEnv<'_>) {
        let sample = FrameSample {
            hover: None,
            unit: self.selected,
            action_count: 0,
            anchor: None,
            action_points: None,
            cursor: CursorKind::Arrow,
            phase: self.phase.phase(),
        };
        let diff = self.edges.observe(sample);
        if diff.hover_changed {
            env.highlights.clear_layer(HighlightLayer::Selector);
        }
        if diff.cursor_changed {
            self.events.publish(CombatEvent::CursorChanged {
                cursor: CursorKind::Arrow,
            });
        }
    }

    /// Attack beats Move beats Select; anything else is the plain arrow.
    fn cursor_for(&self, env: &CombatEnv<'_>, phase: TurnPhase) -> CursorKind {
        let Some(cell) = self.hover else {
            return CursorKind::Arrow;
        };
        let occupant = env
            .grid
            .occupant(cell)
            .and_then(|id| self.roster.get(id));
        let selected = self.selected.and_then(|id| self.roster.get(id));

        if phase == TurnPhase::UnitSelected
            && let (Some(unit), Some(target)) = (selected, occupant)
            && target.team() != unit.team()
            && unit.can_attack(target.cell(), unit.anchor())
        {
            CursorKind::Attack
        } else if selected.is_some()
            && matches!(phase, TurnPhase::UnitSelected | TurnPhase::OutOfCombat)
            && env.grid.is_valid_move_target(cell)
        {
            CursorKind::Move
        } else if occupant.is_some_and(|unit| unit.team() == Team::Blue)
            && matches!(
                phase,
                TurnPhase::Normal
                    | TurnPhase::Boss
                    | TurnPhase::UnitSelected
                    | TurnPhase::OutOfCombat
            )
        {
            CursorKind::Select
        } else {
            CursorKind::Arrow
        }
    }

    fn paint_ranges(&mut self, env: &mut CombatEnv<'_>, unit_id: UnitId, phase: TurnPhase) {
        let Some(unit) = self.roster.get(unit_id) else {
            return;
        };
        let anchor = unit.anchor();
        let claimed = self.roster.claimed_cells(Some(unit_id));
        match phase {
            TurnPhase::UnitSelected => {
                highlight::paint_move_range(
                    env.grid,
                    env.paths,
                    env.highlights,
                    anchor,
                    unit.max_move_distance(),
                    &claimed,
                );
                if unit.can_afford_attack() {
                    let range = unit.attack().range;
                    highlight::paint_attack_range(env.grid, env.highlights, anchor, range);
                } else {
                    env.highlights.clear_layer(HighlightLayer::AttackRange);
                }
            }
            TurnPhase::OutOfCombat => {
                highlight::paint_move_range(
                    env.grid,
                    env.paths,
                    env.highlights,
                    anchor,
                    unit.max_move_distance(),
                    &claimed,
                );
            }
            _ => {}
        }
    }

    /// Committed moves plus a preview to the hovered cell.
    fn paint_arrows(&mut self, env: &mut CombatEnv<'_>, unit_id: UnitId) {
        env.highlights.clear_layer(HighlightLayer::Arrow);
        let Some(unit) = self.roster.get(unit_id) else {
            return;
        };
        for action in unit
            .actions()
            .iter()
            .filter(|action| action.kind() == ActionKind::Move)
        {
            let origin = action.origin().cell;
            let path = env.paths.path(origin, action.destination().cell);
            highlight::paint_arrow(env.highlights, &highlight::plan_arrow(origin, &path));
        }
        if let Some(cell) = self.hover
            && env.grid.is_valid_move_target(cell)
        {
            let anchor = unit.anchor();
            let path = env.paths.path(anchor, cell);
            highlight::paint_arrow(env.highlights, &highlight::plan_arrow(anchor, &path));
        }
    }
}
