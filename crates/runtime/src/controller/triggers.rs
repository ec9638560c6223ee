//! Cell triggers under Blue units.
//!
//! Scanned on the first tick, after a move or interaction resolves, after a
//! free-roam move completes and at the end of every turn.

use tactics_core::{CellTrigger, CombatEnv, PhaseEvent, Position, Team, TurnPhase};

use super::CombatController;
use crate::events::CombatEvent;

impl CombatController {
    pub(super) fn scan_triggers(&mut self, env: &mut CombatEnv<'_>) {
        let cells: Vec<Position> = self
            .roster
            .team_units(Team::Blue)
            .map(|unit| unit.cell())
            .collect();

        for cell in &cells {
            match env.grid.trigger(*cell) {
                Some(CellTrigger::Cutscene { index }) => self.trigger_cutscene(index),
                Some(CellTrigger::Combat { index }) => {
                    tracing::debug!("Combat trigger at {} requests stage {}", cell, index);
                    self.events
                        .publish(CombatEvent::AiStageLoadRequested { stage: index });
                }
                None => {}
            }
        }

        if self.phase.phase() != TurnPhase::Transition
            && let Some(transition) = cells
                .iter()
                .find_map(|cell| env.grid.level_transition(*cell))
        {
            tracing::info!(
                "Level transition {} -> {}",
                transition.current_level,
                transition.next_level
            );
            self.events.publish(CombatEvent::LevelTransitionStarted {
                current_level: transition.current_level,
                next_level: transition.next_level,
                cutscene_index: transition.cutscene_index,
            });
            self.deselect(env);
            self.try_phase(PhaseEvent::LevelTransition);
        }

        if !self.in_boss_fight
            && !self.phase.phase().is_frozen()
            && cells
                .iter()
                .any(|cell| env.grid.boss_trigger(*cell).is_some())
        {
            self.deselect(env);
            if self.try_phase(PhaseEvent::BossStarted) {
                self.in_boss_fight = true;
                tracing::info!("Boss encounter started");
                self.events.publish(CombatEvent::BossStarted);
            }
        }
    }

    /// Cutscenes play once each, and only out of combat.
    fn trigger_cutscene(&mut self, index: u32) {
        if self.phase.phase() != TurnPhase::OutOfCombat || self.played_cutscenes.contains(&index) {
            return;
        }
        self.played_cutscenes.insert(index);
        tracing::info!("Cutscene {} triggered", index);
        self.events.publish(CombatEvent::CutsceneTriggered { index });
        self.try_phase(PhaseEvent::CutsceneTriggered);
    }
}
