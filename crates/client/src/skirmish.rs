//! Frame loop for one scripted skirmish.
//!
//! Each frame the pilot produces input, the controller ticks, casualties and
//! finished walks are reported back, and every published event is printed
//! as a JSON line and handled the way an encounter loader, AI and cutscene
//! player would.

use std::collections::BTreeSet;
use std::fmt;

use anyhow::Result;
use tactics_content::{EncounterData, TriggerSpec};
use tactics_core::{CellTrigger, CombatConfig, TurnPhase};
use tactics_runtime::{
    ApproachAndStrike, CombatController, CombatEvent, EventBus, RuntimeConfig,
};
use tokio::sync::broadcast::{self, error::TryRecvError};

use crate::pilot::Pilot;
use crate::table::Table;

/// How a skirmish ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Victory,
    Defeat,
    /// A level transition took the party elsewhere.
    LevelExit,
    Draw,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Outcome::Victory => "victory",
            Outcome::Defeat => "defeat",
            Outcome::LevelExit => "level_exit",
            Outcome::Draw => "draw",
        };
        f.write_str(label)
    }
}

pub struct Skirmish {
    encounter: EncounterData,
    table: Table,
    controller: CombatController,
    pilot: Pilot,
    ai: ApproachAndStrike,
    events: broadcast::Receiver<CombatEvent>,
    loaded_stages: BTreeSet<u32>,
    max_turns: u32,
}

impl Skirmish {
    pub const MAX_FRAMES_PER_TURN: u32 = 500;

    pub fn new(encounter: EncounterData, combat: CombatConfig, max_turns: u32) -> Self {
        let mut table = Table::from_encounter(&encounter);
        let bus = EventBus::new();
        let events = bus.subscribe_all();
        let controller = CombatController::builder()
            .config(RuntimeConfig::new(combat))
            .events(bus)
            .party(encounter.party.iter().cloned())
            .build(&mut table.grid);
        let goal = encounter.triggers.iter().find_map(|(cell, trigger)| {
            matches!(trigger, TriggerSpec::Cell(CellTrigger::Combat { .. })).then_some(*cell)
        });

        Self {
            encounter,
            table,
            controller,
            pilot: Pilot::new(goal),
            ai: ApproachAndStrike,
            events,
            loaded_stages: BTreeSet::new(),
            max_turns,
        }
    }

    pub async fn run(mut self) -> Result<Outcome> {
        let frame_limit = self.max_turns.saturating_mul(Self::MAX_FRAMES_PER_TURN);
        for frame in 0..frame_limit {
            let input = self
                .pilot
                .next_input(&self.controller, &self.table.grid, &self.table.paths);
            self.controller.tick(&mut self.table.env(), &input);

            for unit in self.table.effects.take_casualties() {
                self.controller.unit_died(&mut self.table.env(), unit)?;
            }
            for unit in self.table.effects.take_finished_walks() {
                self.controller.complete_move(&mut self.table.env(), unit)?;
            }

            if let Some(outcome) = self.handle_events()? {
                tracing::info!("Skirmish over after {} frames: {}", frame + 1, outcome);
                self.report_survivors();
                return Ok(outcome);
            }
            if self.controller.turn() > self.max_turns {
                break;
            }
            tokio::task::yield_now().await;
        }
        tracing::warn!("Turn limit of {} reached", self.max_turns);
        Ok(Outcome::Draw)
    }

    fn handle_events(&mut self) -> Result<Option<Outcome>> {
        let mut outcome = None;
        for event in self.drain_events() {
            println!("{}", serde_json::to_string(&event)?);
            match event {
                CombatEvent::AiStageLoadRequested { stage } => self.load_stage(stage)?,
                CombatEvent::AiTurnRequested { .. } => {
                    self.ai
                        .take_turn(&mut self.controller, &self.table.grid, &self.table.paths)?;
                }
                CombatEvent::TurnEnded { .. } => self.pilot.turn_ended(),
                CombatEvent::CutsceneTriggered { index } => {
                    tracing::info!("Cutscene {} skipped", index);
                    self.controller.resume()?;
                }
                CombatEvent::LevelTransitionStarted { .. } => {
                    outcome.get_or_insert(Outcome::LevelExit);
                }
                CombatEvent::GameEnded { won } => {
                    outcome = Some(if won { Outcome::Victory } else { Outcome::Defeat });
                }
                CombatEvent::AiStageUnloaded { .. } => {
                    outcome.get_or_insert(Outcome::Victory);
                }
                _ => {}
            }
        }
        Ok(outcome)
    }

    fn load_stage(&mut self, stage: u32) -> Result<()> {
        if self.controller.phase() != TurnPhase::OutOfCombat || !self.loaded_stages.insert(stage) {
            return Ok(());
        }
        let Some(enemies) = self.encounter.stage(stage) else {
            tracing::warn!("Encounter has no stage {}", stage);
            return Ok(());
        };
        self.controller
            .load_enemies(&mut self.table.grid, enemies.iter().cloned());
        self.controller.stage_loaded()?;
        Ok(())
    }

    fn report_survivors(&self) {
        for unit in self.controller.roster().iter() {
            let hit_points = self.table.effects.hit_points(unit.id()).unwrap_or(0);
            tracing::info!(
                "{} unit {} at {}: {} hp, {} ap",
                unit.team(),
                unit.id(),
                unit.cell(),
                hit_points,
                unit.action_points()
            );
        }
    }

    /// Everything published since the last frame, in publication order.
    fn drain_events(&mut self) -> Vec<CombatEvent> {
        let mut events = Vec::new();
        loop {
            match self.events.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!("Dropped {} events", skipped);
                }
                Err(_) => break,
            }
        }
        events
    }
}
