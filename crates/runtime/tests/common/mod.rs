//! Shared harness: a controller wired to the in-memory collaborators.
#![allow(dead_code)]

use tactics_core::{
    AttackProfile, AttackStyle, CombatEnv, FixedInitiative, GridDimensions, Position, Team,
    TurnPhase, Unit, UnitId,
};
use tactics_runtime::{
    ApproachAndStrike, BfsPathfinder, CombatController, CombatControllerBuilder, CombatEvent,
    HighlightLog, InMemoryGrid, Intent, RecordingEffects, Result, TickInput, Topic,
};
use tokio::sync::broadcast::{self, error::TryRecvError};

pub struct Arena {
    pub grid: InMemoryGrid,
    pub paths: BfsPathfinder,
    pub highlights: HighlightLog,
    pub effects: RecordingEffects,
    pub controller: CombatController,
}

impl Arena {
    pub fn new(
        mut grid: InMemoryGrid,
        paths: BfsPathfinder,
        builder: CombatControllerBuilder,
    ) -> Self {
        let controller = builder.build(&mut grid);
        Self {
            grid,
            paths,
            highlights: HighlightLog::new(),
            effects: RecordingEffects::new(),
            controller,
        }
    }

    /// Open grid in combat with a fixed initiative of 1 for every order.
    pub fn combat(width: u32, height: u32, party: Vec<Unit>) -> Self {
        let dims = GridDimensions::new(width, height);
        Self::new(
            InMemoryGrid::new(dims),
            BfsPathfinder::open(dims),
            CombatController::builder()
                .policy(FixedInitiative(1))
                .party(party)
                .initial_phase(TurnPhase::Normal),
        )
    }

    pub fn tick(&mut self, input: TickInput) {
        let mut env = CombatEnv::new(
            &mut self.grid,
            &self.paths,
            &mut self.highlights,
            &mut self.effects,
        );
        self.controller.tick(&mut env, &input);
    }

    pub fn idle(&mut self) {
        self.tick(TickInput::idle());
    }

    pub fn hover(&mut self, cell: Position) {
        let pointer = self.grid.center_of(cell);
        self.tick(TickInput::hover(pointer));
    }

    pub fn press(&mut self, cell: Position, intent: Intent) {
        let pointer = self.grid.center_of(cell);
        self.tick(TickInput::hover(pointer).with_intent(intent));
    }

    /// Select `unit_cell`, confirm on `target`, then let the commit settle.
    pub fn commit(&mut self, unit_cell: Position, target: Position) {
        self.press(unit_cell, Intent::Select);
        self.press(target, Intent::ConfirmMoveOrAttack);
        self.idle();
    }

    pub fn end_turn(&mut self) {
        self.tick(TickInput::idle().with_intent(Intent::EndTurn));
        self.idle();
    }

    pub fn run_ai(&mut self) -> Result<usize> {
        ApproachAndStrike.take_turn(&mut self.controller, &self.grid, &self.paths)
    }

    /// Ticks until the execution pass ends. Returns the ticks it took.
    pub fn drain(&mut self) -> usize {
        let mut ticks = 0;
        while self.controller.is_executing() && ticks < 100 {
            self.idle();
            ticks += 1;
        }
        ticks
    }

    pub fn unit_died(&mut self, unit: UnitId) -> Result<()> {
        let mut env = CombatEnv::new(
            &mut self.grid,
            &self.paths,
            &mut self.highlights,
            &mut self.effects,
        );
        self.controller.unit_died(&mut env, unit)
    }

    pub fn complete_move(&mut self, unit: UnitId) -> Result<()> {
        let mut env = CombatEnv::new(
            &mut self.grid,
            &self.paths,
            &mut self.highlights,
            &mut self.effects,
        );
        self.controller.complete_move(&mut env, unit)
    }

    pub fn complete_action(&mut self, unit: UnitId) -> Result<()> {
        let mut env = CombatEnv::new(
            &mut self.grid,
            &self.paths,
            &mut self.highlights,
            &mut self.effects,
        );
        self.controller.complete_action(&mut env, unit)
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<CombatEvent> {
        self.controller.events().subscribe(topic)
    }
}

pub fn soldier(id: u32, team: Team, cell: (i32, i32), action_points: u32) -> Unit {
    Unit::new(
        UnitId(id),
        team,
        Position::new(cell.0, cell.1),
        action_points,
        AttackProfile::new("sword", 1, 3, AttackStyle::Melee),
    )
}

pub fn at(x: i32, y: i32) -> Position {
    Position::new(x, y)
}

/// Everything published on a receiver so far.
pub fn drain_events(rx: &mut broadcast::Receiver<CombatEvent>) -> Vec<CombatEvent> {
    let mut events = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(event) => events.push(event),
            Err(TryRecvError::Lagged(_)) => continue,
            Err(_) => break,
        }
    }
    events
}
