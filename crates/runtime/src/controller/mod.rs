//! The combat controller: one tick of selection, input and turn resolution.
//!
//! [`CombatController`] owns the phase machine, the roster, the order queue
//! and the event bus. The host calls [`tick`](CombatController::tick) once
//! per frame with the pointer position and the intents raised since the
//! last frame; collaborators (AI, movement animation, encounter loader)
//! report back through the other public methods.
//!
//! Submodules split the tick by concern:
//! - [`input`] maps intents to selections and committed actions in combat
//! - [`roam`] resolves movement immediately while out of combat
//! - [`triggers`] evaluates cell triggers under Blue units
//! - [`death`] purges a dead unit from every structure
//! - [`feedback`] publishes selection events and repaints highlights on change
mod death;
mod feedback;
mod input;
mod roam;
mod triggers;

use std::collections::{BTreeSet, HashMap};

use tactics_core::{
    Action, ActionKind, CombatConfig, CombatEnv, GridOracle, InitiativePolicy, OrderQueue,
    OrderQueueError, PhaseError, PhaseEvent, PhaseMachine, Position, Roster, Team, TurnPhase,
    Unit, UnitId, WorldPos,
};

use crate::config::RuntimeConfig;
use crate::edge::EdgeDetector;
use crate::error::{Result, RuntimeError};
use crate::events::{CombatEvent, EventBus};
use crate::execution::{StepOutcome, TurnExecution};
use crate::policy::RandomInitiative;

/// Discrete player intents, already decoded from device input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Pick the Blue unit under the pointer.
    Select,
    /// Move to, attack or interact with whatever is under the pointer.
    ConfirmMoveOrAttack,
    Cancel,
    EndTurn,
    ResetUnitActions,
}

/// Input gathered by the host for one tick.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer in world space; `None` when it is off screen.
    pub pointer: Option<WorldPos>,
    pub intents: Vec<Intent>,
}

impl TickInput {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn hover(pointer: WorldPos) -> Self {
        Self {
            pointer: Some(pointer),
            intents: Vec::new(),
        }
    }

    pub fn with_intent(mut self, intent: Intent) -> Self {
        self.intents.push(intent);
        self
    }
}

pub struct CombatController {
    config: CombatConfig,
    phase: PhaseMachine,
    roster: Roster,
    orders: OrderQueue,
    policy: Box<dyn InitiativePolicy + Send>,
    events: EventBus,
    edges: EdgeDetector,
    selected: Option<UnitId>,
    /// Last unit the camera followed; re-announced when a turn ends.
    camera_unit: Option<UnitId>,
    execution: Option<TurnExecution>,
    turn: u32,
    played_cutscenes: BTreeSet<u32>,
    in_boss_fight: bool,
    ai_turn_requested: bool,
    first_tick: bool,
    /// Free-roam moves started but not yet reported complete: unit to destination.
    roaming: HashMap<UnitId, Position>,
    hover: Option<Position>,
    pointer: Option<WorldPos>,
}

impl CombatController {
    pub fn builder() -> CombatControllerBuilder {
        CombatControllerBuilder::new()
    }

    // ===== per-tick driver =====

    /// Advances the controller by one host frame.
    pub fn tick(&mut self, env: &mut CombatEnv<'_>, input: &TickInput) {
        if self.first_tick {
            self.first_tick = false;
            self.scan_triggers(env);
        }

        if self.phase.phase().is_frozen() {
            self.freeze_feedback(env);
            return;
        }

        self.pointer = input.pointer;
        self.hover = input.pointer.and_then(|world| env.grid.cell_at(world));

        if self.execution.is_some() {
            self.step_execution(env);
        } else {
            match self.phase.phase() {
                TurnPhase::Waiting => self.settle(),
                TurnPhase::EndingTurn => self.hand_turn_to_ai(env),
                TurnPhase::OutOfCombat => {
                    for intent in &input.intents {
                        self.handle_roam_intent(env, *intent);
                    }
                }
                TurnPhase::Normal | TurnPhase::Boss | TurnPhase::UnitSelected => {
                    for intent in &input.intents {
                        self.handle_combat_intent(env, *intent);
                        if !matches!(
                            self.phase.phase(),
                            TurnPhase::Normal | TurnPhase::Boss | TurnPhase::UnitSelected
                        ) {
                            break;
                        }
                    }
                }
                TurnPhase::Cutscene | TurnPhase::Transition => {}
            }
        }

        if self.phase.phase().is_frozen() {
            self.freeze_feedback(env);
        } else {
            self.refresh_feedback(env);
        }
    }

    // ===== collaborator callbacks =====

    /// The AI has queued its orders: seal the queue and start resolving.
    pub fn acknowledge_ai_turn(&mut self) -> Result<()> {
        if self.execution.is_some() {
            return Err(RuntimeError::ExecutionInFlight);
        }
        let event = PhaseEvent::BeginExecution {
            in_boss_fight: self.in_boss_fight,
        };
        let from = self.phase.phase();
        if from.next(event).is_none() {
            return Err(PhaseError::IllegalTransition { from, event }.into());
        }
        self.orders.seal()?;
        self.apply_phase(event)?;
        self.execution = Some(TurnExecution::new());
        self.events
            .publish(CombatEvent::AiTurnAcknowledged { turn: self.turn });
        tracing::info!(
            "Turn {} resolving {} orders",
            self.turn,
            self.orders.len()
        );
        Ok(())
    }

    /// Queues an action on behalf of the AI (or any non-pointer driver).
    ///
    /// The action must start at the unit's anchor, be covered by the unit's
    /// action points and, for a move, not end on a cell another unit's
    /// queued move already claims. It is merged into the unit's order
    /// exactly like a player commit.
    pub fn submit_action(&mut self, action: Action) -> Result<()> {
        let phase = self.phase.phase();
        let unit_id = action.actor();
        if !phase.is_combat() || self.execution.is_some() {
            return Err(RuntimeError::NotAcceptingOrders { phase });
        }
        if self.orders.is_sealed() {
            return Err(OrderQueueError::Sealed { unit: unit_id }.into());
        }
        if action.kind() == ActionKind::Move
            && self
                .roster
                .claimed_cells(Some(unit_id))
                .contains(&action.destination().cell)
        {
            return Err(RuntimeError::CellClaimed {
                unit: unit_id,
                cell: action.destination().cell,
            });
        }
        let unit = self
            .roster
            .get_mut(unit_id)
            .ok_or(RuntimeError::UnknownUnit(unit_id))?;
        let anchor = unit.anchor();
        if action.origin().cell != anchor {
            return Err(RuntimeError::BrokenChain {
                unit: unit_id,
                origin: action.origin().cell,
                anchor,
            });
        }
        let cost = action.cost();
        let kind = action.kind();
        if !unit.queue_action(action) {
            return Err(RuntimeError::InsufficientActionPoints {
                unit: unit_id,
                cost,
            });
        }
        self.record_order(unit_id, kind, cost)
    }

    /// A free-roam move started out of combat has finished playing.
    pub fn complete_move(&mut self, env: &mut CombatEnv<'_>, unit: UnitId) -> Result<()> {
        let destination = self
            .roaming
            .remove(&unit)
            .ok_or(RuntimeError::NoPendingMove { unit })?;
        let from = self
            .roster
            .get(unit)
            .map(Unit::cell)
            .ok_or(RuntimeError::UnknownUnit(unit))?;
        self.place_unit(env.grid, unit, from, destination);
        self.scan_triggers(env);
        Ok(())
    }

    /// A queued action reported as in progress has finished playing.
    pub fn complete_action(&mut self, env: &mut CombatEnv<'_>, unit: UnitId) -> Result<()> {
        let execution = self.execution.as_mut().ok_or(RuntimeError::NoExecution)?;
        let action = execution
            .complete(unit, &mut self.orders)
            .ok_or(RuntimeError::NoPendingAction { unit })?;
        self.apply_resolved(env, &action);
        Ok(())
    }

    /// Adds an enemy wave to the roster and occupies its cells.
    pub fn load_enemies(
        &mut self,
        grid: &mut dyn GridOracle,
        enemies: impl IntoIterator<Item = Unit>,
    ) {
        let mut loaded = 0;
        for unit in enemies {
            if unit.team() != Team::Red {
                tracing::warn!("Ignoring non-enemy unit {} in enemy wave", unit.id());
                continue;
            }
            grid.set_occupant(unit.cell(), unit.id());
            self.roster.insert(unit);
            loaded += 1;
        }
        tracing::info!("Loaded {} enemies", loaded);
    }

    /// The encounter loader finished populating an AI stage: combat starts.
    pub fn stage_loaded(&mut self) -> Result<()> {
        self.apply_phase(PhaseEvent::StageLoaded)?;
        tracing::info!("Encounter started on turn {}", self.turn);
        Ok(())
    }

    /// The boss encounter is over.
    pub fn end_boss_stages(&mut self) -> Result<()> {
        self.apply_phase(PhaseEvent::BossEnded)?;
        self.in_boss_fight = false;
        self.events.publish(CombatEvent::BossEnded);
        tracing::info!("Boss encounter ended");
        Ok(())
    }

    /// Adds a Blue unit to the party. Units of other teams are ignored.
    pub fn add_to_team(&mut self, grid: &mut dyn GridOracle, unit: Unit) -> bool {
        if unit.team() != Team::Blue {
            return false;
        }
        grid.set_occupant(unit.cell(), unit.id());
        self.roster.insert(unit);
        true
    }

    /// Switches the selected unit's weapon. A no-op out of combat, while
    /// frozen, or with nothing selected.
    pub fn set_active_weapon(&mut self, slot: usize) {
        let phase = self.phase.phase();
        if phase.is_frozen() || phase == TurnPhase::OutOfCombat {
            return;
        }
        let Some(unit_id) = self.selected else {
            return;
        };
        let Some(weapon) = self
            .roster
            .get_mut(unit_id)
            .and_then(|unit| unit.set_active_weapon(slot))
        else {
            return;
        };
        let name = weapon.name.clone();
        self.events.publish(CombatEvent::WeaponChanged {
            unit: unit_id,
            slot,
            name,
        });
        self.edges.invalidate();
    }

    /// The cutscene or level load that froze the controller has finished.
    pub fn resume(&mut self) -> Result<()> {
        self.apply_phase(PhaseEvent::Resume)?;
        self.edges.invalidate();
        Ok(())
    }

    // ===== accessors =====

    pub fn phase(&self) -> TurnPhase {
        self.phase.phase()
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn selected(&self) -> Option<UnitId> {
        self.selected
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn orders(&self) -> &OrderQueue {
        &self.orders
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn execution(&self) -> Option<&TurnExecution> {
        self.execution.as_ref()
    }

    pub fn is_executing(&self) -> bool {
        self.execution.is_some()
    }

    pub fn in_boss_fight(&self) -> bool {
        self.in_boss_fight
    }

    pub fn played_cutscenes(&self) -> &BTreeSet<u32> {
        &self.played_cutscenes
    }

    // ===== internals =====

    /// Single entry point for phase changes. Illegal requests are dropped.
    fn apply_phase(&mut self, event: PhaseEvent) -> Result<()> {
        match self.phase.apply(event) {
            Ok(change) => {
                if change.from != change.to {
                    tracing::debug!("Phase {} -> {}", change.from, change.to);
                    self.events.publish(CombatEvent::PhaseChanged {
                        from: change.from,
                        to: change.to,
                    });
                }
                Ok(())
            }
            Err(err) => {
                tracing::debug!("{}", err);
                Err(err.into())
            }
        }
    }

    /// Like [`apply_phase`](Self::apply_phase) for callers that treat an
    /// illegal transition as a no-op.
    fn try_phase(&mut self, event: PhaseEvent) -> bool {
        self.apply_phase(event).is_ok()
    }

    fn blue_units_can_act(&self) -> bool {
        let minimum = self.config.min_action_points_to_act;
        self.roster
            .team_units(Team::Blue)
            .any(|unit| unit.has_action_points(minimum))
    }

    /// The tick after a commit: stay in selection while anyone can still act.
    fn settle(&mut self) {
        let units_have_action_points = self.blue_units_can_act();
        self.try_phase(PhaseEvent::Settle {
            units_have_action_points,
        });
    }

    /// Every tick in EndingTurn deselects; the AI is asked once per turn.
    fn hand_turn_to_ai(&mut self, env: &mut CombatEnv<'_>) {
        self.deselect(env);
        if !self.ai_turn_requested {
            self.ai_turn_requested = true;
            tracing::info!("Turn {} handed to the AI", self.turn);
            self.events
                .publish(CombatEvent::AiTurnRequested { turn: self.turn });
        }
    }

    fn step_execution(&mut self, env: &mut CombatEnv<'_>) {
        let Some(execution) = self.execution.as_mut() else {
            return;
        };
        let report = execution.step(&mut self.orders, &mut self.roster, env.effects);

        if let Some(unit_id) = report.dispatched
            && let Some(unit) = self.roster.get(unit_id)
        {
            self.camera_unit = Some(unit_id);
            self.events.publish(CombatEvent::UnitSelected {
                unit: unit_id,
                position: unit.cell(),
            });
            self.events.publish(CombatEvent::ActionPointsChanged {
                unit: Some(unit_id),
                remaining: Some(unit.action_points()),
            });
        }
        if let Some(action) = report.resolved {
            self.apply_resolved(env, &action);
        }
        if report.outcome == StepOutcome::Done {
            self.finish_turn(env);
        }
    }

    /// Applies the state change of an action whose effect has finished.
    fn apply_resolved(&mut self, env: &mut CombatEnv<'_>, action: &Action) {
        match action.kind() {
            ActionKind::Move => {
                let unit = action.actor();
                self.place_unit(env.grid, unit, action.origin().cell, action.destination().cell);
                self.scan_triggers(env);
            }
            ActionKind::Interact => self.scan_triggers(env),
            ActionKind::Attack(_) => {}
        }
    }

    /// Moves a unit's occupancy and live cell, announcing the move.
    fn place_unit(
        &mut self,
        grid: &mut dyn GridOracle,
        unit_id: UnitId,
        from: Position,
        to: Position,
    ) {
        let Some(unit) = self.roster.get_mut(unit_id) else {
            tracing::warn!("Resolved move for unit {} which is gone", unit_id);
            return;
        };
        if grid.occupant(from) == Some(unit_id) {
            grid.clear_occupant(from);
        }
        grid.set_occupant(to, unit_id);
        unit.relocate(to);
        self.events.publish(CombatEvent::UnitMoved {
            unit: unit_id,
            from,
            to,
        });
    }

    /// Shared end-of-turn reset once the order queue has drained.
    fn finish_turn(&mut self, env: &mut CombatEnv<'_>) {
        self.execution = None;
        self.orders.clear();
        for unit in self.roster.iter_mut() {
            let leftover = unit.reset_actions();
            if !leftover.is_empty() {
                tracing::warn!(
                    "Unit {} ended the turn with {} unresolved actions",
                    unit.id(),
                    leftover.len()
                );
            }
            unit.reset_turn();
        }
        self.turn += 1;
        self.ai_turn_requested = false;
        tracing::info!("Turn ended; now turn {}", self.turn);
        self.events.publish(CombatEvent::TurnEnded { turn: self.turn });

        if let Some(unit_id) = self.camera_unit
            && let Some(unit) = self.roster.get(unit_id)
        {
            self.events.publish(CombatEvent::UnitSelected {
                unit: unit_id,
                position: unit.cell(),
            });
        }
        self.edges.invalidate();
        self.scan_triggers(env);
    }
}

/// Assembles a [`CombatController`].
pub struct CombatControllerBuilder {
    config: RuntimeConfig,
    policy: Option<Box<dyn InitiativePolicy + Send>>,
    events: Option<EventBus>,
    party: Vec<Unit>,
    initial_phase: TurnPhase,
}

impl CombatControllerBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            policy: None,
            events: None,
            party: Vec::new(),
            initial_phase: TurnPhase::OutOfCombat,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the random initiative draw, e.g. with a deterministic policy in tests.
    pub fn policy(mut self, policy: impl InitiativePolicy + Send + 'static) -> Self {
        self.policy = Some(Box::new(policy));
        self
    }

    /// Share an existing bus instead of creating one.
    pub fn events(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    pub fn party(mut self, units: impl IntoIterator<Item = Unit>) -> Self {
        self.party.extend(units);
        self
    }

    /// Start somewhere other than free roam, e.g. directly in combat.
    pub fn initial_phase(mut self, phase: TurnPhase) -> Self {
        self.initial_phase = phase;
        self
    }

    /// Builds the controller and places the party on `grid`.
    pub fn build(self, grid: &mut dyn GridOracle) -> CombatController {
        let combat = self.config.combat;
        let policy = self
            .policy
            .unwrap_or_else(|| Box::new(RandomInitiative::from_config(&combat)));
        let events = self
            .events
            .unwrap_or_else(|| EventBus::with_capacity(self.config.event_buffer_size));

        let mut controller = CombatController {
            turn: combat.first_turn,
            config: combat,
            phase: PhaseMachine::new(self.initial_phase),
            roster: Roster::new(),
            orders: OrderQueue::new(),
            policy,
            events,
            edges: EdgeDetector::new(),
            selected: None,
            camera_unit: None,
            execution: None,
            played_cutscenes: BTreeSet::new(),
            in_boss_fight: self.initial_phase == TurnPhase::Boss,
            ai_turn_requested: false,
            first_tick: true,
            roaming: HashMap::new(),
            hover: None,
            pointer: None,
        };
        for unit in self.party {
            let id = unit.id();
            if !controller.add_to_team(grid, unit) {
                tracing::warn!("Ignoring non-party unit {} in party", id);
            }
        }
        controller
    }
}
