//! Stepped end-of-turn resolution.
//!
//! [`TurnExecution`] drains a sealed [`OrderQueue`] one action per
//! [`step`](TurnExecution::step), charging each action's cost to its actor
//! as it is dispatched. The host calls `step` once per tick, which
//! is the cooperative yield point between actions. An effect that reports
//! [`EffectStatus::InProgress`] stalls stepping until
//! [`complete`](TurnExecution::complete) is called for its actor.

use tactics_core::{Action, ActionEffects, EffectStatus, OrderQueue, Roster, UnitId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// More work remains; call `step` again next tick.
    Continue,
    /// The queue is drained and nothing is in flight.
    Done,
}

/// What one step did.
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub outcome: StepOutcome,
    /// Unit whose action was dispatched this step.
    pub dispatched: Option<UnitId>,
    /// Action whose effect finished this step; its state changes are due.
    pub resolved: Option<Action>,
    /// Units whose orders were dequeued without executing anything.
    pub skipped: Vec<UnitId>,
    /// Nothing happened because an earlier effect is still playing.
    pub stalled: bool,
}

impl StepReport {
    fn new(outcome: StepOutcome) -> Self {
        Self {
            outcome,
            dispatched: None,
            resolved: None,
            skipped: Vec::new(),
            stalled: false,
        }
    }
}

/// One in-flight resolution pass. Holds no borrowed state between steps.
#[derive(Debug, Default)]
pub struct TurnExecution {
    awaiting: Option<Action>,
    steps: usize,
}

impl TurnExecution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `step` calls made so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Action whose effect has not reported completion yet.
    pub fn awaiting(&self) -> Option<&Action> {
        self.awaiting.as_ref()
    }

    pub fn step(
        &mut self,
        orders: &mut OrderQueue,
        roster: &mut Roster,
        effects: &mut dyn ActionEffects,
    ) -> StepReport {
        self.steps += 1;

        if self.awaiting.is_some() {
            let mut report = StepReport::new(StepOutcome::Continue);
            report.stalled = true;
            return report;
        }

        let mut report = StepReport::new(StepOutcome::Continue);
        report.skipped = discard_spent(orders, roster);

        let Some(head) = orders.peek_mut() else {
            report.outcome = StepOutcome::Done;
            return report;
        };
        let unit_id = head.unit();
        // discard_spent guarantees the head's unit exists and has a pending action.
        let Some(unit) = roster.get_mut(unit_id) else {
            return report;
        };
        let Some(action) = unit.pop_action() else {
            return report;
        };
        unit.spend_action_points(action.cost());
        unit.mark_acted();
        head.mark_executed();
        if unit.pending_actions() == 0 {
            head.mark_complete();
        }
        report.dispatched = Some(unit_id);

        match effects.execute(&action) {
            EffectStatus::Finished => {
                finish_head(orders);
                report.resolved = Some(action);
                report.skipped.extend(discard_spent(orders, roster));
                if orders.is_empty() {
                    report.outcome = StepOutcome::Done;
                }
            }
            EffectStatus::InProgress => {
                self.awaiting = Some(action);
            }
        }
        report
    }

    /// Resolves the stalled action of `unit`. Returns the action so the
    /// caller can apply its state changes, or `None` when `unit` has nothing
    /// in flight.
    pub fn complete(&mut self, unit: UnitId, orders: &mut OrderQueue) -> Option<Action> {
        if self.awaiting.as_ref().map(Action::actor) != Some(unit) {
            return None;
        }
        let action = self.awaiting.take()?;
        if orders.peek().map(|order| order.unit()) == Some(unit) {
            finish_head(orders);
        }
        Some(action)
    }

    /// Drops any in-flight action of a unit that left the fight.
    pub fn forget(&mut self, unit: UnitId) -> bool {
        if self.awaiting.as_ref().map(Action::actor) == Some(unit) {
            self.awaiting = None;
            return true;
        }
        false
    }
}

/// The head's current action is done: ready it for the next one, or
/// dequeue it when it has none left.
fn finish_head(orders: &mut OrderQueue) {
    let Some(head) = orders.peek_mut() else {
        return;
    };
    head.mark_ready();
    if head.is_complete() {
        orders.dequeue();
    }
}

/// Completes and dequeues head orders whose unit has nothing left to do.
fn discard_spent(orders: &mut OrderQueue, roster: &Roster) -> Vec<UnitId> {
    let mut skipped = Vec::new();
    while let Some(head) = orders.peek_mut() {
        let unit = head.unit();
        let pending = roster.get(unit).map_or(0, |unit| unit.pending_actions());
        if pending > 0 {
            break;
        }
        if !roster.contains(unit) {
            tracing::warn!("order for unit {} has no unit on the roster", unit);
        }
        head.mark_complete();
        orders.dequeue();
        skipped.push(unit);
    }
    skipped
}

#[cfg(test)]
mod tests {
    use tactics_core::{
        AttackProfile, AttackStyle, CostContribution, FixedInitiative, Position, Team, Unit,
        Waypoint, WorldPos,
    };

    use super::*;

    struct Recorder {
        executed: Vec<UnitId>,
        defer: bool,
    }

    impl ActionEffects for Recorder {
        fn execute(&mut self, action: &Action) -> EffectStatus {
            self.executed.push(action.actor());
            if self.defer {
                EffectStatus::InProgress
            } else {
                EffectStatus::Finished
            }
        }

        fn begin_move(&mut self, _unit: UnitId, _from: Position, _to: Position) {}

        fn interact(&mut self, _unit: UnitId, _at: Position) {}
    }

    fn waypoint(x: i32, y: i32) -> Waypoint {
        Waypoint::new(Position::new(x, y), WorldPos::default())
    }

    fn setup(plans: &[(u32, usize)]) -> (OrderQueue, Roster) {
        let mut roster = Roster::new();
        let mut orders = OrderQueue::new();
        let mut policy = FixedInitiative(1);
        for &(id, count) in plans {
            let id = UnitId(id);
            let mut unit = Unit::new(
                id,
                Team::Blue,
                Position::new(0, id.0 as i32),
                20,
                AttackProfile::new("rifle", 2, 2, AttackStyle::Ranged),
            );
            for step in 0..count {
                let x = step as i32;
                let y = id.0 as i32;
                unit.queue_action(Action::movement(id, waypoint(x, y), waypoint(x + 1, y), 2));
                orders
                    .record(id, CostContribution::movement(2), &mut policy)
                    .unwrap();
            }
            roster.insert(unit);
        }
        orders.seal().unwrap();
        (orders, roster)
    }

    #[test]
    fn drains_in_one_step_per_pending_action() {
        let (mut orders, mut roster) = setup(&[(1, 2), (2, 3)]);
        let mut effects = Recorder {
            executed: Vec::new(),
            defer: false,
        };
        let mut execution = TurnExecution::new();

        let mut outcomes = Vec::new();
        loop {
            let report = execution.step(&mut orders, &mut roster, &mut effects);
            outcomes.push(report.outcome);
            if report.outcome == StepOutcome::Done {
                break;
            }
        }

        assert_eq!(outcomes.len(), 5);
        assert_eq!(roster.get(UnitId(1)).unwrap().action_points(), 16);
        assert_eq!(roster.get(UnitId(2)).unwrap().action_points(), 14);
        assert_eq!(
            effects.executed,
            vec![UnitId(1), UnitId(1), UnitId(2), UnitId(2), UnitId(2)]
        );
        assert!(orders.is_empty());
    }

    #[test]
    fn in_progress_effect_stalls_until_completed() {
        let (mut orders, mut roster) = setup(&[(1, 1)]);
        let mut effects = Recorder {
            executed: Vec::new(),
            defer: true,
        };
        let mut execution = TurnExecution::new();

        let first = execution.step(&mut orders, &mut roster, &mut effects);
        assert_eq!(first.dispatched, Some(UnitId(1)));
        assert!(first.resolved.is_none());

        let second = execution.step(&mut orders, &mut roster, &mut effects);
        assert!(second.stalled);
        assert_eq!(effects.executed.len(), 1);

        assert!(execution.complete(UnitId(2), &mut orders).is_none());
        let resolved = execution.complete(UnitId(1), &mut orders).unwrap();
        assert_eq!(resolved.actor(), UnitId(1));
        assert!(orders.is_empty());

        let last = execution.step(&mut orders, &mut roster, &mut effects);
        assert_eq!(last.outcome, StepOutcome::Done);
    }

    #[test]
    fn spent_orders_are_skipped_without_dispatch() {
        let (mut orders, mut roster) = setup(&[(1, 1), (2, 1)]);
        roster.get_mut(UnitId(1)).unwrap().reset_actions();
        let mut effects = Recorder {
            executed: Vec::new(),
            defer: false,
        };
        let mut execution = TurnExecution::new();

        let report = execution.step(&mut orders, &mut roster, &mut effects);
        assert_eq!(report.skipped, vec![UnitId(1)]);
        assert_eq!(report.dispatched, Some(UnitId(2)));
        assert_eq!(report.outcome, StepOutcome::Done);
    }

    #[test]
    fn forgetting_a_dead_unit_unblocks_stepping() {
        let (mut orders, mut roster) = setup(&[(1, 1), (2, 1)]);
        let mut effects = Recorder {
            executed: Vec::new(),
            defer: true,
        };
        let mut execution = TurnExecution::new();
        execution.step(&mut orders, &mut roster, &mut effects);

        assert!(execution.forget(UnitId(1)));
        orders.remove_unit(UnitId(1));
        roster.remove(UnitId(1));

        let report = execution.step(&mut orders, &mut roster, &mut effects);
        assert_eq!(report.dispatched, Some(UnitId(2)));
        assert_eq!(effects.executed, vec![UnitId(1), UnitId(2)]);
    }
}
