use crate::action::{Action, ActionQueue, AttackStyle};

use super::{Position, ResourceMeter, Team, UnitId};

/// Weapon stats a unit attacks with.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackProfile {
    pub name: String,
    /// Chessboard reach in cells.
    pub range: u32,
    /// Action points one attack costs.
    pub cost: u32,
    /// Most expensive variant of the attack; gates the range preview.
    pub max_cost: u32,
    pub style: AttackStyle,
}

impl AttackProfile {
    pub fn new(name: impl Into<String>, range: u32, cost: u32, style: AttackStyle) -> Self {
        Self {
            name: name.into(),
            range,
            cost,
            max_cost: cost,
            style,
        }
    }

    pub fn with_max_cost(mut self, max_cost: u32) -> Self {
        self.max_cost = max_cost;
        self
    }
}

/// A combat unit as the controller sees it.
///
/// The unit owns its [`ActionQueue`]. Each queued action is checked on its
/// own against the current action points; the points are only spent when
/// the action executes, and refilled when the turn ends.
#[derive(Clone, Debug, PartialEq)]
pub struct Unit {
    id: UnitId,
    team: Team,
    cell: Position,
    action_points: ResourceMeter,
    weapons: Vec<AttackProfile>,
    active_weapon: usize,
    actions: ActionQueue,
    acted: bool,
}

impl Unit {
    pub fn new(
        id: UnitId,
        team: Team,
        cell: Position,
        action_points: u32,
        weapon: AttackProfile,
    ) -> Self {
        Self {
            id,
            team,
            cell,
            action_points: ResourceMeter::full(action_points),
            weapons: vec![weapon],
            active_weapon: 0,
            actions: ActionQueue::new(),
            acted: false,
        }
    }

    /// Adds a selectable weapon slot.
    pub fn with_weapon(mut self, weapon: AttackProfile) -> Self {
        self.weapons.push(weapon);
        self
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn team(&self) -> Team {
        self.team
    }

    pub fn cell(&self) -> Position {
        self.cell
    }

    /// Moves the unit's live cell. Occupancy bookkeeping belongs to the caller.
    pub fn relocate(&mut self, cell: Position) {
        self.cell = cell;
    }

    pub fn action_points(&self) -> u32 {
        self.action_points.current
    }

    pub fn action_point_budget(&self) -> ResourceMeter {
        self.action_points
    }

    /// True when the unit may still queue something this turn.
    pub fn has_action_points(&self, minimum: u32) -> bool {
        self.action_points.current > 0 && self.action_points.current >= minimum
    }

    /// Two action points buy one cell of movement.
    pub fn max_move_distance(&self) -> u32 {
        self.action_points.current / 2
    }

    pub fn attack(&self) -> &AttackProfile {
        &self.weapons[self.active_weapon]
    }

    pub fn active_weapon(&self) -> usize {
        self.active_weapon
    }

    /// Switches the active weapon; unknown slots leave the unit unchanged.
    pub fn set_active_weapon(&mut self, index: usize) -> Option<&AttackProfile> {
        if index >= self.weapons.len() {
            return None;
        }
        self.active_weapon = index;
        Some(&self.weapons[index])
    }

    pub fn can_attack(&self, target: Position, from: Position) -> bool {
        from.chebyshev(target) <= self.attack().range
    }

    /// Whether the attack range preview should be drawn.
    pub fn can_afford_attack(&self) -> bool {
        self.attack().max_cost <= self.action_points.current
    }

    pub fn actions(&self) -> &ActionQueue {
        &self.actions
    }

    pub fn pending_actions(&self) -> usize {
        self.actions.count()
    }

    /// Cell the next queued action starts from.
    pub fn anchor(&self) -> Position {
        self.actions.anchor(self.cell)
    }

    /// Appends `action` if the unit's action points cover its cost. Returns
    /// false, queuing nothing, when they do not.
    pub fn queue_action(&mut self, action: Action) -> bool {
        if !self.action_points.covers(action.cost()) {
            return false;
        }
        self.actions.append(action);
        true
    }

    /// Clears the queue. Nothing was spent on the dropped actions yet.
    pub fn reset_actions(&mut self) -> Vec<Action> {
        self.actions.clear()
    }

    /// Pays for an action that is executing. Returns the points left.
    pub fn spend_action_points(&mut self, amount: u32) -> u32 {
        self.action_points.drain(amount)
    }

    pub fn pop_action(&mut self) -> Option<Action> {
        self.actions.pop_next()
    }

    pub fn has_acted(&self) -> bool {
        self.acted
    }

    pub fn mark_acted(&mut self) {
        self.acted = true;
    }

    /// Start-of-turn reset: clears the acted flag and refills action points.
    pub fn reset_turn(&mut self) {
        self.acted = false;
        self.action_points.refill();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Waypoint;
    use crate::state::WorldPos;

    fn rifleman() -> Unit {
        Unit::new(
            UnitId(1),
            Team::Blue,
            Position::new(2, 2),
            4,
            AttackProfile::new("rifle", 3, 3, AttackStyle::Ranged),
        )
    }

    fn waypoint(x: i32, y: i32) -> Waypoint {
        Waypoint::new(Position::new(x, y), WorldPos::default())
    }

    #[test]
    fn each_action_is_checked_against_the_full_budget() {
        let mut unit = rifleman();
        assert!(unit.queue_action(Action::movement(unit.id(), waypoint(2, 2), waypoint(2, 4), 4)));
        assert!(unit.queue_action(Action::attack(
            unit.id(),
            waypoint(2, 4),
            UnitId(9),
            AttackStyle::Ranged,
            3
        )));
        assert!(!unit.queue_action(Action::movement(unit.id(), waypoint(2, 4), waypoint(2, 7), 6)));
        assert_eq!(unit.pending_actions(), 2);
        assert_eq!(unit.action_points(), 4);
        assert_eq!(unit.anchor(), Position::new(2, 4));

        assert_eq!(unit.spend_action_points(4), 0);
        assert_eq!(unit.spend_action_points(3), 0);
        unit.reset_turn();
        assert_eq!(unit.action_points(), 4);
    }

    #[test]
    fn reset_actions_keeps_the_budget() {
        let mut unit = rifleman();
        unit.queue_action(Action::movement(unit.id(), waypoint(2, 2), waypoint(2, 3), 2));
        let dropped = unit.reset_actions();
        assert_eq!(dropped.len(), 1);
        assert_eq!(unit.action_points(), 4);
        assert_eq!(unit.anchor(), unit.cell());
    }

    #[test]
    fn weapon_switch_ignores_unknown_slot() {
        let mut unit =
            rifleman().with_weapon(AttackProfile::new("knife", 1, 1, AttackStyle::Melee));
        assert!(unit.set_active_weapon(5).is_none());
        assert_eq!(unit.attack().name, "rifle");
        assert_eq!(unit.set_active_weapon(1).map(|w| w.range), Some(1));
        assert!(!unit.can_attack(Position::new(4, 2), unit.cell()));
    }

    #[test]
    fn action_point_threshold() {
        let unit = rifleman();
        assert!(unit.has_action_points(2));
        assert!(!unit.has_action_points(5));
        assert_eq!(unit.max_move_distance(), 2);
    }
}
