use std::collections::{BTreeMap, BTreeSet};

use crate::action::Action;

use super::{Position, Team, Unit, UnitId};

/// Both teams' units, keyed by id, with per-team insertion order preserved.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    units: BTreeMap<UnitId, Unit>,
    blue: Vec<UnitId>,
    red: Vec<UnitId>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a unit to its team. A unit already on the roster is replaced in place.
    pub fn insert(&mut self, unit: Unit) {
        let id = unit.id();
        let team = unit.team();
        if self.units.insert(id, unit).is_none() {
            self.members_mut(team).push(id);
        }
    }

    pub fn remove(&mut self, id: UnitId) -> Option<Unit> {
        let unit = self.units.remove(&id)?;
        self.members_mut(unit.team()).retain(|member| *member != id);
        Some(unit)
    }

    pub fn get(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    pub fn get_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(&id)
    }

    pub fn contains(&self, id: UnitId) -> bool {
        self.units.contains_key(&id)
    }

    /// Team members in the order they joined.
    pub fn members(&self, team: Team) -> &[UnitId] {
        match team {
            Team::Blue => &self.blue,
            Team::Red => &self.red,
        }
    }

    pub fn count(&self, team: Team) -> usize {
        self.members(team).len()
    }

    pub fn team_units(&self, team: Team) -> impl Iterator<Item = &Unit> {
        self.members(team)
            .iter()
            .filter_map(|id| self.units.get(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Unit> {
        self.units.values_mut()
    }

    /// Cells some unit other than `except` will stand on while its queued
    /// actions resolve. Live occupancy is the grid's business.
    pub fn claimed_cells(&self, except: Option<UnitId>) -> BTreeSet<Position> {
        self.iter()
            .filter(|unit| Some(unit.id()) != except)
            .flat_map(|unit| unit.actions().iter().map(Action::resting_cell))
            .collect()
    }

    fn members_mut(&mut self, team: Team) -> &mut Vec<UnitId> {
        match team {
            Team::Blue => &mut self.blue,
            Team::Red => &mut self.red,
        }
    }
}
