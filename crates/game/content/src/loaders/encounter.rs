//! Encounter layout loader.
//!
//! An encounter file describes one level: grid size, blocked cells, the
//! Blue party, the enemy stages the combat triggers bring in, and the
//! cell-attached triggers and interactables.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tactics_core::{
    AttackProfile, CellTrigger, GridDimensions, Interactable, LevelTransition, Position, Team,
    Unit, UnitId,
};

use crate::loaders::{LoadResult, read_file};

/// One unit as written in an encounter file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSpec {
    pub id: u32,
    pub team: Team,
    pub cell: (i32, i32),
    pub action_points: u32,
    /// First entry is the active weapon.
    pub weapons: Vec<AttackProfile>,
}

impl UnitSpec {
    pub fn position(&self) -> Position {
        Position::new(self.cell.0, self.cell.1)
    }

    /// Builds the runtime unit. Returns `None` for a spec without weapons.
    pub fn to_unit(&self) -> Option<Unit> {
        let (first, rest) = self.weapons.split_first()?;
        let unit = Unit::new(
            UnitId(self.id),
            self.team,
            self.position(),
            self.action_points,
            first.clone(),
        );
        Some(
            rest.iter()
                .cloned()
                .fold(unit, |unit, weapon| unit.with_weapon(weapon)),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerSpec {
    Cell(CellTrigger),
    LevelTransition(LevelTransition),
    Boss,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractableSpec {
    pub cell: (i32, i32),
    pub id: u32,
    pub cost: u32,
    pub range: u32,
}

impl InteractableSpec {
    pub fn interactable(&self) -> Interactable {
        Interactable {
            id: self.id,
            cost: self.cost,
            range: self.range,
        }
    }
}

/// Encounter structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EncounterRon {
    dimensions: (u32, u32),
    #[serde(default)]
    walls: Vec<(i32, i32)>,
    party: Vec<UnitSpec>,
    #[serde(default)]
    stages: Vec<Vec<UnitSpec>>,
    #[serde(default)]
    triggers: Vec<((i32, i32), TriggerSpec)>,
    #[serde(default)]
    interactables: Vec<InteractableSpec>,
}

/// Validated encounter layout.
#[derive(Debug, Clone)]
pub struct EncounterData {
    pub dimensions: GridDimensions,
    pub walls: BTreeSet<Position>,
    pub party: Vec<Unit>,
    /// Enemy waves, indexed by the `Combat` trigger that requests them.
    pub stages: Vec<Vec<Unit>>,
    pub triggers: Vec<(Position, TriggerSpec)>,
    pub interactables: Vec<(Position, Interactable)>,
}

impl EncounterData {
    pub fn stage(&self, index: u32) -> Option<&[Unit]> {
        self.stages.get(index as usize).map(Vec::as_slice)
    }
}

/// Loader for encounter layouts from RON files.
pub struct EncounterLoader;

impl EncounterLoader {
    pub fn load(path: &Path) -> LoadResult<EncounterData> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<EncounterData> {
        let data: EncounterRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse encounter RON: {}", e))?;

        let dimensions = GridDimensions::new(data.dimensions.0, data.dimensions.1);
        let in_bounds = |(x, y): (i32, i32), what: &str| -> LoadResult<Position> {
            let position = Position::new(x, y);
            if !dimensions.contains(position) {
                anyhow::bail!("{} at {} lies outside the grid", what, position);
            }
            Ok(position)
        };

        let walls = data
            .walls
            .iter()
            .map(|cell| in_bounds(*cell, "wall"))
            .collect::<LoadResult<BTreeSet<_>>>()?;

        let mut seen = BTreeSet::new();
        let mut build = |spec: &UnitSpec| -> LoadResult<Unit> {
            let cell = in_bounds(spec.cell, "unit")?;
            if walls.contains(&cell) {
                anyhow::bail!("unit {} is placed on a wall at {}", spec.id, cell);
            }
            if !seen.insert(spec.id) {
                anyhow::bail!("unit id {} is used more than once", spec.id);
            }
            spec.to_unit()
                .ok_or_else(|| anyhow::anyhow!("unit {} has no weapons", spec.id))
        };

        let party = data.party.iter().map(&mut build).collect::<LoadResult<Vec<_>>>()?;
        if let Some(red) = party.iter().find(|unit| unit.team() != Team::Blue) {
            anyhow::bail!("party unit {} must be on the blue team", red.id());
        }

        let mut stages = Vec::with_capacity(data.stages.len());
        for stage in &data.stages {
            stages.push(stage.iter().map(&mut build).collect::<LoadResult<Vec<_>>>()?);
        }

        let triggers = data
            .triggers
            .into_iter()
            .map(|(cell, trigger)| Ok((in_bounds(cell, "trigger")?, trigger)))
            .collect::<LoadResult<Vec<_>>>()?;

        let interactables = data
            .interactables
            .iter()
            .map(|spec| Ok((in_bounds(spec.cell, "interactable")?, spec.interactable())))
            .collect::<LoadResult<Vec<_>>>()?;

        Ok(EncounterData {
            dimensions,
            walls,
            party,
            stages,
            triggers,
            interactables,
        })
    }
}
