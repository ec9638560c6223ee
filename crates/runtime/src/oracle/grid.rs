//! Grid served from in-memory maps.
use std::collections::{HashMap, HashSet};

use tactics_core::{
    BossTrigger, CellTrigger, GridDimensions, GridOracle, Interactable, LevelTransition, Position,
    UnitId, WorldPos,
};

/// GridOracle implementation backed by hash maps.
///
/// World space maps onto cells with a uniform `cell_size`; the world
/// anchor of a cell is its centre.
#[derive(Debug, Clone)]
pub struct InMemoryGrid {
    dimensions: GridDimensions,
    cell_size: f32,
    occupants: HashMap<Position, UnitId>,
    valid_moves: HashSet<Position>,
    triggers: HashMap<Position, CellTrigger>,
    transitions: HashMap<Position, LevelTransition>,
    bosses: HashSet<Position>,
    interactables: HashMap<Position, Interactable>,
}

impl InMemoryGrid {
    pub fn new(dimensions: GridDimensions) -> Self {
        Self::with_cell_size(dimensions, 1.0)
    }

    pub fn with_cell_size(dimensions: GridDimensions, cell_size: f32) -> Self {
        Self {
            dimensions,
            cell_size: if cell_size > 0.0 { cell_size } else { 1.0 },
            occupants: HashMap::new(),
            valid_moves: HashSet::new(),
            triggers: HashMap::new(),
            transitions: HashMap::new(),
            bosses: HashSet::new(),
            interactables: HashMap::new(),
        }
    }

    pub fn with_trigger(mut self, cell: Position, trigger: CellTrigger) -> Self {
        self.triggers.insert(cell, trigger);
        self
    }

    pub fn with_level_transition(mut self, cell: Position, transition: LevelTransition) -> Self {
        self.transitions.insert(cell, transition);
        self
    }

    pub fn with_boss_trigger(mut self, cell: Position) -> Self {
        self.bosses.insert(cell);
        self
    }

    pub fn with_interactable(mut self, cell: Position, interactable: Interactable) -> Self {
        self.interactables.insert(cell, interactable);
        self
    }

    /// World-space centre of `cell`, handy for building pointer input.
    pub fn center_of(&self, cell: Position) -> WorldPos {
        self.world_of(cell)
    }

    /// Cells currently flagged as valid move targets, sorted.
    pub fn valid_move_targets(&self) -> Vec<Position> {
        let mut cells: Vec<_> = self.valid_moves.iter().copied().collect();
        cells.sort();
        cells
    }
}

impl GridOracle for InMemoryGrid {
    fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    fn cell_at(&self, world: WorldPos) -> Option<Position> {
        if world.x < 0.0 || world.y < 0.0 {
            return None;
        }
        let cell = Position::new(
            (world.x / self.cell_size).floor() as i32,
            (world.y / self.cell_size).floor() as i32,
        );
        self.dimensions.contains(cell).then_some(cell)
    }

    fn world_of(&self, cell: Position) -> WorldPos {
        WorldPos::new(
            (cell.x as f32 + 0.5) * self.cell_size,
            (cell.y as f32 + 0.5) * self.cell_size,
        )
    }

    fn occupant(&self, cell: Position) -> Option<UnitId> {
        self.occupants.get(&cell).copied()
    }

    fn set_occupant(&mut self, cell: Position, unit: UnitId) {
        self.occupants.insert(cell, unit);
    }

    fn clear_occupant(&mut self, cell: Position) {
        self.occupants.remove(&cell);
    }

    fn is_valid_move_target(&self, cell: Position) -> bool {
        self.valid_moves.contains(&cell)
    }

    fn set_valid_move_target(&mut self, cell: Position, valid: bool) {
        if valid {
            self.valid_moves.insert(cell);
        } else {
            self.valid_moves.remove(&cell);
        }
    }

    fn trigger(&self, cell: Position) -> Option<CellTrigger> {
        self.triggers.get(&cell).copied()
    }

    fn level_transition(&self, cell: Position) -> Option<LevelTransition> {
        self.transitions.get(&cell).cloned()
    }

    fn boss_trigger(&self, cell: Position) -> Option<BossTrigger> {
        self.bosses.contains(&cell).then_some(BossTrigger)
    }

    fn interactable(&self, cell: Position) -> Option<Interactable> {
        self.interactables.get(&cell).copied()
    }

    fn clear_valid_move_targets(&mut self) {
        self.valid_moves.clear();
    }
}
