use crate::state::{Position, UnitId, WorldPos};
use crate::trigger::{BossTrigger, CellTrigger, LevelTransition};

/// Spatial grid the combat runs on.
///
/// The grid is owned by the level layer; the controller reads geometry and
/// trigger descriptors from it and keeps its occupancy and valid-move flags
/// up to date.
pub trait GridOracle {
    fn dimensions(&self) -> GridDimensions;

    /// Cell under a world-space point, if the point is on the grid.
    fn cell_at(&self, world: WorldPos) -> Option<Position>;

    /// World-space anchor of a cell.
    fn world_of(&self, cell: Position) -> WorldPos;

    fn occupant(&self, cell: Position) -> Option<UnitId>;
    fn set_occupant(&mut self, cell: Position, unit: UnitId);
    fn clear_occupant(&mut self, cell: Position);

    fn is_valid_move_target(&self, cell: Position) -> bool;
    fn set_valid_move_target(&mut self, cell: Position, valid: bool);

    fn trigger(&self, cell: Position) -> Option<CellTrigger>;
    fn level_transition(&self, cell: Position) -> Option<LevelTransition>;
    fn boss_trigger(&self, cell: Position) -> Option<BossTrigger>;
    fn interactable(&self, cell: Position) -> Option<Interactable>;

    fn contains(&self, cell: Position) -> bool {
        self.dimensions().contains(cell)
    }

    /// Resets every valid-move flag on the grid.
    fn clear_valid_move_targets(&mut self) {
        let dimensions = self.dimensions();
        for cell in dimensions.cells() {
            self.set_valid_move_target(cell, false);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridDimensions {
    pub width: u32,
    pub height: u32,
}

impl GridDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as u32) < self.width
            && (position.y as u32) < self.height
    }

    /// Every cell, column-major.
    pub fn cells(self) -> impl Iterator<Item = Position> {
        let (width, height) = (self.width as i32, self.height as i32);
        (0..width).flat_map(move |x| (0..height).map(move |y| Position::new(x, y)))
    }

    /// In-bounds cells of the square of `radius` around `center`.
    pub fn square(self, center: Position, radius: u32) -> impl Iterator<Item = Position> {
        let dimensions = self;
        let radius = radius as i32;
        (center.x - radius..=center.x + radius)
            .flat_map(move |x| {
                (center.y - radius..=center.y + radius).map(move |y| Position::new(x, y))
            })
            .filter(move |cell| dimensions.contains(*cell))
    }
}

/// Object on a cell a unit can use from a distance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interactable {
    pub id: u32,
    /// Action points one use costs.
    pub cost: u32,
    /// Chessboard reach, measured from the user.
    pub range: u32,
}

impl Interactable {
    pub fn is_in_range(&self, at: Position, user: Position) -> bool {
        at.chebyshev(user) <= self.range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_is_clipped_to_bounds() {
        let dims = GridDimensions::new(3, 3);
        let cells: Vec<_> = dims.square(Position::new(0, 0), 1).collect();
        assert_eq!(cells.len(), 4);
        assert!(cells.iter().all(|cell| dims.contains(*cell)));
    }

    #[test]
    fn cells_covers_the_grid() {
        assert_eq!(GridDimensions::new(4, 2).cells().count(), 8);
    }
}
