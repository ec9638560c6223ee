//! Breadth-first pathfinding over a wall set.
use std::collections::{BTreeSet, HashMap, VecDeque};

use tactics_core::{GridDimensions, PathOracle, Position};

/// 4-neighbour shortest paths. Every in-bounds cell that is not a wall is walkable.
#[derive(Debug, Clone)]
pub struct BfsPathfinder {
    dimensions: GridDimensions,
    walls: BTreeSet<Position>,
}

impl BfsPathfinder {
    pub fn new(dimensions: GridDimensions, walls: impl IntoIterator<Item = Position>) -> Self {
        Self {
            dimensions,
            walls: walls.into_iter().collect(),
        }
    }

    pub fn open(dimensions: GridDimensions) -> Self {
        Self::new(dimensions, [])
    }

    fn neighbours(cell: Position) -> [Position; 4] {
        [
            Position::new(cell.x + 1, cell.y),
            Position::new(cell.x - 1, cell.y),
            Position::new(cell.x, cell.y + 1),
            Position::new(cell.x, cell.y - 1),
        ]
    }
}

impl PathOracle for BfsPathfinder {
    fn is_walkable(&self, cell: Position) -> bool {
        self.dimensions.contains(cell) && !self.walls.contains(&cell)
    }

    fn path(&self, from: Position, to: Position) -> Vec<Position> {
        if from == to || !self.is_walkable(to) || !self.dimensions.contains(from) {
            return Vec::new();
        }

        let mut parents: HashMap<Position, Position> = HashMap::new();
        let mut frontier = VecDeque::from([from]);
        while let Some(cell) = frontier.pop_front() {
            if cell == to {
                break;
            }
            for next in Self::neighbours(cell) {
                if next != from && self.is_walkable(next) && !parents.contains_key(&next) {
                    parents.insert(next, cell);
                    frontier.push_back(next);
                }
            }
        }

        if !parents.contains_key(&to) {
            return Vec::new();
        }
        let mut path = vec![to];
        let mut cursor = to;
        while let Some(&parent) = parents.get(&cursor) {
            if parent == from {
                break;
            }
            path.push(parent);
            cursor = parent;
        }
        path.reverse();
        path
    }
}
