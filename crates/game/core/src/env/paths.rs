use crate::state::Position;

/// Path queries against the walkable layout.
pub trait PathOracle {
    fn is_walkable(&self, cell: Position) -> bool;

    /// Cells walked from `from` to `to`, excluding `from` and ending on `to`.
    /// Empty when `to` is unreachable.
    fn path(&self, from: Position, to: Position) -> Vec<Position>;

    fn path_length(&self, from: Position, to: Position) -> usize {
        self.path(from, to).len()
    }
}
