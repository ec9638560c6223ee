//! Range, arrow and selector painting on the highlight sink.
//!
//! Everything here writes to the grid's valid-move flags or the highlight
//! layers; nothing reads the highlight layers back.

use std::collections::BTreeSet;

use tactics_core::{GridOracle, HighlightLayer, HighlightSink, PathOracle, Position, TileSprite};

/// One arrow tile to paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrowTile {
    pub cell: Position,
    pub sprite: TileSprite,
    pub rotation: i16,
}

/// Clears the valid-move flags and the movement, attack-range and arrow layers.
pub fn clear_ranges(grid: &mut dyn GridOracle, sink: &mut dyn HighlightSink) {
    grid.clear_valid_move_targets();
    sink.clear_layer(HighlightLayer::Movement);
    sink.clear_layer(HighlightLayer::AttackRange);
    sink.clear_layer(HighlightLayer::Arrow);
}

/// Flags and paints every cell a unit at `anchor` can walk to with
/// `max_distance` cells of movement. Returns how many cells qualified.
///
/// A cell qualifies when it lies in the square of radius `max_distance`
/// around the anchor, is walkable, unoccupied and not in `claimed`, is not
/// the anchor, and the path to it is between 1 and `max_distance` cells long.
pub fn paint_move_range(
    grid: &mut dyn GridOracle,
    paths: &dyn PathOracle,
    sink: &mut dyn HighlightSink,
    anchor: Position,
    max_distance: u32,
    claimed: &BTreeSet<Position>,
) -> usize {
    grid.clear_valid_move_targets();
    sink.clear_layer(HighlightLayer::Movement);
    if max_distance == 0 {
        return 0;
    }

    let candidates: Vec<Position> = grid
        .dimensions()
        .square(anchor, max_distance)
        .filter(|cell| *cell != anchor)
        .filter(|cell| paths.is_walkable(*cell) && grid.occupant(*cell).is_none())
        .filter(|cell| !claimed.contains(cell))
        .collect();

    let mut valid = 0;
    for cell in candidates {
        let length = paths.path_length(anchor, cell);
        if length > 0 && length <= max_distance as usize {
            grid.set_valid_move_target(cell, true);
            sink.set_sprite(HighlightLayer::Movement, cell, TileSprite::Move);
            valid += 1;
        }
    }
    valid
}

/// Paints the square of radius `range` around `anchor`, excluding the anchor.
pub fn paint_attack_range(
    grid: &dyn GridOracle,
    sink: &mut dyn HighlightSink,
    anchor: Position,
    range: u32,
) {
    sink.clear_layer(HighlightLayer::AttackRange);
    for cell in grid.dimensions().square(anchor, range) {
        if cell != anchor {
            sink.set_sprite(HighlightLayer::AttackRange, cell, TileSprite::Move);
        }
    }
}

/// Moves the selector from `previous` to `current`.
pub fn paint_selector(
    sink: &mut dyn HighlightSink,
    previous: Option<Position>,
    current: Option<Position>,
) {
    match previous {
        Some(cell) => sink.set_sprite(HighlightLayer::Selector, cell, TileSprite::None),
        None => sink.clear_layer(HighlightLayer::Selector),
    }
    if let Some(cell) = current {
        sink.set_sprite(HighlightLayer::Selector, cell, TileSprite::Move);
    }
}

/// Arrow tiles for walking `path` from `anchor`. `path` excludes the anchor.
///
/// Tiles are returned in paint order; a later tile for the same cell
/// overrides an earlier one (corners replace the straight piece laid down
/// when their cell was the walk's head).
pub fn plan_arrow(anchor: Position, path: &[Position]) -> Vec<ArrowTile> {
    let mut chain = Vec::with_capacity(path.len() + 1);
    chain.push(anchor);
    chain.extend_from_slice(path);

    let mut tiles = Vec::with_capacity(path.len() * 2);
    for index in 1..chain.len() {
        let node = chain[index];
        let parent = chain[index - 1];
        let is_end = index == chain.len() - 1;

        if is_end {
            tiles.push(ArrowTile {
                cell: node,
                sprite: TileSprite::ArrowEnd,
                rotation: end_rotation(parent, node),
            });
        } else if parent.y == node.y && parent.x != node.x {
            tiles.push(straight(node, 90));
        } else if parent.x == node.x && parent.y != node.y {
            tiles.push(straight(node, 0));
        }

        if index >= 2
            && let Some(rotation) = corner_rotation(chain[index - 2], parent, node)
        {
            tiles.push(ArrowTile {
                cell: parent,
                sprite: TileSprite::ArrowCorner,
                rotation,
            });
        }
    }
    tiles
}

/// Writes planned arrow tiles to the arrow layer.
pub fn paint_arrow(sink: &mut dyn HighlightSink, tiles: &[ArrowTile]) {
    for tile in tiles {
        sink.set_rotation(HighlightLayer::Arrow, tile.cell, tile.rotation);
        sink.set_sprite(HighlightLayer::Arrow, tile.cell, tile.sprite);
    }
}

fn straight(cell: Position, rotation: i16) -> ArrowTile {
    ArrowTile {
        cell,
        sprite: TileSprite::ArrowStraight,
        rotation,
    }
}

/// Arrow head points away from the cell it was entered from.
fn end_rotation(parent: Position, node: Position) -> i16 {
    if parent.y == node.y && parent.x > node.x {
        90
    } else if parent.y == node.y && parent.x < node.x {
        -90
    } else if parent.x == node.x && parent.y > node.y {
        180
    } else {
        0
    }
}

/// Rotation of the corner piece at `parent` when the walk turns there.
fn corner_rotation(grand: Position, parent: Position, node: Position) -> Option<i16> {
    let vertical_then_horizontal = grand.x == parent.x && parent.y == node.y;
    let horizontal_then_vertical = grand.y == parent.y && parent.x == node.x;

    if (vertical_then_horizontal && parent.x < node.x && grand.y > parent.y)
        || (horizontal_then_vertical && grand.x > parent.x && parent.y < node.y)
    {
        Some(90)
    } else if (vertical_then_horizontal && parent.x > node.x && grand.y > parent.y)
        || (horizontal_then_vertical && grand.x < parent.x && parent.y < node.y)
    {
        Some(180)
    } else if (vertical_then_horizontal && parent.x < node.x && grand.y < parent.y)
        || (horizontal_then_vertical && grand.x > parent.x && parent.y > node.y)
    {
        Some(0)
    } else if (vertical_then_horizontal && parent.x > node.x && grand.y < parent.y)
        || (horizontal_then_vertical && grand.x < parent.x && parent.y > node.y)
    {
        Some(-90)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn straight_run_ends_with_head() {
        let tiles = plan_arrow(p(0, 0), &[p(1, 0), p(2, 0)]);
        assert_eq!(
            tiles,
            vec![
                ArrowTile {
                    cell: p(1, 0),
                    sprite: TileSprite::ArrowStraight,
                    rotation: 90
                },
                ArrowTile {
                    cell: p(2, 0),
                    sprite: TileSprite::ArrowEnd,
                    rotation: -90
                },
            ]
        );
    }

    #[test]
    fn vertical_head_points_along_travel() {
        let up = plan_arrow(p(0, 0), &[p(0, 1)]);
        assert_eq!((up[0].sprite, up[0].rotation), (TileSprite::ArrowEnd, 0));
        let down = plan_arrow(p(0, 1), &[p(0, 0)]);
        assert_eq!(down[0].rotation, 180);
        let left = plan_arrow(p(1, 0), &[p(0, 0)]);
        assert_eq!(left[0].rotation, 90);
    }

    #[test]
    fn turn_places_corner_over_straight_piece() {
        // Up one cell, then right one cell.
        let tiles = plan_arrow(p(0, 0), &[p(0, 1), p(1, 1)]);
        let last_at_turn = tiles.iter().rev().find(|t| t.cell == p(0, 1)).unwrap();
        assert_eq!(last_at_turn.sprite, TileSprite::ArrowCorner);
        assert_eq!(last_at_turn.rotation, 0);
        assert_eq!(tiles.last().unwrap().sprite, TileSprite::ArrowEnd);
    }

    #[test]
    fn corner_rotations_cover_all_turns() {
        // Down then right.
        assert_eq!(corner_rotation(p(0, 2), p(0, 1), p(1, 1)), Some(90));
        // Down then left.
        assert_eq!(corner_rotation(p(1, 2), p(1, 1), p(0, 1)), Some(180));
        // Up then left.
        assert_eq!(corner_rotation(p(1, 0), p(1, 1), p(0, 1)), Some(-90));
        // Left then up.
        assert_eq!(corner_rotation(p(2, 0), p(1, 0), p(1, 1)), Some(90));
        // Straight line has no corner.
        assert_eq!(corner_rotation(p(0, 0), p(1, 0), p(2, 0)), None);
    }

    #[test]
    fn empty_path_paints_nothing() {
        assert!(plan_arrow(p(3, 3), &[]).is_empty());
    }
}
