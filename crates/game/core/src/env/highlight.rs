use crate::state::Position;

/// Tile layers the combat feedback paints on.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum HighlightLayer {
    /// Valid move targets of the selected unit.
    Movement,
    /// Path arrow towards the hovered cell.
    Arrow,
    /// Cell under the pointer.
    Selector,
    /// Reach of the selected unit's attack.
    AttackRange,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TileSprite {
    None,
    Move,
    ArrowStraight,
    ArrowCorner,
    ArrowEnd,
}

/// Write-only sink for cell highlights. Never consulted for game logic.
pub trait HighlightSink {
    fn set_sprite(&mut self, layer: HighlightLayer, cell: Position, sprite: TileSprite);

    /// Rotation in degrees, counter-clockwise.
    fn set_rotation(&mut self, layer: HighlightLayer, cell: Position, degrees: i16);

    fn clear_layer(&mut self, layer: HighlightLayer);
}
