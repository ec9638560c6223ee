//! Highlight sink that keeps the latest state of every layer.
use std::collections::HashMap;

use tactics_core::{HighlightLayer, HighlightSink, Position, TileSprite};

#[derive(Debug, Clone, Default)]
pub struct HighlightLog {
    sprites: HashMap<(HighlightLayer, Position), TileSprite>,
    rotations: HashMap<(HighlightLayer, Position), i16>,
    writes: usize,
}

impl HighlightLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sprite(&self, layer: HighlightLayer, cell: Position) -> TileSprite {
        self.sprites
            .get(&(layer, cell))
            .copied()
            .unwrap_or(TileSprite::None)
    }

    pub fn rotation(&self, layer: HighlightLayer, cell: Position) -> i16 {
        self.rotations.get(&(layer, cell)).copied().unwrap_or(0)
    }

    /// Cells showing a sprite on `layer`, sorted.
    pub fn painted(&self, layer: HighlightLayer) -> Vec<Position> {
        let mut cells: Vec<_> = self
            .sprites
            .iter()
            .filter(|((l, _), sprite)| *l == layer && **sprite != TileSprite::None)
            .map(|((_, cell), _)| *cell)
            .collect();
        cells.sort();
        cells
    }

    /// Total sprite and rotation writes received.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl HighlightSink for HighlightLog {
    fn set_sprite(&mut self, layer: HighlightLayer, cell: Position, sprite: TileSprite) {
        self.writes += 1;
        if sprite == TileSprite::None {
            self.sprites.remove(&(layer, cell));
        } else {
            self.sprites.insert((layer, cell), sprite);
        }
    }

    fn set_rotation(&mut self, layer: HighlightLayer, cell: Position, degrees: i16) {
        self.writes += 1;
        self.rotations.insert((layer, cell), degrees);
    }

    fn clear_layer(&mut self, layer: HighlightLayer) {
        self.writes += 1;
        self.sprites.retain(|(l, _), _| *l != layer);
        self.rotations.retain(|(l, _), _| *l != layer);
    }
}
