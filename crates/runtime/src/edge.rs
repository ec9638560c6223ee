//! Frame-to-frame change detection for selection feedback.
//!
//! Highlight repaints and selection events are edge-triggered: they fire
//! when the hovered cell, the selected unit, its action count, its anchor
//! or the phase changes, not on every tick. [`EdgeDetector`] keeps the
//! previous frame's sample and reports what differs.

use tactics_core::{Position, TurnPhase, UnitId};

use crate::events::CursorKind;

/// What the controller observed at the end of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSample {
    pub hover: Option<Position>,
    pub unit: Option<UnitId>,
    pub action_count: usize,
    pub anchor: Option<Position>,
    pub action_points: Option<u32>,
    pub cursor: CursorKind,
    pub phase: TurnPhase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameDiff {
    pub hover_changed: bool,
    /// Hovered cell of the previous frame, to be cleared on the selector layer.
    pub previous_hover: Option<Position>,
    pub unit_changed: bool,
    pub actions_changed: bool,
    pub anchor_moved: bool,
    pub points_changed: bool,
    pub cursor_changed: bool,
    pub phase_changed: bool,
}

impl FrameDiff {
    /// Anything that calls for the selection to be re-published and ranges repainted.
    pub fn selection_changed(&self) -> bool {
        self.unit_changed
            || self.actions_changed
            || self.anchor_moved
            || self.points_changed
            || self.phase_changed
    }
}

#[derive(Debug, Clone, Default)]
pub struct EdgeDetector {
    previous: Option<FrameSample>,
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `sample` and returns how it differs from the previous one.
    /// The first sample after construction or [`invalidate`](Self::invalidate)
    /// differs in every respect.
    pub fn observe(&mut self, sample: FrameSample) -> FrameDiff {
        let diff = match self.previous {
            None => FrameDiff {
                hover_changed: true,
                previous_hover: None,
                unit_changed: true,
                actions_changed: true,
                anchor_moved: true,
                points_changed: true,
                cursor_changed: true,
                phase_changed: true,
            },
            Some(previous) => FrameDiff {
                hover_changed: previous.hover != sample.hover,
                previous_hover: previous.hover.filter(|_| previous.hover != sample.hover),
                unit_changed: previous.unit != sample.unit,
                actions_changed: previous.action_count != sample.action_count,
                anchor_moved: previous.anchor != sample.anchor,
                points_changed: previous.action_points != sample.action_points,
                cursor_changed: previous.cursor != sample.cursor,
                phase_changed: previous.phase != sample.phase,
            },
        };
        self.previous = Some(sample);
        diff
    }

    /// Forgets the previous frame so the next observation reports a full change.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    /// Last observed hover, if any.
    pub fn last_hover(&self) -> Option<Position> {
        self.previous.and_then(|sample| sample.hover)
    }
}
