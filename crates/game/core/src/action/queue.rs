use std::collections::VecDeque;

use super::Action;
use crate::state::Position;

/// Ordered, not-yet-executed actions belonging to one unit.
///
/// Actions compose a path: each appended action starts where the previous
/// one left the unit, or at the unit's live cell when the queue is empty.
/// Legality (reachability, affordability) is the caller's concern.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActionQueue {
    actions: VecDeque<Action>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, action: Action) {
        if let Some(last) = self.actions.back() {
            debug_assert_eq!(
                last.resting_cell(),
                action.origin().cell,
                "queued action must start where the previous one ends"
            );
        }
        self.actions.push_back(action);
    }

    /// Drops every pending action and hands them back to the caller.
    pub fn clear(&mut self) -> Vec<Action> {
        self.actions.drain(..).collect()
    }

    pub fn count(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn peek_last(&self) -> Option<&Action> {
        self.actions.back()
    }

    /// Removes the oldest action for execution.
    pub fn pop_next(&mut self) -> Option<Action> {
        self.actions.pop_front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    /// Cell the next appended action must start from.
    pub fn anchor(&self, live: Position) -> Position {
        self.actions
            .back()
            .map_or(live, |action| action.resting_cell())
    }
}
