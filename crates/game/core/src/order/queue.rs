use std::collections::VecDeque;

use super::Order;
use super::policy::{CostContribution, InitiativePolicy, accumulate_cost};
use crate::error::{CombatError, ErrorSeverity};
use crate::state::UnitId;

/// Violations of the order queue invariants.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OrderQueueError {
    #[error("order for unit {unit} enqueued after the queue was sorted for execution")]
    Sealed { unit: UnitId },

    #[error("unit {unit} already has a live order")]
    DuplicateOrder { unit: UnitId },

    #[error("order queue was already sorted for this turn")]
    AlreadySorted,
}

impl CombatError for OrderQueueError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Sealed { .. } => "ORDER_QUEUE_SEALED",
            Self::DuplicateOrder { .. } => "ORDER_DUPLICATE",
            Self::AlreadySorted => "ORDER_ALREADY_SORTED",
        }
    }
}

/// Priority collection of orders across all units.
///
/// While a turn is being built, orders are kept in insertion order. The queue
/// is sorted exactly once, by [`OrderQueue::seal`], when execution begins;
/// from then on it only shrinks until [`OrderQueue::clear`] opens the next turn.
#[derive(Clone, Debug, Default)]
pub struct OrderQueue {
    orders: VecDeque<Order>,
    sealed: bool,
}

impl OrderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, order: Order) -> Result<(), OrderQueueError> {
        let unit = order.unit();
        if self.sealed {
            return Err(OrderQueueError::Sealed { unit });
        }
        if self.contains(unit) {
            return Err(OrderQueueError::DuplicateOrder { unit });
        }
        self.orders.push_back(order);
        Ok(())
    }

    /// Creates the unit's order or merges into the live one.
    ///
    /// The new total is the previous total plus `contribution`; the
    /// initiative is redrawn from `policy` with the updated total.
    pub fn record(
        &mut self,
        unit: UnitId,
        contribution: CostContribution,
        policy: &mut dyn InitiativePolicy,
    ) -> Result<&Order, OrderQueueError> {
        if self.sealed {
            return Err(OrderQueueError::Sealed { unit });
        }

        let index = match self.position(unit) {
            Some(index) => {
                let order = &mut self.orders[index];
                let total = accumulate_cost(order.total_cost(), contribution);
                order.set_total_cost(total);
                order.set_initiative(policy.initiative(total, contribution));
                index
            }
            None => {
                let total = accumulate_cost(0, contribution);
                let initiative = policy.initiative(total, contribution);
                self.orders.push_back(Order::new(initiative, unit, total));
                self.orders.len() - 1
            }
        };
        Ok(&self.orders[index])
    }

    /// One-shot stable sort by initiative; equal initiatives keep insertion order.
    pub fn seal(&mut self) -> Result<(), OrderQueueError> {
        if self.sealed {
            return Err(OrderQueueError::AlreadySorted);
        }
        self.orders
            .make_contiguous()
            .sort_by_key(|order| order.initiative());
        self.sealed = true;
        Ok(())
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub fn peek(&self) -> Option<&Order> {
        self.orders.front()
    }

    pub fn peek_mut(&mut self) -> Option<&mut Order> {
        self.orders.front_mut()
    }

    pub fn dequeue(&mut self) -> Option<Order> {
        self.orders.pop_front()
    }

    pub fn get(&self, unit: UnitId) -> Option<&Order> {
        self.orders.iter().find(|order| order.unit() == unit)
    }

    pub fn contains(&self, unit: UnitId) -> bool {
        self.position(unit).is_some()
    }

    /// Purges every order belonging to `unit`. Allowed while sealed.
    pub fn remove_unit(&mut self, unit: UnitId) -> usize {
        let before = self.orders.len();
        self.orders.retain(|order| order.unit() != unit);
        before - self.orders.len()
    }

    /// Empties the queue and reopens it for the next turn.
    pub fn clear(&mut self) {
        self.orders.clear();
        self.sealed = false;
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    fn position(&self, unit: UnitId) -> Option<usize> {
        self.orders.iter().position(|order| order.unit() == unit)
    }
}
