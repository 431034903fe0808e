//! The pending-order queue and the reconciliation policy.
//!
//! The queue holds order ids only; the authoritative order record always
//! lives in the world, so the queue can never diverge from it.

use std::collections::VecDeque;

use bevy_ecs::prelude::Resource;

use crate::ecs::OrderId;

/// Orders that could not be matched at creation time, in enqueue order.
#[derive(Debug, Default, Resource)]
pub struct PendingOrders(VecDeque<OrderId>);

impl PendingOrders {
    pub fn push(&mut self, id: OrderId) {
        self.0.push_back(id);
    }

    /// Snapshot and clear: the reconciliation pass owns the drained ids.
    pub fn take_all(&mut self) -> Vec<OrderId> {
        self.0.drain(..).collect()
    }

    pub fn contains(&self, id: OrderId) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = OrderId> + '_ {
        self.0.iter().copied()
    }
}

/// What happens to a queued order that still fails to match during a
/// reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Resource)]
pub enum ReconcilePolicy {
    /// Single-pass: the order is dropped from the queue and never retried.
    #[default]
    DropUnmatched,
    /// The order is re-appended in its original relative order and retried on
    /// the next pass.
    RetainUnmatched,
}
