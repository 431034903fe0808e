use std::collections::HashMap;
use std::fmt;

use bevy_ecs::prelude::{Component, Entity, Resource};
use serde::{Deserialize, Serialize};

use crate::spatial::{GridPoint, Location};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DriverId(pub u32);

impl fmt::Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClientId(pub u32);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    InProgress,
    Completed,
}

/// One ride order. Status only ever moves forward:
/// `Pending -> InProgress -> Completed`. `assigned_driver` and `price` are
/// set together at the `Pending -> InProgress` transition and never change
/// afterwards.
#[derive(Debug, Clone, PartialEq, Component)]
pub struct Order {
    pub client: ClientId,
    pub pickup: Location,
    pub destination: Location,
    pub status: OrderStatus,
    pub assigned_driver: Option<DriverId>,
    pub price: Option<f64>,
    pub client_rating: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverStatus {
    Available,
    OnTrip,
    OffDuty,
}

/// One driver record. `current_order` is `Some` iff `status == OnTrip`.
#[derive(Debug, Clone, PartialEq, Component)]
pub struct Driver {
    pub name: String,
    pub rating: f64,
    pub status: DriverStatus,
    pub current_order: Option<OrderId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct Position(pub GridPoint);

/// Hands out order ids in strictly increasing creation order. Ids are never
/// reused.
#[derive(Debug, Default, Resource)]
pub struct OrderSequence {
    next: u64,
}

impl OrderSequence {
    pub fn next_id(&mut self) -> OrderId {
        self.next += 1;
        OrderId(self.next)
    }
}

/// Owned index from order id to its entity.
#[derive(Debug, Default, Resource)]
pub struct OrderIndex {
    by_id: HashMap<OrderId, Entity>,
}

impl OrderIndex {
    pub fn insert(&mut self, id: OrderId, entity: Entity) {
        self.by_id.insert(id, entity);
    }

    pub fn get(&self, id: OrderId) -> Option<Entity> {
        self.by_id.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Owned index from driver id to its entity.
///
/// The roster preserves registration order; matching iterates it so that
/// selection tie-breaks are reproducible rather than hash-order dependent.
#[derive(Debug, Default, Resource)]
pub struct DriverIndex {
    by_id: HashMap<DriverId, Entity>,
    roster: Vec<(DriverId, Entity)>,
}

impl DriverIndex {
    pub fn insert(&mut self, id: DriverId, entity: Entity) {
        self.by_id.insert(id, entity);
        self.roster.push((id, entity));
    }

    pub fn contains(&self, id: DriverId) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn get(&self, id: DriverId) -> Option<Entity> {
        self.by_id.get(&id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DriverId, Entity)> + '_ {
        self.roster.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.roster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }
}
