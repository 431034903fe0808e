//! The dispatch engine: a synchronous facade over the ECS world that owns
//! every driver and order record.
//!
//! All public operations run to completion on `&mut self`, so the
//! check-and-mutate pairs inside them (order pending? driver available?)
//! are atomic per engine instance. Callers that share an engine across
//! threads wrap it in a lock; nothing here suspends.

use bevy_ecs::prelude::{Entity, World};

use crate::clock::WallClock;
use crate::ecs::{
    ClientId, Driver, DriverId, DriverIndex, DriverStatus, Order, OrderId, OrderIndex,
    OrderSequence, OrderStatus, Position,
};
use crate::error::DispatchError;
use crate::fleet::{Car, Fleet};
use crate::matching::{
    AssignmentStrategy, AssignmentStrategyResource, DriverCandidate, PeakHourPolicy, RideContext,
};
use crate::notify::{MatchNotice, NotificationSink, NotifierRegistry};
use crate::pending::{PendingOrders, ReconcilePolicy};
use crate::pricing::trip_fare;
use crate::rating::{blend_rating, MAX_RATING, MIN_RATING};
use crate::spatial::{GridPoint, Location};

/// Outcome of a state-changing operation whose preconditions may not hold.
///
/// `Rejected` is a no-op, not an error: the engine state is left untouched
/// and the caller may retry or poll status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Rejected,
}

impl Outcome {
    pub fn applied(self) -> bool {
        self == Outcome::Applied
    }
}

/// What `request_ride` hands back: the new order id plus the matched driver,
/// or `None` when the order went to the pending queue for lack of capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RideReceipt {
    pub order: OrderId,
    pub driver: Option<DriverId>,
}

/// Read-only view of one driver record.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverSnapshot {
    pub id: DriverId,
    pub name: String,
    pub status: DriverStatus,
    pub position: GridPoint,
    pub rating: f64,
    pub current_order: Option<OrderId>,
}

/// Read-only view of one order record.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSnapshot {
    pub id: OrderId,
    pub client: ClientId,
    pub pickup: Location,
    pub destination: Location,
    pub status: OrderStatus,
    pub assigned_driver: Option<DriverId>,
    pub price: Option<f64>,
    pub client_rating: f64,
}

pub struct DispatchEngine {
    world: World,
}

impl DispatchEngine {
    pub fn new(strategy: Box<dyn AssignmentStrategy>, clock: WallClock) -> Self {
        let mut world = World::new();
        world.insert_resource(OrderSequence::default());
        world.insert_resource(OrderIndex::default());
        world.insert_resource(DriverIndex::default());
        world.insert_resource(PendingOrders::default());
        world.insert_resource(ReconcilePolicy::default());
        world.insert_resource(NotifierRegistry::default());
        world.insert_resource(Fleet::default());
        world.insert_resource(AssignmentStrategyResource::new(strategy));
        world.insert_resource(clock);
        Self { world }
    }

    /// Engine with the standard peak-hour policy and the local wall clock.
    pub fn with_defaults() -> Self {
        Self::new(Box::new(PeakHourPolicy::default()), WallClock::local())
    }

    pub fn set_reconcile_policy(&mut self, policy: ReconcilePolicy) {
        self.world.insert_resource(policy);
    }

    // ---- owner-facing ----

    pub fn add_driver(
        &mut self,
        id: DriverId,
        name: impl Into<String>,
        position: GridPoint,
        rating: f64,
    ) -> Result<(), DispatchError> {
        if self.world.resource::<DriverIndex>().contains(id) {
            return Err(DispatchError::DuplicateDriver(id));
        }
        let name = name.into();
        let entity = self
            .world
            .spawn((
                Driver {
                    name,
                    rating: rating.clamp(MIN_RATING, MAX_RATING),
                    status: DriverStatus::Available,
                    current_order: None,
                },
                Position(position),
            ))
            .id();
        self.world.resource_mut::<DriverIndex>().insert(id, entity);
        log::debug!(
            "registered driver {id} at ({:.1}, {:.1})",
            position.x,
            position.y
        );
        Ok(())
    }

    pub fn add_car(&mut self, car: Car) {
        self.world.resource_mut::<Fleet>().register(car);
    }

    pub fn fleet_size(&self) -> usize {
        self.world.resource::<Fleet>().len()
    }

    /// Sum of fares over exactly the completed orders. Recomputed on demand
    /// over the full order set; no running total is kept.
    pub fn total_earnings(&mut self) -> f64 {
        let mut orders = self.world.query::<&Order>();
        orders
            .iter(&self.world)
            .filter(|order| order.status == OrderStatus::Completed)
            .filter_map(|order| order.price)
            .sum()
    }

    // ---- notification sinks ----

    pub fn attach_sink(&mut self, driver: DriverId, sink: Box<dyn NotificationSink>) {
        self.world
            .resource_mut::<NotifierRegistry>()
            .attach(driver, sink);
    }

    pub fn detach_sink(&mut self, driver: DriverId) {
        self.world.resource_mut::<NotifierRegistry>().detach(driver);
    }

    // ---- client-facing ----

    /// Creates the order, tries an immediate match, and queues the order id
    /// when no driver is available or the strategy declines.
    pub fn request_ride(
        &mut self,
        client: ClientId,
        pickup: Location,
        destination: Location,
        client_rating: f64,
    ) -> RideReceipt {
        let id = self.world.resource_mut::<OrderSequence>().next_id();
        let entity = self
            .world
            .spawn(Order {
                client,
                pickup,
                destination,
                status: OrderStatus::Pending,
                assigned_driver: None,
                price: None,
                client_rating: client_rating.clamp(MIN_RATING, MAX_RATING),
            })
            .id();
        self.world.resource_mut::<OrderIndex>().insert(id, entity);

        let driver = self.try_assign(id);
        if driver.is_none() {
            self.world.resource_mut::<PendingOrders>().push(id);
            log::debug!("order {id} queued: no driver matched");
        }
        RideReceipt { order: id, driver }
    }

    pub fn order_status(&self, id: OrderId) -> Result<OrderStatus, DispatchError> {
        let entity = self.order_entity(id)?;
        self.world
            .get::<Order>(entity)
            .map(|order| order.status)
            .ok_or(DispatchError::UnknownOrder(id))
    }

    // ---- driver-facing ----

    /// Manual-accept path. Same atomic transition as automatic assignment:
    /// succeeds only while the order is pending and the driver available.
    pub fn accept_order(
        &mut self,
        order: OrderId,
        driver: DriverId,
    ) -> Result<Outcome, DispatchError> {
        let order_entity = self.order_entity(order)?;
        let driver_entity = self.driver_entity(driver)?;
        Ok(self.assign(order, order_entity, driver, driver_entity))
    }

    /// Completes an in-progress order: frees the driver, relocates them to
    /// the destination, then replays the pending queue.
    pub fn complete_order(&mut self, id: OrderId) -> Result<Outcome, DispatchError> {
        let order_entity = self.order_entity(id)?;

        let (assigned_driver, destination) = {
            let order = self
                .world
                .get::<Order>(order_entity)
                .ok_or(DispatchError::UnknownOrder(id))?;
            if order.status != OrderStatus::InProgress {
                return Ok(Outcome::Rejected);
            }
            (order.assigned_driver, order.destination.point)
        };
        debug_assert!(
            assigned_driver.is_some(),
            "in-progress order must have an assigned driver"
        );

        if let Some(mut order) = self.world.get_mut::<Order>(order_entity) {
            order.status = OrderStatus::Completed;
        }

        if let Some(driver_id) = assigned_driver {
            let driver_entity = self.world.resource::<DriverIndex>().get(driver_id);
            if let Some(driver_entity) = driver_entity {
                if let Some(mut driver) = self.world.get_mut::<Driver>(driver_entity) {
                    driver.status = DriverStatus::Available;
                    driver.current_order = None;
                }
                if let Some(mut position) = self.world.get_mut::<Position>(driver_entity) {
                    position.0 = destination;
                }
            }
            log::info!("order {id} completed by driver {driver_id}");
        }

        self.reconcile_pending();
        Ok(Outcome::Applied)
    }

    /// Toggles a driver between available and off duty. Rejected while the
    /// driver is on a trip.
    pub fn set_availability(
        &mut self,
        id: DriverId,
        available: bool,
    ) -> Result<Outcome, DispatchError> {
        let entity = self.driver_entity(id)?;
        let mut driver = self
            .world
            .get_mut::<Driver>(entity)
            .ok_or(DispatchError::UnknownDriver(id))?;
        if driver.status == DriverStatus::OnTrip {
            return Ok(Outcome::Rejected);
        }
        driver.status = if available {
            DriverStatus::Available
        } else {
            DriverStatus::OffDuty
        };
        Ok(Outcome::Applied)
    }

    /// Pulls the driver's rating 10% toward `input` and returns the new
    /// value. Never triggered automatically by completion.
    pub fn adjust_rating(&mut self, id: DriverId, input: f64) -> Result<f64, DispatchError> {
        let entity = self.driver_entity(id)?;
        let mut driver = self
            .world
            .get_mut::<Driver>(entity)
            .ok_or(DispatchError::UnknownDriver(id))?;
        driver.rating = blend_rating(driver.rating, input);
        Ok(driver.rating)
    }

    // ---- snapshots ----

    pub fn driver_snapshot(&self, id: DriverId) -> Result<DriverSnapshot, DispatchError> {
        let entity = self.driver_entity(id)?;
        let driver = self
            .world
            .get::<Driver>(entity)
            .ok_or(DispatchError::UnknownDriver(id))?;
        let position = self
            .world
            .get::<Position>(entity)
            .ok_or(DispatchError::UnknownDriver(id))?;
        Ok(DriverSnapshot {
            id,
            name: driver.name.clone(),
            status: driver.status,
            position: position.0,
            rating: driver.rating,
            current_order: driver.current_order,
        })
    }

    pub fn order_snapshot(&self, id: OrderId) -> Result<OrderSnapshot, DispatchError> {
        let entity = self.order_entity(id)?;
        let order = self
            .world
            .get::<Order>(entity)
            .ok_or(DispatchError::UnknownOrder(id))?;
        Ok(OrderSnapshot {
            id,
            client: order.client,
            pickup: order.pickup.clone(),
            destination: order.destination.clone(),
            status: order.status,
            assigned_driver: order.assigned_driver,
            price: order.price,
            client_rating: order.client_rating,
        })
    }

    pub fn pending_orders(&self) -> Vec<OrderId> {
        self.world.resource::<PendingOrders>().ids().collect()
    }

    pub fn pending_len(&self) -> usize {
        self.world.resource::<PendingOrders>().len()
    }

    // ---- internals ----

    /// One matching attempt for a pending order. Returns the driver on
    /// success; leaves all state untouched when nobody qualifies.
    fn try_assign(&mut self, order_id: OrderId) -> Option<DriverId> {
        let order_entity = self.world.resource::<OrderIndex>().get(order_id)?;
        let ctx = {
            let order = self.world.get::<Order>(order_entity)?;
            if order.status != OrderStatus::Pending {
                return None;
            }
            RideContext {
                pickup: order.pickup.point,
                client_rating: order.client_rating,
            }
        };

        let candidates = self.available_candidates();
        if candidates.is_empty() {
            return None;
        }

        let now = self.world.resource::<WallClock>().minutes_past_midnight();
        let selected = self
            .world
            .resource::<AssignmentStrategyResource>()
            .select(&ctx, &candidates, now)?;
        let driver_entity = self.world.resource::<DriverIndex>().get(selected)?;

        match self.assign(order_id, order_entity, selected, driver_entity) {
            Outcome::Applied => Some(selected),
            Outcome::Rejected => None,
        }
    }

    /// The Pending -> InProgress transition: the precondition check and the
    /// order/driver mutation happen back-to-back with nothing else able to
    /// observe the intermediate state. The fare is computed here, once.
    fn assign(
        &mut self,
        order_id: OrderId,
        order_entity: Entity,
        driver_id: DriverId,
        driver_entity: Entity,
    ) -> Outcome {
        let (pickup, destination) = {
            let Some(order) = self.world.get::<Order>(order_entity) else {
                return Outcome::Rejected;
            };
            if order.status != OrderStatus::Pending {
                return Outcome::Rejected;
            }
            (order.pickup.clone(), order.destination.clone())
        };
        {
            let Some(driver) = self.world.get::<Driver>(driver_entity) else {
                return Outcome::Rejected;
            };
            if driver.status != DriverStatus::Available {
                return Outcome::Rejected;
            }
        }

        let price = trip_fare(pickup.point, destination.point);
        if let Some(mut order) = self.world.get_mut::<Order>(order_entity) {
            order.status = OrderStatus::InProgress;
            order.assigned_driver = Some(driver_id);
            order.price = Some(price);
        }
        if let Some(mut driver) = self.world.get_mut::<Driver>(driver_entity) {
            driver.status = DriverStatus::OnTrip;
            driver.current_order = Some(order_id);
        }

        let notice = MatchNotice {
            order: order_id,
            pickup,
            destination,
            price,
        };
        self.world
            .resource_mut::<NotifierRegistry>()
            .notify(driver_id, &notice);

        log::info!("order {order_id} assigned to driver {driver_id}, fare {price}");
        Outcome::Applied
    }

    /// Replays the queue through the normal matching path. Triggered by every
    /// successful completion; each queued order gets exactly one attempt per
    /// pass, and the reconcile policy decides what happens to the ones that
    /// still fail.
    fn reconcile_pending(&mut self) {
        let queued = self.world.resource_mut::<PendingOrders>().take_all();
        if queued.is_empty() {
            return;
        }
        let policy = *self.world.resource::<ReconcilePolicy>();
        log::debug!("reconciliation pass over {} queued order(s)", queued.len());

        for order_id in queued {
            // The order may have been matched through another path (manual
            // accept) since it was queued.
            if !matches!(self.order_status(order_id), Ok(OrderStatus::Pending)) {
                continue;
            }
            if self.try_assign(order_id).is_none()
                && policy == ReconcilePolicy::RetainUnmatched
            {
                self.world.resource_mut::<PendingOrders>().push(order_id);
            }
        }
    }

    /// Snapshot of the currently available drivers, in registration order.
    fn available_candidates(&self) -> Vec<DriverCandidate> {
        let index = self.world.resource::<DriverIndex>();
        let mut candidates = Vec::new();
        for (id, entity) in index.iter() {
            let Some(driver) = self.world.get::<Driver>(entity) else {
                continue;
            };
            if driver.status != DriverStatus::Available {
                continue;
            }
            let Some(position) = self.world.get::<Position>(entity) else {
                continue;
            };
            candidates.push(DriverCandidate {
                id,
                position: position.0,
                rating: driver.rating,
            });
        }
        candidates
    }

    fn order_entity(&self, id: OrderId) -> Result<Entity, DispatchError> {
        self.world
            .resource::<OrderIndex>()
            .get(id)
            .ok_or(DispatchError::UnknownOrder(id))
    }

    fn driver_entity(&self, id: DriverId) -> Result<Entity, DispatchError> {
        self.world
            .resource::<DriverIndex>()
            .get(id)
            .ok_or(DispatchError::UnknownDriver(id))
    }
}
