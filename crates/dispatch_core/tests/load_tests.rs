//! Load tests for dispatch_core: validate throughput and invariants under
//! realistic order volumes.

use std::time::Instant;

use dispatch_core::clock::{FixedTime, WallClock};
use dispatch_core::ecs::{ClientId, OrderId, OrderStatus};
use dispatch_core::engine::DispatchEngine;
use dispatch_core::matching::PeakHourPolicy;
use dispatch_core::pending::ReconcilePolicy;
use dispatch_core::scenario::Scenario;

/// Moves the queued orders that reconciliation just matched over to the
/// active list; keeps the still-pending ones.
fn absorb_reconciled(engine: &DispatchEngine, queued: &mut Vec<OrderId>, active: &mut Vec<OrderId>) {
    queued.retain(|&id| match engine.order_status(id).expect("known order") {
        OrderStatus::InProgress => {
            active.push(id);
            false
        }
        OrderStatus::Pending => true,
        OrderStatus::Completed => false,
    });
}

/// Drives `rides` requests through a seeded engine, completing the whole
/// active fleet whenever it fills up, and returns the completed count.
fn churn(drivers: usize, rides: usize, seed: u64) -> usize {
    let scenario = Scenario::random(seed, drivers, 32);
    let locations = scenario.locations.clone();
    let mut engine = scenario
        .build(
            Box::new(PeakHourPolicy::default()),
            WallClock::new(Box::new(FixedTime::at(8, 30))),
        )
        .expect("generated ids are unique");
    engine.set_reconcile_policy(ReconcilePolicy::RetainUnmatched);

    let mut active: Vec<OrderId> = Vec::new();
    let mut queued: Vec<OrderId> = Vec::new();
    let mut completed = 0usize;
    for i in 0..rides {
        let pickup = locations[i % locations.len()].clone();
        let destination = locations[(i + 7) % locations.len()].clone();
        let receipt = engine.request_ride(ClientId(i as u32), pickup, destination, 4.0);
        match receipt.driver {
            Some(_) => active.push(receipt.order),
            None => queued.push(receipt.order),
        }
        if active.len() >= drivers {
            for order in active.drain(..).collect::<Vec<_>>() {
                engine.complete_order(order).expect("known order");
                completed += 1;
            }
            absorb_reconciled(&engine, &mut queued, &mut active);
        }
    }
    while !active.is_empty() {
        for order in active.drain(..).collect::<Vec<_>>() {
            engine.complete_order(order).expect("known order");
            completed += 1;
        }
        absorb_reconciled(&engine, &mut queued, &mut active);
    }

    // accounting closes: every order either completed or is still queued
    assert_eq!(completed + queued.len(), rides);
    assert_eq!(engine.pending_len(), queued.len());
    for id in engine.pending_orders() {
        assert_eq!(
            engine.order_status(id).expect("known order"),
            OrderStatus::Pending
        );
    }
    assert!(engine.total_earnings() > 0.0);
    completed
}

#[test]
#[ignore] // Only run explicitly: cargo test --package dispatch_core --test load_tests -- --ignored
fn test_sustained_load() {
    let rides = 10_000;
    let start = Instant::now();
    let completed = churn(200, rides, 42);
    let duration = start.elapsed();

    let rides_per_sec = rides as f64 / duration.as_secs_f64();
    println!(
        "Sustained load test: {} rides ({} completed) in {:.2}s ({:.0} rides/sec)",
        rides,
        completed,
        duration.as_secs_f64(),
        rides_per_sec
    );

    // Assert minimum performance threshold
    assert!(
        rides_per_sec > 1000.0,
        "Should process >1000 rides/sec, got {:.0}",
        rides_per_sec
    );
}

#[test]
#[ignore]
fn test_peak_spike() {
    // Sudden spike: far more requests than drivers, the queue absorbs it
    let rides = 5_000;
    let start = Instant::now();
    let completed = churn(50, rides, 42);
    let duration = start.elapsed();

    let rides_per_sec = rides as f64 / duration.as_secs_f64();
    println!(
        "Peak spike test: {} rides ({} completed) in {:.2}s ({:.0} rides/sec)",
        rides,
        completed,
        duration.as_secs_f64(),
        rides_per_sec
    );

    assert!(
        rides_per_sec > 500.0,
        "Should process >500 rides/sec under a spike, got {:.0}",
        rides_per_sec
    );
}

#[test]
fn queue_drains_completely_when_capacity_catches_up() {
    // Small enough to run in the default suite
    let completed = churn(10, 500, 7);
    assert_eq!(completed, 500);
}
