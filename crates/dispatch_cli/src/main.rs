use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::exit;

use clap::Parser;

use dispatch_core::clock::{FixedTime, WallClock};
use dispatch_core::ecs::{ClientId, OrderId, OrderStatus};
use dispatch_core::engine::DispatchEngine;
use dispatch_core::matching::PeakHourPolicy;
use dispatch_core::pending::ReconcilePolicy;
use dispatch_core::scenario::Scenario;

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "dispatch",
    about = "Drive ride requests through the taxi dispatch engine",
    long_about = "Loads a scenario from a JSON fixture file (or generates one\n\
                  from a seed), runs a stream of ride requests through the\n\
                  dispatch engine, and prints a summary of the run."
)]
struct Cli {
    /// Scenario fixture file (JSON); generated from the seed when omitted
    #[arg(long)]
    scenario: Option<PathBuf>,
    /// Seed for the generated scenario
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Drivers in the generated scenario
    #[arg(long, default_value_t = 8)]
    drivers: usize,
    /// Locations in the generated scenario
    #[arg(long, default_value_t = 16)]
    locations: usize,
    /// Ride requests to run
    #[arg(long, default_value_t = 100)]
    rides: usize,
    /// Pin the clock to a time of day (HH:MM) instead of the local time
    #[arg(long)]
    at: Option<String>,
    /// Keep unmatched orders queued across reconciliation passes
    #[arg(long)]
    retain_unmatched: bool,
}

// ── helpers ────────────────────────────────────────────────────────

fn parse_clock(at: Option<&str>) -> Result<WallClock, Box<dyn Error>> {
    let Some(at) = at else {
        return Ok(WallClock::local());
    };
    let (hour, minute) = at
        .split_once(':')
        .ok_or_else(|| format!("expected HH:MM, got '{at}'"))?;
    let hour: u32 = hour.parse()?;
    let minute: u32 = minute.parse()?;
    if hour >= 24 || minute >= 60 {
        return Err(format!("'{at}' is not a valid time of day").into());
    }
    Ok(WallClock::new(Box::new(FixedTime::at(hour, minute))))
}

fn load_scenario(cli: &Cli) -> Result<Scenario, Box<dyn Error>> {
    match &cli.scenario {
        Some(path) => {
            let raw = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&raw)?)
        }
        None => Ok(Scenario::random(cli.seed, cli.drivers, cli.locations)),
    }
}

// ── run ────────────────────────────────────────────────────────────

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let clock = parse_clock(cli.at.as_deref())?;
    let scenario = load_scenario(&cli)?;
    if scenario.locations.len() < 2 {
        return Err("scenario needs at least two locations".into());
    }
    let fleet = scenario.drivers.len();
    let stops = scenario.locations.clone();
    log::info!(
        "scenario loaded: {fleet} driver(s), {} location(s), {} ride(s) to run",
        stops.len(),
        cli.rides
    );
    let mut engine = scenario.build(Box::new(PeakHourPolicy::default()), clock)?;
    if cli.retain_unmatched {
        engine.set_reconcile_policy(ReconcilePolicy::RetainUnmatched);
    }

    let mut active: Vec<OrderId> = Vec::new();
    let mut matched = 0usize;
    let mut completed = 0usize;
    for i in 0..cli.rides {
        let pickup = stops[i % stops.len()].clone();
        let destination = stops[(i + 7) % stops.len()].clone();
        let receipt = engine.request_ride(ClientId(i as u32 + 1), pickup, destination, 4.0);
        if receipt.driver.is_some() {
            matched += 1;
            active.push(receipt.order);
        }
        // flush the fleet once every driver is on a trip
        if fleet > 0 && active.len() >= fleet {
            completed += complete_batch(&mut engine, &mut active)?;
        }
    }
    while !active.is_empty() {
        completed += complete_batch(&mut engine, &mut active)?;
    }

    println!("rides requested:    {}", cli.rides);
    println!("matched on request: {matched}");
    println!("completed:          {completed}");
    println!("unmatched:          {}", cli.rides - completed);
    println!("still queued:       {}", engine.pending_len());
    println!("total earnings:     {:.2}", engine.total_earnings());
    Ok(())
}

/// Completes the active trips and picks up the queued orders that the
/// reconciliation passes matched onto the freed drivers.
fn complete_batch(
    engine: &mut DispatchEngine,
    active: &mut Vec<OrderId>,
) -> Result<usize, Box<dyn Error>> {
    let queued_before = engine.pending_orders();
    let mut completed = 0usize;
    for order in active.drain(..) {
        if engine.complete_order(order)?.applied() {
            completed += 1;
        }
    }
    for order in queued_before {
        if engine.order_status(order)? == OrderStatus::InProgress {
            active.push(order);
        }
    }
    log::debug!(
        "flushed {completed} trip(s), {} picked up from the queue",
        active.len()
    );
    Ok(completed)
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        exit(1);
    }
}
