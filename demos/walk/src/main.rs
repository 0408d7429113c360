//! walk — a scripted stroll through a synthetic downtown.
//!
//! Starts in free-explore mode, switches to road mode over an in-memory
//! street set, advances and turns through a few intersections, then returns
//! to free-explore.  Run with `RUST_LOG=debug` to see graph construction and
//! every collapsed vertex.

mod network;

use anyhow::Result;
use log::warn;

use sw_core::{GeoBounds, GeoPoint};
use sw_nav::{InMemorySource, NavConfig, NavError, NavigationSession, TravelSummary, TurnSummary};
use sw_spatial::overpass;

use network::downtown;

// ── Constants ─────────────────────────────────────────────────────────────────

/// Just south-west of Government St and Royal St.
const START: GeoPoint = GeoPoint { lat: 30.6898, lon: -88.0437 };
const START_HEADING_DEG: f64 = 0.0;

// ── Script ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug)]
enum Command {
    Advance,
    Left,
    Right,
}

const SCRIPT: [Command; 8] = [
    Command::Advance,
    Command::Advance,
    Command::Right,
    Command::Advance,
    Command::Advance,
    Command::Left,
    Command::Advance,
    Command::Advance,
];

fn print_travel(s: &TravelSummary) {
    println!(
        "  at {:<40} heading {:<9} ({:>5.1}°)  {:>6.0} m along {}",
        s.title, s.direction, s.bearing_deg, s.distance_m, s.road
    );
    match &s.upcoming {
        Some(next) => println!("     next: {} in {:.0} m", next.title, next.distance_m),
        None => println!("     road ends ahead"),
    }
}

fn print_turn(t: &TurnSummary) {
    println!("  now facing {} ({}, {:.1}°)", t.road, t.direction, t.bearing_deg);
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    println!("=== walk — streetwalk road-mode demo ===");

    let elements = downtown()?;
    println!("Street data: {} elements", elements.len());

    let config = NavConfig::default();
    println!(
        "Overpass query for the first growth step, as posted to {}:\n{}\n",
        overpass::DEFAULT_ENDPOINT,
        overpass::query(&GeoBounds::around(START, config.growth.initial_radius_km))
    );

    let mut session = NavigationSession::new(config, START, START_HEADING_DEG);
    let mut source = InMemorySource::new(elements);

    // 1. Road mode.
    let start = session.enter_road_mode(&mut source)?;
    println!("Road mode after {} fetch(es):", source.fetches);
    print_travel(&start);

    // 2. Scripted commands.  Dead ends are reported and skipped.
    for command in SCRIPT {
        println!("> {command:?}");
        let outcome = match command {
            Command::Advance => session.advance().map(|s| print_travel(&s)),
            Command::Left => session.turn_left().map(|t| print_turn(&t)),
            Command::Right => session.turn_right().map(|t| print_turn(&t)),
        };
        match outcome {
            Ok(()) => {}
            Err(e @ (NavError::DeadEnd { .. } | NavError::NoForwardEdge { .. })) => {
                warn!("{e}");
                println!("  cannot go that way");
            }
            Err(e) => return Err(e.into()),
        }
    }

    // 3. Back to free-explore.
    let here = session.exit_road_mode()?;
    println!("Free-explore at {here}");

    let explorer = session.explore()?;
    explorer.zoom_out();
    let step = explorer.go();
    println!(
        "  went {:.0} m {} to {}",
        step.distance_m, step.direction, step.to
    );
    let back = explorer.return_previous()?;
    println!("  returned {:.0} m {}", back.distance_m, back.direction);

    Ok(())
}
