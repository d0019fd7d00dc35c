//! small: end-to-end run of the carsharing fleet engine.
//!
//! Seeds a fleet over eight stations in central Paris, serves a handful of
//! customer trips through the nearest-site matcher, then sends one operator
//! to rebalance vehicles from the fullest site to the emptiest one.
//!
//! ```text
//! RUST_LOG=info cargo run -p small -- [fleet_config.json]
//! ```

use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use log::{info, warn};

use cs_core::{Coord, CustomerId, FleetConfig, SimRng, SimTime, SiteId, TaskId};
use cs_fleet::{BookingError, Fleet, FleetBuilder, FleetView, VehicleType};
use cs_output::{CsvWriter, RelocationOutputObserver};
use cs_relocation::{RelocationEngine, RelocationObserver, RelocationTask};
use cs_seed::{
    Equirectangular, FleetTarget, SeedOptions, WeightedParams, read_stations_reader, seed_weighted_random,
};
use cs_spatial::{BeelineOracle, NearestSiteMatcher, PathOracle, TripPattern, build_itinerary};

// ── Constants ─────────────────────────────────────────────────────────────────

const OUTPUT_DIR:  &str = "output/small";
const FLEET_RATIO: f64  = 0.5;
const INITIAL_SOC: f64  = 0.9;
const RELOCATE:    usize = 3;

// Delimiter is sniffed from the header.
const STATIONS_CSV: &str = "\
stat.id;lng;lat;capacity;name\n\
1;2.3522;48.8566;12;Hotel de Ville\n\
2;2.3470;48.8530;8;Saint-Michel\n\
3;2.3376;48.8606;10;Louvre\n\
4;2.3600;48.8635;6;Arts et Metiers\n\
5;2.3690;48.8530;10;Bastille\n\
6;2.3450;48.8700;8;Grands Boulevards\n\
7;2.3240;48.8550;6;Saint-Germain\n\
8;2.3610;48.8450;12;Jardin des Plantes\n\
";

/// `(from station, to station)`; customers start and end a short walk away.
const TRIPS: [(&str, &str); 6] = [
    ("1", "6"),
    ("3", "8"),
    ("5", "7"),
    ("2", "4"),
    ("8", "1"),
    ("4", "5"),
];

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    let config = load_config(std::env::args().nth(1).as_deref())?;
    config.validate()?;

    // 1. Seed the fleet.
    let stations = read_stations_reader(Cursor::new(STATIONS_CSV), None)?;
    let centre = stations.first().context("station file is empty")?;
    let transform = Equirectangular::new(centre.lon, centre.lat);

    let mut builder = FleetBuilder::new();
    let ev = builder.add_vehicle_type(VehicleType::default());
    let opts = SeedOptions { vehicle_type: ev, initial_soc: INITIAL_SOC, transform: &transform };
    let params = WeightedParams {
        target:           FleetTarget::Ratio(FLEET_RATIO),
        default_capacity: config.default_site_capacity,
        station_limit:    None,
    };
    let mut rng = SimRng::new(config.seed);
    let report = seed_weighted_random(&mut builder, &stations, &params, &opts, &mut rng)?;
    let mut fleet = builder.build()?;
    println!(
        "Fleet: {} sites, {} vehicles, {} slots",
        report.sites, report.vehicles, report.total_capacity
    );

    let oracle = BeelineOracle::default();
    let t0 = Instant::now();

    // 2. Customer trips.
    let completed = serve_trips(&mut fleet, &config, &oracle)?;
    println!("Trips: {completed} of {} completed", TRIPS.len());

    // 3. Relocation.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let mut obs = RelocationOutputObserver::new(CsvWriter::new(Path::new(OUTPUT_DIR))?);
    relocate(&mut fleet, oracle, &mut obs)?;
    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }
    println!(
        "Relocation: {} audit event(s) written to {OUTPUT_DIR}/",
        obs.event_count()
    );
    println!("Run complete in {:.3} s", t0.elapsed().as_secs_f64());
    println!();

    // 4. Final occupancy table.
    println!("{:<12} {:<20} {:>6} {:>8}", "Site", "Name", "Parked", "Capacity");
    println!("{}", "-".repeat(49));
    for s in fleet.sites() {
        println!("{:<12} {:<20} {:>6} {:>8}", s.key(), s.name(), s.occupancy(), s.capacity());
    }
    println!(
        "Parked {} + rented {} of {} vehicles",
        fleet.parked_count(),
        fleet.rented_count(),
        fleet.vehicle_count()
    );

    Ok(())
}

fn load_config(path: Option<&str>) -> Result<FleetConfig> {
    let Some(path) = path else {
        return Ok(FleetConfig::default());
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {path}"))
}

// ── Trips ─────────────────────────────────────────────────────────────────────

fn serve_trips(fleet: &mut Fleet, config: &FleetConfig, oracle: &BeelineOracle) -> Result<usize> {
    let matcher = NearestSiteMatcher::new(&*fleet, config);
    let mut completed = 0;

    for (i, &(from, to)) in TRIPS.iter().enumerate() {
        let (Some(a), Some(b)) = (station_coord(fleet, from), station_coord(fleet, to)) else {
            warn!("trip {i}: unknown station {from} or {to}");
            continue;
        };
        let origin = Coord::new(a.x + 40.0, a.y - 30.0);
        let destination = Coord::new(b.x - 25.0, b.y + 60.0);
        let departure = SimTime::hms(8, 0, 0) + i as f64 * 300.0;

        let Some(matched) = matcher.match_trip_usable(&*fleet, origin, destination, TripPattern::Direct) else {
            warn!("trip {i}: no usable site pair");
            continue;
        };
        let itinerary = build_itinerary(
            &matched,
            origin,
            destination,
            departure,
            config.interaction_offset_secs,
            oracle,
        )?;
        let (Some(access), Some(egress), Some(drive)) = (matched.access, matched.egress, itinerary.drive().cloned())
        else {
            continue;
        };

        let booking = match fleet.book(access.site, CustomerId(i as u32), drive.distance_m, departure) {
            Ok(id) => id,
            Err(e @ BookingError::NoVehicleAvailable { .. }) => {
                warn!("trip {i}: {e}");
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        fleet.start_rental(booking, drive.departure)?;
        fleet.end_rental(booking, egress.site, drive.distance_m, drive.arrival())?;
        info!(
            "trip {i}: {} -> {} in {:.0} s ({:.0} m driven)",
            access.site,
            egress.site,
            itinerary.total_secs(),
            drive.distance_m
        );
        completed += 1;
    }
    Ok(completed)
}

fn station_coord(fleet: &Fleet, id: &str) -> Option<Coord> {
    let site = fleet.site_by_key(&format!("stat.id.{id}"))?;
    fleet.site(site).map(|s| s.coord())
}

// ── Relocation ────────────────────────────────────────────────────────────────

fn relocate<O: RelocationObserver>(fleet: &mut Fleet, oracle: BeelineOracle, obs: &mut O) -> Result<()> {
    let start = SimTime::hms(10, 0, 0);
    let from = fleet.sites().iter().max_by_key(|s| s.occupancy()).context("fleet has no sites")?;
    let to = fleet
        .sites()
        .iter()
        .filter(|s| s.id() != from.id())
        .max_by_key(|s| s.free_slots())
        .context("fleet has a single site")?;
    let (from, from_coord): (SiteId, Coord) = (from.id(), from.coord());
    let (to, to_coord): (SiteId, Coord) = (to.id(), to.coord());

    let mut engine = RelocationEngine::new(oracle);
    let op = engine.add_operator(from_coord, start);
    let distance_m = engine.oracle.drive(from_coord, to_coord, start)?.distance_m;

    obs.on_snapshot(start, &*fleet);
    let pickup = RelocationTask::new(TaskId(0), from, op, RELOCATE, distance_m);
    if !engine.process_pickup(fleet, start, &pickup, obs) {
        warn!("relocation pickup at {from} failed");
        obs.on_finish(start);
        return Ok(());
    }

    let leg = engine.begin_drive(op, to_coord, start)?;
    let arrived = leg.arrival();
    engine.tick_arrivals(arrived);

    let dropoff = RelocationTask::new(TaskId(1), to, op, RELOCATE, distance_m);
    engine.process_dropoff(fleet, arrived, &dropoff, obs);
    obs.on_snapshot(arrived, &*fleet);
    obs.on_finish(arrived);
    Ok(())
}
