//! Initial fleet seeding.
//!
//! Each algorithm creates one site per raw station on a [`FleetBuilder`],
//! sets capacities, and deploys vehicles.  Nothing is parked until
//! [`FleetBuilder::build`] moves deployments into parking.
//!
//! | Function                 | Capacity                          | Vehicles                              |
//! |--------------------------|-----------------------------------|---------------------------------------|
//! | [`seed_explicit`]        | `2 × per_site`                    | `per_site` at every site              |
//! | [`seed_weighted_random`] | raw column or default             | one draw per vehicle ∝ free capacity  |
//! | [`seed_coefficient`]     | `parking_coef × P`, floored       | random or `fleet_coef × V` per site   |
//!
//! Keys follow the station-file conventions: sites are `stat.id.<id>`,
//! vehicles `veh.id.<id>.<k>` (explicit) or `veh.id.<i>` numbered from 1.

use log::{info, warn};

use cs_core::{SimRng, SiteId, VehicleTypeId};
use cs_fleet::FleetBuilder;

use crate::{CoordTransform, RawStation, SeedError, SeedResult};

// ── Shared parameters ─────────────────────────────────────────────────────────

/// Vehicle and projection settings shared by every algorithm.
pub struct SeedOptions<'a> {
    pub vehicle_type: VehicleTypeId,
    /// State of charge of every seeded vehicle.
    pub initial_soc:  f64,
    pub transform:    &'a dyn CoordTransform,
}

/// What a seeding call added to the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedReport {
    pub sites:          usize,
    pub vehicles:       usize,
    pub total_capacity: u64,
}

// ── Explicit count ────────────────────────────────────────────────────────────

/// `per_site` vehicles at every station, capacity `2 × per_site`.
pub fn seed_explicit(
    builder:  &mut FleetBuilder,
    stations: &[RawStation],
    per_site: u32,
    opts:     &SeedOptions<'_>,
) -> SeedResult<SeedReport> {
    let mut report = SeedReport::default();
    for st in stations {
        let site = add_station(builder, st, per_site.saturating_mul(2), opts)?;
        for k in 0..per_site {
            builder.add_vehicle(format!("veh.id.{}.{k}", st.id), opts.vehicle_type, opts.initial_soc, site)?;
        }
        report.sites += 1;
        report.vehicles += per_site as usize;
        report.total_capacity += u64::from(per_site) * 2;
    }
    info!(
        "explicit seeding: {} site(s), {} vehicle(s), capacity {}",
        report.sites, report.vehicles, report.total_capacity
    );
    Ok(report)
}

// ── Weighted random ───────────────────────────────────────────────────────────

/// How many vehicles weighted seeding should place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FleetTarget {
    Count(usize),
    /// `round(ratio × total free capacity)`.
    Ratio(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedParams {
    pub target:           FleetTarget,
    /// Capacity for stations without a `capacity` value.
    pub default_capacity: u32,
    /// Use only the first `k` stations.
    pub station_limit:    Option<usize>,
}

/// Draw a site for each vehicle with probability proportional to its free
/// capacity.  Full sites leave the draw and the rest are renormalised after
/// every assignment.  Stops at the target or when no capacity is left.
pub fn seed_weighted_random(
    builder:  &mut FleetBuilder,
    stations: &[RawStation],
    params:   &WeightedParams,
    opts:     &SeedOptions<'_>,
    rng:      &mut SimRng,
) -> SeedResult<SeedReport> {
    let limit = params.station_limit.unwrap_or(usize::MAX);
    let mut open: Vec<SiteId> = Vec::new();
    let mut report = SeedReport::default();
    for st in stations.iter().take(limit) {
        let capacity = st.capacity.unwrap_or(params.default_capacity);
        let site = add_station(builder, st, capacity, opts)?;
        report.sites += 1;
        report.total_capacity += u64::from(capacity);
        if builder.free_capacity(site) > 0 {
            open.push(site);
        }
    }

    let free: u64 = open.iter().map(|&s| u64::from(builder.free_capacity(s))).sum();
    let target = match params.target {
        FleetTarget::Count(n) => n,
        FleetTarget::Ratio(r) if r.is_finite() && r >= 0.0 => (r * free as f64).round() as usize,
        FleetTarget::Ratio(r) => {
            return Err(SeedError::InvalidParameter(format!("fleet ratio must be non-negative, got {r}")));
        }
    };

    let mut weights: Vec<f64> = Vec::with_capacity(open.len());
    while report.vehicles < target {
        weights.clear();
        weights.extend(open.iter().map(|&s| f64::from(builder.free_capacity(s))));
        let Some(i) = rng.choose_weighted(&weights) else {
            break;
        };
        let site = open[i];
        report.vehicles += 1;
        builder.add_vehicle(format!("veh.id.{}", report.vehicles), opts.vehicle_type, opts.initial_soc, site)?;
        if builder.free_capacity(site) == 0 {
            open.swap_remove(i);
        }
    }

    if report.vehicles < target {
        warn!("weighted seeding placed {} of {target} vehicle(s): no free capacity left", report.vehicles);
    }
    info!(
        "weighted seeding: {} site(s), {} vehicle(s), capacity {}",
        report.sites, report.vehicles, report.total_capacity
    );
    Ok(report)
}

// ── Coefficient-proportional ──────────────────────────────────────────────────

/// How coefficient seeding sizes each site's fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FleetAllocation {
    /// `uniform[0, capacity)` per site.
    Random,
    /// `round(fleet_coef × total_vehicles)` per site.
    Proportional,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoefficientParams {
    /// `V`, the fleet size to distribute.
    pub total_vehicles: usize,
    /// `P`, the parking capacity to distribute.
    pub total_parking:  u32,
    pub allocation:     FleetAllocation,
    /// Minimum capacity for stations without a `capacity` value.
    pub floor_capacity: u32,
}

/// Size sites by `parking_coef` and fill them by `fleet_coef` (or at random).
///
/// Stations are visited in descending `parking_coef` order (stable).  Each
/// visited station gets `round(max(share, floor))` slots where `share =
/// parking_coef × P` clipped to what remains of `P`; the unrounded share is
/// accumulated.  Stations not reached keep their floor.  Vehicles are then
/// assigned in the same order, clipped to the site's capacity and to what
/// remains of `V`.
pub fn seed_coefficient(
    builder:  &mut FleetBuilder,
    stations: &[RawStation],
    params:   &CoefficientParams,
    opts:     &SeedOptions<'_>,
    rng:      &mut SimRng,
) -> SeedResult<SeedReport> {
    let mut sites: Vec<(SiteId, u32, f64, f64)> = Vec::with_capacity(stations.len());
    for st in stations {
        let parking_coef = coefficient(st, st.parking_coef, "parking_coef")?;
        let fleet_coef = coefficient(st, st.fleet_coef, "fleet_coef")?;
        let floor = st.capacity.unwrap_or(params.floor_capacity);
        let site = add_station(builder, st, floor, opts)?;
        sites.push((site, floor, parking_coef, fleet_coef));
    }
    sites.sort_by(|a, b| b.2.total_cmp(&a.2));

    // Capacities.
    let total_parking = f64::from(params.total_parking);
    let mut accumulated = 0.0;
    for &(site, floor, parking_coef, _) in &sites {
        if accumulated >= total_parking {
            break;
        }
        let mut share = parking_coef * total_parking;
        if accumulated + share > total_parking {
            share = total_parking - accumulated;
        }
        builder.set_capacity(site, share.max(f64::from(floor)).round() as u32)?;
        accumulated += share;
    }

    // Vehicles.
    let mut allocated = 0usize;
    for &(site, _, _, fleet_coef) in &sites {
        if allocated >= params.total_vehicles {
            break;
        }
        let capacity = builder.free_capacity(site) as usize;
        let wanted = match params.allocation {
            FleetAllocation::Random if capacity == 0 => 0,
            FleetAllocation::Random => rng.gen_range(0..capacity),
            FleetAllocation::Proportional => (fleet_coef * params.total_vehicles as f64).round() as usize,
        };
        let n = wanted.min(capacity).min(params.total_vehicles - allocated);
        for _ in 0..n {
            allocated += 1;
            builder.add_vehicle(format!("veh.id.{allocated}"), opts.vehicle_type, opts.initial_soc, site)?;
        }
    }

    let report = SeedReport {
        sites:          sites.len(),
        vehicles:       allocated,
        total_capacity: sites
            .iter()
            .filter_map(|&(s, ..)| builder.site(s))
            .map(|s| u64::from(s.capacity()))
            .sum(),
    };
    info!(
        "coefficient seeding: {} site(s), {} of {} vehicle(s), capacity {} (target {})",
        report.sites, report.vehicles, params.total_vehicles, report.total_capacity, params.total_parking
    );
    Ok(report)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn add_station(
    builder:  &mut FleetBuilder,
    st:       &RawStation,
    capacity: u32,
    opts:     &SeedOptions<'_>,
) -> SeedResult<SiteId> {
    let coord = opts.transform.transform(st.lon, st.lat);
    let site = builder.add_site(format!("stat.id.{}", st.id), coord, capacity)?;
    let name = st.name.clone().unwrap_or_else(|| format!("stat.name.{}", st.id));
    builder.set_site_name(site, name)?;
    Ok(site)
}

fn coefficient(st: &RawStation, value: Option<f64>, field: &'static str) -> SeedResult<f64> {
    let v = value.ok_or_else(|| SeedError::MissingField { station: st.id.clone(), field })?;
    if !v.is_finite() || v < 0.0 {
        return Err(SeedError::InvalidParameter(format!("{field} of station {:?} is {v}", st.id)));
    }
    Ok(v)
}
