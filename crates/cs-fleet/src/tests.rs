//! Unit tests for cs-fleet.

use cs_core::{Coord, SimTime, SiteId, VehicleId};

use crate::{Fleet, FleetBuilder, VehicleType};

// ── Helpers ───────────────────────────────────────────────────────────────────

const T0: SimTime = SimTime(28_800.0);

/// Three sites on a line, 1 km apart.
///
/// | site | capacity | deployed (soc)        |
/// |------|----------|-----------------------|
/// | 0    | 4        | v0 (1.0), v1 (1.0), v2 (0.03) |
/// | 1    | 2        | v3 (0.5)              |
/// | 2    | 3        | -                     |
fn three_site_fleet() -> (Fleet, [SiteId; 3], [VehicleId; 4]) {
    let mut b = FleetBuilder::new();
    let ev = b.add_vehicle_type(VehicleType::default());
    let s0 = b.add_site("stat.id.0", Coord::new(0.0, 0.0), 4).unwrap();
    let s1 = b.add_site("stat.id.1", Coord::new(1_000.0, 0.0), 2).unwrap();
    let s2 = b.add_site("stat.id.2", Coord::new(2_000.0, 0.0), 3).unwrap();
    let v0 = b.add_vehicle("veh.id.0", ev, 1.0, s0).unwrap();
    let v1 = b.add_vehicle("veh.id.1", ev, 1.0, s0).unwrap();
    let v2 = b.add_vehicle("veh.id.2", ev, 0.03, s0).unwrap();
    let v3 = b.add_vehicle("veh.id.3", ev, 0.5, s1).unwrap();
    (b.build().unwrap(), [s0, s1, s2], [v0, v1, v2, v3])
}

// ── Energy model ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod energy {
    use crate::{Battery, ConsumptionCurve, VehicleType};

    #[test]
    fn consumption_is_linear_in_distance() {
        let b = VehicleType::default().battery(1.0);
        let vmax = 36.0;
        let one = b.energy_for_consumption(1_000.0, vmax, vmax);
        let ten = b.energy_for_consumption(10_000.0, vmax, vmax);
        assert!((one - 0.18).abs() < 1e-12, "got {one}");
        assert!((ten - 10.0 * one).abs() < 1e-9);
    }

    #[test]
    fn slower_average_consumes_less() {
        let b = VehicleType::default().battery(1.0);
        let fast = b.energy_for_consumption(5_000.0, 36.0, 36.0);
        let slow = b.energy_for_consumption(5_000.0, 36.0, 18.0);
        assert!(slow < fast);
    }

    #[test]
    fn zero_max_speed_uses_base_rate() {
        let curve = ConsumptionCurve { base_kwh_per_km: 0.1, speed_kwh_per_km: 5.0 };
        let b = Battery::new(10.0, 1.0, curve);
        assert!((b.energy_for_consumption(2_000.0, 0.0, 10.0) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn charged_enough_matches_consumption() {
        // 24 kWh × 0.05 = 1.2 kWh available; 5 km at full speed = 0.9 kWh.
        let b = VehicleType::default().battery(0.05);
        assert!(b.is_charged_enough(5_000.0, 36.0, 36.0));
        // 7 km = 1.26 kWh > 1.2 kWh.
        assert!(!b.is_charged_enough(7_000.0, 36.0, 36.0));
        let need = b.energy_for_consumption(7_000.0, 36.0, 36.0);
        assert!(need > b.available_kwh());
    }

    #[test]
    fn discharge_is_monotone_and_saturates() {
        let mut b = VehicleType::default().battery(0.5);
        let before = b.soc();
        b.discharge(1.2);
        assert!(b.soc() < before);
        assert!((b.soc() - 0.45).abs() < 1e-12);
        b.discharge(-3.0);
        assert!((b.soc() - 0.45).abs() < 1e-12, "negative drain must not charge");
        b.discharge(1_000.0);
        assert_eq!(b.soc(), 0.0);
    }

    #[test]
    fn soc_is_clamped_on_construction() {
        assert_eq!(VehicleType::default().battery(1.7).soc(), 1.0);
        assert_eq!(VehicleType::default().battery(-0.2).soc(), 0.0);
    }
}

// ── FleetBuilder ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use super::*;
    use crate::{FleetError, FleetView};

    #[test]
    fn build_moves_deployment_into_parking() {
        let (fleet, [s0, s1, s2], [v0, v1, v2, v3]) = three_site_fleet();
        assert_eq!(fleet.site(s0).unwrap().parking(), &[v0, v1, v2]);
        assert_eq!(fleet.site(s1).unwrap().parking(), &[v3]);
        assert!(fleet.site(s2).unwrap().parking().is_empty());
        assert_eq!(fleet.parked_count(), 4);
        assert_eq!(fleet.total_capacity(), 9);
        assert!(fleet.capacity_invariant_holds());
    }

    #[test]
    fn key_lookup() {
        let (fleet, [_, s1, _], [_, _, _, v3]) = three_site_fleet();
        assert_eq!(fleet.site_by_key("stat.id.1"), Some(s1));
        assert_eq!(fleet.vehicle_by_key("veh.id.3"), Some(v3));
        assert_eq!(fleet.site_by_key("nope"), None);
    }

    #[test]
    fn names_and_links() {
        let mut b = FleetBuilder::new();
        let ev = b.add_vehicle_type(VehicleType::default());
        let s = b.add_site("stat.id.7", Coord::new(0.0, 0.0), 2).unwrap();
        let v = b.add_vehicle("veh.id.1", ev, 1.0, s).unwrap();
        b.set_site_name(s, "Bastille").unwrap();
        b.set_site_link(s, cs_core::LinkId(31)).unwrap();
        b.set_vehicle_name(v, "Zoe 1").unwrap();
        assert!(matches!(
            b.set_vehicle_name(VehicleId(9), "x"),
            Err(FleetError::Core(cs_core::CsError::VehicleNotFound(_)))
        ));
        assert!(matches!(b.set_site_link(SiteId(5), cs_core::LinkId(1)), Err(FleetError::SiteNotFound(_))));

        let fleet = b.build().unwrap();
        let site = fleet.site(s).unwrap();
        assert_eq!(site.name(), "Bastille");
        assert_eq!(site.link(), cs_core::LinkId(31));
        assert_eq!(fleet.vehicle(v).unwrap().name(), "Zoe 1");
        assert_eq!(fleet.vehicle(v).unwrap().key(), "veh.id.1");
    }

    #[test]
    fn duplicate_site_key_rejected() {
        let mut b = FleetBuilder::new();
        b.add_site("a", Coord::default(), 1).unwrap();
        assert!(matches!(
            b.add_site("a", Coord::default(), 1),
            Err(FleetError::DuplicateSiteKey(_))
        ));
    }

    #[test]
    fn vehicle_over_capacity_rejected() {
        let mut b = FleetBuilder::new();
        let ev = b.add_vehicle_type(VehicleType::default());
        let s = b.add_site("a", Coord::default(), 1).unwrap();
        b.add_vehicle("v0", ev, 1.0, s).unwrap();
        assert!(matches!(
            b.add_vehicle("v1", ev, 1.0, s),
            Err(FleetError::SiteFull { .. })
        ));
        assert_eq!(b.free_capacity(s), 0);
    }

    #[test]
    fn capacity_cannot_shrink_below_deployment() {
        let mut b = FleetBuilder::new();
        let ev = b.add_vehicle_type(VehicleType::default());
        let s = b.add_site("a", Coord::default(), 3).unwrap();
        b.add_vehicle("v0", ev, 1.0, s).unwrap();
        b.add_vehicle("v1", ev, 1.0, s).unwrap();
        assert!(b.set_capacity(s, 1).is_err());
        b.set_capacity(s, 2).unwrap();
        assert_eq!(b.site(s).unwrap().capacity(), 2);
    }

    #[test]
    fn unknown_vehicle_type_rejected() {
        let mut b = FleetBuilder::new();
        let s = b.add_site("a", Coord::default(), 3).unwrap();
        assert!(matches!(
            b.add_vehicle("v0", cs_core::VehicleTypeId(9), 1.0, s),
            Err(FleetError::VehicleTypeNotFound(_))
        ));
    }
}

// ── Pickup ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod pickup {
    use super::*;
    use cs_core::TripStatus;
    use crate::{FleetOps, FleetView, PickupError};

    #[test]
    fn takes_vehicles_in_parking_order() {
        let (mut fleet, [s0, ..], [v0, v1, v2, _]) = three_site_fleet();
        let train = fleet.pickup(s0, 2, 1_000.0, T0).unwrap();
        assert_eq!(train.vehicles(), &[v0, v1]);
        assert_eq!(train.head(), v0);
        assert_eq!(fleet.site(s0).unwrap().parking(), &[v2]);
        assert_eq!(fleet.vehicle(v0).unwrap().status(), TripStatus::Relocating);
        assert_eq!(fleet.vehicle(v1).unwrap().status(), TripStatus::Relocating);
        assert_eq!(fleet.vehicle(v2).unwrap().status(), TripStatus::Idle);
    }

    #[test]
    fn count_larger_than_parking_takes_what_is_there() {
        let (mut fleet, [_, s1, _], [.., v3]) = three_site_fleet();
        let train = fleet.pickup(s1, 5, 1_000.0, T0).unwrap();
        assert_eq!(train.vehicles(), &[v3]);
        assert!(fleet.site(s1).unwrap().parking().is_empty());
    }

    #[test]
    fn empty_site_fails() {
        let (mut fleet, [_, _, s2], _) = three_site_fleet();
        assert_eq!(fleet.pickup(s2, 1, 10.0, T0), Err(PickupError::NoVehicles(s2)));
    }

    #[test]
    fn unknown_site_fails() {
        let (mut fleet, ..) = three_site_fleet();
        assert_eq!(
            fleet.pickup(SiteId(99), 1, 10.0, T0),
            Err(PickupError::UnknownSite(SiteId(99)))
        );
    }

    #[test]
    fn energy_gate_is_all_or_nothing() {
        // v2 holds 0.72 kWh; 5 km needs 0.9 kWh.  v0 and v1 are fine.
        let (mut fleet, [s0, ..], [v0, v1, v2, _]) = three_site_fleet();
        let before = fleet.site(s0).unwrap().parking().to_vec();

        let err = fleet.pickup(s0, 3, 5_000.0, T0).unwrap_err();
        assert!(matches!(err, PickupError::InsufficientEnergy { vehicle, .. } if vehicle == v2));

        assert_eq!(fleet.site(s0).unwrap().parking(), before.as_slice());
        for v in [v0, v1, v2] {
            assert_eq!(fleet.vehicle(v).unwrap().status(), TripStatus::Idle);
        }
    }

    #[test]
    fn gate_only_checks_the_requested_prefix() {
        // The low vehicle is third in line; a pickup of two never looks at it.
        let (mut fleet, [s0, ..], [v0, v1, ..]) = three_site_fleet();
        let train = fleet.pickup(s0, 2, 5_000.0, T0).unwrap();
        assert_eq!(train.vehicles(), &[v0, v1]);
    }

    #[test]
    fn reserved_vehicles_are_skipped() {
        let (mut fleet, [s0, ..], [v0, v1, ..]) = three_site_fleet();
        fleet.book(s0, cs_core::CustomerId(1), 100.0, T0).unwrap();
        let train = fleet.pickup(s0, 1, 100.0, T0).unwrap();
        assert_eq!(train.vehicles(), &[v1]);
        assert_eq!(fleet.vehicle(v0).unwrap().status(), TripStatus::EnRouteToPickup);
    }

    #[test]
    fn drive_train_discharges_every_vehicle() {
        let (mut fleet, [s0, ..], [v0, v1, ..]) = three_site_fleet();
        let train = fleet.pickup(s0, 2, 1_000.0, T0).unwrap();
        fleet.drive_train(&train, 10_000.0);
        for v in [v0, v1] {
            let soc = fleet.vehicle(v).unwrap().battery().soc();
            assert!((soc - (1.0 - 1.8 / 24.0)).abs() < 1e-9, "got {soc}");
        }
    }
}

// ── Dropoff ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod dropoff {
    use super::*;
    use cs_core::TripStatus;
    use crate::{FleetOps, FleetView};

    #[test]
    fn dropoff_parks_and_idles() {
        let (mut fleet, [s0, _, s2], [v0, v1, ..]) = three_site_fleet();
        let train = fleet.pickup(s0, 2, 1_000.0, T0).unwrap();
        fleet.dropoff(s2, train, T0 + 300.0).unwrap();
        assert_eq!(fleet.site(s2).unwrap().parking(), &[v0, v1]);
        assert_eq!(fleet.vehicle(v0).unwrap().status(), TripStatus::Idle);
        assert!(fleet.capacity_invariant_holds());
    }

    #[test]
    fn full_site_hands_train_back() {
        // s1: capacity 2, one parked → one free slot; train of two.
        let (mut fleet, [s0, s1, _], [v0, v1, ..]) = three_site_fleet();
        let train = fleet.pickup(s0, 2, 1_000.0, T0).unwrap();
        let occupancy = fleet.site(s1).unwrap().occupancy();

        let rejected = fleet.dropoff(s1, train, T0).unwrap_err();
        assert_eq!(rejected.site, s1);
        assert_eq!(rejected.free_slots, 1);
        assert_eq!(rejected.train.vehicles(), &[v0, v1]);
        assert_eq!(fleet.site(s1).unwrap().occupancy(), occupancy);
        assert_eq!(fleet.vehicle(v0).unwrap().status(), TripStatus::Relocating);
    }

    #[test]
    fn unknown_site_hands_train_back() {
        let (mut fleet, [s0, ..], _) = three_site_fleet();
        let train = fleet.pickup(s0, 1, 1_000.0, T0).unwrap();
        let rejected = fleet.dropoff(SiteId(42), train, T0).unwrap_err();
        assert_eq!(rejected.train.len(), 1);
    }
}

// ── Randomised invariants ─────────────────────────────────────────────────────

#[cfg(test)]
mod invariants {
    use super::*;
    use cs_core::SimRng;
    use crate::{FleetOps, FleetView, RoadTrain};

    /// Fuzz pickups and dropoffs across the three sites.  After every step:
    /// the capacity invariant holds and no vehicle is created or lost.
    #[test]
    fn capacity_and_conservation_under_random_moves() {
        for seed in 0..20 {
            let (mut fleet, sites, _) = three_site_fleet();
            let total = fleet.vehicle_count();
            let mut rng = SimRng::new(seed);
            let mut held: Vec<RoadTrain> = Vec::new();

            for step in 0..200 {
                let site = sites[rng.gen_range(0..sites.len())];
                let time = T0 + step as f64;
                if held.is_empty() || rng.gen_bool(0.5) {
                    let count = rng.gen_range(1..=3);
                    let distance = rng.gen_range(0.0..6_000.0);
                    if let Ok(train) = fleet.pickup(site, count, distance, time) {
                        held.push(train);
                    }
                } else {
                    let i = rng.gen_range(0..held.len());
                    let train = held.swap_remove(i);
                    if let Err(rejected) = fleet.dropoff(site, train, time) {
                        held.push(rejected.train);
                    }
                }

                assert!(fleet.capacity_invariant_holds(), "seed {seed} step {step}");
                let in_trains: usize = held.iter().map(RoadTrain::len).sum();
                assert_eq!(fleet.parked_count() + in_trains, total, "seed {seed} step {step}");
            }
        }
    }

    #[test]
    fn every_vehicle_has_exactly_one_holder() {
        let (mut fleet, [s0, s1, _], _) = three_site_fleet();
        let train = fleet.pickup(s0, 2, 100.0, T0).unwrap();
        let rented = fleet.book(s1, cs_core::CustomerId(0), 100.0, T0).unwrap();
        let rented_vehicle = fleet.start_rental(rented, T0).unwrap();

        for v in fleet.vehicles() {
            let parked = fleet.sites().iter().filter(|s| s.parking().contains(&v.id())).count();
            assert_eq!(fleet.site_of(v.id()).is_some(), parked == 1);
            let carried = train.vehicles().contains(&v.id()) as usize;
            let driven = (v.id() == rented_vehicle) as usize;
            assert_eq!(parked + carried + driven, 1, "{}", v.id());
        }
    }
}

// ── Bookings ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod bookings {
    use super::*;
    use cs_core::{CustomerId, TripStatus};
    use crate::{BookingError, BookingState, FleetOps, FleetView};

    #[test]
    fn full_rental_lifecycle() {
        let (mut fleet, [s0, _, s2], [v0, ..]) = three_site_fleet();
        let id = fleet.book(s0, CustomerId(5), 2_000.0, T0).unwrap();
        assert_eq!(fleet.booking(id).unwrap().vehicle, v0);
        assert_eq!(fleet.vehicle(v0).unwrap().status(), TripStatus::EnRouteToPickup);
        assert!(fleet.site(s0).unwrap().parking().contains(&v0));

        assert_eq!(fleet.start_rental(id, T0 + 120.0).unwrap(), v0);
        assert!(!fleet.site(s0).unwrap().parking().contains(&v0));
        assert_eq!(fleet.vehicle(v0).unwrap().status(), TripStatus::Rented);
        assert_eq!(fleet.rented_count(), 1);

        fleet.end_rental(id, s2, 2_000.0, T0 + 600.0).unwrap();
        let record = fleet.booking(id).unwrap();
        assert_eq!(record.state, BookingState::Completed);
        assert_eq!(record.return_site, Some(s2));
        assert_eq!(fleet.site(s2).unwrap().parking(), &[v0]);
        assert!(fleet.vehicle(v0).unwrap().battery().soc() < 1.0);
        assert_eq!(fleet.rented_count(), 0);
    }

    #[test]
    fn book_skips_vehicles_without_enough_charge() {
        // Only v2 (0.72 kWh) is left idle after taking v0 and v1 away.
        let (mut fleet, [s0, ..], _) = three_site_fleet();
        let _train = fleet.pickup(s0, 2, 100.0, T0).unwrap();
        assert!(matches!(
            fleet.book(s0, CustomerId(1), 10_000.0, T0),
            Err(BookingError::NoVehicleAvailable { .. })
        ));
    }

    #[test]
    fn return_to_full_site_keeps_rental_open() {
        let (mut fleet, [s0, s1, _], _) = three_site_fleet();
        let other = fleet.book(s0, CustomerId(1), 100.0, T0).unwrap();
        fleet.start_rental(other, T0).unwrap();
        fleet.end_rental(other, s1, 100.0, T0).unwrap(); // s1 now 2/2

        let id = fleet.book(s0, CustomerId(2), 100.0, T0).unwrap();
        fleet.start_rental(id, T0).unwrap();
        assert_eq!(fleet.end_rental(id, s1, 100.0, T0), Err(BookingError::SiteFull(s1)));
        assert_eq!(fleet.booking(id).unwrap().state, BookingState::InRental);
        assert!(fleet.capacity_invariant_holds());
    }

    #[test]
    fn cancel_releases_reservation() {
        let (mut fleet, [s0, ..], [v0, ..]) = three_site_fleet();
        let id = fleet.book(s0, CustomerId(1), 100.0, T0).unwrap();
        fleet.cancel(id, T0).unwrap();
        assert_eq!(fleet.vehicle(v0).unwrap().status(), TripStatus::Idle);
        assert!(matches!(fleet.start_rental(id, T0), Err(BookingError::WrongState { .. })));
    }
}
