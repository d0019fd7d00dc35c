//! Unit tests for cs-spatial.
//!
//! Fleets are built by hand on a metric plane; the trip origin is usually
//! the coordinate origin.

#[cfg(test)]
mod helpers {
    use cs_core::Coord;
    use cs_fleet::{Fleet, FleetBuilder, VehicleType};

    /// Sites at the given coordinates, each capacity 2 and holding one
    /// fully charged vehicle.
    pub fn fleet_at(coords: &[(f64, f64)]) -> Fleet {
        let mut b = FleetBuilder::new();
        let ev = b.add_vehicle_type(VehicleType::default());
        for (i, &(x, y)) in coords.iter().enumerate() {
            let s = b.add_site(format!("stat.id.{i}"), Coord::new(x, y), 2).unwrap();
            b.add_vehicle(format!("veh.id.{i}"), ev, 1.0, s).unwrap();
        }
        b.build().unwrap()
    }

    /// Sites without any vehicles.
    pub fn empty_sites_at(coords: &[(f64, f64)]) -> Fleet {
        let mut b = FleetBuilder::new();
        for (i, &(x, y)) in coords.iter().enumerate() {
            b.add_site(format!("stat.id.{i}"), Coord::new(x, y), 1).unwrap();
        }
        b.build().unwrap()
    }

    pub fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }
}

// ── Site index ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod index {
    use cs_core::{Coord, SiteId};

    use super::helpers::*;
    use crate::SiteIndex;

    #[test]
    fn empty_index() {
        let idx = SiteIndex::new(std::iter::empty());
        assert!(idx.is_empty());
        assert!(idx.within_disk(Coord::new(0.0, 0.0), 1_000.0).is_empty());
        assert!(idx.nearest(Coord::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn disk_is_inclusive_and_sorted() {
        let fleet = empty_sites_at(&[(300.0, 0.0), (0.0, 200.0), (-100.0, 0.0), (0.0, 201.0)]);
        let idx = SiteIndex::from_fleet(&fleet);
        assert_eq!(idx.len(), 4);
        let hits = idx.within_disk(Coord::new(0.0, 0.0), 200.0);
        assert_eq!(hits, vec![SiteId(1), SiteId(2)]);
    }

    #[test]
    fn negative_radius_is_empty() {
        let fleet = empty_sites_at(&[(0.0, 0.0)]);
        let idx = SiteIndex::from_fleet(&fleet);
        assert!(idx.within_disk(Coord::new(0.0, 0.0), -1.0).is_empty());
    }

    #[test]
    fn nearest_and_k_nearest() {
        let fleet = empty_sites_at(&[(500.0, 0.0), (10.0, 0.0), (100.0, 0.0)]);
        let idx = SiteIndex::from_fleet(&fleet);
        let p = Coord::new(0.0, 0.0);
        assert_eq!(idx.nearest(p), Some(SiteId(1)));
        assert_eq!(idx.k_nearest(p, 2), vec![SiteId(1), SiteId(2)]);
    }
}

// ── Nearest-site matching ─────────────────────────────────────────────────────

#[cfg(test)]
mod matcher {
    use cs_core::{Coord, FleetConfig, SiteId};

    use super::helpers::*;
    use crate::{NearestSiteMatcher, TripPattern};

    fn matcher(fleet: &cs_fleet::Fleet) -> NearestSiteMatcher {
        NearestSiteMatcher::new(fleet, &FleetConfig::default())
    }

    #[test]
    fn picks_smallest_walk_distance() {
        let fleet = empty_sites_at(&[(50.0, 0.0), (0.0, 50.0), (30.0, 0.0)]);
        let m = matcher(&fleet).nearest_access(Coord::new(0.0, 0.0)).unwrap();
        assert_eq!(m.site, SiteId(2));
        assert!(approx(m.walk_distance_m, 30.0 * 1.3));
        assert!(approx(m.walk_secs, 30.0 * FleetConfig::default().access_walk.secs_per_m));
    }

    #[test]
    fn tie_goes_to_lowest_id() {
        let fleet = empty_sites_at(&[(150.0, 0.0), (40.0, 0.0), (-40.0, 0.0)]);
        let m = matcher(&fleet).nearest_access(Coord::new(0.0, 0.0)).unwrap();
        assert_eq!(m.site, SiteId(1));
    }

    #[test]
    fn nothing_within_radius() {
        let fleet = empty_sites_at(&[(500.0, 0.0)]);
        let matcher = matcher(&fleet);
        let o = Coord::new(0.0, 0.0);
        assert!(matcher.nearest_access(o).is_none());
        assert!(matcher.match_trip(o, Coord::new(450.0, 0.0), TripPattern::Direct).is_none());
    }

    #[test]
    fn egress_excludes_access_site() {
        // Site 0 is closest to both ends of a short trip.
        let fleet = empty_sites_at(&[(50.0, 0.0), (150.0, 0.0)]);
        let trip = matcher(&fleet)
            .match_trip(Coord::new(0.0, 0.0), Coord::new(60.0, 0.0), TripPattern::Direct)
            .unwrap();
        assert_eq!(trip.access.unwrap().site, SiteId(0));
        assert_eq!(trip.egress.unwrap().site, SiteId(1));
    }

    #[test]
    fn egress_excluded_alone_is_infeasible() {
        let fleet = empty_sites_at(&[(50.0, 0.0)]);
        let matcher = matcher(&fleet);
        let trip = matcher.match_trip(Coord::new(0.0, 0.0), Coord::new(60.0, 0.0), TripPattern::Direct);
        assert!(trip.is_none());
        assert!(matcher.nearest_egress(Coord::new(60.0, 0.0), Some(SiteId(0))).is_none());
        assert_eq!(matcher.nearest_egress(Coord::new(60.0, 0.0), None).unwrap().site, SiteId(0));
    }

    #[test]
    fn patterns_request_their_legs() {
        let fleet = empty_sites_at(&[(10.0, 0.0), (5_000.0, 0.0)]);
        let matcher = matcher(&fleet);
        let (o, d) = (Coord::new(0.0, 0.0), Coord::new(5_010.0, 0.0));

        let start = matcher.match_trip(o, d, TripPattern::StartAtStation).unwrap();
        assert_eq!(start.access.map(|m| m.site), Some(SiteId(0)));
        assert!(start.egress.is_none());

        let end = matcher.match_trip(o, d, TripPattern::EndAtStation).unwrap();
        assert!(end.access.is_none());
        assert_eq!(end.egress.map(|m| m.site), Some(SiteId(1)));

        let direct = matcher.match_trip(o, d, TripPattern::Direct).unwrap();
        assert_eq!(direct.access.map(|m| m.site), Some(SiteId(0)));
        assert_eq!(direct.egress.map(|m| m.site), Some(SiteId(1)));
    }

    #[test]
    fn start_at_station_ignores_destination_coverage() {
        let fleet = empty_sites_at(&[(10.0, 0.0)]);
        let matcher = matcher(&fleet);
        let (o, d) = (Coord::new(0.0, 0.0), Coord::new(9_000.0, 0.0));
        assert!(matcher.match_trip(o, d, TripPattern::StartAtStation).is_some());
        assert!(matcher.match_trip(o, d, TripPattern::Direct).is_none());
    }

    #[test]
    fn usable_match_skips_empty_and_full_sites() {
        // Site 0 (nearest to origin) holds no vehicle, site 1 has one.
        let mut b = cs_fleet::FleetBuilder::new();
        let ev = b.add_vehicle_type(cs_fleet::VehicleType::default());
        let s0 = b.add_site("a", Coord::new(10.0, 0.0), 1).unwrap();
        let s1 = b.add_site("b", Coord::new(20.0, 0.0), 1).unwrap();
        let s2 = b.add_site("c", Coord::new(3_000.0, 0.0), 1).unwrap();
        let s3 = b.add_site("d", Coord::new(3_050.0, 0.0), 1).unwrap();
        b.add_vehicle("v1", ev, 1.0, s1).unwrap();
        b.add_vehicle("v2", ev, 1.0, s2).unwrap();
        let fleet = b.build().unwrap();
        let matcher = matcher(&fleet);
        let (o, d) = (Coord::new(0.0, 0.0), Coord::new(3_000.0, 0.0));

        let plain = matcher.match_trip(o, d, TripPattern::Direct).unwrap();
        assert_eq!(plain.access.unwrap().site, s0);
        assert_eq!(plain.egress.unwrap().site, s2);

        let usable = matcher.match_trip_usable(&fleet, o, d, TripPattern::Direct).unwrap();
        assert_eq!(usable.access.unwrap().site, s1);
        assert_eq!(usable.egress.unwrap().site, s3);
    }

    #[test]
    fn fleet_sites_with_vehicles_match_like_empty_ones() {
        let fleet = fleet_at(&[(50.0, 0.0), (30.0, 0.0)]);
        let m = matcher(&fleet).nearest_access(Coord::new(0.0, 0.0)).unwrap();
        assert_eq!(m.site, SiteId(1));
    }
}

// ── Path oracle ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod oracle {
    use cs_core::{Coord, SimTime};

    use super::helpers::approx;
    use crate::{BeelineOracle, PathOracle, SpatialError};

    #[test]
    fn beeline_drive() {
        let o = BeelineOracle { speed_mps: 10.0, detour_factor: 1.5 };
        let leg = o.drive(Coord::new(0.0, 0.0), Coord::new(0.0, 400.0), SimTime(100.0)).unwrap();
        assert!(approx(leg.distance_m, 600.0));
        assert!(approx(leg.travel_secs, 60.0));
        assert!(approx(leg.arrival().secs(), 160.0));
    }

    #[test]
    fn zero_speed_has_no_route() {
        let o = BeelineOracle { speed_mps: 0.0, detour_factor: 1.0 };
        let err = o.drive(Coord::new(0.0, 0.0), Coord::new(1.0, 0.0), SimTime::ZERO);
        assert!(matches!(err, Err(SpatialError::NoRoute { .. })));
    }
}

// ── Itinerary assembly ────────────────────────────────────────────────────────

#[cfg(test)]
mod itinerary {
    use cs_core::{BeelineParams, Coord, FleetConfig, SimTime, SiteId};

    use super::helpers::*;
    use crate::{
        build_itinerary, BeelineOracle, LegRole, NearestSiteMatcher, PlanElement, TripPattern,
    };

    const ORACLE: BeelineOracle = BeelineOracle { speed_mps: 10.0, detour_factor: 1.0 };

    fn config() -> FleetConfig {
        let walk = BeelineParams { distance_factor: 1.0, secs_per_m: 1.0 };
        FleetConfig { access_walk: walk, egress_walk: walk, ..FleetConfig::default() }
    }

    #[test]
    fn direct_trip_timing() {
        let fleet = empty_sites_at(&[(100.0, 0.0), (1_000.0, 0.0)]);
        let cfg = config();
        let matcher = NearestSiteMatcher::new(&fleet, &cfg);
        let (o, d) = (Coord::new(0.0, 0.0), Coord::new(1_100.0, 0.0));
        let trip = matcher.match_trip(o, d, TripPattern::Direct).unwrap();

        let plan = build_itinerary(&trip, o, d, SimTime(1_000.0), cfg.interaction_offset_secs, &ORACLE).unwrap();
        assert_eq!(plan.elements.len(), 5);

        // walk 100 s, activity 60 s, drive 90 s, activity 60 s, walk 100 s
        let ends: Vec<f64> = plan.elements.iter().map(|e| e.end().secs()).collect();
        let expected = [1_100.0, 1_160.0, 1_250.0, 1_310.0, 1_410.0];
        for (got, want) in ends.iter().zip(expected) {
            assert!(approx(*got, want), "{got} != {want}");
        }
        assert!(approx(plan.total_secs(), 410.0));

        assert!(matches!(
            plan.elements[1],
            PlanElement::StationActivity { role: LegRole::Access, site: SiteId(0), .. }
        ));
        assert!(matches!(
            plan.elements[3],
            PlanElement::StationActivity { role: LegRole::Egress, site: SiteId(1), .. }
        ));
        let drive = plan.drive().unwrap();
        assert_eq!(drive.from, Coord::new(100.0, 0.0));
        assert_eq!(drive.to, Coord::new(1_000.0, 0.0));
    }

    #[test]
    fn elements_are_contiguous() {
        let fleet = empty_sites_at(&[(100.0, 50.0), (2_000.0, 30.0)]);
        let cfg = FleetConfig::default();
        let matcher = NearestSiteMatcher::new(&fleet, &cfg);
        let (o, d) = (Coord::new(0.0, 0.0), Coord::new(2_050.0, 0.0));
        let trip = matcher.match_trip(o, d, TripPattern::Direct).unwrap();
        let plan = build_itinerary(&trip, o, d, SimTime(0.0), 45.0, &BeelineOracle::default()).unwrap();

        for pair in plan.elements.windows(2) {
            assert!(approx(pair[0].end().secs(), pair[1].start().secs()));
        }
    }

    #[test]
    fn start_at_station_drives_to_destination() {
        let fleet = empty_sites_at(&[(100.0, 0.0)]);
        let cfg = config();
        let matcher = NearestSiteMatcher::new(&fleet, &cfg);
        let (o, d) = (Coord::new(0.0, 0.0), Coord::new(1_100.0, 0.0));
        let trip = matcher.match_trip(o, d, TripPattern::StartAtStation).unwrap();
        let plan = build_itinerary(&trip, o, d, SimTime::ZERO, 60.0, &ORACLE).unwrap();

        assert_eq!(plan.elements.len(), 3);
        let drive = plan.drive().unwrap();
        assert_eq!(drive.to, d);
        assert!(approx(plan.total_secs(), 100.0 + 60.0 + 100.0));
    }

    #[test]
    fn end_at_station_drives_from_origin() {
        let fleet = empty_sites_at(&[(1_000.0, 0.0)]);
        let cfg = config();
        let matcher = NearestSiteMatcher::new(&fleet, &cfg);
        let (o, d) = (Coord::new(0.0, 0.0), Coord::new(1_100.0, 0.0));
        let trip = matcher.match_trip(o, d, TripPattern::EndAtStation).unwrap();
        let plan = build_itinerary(&trip, o, d, SimTime::ZERO, 60.0, &ORACLE).unwrap();

        assert_eq!(plan.elements.len(), 3);
        assert!(matches!(plan.elements[0], PlanElement::Drive(_)));
        assert_eq!(plan.drive().unwrap().from, o);
        assert!(approx(plan.total_secs(), 100.0 + 60.0 + 100.0));
    }

    #[test]
    fn oracle_failure_propagates() {
        let fleet = empty_sites_at(&[(100.0, 0.0), (1_000.0, 0.0)]);
        let cfg = config();
        let matcher = NearestSiteMatcher::new(&fleet, &cfg);
        let (o, d) = (Coord::new(0.0, 0.0), Coord::new(1_100.0, 0.0));
        let trip = matcher.match_trip(o, d, TripPattern::Direct).unwrap();
        let broken = BeelineOracle { speed_mps: 0.0, detour_factor: 1.0 };
        assert!(build_itinerary(&trip, o, d, SimTime::ZERO, 60.0, &broken).is_err());
    }
}
