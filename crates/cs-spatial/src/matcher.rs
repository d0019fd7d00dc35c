//! Nearest-site matching for customer trips.
//!
//! For each leg the matcher runs a disk query of radius `search_distance_m`
//! around the trip end and scores every candidate with the beeline model:
//!
//! ```text
//! walk_distance = euclid(point, site) × distance_factor
//! walk_secs     = euclid(point, site) × secs_per_m
//! ```
//!
//! The candidate with the strictly smallest walk distance wins, so on a tie
//! the first candidate enumerated by the index (lowest `SiteId`) is kept.
//! The egress search skips the access site, so a door-to-door trip never
//! picks up and drops off at the same site.

use cs_core::{BeelineParams, Coord, FleetConfig, SiteId};
use cs_fleet::FleetView;

use crate::SiteIndex;

/// Which station legs a carsharing trip has.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TripPattern {
    /// Pick up at a site near the origin, drop off at a site near the destination.
    Direct,
    /// Pick up at a site; the trip ends away from any station.
    StartAtStation,
    /// The vehicle is already with the customer; drop off at a site.
    EndAtStation,
}

impl TripPattern {
    #[inline]
    pub fn needs_access(self) -> bool {
        matches!(self, TripPattern::Direct | TripPattern::StartAtStation)
    }

    #[inline]
    pub fn needs_egress(self) -> bool {
        matches!(self, TripPattern::Direct | TripPattern::EndAtStation)
    }
}

/// The site chosen for one leg and the walk to or from it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SiteMatch {
    pub site:            SiteId,
    pub site_coord:      Coord,
    pub walk_distance_m: f64,
    pub walk_secs:       f64,
}

/// Result of matching one trip.  A leg the pattern does not need is `None`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TripMatch {
    pub pattern: TripPattern,
    pub access:  Option<SiteMatch>,
    pub egress:  Option<SiteMatch>,
}

pub struct NearestSiteMatcher {
    index:             SiteIndex,
    coords:            Vec<Coord>,
    search_distance_m: f64,
    access_walk:       BeelineParams,
    egress_walk:       BeelineParams,
}

impl NearestSiteMatcher {
    /// Build the index over every site of `fleet`.
    pub fn new(fleet: &impl FleetView, config: &FleetConfig) -> Self {
        Self {
            index:             SiteIndex::from_fleet(fleet),
            coords:            fleet.sites().iter().map(|s| s.coord()).collect(),
            search_distance_m: config.search_distance_m,
            access_walk:       config.access_walk,
            egress_walk:       config.egress_walk,
        }
    }

    pub fn index(&self) -> &SiteIndex {
        &self.index
    }

    /// Nearest site to a trip origin.
    pub fn nearest_access(&self, origin: Coord) -> Option<SiteMatch> {
        self.nearest(origin, self.access_walk, |_| true)
    }

    /// Nearest site to a trip destination, never `exclude`.
    pub fn nearest_egress(&self, destination: Coord, exclude: Option<SiteId>) -> Option<SiteMatch> {
        self.nearest(destination, self.egress_walk, |s| Some(s) != exclude)
    }

    /// Match both ends of a trip.
    ///
    /// Returns `None` ("no feasible carsharing trip") when a leg required by
    /// `pattern` has no site within the search radius.
    pub fn match_trip(&self, origin: Coord, destination: Coord, pattern: TripPattern) -> Option<TripMatch> {
        self.match_filtered(origin, destination, pattern, |_| true, |_| true)
    }

    /// Like [`match_trip`](Self::match_trip) but only considers access sites
    /// with an idle vehicle and egress sites with a free slot.
    pub fn match_trip_usable(
        &self,
        fleet:       &impl FleetView,
        origin:      Coord,
        destination: Coord,
        pattern:     TripPattern,
    ) -> Option<TripMatch> {
        let has_idle = |s: SiteId| {
            fleet.site(s).is_some_and(|site| {
                site.parking()
                    .iter()
                    .any(|&v| fleet.vehicle(v).is_some_and(|v| v.status() == cs_core::TripStatus::Idle))
            })
        };
        let has_room = |s: SiteId| fleet.site(s).is_some_and(|site| !site.is_full());
        self.match_filtered(origin, destination, pattern, has_idle, has_room)
    }

    fn match_filtered(
        &self,
        origin:        Coord,
        destination:   Coord,
        pattern:       TripPattern,
        access_filter: impl Fn(SiteId) -> bool,
        egress_filter: impl Fn(SiteId) -> bool,
    ) -> Option<TripMatch> {
        let access = if pattern.needs_access() {
            Some(self.nearest(origin, self.access_walk, &access_filter)?)
        } else {
            None
        };
        let excluded = access.map(|m| m.site);
        let egress = if pattern.needs_egress() {
            Some(self.nearest(destination, self.egress_walk, |s| Some(s) != excluded && egress_filter(s))?)
        } else {
            None
        };
        if access.is_none() && egress.is_none() {
            log::debug!("no station leg requested between {origin} and {destination}");
        }
        Some(TripMatch { pattern, access, egress })
    }

    fn nearest(&self, point: Coord, walk: BeelineParams, accept: impl Fn(SiteId) -> bool) -> Option<SiteMatch> {
        let mut best: Option<SiteMatch> = None;
        for site in self.index.within_disk(point, self.search_distance_m) {
            if !accept(site) {
                continue;
            }
            let site_coord = self.coords[site.index()];
            let beeline = point.distance(site_coord);
            let walk_distance_m = beeline * walk.distance_factor;
            if best.is_none_or(|b| walk_distance_m < b.walk_distance_m) {
                best = Some(SiteMatch {
                    site,
                    site_coord,
                    walk_distance_m,
                    walk_secs: beeline * walk.secs_per_m,
                });
            }
        }
        best
    }
}
