//! Plan assembly for a matched carsharing trip.
//!
//! A `Direct` trip expands to:
//!
//! ```text
//! walk (origin → access site)
//! station activity (access, interaction_offset_secs)
//! drive (access site → egress site)
//! station activity (egress, interaction_offset_secs)
//! walk (egress site → destination)
//! ```
//!
//! `StartAtStation` drives from the access site straight to the destination;
//! `EndAtStation` drives from the origin to the egress site.  Each element
//! starts when the previous one ends.

use cs_core::{Coord, SimTime, SiteId};

use crate::{DriveLeg, PathOracle, SpatialResult, TripMatch};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LegRole {
    Access,
    Egress,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlanElement {
    Walk {
        role:        LegRole,
        from:        Coord,
        to:          Coord,
        departure:   SimTime,
        travel_secs: f64,
        distance_m:  f64,
    },
    StationActivity {
        role:          LegRole,
        site:          SiteId,
        start:         SimTime,
        duration_secs: f64,
    },
    Drive(DriveLeg),
}

impl PlanElement {
    pub fn start(&self) -> SimTime {
        match self {
            PlanElement::Walk { departure, .. } => *departure,
            PlanElement::StationActivity { start, .. } => *start,
            PlanElement::Drive(leg) => leg.departure,
        }
    }

    pub fn end(&self) -> SimTime {
        match self {
            PlanElement::Walk { departure, travel_secs, .. } => *departure + *travel_secs,
            PlanElement::StationActivity { start, duration_secs, .. } => *start + *duration_secs,
            PlanElement::Drive(leg) => leg.arrival(),
        }
    }
}

/// Ordered plan elements for one trip.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Itinerary {
    pub elements: Vec<PlanElement>,
}

impl Itinerary {
    pub fn departure(&self) -> Option<SimTime> {
        self.elements.first().map(PlanElement::start)
    }

    pub fn arrival(&self) -> Option<SimTime> {
        self.elements.last().map(PlanElement::end)
    }

    /// Door-to-door duration in seconds (0 for an empty plan).
    pub fn total_secs(&self) -> f64 {
        match (self.departure(), self.arrival()) {
            (Some(d), Some(a)) => a - d,
            _ => 0.0,
        }
    }

    pub fn drive(&self) -> Option<&DriveLeg> {
        self.elements.iter().find_map(|e| match e {
            PlanElement::Drive(leg) => Some(leg),
            _ => None,
        })
    }
}

/// Expand `matched` into walk, station-activity and drive elements.
///
/// The drive leg is costed by `oracle`; its error is propagated unchanged.
pub fn build_itinerary(
    matched:                 &TripMatch,
    origin:                  Coord,
    destination:             Coord,
    departure:               SimTime,
    interaction_offset_secs: f64,
    oracle:                  &impl PathOracle,
) -> SpatialResult<Itinerary> {
    let mut elements = Vec::with_capacity(5);
    let mut now = departure;
    let mut drive_from = origin;
    let mut drive_to = destination;

    if let Some(access) = matched.access {
        elements.push(PlanElement::Walk {
            role:        LegRole::Access,
            from:        origin,
            to:          access.site_coord,
            departure:   now,
            travel_secs: access.walk_secs,
            distance_m:  access.walk_distance_m,
        });
        now += access.walk_secs;
        elements.push(PlanElement::StationActivity {
            role:          LegRole::Access,
            site:          access.site,
            start:         now,
            duration_secs: interaction_offset_secs,
        });
        now += interaction_offset_secs;
        drive_from = access.site_coord;
    }
    if let Some(egress) = matched.egress {
        drive_to = egress.site_coord;
    }

    let leg = oracle.drive(drive_from, drive_to, now)?;
    now = leg.arrival();
    elements.push(PlanElement::Drive(leg));

    if let Some(egress) = matched.egress {
        elements.push(PlanElement::StationActivity {
            role:          LegRole::Egress,
            site:          egress.site,
            start:         now,
            duration_secs: interaction_offset_secs,
        });
        now += interaction_offset_secs;
        elements.push(PlanElement::Walk {
            role:        LegRole::Egress,
            from:        egress.site_coord,
            to:          destination,
            departure:   now,
            travel_secs: egress.walk_secs,
            distance_m:  egress.walk_distance_m,
        });
    }

    Ok(Itinerary { elements })
}
