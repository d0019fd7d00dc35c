//! The relocation engine: dispatches pickup and dropoff tasks to operators.
//!
//! # Pickup
//!
//! | Mode            | Action                                                        | Result  |
//! |-----------------|---------------------------------------------------------------|---------|
//! | `ReadyToPickup` | `fleet.pickup`; train held (or appended), mode → `Carrying`   | `true`  |
//! | `ReadyToPickup` | pickup failed; `[RPickupENERGY-KO]` or `[R-PU-KO]` logged      | `false` |
//! | `Carrying`      | drive toward the task site, mode → `ReadyToPickup` (deferred) | `false` |
//!
//! A redirected operator still holds its train.  Before coupling more
//! vehicles, the held ones are gated for the new carry distance as well; if
//! any falls short the whole pickup fails with `[RPickupENERGY-KO]`.
//!
//! # Dropoff
//!
//! The mode flips to `ReadyToPickup` before `fleet.dropoff` and reverts to
//! `Carrying` if the site rejects the train, with one `[R-DO-KO]` line per
//! held vehicle.  A rejected dropoff changes nothing in the fleet.

use log::{debug, error, info, warn};

use cs_core::{Coord, LinkId, OperatorId, SimTime, SiteId, VehicleId};
use cs_fleet::{DropoffRejected, FleetOps, FleetView, PickupError};
use cs_spatial::{DriveLeg, PathOracle};

use crate::{
    MovementState, Operator, OperatorMode, OperatorStore, RelocationError, RelocationEvent,
    RelocationEventKind, RelocationObserver, RelocationResult, RelocationTask,
};

/// Wraps a [`PathOracle`] and the [`OperatorStore`].
///
/// `P` is chosen at compile time; tests and demos use
/// [`BeelineOracle`](cs_spatial::BeelineOracle).
pub struct RelocationEngine<P: PathOracle> {
    pub oracle: P,
    pub store:  OperatorStore,
}

/// Site fields copied out of the fleet for audit lines.
struct SiteInfo {
    key:   String,
    link:  LinkId,
    coord: Option<Coord>,
}

impl SiteInfo {
    fn lookup(fleet: &impl FleetView, site: SiteId) -> Self {
        match fleet.site(site) {
            Some(s) => Self { key: s.key().to_owned(), link: s.link(), coord: Some(s.coord()) },
            None => Self { key: site.to_string(), link: LinkId::INVALID, coord: None },
        }
    }
}

impl<P: PathOracle> RelocationEngine<P> {
    pub fn new(oracle: P) -> Self {
        Self { oracle, store: OperatorStore::new() }
    }

    /// Register an operator standing at `location`, ready to pick up.
    pub fn add_operator(&mut self, location: Coord, time: SimTime) -> OperatorId {
        self.store.add(location, time)
    }

    pub fn operator(&self, id: OperatorId) -> Option<&Operator> {
        self.store.get(id)
    }

    /// Send `agent` on an empty drive to `to` (e.g. toward its next pickup).
    pub fn begin_drive(&mut self, agent: OperatorId, to: Coord, now: SimTime) -> RelocationResult<DriveLeg> {
        let op = self.store.get_mut(agent).ok_or(RelocationError::UnknownOperator(agent))?;
        if op.movement.in_transit {
            return Err(RelocationError::AlreadyInTransit(agent));
        }
        let leg = self.oracle.drive(op.location, to, now)?;
        op.movement = MovementState {
            in_transit: true,
            from:       op.location,
            to,
            departure:  now,
            arrival:    leg.arrival(),
        };
        Ok(leg)
    }

    /// Complete every drive leg with `arrival <= now`.
    ///
    /// Returns `(OperatorId, Coord)` for each operator that arrived.
    pub fn tick_arrivals(&mut self, now: SimTime) -> Vec<(OperatorId, Coord)> {
        self.store
            .iter_mut()
            .filter(|o| o.movement.in_transit && o.movement.arrival <= now)
            .map(|o| {
                let at = o.movement.to;
                o.location = at;
                o.movement = MovementState::stationary(at, now);
                (o.id, at)
            })
            .collect()
    }

    // ── Pickup ────────────────────────────────────────────────────────────────

    /// Execute a pickup task.  Returns `true` if vehicles were taken.
    pub fn process_pickup<F, O>(
        &mut self,
        fleet:    &mut F,
        time:     SimTime,
        task:     &RelocationTask,
        observer: &mut O,
    ) -> bool
    where
        F: FleetOps,
        O: RelocationObserver,
    {
        let site = SiteInfo::lookup(&*fleet, task.site);
        let Some(op) = self.store.get_mut(task.agent) else {
            error!(
                "[R-PU-KO] T:{time} |task:{} |staId:{} |link:{} |agent:{} unknown operator",
                task.id, site.key, site.link, task.agent
            );
            return false;
        };

        match op.mode {
            // Vehicles already held ride the new carry too, so they face the same gate.
            OperatorMode::ReadyToPickup => match fleet
                .gate_carry(task.site, op.held_vehicles(), task.distance_m, time)
                .and_then(|()| fleet.pickup(task.site, task.size, task.distance_m, time))
            {
                Ok(train) => {
                    for v in train.iter() {
                        observer.on_event(&vehicle_event(&*fleet, time, RelocationEventKind::Pickup, task, site.link, v));
                    }
                    let taken = train.len();
                    match op.train.as_mut() {
                        Some(held) => held.append(train),
                        None => op.train = Some(train),
                    }
                    op.mode = OperatorMode::Carrying;
                    op.pending_carry_m = task.distance_m;
                    if let Some(at) = site.coord {
                        op.location = at;
                        op.movement = MovementState::stationary(at, time);
                    }
                    info!(
                        "T:{time} |task:{} |staId:{} |agent:{} picked up {taken} vehicle(s), holding {}",
                        task.id,
                        site.key,
                        task.agent,
                        op.held_vehicles().len()
                    );
                    true
                }
                Err(PickupError::InsufficientEnergy { vehicle, required_kwh, available_kwh, .. }) => {
                    let event = vehicle_event(
                        &*fleet,
                        time,
                        RelocationEventKind::PickupEnergyKo,
                        task,
                        site.link,
                        vehicle,
                    );
                    warn!(
                        "[RPickupENERGY-KO] T:{time} |task:{} |staId:{} |link:{} |agent:{} |vehId:{vehicle} \
                         |status:{} |soc:{:.3} |required:{required_kwh:.3} |available:{available_kwh:.3}",
                        task.id,
                        site.key,
                        site.link,
                        task.agent,
                        event.status.map_or("unknown", |s| s.as_str()),
                        event.soc.unwrap_or(f64::NAN)
                    );
                    observer.on_event(&event);
                    false
                }
                Err(e) => {
                    warn!(
                        "[R-PU-KO] T:{time} |task:{} |staId:{} |link:{} |agent:{} |reason:{e}",
                        task.id, site.key, site.link, task.agent
                    );
                    observer.on_event(&task_event(time, RelocationEventKind::PickupKo, task, site.link));
                    false
                }
            },

            OperatorMode::Carrying => {
                let Some(target) = site.coord else {
                    warn!(
                        "[R-PU-KO] T:{time} |task:{} |staId:{} |agent:{} unknown site while carrying",
                        task.id, site.key, task.agent
                    );
                    return false;
                };
                let from = op.location;
                match self.oracle.drive(from, target, time) {
                    Ok(leg) => {
                        let held: Vec<VehicleId> = op.held_vehicles().to_vec();
                        fleet.drive_vehicles(&held, leg.distance_m);
                        op.mode = OperatorMode::ReadyToPickup;
                        op.movement = MovementState {
                            in_transit: true,
                            from,
                            to:         target,
                            departure:  time,
                            arrival:    leg.arrival(),
                        };
                        debug!(
                            "T:{time} |task:{} |staId:{} |agent:{} redirected with {} vehicle(s), \
                             {:.0} m, arrives {}",
                            task.id,
                            site.key,
                            task.agent,
                            held.len(),
                            leg.distance_m,
                            leg.arrival()
                        );
                        let mut event = task_event(time, RelocationEventKind::Deferred, task, site.link);
                        event.vehicle = held.first().copied();
                        observer.on_event(&event);
                    }
                    Err(e) => {
                        warn!(
                            "[R-PU-KO] T:{time} |task:{} |staId:{} |link:{} |agent:{} |reason:{e}",
                            task.id, site.key, site.link, task.agent
                        );
                    }
                }
                false
            }
        }
    }

    // ── Dropoff ───────────────────────────────────────────────────────────────

    /// Execute a dropoff task.  Returns `true` if the whole train was parked.
    pub fn process_dropoff<F, O>(
        &mut self,
        fleet:    &mut F,
        time:     SimTime,
        task:     &RelocationTask,
        observer: &mut O,
    ) -> bool
    where
        F: FleetOps,
        O: RelocationObserver,
    {
        let site = SiteInfo::lookup(&*fleet, task.site);
        let Some(op) = self.store.get_mut(task.agent) else {
            error!(
                "[R-DO-KO] T:{time} |task:{} |staId:{} |link:{} |agent:{} unknown operator",
                task.id, site.key, site.link, task.agent
            );
            return false;
        };
        let Some(train) = op.train.take() else {
            warn!(
                "[R-DO-KO] T:{time} |task:{} |staId:{} |link:{} |agent:{} nothing to drop off",
                task.id, site.key, site.link, task.agent
            );
            return false;
        };

        op.mode = OperatorMode::ReadyToPickup;
        let vehicles: Vec<VehicleId> = train.vehicles().to_vec();

        match fleet.dropoff(task.site, train, time) {
            Ok(()) => {
                fleet.drive_vehicles(&vehicles, op.pending_carry_m);
                op.pending_carry_m = 0.0;
                if let Some(at) = site.coord {
                    op.location = at;
                    op.movement = MovementState::stationary(at, time);
                }
                for &v in &vehicles {
                    observer.on_event(&vehicle_event(&*fleet, time, RelocationEventKind::Dropoff, task, site.link, v));
                }
                info!(
                    "T:{time} |task:{} |staId:{} |agent:{} dropped off {} vehicle(s)",
                    task.id,
                    site.key,
                    task.agent,
                    vehicles.len()
                );
                true
            }
            Err(DropoffRejected { train, free_slots, .. }) => {
                op.train = Some(train);
                op.mode = OperatorMode::Carrying;
                for &v in &vehicles {
                    let event = vehicle_event(&*fleet, time, RelocationEventKind::DropoffKo, task, site.link, v);
                    error!(
                        "[R-DO-KO] T:{time} |vehId:{v} |task:{} |staId:{} |link:{} |agent:{} |status:{} \
                         |soc:{:.3} |free:{free_slots}",
                        task.id,
                        site.key,
                        site.link,
                        task.agent,
                        event.status.map_or("unknown", |s| s.as_str()),
                        event.soc.unwrap_or(f64::NAN)
                    );
                    observer.on_event(&event);
                }
                false
            }
        }
    }
}

fn task_event(
    time: SimTime,
    kind: RelocationEventKind,
    task: &RelocationTask,
    link: LinkId,
) -> RelocationEvent {
    RelocationEvent {
        time,
        kind,
        task:    task.id,
        site:    task.site,
        link,
        agent:   task.agent,
        vehicle: None,
        status:  None,
        soc:     None,
    }
}

fn vehicle_event(
    fleet:   &impl FleetView,
    time:    SimTime,
    kind:    RelocationEventKind,
    task:    &RelocationTask,
    link:    LinkId,
    vehicle: VehicleId,
) -> RelocationEvent {
    let v = fleet.vehicle(vehicle);
    RelocationEvent {
        vehicle: Some(vehicle),
        status:  v.map(|v| v.status()),
        soc:     v.map(|v| v.battery().soc()),
        ..task_event(time, kind, task, link)
    }
}
