//! The `OperatorStore`: every relocation operator and what it holds.

use cs_core::{Coord, OperatorId, SimTime, VehicleId};
use cs_fleet::RoadTrain;

use crate::{MovementState, OperatorMode};

/// One relocation operator.
#[derive(Debug)]
pub struct Operator {
    pub id:       OperatorId,
    pub location: Coord,
    pub mode:     OperatorMode,
    /// The held road train.  `Some` exactly while vehicles are in the
    /// operator's custody.
    pub train:    Option<RoadTrain>,
    /// Carry distance still to be discharged at dropoff, metres.
    pub pending_carry_m: f64,
    pub movement: MovementState,
}

impl Operator {
    fn new(id: OperatorId, location: Coord, time: SimTime) -> Self {
        Self {
            id,
            location,
            mode:            OperatorMode::ReadyToPickup,
            train:           None,
            pending_carry_m: 0.0,
            movement:        MovementState::stationary(location, time),
        }
    }

    pub fn held_vehicles(&self) -> &[VehicleId] {
        self.train.as_ref().map(RoadTrain::vehicles).unwrap_or(&[])
    }
}

/// Operators indexed by `OperatorId`.
#[derive(Default)]
pub struct OperatorStore {
    operators: Vec<Operator>,
}

impl OperatorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an operator standing at `location`.
    pub fn add(&mut self, location: Coord, time: SimTime) -> OperatorId {
        let id = OperatorId(self.operators.len() as u32);
        self.operators.push(Operator::new(id, location, time));
        id
    }

    pub fn get(&self, id: OperatorId) -> Option<&Operator> {
        self.operators.get(id.index())
    }

    pub fn get_mut(&mut self, id: OperatorId) -> Option<&mut Operator> {
        self.operators.get_mut(id.index())
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Operator> {
        self.operators.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Operator> {
        self.operators.iter_mut()
    }

    /// Total number of vehicles held in road trains across all operators.
    pub fn held_count(&self) -> usize {
        self.operators.iter().map(|o| o.held_vehicles().len()).sum()
    }

    /// `true` if `agent` is currently on a drive leg.
    #[inline]
    pub fn in_transit(&self, agent: OperatorId) -> bool {
        self.get(agent).is_some_and(|o| o.movement.in_transit)
    }
}
