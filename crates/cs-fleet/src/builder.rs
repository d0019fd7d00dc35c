//! Fluent builder for constructing a [`Fleet`] in one step.
//!
//! # Usage
//!
//! ```rust
//! use cs_core::Coord;
//! use cs_fleet::{FleetBuilder, FleetView, VehicleType};
//!
//! let mut b = FleetBuilder::new();
//! let ev = b.add_vehicle_type(VehicleType::default());
//! let site = b.add_site("stat.id.1", Coord::new(0.0, 0.0), 4).unwrap();
//! b.add_vehicle("veh.id.1", ev, 1.0, site).unwrap();
//! let fleet = b.build().unwrap();
//!
//! assert_eq!(fleet.site(site).unwrap().parking().len(), 1);
//! ```
//!
//! Seeding algorithms work on the builder: capacities may still change and
//! vehicles go into each site's deployment list.  [`build`](FleetBuilder::build)
//! moves deployments into parking and freezes capacities.

use rustc_hash::FxHashMap;

use cs_core::{Coord, LinkId, SiteId, TripStatus, VehicleId, VehicleTypeId};

use crate::{Fleet, FleetError, FleetResult, Site, Vehicle, VehicleType};

pub struct FleetBuilder {
    vehicle_types: Vec<VehicleType>,
    sites:         Vec<Site>,
    vehicles:      Vec<Vehicle>,
    site_keys:     FxHashMap<String, SiteId>,
    vehicle_keys:  FxHashMap<String, VehicleId>,
}

impl FleetBuilder {
    pub fn new() -> Self {
        Self {
            vehicle_types: Vec::new(),
            sites:         Vec::new(),
            vehicles:      Vec::new(),
            site_keys:     FxHashMap::default(),
            vehicle_keys:  FxHashMap::default(),
        }
    }

    pub fn add_vehicle_type(&mut self, vtype: VehicleType) -> VehicleTypeId {
        let id = VehicleTypeId(self.vehicle_types.len() as u16);
        self.vehicle_types.push(vtype);
        id
    }

    /// Add a site with an empty deployment.  The name defaults to the key.
    pub fn add_site(&mut self, key: impl Into<String>, coord: Coord, capacity: u32) -> FleetResult<SiteId> {
        let key = key.into();
        if self.site_keys.contains_key(&key) {
            return Err(FleetError::DuplicateSiteKey(key));
        }
        let id = SiteId(self.sites.len() as u32);
        self.site_keys.insert(key.clone(), id);
        self.sites.push(Site {
            id,
            name: key.clone(),
            key,
            coord,
            link: LinkId::INVALID,
            capacity,
            parking: Vec::new(),
            deployment: Vec::new(),
        });
        Ok(id)
    }

    pub fn set_site_name(&mut self, site: SiteId, name: impl Into<String>) -> FleetResult<()> {
        self.site_mut(site)?.name = name.into();
        Ok(())
    }

    /// Attach `site` to a host-network link (carried in audit lines).
    pub fn set_site_link(&mut self, site: SiteId, link: LinkId) -> FleetResult<()> {
        self.site_mut(site)?.link = link;
        Ok(())
    }

    /// Change a site's capacity.  It may not drop below the vehicles already
    /// deployed there.
    pub fn set_capacity(&mut self, site: SiteId, capacity: u32) -> FleetResult<()> {
        let s = self.site_mut(site)?;
        let deployed = s.deployment.len() as u32;
        if capacity < deployed {
            return Err(FleetError::CapacityBelowDeployment { site, capacity, deployed });
        }
        s.capacity = capacity;
        Ok(())
    }

    /// Create a vehicle of type `vtype` with state of charge `soc` and deploy
    /// it at `site`.
    pub fn add_vehicle(
        &mut self,
        key:   impl Into<String>,
        vtype: VehicleTypeId,
        soc:   f64,
        site:  SiteId,
    ) -> FleetResult<VehicleId> {
        let key = key.into();
        if self.vehicle_keys.contains_key(&key) {
            return Err(FleetError::DuplicateVehicleKey(key));
        }
        let battery = self
            .vehicle_types
            .get(vtype.index())
            .ok_or(FleetError::VehicleTypeNotFound(vtype))?
            .battery(soc);
        let s = self.sites.get(site.index()).ok_or(FleetError::SiteNotFound(site))?;
        if s.deployment.len() as u32 >= s.capacity {
            return Err(FleetError::SiteFull { site, capacity: s.capacity });
        }

        let id = VehicleId(self.vehicles.len() as u32);
        self.vehicle_keys.insert(key.clone(), id);
        self.vehicles.push(Vehicle {
            id,
            name: key.clone(),
            key,
            vtype,
            battery,
            status: TripStatus::Idle,
        });
        self.sites[site.index()].deployment.push(id);
        Ok(id)
    }

    pub fn set_vehicle_name(&mut self, vehicle: VehicleId, name: impl Into<String>) -> FleetResult<()> {
        let v = self
            .vehicles
            .get_mut(vehicle.index())
            .ok_or(cs_core::CsError::VehicleNotFound(vehicle))?;
        v.name = name.into();
        Ok(())
    }

    // ── Read access for seeding ───────────────────────────────────────────

    pub fn site(&self, site: SiteId) -> Option<&Site> {
        self.sites.get(site.index())
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn site_count(&self) -> usize { self.sites.len() }
    pub fn vehicle_count(&self) -> usize { self.vehicles.len() }

    /// `capacity − |deployment|` for `site` (0 for unknown sites).
    pub fn free_capacity(&self, site: SiteId) -> u32 {
        self.sites
            .get(site.index())
            .map(|s| s.capacity.saturating_sub(s.deployment.len() as u32))
            .unwrap_or(0)
    }

    /// Consume the builder and produce a [`Fleet`].
    ///
    /// Every site's deployment becomes its initial parking, in deployment
    /// order.
    pub fn build(mut self) -> FleetResult<Fleet> {
        for s in &mut self.sites {
            if s.deployment.len() > s.capacity as usize {
                return Err(FleetError::CapacityBelowDeployment {
                    site:     s.id,
                    capacity: s.capacity,
                    deployed: s.deployment.len() as u32,
                });
            }
            s.parking = s.deployment.clone();
        }

        log::info!(
            "fleet built: {} site(s), {} vehicle(s), {} type(s)",
            self.sites.len(),
            self.vehicles.len(),
            self.vehicle_types.len()
        );

        Ok(Fleet {
            vehicle_types: self.vehicle_types,
            sites:         self.sites,
            vehicles:      self.vehicles,
            site_keys:     self.site_keys,
            vehicle_keys:  self.vehicle_keys,
            bookings:      Vec::new(),
        })
    }

    fn site_mut(&mut self, site: SiteId) -> FleetResult<&mut Site> {
        self.sites.get_mut(site.index()).ok_or(FleetError::SiteNotFound(site))
    }
}

impl Default for FleetBuilder {
    fn default() -> Self {
        Self::new()
    }
}
