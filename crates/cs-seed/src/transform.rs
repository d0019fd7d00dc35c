//! Reprojection of raw station coordinates into the host's metric plane.

use cs_core::Coord;

/// Maps a raw `(lon, lat)` pair into host coordinates.
pub trait CoordTransform: Send + Sync {
    fn transform(&self, lon: f64, lat: f64) -> Coord;
}

/// Raw values are already in the host system.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl CoordTransform for Identity {
    fn transform(&self, lon: f64, lat: f64) -> Coord {
        Coord::new(lon, lat)
    }
}

/// Local equirectangular projection of WGS84 degrees to metres around an
/// origin.  Accurate to well under 1 % across a metropolitan area.
#[derive(Debug, Clone, Copy)]
pub struct Equirectangular {
    pub origin_lon: f64,
    pub origin_lat: f64,
}

impl Equirectangular {
    const EARTH_RADIUS_M: f64 = 6_371_000.0;

    pub fn new(origin_lon: f64, origin_lat: f64) -> Self {
        Self { origin_lon, origin_lat }
    }
}

impl CoordTransform for Equirectangular {
    fn transform(&self, lon: f64, lat: f64) -> Coord {
        let x = (lon - self.origin_lon).to_radians() * self.origin_lat.to_radians().cos();
        let y = (lat - self.origin_lat).to_radians();
        Coord::new(x * Self::EARTH_RADIUS_M, y * Self::EARTH_RADIUS_M)
    }
}
