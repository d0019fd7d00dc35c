//! Planar coordinates.
//!
//! The host simulation works in a projected (metric) coordinate reference
//! system, so all distances in the engine are plain euclidean distances in
//! metres.  Raw station files in lon/lat are reprojected on ingest by a
//! `CoordTransform` (see `cs-seed`).

/// A point in the host's projected coordinate system, in metres.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance in metres.
    #[inline]
    pub fn distance(self, other: Coord) -> f64 {
        self.distance_2(other).sqrt()
    }

    /// Squared distance, the comparison key for radius checks.
    #[inline]
    pub fn distance_2(self, other: Coord) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    #[inline]
    pub fn as_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl From<[f64; 2]> for Coord {
    fn from(p: [f64; 2]) -> Self {
        Coord::new(p[0], p[1])
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}
