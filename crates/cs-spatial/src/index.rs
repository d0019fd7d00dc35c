//! R-tree point index over docking sites.
//!
//! Sites are bulk-loaded once after the fleet is built; sites never move or
//! disappear during a run, so the index is immutable.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use cs_core::{Coord, SiteId};
use cs_fleet::FleetView;

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a site coordinate with its id.
#[derive(Clone)]
struct SiteEntry {
    point: [f64; 2],
    id:    SiteId,
}

impl RTreeObject for SiteEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for SiteEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── SiteIndex ─────────────────────────────────────────────────────────────────

pub struct SiteIndex {
    tree: RTree<SiteEntry>,
}

impl SiteIndex {
    /// Bulk-load from `(id, coord)` pairs.  O(N log N).
    pub fn new(sites: impl IntoIterator<Item = (SiteId, Coord)>) -> Self {
        let entries: Vec<SiteEntry> = sites
            .into_iter()
            .map(|(id, c)| SiteEntry { point: c.as_array(), id })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    /// Index every site of `fleet`.
    pub fn from_fleet(fleet: &impl FleetView) -> Self {
        Self::new(fleet.sites().iter().map(|s| (s.id(), s.coord())))
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Disk query: every site within `radius_m` of `center` (inclusive).
    ///
    /// Returned in ascending `SiteId` order so that callers scanning for a
    /// minimum get a reproducible tie-break independent of tree layout.
    pub fn within_disk(&self, center: Coord, radius_m: f64) -> Vec<SiteId> {
        if radius_m < 0.0 {
            return Vec::new();
        }
        let mut ids: Vec<SiteId> = self
            .tree
            .locate_within_distance(center.as_array(), radius_m * radius_m)
            .map(|e| e.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// The single nearest site regardless of radius.
    pub fn nearest(&self, pos: Coord) -> Option<SiteId> {
        self.tree.nearest_neighbor(&pos.as_array()).map(|e| e.id)
    }

    /// Up to `k` nearest sites, by ascending distance.
    pub fn k_nearest(&self, pos: Coord, k: usize) -> Vec<SiteId> {
        self.tree
            .nearest_neighbor_iter(&pos.as_array())
            .take(k)
            .map(|e| e.id)
            .collect()
    }
}
