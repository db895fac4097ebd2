//! Feasible-placement assembler: intersects the inner-fit polygon with the
//! complement of the no-fit union to get the locus of anchor points where a
//! shape may be committed without leaving the disk or overlapping another
//! shape (spec §4.F).

use geo_clipper::Clipper;
use geo_types::MultiPolygon;

use crate::config::{CLIPPER_SCALE, EPS_COORD};
use crate::disk::Disk;
use crate::geometry::{coord_key, to_geo_polygon, Point, Polygon};
use crate::ifp::inner_fit_polygon;
use crate::nfp::no_fit_union;

/// The feasible region for a shape's anchor, plus the subset of its
/// boundary vertices that came from an NFP (as opposed to purely from the
/// IFP boundary) — those are the "touching" placements the bottom-left
/// heuristic prefers, since they pack a shape flush against a neighbor
/// rather than merely inside the disk.
pub struct LocusSet {
    pub region: MultiPolygon<f64>,
    pub candidate_points: Vec<Point>,
}

impl LocusSet {
    pub fn is_feasible(&self) -> bool {
        !self.region.0.is_empty()
    }

    /// Every vertex of the region's boundary (exterior and holes alike),
    /// used as a fallback when no NFP-provenance point survives filtering —
    /// e.g. the first shape placed against an empty disk, or a locus that
    /// touches the disk wall without touching any neighbor.
    pub fn all_points(&self) -> Vec<Point> {
        let mut out = Vec::new();
        for poly in &self.region.0 {
            out.extend(poly.exterior().coords().map(|c| Point::new(c.x, c.y)));
            for ring in poly.interiors() {
                out.extend(ring.coords().map(|c| Point::new(c.x, c.y)));
            }
        }
        out
    }
}

pub fn feasible_placements(shape: &Polygon, committed: &[Polygon], disk: &Disk) -> LocusSet {
    let ifp = inner_fit_polygon(shape, disk);
    if ifp.is_empty() {
        return LocusSet {
            region: MultiPolygon::new(Vec::new()),
            candidate_points: Vec::new(),
        };
    }

    if committed.is_empty() {
        let region = MultiPolygon::new(vec![to_geo_polygon(&ifp)]);
        let candidate_points = ifp.vertices.clone();
        return LocusSet { region, candidate_points };
    }

    let nfp_union = no_fit_union(committed, shape);
    let ifp_region = MultiPolygon::new(vec![to_geo_polygon(&ifp)]);
    let region = ifp_region.difference(&nfp_union.region, CLIPPER_SCALE);

    let mut candidate_points = Vec::new();
    for poly in &region.0 {
        for c in poly.exterior().coords() {
            let p = Point::new(c.x, c.y);
            if nfp_union.vertices.contains(&coord_key(p, EPS_COORD)) {
                candidate_points.push(p);
            }
        }
        for ring in poly.interiors() {
            for c in ring.coords() {
                let p = Point::new(c.x, c.y);
                if nfp_union.vertices.contains(&coord_key(p, EPS_COORD)) {
                    candidate_points.push(p);
                }
            }
        }
    }

    LocusSet { region, candidate_points }
}
