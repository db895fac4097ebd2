//! No-fit polygon engine for convex operands, built by Minkowski-sum
//! edge-angle sorting (spec §4.N).

use std::collections::HashSet;

use geo_clipper::Clipper;

use crate::config::{CLIPPER_SCALE, EPS_COORD};
use crate::geometry::{
    angle_from_x, coord_key, convex_hull, edges, from_linestring, lowest_point, orient_ccw, orient_cw,
    to_geo_polygon, translate, Point, Polygon,
};

/// No-fit polygon of two convex operands: the locus of `b`'s anchor such
/// that `a` (stationary) and `b` (moving) touch but do not overlap.
/// Anchored at the origin. Valid only when `a` and `b` are convex — callers
/// pass convex hulls in, matching spec §9's documented limitation for
/// non-convex shapes.
pub fn minkowski_nfp(a: &Polygon, b: &Polygon) -> Polygon {
    let a_hull = orient_ccw(&convex_hull(a));
    let b_hull = orient_cw(&convex_hull(b));

    let mut tagged: Vec<(Point, f64)> = edges(&a_hull, true)
        .into_iter()
        .chain(edges(&b_hull, true))
        .map(|v| (v, angle_from_x(v)))
        .collect();
    tagged.sort_by(|(_, angle_a), (_, angle_b)| angle_a.partial_cmp(angle_b).unwrap());

    let mut vertices = Vec::with_capacity(tagged.len());
    let mut cur = Point::new(0.0, 0.0);
    vertices.push(cur);
    // The last edge closes the loop back to the origin; it is not added as
    // a distinct vertex.
    for (v, _) in tagged.iter().take(tagged.len().saturating_sub(1)) {
        cur = cur + *v;
        vertices.push(cur);
    }
    Polygon::new(vertices)
}

/// Translate an origin-anchored NFP so its lowest point coincides with
/// `a`'s lowest point. By construction the origin vertex of `nfp` is
/// already its own lowest point (edges are laid out starting from the
/// smallest angle, which traces a convex polygon from its bottommost
/// vertex), so this is equivalent to moving `nfp`'s first vertex onto
/// `a`'s lowest point — see SPEC_FULL.md §4.N.
pub fn fit_nfp(a: &Polygon, nfp: &Polygon) -> Polygon {
    let target = lowest_point(a);
    let current = lowest_point(nfp);
    translate(nfp, target.x - current.x, target.y - current.y)
}

/// The fitted no-fit polygons of every already-committed shape against `b`,
/// unioned, plus the set of vertices that came from an NFP (as opposed to
/// from the IFP boundary during a later intersection) — used by the
/// feasible-placement assembler's provenance filter.
pub struct NfpUnion {
    pub region: geo_types::MultiPolygon<f64>,
    pub vertices: HashSet<(i64, i64)>,
}

pub fn no_fit_union(committed: &[Polygon], b: &Polygon) -> NfpUnion {
    let mut acc: Option<geo_types::MultiPolygon<f64>> = None;
    let mut vertices = HashSet::new();

    for a in committed {
        let nfp = fit_nfp(a, &minkowski_nfp(a, b));
        for v in &nfp.vertices {
            vertices.insert(coord_key(*v, EPS_COORD));
        }
        let geo_poly = to_geo_polygon(&nfp);
        acc = Some(match acc {
            None => geo_types::MultiPolygon::new(vec![geo_poly]),
            Some(prev) => prev.union(&geo_types::MultiPolygon::new(vec![geo_poly]), CLIPPER_SCALE),
        });
    }

    NfpUnion {
        region: acc.unwrap_or_else(|| geo_types::MultiPolygon::new(Vec::new())),
        vertices,
    }
}

/// Convenience accessor mirroring the boundary-only view a caller might
/// want without the provenance set (e.g. for visualization).
pub fn no_fit_union_polygons(committed: &[Polygon], b: &Polygon) -> Vec<Polygon> {
    no_fit_union(committed, b)
        .region
        .0
        .iter()
        .map(|p| from_linestring(p.exterior()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::polygon_area;
    use approx::assert_relative_eq;

    fn unit_square() -> Polygon {
        Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ])
    }

    #[test]
    fn nfp_of_two_unit_squares_is_a_2x2_square() {
        let nfp = minkowski_nfp(&unit_square(), &unit_square());
        // Minkowski sum of a unit square with a (reflected) unit square is
        // a 2x2 square, area 4, regardless of anchor placement.
        assert_relative_eq!(polygon_area(&nfp).abs(), 4.0, epsilon = 1e-9);
    }

    #[test]
    fn fit_nfp_places_lowest_point_at_as_lowest_point() {
        let a = crate::geometry::translate(&unit_square(), 5.0, 5.0);
        let nfp = minkowski_nfp(&a, &unit_square());
        let fitted = fit_nfp(&a, &nfp);
        assert_relative_eq!(lowest_point(&fitted).x, lowest_point(&a).x, epsilon = 1e-9);
        assert_relative_eq!(lowest_point(&fitted).y, lowest_point(&a).y, epsilon = 1e-9);
    }

    #[test]
    fn no_fit_union_of_no_shapes_is_empty() {
        let union = no_fit_union(&[], &unit_square());
        assert!(union.region.0.is_empty());
        assert!(union.vertices.is_empty());
    }

    #[test]
    fn no_fit_union_vertices_are_nonempty_for_one_committed_shape() {
        let committed = vec![unit_square()];
        let union = no_fit_union(&committed, &unit_square());
        assert!(!union.region.0.is_empty());
        assert!(!union.vertices.is_empty());
    }
}
