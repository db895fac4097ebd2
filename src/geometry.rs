//! Geometry primitives: points, vectors, polygons and the pure functions
//! the rest of the crate builds on (spec §4.G).

use geo::ConvexHull;
use geo_types::{Coord, LineString, MultiPoint, Polygon as GeoPolygon};
use serde::{Deserialize, Serialize};

/// A point, or a vector — the two are distinguished by role, not by type
/// (spec §3).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

pub type Vector = Point;

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn normalized(self) -> Vector {
        let len = self.length();
        Point::new(self.x / len, self.y / len)
    }

    pub fn approx_eq(self, other: Point, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps && (self.y - other.y).abs() <= eps
    }
}

impl std::ops::Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

/// An ordered sequence of >= 3 distinct vertices forming a simple closed
/// boundary. Vertex 0 is the anchor — the translation/rotation handle
/// (spec §3, §GLOSSARY).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    pub fn anchor(&self) -> Point {
        self.vertices[0]
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Bucket a coordinate to a fixed-tolerance grid cell, for the
/// vertex-provenance checks used by the feasible-placement assembler
/// (spec §4.F, and the same idiom the teacher repo uses in its
/// duplicate-edge merge for SVG line input).
pub fn coord_key(p: Point, eps: f64) -> (i64, i64) {
    ((p.x / eps).round() as i64, (p.y / eps).round() as i64)
}

pub fn to_geo_linestring(poly: &Polygon) -> LineString<f64> {
    let mut coords: Vec<Coord<f64>> = poly.vertices.iter().map(|p| Coord { x: p.x, y: p.y }).collect();
    if coords.first().is_some() && coords.first() != coords.last() {
        coords.push(coords[0]);
    }
    LineString::new(coords)
}

pub fn to_geo_polygon(poly: &Polygon) -> GeoPolygon<f64> {
    GeoPolygon::new(to_geo_linestring(poly), Vec::new())
}

/// Convert a (possibly explicitly-closed) linestring back into our own
/// vertex representation, dropping a duplicated closing point if present.
pub fn from_linestring(ls: &LineString<f64>) -> Polygon {
    let mut pts: Vec<Point> = ls.coords().map(|c| Point::new(c.x, c.y)).collect();
    if pts.len() > 1 {
        let first = pts[0];
        let last = *pts.last().unwrap();
        if first.approx_eq(last, 1e-12) {
            pts.pop();
        }
    }
    Polygon::new(pts)
}

/// Signed shoelace area: positive for a CCW-wound polygon, negative for CW.
pub fn polygon_area(poly: &Polygon) -> f64 {
    let pts = &poly.vertices;
    let n = pts.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += pts[i].x * pts[j].y - pts[j].x * pts[i].y;
    }
    sum * 0.5
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Axis-aligned bounding box, or `None` for a degenerate (< 3 vertex) input.
pub fn bounds(poly: &Polygon) -> Option<Bounds> {
    if poly.vertices.len() < 3 {
        return None;
    }
    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for p in &poly.vertices {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    Some(Bounds {
        x: min_x,
        y: min_y,
        width: max_x - min_x,
        height: max_y - min_y,
    })
}

/// Translate every vertex by `(dx, dy)`. Preserves orientation and vertex 0's
/// identity as the anchor.
pub fn translate(poly: &Polygon, dx: f64, dy: f64) -> Polygon {
    Polygon::new(poly.vertices.iter().map(|p| Point::new(p.x + dx, p.y + dy)).collect())
}

/// Rotate CCW by `angle_deg` about `center`. When `center` equals the
/// anchor, the anchor is fixed by construction (its offset from itself is
/// zero).
pub fn rotate(poly: &Polygon, angle_deg: f64, center: Point) -> Polygon {
    let rad = angle_deg.to_radians();
    let (sin, cos) = rad.sin_cos();
    Polygon::new(
        poly.vertices
            .iter()
            .map(|p| {
                let (dx, dy) = (p.x - center.x, p.y - center.y);
                Point::new(center.x + dx * cos - dy * sin, center.y + dx * sin + dy * cos)
            })
            .collect(),
    )
}

/// The vertex with maximum y, ties broken by maximum x.
pub fn highest_point(poly: &Polygon) -> Point {
    let mut best = poly.vertices[0];
    for &p in &poly.vertices[1..] {
        if p.y > best.y || (p.y == best.y && p.x > best.x) {
            best = p;
        }
    }
    best
}

/// The vertex with minimum y, ties broken by minimum x.
pub fn lowest_point(poly: &Polygon) -> Point {
    let mut best = poly.vertices[0];
    for &p in &poly.vertices[1..] {
        if p.y < best.y || (p.y == best.y && p.x < best.x) {
            best = p;
        }
    }
    best
}

/// Reverse winding order while keeping vertex 0 fixed as the anchor — the
/// same trick the original prototype relies on (reversing a closed ring's
/// coordinate list but keeping its first point put).
fn reverse_tail(poly: &Polygon) -> Polygon {
    let mut v = poly.vertices.clone();
    if v.len() > 1 {
        v[1..].reverse();
    }
    Polygon::new(v)
}

pub fn orient_ccw(poly: &Polygon) -> Polygon {
    if polygon_area(poly) < 0.0 {
        reverse_tail(poly)
    } else {
        poly.clone()
    }
}

pub fn orient_cw(poly: &Polygon) -> Polygon {
    if polygon_area(poly) > 0.0 {
        reverse_tail(poly)
    } else {
        poly.clone()
    }
}

/// Edge vectors `v_i = vertex_{i+1} - vertex_i`. The closing edge
/// (`vertex_0 - vertex_last`) is included only when requested.
pub fn edges(poly: &Polygon, include_closing: bool) -> Vec<Vector> {
    let pts = &poly.vertices;
    let n = pts.len();
    if n < 2 {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(n);
    for i in 0..n - 1 {
        out.push(pts[i + 1] - pts[i]);
    }
    if include_closing {
        out.push(pts[0] - pts[n - 1]);
    }
    out
}

/// Angle in `[0, 2*PI)` that `v` makes with the positive x-axis.
pub fn angle_from_x(v: Vector) -> f64 {
    if v.x == 0.0 {
        return if v.y > 0.0 {
            std::f64::consts::FRAC_PI_2
        } else {
            3.0 * std::f64::consts::FRAC_PI_2
        };
    }
    let mut angle = v.y.atan2(v.x);
    if angle < 0.0 {
        angle += std::f64::consts::TAU;
    }
    angle
}

/// Standard convex hull, required because NFP construction is only valid
/// on convex operands (spec §4.G, §9).
pub fn convex_hull(poly: &Polygon) -> Polygon {
    let points: Vec<geo_types::Point<f64>> = poly.vertices.iter().map(|p| geo_types::Point::new(p.x, p.y)).collect();
    let hull = MultiPoint::new(points).convex_hull();
    from_linestring(hull.exterior())
}

/// Intersection area of two polygons, via the same Clipper-backed boolean
/// operator used for NFP/IFP region intersection.
pub fn intersection_area(a: &Polygon, b: &Polygon) -> f64 {
    use geo::Area;
    use geo_clipper::Clipper;

    let ma = geo_types::MultiPolygon::new(vec![to_geo_polygon(a)]);
    let mb = geo_types::MultiPolygon::new(vec![to_geo_polygon(b)]);
    let region = ma.intersection(&mb, crate::config::CLIPPER_SCALE);
    region.unsigned_area()
}
