//! Container model: the disk and its sliding-intersection computation
//! (spec §4.C).

use crate::config::{EPS_COORD, SLIDE_BACKOFF};
use crate::geometry::{Point, Polygon, Vector};

/// An origin-centered circle with radius > 0.
#[derive(Debug, Clone, Copy)]
pub struct Disk {
    pub radius: f64,
}

impl Disk {
    pub fn new(radius: f64) -> Self {
        assert!(radius > 0.0, "disk radius must be positive");
        Self { radius }
    }

    /// Slide `polygon` along `direction` until the first of its vertices
    /// would touch the disk boundary. Returns the translation vector and
    /// the contact point (the boundary point reached by the vertex that
    /// limits the slide).
    ///
    /// For each vertex `p`, `|p + t*d|^2 = R^2` is solved for its larger
    /// root; the minimum such `t` over all vertices bounds how far the
    /// whole polygon may move. A safety back-off of
    /// [`SLIDE_BACKOFF`](crate::config::SLIDE_BACKOFF) is subtracted to
    /// avoid numerical overshoot past the boundary.
    ///
    /// If no vertex admits a non-negative discriminant (the polygon cannot
    /// reach the boundary moving this way), the returned vector is `(0,0)`.
    pub fn slide(&self, polygon: &Polygon, direction: Vector) -> (Vector, Point) {
        let dir = direction.normalized();
        let mut best_t: Option<f64> = None;
        let mut contact = polygon.vertices[0];

        for &p in &polygon.vertices {
            let a = dir.dot(dir);
            let b = 2.0 * dir.dot(p);
            let c = p.dot(p) - self.radius * self.radius;
            let discriminant = b * b - 4.0 * a * c;
            if discriminant < 0.0 {
                continue;
            }
            let t = (-b + discriminant.sqrt()) / (2.0 * a) - SLIDE_BACKOFF;
            if best_t.is_none_or(|cur| t < cur) {
                best_t = Some(t);
                contact = Point::new(p.x + dir.x * t, p.y + dir.y * t);
            }
        }

        match best_t {
            Some(t) => (Point::new(dir.x * t, dir.y * t), contact),
            None => {
                log::trace!(
                    "slide toward ({:.3}, {:.3}) found no vertex reaching the boundary, falling back to (0,0)",
                    dir.x, dir.y
                );
                (Point::new(0.0, 0.0), contact)
            }
        }
    }

    /// True when every vertex of `polygon` lies within the closed disk, up
    /// to the coordinate-equality tolerance.
    pub fn contains_polygon(&self, polygon: &Polygon) -> bool {
        let r2 = self.radius * self.radius + EPS_COORD;
        polygon.vertices.iter().all(|p| p.dot(*p) <= r2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::translate;

    fn unit_square_at_origin() -> Polygon {
        Polygon::new(vec![
            Point::new(-0.5, -0.5),
            Point::new(0.5, -0.5),
            Point::new(0.5, 0.5),
            Point::new(-0.5, 0.5),
        ])
    }

    #[test]
    fn slide_moves_square_to_boundary() {
        let disk = Disk::new(10.0);
        let square = unit_square_at_origin();
        let (vect, _contact) = disk.slide(&square, Point::new(1.0, 0.0));
        let moved = translate(&square, vect.x, vect.y);
        assert!(disk.contains_polygon(&moved));
        // The rightmost vertex should now sit just inside the boundary.
        let max_dist = moved.vertices.iter().map(|p| p.length()).fold(0.0, f64::max);
        assert!(max_dist <= 10.0 + 1e-9);
        assert!(max_dist > 9.9);
    }

    #[test]
    fn slide_returns_zero_when_already_beyond_reach() {
        // A square far outside any possible contact in this direction once
        // already past the radius in the opposite sense: use a degenerate
        // direction vector of zero length is invalid input, so instead test
        // a polygon whose every vertex already exceeds the radius in a
        // direction where sliding further away never reaches the boundary.
        let disk = Disk::new(1.0);
        let far = translate(&unit_square_at_origin(), 100.0, 0.0);
        let (vect, _contact) = disk.slide(&far, Point::new(1.0, 0.0));
        assert_eq!(vect, Point::new(0.0, 0.0));
    }

    #[test]
    fn contains_polygon_accepts_boundary_points() {
        let disk = Disk::new(5.0);
        let on_boundary = Polygon::new(vec![
            Point::new(5.0, 0.0),
            Point::new(0.0, 5.0),
            Point::new(-5.0, 0.0),
        ]);
        assert!(disk.contains_polygon(&on_boundary));
    }
}
