//! Inner-fit polygon engine: the locus of a shape's highest point such that
//! the shape stays entirely inside the disk, built by angular sliding
//! (spec §4.I).

use crate::config::IFP_ANGULAR_STEP_DEG;
use crate::disk::Disk;
use crate::geometry::{bounds, convex_hull, highest_point, translate, Point, Polygon, Vector};

/// Inner-fit polygon of `shape` against `disk`. Empty when `shape`'s
/// bounding box already exceeds the disk's diameter — such a shape cannot
/// be placed in any orientation sliding would discover (spec §8 boundary
/// behavior).
pub fn inner_fit_polygon(shape: &Polygon, disk: &Disk) -> Polygon {
    let diameter = 2.0 * disk.radius;
    if let Some(b) = bounds(shape) {
        if b.width > diameter || b.height > diameter {
            log::debug!(
                "shape bounds {:.3}x{:.3} exceed disk diameter {:.3}, inner-fit polygon is empty",
                b.width, b.height, diameter
            );
            return Polygon::new(Vec::new());
        }
    } else {
        log::debug!("degenerate shape (fewer than 3 vertices), inner-fit polygon is empty");
        return Polygon::new(Vec::new());
    }

    // `moving` tracks the shape as it slides; `tracked` is the cumulative
    // translation applied to it so far, relative to the frame where
    // `shape`'s own highest point sits at the origin. The locus this
    // function returns is translations of the *whole shape* (vertex 0
    // included), so each collected point is shifted back by `-highp` to
    // undo that frame change.
    let highp = highest_point(shape);
    let mut moving = translate(shape, -highp.x, -highp.y);
    let mut tracked = Point::new(0.0, 0.0);

    let (move_vect, contact) = disk.slide(&moving, Point::new(1.0, 0.0));
    moving = translate(&moving, move_vect.x, move_vect.y);
    tracked = tracked + move_vect;

    let mut collected = vec![tracked - highp];
    let mut dir = left_perpendicular(contact);

    let iterations = (360.0 / IFP_ANGULAR_STEP_DEG).ceil() as usize;
    for _ in 0..iterations.saturating_sub(1) {
        dir = rotate_vector(dir, IFP_ANGULAR_STEP_DEG);
        let (move_vect, _contact) = disk.slide(&moving, dir);
        if move_vect.x != 0.0 || move_vect.y != 0.0 {
            moving = translate(&moving, move_vect.x, move_vect.y);
            tracked = tracked + move_vect;
            collected.push(tracked - highp);
        }
    }

    convex_hull(&Polygon::new(collected))
}

fn left_perpendicular(v: Vector) -> Vector {
    Point::new(-v.y, v.x).normalized()
}

fn rotate_vector(v: Vector, angle_deg: f64) -> Vector {
    let rad = angle_deg.to_radians();
    let (sin, cos) = rad.sin_cos();
    Point::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::polygon_area;

    fn unit_square() -> Polygon {
        Polygon::new(vec![
            Point::new(1.0, 1.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(0.0, 1.0),
        ])
    }

    #[test]
    fn ifp_of_small_shape_in_big_disk_is_nonempty() {
        let disk = Disk::new(10.0);
        let ifp = inner_fit_polygon(&unit_square(), &disk);
        assert!(ifp.len() >= 3);
        assert!(polygon_area(&ifp).abs() > 0.0);
    }

    #[test]
    fn ifp_of_oversized_shape_is_empty() {
        let disk = Disk::new(10.0);
        let big_square = Polygon::new(vec![
            Point::new(25.0, 25.0),
            Point::new(25.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(0.0, 25.0),
        ]);
        let ifp = inner_fit_polygon(&big_square, &disk);
        assert!(ifp.is_empty());
    }

    #[test]
    fn ifp_monotonicity_smaller_shape_has_larger_or_equal_ifp_area() {
        let disk = Disk::new(10.0);
        let big = unit_square();
        let small = Polygon::new(big.vertices.iter().map(|p| Point::new(p.x * 0.5, p.y * 0.5)).collect());
        let ifp_big = inner_fit_polygon(&big, &disk);
        let ifp_small = inner_fit_polygon(&small, &disk);
        assert!(polygon_area(&ifp_small).abs() >= polygon_area(&ifp_big).abs() - 1e-6);
    }

    #[test]
    fn ifp_vertices_place_the_shape_within_the_disk() {
        let disk = Disk::new(10.0);
        let shape = unit_square();
        let ifp = inner_fit_polygon(&shape, &disk);
        for p in &ifp.vertices {
            let placed = crate::geometry::translate(&shape, p.x, p.y);
            for v in &placed.vertices {
                assert!(v.length() <= disk.radius + 1e-6);
            }
        }
    }
}
