//! The shape-source collaborator: the boundary between the placer and
//! whatever decides what shape comes next. Spec §9 scopes this as an
//! interface we specify but whose production bodies we do not — here we
//! give the trait, a generic implementation that enforces the placement
//! contract around any `FnMut() -> Option<Polygon>` generator, and a
//! couple of deterministic test doubles the crate's own suite relies on
//! (mirroring the prototype's `SquareShapeGenerator`).

use crate::config::EPS_AREA;
use crate::disk::Disk;
use crate::error::ShapeSourceError;
use crate::geometry::{intersection_area, rotate, translate, Point, Polygon};

/// A source of shapes to pack, one at a time, with the placer committing
/// each one back before requesting the next.
pub trait ShapeSource {
    /// Request the next shape to place. `Ok(None)` means the source is
    /// exhausted — the run ends. `Err(NotReady)` if a previously requested
    /// shape has not yet been placed.
    fn next_shape(&mut self) -> Result<Option<Polygon>, ShapeSourceError>;

    /// Commit the current shape, rotated by `rotation_deg` about its own
    /// anchor and then translated so that anchor lands at `(x, y)`.
    /// Validates the full contract: a current shape must be pending, the
    /// rotation must be a multiple of
    /// [`symmetry_step`](Self::symmetry_step), the result must stay within
    /// the disk, and it must not overlap any committed shape.
    fn place(&mut self, x: f64, y: f64, rotation_deg: f64) -> Result<(), ShapeSourceError>;

    fn radius(&self) -> f64;

    fn symmetry_step(&self) -> f64;

    fn committed_shapes(&self) -> &[Polygon];
}

/// Rounds to 12 decimal places, matching the prototype's tolerance for its
/// in-disk distance check.
fn round12(x: f64) -> f64 {
    (x * 1e12).round() / 1e12
}

/// A `ShapeSource` built around any shape-generating closure, handling the
/// readiness state machine and every contract check so a generator only
/// has to decide what shape comes next.
pub struct GenericShapeSource<F: FnMut() -> Option<Polygon>> {
    radius: f64,
    symmetry_step: f64,
    generator: F,
    current: Option<Polygon>,
    ready: bool,
    committed: Vec<Polygon>,
}

impl<F: FnMut() -> Option<Polygon>> GenericShapeSource<F> {
    pub fn new(radius: f64, symmetry_step: f64, generator: F) -> Self {
        assert!(radius > 0.0, "disk radius must be positive");
        assert!(symmetry_step > 0.0 && symmetry_step <= 360.0, "symmetry step must be in (0, 360]");
        Self {
            radius,
            symmetry_step,
            generator,
            current: None,
            ready: true,
            committed: Vec::new(),
        }
    }
}

impl<F: FnMut() -> Option<Polygon>> ShapeSource for GenericShapeSource<F> {
    fn next_shape(&mut self) -> Result<Option<Polygon>, ShapeSourceError> {
        if !self.ready {
            return Err(ShapeSourceError::NotReady);
        }
        match (self.generator)() {
            Some(shape) => {
                self.current = Some(shape.clone());
                self.ready = false;
                Ok(Some(shape))
            }
            None => Ok(None),
        }
    }

    fn place(&mut self, x: f64, y: f64, rotation_deg: f64) -> Result<(), ShapeSourceError> {
        let current = self.current.clone().ok_or(ShapeSourceError::NoCurrentShape)?;

        let tolerance = 1e-9;
        let remainder = rotation_deg.rem_euclid(self.symmetry_step);
        if remainder > tolerance && (self.symmetry_step - remainder) > tolerance {
            return Err(ShapeSourceError::RotationDisallowed {
                rotation_deg,
                step: self.symmetry_step,
            });
        }

        let rotated = rotate(&current, rotation_deg, current.anchor());
        let anchor = rotated.anchor();
        let placed = translate(&rotated, x - anchor.x, y - anchor.y);

        let disk = Disk::new(self.radius);
        if !disk.contains_polygon(&placed) {
            let max_dist = placed.vertices.iter().map(|p| p.length()).fold(0.0, f64::max);
            return Err(ShapeSourceError::OutsideDisk {
                distance: round12(max_dist),
                radius: self.radius,
            });
        }

        for existing in &self.committed {
            let area = intersection_area(existing, &placed);
            if area > EPS_AREA {
                return Err(ShapeSourceError::Overlaps { area });
            }
        }

        self.committed.push(placed);
        self.current = None;
        self.ready = true;
        Ok(())
    }

    fn radius(&self) -> f64 {
        self.radius
    }

    fn symmetry_step(&self) -> f64 {
        self.symmetry_step
    }

    fn committed_shapes(&self) -> &[Polygon] {
        &self.committed
    }
}

fn unit_square() -> Polygon {
    Polygon::new(vec![
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(1.0, 1.0),
        Point::new(0.0, 1.0),
    ])
}

fn equilateral_triangle(side: f64) -> Polygon {
    let height = side * 3f64.sqrt() / 2.0;
    Polygon::new(vec![
        Point::new(0.0, 0.0),
        Point::new(side, 0.0),
        Point::new(side / 2.0, height),
    ])
}

/// A test double that hands out `count` unit squares before exhausting.
pub fn fixed_unit_square(radius: f64, symmetry_step: f64, count: usize) -> GenericShapeSource<impl FnMut() -> Option<Polygon>> {
    let mut remaining = count;
    GenericShapeSource::new(radius, symmetry_step, move || {
        if remaining == 0 {
            None
        } else {
            remaining -= 1;
            Some(unit_square())
        }
    })
}

/// A test double that hands out `count` equilateral triangles of the given
/// side length before exhausting.
pub fn fixed_equilateral_triangle(
    radius: f64,
    symmetry_step: f64,
    side: f64,
    count: usize,
) -> GenericShapeSource<impl FnMut() -> Option<Polygon>> {
    let mut remaining = count;
    GenericShapeSource::new(radius, symmetry_step, move || {
        if remaining == 0 {
            None
        } else {
            remaining -= 1;
            Some(equilateral_triangle(side))
        }
    })
}
