//! The placement loop: for each shape from a [`ShapeSource`], try every
//! symmetry-allowed rotation, keep the bottom-left-most feasible point
//! across all of them, and commit there. Stops the first time a shape
//! admits no feasible placement at any rotation (spec §4.P).

use crate::disk::Disk;
use crate::geometry::{rotate, Point, Polygon};
use crate::locus::{feasible_placements, LocusSet};
use crate::error::ShapeSourceError;
use crate::shape_source::ShapeSource;

pub struct Placer<'a, S: ShapeSource> {
    source: &'a mut S,
    disk: Disk,
    parallel: bool,
}

impl<'a, S: ShapeSource> Placer<'a, S> {
    pub fn new(source: &'a mut S) -> Self {
        let disk = Disk::new(source.radius());
        Self { source, disk, parallel: false }
    }

    /// Evaluate the per-rotation search with `rayon` instead of
    /// sequentially. Tie-break semantics are identical either way: among
    /// equally bottom-left-most points, the smallest rotation index wins.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn count(&self) -> usize {
        self.source.committed_shapes().len()
    }

    /// Runs until the source is exhausted or a shape cannot be placed at
    /// any symmetry-allowed rotation. Returns the number of shapes placed.
    pub fn run(&mut self) -> Result<usize, ShapeSourceError> {
        let mut placed = 0;

        loop {
            let shape = match self.source.next_shape()? {
                Some(shape) => shape,
                None => break,
            };

            let committed = self.source.committed_shapes().to_vec();
            let symmetry_step = self.source.symmetry_step();

            let winner = if self.parallel {
                self.evaluate_rotations_parallel(&shape, &committed, symmetry_step)
            } else {
                self.evaluate_rotations_sequential(&shape, &committed, symmetry_step)
            };

            match winner {
                Some((rotation_deg, point)) => {
                    let anchor = shape.anchor();
                    let (x, y) = (anchor.x + point.x, anchor.y + point.y);
                    self.source.place(x, y, rotation_deg)?;
                    placed += 1;
                    log::debug!(
                        "placed shape #{placed} at ({x:.6}, {y:.6}) rotated {rotation_deg:.1}deg"
                    );
                }
                None => {
                    log::debug!(
                        "halting after {placed} shapes: no rotation of the current shape admits a feasible placement"
                    );
                    break;
                }
            }
        }

        Ok(placed)
    }

    fn evaluate_rotations_sequential(
        &self,
        shape: &Polygon,
        committed: &[Polygon],
        symmetry_step: f64,
    ) -> Option<(f64, Point)> {
        let steps = (360.0 / symmetry_step).round().max(1.0) as usize;
        let mut best: Option<(f64, Point)> = None;

        for k in 0..steps {
            let rotation_deg = symmetry_step * k as f64;
            let rotated = rotate(shape, rotation_deg, shape.anchor());
            let locus = feasible_placements(&rotated, committed, &self.disk);

            if let Some(point) = bottom_left(&locus) {
                best = pick_better(best, (rotation_deg, point));
            }
        }

        best
    }

    fn evaluate_rotations_parallel(
        &self,
        shape: &Polygon,
        committed: &[Polygon],
        symmetry_step: f64,
    ) -> Option<(f64, Point)> {
        use rayon::prelude::*;

        let steps = (360.0 / symmetry_step).round().max(1.0) as usize;
        let mut results: Vec<(usize, f64, Option<Point>)> = (0..steps)
            .into_par_iter()
            .map(|k| {
                let rotation_deg = symmetry_step * k as f64;
                let rotated = rotate(shape, rotation_deg, shape.anchor());
                let locus = feasible_placements(&rotated, committed, &self.disk);
                (k, rotation_deg, bottom_left(&locus))
            })
            .collect();

        // Restore ascending rotation order so the fold below ties in favor
        // of the smallest rotation index, matching the sequential path.
        results.sort_by_key(|(k, _, _)| *k);

        let mut best: Option<(f64, Point)> = None;
        for (_, rotation_deg, point) in results {
            if let Some(point) = point {
                best = pick_better(best, (rotation_deg, point));
            }
        }
        best
    }
}

/// The bottom-left-most point of a locus: candidate (NFP-touching) points
/// are preferred, falling back to the full region boundary when none
/// survive — e.g. the very first shape placed against an empty disk.
fn bottom_left(locus: &LocusSet) -> Option<Point> {
    let points = if !locus.candidate_points.is_empty() {
        locus.candidate_points.clone()
    } else {
        locus.all_points()
    };

    points.into_iter().fold(None, |best, p| match best {
        None => Some(p),
        Some(b) if is_more_bottom_left(p, b) => Some(p),
        Some(b) => Some(b),
    })
}

fn is_more_bottom_left(a: Point, b: Point) -> bool {
    a.y < b.y || (a.y == b.y && a.x < b.x)
}

/// Keeps the current best, breaking ties in favor of the candidate already
/// held (i.e. the smaller rotation index, since callers scan rotations in
/// ascending order).
fn pick_better(best: Option<(f64, Point)>, candidate: (f64, Point)) -> Option<(f64, Point)> {
    match best {
        None => Some(candidate),
        Some(b) if is_more_bottom_left(candidate.1, b.1) => Some(candidate),
        Some(b) => Some(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape_source::{fixed_equilateral_triangle, fixed_unit_square};

    #[test]
    fn packs_unit_squares_until_exhausted() {
        let mut source = fixed_unit_square(10.0, 360.0, 5);
        let mut placer = Placer::new(&mut source);
        let placed = placer.run().unwrap();
        assert_eq!(placed, 5);
        assert_eq!(placer.count(), 5);
    }

    #[test]
    fn halts_when_disk_is_too_small_for_even_one_shape() {
        let mut source = fixed_unit_square(0.1, 360.0, 3);
        let mut placer = Placer::new(&mut source);
        let placed = placer.run().unwrap();
        assert_eq!(placed, 0);
    }

    #[test]
    fn ninety_degree_symmetry_still_packs_a_symmetric_shape() {
        let mut source = fixed_unit_square(10.0, 90.0, 4);
        let mut placer = Placer::new(&mut source);
        let placed = placer.run().unwrap();
        assert_eq!(placed, 4);
    }

    #[test]
    fn packs_triangles_until_exhausted() {
        let mut source = fixed_equilateral_triangle(10.0, 360.0, 1.0, 6);
        let mut placer = Placer::new(&mut source);
        let placed = placer.run().unwrap();
        assert_eq!(placed, 6);
    }

    #[test]
    fn parallel_and_sequential_search_place_the_same_count() {
        let mut seq_source = fixed_unit_square(10.0, 90.0, 4);
        let mut seq_placer = Placer::new(&mut seq_source);
        let seq_placed = seq_placer.run().unwrap();

        let mut par_source = fixed_unit_square(10.0, 90.0, 4);
        let mut par_placer = Placer::new(&mut par_source).with_parallel(true);
        let par_placed = par_placer.run().unwrap();

        assert_eq!(seq_placed, par_placed);
    }

    #[test]
    fn committed_shapes_do_not_overlap() {
        let mut source = fixed_unit_square(10.0, 360.0, 5);
        let mut placer = Placer::new(&mut source);
        placer.run().unwrap();
        let committed = placer.source.committed_shapes();
        for i in 0..committed.len() {
            for j in (i + 1)..committed.len() {
                let area = crate::geometry::intersection_area(&committed[i], &committed[j]);
                assert!(area < 1e-6);
            }
        }
    }
}
