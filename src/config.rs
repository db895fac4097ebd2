//! Numerical constants shared by every component, per spec §6.3.
//!
//! These are invariants of the algorithm, not policy a caller can tune —
//! there is deliberately no `Config` struct or builder here.

/// Tolerance used for coordinate equality (vertex provenance, in-disk checks).
pub const EPS_COORD: f64 = 1e-12;

/// Tolerance used for overlap-area checks between committed polygons.
pub const EPS_AREA: f64 = 1e-7;

/// Angular step used by the IFP sliding construction, in degrees.
pub const IFP_ANGULAR_STEP_DEG: f64 = 4.0;

/// Safety back-off subtracted from a slide distance to avoid numerical
/// over-shoot past the disk boundary.
pub const SLIDE_BACKOFF: f64 = 0.01;

/// Scale factor used when handing polygons to the Clipper-based boolean
/// operations (`geo_clipper` works in integer space internally).
pub const CLIPPER_SCALE: f64 = 10_000_000.0;
