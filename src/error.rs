use thiserror::Error;

/// Contract violations a `ShapeSource` implementation signals back to the
/// placer. A correct placer never triggers any of these (spec §7.1) — if
/// one fires, the run aborts upward rather than being retried.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ShapeSourceError {
    #[error("shape generator not ready: submit the previous placement before requesting a new shape")]
    NotReady,

    #[error("no shape to place: call next_shape first")]
    NoCurrentShape,

    #[error("rotation of {rotation_deg}° is not allowed by the {step}° symmetry")]
    RotationDisallowed { rotation_deg: f64, step: f64 },

    #[error("placement puts a vertex at distance {distance} outside the disk of radius {radius}")]
    OutsideDisk { distance: f64, radius: f64 },

    #[error("placement overlaps an existing shape (intersection area {area})")]
    Overlaps { area: f64 },
}
