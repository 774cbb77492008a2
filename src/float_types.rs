// Our Real scalar type:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

// Pi
/// Archimedes' constant (π)
#[cfg(feature = "f32")]
pub const PI: Real = core::f32::consts::PI;
/// Archimedes' constant (π)
#[cfg(feature = "f64")]
pub const PI: Real = core::f64::consts::PI;

/// Lengths below this are treated as zero when normalising direction vectors.
#[cfg(feature = "f32")]
pub const EPSILON: Real = 1e-5;
/// Lengths below this are treated as zero when normalising direction vectors.
#[cfg(feature = "f64")]
pub const EPSILON: Real = 1e-10;

// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// Engine constants
// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

/// How far past either end of a segment (as a fraction of its length) a
/// projection is still accepted.
pub const PROJECTION_OVERSHOOT: Real = 0.075;

/// Default number of line segments a curve is sampled into.
pub const DEFAULT_CURVE_SEGMENTS: usize = 50;

/// Level one: design space is drawn 1.75x larger on screen.
pub const DEFAULT_SCALE: Real = 1.75;

/// Level one: base tolerance in view-space units.
pub const DEFAULT_TOLERANCE: Real = 25.0;

/// Tolerance added once per escalation step.
pub const TOLERANCE_INCREMENT: Real = 15.0;

/// Consecutive off-path errors that trigger one escalation step.
pub const ESCALATION_THRESHOLD: u32 = 3;

/// Moves shorter than this are never direction-checked.
pub const MOVE_NOISE_FLOOR: Real = 10.0;

/// Largest accepted angle (degrees) between movement and path direction.
pub const MAX_DIRECTION_ANGLE: Real = 90.0;
