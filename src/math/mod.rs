/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// Tolerance for all elevation and length comparisons, in model length units.
pub const TOLERANCE: f64 = 1e-6;

/// Returns whether `a` is above `b` by more than [`TOLERANCE`].
#[must_use]
pub fn above(a: f64, b: f64) -> bool {
    a > b + TOLERANCE
}

/// Returns whether `a` and `b` differ by at most [`TOLERANCE`].
#[must_use]
pub fn near(a: f64, b: f64) -> bool {
    (a - b).abs() <= TOLERANCE
}
