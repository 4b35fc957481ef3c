//! Tolerance-aware numeric comparison.
//!
//! All comparisons use an absolute tolerance and never panic: mismatched shapes simply do not
//! match.

/// One full turn, in degrees.
pub const FULL_TURN_DEG: f64 = 360.0;

/// `|a - b| <= tolerance`.
pub fn scalars_match(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

/// Element-wise [`scalars_match`]; vectors of different length never match.
pub fn vectors_match(a: &[f64], b: &[f64], tolerance: f64) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b)
            .all(|(&x, &y)| scalars_match(x, y, tolerance))
}

/// Absolute angular difference folded into `[0, 360)`.
pub fn wrapped_angle_diff(a: f64, b: f64) -> f64 {
    (a - b).abs() % FULL_TURN_DEG
}

/// Whether two angles in degrees are congruent modulo 360 within `tolerance`.
///
/// A difference just below a full turn counts as a match, so `0` and `359.995` agree at the
/// default tolerance.
pub fn rotation_matches(a: f64, b: f64, tolerance: f64) -> bool {
    let diff = wrapped_angle_diff(a, b);
    diff <= tolerance || diff >= FULL_TURN_DEG - tolerance
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
