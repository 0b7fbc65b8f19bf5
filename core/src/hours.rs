//! Half-hour grid arithmetic.
//!
//! RULE: Every hour quantity that leaves this crate is a multiple
//! of 0.5. Snapping happens at every rounding boundary, never once
//! at the end.

/// Round to the nearest half hour, ties away from zero.
/// 0.25 -> 0.5, 0.75 -> 1.0, -0.25 -> -0.5.
pub fn snap_to_half(hours: f64) -> f64 {
    (hours * 2.0).round() / 2.0
}

/// Largest half-hour multiple not exceeding `hours`. Used where a
/// snapped chunk must stay within a day's remaining capacity.
pub fn snap_half_down(hours: f64) -> f64 {
    (hours * 2.0).floor() / 2.0
}

/// Round a running remainder to two decimals so repeated subtraction
/// cannot leave a spurious non-zero residue.
pub fn round2(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}
