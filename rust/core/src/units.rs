// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Length units and domain bounds
//!
//! All lengths in spanplan are millimetres stored as `f64`. This module
//! holds the domain bounds shared by every component and the standard
//! scaffold module sizes used across the industry.

/// Upper bound for any single length input (100 m in mm)
///
/// Perimeters are buildings, not bridges; anything beyond this is almost
/// certainly a unit mix-up (metres fed as millimetres never trip it,
/// millimetres fed as micrometres do).
pub const MAX_DIMENSION_MM: f64 = 100_000.0;

/// Absolute tolerance for length comparisons (mm)
///
/// Used for closure checks and bay-sum verification. 1e-6 mm is far below
/// anything fabricable but far above accumulated f64 rounding error for
/// perimeters of a few hundred walls.
pub const LENGTH_TOL_MM: f64 = 1e-6;

/// Relative tolerance for spacing arithmetic (`spacing * divisions == length`)
pub const SPACING_REL_TOL: f64 = 1e-9;

/// Base span module (mm) — scaffold runs grow in multiples of this unit
pub const SPAN_UNIT_MM: f64 = 300.0;

/// Standard stair tread module (mm)
pub const STAIR_TREAD_MM: f64 = 900.0;

/// Standard shed bay module (mm)
pub const SHED_MODULE_MM: f64 = 900.0;

/// Standard balcony bay module (mm) — one full standard bay
pub const BALCONY_MODULE_MM: f64 = 1800.0;

/// Check a length against the open-top domain `(0, MAX_DIMENSION_MM]`
#[inline]
pub fn in_length_domain(value: f64) -> bool {
    value > 0.0 && value <= MAX_DIMENSION_MM && value.is_finite()
}

/// Relative equality within [`SPACING_REL_TOL`]
#[inline]
pub fn relative_eq(a: f64, b: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= SPACING_REL_TOL * scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_domain() {
        assert!(in_length_domain(1.0));
        assert!(in_length_domain(100_000.0));
        assert!(!in_length_domain(0.0));
        assert!(!in_length_domain(-900.0));
        assert!(!in_length_domain(100_000.1));
        assert!(!in_length_domain(f64::NAN));
        assert!(!in_length_domain(f64::INFINITY));
    }

    #[test]
    fn test_relative_eq() {
        assert!(relative_eq(1800.0, 1800.0));
        assert!(relative_eq(5400.0, 1800.0 * 3.0));
        assert!(!relative_eq(1800.0, 1800.1));
    }
}
