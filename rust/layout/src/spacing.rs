// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Span subdivision arithmetic
//!
//! Pure and policy-free: `divisions` and `equal_spacing` know nothing about
//! minimum spacing. A result below `min_spacing` is the allocator's problem
//! to merge, rebalance or reject.

use spanplan_core::error::{AllocationError, Result};
use spanplan_core::units::in_length_domain;
use spanplan_core::Bay;

/// Number of equal bays needed so none exceeds `standard_spacing`
///
/// `ceil(length / standard_spacing)`, clamped to at least 1. Because the
/// count only ever rounds up, the resulting spacing never exceeds the
/// standard.
pub fn divisions(length: f64, standard_spacing: f64) -> Result<u32> {
    if !in_length_domain(length) {
        return Err(AllocationError::InputRange {
            context: "span length",
            value: length,
        });
    }
    if !in_length_domain(standard_spacing) {
        return Err(AllocationError::InputRange {
            context: "standard_spacing",
            value: standard_spacing,
        });
    }
    Ok(((length / standard_spacing).ceil() as u32).max(1))
}

/// Equal spacing for a span cut into `divisions` bays
#[inline]
pub fn equal_spacing(length: f64, divisions: u32) -> f64 {
    length / f64::from(divisions)
}

/// Cut a span into equal bays, appending to `bays`
///
/// Bay starts are wall-local offsets beginning at `start`. The final bay
/// takes the remainder `length - spacing * (n - 1)` rather than the
/// computed spacing, so the bay lengths sum to `length` exactly even when
/// `length / n` is not representable.
pub fn subdivide(start: f64, length: f64, standard_spacing: f64, bays: &mut Vec<Bay>) -> Result<()> {
    let n = divisions(length, standard_spacing)?;
    let spacing = equal_spacing(length, n);
    for i in 0..n {
        let bay_start = start + spacing * f64::from(i);
        let bay_len = if i + 1 == n {
            (start + length) - bay_start
        } else {
            spacing
        };
        bays.push(Bay::free(bay_start, bay_len, spacing));
    }
    Ok(())
}
