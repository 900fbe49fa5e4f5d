// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Inside-corner clearance resolution
//!
//! At an inside (concave) corner the two adjoining scaffold runs would
//! collide, so each adjoining wall's endpoint bay is shrunk by the corner
//! clearance relative to an unadjusted subdivision. The freed length
//! re-subdivides over the remainder of the span — the wall's recorded
//! length never changes and the bay-sum invariant holds.
//!
//! Recovery before infeasibility is one bounded pass: an endpoint bay
//! below `min_spacing` borrows its deficit from the inner region if the
//! inner region survives at or above `min_spacing` (or is consumed
//! exactly); an inner region below `min_spacing` folds into a corner bay
//! when the fold stays within `max_spacing`.

use crate::spacing;
use spanplan_core::error::{AllocationError, InfeasibilityCode, Result};
use spanplan_core::units::LENGTH_TOL_MM;
use spanplan_core::{Bay, Constraints, CornerType, ShortSpanPolicy};

/// Clearance offset demanded by a corner
///
/// Inside corners claim the configured clearance; outside corners need
/// nothing.
#[inline]
pub fn resolve(corner_type: CornerType, clearance: f64) -> f64 {
    match corner_type {
        CornerType::Concave => clearance,
        CornerType::Convex => 0.0,
    }
}

/// Clearance offsets at the two ends of a free span
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SpanEnds {
    pub lead: f64,
    pub trail: f64,
}

impl SpanEnds {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_plain(&self) -> bool {
        self.lead == 0.0 && self.trail == 0.0
    }
}

/// Subdivide one free span, applying corner clearance at its ends
///
/// `wall` is only used to attribute errors. Bays are appended in offset
/// order starting at `start`.
pub(crate) fn subdivide_span(
    wall: usize,
    start: f64,
    length: f64,
    ends: SpanEnds,
    constraints: &Constraints,
    bays: &mut Vec<Bay>,
) -> Result<()> {
    if ends.is_plain() {
        return subdivide_plain(wall, start, length, constraints, bays);
    }

    let base_n = spacing::divisions(length, constraints.standard_spacing)?;
    let base_s = spacing::equal_spacing(length, base_n);

    let mut first = (ends.lead > 0.0).then(|| base_s - ends.lead);
    let mut last = (ends.trail > 0.0).then(|| base_s - ends.trail);

    for endpoint in [first, last].into_iter().flatten() {
        if endpoint <= LENGTH_TOL_MM {
            return Err(AllocationError::SpacingInfeasible {
                wall,
                code: InfeasibilityCode::CornerOverlap,
                detail: format!(
                    "clearance consumes the endpoint bay ({base_s:.1}mm spacing)"
                ),
            });
        }
    }

    let mut inner = length - first.unwrap_or(0.0) - last.unwrap_or(0.0);
    if inner < -LENGTH_TOL_MM {
        return Err(AllocationError::SpacingInfeasible {
            wall,
            code: InfeasibilityCode::CornerOverlap,
            detail: format!("span {length:.1}mm cannot host both corner bays"),
        });
    }

    // Bounded rebalance: endpoint deficits pull from the inner region
    let min = constraints.min_spacing;
    let deficit = first.map_or(0.0, |f| (min - f).max(0.0))
        + last.map_or(0.0, |l| (min - l).max(0.0));
    if deficit > 0.0 {
        let remaining = inner - deficit;
        if remaining >= min - LENGTH_TOL_MM || remaining.abs() <= LENGTH_TOL_MM {
            first = first.map(|f| f.max(min));
            last = last.map(|l| l.max(min));
            inner = remaining.max(0.0);
        } else {
            return Err(AllocationError::SpacingInfeasible {
                wall,
                code: InfeasibilityCode::RebalanceExhausted,
                detail: format!(
                    "endpoint bay deficit {deficit:.1}mm cannot be borrowed from a {inner:.1}mm inner region"
                ),
            });
        }
    } else if inner > LENGTH_TOL_MM && inner < min - LENGTH_TOL_MM {
        // Inner leftover too short for its own bay: fold into a corner bay
        let max = constraints.max_spacing;
        if let Some(f) = first.filter(|&f| f + inner <= max + LENGTH_TOL_MM) {
            first = Some(f + inner);
            inner = 0.0;
        } else if let Some(l) = last.filter(|&l| l + inner <= max + LENGTH_TOL_MM) {
            last = Some(l + inner);
            inner = 0.0;
        } else {
            return Err(AllocationError::SpacingInfeasible {
                wall,
                code: InfeasibilityCode::RebalanceExhausted,
                detail: format!("{inner:.1}mm leftover fits no adjacent bay"),
            });
        }
    }

    let span_end = start + length;
    let mut offset = start;
    if let Some(f) = first {
        bays.push(Bay::corner(offset, f));
        offset += f;
    }
    if inner > LENGTH_TOL_MM {
        subdivide_plain(wall, offset, inner, constraints, bays)?;
    }
    if let Some(l) = last {
        bays.push(Bay::corner(span_end - l, l));
    }
    Ok(())
}

/// Plain subdivision with the short-span policy applied
fn subdivide_plain(
    wall: usize,
    start: f64,
    length: f64,
    constraints: &Constraints,
    bays: &mut Vec<Bay>,
) -> Result<()> {
    let n = spacing::divisions(length, constraints.standard_spacing)?;
    let s = spacing::equal_spacing(length, n);
    if s < constraints.min_spacing - LENGTH_TOL_MM {
        let accepted = n == 1 && constraints.short_span_policy == ShortSpanPolicy::Accept;
        if !accepted {
            return Err(AllocationError::SpacingInfeasible {
                wall,
                code: InfeasibilityCode::SpanTooShort,
                detail: format!(
                    "{length:.1}mm span yields {s:.1}mm spacing, below minimum {:.1}mm",
                    constraints.min_spacing
                ),
            });
        }
    }
    spacing::subdivide(start, length, constraints.standard_spacing, bays)
}
