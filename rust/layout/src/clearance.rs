// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stand-off clearance optimization
//!
//! Before bays are allocated along a face, the scaffold run itself has to
//! be sized: the run length grows in 300mm units, and the gap between the
//! building face and the scaffold line (the clearance) falls out of the
//! chosen run length. The optimizer picks the run whose clearance lands
//! closest to the 900mm target while honouring eave overhangs and site
//! boundaries.
//!
//! When a minimum and maximum clearance window admits no 300mm-unit
//! solution, the 355mm and 150mm adjustment spans come into play; 355mm
//! spans are only usable when every adjacent face clearance sits in the
//! 450-700mm window.

use spanplan_core::error::{AllocationError, Result};
use spanplan_core::units::{in_length_domain, SPAN_UNIT_MM};

/// Default stand-off target between building face and scaffold line (mm)
pub const TARGET_CLEARANCE_MM: f64 = 900.0;

/// Extra clearance demanded beyond an eave overhang (mm)
pub const EAVE_MARGIN_MM: f64 = 80.0;

/// Safety margin kept off a site boundary (mm)
pub const BOUNDARY_SAFETY_MARGIN_MM: f64 = 60.0;

/// Large adjustment span (mm)
pub const ADJUSTMENT_SPAN_LARGE_MM: f64 = 355.0;

/// Small adjustment span (mm)
pub const ADJUSTMENT_SPAN_SMALL_MM: f64 = 150.0;

/// Adjacent-face clearance window permitting 355mm spans (mm)
pub const ADJACENT_WINDOW_MM: (f64, f64) = (450.0, 700.0);

/// Options for clearance optimization
#[derive(Debug, Clone)]
pub struct ClearanceOptions {
    /// Clearance to aim for (mm)
    pub target_clearance: f64,
    /// Hard lower bound on the clearance, if any (mm)
    pub min_clearance: Option<f64>,
    /// Eave overhang raising the minimum to `overhang + 80` (mm)
    pub eave_overhang: Option<f64>,
    /// Run length granularity (mm)
    pub span_unit: f64,
}

impl Default for ClearanceOptions {
    fn default() -> Self {
        Self {
            target_clearance: TARGET_CLEARANCE_MM,
            min_clearance: None,
            eave_overhang: None,
            span_unit: SPAN_UNIT_MM,
        }
    }
}

/// Optimal clearance for one building face
#[derive(Debug, Clone, PartialEq)]
pub struct ClearanceResult {
    pub building_width: f64,
    /// Chosen stand-off on each side (mm)
    pub clearance: f64,
    /// Total scaffold run length, a multiple of the span unit (mm)
    pub run_length: f64,
    pub target_clearance: f64,
}

/// Pick the span-unit run length whose clearance lands closest to target
///
/// The run must cover `building_width + 2 * clearance`; candidates step
/// through span-unit multiples from the minimum admissible run up to twice
/// the target clearance beyond the face. Ties keep the shorter run, so
/// identical inputs always pick the identical candidate.
pub fn optimal_clearance(building_width: f64, opts: &ClearanceOptions) -> Result<ClearanceResult> {
    if !in_length_domain(building_width) {
        return Err(AllocationError::InputRange {
            context: "building_width",
            value: building_width,
        });
    }
    if !in_length_domain(opts.span_unit) {
        return Err(AllocationError::InputRange {
            context: "span_unit",
            value: opts.span_unit,
        });
    }

    let mut min_clear = opts.min_clearance.unwrap_or(0.0);
    if let Some(eave) = opts.eave_overhang {
        min_clear = min_clear.max(eave + EAVE_MARGIN_MM);
    }

    let unit = opts.span_unit;
    let base = ((building_width + 2.0 * min_clear) / unit).ceil() * unit;
    let limit = ((building_width + 4.0 * opts.target_clearance) / unit).ceil() * unit;

    let mut best: Option<(f64, f64, f64)> = None; // (diff, clearance, run)
    let mut run = base;
    while run <= limit {
        let clearance = (run - building_width) / 2.0;
        if clearance >= min_clear {
            let diff = (clearance - opts.target_clearance).abs();
            if best.map_or(true, |(best_diff, _, _)| diff < best_diff) {
                best = Some((diff, clearance, run));
            }
        }
        run += unit;
    }

    let (_, clearance, run_length) = best.unwrap_or((0.0, (base - building_width) / 2.0, base));
    Ok(ClearanceResult {
        building_width,
        clearance,
        run_length,
        target_clearance: opts.target_clearance,
    })
}

/// Clearance split against a site boundary
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryClearance {
    /// Clearance on the boundary side, capped at `boundary - 60` (mm)
    pub near_clearance: f64,
    /// Clearance on the opposite side, absorbing the shift (mm)
    pub far_clearance: f64,
    pub run_length: f64,
    /// Length moved from the boundary side to the far side (mm)
    pub shift: f64,
    pub boundary_distance: f64,
    pub max_clearance: f64,
}

/// Shift the run away from a site boundary without changing its length
///
/// The boundary caps the near-side clearance at `boundary_distance - 60`;
/// whatever the cap shaves off moves to the opposite side.
pub fn clearance_with_boundary(
    building_width: f64,
    boundary_distance: f64,
    opts: &ClearanceOptions,
) -> Result<BoundaryClearance> {
    let max_clearance = boundary_distance - BOUNDARY_SAFETY_MARGIN_MM;
    if !in_length_domain(boundary_distance) || max_clearance <= 0.0 {
        return Err(AllocationError::InputRange {
            context: "boundary_distance",
            value: boundary_distance,
        });
    }

    let base = optimal_clearance(building_width, opts)?;
    let near_clearance = base.clearance.min(max_clearance);
    let shift = base.clearance - near_clearance;
    Ok(BoundaryClearance {
        near_clearance,
        far_clearance: base.clearance + shift,
        run_length: base.run_length,
        shift,
        boundary_distance,
        max_clearance,
    })
}

/// Clearance computed with 355/150mm adjustment spans
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustedClearance {
    pub clearance: f64,
    pub run_length: f64,
    pub span_355_count: u32,
    pub span_150_count: u32,
    /// Length added to the unconstrained run (mm)
    pub adjustment: f64,
    /// Whether the min/max clearance window is actually met
    pub satisfied: bool,
}

/// Satisfy a clearance window the 300mm grid cannot hit
///
/// Starts from the unconstrained optimum; when that misses the window,
/// tries inserting adjustment spans — 355mm first where the adjacent faces
/// allow it, 150mm otherwise, smallest insertion first — and falls back to
/// one extra 300mm unit when nothing fits.
pub fn clearance_with_adjustment_spans(
    building_width: f64,
    min_clearance: Option<f64>,
    max_clearance: Option<f64>,
    adjacent_clearances: &[f64],
    opts: &ClearanceOptions,
) -> Result<AdjustedClearance> {
    let unconstrained = ClearanceOptions {
        min_clearance: None,
        eave_overhang: None,
        ..opts.clone()
    };
    let base = optimal_clearance(building_width, &unconstrained)?;

    let lo = min_clearance.unwrap_or(0.0);
    let hi = max_clearance.unwrap_or(f64::INFINITY);

    if base.clearance >= lo && base.clearance <= hi {
        return Ok(AdjustedClearance {
            clearance: base.clearance,
            run_length: base.run_length,
            span_355_count: 0,
            span_150_count: 0,
            adjustment: 0.0,
            satisfied: true,
        });
    }

    let (window_lo, window_hi) = ADJACENT_WINDOW_MM;
    let can_use_large = !adjacent_clearances.is_empty()
        && adjacent_clearances
            .iter()
            .all(|&c| c >= window_lo && c <= window_hi);

    // (355mm count, 150mm count), in preference order
    let trials: &[(u32, u32)] = if can_use_large {
        &[(1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]
    } else {
        &[(0, 1)]
    };

    for &(large, small) in trials {
        let adjustment = f64::from(large) * ADJUSTMENT_SPAN_LARGE_MM
            + f64::from(small) * ADJUSTMENT_SPAN_SMALL_MM;
        let run_length = base.run_length + adjustment;
        let clearance = (run_length - building_width) / 2.0;
        if clearance >= lo && clearance <= hi {
            return Ok(AdjustedClearance {
                clearance,
                run_length,
                span_355_count: large,
                span_150_count: small,
                adjustment,
                satisfied: true,
            });
        }
    }

    // No adjustment-span combination fits: add one plain unit and report
    // whether that happens to satisfy the window
    let adjustment = opts.span_unit;
    let run_length = base.run_length + adjustment;
    let clearance = (run_length - building_width) / 2.0;
    Ok(AdjustedClearance {
        clearance,
        run_length,
        span_355_count: 0,
        span_150_count: 0,
        adjustment,
        satisfied: clearance >= lo && clearance <= hi,
    })
}
