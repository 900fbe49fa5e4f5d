// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Post-pass correctness checking
//!
//! Collects every violation across the whole result instead of stopping at
//! the first — the caller gets the full diagnostic report and decides
//! whether to reject or warn. An empty list means a clean layout.

use spanplan_core::units::LENGTH_TOL_MM;
use spanplan_core::{
    AllocationResult, Constraints, CornerType, IssueCode, Perimeter, Protrusion, ValidationIssue,
};

/// Check a finished allocation against its inputs
pub fn validate(
    result: &AllocationResult,
    perimeter: &Perimeter,
    constraints: &Constraints,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for alloc in &result.walls {
        let i = alloc.wall;
        let Some(wall) = perimeter.walls().get(i) else {
            issues.push(ValidationIssue::new(
                IssueCode::BaySumMismatch,
                i,
                None,
                "allocation references a wall outside the perimeter",
            ));
            continue;
        };

        check_coverage(alloc.wall, &alloc.bays, wall.length, &mut issues);
        check_spacing_bounds(alloc.wall, &alloc.bays, constraints, &mut issues);
        check_protrusion_bays(alloc.wall, &alloc.bays, &wall.protrusions, &mut issues);
        check_corner_bays(alloc.wall, &alloc.bays, perimeter, &mut issues);
    }
    issues
}

/// Bays must tile the wall: contiguous, starting at 0, summing to the length
fn check_coverage(
    wall: usize,
    bays: &[spanplan_core::Bay],
    wall_length: f64,
    issues: &mut Vec<ValidationIssue>,
) {
    let sum: f64 = bays.iter().map(|b| b.length).sum();
    if (sum - wall_length).abs() > LENGTH_TOL_MM {
        issues.push(ValidationIssue::new(
            IssueCode::BaySumMismatch,
            wall,
            None,
            format!("bays sum to {sum:.3}mm, wall is {wall_length:.3}mm"),
        ));
    }
    let mut cursor = 0.0;
    for (bi, bay) in bays.iter().enumerate() {
        if (bay.start - cursor).abs() > LENGTH_TOL_MM {
            issues.push(ValidationIssue::new(
                IssueCode::BaySumMismatch,
                wall,
                Some(bi),
                format!("bay starts at {:.3}mm, expected {cursor:.3}mm", bay.start),
            ));
        }
        cursor = bay.end();
    }
}

/// Spacing domain bounds per bay
///
/// Fixed protrusion bays are exempt by definition. Corner-adjusted bays may
/// legitimately sit below the minimum (clearance shrink, composite splits)
/// but never above the maximum or at nothing.
fn check_spacing_bounds(
    wall: usize,
    bays: &[spanplan_core::Bay],
    constraints: &Constraints,
    issues: &mut Vec<ValidationIssue>,
) {
    for (bi, bay) in bays.iter().enumerate() {
        if bay.is_protrusion_bay {
            continue;
        }
        if bay.length > constraints.max_spacing + LENGTH_TOL_MM {
            issues.push(ValidationIssue::new(
                IssueCode::SpacingOutOfRange,
                wall,
                Some(bi),
                format!(
                    "bay {:.1}mm exceeds max spacing {:.1}mm",
                    bay.length, constraints.max_spacing
                ),
            ));
        }
        if bay.length < constraints.min_spacing - LENGTH_TOL_MM {
            if bay.is_corner_adjusted {
                if bay.length <= LENGTH_TOL_MM {
                    issues.push(ValidationIssue::new(
                        IssueCode::CornerOverlap,
                        wall,
                        Some(bi),
                        "corner clearance consumed the bay entirely",
                    ));
                }
            } else if bays.len() == 1 {
                issues.push(ValidationIssue::new(
                    IssueCode::SpanTooShort,
                    wall,
                    Some(bi),
                    format!(
                        "single {:.1}mm bay below min spacing {:.1}mm",
                        bay.length, constraints.min_spacing
                    ),
                ));
            } else {
                issues.push(ValidationIssue::new(
                    IssueCode::SpacingOutOfRange,
                    wall,
                    Some(bi),
                    format!(
                        "bay {:.1}mm below min spacing {:.1}mm",
                        bay.length, constraints.min_spacing
                    ),
                ));
            }
        }
    }
}

/// Every declared protrusion must map to exactly one fixed bay of its width
fn check_protrusion_bays(
    wall: usize,
    bays: &[spanplan_core::Bay],
    protrusions: &[Protrusion],
    issues: &mut Vec<ValidationIssue>,
) {
    let mut ordered: Vec<&Protrusion> = protrusions.iter().collect();
    ordered.sort_by(|a, b| a.start.total_cmp(&b.start));
    let fixed: Vec<(usize, &spanplan_core::Bay)> = bays
        .iter()
        .enumerate()
        .filter(|(_, b)| b.is_protrusion_bay)
        .collect();

    if fixed.len() != ordered.len() {
        issues.push(ValidationIssue::new(
            IssueCode::ProtrusionConflict,
            wall,
            None,
            format!(
                "{} protrusions declared, {} fixed bays allocated",
                ordered.len(),
                fixed.len()
            ),
        ));
        return;
    }
    for (p, (bi, bay)) in ordered.iter().zip(&fixed) {
        if (bay.start - p.start).abs() > LENGTH_TOL_MM
            || (bay.length - p.width()).abs() > LENGTH_TOL_MM
        {
            issues.push(ValidationIssue::new(
                IssueCode::ProtrusionConflict,
                wall,
                Some(*bi),
                format!(
                    "fixed bay [{:.1}, {:.1}] does not match protrusion [{:.1}, {:.1}]",
                    bay.start,
                    bay.end(),
                    p.start,
                    p.end
                ),
            ));
        }
    }
}

/// A fixed bay pressed into an inside corner is a collision in waiting
fn check_corner_bays(
    wall: usize,
    bays: &[spanplan_core::Bay],
    perimeter: &Perimeter,
    issues: &mut Vec<ValidationIssue>,
) {
    if bays.is_empty() {
        return;
    }
    if perimeter.corner_at(wall) == CornerType::Concave && bays[0].is_protrusion_bay {
        issues.push(ValidationIssue::new(
            IssueCode::CornerOverlap,
            wall,
            Some(0),
            "fixed protrusion bay sits on an inside corner",
        ));
    }
    if perimeter.corner_after(wall) == CornerType::Concave
        && bays.last().is_some_and(|b| b.is_protrusion_bay)
    {
        issues.push(ValidationIssue::new(
            IssueCode::CornerOverlap,
            wall,
            Some(bays.len() - 1),
            "fixed protrusion bay sits on an inside corner",
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spanplan_core::{Bay, CornerType, Heading, Wall, WallAllocation};

    fn square() -> Perimeter {
        Perimeter::new(vec![
            Wall::new(3600.0, Heading::East, CornerType::Convex),
            Wall::new(3600.0, Heading::North, CornerType::Convex),
            Wall::new(3600.0, Heading::West, CornerType::Convex),
            Wall::new(3600.0, Heading::South, CornerType::Convex),
        ])
    }

    fn clean_wall(wall: usize) -> WallAllocation {
        WallAllocation::new(
            wall,
            vec![
                Bay::free(0.0, 1800.0, 1800.0),
                Bay::free(1800.0, 1800.0, 1800.0),
            ],
        )
    }

    #[test]
    fn test_clean_result() {
        let result = AllocationResult::new((0..4).map(clean_wall).collect());
        let issues = validate(&result, &square(), &Constraints::default());
        assert!(issues.is_empty());
    }

    #[test]
    fn test_sum_mismatch_detected() {
        let mut result = AllocationResult::new((0..4).map(clean_wall).collect());
        result.walls[1].bays[1].length = 1500.0;
        let issues = validate(&result, &square(), &Constraints::default());
        assert!(issues
            .iter()
            .any(|i| i.code == IssueCode::BaySumMismatch && i.wall == 1));
    }

    #[test]
    fn test_gap_between_bays_detected() {
        let mut result = AllocationResult::new((0..4).map(clean_wall).collect());
        // Keep the sum right but open a gap and overlap
        result.walls[2].bays[1].start = 2000.0;
        let issues = validate(&result, &square(), &Constraints::default());
        assert!(issues
            .iter()
            .any(|i| i.code == IssueCode::BaySumMismatch && i.wall == 2 && i.bay == Some(1)));
    }

    #[test]
    fn test_spacing_bounds_detected() {
        let mut result = AllocationResult::new((0..4).map(clean_wall).collect());
        result.walls[0].bays = vec![
            Bay::free(0.0, 3000.0, 3000.0),
            Bay::free(3000.0, 600.0, 600.0),
        ];
        let issues = validate(&result, &square(), &Constraints::default());
        assert!(issues
            .iter()
            .any(|i| i.code == IssueCode::SpacingOutOfRange && i.bay == Some(0)));
        assert!(issues
            .iter()
            .any(|i| i.code == IssueCode::SpacingOutOfRange && i.bay == Some(1)));
        // All issues collected, not just the first
        assert!(issues.len() >= 2);
    }

    #[test]
    fn test_missing_protrusion_bay_detected() {
        use spanplan_core::{Protrusion, ProtrusionKind};
        let mut walls = square().walls().to_vec();
        walls[0] = walls[0]
            .clone()
            .with_protrusion(Protrusion::new(900.0, 1800.0, ProtrusionKind::Shed));
        let p = Perimeter::new(walls);
        let result = AllocationResult::new((0..4).map(clean_wall).collect());
        let issues = validate(&result, &p, &Constraints::default());
        assert!(issues
            .iter()
            .any(|i| i.code == IssueCode::ProtrusionConflict && i.wall == 0));
    }
}
