// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Perimeter allocation pipeline
//!
//! One call runs five stages over immutable inputs:
//!
//! 1. Normalize — closure, wall count, length domains, corner consistency
//! 2. Carve — fixed protrusion boundaries per wall
//! 3. Resolve corners — clearance offsets onto the outermost free spans
//! 4. Merge & subdivide — concave composites, then equal spacing per span
//! 5. Assemble — collect bays, run the validator, attach diagnostics
//!
//! No stage mutates shared state; rerunning on identical input produces a
//! bit-identical result.

use crate::corner::{self, SpanEnds};
use crate::protrusion::{self, CarvedWall, Cell};
use crate::{concave, validator};
use nalgebra::Vector2;
use spanplan_core::error::{AllocationError, InfeasibilityCode, Result};
use spanplan_core::units::{in_length_domain, LENGTH_TOL_MM};
use spanplan_core::{AllocationResult, Bay, Constraints, Perimeter, WallAllocation};

/// Allocate scaffold bays along a closed perimeter
///
/// The single entry point of the engine. Returns the per-wall bay layout
/// with non-fatal diagnostics attached, or the first fatal stage error.
pub fn allocate(perimeter: &Perimeter, constraints: &Constraints) -> Result<AllocationResult> {
    constraints.validate()?;
    normalize(perimeter)?;

    let carved: Vec<CarvedWall> = perimeter
        .walls()
        .iter()
        .enumerate()
        .map(|(i, wall)| protrusion::carve(i, wall, constraints))
        .collect::<Result<_>>()?;

    let groups = concave::merge_if_needed(perimeter, constraints.min_spacing)?;

    let mut per_wall: Vec<Vec<Bay>> = vec![Vec::new(); perimeter.len()];
    for group in &groups {
        if group.is_composite() {
            for (w, bays) in concave::allocate_composite(group, perimeter, constraints)? {
                per_wall[w] = bays;
            }
        } else {
            let i = group.walls[0];
            per_wall[i] = assemble_wall(i, &carved[i], perimeter, constraints)?;
        }
    }

    let allocations = per_wall
        .into_iter()
        .enumerate()
        .map(|(i, bays)| WallAllocation::new(i, bays))
        .collect();
    let mut result = AllocationResult::new(allocations);
    result.issues = validator::validate(&result, perimeter, constraints);
    Ok(result)
}

/// Stage 1: structural validation of the perimeter
fn normalize(perimeter: &Perimeter) -> Result<()> {
    if perimeter.len() < 3 {
        return Err(AllocationError::GeometryInconsistency(format!(
            "perimeter needs at least 3 walls, got {}",
            perimeter.len()
        )));
    }

    let mut residual = Vector2::zeros();
    for wall in perimeter.walls() {
        if !in_length_domain(wall.length) {
            return Err(AllocationError::InputRange {
                context: "wall length",
                value: wall.length,
            });
        }
        let (dx, dy) = wall.heading.unit();
        residual += Vector2::new(dx, dy) * wall.length;
    }
    if residual.norm() > LENGTH_TOL_MM {
        return Err(AllocationError::GeometryInconsistency(format!(
            "perimeter does not close: residual ({:.3}, {:.3})mm",
            residual.x, residual.y
        )));
    }

    for i in 0..perimeter.len() {
        let prev = &perimeter.walls()[perimeter.prev(i)];
        let here = &perimeter.walls()[i];
        match prev.heading.turn_to(here.heading) {
            Some(expected) if expected == here.start_corner => {}
            Some(expected) => {
                return Err(AllocationError::GeometryInconsistency(format!(
                    "wall {i}: declared {:?} corner but headings imply {:?}",
                    here.start_corner, expected
                )));
            }
            None => {
                return Err(AllocationError::GeometryInconsistency(format!(
                    "wall {i}: headings {:?} -> {:?} form no corner",
                    prev.heading, here.heading
                )));
            }
        }
    }
    Ok(())
}

/// Stages 2-4 for one un-merged wall: walk the carved cells, fix
/// protrusion bays, subdivide free spans with clearance at the wall ends
fn assemble_wall(
    i: usize,
    carved: &CarvedWall,
    perimeter: &Perimeter,
    constraints: &Constraints,
) -> Result<Vec<Bay>> {
    let lead = corner::resolve(perimeter.corner_at(i), constraints.corner_clearance);
    let trail = corner::resolve(perimeter.corner_after(i), constraints.corner_clearance);

    let count = carved.cells.len();
    let mut bays = Vec::new();
    for (ci, cell) in carved.cells.iter().enumerate() {
        match *cell {
            Cell::Fixed { start, len, kind } => {
                if (ci == 0 && lead > 0.0) || (ci + 1 == count && trail > 0.0) {
                    return Err(AllocationError::SpacingInfeasible {
                        wall: i,
                        code: InfeasibilityCode::CornerOverlap,
                        detail: format!(
                            "{kind:?} bay at the wall end leaves no room for corner clearance"
                        ),
                    });
                }
                bays.push(Bay::protrusion(start, len, kind));
            }
            Cell::Free { start, len } => {
                let ends = SpanEnds {
                    lead: if ci == 0 { lead } else { 0.0 },
                    trail: if ci + 1 == count { trail } else { 0.0 },
                };
                corner::subdivide_span(i, start, len, ends, constraints, &mut bays)?;
            }
        }
    }
    Ok(bays)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spanplan_core::{CornerType, Heading, ShortSpanPolicy, Wall};

    fn rectangle(w: f64, h: f64) -> Perimeter {
        Perimeter::new(vec![
            Wall::new(w, Heading::East, CornerType::Convex),
            Wall::new(h, Heading::North, CornerType::Convex),
            Wall::new(w, Heading::West, CornerType::Convex),
            Wall::new(h, Heading::South, CornerType::Convex),
        ])
    }

    #[test]
    fn test_rectangle_allocation() {
        let result = allocate(&rectangle(5400.0, 3600.0), &Constraints::default()).unwrap();
        assert!(result.is_clean());
        assert_eq!(result.walls.len(), 4);
        // 5400 -> 3 x 1800, 3600 -> 2 x 1800
        assert_eq!(result.walls[0].bay_count(), 3);
        assert_eq!(result.walls[1].bay_count(), 2);
        for alloc in &result.walls {
            for bay in &alloc.bays {
                assert_eq!(bay.length, 1800.0);
            }
        }
    }

    #[test]
    fn test_open_perimeter_rejected() {
        let p = Perimeter::new(vec![
            Wall::new(5400.0, Heading::East, CornerType::Convex),
            Wall::new(3600.0, Heading::North, CornerType::Convex),
            Wall::new(5000.0, Heading::West, CornerType::Convex),
            Wall::new(3600.0, Heading::South, CornerType::Convex),
        ]);
        assert!(matches!(
            allocate(&p, &Constraints::default()),
            Err(AllocationError::GeometryInconsistency(_))
        ));
    }

    #[test]
    fn test_corner_mismatch_rejected() {
        let mut walls = rectangle(5400.0, 3600.0).walls().to_vec();
        walls[2].start_corner = CornerType::Concave;
        assert!(allocate(&Perimeter::new(walls), &Constraints::default()).is_err());
    }

    #[test]
    fn test_degenerate_heading_rejected() {
        // Two consecutive walls heading the same way form no corner
        let p = Perimeter::new(vec![
            Wall::new(2000.0, Heading::East, CornerType::Convex),
            Wall::new(3400.0, Heading::East, CornerType::Convex),
            Wall::new(3600.0, Heading::North, CornerType::Convex),
            Wall::new(5400.0, Heading::West, CornerType::Convex),
            Wall::new(3600.0, Heading::South, CornerType::Convex),
        ]);
        assert!(allocate(&p, &Constraints::default()).is_err());
    }

    #[test]
    fn test_too_few_walls_rejected() {
        let p = Perimeter::new(vec![
            Wall::new(100.0, Heading::East, CornerType::Convex),
            Wall::new(100.0, Heading::West, CornerType::Convex),
        ]);
        assert!(allocate(&p, &Constraints::default()).is_err());
    }

    #[test]
    fn test_nonpositive_wall_rejected() {
        let mut walls = rectangle(5400.0, 3600.0).walls().to_vec();
        walls[0].length = 0.0;
        assert!(matches!(
            allocate(&Perimeter::new(walls), &Constraints::default()),
            Err(AllocationError::InputRange { .. })
        ));
    }

    #[test]
    fn test_determinism() {
        let p = rectangle(5500.0, 3700.0);
        let c = Constraints::default();
        let a = allocate(&p, &c).unwrap();
        let b = allocate(&p, &c).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_isolated_short_wall_policy() {
        // 800mm wall between convex corners: nothing to merge with
        let p = Perimeter::new(vec![
            Wall::new(800.0, Heading::East, CornerType::Convex),
            Wall::new(3600.0, Heading::North, CornerType::Convex),
            Wall::new(800.0, Heading::West, CornerType::Convex),
            Wall::new(3600.0, Heading::South, CornerType::Convex),
        ]);
        assert!(matches!(
            allocate(&p, &Constraints::default()),
            Err(AllocationError::SpacingInfeasible {
                code: InfeasibilityCode::SpanTooShort,
                ..
            })
        ));

        let accept = Constraints {
            short_span_policy: ShortSpanPolicy::Accept,
            ..Constraints::default()
        };
        let result = allocate(&p, &accept).unwrap();
        assert_eq!(result.walls[0].bays.len(), 1);
        assert_eq!(result.walls[0].bays[0].length, 800.0);
        assert!(result
            .issues
            .iter()
            .any(|iss| iss.code == spanplan_core::IssueCode::SpanTooShort));
    }
}
