// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mandatory boundary insertion for attached structures
//!
//! A protrusion (shed, balcony, stair) claims its offset range as one fixed
//! bay that is never subdivided, regardless of standard spacing. The free
//! sub-segments before, between and after protrusions become independent
//! spans for the spacing calculator.

use smallvec::SmallVec;
use spanplan_core::error::{AllocationError, ProtrusionConflictCode, Result};
use spanplan_core::units::LENGTH_TOL_MM;
use spanplan_core::{Constraints, Protrusion, ProtrusionKind, Wall};

/// One carved slice of a wall
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Cell {
    /// Free sub-segment, to be subdivided
    Free { start: f64, len: f64 },
    /// Fixed protrusion bay
    Fixed {
        start: f64,
        len: f64,
        kind: ProtrusionKind,
    },
}

impl Cell {
    pub fn is_fixed(&self) -> bool {
        matches!(self, Cell::Fixed { .. })
    }
}

/// Wall sliced into free spans and fixed protrusion bays, in offset order
#[derive(Debug, Clone)]
pub(crate) struct CarvedWall {
    pub cells: SmallVec<[Cell; 4]>,
}

/// Slice a wall at its protrusion boundaries
///
/// Protrusions are taken in offset order. Fails when ranges overlap, leave
/// a negative gap, or exceed the wall; stairs additionally demand
/// `min_end_margin` of free run against each stair edge wherever a free
/// segment exists at all.
pub(crate) fn carve(wall_index: usize, wall: &Wall, constraints: &Constraints) -> Result<CarvedWall> {
    let mut ordered: SmallVec<[&Protrusion; 2]> = wall.protrusions.iter().collect();
    ordered.sort_by(|a, b| a.start.total_cmp(&b.start));

    let conflict = |code, detail: String| AllocationError::ProtrusionConflict {
        wall: wall_index,
        code,
        detail,
    };

    for p in &ordered {
        if p.start < -LENGTH_TOL_MM || p.end <= p.start || p.width() > wall.length + LENGTH_TOL_MM
            || p.end > wall.length + LENGTH_TOL_MM
        {
            return Err(conflict(
                ProtrusionConflictCode::Oversize,
                format!(
                    "{:?} range [{:.1}, {:.1}] does not fit a {:.1}mm wall",
                    p.kind, p.start, p.end, wall.length
                ),
            ));
        }
    }

    let mut cells = SmallVec::new();
    let mut cursor = 0.0;
    for p in &ordered {
        let gap = p.start - cursor;
        if gap < -LENGTH_TOL_MM {
            return Err(conflict(
                ProtrusionConflictCode::Overlap,
                format!(
                    "{:?} at {:.1}mm overlaps the previous boundary at {:.1}mm",
                    p.kind, p.start, cursor
                ),
            ));
        }
        if gap > LENGTH_TOL_MM {
            cells.push(Cell::Free {
                start: cursor,
                len: gap,
            });
        }
        cells.push(Cell::Fixed {
            start: p.start,
            len: p.width(),
            kind: p.kind,
        });
        cursor = p.end;
    }
    let tail = wall.length - cursor;
    if tail > LENGTH_TOL_MM {
        cells.push(Cell::Free {
            start: cursor,
            len: tail,
        });
    }

    check_stair_margins(wall_index, &cells, constraints)?;

    Ok(CarvedWall { cells })
}

/// Free segments adjacent to a stair must retain the end margin
fn check_stair_margins(wall_index: usize, cells: &[Cell], constraints: &Constraints) -> Result<()> {
    let margin = constraints.min_end_margin;
    for (i, cell) in cells.iter().enumerate() {
        let Cell::Fixed { kind, .. } = cell else {
            continue;
        };
        if !kind.requires_end_margin() {
            continue;
        }
        let neighbours = [i.checked_sub(1).and_then(|j| cells.get(j)), cells.get(i + 1)];
        for neighbour in neighbours.into_iter().flatten() {
            if let Cell::Free { len, .. } = neighbour {
                if *len < margin - LENGTH_TOL_MM {
                    return Err(AllocationError::ProtrusionConflict {
                        wall: wall_index,
                        code: ProtrusionConflictCode::StairMargin,
                        detail: format!(
                            "{len:.1}mm free segment against a stair edge, need {margin:.1}mm"
                        ),
                    });
                }
            }
        }
    }
    Ok(())
}
