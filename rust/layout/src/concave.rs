// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Concave-notch merging
//!
//! A wall shorter than `min_spacing` inside a concave notch cannot carry
//! its own subdivision. It merges with the neighbour(s) across the concave
//! corner into one composite span; after subdivision the bays are split
//! back at the shared corner coordinates so every wall's bay sum stays
//! exact. Corner clearance applies at the composite's outer ends only —
//! the merge replaces clearance handling at the swallowed interior corners.

use crate::corner::{self, SpanEnds};
use spanplan_core::error::{AllocationError, ProtrusionConflictCode, Result};
use spanplan_core::units::LENGTH_TOL_MM;
use spanplan_core::{Bay, Constraints, CornerType, Perimeter};

/// Consecutive (cyclically) run of walls allocated as one span
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MergeGroup {
    /// Wall indices in perimeter order
    pub walls: Vec<usize>,
}

impl MergeGroup {
    pub fn is_composite(&self) -> bool {
        self.walls.len() > 1
    }
}

/// Decide which walls must be merged before subdivision
///
/// Two neighbours join when the corner between them is concave and either
/// side is shorter than `min_spacing`. Maximal joined runs become one
/// group; every other wall forms a singleton group. Groups come out in
/// ascending order of their first wall index — rerunning on identical
/// input yields the identical plan.
pub(crate) fn merge_if_needed(perimeter: &Perimeter, min_spacing: f64) -> Result<Vec<MergeGroup>> {
    let n = perimeter.len();
    let walls = perimeter.walls();

    let short = |i: usize| walls[i].length < min_spacing - LENGTH_TOL_MM;
    let join: Vec<bool> = (0..n)
        .map(|i| {
            perimeter.corner_after(i) == CornerType::Concave
                && (short(i) || short(perimeter.next(i)))
        })
        .collect();

    if join.iter().all(|&j| j) {
        // A simple rectilinear perimeter always has at least four convex
        // corners, so a fully joined cycle means broken input
        return Err(AllocationError::GeometryInconsistency(
            "every wall boundary is a short concave joint; perimeter is degenerate".to_string(),
        ));
    }

    let mut groups = Vec::new();
    let mut visited = vec![false; n];
    for s in 0..n {
        if visited[s] || join[perimeter.prev(s)] {
            continue;
        }
        let mut members = vec![s];
        visited[s] = true;
        let mut cur = s;
        while join[cur] {
            cur = perimeter.next(cur);
            members.push(cur);
            visited[cur] = true;
        }
        groups.push(MergeGroup { walls: members });
    }
    Ok(groups)
}

/// Allocate a composite group: subdivide the merged span, then split the
/// bays back at the shared corner coordinates
///
/// Returns `(wall index, wall-local bays)` per member wall, in group order.
/// Walls in a merge group must be protrusion-free: a fixed boundary inside
/// a span that only exists because its walls were too short has no
/// allocatable freedom left.
pub(crate) fn allocate_composite(
    group: &MergeGroup,
    perimeter: &Perimeter,
    constraints: &Constraints,
) -> Result<Vec<(usize, Vec<Bay>)>> {
    let walls = perimeter.walls();
    for &w in &group.walls {
        if !walls[w].protrusions.is_empty() {
            return Err(AllocationError::ProtrusionConflict {
                wall: w,
                code: ProtrusionConflictCode::MergedSpan,
                detail: "wall is merged into a concave composite span".to_string(),
            });
        }
    }

    let Some((&first, &last)) = group.walls.first().zip(group.walls.last()) else {
        return Ok(Vec::new());
    };
    let composite_len: f64 = group.walls.iter().map(|&w| walls[w].length).sum();

    let ends = SpanEnds {
        lead: corner::resolve(perimeter.corner_at(first), constraints.corner_clearance),
        trail: corner::resolve(perimeter.corner_after(last), constraints.corner_clearance),
    };

    let mut composite_bays = Vec::new();
    corner::subdivide_span(first, 0.0, composite_len, ends, constraints, &mut composite_bays)?;

    Ok(split_back(group, perimeter, composite_bays))
}

/// Redistribute composite bays onto member walls, splitting at wall joints
fn split_back(
    group: &MergeGroup,
    perimeter: &Perimeter,
    composite_bays: Vec<Bay>,
) -> Vec<(usize, Vec<Bay>)> {
    let walls = perimeter.walls();
    let mut out: Vec<(usize, Vec<Bay>)> =
        group.walls.iter().map(|&w| (w, Vec::new())).collect();

    let mut wi = 0;
    let mut wall_base = 0.0;
    let mut wall_end = walls[group.walls[0]].length;

    for bay in composite_bays {
        let mut seg_start = bay.start;
        let seg_end = bay.end();

        while seg_start >= wall_end - LENGTH_TOL_MM && wi + 1 < group.walls.len() {
            wi += 1;
            wall_base = wall_end;
            wall_end += walls[group.walls[wi]].length;
        }

        let straddles = seg_end > wall_end + LENGTH_TOL_MM;
        loop {
            let cut = wall_end.min(seg_end);
            let piece_len = cut - seg_start;
            if piece_len > LENGTH_TOL_MM {
                out[wi].1.push(Bay {
                    start: (seg_start - wall_base).max(0.0),
                    length: piece_len,
                    spacing: bay.spacing,
                    is_corner_adjusted: bay.is_corner_adjusted || straddles,
                    is_protrusion_bay: false,
                    protrusion_kind: None,
                });
            }
            if cut >= seg_end - LENGTH_TOL_MM {
                break;
            }
            seg_start = cut;
            wi += 1;
            wall_base = wall_end;
            wall_end += walls[group.walls[wi]].length;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use spanplan_core::{Heading, Wall};

    /// U-shaped outline: 10000x6000 bounding box with a 4000x800 notch cut
    /// into the top edge
    fn notched_perimeter() -> Perimeter {
        Perimeter::new(vec![
            Wall::new(10000.0, Heading::East, CornerType::Convex),
            Wall::new(6000.0, Heading::North, CornerType::Convex),
            Wall::new(3000.0, Heading::West, CornerType::Convex),
            Wall::new(800.0, Heading::South, CornerType::Convex),
            Wall::new(4000.0, Heading::West, CornerType::Concave),
            Wall::new(800.0, Heading::North, CornerType::Concave),
            Wall::new(3000.0, Heading::West, CornerType::Convex),
            Wall::new(6000.0, Heading::South, CornerType::Convex),
        ])
    }

    #[test]
    fn test_short_notch_walls_merge() {
        let p = notched_perimeter();
        let groups = merge_if_needed(&p, 900.0).unwrap();
        let composite: Vec<_> = groups.iter().filter(|g| g.is_composite()).collect();
        assert_eq!(composite.len(), 1);
        assert_eq!(composite[0].walls, vec![3, 4, 5]);
        // Everything else stays singleton
        assert_eq!(groups.len(), 6);
    }

    #[test]
    fn test_no_merge_without_short_walls() {
        // Same shape scaled so the notch sides clear the minimum
        let p = Perimeter::new(vec![
            Wall::new(10000.0, Heading::East, CornerType::Convex),
            Wall::new(6000.0, Heading::North, CornerType::Convex),
            Wall::new(3000.0, Heading::West, CornerType::Convex),
            Wall::new(2000.0, Heading::South, CornerType::Convex),
            Wall::new(4000.0, Heading::West, CornerType::Concave),
            Wall::new(2000.0, Heading::North, CornerType::Concave),
            Wall::new(3000.0, Heading::West, CornerType::Convex),
            Wall::new(6000.0, Heading::South, CornerType::Convex),
        ]);
        let groups = merge_if_needed(&p, 900.0).unwrap();
        assert!(groups.iter().all(|g| !g.is_composite()));
        assert_eq!(groups.len(), 8);
    }

    #[test]
    fn test_composite_split_back() {
        let p = notched_perimeter();
        let group = MergeGroup {
            walls: vec![3, 4, 5],
        };
        let parts = allocate_composite(&group, &p, &Constraints::default()).unwrap();

        // Composite 5600mm -> 4 x 1400; joints at 800 and 4800 split the
        // first and last bay
        let (w3, bays3) = &parts[0];
        let (w4, bays4) = &parts[1];
        let (w5, bays5) = &parts[2];
        assert_eq!((*w3, *w4, *w5), (3, 4, 5));

        let lens = |bays: &Vec<Bay>| bays.iter().map(|b| b.length).collect::<Vec<_>>();
        assert_eq!(lens(bays3), vec![800.0]);
        assert_eq!(lens(bays4), vec![600.0, 1400.0, 1400.0, 600.0]);
        assert_eq!(lens(bays5), vec![800.0]);

        // Split pieces hug the shared corners
        assert!(bays3[0].is_corner_adjusted);
        assert!(bays4[0].is_corner_adjusted);
        assert!(bays4[3].is_corner_adjusted);
        assert!(bays5[0].is_corner_adjusted);

        // Per-wall sums stay exact
        let sum4: f64 = bays4.iter().map(|b| b.length).sum();
        assert!((sum4 - 4000.0).abs() < 1e-9);
    }

    #[test]
    fn test_protrusion_inside_merge_rejected() {
        use spanplan_core::{Protrusion, ProtrusionKind};
        let mut walls = notched_perimeter().walls().to_vec();
        walls[4] = walls[4]
            .clone()
            .with_protrusion(Protrusion::new(1000.0, 1900.0, ProtrusionKind::Shed));
        let p = Perimeter::new(walls);
        let group = MergeGroup {
            walls: vec![3, 4, 5],
        };
        assert!(matches!(
            allocate_composite(&group, &p, &Constraints::default()),
            Err(AllocationError::ProtrusionConflict {
                wall: 4,
                code: ProtrusionConflictCode::MergedSpan,
                ..
            })
        ));
    }
}
