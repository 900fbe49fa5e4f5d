// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Walls, corners and attached protrusions
//!
//! A wall is one ordered segment of the perimeter. Protrusions attach to
//! their wall by index and offset range (value semantics) — ownership is
//! strictly wall -> protrusion, never a back-pointer.

use crate::units::{BALCONY_MODULE_MM, SHED_MODULE_MM, STAIR_TREAD_MM};
use smallvec::SmallVec;

/// Corner geometry at a wall's start, seen from the building interior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CornerType {
    /// Outside corner — no clearance adjustment
    Convex,
    /// Inside corner — adjoining scaffold runs need clearance
    Concave,
}

/// Axis direction of a wall, counter-clockwise perimeter winding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Heading {
    East,
    North,
    West,
    South,
}

impl Heading {
    /// Unit direction components (x, y)
    #[inline]
    pub fn unit(&self) -> (f64, f64) {
        match self {
            Self::East => (1.0, 0.0),
            Self::North => (0.0, 1.0),
            Self::West => (-1.0, 0.0),
            Self::South => (0.0, -1.0),
        }
    }

    /// Corner type implied by turning from `self` onto `next`
    ///
    /// With counter-clockwise winding a left turn is an outside (convex)
    /// corner and a right turn an inside (concave) one. Collinear or
    /// reversing headings form no corner at all.
    pub fn turn_to(&self, next: Heading) -> Option<CornerType> {
        let (ax, ay) = self.unit();
        let (bx, by) = next.unit();
        let cross = ax * by - ay * bx;
        if cross > 0.5 {
            Some(CornerType::Convex)
        } else if cross < -0.5 {
            Some(CornerType::Concave)
        } else {
            None
        }
    }
}

/// Kind of structure attached to a wall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ProtrusionKind {
    Shed,
    Balcony,
    Stair,
}

impl ProtrusionKind {
    /// Standard module width for this kind (mm)
    pub fn module_width(&self) -> f64 {
        match self {
            Self::Shed => SHED_MODULE_MM,
            Self::Balcony => BALCONY_MODULE_MM,
            Self::Stair => STAIR_TREAD_MM,
        }
    }

    /// Stairs demand a minimum free margin on both sides
    pub fn requires_end_margin(&self) -> bool {
        matches!(self, Self::Stair)
    }
}

/// An attached structure occupying a fixed, non-subdividable range on a wall
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Protrusion {
    /// Start offset along the wall (mm from wall start)
    pub start: f64,
    /// End offset along the wall (mm from wall start), exclusive
    pub end: f64,
    pub kind: ProtrusionKind,
}

impl Protrusion {
    pub fn new(start: f64, end: f64, kind: ProtrusionKind) -> Self {
        Self { start, end, kind }
    }

    /// Protrusion spanning one standard module of its kind from `start`
    pub fn with_module(start: f64, kind: ProtrusionKind) -> Self {
        Self {
            start,
            end: start + kind.module_width(),
            kind,
        }
    }

    /// Occupied width (mm) — also the fixed bay width it will produce
    #[inline]
    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// One ordered segment of the perimeter
///
/// Immutable once allocation begins; the allocator never mutates walls.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Wall {
    /// Length along the perimeter (mm, > 0)
    pub length: f64,
    pub heading: Heading,
    /// Corner type where this wall starts (shared with the previous wall's end)
    pub start_corner: CornerType,
    /// Attached structures, kept in offset order
    #[cfg_attr(feature = "serde", serde(default))]
    pub protrusions: SmallVec<[Protrusion; 2]>,
}

impl Wall {
    pub fn new(length: f64, heading: Heading, start_corner: CornerType) -> Self {
        Self {
            length,
            heading,
            start_corner,
            protrusions: SmallVec::new(),
        }
    }

    /// Builder-style protrusion attachment
    pub fn with_protrusion(mut self, protrusion: Protrusion) -> Self {
        self.protrusions.push(protrusion);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turns() {
        // CCW rectangle: every turn is convex
        assert_eq!(Heading::East.turn_to(Heading::North), Some(CornerType::Convex));
        assert_eq!(Heading::North.turn_to(Heading::West), Some(CornerType::Convex));
        // Right turn: inside corner
        assert_eq!(Heading::North.turn_to(Heading::East), Some(CornerType::Concave));
        assert_eq!(Heading::West.turn_to(Heading::North), Some(CornerType::Concave));
        // Degenerate
        assert_eq!(Heading::East.turn_to(Heading::East), None);
        assert_eq!(Heading::East.turn_to(Heading::West), None);
    }

    #[test]
    fn test_protrusion_width() {
        let p = Protrusion::new(2000.0, 2900.0, ProtrusionKind::Shed);
        assert_eq!(p.width(), 900.0);

        let stair = Protrusion::with_module(1000.0, ProtrusionKind::Stair);
        assert_eq!(stair.end, 1900.0);
        assert_eq!(stair.width(), 900.0);
        assert!(stair.kind.requires_end_margin());
        assert!(!ProtrusionKind::Shed.requires_end_margin());
    }
}
