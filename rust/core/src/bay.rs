// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Allocation result types
//!
//! A bay is one subdivision unit of a wall span, bounded by two consecutive
//! scaffold positions. Bay lengths on a wall always sum exactly to the wall
//! length; the last bay of each subdivision run absorbs the floating-point
//! residue so the invariant holds bit-for-bit.

use crate::issue::ValidationIssue;
use crate::wall::ProtrusionKind;

/// One subdivision unit of a wall span
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bay {
    /// Offset from the wall start (mm)
    pub start: f64,
    /// Bay length (mm)
    pub length: f64,
    /// Equal-spacing value of the subdivision run that produced this bay;
    /// fixed and corner-adjusted bays record their own length
    pub spacing: f64,
    /// Endpoint bay shrunk (or split) by inside-corner clearance
    pub is_corner_adjusted: bool,
    /// Fixed bay covering a protrusion range, never subdivided
    pub is_protrusion_bay: bool,
    /// Kind of the protrusion when `is_protrusion_bay` is set
    pub protrusion_kind: Option<ProtrusionKind>,
}

impl Bay {
    /// Plain subdivision bay
    pub fn free(start: f64, length: f64, spacing: f64) -> Self {
        Self {
            start,
            length,
            spacing,
            is_corner_adjusted: false,
            is_protrusion_bay: false,
            protrusion_kind: None,
        }
    }

    /// Endpoint bay adjusted for inside-corner clearance
    pub fn corner(start: f64, length: f64) -> Self {
        Self {
            start,
            length,
            spacing: length,
            is_corner_adjusted: true,
            is_protrusion_bay: false,
            protrusion_kind: None,
        }
    }

    /// Fixed bay covering a protrusion
    pub fn protrusion(start: f64, length: f64, kind: ProtrusionKind) -> Self {
        Self {
            start,
            length,
            spacing: length,
            is_corner_adjusted: false,
            is_protrusion_bay: true,
            protrusion_kind: Some(kind),
        }
    }

    /// End offset from the wall start (mm)
    #[inline]
    pub fn end(&self) -> f64 {
        self.start + self.length
    }
}

/// Ordered bay sequence of one wall
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WallAllocation {
    /// Index of the wall in the perimeter
    pub wall: usize,
    pub bays: Vec<Bay>,
}

impl WallAllocation {
    pub fn new(wall: usize, bays: Vec<Bay>) -> Self {
        Self { wall, bays }
    }

    /// Sum of bay lengths (mm) — equals the wall length in a valid result
    pub fn total_length(&self) -> f64 {
        self.bays.iter().map(|b| b.length).sum()
    }

    pub fn bay_count(&self) -> usize {
        self.bays.len()
    }
}

/// Full allocation of a perimeter: one bay sequence per wall, plus
/// aggregated non-fatal diagnostics from the validator
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllocationResult {
    /// Indexed by wall position in the perimeter
    pub walls: Vec<WallAllocation>,
    /// Informational issues; non-empty is not itself fatal
    pub issues: Vec<ValidationIssue>,
}

impl AllocationResult {
    pub fn new(walls: Vec<WallAllocation>) -> Self {
        Self {
            walls,
            issues: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Total number of bays across all walls
    pub fn bay_count(&self) -> usize {
        self.walls.iter().map(|w| w.bays.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bay_constructors() {
        let b = Bay::free(0.0, 1800.0, 1800.0);
        assert!(!b.is_corner_adjusted && !b.is_protrusion_bay);
        assert_eq!(b.end(), 1800.0);

        let c = Bay::corner(0.0, 900.0);
        assert!(c.is_corner_adjusted);
        assert_eq!(c.spacing, 900.0);

        let p = Bay::protrusion(2000.0, 900.0, ProtrusionKind::Shed);
        assert!(p.is_protrusion_bay);
        assert_eq!(p.protrusion_kind, Some(ProtrusionKind::Shed));
    }

    #[test]
    fn test_wall_allocation_sum() {
        let alloc = WallAllocation::new(
            0,
            vec![
                Bay::corner(0.0, 900.0),
                Bay::free(900.0, 1500.0, 1500.0),
                Bay::free(2400.0, 1500.0, 1500.0),
                Bay::free(3900.0, 1500.0, 1500.0),
            ],
        );
        assert_eq!(alloc.total_length(), 5400.0);
        assert_eq!(alloc.bay_count(), 4);
    }
}
