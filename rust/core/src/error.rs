// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error taxonomy for the allocation engine

use thiserror::Error;

/// Result type for allocation operations
pub type Result<T> = std::result::Result<T, AllocationError>;

/// Distinguishes the ways a protrusion arrangement can be unusable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProtrusionConflictCode {
    /// Two protrusion ranges overlap on the same wall
    Overlap,
    /// Protrusion range extends beyond the wall or is wider than the wall
    Oversize,
    /// A stair's adjacent free segment is shorter than the end margin
    StairMargin,
    /// Protrusion attached to a wall inside a concave merge group
    MergedSpan,
}

/// Distinguishes the ways spacing constraints can become unsatisfiable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InfeasibilityCode {
    /// A span (or merged composite) is below `min_spacing` and rejected by policy
    SpanTooShort,
    /// Corner clearance consumes the entire endpoint bay or lands on a fixed boundary
    CornerOverlap,
    /// The bounded rebalancing pass could not restore minimum spacing
    RebalanceExhausted,
}

/// Errors that abort one allocation call
///
/// Stage failures are fatal and surface as a single structured error; the
/// validator's issue list is the non-fatal counterpart.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AllocationError {
    #[error("input out of range: {context} = {value}mm")]
    InputRange { context: &'static str, value: f64 },

    #[error("geometry inconsistency: {0}")]
    GeometryInconsistency(String),

    #[error("protrusion conflict on wall {wall} ({code:?}): {detail}")]
    ProtrusionConflict {
        wall: usize,
        code: ProtrusionConflictCode,
        detail: String,
    },

    #[error("spacing infeasible on wall {wall} ({code:?}): {detail}")]
    SpacingInfeasible {
        wall: usize,
        code: InfeasibilityCode,
        detail: String,
    },
}

impl AllocationError {
    /// Machine-readable code for transport layers
    pub fn code(&self) -> &'static str {
        match self {
            Self::InputRange { .. } => "INPUT_RANGE",
            Self::GeometryInconsistency(_) => "GEOMETRY_INCONSISTENCY",
            Self::ProtrusionConflict {
                code: ProtrusionConflictCode::StairMargin,
                ..
            } => "PROTRUSION_CONFLICT_STAIR_MARGIN",
            Self::ProtrusionConflict { .. } => "PROTRUSION_CONFLICT",
            Self::SpacingInfeasible {
                code: InfeasibilityCode::CornerOverlap,
                ..
            } => "CORNER_OVERLAP",
            Self::SpacingInfeasible { .. } => "SPACING_INFEASIBLE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = AllocationError::InputRange {
            context: "wall length",
            value: -1.0,
        };
        assert_eq!(err.code(), "INPUT_RANGE");

        let err = AllocationError::ProtrusionConflict {
            wall: 2,
            code: ProtrusionConflictCode::StairMargin,
            detail: "gap 120mm".to_string(),
        };
        assert_eq!(err.code(), "PROTRUSION_CONFLICT_STAIR_MARGIN");
        assert!(err.to_string().contains("wall 2"));
    }
}
