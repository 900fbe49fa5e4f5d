// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Structured validation issues
//!
//! The validator collects every violation it finds instead of stopping at
//! the first one, so downstream layers get a full diagnostic report. Issues
//! are informational; whether to reject the layout is the caller's call.

/// Machine-readable issue codes exposed to transport layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum IssueCode {
    SpacingOutOfRange,
    CornerOverlap,
    ProtrusionConflict,
    SpanTooShort,
    BaySumMismatch,
}

impl IssueCode {
    /// Wire representation (stable, SCREAMING_SNAKE_CASE)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SpacingOutOfRange => "SPACING_OUT_OF_RANGE",
            Self::CornerOverlap => "CORNER_OVERLAP",
            Self::ProtrusionConflict => "PROTRUSION_CONFLICT",
            Self::SpanTooShort => "SPAN_TOO_SHORT",
            Self::BaySumMismatch => "BAY_SUM_MISMATCH",
        }
    }
}

/// One violation found by the validator
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationIssue {
    pub code: IssueCode,
    /// Wall the issue belongs to
    pub wall: usize,
    /// Bay index within the wall, when the issue is bay-scoped
    pub bay: Option<usize>,
    /// Human-oriented detail for the transport layer to translate
    pub detail: String,
}

impl ValidationIssue {
    pub fn new(code: IssueCode, wall: usize, bay: Option<usize>, detail: impl Into<String>) -> Self {
        Self {
            code,
            wall,
            bay,
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_codes() {
        assert_eq!(IssueCode::SpacingOutOfRange.as_str(), "SPACING_OUT_OF_RANGE");
        assert_eq!(IssueCode::CornerOverlap.as_str(), "CORNER_OVERLAP");
        assert_eq!(IssueCode::SpanTooShort.as_str(), "SPAN_TOO_SHORT");
    }
}
