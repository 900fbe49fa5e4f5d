// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Allocation constraints
//!
//! Every operation takes a `&Constraints` explicitly — there is no global
//! configuration, so concurrent independent calls cannot interfere.

use crate::error::{AllocationError, Result};
use crate::units::in_length_domain;

/// Policy for a span that stays below `min_spacing` after merging
///
/// An isolated short wall with no concave neighbour to merge with has no
/// standards-backed answer yet. Default is rejection; accepting emits the
/// sub-minimum bay and leaves a `SPAN_TOO_SHORT` issue for the caller to
/// judge. Needs confirmation from domain experts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ShortSpanPolicy {
    /// Fail the allocation with `SpacingInfeasible`
    #[default]
    Reject,
    /// Emit the single sub-minimum bay, flagged by the validator
    Accept,
}

/// Spacing and clearance configuration for one allocation pass
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraints {
    /// Target bay width under normal conditions (mm)
    pub standard_spacing: f64,
    /// Hard lower bound for a bay (mm)
    pub min_spacing: f64,
    /// Hard upper bound for a bay (mm)
    pub max_spacing: f64,
    /// Minimum clearance adjacent to protrusion edges that demand one (mm)
    pub min_end_margin: f64,
    /// Offset subtracted at inside corners (mm)
    pub corner_clearance: f64,
    /// What to do with spans below `min_spacing` that cannot be merged
    #[cfg_attr(feature = "serde", serde(default))]
    pub short_span_policy: ShortSpanPolicy,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            standard_spacing: 1800.0,
            min_spacing: 900.0,
            max_spacing: 2400.0,
            min_end_margin: 300.0,
            corner_clearance: 900.0,
            short_span_policy: ShortSpanPolicy::Reject,
        }
    }
}

impl Constraints {
    /// Check the configuration itself before any wall is touched
    ///
    /// Spacing values must sit in the length domain and be mutually
    /// consistent (`min <= standard <= max`).
    pub fn validate(&self) -> Result<()> {
        for (context, value) in [
            ("standard_spacing", self.standard_spacing),
            ("min_spacing", self.min_spacing),
            ("max_spacing", self.max_spacing),
            ("corner_clearance", self.corner_clearance),
        ] {
            if !in_length_domain(value) {
                return Err(AllocationError::InputRange { context, value });
            }
        }
        // Margin may be zero (disabled) but never negative or absurd
        if self.min_end_margin < 0.0 || !self.min_end_margin.is_finite() {
            return Err(AllocationError::InputRange {
                context: "min_end_margin",
                value: self.min_end_margin,
            });
        }
        if self.min_spacing > self.standard_spacing {
            return Err(AllocationError::InputRange {
                context: "min_spacing > standard_spacing",
                value: self.min_spacing,
            });
        }
        if self.standard_spacing > self.max_spacing {
            return Err(AllocationError::InputRange {
                context: "standard_spacing > max_spacing",
                value: self.standard_spacing,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let c = Constraints::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.standard_spacing, 1800.0);
        assert_eq!(c.min_spacing, 900.0);
        assert_eq!(c.max_spacing, 2400.0);
        assert_eq!(c.corner_clearance, 900.0);
        assert_eq!(c.short_span_policy, ShortSpanPolicy::Reject);
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let c = Constraints {
            min_spacing: 2000.0,
            ..Constraints::default()
        };
        assert!(matches!(
            c.validate(),
            Err(AllocationError::InputRange { .. })
        ));
    }

    #[test]
    fn test_rejects_nonpositive_spacing() {
        let c = Constraints {
            standard_spacing: 0.0,
            ..Constraints::default()
        };
        assert!(c.validate().is_err());
    }
}
