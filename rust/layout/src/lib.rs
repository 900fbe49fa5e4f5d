// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Spanplan Layout
//!
//! Perimeter span-allocation engine: subdivides each wall of a closed
//! building outline into regularized, standards-compliant scaffold bays —
//! spacing subdivision, inside-corner clearance, concave-notch merging and
//! protrusion-driven boundary insertion.
//!
//! The engine is pure and synchronous: one [`allocate`] call consumes a
//! read-only [`Perimeter`](spanplan_core::Perimeter) and
//! [`Constraints`](spanplan_core::Constraints) and produces a fresh
//! [`AllocationResult`](spanplan_core::AllocationResult). Identical inputs
//! yield bit-identical outputs, and concurrent callers share nothing.
//!
//! ## Quick Start
//!
//! ```rust
//! use spanplan_core::{Constraints, CornerType, Heading, Perimeter, Wall};
//! use spanplan_layout::allocate;
//!
//! let perimeter = Perimeter::new(vec![
//!     Wall::new(5400.0, Heading::East, CornerType::Convex),
//!     Wall::new(3600.0, Heading::North, CornerType::Convex),
//!     Wall::new(5400.0, Heading::West, CornerType::Convex),
//!     Wall::new(3600.0, Heading::South, CornerType::Convex),
//! ]);
//!
//! let result = allocate(&perimeter, &Constraints::default()).unwrap();
//! assert!(result.is_clean());
//! assert_eq!(result.walls[0].bay_count(), 3); // 5400 -> 3 x 1800
//! ```

pub mod allocator;
pub mod clearance;
pub mod concave;
pub mod corner;
pub mod protrusion;
pub mod spacing;
pub mod validator;

pub use allocator::allocate;
pub use clearance::{
    clearance_with_adjustment_spans, clearance_with_boundary, optimal_clearance,
    AdjustedClearance, BoundaryClearance, ClearanceOptions, ClearanceResult,
};
pub use spacing::{divisions, equal_spacing};
pub use validator::validate;

// Re-export the core model for convenience
pub use spanplan_core::{
    AllocationError, AllocationResult, Bay, Constraints, CornerType, Heading, IssueCode,
    Perimeter, Protrusion, ProtrusionKind, Result, ShortSpanPolicy, ValidationIssue, Wall,
    WallAllocation,
};
