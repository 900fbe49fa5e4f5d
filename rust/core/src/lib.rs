// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Spanplan Core
//!
//! Data model for scaffold bay allocation along a building perimeter:
//! walls, corners, protrusions, spacing constraints and the allocation
//! result types shared by the layout engine and the processing facade.
//!
//! All lengths are millimetres as `f64`. Input structures are read-only
//! during allocation; results are created fresh per call, so concurrent
//! callers never share mutable state.
//!
//! ## Quick Start
//!
//! ```rust
//! use spanplan_core::{Constraints, CornerType, Heading, Perimeter, Wall};
//!
//! let perimeter = Perimeter::new(vec![
//!     Wall::new(5400.0, Heading::East, CornerType::Convex),
//!     Wall::new(3600.0, Heading::North, CornerType::Convex),
//!     Wall::new(5400.0, Heading::West, CornerType::Convex),
//!     Wall::new(3600.0, Heading::South, CornerType::Convex),
//! ]);
//! assert_eq!(perimeter.len(), 4);
//! assert_eq!(perimeter.next(3), 0);
//! assert!(Constraints::default().validate().is_ok());
//! ```

pub mod bay;
pub mod constraints;
pub mod error;
pub mod issue;
pub mod perimeter;
pub mod units;
pub mod wall;

pub use bay::{AllocationResult, Bay, WallAllocation};
pub use constraints::{Constraints, ShortSpanPolicy};
pub use error::{AllocationError, InfeasibilityCode, ProtrusionConflictCode, Result};
pub use issue::{IssueCode, ValidationIssue};
pub use perimeter::Perimeter;
pub use wall::{CornerType, Heading, Protrusion, ProtrusionKind, Wall};
