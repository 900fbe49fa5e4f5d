// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Spanplan Processing
//!
//! Shared allocation pipeline for the transport layers (REST/tool
//! wrappers) sitting on top of the engine: serializable request/response
//! types, a traced single-call entry point, and an order-preserving batch
//! runner. Each allocation is independent and side-effect-free, so the
//! batch fans out across threads without locking.

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use spanplan_core::{AllocationResult, Constraints, IssueCode, Perimeter};
use spanplan_layout::allocate;
use tracing::{debug, info_span};

/// One allocation job as received from a transport layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    pub perimeter: Perimeter,
    #[serde(default)]
    pub constraints: Constraints,
}

impl PlanRequest {
    pub fn new(perimeter: Perimeter) -> Self {
        Self {
            perimeter,
            constraints: Constraints::default(),
        }
    }

    pub fn with_constraints(perimeter: Perimeter, constraints: Constraints) -> Self {
        Self {
            perimeter,
            constraints,
        }
    }
}

/// Structured failure forwarded to user-facing layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Stable machine code, e.g. `CORNER_OVERLAP`
    pub code: String,
    pub message: String,
}

/// Result of one allocation job
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanOutcome {
    Allocated(AllocationResult),
    Failed(ErrorReport),
}

impl PlanOutcome {
    pub fn is_allocated(&self) -> bool {
        matches!(self, Self::Allocated(_))
    }

    pub fn allocation(&self) -> Option<&AllocationResult> {
        match self {
            Self::Allocated(result) => Some(result),
            Self::Failed(_) => None,
        }
    }
}

/// Run one allocation with tracing attached
pub fn process(request: &PlanRequest) -> PlanOutcome {
    let span = info_span!("allocate", walls = request.perimeter.len());
    let _guard = span.enter();

    match allocate(&request.perimeter, &request.constraints) {
        Ok(result) => {
            debug!(
                bays = result.bay_count(),
                issues = result.issues.len(),
                "allocation complete"
            );
            PlanOutcome::Allocated(result)
        }
        Err(err) => {
            debug!(code = err.code(), "allocation failed");
            PlanOutcome::Failed(ErrorReport {
                code: err.code().to_string(),
                message: err.to_string(),
            })
        }
    }
}

/// Run many independent allocations in parallel, preserving input order
pub fn process_batch(requests: &[PlanRequest]) -> Vec<PlanOutcome> {
    requests.par_iter().map(process).collect()
}

/// Aggregate issue counts for transport-layer reporting
pub fn issue_summary(result: &AllocationResult) -> FxHashMap<IssueCode, usize> {
    let mut counts = FxHashMap::default();
    for issue in &result.issues {
        *counts.entry(issue.code).or_insert(0) += 1;
    }
    counts
}

/// Serialize the diagnostics list for the wire
pub fn issues_json(result: &AllocationResult) -> serde_json::Result<String> {
    serde_json::to_string(&result.issues)
}
