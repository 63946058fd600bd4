//! Request execution: one synthesis per request.

use serde::{Deserialize, Serialize};

use dm_report::{build_report, filter, DesignReport};
use dm_scan::{scan, ScanDiagnostics, NON_CONVERGENCE_WARN_FRACTION};

use crate::error::AppResult;
use crate::request::MatchRequest;

/// The distinguishable outcomes of a feasible request.
///
/// `ConstraintViolation` is not an error and not an empty success: the scan
/// found candidates, the manufacturability bounds rejected all of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MatchOutcome {
    Feasible { designs: Vec<DesignReport> },
    ConstraintViolation { raw_candidates: usize },
}

/// Response from one synthesis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResponse {
    pub outcome: MatchOutcome,
    pub diagnostics: ScanDiagnostics,
    /// Single aggregated warning when most samples failed to converge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Execute one synthesis request: validate, scan, filter, report.
///
/// Structural input errors abort the whole request; per-sample numeric
/// trouble is absorbed into the diagnostics.
pub fn execute(request: &MatchRequest) -> AppResult<MatchResponse> {
    let (problem, range, config) = request.compile()?;

    let scan_result = scan(&problem, &range, &config)?;
    let diagnostics = scan_result.diagnostics;
    let raw_candidates = scan_result.candidates.len();

    tracing::debug!(
        raw_candidates,
        evaluated = diagnostics.evaluated(),
        "scan complete"
    );

    let surviving = filter(scan_result.candidates, &request.constraints);

    let outcome = if raw_candidates > 0 && surviving.is_empty() {
        MatchOutcome::ConstraintViolation { raw_candidates }
    } else {
        MatchOutcome::Feasible {
            designs: build_report(&problem, surviving),
        }
    };

    let warning = if diagnostics.evaluated() > 0
        && diagnostics.non_convergence_fraction() > NON_CONVERGENCE_WARN_FRACTION
    {
        Some(format!(
            "{} of {} evaluated samples did not converge ({} without a root, {} diverged)",
            diagnostics.no_solution + diagnostics.diverged,
            diagnostics.evaluated(),
            diagnostics.no_solution,
            diagnostics.diverged,
        ))
    } else {
        None
    };

    Ok(MatchResponse {
        outcome,
        diagnostics,
        warning,
    })
}
