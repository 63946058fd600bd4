//! Query helpers for summarizing a built report.

use dm_report::DesignReport;

use crate::error::{AppError, AppResult};

/// Headline figures for a report list.
#[derive(Debug, Clone)]
pub struct ReportSummary {
    pub design_count: usize,
    pub best_worst_vswr: f64,
    pub lowest_max_z0_ohm: f64,
    pub highest_max_z0_ohm: f64,
}

/// Summarize a non-empty report list.
pub fn report_summary(reports: &[DesignReport]) -> AppResult<ReportSummary> {
    if reports.is_empty() {
        return Err(AppError::InvalidInput("No designs in report".to_string()));
    }

    let best_worst_vswr = reports
        .iter()
        .map(DesignReport::worst_vswr)
        .fold(f64::INFINITY, f64::min);
    let lowest_max_z0_ohm = reports
        .iter()
        .map(|r| r.max_z0_ohm)
        .fold(f64::INFINITY, f64::min);
    let highest_max_z0_ohm = reports.iter().map(|r| r.max_z0_ohm).fold(0.0, f64::max);

    Ok(ReportSummary {
        design_count: reports.len(),
        best_worst_vswr,
        lowest_max_z0_ohm,
        highest_max_z0_ohm,
    })
}
