use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::WorkAssignment;
use super::schedule::WorkSchedulePolicy;

/// Derived completion figures for a contract, in days.
///
/// `total_units`/`estimated_hours` are `None` for open-ended contracts.
/// `degraded` marks results computed from inputs that violated the data
/// contract (negative counters, end before start); the percentage is then a
/// sentinel 0 rather than garbage, and callers can render accordingly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    pub completed_units: u32,
    pub total_units: Option<u32>,
    pub hours_worked: f64,
    pub estimated_hours: Option<f64>,
    pub percent_complete: f64,
    pub degraded: bool,
}

impl ProgressReport {
    fn degraded() -> Self {
        Self {
            completed_units: 0,
            total_units: None,
            hours_worked: 0.0,
            estimated_hours: None,
            percent_complete: 0.0,
            degraded: true,
        }
    }
}

/// Compute contract progress as of `today`.
///
/// Prefers the work-tracking counters when present; otherwise falls back to
/// pure elapsed-calendar estimation at `policy.hours_per_day` hours per day.
/// The percentage is always clamped to `[0, 100]` and the function never
/// panics for well-typed input.
pub fn compute_progress(
    assignment: &WorkAssignment,
    today: NaiveDate,
    policy: &WorkSchedulePolicy,
) -> ProgressReport {
    let start = assignment.work.start_date;
    let end = assignment.work.end_date;

    if let Some(tracking) = &assignment.work_tracking {
        if tracking.total_hours_worked < 0.0 || tracking.estimated_total_hours < 0.0 {
            return ProgressReport::degraded();
        }

        let hour_pct = if tracking.estimated_total_hours > 0.0 {
            tracking.total_hours_worked / tracking.estimated_total_hours * 100.0
        } else {
            0.0
        };

        let Some(end) = end else {
            return ProgressReport {
                completed_units: tracking.days_worked,
                total_units: None,
                hours_worked: tracking.total_hours_worked,
                estimated_hours: Some(tracking.estimated_total_hours),
                percent_complete: hour_pct.min(100.0),
                degraded: false,
            };
        };

        let total_days = (end - start).num_days();
        if total_days < 0 {
            return ProgressReport::degraded();
        }

        // Same-day contracts have no day denominator; any work counts as done.
        let percent = if total_days == 0 {
            100.0
        } else {
            let day_pct = tracking.days_worked as f64 / total_days as f64 * 100.0;
            day_pct.max(hour_pct).min(100.0)
        };

        return ProgressReport {
            completed_units: tracking.days_worked,
            total_units: Some(total_days as u32),
            hours_worked: tracking.total_hours_worked,
            estimated_hours: Some(tracking.estimated_total_hours),
            percent_complete: percent.clamp(0.0, 100.0),
            degraded: false,
        };
    }

    // No counters recorded yet: estimate from elapsed calendar days.
    let Some(end) = end else {
        let days_since_start = (today - start).num_days();
        let working_days = days_since_start.max(1) as u32;
        let percent =
            (working_days as f64 / policy.open_ended_horizon_days as f64 * 100.0).min(100.0);
        return ProgressReport {
            completed_units: working_days.min(policy.display_day_cap),
            total_units: None,
            hours_worked: working_days as f64 * policy.hours_per_day,
            estimated_hours: None,
            percent_complete: percent,
            degraded: false,
        };
    };

    let total_days = (end - start).num_days();
    if total_days < 0 {
        return ProgressReport::degraded();
    }

    let completed_days = (today - start).num_days().max(0);
    let percent = if total_days == 0 {
        100.0
    } else {
        (completed_days as f64 / total_days as f64 * 100.0).clamp(0.0, 100.0)
    };

    ProgressReport {
        completed_units: completed_days as u32,
        total_units: Some(total_days as u32),
        hours_worked: completed_days as f64 * policy.hours_per_day,
        estimated_hours: Some(total_days as f64 * policy.hours_per_day),
        percent_complete: percent,
        degraded: false,
    }
}
