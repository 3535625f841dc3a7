use serde::{Deserialize, Serialize};

use super::domain::{PaymentTerms, RateUnit};

/// Working-time ratios shared by the progress, payment, and filter logic.
///
/// These are policy values, not physics: the 8-hour day and 30-day month are
/// the conversion conventions the marketplace quotes rates against, and the
/// open-ended horizon is the nominal project length assumed when a contract
/// has no end date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkSchedulePolicy {
    pub hours_per_day: f64,
    pub days_per_week: u32,
    pub days_per_month: u32,
    pub open_ended_horizon_days: u32,
    pub default_duration_days: u32,
    pub display_day_cap: u32,
}

impl Default for WorkSchedulePolicy {
    fn default() -> Self {
        Self {
            hours_per_day: 8.0,
            days_per_week: 7,
            days_per_month: 30,
            open_ended_horizon_days: 30,
            default_duration_days: 30,
            display_day_cap: 999,
        }
    }
}

/// Duration label resolution for rate equivalence. When the label carries no
/// integer the policy default is substituted and flagged, so callers can
/// distinguish a real "15 days" from a guessed 30.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDuration {
    pub days: u32,
    pub was_defaulted: bool,
}

impl WorkSchedulePolicy {
    /// First integer found in a free-text duration label, if any.
    ///
    /// "15 days" -> 15, "3 weeks" -> 3, "1 month" -> 1. The unit word is
    /// deliberately ignored to match the established marketplace behavior;
    /// see the known-defect test on month labels before "fixing" this.
    pub fn parse_duration_days(label: &str) -> Option<u32> {
        let digits: String = label
            .chars()
            .skip_while(|c| !c.is_ascii_digit())
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse::<u32>().ok().filter(|days| *days > 0)
    }

    /// Duration for rate equivalence, defaulting when the label is opaque.
    pub fn resolve_duration(&self, label: &str) -> ResolvedDuration {
        match Self::parse_duration_days(label) {
            Some(days) => ResolvedDuration {
                days,
                was_defaulted: false,
            },
            None => ResolvedDuration {
                days: self.default_duration_days,
                was_defaulted: true,
            },
        }
    }

    /// Convert quoted terms to a per-day amount, used by min-rate filtering.
    pub fn daily_rate(&self, terms: &PaymentTerms, duration_label: &str) -> f64 {
        match terms.rate_unit {
            RateUnit::Hourly => terms.rate * self.hours_per_day,
            RateUnit::Daily => terms.rate,
            RateUnit::Weekly => terms.rate / self.days_per_week as f64,
            RateUnit::Monthly => terms.rate / self.days_per_month as f64,
            RateUnit::Fixed => {
                let duration = self.resolve_duration(duration_label);
                terms.rate / duration.days as f64
            }
        }
    }

    /// Convert quoted terms to a per-hour amount, used when valuing approved
    /// work logs. Fixed-rate contracts divide by the contract's estimated
    /// total hours; a missing or non-positive estimate falls back to the
    /// default duration at `hours_per_day`.
    pub fn hourly_rate(&self, terms: &PaymentTerms, estimated_total_hours: Option<f64>) -> f64 {
        match terms.rate_unit {
            RateUnit::Hourly => terms.rate,
            RateUnit::Daily => terms.rate / self.hours_per_day,
            RateUnit::Weekly => terms.rate / (self.days_per_week as f64 * self.hours_per_day),
            RateUnit::Monthly => terms.rate / (self.days_per_month as f64 * self.hours_per_day),
            RateUnit::Fixed => {
                let hours = estimated_total_hours
                    .filter(|hours| *hours > 0.0)
                    .unwrap_or(self.default_duration_days as f64 * self.hours_per_day);
                terms.rate / hours
            }
        }
    }
}
