use serde::{Deserialize, Serialize};

use super::domain::{RateUnit, WorkAssignment};
use super::schedule::WorkSchedulePolicy;

/// Optional search constraints. A missing field means "no constraint"; all
/// supplied fields must hold simultaneously.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<DurationFilter>,
}

/// `max_distance_km` is carried for request-shape parity but not evaluated;
/// listings have no coordinates to measure against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_distance_km: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_unit: Option<RateUnit>,
}

/// Duration bounds in days, compared against the integer parsed from the
/// listing's duration label. Listings with unparsable labels are excluded
/// when bounds are supplied (no default is substituted here, unlike the
/// rate-equivalence path).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DurationFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_days: Option<u32>,
}

/// Apply all supplied criteria, preserving input order. Sorting is the
/// caller's concern.
pub fn filter_listings(
    listings: &[WorkAssignment],
    criteria: &FilterCriteria,
    policy: &WorkSchedulePolicy,
) -> Vec<WorkAssignment> {
    listings
        .iter()
        .filter(|listing| matches_criteria(listing, criteria, policy))
        .cloned()
        .collect()
}

/// Conjunction of the per-field predicates for a single listing.
pub fn matches_criteria(
    listing: &WorkAssignment,
    criteria: &FilterCriteria,
    policy: &WorkSchedulePolicy,
) -> bool {
    if let Some(query) = criteria.query.as_deref() {
        let query = query.trim();
        if !query.is_empty() && !matches_query(listing, query) {
            return false;
        }
    }

    if let Some(location) = &criteria.location {
        if let Some(city) = location.city.as_deref() {
            if !listing
                .work
                .site
                .city
                .to_lowercase()
                .contains(&city.to_lowercase())
            {
                return false;
            }
        }
        if let Some(state) = location.state.as_deref() {
            if listing.work.site.state != state {
                return false;
            }
        }
    }

    if let Some(payment) = &criteria.payment {
        if let Some(min_rate) = payment.min_rate {
            let daily = policy.daily_rate(&listing.payment, &listing.work.duration_label);
            if daily < min_rate {
                return false;
            }
        }
        if let Some(rate_unit) = payment.rate_unit {
            if listing.payment.rate_unit != rate_unit {
                return false;
            }
        }
    }

    if let Some(skills) = &criteria.skills {
        if !skills.is_empty()
            && !skills
                .iter()
                .any(|skill| listing.requirements.skills.contains(skill))
        {
            return false;
        }
    }

    if let Some(duration) = &criteria.duration {
        if duration.min_days.is_some() || duration.max_days.is_some() {
            let Some(days) = WorkSchedulePolicy::parse_duration_days(&listing.work.duration_label)
            else {
                return false;
            };
            if duration.min_days.is_some_and(|min| days < min) {
                return false;
            }
            if duration.max_days.is_some_and(|max| days > max) {
                return false;
            }
        }
    }

    true
}

fn matches_query(listing: &WorkAssignment, query: &str) -> bool {
    let query = query.to_lowercase();
    listing.title.to_lowercase().contains(&query)
        || listing.description.to_lowercase().contains(&query)
        || listing.employer.name.to_lowercase().contains(&query)
        || listing
            .requirements
            .skills
            .iter()
            .any(|skill| skill.to_lowercase().contains(&query))
}
