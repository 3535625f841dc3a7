use serde::{Deserialize, Serialize};

use super::domain::{WorkAssignment, WorkerProfile};

/// Wage floor assumed for profiles that never set one, matching the
/// marketplace's established default.
const FALLBACK_MINIMUM_WAGE: f64 = 500.0;

/// Commute classification from home vs. job location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommuteClass {
    Local,
    WithinState,
    Interstate,
}

impl CommuteClass {
    pub const fn label(self) -> &'static str {
        match self {
            CommuteClass::Local => "local",
            CommuteClass::WithinState => "within-state",
            CommuteClass::Interstate => "interstate",
        }
    }

    /// Coarse display bucket; no geodistance is measured.
    pub const fn distance_band(self) -> &'static str {
        match self {
            CommuteClass::Local => "0-5 km",
            CommuteClass::WithinState => "20-50 km",
            CommuteClass::Interstate => "50+ km",
        }
    }
}

/// Overall recommendation driven by the upstream fairness score (0-10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FairnessTier {
    HighlyRecommended,
    ModeratelyRecommended,
    NotRecommended,
}

impl FairnessTier {
    pub fn from_score(score: f32) -> Self {
        if score >= 8.0 {
            FairnessTier::HighlyRecommended
        } else if score >= 6.0 {
            FairnessTier::ModeratelyRecommended
        } else {
            FairnessTier::NotRecommended
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            FairnessTier::HighlyRecommended => "highly recommended",
            FairnessTier::ModeratelyRecommended => "moderately recommended",
            FairnessTier::NotRecommended => "not recommended",
        }
    }
}

/// Wage-only recommendation from the rate-to-minimum ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WageTier {
    Excellent,
    Fair,
    BelowExpectations,
}

impl WageTier {
    pub fn from_ratio_percent(percent: i64) -> Self {
        if percent >= 120 {
            WageTier::Excellent
        } else if percent >= 100 {
            WageTier::Fair
        } else {
            WageTier::BelowExpectations
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            WageTier::Excellent => "excellent",
            WageTier::Fair => "fair",
            WageTier::BelowExpectations => "below expectations",
        }
    }
}

/// Full worker-to-job analysis returned to listing and detail views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub skill_match_percent: u32,
    pub matching_skills: Vec<String>,
    pub wage_ratio_percent: i64,
    pub wage_difference: f64,
    pub above_minimum_wage: bool,
    pub commute: CommuteClass,
    pub fairness: FairnessTier,
    pub wage_tier: WageTier,
}

/// Score a worker against a posted contract. Pure; identical inputs yield
/// identical reports.
pub fn score_match(worker: &WorkerProfile, assignment: &WorkAssignment) -> MatchReport {
    let (matching_skills, skill_match_percent) =
        skill_overlap(&worker.skills, &assignment.requirements.skills);

    let minimum_wage = if worker.minimum_wage > 0.0 {
        worker.minimum_wage
    } else {
        FALLBACK_MINIMUM_WAGE
    };
    let rate = assignment.payment.rate;
    let wage_ratio_percent = (rate / minimum_wage * 100.0).round() as i64;

    MatchReport {
        skill_match_percent,
        matching_skills,
        wage_ratio_percent,
        wage_difference: rate - minimum_wage,
        above_minimum_wage: rate >= minimum_wage,
        commute: classify_commute(worker, assignment),
        fairness: FairnessTier::from_score(assignment.fairness_score),
        wage_tier: WageTier::from_ratio_percent(wage_ratio_percent),
    }
}

/// Required skills satisfied by the worker, using case-insensitive substring
/// containment in either direction ("Carpentry" satisfies "Furniture
/// Carpentry" and vice versa). Intentionally loose; the search filter uses
/// exact membership instead.
fn skill_overlap(worker_skills: &[String], required: &[String]) -> (Vec<String>, u32) {
    if required.is_empty() {
        return (Vec::new(), 100);
    }

    let worker_lowered: Vec<String> = worker_skills
        .iter()
        .map(|skill| skill.to_lowercase())
        .collect();

    let matching: Vec<String> = required
        .iter()
        .filter(|requirement| {
            let requirement = requirement.to_lowercase();
            worker_lowered
                .iter()
                .any(|skill| skill.contains(&requirement) || requirement.contains(skill.as_str()))
        })
        .cloned()
        .collect();

    let percent = (matching.len() as f64 / required.len() as f64 * 100.0).round() as u32;
    (matching, percent)
}

fn classify_commute(worker: &WorkerProfile, assignment: &WorkAssignment) -> CommuteClass {
    let site = &assignment.work.site;
    if worker.home.city.eq_ignore_ascii_case(&site.city) {
        CommuteClass::Local
    } else if worker.home.state.eq_ignore_ascii_case(&site.state) {
        CommuteClass::WithinState
    } else {
        CommuteClass::Interstate
    }
}
