use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for contracts and listings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractId(pub String);

/// Identifier wrapper for work-log entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkLogId(pub String);

/// How the agreed rate is quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateUnit {
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Fixed,
}

impl RateUnit {
    pub const fn label(self) -> &'static str {
        match self {
            RateUnit::Hourly => "hourly",
            RateUnit::Daily => "daily",
            RateUnit::Weekly => "weekly",
            RateUnit::Monthly => "monthly",
            RateUnit::Fixed => "fixed",
        }
    }
}

/// Lifecycle of a work assignment. `Completed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContractStatus {
    Available,
    Accepted,
    InProgress,
    Completed,
    Cancelled,
}

impl ContractStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ContractStatus::Available => "available",
            ContractStatus::Accepted => "accepted",
            ContractStatus::InProgress => "in-progress",
            ContractStatus::Completed => "completed",
            ContractStatus::Cancelled => "cancelled",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, ContractStatus::Completed | ContractStatus::Cancelled)
    }
}

/// Review state of a submitted work log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Disputed,
}

impl ApprovalStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Disputed => "disputed",
        }
    }
}

/// Settlement state of a payment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Disputed,
    Cancelled,
}

impl PaymentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Disputed => "disputed",
            PaymentStatus::Cancelled => "cancelled",
        }
    }
}

/// Employer snapshot embedded in a posted contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployerSnapshot {
    pub name: String,
    pub company: Option<String>,
    pub contact: String,
    pub rating: f32,
}

/// Physical work site for a contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSite {
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

/// When and where the work happens. `duration_label` is free text from the
/// posting ("15 days", "1 month"); parsing rules live in the schedule policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkDetails {
    pub site: WorkSite,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub duration_label: String,
    pub working_hours: String,
}

/// Agreed compensation terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentTerms {
    pub rate_unit: RateUnit,
    pub rate: f64,
    pub currency: String,
    pub terms: String,
}

/// Skill and experience requirements for a posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirements {
    pub skills: Vec<String>,
    pub min_experience_years: u8,
    pub tools: Option<Vec<String>>,
}

/// Accumulated work counters, updated when logs are approved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkTracking {
    pub total_hours_worked: f64,
    pub days_worked: u32,
    pub estimated_total_hours: f64,
}

/// Accumulated payment counters.
///
/// Invariant: `pending_amount = total_due - total_received` (clamped at 0)
/// after every mutation; overpayment is surfaced, never hidden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentTracking {
    pub total_due: f64,
    pub total_received: f64,
    pub pending_amount: f64,
    pub last_payment_date: Option<NaiveDate>,
}

/// A job contract, either still advertised (`Available`) or accepted and in
/// flight. Pre-acceptance records double as job listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkAssignment {
    pub id: ContractId,
    pub title: String,
    pub description: String,
    pub employer: EmployerSnapshot,
    pub work: WorkDetails,
    pub payment: PaymentTerms,
    pub requirements: Requirements,
    pub status: ContractStatus,
    pub fairness_score: f32,
    pub minimum_wage_compliant: bool,
    pub applicant_count: u32,
    pub work_tracking: Option<WorkTracking>,
    pub payment_tracking: Option<PaymentTracking>,
}

/// Worker profile used for match scoring. Immutable during a scoring pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerProfile {
    pub id: String,
    pub skills: Vec<String>,
    pub minimum_wage: f64,
    pub max_travel_km: u32,
    pub home: HomeLocation,
}

/// Where the worker lives, for commute classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeLocation {
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

/// A single day's logged work. Belongs to exactly one assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkLogEntry {
    pub id: WorkLogId,
    pub date: NaiveDate,
    pub hours_worked: f64,
    pub description: String,
    pub status: ApprovalStatus,
}

/// An append-only payment event against an assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub amount: f64,
    pub status: PaymentStatus,
    pub method: String,
    pub due_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
}
