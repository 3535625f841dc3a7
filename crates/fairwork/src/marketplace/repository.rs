use serde::{Deserialize, Serialize};

use super::domain::{ContractId, ContractStatus, PaymentRecord, WorkAssignment, WorkLogEntry};
use super::matching::MatchReport;
use super::payments::PaymentSummary;
use super::progress::ProgressReport;

/// Repository record: the assignment plus its append-only ledger children.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentRecord {
    pub assignment: WorkAssignment,
    pub work_logs: Vec<WorkLogEntry>,
    pub payments: Vec<PaymentRecord>,
}

impl AssignmentRecord {
    pub fn new(assignment: WorkAssignment) -> Self {
        Self {
            assignment,
            work_logs: Vec::new(),
            payments: Vec::new(),
        }
    }
}

/// Storage abstraction so the workspace service can be exercised without a
/// backend (the HTTP service plugs in an in-memory implementation; a real
/// deployment would plug in the REST client).
pub trait MarketplaceRepository: Send + Sync {
    fn insert(&self, record: AssignmentRecord) -> Result<AssignmentRecord, RepositoryError>;
    fn update(&self, record: AssignmentRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ContractId) -> Result<Option<AssignmentRecord>, RepositoryError>;
    /// All records still advertised (`Available`), in insertion order.
    fn listings(&self) -> Result<Vec<AssignmentRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Serialized dashboard payload for a single contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractDashboard {
    pub contract_id: ContractId,
    pub title: String,
    pub status: ContractStatus,
    pub status_label: &'static str,
    pub progress: ProgressReport,
    pub payments: PaymentSummary,
}

/// A listing paired with its match analysis for one worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredListing {
    pub assignment: WorkAssignment,
    pub report: MatchReport,
}
