use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::warn;

use super::domain::{
    ApprovalStatus, ContractId, ContractStatus, PaymentRecord, PaymentStatus, PaymentTracking,
    WorkAssignment, WorkLogEntry, WorkLogId, WorkTracking, WorkerProfile,
};
use super::filters::{filter_listings, FilterCriteria};
use super::matching::score_match;
use super::payments::{summarize_tracking, PaymentSummary};
use super::progress::compute_progress;
use super::repository::{
    AssignmentRecord, ContractDashboard, MarketplaceRepository, RepositoryError, ScoredListing,
};
use super::schedule::WorkSchedulePolicy;

/// Hard bound on a single day's logged hours.
const MAX_DAILY_HOURS: f64 = 24.0;

/// Service composing the repository, schedule policy, and the pure
/// progress/payment/match/filter computations. All money and tracking
/// mutations flow through here so the snapshot invariants hold.
pub struct ContractWorkspace<R> {
    repository: Arc<R>,
    policy: WorkSchedulePolicy,
}

static WORK_LOG_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_work_log_id() -> WorkLogId {
    let id = WORK_LOG_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    WorkLogId(format!("log-{id:06}"))
}

impl<R> ContractWorkspace<R>
where
    R: MarketplaceRepository + 'static,
{
    pub fn new(repository: Arc<R>, policy: WorkSchedulePolicy) -> Self {
        Self { repository, policy }
    }

    pub fn policy(&self) -> &WorkSchedulePolicy {
        &self.policy
    }

    /// Post a new listing after validating its ranges. The negated
    /// comparisons also reject NaN.
    pub fn post(&self, assignment: WorkAssignment) -> Result<AssignmentRecord, WorkspaceError> {
        if !(assignment.fairness_score >= 0.0 && assignment.fairness_score <= 10.0) {
            return Err(WorkspaceError::InvalidListing {
                reason: format!(
                    "fairness score must be in [0, 10], got {}",
                    assignment.fairness_score
                ),
            });
        }
        if !(assignment.payment.rate >= 0.0) {
            return Err(WorkspaceError::InvalidListing {
                reason: format!("rate must be non-negative, got {}", assignment.payment.rate),
            });
        }

        let stored = self.repository.insert(AssignmentRecord::new(assignment))?;
        Ok(stored)
    }

    /// Accept an advertised listing, zeroing the tracking snapshots so work
    /// logs and payments have counters to accrue into.
    pub fn accept(&self, id: &ContractId) -> Result<AssignmentRecord, WorkspaceError> {
        let mut record = self.fetch_record(id)?;

        if record.assignment.status != ContractStatus::Available {
            return Err(WorkspaceError::NotOpenForWork {
                status: record.assignment.status.label(),
            });
        }

        record.assignment.status = ContractStatus::Accepted;
        let estimated = record
            .assignment
            .work_tracking
            .map(|tracking| tracking.estimated_total_hours)
            .unwrap_or_else(|| self.estimated_hours(&record.assignment));
        record.assignment.work_tracking = Some(WorkTracking {
            total_hours_worked: 0.0,
            days_worked: 0,
            estimated_total_hours: estimated,
        });
        record.assignment.payment_tracking = Some(PaymentTracking {
            total_due: 0.0,
            total_received: 0.0,
            pending_amount: 0.0,
            last_payment_date: None,
        });

        self.repository.update(record.clone())?;
        Ok(record)
    }

    /// Append a pending work log for a day's work.
    pub fn submit_work_log(
        &self,
        id: &ContractId,
        date: NaiveDate,
        hours_worked: f64,
        description: String,
    ) -> Result<WorkLogEntry, WorkspaceError> {
        if !(hours_worked > 0.0 && hours_worked <= MAX_DAILY_HOURS) {
            return Err(WorkspaceError::InvalidWorkLog {
                reason: format!("hours must be in (0, {MAX_DAILY_HOURS}], got {hours_worked}"),
            });
        }

        let mut record = self.fetch_record(id)?;
        if record.assignment.status.is_terminal() || !self.is_workable(&record.assignment) {
            return Err(WorkspaceError::NotOpenForWork {
                status: record.assignment.status.label(),
            });
        }

        let entry = WorkLogEntry {
            id: next_work_log_id(),
            date,
            hours_worked,
            description,
            status: ApprovalStatus::Pending,
        };
        record.work_logs.push(entry.clone());
        record.assignment.status = ContractStatus::InProgress;

        self.repository.update(record)?;
        Ok(entry)
    }

    /// Approve a pending log: the work counters advance and the approved
    /// hours accrue into `total_due` at the hourly-equivalent rate.
    pub fn approve_work_log(
        &self,
        id: &ContractId,
        log_id: &WorkLogId,
    ) -> Result<AssignmentRecord, WorkspaceError> {
        let mut record = self.fetch_record(id)?;

        let log = record
            .work_logs
            .iter_mut()
            .find(|log| &log.id == log_id)
            .ok_or(WorkspaceError::WorkLogNotFound)?;
        if log.status != ApprovalStatus::Pending {
            return Err(WorkspaceError::InvalidWorkLog {
                reason: format!("log {} already {}", log.id.0, log.status.label()),
            });
        }
        log.status = ApprovalStatus::Approved;
        let hours = log.hours_worked;

        let tracking = record
            .assignment
            .work_tracking
            .get_or_insert_with(|| WorkTracking {
                total_hours_worked: 0.0,
                days_worked: 0,
                estimated_total_hours: 0.0,
            });
        tracking.total_hours_worked += hours;
        tracking.days_worked += 1;
        let estimated = tracking.estimated_total_hours;

        let hourly = self
            .policy
            .hourly_rate(&record.assignment.payment, Some(estimated));
        Self::apply_due(&mut record.assignment, hours * hourly);

        self.repository.update(record.clone())?;
        Ok(record)
    }

    /// Record a payment event. Completed payments advance `total_received`
    /// and `last_payment_date`; the pending amount is rederived every time.
    pub fn record_payment(
        &self,
        id: &ContractId,
        payment: PaymentRecord,
    ) -> Result<AssignmentRecord, WorkspaceError> {
        if payment.amount <= 0.0 {
            return Err(WorkspaceError::InvalidPayment {
                reason: format!("amount must be positive, got {}", payment.amount),
            });
        }

        let mut record = self.fetch_record(id)?;

        if payment.status == PaymentStatus::Completed {
            let tracking =
                record
                    .assignment
                    .payment_tracking
                    .get_or_insert_with(|| PaymentTracking {
                        total_due: 0.0,
                        total_received: 0.0,
                        pending_amount: 0.0,
                        last_payment_date: None,
                    });
            tracking.total_received += payment.amount;
            tracking.last_payment_date = payment.paid_date.or(Some(payment.due_date));

            let summary = summarize_tracking(tracking);
            tracking.pending_amount = summary.pending_amount;
            if summary.overpaid {
                warn!(
                    contract = %record.assignment.id.0,
                    total_due = tracking.total_due,
                    total_received = tracking.total_received,
                    "payment received exceeds amount due"
                );
            }
        }

        record.payments.push(payment);
        self.repository.update(record.clone())?;
        Ok(record)
    }

    /// Progress and payment position for one contract as of `today`.
    pub fn dashboard(
        &self,
        id: &ContractId,
        today: NaiveDate,
    ) -> Result<ContractDashboard, WorkspaceError> {
        let record = self.fetch_record(id)?;
        let progress = compute_progress(&record.assignment, today, &self.policy);
        let payments = match &record.assignment.payment_tracking {
            Some(tracking) => summarize_tracking(tracking),
            None => PaymentSummary {
                total_due: 0.0,
                total_received: 0.0,
                pending_amount: 0.0,
                overpaid: false,
            },
        };

        Ok(ContractDashboard {
            contract_id: record.assignment.id.clone(),
            title: record.assignment.title.clone(),
            status: record.assignment.status,
            status_label: record.assignment.status.label(),
            progress,
            payments,
        })
    }

    /// Advertised listings matching the criteria, in repository order.
    pub fn search(&self, criteria: &FilterCriteria) -> Result<Vec<WorkAssignment>, WorkspaceError> {
        let listings: Vec<WorkAssignment> = self
            .repository
            .listings()?
            .into_iter()
            .map(|record| record.assignment)
            .collect();
        Ok(filter_listings(&listings, criteria, &self.policy))
    }

    /// Advertised listings scored for a worker, best skill match first.
    /// The sort is stable, so repository order breaks ties.
    pub fn recommend(&self, worker: &WorkerProfile) -> Result<Vec<ScoredListing>, WorkspaceError> {
        let mut scored: Vec<ScoredListing> = self
            .repository
            .listings()?
            .into_iter()
            .map(|record| {
                let report = score_match(worker, &record.assignment);
                ScoredListing {
                    assignment: record.assignment,
                    report,
                }
            })
            .collect();
        scored.sort_by(|a, b| {
            b.report
                .skill_match_percent
                .cmp(&a.report.skill_match_percent)
        });
        Ok(scored)
    }

    /// Fetch the full record for API responses.
    pub fn get(&self, id: &ContractId) -> Result<AssignmentRecord, WorkspaceError> {
        self.fetch_record(id)
    }

    fn fetch_record(&self, id: &ContractId) -> Result<AssignmentRecord, WorkspaceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    fn is_workable(&self, assignment: &WorkAssignment) -> bool {
        matches!(
            assignment.status,
            ContractStatus::Accepted | ContractStatus::InProgress
        )
    }

    fn estimated_hours(&self, assignment: &WorkAssignment) -> f64 {
        let duration = self.policy.resolve_duration(&assignment.work.duration_label);
        duration.days as f64 * self.policy.hours_per_day
    }

    fn apply_due(assignment: &mut WorkAssignment, amount: f64) {
        let tracking = assignment
            .payment_tracking
            .get_or_insert_with(|| PaymentTracking {
                total_due: 0.0,
                total_received: 0.0,
                pending_amount: 0.0,
                last_payment_date: None,
            });
        tracking.total_due += amount;
        tracking.pending_amount = summarize_tracking(tracking).pending_amount;
    }
}

/// Error raised by the workspace service.
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("invalid listing: {reason}")]
    InvalidListing { reason: String },
    #[error("invalid work log: {reason}")]
    InvalidWorkLog { reason: String },
    #[error("work log not found")]
    WorkLogNotFound,
    #[error("invalid payment: {reason}")]
    InvalidPayment { reason: String },
    #[error("contract is not open for work (status: {status})")]
    NotOpenForWork { status: &'static str },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
