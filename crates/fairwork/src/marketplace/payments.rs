use serde::{Deserialize, Serialize};

use super::domain::{
    ApprovalStatus, PaymentRecord, PaymentStatus, PaymentTerms, PaymentTracking, WorkLogEntry,
    WorkTracking,
};
use super::schedule::WorkSchedulePolicy;

/// Aggregated money position for a contract.
///
/// `pending_amount` is `total_due - total_received`, clamped at zero. When
/// received exceeds due the clamp hides the arithmetic but not the fact:
/// `overpaid` is raised so the condition reaches the employer's review queue
/// instead of disappearing into a 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentSummary {
    pub total_due: f64,
    pub total_received: f64,
    pub pending_amount: f64,
    pub overpaid: bool,
}

impl PaymentSummary {
    fn from_totals(total_due: f64, total_received: f64) -> Self {
        let pending = total_due - total_received;
        Self {
            total_due,
            total_received,
            pending_amount: pending.max(0.0),
            overpaid: pending < 0.0,
        }
    }
}

/// Summarize from a stored tracking snapshot.
///
/// The stored `pending_amount` is recomputed from the other two fields
/// rather than trusted, so a stale snapshot still yields a consistent view.
pub fn summarize_tracking(tracking: &PaymentTracking) -> PaymentSummary {
    PaymentSummary::from_totals(tracking.total_due, tracking.total_received)
}

/// Summarize from the raw ledger: approved work logs valued at the hourly
/// equivalent of the contract terms, against completed payment records.
pub fn summarize_ledger(
    terms: &PaymentTerms,
    work_tracking: Option<&WorkTracking>,
    work_logs: &[WorkLogEntry],
    payments: &[PaymentRecord],
    policy: &WorkSchedulePolicy,
) -> PaymentSummary {
    let hourly = policy.hourly_rate(
        terms,
        work_tracking.map(|tracking| tracking.estimated_total_hours),
    );

    let total_due: f64 = work_logs
        .iter()
        .filter(|log| log.status == ApprovalStatus::Approved)
        .map(|log| log.hours_worked * hourly)
        .sum();

    let total_received: f64 = payments
        .iter()
        .filter(|payment| payment.status == PaymentStatus::Completed)
        .map(|payment| payment.amount)
        .sum();

    PaymentSummary::from_totals(total_due, total_received)
}
