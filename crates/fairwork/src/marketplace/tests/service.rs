use std::sync::Arc;

use crate::marketplace::domain::{
    ApprovalStatus, ContractId, ContractStatus, PaymentRecord, PaymentStatus,
};
use crate::marketplace::filters::FilterCriteria;
use crate::marketplace::repository::RepositoryError;
use crate::marketplace::service::{ContractWorkspace, WorkspaceError};

use super::common::*;

fn completed_payment(amount: f64) -> PaymentRecord {
    PaymentRecord {
        amount,
        status: PaymentStatus::Completed,
        method: "upi".to_string(),
        due_date: date(2024, 1, 7),
        paid_date: Some(date(2024, 1, 8)),
    }
}

#[test]
fn posting_twice_with_the_same_id_conflicts() {
    let (workspace, _) = build_workspace();

    workspace
        .post(assignment("contract-1"))
        .expect("first post");
    let err = workspace
        .post(assignment("contract-1"))
        .expect_err("duplicate post");

    assert!(matches!(
        err,
        WorkspaceError::Repository(RepositoryError::Conflict)
    ));
}

#[test]
fn postings_validate_score_and_rate_ranges() {
    let (workspace, _) = build_workspace();

    let mut out_of_range = assignment("contract-invalid-1");
    out_of_range.fairness_score = 10.5;
    let err = workspace.post(out_of_range).expect_err("score above range");
    assert!(matches!(err, WorkspaceError::InvalidListing { .. }));

    let mut negative_score = assignment("contract-invalid-2");
    negative_score.fairness_score = -0.1;
    let err = workspace
        .post(negative_score)
        .expect_err("score below range");
    assert!(matches!(err, WorkspaceError::InvalidListing { .. }));

    let mut negative_rate = assignment("contract-invalid-3");
    negative_rate.payment.rate = -800.0;
    let err = workspace.post(negative_rate).expect_err("negative rate");
    assert!(matches!(err, WorkspaceError::InvalidListing { .. }));

    let mut nan_score = assignment("contract-invalid-4");
    nan_score.fairness_score = f32::NAN;
    let err = workspace.post(nan_score).expect_err("NaN score");
    assert!(matches!(err, WorkspaceError::InvalidListing { .. }));

    let mut boundary = assignment("contract-invalid-5");
    boundary.fairness_score = 10.0;
    boundary.payment.rate = 0.0;
    workspace.post(boundary).expect("boundary values are valid");
}

#[test]
fn accepting_seeds_zeroed_tracking_snapshots() {
    let (workspace, _) = build_workspace();
    workspace.post(assignment("contract-2")).expect("post");

    let record = workspace
        .accept(&ContractId("contract-2".to_string()))
        .expect("accept");

    assert_eq!(record.assignment.status, ContractStatus::Accepted);
    let tracking = record.assignment.work_tracking.expect("work tracking");
    assert_eq!(tracking.total_hours_worked, 0.0);
    assert_eq!(tracking.days_worked, 0);
    // "30 days" at 8 hours/day
    assert_eq!(tracking.estimated_total_hours, 240.0);
    let payments = record.assignment.payment_tracking.expect("payment tracking");
    assert_eq!(payments.total_due, 0.0);
    assert_eq!(payments.pending_amount, 0.0);
}

#[test]
fn accepting_anything_but_an_available_listing_is_rejected() {
    let (workspace, _) = build_workspace();
    let mut listing = assignment("contract-3");
    listing.status = ContractStatus::Completed;
    workspace.post(listing).expect("post");

    let err = workspace
        .accept(&ContractId("contract-3".to_string()))
        .expect_err("accept terminal contract");

    assert!(matches!(
        err,
        WorkspaceError::NotOpenForWork {
            status: "completed"
        }
    ));
}

#[test]
fn work_logs_need_an_accepted_contract() {
    let (workspace, _) = build_workspace();
    workspace.post(assignment("contract-4")).expect("post");
    let id = ContractId("contract-4".to_string());

    let err = workspace
        .submit_work_log(&id, date(2024, 1, 2), 8.0, "Brickwork".to_string())
        .expect_err("log against an unaccepted listing");
    assert!(matches!(err, WorkspaceError::NotOpenForWork { .. }));

    workspace.accept(&id).expect("accept");
    let entry = workspace
        .submit_work_log(&id, date(2024, 1, 2), 8.0, "Brickwork".to_string())
        .expect("log after accept");

    assert_eq!(entry.status, ApprovalStatus::Pending);
    let record = workspace.get(&id).expect("get");
    assert_eq!(record.assignment.status, ContractStatus::InProgress);
    assert_eq!(record.work_logs.len(), 1);
}

#[test]
fn work_log_hours_are_bounded() {
    let (workspace, _) = build_workspace();
    workspace.post(assignment("contract-5")).expect("post");
    let id = ContractId("contract-5".to_string());
    workspace.accept(&id).expect("accept");

    for hours in [0.0, -2.0, 24.5] {
        let err = workspace
            .submit_work_log(&id, date(2024, 1, 2), hours, String::new())
            .expect_err("out-of-range hours");
        assert!(matches!(err, WorkspaceError::InvalidWorkLog { .. }));
    }
}

#[test]
fn approving_a_log_accrues_hours_and_dues() {
    let (workspace, _) = build_workspace();
    workspace.post(assignment("contract-6")).expect("post");
    let id = ContractId("contract-6".to_string());
    workspace.accept(&id).expect("accept");
    let entry = workspace
        .submit_work_log(&id, date(2024, 1, 2), 8.0, "Brickwork".to_string())
        .expect("submit");

    let record = workspace.approve_work_log(&id, &entry.id).expect("approve");

    let tracking = record.assignment.work_tracking.expect("work tracking");
    assert_eq!(tracking.total_hours_worked, 8.0);
    assert_eq!(tracking.days_worked, 1);
    // 800/day over 8-hour days is 100/hour
    let payments = record.assignment.payment_tracking.expect("payment tracking");
    assert_eq!(payments.total_due, 800.0);
    assert_eq!(payments.pending_amount, 800.0);
    assert_eq!(record.work_logs[0].status, ApprovalStatus::Approved);
}

#[test]
fn a_log_cannot_be_approved_twice() {
    let (workspace, _) = build_workspace();
    workspace.post(assignment("contract-7")).expect("post");
    let id = ContractId("contract-7".to_string());
    workspace.accept(&id).expect("accept");
    let entry = workspace
        .submit_work_log(&id, date(2024, 1, 2), 6.0, String::new())
        .expect("submit");

    workspace.approve_work_log(&id, &entry.id).expect("approve");
    let err = workspace
        .approve_work_log(&id, &entry.id)
        .expect_err("second approval");

    assert!(matches!(err, WorkspaceError::InvalidWorkLog { .. }));
}

#[test]
fn approving_an_unknown_log_is_not_found() {
    let (workspace, _) = build_workspace();
    workspace.post(assignment("contract-8")).expect("post");
    let id = ContractId("contract-8".to_string());
    workspace.accept(&id).expect("accept");

    let err = workspace
        .approve_work_log(&id, &crate::marketplace::domain::WorkLogId("log-nope".to_string()))
        .expect_err("unknown log");

    assert!(matches!(err, WorkspaceError::WorkLogNotFound));
}

#[test]
fn completed_payments_advance_received_and_rederive_pending() {
    let (workspace, _) = build_workspace();
    workspace.post(assignment("contract-9")).expect("post");
    let id = ContractId("contract-9".to_string());
    workspace.accept(&id).expect("accept");
    let entry = workspace
        .submit_work_log(&id, date(2024, 1, 2), 8.0, String::new())
        .expect("submit");
    workspace.approve_work_log(&id, &entry.id).expect("approve");

    let record = workspace
        .record_payment(&id, completed_payment(500.0))
        .expect("payment");

    let tracking = record.assignment.payment_tracking.expect("payment tracking");
    assert_eq!(tracking.total_received, 500.0);
    assert_eq!(tracking.pending_amount, 300.0);
    assert_eq!(tracking.last_payment_date, Some(date(2024, 1, 8)));
    assert_eq!(record.payments.len(), 1);
}

#[test]
fn non_completed_payments_are_recorded_without_moving_totals() {
    let (workspace, _) = build_workspace();
    workspace.post(assignment("contract-10")).expect("post");
    let id = ContractId("contract-10".to_string());
    workspace.accept(&id).expect("accept");

    let record = workspace
        .record_payment(
            &id,
            PaymentRecord {
                status: PaymentStatus::Pending,
                ..completed_payment(500.0)
            },
        )
        .expect("payment");

    let tracking = record.assignment.payment_tracking.expect("payment tracking");
    assert_eq!(tracking.total_received, 0.0);
    assert_eq!(record.payments.len(), 1);
}

#[test]
fn payment_amounts_must_be_positive() {
    let (workspace, _) = build_workspace();
    workspace.post(assignment("contract-11")).expect("post");
    let id = ContractId("contract-11".to_string());

    let err = workspace
        .record_payment(&id, completed_payment(0.0))
        .expect_err("zero payment");

    assert!(matches!(err, WorkspaceError::InvalidPayment { .. }));
}

#[test]
fn dashboard_combines_progress_and_payment_position() {
    let (workspace, _) = build_workspace();
    workspace.post(assignment("contract-12")).expect("post");
    let id = ContractId("contract-12".to_string());
    workspace.accept(&id).expect("accept");
    let entry = workspace
        .submit_work_log(&id, date(2024, 1, 2), 8.0, String::new())
        .expect("submit");
    workspace.approve_work_log(&id, &entry.id).expect("approve");
    workspace
        .record_payment(&id, completed_payment(500.0))
        .expect("payment");

    let dashboard = workspace.dashboard(&id, date(2024, 1, 16)).expect("dashboard");

    assert_eq!(dashboard.contract_id, id);
    assert_eq!(dashboard.status, ContractStatus::InProgress);
    assert_eq!(dashboard.status_label, "in-progress");
    // tracking counters: one day of thirty, 8h of 240h
    assert!((dashboard.progress.percent_complete - 1.0 / 30.0 * 100.0).abs() < 1e-9);
    assert_eq!(dashboard.payments.pending_amount, 300.0);
}

#[test]
fn search_covers_only_advertised_listings() {
    let (workspace, _) = build_workspace();
    workspace.post(assignment("contract-13")).expect("post");
    workspace.post(assignment("contract-14")).expect("post");
    workspace
        .accept(&ContractId("contract-13".to_string()))
        .expect("accept");

    let results = workspace.search(&FilterCriteria::default()).expect("search");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id.0, "contract-14");
}

#[test]
fn recommendations_rank_by_skill_match() {
    let (workspace, _) = build_workspace();
    let mut weak = assignment("contract-15");
    weak.requirements.skills = vec!["Welding".to_string(), "Masonry".to_string()];
    let mut strong = assignment("contract-16");
    strong.requirements.skills = vec!["Masonry".to_string()];
    workspace.post(weak).expect("post");
    workspace.post(strong).expect("post");

    let ranked = workspace.recommend(&worker()).expect("recommend");

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].assignment.id.0, "contract-16");
    assert_eq!(ranked[0].report.skill_match_percent, 100);
    assert_eq!(ranked[1].report.skill_match_percent, 50);
}

#[test]
fn repository_outages_surface_as_repository_errors() {
    let workspace = ContractWorkspace::new(Arc::new(UnavailableRepository), policy());

    let err = workspace
        .post(assignment("contract-17"))
        .expect_err("store offline");

    assert!(matches!(
        err,
        WorkspaceError::Repository(RepositoryError::Unavailable(_))
    ));
}
