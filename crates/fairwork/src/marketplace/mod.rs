//! Contract tracking, scoring, and search for the gig-work marketplace.
//!
//! The four computations at the center — progress derivation, payment
//! summarization, match scoring, and listing filtering — are pure functions
//! over domain records with an explicit `today` wherever the clock matters.
//! [`ContractWorkspace`] composes them over a [`MarketplaceRepository`] so
//! work logs and payment events keep the tracking snapshots consistent.

pub mod domain;
pub mod filters;
pub mod matching;
pub mod payments;
pub mod progress;
pub mod repository;
pub mod router;
pub mod schedule;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ApprovalStatus, ContractId, ContractStatus, EmployerSnapshot, HomeLocation, PaymentRecord,
    PaymentStatus, PaymentTerms, PaymentTracking, RateUnit, Requirements, WorkAssignment,
    WorkDetails, WorkLogEntry, WorkLogId, WorkSite, WorkTracking, WorkerProfile,
};
pub use filters::{
    filter_listings, matches_criteria, DurationFilter, FilterCriteria, LocationFilter,
    PaymentFilter,
};
pub use matching::{score_match, CommuteClass, FairnessTier, MatchReport, WageTier};
pub use payments::{summarize_ledger, summarize_tracking, PaymentSummary};
pub use progress::{compute_progress, ProgressReport};
pub use repository::{
    AssignmentRecord, ContractDashboard, MarketplaceRepository, RepositoryError, ScoredListing,
};
pub use router::marketplace_router;
pub use schedule::{ResolvedDuration, WorkSchedulePolicy};
pub use service::{ContractWorkspace, WorkspaceError};
