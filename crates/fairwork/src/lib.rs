//! Marketplace core for fair gig-work contracts.
//!
//! The computational heart lives in [`marketplace`]: pure progress, payment,
//! match-scoring, and search-filter functions over in-memory contract
//! records, plus a repository-backed service facade that keeps the tracking
//! snapshots consistent as work logs and payments arrive.

pub mod config;
pub mod error;
pub mod marketplace;
pub mod telemetry;
