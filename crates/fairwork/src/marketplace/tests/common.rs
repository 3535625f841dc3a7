use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::marketplace::domain::{
    ContractId, ContractStatus, EmployerSnapshot, HomeLocation, PaymentTerms, RateUnit,
    Requirements, WorkAssignment, WorkDetails, WorkSite, WorkerProfile,
};
use crate::marketplace::repository::{
    AssignmentRecord, MarketplaceRepository, RepositoryError,
};
use crate::marketplace::schedule::WorkSchedulePolicy;
use crate::marketplace::service::ContractWorkspace;

pub(super) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub(super) fn policy() -> WorkSchedulePolicy {
    WorkSchedulePolicy::default()
}

pub(super) fn site(city: &str, state: &str) -> WorkSite {
    WorkSite {
        address: "12 Market Road".to_string(),
        city: city.to_string(),
        state: state.to_string(),
        postal_code: "560001".to_string(),
    }
}

pub(super) fn daily_terms(rate: f64) -> PaymentTerms {
    PaymentTerms {
        rate_unit: RateUnit::Daily,
        rate,
        currency: "INR".to_string(),
        terms: "Weekly settlement".to_string(),
    }
}

pub(super) fn assignment(id: &str) -> WorkAssignment {
    WorkAssignment {
        id: ContractId(id.to_string()),
        title: "Construction Site Helper".to_string(),
        description: "General labor for a residential construction site".to_string(),
        employer: EmployerSnapshot {
            name: "Kumar Constructions".to_string(),
            company: Some("Kumar Constructions Pvt Ltd".to_string()),
            contact: "+91-9800000001".to_string(),
            rating: 4.3,
        },
        work: WorkDetails {
            site: site("Bangalore", "Karnataka"),
            start_date: date(2024, 1, 1),
            end_date: Some(date(2024, 1, 31)),
            duration_label: "30 days".to_string(),
            working_hours: "9 AM - 5 PM".to_string(),
        },
        payment: daily_terms(800.0),
        requirements: Requirements {
            skills: vec!["Construction".to_string(), "Masonry".to_string()],
            min_experience_years: 1,
            tools: None,
        },
        status: ContractStatus::Available,
        fairness_score: 8.5,
        minimum_wage_compliant: true,
        applicant_count: 4,
        work_tracking: None,
        payment_tracking: None,
    }
}

pub(super) fn worker() -> WorkerProfile {
    WorkerProfile {
        id: "worker-001".to_string(),
        skills: vec!["Carpentry".to_string(), "Masonry".to_string()],
        minimum_wage: 500.0,
        max_travel_km: 25,
        home: HomeLocation {
            city: "Bangalore".to_string(),
            state: "Karnataka".to_string(),
            postal_code: "560010".to_string(),
        },
    }
}

pub(super) fn build_workspace() -> (
    ContractWorkspace<MemoryRepository>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let workspace = ContractWorkspace::new(repository.clone(), policy());
    (workspace, repository)
}

/// Insertion-ordered in-memory store so listing order is deterministic.
#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<Vec<AssignmentRecord>>>,
}

impl MarketplaceRepository for MemoryRepository {
    fn insert(&self, record: AssignmentRecord) -> Result<AssignmentRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard
            .iter()
            .any(|existing| existing.assignment.id == record.assignment.id)
        {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn update(&self, record: AssignmentRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        match guard
            .iter_mut()
            .find(|existing| existing.assignment.id == record.assignment.id)
        {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &ContractId) -> Result<Option<AssignmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .find(|record| &record.assignment.id == id)
            .cloned())
    }

    fn listings(&self) -> Result<Vec<AssignmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| record.assignment.status == ContractStatus::Available)
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableRepository;

impl MarketplaceRepository for UnavailableRepository {
    fn insert(&self, _record: AssignmentRecord) -> Result<AssignmentRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn update(&self, _record: AssignmentRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &ContractId) -> Result<Option<AssignmentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn listings(&self) -> Result<Vec<AssignmentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
