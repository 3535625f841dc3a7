use chrono::NaiveDate;
use fairwork::marketplace::domain::{ContractId, ContractStatus};
use fairwork::marketplace::repository::{
    AssignmentRecord, MarketplaceRepository, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Insertion-ordered store; listing order doubles as posting order, which the
/// search endpoint is expected to preserve.
#[derive(Default, Clone)]
pub(crate) struct InMemoryMarketplaceRepository {
    records: Arc<Mutex<Vec<AssignmentRecord>>>,
}

impl MarketplaceRepository for InMemoryMarketplaceRepository {
    fn insert(&self, record: AssignmentRecord) -> Result<AssignmentRecord, RepositoryError> {
        let mut guard = self.records.lock().map_err(poisoned)?;
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
        let mut guard = self.records.lock().map_err(poisoned)?;
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
        let guard = self.records.lock().map_err(poisoned)?;
        Ok(guard
            .iter()
            .find(|record| &record.assignment.id == id)
            .cloned())
    }

    fn listings(&self) -> Result<Vec<AssignmentRecord>, RepositoryError> {
        let guard = self.records.lock().map_err(poisoned)?;
        Ok(guard
            .iter()
            .filter(|record| record.assignment.status == ContractStatus::Available)
            .cloned()
            .collect())
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> RepositoryError {
    RepositoryError::Unavailable("repository mutex poisoned".to_string())
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
