use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ContractId, PaymentRecord, WorkLogId, WorkerProfile};
use super::filters::FilterCriteria;
use super::repository::{MarketplaceRepository, RepositoryError};
use super::service::{ContractWorkspace, WorkspaceError};

/// Router builder exposing HTTP endpoints for contract tracking and search.
pub fn marketplace_router<R>(workspace: Arc<ContractWorkspace<R>>) -> Router
where
    R: MarketplaceRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/contracts/:contract_id/work-logs",
            post(submit_work_log_handler::<R>),
        )
        .route(
            "/api/v1/contracts/:contract_id/work-logs/:log_id/approve",
            post(approve_work_log_handler::<R>),
        )
        .route(
            "/api/v1/contracts/:contract_id/payments",
            post(record_payment_handler::<R>),
        )
        .route(
            "/api/v1/contracts/:contract_id/dashboard",
            get(dashboard_handler::<R>),
        )
        .route("/api/v1/listings/search", post(search_handler::<R>))
        .route("/api/v1/listings/recommend", post(recommend_handler::<R>))
        .with_state(workspace)
}

#[derive(Debug, Deserialize)]
pub(crate) struct WorkLogRequest {
    pub(crate) date: NaiveDate,
    pub(crate) hours_worked: f64,
    #[serde(default)]
    pub(crate) description: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DashboardQuery {
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) async fn submit_work_log_handler<R>(
    State(workspace): State<Arc<ContractWorkspace<R>>>,
    Path(contract_id): Path<String>,
    axum::Json(request): axum::Json<WorkLogRequest>,
) -> Response
where
    R: MarketplaceRepository + 'static,
{
    let id = ContractId(contract_id);
    match workspace.submit_work_log(&id, request.date, request.hours_worked, request.description) {
        Ok(entry) => (StatusCode::ACCEPTED, axum::Json(entry)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn approve_work_log_handler<R>(
    State(workspace): State<Arc<ContractWorkspace<R>>>,
    Path((contract_id, log_id)): Path<(String, String)>,
) -> Response
where
    R: MarketplaceRepository + 'static,
{
    let id = ContractId(contract_id);
    let log_id = WorkLogId(log_id);
    match workspace.approve_work_log(&id, &log_id) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn record_payment_handler<R>(
    State(workspace): State<Arc<ContractWorkspace<R>>>,
    Path(contract_id): Path<String>,
    axum::Json(payment): axum::Json<PaymentRecord>,
) -> Response
where
    R: MarketplaceRepository + 'static,
{
    let id = ContractId(contract_id);
    match workspace.record_payment(&id, payment) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn dashboard_handler<R>(
    State(workspace): State<Arc<ContractWorkspace<R>>>,
    Path(contract_id): Path<String>,
    Query(query): Query<DashboardQuery>,
) -> Response
where
    R: MarketplaceRepository + 'static,
{
    let id = ContractId(contract_id);
    let today = query.today.unwrap_or_else(|| Local::now().date_naive());
    match workspace.dashboard(&id, today) {
        Ok(dashboard) => (StatusCode::OK, axum::Json(dashboard)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn search_handler<R>(
    State(workspace): State<Arc<ContractWorkspace<R>>>,
    axum::Json(criteria): axum::Json<FilterCriteria>,
) -> Response
where
    R: MarketplaceRepository + 'static,
{
    match workspace.search(&criteria) {
        Ok(listings) => (StatusCode::OK, axum::Json(listings)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn recommend_handler<R>(
    State(workspace): State<Arc<ContractWorkspace<R>>>,
    axum::Json(worker): axum::Json<WorkerProfile>,
) -> Response
where
    R: MarketplaceRepository + 'static,
{
    match workspace.recommend(&worker) {
        Ok(listings) => (StatusCode::OK, axum::Json(listings)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(error: WorkspaceError) -> Response {
    let status = match &error {
        WorkspaceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        WorkspaceError::WorkLogNotFound => StatusCode::NOT_FOUND,
        WorkspaceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        WorkspaceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        WorkspaceError::InvalidListing { .. }
        | WorkspaceError::InvalidWorkLog { .. }
        | WorkspaceError::InvalidPayment { .. }
        | WorkspaceError::NotOpenForWork { .. } => StatusCode::UNPROCESSABLE_ENTITY,
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
