use crate::infra::AppState;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use fairwork::error::AppError;
use fairwork::marketplace::domain::{ContractId, WorkAssignment};
use fairwork::marketplace::repository::AssignmentRecord;
use fairwork::marketplace::{marketplace_router, ContractWorkspace, MarketplaceRepository};
use serde_json::json;
use std::sync::Arc;

/// Tracking and discovery routes from the library router, plus the posting
/// lifecycle and operational endpoints the service itself owns.
pub(crate) fn with_marketplace_routes<R>(workspace: Arc<ContractWorkspace<R>>) -> axum::Router
where
    R: MarketplaceRepository + 'static,
{
    let lifecycle = axum::Router::new()
        .route("/api/v1/contracts", axum::routing::post(post_contract_endpoint))
        .route(
            "/api/v1/contracts/:contract_id/accept",
            axum::routing::post(accept_contract_endpoint),
        )
        .with_state(workspace.clone());

    marketplace_router(workspace)
        .merge(lifecycle)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn post_contract_endpoint<R>(
    State(workspace): State<Arc<ContractWorkspace<R>>>,
    Json(assignment): Json<WorkAssignment>,
) -> Result<(StatusCode, Json<AssignmentRecord>), AppError>
where
    R: MarketplaceRepository + 'static,
{
    let record = workspace.post(assignment)?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub(crate) async fn accept_contract_endpoint<R>(
    State(workspace): State<Arc<ContractWorkspace<R>>>,
    Path(contract_id): Path<String>,
) -> Result<Json<AssignmentRecord>, AppError>
where
    R: MarketplaceRepository + 'static,
{
    let record = workspace.accept(&ContractId(contract_id))?;
    Ok(Json(record))
}
