use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{
    ApplicationId, ApplicationListView, LoanApplicationSubmission, PredictionView,
};
use super::repository::{ApplicationRepository, RepositoryError};
use super::service::{ApplicationServiceError, LoanApplicationService};
use crate::scoring::ApplicationStatus;

/// Router builder exposing HTTP endpoints for scoring and application tracking.
pub fn application_router<R>(service: Arc<LoanApplicationService<R>>) -> Router
where
    R: ApplicationRepository + 'static,
{
    Router::new()
        .route("/api/v1/loans/score", post(score_handler::<R>))
        .route(
            "/api/v1/loans/applications",
            get(list_handler::<R>).post(submit_handler::<R>),
        )
        .route(
            "/api/v1/loans/applications/:application_id",
            get(status_handler::<R>),
        )
        .route(
            "/api/v1/loans/applications/:application_id/evaluate",
            post(evaluate_handler::<R>),
        )
        .route(
            "/api/v1/loans/applications/:application_id/decision",
            post(decision_handler::<R>),
        )
        .with_state(service)
}

/// Body for recording a decision against an application.
#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    pub status: ApplicationStatus,
}

/// Query string for the history listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pub limit: Option<usize>,
}

pub(crate) async fn score_handler<R>(
    State(service): State<Arc<LoanApplicationService<R>>>,
    axum::Json(submission): axum::Json<LoanApplicationSubmission>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    match service.score(submission) {
        Ok(result) => {
            let view = PredictionView::from_result(None, result);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(None, error),
    }
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<LoanApplicationService<R>>>,
    axum::Json(submission): axum::Json<LoanApplicationSubmission>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    match service.submit(submission) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::ACCEPTED, axum::Json(view)).into_response()
        }
        Err(error) => error_response(None, error),
    }
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<LoanApplicationService<R>>>,
    Query(query): Query<ListingQuery>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    match service.recent(query.limit) {
        Ok(records) => (
            StatusCode::OK,
            axum::Json(ApplicationListView::from_records(&records)),
        )
            .into_response(),
        Err(error) => error_response(None, error),
    }
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<LoanApplicationService<R>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    let id = ApplicationId(application_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(Some(&id), error),
    }
}

pub(crate) async fn evaluate_handler<R>(
    State(service): State<Arc<LoanApplicationService<R>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    let id = ApplicationId(application_id);
    match service.evaluate(&id) {
        Ok(result) => {
            let view = PredictionView::from_result(Some(id), result);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(Some(&id), error),
    }
}

pub(crate) async fn decision_handler<R>(
    State(service): State<Arc<LoanApplicationService<R>>>,
    Path(application_id): Path<String>,
    axum::Json(request): axum::Json<DecisionRequest>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    let id = ApplicationId(application_id);
    match service.record_decision(&id, request.status) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(Some(&id), error),
    }
}

fn error_response(id: Option<&ApplicationId>, error: ApplicationServiceError) -> Response {
    let (status, message) = match &error {
        ApplicationServiceError::Intake(violation) => {
            (StatusCode::UNPROCESSABLE_ENTITY, violation.to_string())
        }
        ApplicationServiceError::Repository(RepositoryError::Conflict) => (
            StatusCode::CONFLICT,
            "application already exists".to_string(),
        ),
        ApplicationServiceError::Repository(RepositoryError::NotFound) => {
            (StatusCode::NOT_FOUND, "application not found".to_string())
        }
        ApplicationServiceError::Repository(RepositoryError::Unavailable(_)) => {
            (StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
        }
    };

    let payload = match id {
        Some(id) => json!({ "application_id": id.0, "error": message }),
        None => json!({ "error": message }),
    };
    (status, axum::Json(payload)).into_response()
}
