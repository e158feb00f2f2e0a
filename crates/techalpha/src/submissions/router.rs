use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;
use tracing::error;

use crate::responses;

use super::domain::{
    ContactSubmission, EnrollmentSubmission, PartneringSubmission, SubmissionReceipt,
};
use super::mailer::Mailer;
use super::repository::SubmissionRepository;
use super::service::{SubmissionError, SubmissionService};

pub const SERVER_ERROR: &str = "Server error";

/// Router builder exposing the three public form endpoints.
pub fn submission_router<R, M>(service: Arc<SubmissionService<R, M>>) -> Router
where
    R: SubmissionRepository + 'static,
    M: Mailer + 'static,
{
    Router::new()
        .route("/contact", post(contact_handler::<R, M>))
        .route("/register", post(register_handler::<R, M>))
        .route("/partnering", post(partnering_handler::<R, M>))
        .with_state(service)
}

pub(crate) async fn contact_handler<R, M>(
    State(service): State<Arc<SubmissionService<R, M>>>,
    payload: Result<Json<ContactSubmission>, JsonRejection>,
) -> Response
where
    R: SubmissionRepository + 'static,
    M: Mailer + 'static,
{
    match payload {
        Ok(Json(submission)) => respond("/contact", service.submit_contact(submission).await),
        Err(rejection) => responses::invalid_body("/contact", rejection),
    }
}

pub(crate) async fn register_handler<R, M>(
    State(service): State<Arc<SubmissionService<R, M>>>,
    payload: Result<Json<EnrollmentSubmission>, JsonRejection>,
) -> Response
where
    R: SubmissionRepository + 'static,
    M: Mailer + 'static,
{
    match payload {
        Ok(Json(submission)) => respond("/register", service.submit_enrollment(submission).await),
        Err(rejection) => responses::invalid_body("/register", rejection),
    }
}

pub(crate) async fn partnering_handler<R, M>(
    State(service): State<Arc<SubmissionService<R, M>>>,
    payload: Result<Json<PartneringSubmission>, JsonRejection>,
) -> Response
where
    R: SubmissionRepository + 'static,
    M: Mailer + 'static,
{
    match payload {
        Ok(Json(submission)) => respond("/partnering", service.submit_partnering(submission).await),
        Err(rejection) => responses::invalid_body("/partnering", rejection),
    }
}

fn respond(route: &'static str, result: Result<SubmissionReceipt, SubmissionError>) -> Response {
    match result {
        Ok(receipt) => {
            let payload = json!({
                "message": receipt.message,
                "id": receipt.id.0,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(SubmissionError::Validation(err)) => responses::missing_fields(err.missing_fields()),
        Err(other) => {
            error!(route, error = %other, "submission failed");
            responses::server_error(SERVER_ERROR)
        }
    }
}
