use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use tracing::error;

use crate::responses;

use super::domain::{PaymentRequest, VerificationRequest};
use super::gateway::PaymentGateway;
use super::service::{PaymentError, PaymentService};

pub const PAYMENT_FAILED: &str = "Payment processing failed";

/// Router builder exposing payment initiation and verification.
pub fn payment_router<G>(service: Arc<PaymentService<G>>) -> Router
where
    G: PaymentGateway + 'static,
{
    Router::new()
        .route("/payment", post(initiate_handler::<G>))
        .route("/payment/verify", post(verify_handler::<G>))
        .with_state(service)
}

pub(crate) async fn initiate_handler<G>(
    State(service): State<Arc<PaymentService<G>>>,
    payload: Result<Json<PaymentRequest>, JsonRejection>,
) -> Response
where
    G: PaymentGateway + 'static,
{
    match payload {
        Ok(Json(request)) => respond("/payment", service.initiate(request).await),
        Err(rejection) => responses::invalid_body("/payment", rejection),
    }
}

pub(crate) async fn verify_handler<G>(
    State(service): State<Arc<PaymentService<G>>>,
    payload: Result<Json<VerificationRequest>, JsonRejection>,
) -> Response
where
    G: PaymentGateway + 'static,
{
    match payload {
        Ok(Json(request)) => respond("/payment/verify", service.verify(request).await),
        Err(rejection) => responses::invalid_body("/payment/verify", rejection),
    }
}

fn respond(route: &'static str, result: Result<Value, PaymentError>) -> Response {
    match result {
        Ok(gateway_response) => (StatusCode::OK, Json(gateway_response)).into_response(),
        Err(PaymentError::Validation(err)) => responses::missing_fields(err.missing_fields()),
        Err(PaymentError::InvalidAmount(_)) => {
            let payload = json!({ "error": "Amount must be greater than zero" });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        Err(PaymentError::Gateway(err)) => {
            error!(route, error = %err, "payment gateway call failed");
            responses::server_error(PAYMENT_FAILED)
        }
    }
}
