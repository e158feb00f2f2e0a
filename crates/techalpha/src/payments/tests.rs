use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::domain::{PaymentInitiation, PaymentRequest, VerificationRequest};
use super::gateway::{GatewayError, PaymentGateway};
use super::{payment_router, PaymentError, PaymentService};

#[derive(Default)]
struct StubGateway {
    initiations: Mutex<Vec<PaymentInitiation>>,
    references: Mutex<Vec<String>>,
}

impl StubGateway {
    fn initiations(&self) -> Vec<PaymentInitiation> {
        self.initiations.lock().expect("stub mutex poisoned").clone()
    }

    fn references(&self) -> Vec<String> {
        self.references.lock().expect("stub mutex poisoned").clone()
    }
}

#[async_trait]
impl PaymentGateway for StubGateway {
    async fn initialize(&self, initiation: PaymentInitiation) -> Result<Value, GatewayError> {
        self.initiations
            .lock()
            .expect("stub mutex poisoned")
            .push(initiation);
        Ok(json!({
            "status": true,
            "message": "Authorization URL created",
            "data": {
                "authorization_url": "https://checkout.paystack.com/abc123",
                "access_code": "abc123",
                "reference": "ref-001",
            }
        }))
    }

    async fn verify(&self, reference: &str) -> Result<Value, GatewayError> {
        self.references
            .lock()
            .expect("stub mutex poisoned")
            .push(reference.to_string());
        Ok(json!({
            "status": true,
            "message": "Verification successful",
            "data": { "status": "success", "reference": reference, "amount": 2500000 }
        }))
    }
}

struct DownGateway;

#[async_trait]
impl PaymentGateway for DownGateway {
    async fn initialize(&self, _initiation: PaymentInitiation) -> Result<Value, GatewayError> {
        Err(GatewayError::Status {
            status: 401,
            body: r#"{"status":false,"message":"Invalid key"}"#.to_string(),
        })
    }

    async fn verify(&self, _reference: &str) -> Result<Value, GatewayError> {
        Err(GatewayError::Config("unreachable".to_string()))
    }
}

fn request() -> PaymentRequest {
    PaymentRequest {
        amount: Some(Decimal::new(25_000, 0)),
        email: Some("ada@example.com".to_string()),
        phone: Some("+2348012345678".to_string()),
        name: None,
        callback_url: None,
    }
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn initiate_forwards_minor_units_and_default_callback() {
    let gateway = Arc::new(StubGateway::default());
    let service = PaymentService::new(
        gateway.clone(),
        Some("https://techalphahub.com/payment/complete".to_string()),
    );

    let response = service.initiate(request()).await.expect("gateway answers");

    assert_eq!(response["data"]["reference"], "ref-001");
    let forwarded = gateway.initiations();
    assert_eq!(forwarded.len(), 1);
    assert_eq!(forwarded[0].amount_minor, 2_500_000);
    assert_eq!(
        forwarded[0].callback_url.as_deref(),
        Some("https://techalphahub.com/payment/complete")
    );
}

#[tokio::test]
async fn initiate_prefers_request_callback() {
    let gateway = Arc::new(StubGateway::default());
    let service = PaymentService::new(gateway.clone(), Some("https://default".to_string()));
    let mut payment = request();
    payment.callback_url = Some("https://techalphahub.com/courses/paid".to_string());
    payment.name = Some("  Ada Obi ".to_string());

    service.initiate(payment).await.expect("gateway answers");

    let forwarded = gateway.initiations();
    assert_eq!(
        forwarded[0].callback_url.as_deref(),
        Some("https://techalphahub.com/courses/paid")
    );
    assert_eq!(forwarded[0].name.as_deref(), Some("Ada Obi"));
}

#[tokio::test]
async fn initiate_lists_missing_fields_without_calling_gateway() {
    let gateway = Arc::new(StubGateway::default());
    let service = PaymentService::new(gateway.clone(), None);

    match service.initiate(PaymentRequest::default()).await {
        Err(PaymentError::Validation(err)) => {
            assert_eq!(err.missing_fields(), &["amount", "email", "phone"]);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(gateway.initiations().is_empty());
}

#[tokio::test]
async fn initiate_rejects_zero_amount() {
    let gateway = Arc::new(StubGateway::default());
    let service = PaymentService::new(gateway.clone(), None);
    let mut payment = request();
    payment.amount = Some(Decimal::ZERO);

    assert!(matches!(
        service.initiate(payment).await,
        Err(PaymentError::InvalidAmount(_))
    ));
    assert!(gateway.initiations().is_empty());
}

#[tokio::test]
async fn payment_route_returns_gateway_body_verbatim() {
    let gateway = Arc::new(StubGateway::default());
    let router = payment_router(Arc::new(PaymentService::new(gateway, None)));

    let response = router
        .oneshot(post_json(
            "/payment",
            json!({ "amount": 25000, "email": "ada@example.com", "phone": "08012345678" }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(
        body,
        json!({
            "status": true,
            "message": "Authorization URL created",
            "data": {
                "authorization_url": "https://checkout.paystack.com/abc123",
                "access_code": "abc123",
                "reference": "ref-001",
            }
        })
    );
}

#[tokio::test]
async fn payment_route_rejects_negative_amount() {
    let gateway = Arc::new(StubGateway::default());
    let router = payment_router(Arc::new(PaymentService::new(gateway, None)));

    let response = router
        .oneshot(post_json(
            "/payment",
            json!({ "amount": -5, "email": "ada@example.com", "phone": "08012345678" }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Amount must be greater than zero");
}

#[tokio::test]
async fn verify_route_forwards_reference() {
    let gateway = Arc::new(StubGateway::default());
    let router = payment_router(Arc::new(PaymentService::new(gateway.clone(), None)));

    let request = post_json("/payment/verify", json!({ "reference": "T123456" }));
    let response = router
        .oneshot(request)
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["reference"], "T123456");
    assert_eq!(gateway.references(), vec!["T123456".to_string()]);
}

#[tokio::test]
async fn verify_route_requires_reference() {
    let gateway = Arc::new(StubGateway::default());
    let router = payment_router(Arc::new(PaymentService::new(gateway.clone(), None)));

    let response = router
        .oneshot(post_json("/payment/verify", json!({})))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["missing_fields"], json!(["reference"]));
    assert!(gateway.references().is_empty());
}

#[tokio::test]
async fn gateway_failure_is_a_generic_server_error() {
    let router = payment_router(Arc::new(PaymentService::new(Arc::new(DownGateway), None)));

    let response = router
        .oneshot(post_json(
            "/payment",
            json!({ "amount": "1000", "email": "ada@example.com", "phone": "08012345678" }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body, json!({ "error": "Payment processing failed" }));
}

#[test]
fn verification_request_tolerates_unknown_fields() {
    let request: VerificationRequest =
        serde_json::from_str(r#"{"reference": "T1", "trxref": "T1"}"#).expect("parses");
    assert_eq!(request.reference.as_deref(), Some("T1"));
}
