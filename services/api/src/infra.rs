use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use techalpha::payments::{PaymentService, PaystackGateway};
use techalpha::submissions::{MongoSubmissionRepository, SmtpMailer, SubmissionService};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type LiveSubmissionService = SubmissionService<MongoSubmissionRepository, SmtpMailer>;
pub(crate) type LivePaymentService = PaymentService<PaystackGateway>;
