use crate::cli::ServeArgs;
use crate::infra::{AppState, LivePaymentService, LiveSubmissionService};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use techalpha::config::AppConfig;
use techalpha::error::AppError;
use techalpha::payments::PaystackGateway;
use techalpha::submissions::{MongoSubmissionRepository, SmtpMailer};
use techalpha::telemetry;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let repository = Arc::new(MongoSubmissionRepository::connect(&config.database).await?);
    match repository.ping().await {
        Ok(()) => info!(database = %config.database.name, "document store connected"),
        Err(err) => warn!(error = %err, "document store unreachable at startup"),
    }

    let mailer = Arc::new(SmtpMailer::from_config(&config.smtp)?);
    let gateway = Arc::new(PaystackGateway::from_config(&config.payments)?);

    let submissions: Arc<LiveSubmissionService> = Arc::new(LiveSubmissionService::new(
        repository,
        mailer,
        config.smtp.notify_address.clone(),
    ));
    let payments: Arc<LivePaymentService> = Arc::new(LivePaymentService::new(
        gateway,
        config.payments.callback_url.clone(),
    ));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_service_routes(submissions, payments)
        .layer(Extension(app_state))
        .layer(prometheus_layer)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "techalpha api ready");

    axum::serve(listener, app).await?;
    Ok(())
}
