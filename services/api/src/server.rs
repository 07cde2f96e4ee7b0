use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryCatalogRepository};
use crate::refresher::CatalogRefresher;
use crate::routes::with_catalog_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use slugsearch::catalog::CatalogService;
use slugsearch::client::HttpCatalogClient;
use slugsearch::config::AppConfig;
use slugsearch::error::AppError;
use slugsearch::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
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

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryCatalogRepository::default());
    let client = Arc::new(HttpCatalogClient::new(&config.catalog)?);
    let service = Arc::new(CatalogService::new(
        repository,
        client,
        config.catalog.term.clone(),
    ));

    // First sweep before accepting traffic; an unreachable upstream only
    // delays data until the refresher catches up.
    match service.refresh_listings().await {
        Ok(summary) => info!(
            categories = summary.categories,
            courses = summary.courses,
            "initial catalog sweep complete"
        ),
        Err(err) => warn!("initial catalog sweep failed: {err}"),
    }
    if let Err(err) = service.refresh_requirements().await {
        warn!("initial degree sweep failed: {err}");
    }

    tokio::spawn(
        CatalogRefresher::new(service.clone(), config.catalog.refresh_interval).start(),
    );

    let app = with_catalog_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "course catalog service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
