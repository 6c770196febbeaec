use std::sync::Arc;

use chrono::Duration;
use surveyflow::api::{self, app_state::AppState};
use surveyflow::catalog::SurveyCatalog;
use surveyflow::config::AppConfig;
use surveyflow::config::loader::ConfigLoader;
use surveyflow::observability::{AppMetrics, ObservabilityState, create_observability_router};
use surveyflow::services::flow::create_survey_flow_service;
use surveyflow::storage::{
    CompletionMarkerStore, MemoryCompletionMarkerStore, MemorySessionStore, SessionStore,
};
use tracing::info;

fn init_tracing(config: &AppConfig) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match &config.logging.log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "surveyflow.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            if config.logging.structured {
                tracing_subscriber::fmt()
                    .with_env_filter(env_filter)
                    .json()
                    .with_writer(non_blocking)
                    .init();
            } else {
                tracing_subscriber::fmt()
                    .with_env_filter(env_filter)
                    .with_writer(non_blocking)
                    .init();
            }
            Some(guard)
        }
        None => {
            if config.logging.structured {
                tracing_subscriber::fmt()
                    .with_env_filter(env_filter)
                    .json()
                    .init();
            } else {
                tracing_subscriber::fmt().with_env_filter(env_filter).init();
            }
            None
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load()?;
    let _guard = init_tracing(&config);

    info!("Starting Surveyflow...");

    ConfigLoader::validate(&config)?;
    info!("Configuration loaded successfully");

    let catalog = match &config.catalog.path {
        Some(path) => Arc::new(SurveyCatalog::from_file(path)?),
        None => Arc::new(SurveyCatalog::builtin()),
    };
    info!("Survey catalog loaded: {} surveys", catalog.len());

    let session_store: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new(
        Duration::seconds(config.session.idle_ttl_secs),
    ));
    let marker_store: Arc<dyn CompletionMarkerStore> = Arc::new(MemoryCompletionMarkerStore::new(
        Duration::days(config.marker.ttl_days),
    ));
    info!("Session and completion marker stores initialized");

    let flow_service =
        create_survey_flow_service(catalog.clone(), session_store.clone(), marker_store.clone());
    info!("Survey flow service initialized");

    let metrics = Arc::new(AppMetrics::default());
    let app_state = AppState::new(
        catalog,
        session_store,
        marker_store,
        flow_service,
        metrics.clone(),
    );
    info!("Application state created");

    let observability_state = Arc::new(ObservabilityState::with_metrics(
        env!("CARGO_PKG_VERSION").to_string(),
        metrics,
    ));
    let api_router = api::create_router(app_state);
    let router = create_observability_router(observability_state).merge(api_router);
    info!("API router created with observability endpoints");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
