use crate::catalog::SurveyCatalog;
use crate::observability::AppMetrics;
use crate::services::flow::SurveyFlowService;
use crate::storage::{CompletionMarkerStore, SessionStore};
use std::sync::Arc;

/// Application state containing the catalog, stores and flow service
#[derive(Clone)]
pub struct AppState {
    /// Read-only survey catalog
    pub catalog: Arc<SurveyCatalog>,
    /// Ephemeral per-visitor session store
    pub session_store: Arc<dyn SessionStore>,
    /// Durable completion marker store
    pub marker_store: Arc<dyn CompletionMarkerStore>,
    /// Survey flow state machine
    pub flow_service: Arc<dyn SurveyFlowService>,
    /// Application metrics counters
    pub metrics: Arc<AppMetrics>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("catalog", &format!("SurveyCatalog({})", self.catalog.len()))
            .field("session_store", &"Arc<dyn SessionStore>")
            .field("marker_store", &"Arc<dyn CompletionMarkerStore>")
            .field("flow_service", &"Arc<dyn SurveyFlowService>")
            .field("metrics", &"Arc<AppMetrics>")
            .finish()
    }
}

impl AppState {
    /// Create new application state
    pub fn new(
        catalog: Arc<SurveyCatalog>,
        session_store: Arc<dyn SessionStore>,
        marker_store: Arc<dyn CompletionMarkerStore>,
        flow_service: Box<dyn SurveyFlowService>,
        metrics: Arc<AppMetrics>,
    ) -> Self {
        Self {
            catalog,
            session_store,
            marker_store,
            flow_service: Arc::from(flow_service),
            metrics,
        }
    }

    /// Create development application state with the builtin catalog
    /// and in-memory stores
    pub fn development() -> Self {
        use crate::models::marker::DEFAULT_MARKER_TTL_DAYS;
        use crate::services::flow::create_survey_flow_service;
        use crate::storage::{MemoryCompletionMarkerStore, MemorySessionStore};
        use chrono::Duration;

        let catalog = Arc::new(SurveyCatalog::builtin());
        let session_store: Arc<dyn SessionStore> =
            Arc::new(MemorySessionStore::new(Duration::minutes(30)));
        let marker_store: Arc<dyn CompletionMarkerStore> = Arc::new(
            MemoryCompletionMarkerStore::new(Duration::days(DEFAULT_MARKER_TTL_DAYS)),
        );
        let flow_service = create_survey_flow_service(
            catalog.clone(),
            session_store.clone(),
            marker_store.clone(),
        );

        Self::new(
            catalog,
            session_store,
            marker_store,
            flow_service,
            Arc::new(AppMetrics::default()),
        )
    }
}
