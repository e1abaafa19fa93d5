use civic_index::config::IccConfig;
use civic_index::error::AppError;
use civic_index::workflows::icc::{IccService, JsonFileTopicStore};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Service backed by the JSON topic bank named in the configuration.
pub(crate) fn open_service(
    config: &IccConfig,
) -> Result<IccService<JsonFileTopicStore>, AppError> {
    let store = Arc::new(JsonFileTopicStore::new(&config.topic_store_path));
    Ok(IccService::open(store, config)?)
}

pub(crate) fn invalid_data<E>(err: E) -> std::io::Error
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    std::io::Error::new(std::io::ErrorKind::InvalidData, err)
}
