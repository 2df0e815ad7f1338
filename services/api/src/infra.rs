use function_grade::config::StorageConfig;
use function_grade::employees::{GradingService, JsonFileRepository};
use function_grade::grading::{CatalogError, GradingEngine, Questionnaire, RoleCatalog};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type FileGradingService = GradingService<JsonFileRepository>;

/// Load the configured role catalog, falling back to the built-in table.
pub(crate) fn load_catalog(storage: &StorageConfig) -> Result<RoleCatalog, CatalogError> {
    match &storage.role_catalog {
        Some(path) => {
            let catalog = RoleCatalog::from_path(path)?;
            info!(
                path = %path.display(),
                roles = catalog.roles().len(),
                "loaded custom role catalog"
            );
            Ok(catalog)
        }
        None => Ok(RoleCatalog::standard()),
    }
}

pub(crate) fn grading_engine(storage: &StorageConfig) -> Result<GradingEngine, CatalogError> {
    let catalog = load_catalog(storage)?;
    Ok(GradingEngine::new(Arc::new(catalog), Questionnaire::standard()))
}

pub(crate) fn file_grading_service(
    storage: &StorageConfig,
) -> Result<FileGradingService, CatalogError> {
    let engine = grading_engine(storage)?;
    let repository = Arc::new(JsonFileRepository::new(storage.data_file.clone()));
    Ok(GradingService::new(repository, engine))
}

/// Parse a `KEY=VALUE` questionnaire answer.
pub(crate) fn parse_answer(raw: &str) -> Result<(String, u8), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing question key in '{raw}'"));
    }
    let value = value
        .trim()
        .parse::<u8>()
        .map_err(|err| format!("invalid answer value in '{raw}' ({err})"))?;
    Ok((key.to_string(), value))
}
