use gloo_storage::{LocalStorage, Storage};
use vision_shared::{AnalysisKind, ClientConfig};
use web_sys::UrlSearchParams;

const API_URL_KEY: &str = "visionai.api_base_url";
const ANALYSIS_KIND_KEY: &str = "visionai.analysis_kind";
const API_QUERY_PARAM: &str = "api";

/// Build-time default, then the stored override, then `?api=` (which is stored).
pub fn load_config() -> ClientConfig {
    let mut config = ClientConfig::from_build_env();

    if let Ok(stored) = LocalStorage::get::<String>(API_URL_KEY) {
        config = config.with_base_url(&stored);
    }

    if let Some(from_query) = query_param(API_QUERY_PARAM) {
        config = config.with_base_url(&from_query);
        if let Err(e) = LocalStorage::set(API_URL_KEY, &config.api_base_url) {
            log::warn!("Could not persist API base URL: {}", e);
        }
    }

    log::info!("Using analysis service at {}", config.api_base_url);
    config
}

pub fn load_analysis_kind() -> AnalysisKind {
    LocalStorage::get(ANALYSIS_KIND_KEY).unwrap_or_default()
}

pub fn store_analysis_kind(kind: AnalysisKind) {
    if let Err(e) = LocalStorage::set(ANALYSIS_KIND_KEY, kind) {
        log::warn!("Could not persist analysis kind: {}", e);
    }
}

fn query_param(name: &str) -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    UrlSearchParams::new_with_str(&search).ok()?.get(name)
}
