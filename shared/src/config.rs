use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

/// Where the inference service lives and how requests are shaped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_base_url: String,
    /// Ask the service for an annotated overlay image.
    #[serde(default = "default_annotate")]
    pub annotate: bool,
}

fn default_annotate() -> bool {
    true
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            annotate: default_annotate(),
        }
    }
}

impl ClientConfig {
    /// Default config, with the base URL taken from `VISION_API_URL` at build time if set.
    pub fn from_build_env() -> Self {
        let config = Self::default();
        match option_env!("VISION_API_URL") {
            Some(url) => config.with_base_url(url),
            None => config,
        }
    }

    /// Replaces the base URL. Blank values leave the current one in place.
    pub fn with_base_url(mut self, url: &str) -> Self {
        match normalize_base_url(url) {
            Some(url) => self.api_base_url = url,
            None => log::warn!("Ignoring blank API base URL"),
        }
        self
    }

    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

fn normalize_base_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
