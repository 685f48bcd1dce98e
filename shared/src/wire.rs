//! Request and response shapes of the inference service.
//!
//! These mirror the JSON the service speaks and are only ever read by the
//! normalizer and the dispatcher; the rest of the crate works with
//! [`crate::result`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JSON body sent for a camera frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CameraPayload {
    pub image: String,
    pub annotate: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEmotion {
    #[serde(default)]
    pub faces_detected: u32,
    #[serde(default)]
    pub emotions: Vec<RawEmotionEntry>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEmotionEntry {
    pub emotion: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub all_probabilities: Option<Map<String, Value>>,
    #[serde(default)]
    pub quote: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFingers {
    #[serde(default)]
    pub hands_detected: u32,
    #[serde(default)]
    pub total_fingers: u32,
    #[serde(default)]
    pub hands: Vec<RawHand>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawHand {
    #[serde(default)]
    pub hand: String,
    #[serde(default)]
    pub finger_status: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawObjects {
    pub count: u32,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceHealth {
    pub status: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

impl ServiceHealth {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }

    /// Healthy and the emotion model is loaded.
    pub fn is_ready(&self) -> bool {
        self.is_healthy() && self.model.as_deref() == Some("loaded")
    }
}

/// The `error` field of a response envelope, if it is a non-empty string.
pub fn error_field(raw: &Value) -> Option<String> {
    raw.get("error")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_owned)
}
