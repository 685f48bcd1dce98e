//! Builds one request per analysis and turns the reply into a result.
//!
//! The camera path sends the frame inside a JSON body with `annotate` next to
//! it; the file path sends the raw file as multipart with `annotate` in the
//! query string. The service expects exactly these two shapes.
//!
//! The dispatcher never retries and never serializes requests itself; the
//! controller's `processing` guard keeps at most one dispatch in flight.

use crate::analysis::AnalysisKind;
use crate::config::ClientConfig;
use crate::error::{DispatchError, TransportError};
use crate::input::{FrameSource, InputSource, InputSourceManager, MediaBlob};
use crate::normalize::{has_analysis_data, normalize};
use crate::result::AnalysisResult;
use crate::wire::{CameraPayload, ServiceHealth, error_field};
use serde_json::Value;
use uuid::Uuid;

/// Multipart field the service reads the upload from.
pub const FILE_FIELD: &str = "file";

pub const HEALTH_PATH: &str = "health";

pub enum Payload<B> {
    Json(CameraPayload),
    Multipart { field: &'static str, blob: B },
}

pub struct AnalysisRequest<B> {
    pub id: Uuid,
    pub kind: AnalysisKind,
    pub url: String,
    pub payload: Payload<B>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The HTTP seam. Implementations report any response they received,
/// whatever its status, and fail only when no response arrived.
#[allow(async_fn_in_trait)]
pub trait Transport {
    type Blob;

    async fn post(
        &self,
        request: &AnalysisRequest<Self::Blob>,
    ) -> Result<TransportResponse, TransportError>;

    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError>;
}

#[derive(Debug, Clone)]
pub struct AnalysisDispatcher {
    config: ClientConfig,
}

impl AnalysisDispatcher {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn endpoint_url(&self, kind: AnalysisKind) -> String {
        self.config.endpoint_url(kind.endpoint())
    }

    /// Builds the request for the current input without sending it.
    pub fn prepare<B, F>(
        &self,
        inputs: &InputSourceManager<B>,
        frames: &F,
        kind: AnalysisKind,
    ) -> Result<AnalysisRequest<B>, DispatchError>
    where
        B: MediaBlob,
        F: FrameSource + ?Sized,
    {
        match inputs.source() {
            InputSource::LiveCamera => {
                let image = inputs.capture_frame(frames)?;
                let payload = Payload::Json(CameraPayload {
                    image,
                    annotate: self.config.annotate,
                });
                Ok(self.request(kind, self.endpoint_url(kind), payload))
            }
            InputSource::PickedFile { file: None, .. } => Err(DispatchError::NoFileSelected),
            InputSource::PickedFile {
                file: Some(file), ..
            } => {
                let url = format!("{}?annotate={}", self.endpoint_url(kind), self.config.annotate);
                let payload = Payload::Multipart {
                    field: FILE_FIELD,
                    blob: file.blob().clone(),
                };
                Ok(self.request(kind, url, payload))
            }
        }
    }

    fn request<B>(&self, kind: AnalysisKind, url: String, payload: Payload<B>) -> AnalysisRequest<B> {
        let request = AnalysisRequest {
            id: Uuid::new_v4(),
            kind,
            url,
            payload,
        };
        log::debug!("Prepared {} request {} for {}", kind, request.id, request.url);
        request
    }

    /// Sends a prepared request and normalizes the reply.
    pub async fn send<T: Transport>(
        &self,
        transport: &T,
        request: AnalysisRequest<T::Blob>,
    ) -> Result<AnalysisResult, DispatchError> {
        log::info!("Dispatching request {} to {}", request.id, request.url);
        let response = match transport.post(&request).await {
            Ok(response) => response,
            Err(err) => {
                log::error!("Request {} never got a response: {}", request.id, err);
                return Err(err.into());
            }
        };

        let outcome = interpret(&response, request.kind);
        match &outcome {
            Ok(_) => log::info!("Request {} completed with status {}", request.id, response.status),
            Err(err) => log::warn!(
                "Request {} failed with status {}: {}",
                request.id,
                response.status,
                err
            ),
        }
        outcome
    }

    /// Captures or reads the current input, sends it and normalizes the reply.
    pub async fn dispatch<T, F>(
        &self,
        transport: &T,
        inputs: &InputSourceManager<T::Blob>,
        frames: &F,
        kind: AnalysisKind,
    ) -> Result<AnalysisResult, DispatchError>
    where
        T: Transport,
        T::Blob: MediaBlob,
        F: FrameSource + ?Sized,
    {
        let request = self.prepare(inputs, frames, kind)?;
        self.send(transport, request).await
    }

    pub async fn check_health<T: Transport>(&self, transport: &T) -> Result<ServiceHealth, DispatchError> {
        let url = self.config.endpoint_url(HEALTH_PATH);
        let response = transport.get(&url).await?;
        if !response.is_success() {
            return Err(failure_from_status(&response));
        }
        Ok(serde_json::from_str(&response.body)?)
    }
}

fn interpret(response: &TransportResponse, kind: AnalysisKind) -> Result<AnalysisResult, DispatchError> {
    if !response.is_success() {
        return Err(failure_from_status(response));
    }

    let raw: Value = serde_json::from_str(&response.body)?;
    if !has_analysis_data(&raw) {
        if let Some(message) = error_field(&raw) {
            return Err(DispatchError::ServiceError(message));
        }
    }
    Ok(normalize(&raw, kind)?)
}

/// Prefers the service's own `error` message over a description of the status.
fn failure_from_status(response: &TransportResponse) -> DispatchError {
    serde_json::from_str::<Value>(&response.body)
        .ok()
        .and_then(|raw| error_field(&raw))
        .map(DispatchError::ServiceError)
        .unwrap_or_else(|| {
            DispatchError::TransportFailure(format!(
                "Request failed with status code {}",
                response.status
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::InputMode;
    use crate::testing::{FRAME, FakeBlob, FakeFrames, PreviewLedger, ScriptedTransport, ok, status};
    use futures::executor::block_on;
    use rstest::rstest;
    use serde_json::json;

    fn dispatcher() -> AnalysisDispatcher {
        AnalysisDispatcher::new(ClientConfig::default().with_base_url("https://vision.test/api"))
    }

    fn camera() -> InputSourceManager<FakeBlob> {
        InputSourceManager::new(InputMode::Camera)
    }

    fn image_with_file(ledger: &PreviewLedger) -> InputSourceManager<FakeBlob> {
        let mut inputs = InputSourceManager::new(InputMode::Image);
        inputs.pick_file(FakeBlob::image(ledger)).unwrap();
        inputs
    }

    #[rstest]
    #[case(AnalysisKind::All, "https://vision.test/api/analyze-all")]
    #[case(AnalysisKind::Emotion, "https://vision.test/api/detect-emotion")]
    #[case(AnalysisKind::Fingers, "https://vision.test/api/count-fingers")]
    #[case(AnalysisKind::Objects, "https://vision.test/api/count-objects")]
    fn camera_requests_carry_frame_in_json(#[case] kind: AnalysisKind, #[case] url: &str) {
        let request = dispatcher()
            .prepare(&camera(), &FakeFrames::ready(), kind)
            .unwrap();

        assert_eq!(request.url, url);
        assert_eq!(request.kind, kind);
        match request.payload {
            Payload::Json(body) => {
                assert_eq!(body.image, FRAME);
                assert!(body.annotate);
            }
            Payload::Multipart { .. } => panic!("camera path must send JSON"),
        }
    }

    #[test]
    fn file_requests_are_multipart_with_annotate_in_query() {
        let ledger = PreviewLedger::default();
        let request = dispatcher()
            .prepare(&image_with_file(&ledger), &FakeFrames::unavailable(), AnalysisKind::Fingers)
            .unwrap();

        assert_eq!(request.url, "https://vision.test/api/count-fingers?annotate=true");
        match request.payload {
            Payload::Multipart { field, blob } => {
                assert_eq!(field, "file");
                assert_eq!(blob.name, "photo.jpg");
            }
            Payload::Json(_) => panic!("file path must send multipart"),
        }
    }

    #[test]
    fn camera_without_frame_fails_before_sending() {
        let transport = ScriptedTransport::default();
        let outcome = block_on(dispatcher().dispatch(
            &transport,
            &camera(),
            &FakeFrames::unavailable(),
            AnalysisKind::Emotion,
        ));

        assert_eq!(outcome, Err(DispatchError::CaptureUnavailable));
        assert!(transport.sent().is_empty());
    }

    #[test]
    fn file_mode_without_file_fails_before_sending() {
        let transport = ScriptedTransport::default();
        let inputs = InputSourceManager::new(InputMode::Video);
        let outcome = block_on(dispatcher().dispatch(
            &transport,
            &inputs,
            &FakeFrames::ready(),
            AnalysisKind::All,
        ));

        assert_eq!(outcome, Err(DispatchError::NoFileSelected));
        assert!(transport.sent().is_empty());
    }

    #[test]
    fn each_request_gets_its_own_id() {
        let d = dispatcher();
        let first = d.prepare(&camera(), &FakeFrames::ready(), AnalysisKind::All).unwrap();
        let second = d.prepare(&camera(), &FakeFrames::ready(), AnalysisKind::All).unwrap();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn successful_reply_is_normalized() {
        let transport = ScriptedTransport::replying(ok(json!({
            "faces_detected": 1,
            "emotions": [{ "emotion": "happy", "confidence": 92 }]
        })));

        let result = block_on(dispatcher().dispatch(
            &transport,
            &camera(),
            &FakeFrames::ready(),
            AnalysisKind::Emotion,
        ))
        .unwrap();

        let emotion = result.emotion.unwrap();
        assert_eq!(emotion.emotions[0].confidence_pct, 92.0);
        assert_eq!(transport.sent().len(), 1);
        assert_eq!(
            transport.sent()[0].url,
            "https://vision.test/api/detect-emotion"
        );
    }

    #[test]
    fn structured_service_error_wins() {
        let ledger = PreviewLedger::default();
        let transport =
            ScriptedTransport::replying(status(500, r#"{"error":"model unavailable"}"#));

        let outcome = block_on(dispatcher().dispatch(
            &transport,
            &image_with_file(&ledger),
            &FakeFrames::unavailable(),
            AnalysisKind::All,
        ));

        assert_eq!(
            outcome,
            Err(DispatchError::ServiceError("model unavailable".into()))
        );
        assert_eq!(transport.sent()[0].file, Some(("file", "photo.jpg".to_string())));
    }

    #[test]
    fn status_without_error_body_is_described() {
        let transport = ScriptedTransport::replying(status(503, "<html>bad gateway</html>"));

        let outcome = block_on(dispatcher().dispatch(
            &transport,
            &camera(),
            &FakeFrames::ready(),
            AnalysisKind::All,
        ));

        assert_eq!(
            outcome.unwrap_err().to_string(),
            "Request failed with status code 503"
        );
    }

    #[rstest]
    #[case("Network error: Failed to fetch")]
    #[case("Failed to read response body: connection reset")]
    fn transport_failure_keeps_its_description(#[case] description: &str) {
        let transport = ScriptedTransport::replying(Err(TransportError(description.into())));

        let outcome = block_on(dispatcher().dispatch(
            &transport,
            &camera(),
            &FakeFrames::ready(),
            AnalysisKind::Objects,
        ));

        assert_eq!(outcome, Err(DispatchError::TransportFailure(description.into())));
    }

    #[test]
    fn blank_transport_failure_is_generic() {
        let transport = ScriptedTransport::replying(Err(TransportError(String::new())));

        let outcome = block_on(dispatcher().dispatch(
            &transport,
            &camera(),
            &FakeFrames::ready(),
            AnalysisKind::Objects,
        ));

        assert_eq!(outcome.unwrap_err().to_string(), "Analysis failed");
    }

    #[test]
    fn success_status_with_only_an_error_is_a_service_error() {
        let transport = ScriptedTransport::replying(ok(json!({ "error": "No image provided" })));

        let outcome = block_on(dispatcher().dispatch(
            &transport,
            &camera(),
            &FakeFrames::ready(),
            AnalysisKind::All,
        ));

        assert_eq!(
            outcome,
            Err(DispatchError::ServiceError("No image provided".into()))
        );
    }

    #[test]
    fn non_json_success_body_is_malformed() {
        let transport = ScriptedTransport::replying(status(200, "not json"));

        let outcome = block_on(dispatcher().dispatch(
            &transport,
            &camera(),
            &FakeFrames::ready(),
            AnalysisKind::All,
        ));

        assert!(matches!(outcome, Err(DispatchError::MalformedResponse(_))));
    }

    #[test]
    fn health_probe_reads_status() {
        let transport = ScriptedTransport::replying(ok(json!({
            "status": "healthy",
            "model": "loaded",
            "features": ["emotion", "fingers", "objects"]
        })));

        let health = block_on(dispatcher().check_health(&transport)).unwrap();

        assert!(health.is_ready());
        assert_eq!(
            transport.fetched.borrow().as_slice(),
            ["https://vision.test/api/health"]
        );
    }

    #[test]
    fn health_probe_reports_unreachable_service() {
        let transport = ScriptedTransport::replying(status(502, ""));
        let err = block_on(dispatcher().check_health(&transport)).unwrap_err();
        assert_eq!(err.to_string(), "Request failed with status code 502");
    }
}
