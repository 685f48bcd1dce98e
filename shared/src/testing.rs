//! In-memory stand-ins for the browser pieces, used by the unit tests.

use crate::dispatch::{AnalysisRequest, Payload, Transport, TransportResponse};
use crate::error::TransportError;
use crate::input::{FrameSource, MediaBlob, PreviewHandle};
use crate::wire::CameraPayload;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

pub const FRAME: &str = "data:image/jpeg;base64,/9j/4AAQ";

#[derive(Default)]
struct Ledger {
    live: usize,
    created: usize,
    live_at_creation: Vec<usize>,
}

/// Counts preview handles so tests can observe acquisition and release.
#[derive(Clone, Default)]
pub struct PreviewLedger(Rc<RefCell<Ledger>>);

impl PreviewLedger {
    pub fn live(&self) -> usize {
        self.0.borrow().live
    }

    pub fn created(&self) -> usize {
        self.0.borrow().created
    }

    /// How many handles were still alive each time a new one was created.
    pub fn live_at_creation(&self) -> Vec<usize> {
        self.0.borrow().live_at_creation.clone()
    }
}

#[derive(Clone)]
pub struct FakeBlob {
    pub name: String,
    pub mime: String,
    pub ledger: PreviewLedger,
}

impl FakeBlob {
    pub fn new(name: &str, mime: &str, ledger: &PreviewLedger) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            ledger: ledger.clone(),
        }
    }

    pub fn image(ledger: &PreviewLedger) -> Self {
        Self::new("photo.jpg", "image/jpeg", ledger)
    }
}

pub struct FakePreview {
    uri: String,
    ledger: PreviewLedger,
}

impl PreviewHandle for FakePreview {
    fn uri(&self) -> &str {
        &self.uri
    }
}

impl Drop for FakePreview {
    fn drop(&mut self) {
        self.ledger.0.borrow_mut().live -= 1;
    }
}

impl MediaBlob for FakeBlob {
    type Preview = FakePreview;

    fn name(&self) -> String {
        self.name.clone()
    }

    fn mime_type(&self) -> String {
        self.mime.clone()
    }

    fn create_preview(&self) -> FakePreview {
        let mut ledger = self.ledger.0.borrow_mut();
        let live = ledger.live;
        ledger.live_at_creation.push(live);
        ledger.live += 1;
        ledger.created += 1;
        FakePreview {
            uri: format!("blob:fake/{}", ledger.created),
            ledger: self.ledger.clone(),
        }
    }
}

pub struct FakeFrames(pub Option<String>);

impl FakeFrames {
    pub fn ready() -> Self {
        Self(Some(FRAME.to_string()))
    }

    pub fn unavailable() -> Self {
        Self(None)
    }
}

impl FrameSource for FakeFrames {
    fn capture_frame(&self) -> Option<String> {
        self.0.clone()
    }
}

/// What a [`ScriptedTransport`] saw for one POST.
#[derive(Debug, Clone, PartialEq)]
pub struct SentRequest {
    pub url: String,
    pub json: Option<CameraPayload>,
    pub file: Option<(&'static str, String)>,
}

/// Replays canned replies in order and records every request.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: RefCell<VecDeque<Result<TransportResponse, TransportError>>>,
    pub sent: RefCell<Vec<SentRequest>>,
    pub fetched: RefCell<Vec<String>>,
}

impl ScriptedTransport {
    pub fn replying(reply: Result<TransportResponse, TransportError>) -> Self {
        let transport = Self::default();
        transport.replies.borrow_mut().push_back(reply);
        transport
    }

    pub fn sent(&self) -> Vec<SentRequest> {
        self.sent.borrow().clone()
    }

    fn next_reply(&self) -> Result<TransportResponse, TransportError> {
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no scripted reply".into())))
    }
}

impl Transport for ScriptedTransport {
    type Blob = FakeBlob;

    async fn post(
        &self,
        request: &AnalysisRequest<FakeBlob>,
    ) -> Result<TransportResponse, TransportError> {
        let (json, file) = match &request.payload {
            Payload::Json(body) => (Some(body.clone()), None),
            Payload::Multipart { field, blob } => (None, Some((*field, blob.name.clone()))),
        };
        self.sent.borrow_mut().push(SentRequest {
            url: request.url.clone(),
            json,
            file,
        });
        self.next_reply()
    }

    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError> {
        self.fetched.borrow_mut().push(url.to_string());
        self.next_reply()
    }
}

pub fn ok(body: Value) -> Result<TransportResponse, TransportError> {
    Ok(TransportResponse {
        status: 200,
        body: body.to_string(),
    })
}

pub fn status(code: u16, body: &str) -> Result<TransportResponse, TransportError> {
    Ok(TransportResponse {
        status: code,
        body: body.to_string(),
    })
}
