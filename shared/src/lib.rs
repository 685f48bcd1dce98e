//! Client orchestration core for the VisionAI browser app.
//!
//! Everything here is free of browser types so it runs and tests natively;
//! the `frontend` crate supplies the camera, the file blobs and the HTTP
//! transport through the traits in [`input`] and [`dispatch`].

pub mod analysis;
pub mod config;
pub mod controller;
pub mod dispatch;
pub mod error;
pub mod glyphs;
pub mod input;
pub mod normalize;
pub mod result;
pub mod state;
pub mod view;
pub mod wire;

#[cfg(test)]
mod testing;

pub use analysis::{AnalysisKind, InputMode, MediaKind, SectionKind};
pub use config::ClientConfig;
pub use controller::{DispatchTicket, UiController};
pub use dispatch::{AnalysisDispatcher, AnalysisRequest, Payload, Transport, TransportResponse};
pub use error::{DispatchError, InputError, TransportError};
pub use input::{FrameSource, InputSourceManager, MediaBlob, PreviewHandle};
pub use normalize::normalize;
pub use result::AnalysisResult;
pub use state::{Generation, Phase, UiEvent, UiState, reduce};
pub use view::{Section, SectionBody, ViewModel};
pub use wire::ServiceHealth;
