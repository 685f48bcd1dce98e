//! Owns the state, the held input and the dispatcher, and turns user actions
//! into [`UiEvent`]s.
//!
//! The network call is split in two so a UI loop can run it outside the
//! controller: [`UiController::run_analysis`] hands out a ticket, and
//! [`UiController::finish`] applies its outcome if the ticket is still
//! current. [`UiController::analyze`] does both in one await.

use crate::analysis::{AnalysisKind, InputMode};
use crate::config::ClientConfig;
use crate::dispatch::{AnalysisDispatcher, AnalysisRequest, Transport};
use crate::error::{DispatchError, InputError};
use crate::input::{FrameSource, InputSourceManager, MediaBlob};
use crate::result::AnalysisResult;
use crate::state::{Generation, UiEvent, UiState, reduce};
use crate::view::{PreviewView, ViewModel};

/// A started dispatch. Its outcome goes back through [`UiController::finish`].
pub struct DispatchTicket<B> {
    pub generation: Generation,
    pub request: AnalysisRequest<B>,
}

pub struct UiController<B: MediaBlob> {
    state: UiState,
    inputs: InputSourceManager<B>,
    dispatcher: AnalysisDispatcher,
}

impl<B: MediaBlob> UiController<B> {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_selection(config, InputMode::default(), AnalysisKind::default())
    }

    pub fn with_selection(config: ClientConfig, mode: InputMode, kind: AnalysisKind) -> Self {
        Self {
            state: UiState::new(mode, kind),
            inputs: InputSourceManager::new(mode),
            dispatcher: AnalysisDispatcher::new(config),
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn inputs(&self) -> &InputSourceManager<B> {
        &self.inputs
    }

    pub fn dispatcher(&self) -> &AnalysisDispatcher {
        &self.dispatcher
    }

    fn apply(&mut self, event: UiEvent) {
        log::debug!("Applying {:?}", event);
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, event);
    }

    pub fn select_mode(&mut self, mode: InputMode) {
        log::info!("Switching input mode to {}", mode);
        self.inputs.select_mode(mode);
        self.apply(UiEvent::ModeSelected(mode));
    }

    pub fn select_analysis_kind(&mut self, kind: AnalysisKind) {
        self.apply(UiEvent::AnalysisKindSelected(kind));
    }

    /// Holds `blob` as the input. A rejected blob surfaces its message and
    /// leaves the held file as it was.
    pub fn pick_file(&mut self, blob: B) -> Result<(), InputError> {
        match self.inputs.pick_file(blob) {
            Ok(()) => {
                self.apply(UiEvent::InputPicked);
                Ok(())
            }
            Err(err) => {
                log::warn!("Rejected picked file: {}", err);
                self.apply(UiEvent::InputRejected(err.to_string()));
                Err(err)
            }
        }
    }

    pub fn clear(&mut self) {
        self.inputs.clear();
        self.apply(UiEvent::Cleared);
    }

    /// Enters processing and builds the request, or does nothing if a
    /// dispatch is already running or there is no input to send.
    ///
    /// A request that cannot be built (no camera frame) fails immediately and
    /// no ticket is returned.
    pub fn run_analysis<F: FrameSource + ?Sized>(&mut self, frames: &F) -> Option<DispatchTicket<B>> {
        if !self.state.can_run() {
            log::debug!("Ignoring run request in phase {}", self.state.phase());
            return None;
        }

        let kind = self.state.analysis_kind();
        self.apply(UiEvent::DispatchStarted);
        let generation = self.state.generation();

        match self.dispatcher.prepare(&self.inputs, frames, kind) {
            Ok(request) => Some(DispatchTicket { generation, request }),
            Err(err) => {
                self.finish(generation, Err(err));
                None
            }
        }
    }

    /// Applies a dispatch outcome. Returns `false` when the dispatch was
    /// overtaken by a mode switch, a clear or a new pick.
    pub fn finish(
        &mut self,
        generation: Generation,
        outcome: Result<AnalysisResult, DispatchError>,
    ) -> bool {
        if !self.state.processing() || generation != self.state.generation() {
            log::warn!(
                "Dropping stale completion from generation {} (current {})",
                generation,
                self.state.generation()
            );
            return false;
        }
        self.apply(UiEvent::DispatchFinished {
            generation,
            outcome: outcome.map_err(|err| err.to_string()),
        });
        true
    }

    /// Runs one full analysis against `transport`. Returns whether a request
    /// was sent and its outcome applied.
    pub async fn analyze<T, F>(&mut self, transport: &T, frames: &F) -> bool
    where
        T: Transport<Blob = B>,
        F: FrameSource + ?Sized,
    {
        let Some(ticket) = self.run_analysis(frames) else {
            return false;
        };
        let outcome = self.dispatcher.send(transport, ticket.request).await;
        self.finish(ticket.generation, outcome)
    }

    pub fn preview(&self) -> Option<PreviewView> {
        self.inputs.picked().map(|file| PreviewView {
            uri: file.preview_uri().to_string(),
            kind: file.kind(),
            name: file.name(),
        })
    }

    pub fn view(&self) -> ViewModel {
        ViewModel::project(&self.state, self.preview())
    }
}
