//! The client's finite state and its transition function.
//!
//! [`reduce`] is the only way a [`UiState`] changes. It never touches the
//! network or the held input; the controller does that and reports back
//! through [`UiEvent`]s.

use crate::analysis::{AnalysisKind, InputMode};
use crate::result::AnalysisResult;
use derive_more::{Display, From};
use strum_macros::Display as StrumDisplay;

/// Dispatch epoch. A completion is applied only if it carries the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Display, From)]
pub struct Generation(u64);

impl Generation {
    pub fn next(self) -> Self {
        Generation(self.0.wrapping_add(1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum Phase {
    Idle,
    InputReady,
    Processing,
    Resulted,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Resulted(AnalysisResult),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UiState {
    mode: InputMode,
    analysis_kind: AnalysisKind,
    processing: bool,
    outcome: Option<Outcome>,
    input_ready: bool,
    generation: Generation,
}

impl UiState {
    pub fn new(mode: InputMode, analysis_kind: AnalysisKind) -> Self {
        Self {
            mode,
            analysis_kind,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn analysis_kind(&self) -> AnalysisKind {
        self.analysis_kind
    }

    pub fn processing(&self) -> bool {
        self.processing
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.outcome {
            Some(Outcome::Resulted(result)) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Some(Outcome::Failed(message)) => Some(message),
            _ => None,
        }
    }

    /// A file is held (file modes only).
    pub fn input_ready(&self) -> bool {
        self.input_ready
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn phase(&self) -> Phase {
        if self.processing {
            return Phase::Processing;
        }
        match &self.outcome {
            Some(Outcome::Resulted(_)) => Phase::Resulted,
            Some(Outcome::Failed(_)) => Phase::Failed,
            None if self.input_ready => Phase::InputReady,
            None => Phase::Idle,
        }
    }

    pub fn can_run(&self) -> bool {
        !self.processing && (self.mode.is_camera() || self.input_ready)
    }

    pub fn can_clear(&self) -> bool {
        self.outcome.is_some() || self.input_ready
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    ModeSelected(InputMode),
    AnalysisKindSelected(AnalysisKind),
    InputPicked,
    InputRejected(String),
    DispatchStarted,
    DispatchFinished {
        generation: Generation,
        outcome: Result<AnalysisResult, String>,
    },
    Cleared,
}

pub fn reduce(mut state: UiState, event: UiEvent) -> UiState {
    match event {
        UiEvent::ModeSelected(mode) => UiState {
            mode,
            analysis_kind: state.analysis_kind,
            generation: state.generation.next(),
            ..UiState::default()
        },
        UiEvent::AnalysisKindSelected(kind) => {
            state.analysis_kind = kind;
            state
        }
        UiEvent::InputPicked => {
            if state.mode.is_camera() {
                return state;
            }
            state.input_ready = true;
            state.processing = false;
            state.outcome = None;
            state.generation = state.generation.next();
            state
        }
        UiEvent::InputRejected(message) => {
            if !state.processing {
                state.outcome = Some(Outcome::Failed(message));
            }
            state
        }
        UiEvent::DispatchStarted => {
            if !state.can_run() {
                return state;
            }
            state.processing = true;
            state.outcome = None;
            state.generation = state.generation.next();
            state
        }
        UiEvent::DispatchFinished { generation, outcome } => {
            if !state.processing || generation != state.generation {
                return state;
            }
            state.processing = false;
            state.outcome = Some(match outcome {
                Ok(result) => Outcome::Resulted(result),
                Err(message) => Outcome::Failed(message),
            });
            state
        }
        UiEvent::Cleared => UiState {
            mode: state.mode,
            analysis_kind: state.analysis_kind,
            generation: state.generation.next(),
            ..UiState::default()
        },
    }
}
