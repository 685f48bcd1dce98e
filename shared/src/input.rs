//! The currently selected input: the live camera, or one picked file.

use crate::analysis::{InputMode, MediaKind};
use crate::error::{DispatchError, InputError};

/// A browser-local resource handle for previewing a picked file.
///
/// Dropping the handle releases the resource.
pub trait PreviewHandle {
    fn uri(&self) -> &str;
}

pub trait MediaBlob: Clone {
    type Preview: PreviewHandle;

    fn name(&self) -> String;

    fn mime_type(&self) -> String;

    fn create_preview(&self) -> Self::Preview;
}

/// Something that can hand over the latest camera frame as a JPEG data URI.
pub trait FrameSource {
    fn capture_frame(&self) -> Option<String>;
}

pub struct PickedFile<B: MediaBlob> {
    blob: B,
    preview: B::Preview,
    kind: MediaKind,
}

impl<B: MediaBlob> PickedFile<B> {
    pub fn blob(&self) -> &B {
        &self.blob
    }

    pub fn preview_uri(&self) -> &str {
        self.preview.uri()
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn name(&self) -> String {
        self.blob.name()
    }
}

pub enum InputSource<B: MediaBlob> {
    LiveCamera,
    PickedFile {
        kind: MediaKind,
        file: Option<PickedFile<B>>,
    },
}

impl<B: MediaBlob> InputSource<B> {
    fn empty(mode: InputMode) -> Self {
        match mode.media_kind() {
            None => InputSource::LiveCamera,
            Some(kind) => InputSource::PickedFile { kind, file: None },
        }
    }
}

pub struct InputSourceManager<B: MediaBlob> {
    source: InputSource<B>,
}

impl<B: MediaBlob> InputSourceManager<B> {
    pub fn new(mode: InputMode) -> Self {
        Self {
            source: InputSource::empty(mode),
        }
    }

    pub fn source(&self) -> &InputSource<B> {
        &self.source
    }

    pub fn mode(&self) -> InputMode {
        match &self.source {
            InputSource::LiveCamera => InputMode::Camera,
            InputSource::PickedFile {
                kind: MediaKind::Image,
                ..
            } => InputMode::Image,
            InputSource::PickedFile {
                kind: MediaKind::Video,
                ..
            } => InputMode::Video,
        }
    }

    /// Resets to an empty source of `mode`, releasing any held file.
    pub fn select_mode(&mut self, mode: InputMode) {
        self.source = InputSource::empty(mode);
    }

    pub fn capture_frame<F: FrameSource + ?Sized>(&self, frames: &F) -> Result<String, DispatchError> {
        match self.source {
            InputSource::LiveCamera => frames
                .capture_frame()
                .filter(|frame| !frame.is_empty())
                .ok_or(DispatchError::CaptureUnavailable),
            InputSource::PickedFile { .. } => Err(DispatchError::CaptureUnavailable),
        }
    }

    /// Holds `blob` as the current file, replacing any earlier pick.
    ///
    /// A rejected blob leaves the held file untouched.
    pub fn pick_file(&mut self, blob: B) -> Result<(), InputError> {
        let InputSource::PickedFile { kind, file } = &mut self.source else {
            return Err(InputError::NotFileMode);
        };
        let kind = *kind;
        if !kind.accepts(&blob.mime_type()) {
            return Err(InputError::KindMismatch {
                name: blob.name(),
                expected: kind,
            });
        }

        // The old preview must be gone before the next one is acquired.
        drop(file.take());
        let preview = blob.create_preview();
        *file = Some(PickedFile {
            blob,
            preview,
            kind,
        });
        Ok(())
    }

    pub fn clear(&mut self) {
        if let InputSource::PickedFile { file, .. } = &mut self.source {
            *file = None;
        }
    }

    pub fn picked(&self) -> Option<&PickedFile<B>> {
        match &self.source {
            InputSource::PickedFile { file, .. } => file.as_ref(),
            InputSource::LiveCamera => None,
        }
    }

    pub fn has_file(&self) -> bool {
        self.picked().is_some()
    }
}
