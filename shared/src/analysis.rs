use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Where the analyzed pixels come from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum InputMode {
    #[default]
    Camera,
    Image,
    Video,
}

impl InputMode {
    pub fn is_camera(self) -> bool {
        matches!(self, InputMode::Camera)
    }

    /// The kind of file this mode accepts, `None` for the live camera.
    pub fn media_kind(self) -> Option<MediaKind> {
        match self {
            InputMode::Camera => None,
            InputMode::Image => Some(MediaKind::Image),
            InputMode::Video => Some(MediaKind::Video),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn mime_prefix(self) -> &'static str {
        match self {
            MediaKind::Image => "image/",
            MediaKind::Video => "video/",
        }
    }

    pub fn accepts(self, mime_type: &str) -> bool {
        mime_type.starts_with(self.mime_prefix())
    }
}

/// Which class of result the user asked the service for.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AnalysisKind {
    #[default]
    All,
    Emotion,
    Fingers,
    Objects,
}

impl AnalysisKind {
    /// Path segment of the service endpoint, relative to the API base URL.
    pub fn endpoint(self) -> &'static str {
        match self {
            AnalysisKind::All => "analyze-all",
            AnalysisKind::Emotion => "detect-emotion",
            AnalysisKind::Fingers => "count-fingers",
            AnalysisKind::Objects => "count-objects",
        }
    }

    pub fn covers(self, section: SectionKind) -> bool {
        match self {
            AnalysisKind::All => true,
            AnalysisKind::Emotion => section == SectionKind::Emotion,
            AnalysisKind::Fingers => section == SectionKind::Fingers,
            AnalysisKind::Objects => section == SectionKind::Objects,
        }
    }

    /// Result sections this kind renders, in display order.
    pub fn sections(self) -> impl Iterator<Item = SectionKind> {
        use strum::IntoEnumIterator;
        SectionKind::iter().filter(move |section| self.covers(*section))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum SectionKind {
    Emotion,
    Fingers,
    Objects,
}
