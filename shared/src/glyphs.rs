//! Static glyphs and captions keyed by result category.

use crate::analysis::SectionKind;

pub const FALLBACK_EMOTION_GLYPH: &str = "🎭";

pub fn emotion_glyph(label: &str) -> &'static str {
    match label {
        "happy" => "😊",
        "sad" => "😢",
        "angry" => "😠",
        "surprise" => "😮",
        "neutral" => "😐",
        "fear" => "😨",
        "disgust" => "🤢",
        _ => FALLBACK_EMOTION_GLYPH,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionHeader {
    pub glyph: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
}

pub fn section_header(kind: SectionKind) -> SectionHeader {
    match kind {
        SectionKind::Emotion => SectionHeader {
            glyph: "😊",
            title: "Emotion Detection",
            subtitle: "FACIAL EXPRESSION ANALYSIS",
        },
        SectionKind::Fingers => SectionHeader {
            glyph: "🖐️",
            title: "Finger Counter",
            subtitle: "HAND LANDMARK DETECTION",
        },
        SectionKind::Objects => SectionHeader {
            glyph: "🔍",
            title: "Object Counter",
            subtitle: "CONTOUR DETECTION",
        },
    }
}

pub fn no_detection_message(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::Emotion => "No faces detected in frame",
        SectionKind::Fingers => "No hands detected in frame",
        SectionKind::Objects => "No objects detected",
    }
}
