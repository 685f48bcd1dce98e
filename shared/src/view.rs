//! Render model derived from [`UiState`]; holds no state of its own.

use crate::analysis::{AnalysisKind, InputMode, MediaKind, SectionKind};
use crate::glyphs::{SectionHeader, emotion_glyph, no_detection_message, section_header};
use crate::result::{AnalysisResult, Digit, EmotionReading, FingerResult, ObjectResult};
use crate::state::{Phase, UiState};

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewView {
    pub uri: String,
    pub kind: MediaKind,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub mode: InputMode,
    pub analysis_kind: AnalysisKind,
    pub phase: Phase,
    pub processing: bool,
    pub can_run: bool,
    pub can_clear: bool,
    pub preview: Option<PreviewView>,
    pub error: Option<String>,
    pub annotated_image: Option<String>,
    /// Empty unless a result is held.
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub kind: SectionKind,
    pub header: SectionHeader,
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionBody {
    Emotion(Vec<EmotionCard>),
    Fingers(FingerCard),
    Objects(ObjectCard),
    NoDetection {
        message: &'static str,
        notice: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmotionCard {
    pub glyph: &'static str,
    pub label: String,
    pub confidence: String,
    pub bars: Vec<ProbabilityBar>,
    pub quote: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityBar {
    pub label: String,
    pub pct: f64,
    pub value: String,
    /// The bar of the winning label.
    pub top: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FingerCard {
    pub total: u32,
    pub hands: Vec<HandRow>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HandRow {
    pub label: String,
    pub raised: u32,
    pub digits: Vec<(Digit, bool)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectCard {
    pub count: u32,
    pub method: String,
    pub message: Option<String>,
}

impl ViewModel {
    pub fn project(state: &UiState, preview: Option<PreviewView>) -> Self {
        let result = state.result();
        Self {
            mode: state.mode(),
            analysis_kind: state.analysis_kind(),
            phase: state.phase(),
            processing: state.processing(),
            can_run: state.can_run(),
            can_clear: state.can_clear(),
            preview,
            error: state.error().map(str::to_owned),
            annotated_image: result.and_then(|result| result.annotated_image.clone()),
            sections: result.map(sections).unwrap_or_default(),
        }
    }

    pub fn has_result(&self) -> bool {
        self.phase == Phase::Resulted
    }
}

/// Sections follow the kind the result was requested with, not the selector.
/// A category the response did not carry is left out; one it carried with
/// nothing found renders the no-detection caption.
fn sections(result: &AnalysisResult) -> Vec<Section> {
    result
        .kind
        .sections()
        .filter_map(|kind| {
            section_body(kind, result).map(|body| Section {
                kind,
                header: section_header(kind),
                body,
            })
        })
        .collect()
}

fn section_body(kind: SectionKind, result: &AnalysisResult) -> Option<SectionBody> {
    let body = match kind {
        SectionKind::Emotion => {
            let emotion = result.emotion.as_ref()?;
            if emotion.faces_detected > 0 {
                SectionBody::Emotion(emotion.emotions.iter().map(emotion_card).collect())
            } else {
                no_detection(kind, emotion.notice.clone())
            }
        }
        SectionKind::Fingers => {
            let fingers = result.fingers.as_ref()?;
            if fingers.hands_detected > 0 {
                SectionBody::Fingers(finger_card(fingers))
            } else {
                no_detection(kind, None)
            }
        }
        SectionKind::Objects => {
            let objects = result.objects.as_ref()?;
            if objects.count > 0 {
                SectionBody::Objects(object_card(objects))
            } else {
                no_detection(kind, objects.message.clone())
            }
        }
    };
    Some(body)
}

fn no_detection(kind: SectionKind, notice: Option<String>) -> SectionBody {
    SectionBody::NoDetection {
        message: no_detection_message(kind),
        notice,
    }
}

fn emotion_card(reading: &EmotionReading) -> EmotionCard {
    let bars = reading
        .probabilities
        .iter()
        .flatten()
        .map(|probability| ProbabilityBar {
            label: probability.label.clone(),
            pct: probability.pct.clamp(0.0, 100.0),
            value: percent(probability.pct),
            top: probability.label == reading.emotion,
        })
        .collect();

    EmotionCard {
        glyph: emotion_glyph(&reading.emotion),
        label: reading.emotion.clone(),
        confidence: percent(reading.confidence_pct),
        bars,
        quote: reading.quote.clone(),
    }
}

fn finger_card(fingers: &FingerResult) -> FingerCard {
    FingerCard {
        total: fingers.total_fingers,
        hands: fingers
            .hands
            .iter()
            .map(|hand| HandRow {
                label: format!("{} hand", hand.side),
                raised: hand.fingers.raised(),
                digits: hand.fingers.iter().collect(),
            })
            .collect(),
        message: fingers.message.clone(),
    }
}

fn object_card(objects: &ObjectResult) -> ObjectCard {
    ObjectCard {
        count: objects.count,
        method: objects.method.clone(),
        message: objects.message.clone(),
    }
}

fn percent(value: f64) -> String {
    format!("{value}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyphs::FALLBACK_EMOTION_GLYPH;
    use crate::normalize::normalize;
    use crate::state::{UiEvent, reduce};
    use serde_json::{Value, json};

    fn resulted(kind: AnalysisKind, raw: Value) -> UiState {
        let result = normalize(&raw, kind).unwrap();
        let state = reduce(UiState::new(InputMode::Camera, kind), UiEvent::DispatchStarted);
        let generation = state.generation();
        reduce(
            state,
            UiEvent::DispatchFinished {
                generation,
                outcome: Ok(result),
            },
        )
    }

    #[test]
    fn idle_has_no_sections() {
        let view = ViewModel::project(&UiState::default(), None);
        assert!(view.sections.is_empty());
        assert!(view.error.is_none());
        assert!(view.can_run);
        assert!(!view.has_result());
    }

    #[test]
    fn zero_hands_renders_no_detection() {
        let state = resulted(
            AnalysisKind::All,
            json!({
                "emotion": { "faces_detected": 0, "emotions": [] },
                "fingers": { "hands_detected": 0, "total_fingers": 0, "hands": [] },
                "objects": { "count": 0, "method": "contour" }
            }),
        );

        let view = ViewModel::project(&state, None);

        assert_eq!(view.sections.len(), 3);
        assert_eq!(
            view.sections[1].body,
            SectionBody::NoDetection {
                message: "No hands detected in frame",
                notice: None
            }
        );
        assert_eq!(
            view.sections[2].body,
            SectionBody::NoDetection {
                message: "No objects detected",
                notice: None
            }
        );
    }

    #[test]
    fn emotion_only_hides_other_sections() {
        let state = resulted(
            AnalysisKind::Emotion,
            json!({ "faces_detected": 1, "emotions": [{ "emotion": "happy", "confidence": 92 }] }),
        );

        let view = ViewModel::project(&state, None);

        assert_eq!(view.sections.len(), 1);
        assert_eq!(view.sections[0].kind, SectionKind::Emotion);
        match &view.sections[0].body {
            SectionBody::Emotion(cards) => {
                assert_eq!(cards.len(), 1);
                assert_eq!(cards[0].glyph, "😊");
                assert_eq!(cards[0].confidence, "92%");
            }
            other => panic!("expected emotion cards, got {other:?}"),
        }
    }

    #[test]
    fn unknown_emotion_gets_fallback_glyph() {
        let state = resulted(
            AnalysisKind::Emotion,
            json!({ "faces_detected": 1, "emotions": [{ "emotion": "bored", "confidence": 40.5 }] }),
        );

        let view = ViewModel::project(&state, None);

        match &view.sections[0].body {
            SectionBody::Emotion(cards) => {
                assert_eq!(cards[0].glyph, FALLBACK_EMOTION_GLYPH);
                assert_eq!(cards[0].label, "bored");
                assert_eq!(cards[0].confidence, "40.5%");
            }
            other => panic!("expected emotion cards, got {other:?}"),
        }
    }

    #[test]
    fn probability_bars_mark_the_winner() {
        let state = resulted(
            AnalysisKind::Emotion,
            json!({
                "faces_detected": 1,
                "emotions": [{
                    "emotion": "sad",
                    "confidence": 70,
                    "all_probabilities": { "happy": 10, "sad": 70, "neutral": 20 }
                }]
            }),
        );

        let view = ViewModel::project(&state, None);

        let SectionBody::Emotion(cards) = &view.sections[0].body else {
            panic!("expected emotion cards");
        };
        let labels: Vec<_> = cards[0].bars.iter().map(|bar| bar.label.as_str()).collect();
        assert_eq!(labels, ["sad", "neutral", "happy"]);
        assert!(cards[0].bars[0].top);
        assert!(!cards[0].bars[1].top);
    }

    #[test]
    fn fingers_card_lists_hands() {
        let state = resulted(
            AnalysisKind::Fingers,
            json!({
                "hands_detected": 1,
                "total_fingers": 1,
                "hands": [{ "hand": "Left", "finger_status": { "Index": true } }],
                "message": "Just one!"
            }),
        );

        let view = ViewModel::project(&state, None);

        let SectionBody::Fingers(card) = &view.sections[0].body else {
            panic!("expected finger card");
        };
        assert_eq!(card.total, 1);
        assert_eq!(card.hands[0].label, "Left hand");
        assert_eq!(card.hands[0].raised, 1);
        assert_eq!(card.hands[0].digits[1], (Digit::Index, true));
        assert_eq!(card.message.as_deref(), Some("Just one!"));
    }

    #[test]
    fn absent_sections_are_hidden_under_all() {
        let state = resulted(
            AnalysisKind::All,
            json!({ "emotion": { "faces_detected": 0, "emotions": [], "error": "Model not loaded" } }),
        );

        let view = ViewModel::project(&state, None);

        assert_eq!(view.sections.len(), 1);
        assert_eq!(
            view.sections[0].body,
            SectionBody::NoDetection {
                message: "No faces detected in frame",
                notice: Some("Model not loaded".into())
            }
        );
    }

    #[test]
    fn missing_fingers_differs_from_zero_hands() {
        let missing = resulted(
            AnalysisKind::All,
            json!({ "emotion": { "faces_detected": 0, "emotions": [] } }),
        );
        let zero = resulted(
            AnalysisKind::All,
            json!({
                "emotion": { "faces_detected": 0, "emotions": [] },
                "fingers": { "hands_detected": 0, "total_fingers": 0, "hands": [] }
            }),
        );

        let kinds = |state: &UiState| -> Vec<SectionKind> {
            ViewModel::project(state, None)
                .sections
                .iter()
                .map(|section| section.kind)
                .collect()
        };

        assert_eq!(kinds(&missing), [SectionKind::Emotion]);
        assert_eq!(kinds(&zero), [SectionKind::Emotion, SectionKind::Fingers]);
        assert_eq!(
            ViewModel::project(&zero, None).sections[1].body,
            SectionBody::NoDetection {
                message: "No hands detected in frame",
                notice: None
            }
        );
    }

    #[test]
    fn counted_objects_render_a_card() {
        let state = resulted(
            AnalysisKind::Objects,
            json!({ "count": 3, "method": "contour", "message": "Found 3" }),
        );

        let view = ViewModel::project(&state, None);

        let SectionBody::Objects(card) = &view.sections[0].body else {
            panic!("expected object card");
        };
        assert_eq!(card.count, 3);
        assert_eq!(card.method, "contour");
        assert_eq!(card.message.as_deref(), Some("Found 3"));
    }

    #[test]
    fn sections_follow_the_result_kind() {
        let state = resulted(AnalysisKind::Objects, json!({ "count": 2, "method": "contour" }));
        let state = reduce(state, UiEvent::AnalysisKindSelected(AnalysisKind::All));

        let view = ViewModel::project(&state, None);

        assert_eq!(view.analysis_kind, AnalysisKind::All);
        assert_eq!(view.sections.len(), 1);
        assert_eq!(view.sections[0].kind, SectionKind::Objects);
    }

    #[test]
    fn error_and_preview_pass_through() {
        let state = reduce(
            UiState::new(InputMode::Image, AnalysisKind::All),
            UiEvent::InputRejected("bad file".into()),
        );
        let preview = PreviewView {
            uri: "blob:preview".into(),
            kind: MediaKind::Image,
            name: "photo.jpg".into(),
        };

        let view = ViewModel::project(&state, Some(preview.clone()));

        assert_eq!(view.error.as_deref(), Some("bad file"));
        assert_eq!(view.preview, Some(preview));
        assert!(view.sections.is_empty());
    }
}
