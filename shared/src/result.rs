use crate::analysis::AnalysisKind;
use strum_macros::{Display, EnumIter};

/// One completed analysis, normalized across every endpoint shape.
///
/// A `None` section means the section was not part of the response for the
/// requested kind. A present section with a zero count is a real "nothing
/// detected" answer from the service.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub kind: AnalysisKind,
    pub emotion: Option<EmotionResult>,
    pub fingers: Option<FingerResult>,
    pub objects: Option<ObjectResult>,
    pub annotated_image: Option<String>,
}

impl AnalysisResult {
    pub fn empty(kind: AnalysisKind) -> Self {
        Self {
            kind,
            emotion: None,
            fingers: None,
            objects: None,
            annotated_image: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmotionResult {
    pub faces_detected: u32,
    pub emotions: Vec<EmotionReading>,
    /// Note from the service that accompanied the payload, e.g. an unloaded model.
    pub notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmotionReading {
    pub emotion: String,
    pub confidence_pct: f64,
    /// Sorted by descending probability.
    pub probabilities: Option<Vec<Probability>>,
    pub quote: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Probability {
    pub label: String,
    pub pct: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FingerResult {
    pub hands_detected: u32,
    pub total_fingers: u32,
    pub hands: Vec<HandReading>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HandReading {
    pub side: HandSide,
    pub fingers: FingerStates,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum HandSide {
    Left,
    Right,
    Unknown,
}

impl From<&str> for HandSide {
    fn from(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "left" => HandSide::Left,
            "right" => HandSide::Right,
            _ => HandSide::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Digit {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Digit {
    fn slot(self) -> usize {
        self as usize
    }
}

/// Up/down state of the five digits of one hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FingerStates([bool; 5]);

impl FingerStates {
    pub fn set(&mut self, digit: Digit, up: bool) {
        self.0[digit.slot()] = up;
    }

    pub fn is_up(&self, digit: Digit) -> bool {
        self.0[digit.slot()]
    }

    pub fn raised(&self) -> u32 {
        self.0.iter().filter(|up| **up).count() as u32
    }

    pub fn iter(&self) -> impl Iterator<Item = (Digit, bool)> + '_ {
        use strum::IntoEnumIterator;
        Digit::iter().map(move |digit| (digit, self.is_up(digit)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectResult {
    pub count: u32,
    pub method: String,
    pub message: Option<String>,
}
