//! Maps the service's per-endpoint response shapes onto [`AnalysisResult`].
//!
//! `analyze-all` nests each category under `emotion`, `fingers` and
//! `objects`, while the single-purpose endpoints return their record
//! flattened into the envelope. Every section is therefore looked up nested
//! first and then, when the envelope carries that record's marker field, read
//! from the envelope itself.

use crate::analysis::{AnalysisKind, SectionKind};
use crate::result::{
    AnalysisResult, Digit, EmotionReading, EmotionResult, FingerResult, FingerStates,
    HandReading, HandSide, ObjectResult, Probability,
};
use crate::wire::{RawEmotion, RawEmotionEntry, RawFingers, RawHand, RawObjects};
use serde::Deserialize;
use serde_json::{Map, Value};
use strum::IntoEnumIterator;

pub fn normalize(raw: &Value, kind: AnalysisKind) -> Result<AnalysisResult, serde_json::Error> {
    let mut result = AnalysisResult::empty(kind);
    result.annotated_image = raw
        .get("annotated_image")
        .and_then(Value::as_str)
        .filter(|uri| !uri.is_empty())
        .map(str::to_owned);

    if kind.covers(SectionKind::Emotion) {
        result.emotion = emotion_section(raw)?.map(normalize_emotion);
    }
    if kind.covers(SectionKind::Fingers) {
        result.fingers = fingers_section(raw)?.map(normalize_fingers);
    }
    if kind.covers(SectionKind::Objects) {
        result.objects = objects_section(raw)?.map(normalize_objects);
    }

    Ok(result)
}

/// Whether the envelope carries any analysis section at all.
pub fn has_analysis_data(raw: &Value) -> bool {
    ["emotion", "faces_detected", "fingers", "hands_detected", "objects", "count"]
        .iter()
        .any(|field| raw.get(field).is_some_and(|value| !value.is_null()))
}

fn nested<'a>(raw: &'a Value, field: &str) -> Option<&'a Value> {
    raw.get(field).filter(|value| value.is_object())
}

fn emotion_section(raw: &Value) -> Result<Option<RawEmotion>, serde_json::Error> {
    if let Some(emotion) = nested(raw, "emotion") {
        return RawEmotion::deserialize(emotion).map(Some);
    }
    if raw.get("faces_detected").is_some() {
        return RawEmotion::deserialize(raw).map(Some);
    }
    Ok(None)
}

fn fingers_section(raw: &Value) -> Result<Option<RawFingers>, serde_json::Error> {
    if let Some(fingers) = nested(raw, "fingers") {
        return RawFingers::deserialize(fingers).map(Some);
    }
    if raw.get("hands_detected").is_some() {
        return RawFingers::deserialize(raw).map(Some);
    }
    Ok(None)
}

fn objects_section(raw: &Value) -> Result<Option<RawObjects>, serde_json::Error> {
    // count-objects puts its detection list under `objects`, so only an
    // object there is the nested summary.
    if let Some(objects) = nested(raw, "objects") {
        return RawObjects::deserialize(objects).map(Some);
    }
    if raw.get("count").is_some() && raw.get("method").is_some() {
        return RawObjects::deserialize(raw).map(Some);
    }
    Ok(None)
}

fn normalize_emotion(raw: RawEmotion) -> EmotionResult {
    EmotionResult {
        faces_detected: raw.faces_detected,
        emotions: raw.emotions.into_iter().map(normalize_reading).collect(),
        notice: raw.error.filter(|notice| !notice.trim().is_empty()),
    }
}

fn normalize_reading(entry: RawEmotionEntry) -> EmotionReading {
    EmotionReading {
        probabilities: entry.all_probabilities.as_ref().map(rank_probabilities),
        emotion: entry.emotion,
        confidence_pct: entry.confidence,
        quote: entry.quote.filter(|quote| !quote.is_empty()),
    }
}

/// Orders a label→percentage mapping by descending percentage.
///
/// The sort is stable, so equal percentages keep the service's key order.
/// Non-numeric values are dropped.
pub fn rank_probabilities(map: &Map<String, Value>) -> Vec<Probability> {
    let mut ranked: Vec<Probability> = map
        .iter()
        .filter_map(|(label, pct)| {
            pct.as_f64().map(|pct| Probability {
                label: label.clone(),
                pct,
            })
        })
        .collect();
    ranked.sort_by(|a, b| b.pct.total_cmp(&a.pct));
    ranked
}

fn normalize_fingers(raw: RawFingers) -> FingerResult {
    FingerResult {
        hands_detected: raw.hands_detected,
        total_fingers: raw.total_fingers,
        hands: raw.hands.iter().map(normalize_hand).collect(),
        message: raw.message,
    }
}

fn normalize_hand(raw: &RawHand) -> HandReading {
    let mut fingers = FingerStates::default();
    for digit in Digit::iter() {
        let up = raw
            .finger_status
            .get(&digit.to_string())
            .and_then(Value::as_bool)
            .unwrap_or(false);
        fingers.set(digit, up);
    }
    HandReading {
        side: HandSide::from(raw.hand.as_str()),
        fingers,
    }
}

fn normalize_objects(raw: RawObjects) -> ObjectResult {
    ObjectResult {
        count: raw.count,
        method: raw.method,
        message: raw.message,
    }
}
