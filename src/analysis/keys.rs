//! Candidate-key tables for reading loosely keyed model output.
//!
//! Every field is resolved from an ordered list of keys; the first key whose
//! value is truthy wins. Truthiness follows the usual loose-JSON convention:
//! `null`, `false`, `0`, `NaN` and `""` do not count as present.

use serde_json::{Map, Value};

use crate::analysis::types::Pillar;

pub const PILLAR_SCORES_ROOTS: &[&str] = &["pillar_scores", "pillarScores"];
pub const RECOMMENDATIONS: &[&str] = &["recommendations"];
pub const DETECTED_ENTITIES: &[&str] = &["detected_entities", "detectedEntities"];
pub const CONTENT_GAPS: &[&str] = &["content_gaps", "contentGaps"];

pub const PILLAR_SCORE: &[&str] = &["score"];
pub const PILLAR_BREAKDOWN: &[&str] = &["breakdown"];
pub const PILLAR_GRADE: &[&str] = &["grade"];
pub const PILLAR_STATUS: &[&str] = &["status"];

pub const REC_TITLE: &[&str] = &["title", "name"];
pub const REC_DESCRIPTION: &[&str] = &["description", "desc"];
pub const REC_PILLAR: &[&str] = &["pillar", "pillar_name"];
pub const REC_PRIORITY: &[&str] = &["implementation_priority", "priority"];
pub const REC_IMPACT: &[&str] = &["estimated_impact", "impact"];
pub const REC_DIFFICULTY: &[&str] = &["technical_difficulty", "difficulty"];
pub const REC_ESTIMATED_TIME: &[&str] = &["estimated_time", "estimatedTime", "time"];
pub const REC_IMPLEMENTATION: &[&str] = &["implementation", "steps"];
pub const REC_CODE_SNIPPETS: &[&str] = &["code_snippets", "codeSnippets", "code"];

pub const ENTITY_NAME: &[&str] = &["name"];
pub const ENTITY_TYPE: &[&str] = &["type"];
pub const ENTITY_CONFIDENCE: &[&str] = &["confidence"];
pub const ENTITY_CONTEXT: &[&str] = &["context"];

pub const GAP_ELEMENT: &[&str] = &["element"];
pub const GAP_DESCRIPTION: &[&str] = &["description", "desc"];
pub const GAP_IMPACT: &[&str] = &["impact"];
pub const GAP_PRIORITY: &[&str] = &["priority"];

/// `(root object, key)` pairs tried, in order, for one pillar's value.
pub fn pillar_candidates(pillar: Pillar) -> [(&'static str, &'static str); 4] {
    [
        ("pillar_scores", pillar.snake_key()),
        ("pillar_scores", pillar.as_str()),
        ("pillar_scores", pillar.display_name()),
        ("pillarScores", pillar.as_str()),
    ]
}

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// First truthy value among `keys`.
pub fn first_truthy<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find(|value| is_truthy(value))
}

/// First truthy value among nested `(root, key)` candidates.
pub fn first_truthy_nested<'a>(
    object: &'a Map<String, Value>,
    candidates: &[(&str, &str)],
) -> Option<&'a Value> {
    candidates
        .iter()
        .filter_map(|(root, key)| object.get(*root)?.as_object()?.get(*key))
        .find(|value| is_truthy(value))
}

/// A string field: strings as-is, numbers and booleans rendered.
pub fn string_field(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    match first_truthy(object, keys)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// A numeric field: numbers, or strings that parse as one.
pub fn number_field(object: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    as_number(first_truthy(object, keys)?)
}

pub fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// A list-of-strings field. A lone string becomes a one-element list;
/// non-string elements are rendered as JSON.
pub fn string_list_field(object: &Map<String, Value>, keys: &[&str]) -> Option<Vec<String>> {
    match first_truthy(object, keys)? {
        Value::Array(items) => Some(
            items
                .iter()
                .filter(|item| is_truthy(item))
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
        ),
        Value::String(s) => Some(vec![s.clone()]),
        _ => None,
    }
}

/// The first truthy array among `keys`; anything else reads as empty.
pub fn array_field<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> &'a [Value] {
    first_truthy(object, keys)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
