//! Turns the engine's free-form reply into a complete [`NormalizedAnalysis`].
//!
//! Two stages: [`extract_payload`] finds and parses the JSON object and checks
//! its shape, rejecting with a [`Rejection`]; [`coerce`] then fills every field
//! from the first matching candidate key or a fixed default and cannot fail.
//! [`normalize`] joins the two and turns any rejection into the
//! [`fallback_analysis`] value.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::analysis::grading::{grade, status};
use crate::analysis::keys::{self, first_truthy_nested};
use crate::analysis::types::{
    ContentGap, DetectedEntity, Difficulty, EntityType, Grade, NormalizedAnalysis, Pillar,
    PillarScore, PillarScores, Priority, Recommendation, Status,
};

pub const SYNTHESIZED_BREAKDOWN: &str = "AI analysis completed";
pub const NEUTRAL_BREAKDOWN: &str = "Analysis incomplete - using fallback score";
pub const FALLBACK_BREAKDOWN: &str = "Fallback analysis";
const NEUTRAL_SCORE: u8 = 50;

const DEFAULT_IMPACT: u8 = 5;
const DEFAULT_ESTIMATED_TIME: &str = "1-2 hours";
const DEFAULT_STEP: &str = "Implement the suggested changes";
const DEFAULT_DESCRIPTION: &str = "No description provided";
const DEFAULT_CONFIDENCE: f64 = 0.8;
const DEFAULT_CONTEXT: &str = "No context provided";
const DEFAULT_GAP_IMPACT: &str = "Medium impact";

/// Why a reply could not be used at all.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Rejection {
    #[error("no JSON object found in response")]
    NoJsonObject,

    #[error("JSON parse error: {0}")]
    Parse(String),

    #[error("response has no pillar_scores object")]
    MissingPillarScores,
}

/// Parse `raw_text` into a fully populated analysis. Never fails.
pub fn normalize(raw_text: &str) -> NormalizedAnalysis {
    match extract_payload(raw_text) {
        Ok(payload) => {
            let analysis = coerce(&payload);
            let scores: Vec<u8> = analysis.pillar_scores.iter().map(|(_, p)| p.score).collect();
            debug!(
                ?scores,
                recommendations = analysis.recommendations.len(),
                "normalized engine response"
            );
            analysis
        }
        Err(rejection) => {
            warn!(reason = %rejection, "unusable engine response, using fallback analysis");
            fallback_analysis()
        }
    }
}

/// Greedy `{`..`}` span, parsed, with a pillar-scores root present.
pub fn extract_payload(raw_text: &str) -> Result<Map<String, Value>, Rejection> {
    let start = raw_text.find('{').ok_or(Rejection::NoJsonObject)?;
    let end = raw_text.rfind('}').ok_or(Rejection::NoJsonObject)?;
    if end < start {
        return Err(Rejection::NoJsonObject);
    }

    let value: Value = serde_json::from_str(&raw_text[start..=end])
        .map_err(|e| Rejection::Parse(e.to_string()))?;
    // The span starts with '{', so anything that parses is an object.
    let Value::Object(payload) = value else {
        return Err(Rejection::NoJsonObject);
    };

    if keys::PILLAR_SCORES_ROOTS
        .iter()
        .any(|root| payload.get(*root).is_some_and(keys::is_truthy))
    {
        Ok(payload)
    } else {
        Err(Rejection::MissingPillarScores)
    }
}

/// Fill a [`NormalizedAnalysis`] from a shape-checked payload.
pub fn coerce(payload: &Map<String, Value>) -> NormalizedAnalysis {
    let pillar_scores = PillarScores::from_fn(|pillar| {
        let value = first_truthy_nested(payload, &keys::pillar_candidates(pillar))
            .cloned()
            .unwrap_or(Value::from(0));
        let (score, neutral) = pillar_score(&value);
        if neutral {
            warn!(pillar = %pillar, "pillar value unusable, using neutral score");
        }
        score
    });

    NormalizedAnalysis {
        pillar_scores,
        recommendations: keys::array_field(payload, keys::RECOMMENDATIONS)
            .iter()
            .enumerate()
            .map(|(index, value)| recommendation(index, value))
            .collect(),
        detected_entities: keys::array_field(payload, keys::DETECTED_ENTITIES)
            .iter()
            .enumerate()
            .map(|(index, value)| detected_entity(index, value))
            .collect(),
        content_gaps: keys::array_field(payload, keys::CONTENT_GAPS)
            .iter()
            .enumerate()
            .map(|(index, value)| content_gap(index, value))
            .collect(),
    }
}

/// Coerce one pillar value. The flag is set when the neutral score was used.
pub fn pillar_score(value: &Value) -> (PillarScore, bool) {
    match value {
        Value::Number(_) => match keys::as_number(value) {
            Some(n) => {
                let score = clamp_score(n);
                (synthesized(score, SYNTHESIZED_BREAKDOWN.to_string()), false)
            }
            None => (neutral_pillar(), true),
        },
        Value::Object(fields) => match keys::number_field(fields, keys::PILLAR_SCORE) {
            Some(n) => {
                let score = clamp_score(n);
                let breakdown = keys::string_field(fields, keys::PILLAR_BREAKDOWN)
                    .unwrap_or_else(|| SYNTHESIZED_BREAKDOWN.to_string());
                // Supplied labels are kept even when they disagree with the score.
                let supplied_grade = parse_label::<Grade>(fields, keys::PILLAR_GRADE);
                let supplied_status = parse_label::<Status>(fields, keys::PILLAR_STATUS);
                (
                    PillarScore {
                        score,
                        breakdown,
                        grade: supplied_grade.unwrap_or_else(|| grade(score)),
                        status: supplied_status.unwrap_or_else(|| status(score)),
                    },
                    false,
                )
            }
            None => (neutral_pillar(), true),
        },
        _ => (neutral_pillar(), true),
    }
}

fn synthesized(score: u8, breakdown: String) -> PillarScore {
    PillarScore {
        score,
        breakdown,
        grade: grade(score),
        status: status(score),
    }
}

fn neutral_pillar() -> PillarScore {
    PillarScore {
        score: NEUTRAL_SCORE,
        breakdown: NEUTRAL_BREAKDOWN.to_string(),
        grade: Grade::C,
        status: Status::Good,
    }
}

fn clamp_score(n: f64) -> u8 {
    n.round().clamp(0.0, 100.0) as u8
}

/// Canonical pillar for a label; anything unrecognised maps to content quality.
pub fn map_pillar_name(name: &str) -> Pillar {
    match name {
        "Content Quality" | "content_quality" | "contentQuality" => Pillar::ContentQuality,
        "Structured Signals" | "structured_signals" | "structuredSignals" => {
            Pillar::StructuredSignals
        }
        "Authority Signals" | "authority_signals" | "authoritySignals" => {
            Pillar::AuthoritySignals
        }
        "Crawlability" | "crawlability" => Pillar::Crawlability,
        "Performance" | "performance" => Pillar::Performance,
        "Modular Content" | "modular_content" | "modularContent" => Pillar::ModularContent,
        _ => Pillar::ContentQuality,
    }
}

fn parse_label<T: std::str::FromStr>(fields: &Map<String, Value>, candidates: &[&str]) -> Option<T> {
    keys::string_field(fields, candidates)?.parse().ok()
}

// Non-object elements read as an object with no fields.
fn as_fields(value: &Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

fn recommendation(index: usize, value: &Value) -> Recommendation {
    let fields = as_fields(value);

    let implementation = keys::string_list_field(&fields, keys::REC_IMPLEMENTATION)
        .filter(|steps| !steps.is_empty())
        .unwrap_or_else(|| vec![DEFAULT_STEP.to_string()]);

    Recommendation {
        id: format!("rec-{index}"),
        title: keys::string_field(&fields, keys::REC_TITLE)
            .unwrap_or_else(|| format!("Recommendation {}", index + 1)),
        description: keys::string_field(&fields, keys::REC_DESCRIPTION)
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        pillar: keys::string_field(&fields, keys::REC_PILLAR)
            .map(|name| map_pillar_name(&name))
            .unwrap_or(Pillar::ContentQuality),
        priority: parse_label(&fields, keys::REC_PRIORITY).unwrap_or(Priority::Medium),
        impact: keys::number_field(&fields, keys::REC_IMPACT)
            .map(|n| n.round().clamp(1.0, 10.0) as u8)
            .unwrap_or(DEFAULT_IMPACT),
        difficulty: parse_label(&fields, keys::REC_DIFFICULTY).unwrap_or(Difficulty::Medium),
        estimated_time: keys::string_field(&fields, keys::REC_ESTIMATED_TIME)
            .unwrap_or_else(|| DEFAULT_ESTIMATED_TIME.to_string()),
        implementation,
        code_snippets: keys::string_list_field(&fields, keys::REC_CODE_SNIPPETS)
            .unwrap_or_default(),
    }
}

fn detected_entity(index: usize, value: &Value) -> DetectedEntity {
    let fields = as_fields(value);

    DetectedEntity {
        name: keys::string_field(&fields, keys::ENTITY_NAME)
            .unwrap_or_else(|| format!("Entity {}", index + 1)),
        entity_type: parse_label(&fields, keys::ENTITY_TYPE).unwrap_or(EntityType::Concept),
        confidence: keys::number_field(&fields, keys::ENTITY_CONFIDENCE)
            .map(|c| c.clamp(0.0, 1.0))
            .unwrap_or(DEFAULT_CONFIDENCE),
        context: keys::string_field(&fields, keys::ENTITY_CONTEXT)
            .unwrap_or_else(|| DEFAULT_CONTEXT.to_string()),
    }
}

fn content_gap(index: usize, value: &Value) -> ContentGap {
    let fields = as_fields(value);

    ContentGap {
        element: keys::string_field(&fields, keys::GAP_ELEMENT)
            .unwrap_or_else(|| format!("Element {}", index + 1)),
        description: keys::string_field(&fields, keys::GAP_DESCRIPTION)
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        impact: keys::string_field(&fields, keys::GAP_IMPACT)
            .unwrap_or_else(|| DEFAULT_GAP_IMPACT.to_string()),
        priority: parse_label(&fields, keys::GAP_PRIORITY).unwrap_or(Priority::Medium),
    }
}

/// The fixed result used whenever a reply cannot be salvaged.
pub fn fallback_analysis() -> NormalizedAnalysis {
    NormalizedAnalysis {
        pillar_scores: PillarScores::from_fn(|_| PillarScore {
            score: NEUTRAL_SCORE,
            breakdown: FALLBACK_BREAKDOWN.to_string(),
            grade: Grade::C,
            status: Status::Good,
        }),
        recommendations: vec![Recommendation {
            id: "fallback-1".to_string(),
            title: "Improve Content Quality".to_string(),
            description: "Focus on creating comprehensive, well-structured content".to_string(),
            pillar: Pillar::ContentQuality,
            priority: Priority::Medium,
            impact: 7,
            difficulty: Difficulty::Medium,
            estimated_time: "2-3 hours".to_string(),
            implementation: vec![
                "Review and expand content sections".to_string(),
                "Add more detailed explanations".to_string(),
            ],
            code_snippets: Vec::new(),
        }],
        detected_entities: Vec::new(),
        content_gaps: Vec::new(),
    }
}
