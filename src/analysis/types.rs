//! Value types of one analysis. Wire names are camelCase.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error for string labels that match none of an enum's variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLabel(pub String);

impl fmt::Display for UnknownLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown label '{}'", self.0)
    }
}

impl std::error::Error for UnknownLabel {}

/// Declares a plain label enum whose `FromStr` is case-insensitive.
macro_rules! label_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        pub enum $name {
            $(#[serde(rename = $label)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownLabel;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $(
                    if s.eq_ignore_ascii_case($label) {
                        return Ok($name::$variant);
                    }
                )+
                Err(UnknownLabel(s.to_string()))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

label_enum! {
    /// One of the six scored optimization dimensions.
    Pillar {
        ContentQuality => "contentQuality",
        StructuredSignals => "structuredSignals",
        AuthoritySignals => "authoritySignals",
        Crawlability => "crawlability",
        Performance => "performance",
        ModularContent => "modularContent",
    }
}

label_enum! {
    Grade { A => "A", B => "B", C => "C", D => "D", F => "F" }
}

label_enum! {
    Status { Excellent => "excellent", Good => "good", Poor => "poor" }
}

label_enum! {
    Priority { High => "high", Medium => "medium", Low => "low" }
}

label_enum! {
    Difficulty { Easy => "easy", Medium => "medium", Hard => "hard" }
}

label_enum! {
    EntityType {
        Person => "person",
        Organization => "organization",
        Place => "place",
        Product => "product",
        Concept => "concept",
    }
}

impl Pillar {
    pub fn snake_key(&self) -> &'static str {
        match self {
            Pillar::ContentQuality => "content_quality",
            Pillar::StructuredSignals => "structured_signals",
            Pillar::AuthoritySignals => "authority_signals",
            Pillar::Crawlability => "crawlability",
            Pillar::Performance => "performance",
            Pillar::ModularContent => "modular_content",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Pillar::ContentQuality => "Content Quality",
            Pillar::StructuredSignals => "Structured Signals",
            Pillar::AuthoritySignals => "Authority Signals",
            Pillar::Crawlability => "Crawlability",
            Pillar::Performance => "Performance",
            Pillar::ModularContent => "Modular Content",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PillarScore {
    /// 0..=100
    pub score: u8,
    pub breakdown: String,
    pub grade: Grade,
    pub status: Status,
}

/// Exactly one score per pillar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PillarScores {
    pub content_quality: PillarScore,
    pub structured_signals: PillarScore,
    pub authority_signals: PillarScore,
    pub crawlability: PillarScore,
    pub performance: PillarScore,
    pub modular_content: PillarScore,
}

impl PillarScores {
    pub fn from_fn(mut f: impl FnMut(Pillar) -> PillarScore) -> Self {
        Self {
            content_quality: f(Pillar::ContentQuality),
            structured_signals: f(Pillar::StructuredSignals),
            authority_signals: f(Pillar::AuthoritySignals),
            crawlability: f(Pillar::Crawlability),
            performance: f(Pillar::Performance),
            modular_content: f(Pillar::ModularContent),
        }
    }

    pub fn get(&self, pillar: Pillar) -> &PillarScore {
        match pillar {
            Pillar::ContentQuality => &self.content_quality,
            Pillar::StructuredSignals => &self.structured_signals,
            Pillar::AuthoritySignals => &self.authority_signals,
            Pillar::Crawlability => &self.crawlability,
            Pillar::Performance => &self.performance,
            Pillar::ModularContent => &self.modular_content,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pillar, &PillarScore)> {
        Pillar::ALL.iter().map(move |&p| (p, self.get(p)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: String,
    pub title: String,
    pub description: String,
    pub pillar: Pillar,
    pub priority: Priority,
    /// 1..=10
    pub impact: u8,
    pub difficulty: Difficulty,
    pub estimated_time: String,
    /// Never empty.
    pub implementation: Vec<String>,
    pub code_snippets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DetectedEntity {
    pub name: String,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    /// 0.0..=1.0
    pub confidence: f64,
    pub context: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ContentGap {
    pub element: String,
    pub description: String,
    pub impact: String,
    pub priority: Priority,
}

/// What the normalizer hands to the assembler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedAnalysis {
    pub pillar_scores: PillarScores,
    pub recommendations: Vec<Recommendation>,
    pub detected_entities: Vec<DetectedEntity>,
    pub content_gaps: Vec<ContentGap>,
}

/// Placeholder; nothing is measured.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub load_time: u64,
    pub core_web_vitals: BTreeMap<String, f64>,
}

/// Extraction metadata echoed back for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentSnapshot {
    pub title: String,
    pub meta_description: String,
    pub meta_keywords: String,
    pub headings: Vec<String>,
    pub schema_markup: Vec<String>,
    pub performance_metrics: PerformanceMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub url: String,
    pub timestamp: DateTime<Utc>,
    pub overall_score: u8,
    pub overall_grade: Grade,
    pub pillar_scores: PillarScores,
    pub recommendations: Vec<Recommendation>,
    pub detected_entities: Vec<DetectedEntity>,
    pub content_gaps: Vec<ContentGap>,
    /// Whole seconds.
    pub analysis_time: u64,
    pub content_extracted: ContentSnapshot,
}
