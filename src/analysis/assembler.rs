use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::analysis::grading::grade;
use crate::analysis::types::{
    AnalysisResult, ContentSnapshot, NormalizedAnalysis, PerformanceMetrics, PillarScores,
};
use crate::extractor::ExtractedContent;

/// Unweighted mean of all six pillars, rounded half up.
pub fn overall_score(scores: &PillarScores) -> u8 {
    let sum: u32 = scores.iter().map(|(_, p)| u32::from(p.score)).sum();
    (f64::from(sum) / 6.0).round() as u8
}

pub fn assemble(
    url: &str,
    normalized: NormalizedAnalysis,
    content: &ExtractedContent,
    started: Instant,
) -> AnalysisResult {
    assemble_at(url, normalized, content, started.elapsed(), Utc::now())
}

pub fn assemble_at(
    url: &str,
    normalized: NormalizedAnalysis,
    content: &ExtractedContent,
    elapsed: Duration,
    now: DateTime<Utc>,
) -> AnalysisResult {
    let overall_score = overall_score(&normalized.pillar_scores);

    AnalysisResult {
        url: url.to_string(),
        timestamp: now,
        overall_score,
        overall_grade: grade(overall_score),
        pillar_scores: normalized.pillar_scores,
        recommendations: normalized.recommendations,
        detected_entities: normalized.detected_entities,
        content_gaps: normalized.content_gaps,
        analysis_time: elapsed.as_secs_f64().round() as u64,
        content_extracted: ContentSnapshot {
            title: content.title.clone(),
            meta_description: content.meta_description.clone(),
            meta_keywords: content.meta_keywords.clone(),
            headings: content.headings.clone(),
            schema_markup: content.schema_markup.clone(),
            performance_metrics: PerformanceMetrics::default(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::normalizer::{fallback_analysis, normalize};
    use crate::analysis::types::{Grade, PillarScore, Status};
    use url::Url;

    fn content() -> ExtractedContent {
        ExtractedContent {
            url: Url::parse("https://example.com").unwrap(),
            title: "Example".into(),
            meta_description: "desc".into(),
            meta_keywords: "kw".into(),
            headings: vec!["H1".into()],
            schema_markup: vec!["{}".into()],
            links: vec![],
            images: vec![],
            text_content: "text".into(),
            html: "<html></html>".into(),
            fetched_at: Utc::now(),
        }
    }

    fn with_scores(scores: [u8; 6]) -> NormalizedAnalysis {
        let mut analysis = fallback_analysis();
        let mut iter = scores.into_iter();
        analysis.pillar_scores = PillarScores::from_fn(|_| {
            let score = iter.next().unwrap_or(0);
            PillarScore {
                score,
                breakdown: String::new(),
                grade: grade(score),
                status: Status::Good,
            }
        });
        analysis
    }

    #[test]
    fn uniform_scores_average_exactly() {
        let scores = with_scores([70; 6]);
        assert_eq!(overall_score(&scores.pillar_scores), 70);

        let result = assemble_at(
            "https://example.com",
            scores,
            &content(),
            Duration::ZERO,
            Utc::now(),
        );
        assert_eq!(result.overall_score, 70);
        assert_eq!(result.overall_grade, Grade::C);
    }

    #[test]
    fn mean_is_rounded() {
        // 500 / 6 = 83.33
        assert_eq!(overall_score(&with_scores([100, 100, 100, 100, 100, 0]).pillar_scores), 83);
        // 87 / 6 = 14.5 rounds up
        assert_eq!(overall_score(&with_scores([87, 0, 0, 0, 0, 0]).pillar_scores), 15);
        assert_eq!(overall_score(&with_scores([100; 6]).pillar_scores), 100);
        assert_eq!(overall_score(&with_scores([0; 6]).pillar_scores), 0);
    }

    #[test]
    fn defaulted_pillars_still_count() {
        // Four pillars absent resolve to 0 and pull the average down.
        let normalized = normalize(r#"{"pillar_scores": {"content_quality": 90, "performance": 90}}"#);
        assert_eq!(overall_score(&normalized.pillar_scores), 30);
    }

    #[test]
    fn overall_grade_is_always_computed() {
        let mut normalized = with_scores([95; 6]);
        normalized.pillar_scores.performance.grade = Grade::F;
        let result = assemble_at("u", normalized, &content(), Duration::ZERO, Utc::now());
        assert_eq!(result.overall_grade, Grade::A);
    }

    #[test]
    fn echoes_content_and_stubs_performance() {
        let now = Utc::now();
        let result = assemble_at(
            "https://example.com/page",
            fallback_analysis(),
            &content(),
            Duration::from_millis(2600),
            now,
        );

        assert_eq!(result.url, "https://example.com/page");
        assert_eq!(result.timestamp, now);
        assert_eq!(result.analysis_time, 3);
        assert_eq!(result.overall_score, 50);
        assert_eq!(result.recommendations.len(), 1);
        assert_eq!(result.content_extracted.title, "Example");
        assert_eq!(result.content_extracted.meta_description, "desc");
        assert_eq!(result.content_extracted.meta_keywords, "kw");
        assert_eq!(result.content_extracted.headings, vec!["H1"]);
        assert_eq!(result.content_extracted.schema_markup, vec!["{}"]);
        assert_eq!(result.content_extracted.performance_metrics.load_time, 0);
        assert!(result.content_extracted.performance_metrics.core_web_vitals.is_empty());
    }

    #[test]
    fn serializes_with_wire_names() {
        let result = assemble_at("u", fallback_analysis(), &content(), Duration::ZERO, Utc::now());
        let json = serde_json::to_value(&result).unwrap();

        for key in [
            "url",
            "timestamp",
            "overallScore",
            "overallGrade",
            "pillarScores",
            "recommendations",
            "detectedEntities",
            "contentGaps",
            "analysisTime",
            "contentExtracted",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["recommendations"][0]["estimatedTime"], "2-3 hours");
        assert_eq!(json["contentExtracted"]["performanceMetrics"]["loadTime"], 0);
        assert!(json["timestamp"].as_str().unwrap().contains('T'));
    }
}
