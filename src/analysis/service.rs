use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tracing::{info, instrument};

use crate::analysis::types::AnalysisResult;
use crate::analysis::{assembler, normalizer, prompt};
use crate::engine::{EngineError, ReasoningEngine};
use crate::extractor::ContentSource;
use crate::fetcher::FetchError;

#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("content extraction failed: {0}")]
    Extraction(#[source] FetchError),

    #[error("reasoning engine failed: {0}")]
    Engine(#[source] EngineError),
}

/// Runs one analysis: extract, prompt, complete, normalize, assemble.
#[derive(Clone)]
pub struct Analyzer {
    source: Arc<dyn ContentSource>,
    engine: Arc<dyn ReasoningEngine>,
}

impl Analyzer {
    pub fn new(source: Arc<dyn ContentSource>, engine: Arc<dyn ReasoningEngine>) -> Self {
        Self { source, engine }
    }

    pub fn model(&self) -> &str {
        self.engine.model()
    }

    #[instrument(skip(self), fields(model = %self.engine.model()))]
    pub async fn analyze(&self, url: &str) -> Result<AnalysisResult, AnalyzeError> {
        let started = Instant::now();

        let content = self
            .source
            .extract(url)
            .await
            .map_err(AnalyzeError::Extraction)?;

        let payload = prompt::build(url, &content);
        let reply = self
            .engine
            .complete(&payload)
            .await
            .map_err(AnalyzeError::Engine)?;

        let normalized = normalizer::normalize(&reply);
        let result = assembler::assemble(url, normalized, &content, started);

        info!(
            overall_score = result.overall_score,
            recommendations = result.recommendations.len(),
            elapsed_secs = result.analysis_time,
            "analysis complete"
        );
        Ok(result)
    }
}
