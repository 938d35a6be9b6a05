use std::sync::Arc;

use crate::analysis::Analyzer;
use crate::config::Config;
use crate::engine::OpenAiClient;
use crate::extractor::HttpContentSource;
use crate::fetcher::Fetcher;

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
    pub engine_configured: bool,
}

impl AppState {
    pub fn new(analyzer: Analyzer, engine_configured: bool) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            engine_configured,
        }
    }

    /// Wire the HTTP content source and the OpenAI client from `config`.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let source = HttpContentSource::new(Fetcher::new(config.fetch_timeout())?);
        let engine = OpenAiClient::new(config.engine().clone())?;
        let analyzer = Analyzer::new(Arc::new(source), Arc::new(engine));
        Ok(Self::new(analyzer, config.engine().is_configured()))
    }
}
