pub mod assembler;
pub mod grading;
pub mod keys;
pub mod normalizer;
pub mod prompt;
pub mod service;
pub mod types;

pub use normalizer::{fallback_analysis, normalize};
pub use service::{AnalyzeError, Analyzer};
pub use types::{AnalysisResult, NormalizedAnalysis, Pillar};
