//! Builds the system/user message pair sent to the reasoning engine.

use serde::Serialize;

use crate::extractor::{ExtractedContent, analyze_structure, cleaner::truncate_chars};

/// Characters of page text included in the user message.
pub const PROMPT_TEXT_CHARS: usize = 8000;

const HEADING_DELIMITER: &str = " | ";

const SYSTEM_PROMPT: &str = r#"You are an expert AI-first SEO analyst specializing in Generative Engine Optimization (GEO). Analyze websites for AI search engine optimization across 6 key pillars.

CRITICAL: You MUST provide scores for ALL 6 pillars. Do not skip any.

1. CONTENT QUALITY (0-100):
   - Semantic richness and contextual clarity
   - EEAT compliance (Experience, Expertise, Authority, Trust)
   - Content depth and comprehensiveness
   - Original data and unique insights
   - Content freshness and relevance

2. STRUCTURED SIGNALS (0-100):
   - Schema.org markup implementation
   - Heading hierarchy (H1, H2, H3 structure)
   - JSON-LD structured data
   - FAQ and HowTo markup
   - Structured data completeness

3. AUTHORITY SIGNALS (0-100):
   - Author credentials and expertise indicators
   - Citations and reference quality
   - Trusted external links and backlink profile
   - Domain authority and trust signals
   - Expert positioning and thought leadership

4. CRAWLABILITY & INDEXING (0-100):
   - robots.txt allowlists for AI crawlers
   - XML sitemaps and site structure
   - Fast, JavaScript-light HTML for AI processing
   - Meta tags and indexing directives
   - Content accessibility for AI engines

5. PERFORMANCE (0-100):
   - Page load speed (target: <3 seconds)
   - Core Web Vitals compliance
   - Mobile and desktop responsiveness
   - Performance optimization opportunities
   - User experience metrics

6. MODULAR "LIFTABLE" CONTENT (0-100):
   - Lists and grids for easy AI extraction
   - Answer boxes for direct LLM reuse
   - Pattern libraries for content structure
   - Reusable content blocks for AI consumption
   - Content modularity and organization

REQUIRED OUTPUT FORMAT - You MUST include ALL 6 pillars:
{
  "overall_score": 0-100,
  "pillar_scores": {
    "content_quality": {"score": 0-100, "breakdown": "detailed analysis", "grade": "A/B/C/D/F", "status": "excellent/good/poor"},
    "structured_signals": {"score": 0-100, "breakdown": "detailed analysis", "grade": "A/B/C/D/F", "status": "excellent/good/poor"},
    "authority_signals": {"score": 0-100, "breakdown": "detailed analysis", "grade": "A/B/C/D/F", "status": "excellent/good/poor"},
    "crawlability": {"score": 0-100, "breakdown": "detailed analysis", "grade": "A/B/C/D/F", "status": "excellent/good/poor"},
    "performance": {"score": 0-100, "breakdown": "detailed analysis", "grade": "A/B/C/D/F", "status": "excellent/good/poor"},
    "modular_content": {"score": 0-100, "breakdown": "detailed analysis", "grade": "A/B/C/D/F", "status": "excellent/good/poor"}
  },
  "recommendations": [
    {"title": "...", "description": "...", "pillar": "content_quality", "priority": "high/medium/low", "impact": 1-10, "difficulty": "easy/medium/hard", "estimated_time": "...", "implementation": ["step"], "code_snippets": ["..."]}
  ],
  "detected_entities": [
    {"name": "...", "type": "person/organization/place/product/concept", "confidence": 0-1, "context": "..."}
  ],
  "content_gaps": [
    {"element": "...", "description": "...", "impact": "...", "priority": "high/medium/low"}
  ]
}

Provide 5-8 specific, actionable recommendations."#;

/// The two messages of one engine request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptPayload {
    pub system: String,
    pub user: String,
}

/// Render the fixed instructions plus a digest of `content`.
pub fn build(url: &str, content: &ExtractedContent) -> PromptPayload {
    let structure = analyze_structure(content);

    let user = format!(
        "Analyze this website content for AI-first optimization:\n\
         \n\
         Title: {title}\n\
         Content: {text}\n\
         URL: {url}\n\
         Meta Description: {description}\n\
         Meta Keywords: {keywords}\n\
         Heading Structure: {headings}\n\
         Schema Markup: {schema}\n\
         Content Length: {length} characters\n\
         Links: {links} external links\n\
         Images: {images} images\n\
         \n\
         Please provide a comprehensive analysis following the framework above.",
        title = content.title,
        text = truncate_chars(&content.text_content, PROMPT_TEXT_CHARS),
        description = content.meta_description,
        keywords = content.meta_keywords,
        headings = content.headings.join(HEADING_DELIMITER),
        schema = if structure.has_schema_markup {
            "Present"
        } else {
            "None detected"
        },
        length = structure.content_length,
        links = structure.link_count,
        images = structure.image_count,
    );

    PromptPayload {
        system: SYSTEM_PROMPT.to_string(),
        user,
    }
}
