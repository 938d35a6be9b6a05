use crate::extractor::model::{ContentStructure, ExtractedContent, HeadingLengths};

const SHORT_HEADING: usize = 50;
const LONG_HEADING: usize = 100;
// More headings than this counts as structured even without schema markup.
const STRUCTURED_HEADING_COUNT: usize = 3;

pub fn analyze_structure(content: &ExtractedContent) -> ContentStructure {
    let has_schema_markup = !content.schema_markup.is_empty();

    ContentStructure {
        has_title: !content.title.is_empty(),
        has_meta_description: !content.meta_description.is_empty(),
        has_meta_keywords: !content.meta_keywords.is_empty(),
        heading_count: content.headings.len(),
        heading_lengths: heading_lengths(&content.headings),
        has_schema_markup,
        link_count: content.links.len(),
        image_count: content.images.len(),
        content_length: content.text_content.chars().count(),
        has_structured_content: has_schema_markup
            || content.headings.len() > STRUCTURED_HEADING_COUNT,
    }
}

fn heading_lengths(headings: &[String]) -> HeadingLengths {
    headings
        .iter()
        .fold(HeadingLengths::default(), |mut acc, heading| {
            match heading.chars().count() {
                n if n < SHORT_HEADING => acc.short += 1,
                n if n < LONG_HEADING => acc.medium += 1,
                _ => acc.long += 1,
            }
            acc
        })
}
