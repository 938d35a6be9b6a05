use scraper::{ElementRef, Html, Selector};

pub const NO_TITLE: &str = "No title found";

const CONTENT_SELECTORS: [&str; 8] = [
    "article",
    "main",
    "[role='main']",
    ".content",
    ".post-content",
    ".entry-content",
    "#content",
    "#main",
];

const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Everything the reader pulls out of a document, before caps are applied.
#[derive(Debug, Default)]
pub struct PageSignals {
    pub title: String,
    pub meta_description: String,
    pub meta_keywords: String,
    pub headings: Vec<String>,
    pub schema_markup: Vec<String>,
    pub links: Vec<String>,
    pub images: Vec<String>,
    /// Main-content text with whitespace untouched.
    pub main_text: String,
}

pub fn read(html: &str) -> PageSignals {
    let document = Html::parse_document(html);

    PageSignals {
        title: extract_title(&document),
        meta_description: meta_content(&document, "meta[name='description']")
            .or_else(|| meta_content(&document, "meta[property='og:description']"))
            .unwrap_or_default(),
        meta_keywords: meta_content(&document, "meta[name='keywords']").unwrap_or_default(),
        headings: extract_headings(&document),
        schema_markup: extract_schema_markup(&document),
        links: attr_values(&document, "a[href]", "href")
            .into_iter()
            .filter(|href| href.starts_with("http"))
            .collect(),
        images: attr_values(&document, "img[src]", "src")
            .into_iter()
            .filter(|src| !src.is_empty())
            .collect(),
        main_text: extract_main_text(&document),
    }
}

fn extract_title(document: &Html) -> String {
    ["title", "h1"]
        .into_iter()
        .find_map(|css| {
            let selector = Selector::parse(css).ok()?;
            let element = document.select(&selector).next()?;
            let text = element.text().collect::<String>().trim().to_string();
            (!text.is_empty()).then_some(text)
        })
        .unwrap_or_else(|| NO_TITLE.to_string())
}

fn meta_content(document: &Html, css: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    document
        .select(&selector)
        .next()?
        .value()
        .attr("content")
        .map(str::to_string)
        .filter(|content| !content.is_empty())
}

fn extract_headings(document: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse("h1, h2, h3, h4, h5, h6") else {
        return Vec::new();
    };
    document
        .select(&selector)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect()
}

fn extract_schema_markup(document: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse("script[type='application/ld+json']") else {
        return Vec::new();
    };
    document
        .select(&selector)
        .filter_map(|element| {
            let raw = element.text().collect::<String>();
            // Invalid blocks are dropped
            let parsed: serde_json::Value = serde_json::from_str(&raw).ok()?;
            serde_json::to_string_pretty(&parsed).ok()
        })
        .collect()
}

fn attr_values(document: &Html, css: &str, attr: &str) -> Vec<String> {
    let Ok(selector) = Selector::parse(css) else {
        return Vec::new();
    };
    document
        .select(&selector)
        .filter_map(|element| element.value().attr(attr))
        .map(str::to_string)
        .collect()
}

fn extract_main_text(document: &Html) -> String {
    for css in CONTENT_SELECTORS {
        if let Ok(selector) = Selector::parse(css)
            && let Some(element) = document.select(&selector).next()
        {
            let text = visible_text(element);
            if !text.trim().is_empty() {
                return text;
            }
        }
    }

    // Last resort: the whole body
    Selector::parse("body")
        .ok()
        .and_then(|selector| document.select(&selector).next().map(visible_text))
        .unwrap_or_default()
}

fn visible_text(element: ElementRef) -> String {
    let mut out = String::new();
    for node in element.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node
            .parent()
            .and_then(|parent| parent.value().as_element().map(|e| e.name()))
            .is_some_and(|name| HIDDEN_ELEMENTS.contains(&name));
        if !hidden {
            out.push_str(text);
        }
    }
    out
}
