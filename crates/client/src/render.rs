//! Rendering of search results into output blocks

use articlesearch_core::config::RenderFormat;
use articlesearch_core::search_models::SearchResult;
use std::sync::Arc;

/// Turns one search result into one output block
pub trait Renderer: Send + Sync {
    /// Render the result at `index` (0-based, in server order)
    fn render(&self, index: usize, result: &SearchResult) -> String;
}

/// Format a similarity score with exactly three decimals
///
/// A value exactly halfway between two thousandths rounds away from zero,
/// matching JavaScript's `toFixed(3)` on the results page.
pub fn format_similarity(similarity: f64) -> String {
    // Exact ties at three decimals are the odd multiples of 1/16
    let sixteenths = similarity * 16.0;
    if sixteenths.is_finite() && sixteenths.fract() == 0.0 && sixteenths % 2.0 != 0.0 {
        let rounded = (similarity * 1000.0).round() / 1000.0;
        return format!("{rounded:.3}");
    }
    format!("{similarity:.3}")
}

/// Escape text for use inside HTML element content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Only `http(s)` links are rendered
fn http_link(result: &SearchResult) -> Option<&str> {
    let link = result.link.as_deref()?.trim();
    let lower = link.to_ascii_lowercase();
    (lower.starts_with("http://") || lower.starts_with("https://")).then_some(link)
}

fn published(result: &SearchResult) -> Option<&str> {
    result.published.as_deref().filter(|p| !p.is_empty())
}

/// Markup for the page's results container
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render(&self, _index: usize, result: &SearchResult) -> String {
        let mut meta = format!(
            "<b>{}</b> • {}",
            escape_html(&result.category),
            escape_html(&result.source)
        );
        if let Some(date) = published(result) {
            meta.push_str(&format!(" • {}", escape_html(date)));
        }

        let mut block = String::from("<div class=\"result-item\">\n");
        block.push_str(&format!("    <h2>{}</h2>\n", escape_html(&result.title)));
        block.push_str(&format!("    <p>{meta}</p>\n"));
        block.push_str(&format!("    <p>{}...</p>\n", escape_html(&result.summary)));
        block.push_str(&format!(
            "    <p>Similarity: <b>{}</b></p>\n",
            format_similarity(result.similarity)
        ));
        if let Some(link) = http_link(result) {
            block.push_str(&format!(
                "    <p><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">Read article</a></p>\n",
                escape_html(link)
            ));
        }
        block.push_str("</div>");
        block
    }
}

/// Numbered plain-text blocks for terminal output
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn render(&self, index: usize, result: &SearchResult) -> String {
        let mut meta = format!("{} • {}", result.category, result.source);
        if let Some(date) = published(result) {
            meta.push_str(&format!(" • {date}"));
        }

        let mut block = format!("{}. {}\n", index + 1, result.title);
        block.push_str(&format!("   {meta}\n"));
        block.push_str(&format!("   {}...\n", result.summary));
        block.push_str(&format!(
            "   Similarity: {}",
            format_similarity(result.similarity)
        ));
        if let Some(link) = http_link(result) {
            block.push_str(&format!("\n   {link}"));
        }
        block
    }
}

/// One compact JSON object per result, for scripting
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, _index: usize, result: &SearchResult) -> String {
        serde_json::to_string(result).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Renderer for the configured output format
pub fn renderer_for(format: RenderFormat) -> Arc<dyn Renderer> {
    match format {
        RenderFormat::Html => Arc::new(HtmlRenderer),
        RenderFormat::Text => Arc::new(TextRenderer),
        RenderFormat::Json => Arc::new(JsonRenderer),
    }
}
