//! PDF content extraction.
//!
//! Wraps `pdf-extract` and enriches the raw text with a page count, a
//! whitespace-run table heuristic, deduplicated URLs, and a metadata map.
//! Extraction quality scoring and language detection live in the submodules.

pub mod confidence;
pub mod language;

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("failed to extract text from PDF: {0}")]
    Unreadable(String),
}

/// Enriched content pulled from an uploaded PDF.
#[derive(Debug, Clone)]
pub struct PdfContent {
    pub text: String,
    pub page_count: usize,
    pub tables: Vec<Vec<Vec<String>>>,
    pub urls: Vec<String>,
    pub metadata: BTreeMap<String, String>,
}

/// Extracts text and derived structure from raw PDF bytes.
pub fn extract(bytes: &[u8]) -> Result<PdfContent, ExtractionError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractionError::Unreadable(e.to_string()))?;

    let page_count = count_pages(bytes);
    let tables = detect_tables(&text);
    let urls = collect_urls(&text);

    let mut metadata = BTreeMap::new();
    metadata.insert("extractor".to_string(), "pdf-extract".to_string());
    metadata.insert("char_count".to_string(), text.chars().count().to_string());
    metadata.insert("page_count".to_string(), page_count.to_string());

    debug!(
        chars = text.len(),
        page_count,
        tables = tables.len(),
        urls = urls.len(),
        "pdf extraction complete"
    );

    Ok(PdfContent {
        text,
        page_count,
        tables,
        urls,
        metadata,
    })
}

/// Counts `/Type /Page` objects in the raw byte stream (excluding the
/// `/Pages` tree node). Heuristic, but stable across producers; floors at 1.
fn count_pages(bytes: &[u8]) -> usize {
    const MARKER: &[u8] = b"/Type";
    let mut count = 0usize;
    let mut i = 0usize;

    while i + MARKER.len() < bytes.len() {
        if &bytes[i..i + MARKER.len()] != MARKER {
            i += 1;
            continue;
        }
        let mut j = i + MARKER.len();
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        if bytes[j..].starts_with(b"/Pages") {
            i = j;
            continue;
        }
        if bytes[j..].starts_with(b"/Page") {
            count += 1;
            i = j + b"/Page".len();
        } else {
            i = j;
        }
    }

    count.max(1)
}

/// Groups consecutive lines that split into 2+ cells (runs of two or more
/// spaces, or tabs) into tables. Single matching lines are ignored.
fn detect_tables(text: &str) -> Vec<Vec<Vec<String>>> {
    let mut tables = Vec::new();
    let mut current: Vec<Vec<String>> = Vec::new();

    for line in text.lines() {
        let cells = split_cells(line);
        if cells.len() >= 2 {
            current.push(cells);
        } else {
            if current.len() >= 2 {
                tables.push(std::mem::take(&mut current));
            }
            current.clear();
        }
    }
    if current.len() >= 2 {
        tables.push(current);
    }

    tables
}

fn split_cells(line: &str) -> Vec<String> {
    let normalized = line.replace('\t', "  ");
    normalized
        .split("  ")
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

/// Collects http(s) URLs in order of first appearance, deduplicated.
fn collect_urls(text: &str) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();

    for token in text.split_whitespace() {
        let start = match token.find("http://").or_else(|| token.find("https://")) {
            Some(pos) => pos,
            None => continue,
        };
        let url = token[start..].trim_end_matches([')', ']', '>', ',', '.', ';', '"', '\'']);
        if url.len() > "https://".len() && !urls.iter().any(|u| u == url) {
            urls.push(url.to_string());
        }
    }

    if !urls.is_empty() {
        info!(count = urls.len(), "urls found in cv text");
    }
    urls
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_pages_floors_at_one() {
        assert_eq!(count_pages(b"%PDF-1.4 no page objects here"), 1);
    }

    #[test]
    fn test_count_pages_ignores_pages_tree_node() {
        let raw = b"/Type /Pages /Kids [] /Type /Page /Type /Page";
        assert_eq!(count_pages(raw), 2);
    }

    #[test]
    fn test_count_pages_handles_tight_spacing() {
        let raw = b"/Type/Page /Type /Page /Type\n/Page";
        assert_eq!(count_pages(raw), 3);
    }

    #[test]
    fn test_detect_tables_requires_two_rows() {
        let text = "Skill        Level\nRust         Expert\n\nplain paragraph text";
        let tables = detect_tables(text);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].len(), 2);
        assert_eq!(tables[0][0], vec!["Skill", "Level"]);
    }

    #[test]
    fn test_detect_tables_ignores_single_matching_line() {
        let text = "Name         Value\nno separator here";
        assert!(detect_tables(text).is_empty());
    }

    #[test]
    fn test_collect_urls_dedupes_preserving_order() {
        let text = "see https://example.com/cv and http://other.io, plus https://example.com/cv again";
        let urls = collect_urls(text);
        assert_eq!(urls, vec!["https://example.com/cv", "http://other.io"]);
    }

    #[test]
    fn test_collect_urls_strips_trailing_punctuation() {
        let urls = collect_urls("profile (https://linkedin.com/in/jane).");
        assert_eq!(urls, vec!["https://linkedin.com/in/jane"]);
    }

    #[test]
    fn test_collect_urls_empty_text() {
        assert!(collect_urls("").is_empty());
    }
}
