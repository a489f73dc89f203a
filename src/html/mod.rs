//! HTML-to-Text Normalization
//!
//! Scraped documents usually arrive as raw HTML; the chunk planner wants
//! plain text. Rendering failures fall back to the raw input so a malformed
//! page degrades to noisy chunks rather than an empty pipeline.

use crate::types::Document;
use std::io::Cursor;

/// Column width used when rendering HTML to text.
const RENDER_WIDTH: usize = 80;

/// Render HTML to plain text.
///
/// Falls back to the raw input when the renderer rejects the markup.
pub fn html_to_text(html: &str) -> String {
    // html2text expects bytes; Cursor avoids allocating a second large buffer.
    html2text::from_read(Cursor::new(html.as_bytes()), RENDER_WIDTH)
        .unwrap_or_else(|_| html.to_string())
}

/// Normalize a document's `page_content` from HTML to plain text.
///
/// Metadata is preserved untouched.
pub fn transform_document(document: &Document) -> Document {
    Document {
        page_content: html_to_text(&document.page_content),
        metadata: document.metadata.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_tags() {
        let text = html_to_text("<html><body><p>Hello <b>world</b></p></body></html>");
        assert!(text.contains("Hello"));
        assert!(text.contains("world"));
        assert!(!text.contains('<'));
    }

    #[test]
    fn test_plain_text_passes_through() {
        let text = html_to_text("just words");
        assert!(text.contains("just words"));
    }

    #[test]
    fn test_transform_preserves_metadata() {
        let mut doc = Document::new("<p>content</p>");
        doc.metadata
            .insert("source".to_string(), serde_json::json!("https://a.example"));

        let transformed = transform_document(&doc);
        assert!(transformed.page_content.contains("content"));
        assert_eq!(transformed.metadata, doc.metadata);
    }
}
