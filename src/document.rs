//! Final clip document assembly.

use crate::options::DEFAULT_TITLE;

/// The parts of a clip, each already rendered to markup.
///
/// `title` is plain text and is escaped on output; every other field is
/// inserted verbatim. Empty `styles`, `metadata`, and `content` are left out
/// entirely rather than emitted as blank lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipDocument {
    /// Page title; blank falls back to [`DEFAULT_TITLE`].
    pub title: String,
    /// A rendered `<style>` block, or empty.
    pub styles: String,
    /// The metadata comment, or empty.
    pub metadata: String,
    /// Serialized attributes for `<body>`, each with a leading space.
    pub body_attributes: String,
    /// The captured fragment.
    pub content: String,
}

impl ClipDocument {
    /// Render with [`DEFAULT_TITLE`] as the fallback title.
    #[must_use]
    pub fn render(&self) -> String {
        self.render_with_default_title(DEFAULT_TITLE)
    }

    /// Render the complete HTML document.
    ///
    /// The skeleton is fixed: doctype, `<head>` with charset, title and
    /// styles, then `<body>` with metadata and content.
    #[must_use]
    pub fn render_with_default_title(&self, default_title: &str) -> String {
        let title = if self.title.trim().is_empty() {
            default_title
        } else {
            self.title.as_str()
        };
        let title_line = format!("<title>{}</title>", html_escape::encode_text(title));
        let body_open = format!("<body{}>", self.body_attributes);

        [
            "<!DOCTYPE html>",
            "<html>",
            "<head>",
            r#"<meta charset="utf-8" />"#,
            title_line.as_str(),
            self.styles.as_str(),
            "</head>",
            body_open.as_str(),
            self.metadata.as_str(),
            self.content.as_str(),
            "</body>",
            "</html>",
        ]
        .iter()
        .filter(|line| !line.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("\n")
    }
}

/// Serialize attributes as ` name="value"` pairs, in order.
///
/// Values are escaped for a double-quoted attribute.
#[must_use]
pub fn serialize_attributes(attrs: &[(String, String)]) -> String {
    attrs
        .iter()
        .map(|(name, value)| format!(r#" {name}="{}""#, html_escape::encode_double_quoted_attribute(value)))
        .collect()
}
