//! Stylesheet inlining.
//!
//! Gathers every stylesheet source of a page into one `<style>` block:
//! the text of all inline `<style>` elements (document order), followed by
//! each `<link rel="stylesheet">` fetched over the network (document order),
//! separated by blank lines.
//!
//! A stylesheet that cannot be fetched is logged and contributes nothing; it
//! never fails the clip. Fetches for all links run concurrently and are
//! joined before the payload is assembled.
//!
//! # Usage
//!
//! ```rust
//! use webclip::styles::{self, StaticFetcher};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let doc = webclip::dom::parse(
//!     r#"<head><link rel="stylesheet" href="https://example.com/site.css">
//!        <style>body{color:red}</style></head>"#,
//! );
//! let fetcher = StaticFetcher::new().with("https://example.com/site.css", "p{margin:0}");
//!
//! let block = styles::inline(&doc, None, &fetcher).await;
//! assert!(block.starts_with("<style>\nbody{color:red}"));
//! assert!(block.contains("/* Inlined from: https://example.com/site.css */\np{margin:0}"));
//! # });
//! ```

mod fetcher;

pub use fetcher::{FetchError, HttpFetcher, StaticFetcher, StylesheetFetcher};

use futures::future::join_all;
use url::Url;

use crate::dom::{self, Document, Selection};
use crate::selection::HIGHLIGHT_STYLE_ID;
use crate::url_utils;

/// Stylesheet sources found in a document, gathered before any network I/O.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSources {
    /// Text content of each inline `<style>` element, in document order.
    pub inline_blocks: Vec<String>,
    /// Absolute `href` of each `<link rel="stylesheet">`, in document order.
    ///
    /// Links without an `href` keep their slot as an empty string.
    pub stylesheet_urls: Vec<String>,
}

impl StyleSources {
    /// Enumerate the stylesheet sources of `doc`.
    ///
    /// The selection highlight stylesheet is skipped; it belongs to the
    /// clipper, not to the page.
    #[must_use]
    pub fn collect(doc: &Document, base: Option<&Url>) -> Self {
        let stylesheet_urls = doc
            .select(r#"link[rel="stylesheet"]"#)
            .nodes()
            .iter()
            .map(|node| {
                let link = Selection::from(node.clone());
                dom::get_attribute(&link, "href")
                    .map(|href| url_utils::resolve(&href, base))
                    .unwrap_or_default()
            })
            .collect();

        let inline_blocks = doc
            .select("style")
            .nodes()
            .iter()
            .map(|node| Selection::from(node.clone()))
            .filter(|style| dom::id(style).as_deref() != Some(HIGHLIGHT_STYLE_ID))
            .map(|style| dom::text_content(&style).to_string())
            .collect();

        Self {
            inline_blocks,
            stylesheet_urls,
        }
    }
}

/// Aggregated CSS for one clip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StylePayload {
    blocks: Vec<String>,
}

impl StylePayload {
    /// Payload from CSS blocks in output order. Empty blocks are dropped.
    #[must_use]
    pub fn new(blocks: impl IntoIterator<Item = String>) -> Self {
        Self {
            blocks: blocks.into_iter().filter(|b| !b.is_empty()).collect(),
        }
    }

    /// The non-empty CSS blocks.
    #[must_use]
    pub fn blocks(&self) -> &[String] {
        &self.blocks
    }

    /// All blocks joined by blank lines.
    #[must_use]
    pub fn css(&self) -> String {
        self.blocks.join("\n\n")
    }

    /// True when there is no non-whitespace CSS.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(|b| b.trim().is_empty())
    }

    /// The `<style>` block, or an empty string when there is no CSS.
    #[must_use]
    pub fn render(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        format!("<style>\n{}\n</style>", self.css())
    }
}

/// Fetch external stylesheets and assemble the payload.
pub async fn resolve<F: StylesheetFetcher>(sources: StyleSources, fetcher: &F) -> StylePayload {
    let fetched = join_all(
        sources
            .stylesheet_urls
            .iter()
            .map(|href| fetch_one(href, fetcher)),
    )
    .await;

    StylePayload::new(sources.inline_blocks.into_iter().chain(fetched))
}

/// Inline every stylesheet of `doc` into a single `<style>` block.
///
/// Returns an empty string when the page has no CSS at all.
pub async fn inline<F: StylesheetFetcher>(doc: &Document, base: Option<&Url>, fetcher: &F) -> String {
    let sources = StyleSources::collect(doc, base);
    log::debug!(
        "Inlining {} inline style blocks and {} stylesheets",
        sources.inline_blocks.len(),
        sources.stylesheet_urls.len()
    );

    resolve(sources, fetcher).await.render()
}

/// One stylesheet with its provenance comment, or empty on failure.
async fn fetch_one<F: StylesheetFetcher>(href: &str, fetcher: &F) -> String {
    if href.is_empty() {
        return String::new();
    }

    match fetcher.fetch(href).await {
        Ok(css) => format!("/* Inlined from: {href} */\n{css}"),
        Err(e) => {
            log::warn!("Unable to inline stylesheet {href}: {e}");
            String::new()
        }
    }
}
