//! Capture pipeline.
//!
//! Both capture modes run the same steps against a different root:
//!
//! 1. collect media references from the live root;
//! 2. clone the page and sanitize the root inside the clone;
//! 3. inline every stylesheet of the live page;
//! 4. stamp metadata and assemble the [`ClipDocument`].
//!
//! The live page is only read. The one temporary change, a marker attribute
//! used to find the chosen element inside the clone, is undone before any
//! other step runs.

use crate::document::ClipDocument;
use url::Url;

use crate::dom::{self, Document, NodeId};
use crate::error::{Error, Result};
use crate::media::{self, MediaReference};
use crate::metadata::{CaptureMode, ClipMetadata};
use crate::options::Options;
use crate::page::Page;
use crate::sanitizer;
use crate::selection::{HIGHLIGHT_STYLE_ID, OVERLAY_ID};
use crate::styles::{self, StylesheetFetcher};
use crate::url_utils;

/// Attribute marking the chosen element while the page is cloned.
const CLONE_MARKER: &str = "data-webclip-capture";

/// Capture the whole `<body>`.
///
/// The clip keeps the body's attributes. Stylesheet failures only drop the
/// affected stylesheet.
pub async fn capture_full_page<F: StylesheetFetcher>(
    page: &Page,
    fetcher: &F,
    options: &Options,
) -> Result<String> {
    let base = base_url(page, options);
    let videos = media::collect(&page.body(), base.as_ref());
    let content = clean_body_html(page.document());

    log::debug!(
        "Capturing full page: {} bytes of content, {} media references",
        content.len(),
        videos.len()
    );

    assemble(page, fetcher, options, CaptureMode::Full, videos, page.body_attributes(), content).await
}

/// Capture one element, typically the one a selection session resolved.
///
/// # Errors
///
/// [`Error::SelectionDetached`] when the node is no longer in the page, and
/// [`Error::EmptySelection`] when it serializes to blank markup.
pub async fn capture_selection<F: StylesheetFetcher>(
    page: &Page,
    node: NodeId,
    fetcher: &F,
    options: &Options,
) -> Result<String> {
    let doc = page.document();
    if !dom::is_connected(doc, node) {
        return Err(Error::SelectionDetached);
    }

    let base = base_url(page, options);
    let videos = media::collect(&dom::select_node(doc, node), base.as_ref());
    let content = clean_outer_html(doc, node);
    if content.trim().is_empty() {
        return Err(Error::EmptySelection);
    }

    log::debug!(
        "Capturing selection: {} bytes of content, {} media references",
        content.len(),
        videos.len()
    );

    assemble(page, fetcher, options, CaptureMode::Selection, videos, String::new(), content).await
}

/// Sanitized inner HTML of a copy of `<body>`.
#[must_use]
pub fn clean_body_html(doc: &Document) -> String {
    let clone = dom::clone_document(doc);
    strip_session_nodes(&clone);

    let body = clone.select("body").first();
    sanitizer::sanitize(&body);
    dom::inner_html(&body).to_string()
}

/// Sanitized outer HTML of a copy of `node`.
///
/// The copy is taken from a re-parse of the whole page, so elements that
/// only parse inside a context (`<tr>`, `<td>`, `<li>`) come out intact.
/// The node itself is kept even when it matches the denylist; only its
/// descendants are filtered. Non-element nodes yield their text.
///
/// Because the copy goes through the parser, markup the parser would nest
/// differently (a `<div>` scripted into a `<p>`) is captured in its
/// re-parsed shape, see [`dom::clone_document`].
#[must_use]
pub fn clean_outer_html(doc: &Document, node: NodeId) -> String {
    let target = dom::select_node(doc, node);
    if !dom::node_by_id(doc, node).is_some_and(|n| n.is_element()) {
        return dom::text_content(&target).to_string();
    }

    dom::set_attribute(&target, CLONE_MARKER, "");
    let clone = dom::clone_document(doc);
    dom::remove_attribute(&target, CLONE_MARKER);

    let marker = format!("[{CLONE_MARKER}]");
    let copy = clone.select(&marker).first();
    dom::remove_attribute(&copy, CLONE_MARKER);
    sanitizer::sanitize(&copy);

    // Session nodes are only removed from inside the copy, never the copy itself.
    let nested_session_nodes = copy.select(&format!("#{OVERLAY_ID}, #{HIGHLIGHT_STYLE_ID}"));
    dom::remove(&nested_session_nodes);

    dom::outer_html(&copy).to_string()
}

/// Remove nodes the selection controller owns.
fn strip_session_nodes(doc: &Document) {
    dom::remove(&doc.select(&format!("#{OVERLAY_ID}, #{HIGHLIGHT_STYLE_ID}")));
}

/// The page's own address, or [`Options::page_url`] when the page has none.
fn base_url(page: &Page, options: &Options) -> Option<Url> {
    page.url()
        .cloned()
        .or_else(|| options.page_url.as_deref().and_then(url_utils::parse_url))
}

async fn assemble<F: StylesheetFetcher>(
    page: &Page,
    fetcher: &F,
    options: &Options,
    mode: CaptureMode,
    videos: Vec<MediaReference>,
    body_attributes: String,
    content: String,
) -> Result<String> {
    let base = base_url(page, options);
    let styles = styles::inline(page.document(), base.as_ref(), fetcher).await;
    let source_url = base.map(String::from).unwrap_or_default();
    let metadata = ClipMetadata::now(source_url, mode, videos).render_comment()?;

    let document = ClipDocument {
        title: page.title().unwrap_or_default(),
        styles,
        metadata,
        body_attributes,
        content,
    };
    Ok(document.render_with_default_title(&options.default_title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::styles::StaticFetcher;

    const PAGE: &str = r#"<html><head><title>Recipes</title>
        <style>body{color:red}</style>
        <script>track()</script>
    </head><body class="light" data-page="home">
        <article id="post">
            <h1>Soup</h1>
            <script>alert(1)</script>
            <div class="ad-banner">Buy now</div>
            <iframe src="https://www.youtube.com/embed/xyz"></iframe>
            <p>Boil water.</p>
        </article>
        <table><tbody><tr id="row"><td>cell</td></tr></tbody></table>
        <noscript>enable js</noscript>
    </body></html>"#;

    fn page() -> Page {
        Page::parse(PAGE, Some("https://cook.example/soup"))
    }

    #[tokio::test]
    async fn full_page_clip() {
        let page = page();
        let html = capture_full_page(&page, &StaticFetcher::new(), &Options::default())
            .await
            .unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Recipes</title>"));
        assert!(html.contains(r#"<body class="light" data-page="home">"#));
        assert!(html.contains("body{color:red}"));
        assert!(html.contains("Boil water."));
        assert!(!html.contains("alert(1)"));
        assert!(!html.contains("Buy now"));
        assert!(!html.contains("enable js"));
        assert!(!html.contains("<iframe"));

        let meta = ClipMetadata::extract(&html).unwrap().unwrap();
        assert_eq!(meta.mode, CaptureMode::Full);
        assert_eq!(meta.source_url, "https://cook.example/soup");
        assert_eq!(meta.videos.len(), 1);
        assert_eq!(meta.videos[0].url, "https://www.youtube.com/embed/xyz");
    }

    #[tokio::test]
    async fn full_page_leaves_live_page_untouched() {
        let page = page();
        let before = page.document().html().to_string();

        capture_full_page(&page, &StaticFetcher::new(), &Options::default())
            .await
            .unwrap();

        assert_eq!(page.document().html().to_string(), before);
    }

    #[tokio::test]
    async fn selection_clip() {
        let page = page();
        let post = dom::node_id(&page.document().select("#post")).unwrap();

        let html = capture_selection(&page, post, &StaticFetcher::new(), &Options::default())
            .await
            .unwrap();

        assert!(html.contains("<body>\n"));
        assert!(html.contains(r#"<article id="post">"#));
        assert!(html.contains("Boil water."));
        assert!(!html.contains("alert(1)"));
        assert!(!html.contains("cell"));
        assert!(!html.contains(CLONE_MARKER));

        let meta = ClipMetadata::extract(&html).unwrap().unwrap();
        assert_eq!(meta.mode, CaptureMode::Selection);
        assert_eq!(meta.videos.len(), 1);
    }

    #[test]
    fn table_row_keeps_context() {
        let page = page();
        let row = dom::node_id(&page.document().select("#row")).unwrap();

        let html = clean_outer_html(page.document(), row);

        assert_eq!(html, r#"<tr id="row"><td>cell</td></tr>"#);
    }

    #[test]
    fn marker_never_left_on_live_node() {
        let page = page();
        let post = dom::node_id(&page.document().select("#post")).unwrap();

        clean_outer_html(page.document(), post);

        assert!(page.document().select(&format!("[{CLONE_MARKER}]")).is_empty());
    }

    #[test]
    fn chosen_denylisted_element_is_kept() {
        let page = Page::parse(
            r#"<body><div class="ad-slot" id="slot"><script>x()</script><p>kept</p></div></body>"#,
            None,
        );
        let slot = dom::node_id(&page.document().select("#slot")).unwrap();

        let html = clean_outer_html(page.document(), slot);

        assert_eq!(html, r#"<div class="ad-slot" id="slot"><p>kept</p></div>"#);
    }

    #[tokio::test]
    async fn detached_selection_fails() {
        let page = page();
        let post = page.document().select("#post");
        let id = dom::node_id(&post).unwrap();
        dom::remove(&post);

        let err = capture_selection(&page, id, &StaticFetcher::new(), &Options::default())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::SelectionDetached));
        assert_eq!(err.to_string(), "Selected element is no longer available.");
    }

    #[tokio::test]
    async fn blank_text_selection_fails() {
        let page = Page::parse(r#"<body><div id="gap">   </div></body>"#, None);
        let gap = page.document().select("#gap");
        let text = gap.nodes()[0].first_child().unwrap().id;

        let err = capture_selection(&page, text, &StaticFetcher::new(), &Options::default())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::EmptySelection));
    }

    #[test]
    fn body_copy_drops_session_nodes() {
        let page = Page::parse(
            &format!(r#"<body><p>x</p><div id="{OVERLAY_ID}"><div>hint</div></div></body>"#),
            None,
        );

        let html = clean_body_html(page.document());

        assert_eq!(html, "<p>x</p>");
        assert!(page.document().select(&format!("#{OVERLAY_ID}")).exists());
    }

    #[tokio::test]
    async fn configured_page_url_fills_in_for_unknown_address() {
        let page = Page::parse(
            r#"<head><link rel="stylesheet" href="/site.css"></head>
               <body><video src="/v.mp4"></video><p>x</p></body>"#,
            None,
        );
        let fetcher = StaticFetcher::new().with("https://example.com/site.css", "p{margin:0}");
        let options = Options {
            page_url: Some("https://example.com/a".to_string()),
            ..Options::default()
        };

        let html = capture_full_page(&page, &fetcher, &options).await.unwrap();

        assert!(html.contains("p{margin:0}"));
        let meta = ClipMetadata::extract(&html).unwrap().unwrap();
        assert_eq!(meta.source_url, "https://example.com/a");
        assert_eq!(meta.videos[0].url, "https://example.com/v.mp4");
    }

    #[tokio::test]
    async fn page_address_wins_over_configured_url() {
        let page = page();
        let post = dom::node_id(&page.document().select("#post")).unwrap();
        let options = Options {
            page_url: Some("https://elsewhere.example/".to_string()),
            ..Options::default()
        };

        let html = capture_selection(&page, post, &StaticFetcher::new(), &options)
            .await
            .unwrap();

        let meta = ClipMetadata::extract(&html).unwrap().unwrap();
        assert_eq!(meta.source_url, "https://cook.example/soup");
    }

    #[tokio::test]
    async fn untitled_page_uses_configured_title() {
        let page = Page::parse("<body><p>x</p></body>", None);
        let options = Options {
            default_title: "Clipping".to_string(),
            ..Options::default()
        };

        let html = capture_full_page(&page, &StaticFetcher::new(), &options).await.unwrap();

        assert!(html.contains("<title>Clipping</title>"));
        let meta = ClipMetadata::extract(&html).unwrap().unwrap();
        assert_eq!(meta.source_url, "");
    }
}
