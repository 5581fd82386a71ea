//! End-to-end capture tests: full page, selection, and the clip format.

#![allow(clippy::expect_used)] // expect() is appropriate in tests for clear panic messages

use webclip::sanitizer::{has_blocked_content, sanitize};
use webclip::{
    capture_full_page, capture_selection, dom, CaptureMode, ClipMetadata, Error, MediaKind,
    Options, Page, StaticFetcher,
};

const ARTICLE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Field Notes &amp; Sketches</title>
    <link rel="stylesheet" href="/css/site.css">
    <link rel="stylesheet" href="https://cdn.example/missing.css">
    <style>body{color:red}</style>
</head>
<body class="reading" data-theme="sepia">
    <header id="masthead"><h1>Field Notes</h1></header>
    <main>
        <article id="entry">
            <h2>Birds</h2>
            <p>Seen at dawn.</p>
            <video src="/media/heron.mp4">
                <source src="/media/heron.webm">
                <source src="/media/heron.mp4">
            </video>
            <iframe src="https://player.vimeo.com/video/42"></iframe>
            <iframe src="https://www.youtube.com/embed/owl"></iframe>
            <div id="ad-sidebar">Sponsored</div>
            <script>console.log("x")</script>
        </article>
        <ul id="list"><li id="first">one</li><li>two</li></ul>
    </main>
</body>
</html>"#;

fn page() -> Page {
    Page::parse(ARTICLE, Some("https://notes.example/2026/birds"))
}

fn fetcher() -> StaticFetcher {
    StaticFetcher::new().with("https://notes.example/css/site.css", "main{max-width:40em}")
}

#[tokio::test]
async fn full_page_clip_structure() {
    let page = page();
    let html = capture_full_page(&page, &fetcher(), &Options::default())
        .await
        .expect("capture failed");

    let lines: Vec<&str> = html.lines().collect();
    assert_eq!(lines[0], "<!DOCTYPE html>");
    assert_eq!(lines[3], r#"<meta charset="utf-8" />"#);
    assert_eq!(lines[4], "<title>Field Notes &amp; Sketches</title>");
    assert!(html.contains(r#"<body class="reading" data-theme="sepia">"#));
    assert!(html.ends_with("</body>\n</html>"));

    // Inline block first, then fetched sheets; the 404 is dropped.
    let inline_at = html.find("body{color:red}").expect("inline style");
    let fetched_at = html.find("main{max-width:40em}").expect("fetched style");
    assert!(inline_at < fetched_at);
    assert!(html.contains("/* Inlined from: https://notes.example/css/site.css */"));
    assert!(!html.contains("missing.css"));
    assert_eq!(html.matches("<style>").count(), 1);

    assert!(html.contains("Seen at dawn."));
    assert!(!html.contains("console.log"));
    assert!(!html.contains("Sponsored"));
    assert!(!html.contains("<iframe"));
}

#[tokio::test]
async fn full_page_metadata() {
    let page = page();
    let html = capture_full_page(&page, &fetcher(), &Options::default())
        .await
        .expect("capture failed");

    let meta = ClipMetadata::extract(&html)
        .expect("valid metadata")
        .expect("metadata present");

    assert_eq!(meta.source_url, "https://notes.example/2026/birds");
    assert_eq!(meta.mode, CaptureMode::Full);

    let videos: Vec<(MediaKind, &str)> = meta
        .videos
        .iter()
        .map(|v| (v.kind, v.url.as_str()))
        .collect();
    assert_eq!(
        videos,
        vec![
            (MediaKind::Video, "https://notes.example/media/heron.mp4"),
            (MediaKind::Video, "https://notes.example/media/heron.webm"),
            (MediaKind::Vimeo, "https://player.vimeo.com/video/42"),
            (MediaKind::Youtube, "https://www.youtube.com/embed/owl"),
        ]
    );

    // The metadata comment opens the body.
    let body_at = html.find("<body").expect("body");
    let meta_at = html.find("<!-- WebClipMetadata").expect("comment");
    assert!(meta_at > body_at);
    assert!(html[body_at..meta_at].lines().count() == 1);
}

#[tokio::test]
async fn selection_clip_of_article() {
    let page = page();
    let entry = dom::node_id(&page.document().select("#entry")).expect("entry");

    let html = capture_selection(&page, entry, &fetcher(), &Options::default())
        .await
        .expect("capture failed");

    assert!(html.contains("<body>\n<!-- WebClipMetadata"));
    assert!(html.contains(r#"<article id="entry">"#));
    assert!(!html.contains("masthead"));
    assert!(!html.contains("Sponsored"));
    assert!(html.contains("main{max-width:40em}"));

    let meta = ClipMetadata::extract(&html).expect("valid").expect("present");
    assert_eq!(meta.mode, CaptureMode::Selection);
    assert_eq!(meta.videos.len(), 4);
}

#[tokio::test]
async fn selection_clip_of_list_item() {
    let page = page();
    let first = dom::node_id(&page.document().select("#first")).expect("li");

    let html = capture_selection(&page, first, &fetcher(), &Options::default())
        .await
        .expect("capture failed");

    assert!(html.contains(r#"<li id="first">one</li>"#));
    let meta = ClipMetadata::extract(&html).expect("valid").expect("present");
    assert!(meta.videos.is_empty());
}

#[tokio::test]
async fn capture_does_not_mutate_page() {
    let page = page();
    let before = page.document().html().to_string();
    let entry = dom::node_id(&page.document().select("#entry")).expect("entry");

    capture_full_page(&page, &fetcher(), &Options::default())
        .await
        .expect("full");
    capture_selection(&page, entry, &fetcher(), &Options::default())
        .await
        .expect("selection");

    assert_eq!(page.document().html().to_string(), before);
}

#[tokio::test]
async fn removed_selection_is_reported() {
    let page = page();
    let entry_sel = page.document().select("#entry");
    let entry = dom::node_id(&entry_sel).expect("entry");
    dom::remove(&page.document().select("main"));

    let err = capture_selection(&page, entry, &fetcher(), &Options::default())
        .await
        .expect_err("detached");

    assert!(matches!(err, Error::SelectionDetached));
}

#[test]
fn sanitizer_leaves_no_denylisted_nodes() {
    let doc = dom::parse(ARTICLE);
    let body = doc.select("body");
    assert!(has_blocked_content(&body));

    sanitize(&body);
    let once = doc.html().to_string();
    sanitize(&body);

    assert!(!has_blocked_content(&body));
    assert_eq!(doc.html().to_string(), once);
    assert!(doc.select("#masthead").exists());
    assert!(doc.select("video").exists());
}
