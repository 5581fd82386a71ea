//! Performance benchmarks for webclip.
//!
//! Run with: `cargo bench`
//!
//! Benchmarks cover the synchronous stages of a clip (sanitizing a cloned
//! body, serializing a chosen element, assembling the document) and a full
//! offline capture with inline styles only.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use webclip::clip::{clean_body_html, clean_outer_html};
use webclip::{capture_full_page, dom, ClipDocument, Options, Page, StaticFetcher};

const SAMPLE_HTML: &str = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Sample Article</title>
    <style>body { font-family: serif; } .card { padding: 1rem; }</style>
    <script src="/analytics.js"></script>
</head>
<body class="article-page">
    <nav><a href="/">Home</a><a href="/about">About</a></nav>
    <article id="story" class="card">
        <h1>Sample Article Title</h1>
        <p>This is the first paragraph of the article.</p>
        <div class="ad-slot">Sponsored</div>
        <video src="/media/intro.mp4"><source src="/media/intro.webm"></video>
        <iframe src="https://www.youtube.com/embed/abc123"></iframe>
        <p>A second paragraph with more content.</p>
        <script>window.track && track("view")</script>
    </article>
    <table><tbody><tr id="row"><td>1</td><td>2</td></tr></tbody></table>
    <footer><p>Copyright 2026</p></footer>
</body>
</html>
"#;

/// Repeat the article body to get a page of roughly `kb` kilobytes.
fn large_page(kb: usize) -> String {
    let block = r#"<section class="card"><h2>Part</h2><p>Lorem ipsum dolor sit amet.</p><div id="ad-1">ad</div><script>x()</script></section>"#;
    let count = kb * 1024 / block.len() + 1;
    format!("<html><head><title>Large</title></head><body>{}</body></html>", block.repeat(count))
}

fn bench_clean_body(c: &mut Criterion) {
    let page = Page::parse(SAMPLE_HTML, Some("https://example.com/story"));

    c.bench_function("clean_body_html", |b| {
        b.iter(|| clean_body_html(black_box(page.document())));
    });
}

fn bench_clean_element(c: &mut Criterion) {
    let page = Page::parse(SAMPLE_HTML, Some("https://example.com/story"));
    let Some(story) = dom::node_id(&page.document().select("#story")) else {
        return;
    };

    c.bench_function("clean_outer_html", |b| {
        b.iter(|| clean_outer_html(black_box(page.document()), black_box(story)));
    });
}

fn bench_render_document(c: &mut Criterion) {
    let document = ClipDocument {
        title: "Sample Article".to_string(),
        styles: "<style>\nbody{}\n</style>".to_string(),
        metadata: "<!-- WebClipMetadata\n{}\n-->".to_string(),
        body_attributes: r#" class="article-page""#.to_string(),
        content: "<p>content</p>".repeat(200),
    };

    c.bench_function("render_document", |b| {
        b.iter(|| black_box(&document).render());
    });
}

fn bench_full_capture(c: &mut Criterion) {
    let Ok(runtime) = tokio::runtime::Builder::new_current_thread().build() else {
        return;
    };
    let fetcher = StaticFetcher::new();
    let options = Options::default();

    let mut group = c.benchmark_group("capture_full_page");
    for kb in [4, 64, 512] {
        let html = large_page(kb);
        let page = Page::parse(&html, Some("https://example.com/large"));

        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(BenchmarkId::new("offline", format!("{kb}KB")), &page, |b, page| {
            b.iter(|| runtime.block_on(capture_full_page(black_box(page), &fetcher, &options)));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_clean_body,
    bench_clean_element,
    bench_render_document,
    bench_full_capture
);
criterion_main!(benches);
