//! # webclip
//!
//! Capture a web page, or one element of it, as a standalone HTML document.
//!
//! A clip is a complete document with the page's stylesheets inlined, its
//! scripts, iframes and ad containers stripped, and a metadata comment that
//! records where and when it was taken and which videos the content embedded.
//!
//! ## Quick Start
//!
//! ```rust
//! use webclip::{capture_full_page, Options, Page, StaticFetcher};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let page = Page::parse(
//!     r#"<html><head><title>Notes</title><style>p{margin:0}</style></head>
//!        <body><p>Keep this.</p><script>track()</script></body></html>"#,
//!     Some("https://example.com/notes"),
//! );
//!
//! let html = capture_full_page(&page, &StaticFetcher::new(), &Options::default()).await?;
//! assert!(html.starts_with("<!DOCTYPE html>"));
//! assert!(html.contains("p{margin:0}"));
//! assert!(!html.contains("track()"));
//! # Ok::<(), webclip::Error>(())
//! # }).unwrap();
//! ```
//!
//! ## Selecting an element
//!
//! [`SelectionController`] runs the hover-and-click session. Pointer input
//! goes in, [`Transition`]s come out, and the registered handler receives the
//! chosen node once the overlay is gone. [`ClipAgent`] wires the controller,
//! the capture pipeline and the message boundary together for one page.
//!
//! ## Features
//!
//! - **Sanitization**: fixed denylist of scripts, iframes, `noscript` and ad markers
//! - **Style inlining**: inline `<style>` blocks plus every fetched stylesheet,
//!   with per-stylesheet failure isolation
//! - **Media references**: videos and YouTube/Vimeo/iframe embeds, never downloaded
//! - **Deterministic output**: a fixed document skeleton with empty parts omitted

mod error;
mod options;
mod patterns;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Character encoding detection for raw page bytes.
pub mod encoding;

/// URL resolution against the page address.
pub mod url_utils;

/// Denylist-based removal of scripts, frames and ads.
pub mod sanitizer;

/// Video and embed reference collection.
pub mod media;

/// Stylesheet collection, fetching and inlining.
pub mod styles;

/// Interactive element selection state machine.
pub mod selection;

/// Clip metadata comment and file naming.
pub mod metadata;

/// Final document assembly.
pub mod document;

/// The live page being clipped.
pub mod page;

/// Full-page and selection capture.
pub mod clip;

/// Commands, responses and events at the messaging boundary.
pub mod messaging;

// Public API - re-exports
pub use clip::{capture_full_page, capture_selection};
pub use document::ClipDocument;
pub use error::{Error, Result};
pub use media::{MediaKind, MediaReference};
pub use messaging::{ClipAgent, ClipCommand, ClipEvent, ClipResponse, PageEvent};
pub use metadata::{clip_file_name, CaptureMode, ClipMetadata};
pub use options::{Options, DEFAULT_TITLE};
pub use page::Page;
pub use selection::{
    HighlightSource, HitTester, Point, Rect, SelectionController, SelectionState, StaticLayout,
    Transition,
};
pub use styles::{FetchError, HttpFetcher, StaticFetcher, StylePayload, StylesheetFetcher};
