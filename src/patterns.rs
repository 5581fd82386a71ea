//! Compiled regex patterns used during capture.
//!
//! All patterns are compiled once on first use with `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Embedded Player Classification
// =============================================================================

/// Matches YouTube player and short-link URLs.
///
/// Tested against the whole URL, not just the host, so a YouTube address
/// passed through a proxy query string still classifies as YouTube.
pub static YOUTUBE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)youtube\.com|youtu\.be").expect("YOUTUBE_URL regex")
});

/// Matches Vimeo player URLs.
pub static VIMEO_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)vimeo\.com").expect("VIMEO_URL regex"));

// =============================================================================
// File Naming
// =============================================================================

/// Characters of an RFC 3339 timestamp that are unsafe in file names.
pub static TIMESTAMP_UNSAFE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[:.]").expect("TIMESTAMP_UNSAFE regex"));

// =============================================================================
// Charset Sniffing
// =============================================================================

/// `<meta charset="...">`
pub static CHARSET_META: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>;]+)"#).expect("CHARSET_META regex")
});

/// `<meta http-equiv="Content-Type" content="...; charset=...">`
pub static CONTENT_TYPE_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>;]+)"#)
        .expect("CONTENT_TYPE_CHARSET regex")
});

// =============================================================================
// Clip Metadata
// =============================================================================

/// The metadata comment of a finished clip; group 1 is the JSON text.
pub static METADATA_COMMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!-- WebClipMetadata\n(.*?)\n-->").expect("METADATA_COMMENT regex")
});
