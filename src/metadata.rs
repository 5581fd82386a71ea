//! The machine-readable metadata embedded in every clip.
//!
//! Each clip carries one HTML comment of the form
//!
//! ```text
//! <!-- WebClipMetadata
//! {
//!   "sourceUrl": "https://example.com/",
//!   "clippedAt": "2026-10-18T11:30:00+02:00",
//!   "mode": "full",
//!   "videos": []
//! }
//! -->
//! ```
//!
//! External tools parse it back out with [`ClipMetadata::extract`].

use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::media::MediaReference;
use crate::patterns::{METADATA_COMMENT, TIMESTAMP_UNSAFE};

/// First line of the metadata comment.
pub const METADATA_MARKER: &str = "WebClipMetadata";

/// What a clip was captured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureMode {
    /// The whole `<body>`.
    Full,
    /// One interactively chosen element.
    Selection,
}

/// Provenance of a clip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipMetadata {
    /// Page address, empty when unknown.
    pub source_url: String,
    /// Capture time in local time, RFC 3339.
    pub clipped_at: String,
    pub mode: CaptureMode,
    /// Media found in the captured content; bytes are never fetched.
    pub videos: Vec<MediaReference>,
}

impl ClipMetadata {
    /// Metadata stamped with the current local time.
    #[must_use]
    pub fn now(source_url: impl Into<String>, mode: CaptureMode, videos: Vec<MediaReference>) -> Self {
        Self {
            source_url: source_url.into(),
            clipped_at: Local::now().to_rfc3339_opts(SecondsFormat::Secs, false),
            mode,
            videos,
        }
    }

    /// The metadata as an HTML comment.
    ///
    /// Every `>` inside a value is written as `\u003e`, so neither `-->` nor
    /// `--!>` can close the comment early. JSON readers decode it back to the
    /// original text.
    pub fn render_comment(&self) -> Result<String> {
        let json = serde_json::to_string_pretty(self)?.replace('>', "\\u003e");
        Ok(format!("<!-- {METADATA_MARKER}\n{json}\n-->"))
    }

    /// Read the metadata comment back out of a clip.
    ///
    /// Returns `Ok(None)` when the document has no metadata comment.
    pub fn extract(html: &str) -> Result<Option<Self>> {
        let Some(caps) = METADATA_COMMENT.captures(html) else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&caps[1])?))
    }
}

/// Download file name for a clip captured at `at`.
///
/// `clip_2026-10-18T09-30-00-123Z.html`, with `_selection` before the
/// extension for selection clips.
#[must_use]
pub fn clip_file_name(mode: CaptureMode, at: DateTime<Utc>) -> String {
    let timestamp = at.to_rfc3339_opts(SecondsFormat::Millis, true);
    let timestamp = TIMESTAMP_UNSAFE.replace_all(&timestamp, "-");
    let suffix = match mode {
        CaptureMode::Full => "",
        CaptureMode::Selection => "_selection",
    };
    format!("clip_{timestamp}{suffix}.html")
}
