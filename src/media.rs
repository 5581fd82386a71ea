//! Media reference collection.
//!
//! Records the videos and embedded players found in captured content so that
//! downstream tools can re-embed them. Only references are stored; media bytes
//! are never fetched.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::dom::{self, Selection};
use crate::patterns::{VIMEO_URL, YOUTUBE_URL};
use crate::url_utils;

/// Classification of a media reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// A `<video>` element or one of its `<source>` children.
    Video,
    /// An iframe pointing at YouTube.
    Youtube,
    /// An iframe pointing at Vimeo.
    Vimeo,
    /// Any other iframe.
    Iframe,
}

impl MediaKind {
    /// Classify an embed URL by known video hosts.
    ///
    /// Blank URLs and unknown hosts fall back to [`MediaKind::Iframe`].
    #[must_use]
    pub fn for_embed(url: &str) -> Self {
        if YOUTUBE_URL.is_match(url) {
            Self::Youtube
        } else if VIMEO_URL.is_match(url) {
            Self::Vimeo
        } else {
            Self::Iframe
        }
    }
}

/// A video or embed found in captured content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaReference {
    /// Classification, serialized as `type`.
    #[serde(rename = "type")]
    pub kind: MediaKind,
    /// Absolute URL when the page address is known, otherwise as written.
    pub url: String,
}

/// Collect unique media references under `root`.
///
/// Walks `<video>` elements (their own `src`, then each nested `<source>`),
/// then `<iframe>` elements. One seen-set spans both passes, so a URL used by
/// a video and an iframe is recorded once, as a video. Order of first
/// appearance is preserved. An empty selection yields an empty list.
#[must_use]
pub fn collect(root: &Selection, base: Option<&Url>) -> Vec<MediaReference> {
    let mut media = Vec::new();
    if !root.exists() {
        return media;
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut record = |kind: MediaKind, url: String, media: &mut Vec<MediaReference>| {
        if !url.is_empty() && seen.insert(url.clone()) {
            media.push(MediaReference { kind, url });
        }
    };

    for video_node in root.select("video").nodes() {
        let video = Selection::from(video_node.clone());
        record(MediaKind::Video, src_of(&video, base), &mut media);

        for source_node in video.select("source").nodes() {
            let source = Selection::from(source_node.clone());
            record(MediaKind::Video, src_of(&source, base), &mut media);
        }
    }

    for frame_node in root.select("iframe").nodes() {
        let frame = Selection::from(frame_node.clone());
        let url = src_of(&frame, base);
        let kind = MediaKind::for_embed(&url);
        record(kind, url, &mut media);
    }

    media
}

fn src_of(sel: &Selection, base: Option<&Url>) -> String {
    dom::get_attribute(sel, "src")
        .map(|src| url_utils::resolve(&src, base))
        .unwrap_or_default()
}
