//! Configuration options for clip capture.
//!
//! The `Options` struct controls the parts of capture that are not fixed
//! policy: where the page lives, how the clip is titled, where the selection
//! highlight stylesheet comes from, and how stylesheets are fetched.

use std::time::Duration;

use crate::selection::HighlightSource;

/// Title used when the captured page has no usable `<title>`.
pub const DEFAULT_TITLE: &str = "Web Clip";

/// Configuration options for clip capture.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use webclip::Options;
///
/// let options = Options {
///     page_url: Some("https://example.com/article".to_string()),
///     fetch_timeout: Some(Duration::from_secs(10)),
///     ..Options::default()
/// };
/// assert_eq!(options.default_title, "Web Clip");
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Address of the captured page, used when the page has none of its own.
    ///
    /// Used as the metadata `sourceUrl` and as the base for resolving
    /// relative stylesheet and media URLs. Without either address, relative
    /// references are recorded as written.
    ///
    /// Default: `None`
    pub page_url: Option<String>,

    /// Clip title when the page has none.
    ///
    /// Default: `"Web Clip"`
    pub default_title: String,

    /// Source of the stylesheet injected while a selection session runs.
    ///
    /// Default: `HighlightSource::Bundled`
    pub highlight_source: HighlightSource,

    /// Per-request timeout for stylesheet fetches.
    ///
    /// `None` leaves requests unbounded; a hung stylesheet then delays the
    /// clip until the transport gives up.
    ///
    /// Default: `None`
    pub fetch_timeout: Option<Duration>,

    /// `User-Agent` header sent with stylesheet fetches.
    ///
    /// Default: `None` (reqwest's default)
    pub user_agent: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            page_url: None,
            default_title: DEFAULT_TITLE.to_string(),
            highlight_source: HighlightSource::Bundled,
            fetch_timeout: None,
            user_agent: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = Options::default();
        assert!(options.page_url.is_none());
        assert_eq!(options.default_title, DEFAULT_TITLE);
        assert_eq!(options.highlight_source, HighlightSource::Bundled);
        assert!(options.fetch_timeout.is_none());
        assert!(options.user_agent.is_none());
    }

    #[test]
    fn struct_update_syntax() {
        let options = Options {
            default_title: "Saved".to_string(),
            ..Options::default()
        };
        assert_eq!(options.default_title, "Saved");
        assert_eq!(options.highlight_source, HighlightSource::Bundled);
    }
}
