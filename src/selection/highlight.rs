//! Overlay markup and the highlight stylesheet.

use tokio::sync::OnceCell;

use crate::styles::StylesheetFetcher;

/// `id` of the injected highlight `<style>` element.
pub const HIGHLIGHT_STYLE_ID: &str = "webclip-highlight-style";

/// `id` of the full-viewport overlay element.
pub const OVERLAY_ID: &str = "webclip-selection-overlay";

/// Class of the outline box that tracks the hovered element.
pub const HIGHLIGHT_BOX_CLASS: &str = "webclip-highlight-box";

/// Text shown while a selection session runs.
pub const INSTRUCTIONS: &str = "Hover to highlight, click to clip \u{2022} Press ESC to cancel";

/// Stylesheet compiled into the crate.
pub const BUNDLED_HIGHLIGHT_CSS: &str = include_str!("../../assets/highlight.css");

/// Where the highlight stylesheet comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HighlightSource {
    /// [`BUNDLED_HIGHLIGHT_CSS`].
    #[default]
    Bundled,
    /// Fetched once from this URL through the stylesheet fetcher.
    Remote(String),
}

/// Highlight stylesheet, loaded at most once per controller.
#[derive(Debug, Default)]
pub struct HighlightStyles {
    source: HighlightSource,
    css: OnceCell<String>,
}

impl HighlightStyles {
    #[must_use]
    pub fn new(source: HighlightSource) -> Self {
        Self {
            source,
            css: OnceCell::new(),
        }
    }

    /// The stylesheet text, loading it on first call.
    ///
    /// A failed remote fetch is logged and remembered as an empty
    /// stylesheet; later calls do not retry.
    pub async fn load<F: StylesheetFetcher>(&self, fetcher: &F) -> &str {
        self.css
            .get_or_init(|| async {
                match &self.source {
                    HighlightSource::Bundled => BUNDLED_HIGHLIGHT_CSS.to_string(),
                    HighlightSource::Remote(url) => match fetcher.fetch(url).await {
                        Ok(css) => css,
                        Err(e) => {
                            log::warn!("Highlight stylesheet unavailable: {e}");
                            String::new()
                        }
                    },
                }
            })
            .await
    }

    /// Whether the stylesheet has been loaded (successfully or not).
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.css.initialized()
    }
}

/// Overlay element with its instructions banner and hidden highlight box.
pub(crate) fn overlay_markup() -> String {
    format!(
        r#"<div id="{OVERLAY_ID}" class="webclip-selection-overlay"><div class="webclip-selection-instructions">{INSTRUCTIONS}</div><div class="{HIGHLIGHT_BOX_CLASS}" style="display: none"></div></div>"#
    )
}

/// `<style>` element carrying the highlight stylesheet.
pub(crate) fn style_markup(css: &str) -> String {
    format!(r#"<style id="{HIGHLIGHT_STYLE_ID}">{css}</style>"#)
}
