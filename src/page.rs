//! The live page a clip is taken from.

use url::Url;

use crate::document::serialize_attributes;
use crate::dom::{self, Document, Selection};
use crate::encoding;
use crate::url_utils;

/// A parsed document plus the address it was loaded from.
///
/// The document is the live tree: the selection controller adds its overlay
/// to it and capture reads from it, but capture never leaves changes behind.
pub struct Page {
    doc: Document,
    url: Option<Url>,
}

impl Page {
    /// Wrap an already parsed document.
    #[must_use]
    pub fn new(doc: Document, url: Option<Url>) -> Self {
        Self { doc, url }
    }

    /// Parse HTML loaded from `url`.
    ///
    /// A blank or relative `url` is treated as unknown.
    #[must_use]
    pub fn parse(html: &str, url: Option<&str>) -> Self {
        Self::new(dom::parse(html), url.and_then(url_utils::parse_url))
    }

    /// Parse raw bytes, decoding them by BOM or `<meta>` charset.
    #[must_use]
    pub fn from_bytes(html: &[u8], url: Option<&str>) -> Self {
        Self::parse(&encoding::decode_html(html), url)
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.doc
    }

    #[must_use]
    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    /// The page address for clip metadata, empty when unknown.
    #[must_use]
    pub fn source_url(&self) -> String {
        self.url.as_ref().map(Url::to_string).unwrap_or_default()
    }

    /// Text of the first `<title>`, whitespace collapsed.
    ///
    /// `None` when the page has no title or only whitespace in it.
    /// DOM equivalent: `document.title`
    #[must_use]
    pub fn title(&self) -> Option<String> {
        let title = self.doc.select("title").first();
        let text = dom::text_content(&title)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        (!text.is_empty()).then_some(text)
    }

    #[must_use]
    pub fn body(&self) -> Selection<'_> {
        self.doc.select("body").first()
    }

    /// `<body>` attributes as ` name="value"` pairs, for re-applying in a clip.
    #[must_use]
    pub fn body_attributes(&self) -> String {
        serialize_attributes(&dom::get_all_attributes(&self.body()))
    }

    /// Resolve a reference found in the page against its address.
    #[must_use]
    pub fn resolve(&self, reference: &str) -> String {
        url_utils::resolve(reference, self.url())
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("url", &self.url.as_ref().map(Url::as_str))
            .field("title", &self.title())
            .finish_non_exhaustive()
    }
}
