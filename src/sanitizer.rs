//! Denylist sanitization of captured subtrees.
//!
//! Removes scripts, frames, `noscript` fallbacks and ad-marked elements from a
//! detached clone before it is serialized into a clip.
//!
//! The ad selectors match by substring (`[class*='ad-']`) or by token (`.ad`,
//! `#ad`) and will also take out legitimate elements whose identifiers happen
//! to contain `ad-`, e.g. `class="head-ad-free"` or `id="load-more"`. That
//! over-removal is accepted policy; there is no allowlist.

use crate::dom::{self, Selection};

/// Selectors removed from every captured subtree, applied in this order.
pub const BLOCK_SELECTORS: &[&str] = &[
    "script",
    "iframe",
    "noscript",
    "[data-ad]",
    "[id*='ad-']",
    "[class*='ad-']",
    ".ad",
    "#ad",
];

/// Remove every descendant of `root` that matches [`BLOCK_SELECTORS`].
///
/// `root` itself is never removed, only its descendants. An empty selection
/// is a no-op. Running it twice leaves the tree unchanged the second time.
///
/// DOM equivalent: `root.querySelectorAll(selector).forEach(el => el.remove())`
/// for each selector.
pub fn sanitize(root: &Selection) {
    if !root.exists() {
        return;
    }

    for selector in BLOCK_SELECTORS {
        dom::remove(&root.select(selector));
    }
}

/// Whether anything under `root` would be removed by [`sanitize`].
#[must_use]
pub fn has_blocked_content(root: &Selection) -> bool {
    BLOCK_SELECTORS
        .iter()
        .any(|selector| root.select(selector).exists())
}
