//! Interactive element selection.
//!
//! `SelectionController` runs the hover-to-highlight, click-to-choose session
//! over a page. It is a two-state machine, `Idle` and `Selecting`, driven by
//! named inputs; every input returns the [`Transition`] it caused so the
//! table can be exercised without an event loop.
//!
//! | state     | input                         | transition         |
//! |-----------|-------------------------------|--------------------|
//! | Idle      | enter                         | `Entered`          |
//! | Selecting | enter                         | `Ignored`          |
//! | Selecting | pointer move, valid target    | `Highlighted(t)`   |
//! | Selecting | pointer move, invalid target  | `HighlightCleared` |
//! | Selecting | pointer down, invalid target  | `Ignored`          |
//! | Selecting | pointer down, no handler      | `Ignored`          |
//! | Selecting | pointer down, valid target    | `Selected(t)`      |
//! | Selecting | Escape                        | `Cancelled`        |
//! | Selecting | exit                          | `Exited`           |
//! | Idle      | anything else                 | `Ignored`          |
//!
//! A target is valid when it is an element, is neither `<html>` nor `<body>`,
//! and is not part of the overlay. Targets are resolved from the pointer
//! position on every input, with the overlay's `pointer-events` switched off
//! for the duration of the hit test so the element underneath is found.
//!
//! On `Selected`, the handler is taken out of the controller and the session
//! is torn down before the handler runs: it never sees the overlay, and a
//! second pointer event cannot fire it again.

mod highlight;

pub use highlight::{
    HighlightSource, HighlightStyles, BUNDLED_HIGHLIGHT_CSS, HIGHLIGHT_BOX_CLASS,
    HIGHLIGHT_STYLE_ID, INSTRUCTIONS, OVERLAY_ID,
};
pub use hit_test::{HitTester, Point, Rect, StaticLayout};

use crate::dom::{self, Document, NodeId, Selection};
use crate::styles::StylesheetFetcher;

/// Key that cancels a session.
pub const ESCAPE_KEY: &str = "Escape";

/// Callback receiving the chosen element.
pub type SelectionHandler = Box<dyn FnOnce(NodeId)>;

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    /// Overlay present; `target` is the element currently highlighted.
    Selecting { target: Option<NodeId> },
}

/// Outcome of one controller input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A session started.
    Entered,
    /// The highlight box moved onto this element.
    Highlighted(NodeId),
    /// The pointer left every valid target; the highlight box is hidden.
    HighlightCleared,
    /// The session ended with this element handed to the handler.
    Selected(NodeId),
    /// The user pressed Escape; no handler ran.
    Cancelled,
    /// The session was closed by the caller.
    Exited,
    /// The input had no effect in the current state.
    Ignored,
}

/// Interactive selection session over one page.
pub struct SelectionController<H> {
    state: SelectionState,
    handler: Option<SelectionHandler>,
    hit_tester: H,
    highlight: HighlightStyles,
}

impl<H: HitTester> SelectionController<H> {
    #[must_use]
    pub fn new(hit_tester: H, highlight_source: HighlightSource) -> Self {
        Self {
            state: SelectionState::Idle,
            handler: None,
            hit_tester,
            highlight: HighlightStyles::new(highlight_source),
        }
    }

    #[must_use]
    pub fn state(&self) -> SelectionState {
        self.state
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.state, SelectionState::Selecting { .. })
    }

    /// Element under the highlight box, if any.
    #[must_use]
    pub fn current_target(&self) -> Option<NodeId> {
        match self.state {
            SelectionState::Selecting { target } => target,
            SelectionState::Idle => None,
        }
    }

    #[must_use]
    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    #[must_use]
    pub fn hit_tester(&self) -> &H {
        &self.hit_tester
    }

    /// Register the callback for the next selection, replacing any other.
    ///
    /// Allowed at any time, including while a session runs.
    pub fn set_selection_handler(&mut self, handler: impl FnOnce(NodeId) + 'static) {
        self.handler = Some(Box::new(handler));
    }

    /// Start a session: inject highlight styles, then attach the overlay.
    ///
    /// Does nothing while a session is already running. Starting without a
    /// handler is allowed (a warning is logged); one registered later is used.
    pub async fn enter_selection_mode<F: StylesheetFetcher>(
        &mut self,
        doc: &Document,
        fetcher: &F,
    ) -> Transition {
        if self.is_active() {
            return Transition::Ignored;
        }

        if self.handler.is_none() {
            log::warn!("Selection handler not set - selection clicks may not work");
        }

        let css = self.highlight.load(fetcher).await;
        inject_highlight_styles(doc, css);

        if !overlay(doc).exists() {
            dom::append_html(&doc.select("body"), &highlight::overlay_markup());
        }

        self.state = SelectionState::Selecting { target: None };
        log::debug!("Selection mode entered");
        Transition::Entered
    }

    /// Track the element under the pointer.
    pub fn pointer_move(&mut self, doc: &Document, point: Point) -> Transition {
        if !self.is_active() {
            return Transition::Ignored;
        }

        let highlight_box = overlay(doc).select(&format!(".{HIGHLIGHT_BOX_CLASS}"));

        let Some(target) = self.target_at(doc, point) else {
            dom::set_style_property(&highlight_box, "display", "none");
            self.state = SelectionState::Selecting { target: None };
            return Transition::HighlightCleared;
        };

        let rect = self.hit_tester.bounding_rect(doc, target).unwrap_or_default();
        dom::set_style_property(&highlight_box, "display", "block");
        dom::set_style_property(&highlight_box, "left", &format!("{}px", rect.left));
        dom::set_style_property(&highlight_box, "top", &format!("{}px", rect.top));
        dom::set_style_property(&highlight_box, "width", &format!("{}px", rect.width));
        dom::set_style_property(&highlight_box, "height", &format!("{}px", rect.height));

        self.state = SelectionState::Selecting {
            target: Some(target),
        };
        Transition::Highlighted(target)
    }

    /// Choose the element under the pointer.
    ///
    /// The target is resolved from this point, not from the last hover.
    pub fn pointer_down(&mut self, doc: &Document, point: Point) -> Transition {
        if !self.is_active() {
            return Transition::Ignored;
        }

        let Some(target) = self.target_at(doc, point) else {
            return Transition::Ignored;
        };

        let Some(handler) = self.handler.take() else {
            log::warn!("Selection handler not set");
            return Transition::Ignored;
        };

        self.teardown(doc);
        log::debug!("Element selected, invoking handler");
        handler(target);

        Transition::Selected(target)
    }

    /// Cancel on Escape; other keys are ignored.
    pub fn key_down(&mut self, doc: &Document, key: &str) -> Transition {
        if !self.is_active() || key != ESCAPE_KEY {
            return Transition::Ignored;
        }

        self.teardown(doc);
        log::debug!("Selection cancelled");
        Transition::Cancelled
    }

    /// End the session without selecting. Safe to call when idle.
    pub fn exit_selection_mode(&mut self, doc: &Document) -> Transition {
        let was_active = self.is_active();
        self.teardown(doc);

        if was_active {
            Transition::Exited
        } else {
            Transition::Ignored
        }
    }

    /// Element under `point`, or `None` when it is not a valid target.
    fn target_at(&self, doc: &Document, point: Point) -> Option<NodeId> {
        let target = self.element_under_point(doc, point)?;
        is_valid_target(doc, target).then_some(target)
    }

    /// Hit test with the overlay made transparent to the pointer.
    fn element_under_point(&self, doc: &Document, point: Point) -> Option<NodeId> {
        let overlay = overlay(doc);
        let Some(overlay_id) = dom::node_id(&overlay) else {
            return self.hit_tester.element_from_point(doc, point);
        };

        let previous = dom::style_property(&overlay, "pointer-events");
        dom::set_style_property(&overlay, "pointer-events", "none");
        let element = self.hit_tester.element_from_point(doc, point);
        dom::set_style_property(
            &overlay,
            "pointer-events",
            previous.as_deref().unwrap_or("all"),
        );

        element.filter(|&el| !dom::contains(doc, overlay_id, el))
    }

    /// Remove every node the session added and return to `Idle`.
    fn teardown(&mut self, doc: &Document) {
        dom::remove(&overlay(doc));
        dom::remove(&doc.select(&format!("#{HIGHLIGHT_STYLE_ID}")));
        self.state = SelectionState::Idle;
    }
}

fn overlay(doc: &Document) -> Selection<'_> {
    doc.select(&format!("#{OVERLAY_ID}"))
}

fn is_valid_target(doc: &Document, target: NodeId) -> bool {
    let Some(node) = dom::node_by_id(doc, target) else {
        return false;
    };
    if !node.is_element() {
        return false;
    }

    let is_root = [doc.select("html"), doc.select("body")]
        .iter()
        .any(|root| dom::node_id(root) == Some(target));
    if is_root {
        return false;
    }

    dom::node_id(&overlay(doc)).is_none_or(|overlay_id| !dom::contains(doc, overlay_id, target))
}

/// Add the highlight `<style>` to `<head>` (or `<body>`) once.
fn inject_highlight_styles(doc: &Document, css: &str) {
    if css.is_empty() || doc.select(&format!("#{HIGHLIGHT_STYLE_ID}")).exists() {
        return;
    }

    let head = doc.select("head");
    let parent = if head.exists() { head } else { doc.select("body") };
    dom::append_html(&parent, &highlight::style_markup(css));
}
