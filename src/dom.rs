//! DOM Operations Adapter
//!
//! Provides browser-DOM-style operations using the `dom_query` crate.
//! Capture code talks in terms of `outerHTML`, `isConnected`, `contains`
//! and friends; this layer maps those onto dom_query selections and node ids.

// Re-export core types for external use
pub use dom_query::{Document, NodeId, NodeRef, Selection};

// Re-export StrTendril for external use
pub use tendril::StrTendril;

// === Attribute Operations ===

/// Get element ID attribute
///
/// DOM equivalent: `element.id`
#[inline]
#[must_use]
pub fn id(sel: &Selection) -> Option<String> {
    sel.attr("id").map(|s| s.to_string())
}

/// Get any attribute value
///
/// DOM equivalent: `element.getAttribute("name")`
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Set an attribute value
///
/// DOM equivalent: `element.setAttribute("name", "value")`
#[inline]
pub fn set_attribute(sel: &Selection, name: &str, value: &str) {
    sel.set_attr(name, value);
}

/// Remove an attribute
///
/// DOM equivalent: `element.removeAttribute("name")`
#[inline]
pub fn remove_attribute(sel: &Selection, name: &str) {
    sel.remove_attr(name);
}

/// Get all attributes as key-value pairs, in source order
///
/// Returns empty vector if node has no attributes or if selection is empty.
#[must_use]
pub fn get_all_attributes(sel: &Selection) -> Vec<(String, String)> {
    sel.nodes()
        .first()
        .map(|node| {
            node.attrs()
                .iter()
                .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                .collect()
        })
        .unwrap_or_default()
}

// === Tag/Node Information ===

/// Id of the first node in a selection
#[inline]
#[must_use]
pub fn node_id(sel: &Selection) -> Option<NodeId> {
    sel.nodes().first().map(|node| node.id)
}

/// Look up a node by id
///
/// Returns `None` for ids that do not belong to this document's arena.
#[inline]
#[must_use]
pub fn node_by_id(doc: &Document, id: NodeId) -> Option<NodeRef<'_>> {
    doc.tree.get(&id)
}

/// Wrap a node id in a selection
///
/// The selection is empty when the id is unknown.
#[must_use]
pub fn select_node(doc: &Document, id: NodeId) -> Selection<'_> {
    match node_by_id(doc, id) {
        Some(node) => Selection::from(node),
        None => doc.select(":not(*)"),
    }
}

/// Whether the node is still attached to the document
///
/// DOM equivalent: `node.isConnected`
#[must_use]
pub fn is_connected(doc: &Document, id: NodeId) -> bool {
    let root_id = doc.root().id;
    if id == root_id {
        return true;
    }

    node_by_id(doc, id)
        .is_some_and(|node| node.ancestors(None).iter().any(|anc| anc.id == root_id))
}

/// Whether `other` is `container` or one of its descendants
///
/// DOM equivalent: `container.contains(other)`
#[must_use]
pub fn contains(doc: &Document, container: NodeId, other: NodeId) -> bool {
    if container == other {
        return true;
    }

    node_by_id(doc, other)
        .is_some_and(|node| node.ancestors(None).iter().any(|anc| anc.id == container))
}

// === Text Content ===

/// Get all text content of node and descendants
///
/// DOM equivalent: `node.textContent`
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Get inner HTML content
///
/// DOM equivalent: `element.innerHTML`
#[inline]
#[must_use]
pub fn inner_html(sel: &Selection) -> StrTendril {
    sel.inner_html()
}

/// Get outer HTML content
///
/// DOM equivalent: `element.outerHTML`
#[inline]
#[must_use]
pub fn outer_html(sel: &Selection) -> StrTendril {
    sel.html()
}

// === Tree Manipulation ===

/// Remove elements from tree
///
/// DOM equivalent: `element.remove()`
#[inline]
pub fn remove(sel: &Selection) {
    sel.remove();
}

/// Append HTML content
///
/// DOM equivalent: `element.insertAdjacentHTML("beforeend", html)`
#[inline]
pub fn append_html(sel: &Selection, html: &str) {
    sel.append_html(html);
}

/// Clone document
///
/// Serializes and re-parses, so the clone shares nothing with the source.
/// A tree the parser could not have produced, such as a `<div>` appended
/// inside a `<p>`, comes back restructured the way a parser would nest it.
/// DOM equivalent: `document.cloneNode(true)`
pub fn clone_document(doc: &Document) -> Document {
    Document::from(doc.html().to_string())
}

// === Inline Style ===

/// Read one property out of an element's inline `style` attribute
///
/// Property names compare case-insensitively; the last declaration wins.
#[must_use]
pub fn style_property(sel: &Selection, property: &str) -> Option<String> {
    let style = get_attribute(sel, "style")?;
    style
        .split(';')
        .filter_map(|decl| decl.split_once(':'))
        .filter(|(name, _)| name.trim().eq_ignore_ascii_case(property))
        .map(|(_, value)| value.trim().to_string())
        .last()
}

/// Set one property in an element's inline `style` attribute
///
/// Existing declarations of the property are replaced, others are kept in
/// order. DOM equivalent: `element.style.setProperty(property, value)`
pub fn set_style_property(sel: &Selection, property: &str, value: &str) {
    let mut declarations: Vec<String> = get_attribute(sel, "style")
        .unwrap_or_default()
        .split(';')
        .map(str::trim)
        .filter(|decl| !decl.is_empty())
        .filter(|decl| {
            decl.split_once(':')
                .is_none_or(|(name, _)| !name.trim().eq_ignore_ascii_case(property))
        })
        .map(str::to_string)
        .collect();
    declarations.push(format!("{property}: {value}"));

    set_attribute(sel, "style", &declarations.join("; "));
}

/// Whether the node or one of its ancestors sets `pointer-events: none` inline
#[must_use]
pub fn pointer_events_disabled(node: &NodeRef) -> bool {
    let disabled = |n: &NodeRef| {
        style_property(&Selection::from(n.clone()), "pointer-events")
            .is_some_and(|value| value.eq_ignore_ascii_case("none"))
    };

    disabled(node) || node.ancestors(None).iter().any(disabled)
}

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}
