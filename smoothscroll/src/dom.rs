use alloc::string::String;

use crate::{NodeKey, OverflowY};

/// The document the engine scrolls.
///
/// Implementations wrap a real DOM (see `smoothscroll-web`) or a test double. `Node` is a cheap
/// handle with a stable identity; it is used as the overflow cache key.
///
/// Geometry is in CSS pixels and mirrors the DOM properties of the same name.
pub trait Dom {
    type Node: NodeKey;

    /// The scrolling root (`document.documentElement` in standards mode, otherwise `body`).
    fn root(&self) -> Self::Node;

    /// `document.body`, if the document has one yet.
    fn body(&self) -> Option<Self::Node>;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    fn scroll_height(&self, node: &Self::Node) -> f64;
    fn client_height(&self, node: &Self::Node) -> f64;
    fn scroll_top(&self, node: &Self::Node) -> f64;
    fn overflow_y(&self, node: &Self::Node) -> OverflowY;

    /// Lowercase or uppercase tag name; comparisons are case-insensitive.
    fn node_name<'a>(&'a self, node: &'a Self::Node) -> &'a str;

    fn is_content_editable(&self, _node: &Self::Node) -> bool {
        false
    }

    /// The `src` attribute of an `<embed>`.
    fn embed_src(&self, _node: &Self::Node) -> Option<String> {
        None
    }

    /// Whether `node` itself matches a single CSS selector.
    fn matches_selector(&self, _node: &Self::Node, _selector: &str) -> bool {
        false
    }

    /// Whether the document is displayed inside a frame.
    fn is_frame(&self) -> bool {
        false
    }

    /// `window.innerHeight`.
    fn viewport_height(&self) -> f64;

    fn scroll_window_by(&mut self, dx: i64, dy: i64);

    /// Adds to the element's `scrollLeft` / `scrollTop`.
    fn scroll_element_by(&mut self, node: &Self::Node, dx: i64, dy: i64);

    /// Switches fixed page backgrounds to `background-attachment: scroll`.
    fn disable_fixed_background(&mut self) {}
}

pub(crate) fn is_node_name<D: Dom + ?Sized>(dom: &D, node: &D::Node, tag: &str) -> bool {
    dom.node_name(node).eq_ignore_ascii_case(tag)
}

/// Walks `node` and its ancestors looking for a match of any selector in `selectors`.
pub(crate) fn is_excluded<'a, D: Dom + ?Sized>(
    dom: &D,
    node: &D::Node,
    selectors: impl Iterator<Item = &'a str> + Clone,
) -> bool {
    if selectors.clone().next().is_none() {
        return false;
    }
    let mut cur = Some(node.clone());
    while let Some(n) = cur {
        if selectors.clone().any(|s| dom.matches_selector(&n, s)) {
            return true;
        }
        cur = dom.parent(&n);
    }
    false
}
