use smoothscroll::{Dom, OverflowY};
use wasm_bindgen::{JsCast, JsValue};

use crate::WebNode;

/// [`Dom`] over the live document of a browser window.
pub struct WebDom {
    window: web_sys::Window,
    document: web_sys::Document,
    html: web_sys::Element,
    is_frame: bool,
}

/// Quirks mode scrolls the body instead of the root element.
pub(crate) fn body_is_scroll_root(compat_mode: &str) -> bool {
    !compat_mode.contains("CSS")
}

impl WebDom {
    /// Returns `None` when the window has no document element.
    pub fn new(window: web_sys::Window) -> Option<Self> {
        let document = window.document()?;
        let html = document.document_element()?;
        let is_frame = detect_frame(&window);
        Some(Self {
            window,
            document,
            html,
            is_frame,
        })
    }

    pub fn window(&self) -> &web_sys::Window {
        &self.window
    }

    pub fn document(&self) -> &web_sys::Document {
        &self.document
    }

    fn set_background_scroll(element: Option<web_sys::HtmlElement>) {
        if let Some(el) = element {
            let _ = el.style().set_property("background-attachment", "scroll");
        }
    }
}

/// A cross-origin parent makes `window.top` throw; that is still a frame.
fn detect_frame(window: &web_sys::Window) -> bool {
    match window.top() {
        Ok(Some(top)) => {
            let top: &JsValue = top.as_ref();
            let this: &JsValue = window.as_ref();
            top != this
        }
        Ok(None) => false,
        Err(_) => true,
    }
}

impl Dom for WebDom {
    type Node = WebNode;

    /// Resolved on every call: a quirks-mode body may appear after install.
    fn root(&self) -> WebNode {
        let body = self
            .document
            .body()
            .filter(|_| body_is_scroll_root(&self.document.compat_mode()));
        match body {
            Some(body) => WebNode::new(body.unchecked_into::<web_sys::Element>()),
            None => WebNode::new(self.html.clone()),
        }
    }

    fn body(&self) -> Option<WebNode> {
        self.document
            .body()
            .map(|b| WebNode::new(b.unchecked_into::<web_sys::Element>()))
    }

    fn parent(&self, node: &WebNode) -> Option<WebNode> {
        node.element().parent_element().map(WebNode::new)
    }

    fn scroll_height(&self, node: &WebNode) -> f64 {
        f64::from(node.element().scroll_height())
    }

    fn client_height(&self, node: &WebNode) -> f64 {
        f64::from(node.element().client_height())
    }

    fn scroll_top(&self, node: &WebNode) -> f64 {
        f64::from(node.element().scroll_top())
    }

    fn overflow_y(&self, node: &WebNode) -> OverflowY {
        self.window
            .get_computed_style(node.element())
            .ok()
            .flatten()
            .and_then(|style| style.get_property_value("overflow-y").ok())
            .map(|v| OverflowY::from_css(&v))
            .unwrap_or_default()
    }

    fn node_name<'a>(&'a self, node: &'a WebNode) -> &'a str {
        node.name()
    }

    fn is_content_editable(&self, node: &WebNode) -> bool {
        node.element()
            .dyn_ref::<web_sys::HtmlElement>()
            .is_some_and(|el| el.is_content_editable())
    }

    fn embed_src(&self, node: &WebNode) -> Option<String> {
        node.element().get_attribute("src")
    }

    fn matches_selector(&self, node: &WebNode, selector: &str) -> bool {
        // An invalid selector throws; treat it as "no match".
        node.element().matches(selector).unwrap_or(false)
    }

    fn is_frame(&self) -> bool {
        self.is_frame
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    fn scroll_window_by(&mut self, dx: i64, dy: i64) {
        self.window.scroll_by_with_x_and_y(dx as f64, dy as f64);
    }

    fn scroll_element_by(&mut self, node: &WebNode, dx: i64, dy: i64) {
        let el = node.element();
        if dx != 0 {
            el.set_scroll_left(el.scroll_left() + dx as i32);
        }
        if dy != 0 {
            el.set_scroll_top(el.scroll_top() + dy as i32);
        }
    }

    fn disable_fixed_background(&mut self) {
        Self::set_background_scroll(self.document.body());
        Self::set_background_scroll(
            self.document
                .document_element()
                .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok()),
        );
    }
}
