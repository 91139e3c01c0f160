use core::hash::{Hash, Hasher};
use core::sync::atomic::{AtomicU32, Ordering};

use wasm_bindgen::{JsCast, JsValue};

/// Expando property holding the id assigned to an element.
const ID_PROPERTY: &str = "__smoothscrollId";

static NEXT_ID: AtomicU32 = AtomicU32::new(1);

/// A DOM element with a stable identity, usable as an overflow cache key.
///
/// The id is stored on the element itself, so wrapping the same element twice yields equal
/// handles.
#[derive(Clone, Debug)]
pub struct WebNode {
    id: u32,
    element: web_sys::Element,
    name: String,
}

impl WebNode {
    pub fn new(element: web_sys::Element) -> Self {
        let id = element_id(&element);
        let name = element.tag_name();
        Self { id, element, name }
    }

    /// Resolves an event target to the element it belongs to (text nodes map to their parent).
    pub fn from_event_target(target: web_sys::EventTarget) -> Option<Self> {
        if let Some(el) = target.dyn_ref::<web_sys::Element>() {
            return Some(Self::new(el.clone()));
        }
        let node = target.dyn_into::<web_sys::Node>().ok()?;
        node.parent_element().map(Self::new)
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn element(&self) -> &web_sys::Element {
        &self.element
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for WebNode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for WebNode {}

impl Hash for WebNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

fn element_id(element: &web_sys::Element) -> u32 {
    let key = JsValue::from_str(ID_PROPERTY);
    if let Some(id) = js_sys::Reflect::get(element, &key)
        .ok()
        .and_then(|v| v.as_f64())
    {
        return id as u32;
    }
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    // Frozen or exotic objects reject the expando; such a node just never hits the cache.
    let _ = js_sys::Reflect::set(element, &key, &JsValue::from_f64(f64::from(id)));
    id
}
