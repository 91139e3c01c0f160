use wasm_bindgen::prelude::*;

use crate::install::{SmoothScrollHandle, install, parse_options};

/// JavaScript entry point: `new SmoothScroller(JSON.stringify({ step_size: 80 }))`.
#[wasm_bindgen]
pub struct SmoothScroller {
    handle: Option<SmoothScrollHandle>,
}

#[wasm_bindgen]
impl SmoothScroller {
    /// Installs smooth scrolling on the current window. `options_json` may be omitted.
    #[wasm_bindgen(constructor)]
    pub fn new(options_json: Option<String>) -> Result<SmoothScroller, JsValue> {
        let options = match options_json.as_deref() {
            Some(json) => parse_options(json).map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => Default::default(),
        };
        Ok(Self {
            handle: install(options)?,
        })
    }

    /// `false` when the user agent was rejected or after `uninstall`.
    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    #[wasm_bindgen(js_name = isAnimating)]
    pub fn is_animating(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| h.is_animating())
    }

    #[wasm_bindgen(js_name = scrollBy)]
    pub fn scroll_by(&self, x: f64, y: f64) {
        if let Some(handle) = &self.handle {
            handle.scroll_by(x, y);
        }
    }

    pub fn uninstall(&mut self) {
        self.handle = None;
    }
}
