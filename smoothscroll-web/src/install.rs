use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use smoothscroll::{
    Disposition, Key, KeyInput, Modifiers, OVERFLOW_CACHE_TTL_MS, ScrollOptions, ScrollOwner,
    SmoothScroll, WheelInput,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use crate::{WebDom, WebNode};

/// `WheelEvent.deltaMode` values.
const DOM_DELTA_PIXEL: u32 = 0;
const DOM_DELTA_LINE: u32 = 1;

/// Converts a standard `WheelEvent` delta into the legacy `wheelDelta` scale.
///
/// Legacy deltas are positive for "wheel up" and one notch is 120; standard deltas point the
/// other way and depend on `deltaMode`.
pub fn standard_to_legacy(delta: f64, delta_mode: u32) -> f64 {
    let scale = match delta_mode {
        DOM_DELTA_PIXEL => 1.2,
        DOM_DELTA_LINE => 40.0,
        _ => 120.0,
    };
    -delta * scale
}

/// Period of the overflow cache wipe, as a timer delay.
pub(crate) fn cache_sweep_interval_ms() -> i32 {
    i32::try_from(OVERFLOW_CACHE_TTL_MS).unwrap_or(i32::MAX)
}

pub(crate) fn parse_options(json: &str) -> Result<ScrollOptions, serde_json::Error> {
    serde_json::from_str(json)
}

struct Shared {
    engine: SmoothScroll<WebNode>,
    dom: WebDom,
}

#[derive(Clone, Copy)]
enum PendingFrame {
    Animation(i32),
    Timeout(i32),
}

struct Runtime {
    window: web_sys::Window,
    shared: RefCell<Shared>,
    frame: RefCell<Option<Closure<dyn FnMut()>>>,
    pending: Cell<Option<PendingFrame>>,
}

impl Runtime {
    fn now_ms(&self) -> u64 {
        self.window
            .performance()
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now) as u64
    }

    fn schedule_frame(&self) {
        let frame = self.frame.borrow();
        let Some(callback) = frame.as_ref() else {
            return;
        };
        let f: &js_sys::Function = callback.as_ref().unchecked_ref();
        let pending = match self.window.request_animation_frame(f) {
            Ok(id) => Some(PendingFrame::Animation(id)),
            Err(_) => {
                let delay = self.shared.borrow().engine.next_frame_delay_ms();
                let delay = i32::try_from(delay).unwrap_or(i32::MAX);
                self.window
                    .set_timeout_with_callback_and_timeout_and_arguments_0(f, delay)
                    .ok()
                    .map(PendingFrame::Timeout)
            }
        };
        if pending.is_none() {
            // No frame will ever run: drop the animation so later input is not swallowed.
            let now_ms = self.now_ms();
            let mut shared = self.shared.borrow_mut();
            let Shared { engine, dom } = &mut *shared;
            engine.cancel();
            engine.tick(dom, now_ms);
        }
        self.pending.set(pending);
    }

    fn cancel_frame(&self) {
        match self.pending.take() {
            Some(PendingFrame::Animation(id)) => {
                let _ = self.window.cancel_animation_frame(id);
            }
            Some(PendingFrame::Timeout(id)) => self.window.clear_timeout_with_handle(id),
            None => {}
        }
    }

    fn on_frame(&self) {
        self.pending.set(None);
        let now_ms = self.now_ms();
        let more = {
            let mut shared = self.shared.borrow_mut();
            let Shared { engine, dom } = &mut *shared;
            engine.tick(dom, now_ms)
        };
        if more {
            self.schedule_frame();
        }
    }

    fn finish(&self, event: &web_sys::Event, disposition: Disposition) {
        if disposition.is_consumed() {
            event.prevent_default();
        }
        if disposition.starts_loop() {
            self.schedule_frame();
        }
    }

    fn on_wheel(&self, event: &web_sys::Event) {
        let Some(target) = event.target().and_then(WebNode::from_event_target) else {
            return;
        };
        let (delta_x, delta_y, delta) = wheel_deltas(event);
        let input = WheelInput {
            target,
            delta_x,
            delta_y,
            delta,
            default_prevented: event.default_prevented(),
        };
        let now_ms = self.now_ms();
        let disposition = {
            let mut shared = self.shared.borrow_mut();
            let Shared { engine, dom } = &mut *shared;
            engine.on_wheel(dom, &input, now_ms)
        };
        self.finish(event, disposition);
    }

    fn on_key_down(&self, event: &web_sys::Event) {
        let Some(key_event) = event.dyn_ref::<web_sys::KeyboardEvent>() else {
            return;
        };
        let Some(target) = event.target().and_then(WebNode::from_event_target) else {
            return;
        };
        let input = KeyInput {
            key: Key::from_key_code(key_event.key_code()),
            modifiers: Modifiers {
                shift: key_event.shift_key(),
                ctrl: key_event.ctrl_key(),
                alt: key_event.alt_key(),
                meta: key_event.meta_key(),
            },
            target,
            default_prevented: event.default_prevented(),
        };
        let now_ms = self.now_ms();
        let disposition = {
            let mut shared = self.shared.borrow_mut();
            let Shared { engine, dom } = &mut *shared;
            engine.on_key_down(dom, &input, now_ms)
        };
        self.finish(event, disposition);
    }

    fn on_mouse_down(&self, event: &web_sys::Event) {
        if let Some(target) = event.target().and_then(WebNode::from_event_target) {
            self.shared.borrow_mut().engine.on_mouse_down(target);
        }
    }

    fn init(&self) {
        let mut shared = self.shared.borrow_mut();
        let Shared { engine, dom } = &mut *shared;
        engine.init(dom);
    }
}

/// Reads the legacy `wheelDelta*` properties, falling back to the standard `WheelEvent` deltas.
fn wheel_deltas(event: &web_sys::Event) -> (Option<f64>, Option<f64>, Option<f64>) {
    let x = legacy_property(event, "wheelDeltaX");
    let y = legacy_property(event, "wheelDeltaY");
    let delta = legacy_property(event, "wheelDelta");
    if x.is_some() || y.is_some() || delta.is_some() {
        return (x, y, delta);
    }
    match event.dyn_ref::<web_sys::WheelEvent>() {
        Some(wheel) => {
            let mode = wheel.delta_mode();
            (
                Some(standard_to_legacy(wheel.delta_x(), mode)),
                Some(standard_to_legacy(wheel.delta_y(), mode)),
                None,
            )
        }
        None => (None, None, None),
    }
}

fn legacy_property(event: &web_sys::Event, name: &str) -> Option<f64> {
    js_sys::Reflect::get(event, &JsValue::from_str(name))
        .ok()?
        .as_f64()
}

/// `wheel` where the browser supports it, the legacy `mousewheel` otherwise.
fn wheel_event_name(document: &web_sys::Document) -> &'static str {
    let supports_wheel = document
        .create_element("div")
        .ok()
        .and_then(|div| js_sys::Reflect::has(&div, &JsValue::from_str("onwheel")).ok())
        .unwrap_or(false);
    if supports_wheel { "wheel" } else { "mousewheel" }
}

struct Listener {
    target: web_sys::EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl Listener {
    fn add(
        target: web_sys::EventTarget,
        event: &'static str,
        runtime: &Rc<Runtime>,
        passive: Option<bool>,
        handler: fn(&Runtime, &web_sys::Event),
    ) -> Result<Self, JsValue> {
        let weak: Weak<Runtime> = Rc::downgrade(runtime);
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            if let Some(runtime) = weak.upgrade() {
                handler(&runtime, &event);
            }
        });
        let f: &js_sys::Function = callback.as_ref().unchecked_ref();
        match passive {
            Some(passive) => {
                let options = web_sys::AddEventListenerOptions::new();
                options.set_passive(passive);
                target.add_event_listener_with_callback_and_add_event_listener_options(
                    event, f, &options,
                )?;
            }
            None => target.add_event_listener_with_callback(event, f)?,
        }
        Ok(Self {
            target,
            event,
            callback,
        })
    }

    fn remove(&self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// Periodic wipe of the overflow cache, so cached elements are released while the page idles.
struct CacheSweep {
    window: web_sys::Window,
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

impl CacheSweep {
    fn start(runtime: &Rc<Runtime>) -> Result<Self, JsValue> {
        let weak = Rc::downgrade(runtime);
        let callback = Closure::<dyn FnMut()>::new(move || {
            if let Some(runtime) = weak.upgrade() {
                runtime.shared.borrow_mut().engine.clear_overflow_cache();
            }
        });
        let id = runtime
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                cache_sweep_interval_ms(),
            )?;
        Ok(Self {
            window: runtime.window.clone(),
            id,
            _callback: callback,
        })
    }
}

impl Drop for CacheSweep {
    fn drop(&mut self) {
        self.window.clear_interval_with_handle(self.id);
    }
}

/// Installed smooth scrolling. Dropping the handle removes every listener it added.
pub struct SmoothScrollHandle {
    runtime: Rc<Runtime>,
    listeners: Vec<Listener>,
    sweep: Option<CacheSweep>,
}

impl SmoothScrollHandle {
    pub fn is_animating(&self) -> bool {
        self.runtime.shared.borrow().engine.is_animating()
    }

    pub fn options(&self) -> ScrollOptions {
        self.runtime.shared.borrow().engine.options().clone()
    }

    /// Animates the page root by `(x, y)` pixels.
    pub fn scroll_by(&self, x: f64, y: f64) {
        let now_ms = self.runtime.now_ms();
        let start_loop = self
            .runtime
            .shared
            .borrow_mut()
            .engine
            .scroll_by(ScrollOwner::Root, x, y, now_ms);
        if start_loop {
            self.runtime.schedule_frame();
        }
    }

    /// Stops any running animation, the cache wipe timer and the listeners.
    pub fn uninstall(self) {}

    fn listen(
        &mut self,
        target: &web_sys::EventTarget,
        event: &'static str,
        passive: Option<bool>,
        handler: fn(&Runtime, &web_sys::Event),
    ) -> Result<(), JsValue> {
        let listener = Listener::add(target.clone(), event, &self.runtime, passive, handler)?;
        self.listeners.push(listener);
        Ok(())
    }
}

impl Drop for SmoothScrollHandle {
    fn drop(&mut self) {
        for listener in &self.listeners {
            listener.remove();
        }
        self.sweep.take();
        self.runtime.cancel_frame();
        self.runtime.shared.borrow_mut().engine.cancel();
        self.runtime.frame.borrow_mut().take();
    }
}

/// Installs smooth scrolling on the current window.
///
/// Returns `Ok(None)` when `options.enable_for` rejects the browser's user agent.
pub fn install(options: ScrollOptions) -> Result<Option<SmoothScrollHandle>, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;

    let engine = SmoothScroll::new(options);
    let user_agent = window.navigator().user_agent().unwrap_or_default();
    if !engine.is_enabled_for(&user_agent) {
        return Ok(None);
    }

    let dom = WebDom::new(window.clone())
        .ok_or_else(|| JsValue::from_str("document has no root element"))?;
    let keyboard = engine.options().keyboard_support;

    let runtime = Rc::new(Runtime {
        window: window.clone(),
        shared: RefCell::new(Shared { engine, dom }),
        frame: RefCell::new(None),
        pending: Cell::new(None),
    });

    let weak = Rc::downgrade(&runtime);
    let frame = Closure::<dyn FnMut()>::new(move || {
        if let Some(runtime) = weak.upgrade() {
            runtime.on_frame();
        }
    });
    *runtime.frame.borrow_mut() = Some(frame);

    // Listeners go straight into the handle so a failed registration unwinds the earlier ones.
    let mut handle = SmoothScrollHandle {
        runtime,
        listeners: Vec::with_capacity(4),
        sweep: None,
    };
    let window_target: web_sys::EventTarget = window.unchecked_into();
    handle.listen(
        &window_target,
        wheel_event_name(&document),
        Some(false),
        Runtime::on_wheel,
    )?;
    handle.listen(&window_target, "mousedown", None, Runtime::on_mouse_down)?;
    if keyboard {
        handle.listen(&window_target, "keydown", None, Runtime::on_key_down)?;
    }
    handle.listen(&window_target, "load", None, |runtime, _| runtime.init())?;
    handle.sweep = Some(CacheSweep::start(&handle.runtime)?);

    if document.ready_state() == "complete" {
        handle.runtime.init();
    }

    Ok(Some(handle))
}

/// [`install`] with options read from a JSON object. Missing fields take their defaults.
pub fn install_from_json(json: &str) -> Result<Option<SmoothScrollHandle>, JsValue> {
    let options = parse_options(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    install(options)
}
