use alloc::vec::Vec;

use crate::dom::{is_excluded, is_node_name};
use crate::options::{
    DEFAULT_DELAY_MS, END_OVERSHOOT_PX, FINE_DELTA_THRESHOLD, PAGE_FRACTION, WHEEL_NOTCH,
};
use crate::{
    Disposition, Dom, Easing, Key, KeyInput, NodeKey, OverflowCache, Pulse, ScrollOptions,
    ScrollOwner, ScrollRequest, TouchpadDetector, WheelInput,
};

/// Tags whose keyboard input belongs to the element, not to page scrolling.
const EDITABLE_TAGS: [&str; 4] = ["input", "textarea", "select", "embed"];

/// A headless smooth-scroll engine.
///
/// The engine owns all scrolling state (queue, overflow cache, direction, active element) and
/// never talks to a browser directly. Your adapter:
/// - forwards input via `on_wheel` / `on_key_down` / `on_mouse_down`, and calls
///   `preventDefault()` when they return [`Disposition::Consumed`];
/// - starts a frame loop when a handler reports `start_loop` (or `scroll_by` returns `true`),
///   calling `tick(dom, now_ms)` every animation frame until it returns `false`.
///
/// Time is always passed in as milliseconds from any monotonic clock.
#[derive(Clone, Debug)]
pub struct SmoothScroll<N> {
    options: ScrollOptions,
    easing: Easing,
    queue: Vec<ScrollRequest<N>>,
    cache: OverflowCache<N>,
    touchpad: TouchpadDetector,
    direction: (i8, i8),
    last_scroll_ms: Option<u64>,
    active_element: Option<N>,
    pending: bool,
    delay_ms: u64,
    init_done: bool,
}

impl<N: NodeKey> SmoothScroll<N> {
    pub fn new(options: ScrollOptions) -> Self {
        let options = options.sanitized();
        ssdebug!(
            frame_rate = options.frame_rate,
            animation_time_ms = options.animation_time_ms,
            step_size = options.step_size,
            acceleration_max = options.acceleration_max,
            "SmoothScroll::new"
        );
        let easing = if options.pulse_algorithm {
            Easing::Pulse(Pulse::new(options.pulse_scale, options.pulse_normalize))
        } else {
            Easing::Linear
        };
        Self {
            options,
            easing,
            queue: Vec::new(),
            cache: OverflowCache::new(),
            touchpad: TouchpadDetector::new(),
            direction: (0, 0),
            last_scroll_ms: None,
            active_element: None,
            pending: false,
            delay_ms: DEFAULT_DELAY_MS,
            init_done: false,
        }
    }

    pub fn options(&self) -> &ScrollOptions {
        &self.options
    }

    pub fn easing(&self) -> &Easing {
        &self.easing
    }

    /// Whether the engine should be installed for this user agent.
    pub fn is_enabled_for(&self, user_agent: &str) -> bool {
        self.options.enable_for.matches(user_agent)
    }

    /// Pending requests, oldest first.
    pub fn queue(&self) -> &[ScrollRequest<N>] {
        &self.queue
    }

    pub fn overflow_cache(&self) -> &OverflowCache<N> {
        &self.cache
    }

    pub fn active_element(&self) -> Option<&N> {
        self.active_element.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.init_done
    }

    /// `true` while a frame loop is running.
    pub fn is_animating(&self) -> bool {
        self.pending
    }

    /// Delay until the next frame for hosts without an animation-frame callback.
    pub fn next_frame_delay_ms(&self) -> u64 {
        self.options.frame_interval_ms(self.delay_ms)
    }

    /// Drops all pending requests. The next `tick` stops the loop.
    pub fn cancel(&mut self) {
        self.queue.clear();
    }

    /// One-time page setup. Does nothing until the document has a body.
    pub fn init<D>(&mut self, dom: &mut D)
    where
        D: Dom<Node = N> + ?Sized,
    {
        if self.init_done {
            return;
        }
        let Some(body) = dom.body() else {
            return;
        };

        if !self.options.fixed_background
            && !is_excluded(dom, &body, self.options.excluded_selectors())
        {
            dom.disable_fixed_background();
        }

        ssdebug!(
            is_frame = dom.is_frame(),
            keyboard = self.options.keyboard_support,
            "SmoothScroll::init"
        );
        // An element clicked before init keeps keyboard focus.
        if self.active_element.is_none() {
            self.active_element = Some(body);
        }
        self.init_done = true;
    }

    /// Empties the overflow cache. Hosts call this every [`crate::OVERFLOW_CACHE_TTL_MS`] so
    /// cached nodes are released even while no input arrives.
    pub fn clear_overflow_cache(&mut self) {
        self.cache.clear();
    }

    /// Records the element that keyboard scrolling targets from now on.
    pub fn on_mouse_down(&mut self, target: N) {
        self.active_element = Some(target);
    }

    /// Resolves the element that scrolls for `node`, going through the overflow cache.
    pub fn resolve_owner<D>(&mut self, dom: &D, node: &N, now_ms: u64) -> Option<ScrollOwner<N>>
    where
        D: Dom<Node = N> + ?Sized,
    {
        self.cache.resolve(dom, node, now_ms)
    }

    pub fn on_wheel<D>(
        &mut self,
        dom: &mut D,
        input: &WheelInput<N>,
        now_ms: u64,
    ) -> Disposition
    where
        D: Dom<Node = N> + ?Sized,
    {
        if !self.init_done {
            self.init(dom);
        }

        let target = &input.target;
        let Some(owner) = self.cache.resolve(dom, target, now_ms) else {
            return Disposition::PassThrough;
        };

        if input.default_prevented
            || self
                .active_element
                .as_ref()
                .is_some_and(|a| is_node_name(dom, a, "embed"))
            || is_pdf_embed(dom, target)
            || is_excluded(dom, target, self.options.excluded_selectors())
        {
            sstrace!("wheel: pass through");
            return Disposition::PassThrough;
        }

        let (mut dx, mut dy) = input.axis_deltas();

        if !self.options.touchpad_support && self.touchpad.observe(dy) {
            sstrace!(dy, "wheel: touchpad input left to native scrolling");
            return Disposition::PassThrough;
        }

        let scale = self.options.step_size / WHEEL_NOTCH;
        if dx.abs() > FINE_DELTA_THRESHOLD {
            dx *= scale;
        }
        if dy.abs() > FINE_DELTA_THRESHOLD {
            dy *= scale;
        }

        // Wheel up reports a positive delta and must move the content down.
        let start_loop = self.scroll_by(owner, -dx, -dy, now_ms);
        Disposition::Consumed { start_loop }
    }

    pub fn on_key_down<D>(
        &mut self,
        dom: &mut D,
        input: &KeyInput<N>,
        now_ms: u64,
    ) -> Disposition
    where
        D: Dom<Node = N> + ?Sized,
    {
        if !self.options.keyboard_support {
            return Disposition::PassThrough;
        }

        let target = &input.target;
        let m = input.modifiers;
        let modifier = m.ctrl || m.alt || m.meta || (m.shift && input.key != Key::Space);

        if EDITABLE_TAGS.iter().any(|t| is_node_name(dom, target, t))
            || dom.is_content_editable(target)
            || input.default_prevented
            || modifier
        {
            return Disposition::PassThrough;
        }
        // Space on a button presses it.
        if input.key == Key::Space && is_node_name(dom, target, "button") {
            return Disposition::PassThrough;
        }
        if is_excluded(dom, target, self.options.excluded_selectors()) {
            return Disposition::PassThrough;
        }

        if !self.init_done {
            self.init(dom);
        }

        let active = match &self.active_element {
            Some(a) => a.clone(),
            None => dom.body().unwrap_or_else(|| dom.root()),
        };
        let Some(owner) = self.cache.resolve(dom, &active, now_ms) else {
            return Disposition::PassThrough;
        };

        let (scroll_height, scroll_top, client_height) = match &owner {
            ScrollOwner::Root => {
                let root = dom.root();
                (
                    dom.scroll_height(&root),
                    dom.scroll_top(&root),
                    dom.viewport_height(),
                )
            }
            ScrollOwner::Element(el) => (
                dom.scroll_height(el),
                dom.scroll_top(el),
                dom.client_height(el),
            ),
        };

        let arrow = self.options.arrow_scroll;
        let page = client_height * PAGE_FRACTION;
        let (x, y) = match input.key {
            Key::Up => (0.0, -arrow),
            Key::Down => (0.0, arrow),
            Key::Left => (-arrow, 0.0),
            Key::Right => (arrow, 0.0),
            Key::Space if m.shift => (0.0, -page),
            Key::Space => (0.0, page),
            Key::PageUp => (0.0, -page),
            Key::PageDown => (0.0, page),
            Key::Home => (0.0, -scroll_top),
            Key::End => {
                let remaining = scroll_height - scroll_top - client_height;
                let y = if remaining > 0.0 {
                    remaining + END_OVERSHOOT_PX
                } else {
                    0.0
                };
                (0.0, y)
            }
            Key::Other(_) => return Disposition::PassThrough,
        };

        let start_loop = self.scroll_by(owner, x, y, now_ms);
        Disposition::Consumed { start_loop }
    }

    /// Queues a smooth scroll of `(x, y)` pixels on `target`.
    ///
    /// Returns `true` when the frame loop was idle and the host must start calling `tick`.
    pub fn scroll_by(&mut self, target: ScrollOwner<N>, x: f64, y: f64, now_ms: u64) -> bool {
        self.scroll_by_with_delay(target, x, y, now_ms, DEFAULT_DELAY_MS)
    }

    /// Same as `scroll_by`; `delay_ms` sets the timer-fallback frame interval of a newly started
    /// loop (see [`ScrollOptions::frame_interval_ms`]).
    pub fn scroll_by_with_delay(
        &mut self,
        target: ScrollOwner<N>,
        mut x: f64,
        mut y: f64,
        now_ms: u64,
        delay_ms: u64,
    ) -> bool {
        self.direction_check(x, y);

        if self.options.acceleration_enabled() {
            if let Some(last) = self.last_scroll_ms {
                let elapsed = now_ms.saturating_sub(last);
                if elapsed < self.options.acceleration_delta_ms {
                    let factor = (1.0 + 30.0 / elapsed as f64) / 2.0;
                    if factor > 1.0 {
                        let factor = factor.min(self.options.acceleration_max);
                        x *= factor;
                        y *= factor;
                    }
                }
            }
            self.last_scroll_ms = Some(now_ms);
        }

        if x == 0.0 && y == 0.0 {
            return false;
        }

        self.queue.push(ScrollRequest::new(target, x, y, now_ms));

        if self.pending {
            return false;
        }
        self.pending = true;
        self.delay_ms = if delay_ms == 0 {
            DEFAULT_DELAY_MS
        } else {
            delay_ms
        };
        sstrace!(x, y, now_ms, "frame loop started");
        true
    }

    /// A change of direction on either axis flushes the queue so a reversed gesture does not
    /// fight the animation still running the other way.
    fn direction_check(&mut self, x: f64, y: f64) {
        let dx = if x > 0.0 { 1 } else { -1 };
        let dy = if y > 0.0 { 1 } else { -1 };
        if self.direction != (dx, dy) {
            if !self.queue.is_empty() {
                sstrace!(dropped = self.queue.len(), "direction changed; queue flushed");
            }
            self.direction = (dx, dy);
            self.queue.clear();
            self.last_scroll_ms = None;
        }
    }

    /// Advances all queued animations to `now_ms` and applies the combined step.
    ///
    /// Returns `true` while more frames are needed.
    pub fn tick<D>(&mut self, dom: &mut D, now_ms: u64) -> bool
    where
        D: Dom<Node = N> + ?Sized,
    {
        let duration = self.options.animation_time_ms;
        let easing = &self.easing;
        let mut steps: Vec<(ScrollOwner<N>, i64, i64)> = Vec::new();

        self.queue.retain_mut(|item| {
            let elapsed = item.elapsed_ms(now_ms);
            let finished = elapsed >= duration;
            let position = if finished {
                1.0
            } else {
                elapsed as f64 / duration as f64
            };
            let position = easing.sample(position);

            let x = (item.x * position - item.last_x) as i64;
            let y = (item.y * position - item.last_y) as i64;
            item.last_x += x as f64;
            item.last_y += y as f64;

            match steps.iter_mut().find(|(t, _, _)| *t == item.target) {
                Some(step) => {
                    step.1 += x;
                    step.2 += y;
                }
                None => steps.push((item.target.clone(), x, y)),
            }

            !finished
        });

        for (target, x, y) in steps {
            if x == 0 && y == 0 {
                continue;
            }
            match target {
                ScrollOwner::Root => dom.scroll_window_by(x, y),
                ScrollOwner::Element(el) => dom.scroll_element_by(&el, x, y),
            }
        }

        if self.queue.is_empty() {
            if self.pending {
                sstrace!(now_ms, "frame loop idle");
            }
            self.pending = false;
            return false;
        }
        true
    }
}

fn is_pdf_embed<D: Dom + ?Sized>(dom: &D, node: &D::Node) -> bool {
    is_node_name(dom, node, "embed")
        && dom
            .embed_src(node)
            .is_some_and(|src| src.to_ascii_lowercase().contains(".pdf"))
}
