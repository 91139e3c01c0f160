//! A headless smooth-scroll engine.
//!
//! For browser bindings (event listeners, `requestAnimationFrame`), see the `smoothscroll-web`
//! crate.
//!
//! The engine turns wheel and keyboard input into queued, eased scroll animations:
//! - input is resolved to the element that actually scrolls (or the page root), with a cached
//!   ancestor walk;
//! - each accepted input pushes a [`ScrollRequest`] onto a queue;
//! - every animation frame, [`SmoothScroll::tick`] advances all requests along the pulse curve
//!   and applies the combined pixel step through the host [`Dom`].
//!
//! It is UI-agnostic. The host is expected to provide:
//! - element geometry (`scrollHeight`, `clientHeight`, `scrollTop`) and computed `overflow-y`
//! - a way to scroll the window or an element by a pixel delta
//! - a frame clock (`now_ms`) and a frame loop
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod dom;
mod engine;
mod key;
mod options;
mod overflow;
mod pulse;
mod touchpad;
mod types;


pub use dom::Dom;
pub use engine::SmoothScroll;
pub use key::NodeKey;
pub use options::{
    DEFAULT_DELAY_MS, END_OVERSHOOT_PX, EnableFor, FINE_DELTA_THRESHOLD, FRAME_ROOT_MARGIN_PX,
    OVERFLOW_CACHE_TTL_MS, OVERFLOW_MARGIN_PX, PAGE_FRACTION, ScrollOptions, WHEEL_NOTCH,
};
pub use overflow::OverflowCache;
pub use pulse::{Easing, Pulse};
pub use touchpad::TouchpadDetector;
pub use types::{
    Disposition, Key, KeyInput, Modifiers, OverflowY, ScrollOwner, ScrollRequest, WheelInput,
};
