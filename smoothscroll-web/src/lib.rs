//! Browser bindings for the `smoothscroll` engine.
//!
//! [`install`] registers wheel, keyboard and mouse listeners on the current window and drives
//! the engine from `requestAnimationFrame`. From JavaScript, use [`SmoothScroller`].
#![forbid(unsafe_code)]

mod bindings;
mod dom;
mod install;
mod node;


pub use bindings::SmoothScroller;
pub use dom::WebDom;
pub use install::{SmoothScrollHandle, install, install_from_json, standard_to_legacy};
pub use node::WebNode;
pub use smoothscroll::{EnableFor, ScrollOptions};
