/// The element that actually scrolls for a given input target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollOwner<N> {
    /// The page itself; scrolled through the window.
    Root,
    Element(N),
}

impl<N> ScrollOwner<N> {
    pub fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }

    pub fn element(&self) -> Option<&N> {
        match self {
            Self::Root => None,
            Self::Element(n) => Some(n),
        }
    }
}

/// Computed `overflow-y` of an element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OverflowY {
    #[default]
    Visible,
    Hidden,
    Clip,
    Scroll,
    Auto,
}

impl OverflowY {
    /// Parses a computed style value; unknown values map to `Visible`.
    pub fn from_css(value: &str) -> Self {
        match value.trim() {
            "hidden" => Self::Hidden,
            "clip" => Self::Clip,
            "scroll" => Self::Scroll,
            "auto" | "overlay" => Self::Auto,
            _ => Self::Visible,
        }
    }

    pub fn can_scroll(self) -> bool {
        matches!(self, Self::Scroll | Self::Auto)
    }
}

/// Keys the engine reacts to. Everything else is `Other(key_code)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    Left,
    Up,
    Right,
    Down,
    Space,
    PageUp,
    PageDown,
    End,
    Home,
    Other(u32),
}

impl Key {
    /// Maps a legacy DOM `keyCode`.
    pub fn from_key_code(code: u32) -> Self {
        match code {
            37 => Self::Left,
            38 => Self::Up,
            39 => Self::Right,
            40 => Self::Down,
            32 => Self::Space,
            33 => Self::PageUp,
            34 => Self::PageDown,
            35 => Self::End,
            36 => Self::Home,
            other => Self::Other(other),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };
}

/// A wheel event as reported by the host.
///
/// Deltas use the legacy `wheelDelta` convention: positive means "wheel up", one notch is
/// usually 120.
#[derive(Clone, Debug, PartialEq)]
pub struct WheelInput<N> {
    pub target: N,
    pub delta_x: Option<f64>,
    pub delta_y: Option<f64>,
    /// Combined delta, used as vertical when no per-axis delta is available.
    pub delta: Option<f64>,
    pub default_prevented: bool,
}

impl<N> WheelInput<N> {
    pub fn vertical(target: N, delta_y: f64) -> Self {
        Self {
            target,
            delta_x: None,
            delta_y: Some(delta_y),
            delta: None,
            default_prevented: false,
        }
    }

    /// Per-axis deltas, falling back to the combined delta on the vertical axis.
    pub fn axis_deltas(&self) -> (f64, f64) {
        let x = self.delta_x.unwrap_or(0.0);
        let y = self.delta_y.unwrap_or(0.0);
        if x == 0.0 && y == 0.0 {
            return (0.0, self.delta.unwrap_or(0.0));
        }
        (x, y)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct KeyInput<N> {
    pub key: Key,
    pub modifiers: Modifiers,
    pub target: N,
    pub default_prevented: bool,
}

impl<N> KeyInput<N> {
    pub fn new(key: Key, target: N) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
            target,
            default_prevented: false,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// What the host should do with the native event after the engine saw it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposition {
    /// The engine scheduled a scroll; the host must prevent the default action.
    ///
    /// `start_loop` is set when the frame loop was idle and the host must start calling
    /// `tick`.
    Consumed { start_loop: bool },
    /// Native scrolling proceeds.
    PassThrough,
}

impl Disposition {
    pub fn is_consumed(self) -> bool {
        matches!(self, Self::Consumed { .. })
    }

    pub fn starts_loop(self) -> bool {
        matches!(self, Self::Consumed { start_loop: true })
    }
}

/// One pending animation in the scroll queue.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollRequest<N> {
    pub target: ScrollOwner<N>,
    pub x: f64,
    pub y: f64,
    /// Distance already applied on each axis, seeded just off zero so the first frame that
    /// reaches a whole pixel is not swallowed by truncation.
    pub last_x: f64,
    pub last_y: f64,
    pub start_ms: u64,
}

impl<N> ScrollRequest<N> {
    pub fn new(target: ScrollOwner<N>, x: f64, y: f64, start_ms: u64) -> Self {
        Self {
            target,
            x,
            y,
            last_x: if x < 0.0 { 0.99 } else { -0.99 },
            last_y: if y < 0.0 { 0.99 } else { -0.99 },
            start_ms,
        }
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.start_ms)
    }
}
