use alloc::string::String;
use alloc::sync::Arc;

/// Content must overflow its box by more than this before an element counts as scrollable.
pub const OVERFLOW_MARGIN_PX: f64 = 10.0;

/// Inside a frame, the root only counts as scrollable when it overflows by more than this.
pub const FRAME_ROOT_MARGIN_PX: f64 = 10.0;

/// Extra distance added to an End-key jump so rounding never stops short of the bottom.
pub const END_OVERSHOOT_PX: f64 = 10.0;

/// The overflow cache is wiped this often.
pub const OVERFLOW_CACHE_TTL_MS: u64 = 10_000;

/// The delta reported for one discrete wheel notch.
pub const WHEEL_NOTCH: f64 = 120.0;

/// Deltas at or below this magnitude are fine-grained and are not rescaled by `step_size`.
pub const FINE_DELTA_THRESHOLD: f64 = 1.2;

/// Fraction of the visible height scrolled by Page Up/Down and Space.
pub const PAGE_FRACTION: f64 = 0.9;

/// Default `delay` passed to `SmoothScroll::scroll_by`.
pub const DEFAULT_DELAY_MS: u64 = 1000;

/// Decides whether the engine should install itself for a given user agent.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnableFor {
    Always,
    Never,
    /// Case-insensitive substring match on the user agent.
    UserAgentContains(String),
    #[cfg_attr(feature = "serde", serde(skip))]
    Predicate(Arc<dyn Fn(&str) -> bool + Send + Sync>),
}

impl EnableFor {
    pub fn matches(&self, user_agent: &str) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::UserAgentContains(needle) => user_agent
                .to_ascii_lowercase()
                .contains(needle.to_ascii_lowercase().as_str()),
            Self::Predicate(f) => f(user_agent),
        }
    }
}

impl Default for EnableFor {
    fn default() -> Self {
        Self::UserAgentContains(String::from("chrome"))
    }
}

impl core::fmt::Debug for EnableFor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Always => f.write_str("Always"),
            Self::Never => f.write_str("Never"),
            Self::UserAgentContains(s) => f.debug_tuple("UserAgentContains").field(s).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Configuration for [`crate::SmoothScroll`].
///
/// Options are read once when the engine is constructed. With `feature = "serde"`, every field
/// is optional when deserializing; missing fields take their defaults.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScrollOptions {
    /// Frames per second assumed by the timer fallback, in Hz.
    pub frame_rate: u32,
    /// Duration of a single scroll animation.
    pub animation_time_ms: u64,
    /// Pixels scrolled per wheel notch.
    pub step_size: f64,

    /// Shape progress with the pulse curve; linear when disabled.
    pub pulse_algorithm: bool,
    /// Ratio of "tail" to "acceleration" in the pulse curve.
    pub pulse_scale: f64,
    /// Output multiplier for the pulse curve. `1.0` means "normalize so that pulse(1) == 1".
    pub pulse_normalize: f64,

    /// Two enqueues closer than this are accelerated.
    pub acceleration_delta_ms: u64,
    /// Upper bound of the acceleration factor. `1.0` disables acceleration.
    pub acceleration_max: f64,

    pub keyboard_support: bool,
    /// Pixels scrolled per arrow key press.
    pub arrow_scroll: f64,

    /// When false, wheel input classified as touchpad is left to native scrolling.
    pub touchpad_support: bool,
    /// When false, `background-attachment: fixed` is switched to `scroll` on init.
    pub fixed_background: bool,
    /// Comma separated selectors. Input targeting an element under a match is not intercepted.
    pub excluded: String,

    pub enable_for: EnableFor,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            frame_rate: 150,
            animation_time_ms: 400,
            step_size: 120.0,
            pulse_algorithm: true,
            pulse_scale: 8.0,
            pulse_normalize: 1.0,
            acceleration_delta_ms: 20,
            acceleration_max: 1.0,
            keyboard_support: true,
            arrow_scroll: 50.0,
            touchpad_support: true,
            fixed_background: true,
            excluded: String::new(),
            enable_for: EnableFor::default(),
        }
    }
}

impl ScrollOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_frame_rate(mut self, frame_rate: u32) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    pub fn with_animation_time_ms(mut self, animation_time_ms: u64) -> Self {
        self.animation_time_ms = animation_time_ms;
        self
    }

    pub fn with_step_size(mut self, step_size: f64) -> Self {
        self.step_size = step_size;
        self
    }

    pub fn with_pulse(mut self, enabled: bool, scale: f64, normalize: f64) -> Self {
        self.pulse_algorithm = enabled;
        self.pulse_scale = scale;
        self.pulse_normalize = normalize;
        self
    }

    pub fn with_pulse_algorithm(mut self, enabled: bool) -> Self {
        self.pulse_algorithm = enabled;
        self
    }

    /// Enables acceleration for enqueues closer than `delta_ms`, capped at `max`.
    pub fn with_acceleration(mut self, delta_ms: u64, max: f64) -> Self {
        self.acceleration_delta_ms = delta_ms;
        self.acceleration_max = max;
        self
    }

    pub fn with_keyboard_support(mut self, enabled: bool) -> Self {
        self.keyboard_support = enabled;
        self
    }

    pub fn with_arrow_scroll(mut self, px: f64) -> Self {
        self.arrow_scroll = px;
        self
    }

    pub fn with_touchpad_support(mut self, enabled: bool) -> Self {
        self.touchpad_support = enabled;
        self
    }

    pub fn with_fixed_background(mut self, enabled: bool) -> Self {
        self.fixed_background = enabled;
        self
    }

    pub fn with_excluded(mut self, selectors: impl Into<String>) -> Self {
        self.excluded = selectors.into();
        self
    }

    pub fn with_enable_for(mut self, enable_for: EnableFor) -> Self {
        self.enable_for = enable_for;
        self
    }

    pub fn with_enable_for_predicate(
        mut self,
        f: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.enable_for = EnableFor::Predicate(Arc::new(f));
        self
    }

    pub fn acceleration_enabled(&self) -> bool {
        self.acceleration_max != 1.0
    }

    /// Interval for the timer fallback between two frames.
    pub fn frame_interval_ms(&self, delay_ms: u64) -> u64 {
        delay_ms / u64::from(self.frame_rate.max(1)) + 1
    }

    /// Iterates over the non-empty selectors in `excluded`.
    pub fn excluded_selectors(&self) -> impl Iterator<Item = &str> + Clone {
        self.excluded
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Copies the options with out-of-range values pulled back into range.
    pub(crate) fn sanitized(mut self) -> Self {
        self.frame_rate = self.frame_rate.max(1);
        self.animation_time_ms = self.animation_time_ms.max(1);
        if !(self.pulse_scale.is_finite() && self.pulse_scale > 0.0) {
            sswarn!(pulse_scale = self.pulse_scale, "invalid pulse_scale; using 8");
            self.pulse_scale = 8.0;
        }
        if !(self.pulse_normalize.is_finite() && self.pulse_normalize > 0.0) {
            self.pulse_normalize = 1.0;
        }
        if !(self.acceleration_max.is_finite() && self.acceleration_max >= 1.0) {
            self.acceleration_max = 1.0;
        }
        self
    }
}
