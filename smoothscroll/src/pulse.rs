//! Viscous-fluid easing: a fixed force applied over a short interval (damped acceleration),
//! followed by an exponential bleed of the velocity over a longer tail.
//!
//! See Michael Herf, <http://stereopsis.com/stopping/>.

use core::cell::OnceCell;

#[cfg(feature = "std")]
fn exp(x: f64) -> f64 {
    x.exp()
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
fn exp(x: f64) -> f64 {
    libm::exp(x)
}

#[cfg(all(not(feature = "std"), not(feature = "libm")))]
compile_error!("smoothscroll needs either the `std` or the `libm` feature");

/// The pulse curve.
///
/// `sample` maps progress in `[0, 1]` to eased progress in `[0, 1]`. When `normalize` is `1.0`
/// the output is divided by the raw curve value at `x = 1`, computed on first use.
#[derive(Clone, Debug)]
pub struct Pulse {
    scale: f64,
    normalize: f64,
    factor: OnceCell<f64>,
}

impl Pulse {
    pub fn new(scale: f64, normalize: f64) -> Self {
        Self {
            scale,
            normalize,
            factor: OnceCell::new(),
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    fn raw(&self, x: f64) -> f64 {
        let x = x * self.scale;
        if x < 1.0 {
            x - (1.0 - exp(-x))
        } else {
            // The acceleration phase ended at e^-1; decay from there towards 1.
            let start = exp(-1.0);
            let tail = 1.0 - exp(-(x - 1.0));
            start + tail * (1.0 - start)
        }
    }

    fn factor(&self) -> f64 {
        if self.normalize == 1.0 {
            *self.factor.get_or_init(|| 1.0 / self.raw(1.0))
        } else {
            self.normalize
        }
    }

    pub fn sample(&self, x: f64) -> f64 {
        if x >= 1.0 {
            return 1.0;
        }
        if x <= 0.0 || x.is_nan() {
            return 0.0;
        }
        self.raw(x) * self.factor()
    }
}

impl Default for Pulse {
    fn default() -> Self {
        Self::new(8.0, 1.0)
    }
}

/// Progress shaping applied to each queued request.
#[derive(Clone, Debug)]
pub enum Easing {
    Linear,
    Pulse(Pulse),
}

impl Easing {
    pub fn sample(&self, t: f64) -> f64 {
        match self {
            Self::Linear => t.clamp(0.0, 1.0),
            Self::Pulse(p) => p.sample(t),
        }
    }
}
