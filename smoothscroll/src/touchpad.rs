use crate::options::WHEEL_NOTCH;

/// Guesses whether wheel input comes from a touchpad.
///
/// Discrete wheels usually report multiples of 120 per notch; touchpads report arbitrary
/// fine-grained deltas. The detector keeps the last three magnitudes and reports "touchpad"
/// unless all three are multiples of 120.
///
/// This is a heuristic. A wheel whose driver reports other step sizes is classified as a
/// touchpad.
#[derive(Clone, Debug, PartialEq)]
pub struct TouchpadDetector {
    buffer: [f64; 3],
}

impl TouchpadDetector {
    pub fn new() -> Self {
        Self {
            buffer: [WHEEL_NOTCH; 3],
        }
    }

    /// Records a vertical delta and returns `true` if the recent input looks like a touchpad.
    ///
    /// A zero delta is ignored and never classified as touchpad.
    pub fn observe(&mut self, delta_y: f64) -> bool {
        if delta_y == 0.0 || !delta_y.is_finite() {
            return false;
        }
        self.buffer.rotate_left(1);
        self.buffer[2] = delta_y.abs();
        !self.buffer.iter().all(|&d| is_notch_multiple(d))
    }

    pub fn recent(&self) -> [f64; 3] {
        self.buffer
    }
}

impl Default for TouchpadDetector {
    fn default() -> Self {
        Self::new()
    }
}

fn is_notch_multiple(d: f64) -> bool {
    d % WHEEL_NOTCH == 0.0
}
