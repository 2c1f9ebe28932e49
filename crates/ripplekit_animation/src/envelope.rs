//! Peak-frame alpha envelopes
//!
//! Each overlay channel rises from frame 0 to its peak frame and decays from
//! the peak to the last frame. The normalized position along that envelope is
//! fed through the interpolator and scaled by the channel's maximum alpha.
//! The ripple additionally fades linearly over the whole run (`ripple_decay`).

use crate::easing::Easing;

/// Rise/decay envelope of one channel
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Envelope {
    /// Frame at which the envelope switches from rise to decay
    pub peak: i32,
    /// Total frames in the run
    pub total: i32,
    /// Maximum alpha, in [0, 255]
    pub max_alpha: f32,
}

impl Envelope {
    pub fn new(peak: i32, total: i32, max_alpha: f32) -> Self {
        Self {
            peak,
            total,
            max_alpha,
        }
    }

    /// Position along the envelope before clamping
    ///
    /// Frames up to and including the peak are on the rise branch. A zero-length
    /// branch (`peak == 0` on the rise, `peak == total` on the decay) is
    /// already at full intensity.
    pub fn position(&self, frame: i32) -> f32 {
        if frame - 1 < self.peak {
            if self.peak == 0 {
                return 1.0;
            }
            frame as f32 / self.peak as f32
        } else {
            if self.total == self.peak {
                return 1.0;
            }
            1.0 - (frame - self.peak) as f32 / (self.total - self.peak) as f32
        }
    }

    /// Channel alpha at `frame`: `round(max_alpha · easing(clamp(position)))`
    pub fn alpha(&self, frame: i32, easing: &Easing) -> u8 {
        let position = self.position(frame).clamp(0.0, 1.0);
        to_alpha(self.max_alpha * easing.apply(position))
    }
}

/// Ripple-only linear fade over the full run: `alpha − alpha · progress`
///
/// `progress` is `frame · frame_duration / duration`.
pub fn ripple_decay(alpha: u8, progress: f32) -> u8 {
    let alpha = alpha as f32;
    to_alpha(alpha - alpha * progress)
}

fn to_alpha(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}
