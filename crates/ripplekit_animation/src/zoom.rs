//! Zoom pulse
//!
//! A one-shot scale transform of the whole surface: `1.0 → scale → 1.0`,
//! half the configured duration each way, with the reverse half replaying the
//! interpolator backwards. It runs on its own timeline, independent of the
//! ripple frame loop, and is handed to a `ScaleAnimator` backend to play.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use ripplekit_core::{Point, Transform};

use crate::clock::SharedTimeSource;
use crate::easing::Easing;

/// Description of a scale pulse
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleAnimation {
    pub from: f32,
    pub to: f32,
    /// Scale pivot, the surface center
    pub pivot: Point,
    /// Duration of each half (forward and reverse)
    pub half_duration: Duration,
    pub easing: Easing,
}

impl ScaleAnimation {
    /// Pulse from 1.0 to `scale` and back over `duration_ms`
    pub fn pulse(scale: f32, pivot: Point, duration_ms: f32, easing: Easing) -> Self {
        let half_ms = (duration_ms / 2.0).max(0.0);
        Self {
            from: 1.0,
            to: scale,
            pivot,
            half_duration: Duration::from_secs_f64(half_ms as f64 / 1000.0),
            easing,
        }
    }

    /// Forward plus reverse
    pub fn total_duration(&self) -> Duration {
        self.half_duration * 2
    }

    /// Scale at `elapsed` since the pulse started; `None` once it has finished
    pub fn scale_at(&self, elapsed: Duration) -> Option<f32> {
        if self.half_duration.is_zero() || elapsed >= self.total_duration() {
            return None;
        }

        let half = self.half_duration.as_secs_f32();
        let t = elapsed.as_secs_f32();
        let eased = if t < half {
            self.easing.apply(t / half)
        } else {
            self.easing.apply(1.0 - (t - half) / half)
        };
        Some(self.from + (self.to - self.from) * eased)
    }

    /// Scale transform around the pivot at `elapsed`
    pub fn transform_at(&self, elapsed: Duration) -> Option<Transform> {
        self.scale_at(elapsed)
            .map(|scale| Transform::scale_centered(scale, self.pivot))
    }
}

/// Backend that plays scale pulses on the decorated surface
pub trait ScaleAnimator {
    fn start_scale_animation(&mut self, animation: ScaleAnimation);
}

#[derive(Default)]
struct PlayerInner {
    active: Option<(ScaleAnimation, Duration)>,
    started: u64,
}

/// A `ScaleAnimator` that evaluates pulses against a time source
///
/// Clones share state, so a host can keep one clone for rendering while the
/// decorator owns another. Starting a pulse replaces the one in flight.
#[derive(Clone)]
pub struct ZoomPlayer {
    inner: Arc<Mutex<PlayerInner>>,
    clock: SharedTimeSource,
}

impl ZoomPlayer {
    pub fn new(clock: SharedTimeSource) -> Self {
        Self {
            inner: Arc::new(Mutex::new(PlayerInner::default())),
            clock,
        }
    }

    fn lock(&self) -> MutexGuard<'_, PlayerInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current scale, 1.0 when no pulse is playing
    pub fn current_scale(&self) -> f32 {
        self.current_transform()
            .map(|transform| match transform {
                Transform::Scale { sx, .. } => sx,
                Transform::Identity => 1.0,
            })
            .unwrap_or(1.0)
    }

    /// Transform for the current instant, `None` when idle
    pub fn current_transform(&self) -> Option<Transform> {
        let now = self.clock.now();
        let mut inner = self.lock();
        let transform = inner
            .active
            .as_ref()
            .and_then(|(animation, started)| animation.transform_at(now.saturating_sub(*started)));
        if transform.is_none() {
            inner.active = None;
        }
        transform
    }

    pub fn is_active(&self) -> bool {
        self.current_transform().is_some()
    }

    /// Number of pulses started so far
    pub fn pulses_started(&self) -> u64 {
        self.lock().started
    }
}

impl ScaleAnimator for ZoomPlayer {
    fn start_scale_animation(&mut self, animation: ScaleAnimation) {
        let now = self.clock.now();
        tracing::debug!(
            "zoom pulse: 1.0 -> {} over {:?}",
            animation.to,
            animation.total_duration()
        );
        let mut inner = self.lock();
        inner.active = Some((animation, now));
        inner.started += 1;
    }
}
