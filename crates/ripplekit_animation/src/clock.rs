//! Time sources and the animation clock
//!
//! The engine never reads the wall clock directly. It asks a `TimeSource`,
//! which lets hosts use a monotonic system clock and lets tests step time by
//! hand.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Monotonic time since an arbitrary, fixed epoch
pub trait TimeSource: Send + Sync {
    fn now(&self) -> Duration;
}

/// Shared time source handle
pub type SharedTimeSource = Arc<dyn TimeSource>;

/// Wall-clock time source backed by `Instant`
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn shared() -> SharedTimeSource {
        Arc::new(Self::new())
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Time source that only moves when told to
///
/// Stores nanoseconds in an atomic so one clock can be shared between an
/// engine, a scheduler and the test driving them.
#[derive(Debug, Default)]
pub struct ManualClock {
    nanos: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Move time forward
    pub fn advance(&self, by: Duration) {
        self.nanos.fetch_add(by.as_nanos() as u64, Ordering::SeqCst);
    }

    /// Move time forward by fractional milliseconds
    pub fn advance_ms(&self, ms: f64) {
        self.advance(Duration::from_secs_f64(ms.max(0.0) / 1000.0));
    }

    /// Jump to an absolute time; never moves backwards
    pub fn set(&self, to: Duration) {
        self.nanos.fetch_max(to.as_nanos() as u64, Ordering::SeqCst);
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
    }
}

/// Start timestamp plus the frame grid of one ripple run
///
/// Durations are kept in `f64` milliseconds so the frame grid lines up with
/// the elapsed time it is compared against.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimationClock {
    start: Option<Duration>,
    frames: i32,
    duration_ms: f64,
    frame_duration_ms: f64,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the start timestamp and derive the frame duration
    ///
    /// `frames <= 0` yields a non-finite frame duration; callers validate the
    /// frame count before asking for a frame index.
    pub fn begin(&mut self, now: Duration, duration_ms: f32, frames: i32) {
        self.start = Some(now);
        self.frames = frames;
        self.duration_ms = duration_ms as f64;
        self.frame_duration_ms = duration_ms as f64 / frames as f64;
    }

    /// Forget the start timestamp
    pub fn clear(&mut self) {
        self.start = None;
    }

    pub fn start_time(&self) -> Option<Duration> {
        self.start
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    pub fn frame_duration_ms(&self) -> f64 {
        self.frame_duration_ms
    }

    /// Delay between two frame evaluations
    pub fn frame_interval(&self) -> Duration {
        if self.frame_duration_ms.is_finite() && self.frame_duration_ms > 0.0 {
            Duration::from_secs_f64(self.frame_duration_ms / 1000.0)
        } else {
            Duration::ZERO
        }
    }

    /// Milliseconds since start, at sub-millisecond precision
    pub fn elapsed_ms(&self, now: Duration) -> f64 {
        match self.start {
            Some(start) => now.saturating_sub(start).as_nanos() as f64 / 1_000_000.0,
            None => 0.0,
        }
    }

    /// Whether the run's duration has fully elapsed
    pub fn is_finished(&self, now: Duration) -> bool {
        self.duration_ms <= self.elapsed_ms(now)
    }

    /// Frame index for an elapsed time: `floor(elapsed / frame_duration)`
    ///
    /// Never reaches `frames`; the last frame lasts until the run finishes.
    pub fn frame_index(&self, elapsed_ms: f64) -> i32 {
        let frame = (elapsed_ms / self.frame_duration_ms).floor();
        if !frame.is_finite() {
            return 0;
        }
        let frame = frame as i32;
        if self.frames > 0 {
            frame.min(self.frames - 1)
        } else {
            frame
        }
    }

    /// Fraction of the whole duration covered by a frame: `frame·frame_duration/duration`
    pub fn frame_progress(&self, frame: i32) -> f32 {
        if self.duration_ms > 0.0 {
            ((frame as f64 * self.frame_duration_ms) / self.duration_ms) as f32
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), Duration::ZERO);

        clock.advance(Duration::from_millis(16));
        clock.advance_ms(0.5);
        assert_eq!(clock.now(), Duration::from_micros(16_500));

        clock.set(Duration::from_millis(10));
        assert_eq!(clock.now(), Duration::from_micros(16_500));
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }

    #[test]
    fn test_frame_grid() {
        let mut clock = AnimationClock::new();
        clock.begin(Duration::from_millis(100), 400.0, 10);

        assert_eq!(clock.start_time(), Some(Duration::from_millis(100)));
        assert_eq!(clock.frame_duration_ms(), 40.0);
        assert_eq!(clock.frame_interval(), Duration::from_millis(40));

        let now = Duration::from_millis(100 + 219);
        assert_eq!(clock.elapsed_ms(now), 219.0);
        assert_eq!(clock.frame_index(clock.elapsed_ms(now)), 5);
        assert_eq!(clock.frame_progress(5), 0.5);
        assert!(!clock.is_finished(now));
        assert!(clock.is_finished(Duration::from_millis(500)));
    }

    #[test]
    fn test_last_frame_stays_inside_grid() {
        let mut clock = AnimationClock::new();
        clock.begin(Duration::ZERO, 400.0, 7);

        let now = Duration::from_nanos(399_999_999);
        assert!(!clock.is_finished(now));
        assert_eq!(clock.frame_index(clock.elapsed_ms(now)), 6);
        assert_eq!(clock.frame_index(1_000.0), 6);
    }

    #[test]
    fn test_elapsed_is_sub_millisecond() {
        let mut clock = AnimationClock::new();
        clock.begin(Duration::ZERO, 400.0, 60);
        assert_eq!(clock.elapsed_ms(Duration::from_micros(1_250)), 1.25);
    }

    #[test]
    fn test_zero_frames_has_no_interval() {
        let mut clock = AnimationClock::new();
        clock.begin(Duration::ZERO, 400.0, 0);
        assert!(!clock.frame_duration_ms().is_finite());
        assert_eq!(clock.frame_interval(), Duration::ZERO);
        assert_eq!(clock.frame_index(10.0), 0);
    }

    #[test]
    fn test_cleared_clock_reports_zero_elapsed() {
        let mut clock = AnimationClock::new();
        clock.begin(Duration::from_millis(5), 100.0, 10);
        clock.clear();
        assert_eq!(clock.start_time(), None);
        assert_eq!(clock.elapsed_ms(Duration::from_secs(1)), 0.0);
    }
}
