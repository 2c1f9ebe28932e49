//! Ripple animation engine
//!
//! The engine is a two-state machine (`Idle`, `Running`) that turns elapsed
//! time into paint parameters for the ripple circle and the optional
//! highlight rectangle.
//!
//! # Frame loop
//!
//! ```text
//! start(x, y) ──► post frame request (0 ms)
//!                      │
//!                      ▼
//!                   tick() ── elapsed ≥ duration ──► Complete (no repost)
//!                      │
//!                      ├── invalid config ─────────► Err (run reset, no repost)
//!                      │
//!                      └── Paint(instruction) + post frame request (frame_duration)
//! ```
//!
//! Frame requests are fixed-delay: each one is posted `frame_duration` after
//! the tick that posted it, so delivery can drift. The frame index is always
//! re-derived from the absolute elapsed time, which keeps the visuals correct
//! regardless of how many ticks actually ran.

use ripplekit_core::{Color, DrawContext, Paint, Point, Size};
use serde::Serialize;

use crate::clock::{AnimationClock, SharedTimeSource};
use crate::config::{DecoratorConfig, Trigger};
use crate::envelope::{ripple_decay, Envelope};
use crate::error::Result;
use crate::scheduler::{FrameRequestId, SharedScheduler};

/// Engine state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EngineState {
    Idle,
    Running,
}

/// Ripple circle for one frame
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RipplePaint {
    pub center: Point,
    pub radius: f32,
    pub paint: Paint,
}

/// Full-surface highlight for one frame
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct HighlightPaint {
    pub paint: Paint,
}

/// What to paint for one frame
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PaintInstruction {
    pub frame: i32,
    pub elapsed_ms: f64,
    pub highlight: Option<HighlightPaint>,
    pub ripple: RipplePaint,
}

impl PaintInstruction {
    /// Paint the highlight over the clip bounds, then the ripple circle
    pub fn draw(&self, ctx: &mut dyn DrawContext) {
        if let Some(highlight) = &self.highlight {
            let bounds = ctx.clip_bounds();
            ctx.draw_rect(bounds, &highlight.paint);
        }
        ctx.draw_circle(self.ripple.center, self.ripple.radius, &self.ripple.paint);
    }
}

/// Result of one frame evaluation
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameOutcome {
    /// Not running: nothing to paint and nothing rescheduled
    Idle,
    /// Paint this frame; another frame request has been posted
    Paint(PaintInstruction),
    /// The run just finished: stop painting and restore drawing state
    Complete,
}

impl FrameOutcome {
    pub fn instruction(&self) -> Option<&PaintInstruction> {
        match self {
            FrameOutcome::Paint(instruction) => Some(instruction),
            _ => None,
        }
    }
}

/// Per-run snapshot, taken at `start()`
#[derive(Clone, Debug)]
struct Run {
    config: DecoratorConfig,
    origin: Point,
    radius: f32,
}

/// Frame-driven ripple and highlight animation engine
///
/// One engine belongs to one decorated surface. All methods are meant to be
/// called from the host's UI thread.
pub struct RippleEngine {
    config: DecoratorConfig,
    time: SharedTimeSource,
    scheduler: SharedScheduler,
    clock: AnimationClock,
    size: Size,
    running: bool,
    current_frame: i32,
    run: Option<Run>,
    ripple_paint: Paint,
    highlight_paint: Paint,
    pending: Option<FrameRequestId>,
}

impl RippleEngine {
    pub fn new(config: DecoratorConfig, time: SharedTimeSource, scheduler: SharedScheduler) -> Self {
        let ripple_paint = Paint::stroke(config.ripple.color, config.ripple.stroke_width);
        let highlight_paint =
            Paint::fill(config.highlight.color(config.ripple.color)).with_anti_alias(false);
        Self {
            config,
            time,
            scheduler,
            clock: AnimationClock::new(),
            size: Size::ZERO,
            running: false,
            current_frame: 0,
            run: None,
            ripple_paint,
            highlight_paint,
            pending: None,
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    pub fn config(&self) -> &DecoratorConfig {
        &self.config
    }

    /// Mutable configuration; changes apply from the next `start()`
    pub fn config_mut(&mut self) -> &mut DecoratorConfig {
        &mut self.config
    }

    pub fn set_config(&mut self, config: DecoratorConfig) {
        self.ripple_paint.color = config.ripple.color;
        self.highlight_paint.color = config.highlight.color(config.ripple.color);
        self.config = config;
    }

    /// Set the ripple color, also recoloring a run in progress
    ///
    /// A highlight without its own color follows along.
    pub fn set_ripple_color(&mut self, color: Color) {
        self.config.ripple.color = color;
        self.ripple_paint.color = color;
        if self.config.highlight.color.is_none() {
            self.highlight_paint.color = color;
        }
    }

    /// Set the highlight color, also recoloring a run in progress
    pub fn set_highlight_color(&mut self, color: Color) {
        self.config.highlight.color = Some(color);
        self.highlight_paint.color = color;
    }

    pub fn ripple_trigger(&self) -> Trigger {
        self.config.ripple.trigger
    }

    // =========================================================================
    // Surface
    // =========================================================================

    pub fn on_surface_resized(&mut self, width: f32, height: f32) {
        self.size = Size::new(width, height);
    }

    pub fn surface_size(&self) -> Size {
        self.size
    }

    // =========================================================================
    // State Machine
    // =========================================================================

    pub fn state(&self) -> EngineState {
        if self.running {
            EngineState::Running
        } else {
            EngineState::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn current_frame(&self) -> i32 {
        self.current_frame
    }

    /// Start timestamp of the current (or cancelled) run
    pub fn start_time(&self) -> Option<std::time::Duration> {
        self.clock.start_time()
    }

    /// Ripple origin of the current run
    pub fn origin(&self) -> Option<Point> {
        self.run.as_ref().map(|run| run.origin)
    }

    /// Resolved ripple radius of the current run
    pub fn radius(&self) -> Option<f32> {
        self.run.as_ref().map(|run| run.radius)
    }

    /// Pending frame request, if any
    pub fn pending_request(&self) -> Option<FrameRequestId> {
        self.pending
    }

    /// Begin a run at `(x, y)`, restarting any run in progress
    pub fn start(&mut self, x: f32, y: f32) {
        let config = self.config.clone();
        let now = self.time.now();

        self.clock
            .begin(now, config.ripple.duration_ms, config.ripple.frames);

        self.ripple_paint = Paint {
            color: config.ripple.color,
            alpha: 0,
            style: config.ripple.style.paint_style(),
            stroke_width: config.ripple.stroke_width,
            anti_alias: true,
        };
        self.highlight_paint = Paint::fill(config.highlight.color(config.ripple.color))
            .with_alpha(0)
            .with_anti_alias(false);

        let radius = config
            .ripple
            .radius
            .unwrap_or_else(|| self.size.max_side() / 2.0 - config.ripple.padding as f32);
        let origin = if config.ripple.centered {
            self.size.center()
        } else {
            Point::new(x, y)
        };

        tracing::debug!(
            "ripple start at ({}, {}) radius={} duration={}ms frames={}",
            origin.x,
            origin.y,
            radius,
            config.ripple.duration_ms,
            config.ripple.frames
        );

        self.run = Some(Run {
            config,
            origin,
            radius,
        });
        self.running = true;
        self.current_frame = 0;
        self.repost(std::time::Duration::ZERO);
    }

    /// Stop the run; a request already posted may still fire and will no-op
    pub fn cancel(&mut self) {
        if self.running {
            tracing::debug!("ripple cancelled at frame {}", self.current_frame);
        }
        self.running = false;
        self.current_frame = 0;
    }

    /// Reset to the neutral state and release any pending frame request
    pub fn detach(&mut self) {
        self.cancel();
        self.release_pending();
        self.clock.clear();
        self.run = None;
        tracing::debug!("ripple engine detached");
    }

    /// Evaluate the frame for the current instant
    pub fn tick(&mut self) -> Result<FrameOutcome> {
        if !self.running {
            self.release_pending();
            return Ok(FrameOutcome::Idle);
        }
        let Some(run) = self.run.as_ref() else {
            self.running = false;
            self.release_pending();
            return Ok(FrameOutcome::Idle);
        };

        let now = self.time.now();
        if self.clock.is_finished(now) {
            tracing::debug!("ripple complete after {:.1}ms", self.clock.elapsed_ms(now));
            self.finish();
            return Ok(FrameOutcome::Complete);
        }

        if let Err(err) = run.config.validate() {
            tracing::warn!("ripple run aborted: {}", err);
            self.finish();
            return Err(err);
        }

        let elapsed_ms = self.clock.elapsed_ms(now);
        let frame = self.clock.frame_index(elapsed_ms);
        let progress = self.clock.frame_progress(frame);
        let config = &run.config;
        let frames = config.ripple.frames;

        let ripple_envelope = Envelope::new(
            config.ripple.peak_frame(),
            frames,
            config.ripple.max_alpha_scaled(),
        );
        self.ripple_paint.alpha = ripple_decay(
            ripple_envelope.alpha(frame, &config.interpolator),
            progress,
        );

        let highlight = if config.highlight.enabled {
            let envelope = Envelope::new(
                config.highlight.peak_frame(frames),
                frames,
                config.highlight.max_alpha_scaled(),
            );
            self.highlight_paint.alpha = envelope.alpha(frame, &config.interpolator);
            Some(HighlightPaint {
                paint: self.highlight_paint,
            })
        } else {
            None
        };

        let instruction = PaintInstruction {
            frame,
            elapsed_ms,
            highlight,
            ripple: RipplePaint {
                center: run.origin,
                radius: run.radius * progress,
                paint: self.ripple_paint,
            },
        };

        tracing::trace!(
            "ripple frame {} elapsed={:.2}ms radius={:.1} alpha={}",
            frame,
            elapsed_ms,
            instruction.ripple.radius,
            instruction.ripple.paint.alpha
        );

        self.current_frame = frame;
        self.repost(self.clock.frame_interval());
        Ok(FrameOutcome::Paint(instruction))
    }

    fn finish(&mut self) {
        self.release_pending();
        self.running = false;
        self.current_frame = 0;
        self.clock.clear();
        self.run = None;
    }

    /// Post one more frame request without touching the run state
    ///
    /// Used after completion so the host repaints without the overlay. The
    /// request is tracked like any frame request, so `detach()` releases it.
    pub fn request_redraw(&mut self) {
        self.repost(std::time::Duration::ZERO);
    }

    /// Keep at most one frame request in flight
    fn repost(&mut self, delay: std::time::Duration) {
        self.release_pending();
        self.pending = self.scheduler.post_delayed(delay);
    }

    fn release_pending(&mut self) {
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::clock::ManualClock;
    use crate::easing::Easing;
    use crate::error::{Channel, RippleError};
    use crate::scheduler::ManualScheduler;
    use ripplekit_core::{DrawCommand, PaintStyle, RecordingContext};

    struct Harness {
        clock: Arc<ManualClock>,
        scheduler: ManualScheduler,
        engine: RippleEngine,
    }

    fn harness(config: DecoratorConfig) -> Harness {
        let clock = ManualClock::shared();
        let scheduler = ManualScheduler::new(clock.clone());
        let mut engine = RippleEngine::new(config, clock.clone(), scheduler.shared_handle());
        engine.on_surface_resized(200.0, 100.0);
        Harness {
            clock,
            scheduler,
            engine,
        }
    }

    fn scenario_config() -> DecoratorConfig {
        let mut config = DecoratorConfig::default();
        config.ripple.frames = 10;
        config.ripple.peak_frame = Some(5);
        config.ripple.duration_ms = 400.0;
        config.ripple.max_alpha = 1.0;
        config.interpolator = Easing::Linear;
        config
    }

    #[test]
    fn test_start_then_first_tick_paints_frame_zero() {
        let mut h = harness(DecoratorConfig::default());
        assert_eq!(h.engine.state(), EngineState::Idle);

        h.engine.start(20.0, 30.0);
        assert_eq!(h.engine.state(), EngineState::Running);
        assert_eq!(h.scheduler.take_due().len(), 1);

        let outcome = h.engine.tick().unwrap();
        let instruction = outcome.instruction().unwrap();
        assert_eq!(instruction.frame, 0);
        assert_eq!(instruction.ripple.center, Point::new(20.0, 30.0));
        assert_eq!(instruction.ripple.radius, 0.0);
        assert_eq!(instruction.ripple.paint.alpha, 0);
        assert!(instruction.highlight.is_none());
    }

    #[test]
    fn test_midpoint_scenario() {
        let mut h = harness(scenario_config());
        h.engine.start(0.0, 0.0);
        h.clock.advance(Duration::from_millis(200));

        let outcome = h.engine.tick().unwrap();
        let instruction = outcome.instruction().unwrap();
        assert_eq!(instruction.frame, 5);
        assert_eq!(h.engine.current_frame(), 5);
        // Envelope is at full intensity; the linear decay halves it
        assert_eq!(instruction.ripple.paint.alpha, 128);
        // Derived radius is max(200, 100) / 2 = 100, half grown
        assert_eq!(instruction.ripple.radius, 50.0);
    }

    #[test]
    fn test_completion_returns_to_idle_without_reposting() {
        let mut h = harness(scenario_config());
        h.engine.start(0.0, 0.0);
        h.engine.tick().unwrap();
        h.scheduler.clear();

        h.clock.advance(Duration::from_millis(400));
        assert_eq!(h.engine.tick().unwrap(), FrameOutcome::Complete);
        assert_eq!(h.engine.state(), EngineState::Idle);
        assert_eq!(h.engine.current_frame(), 0);
        assert_eq!(h.engine.start_time(), None);
        assert!(!h.scheduler.has_pending());

        assert_eq!(h.engine.tick().unwrap(), FrameOutcome::Idle);
        assert!(!h.scheduler.has_pending());
    }

    #[test]
    fn test_each_paint_posts_one_request_after_frame_duration() {
        let mut h = harness(scenario_config());
        h.engine.start(0.0, 0.0);
        h.scheduler.take_due();

        h.engine.tick().unwrap();
        assert_eq!(h.scheduler.pending_count(), 1);
        assert_eq!(h.scheduler.next_due(), Some(Duration::from_millis(40)));

        // An extra tick replaces the pending request instead of adding one
        h.clock.advance(Duration::from_millis(10));
        h.engine.tick().unwrap();
        assert_eq!(h.scheduler.pending_count(), 1);
        assert_eq!(h.scheduler.next_due(), Some(Duration::from_millis(50)));
    }

    #[test]
    fn test_drive_run_to_completion() {
        let mut h = harness(scenario_config());
        h.engine.start(10.0, 10.0);

        let mut frames = Vec::new();
        let mut completed = false;
        for _ in 0..1000 {
            h.clock.advance(Duration::from_millis(1));
            for _ in h.scheduler.take_due() {
                match h.engine.tick().unwrap() {
                    FrameOutcome::Paint(instruction) => frames.push(instruction.frame),
                    FrameOutcome::Complete => completed = true,
                    FrameOutcome::Idle => {}
                }
            }
            if completed {
                break;
            }
        }

        assert!(completed);
        assert!(frames.windows(2).all(|w| w[0] <= w[1]));
        assert!(frames.iter().all(|f| (0..10).contains(f)));
        assert!(!h.scheduler.has_pending());
    }

    #[test]
    fn test_cancel_is_idempotent_and_stale_tick_is_harmless() {
        let mut h = harness(DecoratorConfig::default());
        h.engine.cancel();
        assert_eq!(h.engine.state(), EngineState::Idle);

        h.engine.start(5.0, 5.0);
        h.engine.tick().unwrap();
        assert!(h.scheduler.has_pending());

        h.engine.cancel();
        assert_eq!(h.engine.state(), EngineState::Idle);
        // The start timestamp is left in place
        assert!(h.engine.start_time().is_some());

        h.clock.advance(Duration::from_millis(100));
        assert_eq!(h.scheduler.take_due().len(), 1);
        assert_eq!(h.engine.tick().unwrap(), FrameOutcome::Idle);
        assert!(!h.scheduler.has_pending());
    }

    #[test]
    fn test_zero_frames_fails_on_first_tick_not_on_start() {
        let mut config = DecoratorConfig::default();
        config.ripple.frames = 0;
        config.ripple.peak_frame = Some(0);
        let mut h = harness(config);

        h.engine.start(0.0, 0.0);
        assert!(h.engine.is_running());

        let err = h.engine.tick().unwrap_err();
        assert_eq!(err, RippleError::NonPositiveFrames { frames: 0 });
        assert!(err.to_string().starts_with("frame count must be positive"));
        assert!(!h.engine.is_running());
        assert!(!h.scheduler.has_pending());
    }

    #[test]
    fn test_highlight_peak_checked_only_when_enabled() {
        let mut config = scenario_config();
        config.highlight.peak_frame = Some(11);
        let mut h = harness(config);
        h.engine.start(0.0, 0.0);
        assert!(h.engine.tick().is_ok());

        h.engine.config_mut().highlight.enabled = true;
        h.engine.start(0.0, 0.0);
        let err = h.engine.tick().unwrap_err();
        assert!(matches!(
            err,
            RippleError::PeakFrameExceedsTotal {
                channel: Channel::Highlight,
                peak: 11,
                total: 10
            }
        ));
        assert!(err.to_string().starts_with("peak frame cannot exceed total frames"));
    }

    #[test]
    fn test_centered_ignores_touch_position() {
        let mut config = DecoratorConfig::default();
        config.ripple.centered = true;
        let mut h = harness(config);

        h.engine.start(3.0, 97.0);
        assert_eq!(h.engine.origin(), Some(Point::new(100.0, 50.0)));
        let outcome = h.engine.tick().unwrap();
        assert_eq!(
            outcome.instruction().unwrap().ripple.center,
            Point::new(100.0, 50.0)
        );
    }

    #[test]
    fn test_radius_resolution() {
        let mut config = DecoratorConfig::default();
        config.ripple.padding = 10;
        let mut h = harness(config);

        h.engine.start(0.0, 0.0);
        assert_eq!(h.engine.radius(), Some(90.0));

        // Derived radius follows the surface size on the next run
        h.engine.on_surface_resized(400.0, 100.0);
        h.engine.start(0.0, 0.0);
        assert_eq!(h.engine.radius(), Some(190.0));
        assert_eq!(h.engine.config().ripple.radius, None);

        h.engine.config_mut().ripple.radius = Some(42.0);
        h.engine.start(0.0, 0.0);
        assert_eq!(h.engine.radius(), Some(42.0));
    }

    #[test]
    fn test_config_changes_apply_to_next_run() {
        let mut h = harness(scenario_config());
        h.engine.start(0.0, 0.0);
        h.engine.config_mut().ripple.duration_ms = 10_000.0;

        h.clock.advance(Duration::from_millis(400));
        assert_eq!(h.engine.tick().unwrap(), FrameOutcome::Complete);
    }

    #[test]
    fn test_color_setters_update_running_paint() {
        let mut h = harness(scenario_config());
        h.engine.config_mut().highlight.enabled = true;
        h.engine.start(0.0, 0.0);

        h.engine.set_ripple_color(Color::RED);
        h.engine.set_highlight_color(Color::BLUE);
        h.clock.advance(Duration::from_millis(100));

        let outcome = h.engine.tick().unwrap();
        let instruction = outcome.instruction().unwrap();
        assert_eq!(instruction.ripple.paint.color, Color::RED);
        assert_eq!(instruction.highlight.unwrap().paint.color, Color::BLUE);
    }

    #[test]
    fn test_highlight_follows_ripple_color_when_unset() {
        let mut config = scenario_config();
        config.ripple.color = Color::BLUE;
        config.highlight.enabled = true;
        let mut h = harness(config);
        h.engine.start(0.0, 0.0);

        let outcome = h.engine.tick().unwrap();
        let highlight = outcome.instruction().unwrap().highlight.unwrap();
        assert_eq!(highlight.paint.color, Color::BLUE);

        h.engine.set_ripple_color(Color::RED);
        h.clock.advance(Duration::from_millis(40));
        let outcome = h.engine.tick().unwrap();
        let highlight = outcome.instruction().unwrap().highlight.unwrap();
        assert_eq!(highlight.paint.color, Color::RED);
    }

    #[test]
    fn test_highlight_envelope_has_no_extra_decay() {
        let mut config = scenario_config();
        config.highlight.enabled = true;
        config.highlight.max_alpha = 1.0;
        config.highlight.peak_frame = Some(5);
        let mut h = harness(config);

        h.engine.start(0.0, 0.0);
        h.clock.advance(Duration::from_millis(200));
        let outcome = h.engine.tick().unwrap();
        let instruction = outcome.instruction().unwrap();

        let highlight = instruction.highlight.unwrap();
        assert_eq!(highlight.paint.alpha, 255);
        assert_eq!(highlight.paint.style, PaintStyle::Fill);
        assert!(!highlight.paint.anti_alias);
        assert_eq!(instruction.ripple.paint.alpha, 128);
    }

    #[test]
    fn test_restart_keeps_single_request_in_flight() {
        let mut h = harness(DecoratorConfig::default());
        h.engine.start(0.0, 0.0);
        h.engine.start(1.0, 1.0);
        assert_eq!(h.scheduler.pending_count(), 1);
        assert_eq!(h.engine.origin(), Some(Point::new(1.0, 1.0)));
    }

    #[test]
    fn test_detach_releases_pending_request() {
        let mut h = harness(DecoratorConfig::default());
        h.engine.start(0.0, 0.0);
        h.engine.tick().unwrap();
        assert!(h.scheduler.has_pending());

        h.engine.detach();
        assert!(!h.scheduler.has_pending());
        assert_eq!(h.engine.state(), EngineState::Idle);
        assert_eq!(h.engine.current_frame(), 0);
        assert_eq!(h.engine.start_time(), None);
        assert_eq!(h.engine.origin(), None);
    }

    #[test]
    fn test_redraw_request_is_released_by_detach() {
        let mut h = harness(scenario_config());
        h.engine.start(0.0, 0.0);
        h.scheduler.clear();
        h.clock.advance(Duration::from_millis(400));
        assert_eq!(h.engine.tick().unwrap(), FrameOutcome::Complete);

        h.engine.request_redraw();
        assert_eq!(h.scheduler.pending_count(), 1);
        assert!(h.engine.pending_request().is_some());

        h.engine.detach();
        assert!(!h.scheduler.has_pending());
        assert_eq!(h.engine.pending_request(), None);
    }

    #[test]
    fn test_instruction_draws_highlight_then_ripple() {
        let mut config = scenario_config();
        config.highlight.enabled = true;
        config.ripple.style = crate::config::RippleStyle::Fill;
        let mut h = harness(config);
        h.engine.start(50.0, 50.0);
        h.clock.advance(Duration::from_millis(120));

        let outcome = h.engine.tick().unwrap();
        let mut ctx = RecordingContext::new(Size::new(200.0, 100.0));
        outcome.instruction().unwrap().draw(&mut ctx);

        let commands = ctx.commands();
        assert_eq!(commands.len(), 2);
        assert!(matches!(&commands[0], DrawCommand::DrawRect { rect, .. } if rect.width() == 200.0));
        assert!(matches!(
            &commands[1],
            DrawCommand::DrawCircle { paint, .. } if paint.style == PaintStyle::Fill
        ));
    }
}
