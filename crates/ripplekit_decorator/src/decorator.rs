//! The ripple decorator
//!
//! `RippleDecorator` wraps one [`RippleEngine`] for one surface and connects
//! it to the host: touch signals go through the [`TriggerRouter`], zoom pulses
//! go to a [`ScaleAnimator`], and each `draw()` renders the current frame into
//! a [`DrawContext`].

use ripplekit_animation::{
    DecoratorConfig, Easing, FrameOutcome, Result, RippleEngine, RippleStyle, ScaleAnimation,
    ScaleAnimator, SharedScheduler, SharedTimeSource, Trigger,
};
use ripplekit_core::{Color, DrawContext, Point, TouchEvent, TouchSignal};

use crate::trigger::{RouteDecision, TriggerRouter};

/// Callback invoked with the ripple origin whenever a ripple starts
pub type ClickHandler = Box<dyn FnMut(Point)>;

/// Get/set pairs for configuration fields that take effect on the next run
macro_rules! config_accessors {
    ($($(#[$doc:meta])* $get:ident / $set:ident: $ty:ty => $($field:ident).+;)*) => {
        $(
            $(#[$doc])*
            pub fn $get(&self) -> $ty {
                self.engine.config().$($field).+.clone()
            }

            $(#[$doc])*
            pub fn $set(&mut self, value: $ty) {
                self.engine.config_mut().$($field).+ = value;
            }
        )*
    };
}

/// Touch feedback decorator for one surface
pub struct RippleDecorator {
    engine: RippleEngine,
    animator: Box<dyn ScaleAnimator>,
    on_click: Option<ClickHandler>,
}

impl RippleDecorator {
    pub fn new(
        config: DecoratorConfig,
        time: SharedTimeSource,
        scheduler: SharedScheduler,
        animator: Box<dyn ScaleAnimator>,
    ) -> Self {
        Self {
            engine: RippleEngine::new(config, time, scheduler),
            animator,
            on_click: None,
        }
    }

    /// Register a callback fired each time a ripple starts
    pub fn set_click_handler<F>(&mut self, handler: F)
    where
        F: FnMut(Point) + 'static,
    {
        self.on_click = Some(Box::new(handler));
    }

    pub fn engine(&self) -> &RippleEngine {
        &self.engine
    }

    // =========================================================================
    // Host Events
    // =========================================================================

    pub fn on_surface_resized(&mut self, width: f32, height: f32) {
        self.engine.on_surface_resized(width, height);
    }

    /// Route a touch signal; unmatched signals are ignored
    pub fn on_touch_signal(&mut self, signal: TouchSignal, x: f32, y: f32) -> RouteDecision {
        let decision = TriggerRouter::route(self.engine.config(), signal, self.engine.is_running());
        if !decision.is_empty() {
            tracing::debug!(
                "{} at ({}, {}): ripple={} zoom={}",
                signal.name(),
                x,
                y,
                decision.start_ripple,
                decision.fire_zoom
            );
        }

        if decision.fire_zoom {
            self.fire_zoom();
        }
        if decision.start_ripple {
            self.start_ripple(x, y);
        }
        decision
    }

    pub fn on_touch(&mut self, event: TouchEvent) -> RouteDecision {
        self.on_touch_signal(event.signal, event.position.x, event.position.y)
    }

    /// Start the animations programmatically, restarting a ripple in flight
    pub fn do_animation(&mut self, x: f32, y: f32) {
        self.start_ripple(x, y);
        if self.engine.config().zoom.enabled {
            self.fire_zoom();
        }
    }

    /// Stop the ripple and highlight; a zoom pulse in flight keeps playing
    pub fn cancel_animation(&mut self) {
        self.engine.cancel();
    }

    pub fn on_detached(&mut self) {
        self.engine.detach();
    }

    /// Render the current frame
    ///
    /// Returns the engine's outcome. A configuration error aborts the run
    /// before anything is drawn.
    pub fn draw(&mut self, ctx: &mut dyn DrawContext) -> Result<FrameOutcome> {
        let outcome = self.engine.tick()?;
        match &outcome {
            FrameOutcome::Paint(instruction) => {
                ctx.save();
                instruction.draw(ctx);
                ctx.restore();
            }
            FrameOutcome::Complete => {
                // One more pass so the host repaints without the overlay
                self.engine.request_redraw();
            }
            FrameOutcome::Idle => {}
        }
        Ok(outcome)
    }

    pub fn is_animation_running(&self) -> bool {
        self.engine.is_running()
    }

    pub fn current_frame(&self) -> i32 {
        self.engine.current_frame()
    }

    fn start_ripple(&mut self, x: f32, y: f32) {
        self.engine.start(x, y);
        if let (Some(handler), Some(origin)) = (self.on_click.as_mut(), self.engine.origin()) {
            handler(origin);
        }
    }

    fn fire_zoom(&mut self) {
        let config = self.engine.config();
        let animation = ScaleAnimation::pulse(
            config.zoom.scale,
            self.engine.surface_size().center(),
            config.zoom.duration_ms(config.ripple.duration_ms),
            config.zoom.easing.clone(),
        );
        self.animator.start_scale_animation(animation);
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    pub fn config(&self) -> &DecoratorConfig {
        self.engine.config()
    }

    pub fn set_config(&mut self, config: DecoratorConfig) {
        self.engine.set_config(config);
    }

    pub fn ripple_color(&self) -> Color {
        self.engine.config().ripple.color
    }

    /// Also recolors a ripple in flight
    pub fn set_ripple_color(&mut self, color: Color) {
        self.engine.set_ripple_color(color);
    }

    /// Highlight color, the ripple color unless set explicitly
    pub fn highlight_color(&self) -> Color {
        let config = self.engine.config();
        config.highlight.color(config.ripple.color)
    }

    /// Also recolors a highlight in flight
    pub fn set_highlight_color(&mut self, color: Color) {
        self.engine.set_highlight_color(color);
    }

    /// Fixed ripple radius; `None` derives it from the surface size
    pub fn ripple_radius(&self) -> Option<f32> {
        self.engine.config().ripple.radius
    }

    pub fn set_ripple_radius(&mut self, radius: Option<f32>) {
        self.engine.config_mut().ripple.radius = radius;
    }

    pub fn ripple_peak_frame(&self) -> i32 {
        self.engine.config().ripple.peak_frame()
    }

    pub fn set_ripple_peak_frame(&mut self, frame: i32) {
        self.engine.config_mut().ripple.peak_frame = Some(frame);
    }

    pub fn highlight_peak_frame(&self) -> i32 {
        let config = self.engine.config();
        config.highlight.peak_frame(config.ripple.frames)
    }

    pub fn set_highlight_peak_frame(&mut self, frame: i32) {
        self.engine.config_mut().highlight.peak_frame = Some(frame);
    }

    /// Full zoom pulse duration
    pub fn zoom_duration_ms(&self) -> f32 {
        let config = self.engine.config();
        config.zoom.duration_ms(config.ripple.duration_ms)
    }

    pub fn set_zoom_duration_ms(&mut self, duration_ms: f32) {
        self.engine.config_mut().zoom.duration_ms = Some(duration_ms);
    }

    config_accessors! {
        ripple_style / set_ripple_style: RippleStyle => ripple.style;
        /// Maximum ripple alpha in [0, 1]
        ripple_max_alpha / set_ripple_max_alpha: f32 => ripple.max_alpha;
        is_ripple_centered / set_ripple_centered: bool => ripple.centered;
        ripple_padding / set_ripple_padding: i32 => ripple.padding;
        ripple_trigger / set_ripple_trigger: Trigger => ripple.trigger;
        ripple_duration_ms / set_ripple_duration_ms: f32 => ripple.duration_ms;
        ripple_frames / set_ripple_frames: i32 => ripple.frames;
        ripple_stroke_width / set_ripple_stroke_width: f32 => ripple.stroke_width;
        is_highlight_enabled / set_highlight_enabled: bool => highlight.enabled;
        /// Maximum highlight alpha in [0, 1]
        highlight_max_alpha / set_highlight_max_alpha: f32 => highlight.max_alpha;
        is_zoom_enabled / set_zoom_enabled: bool => zoom.enabled;
        zoom_trigger / set_zoom_trigger: Trigger => zoom.trigger;
        zoom_scale / set_zoom_scale: f32 => zoom.scale;
        zoom_interpolator / set_zoom_interpolator: Easing => zoom.easing;
        interpolator / set_interpolator: Easing => interpolator;
    }
}
