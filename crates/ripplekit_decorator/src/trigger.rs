//! Touch signal routing
//!
//! Each signal is matched independently against the ripple binding and the
//! zoom binding. A ripple already in flight is never restarted by touch; zoom
//! pulses always fire and may overlap.

use ripplekit_animation::DecoratorConfig;
use ripplekit_core::TouchSignal;

/// What a touch signal should start
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteDecision {
    pub start_ripple: bool,
    pub fire_zoom: bool,
}

impl RouteDecision {
    pub fn is_empty(&self) -> bool {
        !self.start_ripple && !self.fire_zoom
    }
}

/// Maps touch signals to animation starts
#[derive(Clone, Copy, Debug, Default)]
pub struct TriggerRouter;

impl TriggerRouter {
    pub fn route(
        config: &DecoratorConfig,
        signal: TouchSignal,
        ripple_running: bool,
    ) -> RouteDecision {
        RouteDecision {
            start_ripple: !ripple_running && config.ripple.trigger.matches(signal),
            fire_zoom: config.zoom.enabled && config.zoom.trigger.matches(signal),
        }
    }
}
