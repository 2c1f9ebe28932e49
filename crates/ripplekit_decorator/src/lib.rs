//! Ripplekit Decorator
//!
//! Touch feedback for any rectangular surface: an expanding ripple, an
//! optional highlight pulse and an optional zoom pulse.
//!
//! The host feeds the decorator its size and touch signals, and calls
//! [`RippleDecorator::draw`] whenever a frame request posted to its scheduler
//! comes due.
//!
//! ```ignore
//! let clock = ManualClock::shared();
//! let scheduler = ManualScheduler::new(clock.clone());
//! let zoom = ZoomPlayer::new(clock.clone());
//! let mut decorator = RippleDecorator::new(
//!     DecoratorConfig::default(),
//!     clock.clone(),
//!     scheduler.shared_handle(),
//!     Box::new(zoom.clone()),
//! );
//!
//! decorator.on_surface_resized(320.0, 48.0);
//! decorator.on_touch(TouchEvent::tap(40.0, 20.0));
//! ```

pub mod decorator;
pub mod settings;
pub mod trigger;

pub use decorator::RippleDecorator;
pub use settings::{load_config, parse_config, to_toml, SettingsError};
pub use trigger::{RouteDecision, TriggerRouter};

pub use ripplekit_animation::{DecoratorConfig, FrameOutcome, RippleError};
