//! Ripplekit Animation System
//!
//! The timing and compositing engine behind the ripple decorator.
//!
//! # Features
//!
//! - **Easing**: pluggable interpolators mapping normalized time to intensity
//! - **Clock**: injectable time sources and a start-timestamp animation clock
//! - **Envelope**: peak-frame rise/decay alpha curves for ripple and highlight
//! - **Engine**: the `Idle`/`Running` state machine producing paint instructions
//! - **Scheduler**: delayed frame requests without blocking or extra threads
//! - **Zoom Pulse**: an independent one-shot scale animation

pub mod clock;
pub mod config;
pub mod easing;
pub mod engine;
pub mod envelope;
pub mod error;
pub mod scheduler;
pub mod zoom;

pub use clock::{AnimationClock, ManualClock, SharedTimeSource, SystemClock, TimeSource};
pub use config::{
    DecoratorConfig, HighlightConfig, RippleConfig, RippleStyle, Trigger, ZoomConfig,
};
pub use easing::{Easing, EasingFn};
pub use engine::{
    EngineState, FrameOutcome, HighlightPaint, PaintInstruction, RipplePaint, RippleEngine,
};
pub use envelope::{ripple_decay, Envelope};
pub use error::{Channel, Result, RippleError};
pub use scheduler::{
    FrameRequestId, FrameScheduler, ManualScheduler, ManualSchedulerHandle, SharedScheduler,
};
pub use zoom::{ScaleAnimation, ScaleAnimator, ZoomPlayer};
