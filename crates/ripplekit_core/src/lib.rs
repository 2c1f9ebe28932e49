//! Ripplekit Core
//!
//! Foundational types shared by the ripple decorator crates:
//!
//! - **Geometry**: `Point`, `Size`, `Rect` and RGBA `Color`
//! - **Draw Context**: the drawing backend contract the overlay paints through
//! - **Recording Context**: a backend that records commands for replay or inspection
//! - **Touch Signals**: the three logical touch signals a host delivers
//!
//! # Example
//!
//! ```rust
//! use ripplekit_core::{Color, DrawContext, Paint, Point, RecordingContext, Size};
//!
//! let mut ctx = RecordingContext::new(Size::new(200.0, 100.0));
//! ctx.save();
//! ctx.draw_circle(Point::new(50.0, 50.0), 20.0, &Paint::fill(Color::WHITE).with_alpha(128));
//! ctx.restore();
//!
//! assert_eq!(ctx.commands().len(), 3);
//! ```

pub mod draw;
pub mod geometry;
pub mod input;

pub use draw::{DrawCommand, DrawContext, Paint, PaintStyle, RecordingContext, Transform};
pub use geometry::{Color, Point, Rect, Size};
pub use input::{TouchEvent, TouchSignal};
