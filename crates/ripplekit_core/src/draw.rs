//! Draw Context - drawing backend contract
//!
//! The `DrawContext` trait is the only way the ripple overlay reaches pixels.
//! A host adapts its own canvas to this trait; the overlay needs circles,
//! rectangles, a save/restore state stack and an optional transform stack for
//! the zoom pulse.
//!
//! # Example
//!
//! ```ignore
//! fn paint(ctx: &mut dyn DrawContext) {
//!     ctx.save();
//!     ctx.draw_rect(ctx.clip_bounds(), &Paint::fill(Color::WHITE).with_alpha(40));
//!     ctx.draw_circle(Point::new(40.0, 40.0), 32.0, &Paint::stroke(Color::WHITE, 2.0));
//!     ctx.restore();
//! }
//! ```

use smallvec::SmallVec;

use crate::geometry::{Color, Point, Rect, Size};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Transform
// ─────────────────────────────────────────────────────────────────────────────

/// Surface transform pushed around decorated content
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Transform {
    /// Identity
    Identity,
    /// Scale around a pivot point
    Scale { sx: f32, sy: f32, pivot: Point },
}

impl Transform {
    /// Uniform scale around a pivot
    pub fn scale_centered(scale: f32, pivot: Point) -> Self {
        Transform::Scale {
            sx: scale,
            sy: scale,
            pivot,
        }
    }

    pub fn identity() -> Self {
        Transform::Identity
    }

    pub fn is_identity(&self) -> bool {
        match self {
            Transform::Identity => true,
            Transform::Scale { sx, sy, .. } => *sx == 1.0 && *sy == 1.0,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Paint
// ─────────────────────────────────────────────────────────────────────────────

/// How a shape is rasterized
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PaintStyle {
    /// Outline only
    #[default]
    Stroke,
    /// Filled interior
    Fill,
}

/// Paint state for a single draw call
///
/// `alpha` overrides the alpha channel of `color`, the way a canvas paint's
/// alpha is set independently of its color.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Paint {
    pub color: Color,
    pub alpha: u8,
    pub style: PaintStyle,
    pub stroke_width: f32,
    pub anti_alias: bool,
}

impl Paint {
    /// Opaque fill paint
    pub fn fill(color: Color) -> Self {
        Self {
            color,
            alpha: 255,
            style: PaintStyle::Fill,
            stroke_width: 0.0,
            anti_alias: true,
        }
    }

    /// Opaque stroke paint
    pub fn stroke(color: Color, width: f32) -> Self {
        Self {
            color,
            alpha: 255,
            style: PaintStyle::Stroke,
            stroke_width: width,
            anti_alias: true,
        }
    }

    pub fn with_alpha(mut self, alpha: u8) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_anti_alias(mut self, anti_alias: bool) -> Self {
        self.anti_alias = anti_alias;
        self
    }

    /// Color with the paint alpha applied
    pub fn effective_color(&self) -> Color {
        self.color.with_alpha_u8(self.alpha)
    }

    /// True when nothing would be visible
    pub fn is_invisible(&self) -> bool {
        self.alpha == 0
    }
}

impl Default for Paint {
    fn default() -> Self {
        Self::fill(Color::BLACK)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Draw Context Trait
// ─────────────────────────────────────────────────────────────────────────────

/// The drawing backend the overlay paints through
pub trait DrawContext {
    /// Save the current drawing state (transform, clip)
    fn save(&mut self);

    /// Restore the most recently saved drawing state
    fn restore(&mut self);

    /// Bounds of the current clip, in surface coordinates
    fn clip_bounds(&self) -> Rect;

    /// Push a transform onto the stack
    fn push_transform(&mut self, transform: Transform);

    /// Pop the top transform from the stack
    fn pop_transform(&mut self);

    /// Draw a circle, stroked or filled according to `paint.style`
    fn draw_circle(&mut self, center: Point, radius: f32, paint: &Paint);

    /// Draw a rectangle, stroked or filled according to `paint.style`
    fn draw_rect(&mut self, rect: Rect, paint: &Paint);
}

// ─────────────────────────────────────────────────────────────────────────────
// Recording Draw Context
// ─────────────────────────────────────────────────────────────────────────────

/// A draw command that can be recorded and replayed
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DrawCommand {
    Save,
    Restore,
    PushTransform(Transform),
    PopTransform,
    DrawCircle {
        center: Point,
        radius: f32,
        paint: Paint,
    },
    DrawRect {
        rect: Rect,
        paint: Paint,
    },
}

/// A draw context that records commands for later execution
#[derive(Debug, Default)]
pub struct RecordingContext {
    commands: Vec<DrawCommand>,
    transform_stack: SmallVec<[Transform; 4]>,
    save_depth: usize,
    viewport: Size,
}

impl RecordingContext {
    /// Create a new recording context clipped to `viewport`
    pub fn new(viewport: Size) -> Self {
        let mut transform_stack = SmallVec::new();
        transform_stack.push(Transform::identity());
        Self {
            commands: Vec::new(),
            transform_stack,
            save_depth: 0,
            viewport,
        }
    }

    /// Get the recorded commands
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Current save/restore nesting depth
    pub fn save_depth(&self) -> usize {
        self.save_depth
    }

    /// Current top of the transform stack
    pub fn current_transform(&self) -> Transform {
        self.transform_stack.last().copied().unwrap_or_default()
    }

    /// Clear all recorded commands and stacks
    pub fn clear(&mut self) {
        self.commands.clear();
        self.transform_stack.clear();
        self.transform_stack.push(Transform::identity());
        self.save_depth = 0;
    }
}

impl DrawContext for RecordingContext {
    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
        self.save_depth += 1;
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
        self.save_depth = self.save_depth.saturating_sub(1);
    }

    fn clip_bounds(&self) -> Rect {
        self.viewport.to_rect()
    }

    fn push_transform(&mut self, transform: Transform) {
        self.commands.push(DrawCommand::PushTransform(transform));
        self.transform_stack.push(transform);
    }

    fn pop_transform(&mut self) {
        self.commands.push(DrawCommand::PopTransform);
        if self.transform_stack.len() > 1 {
            self.transform_stack.pop();
        }
    }

    fn draw_circle(&mut self, center: Point, radius: f32, paint: &Paint) {
        self.commands.push(DrawCommand::DrawCircle {
            center,
            radius,
            paint: *paint,
        });
    }

    fn draw_rect(&mut self, rect: Rect, paint: &Paint) {
        self.commands.push(DrawCommand::DrawRect { rect, paint: *paint });
    }
}
