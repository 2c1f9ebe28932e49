//! Touch signals delivered by the host
//!
//! Gesture recognition happens in the host platform. By the time input reaches
//! the decorator it has been reduced to three logical signals.

use crate::geometry::Point;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Logical touch signal
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TouchSignal {
    /// Finger touched the surface
    PressDown,
    /// Finger lifted from the surface
    PressUp,
    /// A single tap was confirmed by the gesture recognizer
    Tap,
}

impl TouchSignal {
    pub const ALL: [TouchSignal; 3] = [TouchSignal::PressDown, TouchSignal::PressUp, TouchSignal::Tap];

    pub fn name(&self) -> &'static str {
        match self {
            TouchSignal::PressDown => "press-down",
            TouchSignal::PressUp => "press-up",
            TouchSignal::Tap => "tap",
        }
    }
}

/// A touch signal at a surface-local position
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TouchEvent {
    pub signal: TouchSignal,
    pub position: Point,
}

impl TouchEvent {
    pub fn new(signal: TouchSignal, x: f32, y: f32) -> Self {
        Self {
            signal,
            position: Point::new(x, y),
        }
    }

    pub fn press_down(x: f32, y: f32) -> Self {
        Self::new(TouchSignal::PressDown, x, y)
    }

    pub fn press_up(x: f32, y: f32) -> Self {
        Self::new(TouchSignal::PressUp, x, y)
    }

    pub fn tap(x: f32, y: f32) -> Self {
        Self::new(TouchSignal::Tap, x, y)
    }
}
