//! Easing functions
//!
//! Interpolators map normalized time in [0, 1] to a normalized intensity in
//! [0, 1]. The ripple and highlight share one interpolator; the zoom pulse has
//! its own.

use std::f32::consts::PI;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Host-supplied interpolation closure
pub type EasingFn = Arc<dyn Fn(f32) -> f32 + Send + Sync>;

/// Interpolation curve
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// `t`
    #[default]
    Linear,
    /// `t^(2·factor)`, slow start
    Accelerate { factor: f32 },
    /// `1 − (1 − t)^(2·factor)`, slow end
    Decelerate { factor: f32 },
    /// Cosine ease in and out
    AccelerateDecelerate,
    /// Host-provided curve; never serialized
    #[serde(skip)]
    Custom(EasingFn),
}

impl Easing {
    /// Quadratic ease-in
    pub fn accelerate() -> Self {
        Easing::Accelerate { factor: 1.0 }
    }

    /// Quadratic ease-out
    pub fn decelerate() -> Self {
        Easing::Decelerate { factor: 1.0 }
    }

    /// Wrap a closure as an interpolator
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f32) -> f32 + Send + Sync + 'static,
    {
        Easing::Custom(Arc::new(f))
    }

    /// Evaluate the curve; `t` is clamped into [0, 1] first
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Accelerate { factor } => {
                if *factor == 1.0 {
                    t * t
                } else {
                    t.powf(2.0 * factor)
                }
            }
            Easing::Decelerate { factor } => {
                if *factor == 1.0 {
                    1.0 - (1.0 - t) * (1.0 - t)
                } else {
                    1.0 - (1.0 - t).powf(2.0 * factor)
                }
            }
            Easing::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
            Easing::Custom(f) => f(t),
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Easing::Custom(_))
    }
}

impl fmt::Debug for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Linear => f.write_str("Linear"),
            Easing::Accelerate { factor } => {
                f.debug_struct("Accelerate").field("factor", factor).finish()
            }
            Easing::Decelerate { factor } => {
                f.debug_struct("Decelerate").field("factor", factor).finish()
            }
            Easing::AccelerateDecelerate => f.write_str("AccelerateDecelerate"),
            Easing::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl PartialEq for Easing {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Easing::Linear, Easing::Linear) => true,
            (Easing::Accelerate { factor: a }, Easing::Accelerate { factor: b }) => a == b,
            (Easing::Decelerate { factor: a }, Easing::Decelerate { factor: b }) => a == b,
            (Easing::AccelerateDecelerate, Easing::AccelerateDecelerate) => true,
            (Easing::Custom(a), Easing::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}
