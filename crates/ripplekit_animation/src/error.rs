//! Error types for ripplekit_animation

use std::fmt;

use thiserror::Error;

/// Which overlay a configuration error refers to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Ripple,
    Highlight,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Ripple => f.write_str("ripple"),
            Channel::Highlight => f.write_str("highlight"),
        }
    }
}

/// Fatal configuration errors, raised while computing a frame
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RippleError {
    /// Total frame count is zero or negative
    #[error("frame count must be positive (got {frames})")]
    NonPositiveFrames { frames: i32 },

    /// A channel's peak frame lies beyond the last frame
    #[error("peak frame cannot exceed total frames ({channel} peak {peak} > {total})")]
    PeakFrameExceedsTotal {
        channel: Channel,
        peak: i32,
        total: i32,
    },
}

/// Result type for ripplekit_animation operations
pub type Result<T> = std::result::Result<T, RippleError>;
