//! Decorator configuration
//!
//! All values have defaults and can be changed at any time. The engine takes
//! a snapshot at `start()`, so changes apply to the next run. Nothing is
//! validated here: invalid frame counts and peak frames are reported by the
//! first frame computed after a start.

use ripplekit_core::{Color, PaintStyle, TouchSignal};
use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::error::{Channel, Result, RippleError};

/// Default ripple color
pub const RIPPLE_COLOR: Color = Color::WHITE;
/// Default ripple maximum alpha
pub const RIPPLE_MAX_ALPHA: f32 = 1.0;
/// Default ripple/highlight run duration in milliseconds
pub const RIPPLE_DURATION_MS: f32 = 400.0;
/// Default number of frames per run
pub const RIPPLE_FRAMES: i32 = 60;
/// Default ripple stroke width in pixels
pub const RIPPLE_STROKE_WIDTH: f32 = 2.0;
/// Default zoom pulse target scale
pub const ZOOM_SCALE: f32 = 1.03;
/// Default highlight maximum alpha
pub const HIGHLIGHT_MAX_ALPHA: f32 = 0.2;

// ─────────────────────────────────────────────────────────────────────────────
// Enums
// ─────────────────────────────────────────────────────────────────────────────

/// Which touch signal starts an animation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    PressDown,
    PressUp,
    #[default]
    Tap,
    /// Never started by touch; only programmatically
    None,
}

impl Trigger {
    /// Whether a touch signal fires this trigger
    pub fn matches(&self, signal: TouchSignal) -> bool {
        matches!(
            (self, signal),
            (Trigger::PressDown, TouchSignal::PressDown)
                | (Trigger::PressUp, TouchSignal::PressUp)
                | (Trigger::Tap, TouchSignal::Tap)
        )
    }
}

/// Ripple rendering style
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RippleStyle {
    /// Only the ring outline
    #[default]
    Stroke,
    /// The whole disc
    Fill,
}

const STYLE_TABLE: [(RippleStyle, PaintStyle); 2] = [
    (RippleStyle::Stroke, PaintStyle::Stroke),
    (RippleStyle::Fill, PaintStyle::Fill),
];

impl RippleStyle {
    /// Drawing style used for this ripple style
    pub fn paint_style(self) -> PaintStyle {
        STYLE_TABLE
            .iter()
            .find(|(style, _)| *style == self)
            .map(|(_, paint)| *paint)
            .unwrap_or_default()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Channel Configs
// ─────────────────────────────────────────────────────────────────────────────

/// Ripple channel configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RippleConfig {
    #[serde(with = "hex_color")]
    pub color: Color,
    pub style: RippleStyle,
    /// Maximum alpha in [0, 1]
    pub max_alpha: f32,
    /// Originate from the surface center instead of the touch point
    pub centered: bool,
    /// Subtracted from a size-derived radius, in pixels
    pub padding: i32,
    /// Fixed radius in pixels; `None` derives `max(width, height) / 2 − padding`
    pub radius: Option<f32>,
    pub trigger: Trigger,
    pub duration_ms: f32,
    pub frames: i32,
    /// Rise/decay switch frame; `None` uses `frames`
    pub peak_frame: Option<i32>,
    pub stroke_width: f32,
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            color: RIPPLE_COLOR,
            style: RippleStyle::Stroke,
            max_alpha: RIPPLE_MAX_ALPHA,
            centered: false,
            padding: 0,
            radius: None,
            trigger: Trigger::Tap,
            duration_ms: RIPPLE_DURATION_MS,
            frames: RIPPLE_FRAMES,
            peak_frame: None,
            stroke_width: RIPPLE_STROKE_WIDTH,
        }
    }
}

impl RippleConfig {
    /// Effective peak frame
    pub fn peak_frame(&self) -> i32 {
        self.peak_frame.unwrap_or(self.frames)
    }

    /// Maximum alpha clamped into [0, 1] and scaled to [0, 255]
    pub fn max_alpha_scaled(&self) -> f32 {
        scale_alpha(self.max_alpha)
    }
}

/// Highlight channel configuration
///
/// The highlight shares the ripple's duration, frame count and trigger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enabled: bool,
    /// Highlight color; `None` follows the ripple color
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "hex_color::option"
    )]
    pub color: Option<Color>,
    /// Maximum alpha in [0, 1]
    pub max_alpha: f32,
    /// Rise/decay switch frame; `None` uses the ripple frame count
    pub peak_frame: Option<i32>,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            color: None,
            max_alpha: HIGHLIGHT_MAX_ALPHA,
            peak_frame: None,
        }
    }
}

impl HighlightConfig {
    /// Effective color given the ripple color
    pub fn color(&self, ripple_color: Color) -> Color {
        self.color.unwrap_or(ripple_color)
    }

    /// Effective peak frame for a run of `frames` frames
    pub fn peak_frame(&self, frames: i32) -> i32 {
        self.peak_frame.unwrap_or(frames)
    }

    /// Maximum alpha clamped into [0, 1] and scaled to [0, 255]
    pub fn max_alpha_scaled(&self) -> f32 {
        scale_alpha(self.max_alpha)
    }
}

/// Zoom pulse configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub enabled: bool,
    pub trigger: Trigger,
    /// Target scale at the middle of the pulse
    pub scale: f32,
    /// Full pulse duration; `None` uses the ripple duration
    pub duration_ms: Option<f32>,
    pub easing: Easing,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            trigger: Trigger::Tap,
            scale: ZOOM_SCALE,
            duration_ms: None,
            easing: Easing::Linear,
        }
    }
}

impl ZoomConfig {
    /// Effective pulse duration given the ripple duration
    pub fn duration_ms(&self, ripple_duration_ms: f32) -> f32 {
        self.duration_ms.unwrap_or(ripple_duration_ms)
    }
}

/// Complete decorator configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoratorConfig {
    /// Interpolator shared by ripple and highlight
    pub interpolator: Easing,
    pub ripple: RippleConfig,
    pub highlight: HighlightConfig,
    pub zoom: ZoomConfig,
}

impl DecoratorConfig {
    /// Check the frame invariants
    ///
    /// Frames must be positive; the ripple peak may not exceed the frame
    /// count, and neither may the highlight peak when the highlight is enabled.
    pub fn validate(&self) -> Result<()> {
        let frames = self.ripple.frames;
        if frames <= 0 {
            return Err(RippleError::NonPositiveFrames { frames });
        }

        let ripple_peak = self.ripple.peak_frame();
        if ripple_peak > frames {
            return Err(RippleError::PeakFrameExceedsTotal {
                channel: Channel::Ripple,
                peak: ripple_peak,
                total: frames,
            });
        }

        let highlight_peak = self.highlight.peak_frame(frames);
        if self.highlight.enabled && highlight_peak > frames {
            return Err(RippleError::PeakFrameExceedsTotal {
                channel: Channel::Highlight,
                peak: highlight_peak,
                total: frames,
            });
        }

        Ok(())
    }
}

fn scale_alpha(alpha: f32) -> f32 {
    255.0 * alpha.clamp(0.0, 1.0)
}

/// `#RRGGBB` / `#AARRGGBB` color strings
mod hex_color {
    use ripplekit_core::Color;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&color.to_hex_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::parse_hex(&s).ok_or_else(|| D::Error::custom(format!("invalid color `{s}`")))
    }

    pub mod option {
        use ripplekit_core::Color;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            color: &Option<Color>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match color {
                Some(color) => super::serialize(color, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Color>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|s| {
                    Color::parse_hex(&s).ok_or_else(|| {
                        serde::de::Error::custom(format!("invalid color `{s}`"))
                    })
                })
                .transpose()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_widget_defaults() {
        let config = DecoratorConfig::default();
        assert_eq!(config.ripple.color, Color::WHITE);
        assert_eq!(config.ripple.style, RippleStyle::Stroke);
        assert_eq!(config.ripple.max_alpha_scaled(), 255.0);
        assert_eq!(config.ripple.radius, None);
        assert_eq!(config.ripple.trigger, Trigger::Tap);
        assert_eq!(config.ripple.duration_ms, 400.0);
        assert_eq!(config.ripple.frames, 60);
        assert_eq!(config.ripple.peak_frame(), 60);
        assert!(!config.highlight.enabled);
        assert_eq!(config.highlight.color, None);
        assert_eq!(config.highlight.color(config.ripple.color), Color::WHITE);
        assert_eq!(config.highlight.peak_frame(60), 60);
        assert!(!config.zoom.enabled);
        assert_eq!(config.zoom.scale, 1.03);
        assert_eq!(config.zoom.duration_ms(400.0), 400.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_trigger_matching() {
        assert!(Trigger::Tap.matches(TouchSignal::Tap));
        assert!(!Trigger::Tap.matches(TouchSignal::PressUp));
        assert!(Trigger::PressDown.matches(TouchSignal::PressDown));
        for signal in TouchSignal::ALL {
            assert!(!Trigger::None.matches(signal));
        }
    }

    #[test]
    fn test_style_lookup() {
        assert_eq!(RippleStyle::Stroke.paint_style(), PaintStyle::Stroke);
        assert_eq!(RippleStyle::Fill.paint_style(), PaintStyle::Fill);
    }

    #[test]
    fn test_max_alpha_is_clamped_before_scaling() {
        let mut ripple = RippleConfig::default();
        ripple.max_alpha = 1.7;
        assert_eq!(ripple.max_alpha_scaled(), 255.0);
        ripple.max_alpha = -0.3;
        assert_eq!(ripple.max_alpha_scaled(), 0.0);
    }

    #[test]
    fn test_validate_frame_count() {
        let mut config = DecoratorConfig::default();
        config.ripple.frames = 0;
        assert_eq!(
            config.validate(),
            Err(RippleError::NonPositiveFrames { frames: 0 })
        );
    }

    #[test]
    fn test_validate_peaks() {
        let mut config = DecoratorConfig::default();
        config.ripple.peak_frame = Some(61);
        assert!(matches!(
            config.validate(),
            Err(RippleError::PeakFrameExceedsTotal {
                channel: Channel::Ripple,
                peak: 61,
                total: 60
            })
        ));

        // Highlight peak only matters while the highlight is enabled
        let mut config = DecoratorConfig::default();
        config.highlight.peak_frame = Some(99);
        assert!(config.validate().is_ok());
        config.highlight.enabled = true;
        assert!(matches!(
            config.validate(),
            Err(RippleError::PeakFrameExceedsTotal {
                channel: Channel::Highlight,
                ..
            })
        ));
    }

    #[test]
    fn test_peak_follows_frame_count_when_unset() {
        let mut config = DecoratorConfig::default();
        config.ripple.frames = 24;
        assert_eq!(config.ripple.peak_frame(), 24);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: DecoratorConfig = toml::from_str(
            r##"
            interpolator = { decelerate = { factor = 1.0 } }

            [ripple]
            color = "#80FF0000"
            style = "fill"
            frames = 30

            [highlight]
            enabled = true

            [zoom]
            trigger = "press_down"
            "##,
        )
        .unwrap();

        assert_eq!(config.ripple.style, RippleStyle::Fill);
        assert_eq!(config.ripple.color.to_argb(), 0x80FF_0000);
        assert_eq!(config.ripple.frames, 30);
        assert_eq!(config.ripple.duration_ms, 400.0);
        assert!(config.highlight.enabled);
        assert_eq!(config.highlight.max_alpha, 0.2);
        // Highlight follows the ripple color unless set
        assert_eq!(config.highlight.color(config.ripple.color).to_argb(), 0x80FF_0000);
        assert_eq!(config.zoom.trigger, Trigger::PressDown);
        assert_eq!(config.interpolator, Easing::decelerate());
    }

    #[test]
    fn test_invalid_color_is_rejected() {
        let result: std::result::Result<DecoratorConfig, _> =
            toml::from_str("[ripple]\ncolor = \"white\"\n");
        assert!(result.is_err());
    }
}
