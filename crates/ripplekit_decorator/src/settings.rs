//! TOML configuration files
//!
//! Every key is optional and falls back to its default:
//!
//! ```toml
//! interpolator = { decelerate = { factor = 1.0 } }
//!
//! [ripple]
//! color = "#80FFFFFF"
//! style = "fill"
//! trigger = "press_down"
//! frames = 30
//!
//! [highlight]
//! enabled = true
//!
//! [zoom]
//! enabled = true
//! scale = 1.05
//! ```
//!
//! Values are not validated here. Invalid frame settings surface from the
//! first frame of the next run.

use std::fs;
use std::path::{Path, PathBuf};

use ripplekit_animation::DecoratorConfig;
use thiserror::Error;

/// Configuration file errors
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Parse a configuration from TOML text
pub fn parse_config(content: &str) -> Result<DecoratorConfig, SettingsError> {
    Ok(toml::from_str(content)?)
}

/// Load a configuration from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> Result<DecoratorConfig, SettingsError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("loaded configuration from {}", path.display());
    parse_config(&content)
}

/// Render a configuration as TOML
pub fn to_toml(config: &DecoratorConfig) -> Result<String, SettingsError> {
    Ok(toml::to_string_pretty(config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ripplekit_animation::{Easing, RippleStyle, Trigger};
    use ripplekit_core::Color;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, DecoratorConfig::default());
    }

    #[test]
    fn test_partial_file() {
        let config = parse_config(
            r##"
            interpolator = { decelerate = { factor = 1.0 } }

            [ripple]
            color = "#FF0000"
            style = "fill"
            trigger = "press_up"
            frames = 30
            peak_frame = 10

            [zoom]
            enabled = true
            "##,
        )
        .unwrap();

        assert_eq!(config.ripple.color, Color::RED);
        assert_eq!(config.highlight.color(config.ripple.color), Color::RED);
        assert_eq!(config.ripple.style, RippleStyle::Fill);
        assert_eq!(config.ripple.trigger, Trigger::PressUp);
        assert_eq!(config.ripple.frames, 30);
        assert_eq!(config.ripple.peak_frame(), 10);
        assert_eq!(config.ripple.duration_ms, 400.0);
        assert!(config.zoom.enabled);
        assert_eq!(config.zoom.scale, 1.03);
        assert_eq!(config.interpolator, Easing::decelerate());
    }

    #[test]
    fn test_invalid_frames_are_accepted_on_load() {
        let config = parse_config("[ripple]\nframes = 0\n").unwrap();
        assert_eq!(config.ripple.frames, 0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let err = parse_config("[ripple]\ntrigger = \"sometimes\"\n").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = load_config("/nonexistent/ripplekit/decorator.toml").unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
        assert!(err.to_string().contains("decorator.toml"));
    }

    #[test]
    fn test_defaults_survive_toml_output() {
        let mut config = DecoratorConfig::default();
        config.highlight.enabled = true;
        config.ripple.radius = Some(24.0);

        let text = to_toml(&config).unwrap();
        assert!(text.contains("[highlight]"));
        assert_eq!(parse_config(&text).unwrap(), config);
    }

    #[test]
    fn test_explicit_highlight_color_survives_toml_output() {
        let mut config = DecoratorConfig::default();
        config.highlight.color = Some(Color::BLUE);

        let text = to_toml(&config).unwrap();
        let parsed = parse_config(&text).unwrap();
        assert_eq!(parsed.highlight.color, Some(Color::BLUE));
        assert_eq!(parsed.highlight.color(parsed.ripple.color), Color::BLUE);
    }

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir().join(format!(
            "ripplekit-settings-{}.toml",
            std::process::id()
        ));
        fs::write(&path, "[highlight]\nenabled = true\nmax_alpha = 0.5\n").unwrap();

        let config = load_config(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert!(config.highlight.enabled);
        assert_eq!(config.highlight.max_alpha, 0.5);
    }
}
