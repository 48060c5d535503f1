//! Quiz settings
//!
//! Supplied by the host page as JSON in `<body data-settings="...">` (web) or
//! the `TIMES_TABLE_SETTINGS` environment variable (native). Missing fields
//! take their defaults; malformed input falls back to defaults entirely.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;
use crate::quiz::DifficultyLevel;

/// Quiz settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Level used by hosts without a level picker (native `times-table` with no argument)
    pub default_level: DifficultyLevel,
    /// Length of one post-answer delay unit (ms)
    pub delay_unit_ms: u32,
    /// Session timer tick interval (ms)
    pub tick_interval_ms: u32,
    /// Fixed RNG seed; None seeds from the clock
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_level: DifficultyLevel::Easy,
            delay_unit_ms: DELAY_UNIT_MS,
            tick_interval_ms: TICK_INTERVAL_MS,
            seed: None,
        }
    }
}

impl Settings {
    /// Environment variable read by the native host
    pub const ENV_VAR: &'static str = "TIMES_TABLE_SETTINGS";

    /// `data-*` attribute read by the web host
    pub const DATA_ATTRIBUTE: &'static str = "data-settings";

    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        check_interval("delay_unit_ms", settings.delay_unit_ms)?;
        check_interval("tick_interval_ms", settings.tick_interval_ms)?;
        Ok(settings)
    }

    /// Parse optional settings JSON, falling back to defaults
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        let Some(json) = json.filter(|j| !j.trim().is_empty()) else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings: {:?}", settings);
                settings
            }
            Err(err) => {
                log::warn!("Ignoring settings ({}), using defaults", err);
                Self::default()
            }
        }
    }

    /// Load settings from the page body (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body())
            .and_then(|b| b.get_attribute(Self::DATA_ATTRIBUTE));
        Self::from_json_or_default(json.as_deref())
    }

    /// Load settings from the environment (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let json = std::env::var(Self::ENV_VAR).ok();
        Self::from_json_or_default(json.as_deref())
    }
}

/// Reject zero and anything past [`MAX_INTERVAL_MS`]
fn check_interval(field: &'static str, value: u32) -> Result<(), SettingsError> {
    if value == 0 {
        return Err(SettingsError::ZeroDelay(field));
    }
    if value > MAX_INTERVAL_MS {
        return Err(SettingsError::DelayTooLong {
            field,
            value,
            max: MAX_INTERVAL_MS,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.default_level, DifficultyLevel::Easy);
        assert_eq!(settings.delay_unit_ms, 1000);
        assert_eq!(settings.tick_interval_ms, 1000);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{"default_level":"hard","seed":7}"#).unwrap();
        assert_eq!(settings.default_level, DifficultyLevel::Hard);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.delay_unit_ms, DELAY_UNIT_MS);
    }

    #[test]
    fn test_rejects_bad_settings() {
        assert!(matches!(
            Settings::from_json("{not json"),
            Err(SettingsError::Json(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{"delay_unit_ms":0}"#),
            Err(SettingsError::ZeroDelay("delay_unit_ms"))
        ));
        assert!(matches!(
            Settings::from_json(r#"{"default_level":"impossible"}"#),
            Err(SettingsError::Json(_))
        ));
    }

    #[test]
    fn test_rejects_intervals_over_limit() {
        assert!(Settings::from_json(r#"{"delay_unit_ms":60000,"tick_interval_ms":60000}"#).is_ok());
        assert!(matches!(
            Settings::from_json(r#"{"delay_unit_ms":60001}"#),
            Err(SettingsError::DelayTooLong {
                field: "delay_unit_ms",
                value: 60_001,
                max: MAX_INTERVAL_MS,
            })
        ));
        assert!(matches!(
            Settings::from_json(r#"{"delay_unit_ms":3000000000}"#),
            Err(SettingsError::DelayTooLong { .. })
        ));
        assert!(matches!(
            Settings::from_json(r#"{"tick_interval_ms":4294967295}"#),
            Err(SettingsError::DelayTooLong {
                field: "tick_interval_ms",
                ..
            })
        ));
        assert_eq!(
            Settings::from_json_or_default(Some(r#"{"delay_unit_ms":3000000000}"#)),
            Settings::default()
        );
    }

    #[test]
    fn test_fallback_to_defaults() {
        assert_eq!(Settings::from_json_or_default(None), Settings::default());
        assert_eq!(Settings::from_json_or_default(Some("  ")), Settings::default());
        assert_eq!(
            Settings::from_json_or_default(Some(r#"{"tick_interval_ms":0}"#)),
            Settings::default()
        );
        assert_eq!(
            Settings::from_json_or_default(Some(r#"{"delay_unit_ms":10}"#)).delay_unit_ms,
            10
        );
    }
}
