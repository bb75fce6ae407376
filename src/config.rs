//! Board configuration with environment overrides.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    BORDER_WIDTH_PX, CONTROL_POINT_RADIUS_PX, CONTROL_POINT_STROKE_PX, DOUBLE_CLICK_MS, MAX_ZOOM, MIN_ZOOM,
    WHEEL_ZOOM_BASE,
};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: String, value: String },
    #[error("zoom range is empty: min {min} > max {max}")]
    ZoomRange { min: f64, max: f64 },
}

/// Tunables for the interaction engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub wheel_zoom_base: f64,
    pub double_click_ms: u64,
    pub border_width_px: f64,
    pub control_point_radius_px: f64,
    pub control_point_stroke_px: f64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            wheel_zoom_base: WHEEL_ZOOM_BASE,
            double_click_ms: DOUBLE_CLICK_MS,
            border_width_px: BORDER_WIDTH_PX,
            control_point_radius_px: CONTROL_POINT_RADIUS_PX,
            control_point_stroke_px: CONTROL_POINT_STROKE_PX,
        }
    }
}

impl BoardConfig {
    /// Build config from environment variables, falling back to defaults.
    ///
    /// Optional:
    /// - `NOTEBOARD_MIN_ZOOM`: default 0.2
    /// - `NOTEBOARD_MAX_ZOOM`: default 5
    /// - `NOTEBOARD_WHEEL_ZOOM_BASE`: default 0.999, must lie in (0, 1)
    /// - `NOTEBOARD_DOUBLE_CLICK_MS`: default 200
    ///
    /// # Errors
    ///
    /// Returns `Invalid` for unparseable or out-of-range values and
    /// `ZoomRange` when the minimum zoom exceeds the maximum.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let min_zoom = env_parse_f64("NOTEBOARD_MIN_ZOOM", defaults.min_zoom)?;
        let max_zoom = env_parse_f64("NOTEBOARD_MAX_ZOOM", defaults.max_zoom)?;
        let wheel_zoom_base = env_parse_f64("NOTEBOARD_WHEEL_ZOOM_BASE", defaults.wheel_zoom_base)?;
        let double_click_ms = env_parse_u64("NOTEBOARD_DOUBLE_CLICK_MS", defaults.double_click_ms)?;

        let cfg = Self { min_zoom, max_zoom, wheel_zoom_base, double_click_ms, ..defaults };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check the invariants the board relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_zoom > 0.0 && self.min_zoom.is_finite()) {
            return Err(invalid("NOTEBOARD_MIN_ZOOM", self.min_zoom));
        }
        if !self.max_zoom.is_finite() {
            return Err(invalid("NOTEBOARD_MAX_ZOOM", self.max_zoom));
        }
        if self.min_zoom > self.max_zoom {
            return Err(ConfigError::ZoomRange { min: self.min_zoom, max: self.max_zoom });
        }
        if !(self.wheel_zoom_base > 0.0 && self.wheel_zoom_base < 1.0) {
            return Err(invalid("NOTEBOARD_WHEEL_ZOOM_BASE", self.wheel_zoom_base));
        }
        Ok(())
    }
}

fn invalid(var: &str, value: f64) -> ConfigError {
    ConfigError::Invalid { var: var.to_string(), value: value.to_string() }
}

fn env_parse_f64(key: &str, default: f64) -> Result<f64, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| ConfigError::Invalid { var: key.to_string(), value: raw }),
        Err(_) => Ok(default),
    }
}

fn env_parse_u64(key: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::Invalid { var: key.to_string(), value: raw }),
        Err(_) => Ok(default),
    }
}

