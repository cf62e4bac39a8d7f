//! Control layer configuration
//!
//! Every tunable threshold lives here so deployments can adapt to their
//! AR hardware's tracking noise profile. Defaults match the reference
//! behavior. Configs serialize to RON for persistence alongside other
//! viewer settings.

use serde::{Deserialize, Serialize};

/// Gesture classifier configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeadzoneConfig {
    /// Deadzone radius in viewport-width-normalized units
    pub size: f32,
}

impl Default for DeadzoneConfig {
    fn default() -> Self {
        Self { size: 0.1 }
    }
}

/// Rotation control configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RotationConfig {
    /// Swirl angle multiplier
    pub swirl_sensitivity: f32,
    /// Swipe drag-to-angle multiplier (radians per normalized unit)
    pub swipe_sensitivity: f32,
    /// Slerp smoothing duration in milliseconds
    pub duration_ms: f32,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            swirl_sensitivity: 1.0,
            swipe_sensitivity: 4.0,
            duration_ms: 300.0,
        }
    }
}

/// Translation control configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranslateConfig {
    /// Hover offset above the floor while dragging
    pub hover_height: f32,
    /// Amplitude of the floating animation while dragging
    pub hover_amplitude: f32,
    /// Period of the floating animation in milliseconds
    pub hover_period_ms: f32,
    /// Settle-to-surface animation duration in milliseconds
    pub bounce_duration_ms: f32,
    /// Minimum up-normal dot product for a sample to count as floor
    pub floor_normal_threshold: f32,
    /// Maximum |up-normal dot| for a sample to count as wall
    pub wall_normal_threshold: f32,
    /// Normal change (degrees) required to re-bake the drag basis
    pub rebake_angle_deg: f32,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            hover_height: 0.1,
            hover_amplitude: 0.01,
            hover_period_ms: 1000.0,
            bounce_duration_ms: 1000.0,
            floor_normal_threshold: 0.75,
            wall_normal_threshold: 0.25,
            rebake_angle_deg: 10.0,
        }
    }
}

/// Pinch scale configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScaleConfig {
    /// Minimum scale multiplier
    pub min: f32,
    /// Maximum scale multiplier
    pub max: f32,
    /// Span-ratio-to-scale multiplier
    pub sensitivity: f32,
    /// Scale smoothing duration in milliseconds
    pub duration_ms: f32,
    /// Fraction of the frustum the auto initial scale fills
    pub fit_margin: f32,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            min: 0.05,
            max: 5.0,
            sensitivity: 1.0,
            duration_ms: 100.0,
            fit_margin: 0.8,
        }
    }
}

/// Desktop orbit configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrbitConfig {
    /// Degrees of yaw per viewport width of drag
    pub rotate_sensitivity: f32,
    /// Pivot pan distance per viewport width of drag, scaled by zoom
    pub pan_sensitivity: f32,
    /// Zoom distance per wheel step
    pub zoom_sensitivity: f32,
    /// Minimum orbit distance
    pub min_zoom: f32,
    /// Maximum orbit distance
    pub max_zoom: f32,
    /// Motion smoothing duration in milliseconds
    pub duration_ms: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            rotate_sensitivity: 180.0,
            pan_sensitivity: 1.0,
            zoom_sensitivity: 0.25,
            min_zoom: 0.1,
            max_zoom: 100.0,
            duration_ms: 300.0,
        }
    }
}

/// Complete control layer configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ControlConfig {
    #[serde(default)]
    pub deadzone: DeadzoneConfig,
    #[serde(default)]
    pub rotation: RotationConfig,
    #[serde(default)]
    pub translate: TranslateConfig,
    #[serde(default)]
    pub scale: ScaleConfig,
    #[serde(default)]
    pub orbit: OrbitConfig,
}

impl ControlConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a RON string.
    pub fn from_ron_str(s: &str) -> Result<Self, ConfigError> {
        ron::from_str(s).map_err(|e| ConfigError::Deserialize(e.to_string()))
    }

    /// Serialize to a RON string.
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_consistent() {
        let config = ControlConfig::default();
        assert!(config.scale.min < config.scale.max);
        assert!(config.translate.wall_normal_threshold < config.translate.floor_normal_threshold);
        assert!(config.orbit.min_zoom < config.orbit.max_zoom);
    }

    #[test]
    fn ron_round_trip() {
        let mut config = ControlConfig::default();
        config.deadzone.size = 0.05;
        config.translate.rebake_angle_deg = 15.0;

        let text = config.to_ron_string().unwrap();
        let parsed = ControlConfig::from_ron_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn partial_ron_uses_defaults() {
        let parsed = ControlConfig::from_ron_str("(deadzone: (size: 0.2))").unwrap();
        assert_eq!(parsed.deadzone.size, 0.2);
        assert_eq!(parsed.scale, ScaleConfig::default());
    }
}
