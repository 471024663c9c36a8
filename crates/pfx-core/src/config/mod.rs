//! Pipeline configuration
//!
//! Baseline window effects, group sizes and every tunable effect constant.
//! Stored as RON; missing fields fall back to their defaults.

mod io;

pub use io::ConfigError;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::frame::PolygonAnchor;
use crate::stack::{EffectGroups, EffectStack};
use crate::types::EffectId;

/// Tunable constants of the built-in effects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EffectParams {
    /// Colour multiplied in by the tint effect
    pub tint_colour: [f32; 3],
    /// Gradient colour at the top of the screen
    pub gradient_top: [f32; 3],
    /// Gradient colour at the bottom of the screen
    pub gradient_bottom: [f32; 3],
    /// Seconds per hue cycle of the animated gradient
    pub gradient_period: f32,
    /// Blur kernel scale
    pub blur_amount: f32,
    /// Pixels per noise grain
    pub noise_grain_size: f32,
    /// Burn height gained per second
    pub burn_speed: f32,
    /// UV offset scale of the distortion map
    pub distort_level: f32,
    /// Spiral phase gained per second
    pub spiral_speed: f32,
    /// Luminance above which pixels feed the bloom
    pub bloom_threshold: f32,
    /// Strength of the bloom when merged back
    pub bloom_intensity: f32,
    /// View distance that stays in focus
    pub focal_distance: f32,
    /// Distance over which blur ramps up around the focal plane
    pub focal_range: f32,
}

impl Default for EffectParams {
    fn default() -> Self {
        Self {
            tint_colour: [1.0, 0.0, 0.0],
            gradient_top: [0.0, 0.0, 1.0],
            gradient_bottom: [0.0, 1.0, 1.0],
            gradient_period: 4.0,
            blur_amount: 1.0,
            noise_grain_size: 140.0,
            burn_speed: 0.2,
            distort_level: 0.03,
            spiral_speed: 1.0,
            bloom_threshold: 0.8,
            bloom_intensity: 1.0,
            focal_distance: 60.0,
            focal_range: 40.0,
        }
    }
}

/// Complete pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    /// Configuration format version
    pub version: u32,
    /// Always-on effects pushed in Polygon mode at the bottom of the stack
    pub window_effects: Vec<EffectId>,
    /// World-space corners of each window, in triangle-strip order
    pub window_polygons: Vec<[[f32; 3]; 4]>,
    /// Dual-filter passes between bloom capture and merge
    pub bloom_iterations: usize,
    /// Clear colour of the scene render
    pub background_colour: [f32; 4],
    /// World-space size of Area effects
    pub area_size: [f32; 2],
    /// Effect constants
    pub effects: EffectParams,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            window_effects: vec![
                EffectId::NightVision,
                EffectId::Contour,
                EffectId::Sepia,
                EffectId::Inverted,
            ],
            window_polygons: vec![
                window_quad(22.0, 33.0),
                window_quad(36.0, 49.0),
                window_quad(50.0, 63.0),
                window_quad(64.0, 78.0),
            ],
            bloom_iterations: 8,
            background_colour: [0.3, 0.3, 0.4, 1.0],
            area_size: [10.0, 10.0],
            effects: EffectParams::default(),
        }
    }
}

fn window_quad(left: f32, right: f32) -> [[f32; 3]; 4] {
    const TOP: f32 = 25.0;
    const BOTTOM: f32 = 5.0;
    const Z: f32 = -50.0;
    [
        [left, TOP, Z],
        [left, BOTTOM, Z],
        [right, TOP, Z],
        [right, BOTTOM, Z],
    ]
}

impl PipelineConfig {
    /// Current configuration version
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new() -> Self {
        Self::default()
    }

    /// Group table matching `bloom_iterations`.
    pub fn effect_groups(&self) -> EffectGroups {
        EffectGroups::new(self.bloom_iterations)
    }

    /// Effect stack holding the baseline window effects.
    pub fn build_stack(&self) -> EffectStack {
        EffectStack::new(self.window_effects.clone(), self.effect_groups())
    }

    /// Window polygons as untransformed anchors.
    pub fn window_anchors(&self) -> Vec<PolygonAnchor> {
        self.window_polygons
            .iter()
            .map(|quad| PolygonAnchor::new(quad.map(Vec3::from)))
            .collect()
    }

    pub fn area_size(&self) -> Vec2 {
        Vec2::from(self.area_size)
    }

    /// Checks values the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.effects.noise_grain_size <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "noise_grain_size must be positive, got {}",
                self.effects.noise_grain_size
            )));
        }
        if self.effects.gradient_period <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "gradient_period must be positive, got {}",
                self.effects.gradient_period
            )));
        }
        if self.area_size.iter().any(|v| *v <= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "area_size must be positive, got {:?}",
                self.area_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stack_matches_windows() {
        let config = PipelineConfig::default();
        let stack = config.build_stack();
        assert_eq!(stack.len(), 4);
        assert_eq!(stack.floor(), 4);
        assert_eq!(config.window_anchors().len(), stack.len());
    }

    #[test]
    fn test_default_groups() {
        let groups = PipelineConfig::default().effect_groups();
        assert_eq!(groups.ending_with(EffectId::MergeTextures).map(|g| g.len()), Some(10));
    }

    #[test]
    fn test_validate() {
        assert!(PipelineConfig::default().validate().is_ok());

        let mut config = PipelineConfig::default();
        config.effects.noise_grain_size = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
