//! Effect identifiers and application modes

use serde::{Deserialize, Serialize};

/// Post-process kinds known to the compositor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EffectId {
    Copy,
    Tint,
    NightVision,
    VerticalColourGradient,
    HueVerticalColourGradient,
    GaussianBlurHorizontal,
    GaussianBlurVertical,
    UnderWater,
    Sepia,
    Inverted,
    Contour,
    GameBoy,
    /// Bright-pass capture that starts the bloom chain
    Bloom,
    DualFiltering,
    MergeTextures,
    Dilation,
    DepthOfField,
    GreyNoise,
    Burn,
    Distort,
    Spiral,
    HeatHaze,
}

impl EffectId {
    /// Every effect, in declaration order.
    pub const ALL: [EffectId; 22] = [
        EffectId::Copy,
        EffectId::Tint,
        EffectId::NightVision,
        EffectId::VerticalColourGradient,
        EffectId::HueVerticalColourGradient,
        EffectId::GaussianBlurHorizontal,
        EffectId::GaussianBlurVertical,
        EffectId::UnderWater,
        EffectId::Sepia,
        EffectId::Inverted,
        EffectId::Contour,
        EffectId::GameBoy,
        EffectId::Bloom,
        EffectId::DualFiltering,
        EffectId::MergeTextures,
        EffectId::Dilation,
        EffectId::DepthOfField,
        EffectId::GreyNoise,
        EffectId::Burn,
        EffectId::Distort,
        EffectId::Spiral,
        EffectId::HeatHaze,
    ];

    /// Stable snake_case name, also used for shader entry points (`fs_<name>`).
    pub fn name(&self) -> &'static str {
        match self {
            EffectId::Copy => "copy",
            EffectId::Tint => "tint",
            EffectId::NightVision => "night_vision",
            EffectId::VerticalColourGradient => "vertical_gradient",
            EffectId::HueVerticalColourGradient => "hue_vertical_gradient",
            EffectId::GaussianBlurHorizontal => "blur_horizontal",
            EffectId::GaussianBlurVertical => "blur_vertical",
            EffectId::UnderWater => "under_water",
            EffectId::Sepia => "sepia",
            EffectId::Inverted => "inverted",
            EffectId::Contour => "contour",
            EffectId::GameBoy => "game_boy",
            EffectId::Bloom => "bloom",
            EffectId::DualFiltering => "dual_filtering",
            EffectId::MergeTextures => "merge_textures",
            EffectId::Dilation => "dilation",
            EffectId::DepthOfField => "depth_of_field",
            EffectId::GreyNoise => "grey_noise",
            EffectId::Burn => "burn",
            EffectId::Distort => "distort",
            EffectId::Spiral => "spiral",
            EffectId::HeatHaze => "heat_haze",
        }
    }
}

impl std::fmt::Display for EffectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// How a pass's output region is computed and blended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ApplicationMode {
    /// Whole viewport, no blending, nearest depth
    #[default]
    Fullscreen,
    /// Soft-edged screen rectangle around a projected world anchor
    Area,
    /// Hard-edged quadrilateral from four projected world points
    Polygon,
}

impl ApplicationMode {
    /// Returns true if the mode copies the whole input before compositing.
    pub fn copies_background(&self) -> bool {
        matches!(self, ApplicationMode::Area | ApplicationMode::Polygon)
    }
}

/// One entry of the effect stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StackEntry {
    pub effect: EffectId,
    pub mode: ApplicationMode,
}

impl StackEntry {
    pub fn new(effect: EffectId, mode: ApplicationMode) -> Self {
        Self { effect, mode }
    }

    pub fn fullscreen(effect: EffectId) -> Self {
        Self::new(effect, ApplicationMode::Fullscreen)
    }
}
