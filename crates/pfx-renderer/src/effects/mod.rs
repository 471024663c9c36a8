//! Built-in effect handlers.
//!
//! ## Colour
//! - [`PlainEffect`]: programs with no uniforms (copy, sepia, inverted, ...)
//! - [`Tint`], [`VerticalGradient`], [`HueVerticalGradient`]
//!
//! ## Blur
//! - [`GaussianBlur`]: one axis of the separable blur
//! - [`Dilation`], [`DepthOfField`]
//!
//! ## Bloom chain
//! - [`BloomCapture`], [`DualFiltering`], [`MergeTextures`]
//!
//! ## Distortion
//! - [`UnderWater`], [`HeatHaze`], [`GreyNoise`], [`Burn`], [`Distort`], [`Spiral`]

pub mod bloom;
pub mod blur;
pub mod colour;
pub mod distortion;

pub use bloom::{BloomCapture, DualFiltering, MergeTextures};
pub use blur::{BlurAxis, DepthOfField, Dilation, GaussianBlur};
pub use colour::{HueVerticalGradient, PlainEffect, Tint, VerticalGradient};
pub use distortion::{Burn, Distort, GreyNoise, HeatHaze, Spiral, UnderWater};

use pfx_core::EffectId;

use crate::traits::PostEffect;

/// One handler for every [`EffectId`].
pub fn builtin_effects() -> Vec<Box<dyn PostEffect>> {
    vec![
        Box::new(PlainEffect::new(EffectId::Copy)),
        Box::new(PlainEffect::new(EffectId::NightVision)),
        Box::new(PlainEffect::new(EffectId::Sepia)),
        Box::new(PlainEffect::new(EffectId::Inverted)),
        Box::new(PlainEffect::new(EffectId::Contour)),
        Box::new(PlainEffect::new(EffectId::GameBoy)),
        Box::new(Tint),
        Box::new(VerticalGradient),
        Box::new(HueVerticalGradient),
        Box::new(GaussianBlur::new(BlurAxis::Horizontal)),
        Box::new(GaussianBlur::new(BlurAxis::Vertical)),
        Box::new(Dilation),
        Box::new(DepthOfField),
        Box::new(BloomCapture),
        Box::new(DualFiltering),
        Box::new(MergeTextures),
        Box::new(UnderWater),
        Box::new(HeatHaze),
        Box::new(GreyNoise),
        Box::new(Burn),
        Box::new(Distort),
        Box::new(Spiral),
    ]
}

#[cfg(test)]
pub(crate) mod test_util {
    use pfx_core::{Camera, EffectParams, EffectStates, FrameContext, Viewport};

    use crate::constants::PostProcessConstants;
    use crate::traits::{EffectContext, PostEffect};

    pub fn frame(frame_time: f32) -> FrameContext {
        FrameContext::new(frame_time, Camera::new(2.0), Viewport::new(280, 140))
    }

    /// Configures `effect` once and returns the written uniforms.
    pub fn configure(
        effect: &dyn PostEffect,
        frame: &FrameContext,
        states: &mut EffectStates,
    ) -> PostProcessConstants {
        let params = EffectParams::default();
        let ctx = EffectContext::new(frame, &params);
        let mut constants = PostProcessConstants::new(frame.viewport, &frame.camera);
        effect.configure(&ctx, states, &mut constants);
        constants
    }
}
