//! Blur family: separable gaussian, dilation and depth of field.

use pfx_core::{EffectId, EffectStates, TextureSource};

use crate::constants::PostProcessConstants;
use crate::traits::{EffectContext, PostEffect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlurAxis {
    Horizontal,
    Vertical,
}

/// One axis of the separable gaussian blur.
#[derive(Debug, Clone, Copy)]
pub struct GaussianBlur {
    axis: BlurAxis,
}

impl GaussianBlur {
    pub fn new(axis: BlurAxis) -> Self {
        Self { axis }
    }

    pub fn axis(&self) -> BlurAxis {
        self.axis
    }
}

impl PostEffect for GaussianBlur {
    fn id(&self) -> EffectId {
        match self.axis {
            BlurAxis::Horizontal => EffectId::GaussianBlurHorizontal,
            BlurAxis::Vertical => EffectId::GaussianBlurVertical,
        }
    }

    fn configure(
        &self,
        ctx: &EffectContext<'_>,
        _states: &mut EffectStates,
        constants: &mut PostProcessConstants,
    ) {
        constants.levels[0] = ctx.params.blur_amount;
    }
}

/// Grows bright regions; the kernel radius pulses with time.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dilation;

impl PostEffect for Dilation {
    fn id(&self) -> EffectId {
        EffectId::Dilation
    }

    fn configure(
        &self,
        ctx: &EffectContext<'_>,
        states: &mut EffectStates,
        constants: &mut PostProcessConstants,
    ) {
        constants.timing[0] = states.get_mut(self.id()).advance_timer(ctx.frame_time());
    }
}

/// Blurs by distance from the focal plane, reading the scene depth.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthOfField;

impl PostEffect for DepthOfField {
    fn id(&self) -> EffectId {
        EffectId::DepthOfField
    }

    fn aux_input(&self) -> Option<TextureSource> {
        Some(TextureSource::SceneDepth)
    }

    fn configure(
        &self,
        ctx: &EffectContext<'_>,
        _states: &mut EffectStates,
        constants: &mut PostProcessConstants,
    ) {
        constants.focus = [ctx.params.focal_distance, ctx.params.focal_range, 0.0, 0.0];
    }
}
