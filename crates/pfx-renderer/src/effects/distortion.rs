//! Screen distortion and noise effects.

use pfx_core::{AuxTexture, EffectId, EffectStates, TextureSource};

use crate::constants::PostProcessConstants;
use crate::traits::{EffectContext, PostEffect};

/// Wavy refraction, animated by the timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnderWater;

impl PostEffect for UnderWater {
    fn id(&self) -> EffectId {
        EffectId::UnderWater
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

/// Rising shimmer, animated by the timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeatHaze;

impl PostEffect for HeatHaze {
    fn id(&self) -> EffectId {
        EffectId::HeatHaze
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

/// Film grain sampled from the noise texture at a random offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreyNoise;

impl PostEffect for GreyNoise {
    fn id(&self) -> EffectId {
        EffectId::GreyNoise
    }

    fn aux_input(&self) -> Option<TextureSource> {
        Some(TextureSource::Aux(AuxTexture::Noise))
    }

    fn configure(
        &self,
        ctx: &EffectContext<'_>,
        _states: &mut EffectStates,
        constants: &mut PostProcessConstants,
    ) {
        let size = ctx.frame.viewport.size();
        let grain = ctx.params.noise_grain_size;
        constants.noise = [
            size.x / grain,
            size.y / grain,
            rand::random::<f32>(),
            rand::random::<f32>(),
        ];
    }
}

/// Burns the image away along a threshold that climbs each frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct Burn;

impl PostEffect for Burn {
    fn id(&self) -> EffectId {
        EffectId::Burn
    }

    fn aux_input(&self) -> Option<TextureSource> {
        Some(TextureSource::Aux(AuxTexture::Burn))
    }

    fn configure(
        &self,
        ctx: &EffectContext<'_>,
        states: &mut EffectStates,
        constants: &mut PostProcessConstants,
    ) {
        let state = states.get_mut(self.id());
        state.phase = (state.phase + ctx.params.burn_speed * ctx.frame_time()) % 1.0;
        constants.levels[1] = state.phase;
    }
}

/// Offsets lookups by a distortion map.
#[derive(Debug, Clone, Copy, Default)]
pub struct Distort;

impl PostEffect for Distort {
    fn id(&self) -> EffectId {
        EffectId::Distort
    }

    fn aux_input(&self) -> Option<TextureSource> {
        Some(TextureSource::Aux(AuxTexture::Distort))
    }

    fn configure(
        &self,
        ctx: &EffectContext<'_>,
        _states: &mut EffectStates,
        constants: &mut PostProcessConstants,
    ) {
        constants.levels[2] = ctx.params.distort_level;
    }
}

/// Twists the image around the centre, winding in and out.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spiral;

impl PostEffect for Spiral {
    fn id(&self) -> EffectId {
        EffectId::Spiral
    }

    fn configure(
        &self,
        ctx: &EffectContext<'_>,
        states: &mut EffectStates,
        constants: &mut PostProcessConstants,
    ) {
        let state = states.get_mut(self.id());
        constants.levels[3] = (1.0 - state.phase.cos()) * 4.0;
        state.phase += ctx.params.spiral_speed * ctx.frame_time();
    }
}
