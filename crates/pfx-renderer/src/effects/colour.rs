//! Colour grading effects.

use pfx_core::{EffectId, EffectStates};

use crate::constants::PostProcessConstants;
use crate::traits::{EffectContext, PostEffect};

/// An effect whose program needs nothing beyond the pass input.
#[derive(Debug, Clone, Copy)]
pub struct PlainEffect {
    id: EffectId,
}

impl PlainEffect {
    pub fn new(id: EffectId) -> Self {
        Self { id }
    }
}

impl PostEffect for PlainEffect {
    fn id(&self) -> EffectId {
        self.id
    }

    fn configure(
        &self,
        _ctx: &EffectContext<'_>,
        _states: &mut EffectStates,
        _constants: &mut PostProcessConstants,
    ) {
    }
}

/// Multiplies the image by a constant colour.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tint;

impl PostEffect for Tint {
    fn id(&self) -> EffectId {
        EffectId::Tint
    }

    fn configure(
        &self,
        ctx: &EffectContext<'_>,
        _states: &mut EffectStates,
        constants: &mut PostProcessConstants,
    ) {
        constants.tint_colour = rgb(ctx.params.tint_colour);
    }
}

/// Tints from a top colour to a bottom colour.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerticalGradient;

impl PostEffect for VerticalGradient {
    fn id(&self) -> EffectId {
        EffectId::VerticalColourGradient
    }

    fn configure(
        &self,
        ctx: &EffectContext<'_>,
        _states: &mut EffectStates,
        constants: &mut PostProcessConstants,
    ) {
        constants.top_colour = rgb(ctx.params.gradient_top);
        constants.bottom_colour = rgb(ctx.params.gradient_bottom);
    }
}

/// Vertical gradient whose hue cycles over time.
#[derive(Debug, Clone, Copy, Default)]
pub struct HueVerticalGradient;

impl PostEffect for HueVerticalGradient {
    fn id(&self) -> EffectId {
        EffectId::HueVerticalColourGradient
    }

    fn configure(
        &self,
        ctx: &EffectContext<'_>,
        states: &mut EffectStates,
        constants: &mut PostProcessConstants,
    ) {
        let timer = states.get_mut(self.id()).advance_timer(ctx.frame_time());
        constants.timing = [timer, ctx.params.gradient_period, 0.0, 0.0];
        constants.top_colour = rgb(ctx.params.gradient_top);
        constants.bottom_colour = rgb(ctx.params.gradient_bottom);
    }
}

fn rgb(colour: [f32; 3]) -> [f32; 4] {
    [colour[0], colour[1], colour[2], 1.0]
}
