//! Bloom chain: capture, repeated dual filtering, merge.
//!
//! The capture pass snapshots the front buffer into the scratch slot and
//! extracts bright pixels; dual-filter passes blur the result; the merge pass
//! adds it back onto the snapshot.

use pfx_core::{BufferSlot, EffectId, EffectStates, TextureSource};

use crate::constants::PostProcessConstants;
use crate::traits::{EffectContext, PostEffect};

/// Bright-pass that opens a bloom chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct BloomCapture;

impl PostEffect for BloomCapture {
    fn id(&self) -> EffectId {
        EffectId::Bloom
    }

    fn captures_front_buffer(&self) -> bool {
        true
    }

    fn configure(
        &self,
        ctx: &EffectContext<'_>,
        states: &mut EffectStates,
        constants: &mut PostProcessConstants,
    ) {
        // each chain counts its own filter passes
        states.reset(EffectId::DualFiltering);
        constants.bloom[1] = ctx.params.bloom_threshold;
        constants.bloom[2] = ctx.params.bloom_intensity;
    }
}

/// One down/up-sample step; the offset grows with the iteration.
#[derive(Debug, Clone, Copy, Default)]
pub struct DualFiltering;

impl PostEffect for DualFiltering {
    fn id(&self) -> EffectId {
        EffectId::DualFiltering
    }

    fn configure(
        &self,
        _ctx: &EffectContext<'_>,
        states: &mut EffectStates,
        constants: &mut PostProcessConstants,
    ) {
        let state = states.get_mut(self.id());
        state.iteration += 1;
        constants.bloom[0] = state.iteration as f32;
    }
}

/// Adds the filtered bloom onto the captured image.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeTextures;

impl PostEffect for MergeTextures {
    fn id(&self) -> EffectId {
        EffectId::MergeTextures
    }

    fn aux_input(&self) -> Option<TextureSource> {
        Some(TextureSource::Frame(BufferSlot::Scratch))
    }

    fn configure(
        &self,
        ctx: &EffectContext<'_>,
        _states: &mut EffectStates,
        constants: &mut PostProcessConstants,
    ) {
        constants.bloom[2] = ctx.params.bloom_intensity;
    }
}
