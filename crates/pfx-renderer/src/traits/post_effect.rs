//! PostEffect trait definition.

use pfx_core::{EffectId, EffectParams, EffectStates, FrameContext, TextureSource};

use crate::constants::PostProcessConstants;

/// Read-only inputs available while configuring an effect.
#[derive(Debug, Clone, Copy)]
pub struct EffectContext<'a> {
    pub frame: &'a FrameContext,
    pub params: &'a EffectParams,
}

impl<'a> EffectContext<'a> {
    pub fn new(frame: &'a FrameContext, params: &'a EffectParams) -> Self {
        Self { frame, params }
    }

    /// Seconds since the previous frame.
    pub fn frame_time(&self) -> f32 {
        self.frame.frame_time
    }
}

/// Behaviour of one post-process kind.
///
/// Handlers are stateless; anything that must survive between frames lives
/// in [`EffectStates`] under the handler's [`EffectId`].
pub trait PostEffect: Send + Sync {
    /// The effect this handler runs.
    fn id(&self) -> EffectId;

    /// Texture bound to the auxiliary slot, if any.
    fn aux_input(&self) -> Option<TextureSource> {
        None
    }

    /// Returns true if the current front buffer must be copied to the scratch
    /// buffer before this effect runs.
    fn captures_front_buffer(&self) -> bool {
        false
    }

    /// Advances the effect's runtime state and writes its uniforms.
    ///
    /// Called once per draw of the effect, before the region is written.
    fn configure(
        &self,
        ctx: &EffectContext<'_>,
        states: &mut EffectStates,
        constants: &mut PostProcessConstants,
    );
}
