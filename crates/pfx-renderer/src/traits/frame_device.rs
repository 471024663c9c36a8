//! Graphics device abstraction used by the pass executor.

use pfx_core::{EffectId, RenderTarget, TextureSource};

use crate::constants::PostProcessConstants;

/// Vertex program generating the composited quad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexStage {
    /// Axis-aligned quad from the uniform area rectangle
    Quad,
    /// Quadrilateral from the uniform clip-space corners
    Polygon,
}

/// Output blending of a post-process draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// Overwrite the target
    Replace,
    /// Fade by the fragment alpha
    Alpha,
}

/// Everything needed to select a post-process pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Program {
    /// Effect whose fragment program runs
    pub effect: EffectId,
    pub vertex: VertexStage,
    pub blend: BlendMode,
}

impl Program {
    pub fn new(effect: EffectId, vertex: VertexStage, blend: BlendMode) -> Self {
        Self {
            effect,
            vertex,
            blend,
        }
    }

    /// Unblended full-screen copy.
    pub fn copy() -> Self {
        Self::new(EffectId::Copy, VertexStage::Quad, BlendMode::Replace)
    }

    /// Returns true if the program samples the scene depth buffer, which then
    /// cannot be bound for depth testing in the same draw.
    pub fn samples_scene_depth(&self) -> bool {
        self.effect == EffectId::DepthOfField
    }

    /// Returns true if draws should be depth tested against the scene.
    pub fn uses_depth_test(&self) -> bool {
        !self.samples_scene_depth()
    }
}

/// The device calls the compositor issues.
///
/// Bindings persist until replaced; `draw_quad` consumes the current state.
pub trait FrameDevice {
    /// Clears a target to `colour` and the scene depth buffer to far.
    fn clear_target(&mut self, target: RenderTarget, colour: [f32; 4]);

    /// Selects the target of subsequent draws.
    fn set_render_target(&mut self, target: RenderTarget);

    /// Selects the program of subsequent draws.
    fn bind_program(&mut self, program: Program);

    /// Binds a texture to a program slot.
    fn bind_texture(&mut self, slot: u32, source: TextureSource);

    /// Unbinds a texture slot.
    fn unbind_texture(&mut self, slot: u32);

    /// Uploads the uniform block of subsequent draws.
    fn set_constants(&mut self, constants: &PostProcessConstants);

    /// Draws one four-vertex strip with the current state.
    fn draw_quad(&mut self);

    /// Hands the finished frame to the presentation layer.
    fn present(&mut self);
}
