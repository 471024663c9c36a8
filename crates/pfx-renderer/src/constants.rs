//! Uniform block shared by every post-process program, plus fixed slots.

use bytemuck::{Pod, Zeroable};
use glam::Vec4;
use pfx_core::{Camera, ScreenArea, Viewport};

/// Texture slot holding the pass input (previous pass output or scene).
pub const SOURCE_SLOT: u32 = 0;
/// Texture slot holding an effect's auxiliary input.
pub const AUX_SLOT: u32 = 1;

/// Format of the offscreen colour targets.
pub const OFFSCREEN_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;
/// Format of the scene depth buffer.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Post-process uniform block: fifteen `vec4<f32>` in WGSL uniform layout.
///
/// Rebuilt for every draw: the region fields come from the pass, the rest
/// from the effect handler.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PostProcessConstants {
    /// xy = top-left, zw = size, in 0..1 screen coordinates
    pub area: [f32; 4],
    /// x = area depth, y = near clip, z = far clip, w = soft edge (0 or 1)
    pub depth: [f32; 4],
    /// xy = viewport size in pixels, zw = reciprocal
    pub viewport: [f32; 4],
    /// Clip-space polygon corners in strip order
    pub polygon: [[f32; 4]; 4],
    pub tint_colour: [f32; 4],
    pub top_colour: [f32; 4],
    pub bottom_colour: [f32; 4],
    /// x = effect timer, y = period
    pub timing: [f32; 4],
    /// xy = noise scale, zw = noise offset
    pub noise: [f32; 4],
    /// x = blur amount, y = burn height, z = distort level, w = spiral level
    pub levels: [f32; 4],
    /// x = dual-filter iteration, y = threshold, z = intensity
    pub bloom: [f32; 4],
    /// x = focal distance, y = focal range
    pub focus: [f32; 4],
}

impl PostProcessConstants {
    /// Full-screen constants for the given frame.
    pub fn new(viewport: Viewport, camera: &Camera) -> Self {
        let size = viewport.size();
        let mut constants = Self::zeroed();
        constants.viewport = [size.x, size.y, 1.0 / size.x, 1.0 / size.y];
        constants.depth = [0.0, camera.near_clip(), camera.far_clip(), 0.0];
        constants.set_area(&ScreenArea::FULLSCREEN);
        constants
    }

    pub fn set_area(&mut self, area: &ScreenArea) {
        self.area = [area.top_left.x, area.top_left.y, area.size.x, area.size.y];
        self.depth[0] = area.depth;
    }

    pub fn set_polygon(&mut self, corners: &[Vec4; 4]) {
        self.polygon = corners.map(|c| c.to_array());
    }

    /// Turns the circular alpha falloff on or off.
    pub fn set_soft_edge(&mut self, soft: bool) {
        self.depth[3] = if soft { 1.0 } else { 0.0 };
    }
}
