//! Scene renderer collaborator.

use pfx_core::{Camera, RenderTarget};

/// Draws the opaque 3D scene into a target that has already been cleared.
///
/// The renderer must also write the scene depth buffer so Area effects can
/// composite behind geometry.
pub trait SceneRenderer<D: ?Sized> {
    fn render_opaque_scene(&mut self, device: &mut D, camera: &Camera, target: RenderTarget);
}

/// Renders nothing; the frame shows only the clear colour.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyScene;

impl<D: ?Sized> SceneRenderer<D> for EmptyScene {
    fn render_opaque_scene(&mut self, _device: &mut D, _camera: &Camera, _target: RenderTarget) {}
}
