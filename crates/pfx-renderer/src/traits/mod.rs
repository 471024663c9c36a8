//! Core traits for the compositor.
//!
//! These are the seams between the pass sequencing logic and its
//! collaborators: the graphics device, the scene renderer, and the
//! per-effect handlers.

mod frame_device;
mod post_effect;
mod scene_renderer;

pub use frame_device::*;
pub use post_effect::*;
pub use scene_renderer::*;
