//! Post-processing compositor
//!
//! Runs an ordered stack of post effects over a rendered frame, ping-ponging
//! between two offscreen buffers.
//!
//! # Architecture
//!
//! - [`orchestrator::FrameOrchestrator`] - Per-frame driver: scene, passes, present
//! - [`executor::PassExecutor`] - Runs one stack entry as one pass
//! - [`pool::FrameBufferPool`] - Read/write routing by pass parity
//! - [`registry::EffectRegistry`] - Effect handlers indexed by [`pfx_core::EffectId`]
//! - [`traits::FrameDevice`] - Device calls the compositor issues
//! - [`wgpu_device::WgpuFrameDevice`] - wgpu implementation of the device
//!
//! # Example
//!
//! ```ignore
//! use pfx_renderer::{EmptyScene, FrameOrchestrator, RenderContext, WgpuFrameDevice};
//!
//! let mut compositor = FrameOrchestrator::new(PipelineConfig::load_or_default(path))?;
//! let mut device = WgpuFrameDevice::new(RenderContext::new(device, queue, format, w, h));
//!
//! // Each frame
//! compositor.handle_input(&bindings, &input);
//! device.begin_frame(surface_view);
//! let frame = compositor.frame_context(dt, camera, viewport);
//! compositor.render_frame(&mut device, &mut EmptyScene, &frame);
//! surface_texture.present();
//! ```

pub mod constants;
pub mod context;
pub mod effects;
pub mod error;
pub mod executor;
pub mod orchestrator;
pub mod pool;
pub mod registry;
pub mod traits;
pub mod wgpu_device;

#[cfg(test)]
mod testing;

pub use constants::PostProcessConstants;
pub use context::RenderContext;
pub use error::PipelineError;
pub use executor::{CompositeStep, PassExecutor, PassReport, Region};
pub use orchestrator::{FrameOrchestrator, FramePhase, FrameReport};
pub use pool::FrameBufferPool;
pub use registry::EffectRegistry;
pub use traits::{
    BlendMode, EffectContext, EmptyScene, FrameDevice, PostEffect, Program, SceneRenderer,
    VertexStage,
};
pub use wgpu_device::WgpuFrameDevice;
