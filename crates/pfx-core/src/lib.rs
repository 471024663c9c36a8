//! Post-processing compositor core
//!
//! GPU-free building blocks of the frame compositor: effect identifiers,
//! the effect stack, per-effect runtime state, camera projection into screen
//! space, and pipeline configuration.

pub mod camera;
pub mod config;
pub mod frame;
pub mod input;
pub mod pipeline;
pub mod projector;
pub mod stack;
pub mod state;
pub mod types;

pub use camera::Camera;
pub use config::{ConfigError, EffectParams, PipelineConfig};
pub use frame::{AreaAnchor, FrameContext, PolygonAnchor, Viewport};
pub use input::{InputSource, Key, KeyBinding, KeyBindings, StackAction};
pub use pipeline::PipelineState;
pub use projector::{ScreenArea, ScreenSpaceProjector};
pub use stack::{EffectGroup, EffectGroups, EffectPreset, EffectStack};
pub use state::{EffectRuntimeState, EffectStates};
pub use types::*;
