//! Offscreen buffer identities and texture sources

use serde::{Deserialize, Serialize};

/// One of the fixed offscreen colour targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferSlot {
    /// Receives the scene render and every odd pass
    Primary,
    /// Receives every even pass
    Secondary,
    /// Holds a snapshot outside the ping-pong
    Scratch,
}

impl BufferSlot {
    pub const ALL: [BufferSlot; 3] = [BufferSlot::Primary, BufferSlot::Secondary, BufferSlot::Scratch];

    pub fn index(&self) -> usize {
        match self {
            BufferSlot::Primary => 0,
            BufferSlot::Secondary => 1,
            BufferSlot::Scratch => 2,
        }
    }
}

/// Where a draw lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderTarget {
    Offscreen(BufferSlot),
    /// The presentable back buffer
    Display,
}

impl RenderTarget {
    pub fn offscreen(&self) -> Option<BufferSlot> {
        match self {
            RenderTarget::Offscreen(slot) => Some(*slot),
            RenderTarget::Display => None,
        }
    }
}

/// Static textures an effect may sample besides its frame input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuxTexture {
    Noise,
    Burn,
    Distort,
}

/// Anything that can be bound to a texture slot of a post-process program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSource {
    Frame(BufferSlot),
    Aux(AuxTexture),
    /// Depth buffer written by the scene render
    SceneDepth,
}

/// Read/write pair for one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassRouting {
    pub read: BufferSlot,
    pub write: RenderTarget,
}
