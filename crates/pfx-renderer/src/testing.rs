//! CPU stand-in for the GPU device, used by the pipeline tests.

use std::collections::{HashMap, HashSet};

use pfx_core::{BufferSlot, Camera, EffectId, RenderTarget, TextureSource};

use crate::constants::{PostProcessConstants, AUX_SLOT, SOURCE_SLOT};
use crate::traits::{FrameDevice, Program, SceneRenderer};

const PIXELS: usize = 4;

/// One issued draw with the bindings it consumed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRecord {
    pub target: RenderTarget,
    pub program: Program,
    pub source: TextureSource,
    pub aux: Option<TextureSource>,
    pub constants: PostProcessConstants,
}

/// Device whose buffers are a handful of tagged pixels.
///
/// The copy program reproduces its input exactly; every other program mixes
/// its effect into the pixels, so chains can be compared bit for bit.
#[derive(Debug, Default)]
pub struct SoftwareDevice {
    slots: [Vec<u64>; 3],
    display: Vec<u64>,
    target: Option<RenderTarget>,
    program: Option<Program>,
    textures: HashMap<u32, TextureSource>,
    constants: Option<PostProcessConstants>,
    pub draws: Vec<DrawRecord>,
    pub clears: Vec<RenderTarget>,
    pub touched: HashSet<BufferSlot>,
    pub presented: usize,
}

impl SoftwareDevice {
    pub fn new() -> Self {
        Self {
            slots: [vec![0; PIXELS], vec![0; PIXELS], vec![0; PIXELS]],
            display: vec![0; PIXELS],
            ..Default::default()
        }
    }

    pub fn pixels(&self, target: RenderTarget) -> &[u64] {
        match target {
            RenderTarget::Offscreen(slot) => &self.slots[slot.index()],
            RenderTarget::Display => &self.display,
        }
    }

    pub fn write(&mut self, target: RenderTarget, pixels: Vec<u64>) {
        match target {
            RenderTarget::Offscreen(slot) => {
                self.touched.insert(slot);
                self.slots[slot.index()] = pixels;
            }
            RenderTarget::Display => self.display = pixels,
        }
    }

    pub fn shade(effect: EffectId, pixel: u64) -> u64 {
        if effect == EffectId::Copy {
            pixel
        } else {
            pixel.wrapping_mul(31).wrapping_add(effect as u64 + 1)
        }
    }
}

impl FrameDevice for SoftwareDevice {
    fn clear_target(&mut self, target: RenderTarget, colour: [f32; 4]) {
        let value = colour.iter().map(|c| (c * 255.0) as u64).sum();
        self.write(target, vec![value; PIXELS]);
        self.clears.push(target);
    }

    fn set_render_target(&mut self, target: RenderTarget) {
        self.target = Some(target);
    }

    fn bind_program(&mut self, program: Program) {
        self.program = Some(program);
    }

    fn bind_texture(&mut self, slot: u32, source: TextureSource) {
        self.textures.insert(slot, source);
    }

    fn unbind_texture(&mut self, slot: u32) {
        self.textures.remove(&slot);
    }

    fn set_constants(&mut self, constants: &PostProcessConstants) {
        self.constants = Some(*constants);
    }

    fn draw_quad(&mut self) {
        let target = self.target.expect("draw without a target");
        let program = self.program.expect("draw without a program");
        let constants = self.constants.expect("draw without constants");
        let source = *self.textures.get(&SOURCE_SLOT).expect("draw without input");
        let TextureSource::Frame(read) = source else {
            panic!("pass input must be a frame buffer, got {:?}", source);
        };
        assert_ne!(RenderTarget::Offscreen(read), target, "draw reads its own target");

        let pixels = self.slots[read.index()]
            .iter()
            .map(|p| Self::shade(program.effect, *p))
            .collect();
        self.write(target, pixels);
        self.draws.push(DrawRecord {
            target,
            program,
            source,
            aux: self.textures.get(&AUX_SLOT).copied(),
            constants,
        });
    }

    fn present(&mut self) {
        self.presented += 1;
    }
}

/// Writes a fixed pattern and remembers where it went.
#[derive(Debug, Default)]
pub struct TestScene {
    pub targets: Vec<RenderTarget>,
}

impl TestScene {
    pub const PATTERN: [u64; PIXELS] = [3, 141, 59, 26];
}

impl SceneRenderer<SoftwareDevice> for TestScene {
    fn render_opaque_scene(
        &mut self,
        device: &mut SoftwareDevice,
        _camera: &Camera,
        target: RenderTarget,
    ) {
        device.write(target, Self::PATTERN.to_vec());
        self.targets.push(target);
    }
}
