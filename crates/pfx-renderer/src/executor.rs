//! Pass executor: runs one stack entry as one compositing pass.

use glam::Vec4;
use pfx_core::{
    ApplicationMode, BufferSlot, EffectId, EffectParams, EffectStates, FrameContext, PassRouting,
    RenderTarget, ScreenArea, ScreenSpaceProjector, StackEntry, TextureSource,
};

use crate::constants::{PostProcessConstants, AUX_SLOT, SOURCE_SLOT};
use crate::pool::FrameBufferPool;
use crate::registry::EffectRegistry;
use crate::traits::{BlendMode, EffectContext, FrameDevice, PostEffect, Program, VertexStage};

/// Screen region an effect is composited into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Region {
    Fullscreen,
    /// Soft-edged, alpha-blended rectangle
    Area(ScreenArea),
    /// Hard-edged quadrilateral in clip space
    Polygon([Vec4; 4]),
}

impl Region {
    fn program(&self, effect: EffectId) -> Program {
        match self {
            Region::Fullscreen => Program::new(effect, VertexStage::Quad, BlendMode::Replace),
            Region::Area(_) => Program::new(effect, VertexStage::Quad, BlendMode::Alpha),
            Region::Polygon(_) => Program::new(effect, VertexStage::Polygon, BlendMode::Replace),
        }
    }

    fn write_to(&self, constants: &mut PostProcessConstants) {
        match self {
            Region::Fullscreen => constants.set_area(&ScreenArea::FULLSCREEN),
            Region::Area(area) => constants.set_area(area),
            Region::Polygon(corners) => constants.set_polygon(corners),
        }
        constants.set_soft_edge(matches!(self, Region::Area(_)));
    }
}

/// One draw issued by a pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompositeStep {
    /// Front buffer copied into the scratch buffer
    Snapshot { from: BufferSlot },
    /// Input copied unchanged onto the target
    Copy,
    /// The effect itself
    Composite(Region),
}

/// What a pass did.
#[derive(Debug, Clone, PartialEq)]
pub struct PassReport {
    pub pass_index: usize,
    pub entry: StackEntry,
    pub routing: PassRouting,
    pub steps: Vec<CompositeStep>,
}

impl PassReport {
    pub fn draw_count(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if the effect was drawn, false for a copy-only pass.
    pub fn composited(&self) -> bool {
        self.steps
            .iter()
            .any(|step| matches!(step, CompositeStep::Composite(_)))
    }
}

/// Executes the passes of one frame.
///
/// Passes must run in order: each reads what the previous one wrote.
pub struct PassExecutor<'a, D: FrameDevice + ?Sized> {
    device: &'a mut D,
    registry: &'a EffectRegistry,
    pool: &'a mut FrameBufferPool,
    states: &'a mut EffectStates,
    params: &'a EffectParams,
    pass_count: usize,
}

impl<'a, D: FrameDevice + ?Sized> PassExecutor<'a, D> {
    pub fn new(
        device: &'a mut D,
        registry: &'a EffectRegistry,
        pool: &'a mut FrameBufferPool,
        states: &'a mut EffectStates,
        params: &'a EffectParams,
        pass_count: usize,
    ) -> Self {
        Self {
            device,
            registry,
            pool,
            states,
            params,
            pass_count,
        }
    }

    pub fn pass_count(&self) -> usize {
        self.pass_count
    }

    /// Runs `entry` as pass `pass_index`.
    ///
    /// # Panics
    ///
    /// Panics if the effect has no handler or `pass_index` is outside the
    /// chain.
    pub fn execute_pass(
        &mut self,
        entry: StackEntry,
        pass_index: usize,
        frame: &FrameContext,
    ) -> PassReport {
        let handler = self.registry.handler(entry.effect);
        let routing = self.pool.acquire_routing(pass_index, self.pass_count);
        let mut steps = Vec::with_capacity(3);

        if handler.captures_front_buffer() {
            let (from, scratch) = self.pool.snapshot_front();
            self.draw_copy(frame, from, RenderTarget::Offscreen(scratch));
            steps.push(CompositeStep::Snapshot { from });
        }

        if entry.mode.copies_background() {
            self.draw_copy(frame, routing.read, routing.write);
            steps.push(CompositeStep::Copy);
        }

        // The handler runs even when nothing gets drawn, so timers keep going.
        let ctx = EffectContext::new(frame, self.params);
        let mut constants = PostProcessConstants::new(frame.viewport, &frame.camera);
        handler.configure(&ctx, self.states, &mut constants);

        if let Some(region) = Self::region(entry, pass_index, frame) {
            region.write_to(&mut constants);
            self.draw_effect(handler, region.program(entry.effect), routing, &constants);
            steps.push(CompositeStep::Composite(region));
        }

        self.pool.complete_pass(routing);
        tracing::trace!(
            "Pass {} {} ({:?}): {:?} -> {:?}, {} draws",
            pass_index,
            entry.effect,
            entry.mode,
            routing.read,
            routing.write,
            steps.len()
        );

        PassReport {
            pass_index,
            entry,
            routing,
            steps,
        }
    }

    /// Region of the pass, or `None` if its anchor is missing or unusable.
    fn region(entry: StackEntry, pass_index: usize, frame: &FrameContext) -> Option<Region> {
        let projector = ScreenSpaceProjector::new(&frame.camera, frame.viewport);
        match entry.mode {
            ApplicationMode::Fullscreen => Some(Region::Fullscreen),
            ApplicationMode::Area => {
                let Some(anchor) = frame.area else {
                    tracing::warn!("Area pass {} ({}) has no anchor", pass_index, entry.effect);
                    return None;
                };
                let area = projector.project_area(&anchor);
                if area.is_none() {
                    tracing::debug!("Area pass {} is behind the near clip", pass_index);
                }
                area.map(Region::Area)
            }
            ApplicationMode::Polygon => match frame.polygon_for(pass_index) {
                Some(anchor) => Some(Region::Polygon(projector.project_polygon(anchor))),
                None => {
                    tracing::warn!(
                        "Polygon pass {} ({}) has no anchor",
                        pass_index,
                        entry.effect
                    );
                    None
                }
            },
        }
    }

    fn draw_copy(&mut self, frame: &FrameContext, from: BufferSlot, to: RenderTarget) {
        let constants = PostProcessConstants::new(frame.viewport, &frame.camera);
        self.device.set_render_target(to);
        self.device.bind_program(Program::copy());
        self.device.bind_texture(SOURCE_SLOT, TextureSource::Frame(from));
        self.device.unbind_texture(AUX_SLOT);
        self.device.set_constants(&constants);
        self.device.draw_quad();
    }

    fn draw_effect(
        &mut self,
        handler: &dyn PostEffect,
        program: Program,
        routing: PassRouting,
        constants: &PostProcessConstants,
    ) {
        self.device.set_render_target(routing.write);
        self.device.bind_program(program);
        self.device.bind_texture(SOURCE_SLOT, TextureSource::Frame(routing.read));
        match handler.aux_input() {
            Some(source) => self.device.bind_texture(AUX_SLOT, source),
            None => self.device.unbind_texture(AUX_SLOT),
        }
        self.device.set_constants(constants);
        self.device.draw_quad();
    }
}
