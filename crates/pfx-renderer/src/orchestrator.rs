//! Frame orchestrator: scene render, pass sequence, present.

use glam::Vec3;
use pfx_core::{
    AreaAnchor, Camera, FrameContext, InputSource, KeyBindings, PipelineConfig, PipelineState,
    RenderTarget, StackAction, Viewport,
};

use crate::error::Result;
use crate::executor::{PassExecutor, PassReport};
use crate::pool::FrameBufferPool;
use crate::registry::EffectRegistry;
use crate::traits::{FrameDevice, SceneRenderer};

/// Where the orchestrator is within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePhase {
    SceneRender,
    /// Running the pass with this index
    PassSequence(usize),
    /// The frame was handed to the device; ready for the next one
    Presented,
}

/// What happened during one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub frame_index: u64,
    pub scene_target: RenderTarget,
    pub passes: Vec<PassReport>,
    /// Every phase the frame went through, in order
    pub phases: Vec<FramePhase>,
}

impl FrameReport {
    pub fn pass_count(&self) -> usize {
        self.passes.len()
    }

    /// Draws issued by the passes, excluding the scene.
    pub fn draw_count(&self) -> usize {
        self.passes.iter().map(PassReport::draw_count).sum()
    }

    /// Returns true if the scene was rendered straight to the display.
    pub fn scene_to_display(&self) -> bool {
        self.scene_target == RenderTarget::Display
    }
}

/// Per-frame driver of the compositing pipeline.
pub struct FrameOrchestrator {
    config: PipelineConfig,
    registry: EffectRegistry,
    state: PipelineState,
    pool: FrameBufferPool,
    phase: FramePhase,
    frame_index: u64,
}

impl FrameOrchestrator {
    /// Creates an orchestrator with the built-in effect handlers.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        Self::with_registry(config, EffectRegistry::with_builtin_effects())
    }

    /// Creates an orchestrator with a custom registry.
    ///
    /// Fails if the configuration is invalid or any effect lacks a handler.
    pub fn with_registry(config: PipelineConfig, registry: EffectRegistry) -> Result<Self> {
        config.validate()?;
        registry.ensure_complete()?;
        let state = PipelineState::from_config(&config);
        tracing::info!(
            "Compositor ready: {} window effects, {} bloom iterations",
            config.window_effects.len(),
            config.bloom_iterations
        );
        Ok(Self {
            config,
            registry,
            state,
            pool: FrameBufferPool::new(),
            phase: FramePhase::Presented,
            frame_index: 0,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn registry(&self) -> &EffectRegistry {
        &self.registry
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut PipelineState {
        &mut self.state
    }

    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    /// Number of frames presented so far.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn apply(&mut self, action: StackAction) {
        self.state.apply(action);
    }

    /// Applies every action bound to a key pressed this frame.
    pub fn handle_input(&mut self, bindings: &KeyBindings, input: &impl InputSource) {
        self.state.handle_input(bindings, input);
    }

    /// Frame context carrying the configured window anchors.
    pub fn frame_context(&self, frame_time: f32, camera: Camera, viewport: Viewport) -> FrameContext {
        FrameContext::new(frame_time, camera, viewport).with_polygons(self.config.window_anchors())
    }

    /// Area anchor of the configured size centred on `centre`.
    pub fn area_at(&self, centre: Vec3) -> AreaAnchor {
        AreaAnchor {
            centre,
            size: self.config.area_size(),
        }
    }

    /// Renders and presents one frame.
    ///
    /// The scene goes into the pool's entry buffer, or straight to the display
    /// when the stack is empty; then every stack entry runs as one pass.
    pub fn render_frame<D, S>(
        &mut self,
        device: &mut D,
        scene: &mut S,
        frame: &FrameContext,
    ) -> FrameReport
    where
        D: FrameDevice + ?Sized,
        S: SceneRenderer<D> + ?Sized,
    {
        let PipelineState { stack, effects } = &mut self.state;
        let pass_count = stack.len();

        let mut phases = Vec::with_capacity(pass_count + 2);
        enter(&mut self.phase, FramePhase::SceneRender, &mut phases);
        self.pool.begin_frame();
        let scene_target = FrameBufferPool::scene_target(pass_count);
        device.clear_target(scene_target, self.config.background_colour);
        scene.render_opaque_scene(device, &frame.camera, scene_target);

        let mut executor = PassExecutor::new(
            device,
            &self.registry,
            &mut self.pool,
            effects,
            &self.config.effects,
            pass_count,
        );
        let mut passes = Vec::with_capacity(pass_count);
        for (pass_index, entry) in stack.iter() {
            enter(&mut self.phase, FramePhase::PassSequence(pass_index), &mut phases);
            passes.push(executor.execute_pass(entry, pass_index, frame));
        }
        drop(executor);

        device.present();
        enter(&mut self.phase, FramePhase::Presented, &mut phases);
        let report = FrameReport {
            frame_index: self.frame_index,
            scene_target,
            passes,
            phases,
        };
        self.frame_index += 1;

        tracing::trace!(
            "Frame {}: {} passes, {} draws",
            report.frame_index,
            report.pass_count(),
            report.draw_count()
        );
        report
    }
}

fn enter(phase: &mut FramePhase, next: FramePhase, phases: &mut Vec<FramePhase>) {
    tracing::trace!("Frame phase {:?} -> {:?}", phase, next);
    *phase = next;
    phases.push(next);
}

impl std::fmt::Debug for FrameOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameOrchestrator")
            .field("phase", &self.phase)
            .field("frame_index", &self.frame_index)
            .field("stack", &self.state.stack.entries())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::CompositeStep;
    use crate::testing::{SoftwareDevice, TestScene};
    use pfx_core::{ApplicationMode, BufferSlot, EffectId, EffectPreset, Key};

    fn empty_orchestrator() -> FrameOrchestrator {
        let config = PipelineConfig {
            window_effects: Vec::new(),
            ..PipelineConfig::default()
        };
        FrameOrchestrator::new(config).unwrap()
    }

    fn frame(orchestrator: &FrameOrchestrator) -> FrameContext {
        orchestrator.frame_context(0.016, Camera::new(16.0 / 9.0), Viewport::new(160, 90))
    }

    fn push(orchestrator: &mut FrameOrchestrator, effect: EffectId) {
        orchestrator.apply(StackAction::Push(
            EffectPreset::Single(effect),
            ApplicationMode::Fullscreen,
        ));
    }

    #[test]
    fn test_empty_stack_renders_to_display() {
        let mut orchestrator = empty_orchestrator();
        let mut device = SoftwareDevice::new();
        let mut scene = TestScene::default();
        let frame = frame(&orchestrator);

        let report = orchestrator.render_frame(&mut device, &mut scene, &frame);

        assert!(report.scene_to_display());
        assert_eq!(report.pass_count(), 0);
        assert!(device.draws.is_empty());
        assert!(device.touched.is_empty());
        assert_eq!(scene.targets, vec![RenderTarget::Display]);
        assert_eq!(device.pixels(RenderTarget::Display), TestScene::PATTERN);
        assert_eq!(device.presented, 1);
        assert_eq!(orchestrator.phase(), FramePhase::Presented);
        assert_eq!(report.phases, vec![FramePhase::SceneRender, FramePhase::Presented]);
    }

    #[test]
    fn test_single_tint_reads_scene_writes_display() {
        let mut orchestrator = empty_orchestrator();
        push(&mut orchestrator, EffectId::Tint);
        let mut device = SoftwareDevice::new();
        let frame = frame(&orchestrator);

        let report = orchestrator.render_frame(&mut device, &mut TestScene::default(), &frame);

        assert_eq!(report.pass_count(), 1);
        assert_eq!(report.scene_target, RenderTarget::Offscreen(BufferSlot::Primary));
        let routing = report.passes[0].routing;
        assert_eq!(routing.read, BufferSlot::Primary);
        assert_eq!(routing.write, RenderTarget::Display);
        assert_eq!(device.draws.len(), 1);
    }

    #[test]
    fn test_blur_pair_routing() {
        let mut orchestrator = empty_orchestrator();
        orchestrator.apply(StackAction::Push(
            EffectPreset::BLUR_PAIR,
            ApplicationMode::Fullscreen,
        ));
        let mut device = SoftwareDevice::new();
        let frame = frame(&orchestrator);

        let report = orchestrator.render_frame(&mut device, &mut TestScene::default(), &frame);

        assert_eq!(report.pass_count(), 2);
        assert_eq!(report.passes[0].entry.effect, EffectId::GaussianBlurHorizontal);
        assert_eq!(report.passes[0].routing.read, BufferSlot::Primary);
        assert_eq!(
            report.passes[0].routing.write,
            RenderTarget::Offscreen(BufferSlot::Secondary)
        );
        assert_eq!(report.passes[1].routing.read, BufferSlot::Secondary);
        assert_eq!(report.passes[1].routing.write, RenderTarget::Display);
        assert_eq!(
            report.phases,
            vec![
                FramePhase::SceneRender,
                FramePhase::PassSequence(0),
                FramePhase::PassSequence(1),
                FramePhase::Presented,
            ]
        );
    }

    #[test]
    fn test_copy_chain_preserves_scene() {
        for length in 1..=7 {
            let mut orchestrator = empty_orchestrator();
            for _ in 0..length {
                push(&mut orchestrator, EffectId::Copy);
            }
            let mut device = SoftwareDevice::new();
            let frame = frame(&orchestrator);

            let report = orchestrator.render_frame(&mut device, &mut TestScene::default(), &frame);

            assert_eq!(report.pass_count(), length);
            assert_eq!(device.pixels(RenderTarget::Display), TestScene::PATTERN);
        }
    }

    #[test]
    fn test_each_pass_consumes_previous_output() {
        let chain = [EffectId::Sepia, EffectId::Tint, EffectId::Inverted];
        let mut orchestrator = empty_orchestrator();
        for effect in chain {
            push(&mut orchestrator, effect);
        }
        let mut device = SoftwareDevice::new();
        let frame = frame(&orchestrator);
        orchestrator.render_frame(&mut device, &mut TestScene::default(), &frame);

        let expected: Vec<u64> = TestScene::PATTERN
            .iter()
            .map(|pixel| {
                chain
                    .iter()
                    .fold(*pixel, |p, effect| SoftwareDevice::shade(*effect, p))
            })
            .collect();
        assert_eq!(device.pixels(RenderTarget::Display), expected);
    }

    #[test]
    fn test_baseline_windows_composite_on_polygons() {
        let mut orchestrator = FrameOrchestrator::new(PipelineConfig::default()).unwrap();
        let mut device = SoftwareDevice::new();
        let mut camera = Camera::new(16.0 / 9.0);
        camera.look_at(Vec3::new(50.0, 15.0, -50.0));
        let frame = orchestrator.frame_context(0.016, camera, Viewport::new(160, 90));

        let report = orchestrator.render_frame(&mut device, &mut TestScene::default(), &frame);

        assert_eq!(report.pass_count(), 4);
        assert_eq!(report.draw_count(), 8);
        for pass in &report.passes {
            assert_eq!(pass.steps[0], CompositeStep::Copy);
            assert!(pass.composited());
        }
        assert!(!device.touched.contains(&BufferSlot::Scratch));
    }

    #[test]
    fn test_bloom_chain_frame() {
        let mut orchestrator = FrameOrchestrator::new(PipelineConfig::default()).unwrap();
        orchestrator.apply(StackAction::Push(
            EffectPreset::BLOOM_CHAIN,
            ApplicationMode::Fullscreen,
        ));
        let mut device = SoftwareDevice::new();
        let frame = frame(&orchestrator);

        let report = orchestrator.render_frame(&mut device, &mut TestScene::default(), &frame);

        assert_eq!(report.pass_count(), 14);
        let bloom = &report.passes[4];
        assert_eq!(bloom.entry.effect, EffectId::Bloom);
        assert!(matches!(bloom.steps[0], CompositeStep::Snapshot { .. }));
        assert!(device.touched.contains(&BufferSlot::Scratch));
        assert_eq!(
            orchestrator
                .state()
                .effects
                .get(EffectId::DualFiltering)
                .iteration,
            8
        );
    }

    #[test]
    fn test_frames_advance() {
        let mut orchestrator = empty_orchestrator();
        let mut device = SoftwareDevice::new();
        let frame = frame(&orchestrator);
        for expected in 0..3 {
            let report = orchestrator.render_frame(&mut device, &mut TestScene::default(), &frame);
            assert_eq!(report.frame_index, expected);
        }
        assert_eq!(orchestrator.frame_index(), 3);
        assert_eq!(device.presented, 3);
    }

    #[test]
    fn test_reset_restarts_effect_animation() {
        let mut orchestrator = empty_orchestrator();
        push(&mut orchestrator, EffectId::Spiral);
        let mut device = SoftwareDevice::new();
        let frame = frame(&orchestrator);
        for _ in 0..3 {
            orchestrator.render_frame(&mut device, &mut TestScene::default(), &frame);
        }
        assert!(orchestrator.state().effects.get(EffectId::Spiral).phase > 0.0);

        orchestrator.apply(StackAction::ClearAndReset);
        assert!(orchestrator.state().effects.is_empty());

        push(&mut orchestrator, EffectId::Spiral);
        orchestrator.render_frame(&mut device, &mut TestScene::default(), &frame);
        let last = device.draws.last().unwrap();
        assert_eq!(last.constants.levels[3], 0.0);
    }

    #[test]
    fn test_input_drives_stack() {
        struct Pressed(Key);

        impl InputSource for Pressed {
            fn key_was_pressed_this_frame(&self, key: Key) -> bool {
                key == self.0
            }
        }

        let mut orchestrator = FrameOrchestrator::new(PipelineConfig::default()).unwrap();
        let bindings = KeyBindings::default();
        orchestrator.handle_input(&bindings, &Pressed(Key::Num2));
        assert_eq!(orchestrator.state().stack.len(), 6);
        orchestrator.handle_input(&bindings, &Pressed(Key::Backspace));
        assert_eq!(orchestrator.state().stack.len(), 4);
    }

    #[test]
    fn test_missing_handler_rejected() {
        let mut registry = EffectRegistry::with_builtin_effects();
        registry.unregister(EffectId::Burn);
        let result = FrameOrchestrator::with_registry(PipelineConfig::default(), registry);
        assert!(matches!(
            result,
            Err(crate::error::PipelineError::UnregisteredEffect(EffectId::Burn))
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = PipelineConfig::default();
        config.effects.noise_grain_size = 0.0;
        assert!(matches!(
            FrameOrchestrator::new(config),
            Err(crate::error::PipelineError::Config(_))
        ));
    }
}
