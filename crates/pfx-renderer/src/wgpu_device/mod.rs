//! wgpu implementation of [`FrameDevice`].
//!
//! Every call records into one command encoder per frame; `present` submits
//! it. The application acquires the surface texture, passes its view to
//! [`WgpuFrameDevice::begin_frame`] and presents the surface afterwards.

pub mod pipelines;
pub mod targets;

use std::collections::HashMap;

use pfx_core::{AuxTexture, RenderTarget, TextureSource};

use crate::constants::{PostProcessConstants, AUX_SLOT, OFFSCREEN_FORMAT, SOURCE_SLOT};
use crate::context::RenderContext;
use crate::traits::{FrameDevice, Program};

pub use pipelines::PipelineCache;
pub use targets::{OffscreenTargets, TargetTexture};

/// Bindings accumulated between draws.
#[derive(Debug, Clone, Copy, Default)]
struct DrawState {
    target: Option<RenderTarget>,
    program: Option<Program>,
    source: Option<TextureSource>,
    aux: Option<TextureSource>,
    constants: Option<PostProcessConstants>,
}

/// Frame device rendering with wgpu.
pub struct WgpuFrameDevice {
    ctx: RenderContext,
    targets: OffscreenTargets,
    pipelines: PipelineCache,
    constants_layout: wgpu::BindGroupLayout,
    textures_layout: wgpu::BindGroupLayout,
    depth_textures_layout: wgpu::BindGroupLayout,
    point_sampler: wgpu::Sampler,
    aux_sampler: wgpu::Sampler,
    aux_textures: HashMap<AuxTexture, wgpu::TextureView>,
    placeholder: wgpu::TextureView,
    encoder: Option<wgpu::CommandEncoder>,
    display: Option<wgpu::TextureView>,
    state: DrawState,
}

impl WgpuFrameDevice {
    pub fn new(ctx: RenderContext) -> Self {
        let device = ctx.device();
        let constants_layout = targets::create_constants_layout(device);
        let textures_layout = targets::create_textures_layout(device);
        let depth_textures_layout = targets::create_depth_textures_layout(device);
        let pipelines = PipelineCache::new(
            &ctx,
            &constants_layout,
            &textures_layout,
            &depth_textures_layout,
        );
        let targets = OffscreenTargets::new(device, ctx.width(), ctx.height());
        let point_sampler = targets::create_point_sampler(device);
        let aux_sampler = targets::create_trilinear_sampler(device);
        let placeholder = ctx
            .create_rgba_texture("Placeholder Aux Texture", 1, 1, &[128, 128, 128, 255])
            .create_view(&wgpu::TextureViewDescriptor::default());

        tracing::info!(
            "Frame device ready: {}x{}, display {:?}",
            ctx.width(),
            ctx.height(),
            ctx.display_format()
        );

        Self {
            ctx,
            targets,
            pipelines,
            constants_layout,
            textures_layout,
            depth_textures_layout,
            point_sampler,
            aux_sampler,
            aux_textures: HashMap::new(),
            placeholder,
            encoder: None,
            display: None,
            state: DrawState::default(),
        }
    }

    pub fn context(&self) -> &RenderContext {
        &self.ctx
    }

    pub fn targets(&self) -> &OffscreenTargets {
        &self.targets
    }

    /// Number of pipelines built so far.
    pub fn pipeline_count(&self) -> usize {
        self.pipelines.len()
    }

    /// Recreates the offscreen targets for a new viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.ctx.resize(width, height);
        if self.targets.size() != (self.ctx.width(), self.ctx.height()) {
            self.targets = OffscreenTargets::new(self.ctx.device(), self.ctx.width(), self.ctx.height());
            tracing::debug!("Offscreen targets resized to {}x{}", width, height);
        }
    }

    /// Uses `view` wherever an effect asks for `aux`.
    pub fn register_aux_texture(&mut self, aux: AuxTexture, view: wgpu::TextureView) {
        self.aux_textures.insert(aux, view);
    }

    /// Uploads RGBA8 pixels and registers them as `aux`.
    pub fn upload_aux_texture(&mut self, aux: AuxTexture, width: u32, height: u32, rgba: &[u8]) {
        let view = self
            .ctx
            .create_rgba_texture(&format!("{:?} Texture", aux), width, height, rgba)
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.register_aux_texture(aux, view);
    }

    /// Starts recording a frame whose display output is `display`.
    pub fn begin_frame(&mut self, display: wgpu::TextureView) {
        if self.encoder.is_some() {
            tracing::warn!("Frame started before the previous one was presented");
        }
        self.encoder = Some(self.ctx.create_encoder("Frame Encoder"));
        self.display = Some(display);
        self.state = DrawState::default();
    }

    /// Render pass into `target` with the scene depth attached, for the scene
    /// renderer. Returns `None` outside a frame.
    pub fn scene_pass(&mut self, target: RenderTarget) -> Option<wgpu::RenderPass<'_>> {
        let view = match target {
            RenderTarget::Offscreen(slot) => self.targets.view(slot),
            RenderTarget::Display => self.display.as_ref()?,
        };
        let encoder = self.encoder.as_mut()?;
        Some(encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: self.targets.depth_view(),
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        }))
    }

    fn target_format(&self, target: RenderTarget) -> wgpu::TextureFormat {
        match target {
            RenderTarget::Offscreen(_) => OFFSCREEN_FORMAT,
            RenderTarget::Display => self.ctx.display_format(),
        }
    }

    fn texture_view(&self, source: TextureSource) -> &wgpu::TextureView {
        match source {
            TextureSource::Frame(slot) => self.targets.view(slot),
            TextureSource::Aux(aux) => self.aux_textures.get(&aux).unwrap_or(&self.placeholder),
            TextureSource::SceneDepth => self.targets.depth_view(),
        }
    }

    fn textures_bind_group(&self, program: Program, source: TextureSource) -> wgpu::BindGroup {
        let device = self.ctx.device();
        let frame_view = self.texture_view(source);
        if program.samples_scene_depth() {
            return device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Depth Textures Bind Group"),
                layout: &self.depth_textures_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(frame_view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&self.point_sampler),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::TextureView(self.targets.depth_view()),
                    },
                ],
            });
        }

        let aux_view = match self.state.aux {
            Some(aux) => self.texture_view(aux),
            None => &self.placeholder,
        };
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Textures Bind Group"),
            layout: &self.textures_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(frame_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.point_sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(aux_view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(&self.aux_sampler),
                },
            ],
        })
    }
}

impl FrameDevice for WgpuFrameDevice {
    fn clear_target(&mut self, target: RenderTarget, colour: [f32; 4]) {
        let view = match target {
            RenderTarget::Offscreen(slot) => self.targets.view(slot),
            RenderTarget::Display => match self.display.as_ref() {
                Some(view) => view,
                None => {
                    tracing::warn!("Clear of the display outside a frame");
                    return;
                }
            },
        };
        let Some(encoder) = self.encoder.as_mut() else {
            tracing::warn!("Clear outside a frame");
            return;
        };
        let [r, g, b, a] = colour.map(f64::from);
        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Clear Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: self.targets.depth_view(),
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
    }

    fn set_render_target(&mut self, target: RenderTarget) {
        self.state.target = Some(target);
    }

    fn bind_program(&mut self, program: Program) {
        self.state.program = Some(program);
    }

    fn bind_texture(&mut self, slot: u32, source: TextureSource) {
        match slot {
            SOURCE_SLOT => self.state.source = Some(source),
            AUX_SLOT => self.state.aux = Some(source),
            _ => tracing::warn!("Ignoring texture for unknown slot {}", slot),
        }
    }

    fn unbind_texture(&mut self, slot: u32) {
        match slot {
            SOURCE_SLOT => self.state.source = None,
            AUX_SLOT => self.state.aux = None,
            _ => {}
        }
    }

    fn set_constants(&mut self, constants: &PostProcessConstants) {
        self.state.constants = Some(*constants);
    }

    fn draw_quad(&mut self) {
        let DrawState {
            target: Some(target),
            program: Some(program),
            source: Some(source),
            constants: Some(constants),
            ..
        } = self.state
        else {
            tracing::warn!("Draw with incomplete bindings: {:?}", self.state);
            return;
        };
        if let TextureSource::Frame(slot) = source {
            assert_ne!(
                RenderTarget::Offscreen(slot),
                target,
                "{:?} bound for both reading and writing",
                slot
            );
        }
        if self.encoder.is_none() {
            tracing::warn!("Draw outside a frame");
            return;
        }

        let uniform = self
            .ctx
            .create_uniform_buffer("Post Process Constants", bytemuck::bytes_of(&constants));
        let constants_group = self.ctx.device().create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Post Process Constants Bind Group"),
            layout: &self.constants_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform.as_entire_binding(),
            }],
        });
        let textures_group = self.textures_bind_group(program, source);
        let format = self.target_format(target);

        let view = match target {
            RenderTarget::Offscreen(slot) => self.targets.view(slot),
            RenderTarget::Display => match self.display.as_ref() {
                Some(view) => view,
                None => return,
            },
        };
        // read-only depth: effects land behind nearer scene geometry
        let depth_stencil_attachment =
            program.uses_depth_test().then(|| wgpu::RenderPassDepthStencilAttachment {
                view: self.targets.depth_view(),
                depth_ops: None,
                stencil_ops: None,
            });
        let pipeline = self.pipelines.get_or_create(self.ctx.device(), program, format);
        let Some(encoder) = self.encoder.as_mut() else {
            return;
        };

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Post Process Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        pass.set_pipeline(pipeline);
        pass.set_bind_group(0, &constants_group, &[]);
        pass.set_bind_group(1, &textures_group, &[]);
        pass.draw(0..4, 0..1);
    }

    fn present(&mut self) {
        match self.encoder.take() {
            Some(encoder) => self.ctx.submit(encoder),
            None => tracing::warn!("Present without a frame"),
        }
        self.display = None;
    }
}

