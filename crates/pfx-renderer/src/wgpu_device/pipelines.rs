//! Post-process render pipelines, built on first use.

use std::collections::HashMap;

use crate::constants::DEPTH_FORMAT;
use crate::context::RenderContext;
use crate::traits::{BlendMode, Program, VertexStage};

const EFFECTS_SOURCE: &str = concat!(
    include_str!("../shaders/quad.wgsl"),
    include_str!("../shaders/effects.wgsl")
);

const DEPTH_OF_FIELD_SOURCE: &str = concat!(
    include_str!("../shaders/quad.wgsl"),
    include_str!("../shaders/depth_of_field.wgsl")
);

/// Cache of pipelines keyed by program and target format.
pub struct PipelineCache {
    effects_module: wgpu::ShaderModule,
    depth_of_field_module: wgpu::ShaderModule,
    colour_layout: wgpu::PipelineLayout,
    depth_layout: wgpu::PipelineLayout,
    pipelines: HashMap<(Program, wgpu::TextureFormat), wgpu::RenderPipeline>,
}

impl PipelineCache {
    pub fn new(
        ctx: &RenderContext,
        constants_layout: &wgpu::BindGroupLayout,
        textures_layout: &wgpu::BindGroupLayout,
        depth_textures_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let device = ctx.device();
        let colour_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Post Process Pipeline Layout"),
            bind_group_layouts: &[constants_layout, textures_layout],
            push_constant_ranges: &[],
        });
        let depth_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Depth Of Field Pipeline Layout"),
            bind_group_layouts: &[constants_layout, depth_textures_layout],
            push_constant_ranges: &[],
        });

        Self {
            effects_module: ctx.create_shader(EFFECTS_SOURCE, "Post Process Effects"),
            depth_of_field_module: ctx.create_shader(DEPTH_OF_FIELD_SOURCE, "Depth Of Field"),
            colour_layout,
            depth_layout,
            pipelines: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.pipelines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty()
    }

    /// Pipeline for `program` writing `format`, created if missing.
    pub fn get_or_create(
        &mut self,
        device: &wgpu::Device,
        program: Program,
        format: wgpu::TextureFormat,
    ) -> &wgpu::RenderPipeline {
        let (module, layout) = if program.samples_scene_depth() {
            (&self.depth_of_field_module, &self.depth_layout)
        } else {
            (&self.effects_module, &self.colour_layout)
        };
        self.pipelines
            .entry((program, format))
            .or_insert_with(|| create_pipeline(device, module, layout, program, format))
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    module: &wgpu::ShaderModule,
    layout: &wgpu::PipelineLayout,
    program: Program,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let label = format!("{} Pipeline ({:?}, {:?})", program.effect, program.vertex, program.blend);
    let vertex_entry = match program.vertex {
        VertexStage::Quad => "vs_quad",
        VertexStage::Polygon => "vs_polygon",
    };
    let fragment_entry = format!("fs_{}", program.effect.name());
    let blend = match program.blend {
        BlendMode::Replace => wgpu::BlendState::REPLACE,
        BlendMode::Alpha => wgpu::BlendState::ALPHA_BLENDING,
    };
    let depth_stencil = program.uses_depth_test().then(|| wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: false,
        depth_compare: wgpu::CompareFunction::LessEqual,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    });

    tracing::debug!("Creating {}", label);
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module,
            entry_point: Some(vertex_entry),
            buffers: &[],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module,
            entry_point: Some(&fragment_entry),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleStrip,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
