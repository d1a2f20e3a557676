//! Render pipeline management system for wgpu
//!
//! One shader module can be drawn with any topology and any vertex layout the
//! primitive cache produces, so pipelines are created lazily per
//! (topology, layout) pair and cached.

use std::{collections::HashMap, sync::Arc};
use wgpu::*;

use crate::gfx::primitives::{Topology, VertexLayout};

/// Configuration for creating the render pipelines of one shader program
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub label: String,
    pub bind_group_layouts: Vec<BindGroupLayout>,
    pub cull_mode: Option<Face>,
    pub color_format: TextureFormat,
    pub depth_format: Option<TextureFormat>,
    pub blend: Option<BlendState>,
    /// Whether group 1 (texture + sampler) is part of the layout.
    pub samples_texture: bool,
    /// Auxiliary attribute slots the vertex stage reads.
    pub required_auxiliary: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            label: "Default Pipeline".to_string(),
            bind_group_layouts: Vec::new(),
            cull_mode: None,
            color_format: TextureFormat::Bgra8Unorm,
            depth_format: None,
            blend: Some(BlendState::ALPHA_BLENDING),
            samples_texture: false,
            required_auxiliary: 0,
        }
    }
}

impl PipelineConfig {
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_owned();
        self
    }

    pub fn with_cull_mode(mut self, face: Option<Face>) -> Self {
        self.cull_mode = face;
        self
    }

    /// Sets all bind group layouts at once (builder pattern)
    pub fn with_bind_group_layouts(mut self, layouts: Vec<BindGroupLayout>) -> Self {
        self.bind_group_layouts = layouts;
        self
    }

    /// Appends the texture layout as the next group and marks the program as sampling it
    pub fn with_texture_layout(mut self, layout: BindGroupLayout) -> Self {
        self.bind_group_layouts.push(layout);
        self.samples_texture = true;
        self
    }

    pub fn with_color_format(mut self, format: TextureFormat) -> Self {
        self.color_format = format;
        self
    }

    pub fn with_depth_format(mut self, format: TextureFormat) -> Self {
        self.depth_format = Some(format);
        self
    }

    pub fn with_blend(mut self, blend: Option<BlendState>) -> Self {
        self.blend = blend;
        self
    }

    pub fn with_required_auxiliary(mut self, count: u32) -> Self {
        self.required_auxiliary = count;
        self
    }
}

/// Identifies one concrete pipeline of a shader program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipelineKey {
    pub topology: Topology,
    pub layout: VertexLayout,
}

/// Maps a primitive topology onto wgpu's. Line loops are drawn as strips
/// over an index list that repeats the first vertex.
pub fn primitive_topology(topology: Topology) -> PrimitiveTopology {
    match topology {
        Topology::Points => PrimitiveTopology::PointList,
        Topology::Lines => PrimitiveTopology::LineList,
        Topology::LineStrip | Topology::LineLoop => PrimitiveTopology::LineStrip,
        Topology::Triangles => PrimitiveTopology::TriangleList,
        Topology::TriangleStrip => PrimitiveTopology::TriangleStrip,
    }
}

pub fn strip_index_format(topology: Topology) -> Option<IndexFormat> {
    topology.is_strip().then_some(IndexFormat::Uint32)
}

/// One `Float32x3` attribute per slot, at shader locations `0..=N`.
pub fn vertex_attributes(layout: VertexLayout) -> Vec<VertexAttribute> {
    (0..layout.attribute_count())
        .map(|slot| VertexAttribute {
            format: VertexFormat::Float32x3,
            offset: layout.attribute_offset(slot),
            shader_location: slot,
        })
        .collect()
}

/// Owns a shader module and every pipeline created from it
pub struct PipelineManager {
    device: Arc<Device>,
    module: ShaderModule,
    config: PipelineConfig,
    pipeline_layout: PipelineLayout,
    pipelines: HashMap<PipelineKey, RenderPipeline>,
}

impl PipelineManager {
    pub fn new(device: Arc<Device>, module: ShaderModule, config: PipelineConfig) -> Self {
        let bind_group_layout_refs: Vec<&BindGroupLayout> =
            config.bind_group_layouts.iter().collect();
        let pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some(&format!("{} Layout", config.label)),
            bind_group_layouts: &bind_group_layout_refs,
            push_constant_ranges: &[],
        });

        Self {
            device,
            module,
            config,
            pipeline_layout,
            pipelines: HashMap::new(),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Gets or creates the pipeline for `key` (lazy loading)
    pub fn get_pipeline(&mut self, key: PipelineKey) -> &RenderPipeline {
        if !self.pipelines.contains_key(&key) {
            let pipeline = self.create_pipeline(key);
            self.pipelines.insert(key, pipeline);
        }
        &self.pipelines[&key]
    }

    fn create_pipeline(&self, key: PipelineKey) -> RenderPipeline {
        log::debug!(
            "Creating pipeline '{}' for {} with {} auxiliary attributes",
            self.config.label,
            key.topology,
            key.layout.auxiliary_attributes()
        );

        let attributes = vertex_attributes(key.layout);
        let vertex_buffers = [VertexBufferLayout {
            array_stride: key.layout.stride_bytes(),
            step_mode: VertexStepMode::Vertex,
            attributes: &attributes,
        }];

        let color_targets = [Some(ColorTargetState {
            format: self.config.color_format,
            blend: self.config.blend,
            write_mask: ColorWrites::ALL,
        })];

        let depth_stencil = self.config.depth_format.map(|format| DepthStencilState {
            format,
            depth_write_enabled: true,
            depth_compare: CompareFunction::Less,
            stencil: StencilState::default(),
            bias: DepthBiasState::default(),
        });

        self.device.create_render_pipeline(&RenderPipelineDescriptor {
            label: Some(&format!("{} ({})", self.config.label, key.topology)),
            layout: Some(&self.pipeline_layout),
            vertex: VertexState {
                module: &self.module,
                entry_point: Some("vs_main"),
                buffers: &vertex_buffers,
                compilation_options: PipelineCompilationOptions::default(),
            },
            fragment: Some(FragmentState {
                module: &self.module,
                entry_point: Some("fs_main"),
                targets: &color_targets,
                compilation_options: PipelineCompilationOptions::default(),
            }),
            primitive: PrimitiveState {
                topology: primitive_topology(key.topology),
                strip_index_format: strip_index_format(key.topology),
                front_face: FrontFace::Ccw,
                cull_mode: self.config.cull_mode,
                polygon_mode: PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil,
            multisample: MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_loop_draws_as_indexed_strip() {
        assert_eq!(primitive_topology(Topology::LineLoop), PrimitiveTopology::LineStrip);
        assert_eq!(strip_index_format(Topology::LineLoop), Some(IndexFormat::Uint32));
        assert_eq!(strip_index_format(Topology::Triangles), None);
    }

    #[test]
    fn test_every_topology_has_a_mapping() {
        for topology in Topology::ALL {
            let mapped = primitive_topology(topology);
            assert_eq!(mapped.is_strip(), topology.is_strip());
        }
    }

    #[test]
    fn test_vertex_attributes_follow_layout() {
        let attributes = vertex_attributes(VertexLayout::new(2));
        assert_eq!(attributes.len(), 3);
        assert_eq!(attributes[0].offset, 0);
        assert_eq!(attributes[1].offset, 12);
        assert_eq!(attributes[2].offset, 24);
        assert_eq!(attributes[2].shader_location, 2);
        assert!(attributes.iter().all(|a| a.format == VertexFormat::Float32x3));
    }

    #[test]
    fn test_config_builder() {
        let config = PipelineConfig::default()
            .with_label("phong")
            .with_required_auxiliary(2)
            .with_depth_format(TextureFormat::Depth32Float);
        assert_eq!(config.label, "phong");
        assert_eq!(config.required_auxiliary, 2);
        assert_eq!(config.depth_format, Some(TextureFormat::Depth32Float));
        assert!(!config.samples_texture);
    }
}
