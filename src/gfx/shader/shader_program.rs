use std::path::Path;

use anyhow::Context;
use cgmath::{Matrix4, Vector3};

use crate::gfx::{
    primitives::{Topology, VertexLayout},
    rendering::{
        pipeline_manager::{PipelineConfig, PipelineKey, PipelineManager},
        RenderEngine,
    },
};

use super::{activation::ProgramToken, uniforms::ShaderUniforms, ShaderBinding};

/// A compiled WGSL program plus the uniform values its next draw will use.
///
/// The module must define `vs_main`/`fs_main` and declare [`ShaderUniforms`]
/// at `@group(0) @binding(0)`; textured programs sample
/// `@group(1) @binding(0..2)`.
pub struct ShaderProgram {
    label: String,
    uniforms: ShaderUniforms,
    pipelines: PipelineManager,
    token: ProgramToken,
}

impl ShaderProgram {
    /// Compiles `source`, failing on WGSL validation errors.
    pub fn new(engine: &RenderEngine, source: &str, config: PipelineConfig) -> anyhow::Result<Self> {
        let device = engine.device_handle();
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&config.label),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });
        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            anyhow::bail!("failed to compile shader '{}': {}", config.label, err);
        }

        log::info!("Compiled shader '{}'", config.label);
        Ok(Self {
            label: config.label.clone(),
            uniforms: ShaderUniforms::default(),
            pipelines: PipelineManager::new(device, module, config),
            token: engine.active_program().register(),
        })
    }

    pub fn from_file(
        engine: &RenderEngine,
        path: impl AsRef<Path>,
        config: PipelineConfig,
    ) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read shader {}", path.display()))?;
        Self::new(engine, &source, config)
    }

    /// Per-vertex color in auxiliary slot 1, no lighting.
    pub fn pure_color(engine: &RenderEngine) -> anyhow::Result<Self> {
        let config = engine
            .pipeline_config("pure_color")
            .with_required_auxiliary(1);
        Self::new(engine, include_str!("shaders/pure_color.wgsl"), config)
    }

    /// Flat light color for drawing the light itself.
    pub fn light_source(engine: &RenderEngine) -> anyhow::Result<Self> {
        Self::new(
            engine,
            include_str!("shaders/light_source.wgsl"),
            engine.pipeline_config("light_source"),
        )
    }

    /// Per-fragment lighting; slot 1 is texture coordinates, slot 2 the normal.
    pub fn phong(engine: &RenderEngine) -> anyhow::Result<Self> {
        let config = engine
            .pipeline_config("phong")
            .with_texture_layout(engine.texture_layout().clone())
            .with_required_auxiliary(2);
        Self::new(engine, include_str!("shaders/phong.wgsl"), config)
    }

    /// Per-vertex lighting with the same inputs as [`ShaderProgram::phong`].
    pub fn gouraud(engine: &RenderEngine) -> anyhow::Result<Self> {
        let config = engine
            .pipeline_config("gouraud")
            .with_texture_layout(engine.texture_layout().clone())
            .with_required_auxiliary(2);
        Self::new(engine, include_str!("shaders/gouraud.wgsl"), config)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// True while this is the engine's most recently activated program.
    pub fn is_active(&self) -> bool {
        self.token.is_active()
    }

    pub fn uniforms(&self) -> &ShaderUniforms {
        &self.uniforms
    }

    pub fn samples_texture(&self) -> bool {
        self.pipelines.config().samples_texture
    }

    pub fn required_auxiliary(&self) -> u32 {
        self.pipelines.config().required_auxiliary
    }

    pub(crate) fn pipeline(&mut self, topology: Topology, layout: VertexLayout) -> wgpu::RenderPipeline {
        self.pipelines
            .get_pipeline(PipelineKey { topology, layout })
            .clone()
    }

    fn unknown_uniform(&self, kind: &str, name: &str) {
        log::warn!("Shader '{}' has no {} uniform named '{}'", self.label, kind, name);
    }
}

impl ShaderBinding for ShaderProgram {
    fn activate(&mut self) {
        self.token.activate();
    }

    fn set_mat4(&mut self, name: &str, value: Matrix4<f32>) {
        if !self.uniforms.set_mat4(name, value) {
            self.unknown_uniform("mat4", name);
        }
    }

    fn set_vec3(&mut self, name: &str, value: Vector3<f32>) {
        if !self.uniforms.set_vec3(name, value) {
            self.unknown_uniform("vec3", name);
        }
    }

    fn set_float(&mut self, name: &str, value: f32) {
        if !self.uniforms.set_float(name, value) {
            self.unknown_uniform("float", name);
        }
    }

    fn set_int(&mut self, name: &str, value: i32) {
        if !self.uniforms.set_int(name, value) {
            self.unknown_uniform("int", name);
        }
    }
}
