//! WGPU-based rendering engine
//!
//! Owns the surface, device and queue and stands behind the primitive cache
//! as its [`PrimitiveDevice`]. Draws issued between [`RenderEngine::begin_frame`]
//! and [`RenderEngine::end_frame`] are recorded in issue order, each with a
//! snapshot of its program's uniforms, and replayed in a single render pass.

use std::sync::Arc;

use anyhow::Context;
use wgpu::{util::DeviceExt, TextureFormat};

use crate::config::WindowOptions;
use crate::gfx::{
    primitives::{DrawCall, PrimitiveDevice},
    resources::texture_resource::TextureResource,
    shader::{activation::ActiveProgram, ShaderProgram, ShaderUniforms},
};
use crate::wgpu_utils::{binding_types, DynamicUniformBuffer, UniformStaging};

use super::pipeline_manager::PipelineConfig;

/// Initial room for this many uniform snapshots per frame.
const INITIAL_DRAW_CAPACITY: u64 = 64;

struct RecordedDraw {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: Option<wgpu::Buffer>,
    count: u32,
    uniform_offset: u32,
    texture: Option<wgpu::BindGroup>,
}

struct Frame {
    surface_texture: wgpu::SurfaceTexture,
    view: wgpu::TextureView,
    draws: Vec<RecordedDraw>,
}

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    format: TextureFormat,
    depth_texture: TextureResource,
    clear_color: wgpu::Color,

    texture_layout: wgpu::BindGroupLayout,
    uniform_layout: wgpu::BindGroupLayout,
    uniforms: DynamicUniformBuffer<ShaderUniforms>,
    staging: UniformStaging<ShaderUniforms>,

    active_program: ActiveProgram,

    // starts as a white 1x1 so textured programs sample something
    bound_texture: wgpu::BindGroup,

    frame: Option<Frame>,
}

impl RenderEngine {
    /// Creates a new render engine for the given window
    ///
    /// # Errors
    /// Fails if no adapter, device or surface can be created.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        options: &WindowOptions,
    ) -> anyhow::Result<RenderEngine> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .context("failed to create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to request adapter")?;
        log::info!("Using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: 4096,
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to request device")?;

        device.on_uncaptured_error(Box::new(|error| {
            log::error!("wgpu validation error: {}", error);
        }));

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .context("surface reports no supported formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: present_mode(options.vsync),
            alpha_mode: surface_capabilities.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let uniform_size = std::mem::size_of::<ShaderUniforms>() as u64;
        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Uniform Layout"),
            entries: &[binding_types::entry(0, binding_types::uniform_dynamic(uniform_size))],
        });
        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Texture Layout"),
            entries: &[
                binding_types::entry(0, binding_types::texture_2d()),
                binding_types::entry(
                    1,
                    binding_types::sampler(wgpu::SamplerBindingType::Filtering),
                ),
            ],
        });

        let staging = UniformStaging::new(device.limits().min_uniform_buffer_offset_alignment);
        let uniforms = DynamicUniformBuffer::new(
            &device,
            &uniform_layout,
            staging.stride() as u64 * INITIAL_DRAW_CAPACITY,
        );

        let white = TextureResource::create_from_rgba(
            &device,
            &queue,
            &[255, 255, 255, 255],
            1,
            1,
            "Default Texture",
        );
        let default_texture = white.bind_group(&device, &texture_layout);

        let [r, g, b, a] = options.clear_color;
        Ok(RenderEngine {
            surface,
            device: device.into(),
            queue: queue.into(),
            config,
            format,
            depth_texture,
            clear_color: wgpu::Color { r, g, b, a },
            texture_layout,
            uniform_layout,
            uniforms,
            staging,
            active_program: ActiveProgram::default(),
            bound_texture: default_texture,
            frame: None,
        })
    }

    /// Acquires the next surface texture and starts recording draws.
    ///
    /// Returns false when the frame has to be skipped; a lost or outdated
    /// surface is reconfigured for the next attempt.
    pub fn begin_frame(&mut self) -> bool {
        if self.frame.is_some() {
            log::warn!("begin_frame called twice without end_frame");
            return true;
        }

        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return false;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory acquiring surface texture");
                return false;
            }
            Err(err) => {
                log::warn!("Skipping frame: {}", err);
                return false;
            }
        };

        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.frame = Some(Frame {
            surface_texture,
            view,
            draws: Vec::new(),
        });
        true
    }

    /// Clears the frame, replays every recorded draw in order and presents.
    pub fn end_frame(&mut self) {
        let Some(frame) = self.frame.take() else {
            return;
        };

        self.uniforms.upload(&self.device, &self.queue, &self.staging);
        self.staging.clear();

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            for draw in &frame.draws {
                render_pass.set_pipeline(&draw.pipeline);
                render_pass.set_bind_group(0, self.uniforms.bind_group(), &[draw.uniform_offset]);
                if let Some(texture) = &draw.texture {
                    render_pass.set_bind_group(1, texture, &[]);
                }
                render_pass.set_vertex_buffer(0, draw.vertex_buffer.slice(..));
                match &draw.index_buffer {
                    Some(indices) => {
                        render_pass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint32);
                        render_pass.draw_indexed(0..draw.count, 0, 0..1);
                    }
                    None => render_pass.draw(0..draw.count, 0..1),
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.surface_texture.present();
    }

    /// Makes `bind_group` the texture sampled by subsequent textured draws.
    pub fn bind_texture(&mut self, bind_group: wgpu::BindGroup) {
        self.bound_texture = bind_group;
    }

    /// Pipeline configuration matching this engine's targets and uniform layout.
    pub fn pipeline_config(&self, label: &str) -> PipelineConfig {
        PipelineConfig::default()
            .with_label(label)
            .with_color_format(self.format)
            .with_depth_format(TextureResource::DEPTH_FORMAT)
            .with_bind_group_layouts(vec![self.uniform_layout.clone()])
    }

    /// Resizes the render engine surface and recreates depth buffer
    ///
    /// Zero-sized requests (minimized windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    /// Returns current surface dimensions
    pub fn get_surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn device_handle(&self) -> Arc<wgpu::Device> {
        Arc::clone(&self.device)
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn texture_layout(&self) -> &wgpu::BindGroupLayout {
        &self.texture_layout
    }

    pub(crate) fn active_program(&self) -> &ActiveProgram {
        &self.active_program
    }
}

fn present_mode(vsync: bool) -> wgpu::PresentMode {
    if vsync {
        wgpu::PresentMode::AutoVsync
    } else {
        wgpu::PresentMode::AutoNoVsync
    }
}

impl PrimitiveDevice for RenderEngine {
    type Buffer = wgpu::Buffer;
    type Shader = ShaderProgram;

    fn create_vertex_buffer(&mut self, label: &str, vertices: &[f32]) -> wgpu::Buffer {
        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} Vertex Buffer", label)),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            })
    }

    fn create_index_buffer(&mut self, label: &str, indices: &[u32]) -> wgpu::Buffer {
        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} Index Buffer", label)),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            })
    }

    fn draw(&mut self, shader: &mut ShaderProgram, call: DrawCall<'_, wgpu::Buffer>) {
        let Some(frame) = self.frame.as_mut() else {
            log::warn!("Draw of '{}' outside begin_frame/end_frame ignored", call.label);
            return;
        };

        if !shader.is_active() {
            log::warn!(
                "Drawing '{}' through shader '{}' which is not the active program",
                call.label,
                shader.label()
            );
        }

        let provided = call.layout.auxiliary_attributes();
        if provided < shader.required_auxiliary() {
            log::error!(
                "Skipping '{}': shader '{}' reads {} auxiliary attributes, primitive has {}",
                call.label,
                shader.label(),
                shader.required_auxiliary(),
                provided
            );
            return;
        }

        let pipeline = shader.pipeline(call.topology, call.layout);
        let uniform_offset = self.staging.push(shader.uniforms());
        let texture = shader
            .samples_texture()
            .then(|| self.bound_texture.clone());

        frame.draws.push(RecordedDraw {
            pipeline,
            vertex_buffer: call.vertex_buffer.clone(),
            index_buffer: call.index_buffer.cloned(),
            count: call.count,
            uniform_offset,
            texture,
        });
    }
}
