//! Image loading and texture-unit binding.
//!
//! Textures are decoded with `image`, kept as RGBA on the CPU so their alpha
//! can be rewritten later, and uploaded once. Ids are handed out by the
//! manager; nothing here is global.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use thiserror::Error;

use crate::gfx::rendering::RenderEngine;

use super::texture_resource::TextureResource;

/// Handle to a texture owned by a [`TextureManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(u32);

impl fmt::Display for TextureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("texture {0} not found")]
    NotFound(TextureId),

    #[error("texture file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("failed to decode texture: {0}")]
    Image(#[from] image::ImageError),
}

struct LoadedTexture {
    label: String,
    pixels: RgbaImage,
    gpu: TextureResource,
    bind_group: wgpu::BindGroup,
}

#[derive(Default)]
pub struct TextureManager {
    textures: HashMap<TextureId, LoadedTexture>,
    next_id: u32,
}

impl TextureManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes an image file and uploads it. `flip` mirrors it vertically first.
    pub fn load(
        &mut self,
        engine: &RenderEngine,
        path: impl AsRef<Path>,
        flip: bool,
    ) -> Result<TextureId, TextureError> {
        let path = path.as_ref();
        if !path.exists() {
            let err = TextureError::MissingFile(path.to_path_buf());
            log::error!("{}", err);
            return Err(err);
        }

        let mut pixels = image::open(path)
            .inspect_err(|err| log::error!("Failed to load {}: {}", path.display(), err))?
            .to_rgba8();
        if flip {
            image::imageops::flip_vertical_in_place(&mut pixels);
        }

        Ok(self.load_rgba(engine, pixels, &path.display().to_string()))
    }

    /// Uploads already decoded pixels.
    pub fn load_rgba(&mut self, engine: &RenderEngine, pixels: RgbaImage, label: &str) -> TextureId {
        let (width, height) = pixels.dimensions();
        let gpu = TextureResource::create_from_rgba(
            engine.device(),
            engine.queue(),
            pixels.as_raw(),
            width,
            height,
            label,
        );
        let bind_group = gpu.bind_group(engine.device(), engine.texture_layout());

        self.next_id += 1;
        let id = TextureId(self.next_id);
        log::info!("Loaded texture {} '{}' ({}x{})", id, label, width, height);

        self.textures.insert(
            id,
            LoadedTexture {
                label: label.to_owned(),
                pixels,
                gpu,
                bind_group,
            },
        );
        id
    }

    /// Makes `id` the texture sampled by subsequent textured draws.
    ///
    /// Unknown ids are logged and ignored. The bundled shaders sample only
    /// unit 0; other units are reported and ignored.
    pub fn bind(&self, id: TextureId, unit: u32, engine: &mut RenderEngine) {
        let Some(texture) = self.textures.get(&id) else {
            log::error!("{}", TextureError::NotFound(id));
            return;
        };
        if unit != 0 {
            log::warn!(
                "Texture unit {} is not sampled by any shader, ignoring bind of '{}'",
                unit,
                texture.label
            );
            return;
        }
        engine.bind_texture(texture.bind_group.clone());
    }

    /// Overwrites the alpha channel of every pixel and re-uploads the texture.
    pub fn set_alpha(&mut self, id: TextureId, alpha: f32, engine: &RenderEngine) {
        let Some(texture) = self.textures.get_mut(&id) else {
            log::error!("{}", TextureError::NotFound(id));
            return;
        };
        apply_alpha(&mut texture.pixels, alpha);
        texture.gpu.write_rgba(engine.queue(), texture.pixels.as_raw());
    }

    pub fn contains(&self, id: TextureId) -> bool {
        self.textures.contains_key(&id)
    }

    pub fn dimensions(&self, id: TextureId) -> Option<(u32, u32)> {
        self.textures.get(&id).map(|t| t.pixels.dimensions())
    }
}

fn apply_alpha(pixels: &mut RgbaImage, alpha: f32) {
    let value = (alpha.clamp(0.0, 1.0) * 255.0) as u8;
    for pixel in pixels.pixels_mut() {
        pixel.0[3] = value;
    }
}

/// Two-color checkerboard with `cells` squares per side.
pub fn checkerboard(size: u32, cells: u32, a: [u8; 3], b: [u8; 3]) -> RgbaImage {
    let cell = (size / cells.max(1)).max(1);
    RgbaImage::from_fn(size, size, |x, y| {
        let [r, g, bl] = if (x / cell + y / cell) % 2 == 0 { a } else { b };
        Rgba([r, g, bl, 255])
    })
}
