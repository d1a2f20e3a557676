//! The seam between the primitive cache and whatever owns GPU memory.
//!
//! [`PrimitiveDevice`] is implemented by the wgpu [`RenderEngine`] and, in
//! tests, by a recording double. The cache never sees a concrete GPU API.
//!
//! [`RenderEngine`]: crate::gfx::rendering::RenderEngine

use crate::gfx::shader::ShaderBinding;

use super::topology::Topology;

/// Interleaved vertex layout: a position followed by `N` auxiliary triples.
///
/// Slot 0 is always the position (3 floats); slots `1..=N` are the auxiliary
/// attributes (texture coordinates, normals, colors, ...), 3 floats each.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct VertexLayout {
    auxiliary_attributes: u32,
}

impl VertexLayout {
    pub const FLOATS_PER_ATTRIBUTE: usize = 3;

    pub fn new(auxiliary_attributes: u32) -> Self {
        Self {
            auxiliary_attributes,
        }
    }

    /// Infers the layout from the first auxiliary row. Trailing floats that
    /// do not fill a whole triple are dropped.
    pub fn infer(auxiliary: &[Vec<f32>]) -> Self {
        let first_len = auxiliary.first().map_or(0, Vec::len);
        Self::new((first_len / Self::FLOATS_PER_ATTRIBUTE) as u32)
    }

    pub fn auxiliary_attributes(&self) -> u32 {
        self.auxiliary_attributes
    }

    /// Position plus auxiliary attributes.
    pub fn attribute_count(&self) -> u32 {
        1 + self.auxiliary_attributes
    }

    /// Number of auxiliary floats copied per vertex.
    pub fn auxiliary_floats(&self) -> usize {
        self.auxiliary_attributes as usize * Self::FLOATS_PER_ATTRIBUTE
    }

    pub fn stride_floats(&self) -> usize {
        Self::FLOATS_PER_ATTRIBUTE + self.auxiliary_floats()
    }

    pub fn stride_bytes(&self) -> u64 {
        (self.stride_floats() * std::mem::size_of::<f32>()) as u64
    }

    /// Byte offset of attribute `slot` inside one vertex.
    pub fn attribute_offset(&self, slot: u32) -> u64 {
        (slot as usize * Self::FLOATS_PER_ATTRIBUTE * std::mem::size_of::<f32>()) as u64
    }
}

/// Everything a device needs to issue one draw of a cached primitive.
#[derive(Debug)]
pub struct DrawCall<'a, B> {
    pub label: &'a str,
    pub topology: Topology,
    pub layout: VertexLayout,
    pub vertex_buffer: &'a B,
    pub index_buffer: Option<&'a B>,
    /// Index count when `index_buffer` is set, vertex count otherwise.
    pub count: u32,
}

impl<B> DrawCall<'_, B> {
    pub fn is_indexed(&self) -> bool {
        self.index_buffer.is_some()
    }
}

/// GPU buffer allocation and draw submission.
pub trait PrimitiveDevice {
    /// Owned handle to a GPU buffer. Dropping it releases the buffer.
    type Buffer;
    /// The shader binding draws are issued through.
    type Shader: ShaderBinding;

    /// Uploads interleaved vertex data once; the contents never change.
    fn create_vertex_buffer(&mut self, label: &str, vertices: &[f32]) -> Self::Buffer;

    /// Uploads 32-bit indices once; the contents never change.
    fn create_index_buffer(&mut self, label: &str, indices: &[u32]) -> Self::Buffer;

    /// Issues a draw with the shader's current uniform state.
    fn draw(&mut self, shader: &mut Self::Shader, call: DrawCall<'_, Self::Buffer>);
}

/// The device and the currently bound shader, passed explicitly to every
/// build call instead of living in global state.
pub struct DrawTarget<'a, D: PrimitiveDevice> {
    pub device: &'a mut D,
    pub shader: &'a mut D::Shader,
}

impl<'a, D: PrimitiveDevice> DrawTarget<'a, D> {
    pub fn new(device: &'a mut D, shader: &'a mut D::Shader) -> Self {
        Self { device, shader }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_inference_drops_partial_triples() {
        let rows = vec![vec![0.0; 8]];
        let layout = VertexLayout::infer(&rows);
        assert_eq!(layout.auxiliary_attributes(), 2);
        assert_eq!(layout.stride_floats(), 9);
        assert_eq!(layout.stride_bytes(), 36);
        assert_eq!(layout.attribute_offset(2), 24);
    }

    #[test]
    fn test_empty_auxiliary_is_position_only() {
        let layout = VertexLayout::infer(&[]);
        assert_eq!(layout, VertexLayout::default());
        assert_eq!(layout.attribute_count(), 1);
        assert_eq!(layout.stride_floats(), 3);
    }
}
