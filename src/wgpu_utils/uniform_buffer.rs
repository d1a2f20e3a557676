// src/wgpu_utils/uniform_buffer.rs - Per-draw uniform snapshots
use std::marker::PhantomData;

/// CPU-side staging for one frame's uniform snapshots.
///
/// Every push appends a copy of the block at the next offset that satisfies
/// the device's dynamic-offset alignment, so a draw keeps the values it was
/// issued with even if the uniforms change later in the frame.
#[derive(Debug)]
pub struct UniformStaging<Content> {
    bytes: Vec<u8>,
    stride: usize,
    count: usize,
    content_type: PhantomData<Content>,
}

impl<Content: bytemuck::Pod> UniformStaging<Content> {
    /// `alignment` is `min_uniform_buffer_offset_alignment`; must be a power of two.
    pub fn new(alignment: u32) -> Self {
        let size = std::mem::size_of::<Content>();
        let alignment = alignment.max(1) as usize;
        let stride = size.div_ceil(alignment) * alignment;
        Self {
            bytes: Vec::new(),
            stride,
            count: 0,
            content_type: PhantomData,
        }
    }

    /// Appends a snapshot and returns its byte offset.
    pub fn push(&mut self, content: &Content) -> u32 {
        let offset = self.count * self.stride;
        self.bytes.resize(offset + self.stride, 0);
        let size = std::mem::size_of::<Content>();
        self.bytes[offset..offset + size].copy_from_slice(bytemuck::bytes_of(content));
        self.count += 1;
        offset as u32
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
        self.count = 0;
    }
}

/// Uniform buffer bound through a dynamic offset, grown on demand.
///
/// Growing replaces the buffer, so the bind group is rebuilt with it.
pub struct DynamicUniformBuffer<Content> {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    layout: wgpu::BindGroupLayout,
    content_type: PhantomData<Content>,
}

impl<Content: bytemuck::Pod> DynamicUniformBuffer<Content> {
    fn name() -> &'static str {
        let type_name = std::any::type_name::<Content>();
        let pos = type_name.rfind(':').unwrap_or(0);
        if pos > 0 {
            &type_name[(pos + 1)..]
        } else {
            type_name
        }
    }

    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, capacity: u64) -> Self {
        let buffer = Self::create_buffer(device, capacity);
        let bind_group = Self::create_bind_group(device, layout, &buffer);
        Self {
            buffer,
            bind_group,
            layout: layout.clone(),
            content_type: PhantomData,
        }
    }

    fn create_buffer(device: &wgpu::Device, capacity: u64) -> wgpu::Buffer {
        let size = capacity.max(std::mem::size_of::<Content>() as u64);
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("DynamicUniformBuffer: {}", Self::name())),
            size,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn create_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        buffer: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{} Bind Group", Self::name())),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<Content>() as u64),
                }),
            }],
        })
    }

    /// Uploads a frame's staged snapshots, growing the buffer if needed.
    pub fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, staging: &UniformStaging<Content>) {
        let needed = staging.bytes().len() as u64;
        if needed == 0 {
            return;
        }
        if needed > self.buffer.size() {
            let capacity = needed.next_power_of_two();
            log::debug!(
                "Growing {} uniform buffer to {} bytes",
                Self::name(),
                capacity
            );
            self.buffer = Self::create_buffer(device, capacity);
            self.bind_group = Self::create_bind_group(device, &self.layout, &self.buffer);
        }
        queue.write_buffer(&self.buffer, 0, staging.bytes());
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[repr(C)]
    #[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
    struct Block {
        value: [f32; 5],
    }

    #[test]
    fn test_snapshots_are_aligned() {
        let mut staging = UniformStaging::<Block>::new(256);
        assert_eq!(staging.stride(), 256);

        assert_eq!(staging.push(&Block { value: [1.0; 5] }), 0);
        assert_eq!(staging.push(&Block { value: [2.0; 5] }), 256);
        assert_eq!(staging.len(), 2);
        assert_eq!(staging.bytes().len(), 512);

        let second: Block = bytemuck::pod_read_unaligned(&staging.bytes()[256..256 + 20]);
        assert_eq!(second.value, [2.0; 5]);
    }

    #[test]
    fn test_small_alignment_rounds_up_to_block_size() {
        let staging = UniformStaging::<Block>::new(16);
        assert_eq!(staging.stride(), 32);
    }

    #[test]
    fn test_clear_resets_offsets() {
        let mut staging = UniformStaging::<Block>::new(64);
        staging.push(&Block { value: [0.0; 5] });
        staging.clear();
        assert!(staging.is_empty());
        assert_eq!(staging.push(&Block { value: [0.0; 5] }), 0);
    }
}
