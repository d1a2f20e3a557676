//! Recording doubles for exercising the cache without a GPU.

use std::collections::HashMap;
use std::rc::Rc;

use cgmath::{Matrix4, Vector3};

use crate::gfx::shader::ShaderBinding;

use super::{
    device::{DrawCall, PrimitiveDevice},
    topology::Topology,
};

#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCall {
    CreateVertexBuffer {
        label: String,
        floats: usize,
    },
    CreateIndexBuffer {
        label: String,
        indices: usize,
    },
    Draw {
        label: String,
        topology: Topology,
        count: u32,
        indexed: bool,
        auxiliary_attributes: u32,
    },
}

/// Buffer handle that keeps a shared token alive so tests can count live buffers.
#[derive(Debug)]
pub struct RecordingBuffer {
    _token: Rc<()>,
}

#[derive(Debug, Default)]
pub struct RecordingDevice {
    calls: Vec<DeviceCall>,
    vertex_data: HashMap<String, Vec<f32>>,
    index_data: HashMap<String, Vec<u32>>,
    token: Rc<()>,
}

impl RecordingDevice {
    pub fn calls(&self) -> &[DeviceCall] {
        &self.calls
    }

    pub fn creations(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DeviceCall::CreateVertexBuffer { .. }))
            .count()
    }

    pub fn draws(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DeviceCall::Draw { .. }))
            .count()
    }

    pub fn vertex_data(&self, label: &str) -> Option<Vec<f32>> {
        self.vertex_data.get(label).cloned()
    }

    pub fn index_data(&self, label: &str) -> Option<Vec<u32>> {
        self.index_data.get(label).cloned()
    }

    pub fn live_buffers(&self) -> usize {
        Rc::strong_count(&self.token) - 1
    }

    fn buffer(&self) -> RecordingBuffer {
        RecordingBuffer {
            _token: Rc::clone(&self.token),
        }
    }
}

impl PrimitiveDevice for RecordingDevice {
    type Buffer = RecordingBuffer;
    type Shader = RecordingShader;

    fn create_vertex_buffer(&mut self, label: &str, vertices: &[f32]) -> RecordingBuffer {
        self.calls.push(DeviceCall::CreateVertexBuffer {
            label: label.to_owned(),
            floats: vertices.len(),
        });
        self.vertex_data.insert(label.to_owned(), vertices.to_vec());
        self.buffer()
    }

    fn create_index_buffer(&mut self, label: &str, indices: &[u32]) -> RecordingBuffer {
        self.calls.push(DeviceCall::CreateIndexBuffer {
            label: label.to_owned(),
            indices: indices.len(),
        });
        self.index_data.insert(label.to_owned(), indices.to_vec());
        self.buffer()
    }

    fn draw(&mut self, _shader: &mut RecordingShader, call: DrawCall<'_, RecordingBuffer>) {
        self.calls.push(DeviceCall::Draw {
            label: call.label.to_owned(),
            topology: call.topology,
            count: call.count,
            indexed: call.is_indexed(),
            auxiliary_attributes: call.layout.auxiliary_attributes(),
        });
    }
}

/// Remembers every uniform written to it.
#[derive(Debug, Default)]
pub struct RecordingShader {
    pub active: bool,
    mat4: Vec<(String, Matrix4<f32>)>,
    vec3: HashMap<String, Vector3<f32>>,
    float: HashMap<String, f32>,
    int: HashMap<String, i32>,
}

impl RecordingShader {
    pub fn model_uploads(&self) -> usize {
        self.mat4.iter().filter(|(name, _)| name == "model").count()
    }

    pub fn last_mat4(&self, name: &str) -> Option<Matrix4<f32>> {
        self.mat4
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, m)| *m)
    }

    pub fn vec3(&self, name: &str) -> Option<Vector3<f32>> {
        self.vec3.get(name).copied()
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        self.float.get(name).copied()
    }

    pub fn int(&self, name: &str) -> Option<i32> {
        self.int.get(name).copied()
    }
}

impl ShaderBinding for RecordingShader {
    fn activate(&mut self) {
        self.active = true;
    }

    fn set_mat4(&mut self, name: &str, value: Matrix4<f32>) {
        self.mat4.push((name.to_owned(), value));
    }

    fn set_vec3(&mut self, name: &str, value: Vector3<f32>) {
        self.vec3.insert(name.to_owned(), value);
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.float.insert(name.to_owned(), value);
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.int.insert(name.to_owned(), value);
    }
}
