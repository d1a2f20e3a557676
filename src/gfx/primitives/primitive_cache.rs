//! Name-keyed cache of GPU-resident primitives.
//!
//! The first call with a given name interleaves the vertex data, uploads it
//! and remembers the buffers; every later call with that name skips straight
//! to the draw. Keys are chosen by the caller rather than hashed from content,
//! so reusing a name for different geometry draws the geometry registered
//! first. Topology and attribute layout are checked on every call, because
//! silently drawing a stale layout under a different interpretation is the
//! one mistake this scheme cannot be allowed to hide.
//!
//! Errors are returned *and* logged; the cache never panics, so a bad draw
//! costs one primitive rather than the frame.

use std::borrow::Cow;
use std::collections::HashMap;

use cgmath::{Matrix4, Vector3};

use crate::gfx::shader::ShaderBinding;

use super::{
    device::{DrawCall, DrawTarget, PrimitiveDevice, VertexLayout},
    error::PrimitiveError,
    topology::Topology,
};

/// Borrowed geometry for one build call.
///
/// `auxiliary` holds one row of floats per vertex; every row must have the
/// same length, and each row contributes `len / 3` attribute slots.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimitiveData<'a> {
    pub positions: &'a [Vector3<f32>],
    pub indices: &'a [u32],
    pub auxiliary: &'a [Vec<f32>],
}

impl<'a> PrimitiveData<'a> {
    pub fn new(positions: &'a [Vector3<f32>]) -> Self {
        Self {
            positions,
            ..Default::default()
        }
    }

    pub fn with_indices(mut self, indices: &'a [u32]) -> Self {
        self.indices = indices;
        self
    }

    pub fn with_auxiliary(mut self, auxiliary: &'a [Vec<f32>]) -> Self {
        self.auxiliary = auxiliary;
        self
    }
}

/// A cached primitive: its buffers plus the draw parameters fixed at creation.
#[derive(Debug)]
pub struct PrimitiveRecord<B> {
    vertex_buffer: B,
    index_buffer: Option<B>,
    topology: Topology,
    count: u32,
    layout: VertexLayout,
}

impl<B> PrimitiveRecord<B> {
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Index count for indexed primitives, vertex count otherwise.
    pub fn draw_count(&self) -> u32 {
        self.count
    }

    pub fn is_indexed(&self) -> bool {
        self.index_buffer.is_some()
    }

    pub fn layout(&self) -> VertexLayout {
        self.layout
    }

    /// O(1) checks for a redraw: topology and, when rows are supplied, the
    /// width of the first one.
    fn check_compatible(
        &self,
        name: &str,
        topology: Topology,
        data: &PrimitiveData<'_>,
    ) -> Result<(), PrimitiveError> {
        if self.topology != topology {
            return Err(PrimitiveError::TopologyMismatch {
                name: name.to_owned(),
                registered: self.topology,
                requested: topology,
            });
        }

        if !data.auxiliary.is_empty() {
            let requested = VertexLayout::infer(data.auxiliary);
            if requested != self.layout {
                return Err(PrimitiveError::LayoutMismatch {
                    name: name.to_owned(),
                    registered: self.layout.auxiliary_attributes(),
                    requested: requested.auxiliary_attributes(),
                });
            }
        }

        Ok(())
    }
}

/// Owns every primitive built through it. Dropping the cache releases all of
/// its GPU buffers.
pub struct PrimitiveCache<D: PrimitiveDevice> {
    records: HashMap<String, PrimitiveRecord<D::Buffer>>,
}

impl<D: PrimitiveDevice> PrimitiveCache<D> {
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
        }
    }

    /// Builds `name` on first use, then draws it with `model` as the model matrix.
    ///
    /// The shader in `target` must already be active with its view, projection
    /// and lighting uniforms set; this only writes `"model"`.
    pub fn build_primitive(
        &mut self,
        target: &mut DrawTarget<'_, D>,
        topology: Topology,
        name: &str,
        data: PrimitiveData<'_>,
        model: Matrix4<f32>,
    ) -> Result<(), PrimitiveError> {
        let result = self.build_and_draw(target, topology, name, &data, model);
        if let Err(err) = &result {
            log::error!("Skipping draw: {}", err);
        }
        result
    }

    fn build_and_draw(
        &mut self,
        target: &mut DrawTarget<'_, D>,
        topology: Topology,
        name: &str,
        data: &PrimitiveData<'_>,
        model: Matrix4<f32>,
    ) -> Result<(), PrimitiveError> {
        if name.is_empty() {
            return Err(PrimitiveError::EmptyName);
        }

        match self.records.get(name) {
            Some(record) => {
                record.check_compatible(name, topology, data)?;
                Self::draw(target, name, record, model);
            }
            None => {
                let record = Self::upload(target.device, topology, name, data)?;
                Self::draw(target, name, &record, model);
                self.records.insert(name.to_owned(), record);
            }
        }
        Ok(())
    }

    fn upload(
        device: &mut D,
        topology: Topology,
        name: &str,
        data: &PrimitiveData<'_>,
    ) -> Result<PrimitiveRecord<D::Buffer>, PrimitiveError> {
        let layout = validate(name, data)?;
        let vertices = interleave(data.positions, data.auxiliary, layout);

        // wgpu has no line-loop topology; close the loop with an explicit index.
        let indices: Cow<'_, [u32]> = if topology == Topology::LineLoop {
            Cow::Owned(close_loop(data.indices, data.positions.len()))
        } else {
            Cow::Borrowed(data.indices)
        };

        let vertex_buffer = device.create_vertex_buffer(name, &vertices);
        let (index_buffer, count) = if indices.is_empty() {
            (None, data.positions.len() as u32)
        } else {
            let buffer = device.create_index_buffer(name, &indices);
            (Some(buffer), indices.len() as u32)
        };

        log::debug!(
            "Built primitive '{}': {} {} vertices, {} auxiliary attributes, {}",
            name,
            data.positions.len(),
            topology,
            layout.auxiliary_attributes(),
            if index_buffer.is_some() {
                format!("{} indices", count)
            } else {
                "unindexed".to_owned()
            }
        );

        Ok(PrimitiveRecord {
            vertex_buffer,
            index_buffer,
            topology,
            count,
            layout,
        })
    }

    fn draw(
        target: &mut DrawTarget<'_, D>,
        name: &str,
        record: &PrimitiveRecord<D::Buffer>,
        model: Matrix4<f32>,
    ) {
        target.shader.set_mat4("model", model);
        target.device.draw(
            target.shader,
            DrawCall {
                label: name,
                topology: record.topology,
                layout: record.layout,
                vertex_buffer: &record.vertex_buffer,
                index_buffer: record.index_buffer.as_ref(),
                count: record.count,
            },
        );
    }

    pub fn build_points(
        &mut self,
        target: &mut DrawTarget<'_, D>,
        name: &str,
        positions: &[Vector3<f32>],
        auxiliary: &[Vec<f32>],
        model: Matrix4<f32>,
    ) -> Result<(), PrimitiveError> {
        let data = PrimitiveData::new(positions).with_auxiliary(auxiliary);
        self.build_primitive(target, Topology::Points, name, data, model)
    }

    pub fn build_point(
        &mut self,
        target: &mut DrawTarget<'_, D>,
        name: &str,
        position: Vector3<f32>,
        auxiliary: &[f32],
        model: Matrix4<f32>,
    ) -> Result<(), PrimitiveError> {
        let rows = replicate_row(auxiliary, 1);
        self.build_points(target, name, &[position], &rows, model)
    }

    pub fn build_lines(
        &mut self,
        target: &mut DrawTarget<'_, D>,
        name: &str,
        positions: &[Vector3<f32>],
        indices: &[u32],
        auxiliary: &[Vec<f32>],
        model: Matrix4<f32>,
    ) -> Result<(), PrimitiveError> {
        let data = PrimitiveData::new(positions)
            .with_indices(indices)
            .with_auxiliary(auxiliary);
        self.build_primitive(target, Topology::Lines, name, data, model)
    }

    pub fn build_line(
        &mut self,
        target: &mut DrawTarget<'_, D>,
        name: &str,
        start: Vector3<f32>,
        end: Vector3<f32>,
        auxiliary: &[f32],
        model: Matrix4<f32>,
    ) -> Result<(), PrimitiveError> {
        let rows = replicate_row(auxiliary, 2);
        self.build_lines(target, name, &[start, end], &[], &rows, model)
    }

    pub fn build_line_strip(
        &mut self,
        target: &mut DrawTarget<'_, D>,
        name: &str,
        positions: &[Vector3<f32>],
        indices: &[u32],
        auxiliary: &[Vec<f32>],
        model: Matrix4<f32>,
    ) -> Result<(), PrimitiveError> {
        let data = PrimitiveData::new(positions)
            .with_indices(indices)
            .with_auxiliary(auxiliary);
        self.build_primitive(target, Topology::LineStrip, name, data, model)
    }

    pub fn build_line_loop(
        &mut self,
        target: &mut DrawTarget<'_, D>,
        name: &str,
        positions: &[Vector3<f32>],
        indices: &[u32],
        auxiliary: &[Vec<f32>],
        model: Matrix4<f32>,
    ) -> Result<(), PrimitiveError> {
        let data = PrimitiveData::new(positions)
            .with_indices(indices)
            .with_auxiliary(auxiliary);
        self.build_primitive(target, Topology::LineLoop, name, data, model)
    }

    pub fn build_triangles(
        &mut self,
        target: &mut DrawTarget<'_, D>,
        name: &str,
        positions: &[Vector3<f32>],
        indices: &[u32],
        auxiliary: &[Vec<f32>],
        model: Matrix4<f32>,
    ) -> Result<(), PrimitiveError> {
        let data = PrimitiveData::new(positions)
            .with_indices(indices)
            .with_auxiliary(auxiliary);
        self.build_primitive(target, Topology::Triangles, name, data, model)
    }

    pub fn build_triangle(
        &mut self,
        target: &mut DrawTarget<'_, D>,
        name: &str,
        corners: [Vector3<f32>; 3],
        auxiliary: &[f32],
        model: Matrix4<f32>,
    ) -> Result<(), PrimitiveError> {
        let rows = replicate_row(auxiliary, 3);
        self.build_triangles(target, name, &corners, &[], &rows, model)
    }

    pub fn build_triangle_strip(
        &mut self,
        target: &mut DrawTarget<'_, D>,
        name: &str,
        positions: &[Vector3<f32>],
        indices: &[u32],
        auxiliary: &[Vec<f32>],
        model: Matrix4<f32>,
    ) -> Result<(), PrimitiveError> {
        let data = PrimitiveData::new(positions)
            .with_indices(indices)
            .with_auxiliary(auxiliary);
        self.build_primitive(target, Topology::TriangleStrip, name, data, model)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    pub fn record(&self, name: &str) -> Option<&PrimitiveRecord<D::Buffer>> {
        self.records.get(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<D: PrimitiveDevice> Default for PrimitiveCache<D> {
    fn default() -> Self {
        Self::new()
    }
}

/// Full validation for a first build. Returns the inferred layout.
fn validate(name: &str, data: &PrimitiveData<'_>) -> Result<VertexLayout, PrimitiveError> {
    let vertices = data.positions.len();
    if vertices == 0 {
        return Err(PrimitiveError::EmptyGeometry {
            name: name.to_owned(),
        });
    }

    if let Some(first) = data.auxiliary.first() {
        if data.auxiliary.len() < vertices {
            return Err(PrimitiveError::AuxiliaryShortfall {
                name: name.to_owned(),
                positions: vertices,
                rows: data.auxiliary.len(),
            });
        }

        let expected = first.len();
        if let Some((row, len)) = data.auxiliary[..vertices]
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != expected)
        {
            return Err(PrimitiveError::InconsistentAuxiliaryRow {
                name: name.to_owned(),
                row,
                len,
                expected,
            });
        }
    }

    if let Some(&index) = data.indices.iter().find(|&&i| i as usize >= vertices) {
        return Err(PrimitiveError::IndexOutOfRange {
            name: name.to_owned(),
            index,
            vertices,
        });
    }

    Ok(VertexLayout::infer(data.auxiliary))
}

/// Position followed by the row's first `layout.auxiliary_floats()` floats,
/// for each vertex. Surplus rows are ignored.
fn interleave(positions: &[Vector3<f32>], auxiliary: &[Vec<f32>], layout: VertexLayout) -> Vec<f32> {
    let extra = layout.auxiliary_floats();
    let mut vertices = Vec::with_capacity(positions.len() * layout.stride_floats());
    for (i, position) in positions.iter().enumerate() {
        vertices.extend_from_slice(&[position.x, position.y, position.z]);
        if extra > 0 {
            vertices.extend_from_slice(&auxiliary[i][..extra]);
        }
    }
    vertices
}

/// Index list for drawing a loop as a strip: the given indices (or
/// `0..vertices`) with the first one repeated at the end.
fn close_loop(indices: &[u32], vertices: usize) -> Vec<u32> {
    let mut closed: Vec<u32> = if indices.is_empty() {
        (0..vertices as u32).collect()
    } else {
        indices.to_vec()
    };
    if let Some(&first) = closed.first() {
        closed.push(first);
    }
    closed
}

fn replicate_row(row: &[f32], vertices: usize) -> Vec<Vec<f32>> {
    if row.is_empty() {
        Vec::new()
    } else {
        vec![row.to_vec(); vertices]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::primitives::testing::{DeviceCall, RecordingDevice, RecordingShader};
    use cgmath::SquareMatrix;

    fn triangle() -> Vec<Vector3<f32>> {
        vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        ]
    }

    fn colors(n: usize) -> Vec<Vec<f32>> {
        vec![vec![1.0, 0.5, 0.25]; n]
    }

    fn setup() -> (RecordingDevice, RecordingShader, PrimitiveCache<RecordingDevice>) {
        (RecordingDevice::default(), RecordingShader::default(), PrimitiveCache::new())
    }

    #[test]
    fn test_repeat_build_creates_once_and_draws_twice() {
        let (mut device, mut shader, mut cache) = setup();
        let positions = triangle();
        let aux = colors(3);

        for _ in 0..2 {
            let mut target = DrawTarget::new(&mut device, &mut shader);
            cache
                .build_triangles(&mut target, "tri", &positions, &[], &aux, Matrix4::identity())
                .unwrap();
        }

        assert_eq!(device.creations(), 1);
        assert_eq!(device.draws(), 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(shader.model_uploads(), 2);
    }

    #[test]
    fn test_topology_mismatch_is_rejected_without_drawing() {
        let (mut device, mut shader, mut cache) = setup();
        let positions = triangle();
        let mut target = DrawTarget::new(&mut device, &mut shader);

        cache
            .build_triangles(&mut target, "shape", &positions, &[], &[], Matrix4::identity())
            .unwrap();
        let err = cache
            .build_line_strip(&mut target, "shape", &positions, &[], &[], Matrix4::identity())
            .unwrap_err();

        assert_eq!(
            err,
            PrimitiveError::TopologyMismatch {
                name: "shape".into(),
                registered: Topology::Triangles,
                requested: Topology::LineStrip,
            }
        );
        assert_eq!(device.draws(), 1);
        assert_eq!(cache.record("shape").unwrap().topology(), Topology::Triangles);
    }

    #[test]
    fn test_interleaves_positions_with_auxiliary_data() {
        let (mut device, mut shader, mut cache) = setup();
        let positions = triangle();
        let aux = vec![
            vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.0],
            vec![1.0, 0.0, 0.0, 0.0, 0.0, 1.0],
            vec![0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
        ];
        let mut target = DrawTarget::new(&mut device, &mut shader);
        cache
            .build_triangles(&mut target, "tri", &positions, &[], &aux, Matrix4::identity())
            .unwrap();

        let vertices = device.vertex_data("tri").unwrap();
        assert_eq!(vertices.len(), 3 * 9);
        assert_eq!(&vertices[9..18], &[1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0]);

        let record = cache.record("tri").unwrap();
        assert_eq!(record.layout().auxiliary_attributes(), 2);
        assert_eq!(record.draw_count(), 3);
        assert!(!record.is_indexed());
    }

    #[test]
    fn test_indexed_draw_count_is_index_count() {
        let (mut device, mut shader, mut cache) = setup();
        let positions = vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(1.0, 1.0, 0.0),
        ];
        let indices = [0, 1, 2, 2, 3, 1];
        let mut target = DrawTarget::new(&mut device, &mut shader);
        cache
            .build_triangles(&mut target, "quad", &positions, &indices, &[], Matrix4::identity())
            .unwrap();

        let record = cache.record("quad").unwrap();
        assert!(record.is_indexed());
        assert_eq!(record.draw_count(), 6);
        assert_eq!(device.index_data("quad").unwrap(), indices.to_vec());
        assert_eq!(
            device.calls().last(),
            Some(&DeviceCall::Draw {
                label: "quad".into(),
                topology: Topology::Triangles,
                count: 6,
                indexed: true,
                auxiliary_attributes: 0,
            })
        );
    }

    #[test]
    fn test_model_matrix_is_uploaded_before_each_draw() {
        let (mut device, mut shader, mut cache) = setup();
        let positions = triangle();
        let model = Matrix4::from_translation(Vector3::new(2.0, 0.0, 0.0));
        let mut target = DrawTarget::new(&mut device, &mut shader);
        cache
            .build_triangles(&mut target, "tri", &positions, &[], &[], model)
            .unwrap();

        assert_eq!(shader.last_mat4("model"), Some(model));
    }

    #[test]
    fn test_contract_violations() {
        let (mut device, mut shader, mut cache) = setup();
        let positions = triangle();
        let mut target = DrawTarget::new(&mut device, &mut shader);
        let id = Matrix4::identity();

        assert_eq!(
            cache.build_triangles(&mut target, "", &positions, &[], &[], id),
            Err(PrimitiveError::EmptyName)
        );
        assert!(matches!(
            cache.build_triangles(&mut target, "empty", &[], &[], &[], id),
            Err(PrimitiveError::EmptyGeometry { .. })
        ));
        assert!(matches!(
            cache.build_triangles(&mut target, "short", &positions, &[], &colors(2), id),
            Err(PrimitiveError::AuxiliaryShortfall { positions: 3, rows: 2, .. })
        ));

        let ragged = vec![vec![0.0; 3], vec![0.0; 6], vec![0.0; 3]];
        assert!(matches!(
            cache.build_triangles(&mut target, "ragged", &positions, &[], &ragged, id),
            Err(PrimitiveError::InconsistentAuxiliaryRow { row: 1, len: 6, expected: 3, .. })
        ));
        assert!(matches!(
            cache.build_triangles(&mut target, "oob", &positions, &[0, 1, 3], &[], id),
            Err(PrimitiveError::IndexOutOfRange { index: 3, vertices: 3, .. })
        ));

        assert!(cache.is_empty());
        assert!(device.calls().is_empty());
    }

    #[test]
    fn test_surplus_auxiliary_rows_are_ignored() {
        let (mut device, mut shader, mut cache) = setup();
        let positions = triangle();
        let mut target = DrawTarget::new(&mut device, &mut shader);
        cache
            .build_triangles(&mut target, "tri", &positions, &[], &colors(5), Matrix4::identity())
            .unwrap();
        assert_eq!(device.vertex_data("tri").unwrap().len(), 3 * 6);
    }

    #[test]
    fn test_redraw_with_different_layout_is_rejected() {
        let (mut device, mut shader, mut cache) = setup();
        let positions = triangle();
        let mut target = DrawTarget::new(&mut device, &mut shader);
        let id = Matrix4::identity();

        cache
            .build_triangles(&mut target, "tri", &positions, &[], &colors(3), id)
            .unwrap();
        let wide = vec![vec![0.0; 6]; 3];
        assert!(matches!(
            cache.build_triangles(&mut target, "tri", &positions, &[], &wide, id),
            Err(PrimitiveError::LayoutMismatch { registered: 1, requested: 2, .. })
        ));
        // omitting the rows on redraw is fine: the cached layout is used
        cache
            .build_triangles(&mut target, "tri", &positions, &[], &[], id)
            .unwrap();
        assert_eq!(device.draws(), 2);
    }

    #[test]
    fn test_redraw_skips_upload_even_with_new_data() {
        let (mut device, mut shader, mut cache) = setup();
        let mut target = DrawTarget::new(&mut device, &mut shader);
        let id = Matrix4::identity();

        cache
            .build_points(&mut target, "pts", &triangle(), &[], id)
            .unwrap();
        let moved = vec![Vector3::new(9.0, 9.0, 9.0)];
        cache.build_points(&mut target, "pts", &moved, &[], id).unwrap();

        assert_eq!(device.creations(), 1);
        assert_eq!(cache.record("pts").unwrap().draw_count(), 3);
    }

    #[test]
    fn test_single_row_helpers_replicate_auxiliary_data() {
        let (mut device, mut shader, mut cache) = setup();
        let mut target = DrawTarget::new(&mut device, &mut shader);
        let red = [1.0, 0.0, 0.0];
        let id = Matrix4::identity();

        cache
            .build_line(
                &mut target,
                "axis",
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(1.0, 0.0, 0.0),
                &red,
                id,
            )
            .unwrap();

        let corners = [
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        ];
        cache
            .build_triangle(&mut target, "tri", corners, &red, id)
            .unwrap();
        cache
            .build_point(&mut target, "dot", Vector3::new(0.0, 2.0, 0.0), &[], id)
            .unwrap();

        assert_eq!(
            device.vertex_data("axis").unwrap(),
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0]
        );

        assert_eq!(cache.record("tri").unwrap().layout().auxiliary_attributes(), 1);
        assert_eq!(cache.record("dot").unwrap().layout().auxiliary_attributes(), 0);
        assert_eq!(cache.record("dot").unwrap().topology(), Topology::Points);
    }

    #[test]
    fn test_line_loop_is_closed_with_an_index() {
        let (mut device, mut shader, mut cache) = setup();
        let mut target = DrawTarget::new(&mut device, &mut shader);
        let id = Matrix4::identity();

        cache
            .build_line_loop(&mut target, "ring", &triangle(), &[], &[], id)
            .unwrap();
        cache
            .build_line_loop(&mut target, "ring2", &triangle(), &[2, 1, 0], &[], id)
            .unwrap();

        assert_eq!(device.index_data("ring").unwrap(), vec![0, 1, 2, 0]);
        assert_eq!(device.index_data("ring2").unwrap(), vec![2, 1, 0, 2]);

        let record = cache.record("ring").unwrap();
        assert_eq!(record.topology(), Topology::LineLoop);
        assert_eq!(record.draw_count(), 4);
    }

    #[test]
    fn test_each_convenience_variant_uses_its_topology() {
        let (mut device, mut shader, mut cache) = setup();
        let mut target = DrawTarget::new(&mut device, &mut shader);
        let p = triangle();
        let id = Matrix4::identity();

        cache.build_points(&mut target, "a", &p, &[], id).unwrap();
        cache.build_lines(&mut target, "b", &p, &[0, 1], &[], id).unwrap();
        cache.build_line_strip(&mut target, "c", &p, &[], &[], id).unwrap();
        cache.build_triangle_strip(&mut target, "d", &p, &[], &[], id).unwrap();

        assert_eq!(cache.record("a").unwrap().topology(), Topology::Points);
        assert_eq!(cache.record("b").unwrap().topology(), Topology::Lines);
        assert_eq!(cache.record("c").unwrap().topology(), Topology::LineStrip);
        assert_eq!(cache.record("d").unwrap().topology(), Topology::TriangleStrip);
        assert!(cache.contains("d"));
        assert!(!cache.contains("e"));
    }

    #[test]
    fn test_dropping_cache_releases_buffers() {
        let (mut device, mut shader, mut cache) = setup();
        {
            let mut target = DrawTarget::new(&mut device, &mut shader);
            cache
                .build_triangles(&mut target, "tri", &triangle(), &[0, 1, 2], &[], Matrix4::identity())
                .unwrap();
        }
        assert_eq!(device.live_buffers(), 2);
        drop(cache);
        assert_eq!(device.live_buffers(), 0);
    }
}
