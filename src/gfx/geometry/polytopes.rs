//! # Polytope Generation
//!
//! Fixed-topology solids built from hard-coded vertex and index tables. The
//! `build_*` functions hand the result to a [`PrimitiveCache`] as indexed
//! triangles, so a shape is generated and uploaded only the first time its
//! name is seen.

use cgmath::{ElementWise, Matrix4, SquareMatrix, Vector3};

use crate::gfx::primitives::{
    DrawTarget, PrimitiveCache, PrimitiveData, PrimitiveDevice, PrimitiveError, Topology,
};

use super::ShapeGeometry;

const CUBE_CORNERS: [[f32; 3]; 8] = [
    [-0.5, -0.5, -0.5],
    [-0.5, 0.5, -0.5],
    [0.5, 0.5, -0.5],
    [0.5, -0.5, -0.5],
    [-0.5, -0.5, 0.5],
    [-0.5, 0.5, 0.5],
    [0.5, 0.5, 0.5],
    [0.5, -0.5, 0.5],
];

#[rustfmt::skip]
const CUBE_INDICES: [u32; 36] = [
    0, 1, 2, 2, 3, 0,
    1, 5, 6, 6, 2, 1,
    5, 4, 7, 7, 6, 5,
    4, 0, 3, 3, 7, 4,
    3, 2, 6, 6, 7, 3,
    4, 5, 1, 1, 0, 4,
];

// regular tetrahedron inscribed in the unit sphere
const TETRAHEDRON_VERTICES: [[f32; 3]; 4] = [
    [0.0, 0.0, 1.0],
    [0.0, 0.942809, -0.333333],
    [-0.816497, -0.471405, -0.333333],
    [0.816497, -0.471405, -0.333333],
];

const TETRAHEDRON_INDICES: [u32; 12] = [0, 1, 2, 0, 2, 3, 0, 3, 1, 1, 2, 3];

const RECT_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 1];

fn placed(template: &[[f32; 3]], center: Vector3<f32>, size: Vector3<f32>) -> Vec<Vector3<f32>> {
    template
        .iter()
        .map(|&v| center + Vector3::from(v).mul_element_wise(size))
        .collect()
}

/// Axis-aligned box: unit cube corners scaled per axis by `size`, then moved to `center`.
pub fn cube_geometry(center: Vector3<f32>, size: Vector3<f32>) -> ShapeGeometry {
    ShapeGeometry {
        positions: placed(&CUBE_CORNERS, center, size),
        indices: CUBE_INDICES.to_vec(),
    }
}

pub fn tetrahedron_geometry(center: Vector3<f32>, size: Vector3<f32>) -> ShapeGeometry {
    ShapeGeometry {
        positions: placed(&TETRAHEDRON_VERTICES, center, size),
        indices: TETRAHEDRON_INDICES.to_vec(),
    }
}

/// Parallelogram spanned from `p1` by `p2` and `p3`; the fourth corner is
/// `p2 + p3 - p1`.
pub fn rect_geometry(p1: Vector3<f32>, p2: Vector3<f32>, p3: Vector3<f32>) -> ShapeGeometry {
    let p4 = p2 + p3 - p1;
    ShapeGeometry {
        positions: vec![p1, p2, p3, p4],
        indices: RECT_INDICES.to_vec(),
    }
}

fn build_shape<D: PrimitiveDevice>(
    cache: &mut PrimitiveCache<D>,
    target: &mut DrawTarget<'_, D>,
    name: &str,
    geometry: ShapeGeometry,
    auxiliary: &[Vec<f32>],
    model: Matrix4<f32>,
) -> Result<(), PrimitiveError> {
    let data = PrimitiveData::new(&geometry.positions)
        .with_indices(&geometry.indices)
        .with_auxiliary(auxiliary);
    cache.build_primitive(target, Topology::Triangles, name, data, model)
}

pub fn build_cube<D: PrimitiveDevice>(
    cache: &mut PrimitiveCache<D>,
    target: &mut DrawTarget<'_, D>,
    name: &str,
    center: Vector3<f32>,
    size: Vector3<f32>,
    auxiliary: &[Vec<f32>],
) -> Result<(), PrimitiveError> {
    build_cube_with_model(cache, target, name, center, size, auxiliary, Matrix4::identity())
}

pub fn build_cube_with_model<D: PrimitiveDevice>(
    cache: &mut PrimitiveCache<D>,
    target: &mut DrawTarget<'_, D>,
    name: &str,
    center: Vector3<f32>,
    size: Vector3<f32>,
    auxiliary: &[Vec<f32>],
    model: Matrix4<f32>,
) -> Result<(), PrimitiveError> {
    build_shape(cache, target, name, cube_geometry(center, size), auxiliary, model)
}

pub fn build_tetrahedron<D: PrimitiveDevice>(
    cache: &mut PrimitiveCache<D>,
    target: &mut DrawTarget<'_, D>,
    name: &str,
    center: Vector3<f32>,
    size: Vector3<f32>,
    auxiliary: &[Vec<f32>],
) -> Result<(), PrimitiveError> {
    build_tetrahedron_with_model(cache, target, name, center, size, auxiliary, Matrix4::identity())
}

pub fn build_tetrahedron_with_model<D: PrimitiveDevice>(
    cache: &mut PrimitiveCache<D>,
    target: &mut DrawTarget<'_, D>,
    name: &str,
    center: Vector3<f32>,
    size: Vector3<f32>,
    auxiliary: &[Vec<f32>],
    model: Matrix4<f32>,
) -> Result<(), PrimitiveError> {
    build_shape(cache, target, name, tetrahedron_geometry(center, size), auxiliary, model)
}

pub fn build_rect<D: PrimitiveDevice>(
    cache: &mut PrimitiveCache<D>,
    target: &mut DrawTarget<'_, D>,
    name: &str,
    corners: [Vector3<f32>; 3],
    auxiliary: &[Vec<f32>],
) -> Result<(), PrimitiveError> {
    build_rect_with_model(cache, target, name, corners, auxiliary, Matrix4::identity())
}

pub fn build_rect_with_model<D: PrimitiveDevice>(
    cache: &mut PrimitiveCache<D>,
    target: &mut DrawTarget<'_, D>,
    name: &str,
    [p1, p2, p3]: [Vector3<f32>; 3],
    auxiliary: &[Vec<f32>],
    model: Matrix4<f32>,
) -> Result<(), PrimitiveError> {
    build_shape(cache, target, name, rect_geometry(p1, p2, p3), auxiliary, model)
}
