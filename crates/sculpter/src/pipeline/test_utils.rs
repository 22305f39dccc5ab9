//! Test utilities for pipeline tests.
//!
//! Provides seeded field generators and a sequential brute-force Surface Nets
//! used as the reference for the parallel kernels.

use glam::{UVec3, Vec3};
use rand::prelude::*;

use crate::types::{DensityField, DensityFieldSize, SurfaceNetsMesh};

// =============================================================================
// Field Generators
// =============================================================================

/// Uniform noise in `[-1, 1)` from a fixed seed.
pub fn random_field(size: DensityFieldSize, seed: u64) -> DensityField {
  let mut rng = StdRng::seed_from_u64(seed);
  let values = (0..size.density_count())
    .map(|_| rng.random_range(-1.0..1.0))
    .collect();
  DensityField::new(size, values).unwrap()
}

/// Sphere of `radius` centred in the grid (negative inside).
pub fn sphere_field(size: DensityFieldSize, radius: f32) -> DensityField {
  let center = (size.0 - UVec3::ONE).as_vec3() * 0.5;
  DensityField::from_fn(size, |p| p.as_vec3().distance(center) - radius)
}

// =============================================================================
// Reference Mesher
// =============================================================================

/// Vertex of `cell` computed edge by edge, or `None` without a crossing.
pub fn reference_vertex(field: &DensityField, cell: UVec3) -> Option<[f32; 3]> {
  let mut sum = Vec3::ZERO;
  let mut count = 0;

  // Every edge of the cube: pick an axis, then the two other coordinates
  for axis in 0..3 {
    for u in 0..2 {
      for v in 0..2 {
        let mut start = [0u32; 3];
        start[(axis + 1) % 3] = u;
        start[(axis + 2) % 3] = v;
        let p0 = cell + UVec3::from_array(start);
        let p1 = p0 + UVec3::AXES[axis];

        let d0 = field.value(p0.x, p0.y, p0.z);
        let d1 = field.value(p1.x, p1.y, p1.z);
        if (d0 < 0.0 && d1 > 0.0) || (d0 > 0.0 && d1 < 0.0) {
          let t = d0 / (d0 - d1);
          sum += p0.as_vec3().lerp(p1.as_vec3(), t);
          count += 1;
        }
      }
    }
  }

  (count > 0).then(|| (sum / count as f32).to_array())
}

/// Sequential Surface Nets with the same ordering rules as the pipeline:
/// vertices and faces in ascending cell order, faces XY, XZ, YZ per cell.
pub fn reference_mesh(field: &DensityField) -> SurfaceNetsMesh {
  let size = field.size();
  let dims = size.0;
  let mut mesh = SurfaceNetsMesh::new();
  if size.is_degenerate() {
    return mesh;
  }

  let mut cell_vertex = vec![None; size.density_count()];
  for z in 0..dims.z - 1 {
    for y in 0..dims.y - 1 {
      for x in 0..dims.x - 1 {
        let cell = UVec3::new(x, y, z);
        if let Some(position) = reference_vertex(field, cell) {
          cell_vertex[size.index(x, y, z)] = Some(mesh.vertices.len() as u32);
          mesh.vertices.push(position);
        }
      }
    }
  }

  let vertex_at = |p: UVec3| -> Option<u32> {
    if p.x + 1 < dims.x && p.y + 1 < dims.y && p.z + 1 < dims.z {
      cell_vertex[size.index(p.x, p.y, p.z)]
    } else {
      None
    }
  };

  for z in 0..dims.z - 1 {
    for y in 0..dims.y - 1 {
      for x in 0..dims.x - 1 {
        let cell = UVec3::new(x, y, z);
        for (a, b) in [(0, 1), (0, 2), (1, 2)] {
          let da = UVec3::AXES[a];
          let db = UVec3::AXES[b];
          let corners = [cell, cell + da, cell + da + db, cell + db];
          if let [Some(i0), Some(i1), Some(i2), Some(i3)] = corners.map(|p| vertex_at(p)) {
            mesh.quads.push([i0, i1, i2, i3]);
          }
        }
      }
    }
  }

  mesh.vertex_count = mesh.vertices.len() as u32;
  mesh.face_count = mesh.quads.len() as u32;
  mesh
}

/// Assert two meshes have identical topology and positions within `tolerance`.
pub fn assert_meshes_match(actual: &SurfaceNetsMesh, expected: &SurfaceNetsMesh, tolerance: f32) {
  assert_eq!(actual.vertex_count, expected.vertex_count, "vertex count");
  assert_eq!(actual.face_count, expected.face_count, "face count");
  assert_eq!(actual.quads, expected.quads, "quads");

  for (i, (a, e)) in actual.vertices.iter().zip(&expected.vertices).enumerate() {
    let diff = Vec3::from_array(*a).distance(Vec3::from_array(*e));
    assert!(
      diff <= tolerance,
      "vertex {}: {:?} vs {:?} (diff {})",
      i,
      a,
      e,
      diff
    );
  }
}
