//! Kernel 1: per-cell vertex generation.
//!
//! ```text
//! invocation (x,y,z) ──► cell? ──no──► return
//!                          │
//!                         yes
//!                          ▼
//!        8 corner samples ──► 12 edges, v0*v1 < 0 ?
//!                          │
//!             ┌────────────┴────────────┐
//!        crossings > 0             crossings == 0
//!   vertices[i*3..] = mean          vertex_valid[i] = 0
//!   vertex_valid[i] = 1
//! ```

use glam::UVec3;

use super::vertex_calc;
use crate::buffer::StorageBuffer;
use crate::constants::{CORNER_OFFSETS, VERTEX_STRIDE};
use crate::dispatch::{dispatch_3d, workgroups_3d};
use crate::types::DensityFieldSize;

/// Buffers bound to the vertex generation kernel.
pub struct GenerateVerticesBindings<'a> {
  /// Read-only density samples.
  pub density_field: &'a [f32],
  /// Sparse positions, 3 scalars per cell slot (output).
  pub vertices: &'a StorageBuffer,
  /// Sparse validity, 1 word per cell slot (output).
  pub vertex_valid: &'a StorageBuffer,
  pub dimensions: DensityFieldSize,
}

/// One invocation of the kernel.
#[inline]
pub fn generate_vertices(id: UVec3, bindings: &GenerateVerticesBindings) {
  let dims = bindings.dimensions;
  if !dims.is_cell(id) {
    return;
  }

  let samples: [f32; 8] = std::array::from_fn(|i| {
    let [dx, dy, dz] = CORNER_OFFSETS[i];
    bindings.density_field[dims.index(id.x + dx, id.y + dy, id.z + dz)]
  });

  let cell = dims.index(id.x, id.y, id.z);

  match vertex_calc::compute_position(id.as_vec3a(), &samples) {
    Some(position) => {
      let base = cell * VERTEX_STRIDE;
      bindings.vertices.store_f32(base, position.x);
      bindings.vertices.store_f32(base + 1, position.y);
      bindings.vertices.store_f32(base + 2, position.z);
      bindings.vertex_valid.store_u32(cell, 1);
    }
    None => bindings.vertex_valid.store_u32(cell, 0),
  }
}

/// Dispatch one invocation per grid point; non-cell invocations drop out.
pub fn dispatch(bindings: &GenerateVerticesBindings) {
  dispatch_3d(workgroups_3d(bindings.dimensions.0), |id| {
    generate_vertices(id, bindings)
  });
}

#[cfg(test)]
#[path = "generate_vertices_test.rs"]
mod generate_vertices_test;
