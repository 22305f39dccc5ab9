//! Kernel 4: quad generation between neighbouring surface cells.
//!
//! Each cell owns three face slots, one per axis-aligned plane. The quad in
//! plane (a, b) joins the cell with its +a, +a+b and +b neighbours:
//!
//! ```text
//!        b
//!        ▲
//!   +b   ●───────● +a+b        slot 0: XY  (a = X, b = Y)
//!        │       │             slot 1: XZ  (a = X, b = Z)
//!        │ quad  │             slot 2: YZ  (a = Y, b = Z)
//!        │       │
//!  cell  ●───────● +a ──► a    winding: cell, +a, +a+b, +b
//! ```
//!
//! A quad is emitted only if all four cells carry a valid vertex. The slot
//! stores their compacted vertex indices. Every in-domain invocation writes all
//! three validity words, so stale faces from a previous run never survive.

use glam::UVec3;

use crate::buffer::StorageBuffer;
use crate::constants::{FACE_SLOTS_PER_CELL, QUAD_STRIDE};
use crate::dispatch::{dispatch_3d, workgroups_3d};
use crate::types::DensityFieldSize;

/// Axis pairs `(a, b)` spanning the quad of each face slot.
pub const FACE_PLANES: [(usize, usize); FACE_SLOTS_PER_CELL] = [(0, 1), (0, 2), (1, 2)];

/// Buffers bound to the face generation kernel.
pub struct GenerateFacesBindings<'a> {
  pub vertex_valid: &'a StorageBuffer,
  /// Exclusive scan of `vertex_valid`.
  pub vertex_indices: &'a StorageBuffer,
  /// Sparse quads, 4 words per face slot (output).
  pub faces: &'a StorageBuffer,
  /// Sparse validity, 1 word per face slot (output).
  pub face_valid: &'a StorageBuffer,
  pub dimensions: DensityFieldSize,
}

/// The four cells of the quad in `plane`, in winding order.
#[inline(always)]
pub fn quad_cells(id: UVec3, plane: usize) -> [UVec3; 4] {
  let (a, b) = FACE_PLANES[plane];
  let step_a = UVec3::AXES[a];
  let step_b = UVec3::AXES[b];
  [id, id + step_a, id + step_a + step_b, id + step_b]
}

/// One invocation of the kernel.
#[inline]
pub fn generate_faces(id: UVec3, bindings: &GenerateFacesBindings) {
  let dims = bindings.dimensions;
  if !dims.is_cell(id) {
    return;
  }

  let cell = dims.index(id.x, id.y, id.z);
  let slot_base = cell * FACE_SLOTS_PER_CELL;
  let is_valid = |p: UVec3| bindings.vertex_valid.load_u32(dims.index(p.x, p.y, p.z)) == 1;

  if !is_valid(id) {
    for slot in 0..FACE_SLOTS_PER_CELL {
      bindings.face_valid.store_u32(slot_base + slot, 0);
    }
    return;
  }

  for plane in 0..FACE_SLOTS_PER_CELL {
    let slot = slot_base + plane;
    let cells = quad_cells(id, plane);

    // The +a+b corner bounds the other two neighbours
    let emit = dims.is_cell(cells[2]) && cells[1..].iter().all(|&p| is_valid(p));
    if !emit {
      bindings.face_valid.store_u32(slot, 0);
      continue;
    }

    let base = slot * QUAD_STRIDE;
    for (k, p) in cells.iter().enumerate() {
      let index = bindings.vertex_indices.load_u32(dims.index(p.x, p.y, p.z));
      bindings.faces.store_u32(base + k, index);
    }
    bindings.face_valid.store_u32(slot, 1);
  }
}

/// Dispatch one invocation per grid point; non-cell invocations drop out.
pub fn dispatch(bindings: &GenerateFacesBindings) {
  dispatch_3d(workgroups_3d(bindings.dimensions.0), |id| {
    generate_faces(id, bindings)
  });
}

#[cfg(test)]
#[path = "generate_faces_test.rs"]
mod generate_faces_test;
