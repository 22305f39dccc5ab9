//! Kernels 3 and 5: scatter valid sparse records into dense buffers.
//!
//! ```text
//! slot      0        1        2        3        4        5
//! valid     1        0        1        1        0        1
//! index     0        .        1        2        .        3
//! sparse  (1,2,3)  (-,-,-)  (4,5,6)  (7,8,9)  (-,-,-)  (10,11,12)
//!            │                 │        │                  │
//!            ▼                 ▼        ▼                  ▼
//! dense   (1,2,3)  (4,5,6)  (7,8,9)  (10,11,12)
//! ```
//!
//! Invalid slots never write, so the scan value stored for them is unused.
//! Vertices use a stride of 3 words, quads a stride of 4.

use crate::buffer::StorageBuffer;
use crate::constants::{QUAD_STRIDE, VERTEX_STRIDE};
use crate::dispatch::{dispatch_1d, workgroups_1d};

/// Buffers bound to one compaction dispatch.
pub struct CompactBindings<'a> {
  /// Sparse records, `STRIDE` words per slot.
  pub source: &'a StorageBuffer,
  pub valid: &'a StorageBuffer,
  /// Exclusive scan of `valid`.
  pub indices: &'a StorageBuffer,
  /// Dense records (output).
  pub destination: &'a StorageBuffer,
  /// Sparse slot count.
  pub len: usize,
}

/// Copy slot `id` to its dense position if it is valid.
#[inline(always)]
pub fn compact_record<const STRIDE: usize>(id: usize, bindings: &CompactBindings) {
  if id >= bindings.len || bindings.valid.load_u32(id) != 1 {
    return;
  }

  let src = id * STRIDE;
  let dst = bindings.indices.load_u32(id) as usize * STRIDE;
  for k in 0..STRIDE {
    bindings
      .destination
      .store_u32(dst + k, bindings.source.load_u32(src + k));
  }
}

/// One invocation of the vertex compactor.
#[inline]
pub fn compact_vertices(id: usize, bindings: &CompactBindings) {
  compact_record::<VERTEX_STRIDE>(id, bindings);
}

/// One invocation of the face compactor.
#[inline]
pub fn compact_faces(id: usize, bindings: &CompactBindings) {
  compact_record::<QUAD_STRIDE>(id, bindings);
}

pub fn dispatch_vertices(bindings: &CompactBindings) {
  dispatch_1d(workgroups_1d(bindings.len), |id| compact_vertices(id, bindings));
}

pub fn dispatch_faces(bindings: &CompactBindings) {
  dispatch_1d(workgroups_1d(bindings.len), |id| compact_faces(id, bindings));
}

#[cfg(test)]
#[path = "compact_test.rs"]
mod compact_test;
