//! Storage buffers shared between kernel invocations.
//!
//! A [`StorageBuffer`] is a fixed-length array of 32-bit words that any
//! number of invocations may read and write at once, the CPU analogue of a
//! GPU storage binding. Words hold either `u32` or `f32` payloads (bit cast).
//! All accesses use relaxed atomics; ordering between stages comes from the
//! dispatch boundary, which joins every invocation before returning.
//!
//! ```text
//! SurfaceNetsBuffers (one pipeline run, sized for the worst case)
//! ┌───────────────────┬──────────────────────┬──────────────┐
//! │ buffer            │ words                │ payload      │
//! ├───────────────────┼──────────────────────┼──────────────┤
//! │ vertices          │ slots * 3            │ f32          │
//! │ vertex_valid      │ slots                │ u32 (0/1)    │
//! │ vertex_indices    │ slots                │ u32          │
//! │ vertex_count      │ 1                    │ u32          │
//! │ compacted_verts   │ slots * 3            │ f32          │
//! │ faces             │ slots * 3 * 4        │ u32          │
//! │ face_valid        │ slots * 3            │ u32 (0/1)    │
//! │ face_indices      │ slots * 3            │ u32          │
//! │ face_count        │ 1                    │ u32          │
//! │ compacted_faces   │ slots * 3 * 4        │ u32          │
//! └───────────────────┴──────────────────────┴──────────────┘
//! slots = nx * ny * nz (one per grid point, non-cell slots stay invalid)
//! ```

use std::sync::atomic::{AtomicU32, Ordering};

use crate::constants::{FACE_SLOTS_PER_CELL, QUAD_STRIDE, VERTEX_STRIDE};
use crate::error::PipelineError;
use crate::types::DensityFieldSize;

/// Labelled array of 32-bit words with interior mutability.
pub struct StorageBuffer {
  label: &'static str,
  words: Box<[AtomicU32]>,
}

impl StorageBuffer {
  /// Zero-initialised buffer of `len` words.
  pub fn zeroed(label: &'static str, len: usize) -> Self {
    Self {
      label,
      words: (0..len).map(|_| AtomicU32::new(0)).collect(),
    }
  }

  pub fn from_u32(label: &'static str, data: &[u32]) -> Self {
    Self {
      label,
      words: data.iter().map(|&v| AtomicU32::new(v)).collect(),
    }
  }

  pub fn from_f32(label: &'static str, data: &[f32]) -> Self {
    Self {
      label,
      words: data.iter().map(|v| AtomicU32::new(v.to_bits())).collect(),
    }
  }

  #[inline]
  pub fn label(&self) -> &'static str {
    self.label
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.words.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.words.is_empty()
  }

  #[inline(always)]
  pub fn load_u32(&self, index: usize) -> u32 {
    self.words[index].load(Ordering::Relaxed)
  }

  #[inline(always)]
  pub fn store_u32(&self, index: usize, value: u32) {
    self.words[index].store(value, Ordering::Relaxed);
  }

  #[inline(always)]
  pub fn load_f32(&self, index: usize) -> f32 {
    f32::from_bits(self.load_u32(index))
  }

  #[inline(always)]
  pub fn store_f32(&self, index: usize, value: f32) {
    self.store_u32(index, value.to_bits());
  }

  /// Reset every word to zero.
  pub fn clear(&mut self) {
    for word in self.words.iter_mut() {
      *word.get_mut() = 0;
    }
  }

  /// Copy the first `len` words out as `u32`.
  pub fn read_u32(&self, len: usize) -> Vec<u32> {
    self.words[..len].iter().map(|w| w.load(Ordering::Relaxed)).collect()
  }

  /// Copy the first `len` words out as `f32`.
  pub fn read_f32(&self, len: usize) -> Vec<f32> {
    self.words[..len]
      .iter()
      .map(|w| f32::from_bits(w.load(Ordering::Relaxed)))
      .collect()
  }

  /// Fail with [`PipelineError::BufferTooSmall`] unless `required` words fit.
  pub fn ensure_len(&self, required: usize) -> Result<(), PipelineError> {
    if self.len() < required {
      return Err(PipelineError::BufferTooSmall {
        label: self.label,
        len: self.len(),
        required,
      });
    }
    Ok(())
  }
}

impl std::fmt::Debug for StorageBuffer {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("StorageBuffer")
      .field("label", &self.label)
      .field("len", &self.len())
      .finish()
  }
}

/// Every intermediate and output buffer of one pipeline run.
#[derive(Debug)]
pub struct SurfaceNetsBuffers {
  pub vertices: StorageBuffer,
  pub vertex_valid: StorageBuffer,
  pub vertex_indices: StorageBuffer,
  pub vertex_count: StorageBuffer,
  pub compacted_vertices: StorageBuffer,
  pub faces: StorageBuffer,
  pub face_valid: StorageBuffer,
  pub face_indices: StorageBuffer,
  pub face_count: StorageBuffer,
  pub compacted_faces: StorageBuffer,
  /// Sparse vertex slots (one per grid point).
  pub total_slots: usize,
  /// Sparse face slots (`total_slots * 3`).
  pub max_faces: usize,
}

impl SurfaceNetsBuffers {
  /// Allocate worst-case buffers for a grid of `size`.
  ///
  /// Dense outputs are sized like their sparse inputs because the valid
  /// counts are only known after the scans.
  pub fn new(size: DensityFieldSize) -> Self {
    let total_slots = size.density_count();
    let max_faces = total_slots * FACE_SLOTS_PER_CELL;

    Self {
      vertices: StorageBuffer::zeroed("vertices", total_slots * VERTEX_STRIDE),
      vertex_valid: StorageBuffer::zeroed("vertex_valid", total_slots),
      vertex_indices: StorageBuffer::zeroed("vertex_indices", total_slots),
      vertex_count: StorageBuffer::zeroed("vertex_count", 1),
      compacted_vertices: StorageBuffer::zeroed("compacted_vertices", total_slots * VERTEX_STRIDE),
      faces: StorageBuffer::zeroed("faces", max_faces * QUAD_STRIDE),
      face_valid: StorageBuffer::zeroed("face_valid", max_faces),
      face_indices: StorageBuffer::zeroed("face_indices", max_faces),
      face_count: StorageBuffer::zeroed("face_count", 1),
      compacted_faces: StorageBuffer::zeroed("compacted_faces", max_faces * QUAD_STRIDE),
      total_slots,
      max_faces,
    }
  }

  /// Check that every buffer can hold a run over a grid of `size`.
  pub fn validate(&self, size: DensityFieldSize) -> Result<(), PipelineError> {
    let slots = size.density_count();
    let faces = slots * FACE_SLOTS_PER_CELL;

    self.vertices.ensure_len(slots * VERTEX_STRIDE)?;
    self.vertex_valid.ensure_len(slots)?;
    self.vertex_indices.ensure_len(slots)?;
    self.vertex_count.ensure_len(1)?;
    self.compacted_vertices.ensure_len(slots * VERTEX_STRIDE)?;
    self.faces.ensure_len(faces * QUAD_STRIDE)?;
    self.face_valid.ensure_len(faces)?;
    self.face_indices.ensure_len(faces)?;
    self.face_count.ensure_len(1)?;
    self.compacted_faces.ensure_len(faces * QUAD_STRIDE)
  }

  /// Clear validity flags and counts so a reused set exposes no stale data.
  ///
  /// Position and index payloads are left alone; they are only meaningful
  /// where a validity flag says so.
  pub fn reset(&mut self) {
    self.vertex_valid.clear();
    self.vertex_count.clear();
    self.face_valid.clear();
    self.face_count.clear();
  }
}

#[cfg(test)]
#[path = "buffer_test.rs"]
mod buffer_test;
