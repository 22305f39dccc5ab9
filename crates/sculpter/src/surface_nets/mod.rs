//! Surface Nets as a five-kernel data-parallel pipeline.
//!
//! Surface Nets places ONE vertex in every cell whose edges cross the zero
//! level, at the mean of the crossing points, and joins neighbouring surface
//! cells with quads. Here each step is a kernel run over a workgroup grid,
//! with sparse per-cell outputs compacted by an exclusive scan.
//!
//! # Processing Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        INPUT                                    │
//! │  density_field: [f32; nx*ny*nz]   negative = inside             │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  1. generate_vertices (3D)                                      │
//! │     12 edges per cell, v0*v1 < 0 -> crossing                    │
//! │     vertices[cell*3..], vertex_valid[cell]                      │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  2. prefix_sum(vertex_valid) -> vertex_indices, vertex_count    │
//! └─────────────────────────────────────────────────────────────────┘
//!                 │                               │
//!                 ▼                               ▼
//! ┌───────────────────────────────┐ ┌───────────────────────────────┐
//! │  3. compact_vertices (1D)     │ │  4. generate_faces (3D)       │
//! │     -> compacted_vertices     │ │     3 slots per cell          │
//! └───────────────────────────────┘ │     faces, face_valid         │
//!                                   └───────────────────────────────┘
//!                                                 │
//!                                                 ▼
//!                   ┌─────────────────────────────────────────────────┐
//!                   │  5. prefix_sum(face_valid) -> face_indices,     │
//!                   │     face_count                                  │
//!                   └─────────────────────────────────────────────────┘
//!                                                 │
//!                                                 ▼
//!                   ┌─────────────────────────────────────────────────┐
//!                   │  6. compact_faces (1D) -> compacted_faces       │
//!                   └─────────────────────────────────────────────────┘
//! ```
//!
//! Stages run strictly in this order (3 and 4 only share a dependency on 2
//! but are still sequenced). Each dispatch returns only once all of its
//! invocations have finished, so a stage always sees its predecessor's
//! complete output.
//!
//! # Sparse Layout
//!
//! Per-cell buffers are indexed by the flat grid index of the cell's minimum
//! corner and carry one slot per grid point. Slots whose grid point is not a
//! cell (the last sample along any axis) are never written by the vertex
//! kernel and stay invalid.

pub mod compact;
pub mod generate_faces;
pub mod generate_vertices;
pub mod prefix_sum;
pub mod vertex_calc;

pub use compact::CompactBindings;
pub use generate_faces::{GenerateFacesBindings, FACE_PLANES};
pub use generate_vertices::GenerateVerticesBindings;
pub use prefix_sum::{ExclusiveScanner, PrefixSumBindings};

use crate::buffer::SurfaceNetsBuffers;
use crate::error::PipelineError;
use crate::types::DensityField;

/// Valid counts reported by the two scans.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StageCounts {
  pub vertices: u32,
  pub faces: u32,
}

/// Run all six dispatches over `field`, leaving dense results in `buffers`.
///
/// The caller must have checked that `buffers` is large enough for the field
/// and that both sparse arrays fit into one scan group.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "surface_nets::run_stages"))]
pub fn run_stages(
  field: &DensityField,
  buffers: &SurfaceNetsBuffers,
  scanner: &ExclusiveScanner,
) -> Result<StageCounts, PipelineError> {
  let dimensions = field.size();
  let slots = dimensions.density_count();
  let face_slots = slots * crate::constants::FACE_SLOTS_PER_CELL;

  {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("generate_vertices").entered();
    generate_vertices::dispatch(&GenerateVerticesBindings {
      density_field: field.values(),
      vertices: &buffers.vertices,
      vertex_valid: &buffers.vertex_valid,
      dimensions,
    });
  }

  let vertices = {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("prefix_sum", buffer = "vertex_valid").entered();
    scanner.scan(&PrefixSumBindings {
      input: &buffers.vertex_valid,
      output: &buffers.vertex_indices,
      count: &buffers.vertex_count,
      len: slots,
    })?
  };

  {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("compact_vertices").entered();
    compact::dispatch_vertices(&CompactBindings {
      source: &buffers.vertices,
      valid: &buffers.vertex_valid,
      indices: &buffers.vertex_indices,
      destination: &buffers.compacted_vertices,
      len: slots,
    });
  }

  {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("generate_faces").entered();
    generate_faces::dispatch(&GenerateFacesBindings {
      vertex_valid: &buffers.vertex_valid,
      vertex_indices: &buffers.vertex_indices,
      faces: &buffers.faces,
      face_valid: &buffers.face_valid,
      dimensions,
    });
  }

  let faces = {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("prefix_sum", buffer = "face_valid").entered();
    scanner.scan(&PrefixSumBindings {
      input: &buffers.face_valid,
      output: &buffers.face_indices,
      count: &buffers.face_count,
      len: face_slots,
    })?
  };

  {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("compact_faces").entered();
    compact::dispatch_faces(&CompactBindings {
      source: &buffers.faces,
      valid: &buffers.face_valid,
      indices: &buffers.face_indices,
      destination: &buffers.compacted_faces,
      len: face_slots,
    });
  }

  #[cfg(feature = "tracing")]
  tracing::debug!(vertices, faces, "surface nets stages complete");

  Ok(StageCounts { vertices, faces })
}
