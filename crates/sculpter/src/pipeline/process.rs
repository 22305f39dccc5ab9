//! Pipeline entry point.
//!
//! # Usage
//!
//! ```ignore
//! let pipeline = SurfaceNetsPipeline::new(PipelineConfig::default())?;
//!
//! // One-shot: buffers are allocated per run
//! let mesh = pipeline.run(&field)?;
//!
//! // Repeated runs over same-sized fields reuse one buffer set
//! let mut buffers = SurfaceNetsBuffers::new(field.size());
//! for field in &fields {
//!     let mesh = pipeline.run_with_buffers(field, &mut buffers)?;
//! }
//! ```

use crate::buffer::SurfaceNetsBuffers;
use crate::constants::{FACE_SLOTS_PER_CELL, QUAD_STRIDE, VERTEX_STRIDE};
use crate::error::PipelineError;
use crate::surface_nets::{run_stages, ExclusiveScanner, StageCounts};
use crate::types::{DensityField, DensityFieldSize, PipelineConfig, SurfaceNetsMesh};

/// Runs density fields through the five Surface Nets kernels.
#[derive(Clone, Debug)]
pub struct SurfaceNetsPipeline {
  config: PipelineConfig,
  scanner: ExclusiveScanner,
}

impl SurfaceNetsPipeline {
  /// Fails if the configured scan group width is not a power of two.
  pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
    let scanner = ExclusiveScanner::new(config.scan_group_width, config.scan_workers)?;
    Ok(Self { config, scanner })
  }

  pub fn config(&self) -> &PipelineConfig {
    &self.config
  }

  /// Largest sparse array either scan sees for a grid of `size`.
  fn scan_len(size: DensityFieldSize) -> usize {
    size.density_count() * FACE_SLOTS_PER_CELL
  }

  /// Fail unless both scans of a run over `size` fit in one group.
  pub fn check_capacity(&self, size: DensityFieldSize) -> Result<(), PipelineError> {
    self.scanner.check_capacity(Self::scan_len(size))
  }

  /// Extract a mesh, allocating fresh buffers for the run.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "pipeline::run"))]
  pub fn run(&self, field: &DensityField) -> Result<SurfaceNetsMesh, PipelineError> {
    let size = field.size();
    if size.is_degenerate() {
      return Ok(SurfaceNetsMesh::new());
    }
    self.check_capacity(size)?;

    let buffers = {
      #[cfg(feature = "tracing")]
      let _span = tracing::info_span!("allocate_buffers").entered();
      SurfaceNetsBuffers::new(size)
    };

    self.execute(field, &buffers)
  }

  /// Extract a mesh into a caller-owned buffer set.
  ///
  /// The buffers may be larger than needed. Validity flags and counts are
  /// cleared first so nothing from a previous run leaks into this one.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "pipeline::run_with_buffers"))]
  pub fn run_with_buffers(
    &self,
    field: &DensityField,
    buffers: &mut SurfaceNetsBuffers,
  ) -> Result<SurfaceNetsMesh, PipelineError> {
    let size = field.size();
    if size.is_degenerate() {
      return Ok(SurfaceNetsMesh::new());
    }
    self.check_capacity(size)?;
    buffers.validate(size)?;
    buffers.reset();

    self.execute(field, buffers)
  }

  fn execute(
    &self,
    field: &DensityField,
    buffers: &SurfaceNetsBuffers,
  ) -> Result<SurfaceNetsMesh, PipelineError> {
    let counts = run_stages(field, buffers, &self.scanner)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
      dims = ?field.size().to_array(),
      vertices = counts.vertices,
      faces = counts.faces,
      "extracted surface"
    );

    Ok(read_back(buffers, counts))
  }
}

/// Copy the dense prefix of both compacted buffers out.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "pipeline::read_back"))]
fn read_back(buffers: &SurfaceNetsBuffers, counts: StageCounts) -> SurfaceNetsMesh {
  let vertex_words = buffers
    .compacted_vertices
    .read_f32(counts.vertices as usize * VERTEX_STRIDE);
  let face_words = buffers
    .compacted_faces
    .read_u32(counts.faces as usize * QUAD_STRIDE);

  SurfaceNetsMesh {
    vertices: vertex_words
      .chunks_exact(VERTEX_STRIDE)
      .map(|v| [v[0], v[1], v[2]])
      .collect(),
    quads: face_words
      .chunks_exact(QUAD_STRIDE)
      .map(|q| [q[0], q[1], q[2], q[3]])
      .collect(),
    vertex_count: counts.vertices,
    face_count: counts.faces,
  }
}

#[cfg(test)]
#[path = "process_test.rs"]
mod process_test;
