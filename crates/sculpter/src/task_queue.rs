//! Task queue for meshing many density fields.
//!
//! Follows the stage pattern: Enqueue → Tick → Completions
//!
//! ```text
//! enqueue(field, config) ──► pending ──tick()──► rayon: one pipeline run
//!                                                  per request
//!                                                       │
//! drain_completions() ◄── completed ◄───────────────────┘
//! ```
//!
//! Requests are independent: each tick runs every pending request on the
//! rayon pool with its own buffers, and a failing request only fails its own
//! completion.

use rayon::prelude::*;
use web_time::Instant;

use crate::error::PipelineError;
use crate::pipeline::SurfaceNetsPipeline;
use crate::types::{DensityField, PipelineConfig, SurfaceNetsMesh};

/// Request to extract a mesh from one density field.
#[derive(Clone, Debug)]
pub struct MeshRequest {
  /// Unique identifier for this request
  pub id: u64,
  pub field: DensityField,
  pub config: PipelineConfig,
}

/// Finished request.
#[derive(Debug)]
pub struct MeshCompletion {
  /// Request ID this completion corresponds to
  pub id: u64,
  pub result: Result<SurfaceNetsMesh, PipelineError>,
  /// Pipeline time in microseconds
  pub mesh_time_us: u64,
}

/// Meshing stage that processes requests in parallel.
#[derive(Debug, Default)]
pub struct MeshingStage {
  pending: Vec<MeshRequest>,
  completed: Vec<MeshCompletion>,
  next_id: u64,
}

impl MeshingStage {
  pub fn new() -> Self {
    Self::default()
  }

  /// Enqueue a field, returning the assigned ID.
  pub fn enqueue(&mut self, field: DensityField, config: PipelineConfig) -> u64 {
    let id = self.next_id;
    self.next_id += 1;

    self.pending.push(MeshRequest { id, field, config });

    id
  }

  /// Process pending requests in parallel and move completions to output.
  /// Returns the number of requests processed this tick.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "meshing_stage::tick"))]
  pub fn tick(&mut self) -> usize {
    if self.pending.is_empty() {
      return 0;
    }

    let requests = std::mem::take(&mut self.pending);
    let count = requests.len();

    let completions: Vec<MeshCompletion> = requests
      .into_par_iter()
      .map(|req| {
        let start = Instant::now();
        let result = SurfaceNetsPipeline::new(req.config).and_then(|p| p.run(&req.field));
        let mesh_time_us = start.elapsed().as_micros() as u64;

        #[cfg(feature = "tracing")]
        if let Err(err) = &result {
          tracing::warn!(id = req.id, %err, "meshing request failed");
        }

        MeshCompletion {
          id: req.id,
          result,
          mesh_time_us,
        }
      })
      .collect();

    self.completed.extend(completions);
    count
  }

  /// Take all completions, in enqueue order within each tick.
  pub fn drain_completions(&mut self) -> Vec<MeshCompletion> {
    std::mem::take(&mut self.completed)
  }

  pub fn pending_count(&self) -> usize {
    self.pending.len()
  }

  /// Number of completed results waiting to be drained.
  pub fn completed_count(&self) -> usize {
    self.completed.len()
  }

  /// True when no work remains.
  pub fn is_idle(&self) -> bool {
    self.pending.is_empty() && self.completed.is_empty()
  }
}

#[cfg(test)]
#[path = "task_queue_test.rs"]
mod task_queue_test;
