//! Contract violations detected by the orchestrator before dispatching.
//!
//! Kernels themselves never fail: out-of-range invocations return early and
//! degenerate grids produce empty meshes. Everything here is caught up front.

use thiserror::Error;

/// Errors reported while setting up or running a pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PipelineError {
  #[error("density field has {len} values, expected {expected} for {dims:?}")]
  FieldSizeMismatch {
    dims: [u32; 3],
    len: usize,
    expected: usize,
  },

  #[error("scan group width {0} must be a non-zero power of two")]
  InvalidGroupWidth(u32),

  #[error("scan input of {len} elements exceeds the single group width of {group_width}")]
  ScanCapacityExceeded { len: usize, group_width: u32 },

  #[error("buffer `{label}` holds {len} words, {required} required")]
  BufferTooSmall {
    label: &'static str,
    len: usize,
    required: usize,
  },
}
