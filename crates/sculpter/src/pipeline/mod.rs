//! Surface Nets pipeline orchestration.
//!
//! Owns the buffers of a run, checks every size contract up front and then
//! sequences the kernels of [`crate::surface_nets`]:
//!
//! ```text
//! DensityField
//!      │
//!      ▼
//! ┌──────────┐   degenerate dims    ┌────────────┐
//! │ validate ├─────────────────────►│ empty mesh │
//! └────┬─────┘                      └────────────┘
//!      │ capacity ok
//!      ▼
//! ┌──────────┐     ┌────────────┐     ┌──────────┐
//! │ buffers  ├────►│ run_stages ├────►│ readback ├────► SurfaceNetsMesh
//! │ (alloc / │     │ 6 dispatch │     │ counts + │
//! │  reset)  │     └────────────┘     │ dense    │
//! └──────────┘                        └──────────┘
//! ```
//!
//! Errors are reported before the first dispatch; a run that starts always
//! completes.

pub mod process;

// Test utilities
#[cfg(test)]
pub mod test_utils;


pub use process::SurfaceNetsPipeline;
