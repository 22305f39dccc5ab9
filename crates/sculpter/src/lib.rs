//! sculpter - Data-parallel Surface Nets extraction
//!
//! This crate turns a dense 3D density field (one `f32` per grid point,
//! negative = inside) into a Surface Nets mesh: one vertex per surface
//! crossing cell and one quad per pair of neighbouring surface cells.
//!
//! The extraction runs as five compute kernels over shared storage buffers,
//! dispatched in workgroups on the rayon pool:
//!
//! ```text
//! density ──► generate_vertices ──► prefix_sum ──► compact_vertices ──► vertices
//!                    │                   │
//!                    └──── valid ────────┴──► generate_faces ──► prefix_sum ──► compact_faces ──► quads
//! ```
//!
//! # Example
//!
//! ```ignore
//! use sculpter::prelude::*;
//!
//! let size = DensityFieldSize::new(32, 32, 32);
//! let field = DensityField::sample(size, &Sphere::new(Vec3::splat(16.0), 10.0));
//!
//! let pipeline = SurfaceNetsPipeline::new(PipelineConfig::default())?;
//! let mesh = pipeline.run(&field)?;
//!
//! println!("{} vertices, {} quads", mesh.vertex_count, mesh.quad_count());
//! ```

pub mod buffer;
pub mod constants;
pub mod dispatch;
pub mod error;
pub mod types;

// Compute kernels
pub mod surface_nets;

// Orchestrator sequencing the kernels
pub mod pipeline;

// Analytic density functions
pub mod samplers;

// Batch meshing of several fields
pub mod task_queue;

pub use buffer::{StorageBuffer, SurfaceNetsBuffers};
pub use error::PipelineError;
pub use pipeline::SurfaceNetsPipeline;
pub use task_queue::{MeshCompletion, MeshRequest, MeshingStage};
pub use types::{
  quad_normals, DensityField, DensityFieldMeshSize, DensityFieldSize, MinMaxAABB, PipelineConfig,
  SurfaceNetsMesh,
};

pub mod prelude {
  pub use crate::pipeline::SurfaceNetsPipeline;
  pub use crate::samplers::{Cuboid, DensitySampler, Plane, Sphere, Torus, Union};
  pub use crate::types::{
    quad_normals, DensityField, DensityFieldMeshSize, DensityFieldSize, PipelineConfig,
    SurfaceNetsMesh,
  };
  pub use crate::PipelineError;
  pub use glam::{UVec3, Vec3};
}
