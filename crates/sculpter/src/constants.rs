//! Layout and dispatch constants shared by the kernels.
//!
//! # Grid Layout
//!
//! ```text
//! Density field memory layout (row-major, X innermost):
//!
//! index = x + y * nx + z * nx * ny
//!
//! Address:  0       1       ...  nx-1      nx      ...
//! Content: [0,0,0] [1,0,0] ... [nx-1,0,0] [0,1,0] ...
//!          └────────── X ──────────┘
//! ```
//!
//! A cell is identified by its minimum corner, so cell `(x, y, z)` uses the
//! same flat index as grid point `(x, y, z)`. Only grid points with
//! `x < nx - 1`, `y < ny - 1`, `z < nz - 1` are cells; the remaining slots of
//! the per-cell buffers are never written.
//!
//! # Coordinate System
//!
//! ```text
//!         +Y
//!          │
//!          │
//!          └───────── +X
//!         /
//!        +Z
//!
//! Cell corner indices (binary: ZYX):
//!   0 = (0,0,0)    4 = (0,0,1)
//!   1 = (1,0,0)    5 = (1,0,1)
//!   2 = (0,1,0)    6 = (0,1,1)
//!   3 = (1,1,0)    7 = (1,1,1)
//! ```
//!
//! # Dispatch Shape
//!
//! ```text
//! 3D kernels (generate_vertices, generate_faces): 8×8×8 invocations / group
//! 1D kernels (compact_vertices, compact_faces):   256 invocations / group
//! prefix_sum:                                     one group, SCAN width
//! ```

/// Invocations per axis of a 3D workgroup.
pub const WORKGROUP_SIZE_3D: u32 = 8;

/// Invocations in a 1D workgroup.
pub const WORKGROUP_SIZE_1D: u32 = 256;

/// Default width of the single scan execution group.
///
/// Bounds the number of sparse face slots (`3 * density_count`) that one
/// pipeline run can compact, which is enough for grids up to ~44³.
pub const DEFAULT_SCAN_GROUP_WIDTH: u32 = 1 << 18;

/// Upper bound on worker threads in one scan execution group.
pub const MAX_SCAN_WORKERS: usize = 8;

/// Scalars per vertex record (x, y, z).
pub const VERTEX_STRIDE: usize = 3;

/// Indices per quad record.
pub const QUAD_STRIDE: usize = 4;

/// Face candidate slots reserved per cell (XY, XZ, YZ).
pub const FACE_SLOTS_PER_CELL: usize = 3;

/// Grid offsets of the 8 cube corners relative to the cell origin.
///
/// Layout matches corner index bits: corner i = (x=bit0, y=bit1, z=bit2).
pub const CORNER_OFFSETS: [[u32; 3]; 8] = [
  [0, 0, 0], // 0b000
  [1, 0, 0], // 0b001
  [0, 1, 0], // 0b010
  [1, 1, 0], // 0b011
  [0, 0, 1], // 0b100
  [1, 0, 1], // 0b101
  [0, 1, 1], // 0b110
  [1, 1, 1], // 0b111
];

/// Number of workgroups needed to cover `extent` invocations.
#[inline(always)]
pub const fn workgroup_count(extent: u32, group_size: u32) -> u32 {
  extent.div_ceil(group_size)
}

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
