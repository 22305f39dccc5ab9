//! Core data types for density fields and extracted meshes.

use glam::{UVec3, Vec3};
use rayon::prelude::*;

use crate::constants::DEFAULT_SCAN_GROUP_WIDTH;
use crate::constants::MAX_SCAN_WORKERS;
use crate::error::PipelineError;

/// Grid dimensions of a density field (samples per axis).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DensityFieldSize(pub UVec3);

impl DensityFieldSize {
  pub const fn new(x: u32, y: u32, z: u32) -> Self {
    Self(UVec3::new(x, y, z))
  }

  /// Total number of grid samples.
  #[inline]
  pub fn density_count(&self) -> usize {
    self.0.x as usize * self.0.y as usize * self.0.z as usize
  }

  /// Number of cells, i.e. grid points with all 8 corners in range.
  #[inline]
  pub fn cell_count(&self) -> usize {
    self.0.x.saturating_sub(1) as usize
      * self.0.y.saturating_sub(1) as usize
      * self.0.z.saturating_sub(1) as usize
  }

  /// Flat index of grid point (or cell) `(x, y, z)`.
  #[inline(always)]
  pub fn index(&self, x: u32, y: u32, z: u32) -> usize {
    x as usize + y as usize * self.0.x as usize + z as usize * self.0.x as usize * self.0.y as usize
  }

  /// Inverse of [`index`](Self::index).
  #[inline]
  pub fn coord(&self, index: usize) -> UVec3 {
    let nx = self.0.x as usize;
    let ny = self.0.y as usize;
    UVec3::new(
      (index % nx) as u32,
      ((index / nx) % ny) as u32,
      (index / (nx * ny)) as u32,
    )
  }

  /// True if `pos` is the minimum corner of a cell.
  #[inline(always)]
  pub fn is_cell(&self, pos: UVec3) -> bool {
    pos.x + 1 < self.0.x && pos.y + 1 < self.0.y && pos.z + 1 < self.0.z
  }

  /// True if any axis has fewer than two samples (no cells at all).
  #[inline]
  pub fn is_degenerate(&self) -> bool {
    self.0.cmple(UVec3::ONE).any()
  }

  pub fn to_array(&self) -> [u32; 3] {
    self.0.to_array()
  }
}

impl Default for DensityFieldSize {
  fn default() -> Self {
    Self::new(32, 32, 32)
  }
}

impl From<UVec3> for DensityFieldSize {
  fn from(dims: UVec3) -> Self {
    Self(dims)
  }
}

/// World-space extent covered by the whole density grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DensityFieldMeshSize(pub Vec3);

impl DensityFieldMeshSize {
  /// World units per grid step on each axis.
  ///
  /// Undefined for degenerate sizes: a 1-sample axis maps the whole extent
  /// onto a single step, and a 0-sample axis divides by zero.
  pub fn scale(&self, size: DensityFieldSize) -> Vec3 {
    self.0 / size.0.as_vec3()
  }
}

impl Default for DensityFieldMeshSize {
  fn default() -> Self {
    Self(Vec3::splat(10.0))
  }
}

/// Dense scalar field, one value per grid point.
///
/// Negative values are inside the surface, positive values outside.
#[derive(Clone, Debug)]
pub struct DensityField {
  size: DensityFieldSize,
  values: Vec<f32>,
}

impl DensityField {
  /// Wrap existing samples laid out as `x + y * nx + z * nx * ny`.
  pub fn new(size: DensityFieldSize, values: Vec<f32>) -> Result<Self, PipelineError> {
    let expected = size.density_count();
    if values.len() != expected {
      return Err(PipelineError::FieldSizeMismatch {
        dims: size.to_array(),
        len: values.len(),
        expected,
      });
    }
    Ok(Self { size, values })
  }

  /// Fill a field by evaluating `f` at every grid coordinate (in parallel).
  pub fn from_fn<F>(size: DensityFieldSize, f: F) -> Self
  where
    F: Fn(UVec3) -> f32 + Sync,
  {
    let mut values = vec![0.0; size.density_count()];
    values
      .par_iter_mut()
      .enumerate()
      .for_each(|(i, value)| *value = f(size.coord(i)));
    Self { size, values }
  }

  /// Field with the same value everywhere.
  pub fn constant(size: DensityFieldSize, value: f32) -> Self {
    Self {
      size,
      values: vec![value; size.density_count()],
    }
  }

  #[inline]
  pub fn size(&self) -> DensityFieldSize {
    self.size
  }

  #[inline]
  pub fn values(&self) -> &[f32] {
    &self.values
  }

  #[inline]
  pub fn value(&self, x: u32, y: u32, z: u32) -> f32 {
    self.values[self.size.index(x, y, z)]
  }

  pub fn into_values(self) -> Vec<f32> {
    self.values
  }
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinMaxAABB {
  pub min: [f32; 3],
  pub max: [f32; 3],
}

impl MinMaxAABB {
  /// Create AABB with inverted extents (ready for encapsulation).
  pub fn empty() -> Self {
    Self {
      min: [f32::INFINITY; 3],
      max: [f32::NEG_INFINITY; 3],
    }
  }

  /// Expand AABB to include a point.
  #[inline]
  pub fn encapsulate(&mut self, point: [f32; 3]) {
    for i in 0..3 {
      self.min[i] = self.min[i].min(point[i]);
      self.max[i] = self.max[i].max(point[i]);
    }
  }

  /// Check if AABB is valid (min <= max on all axes).
  pub fn is_valid(&self) -> bool {
    self.min[0] <= self.max[0] && self.min[1] <= self.max[1] && self.min[2] <= self.max[2]
  }
}

impl Default for MinMaxAABB {
  fn default() -> Self {
    Self::empty()
  }
}

/// Dense Surface Nets output read back after the final compaction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SurfaceNetsMesh {
  /// Vertex positions in grid coordinates, ordered by cell index.
  pub vertices: Vec<[f32; 3]>,

  /// Quads as 4 indices into `vertices`, wound (current, +a, +a+b, +b).
  pub quads: Vec<[u32; 4]>,

  /// Total reported by the vertex scan.
  pub vertex_count: u32,

  /// Total reported by the face scan.
  pub face_count: u32,
}

impl SurfaceNetsMesh {
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns true if no geometry was generated.
  pub fn is_empty(&self) -> bool {
    self.vertices.is_empty()
  }

  pub fn quad_count(&self) -> usize {
    self.quads.len()
  }

  /// Bounds of all vertices in grid coordinates.
  pub fn bounds(&self) -> MinMaxAABB {
    let mut bounds = MinMaxAABB::empty();
    for &position in &self.vertices {
      bounds.encapsulate(position);
    }
    bounds
  }

  /// Per-vertex normals in grid space. See [`quad_normals`].
  pub fn normals(&self) -> Vec<[f32; 3]> {
    quad_normals(&self.vertices, &self.quads)
  }

  /// Vertex positions scaled from grid coordinates into world space.
  pub fn world_positions(
    &self,
    size: DensityFieldSize,
    mesh_size: DensityFieldMeshSize,
  ) -> Vec<[f32; 3]> {
    let scale = mesh_size.scale(size);
    self
      .vertices
      .iter()
      .map(|&p| (Vec3::from_array(p) * scale).to_array())
      .collect()
  }
}

/// Per-vertex normals, the normalized mean of adjacent quad normals.
///
/// A quad's normal is the cross product of its diagonals, which follows the
/// quad winding without splitting it into triangles. Vertices that no quad
/// references get a zero normal. Pass world-space positions when the mesh
/// size scales axes unevenly.
pub fn quad_normals(positions: &[[f32; 3]], quads: &[[u32; 4]]) -> Vec<[f32; 3]> {
  let mut sums = vec![Vec3::ZERO; positions.len()];
  for quad in quads {
    let [p0, p1, p2, p3] = quad.map(|i| Vec3::from_array(positions[i as usize]));
    let normal = (p2 - p0).cross(p3 - p1).normalize_or_zero();
    for &i in quad {
      sums[i as usize] += normal;
    }
  }
  sums
    .into_iter()
    .map(|sum| sum.normalize_or_zero().to_array())
    .collect()
}

/// Configuration for a pipeline run.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineConfig {
  /// Lanes in the scan execution group (power of two).
  pub scan_group_width: u32,

  /// Worker threads cooperating inside the scan execution group.
  pub scan_workers: usize,
}

impl Default for PipelineConfig {
  fn default() -> Self {
    let workers = std::thread::available_parallelism()
      .map(|n| n.get())
      .unwrap_or(4)
      .min(MAX_SCAN_WORKERS);
    Self {
      scan_group_width: DEFAULT_SCAN_GROUP_WIDTH,
      scan_workers: workers,
    }
  }
}

impl PipelineConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_scan_group_width(mut self, width: u32) -> Self {
    self.scan_group_width = width;
    self
  }

  pub fn with_scan_workers(mut self, workers: usize) -> Self {
    self.scan_workers = workers;
    self
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
