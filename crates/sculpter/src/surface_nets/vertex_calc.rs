//! Vertex position calculation for Surface Nets.
//!
//! A cell's vertex is the plain average of every point where one of its 12
//! edges crosses the zero level.

pub use glam::Vec3A;

/// Precomputed corner positions within unit cube.
/// Layout matches corner index bits: corner i = (x=bit0, y=bit1, z=bit2)
pub const CORNER_POSITIONS: [Vec3A; 8] = [
  Vec3A::new(0.0, 0.0, 0.0), // 0b000
  Vec3A::new(1.0, 0.0, 0.0), // 0b001
  Vec3A::new(0.0, 1.0, 0.0), // 0b010
  Vec3A::new(1.0, 1.0, 0.0), // 0b011
  Vec3A::new(0.0, 0.0, 1.0), // 0b100
  Vec3A::new(1.0, 0.0, 1.0), // 0b101
  Vec3A::new(0.0, 1.0, 1.0), // 0b110
  Vec3A::new(1.0, 1.0, 1.0), // 0b111
];

/// Edge definitions: pairs of corner indices.
///
/// The order is fixed so the crossing sum is accumulated identically for
/// every run.
pub const CUBE_EDGES: [[usize; 2]; 12] = [
  [0, 1], // Edge 0:  X axis at Y=0, Z=0
  [0, 2], // Edge 1:  Y axis at X=0, Z=0
  [0, 4], // Edge 2:  Z axis at X=0, Y=0
  [1, 3], // Edge 3:  Y axis at X=1, Z=0
  [1, 5], // Edge 4:  Z axis at X=1, Y=0
  [2, 3], // Edge 5:  X axis at Y=1, Z=0
  [2, 6], // Edge 6:  Z axis at X=0, Y=1
  [3, 7], // Edge 7:  Z axis at X=1, Y=1
  [4, 5], // Edge 8:  X axis at Y=0, Z=1
  [4, 6], // Edge 9:  Y axis at X=0, Z=1
  [5, 7], // Edge 10: Y axis at X=1, Z=1
  [6, 7], // Edge 11: X axis at Y=1, Z=1
];

/// True if the surface crosses the edge between two samples.
///
/// A zero sample never counts as a crossing: `v0 * v1` must be strictly
/// negative, which also guarantees `v0 - v1 != 0` for the interpolation.
#[inline(always)]
pub fn edge_crosses(v0: f32, v1: f32) -> bool {
  v0 * v1 < 0.0
}

/// Compute the cell vertex as the mean of all edge crossing points.
///
/// `origin` is the grid position of corner 0, so the result is in grid
/// coordinates. Returns `None` when no edge crosses the surface.
#[inline]
pub fn compute_position(origin: Vec3A, samples: &[f32; 8]) -> Option<Vec3A> {
  let mut sum = Vec3A::ZERO;
  let mut count = 0u32;

  for &[c0, c1] in &CUBE_EDGES {
    let v0 = samples[c0];
    let v1 = samples[c1];

    if edge_crosses(v0, v1) {
      let t = v0 / (v0 - v1);

      let p0 = origin + CORNER_POSITIONS[c0];
      let p1 = origin + CORNER_POSITIONS[c1];
      sum += p0 + t * (p1 - p0);
      count += 1;
    }
  }

  if count == 0 {
    return None;
  }

  Some(sum / count as f32)
}

#[cfg(test)]
#[path = "vertex_calc_test.rs"]
mod vertex_calc_test;
