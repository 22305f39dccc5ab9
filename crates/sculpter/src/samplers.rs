//! Analytic density functions for building test and demo fields.
//!
//! Every sampler returns a signed distance in grid units: negative inside,
//! positive outside, zero on the surface. Positions are grid coordinates, so
//! sample `(x, y, z)` of a field is evaluated at `Vec3::new(x, y, z)`.

use glam::{UVec3, Vec2, Vec3};

use crate::types::{DensityField, DensityFieldSize};

/// A density function that can be sampled from any thread.
pub trait DensitySampler: Send + Sync {
  fn density(&self, p: Vec3) -> f32;
}

impl<S: DensitySampler + ?Sized> DensitySampler for Box<S> {
  #[inline]
  fn density(&self, p: Vec3) -> f32 {
    (**self).density(p)
  }
}

impl<S: DensitySampler + ?Sized> DensitySampler for &S {
  #[inline]
  fn density(&self, p: Vec3) -> f32 {
    (**self).density(p)
  }
}

impl DensityField {
  /// Evaluate `sampler` at every grid point (in parallel).
  pub fn sample<S: DensitySampler + ?Sized>(size: DensityFieldSize, sampler: &S) -> Self {
    Self::from_fn(size, |p: UVec3| sampler.density(p.as_vec3()))
  }
}

/// Ball around `center`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
  pub center: Vec3,
  pub radius: f32,
}

impl Sphere {
  pub fn new(center: Vec3, radius: f32) -> Self {
    Self { center, radius }
  }
}

impl DensitySampler for Sphere {
  #[inline]
  fn density(&self, p: Vec3) -> f32 {
    p.distance(self.center) - self.radius
  }
}

/// Half-space behind a plane: `dot(p, normal) - offset`.
///
/// Everything on the side opposite to `normal` is inside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
  pub normal: Vec3,
  pub offset: f32,
}

impl Plane {
  /// `normal` is normalized; a zero normal falls back to +Y.
  pub fn new(normal: Vec3, offset: f32) -> Self {
    Self {
      normal: normal.try_normalize().unwrap_or(Vec3::Y),
      offset,
    }
  }

  /// Horizontal ground, solid below `height`.
  pub fn ground(height: f32) -> Self {
    Self::new(Vec3::Y, height)
  }
}

impl DensitySampler for Plane {
  #[inline]
  fn density(&self, p: Vec3) -> f32 {
    p.dot(self.normal) - self.offset
  }
}

/// Axis-aligned box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cuboid {
  pub center: Vec3,
  pub half_extents: Vec3,
}

impl Cuboid {
  pub fn new(center: Vec3, half_extents: Vec3) -> Self {
    Self {
      center,
      half_extents: half_extents.abs(),
    }
  }
}

impl DensitySampler for Cuboid {
  #[inline]
  fn density(&self, p: Vec3) -> f32 {
    let q = (p - self.center).abs() - self.half_extents;
    // Outside distance plus (negative) inside distance
    q.max(Vec3::ZERO).length() + q.max_element().min(0.0)
  }
}

/// Torus around the Y axis through `center`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Torus {
  pub center: Vec3,
  pub major_radius: f32,
  pub minor_radius: f32,
}

impl Torus {
  pub fn new(center: Vec3, major_radius: f32, minor_radius: f32) -> Self {
    Self {
      center,
      major_radius,
      minor_radius,
    }
  }
}

impl DensitySampler for Torus {
  #[inline]
  fn density(&self, p: Vec3) -> f32 {
    let local = p - self.center;
    let ring = Vec2::new(local.x, local.z).length() - self.major_radius;
    Vec2::new(ring, local.y).length() - self.minor_radius
  }
}

/// Union of several shapes (pointwise minimum).
///
/// An empty union is outside everywhere.
#[derive(Default)]
pub struct Union {
  members: Vec<Box<dyn DensitySampler>>,
}

impl Union {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with(mut self, member: impl DensitySampler + 'static) -> Self {
    self.members.push(Box::new(member));
    self
  }

  pub fn push(&mut self, member: Box<dyn DensitySampler>) {
    self.members.push(member);
  }

  pub fn len(&self) -> usize {
    self.members.len()
  }

  pub fn is_empty(&self) -> bool {
    self.members.is_empty()
  }
}

impl DensitySampler for Union {
  fn density(&self, p: Vec3) -> f32 {
    self
      .members
      .iter()
      .map(|m| m.density(p))
      .fold(f32::INFINITY, f32::min)
  }
}

impl std::fmt::Debug for Union {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Union")
      .field("members", &self.members.len())
      .finish()
  }
}

#[cfg(test)]
#[path = "samplers_test.rs"]
mod samplers_test;
