//! Workgroup dispatch on the rayon pool.
//!
//! A dispatch runs a kernel closure once per invocation id, grouped into
//! fixed-size workgroups. Workgroups are spread over rayon's thread pool;
//! invocations inside one workgroup run sequentially on the same thread.
//!
//! ```text
//! dispatch_3d(groups = (2,1,1), size = 8³)
//!
//!   group (0,0,0) ─► ids (0..8, 0..8, 0..8)   ─┐
//!   group (1,0,0) ─► ids (8..16, 0..8, 0..8)  ─┴─► join ─► return
//! ```
//!
//! The dispatch covers whole workgroups, so it may hand out ids past the
//! kernel's domain. Kernels bounds-check and return early for those.
//! Returning from a dispatch means every invocation has finished and all of
//! its writes are visible to the caller: this is the barrier between stages.

use glam::UVec3;
use rayon::prelude::*;

use crate::constants::{workgroup_count, WORKGROUP_SIZE_1D, WORKGROUP_SIZE_3D};

/// Workgroup grid for a 3D kernel covering `extent` invocations per axis.
pub fn workgroups_3d(extent: UVec3) -> UVec3 {
  UVec3::new(
    workgroup_count(extent.x, WORKGROUP_SIZE_3D),
    workgroup_count(extent.y, WORKGROUP_SIZE_3D),
    workgroup_count(extent.z, WORKGROUP_SIZE_3D),
  )
}

/// Workgroup count for a 1D kernel covering `extent` invocations.
pub fn workgroups_1d(extent: usize) -> u32 {
  workgroup_count(extent as u32, WORKGROUP_SIZE_1D)
}

/// Run `kernel` for every invocation of a 3D workgroup grid.
pub fn dispatch_3d<K>(workgroups: UVec3, kernel: K)
where
  K: Fn(UVec3) + Sync,
{
  let total = workgroups.x as usize * workgroups.y as usize * workgroups.z as usize;
  if total == 0 {
    return;
  }

  (0..total).into_par_iter().for_each(|flat| {
    let group = UVec3::new(
      (flat % workgroups.x as usize) as u32,
      ((flat / workgroups.x as usize) % workgroups.y as usize) as u32,
      (flat / (workgroups.x as usize * workgroups.y as usize)) as u32,
    );
    let origin = group * WORKGROUP_SIZE_3D;

    for lz in 0..WORKGROUP_SIZE_3D {
      for ly in 0..WORKGROUP_SIZE_3D {
        for lx in 0..WORKGROUP_SIZE_3D {
          kernel(origin + UVec3::new(lx, ly, lz));
        }
      }
    }
  });
}

/// Run `kernel` for every invocation of a 1D workgroup grid.
pub fn dispatch_1d<K>(workgroups: u32, kernel: K)
where
  K: Fn(usize) + Sync,
{
  (0..workgroups).into_par_iter().for_each(|group| {
    let origin = group as usize * WORKGROUP_SIZE_1D as usize;
    for local in 0..WORKGROUP_SIZE_1D as usize {
      kernel(origin + local);
    }
  });
}

#[cfg(test)]
#[path = "dispatch_test.rs"]
mod dispatch_test;
