use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::buffer::StorageBuffer;

#[test]
fn test_workgroups_cover_extent() {
  assert_eq!(workgroups_3d(UVec3::new(1, 8, 9)), UVec3::new(1, 1, 2));
  assert_eq!(workgroups_1d(0), 0);
  assert_eq!(workgroups_1d(256), 1);
  assert_eq!(workgroups_1d(257), 2);
}

#[test]
fn test_dispatch_1d_visits_every_id_once() {
  let hits = StorageBuffer::zeroed("hits", 600);
  dispatch_1d(workgroups_1d(600), |id| {
    if id >= hits.len() {
      return;
    }
    hits.store_u32(id, hits.load_u32(id) + 1);
  });
  assert!(hits.read_u32(600).iter().all(|&h| h == 1));
}

#[test]
fn test_dispatch_1d_hands_out_whole_groups() {
  let calls = AtomicUsize::new(0);
  dispatch_1d(2, |_| {
    calls.fetch_add(1, Ordering::Relaxed);
  });
  assert_eq!(calls.load(Ordering::Relaxed), 2 * WORKGROUP_SIZE_1D as usize);
}

#[test]
fn test_dispatch_3d_visits_every_id_once() {
  let extent = UVec3::new(10, 3, 17);
  let n = (extent.x * extent.y * extent.z) as usize;
  let hits = StorageBuffer::zeroed("hits", n);
  let out_of_range = AtomicUsize::new(0);

  dispatch_3d(workgroups_3d(extent), |id| {
    if id.x >= extent.x || id.y >= extent.y || id.z >= extent.z {
      out_of_range.fetch_add(1, Ordering::Relaxed);
      return;
    }
    let flat = (id.x + id.y * extent.x + id.z * extent.x * extent.y) as usize;
    hits.store_u32(flat, hits.load_u32(flat) + 1);
  });

  assert!(hits.read_u32(n).iter().all(|&h| h == 1));
  let covered = 16 * 8 * 24;
  assert_eq!(out_of_range.load(Ordering::Relaxed), covered - n);
}

#[test]
fn test_dispatch_3d_empty_grid_is_noop() {
  let calls = AtomicUsize::new(0);
  dispatch_3d(UVec3::new(0, 4, 4), |_| {
    calls.fetch_add(1, Ordering::Relaxed);
  });
  assert_eq!(calls.load(Ordering::Relaxed), 0);
}
