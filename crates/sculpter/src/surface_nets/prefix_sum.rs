//! Kernel 2/5: work-efficient exclusive scan (Blelloch) in one execution group.
//!
//! The group has `W` logical lanes (a power of two) sharing one scratch
//! buffer. Lanes are executed by `T` worker threads (worker `w` runs lanes
//! `w, w+T, w+2T, ...`) and every phase ends in a full-group barrier.
//!
//! ```text
//! W = 8, flags = [1 0 1 1 0 1 0 0]
//!
//! load        1 0 1 1 0 1 0 0
//! up  d=4     1 1 1 2 0 1 0 0      shared[right] += shared[left]
//! up  d=2     1 1 1 3 0 1 0 1
//! up  d=1     1 1 1 3 0 1 0 4      total = shared[W-1] = 4
//! root        1 1 1 3 0 1 0 0      shared[W-1] = 0
//! down d=1    1 1 1 0 0 1 0 3      swap-and-add
//! down d=2    1 0 1 1 0 3 0 4
//! down d=4    0 1 1 2 3 3 4 4      lanes hold exclusive sums
//! out         0 1 1 2 3 3 4 4  -> output[0..N)
//! ```
//!
//! Only inputs of up to `W` elements are supported. Longer inputs would need
//! a second level combining per-group totals.
// TODO: two-level scan (per-group scan, scan of group totals, offset-add
// pass) to lift the single-group limit.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Barrier;

use crate::buffer::StorageBuffer;
use crate::error::PipelineError;

/// Group-shared scratch for one scan call.
struct ScanState {
  shared: Box<[AtomicU32]>,
}

impl ScanState {
  fn new(width: usize) -> Self {
    Self {
      shared: (0..width).map(|_| AtomicU32::new(0)).collect(),
    }
  }

  #[inline(always)]
  fn load(&self, lane: usize) -> u32 {
    self.shared[lane].load(Ordering::Relaxed)
  }

  #[inline(always)]
  fn store(&self, lane: usize, value: u32) {
    self.shared[lane].store(value, Ordering::Relaxed);
  }
}

/// Buffers bound to one scan call.
pub struct PrefixSumBindings<'a> {
  /// 0/1 flags (read-only).
  pub input: &'a StorageBuffer,
  /// Exclusive prefix sums (output).
  pub output: &'a StorageBuffer,
  /// Total sum in word 0 (output).
  pub count: &'a StorageBuffer,
  /// Elements to scan.
  pub len: usize,
}

/// Single-group exclusive scanner.
#[derive(Clone, Debug)]
pub struct ExclusiveScanner {
  group_width: u32,
  workers: usize,
}

impl ExclusiveScanner {
  /// Create a scanner with `group_width` lanes run by `workers` threads.
  ///
  /// The worker count is clamped to `1..=group_width`.
  pub fn new(group_width: u32, workers: usize) -> Result<Self, PipelineError> {
    if !group_width.is_power_of_two() {
      return Err(PipelineError::InvalidGroupWidth(group_width));
    }
    Ok(Self {
      group_width,
      workers: workers.clamp(1, group_width as usize),
    })
  }

  pub fn group_width(&self) -> u32 {
    self.group_width
  }

  pub fn workers(&self) -> usize {
    self.workers
  }

  /// Fail unless `len` elements fit in one execution group.
  pub fn check_capacity(&self, len: usize) -> Result<(), PipelineError> {
    if len > self.group_width as usize {
      return Err(PipelineError::ScanCapacityExceeded {
        len,
        group_width: self.group_width,
      });
    }
    Ok(())
  }

  /// Scan `bindings.len` flags, returning the total.
  pub fn scan(&self, bindings: &PrefixSumBindings) -> Result<u32, PipelineError> {
    self.check_capacity(bindings.len)?;
    bindings.input.ensure_len(bindings.len)?;
    bindings.output.ensure_len(bindings.len)?;
    bindings.count.ensure_len(1)?;

    let state = ScanState::new(self.group_width as usize);
    let barrier = Barrier::new(self.workers);

    std::thread::scope(|scope| {
      for worker in 1..self.workers {
        let state = &state;
        let barrier = &barrier;
        scope.spawn(move || run_lanes(worker, self.workers, state, barrier, bindings));
      }
      run_lanes(0, self.workers, &state, &barrier, bindings);
    });

    Ok(bindings.count.load_u32(0))
  }
}

/// Lanes of `active` owned by `worker`.
#[inline(always)]
fn lanes(worker: usize, workers: usize, active: usize) -> impl Iterator<Item = usize> {
  (worker..active).step_by(workers)
}

/// Body of one worker thread. Every worker passes the same sequence of
/// barriers regardless of how many lanes it owns in a round.
fn run_lanes(
  worker: usize,
  workers: usize,
  state: &ScanState,
  barrier: &Barrier,
  bindings: &PrefixSumBindings,
) {
  let width = state.shared.len();

  // Load flags; lanes past the input read as zero.
  for lane in lanes(worker, workers, width) {
    let flag = if lane < bindings.len {
      bindings.input.load_u32(lane)
    } else {
      0
    };
    state.store(lane, flag);
  }
  barrier.wait();

  // Up-sweep: build partial sums in place.
  let mut offset = 1;
  let mut d = width >> 1;
  while d > 0 {
    for lane in lanes(worker, workers, d) {
      let left = offset * (2 * lane + 1) - 1;
      let right = offset * (2 * lane + 2) - 1;
      state.store(right, state.load(right) + state.load(left));
    }
    offset <<= 1;
    d >>= 1;
    barrier.wait();
  }

  // Root holds the total; clearing it turns the tree exclusive.
  if worker == 0 {
    bindings.count.store_u32(0, state.load(width - 1));
    state.store(width - 1, 0);
  }
  barrier.wait();

  // Down-sweep
  let mut d = 1;
  while d < width {
    offset >>= 1;
    for lane in lanes(worker, workers, d) {
      let left = offset * (2 * lane + 1) - 1;
      let right = offset * (2 * lane + 2) - 1;
      let temp = state.load(left);
      let carried = state.load(right);
      state.store(left, carried);
      state.store(right, carried + temp);
    }
    d <<= 1;
    barrier.wait();
  }

  for lane in lanes(worker, workers, bindings.len) {
    bindings.output.store_u32(lane, state.load(lane));
  }
}

#[cfg(test)]
#[path = "prefix_sum_test.rs"]
mod prefix_sum_test;
