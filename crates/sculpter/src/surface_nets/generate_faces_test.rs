use super::*;

struct Faces {
  faces: StorageBuffer,
  face_valid: StorageBuffer,
}

/// Run the kernel over `size` with the given cells marked valid.
fn run(size: DensityFieldSize, valid_cells: &[UVec3], prefill_valid: u32) -> (Faces, Vec<u32>) {
  let slots = size.density_count();
  let mut flags = vec![0u32; slots];
  for p in valid_cells {
    flags[size.index(p.x, p.y, p.z)] = 1;
  }
  let mut running = 0;
  let indices: Vec<u32> = flags
    .iter()
    .map(|&f| {
      let i = running;
      running += f;
      i
    })
    .collect();

  let vertex_valid = StorageBuffer::from_u32("vertex_valid", &flags);
  let vertex_indices = StorageBuffer::from_u32("vertex_indices", &indices);
  let out = Faces {
    faces: StorageBuffer::zeroed("faces", slots * FACE_SLOTS_PER_CELL * QUAD_STRIDE),
    face_valid: StorageBuffer::from_u32(
      "face_valid",
      &vec![prefill_valid; slots * FACE_SLOTS_PER_CELL],
    ),
  };

  dispatch(&GenerateFacesBindings {
    vertex_valid: &vertex_valid,
    vertex_indices: &vertex_indices,
    faces: &out.faces,
    face_valid: &out.face_valid,
    dimensions: size,
  });

  (out, indices)
}

fn all_cells(size: DensityFieldSize) -> Vec<UVec3> {
  (0..size.density_count())
    .map(|i| size.coord(i))
    .filter(|&p| size.is_cell(p))
    .collect()
}

fn quad(out: &Faces, slot: usize) -> [u32; 4] {
  std::array::from_fn(|k| out.faces.load_u32(slot * QUAD_STRIDE + k))
}

#[test]
fn test_face_planes_are_distinct_axis_pairs() {
  for (a, b) in FACE_PLANES {
    assert!(a < b && b < 3);
  }
  assert_eq!(quad_cells(UVec3::ZERO, 0)[2], UVec3::new(1, 1, 0));
  assert_eq!(quad_cells(UVec3::ZERO, 1)[2], UVec3::new(1, 0, 1));
  assert_eq!(quad_cells(UVec3::ZERO, 2)[2], UVec3::new(0, 1, 1));
}

#[test]
fn test_two_by_two_block_emits_six_faces() {
  let size = DensityFieldSize::new(3, 3, 3);
  let (out, _) = run(size, &all_cells(size), 0);

  let emitted: Vec<usize> = (0..size.density_count() * 3)
    .filter(|&s| out.face_valid.load_u32(s) == 1)
    .collect();

  let slot = |x, y, z, plane| size.index(x, y, z) * 3 + plane;
  let mut expected = vec![
    slot(0, 0, 0, 0),
    slot(0, 0, 0, 1),
    slot(0, 0, 0, 2),
    slot(0, 0, 1, 0),
    slot(0, 1, 0, 1),
    slot(1, 0, 0, 2),
  ];
  expected.sort_unstable();
  assert_eq!(emitted, expected);
}

#[test]
fn test_winding_uses_compacted_indices() {
  let size = DensityFieldSize::new(3, 3, 3);
  let (out, indices) = run(size, &all_cells(size), 0);
  let at = |x, y, z| indices[size.index(x, y, z)];

  // XY: cell, +X, +X+Y, +Y
  assert_eq!(
    quad(&out, 0),
    [at(0, 0, 0), at(1, 0, 0), at(1, 1, 0), at(0, 1, 0)]
  );
  // XZ: cell, +X, +X+Z, +Z
  assert_eq!(
    quad(&out, 1),
    [at(0, 0, 0), at(1, 0, 0), at(1, 0, 1), at(0, 0, 1)]
  );
  // YZ: cell, +Y, +Y+Z, +Z
  assert_eq!(
    quad(&out, 2),
    [at(0, 0, 0), at(0, 1, 0), at(0, 1, 1), at(0, 0, 1)]
  );
  // Compacted indices are dense: 8 valid cells -> 0..8
  let mut used: Vec<u32> = (0..3).flat_map(|s| quad(&out, s)).collect();
  used.sort_unstable();
  used.dedup();
  assert!(used.iter().all(|&i| i < 8));
}

#[test]
fn test_missing_neighbour_suppresses_only_its_planes() {
  let size = DensityFieldSize::new(3, 3, 3);
  let cells: Vec<UVec3> = all_cells(size)
    .into_iter()
    .filter(|&p| p != UVec3::new(1, 1, 0))
    .collect();

  let (out, _) = run(size, &cells, 0);

  // (1,1,0) is the +X+Y corner of the XY quad only
  assert_eq!(out.face_valid.load_u32(0), 0);
  assert_eq!(out.face_valid.load_u32(1), 1);
  assert_eq!(out.face_valid.load_u32(2), 1);
}

#[test]
fn test_invalid_cells_clear_stale_slots() {
  let size = DensityFieldSize::new(4, 3, 3);
  let (out, _) = run(size, &[], 1);

  for i in 0..size.density_count() {
    let expected = if size.is_cell(size.coord(i)) { 0 } else { 1 };
    for plane in 0..3 {
      assert_eq!(out.face_valid.load_u32(i * 3 + plane), expected, "slot {}", i);
    }
  }
}

#[test]
fn test_boundary_cells_emit_nothing_past_the_edge() {
  let size = DensityFieldSize::new(5, 4, 3);
  let (out, _) = run(size, &all_cells(size), 0);

  for i in 0..size.density_count() {
    let p = size.coord(i);
    if !size.is_cell(p) {
      continue;
    }
    for plane in 0..3 {
      let far = quad_cells(p, plane)[2];
      assert_eq!(
        out.face_valid.load_u32(i * 3 + plane),
        u32::from(size.is_cell(far)),
        "cell {:?} plane {}",
        p,
        plane
      );
    }
  }
}
