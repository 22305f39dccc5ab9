use super::*;

const WALKTHROUGH_VALID: [u32; 6] = [1, 0, 1, 1, 0, 1];
const WALKTHROUGH_INDICES: [u32; 6] = [0, 0, 1, 2, 2, 3];

#[test]
fn test_vertex_walkthrough() {
  let sparse: Vec<f32> = [
    [1.0, 2.0, 3.0],
    [0.0, 0.0, 0.0],
    [4.0, 5.0, 6.0],
    [7.0, 8.0, 9.0],
    [0.0, 0.0, 0.0],
    [10.0, 11.0, 12.0],
  ]
  .concat();

  let source = StorageBuffer::from_f32("vertices", &sparse);
  let valid = StorageBuffer::from_u32("vertex_valid", &WALKTHROUGH_VALID);
  let indices = StorageBuffer::from_u32("vertex_indices", &WALKTHROUGH_INDICES);
  let destination = StorageBuffer::zeroed("compacted_vertices", sparse.len());

  dispatch_vertices(&CompactBindings {
    source: &source,
    valid: &valid,
    indices: &indices,
    destination: &destination,
    len: 6,
  });

  assert_eq!(
    destination.read_f32(12),
    vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0]
  );
  // Nothing past the valid count is touched
  assert!(destination.read_f32(18)[12..].iter().all(|&v| v == 0.0));
}

#[test]
fn test_face_walkthrough() {
  // Invalid slots hold garbage that must not leak through
  let sparse: Vec<u32> = [
    [0, 1, 2, 3],
    [99, 99, 99, 99],
    [4, 5, 6, 7],
    [8, 9, 10, 11],
    [77, 77, 77, 77],
    [12, 13, 14, 15],
  ]
  .concat();

  let source = StorageBuffer::from_u32("faces", &sparse);
  let valid = StorageBuffer::from_u32("face_valid", &WALKTHROUGH_VALID);
  let indices = StorageBuffer::from_u32("face_indices", &WALKTHROUGH_INDICES);
  let destination = StorageBuffer::zeroed("compacted_faces", sparse.len());

  dispatch_faces(&CompactBindings {
    source: &source,
    valid: &valid,
    indices: &indices,
    destination: &destination,
    len: 6,
  });

  assert_eq!(destination.read_u32(16), (0..16).collect::<Vec<u32>>());
  assert!(destination.read_u32(24)[16..].iter().all(|&v| v == 0));
}

#[test]
fn test_out_of_range_ids_are_ignored() {
  let source = StorageBuffer::from_u32("faces", &[1, 2, 3, 4]);
  let valid = StorageBuffer::from_u32("face_valid", &[1]);
  let indices = StorageBuffer::from_u32("face_indices", &[0]);
  let destination = StorageBuffer::zeroed("compacted_faces", 4);
  let bindings = CompactBindings {
    source: &source,
    valid: &valid,
    indices: &indices,
    destination: &destination,
    len: 1,
  };

  // A whole 1D workgroup covers ids 0..256; only id 0 is in range
  for id in 1..300 {
    compact_faces(id, &bindings);
  }
  assert_eq!(destination.read_u32(4), vec![0u32; 4]);

  compact_faces(0, &bindings);
  assert_eq!(destination.read_u32(4), vec![1, 2, 3, 4]);
}

#[test]
fn test_order_is_preserved_across_workgroups() {
  // Every third slot valid over several 1D workgroups
  let len = 1000;
  let valid_flags: Vec<u32> = (0..len).map(|i| u32::from(i % 3 == 0)).collect();
  let mut running = 0;
  let scan: Vec<u32> = valid_flags
    .iter()
    .map(|&f| {
      let i = running;
      running += f;
      i
    })
    .collect();
  let sparse: Vec<f32> = (0..len * 3).map(|i| i as f32).collect();

  let source = StorageBuffer::from_f32("vertices", &sparse);
  let valid = StorageBuffer::from_u32("vertex_valid", &valid_flags);
  let indices = StorageBuffer::from_u32("vertex_indices", &scan);
  let destination = StorageBuffer::zeroed("compacted_vertices", sparse.len());

  dispatch_vertices(&CompactBindings {
    source: &source,
    valid: &valid,
    indices: &indices,
    destination: &destination,
    len,
  });

  let dense = destination.read_f32(running as usize * 3);
  let expected: Vec<f32> = (0..len)
    .filter(|i| i % 3 == 0)
    .flat_map(|i| [(i * 3) as f32, (i * 3 + 1) as f32, (i * 3 + 2) as f32])
    .collect();
  assert_eq!(dense, expected);
}
