//! Wavefront OBJ output.
//!
//! Vertices are written as `v x y z` followed by one `vn` per vertex, quads
//! as `f a//a b//b c//c d//d` with 1-based indices, in the winding produced
//! by the pipeline.

use std::io::{self, Write};

/// Write positions, per-vertex normals and quads as an OBJ document.
pub fn write_obj<W: Write>(
	out: &mut W,
	positions: &[[f32; 3]],
	normals: &[[f32; 3]],
	quads: &[[u32; 4]],
) -> io::Result<()> {
	if normals.len() != positions.len() {
		return Err(io::Error::new(
			io::ErrorKind::InvalidInput,
			format!("{} normals for {} vertices", normals.len(), positions.len()),
		));
	}

	writeln!(out, "# sculpt: {} vertices, {} quads", positions.len(), quads.len())?;
	for [x, y, z] in positions {
		writeln!(out, "v {} {} {}", x, y, z)?;
	}
	for [x, y, z] in normals {
		writeln!(out, "vn {} {} {}", x, y, z)?;
	}
	for quad in quads {
		let [a, b, c, d] = quad.map(|i| i + 1);
		writeln!(out, "f {a}//{a} {b}//{b} {c}//{c} {d}//{d}")?;
	}
	out.flush()
}
