//! Wavefront OBJ export

use nether_radial::GeometryBuffer;
use std::io::{self, Write};

/// Write one buffer as a single OBJ object
///
/// Faces reference position, texcoord and normal with the same 1-based index.
pub fn write_obj(name: &str, buffer: &GeometryBuffer, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "o {}", name)?;
    for p in buffer.positions() {
        writeln!(out, "v {} {} {}", p.x, p.y, p.z)?;
    }
    for uv in buffer.uvs() {
        writeln!(out, "vt {} {}", uv.x, uv.y)?;
    }
    for n in buffer.normals() {
        writeln!(out, "vn {} {} {}", n.x, n.y, n.z)?;
    }
    for tri in buffer.indices().chunks_exact(3) {
        let [a, b, c] = [tri[0] + 1, tri[1] + 1, tri[2] + 1];
        writeln!(out, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
    }
    Ok(())
}
