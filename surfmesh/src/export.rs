//! Wavefront OBJ export
//!
//! Meshes are non-indexed, so vertex `k` of the mesh becomes `v`/`vt`/`vn`
//! entry `k + 1` and faces reference them sequentially. Vertex colors, when
//! present, use the common `v x y z r g b` extension.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::ExportError;
use crate::mesh::MeshBuffer;

/// Write `mesh` as an OBJ object named `name`
pub fn write_obj<W: Write>(mesh: &MeshBuffer, out: &mut W, name: &str) -> Result<(), ExportError> {
    if mesh.vertex_count() > 0 && mesh.positions().is_empty() {
        return Err(ExportError::MissingPositions);
    }

    let has_uv = !mesh.tex_coords().is_empty();
    let has_normal = !mesh.normals().is_empty();

    writeln!(out, "# surfmesh export")?;
    writeln!(
        out,
        "# {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    )?;
    writeln!(out, "o {}", name)?;

    for i in 0..mesh.vertex_count() {
        let Some(p) = mesh.position(i) else { break };
        match mesh.color(i) {
            Some(c) => writeln!(out, "v {} {} {} {} {} {}", p.x, p.y, p.z, c.x, c.y, c.z)?,
            None => writeln!(out, "v {} {} {}", p.x, p.y, p.z)?,
        }
    }

    if has_uv {
        for i in 0..mesh.vertex_count() {
            if let Some(uv) = mesh.tex_coord(i) {
                writeln!(out, "vt {} {}", uv.x, uv.y)?;
            }
        }
    }

    if has_normal {
        for i in 0..mesh.vertex_count() {
            if let Some(n) = mesh.normal(i) {
                writeln!(out, "vn {} {} {}", n.x, n.y, n.z)?;
            }
        }
    }

    for tri in 0..mesh.triangle_count() {
        let [a, b, c] = [tri * 3 + 1, tri * 3 + 2, tri * 3 + 3];
        match (has_uv, has_normal) {
            (true, true) => writeln!(out, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?,
            (true, false) => writeln!(out, "f {a}/{a} {b}/{b} {c}/{c}")?,
            (false, true) => writeln!(out, "f {a}//{a} {b}//{b} {c}//{c}")?,
            (false, false) => writeln!(out, "f {a} {b} {c}")?,
        }
    }

    Ok(())
}

/// Write `mesh` to an OBJ file at `path`
pub fn write_obj_file(mesh: &MeshBuffer, path: &Path, name: &str) -> Result<(), ExportError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_obj(mesh, &mut writer, name)?;
    writer.flush()?;

    info!(
        "Exported '{}' to {} ({} triangles)",
        name,
        path.display(),
        mesh.triangle_count()
    );
    Ok(())
}
