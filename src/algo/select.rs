//! Selection gathering.
//!
//! The first stage of every grid operation walks the selected faces once
//! and buckets their loops: fully selected quads become grid candidates,
//! fully selected non-quads are remembered so they can be dropped from the
//! selection, and everything else contributes boundary loops that get
//! re-attached after the grid moves.

use crate::coord::CoordIndex;
use crate::mesh::{quasi_equal, FaceId, LoopId, UvMesh};

/// Loops and faces gathered from the current selection.
#[derive(Debug)]
pub struct Selection {
    /// Selected loops that sit on the edge of the working set: loops of
    /// partially selected faces, plus loops of fully selected non-quads.
    pub boundary: Vec<LoopId>,
    /// [`Selection::boundary`] with quasi-coincident UVs deduplicated,
    /// or the raw boundary when grid faces exist.
    pub filtered: Vec<LoopId>,
    /// Fully selected quads, the raw material for grid reshaping.
    pub grid_faces: Vec<FaceId>,
    /// Fully selected faces with a vertex count other than four.
    pub non_quad_faces: Vec<FaceId>,
    /// Coordinate index over the grid faces' loops, used to propagate
    /// writes to coincident loops.
    pub index: CoordIndex,
    /// True when no partially selected face contributed a boundary loop.
    pub no_boundary: bool,
}

impl Selection {
    /// Walk the selected faces and bucket their loops.
    pub fn gather(mesh: &UvMesh) -> Self {
        let mut boundary = Vec::new();
        let mut grid_faces = Vec::new();
        let mut non_quad_faces = Vec::new();
        let mut index = CoordIndex::new();

        for f in mesh.face_ids() {
            if !mesh.face(f).select {
                continue;
            }
            let loops = mesh.face(f).loops.clone();
            let selected: Vec<LoopId> =
                loops.iter().copied().filter(|&l| mesh.uv_loop(l).select).collect();
            if selected.len() == loops.len() {
                if mesh.face(f).is_quad() {
                    grid_faces.push(f);
                    for l in loops {
                        index.insert(&mesh.uv(l), l);
                    }
                } else {
                    non_quad_faces.push(f);
                    boundary.extend(loops);
                }
            } else {
                boundary.extend(selected);
            }
        }

        let no_boundary = boundary.is_empty();
        if no_boundary {
            for f in mesh.face_ids() {
                if !mesh.face(f).select {
                    continue;
                }
                for &l in &mesh.face(f).loops {
                    if mesh.uv_loop(l).select {
                        boundary.push(l);
                    }
                }
            }
        }

        let filtered = if grid_faces.is_empty() {
            dedup_quasi(mesh, &boundary)
        } else {
            boundary.clone()
        };

        Selection {
            boundary,
            filtered,
            grid_faces,
            non_quad_faces,
            index,
            no_boundary,
        }
    }
}

/// Collapse loops whose UVs quasi-coincide, keeping the first of each run.
fn dedup_quasi(mesh: &UvMesh, loops: &[LoopId]) -> Vec<LoopId> {
    let mut out: Vec<LoopId> = Vec::new();
    for &l in loops {
        let uv = mesh.uv(l);
        let seen = out.iter().any(|&o| quasi_equal(&uv, &mesh.uv(o)));
        if !seen {
            out.push(l);
        }
    }
    out
}

/// Index every selected loop across the whole mesh, ignoring face
/// selection. Line operations act on loops, not faces.
pub fn line_index(mesh: &UvMesh) -> CoordIndex {
    let mut index = CoordIndex::new();
    for l in mesh.loop_ids() {
        if mesh.uv_loop(l).select {
            index.insert(&mesh.uv(l), l);
        }
    }
    index
}
