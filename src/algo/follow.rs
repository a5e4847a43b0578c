//! Grid propagation outward from the rectified target face.
//!
//! A breadth-first walk over the island crosses each shared manifold,
//! non-seam edge exactly once. Crossing an edge copies the shared UV pair
//! onto the neighbor and extrapolates its far corners from the source
//! face, so the rectangle grows into a full grid one ring at a time.

use std::mem;

use nalgebra::Point2;

use crate::mesh::{EdgeId, FaceId, LoopId, UvMesh};

/// How far corners are placed when a face is unwrapped from its neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtendMode {
    /// Scale each step by the average 3-D length of its edge loop relative
    /// to the loop it extends from. Preserves the mesh's proportions.
    LengthAverage,
    /// Every step is the same size as the one before it. Produces uniform
    /// cells regardless of 3-D proportions.
    Even,
}

/// Unwrap every face of `island` from `target`, which must already hold
/// its final UVs.
pub fn follow_active_uv(mesh: &mut UvMesh, target: FaceId, island: &[FaceId], mode: ExtendMode) {
    let edge_lengths = match mode {
        ExtendMode::LengthAverage => Some(average_edge_lengths(mesh, island)),
        ExtendMode::Even => None,
    };

    // Faces outside the island stay tagged so the walk never leaves it
    let mut visited = vec![true; mesh.num_faces()];
    for &f in island {
        visited[f.index()] = false;
    }
    visited[target.index()] = true;

    let mut frontier_a = vec![target];
    let mut frontier_b = Vec::new();

    while !frontier_a.is_empty() {
        for &f in &frontier_a {
            for l in mesh.face(f).loops.clone() {
                let e = mesh.uv_loop(l).edge;
                if !mesh.edge(e).is_manifold() || mesh.edge(e).seam {
                    continue;
                }
                let l_other = mesh.radial_next(l);
                let f_other = mesh.uv_loop(l_other).face;
                if !visited[f_other.index()] {
                    apply_uv(mesh, l, edge_lengths.as_deref());
                    visited[f_other.index()] = true;
                    frontier_b.push(f_other);
                }
            }
        }
        mem::swap(&mut frontier_a, &mut frontier_b);
        frontier_b.clear();
    }
}

/// Copy the shared edge's UVs across `l_prev`'s edge and extrapolate the
/// neighbor's far corners.
fn apply_uv(mesh: &mut UvMesh, l_prev: LoopId, edge_lengths: Option<&[Option<f64>]>) {
    let mut l_a = [LoopId::invalid(); 4];
    l_a[0] = l_prev;
    l_a[1] = mesh.next(l_a[0]);
    l_a[2] = mesh.next(l_a[1]);
    l_a[3] = mesh.next(l_a[2]);

    // The neighbor's loop runs the opposite way when the windings agree
    let l_next = mesh.radial_next(l_prev);
    let mut l_b = [LoopId::invalid(); 4];
    if mesh.uv_loop(l_next).vert != mesh.uv_loop(l_prev).vert {
        l_b[1] = l_next;
        l_b[0] = mesh.next(l_b[1]);
        l_b[3] = mesh.next(l_b[0]);
        l_b[2] = mesh.next(l_b[3]);
    } else {
        l_b[0] = l_next;
        l_b[1] = mesh.next(l_b[0]);
        l_b[2] = mesh.next(l_b[1]);
        l_b[3] = mesh.next(l_b[2]);
    }

    let fac = match edge_lengths {
        Some(lens) => {
            let num = lens[mesh.uv_loop(l_b[2]).edge.index()];
            let den = lens[mesh.uv_loop(l_a[1]).edge.index()];
            match (num, den) {
                (Some(n), Some(d)) if d != 0.0 => n / d,
                _ => 1.0,
            }
        }
        None => 1.0,
    };

    let a: Vec<Point2<f64>> = l_a.iter().map(|&l| mesh.uv(l)).collect();
    mesh.set_uv(l_b[0], a[0]);
    mesh.set_uv(l_b[3], a[0] + (a[0] - a[3]) * fac);
    mesh.set_uv(l_b[1], a[1]);
    mesh.set_uv(l_b[2], a[1] + (a[1] - a[2]) * fac);
}

/// Average 3-D edge length per edge loop, indexed by edge.
///
/// Each island quad contributes its two pairs of opposite edges; every
/// edge in a loop receives the loop's average, so the factor between two
/// parallel loops is stable along their whole run.
fn average_edge_lengths(mesh: &UvMesh, island: &[FaceId]) -> Vec<Option<f64>> {
    let mut lengths: Vec<Option<f64>> = vec![None; mesh.num_edges()];

    for &f in island {
        let q = mesh.face(f).loops.clone();
        for pair in [[q[0], q[2]], [q[1], q[3]]] {
            if lengths[mesh.uv_loop(pair[0]).edge.index()].is_some() {
                continue;
            }
            let mut group: Vec<EdgeId> = Vec::new();
            let mut accum = 0.0;
            for &l in &pair {
                if lengths[mesh.uv_loop(l).edge.index()].is_some() {
                    continue;
                }
                for e in walk_edge_loop(mesh, l) {
                    if lengths[e.index()].is_none() && !group.contains(&e) {
                        accum += mesh.edge(e).length;
                        group.push(e);
                    }
                }
            }
            let avg = accum / group.len() as f64;
            for e in group {
                lengths[e.index()] = Some(avg);
            }
        }
    }
    lengths
}

/// Edges of the loop through `start`'s edge, crossing manifold quads until
/// the run closes on itself or hits a boundary or non-quad.
fn walk_edge_loop(mesh: &UvMesh, start: LoopId) -> Vec<EdgeId> {
    let e_first = mesh.uv_loop(start).edge;
    let mut l = start;
    let mut out = Vec::new();
    loop {
        let e = mesh.uv_loop(l).edge;
        out.push(e);
        if !mesh.edge(e).is_manifold() {
            break;
        }
        l = mesh.radial_next(l);
        if !mesh.face(mesh.uv_loop(l).face).is_quad() {
            break;
        }
        l = mesh.next(mesh.next(l));
        if mesh.uv_loop(l).edge == e_first {
            break;
        }
    }
    out
}
