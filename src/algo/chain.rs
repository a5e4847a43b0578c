//! Distance-preserving chain alignment.
//!
//! Selected loops are merged into chain vertices by exact UV equality and
//! connected through their face neighbors. Each connected chain is laid
//! out straight along its dominant axis, centered on the chain's midpoint,
//! with the original consecutive 2-D distances kept intact.
//!
//! Chain order comes from a double breadth-first search: the farthest
//! vertex from an arbitrary seed is one end of the chain, and a second
//! search from that end visits vertices in distance order. Duplicate
//! distances mean the selection branches or loops, which is an error; it
//! is raised before any UV moves.

use std::collections::{HashMap, VecDeque};

use nalgebra::Point2;

use crate::error::{Result, UvError};
use crate::mesh::{LoopId, UvMesh};

/// Loops sharing one exact UV coordinate, acting as a single chain vertex.
struct ChainVertex {
    uv: Point2<f64>,
    loops: Vec<LoopId>,
    neighbors: Vec<usize>,
}

/// Straighten every selected chain, preserving consecutive distances.
///
/// Returns `Ok(false)` when nothing is selected. Fails with
/// [`UvError::NonLinearChain`] when any chain branches or closes into a
/// loop, in which case no UV is touched.
pub fn snap_preserving_distance(mesh: &mut UvMesh) -> Result<bool> {
    let vertices = collect_vertices(mesh);
    if vertices.is_empty() {
        return Ok(false);
    }

    // All chains are ordered before the first write
    let chains = sort_chains(&vertices)?;

    for chain in chains {
        let coords: Vec<Point2<f64>> = chain.iter().map(|&v| vertices[v].uv).collect();
        let min = coords.iter().fold(coords[0], |m, c| {
            Point2::new(m.x.min(c.x), m.y.min(c.y))
        });
        let max = coords.iter().fold(coords[0], |m, c| {
            Point2::new(m.x.max(c.x), m.y.max(c.y))
        });
        let mid = nalgebra::center(&min, &max);
        let ranges = max - min;

        // Ties put both the constant axis and the travel axis on X,
        // matching argmin/argmax over [x, y]
        let alignment_axis = if ranges.x <= ranges.y { 0 } else { 1 };
        let travel_axis = if ranges.x >= ranges.y { 0 } else { 1 };

        let distances: Vec<f64> = coords
            .windows(2)
            .map(|w| (w[0] - w[1]).norm())
            .collect();
        let total: f64 = distances.iter().sum();

        let mut start = mid;
        start[1 - alignment_axis] -= total / 2.0;

        let mut travelled = 0.0;
        for (i, &v) in chain.iter().enumerate() {
            let mut pos = start;
            if i > 0 {
                travelled += distances[i - 1];
                pos[travel_axis] += travelled;
            }
            for &l in &vertices[v].loops {
                mesh.set_uv(l, pos);
            }
        }
    }
    Ok(true)
}

/// Merge selected loops of selected faces into chain vertices and wire up
/// neighbor links through each loop's face predecessor and successor.
fn collect_vertices(mesh: &UvMesh) -> Vec<ChainVertex> {
    let mut by_coord: HashMap<(u64, u64), usize> = HashMap::new();
    let mut vertices: Vec<ChainVertex> = Vec::new();
    let mut loop_vertex: HashMap<LoopId, usize> = HashMap::new();

    for f in mesh.face_ids() {
        if !mesh.face(f).select {
            continue;
        }
        for &l in &mesh.face(f).loops {
            if !mesh.uv_loop(l).select {
                continue;
            }
            let uv = mesh.uv(l);
            let key = (uv.x.to_bits(), uv.y.to_bits());
            let idx = *by_coord.entry(key).or_insert_with(|| {
                vertices.push(ChainVertex {
                    uv,
                    loops: Vec::new(),
                    neighbors: Vec::new(),
                });
                vertices.len() - 1
            });
            vertices[idx].loops.push(l);
            loop_vertex.insert(l, idx);
        }
    }

    for idx in 0..vertices.len() {
        let mut neighbors = Vec::new();
        for &l in &vertices[idx].loops {
            for n in [mesh.prev(l), mesh.next(l)] {
                if let Some(&nv) = loop_vertex.get(&n) {
                    if nv != idx && !neighbors.contains(&nv) {
                        neighbors.push(nv);
                    }
                }
            }
        }
        vertices[idx].neighbors = neighbors;
    }
    vertices
}

/// Order every connected chain end to end via double BFS.
fn sort_chains(vertices: &[ChainVertex]) -> Result<Vec<Vec<usize>>> {
    let mut assigned = vec![false; vertices.len()];
    let mut chains = Vec::new();

    for seed in 0..vertices.len() {
        if assigned[seed] {
            continue;
        }
        let first_pass = bfs(vertices, seed);
        // First vertex holding the maximum distance is one chain end
        let mut farthest = (seed, 0usize);
        for &(v, d) in &first_pass {
            if d > farthest.1 {
                farthest = (v, d);
            }
        }
        let farthest = farthest.0;

        let ordered = bfs(vertices, farthest);
        let mut dists: Vec<usize> = ordered.iter().map(|&(_, d)| d).collect();
        dists.dedup();
        if dists.len() < ordered.len() {
            return Err(UvError::NonLinearChain {
                count: ordered.len(),
            });
        }

        let chain: Vec<usize> = ordered.into_iter().map(|(v, _)| v).collect();
        for &v in &chain {
            assigned[v] = true;
        }
        chains.push(chain);
    }
    Ok(chains)
}

/// Breadth-first traversal yielding (vertex, hop distance) in visit order.
fn bfs(vertices: &[ChainVertex], start: usize) -> Vec<(usize, usize)> {
    let mut seen = vec![false; vertices.len()];
    let mut out = Vec::new();
    let mut q = VecDeque::new();
    q.push_back((start, 0));
    seen[start] = true;
    while let Some((v, d)) = q.pop_front() {
        out.push((v, d));
        for &n in &vertices[v].neighbors {
            if !seen[n] {
                seen[n] = true;
                q.push_back((n, d + 1));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use nalgebra::Point3;

    use super::*;
    use crate::mesh::UvMeshBuilder;

    /// Strip of quads whose bottom edge forms the chain under test.
    fn chain_mesh(points: &[(f64, f64)]) -> UvMesh {
        let mut b = UvMeshBuilder::new();
        let n = points.len();
        for &(x, y) in points {
            b.vertex(Point3::new(x, y, 0.0));
        }
        for &(x, y) in points {
            b.vertex(Point3::new(x, y + 1.0, 0.0));
        }
        for i in 0..n - 1 {
            b.face(
                &[i, i + 1, n + i + 1, n + i],
                &[
                    Point2::new(points[i].0, points[i].1),
                    Point2::new(points[i + 1].0, points[i + 1].1),
                    Point2::new(points[i + 1].0, points[i + 1].1 + 1.0),
                    Point2::new(points[i].0, points[i].1 + 1.0),
                ],
            );
            // Only the bottom edge's loops stay selected
            b.select_loop(i, 2, false);
            b.select_loop(i, 3, false);
        }
        b.build().unwrap()
    }

    #[test]
    fn test_zigzag_straightens() {
        let mut mesh = chain_mesh(&[(0.0, 0.0), (0.3, 0.1), (0.6, 0.0), (0.9, 0.1)]);
        let changed = snap_preserving_distance(&mut mesh).unwrap();
        assert!(changed);

        // All selected loops share one Y afterwards
        let ys: Vec<f64> = mesh.selected_loops().map(|l| mesh.uv(l).y).collect();
        for y in &ys {
            assert!((y - ys[0]).abs() < 1e-12);
        }
        // Consecutive spacing equals the original 2-D distances
        let step = (0.3f64.powi(2) + 0.1f64.powi(2)).sqrt();
        let mut xs: Vec<f64> = mesh.selected_loops().map(|l| mesh.uv(l).x).collect();
        xs.sort_by(f64::total_cmp);
        xs.dedup_by(|a, b| (*a - *b).abs() < 1e-12);
        assert_eq!(xs.len(), 4);
        for w in xs.windows(2) {
            assert!((w[1] - w[0] - step).abs() < 1e-12);
        }
    }

    #[test]
    fn test_chain_is_centered() {
        let mut mesh = chain_mesh(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        snap_preserving_distance(&mut mesh).unwrap();

        let mut xs: Vec<f64> = mesh.selected_loops().map(|l| mesh.uv(l).x).collect();
        xs.sort_by(f64::total_cmp);
        xs.dedup_by(|a, b| (*a - *b).abs() < 1e-12);
        // Midpoint stays at x = 1, total length 2 spreads around it
        assert!((xs[0] - 0.0).abs() < 1e-12);
        assert!((xs[2] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_branching_selection_fails_before_mutation() {
        // Plus-shaped selection: center vertex has three neighbors
        let mut b = UvMeshBuilder::new();
        for (x, y) in [
            (0.0, 0.0),
            (1.0, 0.0),
            (2.0, 0.0),
            (0.0, 1.0),
            (1.0, 1.0),
            (2.0, 1.0),
            (1.0, 2.0),
        ] {
            b.vertex(Point3::new(x, y, 0.0));
        }
        let uv = |x: f64, y: f64| Point2::new(x, y);
        b.face(&[0, 1, 4, 3], &[uv(0.0, 0.0), uv(1.0, 0.0), uv(1.0, 1.0), uv(0.0, 1.0)]);
        b.face(&[1, 2, 5, 4], &[uv(1.0, 0.0), uv(2.0, 0.0), uv(2.0, 1.0), uv(1.0, 1.0)]);
        // Deselect the top corners of the first face only, keeping a T of
        // selected loops through the shared corner
        b.select_loop(0, 3, false);
        b.select_loop(1, 2, false);
        let mut mesh = b.build().unwrap();

        let before: Vec<Point2<f64>> = mesh.loop_ids().map(|l| mesh.uv(l)).collect();
        let err = snap_preserving_distance(&mut mesh).unwrap_err();
        assert!(matches!(err, UvError::NonLinearChain { .. }));
        let after: Vec<Point2<f64>> = mesh.loop_ids().map(|l| mesh.uv(l)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_empty_selection() {
        let mut b = UvMeshBuilder::new();
        for (x, y) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
            b.vertex(Point3::new(x, y, 0.0));
        }
        b.face(
            &[0, 1, 2, 3],
            &[
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(1.0, 1.0),
                Point2::new(0.0, 1.0),
            ],
        );
        for i in 0..4 {
            b.select_loop(0, i, false);
        }
        let mut mesh = b.build().unwrap();
        assert!(!snap_preserving_distance(&mut mesh).unwrap());
    }
}
