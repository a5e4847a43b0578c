//! Island discovery over grid faces.
//!
//! Two grid faces belong to the same island when they share a non-seam
//! edge. Discovery is a breadth-first flood fill seeded from each
//! unassigned face; islands come out in face order, faces within an island
//! in visit order.

use std::collections::{HashSet, VecDeque};

use crate::mesh::{FaceId, UvMesh};

/// Partition the grid faces into connected islands.
pub fn discover(mesh: &UvMesh, grid_faces: &[FaceId]) -> Vec<Vec<FaceId>> {
    let in_grid: HashSet<FaceId> = grid_faces.iter().copied().collect();
    let mut assigned: HashSet<FaceId> = HashSet::new();
    let mut islands = Vec::new();

    for &seed in grid_faces {
        if assigned.contains(&seed) {
            continue;
        }
        let mut island = Vec::new();
        let mut frontier = VecDeque::new();
        frontier.push_back(seed);
        assigned.insert(seed);

        while let Some(f) = frontier.pop_front() {
            island.push(f);
            for &l in &mesh.face(f).loops {
                let e = mesh.uv_loop(l).edge;
                if mesh.edge(e).seam {
                    continue;
                }
                for &rl in &mesh.edge(e).loops {
                    let nf = mesh.uv_loop(rl).face;
                    if nf != f && in_grid.contains(&nf) && assigned.insert(nf) {
                        frontier.push_back(nf);
                    }
                }
            }
        }
        islands.push(island);
    }
    islands
}

/// Pick the face the grid is rebuilt around.
///
/// The mesh's active face wins only when there is a single island and the
/// active face is a selected quad inside it. Otherwise each island starts
/// from its first face.
pub fn elect_target(mesh: &UvMesh, island: &[FaceId], island_count: usize) -> FaceId {
    if island_count == 1 {
        if let Some(active) = mesh.active_face() {
            let f = mesh.face(active);
            if f.select && f.is_quad() && island.contains(&active) {
                return active;
            }
        }
    }
    island[0]
}

#[cfg(test)]
mod tests {
    use nalgebra::{Point2, Point3};

    use super::*;
    use crate::mesh::UvMeshBuilder;

    fn strip(n: usize) -> UvMeshBuilder {
        let mut b = UvMeshBuilder::new();
        for i in 0..=n {
            b.vertex(Point3::new(i as f64, 0.0, 0.0));
            b.vertex(Point3::new(i as f64, 1.0, 0.0));
        }
        for i in 0..n {
            let (a, c) = (2 * i, 2 * (i + 1));
            b.face(
                &[a, c, c + 1, a + 1],
                &[
                    Point2::new(i as f64, 0.0),
                    Point2::new(i as f64 + 1.0, 0.0),
                    Point2::new(i as f64 + 1.0, 1.0),
                    Point2::new(i as f64, 1.0),
                ],
            );
        }
        b
    }

    #[test]
    fn test_single_island() {
        let mesh = strip(3).build().unwrap();
        let faces: Vec<FaceId> = mesh.face_ids().collect();
        let islands = discover(&mesh, &faces);
        assert_eq!(islands.len(), 1);
        assert_eq!(islands[0].len(), 3);
    }

    #[test]
    fn test_seam_splits_island() {
        let mut b = strip(3);
        // Seam down the edge between the second and third face
        b.mark_seam(4, 5);
        let mesh = b.build().unwrap();
        let faces: Vec<FaceId> = mesh.face_ids().collect();
        let islands = discover(&mesh, &faces);
        assert_eq!(islands.len(), 2);
        assert_eq!(islands[0].len(), 2);
        assert_eq!(islands[1].len(), 1);
    }

    #[test]
    fn test_elect_active_face() {
        let mut b = strip(3);
        b.active_face(1);
        let mesh = b.build().unwrap();
        let faces: Vec<FaceId> = mesh.face_ids().collect();
        assert_eq!(elect_target(&mesh, &faces, 1), FaceId::new(1));
    }

    #[test]
    fn test_elect_falls_back_with_many_islands() {
        let mut b = strip(3);
        b.active_face(2);
        b.mark_seam(4, 5);
        let mesh = b.build().unwrap();
        let islands = discover(&mesh, &mesh.face_ids().collect::<Vec<_>>());
        // Active face sits in the second island but loses the election
        assert_eq!(elect_target(&mesh, &islands[0], 2), islands[0][0]);
    }
}
