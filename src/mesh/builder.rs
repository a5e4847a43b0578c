//! UV mesh construction.
//!
//! This module provides [`UvMeshBuilder`], the adapter surface through which
//! a host editor (or a test) describes one mesh object: 3-D vertex positions,
//! faces as vertex cycles with per-corner UV coordinates, seam marks, and the
//! active face. `build` derives the edge table, radial loop lists, and 3-D
//! edge lengths.
//!
//! Newly added faces start out selected with all loops selected, which is
//! the common case for test fixtures; hosts overwrite the flags from their
//! own selection state.

use std::collections::HashMap;

use nalgebra::{Point2, Point3};

use super::index::{EdgeId, FaceId, LoopId, VertId};
use super::uv_mesh::{UvEdge, UvFace, UvLoop, UvMesh};
use crate::error::{Result, UvError};

struct FaceSpec {
    verts: Vec<usize>,
    uvs: Vec<Point2<f64>>,
    select: bool,
    loop_select: Vec<bool>,
}

/// Builder for [`UvMesh`].
#[derive(Default)]
pub struct UvMeshBuilder {
    positions: Vec<Point3<f64>>,
    faces: Vec<FaceSpec>,
    seams: Vec<(usize, usize)>,
    active_face: Option<usize>,
}

impl UvMeshBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mesh vertex and return its index.
    pub fn vertex(&mut self, position: Point3<f64>) -> usize {
        self.positions.push(position);
        self.positions.len() - 1
    }

    /// Add a face from a vertex cycle and matching per-corner UVs.
    ///
    /// The face and all of its loops start out selected. Returns the face
    /// index. Validation happens in [`build`](Self::build).
    pub fn face(&mut self, verts: &[usize], uvs: &[Point2<f64>]) -> usize {
        self.faces.push(FaceSpec {
            verts: verts.to_vec(),
            uvs: uvs.to_vec(),
            select: true,
            loop_select: vec![true; verts.len()],
        });
        self.faces.len() - 1
    }

    /// Set the mesh-level selection flag of a face.
    pub fn select_face(&mut self, face: usize, select: bool) {
        self.faces[face].select = select;
    }

    /// Set the selection flag of one corner of a face.
    pub fn select_loop(&mut self, face: usize, corner: usize, select: bool) {
        self.faces[face].loop_select[corner] = select;
    }

    /// Mark the edge between two vertices as a UV seam.
    ///
    /// Unknown vertex pairs are ignored at build time; the host may carry
    /// seam marks for edges outside the faces it handed over.
    pub fn mark_seam(&mut self, v0: usize, v1: usize) {
        self.seams.push((v0, v1));
    }

    /// Set the host's active face.
    pub fn active_face(&mut self, face: usize) {
        self.active_face = Some(face);
    }

    /// Validate the description and build the mesh.
    pub fn build(self) -> Result<UvMesh> {
        // Validate faces before allocating anything
        for (fi, spec) in self.faces.iter().enumerate() {
            if spec.verts.len() < 3 {
                return Err(UvError::FaceTooSmall {
                    face: fi,
                    count: spec.verts.len(),
                });
            }
            if spec.verts.len() != spec.uvs.len() {
                return Err(UvError::LoopCountMismatch {
                    face: fi,
                    verts: spec.verts.len(),
                    uvs: spec.uvs.len(),
                });
            }
            for &vi in &spec.verts {
                if vi >= self.positions.len() {
                    return Err(UvError::InvalidVertexIndex { face: fi, vertex: vi });
                }
            }
            for (i, &vi) in spec.verts.iter().enumerate() {
                if spec.verts[i + 1..].contains(&vi) {
                    return Err(UvError::DegenerateFace { face: fi });
                }
            }
        }

        let mut mesh = UvMesh {
            positions: self.positions,
            loops: Vec::new(),
            edges: Vec::new(),
            faces: Vec::with_capacity(self.faces.len()),
            active_face: None,
        };

        // Undirected vertex pair -> edge
        let mut edge_map: HashMap<(usize, usize), EdgeId> = HashMap::new();

        for spec in &self.faces {
            let n = spec.verts.len();
            let face_id = FaceId::new(mesh.faces.len());
            let base = mesh.loops.len();
            let mut face_loops = Vec::with_capacity(n);

            for i in 0..n {
                let v0 = spec.verts[i];
                let v1 = spec.verts[(i + 1) % n];
                let key = (v0.min(v1), v0.max(v1));
                let edge_id = *edge_map.entry(key).or_insert_with(|| {
                    let id = EdgeId::new(mesh.edges.len());
                    let length =
                        (mesh.positions[key.0] - mesh.positions[key.1]).norm();
                    mesh.edges.push(UvEdge {
                        verts: (VertId::new(key.0), VertId::new(key.1)),
                        seam: false,
                        length,
                        loops: Vec::new(),
                    });
                    id
                });

                let loop_id = LoopId::new(base + i);
                mesh.edges[edge_id.index()].loops.push(loop_id);
                face_loops.push(loop_id);
                mesh.loops.push(UvLoop {
                    uv: spec.uvs[i],
                    select: spec.loop_select[i],
                    vert: VertId::new(v0),
                    edge: edge_id,
                    face: face_id,
                    next: LoopId::new(base + (i + 1) % n),
                    prev: LoopId::new(base + (i + n - 1) % n),
                });
            }

            mesh.faces.push(UvFace {
                loops: face_loops,
                select: spec.select,
            });
        }

        for (v0, v1) in self.seams {
            let key = (v0.min(v1), v0.max(v1));
            if let Some(&e) = edge_map.get(&key) {
                mesh.edges[e.index()].seam = true;
            }
        }

        if let Some(fi) = self.active_face {
            if fi < mesh.faces.len() {
                mesh.active_face = Some(FaceId::new(fi));
            }
        }

        Ok(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad_uvs() -> Vec<Point2<f64>> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn test_single_quad() {
        let mut b = UvMeshBuilder::new();
        let v: Vec<usize> = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
        .into_iter()
        .map(|p| b.vertex(p))
        .collect();
        b.face(&[v[0], v[1], v[2], v[3]], &unit_quad_uvs());
        let mesh = b.build().unwrap();

        assert_eq!(mesh.num_faces(), 1);
        assert_eq!(mesh.num_loops(), 4);
        assert_eq!(mesh.num_edges(), 4);
        // Loop cycle is closed
        let f = FaceId::new(0);
        let l0 = mesh.face(f).loops[0];
        let l = mesh.next(mesh.next(mesh.next(mesh.next(l0))));
        assert_eq!(l, l0);
        assert_eq!(mesh.prev(l0), mesh.face(f).loops[3]);
    }

    #[test]
    fn test_invalid_vertex_index() {
        let mut b = UvMeshBuilder::new();
        b.vertex(Point3::new(0.0, 0.0, 0.0));
        b.face(&[0, 1, 2, 3], &unit_quad_uvs());
        assert!(matches!(
            b.build(),
            Err(UvError::InvalidVertexIndex { face: 0, vertex: 1 })
        ));
    }

    #[test]
    fn test_degenerate_face() {
        let mut b = UvMeshBuilder::new();
        for p in [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ] {
            b.vertex(p);
        }
        b.face(&[0, 1, 0, 2], &unit_quad_uvs());
        assert!(matches!(b.build(), Err(UvError::DegenerateFace { face: 0 })));
    }

    #[test]
    fn test_loop_count_mismatch() {
        let mut b = UvMeshBuilder::new();
        for p in [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ] {
            b.vertex(p);
        }
        b.face(&[0, 1, 2], &unit_quad_uvs());
        assert!(matches!(
            b.build(),
            Err(UvError::LoopCountMismatch { face: 0, verts: 3, uvs: 4 })
        ));
    }

    #[test]
    fn test_seam_marking() {
        let mut b = UvMeshBuilder::new();
        for p in [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ] {
            b.vertex(p);
        }
        b.face(&[0, 1, 2, 3], &unit_quad_uvs());
        b.mark_seam(2, 1);
        // seam on an edge the mesh does not contain is ignored
        b.mark_seam(0, 2);
        let mesh = b.build().unwrap();
        let seams: Vec<_> = mesh
            .edge_ids()
            .filter(|&e| mesh.edge(e).seam)
            .collect();
        assert_eq!(seams.len(), 1);
        assert_eq!(
            mesh.edge(seams[0]).verts,
            (VertId::new(1), VertId::new(2))
        );
    }

    #[test]
    fn test_edge_lengths_from_positions() {
        let mut b = UvMeshBuilder::new();
        for p in [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
            Point3::new(3.0, 4.0, 0.0),
            Point3::new(0.0, 4.0, 0.0),
        ] {
            b.vertex(p);
        }
        b.face(&[0, 1, 2, 3], &unit_quad_uvs());
        let mesh = b.build().unwrap();
        let mut lengths: Vec<f64> = mesh.edge_ids().map(|e| mesh.edge(e).length).collect();
        lengths.sort_by(f64::total_cmp);
        assert!((lengths[0] - 3.0).abs() < 1e-12);
        assert!((lengths[3] - 4.0).abs() < 1e-12);
    }
}
