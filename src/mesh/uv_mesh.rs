//! UV mesh data structure.
//!
//! This module provides the in-memory view of a mesh's UV layer that the
//! reshaping algorithms operate on. The structure mirrors the host editor's
//! model: every face corner owns an independently mutable **loop** (a UV
//! coordinate plus a selection flag), and loops from adjacent faces that sit
//! on the same position are *not* merged in storage. Edges keep a radial list
//! of the loops that run along them, which is what lets the algorithms cross
//! from a face to its neighbor.
//!
//! The mesh is transient: the host adapter rebuilds it at the start of each
//! operation and writes the mutated UVs back afterwards.

use nalgebra::{Point2, Point3};

use super::index::{EdgeId, FaceId, LoopId, VertId};

/// Absolute tolerance under which two UV coordinates are treated as the same
/// vertex for topological purposes.
pub const POS_EPS: f64 = 1e-4;

/// Check whether two UV coordinates are coincident within [`POS_EPS`].
#[inline]
pub fn quasi_equal(a: &Point2<f64>, b: &Point2<f64>) -> bool {
    (a.x - b.x).abs() <= POS_EPS && (a.y - b.y).abs() <= POS_EPS
}

/// One face corner: a UV coordinate with its selection flag and links into
/// the surrounding topology.
#[derive(Debug, Clone)]
pub struct UvLoop {
    /// The UV coordinate held by this corner.
    pub uv: Point2<f64>,
    /// Loop-level selection flag.
    pub select: bool,
    /// The mesh vertex this corner attaches to.
    pub vert: VertId,
    /// The edge running from this corner to the next corner of the face.
    pub edge: EdgeId,
    /// The owning face.
    pub face: FaceId,
    /// The next loop around the face.
    pub next: LoopId,
    /// The previous loop around the face.
    pub prev: LoopId,
}

/// An edge of the mesh with its UV-relevant attributes.
#[derive(Debug, Clone)]
pub struct UvEdge {
    /// The two mesh vertices of the edge, stored as (min, max).
    pub verts: (VertId, VertId),
    /// Artist-marked UV seam; walks never cross seam edges.
    pub seam: bool,
    /// The 3-D length of the edge, used for edge-loop length averaging.
    pub length: f64,
    /// Radial list: one loop per incident face running along this edge.
    pub loops: Vec<LoopId>,
}

impl UvEdge {
    /// An edge is manifold when exactly two faces share it.
    #[inline]
    pub fn is_manifold(&self) -> bool {
        self.loops.len() == 2
    }
}

/// A face: an ordered cycle of loops plus the mesh-level selection flag.
#[derive(Debug, Clone)]
pub struct UvFace {
    /// The loop cycle, in winding order.
    pub loops: Vec<LoopId>,
    /// Mesh-level face selection (distinct from loop selection).
    pub select: bool,
}

impl UvFace {
    /// Number of corners.
    #[inline]
    pub fn len(&self) -> usize {
        self.loops.len()
    }

    /// Check if the face has no corners (never true for built meshes).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.loops.is_empty()
    }

    /// Whether this face is a quadrilateral.
    #[inline]
    pub fn is_quad(&self) -> bool {
        self.loops.len() == 4
    }
}

/// The UV layer of one mesh object.
///
/// Built once per operation via [`UvMeshBuilder`](super::UvMeshBuilder),
/// mutated in place, then discarded.
#[derive(Debug, Clone)]
pub struct UvMesh {
    pub(crate) positions: Vec<Point3<f64>>,
    pub(crate) loops: Vec<UvLoop>,
    pub(crate) edges: Vec<UvEdge>,
    pub(crate) faces: Vec<UvFace>,
    pub(crate) active_face: Option<FaceId>,
}

impl UvMesh {
    // ==================== Accessors ====================

    /// Number of mesh vertices.
    #[inline]
    pub fn num_verts(&self) -> usize {
        self.positions.len()
    }

    /// Number of loops.
    #[inline]
    pub fn num_loops(&self) -> usize {
        self.loops.len()
    }

    /// Number of edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Get a loop by id.
    #[inline]
    pub fn uv_loop(&self, id: LoopId) -> &UvLoop {
        &self.loops[id.index()]
    }

    /// Get a mutable loop by id.
    #[inline]
    pub fn uv_loop_mut(&mut self, id: LoopId) -> &mut UvLoop {
        &mut self.loops[id.index()]
    }

    /// Get an edge by id.
    #[inline]
    pub fn edge(&self, id: EdgeId) -> &UvEdge {
        &self.edges[id.index()]
    }

    /// Get a mutable edge by id.
    #[inline]
    pub fn edge_mut(&mut self, id: EdgeId) -> &mut UvEdge {
        &mut self.edges[id.index()]
    }

    /// Get a face by id.
    #[inline]
    pub fn face(&self, id: FaceId) -> &UvFace {
        &self.faces[id.index()]
    }

    /// Get a mutable face by id.
    #[inline]
    pub fn face_mut(&mut self, id: FaceId) -> &mut UvFace {
        &mut self.faces[id.index()]
    }

    /// Get the 3-D position of a mesh vertex.
    #[inline]
    pub fn position(&self, v: VertId) -> &Point3<f64> {
        &self.positions[v.index()]
    }

    /// The UV coordinate of a loop.
    #[inline]
    pub fn uv(&self, l: LoopId) -> Point2<f64> {
        self.loops[l.index()].uv
    }

    /// Set the UV coordinate of a loop.
    #[inline]
    pub fn set_uv(&mut self, l: LoopId, uv: Point2<f64>) {
        self.loops[l.index()].uv = uv;
    }

    /// The host's currently-active face, if any.
    #[inline]
    pub fn active_face(&self) -> Option<FaceId> {
        self.active_face
    }

    /// Set the active face.
    #[inline]
    pub fn set_active_face(&mut self, f: Option<FaceId>) {
        self.active_face = f;
    }

    // ==================== Topology Queries ====================

    /// The next loop around the owning face.
    #[inline]
    pub fn next(&self, l: LoopId) -> LoopId {
        self.loops[l.index()].next
    }

    /// The previous loop around the owning face.
    #[inline]
    pub fn prev(&self, l: LoopId) -> LoopId {
        self.loops[l.index()].prev
    }

    /// The next loop radially around this loop's edge.
    ///
    /// For a manifold edge this is the corresponding loop on the neighboring
    /// face; a loop on a boundary edge is its own radial neighbor.
    pub fn radial_next(&self, l: LoopId) -> LoopId {
        let e = self.loops[l.index()].edge;
        let radial = &self.edges[e.index()].loops;
        match radial.iter().position(|&x| x == l) {
            Some(i) => radial[(i + 1) % radial.len()],
            None => l,
        }
    }

    /// True iff the mesh face is selected and every loop of it is selected.
    pub fn face_fully_selected(&self, f: FaceId) -> bool {
        let face = self.face(f);
        face.select && face.loops.iter().all(|&l| self.uv_loop(l).select)
    }

    // ==================== Iteration ====================

    /// Iterate over all face ids.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> + '_ {
        (0..self.faces.len()).map(FaceId::new)
    }

    /// Iterate over all loop ids.
    pub fn loop_ids(&self) -> impl Iterator<Item = LoopId> + '_ {
        (0..self.loops.len()).map(LoopId::new)
    }

    /// Iterate over all edge ids.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        (0..self.edges.len()).map(EdgeId::new)
    }

    /// Iterate over all selected loop ids, in face order.
    pub fn selected_loops(&self) -> impl Iterator<Item = LoopId> + '_ {
        self.loop_ids().filter(|&l| self.uv_loop(l).select)
    }

    // ==================== Selection ====================

    /// Deselect every loop in the mesh.
    pub fn deselect_all_loops(&mut self) {
        for l in &mut self.loops {
            l.select = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::UvMeshBuilder;
    use super::*;

    fn two_quads() -> UvMesh {
        // Two unit quads sharing the edge v1-v2
        let mut b = UvMeshBuilder::new();
        let v0 = b.vertex(Point3::new(0.0, 0.0, 0.0));
        let v1 = b.vertex(Point3::new(1.0, 0.0, 0.0));
        let v2 = b.vertex(Point3::new(1.0, 1.0, 0.0));
        let v3 = b.vertex(Point3::new(0.0, 1.0, 0.0));
        let v4 = b.vertex(Point3::new(2.0, 0.0, 0.0));
        let v5 = b.vertex(Point3::new(2.0, 1.0, 0.0));
        b.face(
            &[v0, v1, v2, v3],
            &[
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(1.0, 1.0),
                Point2::new(0.0, 1.0),
            ],
        );
        b.face(
            &[v1, v4, v5, v2],
            &[
                Point2::new(1.0, 0.0),
                Point2::new(2.0, 0.0),
                Point2::new(2.0, 1.0),
                Point2::new(1.0, 1.0),
            ],
        );
        b.build().unwrap()
    }

    #[test]
    fn test_counts() {
        let mesh = two_quads();
        assert_eq!(mesh.num_verts(), 6);
        assert_eq!(mesh.num_faces(), 2);
        assert_eq!(mesh.num_loops(), 8);
        // 4 + 4 edges minus the shared one
        assert_eq!(mesh.num_edges(), 7);
    }

    #[test]
    fn test_manifold_shared_edge() {
        let mesh = two_quads();
        let manifold: Vec<EdgeId> = mesh
            .edge_ids()
            .filter(|&e| mesh.edge(e).is_manifold())
            .collect();
        assert_eq!(manifold.len(), 1);
        let e = mesh.edge(manifold[0]);
        assert_eq!(e.verts, (VertId::new(1), VertId::new(2)));
        assert!((e.length - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_radial_next_crosses_faces() {
        let mesh = two_quads();
        let shared = mesh
            .edge_ids()
            .find(|&e| mesh.edge(e).is_manifold())
            .unwrap();
        let [a, b] = [mesh.edge(shared).loops[0], mesh.edge(shared).loops[1]];
        assert_eq!(mesh.radial_next(a), b);
        assert_eq!(mesh.radial_next(b), a);
        assert_ne!(mesh.uv_loop(a).face, mesh.uv_loop(b).face);
    }

    #[test]
    fn test_radial_next_boundary_is_self() {
        let mesh = two_quads();
        let boundary = mesh
            .edge_ids()
            .find(|&e| !mesh.edge(e).is_manifold())
            .unwrap();
        let l = mesh.edge(boundary).loops[0];
        assert_eq!(mesh.radial_next(l), l);
    }

    #[test]
    fn test_face_fully_selected() {
        let mut mesh = two_quads();
        let f0 = FaceId::new(0);
        assert!(mesh.face_fully_selected(f0));

        let l = mesh.face(f0).loops[0];
        mesh.uv_loop_mut(l).select = false;
        assert!(!mesh.face_fully_selected(f0));

        mesh.uv_loop_mut(l).select = true;
        mesh.face_mut(f0).select = false;
        assert!(!mesh.face_fully_selected(f0));
    }

    #[test]
    fn test_quasi_equal_tolerance() {
        let a = Point2::new(0.5, 0.5);
        let b = Point2::new(0.5 + 5e-5, 0.5 - 5e-5);
        let c = Point2::new(0.501, 0.5);
        assert!(quasi_equal(&a, &b));
        assert!(!quasi_equal(&a, &c));
    }
}
