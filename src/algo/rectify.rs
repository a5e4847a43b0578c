//! Target face rectification.
//!
//! The elected face becomes an axis-aligned rectangle anchored at the
//! corner closest to the viewport cursor. The anchored corner keeps its
//! UV; the other three move by the face's own edge lengths, so repeated
//! runs on an already rectangular face are no-ops.

use nalgebra::Point2;

use crate::algo::corners::{classify, CornerRole, Corners};
use crate::coord::CoordIndex;
use crate::mesh::{quasi_equal, FaceId, LoopId, UvMesh};
use crate::viewport::Viewport;

/// Reshape `face` into an axis-aligned rectangle, propagating corner
/// writes to coincident loops through `index`.
///
/// In `square` mode the vertical extent is the horizontal extent times the
/// image pixel ratio, producing pixel-square cells. Non-quads are skipped.
pub fn shape_face(
    mesh: &mut UvMesh,
    index: &CoordIndex,
    viewport: &Viewport,
    face: FaceId,
    square: bool,
) {
    let entries: Vec<(LoopId, Point2<f64>)> = mesh
        .face(face)
        .loops
        .iter()
        .map(|&l| (l, mesh.uv(l)))
        .collect();
    let corners = match classify(&entries) {
        Some(c) => c,
        None => return,
    };

    let anchor = anchor_role(&corners, viewport, mesh);

    let lu = corners.left_up.1;
    let ld = corners.left_down.1;
    let ru = corners.right_up.1;
    let rd = corners.right_down.1;

    let dist = |a: Point2<f64>, b: Point2<f64>| (a - b).norm();

    let (scale_x, mut scale_y, row_x, row_y) = match anchor {
        CornerRole::LeftUp => (dist(lu, ru), dist(lu, ld), lu.x, lu.y),
        CornerRole::RightUp => {
            let sx = dist(ru, lu);
            (sx, dist(ru, rd), ru.x - sx, ru.y)
        }
        CornerRole::RightDown => {
            let sx = dist(rd, ld);
            let sy = dist(rd, ru);
            (sx, sy, rd.x - sx, rd.y + sy)
        }
        CornerRole::LeftDown => {
            let sy = dist(ld, lu);
            (dist(ld, rd), sy, ld.x, ld.y + sy)
        }
    };
    if square {
        scale_y = scale_x * viewport.pixel_ratio();
    }

    // Coincident loops are looked up at the pre-move positions
    write_group(mesh, index, lu, Point2::new(row_x, row_y));
    write_group(mesh, index, ru, Point2::new(row_x + scale_x, row_y));
    write_group(mesh, index, rd, Point2::new(row_x + scale_x, row_y - scale_y));
    write_group(mesh, index, ld, Point2::new(row_x, row_y - scale_y));
}

/// Role of the face corner closest to the cursor, defaulting to left-up.
fn anchor_role(corners: &Corners<LoopId>, viewport: &Viewport, mesh: &UvMesh) -> CornerRole {
    let candidates = [
        corners.left_up.0,
        corners.left_down.0,
        corners.right_down.0,
        corners.right_up.0,
    ];
    let closest = match viewport.closest_of(mesh, &candidates) {
        Some(l) => mesh.uv(l),
        None => return CornerRole::LeftUp,
    };
    for role in [CornerRole::RightUp, CornerRole::RightDown, CornerRole::LeftDown] {
        if quasi_equal(&closest, &corners.get(role).1) {
            return role;
        }
    }
    CornerRole::LeftUp
}

fn write_group(mesh: &mut UvMesh, index: &CoordIndex, at: Point2<f64>, to: Point2<f64>) {
    for l in index.get(&at).to_vec() {
        mesh.set_uv(l, to);
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::Point3;

    use super::*;
    use crate::algo::select::Selection;
    use crate::mesh::UvMeshBuilder;

    fn skewed_quad() -> UvMesh {
        let mut b = UvMeshBuilder::new();
        b.vertex(Point3::new(0.0, 0.0, 0.0));
        b.vertex(Point3::new(1.0, 0.0, 0.0));
        b.vertex(Point3::new(1.0, 1.0, 0.0));
        b.vertex(Point3::new(0.0, 1.0, 0.0));
        b.face(
            &[0, 1, 2, 3],
            &[
                Point2::new(0.1, 0.0),
                Point2::new(1.0, 0.1),
                Point2::new(1.1, 1.0),
                Point2::new(0.0, 0.9),
            ],
        );
        b.build().unwrap()
    }

    #[test]
    fn test_anchor_keeps_its_corner() {
        let mut mesh = skewed_quad();
        let sel = Selection::gather(&mesh);
        let face = sel.grid_faces[0];
        // Cursor near the bottom-left corner
        let vp = Viewport::default().with_cursor(0.1, 0.0);
        shape_face(&mut mesh, &sel.index, &vp, face, false);

        let loops = mesh.face(face).loops.clone();
        let ld = mesh.uv(loops[0]);
        assert!((ld.x - 0.1).abs() < 1e-12);
        assert!((ld.y - 0.0).abs() < 1e-12);
        // Axis aligned afterwards
        let rd = mesh.uv(loops[1]);
        let ru = mesh.uv(loops[2]);
        let lu = mesh.uv(loops[3]);
        assert!((rd.y - ld.y).abs() < 1e-12);
        assert!((ru.x - rd.x).abs() < 1e-12);
        assert!((lu.x - ld.x).abs() < 1e-12);
        assert!((lu.y - ru.y).abs() < 1e-12);
    }

    #[test]
    fn test_square_mode_uses_pixel_ratio() {
        let mut mesh = skewed_quad();
        let sel = Selection::gather(&mesh);
        let face = sel.grid_faces[0];
        let vp = Viewport::default()
            .with_cursor(0.1, 0.0)
            .with_image_size(512, 256);
        shape_face(&mut mesh, &sel.index, &vp, face, true);

        let loops = mesh.face(face).loops.clone();
        let width = (mesh.uv(loops[1]) - mesh.uv(loops[0])).norm();
        let height = (mesh.uv(loops[3]) - mesh.uv(loops[0])).norm();
        assert!((height - width * 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_rectangle_is_fixed_point() {
        let mut mesh = skewed_quad();
        let sel = Selection::gather(&mesh);
        let face = sel.grid_faces[0];
        let vp = Viewport::default().with_cursor(0.0, 0.0);
        shape_face(&mut mesh, &sel.index, &vp, face, false);

        let before: Vec<Point2<f64>> = mesh
            .face(face)
            .loops
            .clone()
            .into_iter()
            .map(|l| mesh.uv(l))
            .collect();
        // Rebuild the index at the new positions and run again
        let sel2 = Selection::gather(&mesh);
        shape_face(&mut mesh, &sel2.index, &vp, face, false);
        let after: Vec<Point2<f64>> = mesh
            .face(face)
            .loops
            .clone()
            .into_iter()
            .map(|l| mesh.uv(l))
            .collect();
        for (b, a) in before.iter().zip(&after) {
            assert!((b - a).norm() < 1e-9);
        }
    }

    #[test]
    fn test_non_quad_is_skipped() {
        let mut b = UvMeshBuilder::new();
        for (x, y) in [(0.0, 0.0), (1.0, 0.0), (0.5, 1.0)] {
            b.vertex(Point3::new(x, y, 0.0));
        }
        b.face(
            &[0, 1, 2],
            &[Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(0.5, 1.0)],
        );
        let mut mesh = b.build().unwrap();
        let before: Vec<Point2<f64>> = mesh.loop_ids().map(|l| mesh.uv(l)).collect();

        let index = CoordIndex::new();
        let vp = Viewport::default();
        shape_face(&mut mesh, &index, &vp, FaceId::new(0), false);

        let after: Vec<Point2<f64>> = mesh.loop_ids().map(|l| mesh.uv(l)).collect();
        assert_eq!(before, after);
    }
}
