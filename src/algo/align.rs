//! Axis alignment for selections with no full quad, i.e. edge loops and
//! loose vertex runs.
//!
//! A run is classified horizontal or vertical by the slope between its
//! extreme points. Alignment flattens the perpendicular coordinate onto
//! the loop closest to the cursor; equalization additionally spreads the
//! run's points evenly over its span.

use nalgebra::Point2;

use crate::coord::CoordIndex;
use crate::mesh::{LoopId, UvMesh, POS_EPS};

/// True when every UV shares one X or one Y within tolerance.
pub fn lined_on_axis(mesh: &UvMesh, loops: &[LoopId]) -> bool {
    let first = match loops.first() {
        Some(&l) => mesh.uv(l),
        None => return false,
    };
    let mut lined_x = true;
    let mut lined_y = true;
    for &l in loops {
        let uv = mesh.uv(l);
        if (uv.x - first.x).abs() > POS_EPS {
            lined_x = false;
        }
        if (uv.y - first.y).abs() > POS_EPS {
            lined_y = false;
        }
    }
    lined_x || lined_y
}

/// Slope test between the X-extreme points. A run steeper than 1 counts
/// as vertical, and so does a degenerate horizontal extent.
fn is_horizontal(first: Point2<f64>, last: Point2<f64>) -> bool {
    if (last.x - first.x).abs() <= POS_EPS {
        return false;
    }
    let slope = (last.y - first.y) / (last.x - first.x);
    slope.abs() <= 1.0
}

/// Flatten the run onto the axis through the start loop.
///
/// Every selected loop in `index` moves, not only the deduplicated run.
/// Returns the start loop's UV, which becomes the new cursor position,
/// or `None` when the run is empty.
pub fn snap_to_axis(
    mesh: &mut UvMesh,
    index: &CoordIndex,
    loops: &[LoopId],
    start: Option<LoopId>,
) -> Option<Point2<f64>> {
    if loops.is_empty() {
        return None;
    }
    let mut sorted: Vec<LoopId> = loops.to_vec();
    sorted.sort_by(|&a, &b| mesh.uv(a).x.total_cmp(&mesh.uv(b).x));

    let horizontal = is_horizontal(mesh.uv(sorted[0]), mesh.uv(sorted[sorted.len() - 1]));
    if !horizontal {
        sorted.sort_by(|&a, &b| mesh.uv(b).y.total_cmp(&mesh.uv(a).y));
    }

    let startv = start.unwrap_or(sorted[0]);
    let pivot = mesh.uv(startv);

    for l in index.all_loops() {
        let mut uv = mesh.uv(l);
        if horizontal {
            uv.y = pivot.y;
        } else {
            uv.x = pivot.x;
        }
        mesh.set_uv(l, uv);
    }
    Some(pivot)
}

/// Spread an already lined-up run so consecutive points sit an equal
/// distance apart over the run's original span.
///
/// When the cursor-closest loop is the run's far end the run grows
/// backwards from it; otherwise it grows forward from the near end.
pub fn equalize_spacing(
    mesh: &mut UvMesh,
    index: &CoordIndex,
    loops: &[LoopId],
    start: Option<LoopId>,
) {
    if loops.len() < 2 {
        return;
    }
    let mut sorted: Vec<LoopId> = loops.to_vec();
    sorted.sort_by(|&a, &b| mesh.uv(a).x.total_cmp(&mesh.uv(b).x));

    let horizontal = is_horizontal(mesh.uv(sorted[0]), mesh.uv(sorted[sorted.len() - 1]));
    if !horizontal {
        sorted.sort_by(|&a, &b| mesh.uv(b).y.total_cmp(&mesh.uv(a).y));
    }

    let first = mesh.uv(sorted[0]);
    let last = mesh.uv(sorted[sorted.len() - 1]);
    let length = (first - last).norm();
    let start_is_last = start == Some(sorted[sorted.len() - 1]);

    let (mut cx, mut cy) = if start_is_last {
        if horizontal {
            (last.x - length, last.y)
        } else {
            (last.x, last.y + length)
        }
    } else {
        (first.x, first.y)
    };

    let step = length / (sorted.len() - 1) as f64;

    // Groups are resolved before any write; later lookups would otherwise
    // miss loops whose key already moved
    let groups: Vec<Vec<LoopId>> = sorted
        .iter()
        .map(|&l| index.get(&mesh.uv(l)).to_vec())
        .collect();

    for group in groups {
        for l in group {
            mesh.set_uv(l, Point2::new(cx, cy));
        }
        if horizontal {
            cx += step;
        } else {
            cy -= step;
        }
    }
}
