//! Rip and join, the two selection-surgery operations.
//!
//! Rip reduces the selection to its fully selected faces so a following
//! move tears them off cleanly; with no full face it keeps a single loop.
//! Join snaps each selected coordinate group onto the nearest unselected
//! loop within a fixed radius, reconnecting previously ripped pieces.

use crate::coord::CoordIndex;
use crate::mesh::UvMesh;

/// Maximum UV distance join will bridge.
pub const JOIN_RADIUS: f64 = 0.002;

/// Reduce the selection for ripping. Returns false when no loop was
/// selected to begin with.
pub fn rip(mesh: &mut UvMesh) -> bool {
    let full_faces: Vec<_> = mesh
        .face_ids()
        .filter(|&f| mesh.face(f).loops.iter().all(|&l| mesh.uv_loop(l).select))
        .collect();

    if full_faces.is_empty() {
        let target = match mesh.selected_loops().next() {
            Some(l) => l,
            None => return false,
        };
        mesh.deselect_all_loops();
        mesh.uv_loop_mut(target).select = true;
        return true;
    }

    mesh.deselect_all_loops();
    for f in full_faces {
        for l in mesh.face(f).loops.clone() {
            mesh.uv_loop_mut(l).select = true;
        }
    }
    true
}

/// Snap selected coordinate groups onto nearby unselected loops.
///
/// Groups are visited in sorted key order so results do not depend on
/// hashing. Among equally near candidates the last in loop order wins,
/// and the matched loop joins the selection. Returns whether any group
/// moved.
pub fn join(mesh: &mut UvMesh) -> bool {
    let mut index = CoordIndex::new();
    for l in mesh.selected_loops() {
        index.insert(&mesh.uv(l), l);
    }

    let mut keys: Vec<_> = index.keys().collect();
    keys.sort_unstable();

    let mut changed = false;
    for key in keys {
        let group = index.group(key).to_vec();
        let anchor = mesh.uv(group[0]);

        let mut best: Option<(f64, crate::mesh::LoopId)> = None;
        for l in mesh.loop_ids() {
            if mesh.uv_loop(l).select {
                continue;
            }
            let d = (anchor - mesh.uv(l)).norm();
            if d < JOIN_RADIUS && best.map_or(true, |(bd, _)| d <= bd) {
                best = Some((d, l));
            }
        }

        if let Some((_, winner)) = best {
            let target = mesh.uv(winner);
            for l in group {
                mesh.set_uv(l, target);
            }
            mesh.uv_loop_mut(winner).select = true;
            changed = true;
        }
    }
    changed
}
