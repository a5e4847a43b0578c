//! The operation surface: one function per user-facing action.
//!
//! Every operation takes the mesh and an explicit [`Viewport`] snapshot,
//! refuses to run while selection sync is on, and reports what happened
//! through an [`Outcome`]. The grid operations share one routine that
//! routes the selection to the grid, line or single-point path, mirroring
//! what a user expects from the same click in different situations.

use std::time::Instant;

use nalgebra::Point2;

use crate::algo::{align, chain, follow, island, rectify, ripjoin, select};
use crate::error::{Result, UvError};
use crate::mesh::UvMesh;
use crate::viewport::Viewport;

/// What an operation did to one mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    /// Whether any UV coordinate or selection flag changed.
    pub changed: bool,
    /// Where the host should move its 2-D cursor, if anywhere.
    pub cursor: Option<Point2<f64>>,
}

impl Outcome {
    fn unchanged() -> Self {
        Outcome {
            changed: false,
            cursor: None,
        }
    }

    fn changed() -> Self {
        Outcome {
            changed: true,
            cursor: None,
        }
    }
}

/// Per-mesh results of one operation applied across several meshes.
pub type BatchResult = Vec<Result<Outcome>>;

// ==================== Grid Operations ====================

/// Reshape the selected quads into a grid of pixel-square cells.
pub fn reshape_to_square_grid(mesh: &mut UvMesh, viewport: &Viewport) -> Result<Outcome> {
    run_grid(mesh, viewport, true)
}

/// Reshape the selected quads into a grid whose cell sizes follow the
/// 3-D edge lengths around the anchored corner.
pub fn reshape_to_grid_by_shape(mesh: &mut UvMesh, viewport: &Viewport) -> Result<Outcome> {
    run_grid(mesh, viewport, false)
}

/// Snap a selected run of loops onto its dominant axis.
///
/// This is the same routine as the grid reshape; with no full quad
/// selected it takes the line path.
pub fn snap_chain_to_axis(mesh: &mut UvMesh, viewport: &Viewport) -> Result<Outcome> {
    run_grid(mesh, viewport, false)
}

/// Snap a run onto its axis, then spread its points evenly.
///
/// Two passes: the first aligns, the second sees an aligned run and
/// equalizes the spacing.
pub fn snap_chain_to_axis_equalized(mesh: &mut UvMesh, viewport: &Viewport) -> Result<Outcome> {
    let first = run_grid(mesh, viewport, false)?;
    let second = run_grid(mesh, viewport, false)?;
    Ok(Outcome {
        changed: first.changed || second.changed,
        cursor: second.cursor.or(first.cursor),
    })
}

/// Straighten selected chains while preserving the distances between
/// consecutive points. See [`chain::snap_preserving_distance`].
pub fn snap_chain_preserving_distance(mesh: &mut UvMesh, viewport: &Viewport) -> Result<Outcome> {
    if viewport.sync_selection {
        return Err(UvError::SyncSelection);
    }
    let changed = chain::snap_preserving_distance(mesh)?;
    Ok(Outcome {
        changed,
        cursor: None,
    })
}

// ==================== Rip / Join ====================

/// Reduce the selection to whole faces (or a single loop) so a following
/// move rips them off.
pub fn rip_selection(mesh: &mut UvMesh) -> Outcome {
    Outcome {
        changed: ripjoin::rip(mesh),
        cursor: None,
    }
}

/// Snap the selection back onto nearby unselected loops.
pub fn join_selection(mesh: &mut UvMesh) -> Outcome {
    Outcome {
        changed: ripjoin::join(mesh),
        cursor: None,
    }
}

// ==================== Batch ====================

/// Apply one operation to several meshes. A failure on one mesh leaves
/// the others untouched by it; every mesh gets its own result.
pub fn run_batch<F>(meshes: &mut [UvMesh], mut op: F) -> BatchResult
where
    F: FnMut(&mut UvMesh) -> Result<Outcome>,
{
    meshes.iter_mut().map(|m| op(m)).collect()
}

// ==================== Shared Routine ====================

fn run_grid(mesh: &mut UvMesh, viewport: &Viewport, square: bool) -> Result<Outcome> {
    if viewport.sync_selection {
        return Err(UvError::SyncSelection);
    }
    let start = Instant::now();

    let sel = select::Selection::gather(mesh);
    if sel.filtered.is_empty() {
        return Ok(Outcome::unchanged());
    }
    if sel.filtered.len() == 1 {
        // A single point only pulls the cursor to itself
        return Ok(Outcome {
            changed: false,
            cursor: Some(mesh.uv(sel.filtered[0])),
        });
    }

    let closest = viewport.closest_of(mesh, &sel.filtered);

    if sel.grid_faces.is_empty() {
        let index = select::line_index(mesh);
        let outcome = if !align::lined_on_axis(mesh, &sel.filtered) {
            let cursor = align::snap_to_axis(mesh, &index, &sel.filtered, closest);
            Outcome {
                changed: cursor.is_some(),
                cursor,
            }
        } else {
            align::equalize_spacing(mesh, &index, &sel.filtered, closest);
            Outcome::changed()
        };
        log::debug!(
            "aligned {} loops in {:.2?}",
            sel.filtered.len(),
            start.elapsed()
        );
        return Ok(outcome);
    }

    // Non-quads cannot join a grid; drop them from the selection
    for &f in &sel.non_quad_faces {
        for l in mesh.face(f).loops.clone() {
            mesh.uv_loop_mut(l).select = false;
        }
    }

    let islands = island::discover(mesh, &sel.grid_faces);
    let mode = if square {
        follow::ExtendMode::Even
    } else {
        follow::ExtendMode::LengthAverage
    };
    for isl in &islands {
        let target = island::elect_target(mesh, isl, islands.len());
        rectify::shape_face(mesh, &sel.index, viewport, target, square);
        follow::follow_active_uv(mesh, target, isl, mode);
    }

    // Boundary loops look their old position up in the pre-move index and
    // land wherever that group went, stitching the edge back on
    if !sel.no_boundary {
        for &l in &sel.boundary {
            let at = mesh.uv(l);
            if let Some(&rep) = sel.index.get(&at).first() {
                let target = mesh.uv(rep);
                mesh.set_uv(l, target);
                mesh.uv_loop_mut(l).select = true;
            }
        }
    }

    log::debug!(
        "reshaped {} faces across {} islands in {:.2?}",
        sel.grid_faces.len(),
        islands.len(),
        start.elapsed()
    );
    Ok(Outcome::changed())
}
