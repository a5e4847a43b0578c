//! Viewport state passed in by the host.
//!
//! The algorithms never reach into ambient editor state: the 2-D cursor,
//! the open image's pixel size and the selection-sync toggle all travel
//! in an explicit [`Viewport`] value handed to each operation.

use nalgebra::Point2;

use crate::mesh::{LoopId, UvMesh};

/// Snapshot of the host viewport relevant to UV operations.
#[derive(Debug, Clone)]
pub struct Viewport {
    /// The 2-D cursor position in UV space.
    pub cursor: Point2<f64>,
    /// Pixel size of the open image, used for pixel-square aspect.
    pub image_size: (u32, u32),
    /// Host "keep UV and mesh selection in sync" toggle. Operations refuse
    /// to run while it is on.
    pub sync_selection: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            cursor: Point2::origin(),
            image_size: (256, 256),
            sync_selection: false,
        }
    }
}

impl Viewport {
    /// Set the cursor position.
    pub fn with_cursor(mut self, x: f64, y: f64) -> Self {
        self.cursor = Point2::new(x, y);
        self
    }

    /// Set the open image's pixel size.
    pub fn with_image_size(mut self, width: u32, height: u32) -> Self {
        self.image_size = (width, height);
        self
    }

    /// Set the selection-sync toggle.
    pub fn with_sync_selection(mut self, sync: bool) -> Self {
        self.sync_selection = sync;
        self
    }

    /// Width-over-height pixel aspect of the open image.
    ///
    /// A square cell in UV space spans `pixel_ratio()` times more V than U
    /// when drawn on a non-square image. Returns 1.0 for a zero height.
    pub fn pixel_ratio(&self) -> f64 {
        if self.image_size.1 == 0 {
            1.0
        } else {
            self.image_size.0 as f64 / self.image_size.1 as f64
        }
    }

    /// The candidate loop closest to the cursor.
    ///
    /// Ties resolve to the first candidate; `None` only for an empty list.
    pub fn closest_of(&self, mesh: &UvMesh, candidates: &[LoopId]) -> Option<LoopId> {
        let mut best: Option<(f64, LoopId)> = None;
        for &l in candidates {
            let d = (mesh.uv(l) - self.cursor).norm();
            if best.map_or(true, |(bd, _)| d < bd) {
                best = Some((d, l));
            }
        }
        best.map(|(_, l)| l)
    }
}
