//! # uvgrid
//!
//! A UV-unwrapping toolkit that reshapes selected quad faces into regular
//! grids and straightens runs of UV vertices.
//!
//! The library operates on an explicit [`mesh::UvMesh`]: the UV layer of
//! one mesh object, with per-corner loops, radial edge lists and seam
//! flags. A host editor builds the mesh from its own data, runs one of
//! the operations with a [`viewport::Viewport`] snapshot, and copies the
//! UVs and selection flags back.
//!
//! ## Features
//!
//! - **Grid reshaping**: turn a selected patch of quads into a grid of
//!   pixel-square cells, or one that follows the 3-D edge lengths
//! - **Line tools**: snap a run of UV vertices onto its axis, with
//!   optional equal spacing or preserved distances
//! - **Rip and join**: tear a sub-selection off and snap it back
//! - **Seam and island aware**: seams split the grid walk, and each
//!   island is reshaped on its own
//!
//! ## Quick Start
//!
//! ```
//! use uvgrid::prelude::*;
//! use nalgebra::{Point2, Point3};
//!
//! // A single skewed quad
//! let mut b = UvMeshBuilder::new();
//! for p in [
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ] {
//!     b.vertex(p);
//! }
//! b.face(
//!     &[0, 1, 2, 3],
//!     &[
//!         Point2::new(0.1, 0.0),
//!         Point2::new(1.0, 0.1),
//!         Point2::new(1.1, 1.0),
//!         Point2::new(0.0, 0.9),
//!     ],
//! );
//! let mut mesh = b.build().unwrap();
//!
//! // Reshape it into a square anchored at the cursor-closest corner
//! let viewport = Viewport::default().with_cursor(0.0, 0.0);
//! let outcome = uvgrid::ops::reshape_to_square_grid(&mut mesh, &viewport).unwrap();
//! assert!(outcome.changed);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod coord;
pub mod error;
pub mod mesh;
pub mod ops;
pub mod viewport;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use uvgrid::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Result, UvError};
    pub use crate::mesh::{EdgeId, FaceId, LoopId, UvEdge, UvFace, UvLoop, UvMesh, UvMeshBuilder, VertId};
    pub use crate::ops::{
        join_selection, reshape_to_grid_by_shape, reshape_to_square_grid, rip_selection,
        snap_chain_preserving_distance, snap_chain_to_axis, snap_chain_to_axis_equalized, Outcome,
    };
    pub use crate::viewport::Viewport;
}

// Re-export nalgebra types for convenience
pub use nalgebra;
