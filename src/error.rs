//! Error types for uvgrid.
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Result type alias using [`UvError`].
pub type Result<T> = std::result::Result<T, UvError>;

/// Errors that can occur during UV operations.
#[derive(Error, Debug)]
pub enum UvError {
    /// UV selection sync is enabled on the host; the loop-level selection
    /// model is ambiguous in that mode and no reshaping is performed.
    #[error("disable UV selection sync before running UV grid operations")]
    SyncSelection,

    /// The distance-preserving aligner found a branching vertex chain.
    #[error("found non-linear set of {count} vertices")]
    NonLinearChain {
        /// Number of vertices in the offending chain.
        count: usize,
    },

    /// A face references a vertex index outside the vertex array.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A face repeats a vertex in its corner cycle.
    #[error("face {face} is degenerate (has repeated vertices)")]
    DegenerateFace {
        /// The face index.
        face: usize,
    },

    /// A face was declared with fewer than three corners.
    #[error("face {face} has {count} corners, need at least 3")]
    FaceTooSmall {
        /// The face index.
        face: usize,
        /// The number of corners supplied.
        count: usize,
    },

    /// A face was declared with mismatched vertex and UV counts.
    #[error("face {face} has {verts} vertices but {uvs} UV coordinates")]
    LoopCountMismatch {
        /// The face index.
        face: usize,
        /// Number of vertex indices supplied.
        verts: usize,
        /// Number of UV coordinates supplied.
        uvs: usize,
    },
}
