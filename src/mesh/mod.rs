//! The UV mesh view and its construction.
//!
//! - [`UvMesh`]: loops, edges, and faces of one object's UV layer
//! - [`UvMeshBuilder`]: the host/test adapter that builds it
//! - Type-safe ids: [`VertId`], [`LoopId`], [`EdgeId`], [`FaceId`]

mod builder;
mod index;
mod uv_mesh;

pub use builder::UvMeshBuilder;
pub use index::{EdgeId, FaceId, LoopId, VertId};
pub use uv_mesh::{quasi_equal, UvEdge, UvFace, UvLoop, UvMesh, POS_EPS};
