//! Grid and chain algorithms operating on a [`crate::mesh::UvMesh`].
//!
//! Each submodule is one stage of an operation pipeline; [`crate::ops`]
//! strings them together. All stages take the mesh and any viewport state
//! explicitly and mutate UVs in place.

pub mod align;
pub mod chain;
pub mod corners;
pub mod follow;
pub mod island;
pub mod rectify;
pub mod ripjoin;
pub mod select;
