//! Index types for UV mesh elements.
//!
//! This module provides type-safe index wrappers for vertices, loops, edges,
//! and faces. All ids are `u32`-backed with a sentinel value for "no element";
//! UV selections are small enough that wider index types are not needed.

use std::fmt::{self, Debug};

macro_rules! impl_id_type {
    ($(#[$meta:meta])* $name:ident, $display:literal) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            const INVALID: u32 = u32::MAX;

            /// Create a new id from a raw index.
            #[inline]
            pub fn new(index: usize) -> Self {
                debug_assert!(index < Self::INVALID as usize, "index {} too large", index);
                Self(index as u32)
            }

            /// Create an invalid/null id.
            #[inline]
            pub fn invalid() -> Self {
                Self(Self::INVALID)
            }

            /// Get the raw index value.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// Check if this is a valid (non-null) id.
            #[inline]
            pub fn is_valid(self) -> bool {
                self.0 != Self::INVALID
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "{}({})", $display, self.index())
                } else {
                    write!(f, "{}(INVALID)", $display)
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::invalid()
            }
        }

        impl From<usize> for $name {
            fn from(v: usize) -> Self {
                Self::new(v)
            }
        }
    };
}

impl_id_type!(
    /// A type-safe mesh-vertex index (the 3-D vertex a loop attaches to).
    VertId,
    "V"
);
impl_id_type!(
    /// A type-safe loop index (one face corner holding a UV coordinate).
    LoopId,
    "L"
);
impl_id_type!(
    /// A type-safe edge index.
    EdgeId,
    "E"
);
impl_id_type!(
    /// A type-safe face index.
    FaceId,
    "F"
);
