//! Coordinate deduplication index.
//!
//! Faces meeting at a shared mesh vertex carry separate loop records whose UV
//! coordinates coincide. [`CoordIndex`] groups loops by their coordinate
//! rounded to a fixed number of decimal digits, so a write to one corner can
//! be propagated to every coincident loop in O(1).
//!
//! The index is keyed once, at build time. Lookups performed after the
//! indexed loops have been moved intentionally use the stale keys: boundary
//! reattachment queries a loop's old position and follows the group to the
//! new one.

use std::collections::HashMap;

use nalgebra::Point2;

use crate::mesh::LoopId;

/// Default rounding precision in decimal digits.
///
/// Three digits merges loops within ~5e-4 UV units of a common rounded
/// position; raising it trades merge-sensitivity against false merges of
/// genuinely close but distinct UVs.
pub const DEFAULT_PRECISION: u32 = 3;

/// Quantized coordinate key.
pub type CoordKey = (i64, i64);

/// Maps rounded UV coordinates to the loops sitting there.
#[derive(Debug, Clone)]
pub struct CoordIndex {
    scale: f64,
    map: HashMap<CoordKey, Vec<LoopId>>,
}

impl Default for CoordIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl CoordIndex {
    /// Create an empty index with [`DEFAULT_PRECISION`].
    pub fn new() -> Self {
        Self::with_precision(DEFAULT_PRECISION)
    }

    /// Create an empty index rounding to the given number of decimal digits.
    pub fn with_precision(digits: u32) -> Self {
        Self {
            scale: 10f64.powi(digits as i32),
            map: HashMap::new(),
        }
    }

    /// The key a coordinate rounds to.
    #[inline]
    pub fn key(&self, uv: &Point2<f64>) -> CoordKey {
        (
            (uv.x * self.scale).round() as i64,
            (uv.y * self.scale).round() as i64,
        )
    }

    /// Index a loop at its coordinate.
    pub fn insert(&mut self, uv: &Point2<f64>, l: LoopId) {
        self.map.entry(self.key(uv)).or_default().push(l);
    }

    /// The loops indexed at the position a coordinate rounds to.
    ///
    /// Returns an empty slice for unindexed positions.
    pub fn get(&self, uv: &Point2<f64>) -> &[LoopId] {
        self.map
            .get(&self.key(uv))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The loops indexed under an exact key.
    pub fn group(&self, key: CoordKey) -> &[LoopId] {
        self.map.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate over all keys.
    pub fn keys(&self) -> impl Iterator<Item = CoordKey> + '_ {
        self.map.keys().copied()
    }

    /// Iterate over every indexed loop, across all groups.
    pub fn all_loops(&self) -> impl Iterator<Item = LoopId> + '_ {
        self.map.values().flatten().copied()
    }

    /// Number of distinct positions.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if no loop has been indexed.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
