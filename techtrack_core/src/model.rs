//! Core data model: technician identifiers, unordered pairs, and
//! per-timestep position records.

use crate::geometry::Position;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier for a tracked technician.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TechId(pub u32);

impl TechId {
    /// Returns the numeric identifier.
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TechId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An unordered pair of technicians.
///
/// Normalized so the smaller identifier comes first, which makes
/// `PairKey(1, 2)` and `PairKey(2, 1)` the same key and gives `BTreeMap`
/// iteration the deterministic order (1,2), (1,3), (2,3).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PairKey {
    first: TechId,
    second: TechId,
}

impl PairKey {
    /// Creates a normalized pair key.
    pub fn new(a: TechId, b: TechId) -> Self {
        if a <= b {
            Self {
                first: a,
                second: b,
            }
        } else {
            Self {
                first: b,
                second: a,
            }
        }
    }

    /// The smaller technician id of the pair.
    pub fn first(&self) -> TechId {
        self.first
    }

    /// The larger technician id of the pair.
    pub fn second(&self) -> TechId {
        self.second
    }
}

impl std::fmt::Display for PairKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.first, self.second)
    }
}

/// One sampled instant: a timestamp plus the position of every tracked
/// technician at that instant.
///
/// Records are well-formed by construction; structural validation of the
/// raw upstream document happens in the loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimestepRecord {
    /// Timestamp in seconds since session start
    pub tsecs: f64,

    /// Position of each technician at this instant
    pub positions: BTreeMap<TechId, Position>,
}

impl TimestepRecord {
    /// Creates a record from a timestamp and a roster of positions.
    pub fn new(tsecs: f64, positions: BTreeMap<TechId, Position>) -> Self {
        Self { tsecs, positions }
    }

    /// Iterates all unordered technician pairs in deterministic order.
    pub fn pairs(&self) -> impl Iterator<Item = (PairKey, &Position, &Position)> {
        let entries: Vec<(&TechId, &Position)> = self.positions.iter().collect();
        let mut out = Vec::with_capacity(entries.len() * (entries.len().saturating_sub(1)) / 2);
        for i in 0..entries.len() {
            for j in (i + 1)..entries.len() {
                let (a_id, a_pos) = entries[i];
                let (b_id, b_pos) = entries[j];
                out.push((PairKey::new(*a_id, *b_id), a_pos, b_pos));
            }
        }
        out.into_iter()
    }
}
