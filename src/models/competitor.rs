//! Competitor data structure.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a competitor (used in matches, groups, and standings).
pub type CompetitorId = Uuid;

/// A competitor (player or team) in the tournament.
///
/// Seeds are dense integers 1..N, unique across the tournament, and frozen
/// once play starts (renames aside).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub id: CompetitorId,
    pub name: String,
    /// Seeding rank, 1 = strongest.
    pub seed: u32,
}

impl Competitor {
    /// Create a new competitor with the given name and seed.
    pub fn new(name: impl Into<String>, seed: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            seed,
        }
    }
}
