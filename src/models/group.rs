//! Pools (groups) and per-pool standings.

use crate::models::competitor::CompetitorId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a group.
pub type GroupId = Uuid;

/// A pool of competitors playing a full round-robin among themselves.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    /// Member ids in seeding order (strongest first).
    pub members: Vec<CompetitorId>,
}

impl Group {
    pub fn new(name: impl Into<String>, members: Vec<CompetitorId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            members,
        }
    }
}

/// Pool name by index: "Group A", "Group B", ...
pub fn group_name(index: usize) -> String {
    match char::from_u32('A' as u32 + index as u32) {
        Some(c) => format!("Group {}", c),
        None => format!("Group {}", index + 1),
    }
}

/// One row of a pool standings table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StandingEntry {
    pub competitor: CompetitorId,
    pub played: u32,
    pub won: u32,
    pub lost: u32,
    pub sets_won: u32,
    pub sets_lost: u32,
    pub points_won: u32,
    pub points_lost: u32,
    /// Ranking figure: matches won, or sets won under the 2-set format.
    pub points: u32,
    /// In-pool rank, 1..k, assigned after the full deterministic sort.
    pub rank: u32,
}

impl StandingEntry {
    pub fn new(competitor: CompetitorId) -> Self {
        Self {
            competitor,
            played: 0,
            won: 0,
            lost: 0,
            sets_won: 0,
            sets_lost: 0,
            points_won: 0,
            points_lost: 0,
            points: 0,
            rank: 0,
        }
    }

    pub fn point_diff(&self) -> i64 {
        i64::from(self.points_won) - i64::from(self.points_lost)
    }

    pub fn set_diff(&self) -> i64 {
        i64::from(self.sets_won) - i64::from(self.sets_lost)
    }
}
