//! Data structures for the tournament engine: competitors, matches, pools,
//! formats, and tournament state.

mod competitor;
mod format;
mod group;
mod matches;
mod tournament;

pub use competitor::{Competitor, CompetitorId};
pub use format::{BracketKind, Format, SeedingMethod, Tiebreak};
pub use group::{group_name, Group, GroupId, StandingEntry};
pub use matches::{Match, MatchId, MatchStatus, Outcome, Placement, SetScore, Slot, Stage};
pub use tournament::{
    bracket_supports, Phase, Tournament, TournamentError, TournamentId,
};
