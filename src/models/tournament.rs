//! Tournament: phase state machine tying seeding, scheduling, standings,
//! brackets, and propagation together.

use crate::logic::bracket::{generator_for, BracketContext};
use crate::logic::propagation::{dependents_of, propagate_result, resolve_all_byes, resolve_byes};
use crate::logic::round_robin::{pool_phase_match_count, schedule_pool_phase};
use crate::logic::score::{winning_side, ScoreError, Side};
use crate::logic::seeding::{
    plan_pools, random_draft, snake_draft, DistributionPlan, SeedingError,
};
use crate::logic::standings::pool_standings;
use crate::models::competitor::{Competitor, CompetitorId};
use crate::models::format::{BracketKind, Format, SeedingMethod};
use crate::models::group::{group_name, Group, StandingEntry};
use crate::models::matches::{Match, MatchId, MatchStatus, Outcome, SetScore, Slot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Adding competitors, adjusting the format; not started.
    #[default]
    Setup,
    /// Pool round-robin in progress.
    PoolPhase,
    /// Knockout bracket in progress.
    Knockout,
    /// All matches decided; placements final.
    Completed,
}

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Tournament is not in a phase that allows this action.
    InvalidPhase,
    /// A competitor with this name already exists (names are unique,
    /// case-insensitive).
    DuplicateCompetitorName,
    CompetitorNotFound(CompetitorId),
    MatchNotFound(MatchId),
    /// Match has an unresolved slot; no score can be recorded yet.
    MatchNotReady(MatchId),
    /// Match is already decided; results cannot be resubmitted.
    MatchAlreadyDecided(MatchId),
    /// Knockout requested before every pool match is completed.
    PoolPhaseIncomplete,
    /// Manual seeding chosen but no matching pool assignment was provided.
    PoolsNotAssigned,
    /// The chosen bracket kind does not support this pool count.
    BracketPoolMismatch {
        bracket: BracketKind,
        pool_count: usize,
    },
    /// The runner-up qualifier cut ties on points and point differential;
    /// the organizer has to resolve it rather than the engine inventing a
    /// resolution.
    UnresolvedQualifierTie { a: CompetitorId, b: CompetitorId },
    /// Infeasible competitor count / pool size combination.
    Seeding(SeedingError),
    /// Rejected score entry.
    Score(ScoreError),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InvalidPhase => write!(f, "Invalid phase for this action"),
            TournamentError::DuplicateCompetitorName => {
                write!(f, "A competitor with this name already exists")
            }
            TournamentError::CompetitorNotFound(_) => write!(f, "Competitor not found"),
            TournamentError::MatchNotFound(_) => write!(f, "Match not found"),
            TournamentError::MatchNotReady(_) => {
                write!(f, "Match still has an unresolved slot")
            }
            TournamentError::MatchAlreadyDecided(_) => write!(f, "Match is already decided"),
            TournamentError::PoolPhaseIncomplete => {
                write!(f, "Not every pool match is completed")
            }
            TournamentError::PoolsNotAssigned => {
                write!(f, "Manual seeding requires a pool assignment")
            }
            TournamentError::BracketPoolMismatch { pool_count, .. } => {
                write!(f, "The chosen bracket does not support {} pools", pool_count)
            }
            TournamentError::UnresolvedQualifierTie { .. } => {
                write!(f, "Runners-up tie on points and point differential")
            }
            TournamentError::Seeding(e) => write!(f, "{}", e),
            TournamentError::Score(e) => write!(f, "{}", e),
        }
    }
}

impl From<SeedingError> for TournamentError {
    fn from(e: SeedingError) -> Self {
        TournamentError::Seeding(e)
    }
}

impl From<ScoreError> for TournamentError {
    fn from(e: ScoreError) -> Self {
        TournamentError::Score(e)
    }
}

/// Whether a bracket kind can be seeded from this many pools.
pub fn bracket_supports(bracket: BracketKind, pool_count: usize) -> bool {
    match bracket {
        BracketKind::FixedFour | BracketKind::ShortenedMain => pool_count == 4,
        BracketKind::General => (2..=8).contains(&pool_count),
        BracketKind::PlacementTree => pool_count >= 1,
    }
}

/// Full tournament state: competitors, pools, matches, and phase.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub format: Format,
    pub competitors: Vec<Competitor>,
    /// Pools in index order; drawn at start (or assigned manually before).
    pub groups: Vec<Group>,
    /// Every match ever created; matches are never deleted, history feeds
    /// standings and final placements permanently.
    pub matches: Vec<Match>,
    pub phase: Phase,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Create a new tournament in Setup with no competitors.
    pub fn new(name: impl Into<String>, format: Format) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            format,
            competitors: Vec::new(),
            groups: Vec::new(),
            matches: Vec::new(),
            phase: Phase::Setup,
            created_at: Utc::now(),
        }
    }

    pub fn get_competitor(&self, id: CompetitorId) -> Option<&Competitor> {
        self.competitors.iter().find(|c| c.id == id)
    }

    /// Add a competitor with the next free seed (Setup only). Names must be
    /// unique, case-insensitive.
    pub fn add_competitor(&mut self, name: impl Into<String>) -> Result<(), TournamentError> {
        if self.phase != Phase::Setup {
            return Err(TournamentError::InvalidPhase);
        }
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(TournamentError::InvalidPhase);
        }
        if self
            .competitors
            .iter()
            .any(|c| c.name.eq_ignore_ascii_case(trimmed))
        {
            return Err(TournamentError::DuplicateCompetitorName);
        }
        let seed = self.competitors.len() as u32 + 1;
        self.competitors.push(Competitor::new(trimmed, seed));
        Ok(())
    }

    /// Remove a competitor (Setup only); remaining seeds are renumbered so
    /// they stay dense.
    pub fn remove_competitor(&mut self, id: CompetitorId) -> Result<(), TournamentError> {
        if self.phase != Phase::Setup {
            return Err(TournamentError::InvalidPhase);
        }
        let idx = self
            .competitors
            .iter()
            .position(|c| c.id == id)
            .ok_or(TournamentError::CompetitorNotFound(id))?;
        self.competitors.remove(idx);
        self.competitors.sort_by_key(|c| c.seed);
        for (i, c) in self.competitors.iter_mut().enumerate() {
            c.seed = i as u32 + 1;
        }
        Ok(())
    }

    /// Rename a competitor. Allowed in any phase; everything else about the
    /// roster is frozen once play starts.
    pub fn rename_competitor(
        &mut self,
        id: CompetitorId,
        name: impl Into<String>,
    ) -> Result<(), TournamentError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(TournamentError::InvalidPhase);
        }
        if self
            .competitors
            .iter()
            .any(|c| c.id != id && c.name.eq_ignore_ascii_case(trimmed))
        {
            return Err(TournamentError::DuplicateCompetitorName);
        }
        let c = self
            .competitors
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(TournamentError::CompetitorNotFound(id))?;
        c.name = trimmed.to_string();
        Ok(())
    }

    /// Replace the format settings (Setup only).
    pub fn set_format(&mut self, format: Format) -> Result<(), TournamentError> {
        if self.phase != Phase::Setup {
            return Err(TournamentError::InvalidPhase);
        }
        self.format = format;
        Ok(())
    }

    /// Replace the seeding order (Setup only). `order` must list every
    /// competitor exactly once, strongest first.
    pub fn reorder_seeds(&mut self, order: &[CompetitorId]) -> Result<(), TournamentError> {
        if self.phase != Phase::Setup {
            return Err(TournamentError::InvalidPhase);
        }
        if order.len() != self.competitors.len() {
            return Err(TournamentError::InvalidPhase);
        }
        for (i, &id) in order.iter().enumerate() {
            if order[..i].contains(&id) {
                return Err(TournamentError::InvalidPhase);
            }
            let c = self
                .competitors
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or(TournamentError::CompetitorNotFound(id))?;
            c.seed = i as u32 + 1;
        }
        Ok(())
    }

    /// Assign pools by hand (Setup only, for the manual seeding method).
    pub fn assign_pools(&mut self, pools: Vec<Vec<CompetitorId>>) -> Result<(), TournamentError> {
        if self.phase != Phase::Setup {
            return Err(TournamentError::InvalidPhase);
        }
        let mut seen: Vec<CompetitorId> = Vec::new();
        for pool in &pools {
            for &id in pool {
                if self.get_competitor(id).is_none() {
                    return Err(TournamentError::CompetitorNotFound(id));
                }
                if seen.contains(&id) {
                    return Err(TournamentError::InvalidPhase);
                }
                seen.push(id);
            }
        }
        self.groups = pools
            .into_iter()
            .enumerate()
            .map(|(i, members)| Group::new(group_name(i), members))
            .collect();
        Ok(())
    }

    /// Start the tournament: validate the distribution, draw pools per the
    /// seeding method, schedule the pool round-robin, move to PoolPhase.
    pub fn start(&mut self) -> Result<DistributionPlan, TournamentError> {
        if self.phase != Phase::Setup {
            return Err(TournamentError::InvalidPhase);
        }
        let plan = plan_pools(self.competitors.len(), self.format.pool_size)?;
        if !bracket_supports(self.format.bracket, plan.pool_count) {
            return Err(TournamentError::BracketPoolMismatch {
                bracket: self.format.bracket,
                pool_count: plan.pool_count,
            });
        }
        self.groups = match self.format.seeding {
            SeedingMethod::Snake => snake_draft(&self.competitors, plan.pool_count),
            SeedingMethod::Random => random_draft(&self.competitors, plan.pool_count),
            SeedingMethod::Manual => {
                if self.groups.len() != plan.pool_count
                    || self.groups.iter().map(|g| g.members.len()).sum::<usize>()
                        != self.competitors.len()
                {
                    return Err(TournamentError::PoolsNotAssigned);
                }
                std::mem::take(&mut self.groups)
            }
        };
        self.matches = schedule_pool_phase(&self.groups, &self.format, &self.competitors, 1);
        self.phase = Phase::PoolPhase;
        Ok(plan)
    }

    /// Ranked standings for one pool, from completed pool matches only.
    pub fn standings(&self, pool: usize) -> Vec<StandingEntry> {
        match self.groups.get(pool) {
            Some(group) => pool_standings(pool, group, &self.matches, &self.format),
            None => Vec::new(),
        }
    }

    /// Standings for every pool, index-aligned with the groups.
    pub fn all_standings(&self) -> Vec<Vec<StandingEntry>> {
        (0..self.groups.len()).map(|p| self.standings(p)).collect()
    }

    pub fn pool_phase_complete(&self) -> bool {
        !self.groups.is_empty()
            && self
                .matches
                .iter()
                .filter(|m| m.pool.is_some())
                .all(|m| m.status == MatchStatus::Completed)
    }

    /// Record a user-entered score, gated through the score validator. On
    /// success the result is propagated into every dependent match and
    /// walk-overs cascade.
    pub fn record_result(
        &mut self,
        match_id: MatchId,
        sets: Vec<SetScore>,
    ) -> Result<(), TournamentError> {
        let idx = self
            .matches
            .iter()
            .position(|m| m.id == match_id)
            .ok_or(TournamentError::MatchNotFound(match_id))?;
        if self.matches[idx].status == MatchStatus::Completed {
            return Err(TournamentError::MatchAlreadyDecided(match_id));
        }
        let (Some(a), Some(b)) = (
            self.matches[idx].slot_a.competitor(),
            self.matches[idx].slot_b.competitor(),
        ) else {
            return Err(TournamentError::MatchNotReady(match_id));
        };

        let side = winning_side(&sets, &self.format)?;
        let winner = match side {
            Side::A => a,
            Side::B => b,
        };

        let mut sets = sets;
        while sets.last().is_some_and(|s| s.a == 0 && s.b == 0) {
            sets.pop();
        }
        let m = &mut self.matches[idx];
        m.sets = sets;
        m.winner = Some(winner);
        m.status = MatchStatus::Completed;

        // Capture the dependents before propagation rewrites their slots,
        // so walk-over resolution visits every match this result touched.
        let affected = dependents_of(&self.matches, match_id);
        propagate_result(&mut self.matches, match_id);
        resolve_byes(&mut self.matches, &self.format, affected);

        if self.phase == Phase::Knockout
            && self
                .matches
                .iter()
                .all(|m| m.status == MatchStatus::Completed)
        {
            self.phase = Phase::Completed;
        }
        Ok(())
    }

    /// Flip a scheduled match to in-progress (for live display).
    pub fn mark_in_progress(&mut self, match_id: MatchId) -> Result<(), TournamentError> {
        let m = self
            .matches
            .iter_mut()
            .find(|m| m.id == match_id)
            .ok_or(TournamentError::MatchNotFound(match_id))?;
        match m.status {
            MatchStatus::Scheduled => {
                m.status = MatchStatus::InProgress;
                Ok(())
            }
            MatchStatus::Completed => Err(TournamentError::MatchAlreadyDecided(match_id)),
            _ => Err(TournamentError::MatchNotReady(match_id)),
        }
    }

    fn bracket_context(&self) -> BracketContext {
        BracketContext {
            pool_count: self.groups.len(),
            pool_sizes: self.groups.iter().map(|g| g.members.len()).collect(),
            next_number: self.matches.iter().map(|m| m.number).max().unwrap_or(0) + 1,
            first_round: self.matches.iter().map(|m| m.round).max().unwrap_or(0) + 1,
            third_place_match: self.format.third_place_match,
            with_referees: self.format.with_referees,
        }
    }

    /// Placeholder skeleton of the knockout, for display while the pool
    /// phase is still running. Does not modify the tournament.
    pub fn bracket_preview(&self) -> Result<Vec<Match>, TournamentError> {
        if self.phase == Phase::Setup || self.groups.is_empty() {
            return Err(TournamentError::InvalidPhase);
        }
        let ctx = self.bracket_context();
        Ok(generator_for(self.format.bracket, ctx.pool_count).skeleton(&ctx))
    }

    /// Generate and populate the knockout bracket once every pool match is
    /// completed; resolves initial walk-overs and moves to Knockout.
    pub fn generate_bracket(&mut self) -> Result<(), TournamentError> {
        if self.phase != Phase::PoolPhase {
            return Err(TournamentError::InvalidPhase);
        }
        if !self.pool_phase_complete() {
            return Err(TournamentError::PoolPhaseIncomplete);
        }
        let ctx = self.bracket_context();
        let generator = generator_for(self.format.bracket, ctx.pool_count);
        let mut skeleton = generator.skeleton(&ctx);
        let pools = self.all_standings();
        generator.populate(&mut skeleton, &pools)?;
        self.matches.extend(skeleton);
        resolve_all_byes(&mut self.matches, &self.format);
        self.phase = Phase::Knockout;
        Ok(())
    }

    /// Exact final ranks decided so far, from terminal matches: the winner
    /// takes the contested rank, the loser the rank below.
    pub fn final_placements(&self) -> Vec<(u32, CompetitorId)> {
        let mut placements: Vec<(u32, CompetitorId)> = Vec::new();
        for m in &self.matches {
            let (Some(rank), Some(winner)) = (m.contested_rank, m.winner) else {
                continue;
            };
            placements.push((rank, winner));
            if let Some(loser) = m.loser() {
                placements.push((rank + 1, loser));
            }
        }
        placements.sort_by_key(|&(rank, _)| rank);
        placements
    }

    /// Total matches this tournament will produce, for progress display and
    /// up-front validation.
    pub fn expected_match_count(&self) -> usize {
        if self.groups.is_empty() {
            return 0;
        }
        let pool = pool_phase_match_count(&self.groups);
        let ctx = self.bracket_context();
        if !bracket_supports(self.format.bracket, ctx.pool_count) {
            return pool;
        }
        pool + generator_for(self.format.bracket, ctx.pool_count).expected_match_count(&ctx)
    }

    /// Human-readable text for a slot ("Group A #2", "Winner of match 7").
    pub fn slot_label(&self, slot: &Slot) -> String {
        match slot {
            Slot::Bye => "Bye".to_string(),
            Slot::Competitor { id } => match self.get_competitor(*id) {
                Some(c) => c.name.clone(),
                None => id.to_string(),
            },
            Slot::PoolRank { pool, rank } => match self.groups.get(*pool) {
                Some(g) => format!("{} #{}", g.name, rank),
                None => format!("Pool {} #{}", pool + 1, rank),
            },
            Slot::Qualifier { seed } => format!("Qualifier {}", seed),
            Slot::Dependency { source, outcome } => {
                let number = self
                    .matches
                    .iter()
                    .find(|m| m.id == *source)
                    .map(|m| m.number);
                let role = match outcome {
                    Outcome::Winner => "Winner",
                    Outcome::Loser => "Loser",
                };
                match number {
                    Some(n) => format!("{} of match {}", role, n),
                    None => format!("{} of earlier match", role),
                }
            }
        }
    }
}
