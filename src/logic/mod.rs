//! Tournament business logic: seeding, scheduling, standings, brackets,
//! propagation, and score validation.

pub mod bracket;
pub mod propagation;
pub mod round_robin;
pub mod score;
pub mod seeding;
pub mod standings;

pub use bracket::{generator_for, BracketContext, BracketGenerator};
pub use propagation::{dependents_of, propagate_result, resolve_all_byes, resolve_byes};
pub use round_robin::{circle_rounds, pool_phase_match_count, schedule_pool_phase, RobinRound};
pub use score::{validate_set, winning_side, ScoreError, Side};
pub use seeding::{
    plan_pools, random_draft, snake_draft, validate_distribution, DistributionPlan, SeedingError,
    MAX_POOLS, MIN_POOLS,
};
pub use standings::pool_standings;
