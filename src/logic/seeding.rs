//! Pool distribution: feasibility validation, snake and random drafts.

use crate::models::{group_name, Competitor, CompetitorId, Group};
use rand::seq::SliceRandom;

/// Most pools any format supports.
pub const MAX_POOLS: usize = 8;

/// Fewest pools a knockout can be seeded from.
pub const MIN_POOLS: usize = 2;

/// Infeasible competitor count / pool-size / seeding combinations.
///
/// Reported as values, never panics, so callers can guide the user before
/// the tournament starts.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SeedingError {
    /// Pool count outside 2..=8.
    PoolCountOutOfRange { pool_count: usize },
    /// More competitors than the pools can hold.
    TooManyCompetitors { count: usize, capacity: usize },
    /// So few competitors that a whole pool would be empty.
    EmptyPool { byes_needed: usize, pool_size: usize },
}

impl std::fmt::Display for SeedingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeedingError::PoolCountOutOfRange { pool_count } => {
                write!(f, "Pool count {} is outside the supported 2-8 range", pool_count)
            }
            SeedingError::TooManyCompetitors { count, capacity } => {
                write!(f, "{} competitors exceed the pool capacity of {}", count, capacity)
            }
            SeedingError::EmptyPool { byes_needed, pool_size } => {
                write!(
                    f,
                    "{} byes with pools of {} would leave an empty pool",
                    byes_needed, pool_size
                )
            }
        }
    }
}

/// Validated distribution: how many pools, and how many empty slots remain.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DistributionPlan {
    pub pool_count: usize,
    pub byes_needed: usize,
}

/// Check that `count` competitors fit `pool_count` pools of `pool_size`.
pub fn validate_distribution(
    count: usize,
    pool_count: usize,
    pool_size: usize,
) -> Result<DistributionPlan, SeedingError> {
    if !(MIN_POOLS..=MAX_POOLS).contains(&pool_count) {
        return Err(SeedingError::PoolCountOutOfRange { pool_count });
    }
    let capacity = pool_count * pool_size;
    if count > capacity {
        return Err(SeedingError::TooManyCompetitors { count, capacity });
    }
    let byes_needed = capacity - count;
    if byes_needed >= pool_size {
        return Err(SeedingError::EmptyPool {
            byes_needed,
            pool_size,
        });
    }
    Ok(DistributionPlan {
        pool_count,
        byes_needed,
    })
}

/// Derive the pool count from the competitor count and validate it.
pub fn plan_pools(count: usize, pool_size: usize) -> Result<DistributionPlan, SeedingError> {
    if pool_size == 0 {
        return Err(SeedingError::EmptyPool {
            byes_needed: 0,
            pool_size,
        });
    }
    let pool_count = count.div_ceil(pool_size);
    validate_distribution(count, pool_count, pool_size)
}

/// Deal competitors into pools by seed in boustrophedon order (1..G, then
/// G..1, repeating) for balanced pool strength.
///
/// The final partial row is always dealt left-to-right so the byes land in
/// the trailing pools and earlier pools stay full.
pub fn snake_draft(competitors: &[Competitor], pool_count: usize) -> Vec<Group> {
    let mut by_seed: Vec<&Competitor> = competitors.iter().collect();
    by_seed.sort_by_key(|c| c.seed);

    let mut pools: Vec<Vec<CompetitorId>> = vec![Vec::new(); pool_count];
    let mut next = 0;
    let mut row = 0;
    while next < by_seed.len() {
        let remaining = by_seed.len() - next;
        let reversed = row % 2 == 1 && remaining >= pool_count;
        let order: Vec<usize> = if reversed {
            (0..pool_count).rev().collect()
        } else {
            (0..pool_count).collect()
        };
        for p in order {
            if next >= by_seed.len() {
                break;
            }
            pools[p].push(by_seed[next].id);
            next += 1;
        }
        row += 1;
    }

    into_groups(pools)
}

/// Shuffle competitors, then deal round-robin across the pools.
pub fn random_draft(competitors: &[Competitor], pool_count: usize) -> Vec<Group> {
    let mut ids: Vec<CompetitorId> = competitors.iter().map(|c| c.id).collect();
    ids.shuffle(&mut rand::thread_rng());

    let mut pools: Vec<Vec<CompetitorId>> = vec![Vec::new(); pool_count];
    for (i, id) in ids.into_iter().enumerate() {
        pools[i % pool_count].push(id);
    }

    into_groups(pools)
}

fn into_groups(pools: Vec<Vec<CompetitorId>>) -> Vec<Group> {
    pools
        .into_iter()
        .enumerate()
        .map(|(i, members)| Group::new(group_name(i), members))
        .collect()
}
