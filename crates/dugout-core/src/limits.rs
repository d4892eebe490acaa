//! Query-parameter limits and validation

use crate::error::{Error, Result};

/// First season covered by the corpus
pub const SEASON_MIN: u16 = 2020;

/// Last season covered by the corpus
pub const SEASON_MAX: u16 = 2024;

/// Hard cap on the hop bound for shortest-connection searches (25)
pub const MAX_CONNECTION_HOPS: u32 = 25;

/// Maximum results a single list query may return (1000)
pub const MAX_RESULT_LIMIT: usize = 1000;

/// Work budget for development-path grouping: candidate pairs examined
/// before the query fails with `BudgetExceeded` (100k)
pub const PATH_WORK_BUDGET: usize = 100_000;

/// Validate the hop bound for a shortest-connection search.
///
/// Zero is allowed: the same-player query still answers with a
/// zero-length path.
pub fn validate_max_hops(max_hops: u32) -> Result<()> {
    if max_hops > MAX_CONNECTION_HOPS {
        return Err(Error::InvalidParameter(format!(
            "max hops {} over cap {}",
            max_hops, MAX_CONNECTION_HOPS
        )));
    }
    Ok(())
}

/// Validate a result limit for list-returning queries.
pub fn validate_limit(limit: usize) -> Result<()> {
    if limit == 0 {
        return Err(Error::InvalidParameter("limit must be positive".into()));
    }
    if limit > MAX_RESULT_LIMIT {
        return Err(Error::InvalidParameter(format!(
            "limit {} over cap {}",
            limit, MAX_RESULT_LIMIT
        )));
    }
    Ok(())
}

/// Validate group thresholds for development-path queries.
pub fn validate_group_thresholds(min_teams: usize, min_players: usize) -> Result<()> {
    if min_teams == 0 {
        return Err(Error::InvalidParameter("min teams must be positive".into()));
    }
    if min_players < 2 {
        return Err(Error::InvalidParameter(
            "min players must be at least 2 to form a pair".into(),
        ));
    }
    Ok(())
}

/// Check a season year against the corpus window.
pub fn validate_season(year: u16) -> Result<()> {
    if !(SEASON_MIN..=SEASON_MAX).contains(&year) {
        return Err(Error::Validation(format!(
            "season {} outside corpus window {}-{}",
            year, SEASON_MIN, SEASON_MAX
        )));
    }
    Ok(())
}
