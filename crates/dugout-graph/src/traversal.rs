//! The four connectivity query algorithms
//!
//! All algorithms are read-only over a built `GraphIndex` and stateless
//! between calls. Wherever several answers would be equally valid, the
//! ascending-id rule decides: neighbor expansion, pair emission and
//! tie-breaks all run in ascending identifier order.

use crate::index::GraphIndex;
use dugout_core::{
    limits, Connection, Error, ManagerId, ManagerOverlap, PlayerId, PlayerPair, Result,
    SharedPathPair, TeamSeasonId, TeammateEntry,
};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Graph traversal engine
pub struct TraversalEngine;

impl TraversalEngine {
    /// Teammates of a player via the derived relation, ascending by
    /// player id, truncated to `limit` if given.
    pub fn teammates_of(
        index: &GraphIndex,
        player_id: &PlayerId,
        limit: Option<usize>,
    ) -> Result<Vec<TeammateEntry>> {
        index.player(player_id)?;
        if let Some(limit) = limit {
            limits::validate_limit(limit)?;
        }

        let mut out = Vec::new();
        for mate in index.teammates(player_id) {
            if let Some(limit) = limit {
                if out.len() == limit {
                    break;
                }
            }
            let pair = PlayerPair::new(player_id.clone(), mate.clone());
            let edge = index
                .teammate_edge(&pair)
                .expect("adjacency entry without a stored edge")
                .clone();
            out.push(TeammateEntry {
                player_id: mate.clone(),
                name: index.player(mate)?.name.clone(),
                edge,
            });
        }
        Ok(out)
    }

    /// Bounded breadth-first search over the teammate relation.
    ///
    /// Layer-by-layer expansion guarantees the returned path has the
    /// minimum hop count; ascending-id expansion makes the choice among
    /// equal-length paths deterministic. The hop bound doubles as the
    /// cancellation mechanism: no search runs past it.
    pub fn shortest_connection(
        index: &GraphIndex,
        a: &PlayerId,
        b: &PlayerId,
        max_hops: u32,
    ) -> Result<Connection> {
        index.player(a)?;
        index.player(b)?;
        limits::validate_max_hops(max_hops)?;

        if a == b {
            return Ok(Connection::Path {
                players: vec![a.clone()],
                hops: 0,
            });
        }

        let mut visited: BTreeSet<PlayerId> = BTreeSet::from([a.clone()]);
        let mut parent: BTreeMap<PlayerId, PlayerId> = BTreeMap::new();
        let mut queue: VecDeque<(PlayerId, u32)> = VecDeque::from([(a.clone(), 0)]);
        let mut expanded = 0usize;

        while let Some((current, depth)) = queue.pop_front() {
            if depth >= max_hops {
                continue;
            }
            expanded += 1;

            for mate in index.teammates(&current) {
                if !visited.insert(mate.clone()) {
                    continue;
                }
                parent.insert(mate.clone(), current.clone());
                if mate == b {
                    tracing::debug!(%a, %b, hops = depth + 1, expanded, "connection found");
                    return Ok(reconstruct_path(a, b, &parent));
                }
                queue.push_back((mate.clone(), depth + 1));
            }
        }

        tracing::debug!(%a, %b, max_hops, expanded, "no path within bound");
        Ok(Connection::NoPathWithinBound { max_hops })
    }

    /// Group players by identical development paths and emit every
    /// unordered pair within each qualifying group.
    ///
    /// A group qualifies when its shared team-season set spans at least
    /// `min_teams` distinct teams and holds at least `min_players`
    /// players. Results are ordered by path length descending, ties by
    /// pair ids ascending, and truncated to `limit`. Pair emission is
    /// counted against a work budget; exceeding it fails the query
    /// instead of running unbounded.
    pub fn shared_development_paths(
        index: &GraphIndex,
        min_teams: usize,
        min_players: usize,
        limit: usize,
    ) -> Result<Vec<SharedPathPair>> {
        Self::shared_paths_bounded(index, min_teams, min_players, limit, limits::PATH_WORK_BUDGET)
    }

    /// Budget-parameterized body of `shared_development_paths`.
    fn shared_paths_bounded(
        index: &GraphIndex,
        min_teams: usize,
        min_players: usize,
        limit: usize,
        budget: usize,
    ) -> Result<Vec<SharedPathPair>> {
        limits::validate_group_thresholds(min_teams, min_players)?;
        limits::validate_limit(limit)?;

        // Group by identical team-season set; the BTreeMap keys groups in
        // a stable order.
        let mut groups: BTreeMap<&BTreeSet<TeamSeasonId>, Vec<&PlayerId>> = BTreeMap::new();
        for (player, path) in index.all_appearances() {
            if !path.is_empty() {
                groups.entry(path).or_default().push(player);
            }
        }

        let mut pairs: Vec<SharedPathPair> = Vec::new();
        let mut spent = 0usize;

        for (path, members) in groups {
            if members.len() < min_players {
                continue;
            }
            let teams: BTreeSet<_> = path.iter().map(|ts| ts.team_id()).collect();
            if teams.len() < min_teams {
                continue;
            }

            let team_list: Vec<_> = teams.into_iter().collect();
            for (i, p) in members.iter().enumerate() {
                for q in &members[i + 1..] {
                    spent += 1;
                    if spent > budget {
                        return Err(Error::BudgetExceeded { spent, budget });
                    }
                    // Members came out of a BTreeMap, already ascending
                    pairs.push(SharedPathPair {
                        player_a: (*p).clone(),
                        player_b: (*q).clone(),
                        team_seasons: path.clone(),
                        teams: team_list.clone(),
                    });
                }
            }
        }

        pairs.sort_by(|x, y| {
            y.path_len()
                .cmp(&x.path_len())
                .then_with(|| x.player_a.cmp(&y.player_a))
                .then_with(|| x.player_b.cmp(&y.player_b))
        });
        pairs.truncate(limit);

        tracing::debug!(pairs = pairs.len(), spent, "development-path grouping done");
        Ok(pairs)
    }

    /// Managers reachable from both players through their performance
    /// edges.
    ///
    /// Picks the lexicographically smallest shared manager, and for each
    /// player the earliest qualifying team-season (ties by id).
    pub fn manager_overlap(
        index: &GraphIndex,
        a: &PlayerId,
        b: &PlayerId,
    ) -> Result<ManagerOverlap> {
        index.player(a)?;
        index.player(b)?;

        let reach_a = managers_reached(index, a);
        let reach_b = managers_reached(index, b);

        // BTreeMap iteration is ascending, so the first shared key is the
        // smallest manager id.
        for (manager_id, seasons_a) in &reach_a {
            if let Some(seasons_b) = reach_b.get(manager_id) {
                let manager = index.manager(manager_id)?;
                return Ok(ManagerOverlap::Shared {
                    manager_id: manager_id.clone(),
                    manager_name: manager.name.clone(),
                    team_season_a: earliest(index, seasons_a),
                    team_season_b: earliest(index, seasons_b),
                });
            }
        }
        Ok(ManagerOverlap::NoOverlap)
    }
}

/// Managers who ran any team-season the player appeared in, with the
/// qualifying team-seasons per manager.
fn managers_reached(
    index: &GraphIndex,
    player: &PlayerId,
) -> BTreeMap<ManagerId, BTreeSet<TeamSeasonId>> {
    let mut reached: BTreeMap<ManagerId, BTreeSet<TeamSeasonId>> = BTreeMap::new();
    if let Some(appearances) = index.appearances(player) {
        for ts in appearances {
            if let Some(managers) = index.managers_of(ts) {
                for manager in managers {
                    reached
                        .entry(manager.clone())
                        .or_default()
                        .insert(ts.clone());
                }
            }
        }
    }
    reached
}

/// Earliest team-season by year, ties broken by id.
fn earliest(index: &GraphIndex, seasons: &BTreeSet<TeamSeasonId>) -> TeamSeasonId {
    seasons
        .iter()
        .min_by_key(|ts| {
            let year = index
                .team_season(ts)
                .map(|record| record.year)
                .unwrap_or_else(|_| ts.year());
            (year, (*ts).clone())
        })
        .expect("qualifying season set is never empty")
        .clone()
}

fn reconstruct_path(start: &PlayerId, end: &PlayerId, parent: &BTreeMap<PlayerId, PlayerId>) -> Connection {
    let mut players = vec![end.clone()];
    let mut current = end;
    while current != start {
        let prev = &parent[current];
        players.push(prev.clone());
        current = prev;
    }
    players.reverse();
    let hops = players.len() - 1;
    Connection::Path { players, hops }
}
