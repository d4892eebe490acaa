//! Typed query entry points over a built roster graph
//!
//! `RosterGraph` is what external callers (CLI, test harness, reporting)
//! consume. It owns the immutable index; every query method takes `&self`,
//! so concurrent readers need no locks.

use crate::builder::GraphBuilder;
use crate::index::GraphIndex;
use crate::snapshot;
use crate::traversal::TraversalEngine;
use dugout_core::{
    limits, Connection, Error, ManagerOverlap, ManagersAndParks, MultiTeamPlayer, PlayerId,
    RecordSet, Result, RosterEntry, SeasonSummary, SharedPathPair, SharedSeasonPair, Snapshot,
    TeamId, TeamSeasonId, TeammateEntry,
};

/// The roster connectivity graph: a built index plus its query surface.
pub struct RosterGraph {
    index: GraphIndex,
}

impl RosterGraph {
    /// Build from a validated record set (runs the full build barrier,
    /// including teammate derivation).
    pub fn from_records(records: RecordSet) -> Result<Self> {
        Ok(Self {
            index: GraphBuilder::build(records)?,
        })
    }

    /// Rebuild from a snapshot. Derived edges travel in the snapshot, so
    /// no derivation pass runs.
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self> {
        Ok(Self {
            index: snapshot::restore(snapshot)?,
        })
    }

    /// Export the reproducibility snapshot of this graph.
    pub fn snapshot(&self) -> Snapshot {
        snapshot::export(&self.index)
    }

    pub fn index(&self) -> &GraphIndex {
        &self.index
    }

    // ─────────────────────────────────────────────────────────────────────
    // Core connectivity queries
    // ─────────────────────────────────────────────────────────────────────

    pub fn teammates_of(
        &self,
        player_id: &PlayerId,
        limit: Option<usize>,
    ) -> Result<Vec<TeammateEntry>> {
        TraversalEngine::teammates_of(&self.index, player_id, limit)
    }

    pub fn shortest_connection(
        &self,
        a: &PlayerId,
        b: &PlayerId,
        max_hops: u32,
    ) -> Result<Connection> {
        TraversalEngine::shortest_connection(&self.index, a, b, max_hops)
    }

    pub fn shared_development_paths(
        &self,
        min_teams: usize,
        min_players: usize,
        limit: usize,
    ) -> Result<Vec<SharedPathPair>> {
        TraversalEngine::shared_development_paths(&self.index, min_teams, min_players, limit)
    }

    pub fn manager_overlap(&self, a: &PlayerId, b: &PlayerId) -> Result<ManagerOverlap> {
        TraversalEngine::manager_overlap(&self.index, a, b)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Roster and season lookups
    // ─────────────────────────────────────────────────────────────────────

    /// Players on a team in a given year, sorted by name.
    pub fn roster(&self, team_id: &TeamId, year: u16) -> Result<Vec<RosterEntry>> {
        let ts_id = TeamSeasonId::new(team_id, year);
        self.index.team_season(&ts_id)?;

        let mut entries: Vec<RosterEntry> = self
            .index
            .roster(&ts_id)
            .into_iter()
            .flat_map(|roster| roster.iter())
            .map(|player_id| {
                let player = self.index.player(player_id)?;
                Ok(RosterEntry {
                    player_id: player_id.clone(),
                    name: player.name.clone(),
                })
            })
            .collect::<Result<_>>()?;
        entries.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.player_id.cmp(&b.player_id)));
        Ok(entries)
    }

    /// Season summary stats for a team in a given year.
    pub fn season_summary(&self, team_id: &TeamId, year: u16) -> Result<SeasonSummary> {
        let ts = self.index.team_season(&TeamSeasonId::new(team_id, year))?;
        let team = self.index.team(team_id)?;
        Ok(SeasonSummary {
            team: team.name.clone(),
            team_id: team_id.clone(),
            year,
            division: ts.division.clone(),
            rank: ts.rank,
            wins: ts.wins,
            losses: ts.losses,
            runs: ts.runs,
            home_runs: ts.home_runs,
            attendance: ts.attendance,
        })
    }

    /// Managers and home park for a team in a given year.
    pub fn managers_and_parks(&self, team_id: &TeamId, year: u16) -> Result<ManagersAndParks> {
        let ts_id = TeamSeasonId::new(team_id, year);
        self.index.team_season(&ts_id)?;
        let team = self.index.team(team_id)?;

        let managers = self
            .index
            .managers_of(&ts_id)
            .into_iter()
            .flat_map(|set| set.iter())
            .map(|id| {
                Ok(self.index.manager(id)?.name.clone())
            })
            .collect::<Result<_>>()?;
        let parks = match self.index.home_park_of(&ts_id) {
            Some(id) => vec![self.index.park(id)?.name.clone()],
            None => Vec::new(),
        };

        Ok(ManagersAndParks {
            team: team.name.clone(),
            year,
            managers,
            parks,
        })
    }

    /// Players who appeared for at least `min_team_seasons` distinct
    /// team-seasons, ordered by count descending then name.
    pub fn multi_team_players(
        &self,
        min_team_seasons: usize,
        limit: usize,
    ) -> Result<Vec<MultiTeamPlayer>> {
        if min_team_seasons == 0 {
            return Err(Error::InvalidParameter(
                "min team-seasons must be positive".into(),
            ));
        }
        limits::validate_limit(limit)?;

        let mut players: Vec<MultiTeamPlayer> = self
            .index
            .all_appearances()
            .iter()
            .filter(|(_, path)| path.len() >= min_team_seasons)
            .map(|(player_id, path)| {
                let player = self.index.player(player_id)?;
                Ok(MultiTeamPlayer {
                    player_id: player_id.clone(),
                    name: player.name.clone(),
                    team_seasons: path.len(),
                })
            })
            .collect::<Result<_>>()?;
        players.sort_by(|a, b| {
            b.team_seasons
                .cmp(&a.team_seasons)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.player_id.cmp(&b.player_id))
        });
        players.truncate(limit);
        Ok(players)
    }

    /// Teammate pairs who shared at least `min_shared` team-seasons,
    /// ordered by shared count descending then pair ids.
    pub fn shared_season_pairs(
        &self,
        min_shared: usize,
        limit: usize,
    ) -> Result<Vec<SharedSeasonPair>> {
        if min_shared == 0 {
            return Err(Error::InvalidParameter(
                "min shared team-seasons must be positive".into(),
            ));
        }
        limits::validate_limit(limit)?;

        let mut pairs = Vec::new();
        for pair in self.index.teammate_edges().keys() {
            // The shared team-season set is the intersection of the two
            // development paths; the aggregate edge alone cannot recover it.
            let (Some(path_a), Some(path_b)) = (
                self.index.appearances(pair.first()),
                self.index.appearances(pair.second()),
            ) else {
                continue;
            };
            let shared: Vec<TeamSeasonId> = path_a.intersection(path_b).cloned().collect();
            if shared.len() >= min_shared {
                pairs.push(SharedSeasonPair {
                    player_a: pair.first().clone(),
                    player_b: pair.second().clone(),
                    shared: shared.len(),
                    team_seasons: shared,
                });
            }
        }
        pairs.sort_by(|a, b| {
            b.shared
                .cmp(&a.shared)
                .then_with(|| a.player_a.cmp(&b.player_a))
                .then_with(|| a.player_b.cmp(&b.player_b))
        });
        pairs.truncate(limit);
        Ok(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dugout_core::{
        HomeParkEdge, ManagedEdge, Manager, Park, PerformanceEdge, PerformanceKind, Player, Team,
        TeamSeason,
    };

    fn ts_id(team: &str, year: u16) -> TeamSeasonId {
        TeamSeasonId::new(&TeamId::new(team), year)
    }

    fn sample_graph() -> RosterGraph {
        let mut records = RecordSet::default();
        records.players.push(Player::new("devera01", "Rafael Devers"));
        records.players.push(Player::new("casastr01", "Triston Casas"));
        records.players.push(Player::new("judgeaa01", "Aaron Judge"));
        records.teams.push(Team::new("BOS", "Boston Red Sox", "AL"));
        records.teams.push(Team::new("NYY", "New York Yankees", "AL"));

        let mut bos = TeamSeason::new("BOS", 2023);
        bos.wins = 78;
        bos.losses = 84;
        bos.division = "E".into();
        bos.rank = 5;
        bos.runs = 772;
        bos.home_runs = 182;
        bos.attendance = Some(2_672_100);
        records.team_seasons.push(bos);
        records.team_seasons.push(TeamSeason::new("NYY", 2023));

        records.managers.push(Manager::new("coraal01", "Alex Cora"));
        records.parks.push(Park::new("BOS07", "Fenway Park"));

        for (player, team) in [
            ("devera01", "BOS"),
            ("casastr01", "BOS"),
            ("judgeaa01", "NYY"),
        ] {
            records.performance.push(PerformanceEdge::new(
                player,
                ts_id(team, 2023),
                PerformanceKind::BattedFor,
            ));
        }
        records
            .managed
            .push(ManagedEdge::new("coraal01", ts_id("BOS", 2023)));
        records
            .home_parks
            .push(HomeParkEdge::new(ts_id("BOS", 2023), "BOS07"));

        RosterGraph::from_records(records).unwrap()
    }

    #[test]
    fn test_roster_sorted_by_name() {
        let graph = sample_graph();
        let roster = graph.roster(&TeamId::new("BOS"), 2023).unwrap();
        assert_eq!(
            roster.iter().map(|e| e.name.as_str()).collect::<Vec<_>>(),
            vec!["Rafael Devers", "Triston Casas"]
        );
    }

    #[test]
    fn test_roster_unknown_team_season() {
        let graph = sample_graph();
        let err = graph.roster(&TeamId::new("BOS"), 2024).unwrap_err();
        assert!(matches!(err, Error::NodeNotFound { .. }));
    }

    #[test]
    fn test_season_summary() {
        let graph = sample_graph();
        let summary = graph.season_summary(&TeamId::new("BOS"), 2023).unwrap();
        assert_eq!(summary.team, "Boston Red Sox");
        assert_eq!(summary.wins, 78);
        assert_eq!(summary.rank, 5);
        assert_eq!(summary.attendance, Some(2_672_100));
    }

    #[test]
    fn test_managers_and_parks() {
        let graph = sample_graph();
        let result = graph.managers_and_parks(&TeamId::new("BOS"), 2023).unwrap();
        assert_eq!(result.managers, vec!["Alex Cora"]);
        assert_eq!(result.parks, vec!["Fenway Park"]);

        // NYY-2023 exists but has neither manager nor park records
        let bare = graph.managers_and_parks(&TeamId::new("NYY"), 2023).unwrap();
        assert!(bare.managers.is_empty());
        assert!(bare.parks.is_empty());
    }

    #[test]
    fn test_multi_team_players() {
        let graph = sample_graph();
        let all = graph.multi_team_players(1, 50).unwrap();
        assert_eq!(all.len(), 3);

        let multi = graph.multi_team_players(2, 50).unwrap();
        assert!(multi.is_empty());

        assert!(matches!(
            graph.multi_team_players(0, 50),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_shared_season_pairs() {
        let graph = sample_graph();
        let pairs = graph.shared_season_pairs(1, 50).unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].player_a, PlayerId::new("casastr01"));
        assert_eq!(pairs[0].player_b, PlayerId::new("devera01"));
        assert_eq!(pairs[0].team_seasons, vec![ts_id("BOS", 2023)]);

        assert!(graph.shared_season_pairs(2, 50).unwrap().is_empty());
    }

    #[test]
    fn test_facade_delegates_core_queries() {
        let graph = sample_graph();
        let mates = graph.teammates_of(&PlayerId::new("devera01"), None).unwrap();
        assert_eq!(mates.len(), 1);
        assert_eq!(mates[0].player_id, PlayerId::new("casastr01"));

        let conn = graph
            .shortest_connection(&PlayerId::new("devera01"), &PlayerId::new("judgeaa01"), 6)
            .unwrap();
        assert!(!conn.path_found());
    }
}
