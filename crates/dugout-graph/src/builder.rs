//! The build barrier: record validation, edge indexing and teammate
//! derivation
//!
//! Building runs as one sequential phase. Teammate aggregation needs a
//! complete view of every roster before any pair can be finalized, so
//! nothing is queryable until `build` returns.

use crate::index::GraphIndex;
use dugout_core::{
    limits, Error, PlayerId, PlayerPair, RecordSet, Result, TeamSeasonId, TeammateEdge,
};
use std::collections::{BTreeMap, BTreeSet};

/// Builds a `GraphIndex` from a validated record set.
pub struct GraphBuilder;

impl GraphBuilder {
    /// Run the full build: entities, raw edges, then teammate derivation.
    ///
    /// A primary-key collision on any entity is fatal. A malformed or
    /// dangling record (unknown endpoint, inconsistent team-season id,
    /// season outside the corpus window) aborts that record only; it is
    /// skipped with a warning and the build continues.
    pub fn build(records: RecordSet) -> Result<GraphIndex> {
        let mut index = GraphIndex::new();
        let mut skipped = 0usize;

        for player in records.players {
            index.insert_player(player)?;
        }
        for team in records.teams {
            index.insert_team(team)?;
        }
        for ts in records.team_seasons {
            if !ts.id_is_consistent() {
                tracing::warn!(id = %ts.id, "skipping team-season with inconsistent id");
                skipped += 1;
                continue;
            }
            if let Err(err) = limits::validate_season(ts.year) {
                tracing::warn!(id = %ts.id, %err, "skipping team-season");
                skipped += 1;
                continue;
            }
            index.insert_team_season(ts)?;
        }
        for manager in records.managers {
            index.insert_manager(manager)?;
        }
        for park in records.parks {
            index.insert_park(park)?;
        }

        for edge in records.performance {
            if let Err(err) = index.link_performance(edge) {
                match err {
                    Error::Validation(msg) => {
                        tracing::warn!(%msg, "skipping performance edge");
                        skipped += 1;
                    }
                    other => return Err(other),
                }
            }
        }
        for edge in records.managed {
            if let Err(err) = index.link_managed(edge) {
                match err {
                    Error::Validation(msg) => {
                        tracing::warn!(%msg, "skipping managed edge");
                        skipped += 1;
                    }
                    other => return Err(other),
                }
            }
        }
        for edge in records.home_parks {
            if let Err(err) = index.link_home_park(edge) {
                match err {
                    Error::Validation(msg) => {
                        tracing::warn!(%msg, "skipping home-park edge");
                        skipped += 1;
                    }
                    other => return Err(other),
                }
            }
        }

        let teammate_edges = derive_teammate_edges(index.rosters());
        let edge_count = teammate_edges.len();
        for (pair, edge) in teammate_edges {
            index.insert_teammate_edge(pair, edge);
        }

        tracing::info!(
            players = index.players().len(),
            team_seasons = index.team_seasons().len(),
            teammate_edges = edge_count,
            skipped,
            "graph build complete"
        );
        Ok(index)
    }
}

/// Derive the aggregated teammate relation from team-season rosters.
///
/// Pure function of its input: for each roster, every unordered player
/// pair is upserted with union/min/max aggregation over the shared
/// team-season. Rosters and pairs are iterated in ascending id order, so
/// rebuilding from the same input yields a byte-identical edge set no
/// matter how the records arrived. O(k²) per roster of size k.
pub fn derive_teammate_edges(
    rosters: &BTreeMap<TeamSeasonId, BTreeSet<PlayerId>>,
) -> BTreeMap<PlayerPair, TeammateEdge> {
    let mut edges: BTreeMap<PlayerPair, TeammateEdge> = BTreeMap::new();

    for (ts_id, roster) in rosters {
        let team_id = ts_id.team_id();
        let year = ts_id.year();
        let players: Vec<&PlayerId> = roster.iter().collect();

        for (i, p) in players.iter().enumerate() {
            for q in &players[i + 1..] {
                let pair = PlayerPair::new((*p).clone(), (*q).clone());
                match edges.get_mut(&pair) {
                    Some(edge) => edge.absorb(team_id.clone(), year),
                    None => {
                        edges.insert(pair, TeammateEdge::new(team_id.clone(), year));
                    }
                }
            }
        }
    }

    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use dugout_core::{
        PerformanceEdge, PerformanceKind, Player, Team, TeamId, TeamSeason,
    };

    fn ts_id(team: &str, year: u16) -> TeamSeasonId {
        TeamSeasonId::new(&TeamId::new(team), year)
    }

    fn roster_records(entries: &[(&str, &str, u16, PerformanceKind)]) -> RecordSet {
        let mut records = RecordSet::default();
        let mut seen_players = BTreeSet::new();
        let mut seen_teams = BTreeSet::new();
        let mut seen_ts = BTreeSet::new();

        for (player, team, year, kind) in entries {
            if seen_players.insert(*player) {
                records.players.push(Player::new(*player, *player));
            }
            if seen_teams.insert(*team) {
                records.teams.push(Team::new(*team, *team, "AL"));
            }
            if seen_ts.insert((*team, *year)) {
                records.team_seasons.push(TeamSeason::new(*team, *year));
            }
            records
                .performance
                .push(PerformanceEdge::new(*player, ts_id(team, *year), *kind));
        }
        records
    }

    #[test]
    fn test_roster_pairs_all_derived() {
        // BOS-2023 roster {a, b, c} via batting edges
        let records = roster_records(&[
            ("a", "BOS", 2023, PerformanceKind::BattedFor),
            ("b", "BOS", 2023, PerformanceKind::BattedFor),
            ("c", "BOS", 2023, PerformanceKind::BattedFor),
        ]);
        let index = GraphBuilder::build(records).unwrap();

        let edges = index.teammate_edges();
        assert_eq!(edges.len(), 3);
        for (a, b) in [("a", "b"), ("a", "c"), ("b", "c")] {
            let pair = PlayerPair::new(PlayerId::new(a), PlayerId::new(b));
            let edge = edges.get(&pair).expect("pair should exist");
            assert_eq!(edge.teams, BTreeSet::from([TeamId::new("BOS")]));
            assert_eq!(edge.seasons, BTreeSet::from([2023]));
            assert_eq!(edge.first_season_together, 2023);
            assert_eq!(edge.last_season_together, 2023);
        }
    }

    #[test]
    fn test_mixed_performance_kinds_share_roster() {
        // A pitcher-only and a fielder-only player are still teammates
        let records = roster_records(&[
            ("batter", "BOS", 2023, PerformanceKind::BattedFor),
            ("pitcher", "BOS", 2023, PerformanceKind::PitchedFor),
            ("fielder", "BOS", 2023, PerformanceKind::FieldedFor),
        ]);
        let index = GraphBuilder::build(records).unwrap();
        assert_eq!(index.teammate_edges().len(), 3);
    }

    #[test]
    fn test_aggregation_across_team_seasons() {
        let records = roster_records(&[
            ("a", "BOS", 2021, PerformanceKind::BattedFor),
            ("b", "BOS", 2021, PerformanceKind::BattedFor),
            ("a", "NYY", 2023, PerformanceKind::BattedFor),
            ("b", "NYY", 2023, PerformanceKind::PitchedFor),
        ]);
        let index = GraphBuilder::build(records).unwrap();

        let pair = PlayerPair::new(PlayerId::new("a"), PlayerId::new("b"));
        let edge = index.teammate_edge(&pair).unwrap();
        assert_eq!(edge.first_season_together, 2021);
        assert_eq!(edge.last_season_together, 2023);
        assert_eq!(
            edge.teams,
            BTreeSet::from([TeamId::new("BOS"), TeamId::new("NYY")])
        );
        assert_eq!(edge.seasons, BTreeSet::from([2021, 2023]));
        // One edge per unordered pair, however many team-seasons connect them
        assert_eq!(index.teammate_edges().len(), 1);
    }

    #[test]
    fn test_derivation_is_order_independent() {
        let forward = roster_records(&[
            ("a", "BOS", 2023, PerformanceKind::BattedFor),
            ("b", "BOS", 2023, PerformanceKind::BattedFor),
            ("c", "NYY", 2024, PerformanceKind::PitchedFor),
            ("b", "NYY", 2024, PerformanceKind::BattedFor),
        ]);
        let mut shuffled = forward.clone();
        shuffled.performance.reverse();
        shuffled.players.reverse();

        let first = GraphBuilder::build(forward).unwrap();
        let second = GraphBuilder::build(shuffled).unwrap();

        let a = serde_json::to_vec(first.teammate_edges()).unwrap();
        let b = serde_json::to_vec(second.teammate_edges()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rebuild_is_byte_identical() {
        let records = roster_records(&[
            ("a", "BOS", 2023, PerformanceKind::BattedFor),
            ("b", "BOS", 2023, PerformanceKind::FieldedFor),
        ]);
        let first = GraphBuilder::build(records.clone()).unwrap();
        let second = GraphBuilder::build(records).unwrap();

        assert_eq!(
            serde_json::to_vec(first.teammate_edges()).unwrap(),
            serde_json::to_vec(second.teammate_edges()).unwrap()
        );
    }

    #[test]
    fn test_loner_has_no_edges() {
        let records = roster_records(&[("a", "BOS", 2023, PerformanceKind::BattedFor)]);
        let index = GraphBuilder::build(records).unwrap();
        assert!(index.teammate_edges().is_empty());
        assert_eq!(index.teammates(&PlayerId::new("a")).count(), 0);
    }

    #[test]
    fn test_duplicate_player_key_is_fatal() {
        let mut records = roster_records(&[("a", "BOS", 2023, PerformanceKind::BattedFor)]);
        records.players.push(Player::new("a", "Duplicate"));
        let err = GraphBuilder::build(records).unwrap_err();
        assert!(matches!(err, Error::DuplicateKey { .. }));
    }

    #[test]
    fn test_dangling_edge_skipped_not_fatal() {
        let mut records = roster_records(&[
            ("a", "BOS", 2023, PerformanceKind::BattedFor),
            ("b", "BOS", 2023, PerformanceKind::BattedFor),
        ]);
        records.performance.push(PerformanceEdge::new(
            "ghost",
            ts_id("BOS", 2023),
            PerformanceKind::BattedFor,
        ));

        let index = GraphBuilder::build(records).unwrap();
        // The dangling edge contributed nothing
        assert_eq!(index.teammate_edges().len(), 1);
        assert!(index.player(&PlayerId::new("ghost")).is_err());
    }

    #[test]
    fn test_out_of_window_season_skipped() {
        let mut records = roster_records(&[("a", "BOS", 2023, PerformanceKind::BattedFor)]);
        records.team_seasons.push(TeamSeason::new("BOS", 2019));

        let index = GraphBuilder::build(records).unwrap();
        assert!(index.team_season(&ts_id("BOS", 2019)).is_err());
        assert!(index.team_season(&ts_id("BOS", 2023)).is_ok());
    }
}
