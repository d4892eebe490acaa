//! Typed query results returned by the traversal engine and façade

use crate::edge::TeammateEdge;
use crate::entity::{ManagerId, PlayerId, TeamId, TeamSeasonId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One teammate of the queried player, with the aggregated edge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeammateEntry {
    pub player_id: PlayerId,
    pub name: String,
    pub edge: TeammateEdge,
}

/// Result of a bounded shortest-connection search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Connection {
    /// A minimum-hop teammate path, endpoints included
    Path { players: Vec<PlayerId>, hops: usize },

    /// No path exists within the hop bound. Says nothing about
    /// reachability beyond the bound.
    NoPathWithinBound { max_hops: u32 },
}

impl Connection {
    pub fn path_found(&self) -> bool {
        matches!(self, Self::Path { .. })
    }
}

/// A pair of players who reached the identical set of team-seasons
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedPathPair {
    pub player_a: PlayerId,
    pub player_b: PlayerId,

    /// The shared development path
    pub team_seasons: BTreeSet<TeamSeasonId>,

    /// Distinct teams embedded in the path, ascending
    pub teams: Vec<TeamId>,
}

impl SharedPathPair {
    /// Path length: the number of shared team-seasons.
    pub fn path_len(&self) -> usize {
        self.team_seasons.len()
    }
}

/// Result of a manager-overlap query between two players
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ManagerOverlap {
    /// Both players played under this manager
    Shared {
        manager_id: ManagerId,
        manager_name: String,
        /// Earliest qualifying team-season for the first player
        team_season_a: TeamSeasonId,
        /// Earliest qualifying team-season for the second player
        team_season_b: TeamSeasonId,
    },

    /// The reachable manager sets do not intersect
    NoOverlap,
}

/// One player on a team-season roster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntry {
    pub player_id: PlayerId,
    pub name: String,
}

/// Season summary stats for one team-season
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonSummary {
    pub team: String,
    pub team_id: TeamId,
    pub year: u16,
    pub division: String,
    pub rank: u8,
    pub wins: u16,
    pub losses: u16,
    pub runs: u32,
    pub home_runs: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendance: Option<u64>,
}

/// Managers and home park for one team-season
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagersAndParks {
    pub team: String,
    pub year: u16,
    pub managers: Vec<String>,
    pub parks: Vec<String>,
}

/// A player who appeared for several distinct team-seasons
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiTeamPlayer {
    pub player_id: PlayerId,
    pub name: String,
    pub team_seasons: usize,
}

/// A teammate pair that shared several team-seasons
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedSeasonPair {
    pub player_a: PlayerId,
    pub player_b: PlayerId,
    pub shared: usize,
    pub team_seasons: Vec<TeamSeasonId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_serde_shape() {
        let conn = Connection::NoPathWithinBound { max_hops: 3 };
        let json = serde_json::to_value(&conn).unwrap();
        assert_eq!(json["result"], "no_path_within_bound");
        assert_eq!(json["max_hops"], 3);

        let back: Connection = serde_json::from_value(json).unwrap();
        assert_eq!(back, conn);
    }

    #[test]
    fn test_path_found() {
        let path = Connection::Path {
            players: vec![PlayerId::new("a"), PlayerId::new("b")],
            hops: 1,
        };
        assert!(path.path_found());
        assert!(!Connection::NoPathWithinBound { max_hops: 2 }.path_found());
    }
}
