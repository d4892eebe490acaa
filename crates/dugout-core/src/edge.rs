//! Edge records: raw performance/management edges and the derived
//! teammate relation

use crate::entity::{
    Manager, ManagerId, Park, ParkId, Player, PlayerId, Team, TeamId, TeamSeason, TeamSeasonId,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// The kind of performance record connecting a player to a team-season
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceKind {
    BattedFor,
    PitchedFor,
    FieldedFor,
}

/// Every edge kind the graph index can answer neighbor queries for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    BattedFor,
    PitchedFor,
    FieldedFor,
    PlayedInSeason,
    InSeason,
    Managed,
    PlayedHomeGamesAt,
    TeammateWith,
}

impl From<PerformanceKind> for EdgeKind {
    fn from(kind: PerformanceKind) -> Self {
        match kind {
            PerformanceKind::BattedFor => Self::BattedFor,
            PerformanceKind::PitchedFor => Self::PitchedFor,
            PerformanceKind::FieldedFor => Self::FieldedFor,
        }
    }
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::BattedFor => "BATTED_FOR",
            Self::PitchedFor => "PITCHED_FOR",
            Self::FieldedFor => "FIELDED_FOR",
            Self::PlayedInSeason => "PLAYED_IN_SEASON",
            Self::InSeason => "IN_SEASON",
            Self::Managed => "MANAGED",
            Self::PlayedHomeGamesAt => "PLAYED_HOME_GAMES_AT",
            Self::TeammateWith => "TEAMMATE_WITH",
        };
        write!(f, "{}", s)
    }
}

/// One player's batting, pitching or fielding record for one team-season.
///
/// A player can have several edges of the same kind to the same
/// team-season, distinguished by stint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceEdge {
    pub player_id: PlayerId,
    pub team_season_id: TeamSeasonId,
    pub kind: PerformanceKind,

    #[serde(default = "default_stint")]
    pub stint: u8,

    /// Full stat set for the record (AB/H/HR for batting, W/L/SO for
    /// pitching, PO/A/E for fielding, ...). Kept opaque; the engine never
    /// interprets individual statistics.
    #[serde(default)]
    pub stats: BTreeMap<String, serde_json::Value>,
}

fn default_stint() -> u8 {
    1
}

impl PerformanceEdge {
    pub fn new(
        player_id: impl Into<PlayerId>,
        team_season_id: TeamSeasonId,
        kind: PerformanceKind,
    ) -> Self {
        Self {
            player_id: player_id.into(),
            team_season_id,
            kind,
            stint: 1,
            stats: BTreeMap::new(),
        }
    }

    pub fn with_stint(mut self, stint: u8) -> Self {
        self.stint = stint;
        self
    }

    pub fn with_stat(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.stats.insert(key.into(), value.into());
        self
    }
}

/// A manager ran one team-season
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagedEdge {
    pub manager_id: ManagerId,
    pub team_season_id: TeamSeasonId,
}

impl ManagedEdge {
    pub fn new(manager_id: impl Into<ManagerId>, team_season_id: TeamSeasonId) -> Self {
        Self {
            manager_id: manager_id.into(),
            team_season_id,
        }
    }
}

/// A team-season played its home games at one park
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeParkEdge {
    pub team_season_id: TeamSeasonId,
    pub park_id: ParkId,
}

impl HomeParkEdge {
    pub fn new(team_season_id: TeamSeasonId, park_id: impl Into<ParkId>) -> Self {
        Self {
            team_season_id,
            park_id: park_id.into(),
        }
    }
}

/// Canonical key for an unordered player pair: the two ids in ascending
/// order, so every pair has exactly one representation. Serializes as the
/// single string `"{first}|{second}"`, so maps keyed by pairs stay valid
/// JSON objects.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerPair(PlayerId, PlayerId);

impl Serialize for PlayerPair {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&format_args!("{}|{}", self.0, self.1))
    }
}

impl<'de> Deserialize<'de> for PlayerPair {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let (a, b) = s.split_once('|').ok_or_else(|| {
            serde::de::Error::custom(format!("malformed player pair: {:?}", s))
        })?;
        Ok(Self::new(PlayerId::new(a), PlayerId::new(b)))
    }
}

impl PlayerPair {
    pub fn new(a: PlayerId, b: PlayerId) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    pub fn first(&self) -> &PlayerId {
        &self.0
    }

    pub fn second(&self) -> &PlayerId {
        &self.1
    }

    /// Given one endpoint, return the other. None if `player` is not part
    /// of the pair.
    pub fn other(&self, player: &PlayerId) -> Option<&PlayerId> {
        if &self.0 == player {
            Some(&self.1)
        } else if &self.1 == player {
            Some(&self.0)
        } else {
            None
        }
    }
}

/// The derived, aggregated teammate relation between two players who
/// shared at least one team-season roster. Stored once per unordered pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeammateEdge {
    pub first_season_together: u16,
    pub last_season_together: u16,
    pub teams: BTreeSet<TeamId>,
    pub seasons: BTreeSet<u16>,
}

impl TeammateEdge {
    /// Start an edge from the first shared team-season.
    pub fn new(team_id: TeamId, year: u16) -> Self {
        Self {
            first_season_together: year,
            last_season_together: year,
            teams: BTreeSet::from([team_id]),
            seasons: BTreeSet::from([year]),
        }
    }

    /// Fold another shared team-season into the aggregate.
    pub fn absorb(&mut self, team_id: TeamId, year: u16) {
        self.first_season_together = self.first_season_together.min(year);
        self.last_season_together = self.last_season_together.max(year);
        self.teams.insert(team_id);
        self.seasons.insert(year);
    }
}

/// The validated record set handed over by the ingestion collaborator.
///
/// Primary keys are expected to be deduplicated and required fields
/// present; the builder still verifies key uniqueness and referential
/// integrity before anything is indexed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordSet {
    #[serde(default)]
    pub players: Vec<Player>,

    #[serde(default)]
    pub teams: Vec<Team>,

    #[serde(default)]
    pub team_seasons: Vec<TeamSeason>,

    #[serde(default)]
    pub managers: Vec<Manager>,

    #[serde(default)]
    pub parks: Vec<Park>,

    #[serde(default)]
    pub performance: Vec<PerformanceEdge>,

    #[serde(default)]
    pub managed: Vec<ManagedEdge>,

    #[serde(default)]
    pub home_parks: Vec<HomeParkEdge>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_is_canonical() {
        let a = PlayerId::new("aaronh01");
        let b = PlayerId::new("bondsb01");

        let forward = PlayerPair::new(a.clone(), b.clone());
        let reverse = PlayerPair::new(b.clone(), a.clone());
        assert_eq!(forward, reverse);
        assert_eq!(forward.first(), &a);
        assert_eq!(forward.second(), &b);
    }

    #[test]
    fn test_pair_other_endpoint() {
        let a = PlayerId::new("aaronh01");
        let b = PlayerId::new("bondsb01");
        let pair = PlayerPair::new(a.clone(), b.clone());

        assert_eq!(pair.other(&a), Some(&b));
        assert_eq!(pair.other(&b), Some(&a));
        assert_eq!(pair.other(&PlayerId::new("cobbty01")), None);
    }

    #[test]
    fn test_pair_keys_serialize_as_strings() {
        let pair = PlayerPair::new(PlayerId::new("bondsb01"), PlayerId::new("aaronh01"));
        let mut edges = BTreeMap::new();
        edges.insert(pair.clone(), TeammateEdge::new(TeamId::new("SFN"), 2023));

        // Pair-keyed maps must stay plain JSON objects
        let json = serde_json::to_value(&edges).unwrap();
        assert_eq!(json["aaronh01|bondsb01"]["first_season_together"], 2023);

        let back: BTreeMap<PlayerPair, TeammateEdge> = serde_json::from_value(json).unwrap();
        assert_eq!(back.keys().next(), Some(&pair));
    }

    #[test]
    fn test_teammate_edge_aggregation() {
        let mut edge = TeammateEdge::new(TeamId::new("BOS"), 2023);
        edge.absorb(TeamId::new("NYY"), 2021);
        edge.absorb(TeamId::new("BOS"), 2024);

        assert_eq!(edge.first_season_together, 2021);
        assert_eq!(edge.last_season_together, 2024);
        assert_eq!(edge.teams.len(), 2);
        assert_eq!(edge.seasons, BTreeSet::from([2021, 2023, 2024]));
    }

    #[test]
    fn test_performance_edge_builder() {
        let ts = TeamSeasonId::new(&TeamId::new("BOS"), 2023);
        let edge = PerformanceEdge::new("devera01", ts, PerformanceKind::BattedFor)
            .with_stint(2)
            .with_stat("HR", 33);

        assert_eq!(edge.stint, 2);
        assert_eq!(edge.stats.get("HR"), Some(&serde_json::json!(33)));
    }
}
