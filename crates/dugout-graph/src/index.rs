//! Adjacency index over all entity nodes
//!
//! The index is addressed by stable identifiers rather than references, so
//! the cyclic player/team/season relationships never form ownership
//! cycles. It is populated once behind the build barrier and read-only
//! afterwards; every query method takes `&self`.

use dugout_core::{
    EdgeKind, Error, HomeParkEdge, ManagedEdge, Manager, ManagerId, Park, ParkId, PerformanceEdge,
    PerformanceKind, Player, PlayerId, PlayerPair, Result, Team, TeamId, TeamSeason, TeamSeasonId,
    TeammateEdge,
};
use std::collections::{BTreeMap, BTreeSet};

/// Typed node identifier covering every entity kind in the graph
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum NodeId {
    Player(PlayerId),
    Team(TeamId),
    Season(u16),
    TeamSeason(TeamSeasonId),
    Manager(ManagerId),
    Park(ParkId),
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Player(id) => write!(f, "Player({})", id),
            Self::Team(id) => write!(f, "Team({})", id),
            Self::Season(year) => write!(f, "Season({})", year),
            Self::TeamSeason(id) => write!(f, "TeamSeason({})", id),
            Self::Manager(id) => write!(f, "Manager({})", id),
            Self::Park(id) => write!(f, "Park({})", id),
        }
    }
}

/// Immutable adjacency structure over entity nodes.
///
/// All maps are ordered so iteration, and therefore every derived result,
/// is independent of insertion order.
#[derive(Debug, Default)]
pub struct GraphIndex {
    // Node tables
    players: BTreeMap<PlayerId, Player>,
    teams: BTreeMap<TeamId, Team>,
    seasons: BTreeSet<u16>,
    team_seasons: BTreeMap<TeamSeasonId, TeamSeason>,
    managers: BTreeMap<ManagerId, Manager>,
    parks: BTreeMap<ParkId, Park>,

    // Raw performance edges, kept with their stat payloads
    performance: Vec<PerformanceEdge>,

    // Per-kind adjacency for performance edges
    perf_by_player: BTreeMap<PlayerId, BTreeMap<PerformanceKind, BTreeSet<TeamSeasonId>>>,
    perf_by_team_season: BTreeMap<TeamSeasonId, BTreeMap<PerformanceKind, BTreeSet<PlayerId>>>,

    // Distinct-union caches across all performance kinds
    appearances: BTreeMap<PlayerId, BTreeSet<TeamSeasonId>>,
    rosters: BTreeMap<TeamSeasonId, BTreeSet<PlayerId>>,

    // Management and park adjacency
    managers_of: BTreeMap<TeamSeasonId, BTreeSet<ManagerId>>,
    seasons_of_manager: BTreeMap<ManagerId, BTreeSet<TeamSeasonId>>,
    home_park: BTreeMap<TeamSeasonId, ParkId>,
    park_seasons: BTreeMap<ParkId, BTreeSet<TeamSeasonId>>,

    // Team/season membership
    seasons_of_team: BTreeMap<TeamId, BTreeSet<TeamSeasonId>>,
    team_seasons_in_year: BTreeMap<u16, BTreeSet<TeamSeasonId>>,

    // Derived teammate relation, one edge per unordered pair
    teammate_edges: BTreeMap<PlayerPair, TeammateEdge>,
    teammate_adjacency: BTreeMap<PlayerId, BTreeSet<PlayerId>>,
}

impl GraphIndex {
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Node insertion (build phase only)
    // ─────────────────────────────────────────────────────────────────────

    pub(crate) fn insert_player(&mut self, player: Player) -> Result<()> {
        if self.players.contains_key(&player.id) {
            return Err(Error::duplicate_key("player", &player.id));
        }
        self.players.insert(player.id.clone(), player);
        Ok(())
    }

    pub(crate) fn insert_team(&mut self, team: Team) -> Result<()> {
        if self.teams.contains_key(&team.id) {
            return Err(Error::duplicate_key("team", &team.id));
        }
        self.teams.insert(team.id.clone(), team);
        Ok(())
    }

    pub(crate) fn insert_team_season(&mut self, ts: TeamSeason) -> Result<()> {
        if self.team_seasons.contains_key(&ts.id) {
            return Err(Error::duplicate_key("team-season", &ts.id));
        }
        self.seasons.insert(ts.year);
        self.seasons_of_team
            .entry(ts.team_id.clone())
            .or_default()
            .insert(ts.id.clone());
        self.team_seasons_in_year
            .entry(ts.year)
            .or_default()
            .insert(ts.id.clone());
        self.team_seasons.insert(ts.id.clone(), ts);
        Ok(())
    }

    pub(crate) fn insert_manager(&mut self, manager: Manager) -> Result<()> {
        if self.managers.contains_key(&manager.id) {
            return Err(Error::duplicate_key("manager", &manager.id));
        }
        self.managers.insert(manager.id.clone(), manager);
        Ok(())
    }

    pub(crate) fn insert_park(&mut self, park: Park) -> Result<()> {
        if self.parks.contains_key(&park.id) {
            return Err(Error::duplicate_key("park", &park.id));
        }
        self.parks.insert(park.id.clone(), park);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Edge insertion (build phase only)
    // ─────────────────────────────────────────────────────────────────────

    /// Index one performance edge. Fails `Validation` when either endpoint
    /// is unknown; the caller decides whether to skip or escalate.
    pub(crate) fn link_performance(&mut self, edge: PerformanceEdge) -> Result<()> {
        if !self.players.contains_key(&edge.player_id) {
            return Err(Error::Validation(format!(
                "performance edge references unknown player {}",
                edge.player_id
            )));
        }
        if !self.team_seasons.contains_key(&edge.team_season_id) {
            return Err(Error::Validation(format!(
                "performance edge references unknown team-season {}",
                edge.team_season_id
            )));
        }

        self.perf_by_player
            .entry(edge.player_id.clone())
            .or_default()
            .entry(edge.kind)
            .or_default()
            .insert(edge.team_season_id.clone());
        self.perf_by_team_season
            .entry(edge.team_season_id.clone())
            .or_default()
            .entry(edge.kind)
            .or_default()
            .insert(edge.player_id.clone());
        self.appearances
            .entry(edge.player_id.clone())
            .or_default()
            .insert(edge.team_season_id.clone());
        self.rosters
            .entry(edge.team_season_id.clone())
            .or_default()
            .insert(edge.player_id.clone());
        self.performance.push(edge);
        Ok(())
    }

    pub(crate) fn link_managed(&mut self, edge: ManagedEdge) -> Result<()> {
        if !self.managers.contains_key(&edge.manager_id) {
            return Err(Error::Validation(format!(
                "managed edge references unknown manager {}",
                edge.manager_id
            )));
        }
        if !self.team_seasons.contains_key(&edge.team_season_id) {
            return Err(Error::Validation(format!(
                "managed edge references unknown team-season {}",
                edge.team_season_id
            )));
        }

        self.managers_of
            .entry(edge.team_season_id.clone())
            .or_default()
            .insert(edge.manager_id.clone());
        self.seasons_of_manager
            .entry(edge.manager_id)
            .or_default()
            .insert(edge.team_season_id);
        Ok(())
    }

    pub(crate) fn link_home_park(&mut self, edge: HomeParkEdge) -> Result<()> {
        if !self.parks.contains_key(&edge.park_id) {
            return Err(Error::Validation(format!(
                "home-park edge references unknown park {}",
                edge.park_id
            )));
        }
        if !self.team_seasons.contains_key(&edge.team_season_id) {
            return Err(Error::Validation(format!(
                "home-park edge references unknown team-season {}",
                edge.team_season_id
            )));
        }
        // 1-to-1: a second park for the same team-season is a malformed record
        if self.home_park.contains_key(&edge.team_season_id) {
            return Err(Error::Validation(format!(
                "team-season {} already has a home park",
                edge.team_season_id
            )));
        }

        self.park_seasons
            .entry(edge.park_id.clone())
            .or_default()
            .insert(edge.team_season_id.clone());
        self.home_park.insert(edge.team_season_id, edge.park_id);
        Ok(())
    }

    /// Install one derived teammate edge, registering adjacency for both
    /// endpoints.
    pub(crate) fn insert_teammate_edge(&mut self, pair: PlayerPair, edge: TeammateEdge) {
        self.teammate_adjacency
            .entry(pair.first().clone())
            .or_default()
            .insert(pair.second().clone());
        self.teammate_adjacency
            .entry(pair.second().clone())
            .or_default()
            .insert(pair.first().clone());
        self.teammate_edges.insert(pair, edge);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Node lookup
    // ─────────────────────────────────────────────────────────────────────

    pub fn player(&self, id: &PlayerId) -> Result<&Player> {
        self.players
            .get(id)
            .ok_or_else(|| Error::node_not_found("player", id))
    }

    pub fn team(&self, id: &TeamId) -> Result<&Team> {
        self.teams
            .get(id)
            .ok_or_else(|| Error::node_not_found("team", id))
    }

    pub fn team_season(&self, id: &TeamSeasonId) -> Result<&TeamSeason> {
        self.team_seasons
            .get(id)
            .ok_or_else(|| Error::node_not_found("team-season", id))
    }

    pub fn manager(&self, id: &ManagerId) -> Result<&Manager> {
        self.managers
            .get(id)
            .ok_or_else(|| Error::node_not_found("manager", id))
    }

    pub fn park(&self, id: &ParkId) -> Result<&Park> {
        self.parks
            .get(id)
            .ok_or_else(|| Error::node_not_found("park", id))
    }

    pub fn contains(&self, node: &NodeId) -> bool {
        match node {
            NodeId::Player(id) => self.players.contains_key(id),
            NodeId::Team(id) => self.teams.contains_key(id),
            NodeId::Season(year) => self.seasons.contains(year),
            NodeId::TeamSeason(id) => self.team_seasons.contains_key(id),
            NodeId::Manager(id) => self.managers.contains_key(id),
            NodeId::Park(id) => self.parks.contains_key(id),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Typed adjacency
    // ─────────────────────────────────────────────────────────────────────

    /// Neighbors of a node restricted to an edge-kind set, in O(degree).
    ///
    /// Direction is ignored: every edge kind is answerable from either
    /// endpoint, including the undirected teammate relation which is
    /// stored once per pair. Results are ascending and deduplicated.
    pub fn neighbors(&self, node: &NodeId, kinds: &[EdgeKind]) -> Result<Vec<NodeId>> {
        if !self.contains(node) {
            return Err(Error::NodeNotFound {
                kind: "node",
                id: node.to_string(),
            });
        }

        let mut out: BTreeSet<NodeId> = BTreeSet::new();
        for kind in kinds {
            match (kind, node) {
                (
                    EdgeKind::BattedFor | EdgeKind::PitchedFor | EdgeKind::FieldedFor,
                    NodeId::Player(id),
                ) => {
                    let perf = perf_kind(*kind);
                    if let Some(by_kind) = self.perf_by_player.get(id) {
                        if let Some(targets) = by_kind.get(&perf) {
                            out.extend(targets.iter().cloned().map(NodeId::TeamSeason));
                        }
                    }
                }
                (
                    EdgeKind::BattedFor | EdgeKind::PitchedFor | EdgeKind::FieldedFor,
                    NodeId::TeamSeason(id),
                ) => {
                    let perf = perf_kind(*kind);
                    if let Some(by_kind) = self.perf_by_team_season.get(id) {
                        if let Some(sources) = by_kind.get(&perf) {
                            out.extend(sources.iter().cloned().map(NodeId::Player));
                        }
                    }
                }
                (EdgeKind::PlayedInSeason, NodeId::Team(id)) => {
                    if let Some(ts) = self.seasons_of_team.get(id) {
                        out.extend(ts.iter().cloned().map(NodeId::TeamSeason));
                    }
                }
                (EdgeKind::PlayedInSeason, NodeId::TeamSeason(id)) => {
                    if let Some(ts) = self.team_seasons.get(id) {
                        out.insert(NodeId::Team(ts.team_id.clone()));
                    }
                }
                (EdgeKind::InSeason, NodeId::TeamSeason(id)) => {
                    if let Some(ts) = self.team_seasons.get(id) {
                        out.insert(NodeId::Season(ts.year));
                    }
                }
                (EdgeKind::InSeason, NodeId::Season(year)) => {
                    if let Some(ts) = self.team_seasons_in_year.get(year) {
                        out.extend(ts.iter().cloned().map(NodeId::TeamSeason));
                    }
                }
                (EdgeKind::Managed, NodeId::Manager(id)) => {
                    if let Some(ts) = self.seasons_of_manager.get(id) {
                        out.extend(ts.iter().cloned().map(NodeId::TeamSeason));
                    }
                }
                (EdgeKind::Managed, NodeId::TeamSeason(id)) => {
                    if let Some(managers) = self.managers_of.get(id) {
                        out.extend(managers.iter().cloned().map(NodeId::Manager));
                    }
                }
                (EdgeKind::PlayedHomeGamesAt, NodeId::TeamSeason(id)) => {
                    if let Some(park) = self.home_park.get(id) {
                        out.insert(NodeId::Park(park.clone()));
                    }
                }
                (EdgeKind::PlayedHomeGamesAt, NodeId::Park(id)) => {
                    if let Some(ts) = self.park_seasons.get(id) {
                        out.extend(ts.iter().cloned().map(NodeId::TeamSeason));
                    }
                }
                (EdgeKind::TeammateWith, NodeId::Player(id)) => {
                    if let Some(mates) = self.teammate_adjacency.get(id) {
                        out.extend(mates.iter().cloned().map(NodeId::Player));
                    }
                }
                // Edge kind does not touch this node kind
                _ => {}
            }
        }
        Ok(out.into_iter().collect())
    }

    /// Teammates of a player, ascending. Empty when the player shared no
    /// rosters.
    pub fn teammates(&self, id: &PlayerId) -> impl Iterator<Item = &PlayerId> {
        self.teammate_adjacency
            .get(id)
            .into_iter()
            .flat_map(|set| set.iter())
    }

    pub fn teammate_edge(&self, pair: &PlayerPair) -> Option<&TeammateEdge> {
        self.teammate_edges.get(pair)
    }

    pub fn teammate_edges(&self) -> &BTreeMap<PlayerPair, TeammateEdge> {
        &self.teammate_edges
    }

    /// Distinct team-seasons a player is connected to by any performance
    /// edge: the player's development path.
    pub fn appearances(&self, id: &PlayerId) -> Option<&BTreeSet<TeamSeasonId>> {
        self.appearances.get(id)
    }

    pub fn all_appearances(&self) -> &BTreeMap<PlayerId, BTreeSet<TeamSeasonId>> {
        &self.appearances
    }

    /// Distinct players on a team-season roster, regardless of which
    /// performance kind connected them.
    pub fn roster(&self, id: &TeamSeasonId) -> Option<&BTreeSet<PlayerId>> {
        self.rosters.get(id)
    }

    pub fn rosters(&self) -> &BTreeMap<TeamSeasonId, BTreeSet<PlayerId>> {
        &self.rosters
    }

    pub fn managers_of(&self, id: &TeamSeasonId) -> Option<&BTreeSet<ManagerId>> {
        self.managers_of.get(id)
    }

    pub fn home_park_of(&self, id: &TeamSeasonId) -> Option<&ParkId> {
        self.home_park.get(id)
    }

    pub fn players(&self) -> &BTreeMap<PlayerId, Player> {
        &self.players
    }

    pub fn teams(&self) -> &BTreeMap<TeamId, Team> {
        &self.teams
    }

    pub fn team_seasons(&self) -> &BTreeMap<TeamSeasonId, TeamSeason> {
        &self.team_seasons
    }

    pub fn seasons(&self) -> &BTreeSet<u16> {
        &self.seasons
    }

    pub fn managers(&self) -> &BTreeMap<ManagerId, Manager> {
        &self.managers
    }

    pub fn parks(&self) -> &BTreeMap<ParkId, Park> {
        &self.parks
    }

    pub fn performance_edges(&self) -> &[PerformanceEdge] {
        &self.performance
    }
}

fn perf_kind(kind: EdgeKind) -> PerformanceKind {
    match kind {
        EdgeKind::BattedFor => PerformanceKind::BattedFor,
        EdgeKind::PitchedFor => PerformanceKind::PitchedFor,
        EdgeKind::FieldedFor => PerformanceKind::FieldedFor,
        _ => unreachable!("not a performance edge kind"),
    }
}
