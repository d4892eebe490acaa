//! Snapshot export and restore
//!
//! Export walks the node tables and edge adjacency into the flat row
//! format; restore rebuilds an index from those rows without re-running
//! teammate derivation. Export order is canonical, so two exports of the
//! same graph are byte-identical.

use crate::index::GraphIndex;
use dugout_core::{
    EdgeKind, EdgeRow, Error, HomeParkEdge, ManagedEdge, Manager, NodeKind, NodeRow, Park,
    PerformanceEdge, Player, PlayerId, PlayerPair, Result, Snapshot, Team, TeamSeason,
    TeamSeasonId, TeammateEdge,
};
use serde::Serialize;

fn node_row<T: Serialize>(kind: NodeKind, id: impl ToString, record: &T) -> NodeRow {
    NodeRow {
        kind,
        id: id.to_string(),
        // Serialization of our own serde types cannot fail
        attrs: serde_json::to_value(record).unwrap_or(serde_json::Value::Null),
    }
}

/// Export a built index as a snapshot.
pub fn export(index: &GraphIndex) -> Snapshot {
    let mut snapshot = Snapshot::default();

    for (id, player) in index.players() {
        snapshot.nodes.push(node_row(NodeKind::Player, id, player));
    }
    for (id, team) in index.teams() {
        snapshot.nodes.push(node_row(NodeKind::Team, id, team));
    }
    for (id, ts) in index.team_seasons() {
        snapshot.nodes.push(node_row(NodeKind::TeamSeason, id, ts));
        snapshot.edges.push(EdgeRow {
            kind: EdgeKind::PlayedInSeason,
            from: ts.team_id.to_string(),
            to: id.to_string(),
            props: serde_json::Value::Null,
        });
        snapshot.edges.push(EdgeRow {
            kind: EdgeKind::InSeason,
            from: id.to_string(),
            to: ts.year.to_string(),
            props: serde_json::Value::Null,
        });
    }
    for year in index.seasons() {
        snapshot.nodes.push(NodeRow {
            kind: NodeKind::Season,
            id: year.to_string(),
            attrs: serde_json::Value::Null,
        });
    }
    for (id, manager) in index.managers() {
        snapshot.nodes.push(node_row(NodeKind::Manager, id, manager));
    }
    for (id, park) in index.parks() {
        snapshot.nodes.push(node_row(NodeKind::Park, id, park));
    }

    for edge in index.performance_edges() {
        snapshot.edges.push(EdgeRow {
            kind: edge.kind.into(),
            from: edge.player_id.to_string(),
            to: edge.team_season_id.to_string(),
            props: serde_json::json!({ "stint": edge.stint, "stats": edge.stats }),
        });
    }
    for (ts_id, ts) in index.team_seasons() {
        if let Some(managers) = index.managers_of(ts_id) {
            for manager in managers {
                snapshot.edges.push(EdgeRow {
                    kind: EdgeKind::Managed,
                    from: manager.to_string(),
                    to: ts_id.to_string(),
                    props: serde_json::Value::Null,
                });
            }
        }
        if let Some(park) = index.home_park_of(ts_id) {
            snapshot.edges.push(EdgeRow {
                kind: EdgeKind::PlayedHomeGamesAt,
                from: ts.id.to_string(),
                to: park.to_string(),
                props: serde_json::Value::Null,
            });
        }
    }
    for (pair, edge) in index.teammate_edges() {
        snapshot.edges.push(EdgeRow {
            kind: EdgeKind::TeammateWith,
            from: pair.first().to_string(),
            to: pair.second().to_string(),
            props: serde_json::to_value(edge).unwrap_or(serde_json::Value::Null),
        });
    }

    snapshot.sort_canonical();
    snapshot
}

/// Rebuild an index from a snapshot.
///
/// The same primary-key invariants apply as in the builder; duplicate
/// node rows are fatal. Derived teammate rows are installed directly,
/// with no derivation pass. Membership rows (`PlayedInSeason`,
/// `InSeason`) are implied by the team-season records and skipped.
pub fn restore(snapshot: &Snapshot) -> Result<GraphIndex> {
    let mut index = GraphIndex::new();

    for row in &snapshot.nodes {
        match row.kind {
            NodeKind::Player => {
                let player: Player = serde_json::from_value(row.attrs.clone())?;
                index.insert_player(player)?;
            }
            NodeKind::Team => {
                let team: Team = serde_json::from_value(row.attrs.clone())?;
                index.insert_team(team)?;
            }
            NodeKind::TeamSeason => {
                let ts: TeamSeason = serde_json::from_value(row.attrs.clone())?;
                if !ts.id_is_consistent() {
                    return Err(Error::Validation(format!(
                        "snapshot team-season {} has inconsistent id",
                        ts.id
                    )));
                }
                index.insert_team_season(ts)?;
            }
            NodeKind::Manager => {
                let manager: Manager = serde_json::from_value(row.attrs.clone())?;
                index.insert_manager(manager)?;
            }
            NodeKind::Park => {
                let park: Park = serde_json::from_value(row.attrs.clone())?;
                index.insert_park(park)?;
            }
            // Season nodes carry no attributes; membership is implied by
            // the team-season records.
            NodeKind::Season => {}
        }
    }

    for row in &snapshot.edges {
        match row.kind {
            EdgeKind::BattedFor | EdgeKind::PitchedFor | EdgeKind::FieldedFor => {
                let props: PerformanceProps = serde_json::from_value(row.props.clone())?;
                let mut edge = PerformanceEdge::new(
                    row.from.as_str(),
                    TeamSeasonId::from_string(&row.to)?,
                    match row.kind {
                        EdgeKind::BattedFor => dugout_core::PerformanceKind::BattedFor,
                        EdgeKind::PitchedFor => dugout_core::PerformanceKind::PitchedFor,
                        _ => dugout_core::PerformanceKind::FieldedFor,
                    },
                );
                edge.stint = props.stint;
                edge.stats = props.stats;
                index.link_performance(edge)?;
            }
            EdgeKind::Managed => {
                index.link_managed(ManagedEdge::new(
                    row.from.as_str(),
                    TeamSeasonId::from_string(&row.to)?,
                ))?;
            }
            EdgeKind::PlayedHomeGamesAt => {
                index.link_home_park(HomeParkEdge::new(
                    TeamSeasonId::from_string(&row.from)?,
                    row.to.as_str(),
                ))?;
            }
            EdgeKind::TeammateWith => {
                for endpoint in [row.from.as_str(), row.to.as_str()] {
                    if index.player(&PlayerId::new(endpoint)).is_err() {
                        return Err(Error::Validation(format!(
                            "teammate edge references unknown player {}",
                            endpoint
                        )));
                    }
                }
                let edge: TeammateEdge = serde_json::from_value(row.props.clone())?;
                let pair = PlayerPair::new(
                    PlayerId::new(row.from.as_str()),
                    PlayerId::new(row.to.as_str()),
                );
                index.insert_teammate_edge(pair, edge);
            }
            EdgeKind::PlayedInSeason | EdgeKind::InSeason => {}
        }
    }

    Ok(index)
}

#[derive(serde::Deserialize)]
struct PerformanceProps {
    #[serde(default = "default_stint")]
    stint: u8,
    #[serde(default)]
    stats: std::collections::BTreeMap<String, serde_json::Value>,
}

fn default_stint() -> u8 {
    1
}
