//! Snapshot row tables
//!
//! A snapshot is the minimal reproducible form of a built graph: a node
//! table and an edge table, enough to rebuild the index deterministically
//! without re-running teammate derivation (derived edges travel in the
//! edge table).

use crate::edge::EdgeKind;
use serde::{Deserialize, Serialize};

/// Entity kind tag for node rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Player,
    Team,
    Season,
    TeamSeason,
    Manager,
    Park,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Player => "Player",
            Self::Team => "Team",
            Self::Season => "Season",
            Self::TeamSeason => "TeamSeason",
            Self::Manager => "Manager",
            Self::Park => "Park",
        };
        write!(f, "{}", s)
    }
}

/// One entity row: kind, id and the full attribute map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRow {
    pub kind: NodeKind,
    pub id: String,
    pub attrs: serde_json::Value,
}

/// One edge row: kind, endpoint ids and the property map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeRow {
    pub kind: EdgeKind,
    pub from: String,
    pub to: String,

    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub props: serde_json::Value,
}

/// A full snapshot of a built graph
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub nodes: Vec<NodeRow>,
    pub edges: Vec<EdgeRow>,
}

impl Snapshot {
    /// Sort rows into the canonical order so identical graphs serialize
    /// byte-identically. Parallel edges (same kind and endpoints, such as
    /// multiple stints) tie-break on their serialized props, so the order
    /// never depends on record arrival order.
    pub fn sort_canonical(&mut self) {
        self.nodes
            .sort_by(|a, b| (a.kind, a.id.as_str()).cmp(&(b.kind, b.id.as_str())));
        self.edges.sort_by(|a, b| {
            (a.kind, a.from.as_str(), a.to.as_str())
                .cmp(&(b.kind, b.from.as_str(), b.to.as_str()))
                .then_with(|| a.props.to_string().cmp(&b.props.to_string()))
        });
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}
