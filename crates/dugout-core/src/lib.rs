//! Dugout Core - Record and query types for the roster graph engine
//!
//! This crate provides the entity records, edge records, error taxonomy and
//! typed query results shared by the dugout graph system.

pub mod edge;
pub mod entity;
pub mod error;
pub mod limits;
pub mod result;
pub mod snapshot;

pub use edge::{
    EdgeKind, HomeParkEdge, ManagedEdge, PerformanceEdge, PerformanceKind, PlayerPair, RecordSet,
    TeammateEdge,
};
pub use entity::{
    Manager, ManagerId, Park, ParkId, Player, PlayerId, Team, TeamId, TeamSeason, TeamSeasonId,
};
pub use error::{Error, Result};
pub use result::{
    Connection, ManagerOverlap, ManagersAndParks, MultiTeamPlayer, RosterEntry, SeasonSummary,
    SharedPathPair, SharedSeasonPair, TeammateEntry,
};
pub use snapshot::{EdgeRow, NodeKind, NodeRow, Snapshot};
