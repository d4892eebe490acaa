//! Dugout Graph - Relationship derivation and traversal engine
//!
//! Builds an immutable in-memory graph index from validated roster
//! records, derives the aggregated teammate relation, and answers
//! connectivity queries over the result.

pub mod builder;
pub mod facade;
pub mod index;
pub mod snapshot;
pub mod traversal;

pub use builder::{derive_teammate_edges, GraphBuilder};
pub use facade::RosterGraph;
pub use index::{GraphIndex, NodeId};
pub use traversal::TraversalEngine;
