//! CLI command implementations

pub mod completions;
pub mod connection;
pub mod io;
pub mod managers;
pub mod paths;
pub mod players;
pub mod team;
pub mod teammates;
