//! Entity (node) records and their identifiers
//!
//! All identifiers are domain-supplied strings (Lahman-style ids such as
//! `troutmi01` or `BOS`). Records are immutable once loaded; nothing here
//! mutates after the build barrier.

use crate::error::Error;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id! {
    /// Unique identifier for a player (e.g. `troutmi01`)
    PlayerId
}

string_id! {
    /// Unique identifier for a team franchise (e.g. `BOS`)
    TeamId
}

string_id! {
    /// Unique identifier for a manager
    ManagerId
}

string_id! {
    /// Unique identifier for a ballpark
    ParkId
}

/// Identifier for one team's season, a deterministic function of
/// `(team_id, year)` formatted as `"{teamID}-{year}"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamSeasonId(String);

impl TeamSeasonId {
    pub fn new(team_id: &TeamId, year: u16) -> Self {
        Self(format!("{}-{}", team_id, year))
    }

    /// Parse an id back into its `(team_id, year)` components.
    pub fn from_string(s: &str) -> Result<Self, Error> {
        let (team, year) = Self::split(s).ok_or_else(|| {
            Error::Validation(format!("malformed team-season id: {:?}", s))
        })?;
        Ok(Self::new(&TeamId::new(team), year))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn team_id(&self) -> TeamId {
        // Constructed ids always split; from_string validated the format.
        let (team, _) = Self::split(&self.0).unwrap_or((self.0.as_str(), 0));
        TeamId::new(team)
    }

    pub fn year(&self) -> u16 {
        Self::split(&self.0).map(|(_, y)| y).unwrap_or(0)
    }

    fn split(s: &str) -> Option<(&str, u16)> {
        let (team, year) = s.rsplit_once('-')?;
        if team.is_empty() {
            return None;
        }
        Some((team, year.parse().ok()?))
    }
}

impl std::fmt::Display for TeamSeasonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A player record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,

    /// Batting hand ("R", "L" or "B")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bats: Option<String>,

    /// Throwing hand
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throws: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debut: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_game: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_country: Option<String>,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            bats: None,
            throws: None,
            debut: None,
            final_game: None,
            birth_year: None,
            birth_country: None,
        }
    }
}

/// A team franchise record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub league: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Team {
    pub fn new(id: impl Into<TeamId>, name: impl Into<String>, league: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            league: league.into(),
            location: None,
        }
    }
}

/// One team's performance in one season. The central join record linking
/// players, team, season, manager and park.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSeason {
    pub id: TeamSeasonId,
    pub team_id: TeamId,
    pub year: u16,
    pub wins: u16,
    pub losses: u16,
    pub division: String,
    pub rank: u8,
    pub runs: u32,
    pub home_runs: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendance: Option<u64>,
}

impl TeamSeason {
    pub fn new(team_id: impl Into<TeamId>, year: u16) -> Self {
        let team_id = team_id.into();
        Self {
            id: TeamSeasonId::new(&team_id, year),
            team_id,
            year,
            wins: 0,
            losses: 0,
            division: String::new(),
            rank: 0,
            runs: 0,
            home_runs: 0,
            attendance: None,
        }
    }

    /// The id invariant: `id` must be the deterministic function of
    /// `(team_id, year)`.
    pub fn id_is_consistent(&self) -> bool {
        self.id == TeamSeasonId::new(&self.team_id, self.year)
    }
}

/// A manager record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manager {
    pub id: ManagerId,
    pub name: String,
}

impl Manager {
    pub fn new(id: impl Into<ManagerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A ballpark record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Park {
    pub id: ParkId,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl Park {
    pub fn new(id: impl Into<ParkId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            city: None,
            state: None,
            country: None,
            alias: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_season_id_roundtrip() {
        let id = TeamSeasonId::new(&TeamId::new("BOS"), 2023);
        assert_eq!(id.as_str(), "BOS-2023");
        assert_eq!(id.team_id(), TeamId::new("BOS"));
        assert_eq!(id.year(), 2023);
    }

    #[test]
    fn test_team_season_id_parse() {
        let id = TeamSeasonId::from_string("NYY-2024").unwrap();
        assert_eq!(id.team_id().as_str(), "NYY");
        assert_eq!(id.year(), 2024);

        assert!(TeamSeasonId::from_string("NYY").is_err());
        assert!(TeamSeasonId::from_string("-2024").is_err());
        assert!(TeamSeasonId::from_string("NYY-notayear").is_err());
    }

    #[test]
    fn test_team_season_id_consistency() {
        let ts = TeamSeason::new("BOS", 2023);
        assert!(ts.id_is_consistent());

        let mut bad = TeamSeason::new("BOS", 2023);
        bad.year = 2024;
        assert!(!bad.id_is_consistent());
    }

    #[test]
    fn test_player_creation() {
        let player = Player::new("troutmi01", "Mike Trout");
        assert_eq!(player.id.as_str(), "troutmi01");
        assert_eq!(player.name, "Mike Trout");
        assert!(player.bats.is_none());
    }

    #[test]
    fn test_id_ordering() {
        let mut ids = vec![
            PlayerId::new("cartz01"),
            PlayerId::new("abadf01"),
            PlayerId::new("bettsmo01"),
        ];
        ids.sort();
        assert_eq!(ids[0].as_str(), "abadf01");
        assert_eq!(ids[2].as_str(), "cartz01");
    }
}
