//! Data models for the storage layer

use crate::{
    cli::types::{PlayerId, TeamId},
    error::{Result, ScoreError},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A team as stored in the database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub team_id: TeamId,
    pub name: String,
    pub short_name: Option<String>,
}

/// Playing role, informational only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlayerRole {
    Batsman,
    Bowler,
    AllRounder,
    WicketKeeper,
}

impl fmt::Display for PlayerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlayerRole::Batsman => "batsman",
            PlayerRole::Bowler => "bowler",
            PlayerRole::AllRounder => "all-rounder",
            PlayerRole::WicketKeeper => "wicket-keeper",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for PlayerRole {
    type Err = ScoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "batsman" | "batter" => Ok(PlayerRole::Batsman),
            "bowler" => Ok(PlayerRole::Bowler),
            "all-rounder" | "allrounder" => Ok(PlayerRole::AllRounder),
            "wicket-keeper" | "wicketkeeper" | "keeper" => Ok(PlayerRole::WicketKeeper),
            _ => Err(ScoreError::validation(format!("unknown player role: {}", s))),
        }
    }
}

/// A player and the team they belong to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub player_id: PlayerId,
    pub name: String,
    pub team_id: TeamId,
    pub role: Option<PlayerRole>,
}
