//! Common utilities and helper functions shared across commands.

use std::collections::HashMap;

use serde::Serialize;

use crate::{
    cli::types::{PlayerId, TeamId},
    scoring::{Match, MatchResult, ResultType},
    storage::ScoreDatabase,
    Result,
};

/// Pretty-print any serializable value to stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Team id to display name lookup.
pub struct TeamNames(HashMap<TeamId, String>);

impl TeamNames {
    pub fn load(db: &ScoreDatabase) -> Result<Self> {
        let names = db
            .list_teams()?
            .into_iter()
            .map(|team| (team.team_id, team.name))
            .collect();
        Ok(Self(names))
    }

    pub fn label(&self, team_id: TeamId) -> String {
        self.0
            .get(&team_id)
            .cloned()
            .unwrap_or_else(|| format!("Team {}", team_id))
    }

    pub fn result_line(&self, result: &MatchResult) -> String {
        match (result.result_type, result.winner) {
            (ResultType::Tie, _) | (_, None) => result.margin.clone(),
            (_, Some(winner)) => format!("{} won by {}", self.label(winner), result.margin),
        }
    }

    pub fn fixture_line(&self, m: &Match) -> String {
        let mut line = format!(
            "Match {}: {} vs {} ({} overs",
            m.match_id,
            self.label(m.home_team),
            self.label(m.away_team),
            m.overs
        );
        if m.innings_per_side > 1 {
            line.push_str(&format!(", {} innings a side", m.innings_per_side));
        }
        line.push(')');
        if let Some(venue) = &m.venue {
            line.push_str(&format!(" at {}", venue));
        }
        line.push_str(&format!(" [{}]", m.status));
        line
    }
}

/// Player id to display name lookup.
pub struct PlayerNames(HashMap<PlayerId, String>);

impl PlayerNames {
    pub fn load(db: &ScoreDatabase) -> Result<Self> {
        let names = db
            .list_players(None)?
            .into_iter()
            .map(|player| (player.player_id, player.name))
            .collect();
        Ok(Self(names))
    }

    pub fn label(&self, player_id: PlayerId) -> String {
        self.0
            .get(&player_id)
            .cloned()
            .unwrap_or_else(|| format!("Player {}", player_id))
    }
}
