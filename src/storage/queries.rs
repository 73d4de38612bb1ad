//! Basic database query operations

use super::{
    models::*,
    repository::{row_to_ball, MatchRepository, MatchRow, BALL_COLUMNS, MATCH_COLUMNS},
    schema::ScoreDatabase,
    unix_now,
};
use crate::{
    cli::types::{MatchId, PlayerId, TeamId},
    error::{Result, ScoreError},
    scoring::{BallEvent, Match, MatchSetup},
};
use rusqlite::{params, types::Type, OptionalExtension, Row};

pub(crate) fn row_to_team(row: &Row) -> rusqlite::Result<Team> {
    Ok(Team {
        team_id: TeamId::new(row.get(0)?),
        name: row.get(1)?,
        short_name: row.get(2)?,
    })
}

pub(crate) fn row_to_player(row: &Row) -> rusqlite::Result<Player> {
    let role: Option<String> = row.get(3)?;
    let role = role
        .map(|s| {
            s.parse().map_err(|e: ScoreError| {
                rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e))
            })
        })
        .transpose()?;

    Ok(Player {
        player_id: PlayerId::new(row.get(0)?),
        name: row.get(1)?,
        team_id: TeamId::new(row.get(2)?),
        role,
    })
}

impl ScoreDatabase {
    /// Register a team; names are unique
    pub fn add_team(&mut self, name: &str, short_name: Option<&str>) -> Result<Team> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ScoreError::validation("team name must not be empty"));
        }
        if self.find_team_by_name(name)?.is_some() {
            return Err(ScoreError::validation(format!(
                "a team named '{}' already exists",
                name
            )));
        }

        self.conn.execute(
            "INSERT INTO teams (name, short_name) VALUES (?, ?)",
            params![name, short_name],
        )?;
        let team_id = self.last_id()?;
        Ok(Team {
            team_id: TeamId::new(team_id),
            name: name.to_string(),
            short_name: short_name.map(str::to_string),
        })
    }

    pub fn get_team(&self, team_id: TeamId) -> Result<Team> {
        self.conn
            .query_row(
                "SELECT team_id, name, short_name FROM teams WHERE team_id = ?",
                params![team_id.as_u64()],
                row_to_team,
            )
            .optional()?
            .ok_or_else(|| ScoreError::not_found("Team", team_id))
    }

    pub fn find_team_by_name(&self, name: &str) -> Result<Option<Team>> {
        let team = self
            .conn
            .query_row(
                "SELECT team_id, name, short_name FROM teams WHERE name = ? COLLATE NOCASE",
                params![name],
                row_to_team,
            )
            .optional()?;
        Ok(team)
    }

    pub fn list_teams(&self) -> Result<Vec<Team>> {
        let mut stmt = self
            .conn
            .prepare("SELECT team_id, name, short_name FROM teams ORDER BY team_id")?;
        let teams = stmt
            .query_map([], row_to_team)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(teams)
    }

    /// Register a player on an existing team
    pub fn add_player(
        &mut self,
        name: &str,
        team_id: TeamId,
        role: Option<PlayerRole>,
    ) -> Result<Player> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ScoreError::validation("player name must not be empty"));
        }
        self.get_team(team_id)?;

        self.conn.execute(
            "INSERT INTO players (name, team_id, role) VALUES (?, ?, ?)",
            params![name, team_id.as_u64(), role.map(|r| r.to_string())],
        )?;
        let player_id = self.last_id()?;
        Ok(Player {
            player_id: PlayerId::new(player_id),
            name: name.to_string(),
            team_id,
            role,
        })
    }

    pub fn get_player(&self, player_id: PlayerId) -> Result<Player> {
        self.conn
            .query_row(
                "SELECT player_id, name, team_id, role FROM players WHERE player_id = ?",
                params![player_id.as_u64()],
                row_to_player,
            )
            .optional()?
            .ok_or_else(|| ScoreError::not_found("Player", player_id))
    }

    /// List players, optionally restricted to one team
    pub fn list_players(&self, team_id: Option<TeamId>) -> Result<Vec<Player>> {
        let mut stmt = self.conn.prepare(
            "SELECT player_id, name, team_id, role FROM players
             WHERE (?1 IS NULL OR team_id = ?1)
             ORDER BY team_id, player_id",
        )?;
        let players = stmt
            .query_map(params![team_id.map(|t| t.as_u64())], row_to_player)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(players)
    }

    /// Schedule a new match between two registered teams
    pub fn create_match(&mut self, setup: MatchSetup) -> Result<Match> {
        setup.validate()?;
        self.get_team(setup.home_team)?;
        self.get_team(setup.away_team)?;

        let now = unix_now()?;
        let mut scheduled = Match::scheduled(MatchId::new(0), setup, now);
        self.conn.execute(
            "INSERT INTO matches
             (home_team_id, away_team_id, venue, overs, innings_per_side, end_on_target,
              status, current_innings, innings_json, result_json, version, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, 0, '[]', NULL, 0, ?, ?)",
            params![
                scheduled.home_team.as_u64(),
                scheduled.away_team.as_u64(),
                scheduled.venue,
                scheduled.overs,
                scheduled.innings_per_side,
                scheduled.end_on_target,
                scheduled.status.to_string(),
                now,
                now
            ],
        )?;
        scheduled.match_id = MatchId::new(self.last_id()?);
        tracing::info!(
            match_id = %scheduled.match_id,
            home = %scheduled.home_team,
            away = %scheduled.away_team,
            overs = scheduled.overs,
            "Match scheduled"
        );
        Ok(scheduled)
    }

    /// Load a match or fail with `NotFound`
    pub fn get_match(&self, match_id: MatchId) -> Result<Match> {
        self.conn
            .find_match(match_id)?
            .ok_or_else(|| ScoreError::not_found("Match", match_id))
    }

    pub fn list_matches(&self) -> Result<Vec<Match>> {
        let sql = format!("SELECT {} FROM matches ORDER BY match_id", MATCH_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], MatchRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter().map(MatchRow::into_match).collect()
    }

    /// Every ball in the log, optionally for one match, in log order
    pub fn list_balls(&self, match_id: Option<MatchId>) -> Result<Vec<BallEvent>> {
        let sql = format!(
            "SELECT {} FROM balls
             WHERE (?1 IS NULL OR match_id = ?1)
             ORDER BY match_id, innings, over_number, ball_number, ball_id",
            BALL_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let balls = stmt
            .query_map(params![match_id.map(|m| m.as_u64())], row_to_ball)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(balls)
    }

    fn last_id(&self) -> Result<u64> {
        u64::try_from(self.conn.last_insert_rowid())
            .map_err(|_| ScoreError::invalid_state("database returned a negative row id"))
    }
}
