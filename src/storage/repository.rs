//! Repositories the scoring service works against.
//!
//! Implemented for [`rusqlite::Connection`], so the same code runs on a
//! plain connection or inside a transaction (which derefs to one).

use super::{models::Player, unix_now};
use crate::{
    cli::types::{MatchId, PlayerId, TeamId},
    error::{Result, ScoreError},
    scoring::{BallEvent, DeliveryKind, Innings, Match, MatchResult, MatchStatus, NewBall},
};
use rusqlite::{params, types::Type, Connection, OptionalExtension, Row};
use std::str::FromStr;

pub trait MatchRepository {
    fn find_match(&self, match_id: MatchId) -> Result<Option<Match>>;

    /// Persist `m` if nobody saved it since it was read.
    ///
    /// Returns the stored copy with its version bumped, or
    /// [`ScoreError::Conflict`] when the stored version moved on.
    fn save_match(&self, m: &Match) -> Result<Match>;
}

pub trait BallRepository {
    /// Append a ball to the log.
    fn insert_ball(&self, ball: &NewBall) -> Result<BallEvent>;

    /// All balls of a match ordered by innings, over, ball, then insertion.
    fn balls_for_match(&self, match_id: MatchId) -> Result<Vec<BallEvent>>;
}

pub trait PlayerRepository {
    fn find_player(&self, player_id: PlayerId) -> Result<Option<Player>>;
}

pub(crate) const MATCH_COLUMNS: &str = "match_id, home_team_id, away_team_id, venue, overs,
    innings_per_side, end_on_target, status, current_innings, innings_json, result_json,
    version, created_at, updated_at";

pub(crate) const BALL_COLUMNS: &str = "ball_id, match_id, innings, over_number, ball_number,
    bowler_id, batsman_id, non_striker_id, fielder_id, runs, is_wide, is_no_ball, is_bye,
    is_leg_bye, is_wicket, wicket_type, commentary, created_at";

/// Raw `matches` row; JSON columns are decoded outside the row closure.
pub(crate) struct MatchRow {
    match_id: u64,
    home_team_id: u64,
    away_team_id: u64,
    venue: Option<String>,
    overs: u32,
    innings_per_side: u8,
    end_on_target: bool,
    status: String,
    current_innings: u8,
    innings_json: String,
    result_json: Option<String>,
    version: u64,
    created_at: u64,
    updated_at: u64,
}

impl MatchRow {
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            match_id: row.get(0)?,
            home_team_id: row.get(1)?,
            away_team_id: row.get(2)?,
            venue: row.get(3)?,
            overs: row.get(4)?,
            innings_per_side: row.get(5)?,
            end_on_target: row.get(6)?,
            status: row.get(7)?,
            current_innings: row.get(8)?,
            innings_json: row.get(9)?,
            result_json: row.get(10)?,
            version: row.get(11)?,
            created_at: row.get(12)?,
            updated_at: row.get(13)?,
        })
    }

    pub(crate) fn into_match(self) -> Result<Match> {
        let innings: Vec<Innings> = serde_json::from_str(&self.innings_json)?;
        let result: Option<MatchResult> = self
            .result_json
            .as_deref()
            .map(serde_json::from_str::<MatchResult>)
            .transpose()?;

        Ok(Match {
            match_id: MatchId::new(self.match_id),
            home_team: TeamId::new(self.home_team_id),
            away_team: TeamId::new(self.away_team_id),
            venue: self.venue,
            overs: self.overs,
            innings_per_side: self.innings_per_side,
            end_on_target: self.end_on_target,
            status: MatchStatus::from_str(&self.status)?,
            current_innings: self.current_innings,
            innings,
            result,
            version: self.version,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

pub(crate) fn row_to_ball(row: &Row) -> rusqlite::Result<BallEvent> {
    let wicket_type: Option<String> = row.get(15)?;
    let wicket_type = wicket_type
        .map(|s| {
            s.parse()
                .map_err(|e: ScoreError| {
                    rusqlite::Error::FromSqlConversionFailure(15, Type::Text, Box::new(e))
                })
        })
        .transpose()?;

    Ok(BallEvent {
        ball_id: row.get(0)?,
        match_id: MatchId::new(row.get(1)?),
        innings: row.get(2)?,
        over: row.get(3)?,
        ball: row.get(4)?,
        bowler: PlayerId::new(row.get(5)?),
        batsman: PlayerId::new(row.get(6)?),
        non_striker: row.get::<_, Option<u64>>(7)?.map(PlayerId::new),
        fielder: row.get::<_, Option<u64>>(8)?.map(PlayerId::new),
        runs: row.get(9)?,
        is_wide: row.get(10)?,
        is_no_ball: row.get(11)?,
        is_bye: row.get(12)?,
        is_leg_bye: row.get(13)?,
        is_wicket: row.get(14)?,
        wicket_type,
        commentary: row.get(16)?,
        created_at: row.get(17)?,
    })
}

impl MatchRepository for Connection {
    fn find_match(&self, match_id: MatchId) -> Result<Option<Match>> {
        let sql = format!("SELECT {} FROM matches WHERE match_id = ?", MATCH_COLUMNS);
        let row = self
            .query_row(&sql, params![match_id.as_u64()], MatchRow::from_row)
            .optional()?;
        row.map(MatchRow::into_match).transpose()
    }

    fn save_match(&self, m: &Match) -> Result<Match> {
        let now = unix_now()?;
        let innings_json = serde_json::to_string(&m.innings)?;
        let result_json = m.result.as_ref().map(serde_json::to_string).transpose()?;

        let rows_affected = self.execute(
            "UPDATE matches
             SET venue = ?, status = ?, current_innings = ?, innings_json = ?,
                 result_json = ?, version = version + 1, updated_at = ?
             WHERE match_id = ? AND version = ?",
            params![
                m.venue,
                m.status.to_string(),
                m.current_innings,
                innings_json,
                result_json,
                now,
                m.match_id.as_u64(),
                m.version
            ],
        )?;

        if rows_affected == 0 {
            return match self.find_match(m.match_id)? {
                Some(_) => Err(ScoreError::Conflict {
                    match_id: m.match_id,
                }),
                None => Err(ScoreError::not_found("Match", m.match_id)),
            };
        }

        let mut saved = m.clone();
        saved.version += 1;
        saved.updated_at = now;
        Ok(saved)
    }
}

impl BallRepository for Connection {
    fn insert_ball(&self, ball: &NewBall) -> Result<BallEvent> {
        let now = unix_now()?;
        let kind = ball.delivery.kind;
        let wicket_type = ball.delivery.wicket.and_then(|w| w.kind);

        self.execute(
            "INSERT INTO balls
             (match_id, innings, over_number, ball_number, bowler_id, batsman_id,
              non_striker_id, fielder_id, runs, is_wide, is_no_ball, is_bye, is_leg_bye,
              is_wicket, wicket_type, commentary, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                ball.match_id.as_u64(),
                ball.innings,
                ball.over,
                ball.ball,
                ball.bowler.as_u64(),
                ball.batsman.as_u64(),
                ball.non_striker.map(|p| p.as_u64()),
                ball.fielder.map(|p| p.as_u64()),
                ball.delivery.runs,
                kind == DeliveryKind::Wide,
                kind == DeliveryKind::NoBall,
                kind == DeliveryKind::Bye,
                kind == DeliveryKind::LegBye,
                ball.delivery.is_wicket(),
                wicket_type.map(|w| w.to_string()),
                ball.commentary,
                now
            ],
        )?;

        let ball_id = u64::try_from(self.last_insert_rowid()).map_err(|_| {
            ScoreError::invalid_state("database returned a negative ball id")
        })?;

        Ok(BallEvent {
            ball_id,
            match_id: ball.match_id,
            innings: ball.innings,
            over: ball.over,
            ball: ball.ball,
            bowler: ball.bowler,
            batsman: ball.batsman,
            non_striker: ball.non_striker,
            fielder: ball.fielder,
            runs: ball.delivery.runs,
            is_wide: kind == DeliveryKind::Wide,
            is_no_ball: kind == DeliveryKind::NoBall,
            is_bye: kind == DeliveryKind::Bye,
            is_leg_bye: kind == DeliveryKind::LegBye,
            is_wicket: ball.delivery.is_wicket(),
            wicket_type,
            commentary: ball.commentary.clone(),
            created_at: now,
        })
    }

    fn balls_for_match(&self, match_id: MatchId) -> Result<Vec<BallEvent>> {
        let sql = format!(
            "SELECT {} FROM balls WHERE match_id = ?
             ORDER BY innings, over_number, ball_number, ball_id",
            BALL_COLUMNS
        );
        let mut stmt = self.prepare(&sql)?;
        let balls = stmt
            .query_map(params![match_id.as_u64()], row_to_ball)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(balls)
    }
}

impl PlayerRepository for Connection {
    fn find_player(&self, player_id: PlayerId) -> Result<Option<Player>> {
        let player = self
            .query_row(
                "SELECT player_id, name, team_id, role FROM players WHERE player_id = ?",
                params![player_id.as_u64()],
                super::queries::row_to_player,
            )
            .optional()?;
        Ok(player)
    }
}
