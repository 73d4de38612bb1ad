//! Match lifecycle and the per-ball state machine.
//!
//! A match moves `scheduled -> live -> completed`, or to `abandoned` from
//! either of the first two. While live, every delivery goes through
//! [`Match::record_delivery`], which stamps the ball position, updates the
//! current innings, closes the innings when its limits are reached and
//! either opens the next innings or settles the result.

use super::{
    ball_index::{ball_position, BallPosition},
    completion::{completion_reason, CompletionReason},
    delivery::Delivery,
    innings::Innings,
    result::{compute_result, innings_victory, MatchResult},
};
use crate::{
    cli::types::{MatchId, TeamId},
    error::{Result, ScoreError},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Scheduled,
    Live,
    Completed,
    Abandoned,
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchStatus::Scheduled => "scheduled",
            MatchStatus::Live => "live",
            MatchStatus::Completed => "completed",
            MatchStatus::Abandoned => "abandoned",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for MatchStatus {
    type Err = ScoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "scheduled" => Ok(MatchStatus::Scheduled),
            "live" => Ok(MatchStatus::Live),
            "completed" => Ok(MatchStatus::Completed),
            "abandoned" => Ok(MatchStatus::Abandoned),
            _ => Err(ScoreError::validation(format!("unknown match status: {}", s))),
        }
    }
}

/// Everything needed to schedule a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSetup {
    pub home_team: TeamId,
    pub away_team: TeamId,
    pub venue: Option<String>,
    /// Over limit applied to every innings.
    pub overs: u32,
    /// 1 for limited-overs formats, 2 for two-innings formats.
    pub innings_per_side: u8,
    /// Close the final innings as soon as the chasing side goes ahead.
    pub end_on_target: bool,
}

impl MatchSetup {
    pub fn limited_overs(home_team: TeamId, away_team: TeamId, overs: u32) -> Self {
        Self {
            home_team,
            away_team,
            venue: None,
            overs,
            innings_per_side: 1,
            end_on_target: false,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.home_team == self.away_team {
            return Err(ScoreError::validation("a team cannot play itself"));
        }
        if self.overs == 0 {
            return Err(ScoreError::validation("overs must be at least 1"));
        }
        if !(1..=2).contains(&self.innings_per_side) {
            return Err(ScoreError::validation(format!(
                "innings per side must be 1 or 2, got {}",
                self.innings_per_side
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub match_id: MatchId,
    pub home_team: TeamId,
    pub away_team: TeamId,
    pub venue: Option<String>,
    pub overs: u32,
    pub innings_per_side: u8,
    pub end_on_target: bool,
    pub status: MatchStatus,
    /// 1-indexed; 0 until the match starts.
    pub current_innings: u8,
    pub innings: Vec<Innings>,
    pub result: Option<MatchResult>,
    /// Bumped on every successful save.
    pub version: u64,
    pub created_at: u64,
    pub updated_at: u64,
}

/// What a single delivery did to the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallOutcome {
    pub innings: u8,
    pub position: BallPosition,
    pub innings_completed: Option<CompletionReason>,
    pub match_completed: bool,
}

/// Caller-facing view of a match after a ball.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub match_id: MatchId,
    pub status: MatchStatus,
    pub current_innings: u8,
    pub innings: Vec<Innings>,
    pub result: Option<MatchResult>,
}

impl Match {
    pub fn scheduled(match_id: MatchId, setup: MatchSetup, now: u64) -> Self {
        Self {
            match_id,
            home_team: setup.home_team,
            away_team: setup.away_team,
            venue: setup.venue,
            overs: setup.overs,
            innings_per_side: setup.innings_per_side,
            end_on_target: setup.end_on_target,
            status: MatchStatus::Scheduled,
            current_innings: 0,
            innings: Vec::new(),
            result: None,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Number of the innings whose completion settles the match.
    pub fn final_innings(&self) -> u8 {
        self.innings_per_side * 2
    }

    pub fn setup(&self) -> MatchSetup {
        MatchSetup {
            home_team: self.home_team,
            away_team: self.away_team,
            venue: self.venue.clone(),
            overs: self.overs,
            innings_per_side: self.innings_per_side,
            end_on_target: self.end_on_target,
        }
    }

    pub fn current(&self) -> Option<&Innings> {
        let idx = usize::from(self.current_innings).checked_sub(1)?;
        self.innings.get(idx)
    }

    fn current_mut(&mut self) -> Result<&mut Innings> {
        let number = self.current_innings;
        usize::from(number)
            .checked_sub(1)
            .and_then(|idx| self.innings.get_mut(idx))
            .ok_or_else(|| ScoreError::invalid_state(format!("innings {} does not exist", number)))
    }

    /// Begin play with `batting_first` at the crease.
    pub fn start(&mut self, batting_first: TeamId) -> Result<()> {
        match self.status {
            MatchStatus::Scheduled => {}
            MatchStatus::Live => {
                return Err(ScoreError::invalid_state(format!(
                    "match {} has already started",
                    self.match_id
                )))
            }
            status => {
                return Err(ScoreError::invalid_state(format!(
                    "match {} is {} and cannot be started",
                    self.match_id, status
                )))
            }
        }

        let bowling_first = if batting_first == self.home_team {
            self.away_team
        } else if batting_first == self.away_team {
            self.home_team
        } else {
            return Err(ScoreError::validation(format!(
                "team {} is not playing in match {}",
                batting_first, self.match_id
            )));
        };

        self.innings = vec![Innings::new(1, batting_first, bowling_first)];
        self.current_innings = 1;
        self.status = MatchStatus::Live;
        tracing::info!(
            match_id = %self.match_id,
            batting = %batting_first,
            bowling = %bowling_first,
            "Match started"
        );
        Ok(())
    }

    pub fn abandon(&mut self) -> Result<()> {
        match self.status {
            MatchStatus::Scheduled | MatchStatus::Live => {
                self.status = MatchStatus::Abandoned;
                tracing::info!(match_id = %self.match_id, "Match abandoned");
                Ok(())
            }
            status => Err(ScoreError::invalid_state(format!(
                "match {} is {} and cannot be abandoned",
                self.match_id, status
            ))),
        }
    }

    /// The innings that would receive the next ball, if any.
    pub fn ensure_accepting_balls(&self) -> Result<&Innings> {
        if self.status != MatchStatus::Live {
            return Err(ScoreError::invalid_state(format!(
                "match {} is {}, not live",
                self.match_id, self.status
            )));
        }
        let innings = self.current().ok_or_else(|| {
            ScoreError::invalid_state(format!(
                "match {} has no innings {}",
                self.match_id, self.current_innings
            ))
        })?;
        if innings.is_completed {
            return Err(ScoreError::invalid_state(format!(
                "innings {} of match {} is already completed",
                innings.number, self.match_id
            )));
        }
        Ok(innings)
    }

    /// Apply one delivery to the live match.
    pub fn record_delivery(&mut self, delivery: &Delivery) -> Result<BallOutcome> {
        self.ensure_accepting_balls()?;

        let target = if self.end_on_target && self.current_innings >= self.final_innings() {
            Some(self.chase_target())
        } else {
            None
        };
        let over_limit = self.overs;

        let innings = self.current_mut()?;
        let number = innings.number;
        let position = ball_position(innings.balls, delivery.kind);
        innings.apply(delivery)?;

        let reason = completion_reason(innings, over_limit, target);
        if let Some(reason) = reason {
            innings.is_completed = true;
            tracing::info!(
                innings = number,
                score = %innings.score_line(),
                reason = %reason,
                "Innings completed"
            );
        }

        let match_completed = match reason {
            Some(_) => self.advance()?,
            None => false,
        };

        Ok(BallOutcome {
            innings: number,
            position,
            innings_completed: reason,
            match_completed,
        })
    }

    /// Move past a completed innings. Returns true when the match is over.
    fn advance(&mut self) -> Result<bool> {
        if self.current_innings < self.final_innings() {
            let next = self
                .current()
                .map(Innings::next)
                .ok_or_else(|| ScoreError::invalid_state("no innings to follow"))?;
            if self.end_on_target && next.number == self.final_innings() {
                if let Some(result) = innings_victory(&self.innings, next.batting_team) {
                    return Ok(self.settle(result));
                }
            }
            tracing::info!(
                match_id = %self.match_id,
                innings = next.number,
                batting = %next.batting_team,
                "Next innings started"
            );
            self.current_innings = next.number;
            self.innings.push(next);
            return Ok(false);
        }

        let result = compute_result(&self.innings).ok_or_else(|| {
            ScoreError::invalid_state(format!(
                "match {} cannot be settled without two innings",
                self.match_id
            ))
        })?;
        Ok(self.settle(result))
    }

    fn settle(&mut self, result: MatchResult) -> bool {
        tracing::info!(
            match_id = %self.match_id,
            winner = ?result.winner,
            result = %result.result_type,
            margin = %result.margin,
            "Match completed"
        );
        self.result = Some(result);
        self.status = MatchStatus::Completed;
        true
    }

    /// Runs the current (final) innings needs to put its side ahead.
    fn chase_target(&self) -> u32 {
        let Some(current) = self.current() else {
            return 0;
        };
        let total_for = |team: TeamId| -> u32 {
            self.innings
                .iter()
                .filter(|i| i.batting_team == team && i.number != current.number)
                .map(|i| i.runs)
                .sum()
        };
        let opposition = total_for(current.bowling_team);
        let already = total_for(current.batting_team);
        (opposition + 1).saturating_sub(already)
    }

    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            match_id: self.match_id,
            status: self.status,
            current_innings: self.current_innings,
            innings: self.innings.clone(),
            result: self.result.clone(),
        }
    }
}
