//! Delivery outcomes and the ball events that record them.
//!
//! Callers describe a ball with independent flags (`is_wide`, `is_bye`, ...).
//! The engine works on [`Delivery`], where the extra type is a single
//! [`DeliveryKind`] and a wicket is an optional [`Dismissal`] on top of it,
//! so combinations like "wide and leg-bye" never reach the accumulator.

use crate::{
    cli::types::{MatchId, PlayerId},
    error::{Result, ScoreError},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MAX_RUNS_PER_BALL: u8 = 6;

/// How a delivery was scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryKind {
    /// Runs off the bat (possibly zero).
    Legal,
    Wide,
    NoBall,
    Bye,
    LegBye,
}

impl DeliveryKind {
    /// Whether the delivery counts toward the over.
    pub fn is_legal(self) -> bool {
        !matches!(self, DeliveryKind::Wide | DeliveryKind::NoBall)
    }

    /// Build the kind from caller flags, rejecting contradictory combinations.
    pub fn from_flags(is_wide: bool, is_no_ball: bool, is_bye: bool, is_leg_bye: bool) -> Result<Self> {
        let set = [is_wide, is_no_ball, is_bye, is_leg_bye]
            .iter()
            .filter(|flag| **flag)
            .count();
        if set > 1 {
            return Err(ScoreError::validation(
                "a delivery can be at most one of wide, no-ball, bye or leg-bye",
            ));
        }

        Ok(if is_wide {
            DeliveryKind::Wide
        } else if is_no_ball {
            DeliveryKind::NoBall
        } else if is_bye {
            DeliveryKind::Bye
        } else if is_leg_bye {
            DeliveryKind::LegBye
        } else {
            DeliveryKind::Legal
        })
    }
}

/// Mode of dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WicketType {
    Bowled,
    Caught,
    Lbw,
    RunOut,
    Stumped,
    HitWicket,
    Retired,
    Other,
}

impl WicketType {
    /// Dismissals credited to the bowler in bowling figures.
    pub fn credited_to_bowler(self) -> bool {
        !matches!(
            self,
            WicketType::RunOut | WicketType::Retired | WicketType::Other
        )
    }
}

impl fmt::Display for WicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WicketType::Bowled => "bowled",
            WicketType::Caught => "caught",
            WicketType::Lbw => "lbw",
            WicketType::RunOut => "run-out",
            WicketType::Stumped => "stumped",
            WicketType::HitWicket => "hit-wicket",
            WicketType::Retired => "retired",
            WicketType::Other => "other",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for WicketType {
    type Err = ScoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "bowled" => Ok(WicketType::Bowled),
            "caught" => Ok(WicketType::Caught),
            "lbw" => Ok(WicketType::Lbw),
            "run-out" | "runout" => Ok(WicketType::RunOut),
            "stumped" => Ok(WicketType::Stumped),
            "hit-wicket" | "hitwicket" => Ok(WicketType::HitWicket),
            "retired" => Ok(WicketType::Retired),
            "other" => Ok(WicketType::Other),
            _ => Err(ScoreError::validation(format!("unknown wicket type: {}", s))),
        }
    }
}

/// A wicket falling on a delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dismissal {
    pub kind: Option<WicketType>,
}

/// A validated delivery as seen by the scoring engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    pub kind: DeliveryKind,
    pub runs: u8,
    pub wicket: Option<Dismissal>,
}

impl Delivery {
    pub fn new(kind: DeliveryKind, runs: u8) -> Self {
        Self {
            kind,
            runs,
            wicket: None,
        }
    }

    pub fn legal(runs: u8) -> Self {
        Self::new(DeliveryKind::Legal, runs)
    }

    pub fn wide(runs: u8) -> Self {
        Self::new(DeliveryKind::Wide, runs)
    }

    pub fn no_ball(runs: u8) -> Self {
        Self::new(DeliveryKind::NoBall, runs)
    }

    pub fn bye(runs: u8) -> Self {
        Self::new(DeliveryKind::Bye, runs)
    }

    pub fn leg_bye(runs: u8) -> Self {
        Self::new(DeliveryKind::LegBye, runs)
    }

    pub fn with_wicket(mut self, kind: Option<WicketType>) -> Self {
        self.wicket = Some(Dismissal { kind });
        self
    }

    pub fn is_wicket(&self) -> bool {
        self.wicket.is_some()
    }

    /// Runs credited to the striker; extras are never the batsman's.
    pub fn bat_runs(&self) -> u8 {
        match self.kind {
            DeliveryKind::Legal | DeliveryKind::NoBall => self.runs,
            DeliveryKind::Wide | DeliveryKind::Bye | DeliveryKind::LegBye => 0,
        }
    }

    /// Runs charged against the bowler (byes and leg-byes are not).
    pub fn runs_conceded(&self) -> u32 {
        match self.kind {
            DeliveryKind::Legal => u32::from(self.runs),
            DeliveryKind::Wide | DeliveryKind::NoBall => u32::from(self.runs) + 1,
            DeliveryKind::Bye | DeliveryKind::LegBye => 0,
        }
    }
}

/// A ball as submitted by a caller, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallInput {
    pub bowler: PlayerId,
    pub batsman: PlayerId,
    #[serde(default)]
    pub non_striker: Option<PlayerId>,
    pub runs: u8,
    #[serde(default)]
    pub is_wide: bool,
    #[serde(default)]
    pub is_no_ball: bool,
    #[serde(default)]
    pub is_bye: bool,
    #[serde(default)]
    pub is_leg_bye: bool,
    #[serde(default)]
    pub is_wicket: bool,
    #[serde(default)]
    pub wicket_type: Option<WicketType>,
    #[serde(default)]
    pub fielder: Option<PlayerId>,
    #[serde(default)]
    pub commentary: Option<String>,
}

impl BallInput {
    /// A dot ball from `bowler` to `batsman`; adjust fields from there.
    pub fn new(bowler: PlayerId, batsman: PlayerId, runs: u8) -> Self {
        Self {
            bowler,
            batsman,
            non_striker: None,
            runs,
            is_wide: false,
            is_no_ball: false,
            is_bye: false,
            is_leg_bye: false,
            is_wicket: false,
            wicket_type: None,
            fielder: None,
            commentary: None,
        }
    }

    /// Check the input and convert it into an engine [`Delivery`].
    pub fn to_delivery(&self) -> Result<Delivery> {
        if self.runs > MAX_RUNS_PER_BALL {
            return Err(ScoreError::validation(format!(
                "runs must be between 0 and {}, got {}",
                MAX_RUNS_PER_BALL, self.runs
            )));
        }
        if self.non_striker == Some(self.batsman) {
            return Err(ScoreError::validation(
                "batsman and non-striker must be different players",
            ));
        }
        if self.wicket_type.is_some() && !self.is_wicket {
            return Err(ScoreError::validation(
                "wicket type given for a delivery that is not a wicket",
            ));
        }

        let kind = DeliveryKind::from_flags(self.is_wide, self.is_no_ball, self.is_bye, self.is_leg_bye)?;
        let delivery = Delivery::new(kind, self.runs);
        Ok(if self.is_wicket {
            delivery.with_wicket(self.wicket_type)
        } else {
            delivery
        })
    }
}

/// A persisted ball event. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallEvent {
    pub ball_id: u64,
    pub match_id: MatchId,
    pub innings: u8,
    pub over: u32,
    pub ball: u32,
    pub bowler: PlayerId,
    pub batsman: PlayerId,
    pub non_striker: Option<PlayerId>,
    pub fielder: Option<PlayerId>,
    pub runs: u8,
    pub is_wide: bool,
    pub is_no_ball: bool,
    pub is_bye: bool,
    pub is_leg_bye: bool,
    pub is_wicket: bool,
    pub wicket_type: Option<WicketType>,
    pub commentary: Option<String>,
    pub created_at: u64,
}

impl BallEvent {
    /// Rebuild the engine view of this ball.
    pub fn delivery(&self) -> Result<Delivery> {
        let kind = DeliveryKind::from_flags(self.is_wide, self.is_no_ball, self.is_bye, self.is_leg_bye)?;
        let delivery = Delivery::new(kind, self.runs);
        Ok(if self.is_wicket {
            delivery.with_wicket(self.wicket_type)
        } else {
            delivery
        })
    }
}

/// A ball ready to be appended to the log; the repository assigns id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBall {
    pub match_id: MatchId,
    pub innings: u8,
    pub over: u32,
    pub ball: u32,
    pub bowler: PlayerId,
    pub batsman: PlayerId,
    pub non_striker: Option<PlayerId>,
    pub fielder: Option<PlayerId>,
    pub delivery: Delivery,
    pub commentary: Option<String>,
}
