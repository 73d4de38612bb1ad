//! Per-innings running totals and the run/extras accumulator.

use super::{
    ball_index::{overs_display, BALLS_PER_OVER},
    delivery::{Delivery, DeliveryKind},
};
use crate::{
    cli::types::TeamId,
    error::{Result, ScoreError},
};
use serde::{Deserialize, Serialize};

pub const MAX_WICKETS: u8 = 10;

/// Runs not attributed to a batsman.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extras {
    pub wides: u32,
    pub no_balls: u32,
    pub byes: u32,
    pub leg_byes: u32,
}

impl Extras {
    /// Scorecard line. Wides and no-balls are delivery counts while byes and
    /// leg-byes are runs, so the four are never summed into one figure.
    pub fn scorecard_line(&self) -> String {
        format!(
            "{} wd, {} nb (deliveries); {} b, {} lb (runs)",
            self.wides, self.no_balls, self.byes, self.leg_byes
        )
    }
}

/// One side's turn at batting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Innings {
    /// 1-indexed position within the match.
    pub number: u8,
    pub batting_team: TeamId,
    pub bowling_team: TeamId,
    pub runs: u32,
    pub wickets: u8,
    /// Legal deliveries only.
    pub balls: u32,
    pub overs: f64,
    pub extras: Extras,
    pub is_completed: bool,
}

impl Innings {
    pub fn new(number: u8, batting_team: TeamId, bowling_team: TeamId) -> Self {
        Self {
            number,
            batting_team,
            bowling_team,
            runs: 0,
            wickets: 0,
            balls: 0,
            overs: 0.0,
            extras: Extras::default(),
            is_completed: false,
        }
    }

    /// The innings that follows this one: roles swapped, counters zeroed.
    pub fn next(&self) -> Self {
        Self::new(self.number + 1, self.bowling_team, self.batting_team)
    }

    pub fn overs_completed(&self) -> u32 {
        self.balls / BALLS_PER_OVER
    }

    pub fn is_all_out(&self) -> bool {
        self.wickets >= MAX_WICKETS
    }

    /// Add one delivery to the running totals.
    ///
    /// Totals only ever grow. A completed innings rejects every delivery.
    pub fn apply(&mut self, delivery: &Delivery) -> Result<()> {
        if self.is_completed {
            return Err(ScoreError::invalid_state(format!(
                "innings {} is already completed",
                self.number
            )));
        }

        let mut runs_to_add = u32::from(delivery.runs);
        match delivery.kind {
            DeliveryKind::Wide => {
                self.extras.wides += 1;
                runs_to_add += 1;
            }
            DeliveryKind::NoBall => {
                self.extras.no_balls += 1;
                runs_to_add += 1;
            }
            DeliveryKind::Bye => self.extras.byes += u32::from(delivery.runs),
            DeliveryKind::LegBye => self.extras.leg_byes += u32::from(delivery.runs),
            DeliveryKind::Legal => {}
        }

        self.runs += runs_to_add;
        if delivery.is_wicket() {
            self.wickets = (self.wickets + 1).min(MAX_WICKETS);
        }
        if delivery.kind.is_legal() {
            self.balls += 1;
            self.overs = overs_display(self.balls);
        }
        Ok(())
    }

    /// Scorecard line such as `142/6 (18.3 ov)`.
    pub fn score_line(&self) -> String {
        format!("{}/{} ({:.1} ov)", self.runs, self.wickets, self.overs)
    }
}
