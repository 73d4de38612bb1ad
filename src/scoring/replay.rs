//! Rebuild a match from its ball log and compare with the stored aggregate.

use super::{
    cricket_match::{Match, MatchStatus},
    delivery::BallEvent,
};
use crate::{cli::types::MatchId, error::Result};
use serde::{Deserialize, Serialize};

/// Outcome of comparing a stored match with a replay of its balls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileReport {
    pub match_id: MatchId,
    pub balls: usize,
    pub mismatches: Vec<String>,
}

impl ReconcileReport {
    pub fn is_consistent(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Feed `balls` through the engine starting from `stored`'s start conditions.
///
/// Balls must be in log order (innings, over, ball, id). Stored positions
/// that disagree with the recomputed ones are reported through `mismatches`.
pub fn replay(stored: &Match, balls: &[BallEvent], mismatches: &mut Vec<String>) -> Result<Match> {
    let mut fresh = Match::scheduled(stored.match_id, stored.setup(), stored.created_at);
    fresh.version = stored.version;
    fresh.updated_at = stored.updated_at;

    if let Some(first) = stored.innings.first() {
        fresh.start(first.batting_team)?;
    }

    for event in balls {
        let delivery = event.delivery()?;
        let outcome = fresh.record_delivery(&delivery)?;
        if outcome.innings != event.innings
            || outcome.position.over != event.over
            || outcome.position.ball != event.ball
        {
            mismatches.push(format!(
                "ball {} stored at innings {} {}.{} but replays to innings {} {}.{}",
                event.ball_id,
                event.innings,
                event.over,
                event.ball,
                outcome.innings,
                outcome.position.over,
                outcome.position.ball
            ));
        }
    }

    if stored.status == MatchStatus::Abandoned {
        fresh.status = MatchStatus::Abandoned;
    }
    Ok(fresh)
}

/// Replay and diff. A ball the engine refuses (e.g. after the match ended)
/// is reported as a mismatch rather than an error.
pub fn reconcile(stored: &Match, balls: &[BallEvent]) -> ReconcileReport {
    let mut mismatches = Vec::new();

    match replay(stored, balls, &mut mismatches) {
        Ok(replayed) => {
            if replayed.status != stored.status {
                mismatches.push(format!(
                    "status {} but replay gives {}",
                    stored.status, replayed.status
                ));
            }
            if replayed.current_innings != stored.current_innings {
                mismatches.push(format!(
                    "current innings {} but replay gives {}",
                    stored.current_innings, replayed.current_innings
                ));
            }
            if replayed.innings.len() != stored.innings.len() {
                mismatches.push(format!(
                    "{} innings stored but replay gives {}",
                    stored.innings.len(),
                    replayed.innings.len()
                ));
            }
            for (kept, rebuilt) in stored.innings.iter().zip(&replayed.innings) {
                if kept != rebuilt {
                    mismatches.push(format!(
                        "innings {}: stored {} extras {:?}, replay {} extras {:?}",
                        kept.number,
                        kept.score_line(),
                        kept.extras,
                        rebuilt.score_line(),
                        rebuilt.extras
                    ));
                }
            }
            if replayed.result != stored.result {
                mismatches.push(format!(
                    "result {:?} but replay gives {:?}",
                    stored.result, replayed.result
                ));
            }
        }
        Err(e) => mismatches.push(format!("replay failed: {}", e)),
    }

    if !mismatches.is_empty() {
        tracing::warn!(
            match_id = %stored.match_id,
            mismatches = mismatches.len(),
            "Stored match disagrees with its ball log"
        );
    }

    ReconcileReport {
        match_id: stored.match_id,
        balls: balls.len(),
        mismatches,
    }
}
