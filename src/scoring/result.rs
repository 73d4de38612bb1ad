//! Match result from final innings totals.

use super::innings::{Innings, MAX_WICKETS};
use crate::cli::types::TeamId;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    Runs,
    Wickets,
    Tie,
}

impl fmt::Display for ResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResultType::Runs => "runs",
            ResultType::Wickets => "wickets",
            ResultType::Tie => "tie",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub winner: Option<TeamId>,
    pub result_type: ResultType,
    pub margin: String,
}

/// Decide the match from its innings.
///
/// The side batting in the last innings is the chasing side. Runs are
/// aggregated per side, so two innings each reduce to a plain comparison of
/// first and second innings totals. A chasing win is measured in wickets left
/// in the final innings. Returns `None` with fewer than two innings.
pub fn compute_result(innings: &[Innings]) -> Option<MatchResult> {
    if innings.len() < 2 {
        return None;
    }
    let last = innings.last()?;
    let chasing = last.batting_team;
    let defending = last.bowling_team;

    let total_for = |team: TeamId| -> u32 {
        innings
            .iter()
            .filter(|i| i.batting_team == team)
            .map(|i| i.runs)
            .sum()
    };
    let chasing_runs = total_for(chasing);
    let defending_runs = total_for(defending);

    let result = if chasing_runs > defending_runs {
        MatchResult {
            winner: Some(chasing),
            result_type: ResultType::Wickets,
            margin: format!("{} wickets", MAX_WICKETS.saturating_sub(last.wickets)),
        }
    } else if defending_runs > chasing_runs {
        MatchResult {
            winner: Some(defending),
            result_type: ResultType::Runs,
            margin: format!("{} runs", defending_runs - chasing_runs),
        }
    } else {
        MatchResult {
            winner: None,
            result_type: ResultType::Tie,
            margin: "Match tied".to_string(),
        }
    };
    Some(result)
}

/// A win by an innings: the side due to bat in the final innings already
/// leads on aggregate, so that innings is never played.
pub fn innings_victory(innings: &[Innings], batting_last: TeamId) -> Option<MatchResult> {
    let total_for = |team: TeamId| -> u32 {
        innings
            .iter()
            .filter(|i| i.batting_team == team)
            .map(|i| i.runs)
            .sum()
    };
    let opposition = innings
        .iter()
        .map(|i| i.batting_team)
        .find(|&team| team != batting_last)?;

    let lead = total_for(batting_last).checked_sub(total_for(opposition))?;
    (lead > 0).then(|| MatchResult {
        winner: Some(batting_last),
        result_type: ResultType::Runs,
        margin: format!("an innings and {} runs", lead),
    })
}
