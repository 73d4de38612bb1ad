//! Innings completion rules.

use super::innings::Innings;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why an innings ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionReason {
    OversExhausted,
    AllOut,
    TargetReached,
}

impl fmt::Display for CompletionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CompletionReason::OversExhausted => "overs exhausted",
            CompletionReason::AllOut => "all out",
            CompletionReason::TargetReached => "target reached",
        };
        write!(f, "{}", s)
    }
}

/// Check an innings after a delivery has been applied.
///
/// `target` is the run count this innings needs to win the match, and is
/// only supplied for a final innings of a match that ends on a successful
/// chase.
pub fn completion_reason(
    innings: &Innings,
    over_limit: u32,
    target: Option<u32>,
) -> Option<CompletionReason> {
    if innings.overs_completed() >= over_limit {
        Some(CompletionReason::OversExhausted)
    } else if innings.is_all_out() {
        Some(CompletionReason::AllOut)
    } else if target.is_some_and(|runs| innings.runs >= runs) {
        Some(CompletionReason::TargetReached)
    } else {
        None
    }
}
