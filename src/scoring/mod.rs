//! Innings scoring engine
//!
//! Pure, storage-free logic that turns one delivery into updated match state:
//! - `ball_index`: over/ball position for a delivery
//! - `delivery`: validated delivery outcomes and ball events
//! - `innings`: running totals and the run/extras accumulator
//! - `completion`: when an innings ends
//! - `result`: who won and by how much
//! - `cricket_match`: the match state machine tying the above together
//! - `replay`: rebuilding a match from its ball log

pub mod ball_index;
pub mod completion;
pub mod cricket_match;
pub mod delivery;
pub mod innings;
pub mod replay;
pub mod result;


pub use ball_index::{ball_position, overs_display, BallPosition, BALLS_PER_OVER};
pub use completion::CompletionReason;
pub use cricket_match::{BallOutcome, Match, MatchSetup, MatchStatus, MatchSummary};
pub use delivery::{BallEvent, BallInput, Delivery, DeliveryKind, Dismissal, NewBall, WicketType};
pub use innings::{Extras, Innings, MAX_WICKETS};
pub use replay::{reconcile, replay, ReconcileReport};
pub use result::{compute_result, innings_victory, MatchResult, ResultType};
