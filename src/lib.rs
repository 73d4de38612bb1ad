//! Ball-by-ball cricket scoring library
//!
//! Scores cricket matches one delivery at a time and keeps the ball log and
//! the match aggregates consistent in a local SQLite database.
//!
//! ## Features
//!
//! - **Ball Index**: Over and ball position for every delivery, with wides and no-balls re-bowled
//! - **Run and Extras Accounting**: Per-innings runs, wickets, legal balls and extras breakdown
//! - **Innings Completion**: Overs exhausted, all out, or target reached in the chase
//! - **Match Results**: Winner and margin in runs or wickets, or a tie
//! - **Atomic Recording**: The match update and the ball insert commit together
//! - **Verification**: Replay any match from its ball log and compare with stored totals
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cricket_score::{
//!     commands::{balls::record_ball, matches::start_match},
//!     scoring::{BallInput, MatchSetup},
//!     storage::ScoreDatabase,
//! };
//!
//! # fn example() -> cricket_score::Result<()> {
//! let mut db = ScoreDatabase::new_in_memory()?;
//! let home = db.add_team("Home XI", None)?.team_id;
//! let away = db.add_team("Away XI", None)?.team_id;
//! let batsman = db.add_player("Opener", home, None)?.player_id;
//! let bowler = db.add_player("Quick", away, None)?.player_id;
//!
//! let m = db.create_match(MatchSetup::limited_overs(home, away, 20))?;
//! start_match(&mut db, m.match_id, home)?;
//!
//! let recorded = record_ball(&mut db, m.match_id, &BallInput::new(bowler, batsman, 4))?;
//! println!("{}", recorded.summary.innings[0].score_line());
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Point every command at one database file:
//! ```bash
//! export CRICKET_SCORE_DB=~/cricket/club.db
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod scoring;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{MatchId, PlayerId, TeamId};
pub use error::{ErrorKind, Result, ScoreError};
pub use scoring::{BallEvent, BallInput, Innings, Match, MatchResult, MatchSetup, MatchStatus};

pub const DB_PATH_ENV_VAR: &str = "CRICKET_SCORE_DB";
