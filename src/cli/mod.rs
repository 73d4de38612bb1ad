//! CLI argument definitions and parsing.

pub mod types;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use types::{MatchId, PlayerId, TeamId};

use crate::{
    scoring::{BallInput, MatchSetup, WicketType},
    storage::PlayerRole,
};

/// One delivery as typed at the command line.
#[derive(Debug, Args)]
pub struct BallArgs {
    /// Player bowling the delivery.
    #[clap(long)]
    pub bowler: PlayerId,

    /// Player on strike.
    #[clap(long)]
    pub batsman: PlayerId,

    /// Player at the non-striker's end.
    #[clap(long)]
    pub non_striker: Option<PlayerId>,

    /// Runs off the delivery (0-6). For wides and no-balls this excludes the penalty run.
    #[clap(long, short, default_value_t = 0)]
    pub runs: u8,

    #[clap(long)]
    pub wide: bool,

    #[clap(long)]
    pub no_ball: bool,

    #[clap(long)]
    pub bye: bool,

    #[clap(long)]
    pub leg_bye: bool,

    /// A batsman was dismissed on this delivery.
    #[clap(long)]
    pub wicket: bool,

    /// Mode of dismissal: bowled | caught | lbw | run-out | stumped | hit-wicket | ...
    #[clap(long)]
    pub wicket_type: Option<WicketType>,

    /// Fielder involved in the dismissal.
    #[clap(long)]
    pub fielder: Option<PlayerId>,

    /// Free-text commentary stored with the ball.
    #[clap(long, short)]
    pub commentary: Option<String>,
}

impl From<BallArgs> for BallInput {
    fn from(args: BallArgs) -> Self {
        BallInput {
            bowler: args.bowler,
            batsman: args.batsman,
            non_striker: args.non_striker,
            runs: args.runs,
            is_wide: args.wide,
            is_no_ball: args.no_ball,
            is_bye: args.bye,
            is_leg_bye: args.leg_bye,
            is_wicket: args.wicket,
            wicket_type: args.wicket_type,
            fielder: args.fielder,
            commentary: args.commentary,
        }
    }
}

/// Match format and fixture details for `match create`.
#[derive(Debug, Args)]
pub struct MatchArgs {
    /// Home team id.
    #[clap(long)]
    pub home: TeamId,

    /// Away team id.
    #[clap(long)]
    pub away: TeamId,

    /// Over limit for every innings.
    #[clap(long, short, default_value_t = 20)]
    pub overs: u32,

    /// Innings per side (1 or 2).
    #[clap(long, default_value_t = 1)]
    pub innings_per_side: u8,

    #[clap(long)]
    pub venue: Option<String>,

    /// End the final innings as soon as the target is passed.
    #[clap(long)]
    pub end_on_target: bool,
}

impl From<MatchArgs> for MatchSetup {
    fn from(args: MatchArgs) -> Self {
        MatchSetup {
            home_team: args.home,
            away_team: args.away,
            venue: args.venue,
            overs: args.overs,
            innings_per_side: args.innings_per_side,
            end_on_target: args.end_on_target,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum TeamCmd {
    /// Register a team
    Add {
        name: String,

        /// Abbreviation shown on scorecards.
        #[clap(long)]
        short_name: Option<String>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// List registered teams
    List {
        #[clap(long)]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum PlayerCmd {
    /// Register a player on a team
    Add {
        name: String,

        #[clap(long, short)]
        team: TeamId,

        /// batsman | bowler | all-rounder | wicket-keeper
        #[clap(long)]
        role: Option<PlayerRole>,

        #[clap(long)]
        json: bool,
    },

    /// List players, optionally for one team
    List {
        #[clap(long, short)]
        team: Option<TeamId>,

        #[clap(long)]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum MatchCmd {
    /// Schedule a match between two registered teams
    Create {
        #[clap(flatten)]
        setup: MatchArgs,

        #[clap(long)]
        json: bool,
    },

    /// Start a scheduled match
    Start {
        match_id: MatchId,

        /// Team batting first.
        #[clap(long)]
        batting: TeamId,

        #[clap(long)]
        json: bool,
    },

    /// Abandon a scheduled or live match
    Abandon { match_id: MatchId },

    /// Show the scorecard summary for a match
    Show {
        match_id: MatchId,

        #[clap(long)]
        json: bool,
    },

    /// List all matches
    List {
        #[clap(long)]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum BallCmd {
    /// Record the next delivery of a live match
    Record {
        match_id: MatchId,

        #[clap(flatten)]
        ball: BallArgs,

        #[clap(long)]
        json: bool,
    },

    /// List the ball log of a match in order
    List {
        match_id: MatchId,

        #[clap(long)]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum StatsCmd {
    /// Batting leaderboard computed from the ball log
    Batting {
        /// Restrict to a single match.
        #[clap(long, short)]
        match_id: Option<MatchId>,

        /// Number of rows to show.
        #[clap(long, short, default_value_t = 10)]
        limit: usize,

        #[clap(long)]
        json: bool,
    },

    /// Bowling leaderboard computed from the ball log
    Bowling {
        #[clap(long, short)]
        match_id: Option<MatchId>,

        #[clap(long, short, default_value_t = 10)]
        limit: usize,

        #[clap(long)]
        json: bool,
    },
}

/// Top-level CLI for ball-by-ball cricket scoring.
#[derive(Debug, Parser)]
#[clap(name = "cricket-score", version, about)]
pub struct CricketScore {
    /// SQLite database file (or set `CRICKET_SCORE_DB` env var).
    #[clap(long, global = true)]
    pub db: Option<PathBuf>,

    /// Log debug output to stderr. `RUST_LOG` takes precedence when set.
    #[clap(long, short, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage teams
    Team {
        #[clap(subcommand)]
        cmd: TeamCmd,
    },

    /// Manage players
    Player {
        #[clap(subcommand)]
        cmd: PlayerCmd,
    },

    /// Schedule, start, abandon and inspect matches
    Match {
        #[clap(subcommand)]
        cmd: MatchCmd,
    },

    /// Record and list deliveries
    Ball {
        #[clap(subcommand)]
        cmd: BallCmd,
    },

    /// Player statistics
    Stats {
        #[clap(subcommand)]
        cmd: StatsCmd,
    },

    /// Replay ball logs and check them against stored match totals.
    ///
    /// Exits with status 1 when any match is inconsistent.
    Verify {
        /// Check a single match instead of all of them.
        match_id: Option<MatchId>,

        #[clap(long)]
        json: bool,
    },
}
