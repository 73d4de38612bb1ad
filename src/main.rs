//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use cricket_score::{
    cli::{BallCmd, Commands, CricketScore, MatchCmd, PlayerCmd, StatsCmd, TeamCmd},
    commands::{
        balls::{handle_list_balls, handle_record_ball},
        matches::{
            handle_abandon_match, handle_create_match, handle_list_matches, handle_show_match,
            handle_start_match,
        },
        open_database,
        roster::{handle_add_player, handle_add_team, handle_list_players, handle_list_teams},
        stats::{handle_batting_stats, handle_bowling_stats},
        verify::handle_verify,
    },
};
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins; otherwise `-v` selects debug and the default is warnings only.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "cricket_score=debug"
        } else {
            "warn"
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the CLI.
fn main() -> anyhow::Result<()> {
    let app = CricketScore::parse();
    init_logging(app.verbose);

    let mut db = open_database(app.db)?;

    match app.command {
        Commands::Team { cmd } => match cmd {
            TeamCmd::Add {
                name,
                short_name,
                json,
            } => handle_add_team(&mut db, &name, short_name.as_deref(), json)?,
            TeamCmd::List { json } => handle_list_teams(&db, json)?,
        },

        Commands::Player { cmd } => match cmd {
            PlayerCmd::Add {
                name,
                team,
                role,
                json,
            } => handle_add_player(&mut db, &name, team, role, json)?,
            PlayerCmd::List { team, json } => handle_list_players(&db, team, json)?,
        },

        Commands::Match { cmd } => match cmd {
            MatchCmd::Create { setup, json } => handle_create_match(&mut db, setup.into(), json)?,
            MatchCmd::Start {
                match_id,
                batting,
                json,
            } => handle_start_match(&mut db, match_id, batting, json)?,
            MatchCmd::Abandon { match_id } => handle_abandon_match(&mut db, match_id)?,
            MatchCmd::Show { match_id, json } => handle_show_match(&db, match_id, json)?,
            MatchCmd::List { json } => handle_list_matches(&db, json)?,
        },

        Commands::Ball { cmd } => match cmd {
            BallCmd::Record {
                match_id,
                ball,
                json,
            } => handle_record_ball(&mut db, match_id, &ball.into(), json)?,
            BallCmd::List { match_id, json } => handle_list_balls(&db, match_id, json)?,
        },

        Commands::Stats { cmd } => match cmd {
            StatsCmd::Batting {
                match_id,
                limit,
                json,
            } => handle_batting_stats(&db, match_id, limit, json)?,
            StatsCmd::Bowling {
                match_id,
                limit,
                json,
            } => handle_bowling_stats(&db, match_id, limit, json)?,
        },

        Commands::Verify { match_id, json } => {
            if !handle_verify(&db, match_id, json)? {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
