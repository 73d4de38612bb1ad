//! Match lifecycle commands: schedule, start, abandon, show, list.

use super::common::{print_json, TeamNames};
use crate::{
    cli::types::{MatchId, TeamId},
    scoring::{Match, MatchSetup},
    storage::{MatchRepository, ScoreDatabase},
    Result, ScoreError,
};

/// Load, change and save a match in one transaction.
fn update_match(
    db: &mut ScoreDatabase,
    match_id: MatchId,
    change: impl FnOnce(&mut Match) -> Result<()>,
) -> Result<Match> {
    db.transaction(|conn| {
        let mut m = conn
            .find_match(match_id)?
            .ok_or_else(|| ScoreError::not_found("Match", match_id))?;
        change(&mut m)?;
        conn.save_match(&m)
    })
}

/// Move a scheduled match to live with `batting_first` batting.
pub fn start_match(db: &mut ScoreDatabase, match_id: MatchId, batting_first: TeamId) -> Result<Match> {
    update_match(db, match_id, |m| m.start(batting_first))
}

pub fn abandon_match(db: &mut ScoreDatabase, match_id: MatchId) -> Result<Match> {
    update_match(db, match_id, Match::abandon)
}

/// Handle `match create`
pub fn handle_create_match(db: &mut ScoreDatabase, setup: MatchSetup, as_json: bool) -> Result<()> {
    let created = db.create_match(setup)?;
    if as_json {
        return print_json(&created);
    }
    let names = TeamNames::load(db)?;
    println!("✓ Scheduled {}", names.fixture_line(&created));
    Ok(())
}

/// Handle `match start`
pub fn handle_start_match(
    db: &mut ScoreDatabase,
    match_id: MatchId,
    batting_first: TeamId,
    as_json: bool,
) -> Result<()> {
    let started = start_match(db, match_id, batting_first)?;
    if as_json {
        return print_json(&started.summary());
    }
    let names = TeamNames::load(db)?;
    println!(
        "✓ Match {} is live, {} batting first",
        started.match_id,
        names.label(batting_first)
    );
    Ok(())
}

/// Handle `match abandon`
pub fn handle_abandon_match(db: &mut ScoreDatabase, match_id: MatchId) -> Result<()> {
    let abandoned = abandon_match(db, match_id)?;
    println!("✓ Match {} abandoned", abandoned.match_id);
    Ok(())
}

/// Handle `match show`: the scorecard summary
pub fn handle_show_match(db: &ScoreDatabase, match_id: MatchId, as_json: bool) -> Result<()> {
    let m = db.get_match(match_id)?;
    if as_json {
        return print_json(&m);
    }

    let names = TeamNames::load(db)?;
    println!("{}", names.fixture_line(&m));
    if m.innings.is_empty() {
        println!("  Not started");
    }
    for innings in &m.innings {
        let marker = if innings.is_completed { "" } else { " *" };
        println!(
            "  Innings {}: {} {}{}",
            innings.number,
            names.label(innings.batting_team),
            innings.score_line(),
            marker
        );
        println!("    Extras: {}", innings.extras.scorecard_line());
    }
    if let Some(result) = &m.result {
        println!("  Result: {}", names.result_line(result));
    }
    Ok(())
}

/// Handle `match list`
pub fn handle_list_matches(db: &ScoreDatabase, as_json: bool) -> Result<()> {
    let matches = db.list_matches()?;
    if as_json {
        let summaries: Vec<_> = matches.iter().map(Match::summary).collect();
        return print_json(&summaries);
    }
    if matches.is_empty() {
        println!("No matches scheduled");
        return Ok(());
    }
    let names = TeamNames::load(db)?;
    for m in &matches {
        println!("{}", names.fixture_line(m));
    }
    Ok(())
}
