//! Reconcile stored match aggregates against a full replay of the ball log.

use rayon::prelude::*;

use super::common::print_json;
use crate::{
    cli::types::MatchId,
    scoring::{reconcile, ReconcileReport},
    storage::{BallRepository, ScoreDatabase},
    Result,
};

pub fn verify_match(db: &ScoreDatabase, match_id: MatchId) -> Result<ReconcileReport> {
    let m = db.get_match(match_id)?;
    let balls = db.connection().balls_for_match(match_id)?;
    Ok(reconcile(&m, &balls))
}

/// Verify every match. Loading is sequential on the one connection; the
/// replays themselves are independent and run in parallel.
pub fn verify_all(db: &ScoreDatabase) -> Result<Vec<ReconcileReport>> {
    let loaded = db
        .list_matches()?
        .into_iter()
        .map(|m| {
            let balls = db.connection().balls_for_match(m.match_id)?;
            Ok((m, balls))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(loaded
        .par_iter()
        .map(|(m, balls)| reconcile(m, balls))
        .collect())
}

/// Handle `verify`. Returns whether every checked match is consistent.
pub fn handle_verify(db: &ScoreDatabase, match_id: Option<MatchId>, as_json: bool) -> Result<bool> {
    let reports = match match_id {
        Some(id) => vec![verify_match(db, id)?],
        None => verify_all(db)?,
    };
    let consistent = reports.iter().all(ReconcileReport::is_consistent);

    if as_json {
        print_json(&reports)?;
        return Ok(consistent);
    }

    for report in &reports {
        if report.is_consistent() {
            println!(
                "✓ Match {}: consistent ({} balls)",
                report.match_id, report.balls
            );
        } else {
            println!(
                "✗ Match {}: {} mismatches ({} balls)",
                report.match_id,
                report.mismatches.len(),
                report.balls
            );
            for line in &report.mismatches {
                println!("    {}", line);
            }
        }
    }
    if reports.is_empty() {
        println!("No matches to verify");
    }
    Ok(consistent)
}
