//! Ball recording: the single write path into a live match.

use serde::Serialize;

use super::common::{print_json, TeamNames};
use crate::{
    cli::types::MatchId,
    scoring::{BallEvent, BallInput, BallOutcome, MatchSummary, NewBall},
    storage::{BallRepository, MatchRepository, PlayerRepository, ScoreDatabase},
    Result, ScoreError,
};

/// A persisted ball together with the match state it produced.
#[derive(Debug, Clone, Serialize)]
pub struct RecordedBall {
    pub ball: BallEvent,
    pub outcome: BallOutcome,
    pub summary: MatchSummary,
}

/// Record one ball atomically: the match update and the ball insert commit
/// together or not at all.
///
/// Not idempotent. Submitting the same input twice scores it twice.
pub fn record_ball(
    db: &mut ScoreDatabase,
    match_id: MatchId,
    input: &BallInput,
) -> Result<RecordedBall> {
    db.transaction(|conn| record_ball_with(conn, match_id, input))
}

/// Scoring logic against any repository; the caller owns the transaction.
pub fn record_ball_with<R>(repo: &R, match_id: MatchId, input: &BallInput) -> Result<RecordedBall>
where
    R: MatchRepository + BallRepository + PlayerRepository + ?Sized,
{
    let delivery = input.to_delivery()?;

    let mut m = repo
        .find_match(match_id)?
        .ok_or_else(|| ScoreError::not_found("Match", match_id))?;
    let (batting, bowling) = {
        let innings = m.ensure_accepting_balls()?;
        (innings.batting_team, innings.bowling_team)
    };

    // Every named player must exist and be on the right side of this innings.
    let involved = [
        ("bowler", Some(input.bowler), bowling),
        ("batsman", Some(input.batsman), batting),
        ("non-striker", input.non_striker, batting),
        ("fielder", input.fielder, bowling),
    ];
    for (role, player_id, team) in involved {
        let Some(player_id) = player_id else {
            continue;
        };
        let player = repo
            .find_player(player_id)?
            .ok_or_else(|| ScoreError::not_found("Player", player_id))?;
        if player.team_id != team {
            return Err(ScoreError::validation(format!(
                "{} {} plays for team {}, not team {}",
                role, player_id, player.team_id, team
            )));
        }
    }

    let outcome = m.record_delivery(&delivery)?;
    let saved = repo.save_match(&m)?;
    let ball = repo.insert_ball(&NewBall {
        match_id,
        innings: outcome.innings,
        over: outcome.position.over,
        ball: outcome.position.ball,
        bowler: input.bowler,
        batsman: input.batsman,
        non_striker: input.non_striker,
        fielder: input.fielder,
        delivery,
        commentary: input.commentary.clone(),
    })?;

    tracing::debug!(
        match_id = %match_id,
        ball_id = ball.ball_id,
        innings = outcome.innings,
        over = outcome.position.over,
        ball = outcome.position.ball,
        kind = ?delivery.kind,
        runs = delivery.runs,
        wicket = delivery.is_wicket(),
        "Ball recorded"
    );

    Ok(RecordedBall {
        ball,
        outcome,
        summary: saved.summary(),
    })
}

/// Handle `ball record`
pub fn handle_record_ball(
    db: &mut ScoreDatabase,
    match_id: MatchId,
    input: &BallInput,
    as_json: bool,
) -> Result<()> {
    let recorded = record_ball(db, match_id, input)?;

    if as_json {
        return print_json(&recorded);
    }

    let names = TeamNames::load(db)?;
    let ball = &recorded.ball;
    println!(
        "✓ Ball {} recorded: innings {}, {}.{} - {}",
        ball.ball_id,
        ball.innings,
        ball.over,
        ball.ball,
        describe_ball(ball)
    );
    if let Some(innings) = recorded
        .summary
        .innings
        .get(usize::from(recorded.outcome.innings).saturating_sub(1))
    {
        println!(
            "  {} {}",
            names.label(innings.batting_team),
            innings.score_line()
        );
    }
    if let Some(reason) = recorded.outcome.innings_completed {
        println!("  Innings {} completed ({})", recorded.outcome.innings, reason);
    }
    if let Some(result) = &recorded.summary.result {
        println!("  {}", names.result_line(result));
    }
    Ok(())
}

/// Handle `ball list`
pub fn handle_list_balls(db: &ScoreDatabase, match_id: MatchId, as_json: bool) -> Result<()> {
    db.get_match(match_id)?;
    let balls = db.connection().balls_for_match(match_id)?;

    if as_json {
        return print_json(&balls);
    }

    if balls.is_empty() {
        println!("No balls recorded for match {}", match_id);
        return Ok(());
    }
    for ball in &balls {
        println!(
            "{:>5}  inn {}  {:>3}.{}  bowler {:>4}  batsman {:>4}  {}{}",
            ball.ball_id,
            ball.innings,
            ball.over,
            ball.ball,
            ball.bowler,
            ball.batsman,
            describe_ball(ball),
            ball.commentary
                .as_deref()
                .map(|c| format!("  \"{}\"", c))
                .unwrap_or_default()
        );
    }
    Ok(())
}

/// Short scorer's notation for one ball, e.g. `1wd`, `4`, `W (caught)`.
pub fn describe_ball(ball: &BallEvent) -> String {
    let mut text = if ball.is_wide {
        format!("{}wd", u32::from(ball.runs) + 1)
    } else if ball.is_no_ball {
        format!("{}nb", u32::from(ball.runs) + 1)
    } else if ball.is_bye {
        format!("{}b", ball.runs)
    } else if ball.is_leg_bye {
        format!("{}lb", ball.runs)
    } else if ball.runs == 0 && !ball.is_wicket {
        "dot".to_string()
    } else {
        ball.runs.to_string()
    };

    if ball.is_wicket {
        if ball.runs == 0 && !(ball.is_wide || ball.is_no_ball || ball.is_bye || ball.is_leg_bye) {
            text = "W".to_string();
        } else {
            text.push_str(" + W");
        }
        if let Some(kind) = ball.wicket_type {
            text.push_str(&format!(" ({})", kind));
        }
    }
    text
}
