//! Batting and bowling figures derived from the ball log.
//!
//! Nothing here reads match aggregates: every number is recomputed from the
//! persisted balls, so figures stay correct even for abandoned matches.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::common::{print_json, PlayerNames};
use crate::{
    cli::types::{MatchId, PlayerId},
    scoring::{overs_display, BallEvent, BALLS_PER_OVER},
    storage::ScoreDatabase,
    Result,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattingFigures {
    pub player_id: PlayerId,
    pub innings: u32,
    pub runs: u32,
    pub balls_faced: u32,
    pub fours: u32,
    pub sixes: u32,
    pub dismissals: u32,
    pub strike_rate: Option<f64>,
    pub average: Option<f64>,
}

impl BattingFigures {
    fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            innings: 0,
            runs: 0,
            balls_faced: 0,
            fours: 0,
            sixes: 0,
            dismissals: 0,
            strike_rate: None,
            average: None,
        }
    }

    fn finish(mut self) -> Self {
        self.strike_rate =
            (self.balls_faced > 0).then(|| 100.0 * f64::from(self.runs) / f64::from(self.balls_faced));
        self.average = (self.dismissals > 0).then(|| f64::from(self.runs) / f64::from(self.dismissals));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BowlingFigures {
    pub player_id: PlayerId,
    /// Legal deliveries bowled.
    pub balls: u32,
    pub overs: f64,
    pub runs_conceded: u32,
    pub wickets: u32,
    pub economy: Option<f64>,
}

impl BowlingFigures {
    fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            balls: 0,
            overs: 0.0,
            runs_conceded: 0,
            wickets: 0,
            economy: None,
        }
    }

    fn finish(mut self) -> Self {
        self.overs = overs_display(self.balls);
        self.economy = (self.balls > 0).then(|| {
            f64::from(self.runs_conceded) * f64::from(BALLS_PER_OVER) / f64::from(self.balls)
        });
        self
    }
}

/// Per-batsman figures, ordered by player id.
pub fn batting_figures(balls: &[BallEvent]) -> Result<Vec<BattingFigures>> {
    let mut figures: BTreeMap<PlayerId, BattingFigures> = BTreeMap::new();
    let mut innings_seen: BTreeSet<(PlayerId, MatchId, u8)> = BTreeSet::new();

    for ball in balls {
        let delivery = ball.delivery()?;
        let entry = figures
            .entry(ball.batsman)
            .or_insert_with(|| BattingFigures::new(ball.batsman));

        if innings_seen.insert((ball.batsman, ball.match_id, ball.innings)) {
            entry.innings += 1;
        }
        let bat_runs = delivery.bat_runs();
        entry.runs += u32::from(bat_runs);
        if !ball.is_wide {
            entry.balls_faced += 1;
        }
        match bat_runs {
            4 => entry.fours += 1,
            6 => entry.sixes += 1,
            _ => {}
        }
        if ball.is_wicket {
            entry.dismissals += 1;
        }
    }

    Ok(figures.into_values().map(BattingFigures::finish).collect())
}

/// Per-bowler figures, ordered by player id.
pub fn bowling_figures(balls: &[BallEvent]) -> Result<Vec<BowlingFigures>> {
    let mut figures: BTreeMap<PlayerId, BowlingFigures> = BTreeMap::new();

    for ball in balls {
        let delivery = ball.delivery()?;
        let entry = figures
            .entry(ball.bowler)
            .or_insert_with(|| BowlingFigures::new(ball.bowler));

        if delivery.kind.is_legal() {
            entry.balls += 1;
        }
        entry.runs_conceded += delivery.runs_conceded();
        // A wicket with no recorded mode still counts for the bowler.
        if ball.is_wicket && ball.wicket_type.map_or(true, |w| w.credited_to_bowler()) {
            entry.wickets += 1;
        }
    }

    Ok(figures.into_values().map(BowlingFigures::finish).collect())
}

/// Most runs first; strike rate then player id break ties.
pub fn top_batters(mut figures: Vec<BattingFigures>, limit: usize) -> Vec<BattingFigures> {
    figures.sort_by(|a, b| {
        b.runs
            .cmp(&a.runs)
            .then_with(|| {
                let sr = |f: &BattingFigures| f.strike_rate.unwrap_or(0.0);
                sr(b).total_cmp(&sr(a))
            })
            .then_with(|| a.player_id.cmp(&b.player_id))
    });
    figures.truncate(limit);
    figures
}

/// Most wickets first; lower economy then player id break ties.
pub fn top_bowlers(mut figures: Vec<BowlingFigures>, limit: usize) -> Vec<BowlingFigures> {
    figures.sort_by(|a, b| {
        b.wickets
            .cmp(&a.wickets)
            .then_with(|| {
                let econ = |f: &BowlingFigures| f.economy.unwrap_or(f64::INFINITY);
                econ(a).total_cmp(&econ(b))
            })
            .then_with(|| a.player_id.cmp(&b.player_id))
    });
    figures.truncate(limit);
    figures
}

fn format_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v))
}

/// Handle `stats batting`
pub fn handle_batting_stats(
    db: &ScoreDatabase,
    match_id: Option<MatchId>,
    limit: usize,
    as_json: bool,
) -> Result<()> {
    if let Some(id) = match_id {
        db.get_match(id)?;
    }
    let balls = db.list_balls(match_id)?;
    let leaders = top_batters(batting_figures(&balls)?, limit);

    if as_json {
        return print_json(&leaders);
    }
    let names = PlayerNames::load(db)?;
    println!(
        "{:<4} {:<24} {:>4} {:>5} {:>5} {:>3} {:>3} {:>7} {:>7}",
        "#", "Batter", "Inn", "Runs", "Balls", "4s", "6s", "SR", "Avg"
    );
    for (rank, f) in leaders.iter().enumerate() {
        println!(
            "{:<4} {:<24} {:>4} {:>5} {:>5} {:>3} {:>3} {:>7} {:>7}",
            rank + 1,
            names.label(f.player_id),
            f.innings,
            f.runs,
            f.balls_faced,
            f.fours,
            f.sixes,
            format_opt(f.strike_rate),
            format_opt(f.average)
        );
    }
    Ok(())
}

/// Handle `stats bowling`
pub fn handle_bowling_stats(
    db: &ScoreDatabase,
    match_id: Option<MatchId>,
    limit: usize,
    as_json: bool,
) -> Result<()> {
    if let Some(id) = match_id {
        db.get_match(id)?;
    }
    let balls = db.list_balls(match_id)?;
    let leaders = top_bowlers(bowling_figures(&balls)?, limit);

    if as_json {
        return print_json(&leaders);
    }
    let names = PlayerNames::load(db)?;
    println!(
        "{:<4} {:<24} {:>6} {:>5} {:>4} {:>7}",
        "#", "Bowler", "Overs", "Runs", "Wkts", "Econ"
    );
    for (rank, f) in leaders.iter().enumerate() {
        println!(
            "{:<4} {:<24} {:>6.1} {:>5} {:>4} {:>7}",
            rank + 1,
            names.label(f.player_id),
            f.overs,
            f.runs_conceded,
            f.wickets,
            format_opt(f.economy)
        );
    }
    Ok(())
}
