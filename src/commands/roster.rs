//! Team and player registration

use super::common::{print_json, TeamNames};
use crate::{
    cli::types::TeamId,
    storage::{PlayerRole, ScoreDatabase},
    Result,
};

/// Handle `team add`
pub fn handle_add_team(
    db: &mut ScoreDatabase,
    name: &str,
    short_name: Option<&str>,
    as_json: bool,
) -> Result<()> {
    let team = db.add_team(name, short_name)?;
    if as_json {
        return print_json(&team);
    }
    println!("✓ Team {} registered with id {}", team.name, team.team_id);
    Ok(())
}

/// Handle `team list`
pub fn handle_list_teams(db: &ScoreDatabase, as_json: bool) -> Result<()> {
    let teams = db.list_teams()?;
    if as_json {
        return print_json(&teams);
    }
    for team in &teams {
        match &team.short_name {
            Some(short) => println!("{:>4}  {} ({})", team.team_id, team.name, short),
            None => println!("{:>4}  {}", team.team_id, team.name),
        }
    }
    Ok(())
}

/// Handle `player add`
pub fn handle_add_player(
    db: &mut ScoreDatabase,
    name: &str,
    team_id: TeamId,
    role: Option<PlayerRole>,
    as_json: bool,
) -> Result<()> {
    let player = db.add_player(name, team_id, role)?;
    if as_json {
        return print_json(&player);
    }
    println!(
        "✓ Player {} registered with id {}",
        player.name, player.player_id
    );
    Ok(())
}

/// Handle `player list`
pub fn handle_list_players(db: &ScoreDatabase, team_id: Option<TeamId>, as_json: bool) -> Result<()> {
    let players = db.list_players(team_id)?;
    if as_json {
        return print_json(&players);
    }
    let names = TeamNames::load(db)?;
    for player in &players {
        let role = player.role.map(|r| format!(", {}", r)).unwrap_or_default();
        println!(
            "{:>4}  {} ({}{})",
            player.player_id,
            player.name,
            names.label(player.team_id),
            role
        );
    }
    Ok(())
}
