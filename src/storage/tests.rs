//! Unit tests for storage functionality

use super::*;
use crate::cli::types::{MatchId, PlayerId, TeamId};
use crate::error::{ErrorKind, ScoreError};
use crate::scoring::{Delivery, MatchSetup, MatchStatus, NewBall, WicketType};

fn create_test_db() -> ScoreDatabase {
    // Create in-memory database for testing
    let conn = rusqlite::Connection::open_in_memory().unwrap();

    // Enable foreign keys for testing
    conn.execute("PRAGMA foreign_keys = ON", []).unwrap();

    let mut db = ScoreDatabase { conn };
    db.initialize_schema().unwrap();
    db
}

fn create_test_db_with_teams() -> (ScoreDatabase, TeamId, TeamId) {
    let mut db = create_test_db();
    let home = db.add_team("Mumbai", Some("MUM")).unwrap();
    let away = db.add_team("Chennai", None).unwrap();
    (db, home.team_id, away.team_id)
}

fn new_ball(match_id: MatchId, bowler: PlayerId, batsman: PlayerId, delivery: Delivery) -> NewBall {
    NewBall {
        match_id,
        innings: 1,
        over: 0,
        ball: 2,
        bowler,
        batsman,
        non_striker: None,
        fielder: None,
        delivery,
        commentary: None,
    }
}

#[test]
fn test_database_creation() {
    let _db = create_test_db();
    // Should not panic - database creation successful
}

#[test]
fn test_schema_initialization_is_idempotent() {
    let mut db = create_test_db();
    db.initialize_schema().unwrap();
    db.initialize_schema().unwrap();
}

#[test]
fn test_add_and_get_team() {
    let mut db = create_test_db();

    let team = db.add_team("  Mumbai  ", Some("MUM")).unwrap();
    assert_eq!(team.name, "Mumbai");

    let loaded = db.get_team(team.team_id).unwrap();
    assert_eq!(loaded, team);
}

#[test]
fn test_duplicate_team_name_rejected() {
    let mut db = create_test_db();
    db.add_team("Mumbai", None).unwrap();

    let err = db.add_team("mumbai", None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(db.list_teams().unwrap().len(), 1);
}

#[test]
fn test_missing_team_is_not_found() {
    let db = create_test_db();
    match db.get_team(TeamId::new(404)).unwrap_err() {
        ScoreError::NotFound { entity, id } => {
            assert_eq!(entity, "Team");
            assert_eq!(id, "404");
        }
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

#[test]
fn test_add_player_requires_team() {
    let mut db = create_test_db();
    let err = db.add_player("Nobody", TeamId::new(1), None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_list_players_filters_by_team() {
    let (mut db, home, away) = create_test_db_with_teams();
    db.add_player("Rohit", home, Some(PlayerRole::Batsman)).unwrap();
    db.add_player("Bumrah", home, Some(PlayerRole::Bowler)).unwrap();
    db.add_player("Dhoni", away, Some(PlayerRole::WicketKeeper)).unwrap();

    assert_eq!(db.list_players(None).unwrap().len(), 3);
    let home_players = db.list_players(Some(home)).unwrap();
    assert_eq!(home_players.len(), 2);
    assert!(home_players.iter().all(|p| p.team_id == home));

    let dhoni = &db.list_players(Some(away)).unwrap()[0];
    assert_eq!(dhoni.role, Some(PlayerRole::WicketKeeper));
}

#[test]
fn test_player_role_parsing() {
    assert_eq!("all_rounder".parse::<PlayerRole>().unwrap(), PlayerRole::AllRounder);
    assert_eq!("Keeper".parse::<PlayerRole>().unwrap(), PlayerRole::WicketKeeper);
    assert!("captain".parse::<PlayerRole>().is_err());
}

#[test]
fn test_create_and_load_match() {
    let (mut db, home, away) = create_test_db_with_teams();
    let mut setup = MatchSetup::limited_overs(home, away, 20);
    setup.venue = Some("Wankhede".to_string());

    let created = db.create_match(setup).unwrap();
    assert_eq!(created.status, MatchStatus::Scheduled);
    assert_eq!(created.version, 0);

    let loaded = db.get_match(created.match_id).unwrap();
    assert_eq!(loaded, created);
}

#[test]
fn test_create_match_with_unknown_team() {
    let (mut db, home, _) = create_test_db_with_teams();
    let err = db
        .create_match(MatchSetup::limited_overs(home, TeamId::new(77), 20))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_save_match_bumps_version() {
    let (mut db, home, away) = create_test_db_with_teams();
    let mut m = db.create_match(MatchSetup::limited_overs(home, away, 20)).unwrap();
    m.start(home).unwrap();

    let saved = db.connection().save_match(&m).unwrap();
    assert_eq!(saved.version, 1);

    let loaded = db.get_match(m.match_id).unwrap();
    assert_eq!(loaded.status, MatchStatus::Live);
    assert_eq!(loaded.innings, m.innings);
    assert_eq!(loaded.version, 1);
}

#[test]
fn test_stale_save_is_conflict() {
    let (mut db, home, away) = create_test_db_with_teams();
    let mut m = db.create_match(MatchSetup::limited_overs(home, away, 20)).unwrap();
    m.start(home).unwrap();

    db.connection().save_match(&m).unwrap();
    let err = db.connection().save_match(&m).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[test]
fn test_save_unknown_match_is_not_found() {
    let (mut db, home, away) = create_test_db_with_teams();
    let mut m = db.create_match(MatchSetup::limited_overs(home, away, 20)).unwrap();
    m.match_id = MatchId::new(999);

    let err = db.connection().save_match(&m).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_insert_ball_round_trip() {
    let (mut db, home, away) = create_test_db_with_teams();
    let bowler = db.add_player("Bumrah", home, None).unwrap().player_id;
    let batsman = db.add_player("Dhoni", away, None).unwrap().player_id;
    let m = db.create_match(MatchSetup::limited_overs(away, home, 20)).unwrap();

    let mut ball = new_ball(
        m.match_id,
        bowler,
        batsman,
        Delivery::legal(0).with_wicket(Some(WicketType::Caught)),
    );
    ball.fielder = Some(bowler);
    ball.commentary = Some("c & b".to_string());

    let inserted = db.connection().insert_ball(&ball).unwrap();
    assert!(inserted.ball_id > 0);
    assert!(inserted.is_wicket);
    assert_eq!(inserted.wicket_type, Some(WicketType::Caught));

    let balls = db.connection().balls_for_match(m.match_id).unwrap();
    assert_eq!(balls, vec![inserted]);
}

#[test]
fn test_balls_come_back_in_log_order() {
    let (mut db, home, away) = create_test_db_with_teams();
    let bowler = db.add_player("Bumrah", home, None).unwrap().player_id;
    let batsman = db.add_player("Dhoni", away, None).unwrap().player_id;
    let m = db.create_match(MatchSetup::limited_overs(away, home, 20)).unwrap();

    let mut late = new_ball(m.match_id, bowler, batsman, Delivery::legal(1));
    late.over = 1;
    late.ball = 1;
    db.connection().insert_ball(&late).unwrap();
    let wide = new_ball(m.match_id, bowler, batsman, Delivery::wide(0));
    db.connection().insert_ball(&wide).unwrap();
    let legal = new_ball(m.match_id, bowler, batsman, Delivery::legal(2));
    db.connection().insert_ball(&legal).unwrap();

    let balls = db.connection().balls_for_match(m.match_id).unwrap();
    let order: Vec<(u32, u32, bool)> = balls.iter().map(|b| (b.over, b.ball, b.is_wide)).collect();
    assert_eq!(order, vec![(0, 2, true), (0, 2, false), (1, 1, false)]);
}

#[test]
fn test_ball_for_unknown_player_violates_foreign_key() {
    let (mut db, home, away) = create_test_db_with_teams();
    let m = db.create_match(MatchSetup::limited_overs(away, home, 20)).unwrap();

    let ball = new_ball(m.match_id, PlayerId::new(50), PlayerId::new(51), Delivery::legal(1));
    let err = db.connection().insert_ball(&ball).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Storage);
}

#[test]
fn test_transaction_rolls_back_on_error() {
    let (mut db, home, away) = create_test_db_with_teams();
    let mut m = db.create_match(MatchSetup::limited_overs(home, away, 20)).unwrap();
    m.start(home).unwrap();

    let result: crate::Result<()> = db.transaction(|conn| {
        conn.save_match(&m)?;
        Err(ScoreError::invalid_state("abort"))
    });
    assert!(result.is_err());

    let loaded = db.get_match(m.match_id).unwrap();
    assert_eq!(loaded.status, MatchStatus::Scheduled);
    assert_eq!(loaded.version, 0);
}

#[test]
fn test_find_player_via_repository() {
    let (mut db, home, _) = create_test_db_with_teams();
    let player = db.add_player("Rohit", home, None).unwrap();

    assert_eq!(
        db.connection().find_player(player.player_id).unwrap(),
        Some(player)
    );
    assert_eq!(db.connection().find_player(PlayerId::new(99)).unwrap(), None);
}

#[test]
fn test_list_balls_across_matches() {
    let (mut db, home, away) = create_test_db_with_teams();
    let bowler = db.add_player("Bumrah", home, None).unwrap().player_id;
    let batsman = db.add_player("Dhoni", away, None).unwrap().player_id;
    let first = db.create_match(MatchSetup::limited_overs(away, home, 20)).unwrap();
    let second = db.create_match(MatchSetup::limited_overs(away, home, 20)).unwrap();

    for id in [second.match_id, first.match_id, second.match_id] {
        db.connection()
            .insert_ball(&new_ball(id, bowler, batsman, Delivery::legal(1)))
            .unwrap();
    }

    assert_eq!(db.list_balls(None).unwrap().len(), 3);
    assert_eq!(db.list_balls(Some(second.match_id)).unwrap().len(), 2);
    assert_eq!(db.list_balls(None).unwrap()[0].match_id, first.match_id);
}
