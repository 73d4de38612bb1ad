//! Integration tests for storage functionality

use cricket_score::{
    scoring::{Delivery, MatchSetup, MatchStatus, NewBall},
    storage::*,
    ErrorKind, MatchId, PlayerId, ScoreError, TeamId,
};
use tempfile::TempDir;

fn create_test_db_with_teams(db: &mut ScoreDatabase) -> (TeamId, TeamId) {
    let home = db.add_team("Northfield", None).unwrap().team_id;
    let away = db.add_team("Southgate", None).unwrap().team_id;
    (home, away)
}

#[test]
fn test_two_connections_see_stale_version_as_conflict() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scores.db");

    let mut first = ScoreDatabase::open(&path).unwrap();
    let (home, away) = create_test_db_with_teams(&mut first);
    let created = first
        .create_match(MatchSetup::limited_overs(home, away, 10))
        .unwrap();

    let second = ScoreDatabase::open(&path).unwrap();

    // Both writers load version 0
    let mut a = first.connection().find_match(created.match_id).unwrap().unwrap();
    let mut b = second.connection().find_match(created.match_id).unwrap().unwrap();

    a.start(home).unwrap();
    let saved = first.connection().save_match(&a).unwrap();
    assert_eq!(saved.version, 1);

    b.start(away).unwrap();
    let err = second.connection().save_match(&b).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    match err {
        ScoreError::Conflict { match_id } => assert_eq!(match_id, created.match_id),
        other => panic!("Expected Conflict, got {:?}", other),
    }

    // The first writer's choice of batting side stands
    let stored = second.get_match(created.match_id).unwrap();
    assert_eq!(stored.status, MatchStatus::Live);
    assert_eq!(stored.innings[0].batting_team, home);
}

#[test]
fn test_ball_for_unknown_match_is_rejected() {
    let mut db = ScoreDatabase::new_in_memory().unwrap();
    let (home, away) = create_test_db_with_teams(&mut db);
    let batsman = db.add_player("Batter", home, None).unwrap().player_id;
    let bowler = db.add_player("Bowler", away, None).unwrap().player_id;

    let result = db.connection().insert_ball(&NewBall {
        match_id: MatchId::new(77),
        innings: 1,
        over: 0,
        ball: 2,
        bowler,
        batsman,
        non_striker: None,
        fielder: None,
        delivery: Delivery::legal(1),
        commentary: None,
    });
    assert_eq!(result.unwrap_err().kind(), ErrorKind::Storage);
}

#[test]
fn test_player_lookup_through_repository() {
    let mut db = ScoreDatabase::new_in_memory().unwrap();
    let (home, _) = create_test_db_with_teams(&mut db);
    let keeper = db
        .add_player("Gloves", home, Some(PlayerRole::WicketKeeper))
        .unwrap();

    let found = db.connection().find_player(keeper.player_id).unwrap();
    assert_eq!(found, Some(keeper));
    assert_eq!(db.connection().find_player(PlayerId::new(999)).unwrap(), None);
}

#[test]
fn test_team_lookup_by_name_ignores_case() {
    let mut db = ScoreDatabase::new_in_memory().unwrap();
    let (home, _) = create_test_db_with_teams(&mut db);

    let found = db.find_team_by_name("NORTHFIELD").unwrap().unwrap();
    assert_eq!(found.team_id, home);
    assert!(db.find_team_by_name("Eastbrook").unwrap().is_none());

    let err = db.add_team("northfield", None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}
