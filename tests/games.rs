//! Match log operations, summary cache invalidation and CSV export.

mod common;

use common::{day, game, FlakyStore};
use match_log_web::{
    delete_game, export_games_csv, load_game, log_game, replace_game, GameDraft, InMemoryStore,
    Location, MatchLogError, MatchResult, RecordStore, Snapshot, SummaryCache,
};
use uuid::Uuid;

fn draft(opponent: &str, date: &str, result: MatchResult, goals: i64) -> GameDraft {
    GameDraft {
        date: date.to_string(),
        opponent: opponent.to_string(),
        location: Some(Location::Away),
        result,
        position: "Winger".to_string(),
        duration: 75,
        goals,
        ..GameDraft::default()
    }
}

#[test]
fn game_draft_reports_every_invalid_field() {
    let draft = GameDraft {
        date: "2024-02-30".to_string(),
        duration: -5,
        ..GameDraft::default()
    };
    let errors = match_log_web::logic::validate_game(&draft).unwrap_err();
    for field in ["date", "opponent", "location", "position", "duration"] {
        assert!(errors.contains(field), "missing error for {field}");
    }
    assert_eq!(errors.len(), 5);
    assert_eq!(errors.get("date"), Some("Date is not a valid calendar date"));
}

#[test]
fn negative_counting_stats_are_field_errors() {
    let mut draft = draft("Red Lions", "2024-03-01", MatchResult::Win, -1);
    draft.assists = -2;
    draft.passes = i64::from(u32::MAX) + 1;
    let errors = match_log_web::logic::validate_game(&draft).unwrap_err();
    assert_eq!(errors.len(), 3);
    assert_eq!(errors.get("goals"), Some("Goals cannot be negative"));
    assert_eq!(errors.get("assists"), Some("Assists cannot be negative"));
    assert_eq!(errors.get("passes"), Some("Passes is too large"));

    draft.goals = 2;
    draft.assists = 0;
    draft.passes = 41;
    let fields = match_log_web::logic::validate_game(&draft).unwrap();
    assert_eq!((fields.goals, fields.assists, fields.passes), (2, 0, 41));
}

#[test]
fn negative_goals_in_a_form_body_still_parse() {
    let draft: GameDraft = serde_json::from_str(
        r#"{"date":"2024-03-01","opponent":"Red Lions","location":"Home",
            "position":"Winger","duration":90,"goals":-3}"#,
    )
    .unwrap();
    assert_eq!(draft.goals, -3);
    let errors = match_log_web::logic::validate_game(&draft).unwrap_err();
    assert!(errors.contains("goals"));
}

#[tokio::test]
async fn logging_a_game_invalidates_the_summary() {
    let player = Uuid::new_v4();
    let store = FlakyStore::default();
    let mut cache = SummaryCache::new();

    let before = cache.summary(&store, player).await.unwrap();
    assert_eq!(before.total_games, 0);
    assert!(cache.is_fresh(player));

    let saved = log_game(
        &store,
        &mut cache,
        player,
        &draft(" Red Lions ", "2024-03-01", MatchResult::Win, 2),
    )
    .await
    .unwrap();
    assert_eq!(saved.opponent, "Red Lions");
    assert_eq!(saved.player_id, player);
    assert!(!cache.is_fresh(player));

    let after = cache.summary(&store, player).await.unwrap();
    assert_eq!(after.total_games, 1);
    assert_eq!(after.total_goals, 2);
    assert_eq!(after.total_minutes, 75);
    assert_eq!(after.win_rate, 100.0);
}

#[tokio::test]
async fn cache_is_reused_until_invalidated() {
    let player = Uuid::new_v4();
    let mut g = game("Red Lions", "2024-03-01", MatchResult::Win, 1, 0);
    g.player_id = player;
    let store = FlakyStore::new(InMemoryStore::from_snapshot(Snapshot {
        games: vec![g.clone()],
        ..Snapshot::default()
    }));
    let mut cache = SummaryCache::new();
    assert_eq!(cache.summary(&store, player).await.unwrap().total_games, 1);

    // Written behind the cache's back: not visible until invalidated.
    store.inner.delete_game(g.id).await.unwrap();
    assert_eq!(cache.summary(&store, player).await.unwrap().total_games, 1);

    cache.invalidate(player);
    assert_eq!(cache.summary(&store, player).await.unwrap().total_games, 0);
}

#[tokio::test]
async fn invalid_game_is_not_stored() {
    let player = Uuid::new_v4();
    let store = FlakyStore::default();
    let mut cache = SummaryCache::new();
    let err = log_game(&store, &mut cache, player, &GameDraft::default())
        .await
        .unwrap_err();
    assert!(matches!(err, MatchLogError::Validation(_)));
    assert_eq!(store.writes(), 0);
    assert_eq!(cache.version(player), 0);
}

#[tokio::test]
async fn replace_and_delete_update_the_summary() {
    let player = Uuid::new_v4();
    let store = FlakyStore::default();
    let mut cache = SummaryCache::new();
    let saved = log_game(
        &store,
        &mut cache,
        player,
        &draft("Red Lions", "2024-03-01", MatchResult::Win, 2),
    )
    .await
    .unwrap();
    assert_eq!(cache.summary(&store, player).await.unwrap().wins, 1);

    let replaced = replace_game(
        &store,
        &mut cache,
        saved.id,
        &draft("Red Lions", "2024-03-02", MatchResult::Loss, 0),
    )
    .await
    .unwrap();
    assert_eq!(replaced.id, saved.id);
    assert_eq!(replaced.date, day("2024-03-02"));
    let summary = cache.summary(&store, player).await.unwrap();
    assert_eq!((summary.wins, summary.losses, summary.total_goals), (0, 1, 0));

    let removed = delete_game(&store, &mut cache, saved.id).await.unwrap();
    assert_eq!(removed.id, saved.id);
    assert_eq!(cache.summary(&store, player).await.unwrap().total_games, 0);

    let err = load_game(&store, saved.id).await.unwrap_err();
    assert!(matches!(err, MatchLogError::NotFound { .. }));
    let err = delete_game(&store, &mut cache, saved.id).await.unwrap_err();
    assert!(matches!(err, MatchLogError::NotFound { .. }));
}

#[tokio::test]
async fn failed_write_keeps_cache_version() {
    let player = Uuid::new_v4();
    let store = FlakyStore::default();
    store.reject_writes(true);
    let mut cache = SummaryCache::new();
    let err = log_game(
        &store,
        &mut cache,
        player,
        &draft("Red Lions", "2024-03-01", MatchResult::Win, 2),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, MatchLogError::Store(_)));
    assert_eq!(cache.version(player), 0);
}

#[test]
fn csv_export_has_header_even_when_empty() {
    let csv = export_games_csv(&[]).unwrap();
    assert_eq!(
        csv,
        "date,opponent,location,result,position,duration,goals,assists,passes,rating,fullMatch,notes\n"
    );
}

#[test]
fn csv_export_lists_newest_first_with_rating() {
    let mut older = game("Ajax Youth", "2024-01-05", MatchResult::Draw, 0, 0);
    older.notes = "Rainy, cold".to_string();
    let newer = game("Red Lions", "2024-03-01", MatchResult::Win, 2, 1);
    let csv = export_games_csv(&[older, newer]).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[1],
        "2024-03-01,Red Lions,Home,Win,Striker,90,2,1,20,7.8,true,"
    );
    assert_eq!(
        lines[2],
        "2024-01-05,Ajax Youth,Home,Draw,Striker,90,0,0,20,6.0,true,\"Rainy, cold\""
    );
}
