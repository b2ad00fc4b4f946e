//! Record shapes: lenient dates, snapshot seeding, error mapping.

mod common;

use common::day;
use match_log_web::models::parse_calendar_date;
use match_log_web::{
    InMemoryStore, MatchLogError, RecordKind, RecordStore, Snapshot, StoreError,
};
use uuid::Uuid;

#[test]
fn dates_parse_as_calendar_days() {
    for raw in [
        "2024-03-01",
        " 2024-03-01 ",
        "2024/03/01",
        "01.03.2024",
        "2024-03-01T23:30",
        "2024-03-01T08:00:00.000",
        "2024-03-01T08:00:00+02:00",
    ] {
        assert_eq!(parse_calendar_date(raw), Some(day("2024-03-01")), "{raw}");
    }
    assert_eq!(parse_calendar_date("2024-02-30"), None);
    assert_eq!(parse_calendar_date("next tuesday"), None);
    assert_eq!(parse_calendar_date(""), None);
}

#[tokio::test]
async fn snapshot_seeds_every_collection() {
    let player = Uuid::new_v4();
    let game = Uuid::new_v4();
    let json = format!(
        r#"{{
            "players": [{{"id":"{player}","name":"Ana","position":"Winger","joinedDate":"2024-01-01"}}],
            "games": [{{"id":"{game}","playerId":"{player}","date":"2024-03-01","opponent":"Red Lions",
                        "location":"Home","result":"Draw","position":"Winger"}}],
            "goals": [{{"id":"{}","playerId":"{player}","title":"Assists","targetValue":3,
                        "currentValue":1,"deadline":"2024-06-30","completed":false,"createdAt":"2024-01-02"}}],
            "comments": [{{"id":"{}","gameId":"{game}","author":"Coach","body":"Solid",
                           "timestamp":"2024-03-01T20:00:00Z"}}]
        }}"#,
        Uuid::new_v4(),
        Uuid::new_v4()
    );
    let snapshot: Snapshot = serde_json::from_str(&json).unwrap();
    let store = InMemoryStore::from_snapshot(snapshot);

    assert_eq!(store.list_players().await.unwrap()[0].name, "Ana");
    let games = store.list_games(player).await.unwrap();
    assert_eq!(games.len(), 1);
    assert_eq!(games[0].duration, 0);
    assert_eq!(store.list_objectives(player).await.unwrap()[0].current_value, 1);
    assert_eq!(store.list_comments(game).await.unwrap()[0].author, "Coach");
    assert!(store.list_games(Uuid::new_v4()).await.unwrap().is_empty());
}

#[test]
fn store_errors_map_to_the_right_kind() {
    let id = Uuid::new_v4();
    let not_found: MatchLogError = StoreError::NotFound {
        kind: RecordKind::Game,
        id,
    }
    .into();
    assert!(matches!(
        not_found,
        MatchLogError::NotFound {
            kind: RecordKind::Game,
            ..
        }
    ));
    assert_eq!(not_found.to_string(), "Match not found");

    let down: MatchLogError = StoreError::Unavailable("timeout".to_string()).into();
    assert!(matches!(down, MatchLogError::Store(_)));
}

#[test]
fn snapshot_accepts_objectives_as_alias_for_goals() {
    let json = format!(
        r#"{{"objectives": [{{"id":"{}","playerId":"{}","title":"Passes","targetValue":50,
            "currentValue":0,"deadline":"2024-06-30","completed":false,"createdAt":"2024-01-02"}}]}}"#,
        Uuid::new_v4(),
        Uuid::new_v4()
    );
    let snapshot: Snapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(snapshot.goals.len(), 1);
    assert!(snapshot.players.is_empty());
    let out = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(out["goals"][0]["title"], "Passes");
}
