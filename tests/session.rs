//! Session context: initial selection, switching, profile creation.

mod common;

use common::{day, FlakyStore};
use match_log_web::{
    InMemoryStore, MatchLogError, Player, ProfileDraft, RecordStore, Session, Snapshot,
};
use uuid::Uuid;

fn player(name: &str) -> Player {
    Player {
        id: Uuid::new_v4(),
        name: name.to_string(),
        position: "Midfielder".to_string(),
        joined_date: day("2024-01-01"),
    }
}

#[test]
fn persisted_known_player_is_current() {
    let (a, b) = (player("Ana"), player("Ben"));
    let session = Session::new(vec![a.clone(), b.clone()], Some(b.id));
    assert_eq!(session.current_id(), Some(b.id));
}

#[test]
fn unknown_persisted_id_falls_back_to_first_player() {
    let (a, b) = (player("Ana"), player("Ben"));
    let session = Session::new(vec![a.clone(), b], Some(Uuid::new_v4()));
    assert_eq!(session.current(), Some(&a));

    let session = Session::new(vec![a.clone()], None);
    assert_eq!(session.current_id(), Some(a.id));
}

#[test]
fn no_players_means_no_current_player() {
    let session = Session::new(Vec::new(), Some(Uuid::new_v4()));
    assert_eq!(session.current(), None);
    assert!(matches!(
        session.require_current(),
        Err(MatchLogError::NoCurrentPlayer)
    ));
}

#[test]
fn switching_to_unknown_player_keeps_selection() {
    let (a, b) = (player("Ana"), player("Ben"));
    let mut session = Session::new(vec![a.clone(), b.clone()], None);

    assert_eq!(session.switch_player(b.id).unwrap().name, "Ben");
    assert_eq!(session.current_id(), Some(b.id));

    let err = session.switch_player(Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, MatchLogError::NotFound { .. }));
    assert_eq!(session.current_id(), Some(b.id));
}

#[tokio::test]
async fn start_reads_players_from_store() {
    let (a, b) = (player("Ana"), player("Ben"));
    let store = InMemoryStore::from_snapshot(Snapshot {
        players: vec![a.clone(), b.clone()],
        ..Snapshot::default()
    });
    let session = Session::start(&store, Some(b.id)).await.unwrap();
    assert_eq!(session.players().len(), 2);
    assert_eq!(session.current_id(), Some(b.id));
}

#[tokio::test]
async fn created_profile_becomes_current() {
    let store = FlakyStore::default();
    let mut session = Session::start(&store, None).await.unwrap();
    assert!(session.current().is_none());

    let draft = ProfileDraft {
        name: " Ana ".to_string(),
        position: "Goalkeeper".to_string(),
    };
    let created = session
        .create_profile(&store, &draft, day("2024-09-01"))
        .await
        .unwrap()
        .clone();
    assert_eq!(created.name, "Ana");
    assert_eq!(created.joined_date, day("2024-09-01"));
    assert_eq!(session.current_id(), Some(created.id));
    assert_eq!(store.inner.list_players().await.unwrap(), vec![created]);
}

#[tokio::test]
async fn invalid_profile_is_not_stored() {
    let store = FlakyStore::default();
    let mut session = Session::new(Vec::new(), None);
    let err = session
        .create_profile(&store, &ProfileDraft::default(), day("2024-09-01"))
        .await
        .unwrap_err();
    match err {
        MatchLogError::Validation(errors) => {
            assert!(errors.contains("name"));
            assert!(errors.contains("position"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(store.writes(), 0);
    assert!(session.players().is_empty());
}
