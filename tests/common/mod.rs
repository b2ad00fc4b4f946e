//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use match_log_web::models::{
    Comment, Game, GameId, GamePatch, Location, MatchResult, NewComment, NewGame, NewObjective,
    NewPlayer, Objective, ObjectiveId, ObjectivePatch, Player, PlayerId, StoreError,
};
use match_log_web::{InMemoryStore, RecordStore};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use uuid::Uuid;

pub fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn game(opponent: &str, date: &str, result: MatchResult, goals: u32, assists: u32) -> Game {
    Game {
        id: Uuid::new_v4(),
        player_id: Uuid::nil(),
        date: day(date),
        opponent: opponent.to_string(),
        location: Location::Home,
        result,
        position: "Striker".to_string(),
        duration: 90,
        goals,
        assists,
        passes: 20,
        notes: String::new(),
        completed: true,
        played_full_match: true,
    }
}

pub fn objective(player_id: PlayerId, current: u32, target: u32, completed: bool) -> Objective {
    Objective {
        id: Uuid::new_v4(),
        player_id,
        title: "Score goals".to_string(),
        skill_id: None,
        target_value: target,
        current_value: current,
        deadline: day("2025-06-30"),
        completed,
        created_at: day("2025-01-01"),
    }
}

/// Record store wrapper that can refuse writes and counts the writes it was asked to do.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: InMemoryStore,
    reject_writes: AtomicBool,
    writes: AtomicUsize,
}

impl FlakyStore {
    pub fn new(inner: InMemoryStore) -> Self {
        Self {
            inner,
            reject_writes: AtomicBool::new(false),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn write_attempt(&self) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.reject_writes.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RecordStore for FlakyStore {
    async fn list_players(&self) -> Result<Vec<Player>, StoreError> {
        self.inner.list_players().await
    }

    async fn create_player(&self, player: NewPlayer) -> Result<Player, StoreError> {
        self.write_attempt()?;
        self.inner.create_player(player).await
    }

    async fn list_games(&self, player_id: PlayerId) -> Result<Vec<Game>, StoreError> {
        self.inner.list_games(player_id).await
    }

    async fn get_game(&self, id: GameId) -> Result<Game, StoreError> {
        self.inner.get_game(id).await
    }

    async fn create_game(&self, game: NewGame) -> Result<Game, StoreError> {
        self.write_attempt()?;
        self.inner.create_game(game).await
    }

    async fn patch_game(&self, id: GameId, patch: GamePatch) -> Result<Game, StoreError> {
        self.write_attempt()?;
        self.inner.patch_game(id, patch).await
    }

    async fn delete_game(&self, id: GameId) -> Result<(), StoreError> {
        self.write_attempt()?;
        self.inner.delete_game(id).await
    }

    async fn list_objectives(&self, player_id: PlayerId) -> Result<Vec<Objective>, StoreError> {
        self.inner.list_objectives(player_id).await
    }

    async fn create_objective(&self, objective: NewObjective) -> Result<Objective, StoreError> {
        self.write_attempt()?;
        self.inner.create_objective(objective).await
    }

    async fn patch_objective(
        &self,
        id: ObjectiveId,
        patch: ObjectivePatch,
    ) -> Result<Objective, StoreError> {
        self.write_attempt()?;
        self.inner.patch_objective(id, patch).await
    }

    async fn delete_objective(&self, id: ObjectiveId) -> Result<(), StoreError> {
        self.write_attempt()?;
        self.inner.delete_objective(id).await
    }

    async fn list_comments(&self, game_id: GameId) -> Result<Vec<Comment>, StoreError> {
        self.inner.list_comments(game_id).await
    }

    async fn create_comment(&self, comment: NewComment) -> Result<Comment, StoreError> {
        self.write_attempt()?;
        self.inner.create_comment(comment).await
    }
}
