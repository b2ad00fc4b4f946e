//! In-memory record store, optionally seeded from a JSON snapshot.

use crate::models::{
    Comment, Game, GameId, GamePatch, NewComment, NewGame, NewObjective, NewPlayer, Objective,
    ObjectiveId, ObjectivePatch, Player, PlayerId, RecordKind, StoreError,
};
use crate::store::RecordStore;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// Full contents of a store. Collections keep insertion order.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub games: Vec<Game>,
    /// Objectives. The JSON key is `goals`; `objectives` is accepted as an alias.
    #[serde(default, alias = "objectives")]
    pub goals: Vec<Objective>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Record store held in process memory.
///
/// The lock is never held across an await point.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Snapshot>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            tables: RwLock::new(snapshot),
        }
    }

    /// Seed from a JSON file shaped `{ "players": [], "games": [], "goals": [], "comments": [] }`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Unavailable(format!("{}: {}", path.display(), e)))?;
        let snapshot: Snapshot = serde_json::from_str(&raw)
            .map_err(|e| StoreError::Rejected(format!("{}: {}", path.display(), e)))?;
        log::info!(
            "Loaded {} player(s), {} match(es), {} objective(s), {} comment(s) from {}",
            snapshot.players.len(),
            snapshot.games.len(),
            snapshot.goals.len(),
            snapshot.comments.len(),
            path.display()
        );
        Ok(Self::from_snapshot(snapshot))
    }

    /// Copy of everything currently stored.
    pub fn snapshot(&self) -> Result<Snapshot, StoreError> {
        Ok(self.read()?.clone())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Snapshot>, StoreError> {
        self.tables
            .read()
            .map_err(|_| StoreError::Unavailable("lock error".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Snapshot>, StoreError> {
        self.tables
            .write()
            .map_err(|_| StoreError::Unavailable("lock error".to_string()))
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn list_players(&self) -> Result<Vec<Player>, StoreError> {
        Ok(self.read()?.players.clone())
    }

    async fn create_player(&self, player: NewPlayer) -> Result<Player, StoreError> {
        let player = player.into_player(Uuid::new_v4());
        self.write()?.players.push(player.clone());
        Ok(player)
    }

    async fn list_games(&self, player_id: PlayerId) -> Result<Vec<Game>, StoreError> {
        Ok(self
            .read()?
            .games
            .iter()
            .filter(|g| g.player_id == player_id)
            .cloned()
            .collect())
    }

    async fn get_game(&self, id: GameId) -> Result<Game, StoreError> {
        self.read()?
            .games
            .iter()
            .find(|g| g.id == id)
            .cloned()
            .ok_or(StoreError::NotFound {
                kind: RecordKind::Game,
                id,
            })
    }

    async fn create_game(&self, game: NewGame) -> Result<Game, StoreError> {
        let game = game.into_game(Uuid::new_v4());
        self.write()?.games.push(game.clone());
        Ok(game)
    }

    async fn patch_game(&self, id: GameId, patch: GamePatch) -> Result<Game, StoreError> {
        let mut tables = self.write()?;
        let game = tables
            .games
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(StoreError::NotFound {
                kind: RecordKind::Game,
                id,
            })?;
        game.apply(&patch);
        Ok(game.clone())
    }

    async fn delete_game(&self, id: GameId) -> Result<(), StoreError> {
        let mut tables = self.write()?;
        let idx = tables
            .games
            .iter()
            .position(|g| g.id == id)
            .ok_or(StoreError::NotFound {
                kind: RecordKind::Game,
                id,
            })?;
        tables.games.remove(idx);
        Ok(())
    }

    async fn list_objectives(&self, player_id: PlayerId) -> Result<Vec<Objective>, StoreError> {
        Ok(self
            .read()?
            .goals
            .iter()
            .filter(|o| o.player_id == player_id)
            .cloned()
            .collect())
    }

    async fn create_objective(&self, objective: NewObjective) -> Result<Objective, StoreError> {
        let objective = objective.into_objective(Uuid::new_v4());
        self.write()?.goals.push(objective.clone());
        Ok(objective)
    }

    async fn patch_objective(
        &self,
        id: ObjectiveId,
        patch: ObjectivePatch,
    ) -> Result<Objective, StoreError> {
        let mut tables = self.write()?;
        let objective = tables
            .goals
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(StoreError::NotFound {
                kind: RecordKind::Objective,
                id,
            })?;
        objective.apply(&patch);
        Ok(objective.clone())
    }

    async fn delete_objective(&self, id: ObjectiveId) -> Result<(), StoreError> {
        let mut tables = self.write()?;
        let idx = tables
            .goals
            .iter()
            .position(|o| o.id == id)
            .ok_or(StoreError::NotFound {
                kind: RecordKind::Objective,
                id,
            })?;
        tables.goals.remove(idx);
        Ok(())
    }

    async fn list_comments(&self, game_id: GameId) -> Result<Vec<Comment>, StoreError> {
        Ok(self
            .read()?
            .comments
            .iter()
            .filter(|c| c.game_id == game_id)
            .cloned()
            .collect())
    }

    async fn create_comment(&self, comment: NewComment) -> Result<Comment, StoreError> {
        let comment = comment.into_comment(Uuid::new_v4());
        self.write()?.comments.push(comment.clone());
        Ok(comment)
    }
}
