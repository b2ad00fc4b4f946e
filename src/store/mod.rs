//! Record store client: the create/read/update/delete contract the match log talks to.

mod memory;

pub use memory::{InMemoryStore, Snapshot};

use crate::models::{
    Comment, Game, GameId, GamePatch, NewComment, NewGame, NewObjective, NewPlayer, Objective,
    ObjectiveId, ObjectivePatch, Player, PlayerId, StoreError,
};
use async_trait::async_trait;

/// Request/response access to persisted records.
///
/// Lookups, patches and deletes of an unknown id fail with [`StoreError::NotFound`].
/// Patches carry only the fields to change; the store returns the full updated record.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_players(&self) -> Result<Vec<Player>, StoreError>;
    async fn create_player(&self, player: NewPlayer) -> Result<Player, StoreError>;

    async fn list_games(&self, player_id: PlayerId) -> Result<Vec<Game>, StoreError>;
    async fn get_game(&self, id: GameId) -> Result<Game, StoreError>;
    async fn create_game(&self, game: NewGame) -> Result<Game, StoreError>;
    async fn patch_game(&self, id: GameId, patch: GamePatch) -> Result<Game, StoreError>;
    async fn delete_game(&self, id: GameId) -> Result<(), StoreError>;

    async fn list_objectives(&self, player_id: PlayerId) -> Result<Vec<Objective>, StoreError>;
    async fn create_objective(&self, objective: NewObjective) -> Result<Objective, StoreError>;
    async fn patch_objective(
        &self,
        id: ObjectiveId,
        patch: ObjectivePatch,
    ) -> Result<Objective, StoreError>;
    async fn delete_objective(&self, id: ObjectiveId) -> Result<(), StoreError>;

    async fn list_comments(&self, game_id: GameId) -> Result<Vec<Comment>, StoreError>;
    async fn create_comment(&self, comment: NewComment) -> Result<Comment, StoreError>;
}
