//! Match log operations: load, create, replace and delete matches.

use crate::logic::cache::SummaryCache;
use crate::logic::validation::validate_game;
use crate::models::{Game, GameDraft, GameId, GamePatch, MatchLogError, NewGame, PlayerId};
use crate::store::RecordStore;
use log::{info, warn};

/// Fetch one match. A missing match is `NotFound`, distinct from a store failure.
pub async fn load_game<S>(store: &S, id: GameId) -> Result<Game, MatchLogError>
where
    S: RecordStore + ?Sized,
{
    Ok(store.get_game(id).await?)
}

/// Validate and store a new match for `player_id`.
pub async fn log_game<S>(
    store: &S,
    cache: &mut SummaryCache,
    player_id: PlayerId,
    draft: &GameDraft,
) -> Result<Game, MatchLogError>
where
    S: RecordStore + ?Sized,
{
    let fields = validate_game(draft).map_err(|e| {
        warn!("Rejected match form: {}", e);
        e
    })?;
    let game = store
        .create_game(NewGame { player_id, fields })
        .await
        .map_err(|e| {
            warn!("Failed to log match: {}", e);
            e
        })?;
    cache.invalidate(player_id);
    info!("Logged match {} vs {} for player {}", game.id, game.opponent, player_id);
    Ok(game)
}

/// Replace every editable field of an existing match.
pub async fn replace_game<S>(
    store: &S,
    cache: &mut SummaryCache,
    id: GameId,
    draft: &GameDraft,
) -> Result<Game, MatchLogError>
where
    S: RecordStore + ?Sized,
{
    let fields = validate_game(draft).map_err(|e| {
        warn!("Rejected match form for {}: {}", id, e);
        e
    })?;
    let game = store
        .patch_game(id, GamePatch::from(fields))
        .await
        .map_err(|e| {
            warn!("Failed to update match {}: {}", id, e);
            e
        })?;
    cache.invalidate(game.player_id);
    info!("Updated match {}", id);
    Ok(game)
}

/// Delete a match. Returns the removed record.
pub async fn delete_game<S>(
    store: &S,
    cache: &mut SummaryCache,
    id: GameId,
) -> Result<Game, MatchLogError>
where
    S: RecordStore + ?Sized,
{
    let game = store.get_game(id).await?;
    store.delete_game(id).await.map_err(|e| {
        warn!("Failed to delete match {}: {}", id, e);
        e
    })?;
    cache.invalidate(game.player_id);
    info!("Deleted match {}", id);
    Ok(game)
}
