//! Comment threads: newest first, new comments prepended.

use crate::logic::validation::validate_comment;
use crate::models::{Comment, CommentDraft, GameId, MatchLogError};
use crate::store::RecordStore;
use chrono::{DateTime, Utc};
use log::{info, warn};

/// Stable sort by timestamp, most recent first.
pub fn sort_newest_first(comments: &mut [Comment]) {
    comments.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

/// The comments of one match, most recent first.
///
/// Comments are append-only: there is no edit or delete.
#[derive(Clone, Debug)]
pub struct CommentThread {
    game_id: GameId,
    comments: Vec<Comment>,
}

impl CommentThread {
    pub fn new(game_id: GameId, mut comments: Vec<Comment>) -> Self {
        sort_newest_first(&mut comments);
        Self { game_id, comments }
    }

    /// Load the thread of an existing match. A missing match is `NotFound`; comments left
    /// behind by a deleted match are never surfaced.
    pub async fn load<S>(store: &S, game_id: GameId) -> Result<Self, MatchLogError>
    where
        S: RecordStore + ?Sized,
    {
        store.get_game(game_id).await?;
        let comments = store.list_comments(game_id).await?;
        Ok(Self::new(game_id, comments))
    }

    pub fn game_id(&self) -> GameId {
        self.game_id
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn into_comments(self) -> Vec<Comment> {
        self.comments
    }

    /// Validate, store, then put the saved comment at the front.
    ///
    /// `now` is the newest timestamp in the thread, so no re-sort is needed. Invalid input
    /// never reaches the store.
    pub async fn post<S>(
        &mut self,
        store: &S,
        draft: &CommentDraft,
        now: DateTime<Utc>,
    ) -> Result<&Comment, MatchLogError>
    where
        S: RecordStore + ?Sized,
    {
        let new = validate_comment(draft, self.game_id, now).map_err(|e| {
            warn!("Rejected comment on match {}: {}", self.game_id, e);
            e
        })?;
        let saved = store.create_comment(new).await.map_err(|e| {
            warn!("Failed to add comment to match {}: {}", self.game_id, e);
            e
        })?;
        info!("Comment {} added to match {}", saved.id, self.game_id);
        self.comments.insert(0, saved);
        Ok(&self.comments[0])
    }
}
