//! Match comments. Immutable once stored.

use crate::models::game::GameId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a comment.
pub type CommentId = Uuid;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub game_id: GameId,
    pub author: String,
    pub body: String,
    pub timestamp: DateTime<Utc>,
}

/// A validated comment ready to be stored (the store assigns the id).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub game_id: GameId,
    pub author: String,
    pub body: String,
    pub timestamp: DateTime<Utc>,
}

impl NewComment {
    pub fn into_comment(self, id: CommentId) -> Comment {
        Comment {
            id,
            game_id: self.game_id,
            author: self.author,
            body: self.body,
            timestamp: self.timestamp,
        }
    }
}

/// Comment form input.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CommentDraft {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub body: String,
}
