//! Player profile records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player profile.
pub type PlayerId = Uuid;

/// A player profile. Created once, never edited or deleted.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub position: String,
    #[serde(deserialize_with = "crate::models::date::deserialize")]
    pub joined_date: NaiveDate,
}

/// A validated profile ready to be stored (the store assigns the id).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlayer {
    pub name: String,
    pub position: String,
    pub joined_date: NaiveDate,
}

impl NewPlayer {
    pub fn into_player(self, id: PlayerId) -> Player {
        Player {
            id,
            name: self.name,
            position: self.position,
            joined_date: self.joined_date,
        }
    }
}

/// Profile form input.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ProfileDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: String,
}
