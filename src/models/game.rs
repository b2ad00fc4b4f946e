//! Logged matches: Game, Location, MatchResult and the shapes used to create or replace one.

use crate::models::player::PlayerId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a logged match.
pub type GameId = Uuid;

/// Where the match was played.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Location {
    Home,
    Away,
}

/// Final result from the player's point of view.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum MatchResult {
    #[default]
    Win,
    Draw,
    Loss,
}

impl MatchResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchResult::Win => "Win",
            MatchResult::Draw => "Draw",
            MatchResult::Loss => "Loss",
        }
    }
}

impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MatchResult {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Win" => Ok(MatchResult::Win),
            "Draw" => Ok(MatchResult::Draw),
            "Loss" => Ok(MatchResult::Loss),
            other => Err(format!("unknown result {other:?}")),
        }
    }
}

/// A single logged match, owned by exactly one player.
///
/// Counting stats that are missing from a stored record read as 0.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: GameId,
    pub player_id: PlayerId,
    #[serde(deserialize_with = "crate::models::date::deserialize")]
    pub date: NaiveDate,
    pub opponent: String,
    pub location: Location,
    pub result: MatchResult,
    pub position: String,
    /// Minutes played.
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub goals: u32,
    #[serde(default)]
    pub assists: u32,
    #[serde(default)]
    pub passes: u32,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub played_full_match: bool,
}

impl Game {
    /// Apply a partial update; absent fields keep their value.
    pub fn apply(&mut self, patch: &GamePatch) {
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(opponent) = &patch.opponent {
            self.opponent = opponent.clone();
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(result) = patch.result {
            self.result = result;
        }
        if let Some(position) = &patch.position {
            self.position = position.clone();
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(goals) = patch.goals {
            self.goals = goals;
        }
        if let Some(assists) = patch.assists {
            self.assists = assists;
        }
        if let Some(passes) = patch.passes {
            self.passes = passes;
        }
        if let Some(notes) = &patch.notes {
            self.notes = notes.clone();
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(played_full_match) = patch.played_full_match {
            self.played_full_match = played_full_match;
        }
    }
}

/// Every user-editable field of a match, already validated.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameFields {
    pub date: NaiveDate,
    pub opponent: String,
    pub location: Location,
    pub result: MatchResult,
    pub position: String,
    pub duration: u32,
    pub goals: u32,
    pub assists: u32,
    pub passes: u32,
    pub notes: String,
    pub completed: bool,
    pub played_full_match: bool,
}

/// A validated match ready to be stored for a player (the store assigns the id).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGame {
    pub player_id: PlayerId,
    #[serde(flatten)]
    pub fields: GameFields,
}

impl NewGame {
    pub fn into_game(self, id: GameId) -> Game {
        let f = self.fields;
        Game {
            id,
            player_id: self.player_id,
            date: f.date,
            opponent: f.opponent,
            location: f.location,
            result: f.result,
            position: f.position,
            duration: f.duration,
            goals: f.goals,
            assists: f.assists,
            passes: f.passes,
            notes: f.notes,
            completed: f.completed,
            played_full_match: f.played_full_match,
        }
    }
}

/// Partial update of a match. Absent fields are not serialized.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opponent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<MatchResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assists: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub played_full_match: Option<bool>,
}

/// A full replace: every editable field is carried.
impl From<GameFields> for GamePatch {
    fn from(f: GameFields) -> Self {
        Self {
            date: Some(f.date),
            opponent: Some(f.opponent),
            location: Some(f.location),
            result: Some(f.result),
            position: Some(f.position),
            duration: Some(f.duration),
            goals: Some(f.goals),
            assists: Some(f.assists),
            passes: Some(f.passes),
            notes: Some(f.notes),
            completed: Some(f.completed),
            played_full_match: Some(f.played_full_match),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Match form input, before validation.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDraft {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub opponent: String,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub result: MatchResult,
    #[serde(default)]
    pub position: String,
    /// Numeric entries are signed so a negative one can be reported per field instead of
    /// failing to parse.
    #[serde(default)]
    pub duration: i64,
    #[serde(default)]
    pub goals: i64,
    #[serde(default)]
    pub assists: i64,
    #[serde(default)]
    pub passes: i64,
    #[serde(default)]
    pub notes: String,
    #[serde(default = "default_true")]
    pub completed: bool,
    #[serde(default = "default_true")]
    pub played_full_match: bool,
}

impl Default for GameDraft {
    fn default() -> Self {
        Self {
            date: String::new(),
            opponent: String::new(),
            location: None,
            result: MatchResult::Win,
            position: String::new(),
            duration: 0,
            goals: 0,
            assists: 0,
            passes: 0,
            notes: String::new(),
            completed: true,
            played_full_match: true,
        }
    }
}
