//! Season objectives ("goals" in the target sense) and their progress shapes.

use crate::models::player::PlayerId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an objective.
pub type ObjectiveId = Uuid;

/// Lifecycle state derived from the `completed` flag.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveState {
    Active,
    Completed,
}

/// A season target with a numeric progress counter.
///
/// `completed` normally tracks `current_value >= target_value`, but a completed objective may
/// sit below its target (manual toggle) until it is explicitly reopened.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Objective {
    pub id: ObjectiveId,
    pub player_id: PlayerId,
    pub title: String,
    #[serde(default)]
    pub skill_id: Option<u32>,
    pub target_value: u32,
    #[serde(default)]
    pub current_value: u32,
    #[serde(deserialize_with = "crate::models::date::deserialize")]
    pub deadline: NaiveDate,
    #[serde(default)]
    pub completed: bool,
    #[serde(deserialize_with = "crate::models::date::deserialize")]
    pub created_at: NaiveDate,
}

impl Objective {
    pub fn state(&self) -> ObjectiveState {
        if self.completed {
            ObjectiveState::Completed
        } else {
            ObjectiveState::Active
        }
    }

    /// `min(current / target * 100, 100)`; a zero target counts as fully met.
    pub fn progress_percent(&self) -> f64 {
        if self.target_value == 0 {
            return 100.0;
        }
        (f64::from(self.current_value) / f64::from(self.target_value) * 100.0).min(100.0)
    }

    /// Apply a partial update; absent fields keep their value.
    pub fn apply(&mut self, patch: &ObjectivePatch) {
        if let Some(current_value) = patch.current_value {
            self.current_value = current_value;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }
}

/// A validated objective ready to be stored (the store assigns the id).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewObjective {
    pub player_id: PlayerId,
    pub title: String,
    pub skill_id: Option<u32>,
    pub target_value: u32,
    pub current_value: u32,
    pub deadline: NaiveDate,
    pub completed: bool,
    pub created_at: NaiveDate,
}

impl NewObjective {
    pub fn into_objective(self, id: ObjectiveId) -> Objective {
        Objective {
            id,
            player_id: self.player_id,
            title: self.title,
            skill_id: self.skill_id,
            target_value: self.target_value,
            current_value: self.current_value,
            deadline: self.deadline,
            completed: self.completed,
            created_at: self.created_at,
        }
    }
}

/// Partial update carrying only the progress fields that changed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectivePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_value: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// Objective form input.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectiveDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub skill_id: Option<u32>,
    #[serde(default)]
    pub target_value: i64,
    #[serde(default)]
    pub deadline: String,
}
