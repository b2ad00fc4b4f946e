//! Objective lifecycle: progress increments with auto-complete / auto-reopen, manual toggle, delete.
//!
//! Transitions run in two phases. `propose_progress` / `propose_toggle` are pure and describe
//! the patch to send and the expected next state. [`ObjectiveBoard`] sends the patch and only
//! applies the record the store returns, so a rejected call leaves the board at its last
//! committed state.

use crate::logic::validation::validate_objective;
use crate::models::{
    MatchLogError, Objective, ObjectiveDraft, ObjectiveId, ObjectivePatch, ObjectiveState,
    PlayerId, RecordKind, ValidationErrors,
};
use crate::store::RecordStore;
use chrono::NaiveDate;
use log::{info, warn};
use serde::Serialize;

/// Notification-worthy outcome of a transition.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveEvent {
    /// Progress reached the target of an active objective.
    TargetReached,
    /// Progress fell below the target of a completed objective.
    Reopened,
    /// Manually marked complete.
    MarkedComplete,
    /// Manually marked active again.
    MarkedActive,
}

impl ObjectiveEvent {
    pub fn message(&self) -> &'static str {
        match self {
            ObjectiveEvent::TargetReached => "Target reached! Goal completed.",
            ObjectiveEvent::Reopened => "Below target again, goal reopened",
            ObjectiveEvent::MarkedComplete => "Goal completed!",
            ObjectiveEvent::MarkedActive => "Goal active",
        }
    }
}

/// A transition that has been computed but not yet committed to the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProposedTransition {
    pub objective_id: ObjectiveId,
    /// Only the fields that change.
    pub patch: ObjectivePatch,
    pub next: Objective,
    pub event: Option<ObjectiveEvent>,
}

/// Apply a signed progress delta.
///
/// Fails with a validation error (and changes nothing) when the new value would be negative.
pub fn propose_progress(
    objective: &Objective,
    delta: i64,
) -> Result<ProposedTransition, MatchLogError> {
    let too_large = || ValidationErrors::single("currentValue", "Progress is too large");
    let raw = i64::from(objective.current_value)
        .checked_add(delta)
        .ok_or_else(too_large)?;
    if raw < 0 {
        return Err(ValidationErrors::single("currentValue", "Progress cannot go below zero").into());
    }
    let new_value = u32::try_from(raw).map_err(|_| too_large())?;

    let mut next = objective.clone();
    next.current_value = new_value;
    let mut event = None;
    if new_value >= objective.target_value && !objective.completed {
        next.completed = true;
        event = Some(ObjectiveEvent::TargetReached);
    } else if new_value < objective.target_value && objective.completed {
        next.completed = false;
        event = Some(ObjectiveEvent::Reopened);
    }

    let patch = ObjectivePatch {
        current_value: Some(new_value),
        completed: (next.completed != objective.completed).then_some(next.completed),
    };
    Ok(ProposedTransition {
        objective_id: objective.id,
        patch,
        next,
        event,
    })
}

/// Flip `completed` regardless of progress; the value is untouched.
pub fn propose_toggle(objective: &Objective) -> ProposedTransition {
    let completed = !objective.completed;
    let mut next = objective.clone();
    next.completed = completed;
    ProposedTransition {
        objective_id: objective.id,
        patch: ObjectivePatch {
            current_value: None,
            completed: Some(completed),
        },
        next,
        event: Some(if completed {
            ObjectiveEvent::MarkedComplete
        } else {
            ObjectiveEvent::MarkedActive
        }),
    }
}

/// An objective with its presentation pair.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectiveView {
    #[serde(flatten)]
    pub objective: Objective,
    pub state: ObjectiveState,
    pub progress_percent: f64,
}

impl From<&Objective> for ObjectiveView {
    fn from(objective: &Objective) -> Self {
        Self {
            objective: objective.clone(),
            state: objective.state(),
            progress_percent: objective.progress_percent(),
        }
    }
}

/// First `limit` active objectives, as previewed on the dashboard.
pub fn active_objectives_preview(objectives: &[Objective], limit: usize) -> Vec<ObjectiveView> {
    objectives
        .iter()
        .filter(|o| !o.completed)
        .take(limit)
        .map(ObjectiveView::from)
        .collect()
}

/// One player's objectives as last confirmed by the store.
#[derive(Clone, Debug)]
pub struct ObjectiveBoard {
    player_id: PlayerId,
    objectives: Vec<Objective>,
}

impl ObjectiveBoard {
    pub fn new(player_id: PlayerId, objectives: Vec<Objective>) -> Self {
        Self {
            player_id,
            objectives,
        }
    }

    pub async fn load<S>(store: &S, player_id: PlayerId) -> Result<Self, MatchLogError>
    where
        S: RecordStore + ?Sized,
    {
        let objectives = store.list_objectives(player_id).await?;
        Ok(Self::new(player_id, objectives))
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    pub fn get(&self, id: ObjectiveId) -> Option<&Objective> {
        self.objectives.iter().find(|o| o.id == id)
    }

    pub fn active(&self) -> impl Iterator<Item = &Objective> {
        self.objectives.iter().filter(|o| !o.completed)
    }

    pub fn completed(&self) -> impl Iterator<Item = &Objective> {
        self.objectives.iter().filter(|o| o.completed)
    }

    pub fn views(&self) -> Vec<ObjectiveView> {
        self.objectives.iter().map(ObjectiveView::from).collect()
    }

    /// Validate and store a new objective, appending it once the store confirms.
    pub async fn create<S>(
        &mut self,
        store: &S,
        draft: &ObjectiveDraft,
        today: NaiveDate,
    ) -> Result<&Objective, MatchLogError>
    where
        S: RecordStore + ?Sized,
    {
        let new = validate_objective(draft, self.player_id, today).map_err(|e| {
            warn!("Rejected objective form: {}", e);
            e
        })?;
        let saved = store.create_objective(new).await.map_err(|e| {
            warn!("Failed to create objective: {}", e);
            e
        })?;
        info!("Created objective {} for player {}", saved.id, self.player_id);
        self.objectives.push(saved);
        Ok(&self.objectives[self.objectives.len() - 1])
    }

    /// Apply a signed progress delta; returns the event the transition raised, if any.
    pub async fn adjust_progress<S>(
        &mut self,
        store: &S,
        id: ObjectiveId,
        delta: i64,
    ) -> Result<Option<ObjectiveEvent>, MatchLogError>
    where
        S: RecordStore + ?Sized,
    {
        let proposal = propose_progress(self.require(id)?, delta)?;
        self.commit(store, proposal).await
    }

    /// Manually flip completion. A toggle always raises an event.
    pub async fn toggle_completed<S>(
        &mut self,
        store: &S,
        id: ObjectiveId,
    ) -> Result<Option<ObjectiveEvent>, MatchLogError>
    where
        S: RecordStore + ?Sized,
    {
        let proposal = propose_toggle(self.require(id)?);
        self.commit(store, proposal).await
    }

    /// Delete an objective. Nothing else is affected.
    pub async fn delete<S>(&mut self, store: &S, id: ObjectiveId) -> Result<(), MatchLogError>
    where
        S: RecordStore + ?Sized,
    {
        self.require(id)?;
        store.delete_objective(id).await.map_err(|e| {
            warn!("Failed to delete objective {}: {}", id, e);
            e
        })?;
        self.objectives.retain(|o| o.id != id);
        info!("Deleted objective {}", id);
        Ok(())
    }

    fn require(&self, id: ObjectiveId) -> Result<&Objective, MatchLogError> {
        self.get(id).ok_or(MatchLogError::NotFound {
            kind: RecordKind::Objective,
            id,
        })
    }

    /// Send the patch; replace the local copy with the store's record only on success.
    async fn commit<S>(
        &mut self,
        store: &S,
        proposal: ProposedTransition,
    ) -> Result<Option<ObjectiveEvent>, MatchLogError>
    where
        S: RecordStore + ?Sized,
    {
        let confirmed = store
            .patch_objective(proposal.objective_id, proposal.patch)
            .await
            .map_err(|e| {
                warn!("Objective {} update rejected: {}", proposal.objective_id, e);
                e
            })?;
        if let Some(slot) = self.objectives.iter_mut().find(|o| o.id == confirmed.id) {
            *slot = confirmed;
        }
        if let Some(event) = proposal.event {
            info!("Objective {}: {}", proposal.objective_id, event.message());
        }
        Ok(proposal.event)
    }
}
