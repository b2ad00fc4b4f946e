//! Field-scoped validation of form input. Every field is checked so all problems are reported at once.

use crate::models::{
    parse_calendar_date, CommentDraft, GameDraft, GameFields, GameId, NewComment, NewObjective,
    NewPlayer, ObjectiveDraft, PlayerId, ProfileDraft, ValidationErrors,
};
use chrono::{DateTime, NaiveDate, Utc};

/// Validate a match form. Text fields are trimmed.
pub fn validate_game(draft: &GameDraft) -> Result<GameFields, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let date = if draft.date.trim().is_empty() {
        errors.add("date", "Date is required");
        None
    } else {
        let parsed = parse_calendar_date(&draft.date);
        if parsed.is_none() {
            errors.add("date", "Date is not a valid calendar date");
        }
        parsed
    };
    let opponent = draft.opponent.trim();
    if opponent.is_empty() {
        errors.add("opponent", "Opponent name is required");
    }
    if draft.location.is_none() {
        errors.add("location", "Location is required");
    }
    let position = draft.position.trim();
    if position.is_empty() {
        errors.add("position", "Position is required");
    }
    let duration = match u32::try_from(draft.duration) {
        Ok(d) if d > 0 => Some(d),
        _ => {
            errors.add("duration", "Duration must be positive");
            None
        }
    };

    let goals = count_field(&mut errors, "goals", "Goals", draft.goals);
    let assists = count_field(&mut errors, "assists", "Assists", draft.assists);
    let passes = count_field(&mut errors, "passes", "Passes", draft.passes);

    match (date, draft.location, duration) {
        (Some(date), Some(location), Some(duration)) if errors.is_empty() => Ok(GameFields {
            date,
            opponent: opponent.to_string(),
            location,
            result: draft.result,
            position: position.to_string(),
            duration,
            goals,
            assists,
            passes,
            notes: draft.notes.trim().to_string(),
            completed: draft.completed,
            played_full_match: draft.played_full_match,
        }),
        _ => Err(errors),
    }
}

/// A counting stat: zero or more, within `u32`. Records an error and yields 0 otherwise.
fn count_field(errors: &mut ValidationErrors, field: &'static str, label: &str, value: i64) -> u32 {
    if value < 0 {
        errors.add(field, format!("{label} cannot be negative"));
        return 0;
    }
    u32::try_from(value).unwrap_or_else(|_| {
        errors.add(field, format!("{label} is too large"));
        0
    })
}

/// Validate an objective form; a valid one starts active with no progress.
pub fn validate_objective(
    draft: &ObjectiveDraft,
    player_id: PlayerId,
    today: NaiveDate,
) -> Result<NewObjective, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let title = draft.title.trim();
    if title.is_empty() {
        errors.add("title", "Title is required");
    }
    let target_value = match u32::try_from(draft.target_value) {
        Ok(t) if t > 0 => Some(t),
        _ => {
            errors.add("targetValue", "Target must be positive");
            None
        }
    };
    let deadline = if draft.deadline.trim().is_empty() {
        errors.add("deadline", "Deadline is required");
        None
    } else {
        let parsed = parse_calendar_date(&draft.deadline);
        if parsed.is_none() {
            errors.add("deadline", "Deadline is not a valid calendar date");
        }
        parsed
    };

    match (target_value, deadline) {
        (Some(target_value), Some(deadline)) if errors.is_empty() => Ok(NewObjective {
            player_id,
            title: title.to_string(),
            skill_id: draft.skill_id,
            target_value,
            current_value: 0,
            deadline,
            completed: false,
            created_at: today,
        }),
        _ => Err(errors),
    }
}

/// Validate a new player profile.
pub fn validate_profile(draft: &ProfileDraft, today: NaiveDate) -> Result<NewPlayer, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let name = draft.name.trim();
    if name.is_empty() {
        errors.add("name", "Name is required");
    }
    let position = draft.position.trim();
    if position.is_empty() {
        errors.add("position", "Position is required");
    }
    errors.into_result(|| NewPlayer {
        name: name.to_string(),
        position: position.to_string(),
        joined_date: today,
    })
}

/// Validate a comment: author and body must be non-empty after trimming.
pub fn validate_comment(
    draft: &CommentDraft,
    game_id: GameId,
    now: DateTime<Utc>,
) -> Result<NewComment, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let author = draft.author.trim();
    if author.is_empty() {
        errors.add("author", "Name is required");
    }
    let body = draft.body.trim();
    if body.is_empty() {
        errors.add("body", "Comment is required");
    }
    errors.into_result(|| NewComment {
        game_id,
        author: author.to_string(),
        body: body.to_string(),
        timestamp: now,
    })
}
