//! Data structures for the match log: players, matches, objectives, comments, errors.

mod comment;
pub mod date;
mod error;
mod game;
mod objective;
mod player;

pub use comment::{Comment, CommentDraft, CommentId, NewComment};
pub use date::parse_calendar_date;
pub use error::{MatchLogError, RecordKind, StoreError, ValidationErrors};
pub use game::{
    Game, GameDraft, GameFields, GameId, GamePatch, Location, MatchResult, NewGame,
};
pub use objective::{
    NewObjective, Objective, ObjectiveDraft, ObjectiveId, ObjectivePatch, ObjectiveState,
};
pub use player::{NewPlayer, Player, PlayerId, ProfileDraft};
