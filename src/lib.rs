//! Personal match log: library with models, record store client and derived-state logic.

pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    active_objectives_preview, average_rating, delete_game, export_games_csv, load_game, log_game,
    match_history, match_rating, player_rank, propose_progress, propose_toggle, recent_matches,
    replace_game, result_distribution, win_rate, CommentThread, ObjectiveBoard, ObjectiveEvent,
    ObjectiveView, PlayerRank, PlayerSummary, Session, StatisticsView, SummaryCache,
};
pub use models::{
    Comment, CommentDraft, Game, GameDraft, GameId, Location, MatchLogError, MatchResult,
    Objective, ObjectiveDraft, ObjectiveId, ObjectiveState, Player, PlayerId, ProfileDraft,
    RecordKind, StoreError, ValidationErrors,
};
pub use store::{InMemoryStore, RecordStore, Snapshot};
