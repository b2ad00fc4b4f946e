//! Match log business logic: aggregation, objectives, comments, charts, sessions.

mod aggregation;
mod cache;
mod charts;
mod comments;
mod export;
mod games;
mod objectives;
mod session;
mod validation;

pub use aggregation::{
    average_rating, match_history, match_rating, player_rank, recent_matches, round_one_decimal,
    win_rate, PlayerRank, PlayerSummary, RECENT_MATCHES_LIMIT,
};
pub use cache::{PlayerSnapshot, SummaryCache};
pub use charts::{
    contribution_series, passing_trend, result_distribution, short_opponent_label,
    ContributionRow, PassingPoint, ResultShare, StatisticsView,
};
pub use comments::{sort_newest_first, CommentThread};
pub use export::export_games_csv;
pub use games::{delete_game, load_game, log_game, replace_game};
pub use objectives::{
    active_objectives_preview, propose_progress, propose_toggle, ObjectiveBoard, ObjectiveEvent,
    ObjectiveView, ProposedTransition,
};
pub use session::Session;
pub use validation::{validate_comment, validate_game, validate_objective, validate_profile};
