//! Per-player derived metrics: match rating, totals, win rate, rank, recent matches.
//!
//! Everything here is a pure read-only transform of a player's games and is safe to
//! recompute on every request.

use crate::models::{Game, MatchResult};
use serde::{Deserialize, Serialize};

/// Maximum number of entries in the recent matches view.
pub const RECENT_MATCHES_LIMIT: usize = 5;

const BASE_RATING: f64 = 6.0;
const GOAL_WEIGHT: f64 = 0.5;
const ASSIST_WEIGHT: f64 = 0.3;
const RESULT_SWING: f64 = 0.5;
const MIN_RATING: f64 = 1.0;
const MAX_RATING: f64 = 10.0;

/// Coarse tier derived from cumulative goals.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum PlayerRank {
    Rookie,
    Starter,
    Star,
    Legend,
}

impl PlayerRank {
    pub fn label(&self) -> &'static str {
        match self {
            PlayerRank::Rookie => "Rookie",
            PlayerRank::Starter => "Starter",
            PlayerRank::Star => "Star",
            PlayerRank::Legend => "Legend",
        }
    }
}

impl std::fmt::Display for PlayerRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Round half away from zero to one decimal place.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Single-game score: 6.0 + 0.5 per goal + 0.3 per assist, +0.5 for a win, -0.5 for a loss,
/// clamped to [1.0, 10.0] and rounded to one decimal.
pub fn match_rating(game: &Game) -> f64 {
    let mut rating =
        BASE_RATING + f64::from(game.goals) * GOAL_WEIGHT + f64::from(game.assists) * ASSIST_WEIGHT;
    match game.result {
        MatchResult::Win => rating += RESULT_SWING,
        MatchResult::Loss => rating -= RESULT_SWING,
        MatchResult::Draw => {}
    }
    round_one_decimal(rating.clamp(MIN_RATING, MAX_RATING))
}

/// Mean of the per-game ratings, rounded to one decimal. `None` when there are no games.
pub fn average_rating(games: &[Game]) -> Option<f64> {
    if games.is_empty() {
        return None;
    }
    let sum: f64 = games.iter().map(match_rating).sum();
    Some(round_one_decimal(sum / games.len() as f64))
}

/// Rank tier for a goal tally; thresholds are inclusive lower bounds, highest first.
pub fn player_rank(total_goals: u32) -> PlayerRank {
    match total_goals {
        g if g >= 20 => PlayerRank::Legend,
        g if g >= 10 => PlayerRank::Star,
        g if g >= 5 => PlayerRank::Starter,
        _ => PlayerRank::Rookie,
    }
}

/// Wins as a percentage of games played; 0 when nothing was played.
pub fn win_rate(wins: usize, total_games: usize) -> f64 {
    if total_games == 0 {
        return 0.0;
    }
    wins as f64 / total_games as f64 * 100.0
}

/// Summary figures for one player's season.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummary {
    pub total_games: usize,
    pub total_goals: u32,
    pub total_assists: u32,
    pub total_minutes: u32,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    /// Percentage in [0, 100].
    pub win_rate: f64,
    /// `None` is shown as "N/A".
    pub average_rating: Option<f64>,
    pub goals_per_game: f64,
    pub rank: PlayerRank,
}

impl PlayerSummary {
    pub fn from_games(games: &[Game]) -> Self {
        let total_games = games.len();
        let total = |stat: fn(&Game) -> u32| {
            games.iter().map(stat).fold(0u32, u32::saturating_add)
        };
        let total_goals = total(|g| g.goals);
        let total_assists = total(|g| g.assists);
        let total_minutes = total(|g| g.duration);
        let count = |result: MatchResult| games.iter().filter(|g| g.result == result).count();
        let wins = count(MatchResult::Win);

        Self {
            total_games,
            total_goals,
            total_assists,
            total_minutes,
            wins,
            draws: count(MatchResult::Draw),
            losses: count(MatchResult::Loss),
            win_rate: win_rate(wins, total_games),
            average_rating: average_rating(games),
            goals_per_game: round_one_decimal(f64::from(total_goals) / total_games.max(1) as f64),
            rank: player_rank(total_goals),
        }
    }

    /// Win rate rounded to a whole percent, as shown on the dashboard.
    pub fn win_rate_rounded(&self) -> u32 {
        self.win_rate.round() as u32
    }
}

/// Most recent matches first, at most [`RECENT_MATCHES_LIMIT`]. Same-day matches keep their order.
pub fn recent_matches(games: &[Game]) -> Vec<&Game> {
    let mut recent = newest_first(games.iter());
    recent.truncate(RECENT_MATCHES_LIMIT);
    recent
}

/// Full match history, newest first, optionally limited to one result.
pub fn match_history(games: &[Game], filter: Option<MatchResult>) -> Vec<&Game> {
    newest_first(
        games
            .iter()
            .filter(|g| filter.map_or(true, |result| g.result == result)),
    )
}

/// Stable sort by calendar date, descending.
fn newest_first<'a>(games: impl Iterator<Item = &'a Game>) -> Vec<&'a Game> {
    let mut sorted: Vec<&Game> = games.collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}
