//! Row-oriented series for the statistics charts (results pie, contribution bars, passing line).

use crate::logic::aggregation::PlayerSummary;
use crate::models::{Game, MatchResult};
use serde::Serialize;

/// Characters kept in the short opponent label.
const SHORT_LABEL_LEN: usize = 3;

/// One slice of the results pie.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ResultShare {
    pub name: &'static str,
    pub value: usize,
}

/// One bar group: a match's contributions.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionRow {
    /// First three characters of the opponent, upper-cased.
    pub opponent: String,
    pub full_opponent: String,
    pub goals: u32,
    pub assists: u32,
    pub passes: u32,
}

/// One point of the passing trend.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PassingPoint {
    pub opponent: String,
    pub passes: u32,
}

/// Wins, Draws, Losses counts in that order. Empty categories are left out.
pub fn result_distribution(games: &[Game]) -> Vec<ResultShare> {
    [
        ("Wins", MatchResult::Win),
        ("Draws", MatchResult::Draw),
        ("Losses", MatchResult::Loss),
    ]
    .into_iter()
    .map(|(name, result)| ResultShare {
        name,
        value: games.iter().filter(|g| g.result == result).count(),
    })
    .filter(|share| share.value > 0)
    .collect()
}

pub fn short_opponent_label(opponent: &str) -> String {
    opponent
        .chars()
        .take(SHORT_LABEL_LEN)
        .collect::<String>()
        .to_uppercase()
}

/// One row per match, in collection order (no re-sort).
pub fn contribution_series(games: &[Game]) -> Vec<ContributionRow> {
    games
        .iter()
        .map(|g| ContributionRow {
            opponent: short_opponent_label(&g.opponent),
            full_opponent: g.opponent.clone(),
            goals: g.goals,
            assists: g.assists,
            passes: g.passes,
        })
        .collect()
}

/// Passes per match, in collection order rather than by date.
pub fn passing_trend(games: &[Game]) -> Vec<PassingPoint> {
    games
        .iter()
        .map(|g| PassingPoint {
            opponent: short_opponent_label(&g.opponent),
            passes: g.passes,
        })
        .collect()
}

/// Everything the statistics page shows.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StatisticsView {
    pub summary: PlayerSummary,
    pub results: Vec<ResultShare>,
    pub contributions: Vec<ContributionRow>,
    pub passing: Vec<PassingPoint>,
}

impl StatisticsView {
    pub fn from_games(games: &[Game]) -> Self {
        Self::with_summary(PlayerSummary::from_games(games), games)
    }

    /// Build the series around an already computed summary.
    pub fn with_summary(summary: PlayerSummary, games: &[Game]) -> Self {
        Self {
            summary,
            results: result_distribution(games),
            contributions: contribution_series(games),
            passing: passing_trend(games),
        }
    }
}
