//! CSV export of a player's match history.

use crate::logic::aggregation::{match_history, match_rating};
use crate::models::{Game, Location, MatchLogError, MatchResult};
use serde::Serialize;

const HEADER: [&str; 12] = [
    "date", "opponent", "location", "result", "position", "duration", "goals", "assists",
    "passes", "rating", "fullMatch", "notes",
];

#[derive(Serialize)]
struct CsvRow<'a> {
    date: String,
    opponent: &'a str,
    location: Location,
    result: MatchResult,
    position: &'a str,
    duration: u32,
    goals: u32,
    assists: u32,
    passes: u32,
    rating: f64,
    full_match: bool,
    notes: &'a str,
}

impl<'a> From<&'a Game> for CsvRow<'a> {
    fn from(g: &'a Game) -> Self {
        Self {
            date: g.date.format("%Y-%m-%d").to_string(),
            opponent: &g.opponent,
            location: g.location,
            result: g.result,
            position: &g.position,
            duration: g.duration,
            goals: g.goals,
            assists: g.assists,
            passes: g.passes,
            rating: match_rating(g),
            full_match: g.played_full_match,
            notes: &g.notes,
        }
    }
}

/// Match history as CSV, newest first, with a header row even when empty.
pub fn export_games_csv(games: &[Game]) -> Result<String, MatchLogError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer
        .write_record(HEADER)
        .map_err(|e| MatchLogError::Export(e.to_string()))?;
    for game in match_history(games, None) {
        writer
            .serialize(CsvRow::from(game))
            .map_err(|e| MatchLogError::Export(e.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| MatchLogError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| MatchLogError::Export(e.to_string()))
}
