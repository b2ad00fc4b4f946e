//! Chart series: result distribution, contribution bars, passing trend.

mod common;

use common::game;
use match_log_web::logic::{
    contribution_series, passing_trend, short_opponent_label, ResultShare,
};
use match_log_web::{result_distribution, MatchResult, StatisticsView};

#[test]
fn distribution_omits_empty_categories() {
    let games = vec![
        game("A", "2024-03-01", MatchResult::Win, 0, 0),
        game("B", "2024-03-02", MatchResult::Loss, 0, 0),
        game("C", "2024-03-03", MatchResult::Win, 0, 0),
    ];
    assert_eq!(
        result_distribution(&games),
        vec![
            ResultShare { name: "Wins", value: 2 },
            ResultShare { name: "Losses", value: 1 },
        ]
    );
    assert!(result_distribution(&[]).is_empty());
}

#[test]
fn distribution_keeps_wins_draws_losses_order() {
    let games = vec![
        game("A", "2024-03-01", MatchResult::Loss, 0, 0),
        game("B", "2024-03-02", MatchResult::Draw, 0, 0),
        game("C", "2024-03-03", MatchResult::Win, 0, 0),
    ];
    let names: Vec<&str> = result_distribution(&games).iter().map(|s| s.name).collect();
    assert_eq!(names, ["Wins", "Draws", "Losses"]);
}

#[test]
fn opponent_labels_are_short_and_upper_case() {
    assert_eq!(short_opponent_label("Red Lions"), "RED");
    assert_eq!(short_opponent_label("fc"), "FC");
    assert_eq!(short_opponent_label("Ölstadt"), "ÖLS");
    assert_eq!(short_opponent_label(""), "");
}

#[test]
fn series_follow_collection_order() {
    let mut late = game("Zebras", "2024-05-01", MatchResult::Win, 2, 1);
    late.passes = 31;
    let mut early = game("Ajax Youth", "2024-01-01", MatchResult::Draw, 0, 2);
    early.passes = 12;
    let games = vec![late, early];

    let bars = contribution_series(&games);
    assert_eq!(bars.len(), 2);
    assert_eq!(bars[0].opponent, "ZEB");
    assert_eq!(bars[0].full_opponent, "Zebras");
    assert_eq!((bars[0].goals, bars[0].assists, bars[0].passes), (2, 1, 31));
    assert_eq!(bars[1].opponent, "AJA");

    let line: Vec<(String, u32)> = passing_trend(&games)
        .into_iter()
        .map(|p| (p.opponent, p.passes))
        .collect();
    assert_eq!(line, [("ZEB".to_string(), 31), ("AJA".to_string(), 12)]);
}

#[test]
fn statistics_view_serializes_camel_case() {
    let games = vec![game("Red Lions", "2024-03-01", MatchResult::Win, 2, 1)];
    let view = StatisticsView::from_games(&games);
    assert_eq!(view.summary.total_games, 1);

    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["summary"]["totalGoals"], 2);
    assert_eq!(json["summary"]["averageRating"], 7.8);
    assert_eq!(json["results"][0]["name"], "Wins");
    assert_eq!(json["contributions"][0]["fullOpponent"], "Red Lions");
    assert_eq!(json["passing"][0]["passes"], 20);
}
