use chrono::NaiveDate;

use tennis_edge::cleaning::{MAX_SET_SLOTS, MatchRecord};
use tennis_edge::player_stats::player_summary;

struct Setup {
    date: &'static str,
    winner: &'static str,
    loser: &'static str,
    surface: &'static str,
    odds: (f64, f64),
    first_set: (f64, f64),
}

fn record(s: &Setup) -> MatchRecord {
    let mut winner_games = [None; MAX_SET_SLOTS];
    let mut loser_games = [None; MAX_SET_SLOTS];
    winner_games[0] = Some(s.first_set.0);
    loser_games[0] = Some(s.first_set.1);
    MatchRecord {
        date: NaiveDate::parse_from_str(s.date, "%Y-%m-%d").unwrap(),
        winner: s.winner.to_string(),
        loser: s.loser.to_string(),
        tournament: None,
        surface: Some(s.surface.to_string()),
        series: None,
        round: None,
        best_of: Some(3),
        winner_games,
        loser_games,
        winner_sets: Some(2.0),
        loser_sets: Some(1.0),
        winner_odds: Some(s.odds.0),
        loser_odds: Some(s.odds.1),
        winner_rank: None,
        loser_rank: None,
    }
}

fn history() -> Vec<MatchRecord> {
    [
        // Nadal wins as favorite on clay, after dropping the first set
        Setup {
            date: "2023-01-09",
            winner: "Nadal",
            loser: "Djokovic",
            surface: "Clay",
            odds: (1.4, 2.8),
            first_set: (4.0, 6.0),
        },
        // Nadal wins as outsider on hard
        Setup {
            date: "2023-01-12",
            winner: "Nadal",
            loser: "Djokovic",
            surface: "Hard",
            odds: (2.5, 1.5),
            first_set: (6.0, 3.0),
        },
        // Nadal loses as favorite on hard
        Setup {
            date: "2023-01-15",
            winner: "Djokovic",
            loser: "Nadal",
            surface: "Hard",
            odds: (2.2, 1.6),
            first_set: (6.0, 4.0),
        },
        // unrelated match
        Setup {
            date: "2023-01-18",
            winner: "Alcaraz",
            loser: "Sinner",
            surface: "Grass",
            odds: (1.8, 1.9),
            first_set: (7.0, 5.0),
        },
    ]
    .iter()
    .map(record)
    .collect()
}

#[test]
fn summary_counts_wins_and_surfaces() {
    let records = history();
    let summary = player_summary(&records, "Nadal").unwrap();

    assert_eq!(summary.matches, 3);
    assert_eq!(summary.wins, 2);
    assert!((summary.win_rate - 2.0 / 3.0).abs() < 1e-9);

    assert_eq!(summary.win_rate_by_surface.get("Clay"), Some(&1.0));
    assert_eq!(summary.win_rate_by_surface.get("Hard"), Some(&0.5));
    assert_eq!(summary.win_rate_by_surface.get("Grass"), None);
}

#[test]
fn favorite_and_outsider_rates_use_own_odds() {
    let records = history();
    let summary = player_summary(&records, "Nadal").unwrap();

    // favorite twice (won once), outsider once (won)
    assert_eq!(summary.win_rate_as_favorite, Some(0.5));
    assert_eq!(summary.win_rate_as_outsider, Some(1.0));
}

#[test]
fn comeback_rate_counts_wins_after_losing_the_first_set() {
    let records = history();
    let summary = player_summary(&records, "Nadal").unwrap();
    assert_eq!(summary.comeback_win_rate, Some(0.5));
}

#[test]
fn unknown_player_yields_none() {
    let records = history();
    assert!(player_summary(&records, "Federer").is_none());
}

#[test]
fn loser_only_player_still_gets_a_summary() {
    let records = history();
    let summary = player_summary(&records, "Sinner").unwrap();
    assert_eq!(summary.matches, 1);
    assert_eq!(summary.wins, 0);
    assert_eq!(summary.win_rate, 0.0);
    assert_eq!(summary.comeback_win_rate, None);
}
