use rayon::prelude::*;
use serde::Serialize;

use crate::cleaning::MatchRecord;

/// Row-wise derived columns: odds/rank aggregates plus outcome targets.
/// Aggregates stay `None` when an operand is missing; the favorite flags
/// read as false in that case.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchFeatures {
    pub sum_odd: Option<f64>,
    pub gap_odd: Option<f64>,
    pub product_odd: Option<f64>,
    pub sum_rank: Option<f64>,
    pub gap_rank: Option<f64>,
    pub total_games: f64,
    pub total_sets: f64,
    pub both_score: bool,
    pub fav_odd_win: bool,
    pub fav_rank_win: bool,
}

pub fn derive(record: &MatchRecord) -> MatchFeatures {
    let odds = record.winner_odds.zip(record.loser_odds);
    let ranks = record.winner_rank.zip(record.loser_rank);

    // Unplayed set slots count as zero games, not as missing.
    let total_games: f64 = record
        .winner_games
        .iter()
        .chain(record.loser_games.iter())
        .map(|games| games.unwrap_or(0.0))
        .sum();
    let total_sets = record.winner_sets.unwrap_or(0.0) + record.loser_sets.unwrap_or(0.0);

    MatchFeatures {
        sum_odd: odds.map(|(w, l)| w + l),
        gap_odd: odds.map(|(w, l)| (w - l).abs()),
        product_odd: odds.map(|(w, l)| w * l),
        sum_rank: ranks.map(|(w, l)| w + l),
        gap_rank: ranks.map(|(w, l)| (w - l).abs()),
        total_games,
        total_sets,
        both_score: record.loser_sets.is_some_and(|sets| sets > 0.0),
        fav_odd_win: odds.is_some_and(|(w, l)| w < l),
        fav_rank_win: ranks.is_some_and(|(w, l)| w < l),
    }
}

/// Order-preserving parallel pass; one output element per input record.
pub fn derive_all(records: &[MatchRecord]) -> Vec<MatchFeatures> {
    records.par_iter().map(derive).collect()
}
