use std::collections::HashMap;

use anyhow::{Result, bail};
use serde::Serialize;

use crate::cleaning::MatchRecord;

#[derive(Debug, Clone, Copy)]
pub struct EloConfig {
    pub k: f64,
    pub initial_rating: f64,
}

impl Default for EloConfig {
    fn default() -> Self {
        Self {
            k: 32.0,
            initial_rating: 1500.0,
        }
    }
}

/// Both players' ratings as they stood before the match updated them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchRatings {
    pub winner: f64,
    pub loser: f64,
}

/// Current rating per player identity. Players are rated lazily on first
/// appearance; entries are never removed. One scan owns the book exclusively.
#[derive(Debug, Clone)]
pub struct RatingBook {
    cfg: EloConfig,
    ratings: HashMap<String, f64>,
}

impl RatingBook {
    pub fn new(cfg: EloConfig) -> Self {
        Self {
            cfg,
            ratings: HashMap::new(),
        }
    }

    pub fn rating(&self, player: &str) -> f64 {
        self.ratings
            .get(player)
            .copied()
            .unwrap_or(self.cfg.initial_rating)
    }

    /// Number of players seen so far.
    pub fn players(&self) -> usize {
        self.ratings.len()
    }

    /// Ratings sorted best-first; ties break on name for stable output.
    pub fn standings(&self) -> Vec<(&str, f64)> {
        let mut rows: Vec<(&str, f64)> = self
            .ratings
            .iter()
            .map(|(name, rating)| (name.as_str(), *rating))
            .collect();
        rows.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });
        rows
    }

    /// Applies one result and returns both pre-update ratings. The winner
    /// gains and the loser loses the same amount; no clamping is applied.
    pub fn record_match(&mut self, winner: &str, loser: &str) -> MatchRatings {
        let r_winner = self.rating(winner);
        let r_loser = self.rating(loser);

        let expected = expected_score(r_winner, r_loser);
        let delta = self.cfg.k * (1.0 - expected);
        self.ratings.insert(winner.to_string(), r_winner + delta);
        self.ratings.insert(loser.to_string(), r_loser - delta);

        MatchRatings {
            winner: r_winner,
            loser: r_loser,
        }
    }
}

fn expected_score(r_winner: f64, r_loser: f64) -> f64 {
    1.0 / (1.0 + 10.0_f64.powf((r_loser - r_winner) / 400.0))
}

/// Sequential rating pass over a chronologically sorted history: each match
/// sees the ratings as updated by every earlier match, so this scan cannot
/// be reordered or parallelized. Returns one pre-update snapshot per record.
///
/// Fails fast on out-of-order dates and on a player listed against itself
/// rather than producing silently wrong ratings.
pub fn rate_history_with(
    records: &[MatchRecord],
    book: &mut RatingBook,
) -> Result<Vec<MatchRatings>> {
    let mut out = Vec::with_capacity(records.len());
    let mut prev_date = None;

    for (idx, record) in records.iter().enumerate() {
        if let Some(prev) = prev_date
            && record.date < prev
        {
            bail!(
                "match history not sorted by date: row {idx} ({}) follows {prev}",
                record.date
            );
        }
        prev_date = Some(record.date);

        if record.winner == record.loser {
            bail!(
                "row {idx}: winner and loser are the same player {:?}",
                record.winner
            );
        }

        out.push(book.record_match(&record.winner, &record.loser));
    }

    Ok(out)
}

pub fn rate_history(records: &[MatchRecord], cfg: EloConfig) -> Result<Vec<MatchRatings>> {
    let mut book = RatingBook::new(cfg);
    rate_history_with(records, &mut book)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_score_is_half_at_equal_ratings() {
        assert!((expected_score(1500.0, 1500.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn rating_deltas_are_exact_negatives() {
        let mut book = RatingBook::new(EloConfig {
            k: 24.0,
            initial_rating: 1500.0,
        });
        book.ratings.insert("A".to_string(), 1712.4);
        book.ratings.insert("B".to_string(), 1388.9);

        let pre = book.record_match("A", "B");
        let gain = book.rating("A") - pre.winner;
        let loss = book.rating("B") - pre.loser;
        assert!((gain + loss).abs() < 1e-12);
        assert!(gain > 0.0);
    }

    #[test]
    fn uneven_matchup_follows_the_formula() {
        let mut book = RatingBook::new(EloConfig::default());
        book.ratings.insert("A".to_string(), 1600.0);
        book.ratings.insert("B".to_string(), 1400.0);

        let pre = book.record_match("A", "B");
        assert_eq!(pre.winner, 1600.0);
        assert_eq!(pre.loser, 1400.0);

        // expected = 1 / (1 + 10^-0.5) ~= 0.7597
        assert!((book.rating("A") - 1607.69).abs() < 0.01);
        assert!((book.rating("B") - 1392.31).abs() < 0.01);
    }

    #[test]
    fn first_appearance_uses_initial_rating_for_both_roles() {
        let mut book = RatingBook::new(EloConfig::default());
        let pre = book.record_match("newcomer w", "newcomer l");
        assert_eq!(pre.winner, 1500.0);
        assert_eq!(pre.loser, 1500.0);
        assert_eq!(book.players(), 2);
    }
}
