use std::collections::HashMap;

use serde::Serialize;

use crate::cleaning::MatchRecord;

/// Head-to-head style summary of one player's record over cleaned history.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerSummary {
    pub player: String,
    pub matches: usize,
    pub wins: usize,
    pub win_rate: f64,
    pub win_rate_by_surface: HashMap<String, f64>,
    /// Win rate in matches where the player carried the lower odds.
    pub win_rate_as_favorite: Option<f64>,
    pub win_rate_as_outsider: Option<f64>,
    /// Share of wins where the player dropped the first set.
    pub comeback_win_rate: Option<f64>,
}

/// None when the player never appears in the history.
pub fn player_summary(records: &[MatchRecord], player: &str) -> Option<PlayerSummary> {
    let mut played = 0usize;
    let mut wins = 0usize;
    let mut by_surface: HashMap<String, (usize, usize)> = HashMap::new();
    let mut as_favorite = (0usize, 0usize);
    let mut as_outsider = (0usize, 0usize);
    let mut comeback_wins = 0usize;

    for record in records {
        let won = record.winner == player;
        if !won && record.loser != player {
            continue;
        }
        played += 1;
        if won {
            wins += 1;
        }

        if let Some(surface) = &record.surface {
            let entry = by_surface.entry(surface.clone()).or_insert((0, 0));
            entry.0 += 1;
            if won {
                entry.1 += 1;
            }
        }

        if let (Some(winner_odds), Some(loser_odds)) = (record.winner_odds, record.loser_odds) {
            let (own, opponent) = if won {
                (winner_odds, loser_odds)
            } else {
                (loser_odds, winner_odds)
            };
            if own < opponent {
                as_favorite.0 += 1;
                if won {
                    as_favorite.1 += 1;
                }
            } else if own > opponent {
                as_outsider.0 += 1;
                if won {
                    as_outsider.1 += 1;
                }
            }
        }

        if won
            && let (Some(w1), Some(l1)) = (record.winner_games[0], record.loser_games[0])
            && l1 > w1
        {
            comeback_wins += 1;
        }
    }

    if played == 0 {
        return None;
    }

    let rate = |won: usize, total: usize| {
        if total == 0 {
            None
        } else {
            Some(won as f64 / total as f64)
        }
    };

    Some(PlayerSummary {
        player: player.to_string(),
        matches: played,
        wins,
        win_rate: wins as f64 / played as f64,
        win_rate_by_surface: by_surface
            .into_iter()
            .map(|(surface, (total, won))| (surface, won as f64 / total as f64))
            .collect(),
        win_rate_as_favorite: rate(as_favorite.1, as_favorite.0),
        win_rate_as_outsider: rate(as_outsider.1, as_outsider.0),
        comeback_win_rate: rate(comeback_wins, wins),
    })
}
