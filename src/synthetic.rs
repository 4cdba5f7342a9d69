use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::Value;

use crate::raw::RawRow;
use crate::schema::Circuit;

const SURFACES: [&str; 3] = ["Hard", "Clay", "Grass"];
const ROUNDS: [&str; 4] = ["1st Round", "2nd Round", "Quarterfinals", "The Final"];
// Includes a legacy label so the series rename path gets exercised.
const ATP_SERIES: [&str; 4] = ["ATP250", "Masters 1000", "Grand Slam", "International Gold"];
const WTA_SERIES: [&str; 3] = ["WTA250", "WTA500", "Grand Slam"];

/// Deterministic raw history for tests and benches. Rows come out with
/// non-decreasing dates and deliberately include the dirt the cleaner has
/// to cope with: walkovers and retirements, padded names, "NR" ranks,
/// below-floor odds, missing cells and exact duplicates.
pub fn synthetic_history(
    circuit: Circuit,
    n_matches: usize,
    n_players: usize,
    seed: u64,
) -> Vec<Value> {
    let mut rng = StdRng::seed_from_u64(seed);
    let n_players = n_players.max(2);
    let mut date = NaiveDate::from_ymd_opt(2020, 1, 6).unwrap_or_default();

    let mut rows: Vec<Value> = Vec::with_capacity(n_matches);
    while rows.len() < n_matches {
        if rng.gen_bool(0.4) {
            date = date + Duration::days(1);
        }

        let winner_idx = rng.gen_range(0..n_players);
        let mut loser_idx = rng.gen_range(0..n_players);
        while loser_idx == winner_idx {
            loser_idx = rng.gen_range(0..n_players);
        }

        let roll: u32 = rng.gen_range(0..100);
        let comment = if roll < 3 {
            "Retired"
        } else if roll < 5 {
            "Walkover"
        } else {
            "Completed"
        };

        let best_of: u32 = if circuit == Circuit::Atp && rng.gen_bool(0.15) {
            5
        } else {
            3
        };

        let mut row = RawRow::new();
        row.insert("Comment".into(), Value::from(comment));
        row.insert("Best of".into(), Value::from(best_of));
        row.insert(
            "Date".into(),
            Value::from(date.format("%Y-%m-%d").to_string()),
        );
        row.insert(
            "Winner".into(),
            Value::from(dirty_name(&mut rng, winner_idx)),
        );
        row.insert("Loser".into(), Value::from(dirty_name(&mut rng, loser_idx)));
        row.insert(
            "Tournament".into(),
            Value::from(format!("Open {}", rng.gen_range(1..20))),
        );
        row.insert("Surface".into(), Value::from(pick(&mut rng, &SURFACES)));
        row.insert("Round".into(), Value::from(pick(&mut rng, &ROUNDS)));
        let series = match circuit {
            Circuit::Atp => pick(&mut rng, &ATP_SERIES),
            Circuit::Wta => pick(&mut rng, &WTA_SERIES),
        };
        row.insert("Series".into(), Value::from(series));

        // Winner takes the deciding set last; the loser's sets come first.
        let sets_to_win = best_of.div_ceil(2);
        let loser_sets = rng.gen_range(0..sets_to_win);
        for set in 0..(sets_to_win + loser_sets) {
            let (w, l) = if set < loser_sets {
                (rng.gen_range(0..=4), 6)
            } else {
                (6, rng.gen_range(0..=4))
            };
            row.insert(format!("W{}", set + 1), Value::from(w));
            row.insert(format!("L{}", set + 1), Value::from(l));
        }
        row.insert("Wsets".into(), Value::from(sets_to_win));
        row.insert("Lsets".into(), Value::from(loser_sets));

        if rng.gen_bool(0.95) {
            let favorite = 1.0 + rng.gen_range(0.05..1.5);
            let outsider = favorite + rng.gen_range(0.0..3.0);
            let (winner_odds, loser_odds) = if rng.gen_bool(0.65) {
                (favorite, outsider)
            } else {
                (outsider, favorite)
            };
            // A sprinkle of physically invalid quotes for the odds floor.
            let winner_odds = if rng.gen_bool(0.02) { 0.5 } else { winner_odds };
            row.insert("B365W".into(), Value::from(round2(winner_odds)));
            row.insert("B365L".into(), Value::from(round2(loser_odds)));
        }

        row.insert("WRank".into(), rank_cell(&mut rng));
        row.insert("LRank".into(), rank_cell(&mut rng));

        let row = Value::Object(row);
        rows.push(row.clone());
        if rng.gen_bool(0.02) && rows.len() < n_matches {
            rows.push(row);
        }
    }

    rows
}

fn dirty_name(rng: &mut StdRng, idx: usize) -> String {
    let name = format!("Player {idx}.");
    if rng.gen_bool(0.1) {
        format!(" {name} ")
    } else {
        name
    }
}

fn pick(rng: &mut StdRng, options: &[&'static str]) -> &'static str {
    options[rng.gen_range(0..options.len())]
}

fn rank_cell(rng: &mut StdRng) -> Value {
    if rng.gen_bool(0.03) {
        Value::from("NR")
    } else {
        Value::from(rng.gen_range(1..=300))
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
