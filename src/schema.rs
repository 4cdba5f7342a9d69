use std::collections::HashMap;
use std::str::FromStr;

use anyhow::anyhow;
use once_cell::sync::Lazy;

// Column names as they appear in the tennis-data.co.uk history files.
pub const COL_DATE: &str = "Date";
pub const COL_COMMENT: &str = "Comment";
pub const COL_BEST_OF: &str = "Best of";
pub const COL_WINNER: &str = "Winner";
pub const COL_LOSER: &str = "Loser";
pub const COL_SERIES: &str = "Series";
pub const COL_TOURNAMENT: &str = "Tournament";
pub const COL_SURFACE: &str = "Surface";
pub const COL_ROUND: &str = "Round";
pub const COL_WINNER_SETS: &str = "Wsets";
pub const COL_LOSER_SETS: &str = "Lsets";
pub const COL_WINNER_ODDS: &str = "B365W";
pub const COL_LOSER_ODDS: &str = "B365L";
pub const COL_WINNER_RANK: &str = "WRank";
pub const COL_LOSER_RANK: &str = "LRank";

pub const STATUS_COMPLETED: &str = "Completed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Circuit {
    Atp,
    Wta,
}

impl Circuit {
    /// Number of per-set score slots carried by this circuit's files.
    pub fn set_slots(self) -> usize {
        match self {
            Circuit::Atp => 5,
            Circuit::Wta => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Circuit::Atp => "ATP",
            Circuit::Wta => "WTA",
        }
    }
}

impl FromStr for Circuit {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "atp" => Ok(Circuit::Atp),
            "wta" => Ok(Circuit::Wta),
            other => Err(anyhow!("unknown circuit {other:?}: expected \"ATP\" or \"WTA\"")),
        }
    }
}

// Legacy ATP series labels mapped to the current tier names.
// See https://en.wikipedia.org/wiki/ATP_Tour
static ATP_SERIES_RENAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("International Gold", "ATP500"),
        ("Masters", "Masters 1000"),
        ("International", "ATP250"),
    ])
});

pub fn series_renames(circuit: Circuit) -> HashMap<String, String> {
    match circuit {
        Circuit::Atp => ATP_SERIES_RENAMES
            .iter()
            .map(|(old, new)| (old.to_string(), new.to_string()))
            .collect(),
        Circuit::Wta => HashMap::new(),
    }
}

/// Columns coerced to floating point by the cleaner. Matches the raw file
/// layout: per-set game counts (interleaved W/L), sets won, odds and ranks.
pub fn numeric_columns(circuit: Circuit) -> Vec<String> {
    let mut cols = Vec::new();
    for slot in 1..=circuit.set_slots() {
        cols.push(format!("W{slot}"));
        cols.push(format!("L{slot}"));
    }
    for col in [
        COL_WINNER_SETS,
        COL_LOSER_SETS,
        COL_WINNER_ODDS,
        COL_LOSER_ODDS,
        COL_WINNER_RANK,
        COL_LOSER_RANK,
    ] {
        cols.push(col.to_string());
    }
    cols
}
