use std::collections::{HashMap, HashSet};

use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use crate::raw::{self, RawRow};
use crate::schema::{self, Circuit};

pub const MAX_SET_SLOTS: usize = 5;

/// Which "Best of" values survive cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatFilter {
    /// Keep only matches played to exactly this format (e.g. best of 3).
    Exact(u32),
    /// Keep any match whose format is recorded.
    Present,
    /// No format filtering.
    Any,
}

#[derive(Debug, Clone)]
pub struct CleanConfig {
    pub circuit: Circuit,
    pub format: FormatFilter,
    pub series_renames: HashMap<String, String>,
    pub numeric_cols: Vec<String>,
    /// Drop rows carrying odds below 1.0 (physically invalid quotes).
    pub odds_floor: bool,
}

impl CleanConfig {
    pub fn for_circuit(circuit: Circuit) -> Self {
        Self {
            circuit,
            format: FormatFilter::Present,
            series_renames: schema::series_renames(circuit),
            numeric_cols: schema::numeric_columns(circuit),
            odds_floor: true,
        }
    }
}

/// One canonical row of match history. Winner/loser are assigned post-hoc
/// from the final result; set slots beyond the circuit's format stay `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRecord {
    pub date: NaiveDate,
    pub winner: String,
    pub loser: String,
    pub tournament: Option<String>,
    pub surface: Option<String>,
    pub series: Option<String>,
    pub round: Option<String>,
    pub best_of: Option<u32>,
    pub winner_games: [Option<f64>; MAX_SET_SLOTS],
    pub loser_games: [Option<f64>; MAX_SET_SLOTS],
    pub winner_sets: Option<f64>,
    pub loser_sets: Option<f64>,
    pub winner_odds: Option<f64>,
    pub loser_odds: Option<f64>,
    pub winner_rank: Option<f64>,
    pub loser_rank: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct CleanOutcome {
    pub records: Vec<MatchRecord>,
    /// Rows excluded by a filter or as exact duplicates.
    pub dropped: usize,
    /// Rows excluded because a cell failed validation; one message per row.
    pub row_errors: Vec<String>,
}

/// Filters and normalizes raw history rows into canonical records.
///
/// Rows that fail a filter are dropped silently; rows with malformed cells
/// (unparseable date, garbage in a declared-numeric column) are dropped and
/// reported in `row_errors`. Input order is preserved.
pub fn clean(rows: &[Value], cfg: &CleanConfig) -> Result<CleanOutcome> {
    let mut out = CleanOutcome::default();
    let mut seen = HashSet::new();

    for (idx, value) in rows.iter().enumerate() {
        match clean_row(value, cfg) {
            Ok(Some(record)) => {
                let key = serde_json::to_string(&record)
                    .with_context(|| format!("serialize record at row {idx}"))?;
                if seen.insert(key) {
                    out.records.push(record);
                } else {
                    out.dropped += 1;
                }
            }
            Ok(None) => out.dropped += 1,
            Err(err) => {
                out.dropped += 1;
                out.row_errors.push(format!("row {idx}: {err}"));
            }
        }
    }

    Ok(out)
}

/// Ok(None) means the row was filtered; Err means a cell failed validation.
fn clean_row(value: &Value, cfg: &CleanConfig) -> Result<Option<MatchRecord>> {
    let Some(row) = value.as_object() else {
        bail!("not a JSON object");
    };

    // Completed matches only; retirements, walkovers and unknown statuses go.
    let completed =
        raw::cell_str(row, schema::COL_COMMENT).map(str::trim) == Some(schema::STATUS_COMPLETED);
    if !completed {
        return Ok(None);
    }

    let best_of = raw::cell_f64(row, schema::COL_BEST_OF)?.map(|n| n as u32);
    let keep = match cfg.format {
        FormatFilter::Exact(n) => best_of == Some(n),
        FormatFilter::Present => best_of.is_some(),
        FormatFilter::Any => true,
    };
    if !keep {
        return Ok(None);
    }

    let winner_odds = raw::cell_f64(row, schema::COL_WINNER_ODDS)?;
    let loser_odds = raw::cell_f64(row, schema::COL_LOSER_ODDS)?;
    if cfg.odds_floor {
        let below_floor = |odds: Option<f64>| odds.is_some_and(|o| o < 1.0);
        if below_floor(winner_odds) || below_floor(loser_odds) {
            return Ok(None);
        }
    }

    let date = parse_date(
        raw::cell_str(row, schema::COL_DATE).ok_or_else(|| anyhow!("missing date"))?,
    )?;
    let winner =
        raw::cell_trimmed(row, schema::COL_WINNER).ok_or_else(|| anyhow!("missing winner name"))?;
    let loser =
        raw::cell_trimmed(row, schema::COL_LOSER).ok_or_else(|| anyhow!("missing loser name"))?;

    let series = raw::cell_trimmed(row, schema::COL_SERIES)
        .map(|s| cfg.series_renames.get(&s).cloned().unwrap_or(s));

    // Coerce every declared-numeric column up front so garbage surfaces as a
    // row error even in cells the canonical record does not carry.
    let mut nums: HashMap<&str, Option<f64>> = HashMap::with_capacity(cfg.numeric_cols.len());
    for col in &cfg.numeric_cols {
        nums.insert(col.as_str(), raw::cell_f64(row, col)?);
    }
    let num = |col: &str| nums.get(col).copied().flatten();

    let mut winner_games = [None; MAX_SET_SLOTS];
    let mut loser_games = [None; MAX_SET_SLOTS];
    for slot in 0..cfg.circuit.set_slots() {
        winner_games[slot] = num(&format!("W{}", slot + 1));
        loser_games[slot] = num(&format!("L{}", slot + 1));
    }

    Ok(Some(MatchRecord {
        date,
        winner,
        loser,
        tournament: raw::cell_trimmed(row, schema::COL_TOURNAMENT),
        surface: raw::cell_trimmed(row, schema::COL_SURFACE),
        series,
        round: raw::cell_trimmed(row, schema::COL_ROUND),
        best_of,
        winner_games,
        loser_games,
        winner_sets: num(schema::COL_WINNER_SETS),
        loser_sets: num(schema::COL_LOSER_SETS),
        winner_odds,
        loser_odds,
        winner_rank: num(schema::COL_WINNER_RANK),
        loser_rank: num(schema::COL_LOSER_RANK),
    }))
}

// The history files mix ISO dates, day-first dates and full timestamps.
fn parse_date(s: &str) -> Result<NaiveDate> {
    let t = s.trim();
    for fmt in ["%Y-%m-%d", "%d/%m/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(t, fmt) {
            return Ok(d);
        }
    }
    if let Some(prefix) = t.get(..10)
        && let Ok(d) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d")
    {
        return Ok(d);
    }
    Err(anyhow!("unparseable date {s:?}"))
}

/// Renders a canonical record back into a raw row keyed by the original
/// column names. Cleaning its output again is a no-op, which is how the
/// cleaner's idempotence is checked.
pub fn record_to_raw(record: &MatchRecord) -> Value {
    let mut row = RawRow::new();
    row.insert(
        schema::COL_COMMENT.into(),
        Value::from(schema::STATUS_COMPLETED),
    );
    row.insert(
        schema::COL_DATE.into(),
        Value::from(record.date.format("%Y-%m-%d").to_string()),
    );
    row.insert(schema::COL_WINNER.into(), Value::from(record.winner.clone()));
    row.insert(schema::COL_LOSER.into(), Value::from(record.loser.clone()));

    let put_str = |row: &mut RawRow, col: &str, v: &Option<String>| {
        if let Some(v) = v {
            row.insert(col.into(), Value::from(v.clone()));
        }
    };
    put_str(&mut row, schema::COL_TOURNAMENT, &record.tournament);
    put_str(&mut row, schema::COL_SURFACE, &record.surface);
    put_str(&mut row, schema::COL_SERIES, &record.series);
    put_str(&mut row, schema::COL_ROUND, &record.round);

    if let Some(best_of) = record.best_of {
        row.insert(schema::COL_BEST_OF.into(), Value::from(best_of));
    }

    for slot in 0..MAX_SET_SLOTS {
        if let Some(games) = record.winner_games[slot] {
            row.insert(format!("W{}", slot + 1), Value::from(games));
        }
        if let Some(games) = record.loser_games[slot] {
            row.insert(format!("L{}", slot + 1), Value::from(games));
        }
    }

    let put_num = |row: &mut RawRow, col: &str, v: Option<f64>| {
        if let Some(v) = v {
            row.insert(col.into(), Value::from(v));
        }
    };
    put_num(&mut row, schema::COL_WINNER_SETS, record.winner_sets);
    put_num(&mut row, schema::COL_LOSER_SETS, record.loser_sets);
    put_num(&mut row, schema::COL_WINNER_ODDS, record.winner_odds);
    put_num(&mut row, schema::COL_LOSER_ODDS, record.loser_odds);
    put_num(&mut row, schema::COL_WINNER_RANK, record.winner_rank);
    put_num(&mut row, schema::COL_LOSER_RANK, record.loser_rank);

    Value::Object(row)
}
