use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

use crate::cleaning::{self, CleanConfig, MatchRecord};
use crate::elo::{self, EloConfig, MatchRatings, RatingBook};
use crate::features::{self, MatchFeatures};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedMatch {
    pub record: MatchRecord,
    pub features: MatchFeatures,
    pub ratings: MatchRatings,
}

#[derive(Debug, Clone)]
pub struct EnrichOutcome {
    /// Cleaned rows in chronological order, one enriched row per survivor.
    pub matches: Vec<EnrichedMatch>,
    /// Rating state at the end of the scan.
    pub book: RatingBook,
    pub dropped: usize,
    pub row_errors: Vec<String>,
}

/// Full pass: clean, sort chronologically, derive row-wise features in
/// parallel, then run the sequential rating scan and zip everything 1:1.
pub fn enrich_history(
    rows: &[Value],
    clean_cfg: &CleanConfig,
    elo_cfg: EloConfig,
) -> Result<EnrichOutcome> {
    let cleaned = cleaning::clean(rows, clean_cfg)?;

    let mut records = cleaned.records;
    // Stable sort: same-day matches keep their original listing order.
    records.sort_by_key(|record| record.date);

    let features = features::derive_all(&records);

    let mut book = RatingBook::new(elo_cfg);
    let ratings = elo::rate_history_with(&records, &mut book)?;

    let matches = records
        .into_iter()
        .zip(features)
        .zip(ratings)
        .map(|((record, features), ratings)| EnrichedMatch {
            record,
            features,
            ratings,
        })
        .collect();

    Ok(EnrichOutcome {
        matches,
        book,
        dropped: cleaned.dropped,
        row_errors: cleaned.row_errors,
    })
}
