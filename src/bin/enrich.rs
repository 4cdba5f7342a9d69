use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde_json::Value;

use tennis_edge::cleaning::{CleanConfig, FormatFilter};
use tennis_edge::elo::EloConfig;
use tennis_edge::pipeline;
use tennis_edge::player_stats;
use tennis_edge::schema::Circuit;

// Loads a raw history snapshot (JSON array of row objects), runs the full
// cleaning + feature + rating pass and prints a summary. No network.
fn main() -> Result<()> {
    let mut path: Option<PathBuf> = None;
    let mut circuit: Option<Circuit> = None;
    let mut best_of: Option<u32> = None;
    let mut player: Option<String> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--best-of" => {
                let value = args.next().context("--best-of needs a value")?;
                best_of = Some(value.parse().context("--best-of needs an integer")?);
            }
            "--player" => {
                player = Some(args.next().context("--player needs a name")?);
            }
            _ if path.is_none() => path = Some(PathBuf::from(arg.clone())),
            _ if circuit.is_none() => circuit = Some(arg.parse()?),
            other => bail!("unexpected argument {other:?}"),
        }
    }
    let (Some(path), Some(circuit)) = (path, circuit) else {
        bail!("usage: enrich <raw.json> <ATP|WTA> [--best-of N] [--player NAME]");
    };

    let body = fs::read_to_string(&path)
        .with_context(|| format!("read raw history {}", path.display()))?;
    let rows: Vec<Value> =
        serde_json::from_str(&body).context("input must be a JSON array of row objects")?;

    let mut clean_cfg = CleanConfig::for_circuit(circuit);
    if let Some(n) = best_of {
        clean_cfg.format = FormatFilter::Exact(n);
    }

    let outcome = pipeline::enrich_history(&rows, &clean_cfg, EloConfig::default())?;

    println!("{} history: {}", circuit.as_str(), path.display());
    println!("rows in:       {}", rows.len());
    println!("rows enriched: {}", outcome.matches.len());
    println!("rows dropped:  {}", outcome.dropped);
    for err in outcome.row_errors.iter().take(10) {
        eprintln!("[WARN] {err}");
    }
    if outcome.row_errors.len() > 10 {
        eprintln!("[WARN] ... and {} more", outcome.row_errors.len() - 10);
    }

    println!("\nMost recent matches:");
    for m in outcome.matches.iter().rev().take(5) {
        println!(
            "{}  {} ({:.0}) d. {} ({:.0})  games={} sets={}",
            m.record.date,
            m.record.winner,
            m.ratings.winner,
            m.record.loser,
            m.ratings.loser,
            m.features.total_games,
            m.features.total_sets,
        );
    }

    println!("\nTop rated:");
    for (name, rating) in outcome.book.standings().into_iter().take(10) {
        println!("{rating:7.1}  {name}");
    }

    if let Some(player) = player {
        let records: Vec<_> = outcome.matches.iter().map(|m| m.record.clone()).collect();
        match player_stats::player_summary(&records, &player) {
            Some(summary) => {
                println!("\n{player}:");
                println!("matches:  {}", summary.matches);
                println!("win rate: {:.1}%", summary.win_rate * 100.0);
                if let Some(rate) = summary.win_rate_as_favorite {
                    println!("as favorite: {:.1}%", rate * 100.0);
                }
                if let Some(rate) = summary.win_rate_as_outsider {
                    println!("as outsider: {:.1}%", rate * 100.0);
                }
                if let Some(rate) = summary.comeback_win_rate {
                    println!("comeback wins: {:.1}%", rate * 100.0);
                }
                let mut surfaces: Vec<_> = summary.win_rate_by_surface.into_iter().collect();
                surfaces.sort_by(|a, b| a.0.cmp(&b.0));
                for (surface, rate) in surfaces {
                    println!("{surface}: {:.1}%", rate * 100.0);
                }
            }
            None => println!("\n{player}: no matches in cleaned history"),
        }
    }

    Ok(())
}
