//! Standings export — JSON, CSV, and Markdown.
//!
//! - **JSON**: full round-trip serialization with schema versioning
//! - **CSV**: one row per entry with a column per race, for spreadsheets
//! - **Markdown**: a results sheet for the club noticeboard
//!
//! Persisted JSON carries a `schema_version`. Newer versions are rejected on
//! load.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use sailrace_core::domain::{RaceId, SeriesPosition};
use sailrace_core::Standings;

use crate::config::ExportFormat;

/// Current schema version for exported standings.
pub const SCHEMA_VERSION: u32 = 1;

/// Exported standings with a schema version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingsReport {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(flatten)]
    pub standings: Standings,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

// ─── JSON export ────────────────────────────────────────────────────

pub fn export_json(standings: &Standings) -> Result<String> {
    let report = StandingsReport {
        schema_version: SCHEMA_VERSION,
        standings: standings.clone(),
    };
    serde_json::to_string_pretty(&report).context("failed to serialize standings to JSON")
}

/// Deserialize standings from JSON, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<StandingsReport> {
    let report: StandingsReport =
        serde_json::from_str(json).context("failed to deserialize standings from JSON")?;
    if report.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            report.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(report)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Every race any entry sailed, in (date, id) order.
fn race_columns(entries: &[SeriesPosition]) -> Vec<(NaiveDate, RaceId)> {
    let races: BTreeSet<(NaiveDate, RaceId)> = entries
        .iter()
        .flat_map(|e| e.races.iter().map(|r| (r.race_date, r.race_id)))
        .collect();
    races.into_iter().collect()
}

/// Position cell for one race: blank if not sailed, parenthesized if discarded.
fn race_cell(entry: &SeriesPosition, race_id: RaceId) -> String {
    match entry.position_in(race_id) {
        Some(score) if score.discarded => format!("({})", score.position),
        Some(score) => score.position.to_string(),
        None => String::new(),
    }
}

/// Columns: rank, name, fleet, boat, races, counted_score, total_score,
/// average, qualified, tie_break, then `r<race id>` per race.
pub fn export_csv(standings: &Standings) -> Result<String> {
    let races = race_columns(&standings.entries);
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header: Vec<String> = [
        "rank",
        "name",
        "fleet",
        "boat",
        "races",
        "counted_score",
        "total_score",
        "average",
        "qualified",
        "tie_break",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    header.extend(races.iter().map(|(_, id)| format!("r{id}")));
    wtr.write_record(&header)?;

    for e in &standings.entries {
        let mut row = vec![
            e.rank.to_string(),
            e.name.clone(),
            e.fleet.clone(),
            e.boat_label(),
            e.races_sailed().to_string(),
            e.counted_score.to_string(),
            e.total_score.to_string(),
            format!("{:.2}", e.average_position),
            e.qualified.to_string(),
            e.tie_break.clone(),
        ];
        row.extend(races.iter().map(|&(_, id)| race_cell(e, id)));
        wtr.write_record(&row)?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Markdown reports ───────────────────────────────────────────────

pub fn generate_report(standings: &Standings) -> String {
    let races = race_columns(&standings.entries);
    let mut md = String::with_capacity(1024 + standings.entries.len() * 128);

    md.push_str(&format!("# {} Standings\n\n", standings.series.name));

    md.push_str("| Field | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!("| Series | {} |\n", standings.series.id));
    md.push_str(&format!("| Races | {} |\n", races.len()));
    md.push_str(&format!(
        "| Races counted | {} |\n",
        standings.series.counted_races
    ));
    md.push_str(&format!("| Entries | {} |\n", standings.entries.len()));
    md.push_str(&format!("| Fleets | {} |\n", standings.fleets().join(", ")));
    md.push_str(&format!("| Fingerprint | `{}` |\n", standings.fingerprint.short()));
    md.push('\n');

    md.push_str("## Results\n\n");
    md.push_str("| # | Helm | Fleet | Boat |");
    for (date, _) in &races {
        md.push_str(&format!(" {} |", date.format("%d %b")));
    }
    md.push_str(" Counted | Total | Avg |\n");
    md.push_str("| ---: | --- | --- | --- |");
    md.push_str(&" ---: |".repeat(races.len()));
    md.push_str(" ---: | ---: | ---: |\n");

    for e in &standings.entries {
        let rank = if e.qualified {
            e.rank.to_string()
        } else {
            format!("{}*", e.rank)
        };
        md.push_str(&format!(
            "| {} | {} | {} | {} |",
            rank,
            e.name,
            e.fleet,
            e.boat_label()
        ));
        for &(_, id) in &races {
            md.push_str(&format!(" {} |", race_cell(e, id)));
        }
        md.push_str(&format!(
            " {} | {} | {:.2} |\n",
            e.counted_score, e.total_score, e.average_position
        ));
    }

    md.push('\n');
    md.push_str(&format!(
        "Best {} results count. Discards are shown in (brackets). \
         `*` marks helms who have not yet sailed enough races to qualify. \
         `++` marks helms who sailed more than one boat.\n",
        standings.series.counted_races
    ));
    md
}

// ─── Files ──────────────────────────────────────────────────────────

/// Render standings in the requested format.
pub fn render(standings: &Standings, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => export_json(standings),
        ExportFormat::Csv => export_csv(standings),
        ExportFormat::Markdown => Ok(generate_report(standings)),
    }
}

/// Write `series-<id>.<ext>` under `output_dir`. Returns the file path.
pub fn save_standings(
    standings: &Standings,
    output_dir: &Path,
    format: ExportFormat,
) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output dir: {}", output_dir.display()))?;
    let path = output_dir.join(format!(
        "series-{}.{}",
        standings.series.id,
        format.extension()
    ));
    let content = render(standings, format)?;
    std::fs::write(&path, content)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

/// Load standings from a JSON export. Rejects newer schema versions.
pub fn load_standings(path: &Path) -> Result<Standings> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(import_json(&json)?.standings)
}
