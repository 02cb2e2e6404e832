// CLI result rows: printing, appending and resume bookkeeping.

use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::path::Path;

use anyhow::{Context, bail};

use crate::cli::args::OutputFormat;

/// One search run, as persisted for later analysis.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResultRow {
    pub dataset: String,
    pub repetition: usize,
    pub elapsed_seconds: f64,
    #[serde(with = "fitness_value")]
    pub train_fitness: f64,
    #[serde(with = "fitness_value")]
    pub test_fitness: f64,
    pub nodes: usize,
    pub true_nodes: usize,
    pub depth: usize,
    pub true_depth: usize,
    pub expression: String,
}

/// Non-finite fitness is stored as an empty value and read back as `+inf`.
mod fitness_value {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(v: &f64, s: S) -> Result<S::Ok, S::Error> {
        if v.is_finite() { s.serialize_some(v) } else { s.serialize_none() }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(d)?.unwrap_or(f64::INFINITY))
    }
}

pub fn print_header() {
    println!(
        "{:<12} {:>4} {:>9} {:>14} {:>14} {:>6} {:>6} expression",
        "dataset", "rep", "seconds", "train_rmse", "test_rmse", "nodes", "depth"
    );
}

pub fn print_row(row: &ResultRow) {
    println!(
        "{:<12} {:>4} {:>9.2} {:>14.6e} {:>14.6e} {:>6} {:>6} {}",
        row.dataset,
        row.repetition,
        row.elapsed_seconds,
        row.train_fitness,
        row.test_fitness,
        row.nodes,
        row.depth,
        row.expression
    );
}

pub fn resolve_format(path: &Path, format: Option<OutputFormat>) -> anyhow::Result<OutputFormat> {
    let fmt = match format {
        Some(f) => f,
        None => infer_format(path),
    };
    if let OutputFormat::Table = fmt {
        bail!("table output is only supported on stdout");
    }
    Ok(fmt)
}

fn infer_format(path: &Path) -> OutputFormat {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Csv,
    }
}

/// Rows already stored at `path` (none if the file does not exist yet).
pub fn read_rows(path: &Path, format: OutputFormat) -> anyhow::Result<Vec<ResultRow>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    match format {
        OutputFormat::Json => {
            let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
            if file.metadata()?.len() == 0 {
                return Ok(Vec::new());
            }
            serde_json::from_reader(file).with_context(|| format!("failed to parse {}", path.display()))
        }
        _ => {
            let mut rdr = csv::Reader::from_path(path).with_context(|| format!("failed to open {}", path.display()))?;
            rdr.deserialize()
                .collect::<Result<Vec<ResultRow>, _>>()
                .with_context(|| format!("failed to parse {}", path.display()))
        }
    }
}

/// `(dataset, repetition)` ids present at `path`.
pub fn completed_ids(path: &Path, format: OutputFormat) -> anyhow::Result<HashSet<(String, usize)>> {
    Ok(read_rows(path, format)?
        .into_iter()
        .map(|r| (r.dataset, r.repetition))
        .collect())
}

/// Appends one row. CSV gets a header only when the file is new or empty; JSON is kept
/// as a single array and rewritten.
pub fn append_row(path: &Path, format: OutputFormat, row: &ResultRow) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let mut rows = read_rows(path, format)?;
            rows.push(row.clone());
            let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
            serde_json::to_writer_pretty(file, &rows)?;
        }
        _ => {
            let is_new = std::fs::metadata(path).map_or(true, |m| m.len() == 0);
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            let mut wtr = csv::WriterBuilder::new().has_headers(is_new).from_writer(file);
            wtr.serialize(row)?;
            wtr.flush()?;
        }
    }
    Ok(())
}
