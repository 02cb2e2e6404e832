mod csv;
mod table;

use anyhow::{Context, bail};
use ndarray::{Array1, Array2};
pub use table::Table;

use crate::cli::args::Cli;
use crate::dataset::Dataset;

pub fn load_table(cli: &Cli) -> anyhow::Result<Table> {
    let path = cli
        .data
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("missing input dataset path"))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" | "txt" => csv::load_csv(path, !cli.no_header),
        _ => bail!("unsupported input extension {ext:?} (expected .csv)"),
    }
}

/// The target column plus the selected (or all remaining) feature columns.
pub fn build_dataset(table: &Table, cli: &Cli) -> anyhow::Result<Dataset> {
    let y_raw = cli.y.as_deref().context("missing --y")?;
    let y_index = table
        .resolve(y_raw, cli.one_indexed)
        .context("failed to resolve --y")?;

    let x_indices: Vec<usize> = match &cli.x {
        Some(xs) => xs
            .iter()
            .map(|s| table.resolve(s, cli.one_indexed))
            .collect::<anyhow::Result<Vec<_>>>()
            .context("failed to resolve --x selectors")?,
        None => (0..table.n_cols).filter(|&i| i != y_index).collect(),
    };

    if x_indices.is_empty() {
        bail!("no feature columns selected for X (use --x to specify explicitly)");
    }
    if x_indices.contains(&y_index) {
        bail!("X and y overlap at column index {y_index}");
    }

    let mut x = Array2::<f64>::zeros((table.n_rows, x_indices.len()));
    for (j, &col_idx) in x_indices.iter().enumerate() {
        let col = table.column_by_index(col_idx)?;
        x.column_mut(j).assign(&ndarray::ArrayView1::from(col));
    }
    let y = Array1::from(table.column_by_index(y_index)?.to_vec());
    let variable_names = x_indices.iter().map(|&i| table.headers[i].clone()).collect();

    Dataset::with_names(x, y, variable_names).context("invalid dataset")
}
