use std::path::Path;

use anyhow::{Context, bail};

use super::Table;

/// Reads a numeric CSV. Without a header row, columns are named `x1..xn`.
pub fn load_csv(path: &Path, has_header: bool) -> anyhow::Result<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(has_header)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("failed to open CSV {}", path.display()))?;

    let mut headers: Vec<String> = if has_header {
        rdr.headers()
            .with_context(|| format!("failed to read CSV headers from {}", path.display()))?
            .iter()
            .map(str::to_string)
            .collect()
    } else {
        Vec::new()
    };

    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];
    for (row_idx, rec) in rdr.records().enumerate() {
        let row_num = row_idx + 1;
        let rec = rec.with_context(|| format!("failed to read CSV record at row {row_num}"))?;
        if row_idx == 0 && !has_header {
            headers = (1..=rec.len()).map(|i| format!("x{i}")).collect();
            columns = vec![Vec::new(); rec.len()];
        }
        if rec.len() != columns.len() {
            bail!("row {row_num} has {} fields but expected {}", rec.len(), columns.len());
        }
        for (col, field) in columns.iter_mut().zip(rec.iter()) {
            let v: f64 = field
                .parse()
                .with_context(|| format!("row {row_num}: {field:?} is not a number"))?;
            col.push(v);
        }
    }

    Table::new(headers, columns).with_context(|| format!("failed to build table from {}", path.display()))
}
