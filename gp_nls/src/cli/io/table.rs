use anyhow::{Context, bail};

/// Column-major numeric table with one header per column.
pub struct Table {
    pub headers: Vec<String>,
    pub columns: Vec<Vec<f64>>,
    pub n_rows: usize,
    pub n_cols: usize,
}

impl Table {
    pub fn new(headers: Vec<String>, columns: Vec<Vec<f64>>) -> anyhow::Result<Self> {
        if headers.len() != columns.len() {
            bail!(
                "header count {} does not match column count {}",
                headers.len(),
                columns.len()
            );
        }
        let n_rows = columns.first().map_or(0, Vec::len);
        if let Some(i) = columns.iter().position(|c| c.len() != n_rows) {
            bail!("column {:?} has {} rows but expected {n_rows}", headers[i], columns[i].len());
        }
        Ok(Self {
            n_cols: columns.len(),
            headers,
            columns,
            n_rows,
        })
    }

    pub fn column_by_index(&self, idx: usize) -> anyhow::Result<&[f64]> {
        self.columns
            .get(idx)
            .map(Vec::as_slice)
            .with_context(|| format!("column index {idx} out of bounds (n_cols={})", self.n_cols))
    }

    /// Resolves a selector: an integer is an index, anything else a header name
    /// (exact match first, then a unique case-insensitive one).
    pub fn resolve(&self, raw: &str, one_indexed: bool) -> anyhow::Result<usize> {
        let s = raw.trim();
        if s.is_empty() {
            bail!("empty column selector");
        }
        if let Ok(idx) = s.parse::<usize>() {
            let idx = if one_indexed {
                idx.checked_sub(1)
                    .with_context(|| format!("1-based column index {s} is invalid"))?
            } else {
                idx
            };
            if idx >= self.n_cols {
                bail!("column index {idx} out of bounds (n_cols={})", self.n_cols);
            }
            return Ok(idx);
        }
        if let Some(i) = self.headers.iter().position(|h| h == s) {
            return Ok(i);
        }
        let lc = s.to_ascii_lowercase();
        let matches: Vec<usize> = (0..self.n_cols)
            .filter(|&i| self.headers[i].to_ascii_lowercase() == lc)
            .collect();
        match matches.as_slice() {
            [] => bail!("unknown column name {s:?}"),
            [i] => Ok(*i),
            _ => bail!("ambiguous column name {s:?} (multiple case-insensitive matches)"),
        }
    }
}
