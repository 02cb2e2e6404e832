use ndarray::{Array1, Array2, Axis};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::Error;

#[derive(Clone, Debug)]
pub struct Dataset {
    /// Row-major contiguous data with shape `(n_rows, n_features)` (ndarray default).
    pub x: Array2<f64>,
    /// Target vector with length `n_rows`.
    pub y: Array1<f64>,
    pub n_features: usize,
    pub n_rows: usize,
    pub variable_names: Vec<String>,
}

impl Dataset {
    pub fn new(x: Array2<f64>, y: Array1<f64>) -> Result<Self, Error> {
        let x = x.as_standard_layout().to_owned();
        let (n_rows, n_features) = x.dim();
        if n_rows == 0 {
            return Err(Error::InvalidDataset("no observations".to_string()));
        }
        if y.len() != n_rows {
            return Err(Error::InvalidDataset(format!(
                "x has {n_rows} rows but y has {} entries",
                y.len()
            )));
        }
        let variable_names = (1..=n_features).map(|i| format!("x{i}")).collect();
        Ok(Self {
            x,
            y,
            n_features,
            n_rows,
            variable_names,
        })
    }

    pub fn with_names(x: Array2<f64>, y: Array1<f64>, variable_names: Vec<String>) -> Result<Self, Error> {
        let mut out = Self::new(x, y)?;
        if variable_names.len() != out.n_features {
            return Err(Error::InvalidDataset(format!(
                "{} variable names for {} features",
                variable_names.len(),
                out.n_features
            )));
        }
        out.variable_names = variable_names;
        Ok(out)
    }

    fn select_rows(&self, rows: &[usize]) -> Result<Self, Error> {
        Self::with_names(
            self.x.select(Axis(0), rows),
            self.y.select(Axis(0), rows),
            self.variable_names.clone(),
        )
    }

    /// Shuffled split into `(train, test)` with `round(train_fraction * n_rows)` training rows.
    ///
    /// Both halves must end up non-empty.
    pub fn train_test_split<R: Rng + ?Sized>(&self, train_fraction: f64, rng: &mut R) -> Result<(Self, Self), Error> {
        if !(train_fraction > 0.0 && train_fraction < 1.0) {
            return Err(Error::InvalidDataset(format!(
                "train fraction must be in (0, 1), got {train_fraction}"
            )));
        }
        let n_train = (train_fraction * self.n_rows as f64).round() as usize;
        if n_train == 0 || n_train == self.n_rows {
            return Err(Error::InvalidDataset(format!(
                "splitting {} rows at {train_fraction} leaves an empty side",
                self.n_rows
            )));
        }
        let mut rows: Vec<usize> = (0..self.n_rows).collect();
        rows.shuffle(rng);
        let (train, test) = rows.split_at(n_train);
        Ok((self.select_rows(train)?, self.select_rows(test)?))
    }
}
