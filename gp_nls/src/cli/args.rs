// CLI argument parsing.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::options::cli_args::OptionsArgs;

#[rustfmt::skip]
#[derive(Parser, Debug, Clone)]
#[command(name = "gp-nls")]
#[command(about = "GP symbolic regression with nonlinear least-squares constant fitting")]
pub struct Cli {
    /// Input dataset path (.csv).
    #[arg(required_unless_present = "list_functions")]
    pub data: Option<PathBuf>,

    /// Treat input as having no header row.
    #[arg(long)]
    pub no_header: bool,

    /// Interpret integer column indices as 1-based (default: 0-based).
    #[arg(long)]
    pub one_indexed: bool,

    /// Input feature columns (comma-separated). Defaults to every column except the target.
    #[arg(long, value_delimiter = ',')]
    pub x: Option<Vec<String>>,

    /// Target column (name or index). Required.
    #[arg(long, required_unless_present = "list_functions")]
    pub y: Option<String>,

    /// Functions to enable (comma-separated). Defaults to +,-,*,/,square,sqrt,exp,log.
    /// Note: quote lists in shells (e.g. `--functions='+,*'`) to avoid globbing.
    #[arg(long, value_delimiter = ',')]
    pub functions: Option<Vec<String>>,

    /// List available builtin functions and exit.
    #[arg(long)]
    pub list_functions: bool,

    /// Use weighted variables (weight * x) instead of plain variables as terminals.
    #[arg(long)]
    pub weighted_vars: bool,

    /// Lower bound of the ephemeral random constant range.
    #[arg(long, default_value_t = -1.0, allow_hyphen_values = true)]
    pub erc_lower: f64,

    /// Upper bound of the ephemeral random constant range.
    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    pub erc_upper: f64,

    /// Do not add random constants to the terminal set.
    #[arg(long)]
    pub no_erc: bool,

    /// Fraction of rows used for training; the rest is the test split.
    #[arg(long, default_value_t = 0.7)]
    pub train_fraction: f64,

    /// Independent runs; run `r` uses seed `seed + r` for both the split and the search.
    #[arg(long, default_value_t = 1)]
    pub repetitions: usize,

    /// Dataset id written to each result row (defaults to the input file stem).
    #[arg(long)]
    pub dataset_id: Option<String>,

    /// Output path for result rows (optional). Rows are appended.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Output format (defaults to inferring from --output extension).
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Skip repetitions whose (dataset id, repetition) row already exists in --output.
    #[arg(long, requires = "output")]
    pub resume: bool,

    #[command(flatten)]
    pub options: OptionsArgs,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}
