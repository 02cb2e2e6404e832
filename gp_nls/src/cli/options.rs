// CLI entrypoint + option wiring.

use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::cli::args::Cli;
use crate::cli::output::{ResultRow, append_row, completed_ids, print_header, print_row, resolve_format};
use crate::loss_functions::fitness;
use crate::options::Options;
use crate::search_utils::gp_search;

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.list_functions {
        super::ops::print_function_list();
        return Ok(());
    }

    let table = super::io::load_table(&cli).context("failed to load input table")?;
    let dataset = super::io::build_dataset(&table, &cli).context("failed to build dataset")?;

    let functions = super::ops::build_functions(&cli)?;
    let terminals = super::ops::build_terminals(&cli, &dataset.variable_names)?;
    let mut options = Options::default();
    cli.options.apply_to(&mut options);
    validate_options(&options, &cli)?;

    let dataset_id = match &cli.dataset_id {
        Some(id) => id.clone(),
        None => cli
            .data
            .as_deref()
            .and_then(|p| p.file_stem())
            .and_then(|s| s.to_str())
            .unwrap_or("dataset")
            .to_string(),
    };

    let output = match &cli.output {
        Some(path) => Some((path.as_path(), resolve_format(path, cli.format)?)),
        None => None,
    };
    let done = match output {
        Some((path, fmt)) if cli.resume => {
            completed_ids(path, fmt).with_context(|| format!("failed to read {}", path.display()))?
        }
        _ => Default::default(),
    };

    print_header();
    for rep in 0..cli.repetitions {
        if done.contains(&(dataset_id.clone(), rep)) {
            log::info!("skipping {dataset_id} repetition {rep}: already in output");
            continue;
        }
        let seed = options.seed.wrapping_add(rep as u64);
        let mut split_rng = StdRng::seed_from_u64(seed);
        let (train, test) = dataset
            .train_test_split(cli.train_fraction, &mut split_rng)
            .context("failed to split dataset")?;

        let run_options = Options {
            seed,
            ..options.clone()
        };
        let start = Instant::now();
        let result = gp_search(train.clone(), functions.clone(), terminals.clone(), run_options)
            .with_context(|| format!("search failed for repetition {rep}"))?;
        let elapsed_seconds = start.elapsed().as_secs_f64();

        let tree = &result.best.tree;
        let row = ResultRow {
            dataset: dataset_id.clone(),
            repetition: rep,
            elapsed_seconds,
            train_fitness: fitness(tree, train.x.view(), train.y.view()),
            test_fitness: fitness(tree, test.x.view(), test.y.view()),
            nodes: tree.count_nodes(),
            true_nodes: tree.count_nodes_true(),
            depth: tree.depth(),
            true_depth: tree.depth_true(),
            expression: tree.to_string(),
        };
        print_row(&row);

        if let Some((path, fmt)) = output {
            append_row(path, fmt, &row).with_context(|| format!("failed to write output to {}", path.display()))?;
        }
    }

    Ok(())
}

fn validate_options(opt: &Options, cli: &Cli) -> anyhow::Result<()> {
    opt.validate()?;
    anyhow::ensure!(cli.repetitions > 0, "repetitions must be > 0");
    anyhow::ensure!(
        cli.train_fraction > 0.0 && cli.train_fraction < 1.0,
        "train_fraction must be in (0, 1)"
    );
    Ok(())
}
