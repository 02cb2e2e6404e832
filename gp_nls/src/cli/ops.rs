// Function and terminal set construction from CLI flags.

use anyhow::Context;
use gp_expressions::operators::builtin;
use gp_expressions::{Erc, FunctionSet, TerminalSet, TerminalSpec, Var, WeightedVar};

use crate::cli::args::Cli;

pub fn build_functions(cli: &Cli) -> anyhow::Result<FunctionSet> {
    match &cli.functions {
        None => Ok(FunctionSet::default_set()),
        Some(names) => {
            let names: Vec<&str> = names.iter().map(|s| s.trim()).filter(|s| !s.is_empty()).collect();
            FunctionSet::from_names(&names).context("failed to build function set")
        }
    }
}

/// One variable per dataset column, named after it, plus the ERC unless `--no-erc`.
pub fn build_terminals(cli: &Cli, variable_names: &[String]) -> anyhow::Result<TerminalSet> {
    let mut terminals: Vec<TerminalSpec> = variable_names
        .iter()
        .enumerate()
        .map(|(j, name)| {
            if cli.weighted_vars {
                WeightedVar::new(name.clone(), j, 1.0).into()
            } else {
                Var::new(name.clone(), j).into()
            }
        })
        .collect();
    if !cli.no_erc {
        let erc = Erc::new(cli.erc_lower, cli.erc_upper).context("invalid --erc-lower/--erc-upper")?;
        terminals.push(erc.into());
    }
    TerminalSet::new(terminals).context("failed to build terminal set")
}

pub fn print_function_list() {
    let mut funcs = builtin::all();
    funcs.sort_by_key(|f| (f.arity(), f.name().to_string()));
    println!("--functions:");
    for f in &funcs {
        println!("  {:<8} arity={}", f.name(), f.arity());
    }
}
