mod common;
mod test_crossover_mutation_bounds;
mod test_search_runs;
