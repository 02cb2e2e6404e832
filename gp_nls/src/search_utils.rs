use gp_expressions::{FunctionSet, TerminalSet};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::constant_optimization::adapt_to_dataset;
use crate::dataset::Dataset;
use crate::error::Error;
use crate::initialization::init_population;
use crate::mutate::{crossover, mutate};
use crate::options::Options;
use crate::pop_member::Individual;
use crate::population::Population;
use crate::progress_bars::SearchProgress;
use crate::selection::{binary_tournament, reduce, uniform};
use crate::stop_controller::StopController;

#[derive(Clone, Debug)]
pub struct SearchResult {
    pub best: Individual,
    /// Best fitness after each completed generation.
    pub history: Vec<f64>,
}

/// Generational GP driver that can be advanced a few generations at a time.
pub struct SearchEngine {
    dataset: Dataset,
    functions: FunctionSet,
    terminals: TerminalSet,
    options: Options,
    population: Population,
    rng: StdRng,
    generation: usize,
    history: Vec<f64>,
    progress: SearchProgress,
    progress_finished: bool,
    controller: StopController,
}

impl SearchEngine {
    /// Validates the inputs and builds the evaluated initial population.
    ///
    /// With `use_nls_optimization` every initial tree goes through one adapter pass first.
    pub fn new(dataset: Dataset, functions: FunctionSet, terminals: TerminalSet, options: Options) -> Result<Self, Error> {
        options.validate()?;
        if let Some(column) = terminals.max_column() {
            if column >= dataset.n_features {
                return Err(Error::ColumnOutOfRange {
                    column,
                    n_features: dataset.n_features,
                });
            }
        }

        let mut rng = StdRng::seed_from_u64(options.seed);
        let trees = init_population(
            options.init_method,
            &functions,
            &terminals,
            options.min_depth,
            options.max_depth,
            options.max_size,
            options.pop_size,
            &mut rng,
        );

        let members = if options.use_nls_optimization {
            trees
                .into_par_iter()
                .map(|t| {
                    let fit = adapt_to_dataset(t, &dataset, options.nls_max_iterations, options.keep_linear_transform_box);
                    Individual::new(fit.tree)
                })
                .collect()
        } else {
            trees.into_iter().map(Individual::new).collect()
        };
        let mut population = Population::new(members);
        population.evaluate_all(&dataset);

        let progress = SearchProgress::new(&options);
        let controller = StopController::from_options(&options);

        Ok(Self {
            dataset,
            functions,
            terminals,
            options,
            population,
            rng,
            generation: 0,
            history: Vec::new(),
            progress,
            progress_finished: false,
            controller,
        })
    }

    pub fn total_generations(&self) -> usize {
        self.options.generations
    }

    pub fn generations_completed(&self) -> usize {
        self.generation
    }

    pub fn is_finished(&self) -> bool {
        self.generation >= self.options.generations || self.controller.is_cancelled()
    }

    /// Handle that can stop this search from another thread.
    pub fn stop_controller(&self) -> StopController {
        self.controller.clone()
    }

    pub fn cancel(&self) {
        self.controller.cancel();
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn best(&self) -> Option<&Individual> {
        self.population.best()
    }

    pub fn history(&self) -> &[f64] {
        &self.history
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Runs up to `n_generations` more generations; returns how many ran.
    pub fn step(&mut self, n_generations: usize) -> Result<usize, Error> {
        let mut completed = 0usize;
        for _ in 0..n_generations {
            if self.is_finished() {
                self.finish();
                break;
            }
            self.step_one_generation()?;
            completed += 1;
        }
        if self.is_finished() {
            self.finish();
        }
        Ok(completed)
    }

    pub fn run_to_completion(mut self) -> Result<SearchResult, Error> {
        while !self.is_finished() {
            self.step_one_generation()?;
        }
        self.finish();
        let best = self
            .population
            .best()
            .cloned()
            .ok_or(Error::NoViableIndividuals {
                generation: self.generation,
            })?;
        Ok(SearchResult {
            best,
            history: self.history,
        })
    }

    fn finish(&mut self) {
        if self.progress_finished {
            return;
        }
        self.progress.finish();
        self.progress_finished = true;
        if self.generation < self.options.generations {
            log::warn!(
                "search cancelled after {} of {} generations",
                self.generation,
                self.options.generations
            );
        }
    }

    fn step_one_generation(&mut self) -> Result<(), Error> {
        let generation = self.generation + 1;

        let dropped = self.population.retain_finite();
        if self.population.is_empty() {
            return Err(Error::NoViableIndividuals { generation });
        }
        log::trace!("generation {generation}: dropped {dropped} non-finite individuals");

        let elite = if self.options.elitism {
            self.population.best().map(Individual::deep_copy)
        } else {
            None
        };

        let seeds: Vec<u64> = (0..self.options.pop_size).map(|_| self.rng.random()).collect();
        let parents = &self.population.members;
        let dataset = &self.dataset;
        let functions = &self.functions;
        let terminals = &self.terminals;
        let opt = &self.options;

        let children: Vec<Individual> = seeds
            .into_par_iter()
            .map(|seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                let (a, b) = if opt.tournament_parents {
                    (binary_tournament(&mut rng, parents), binary_tournament(&mut rng, parents))
                } else {
                    (uniform(&mut rng, parents), uniform(&mut rng, parents))
                };
                let child = crossover(&a.tree, &b.tree, opt.max_depth, opt.max_size, &mut rng);
                let child = mutate(
                    child,
                    opt.max_depth,
                    opt.max_size,
                    functions,
                    terminals,
                    opt.mutation_rate,
                    &mut rng,
                );
                let child = if opt.use_nls_optimization {
                    adapt_to_dataset(child, dataset, opt.nls_max_iterations, opt.keep_linear_transform_box).tree
                } else {
                    child
                };
                let mut ind = Individual::new(child);
                ind.evaluate(dataset);
                ind
            })
            .collect();

        let mut pool = std::mem::take(&mut self.population.members);
        pool.extend(children.into_iter().filter(Individual::is_viable));
        self.population = Population::new(reduce(&mut self.rng, &pool, self.options.pop_size));

        if let Some(elite) = elite {
            self.population.replace_worst(elite);
        }

        self.generation = generation;
        if let Some(best) = self.population.best() {
            self.history.push(best.fitness);
            let expr = best.tree.to_string();
            if self.options.verbose {
                log::info!("generation {generation}: best rmse {:.6e} | {expr}", best.fitness);
            }
            self.progress.on_generation(generation, best.fitness, &expr);
        }
        Ok(())
    }
}

/// Runs a full search with a fresh [`SearchEngine`].
pub fn gp_search(
    dataset: Dataset,
    functions: FunctionSet,
    terminals: TerminalSet,
    options: Options,
) -> Result<SearchResult, Error> {
    SearchEngine::new(dataset, functions, terminals, options)?.run_to_completion()
}
