pub(crate) mod constant_optimization;
pub(crate) mod dataset;
pub(crate) mod error;
pub(crate) mod initialization;
pub(crate) mod loss_functions;
pub(crate) mod mutate;
pub(crate) mod optim;
pub(crate) mod options;
pub(crate) mod pop_member;
pub(crate) mod population;
pub mod prelude;
pub(crate) mod progress_bars;
pub(crate) mod search_utils;
pub(crate) mod selection;
pub(crate) mod stop_controller;

#[cfg(feature = "cli")]
pub mod cli;

pub use constant_optimization::{
    AdaptResult, adapt_to_dataset, adapt_tree, strip_linear_transform_box, wrap_linear_transform_box,
};
pub use dataset::Dataset;
pub use error::Error;
pub use initialization::{InitMethod, full, grow, init_population, ptc2, ramped_half_half};
pub use loss_functions::{fitness, rmse};
pub use mutate::{crossover, mutate};
pub use options::Options;
pub use pop_member::Individual;
pub use population::Population;
pub use search_utils::{SearchEngine, SearchResult, gp_search};
pub use selection::{binary_tournament, reduce, tournament, uniform};
pub use stop_controller::StopController;

#[cfg(test)]
mod tests;
