pub mod args;
pub mod io;
pub mod ops;
pub mod options;
pub mod output;

pub use options::run;
