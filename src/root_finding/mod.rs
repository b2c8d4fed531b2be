// common helpers
pub mod algorithms;
pub mod config;
pub mod errors;
pub mod finder;
pub mod report;
pub(crate) mod bracket;
pub(crate) mod eval;
pub(crate) mod tolerances;

// algorithms
pub mod bisection;
pub mod regula_falsi;
pub mod secant;
pub mod newton;
pub mod brent;
