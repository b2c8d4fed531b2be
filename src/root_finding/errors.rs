//! Root-finding error types.
//!
//! ┌ [`RootFindingError`] : runtime failures shared by every method
//! │   ├ non-finite function evaluation
//! │   └ invalid iteration cap
//! │
//! ├ [`ToleranceError`]   : invalid input or computed tolerances
//! │
//! ├ [`ConfigError`]      : loading [`MethodSettings`] from TOML
//! │
//! └ [`SolveError`]       : what a [`RootFinder`] returns
//!     ├ one transparent variant per built-in method error
//!     └ missing problem inputs (bracket, guess)
//!
//! [`MethodSettings`]: super::config::MethodSettings
//! [`RootFinder`]: super::finder::RootFinder

use thiserror::Error;
use super::algorithms::Algorithm;
use super::bisection::BisectionError;
use super::regula_falsi::RegulaFalsiError;
use super::secant::SecantError;
use super::newton::NewtonError;
use super::brent::BrentError;


#[derive(Debug, Error)]
pub enum RootFindingError {
    #[error("function non-finite at x={x}, f(x)={fx}")]
    NonFiniteEvaluation { x: f64, fx: f64 },

    #[error("invalid max_iter: must be >= 1. got max_iter={got}")]
    InvalidMaxIter { got: usize },
}


#[derive(Debug, Error)]
pub enum ToleranceError {
    #[error("invalid `abs_fx` tolerance: must be finite and > 0. got {got}")]
    InvalidAbsFx { got: f64 },

    #[error("invalid `abs_x` tolerance: must be finite and >= 0. got {got}")]
    InvalidAbsX  { got: f64 },

    #[error("invalid `rel_x` tolerance: must be finite and >= 0. got {got}")]
    InvalidRelX  { got: f64 },

    #[error("either `abs_x` or `rel_x` must be > 0. got {abs_x} and {rel_x}")]
    InvalidAbsRelX { abs_x: f64, rel_x: f64 },

    #[error("invalid computed tolerance: must be finite and > 0. got {got}")]
    InvalidTolerance { got: f64 },
}


/// Settings file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file `{path}`")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Tolerance(#[from] ToleranceError),

    #[error(transparent)]
    RootFinding(#[from] RootFindingError),
}


/// Problem input a method needed but did not get.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProblemInput {
    Bracket,
    InitialGuess,
}

impl std::fmt::Display for ProblemInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProblemInput::Bracket      => f.write_str("bracket [a, b]"),
            ProblemInput::InitialGuess => f.write_str("initial guess"),
        }
    }
}


/// Error returned through the object-safe [`RootFinder`] interface.
///
/// [`RootFinder`]: super::finder::RootFinder
#[derive(Debug, Error)]
pub enum SolveError {
    #[error("{algorithm} requires a {input}")]
    MissingInput { algorithm: Algorithm, input: ProblemInput },

    #[error(transparent)]
    Bisection(#[from] BisectionError),

    #[error(transparent)]
    RegulaFalsi(#[from] RegulaFalsiError),

    #[error(transparent)]
    Secant(#[from] SecantError),

    #[error(transparent)]
    Newton(#[from] NewtonError),

    #[error(transparent)]
    Brent(#[from] BrentError),
}
