//! The root-finder capability.
//!
//! Every solver the registry accepts implements [`RootFinder`] (solve a
//! [`RootProblem`]) and [`RootFinderClass`] (be constructible from a
//! [`SolverCfg`] and describe itself by name).

use super::algorithms::Algorithm;
use super::config::SolverCfg;
use super::errors::{ProblemInput, SolveError};
use super::report::RootFindingReport;


/// Function plus whatever starting data the caller has.
///
/// Methods take what they need: bracketing methods the bracket, open methods
/// the guesses (falling back to the bracket), newton the derivative if present.
#[derive(Clone, Copy)]
pub struct RootProblem<'f> {
    func: &'f dyn Fn(f64) -> f64,
    derivative: Option<&'f dyn Fn(f64) -> f64>,
    bracket: Option<(f64, f64)>,
    x0: Option<f64>,
    x1: Option<f64>,
}

impl<'f> RootProblem<'f> {
    pub fn new(func: &'f dyn Fn(f64) -> f64) -> Self {
        Self { func, derivative: None, bracket: None, x0: None, x1: None }
    }

    pub fn with_bracket(mut self, a: f64, b: f64) -> Self {
        self.bracket = Some((a, b));
        self
    }
    pub fn with_guess(mut self, x0: f64) -> Self {
        self.x0 = Some(x0);
        self
    }
    pub fn with_second_guess(mut self, x1: f64) -> Self {
        self.x1 = Some(x1);
        self
    }
    pub fn with_derivative(mut self, df: &'f dyn Fn(f64) -> f64) -> Self {
        self.derivative = Some(df);
        self
    }

    pub fn func(&self) -> &'f dyn Fn(f64) -> f64 { self.func }
    pub fn derivative(&self) -> Option<&'f dyn Fn(f64) -> f64> { self.derivative }
    pub fn bracket(&self) -> Option<(f64, f64)> { self.bracket }
    pub fn guess(&self) -> Option<f64> { self.x0 }
    pub fn second_guess(&self) -> Option<f64> { self.x1 }

    pub(crate) fn require_bracket(&self, algorithm: Algorithm) -> Result<(f64, f64), SolveError> {
        self.bracket.ok_or(SolveError::MissingInput { algorithm, input: ProblemInput::Bracket })
    }

    /// `(x0, x1)` if both guesses were given, else the bracket endpoints.
    pub(crate) fn require_guess_pair(&self, algorithm: Algorithm) -> Result<(f64, f64), SolveError> {
        match (self.x0, self.x1, self.bracket) {
            (Some(x0), Some(x1), _) => Ok((x0, x1)),
            (_, _, Some(ab))        => Ok(ab),
            _ => Err(SolveError::MissingInput { algorithm, input: ProblemInput::InitialGuess }),
        }
    }

    /// `x0` if given, else the bracket midpoint.
    pub(crate) fn require_guess(&self, algorithm: Algorithm) -> Result<f64, SolveError> {
        match (self.x0, self.bracket) {
            (Some(x0), _)     => Ok(x0),
            (None, Some((a, b))) => Ok(super::bracket::midpoint(a, b)),
            (None, None) => Err(SolveError::MissingInput { algorithm, input: ProblemInput::InitialGuess }),
        }
    }
}

impl std::fmt::Debug for RootProblem<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RootProblem")
            .field("derivative", &self.derivative.is_some())
            .field("bracket", &self.bracket)
            .field("x0", &self.x0)
            .field("x1", &self.x1)
            .finish_non_exhaustive()
    }
}


/// Object-safe solver interface.
pub trait RootFinder: Send + Sync {
    fn algorithm(&self) -> Algorithm;

    fn find_root(&self, problem: &RootProblem<'_>) -> Result<RootFindingReport, SolveError>;
}


/// A root-finder type that can be registered.
///
/// Mirrors what a registry needs from a handler class: a name, an optional
/// explicit display name, and a way to build an instance.
pub trait RootFinderClass: RootFinder + Sized + 'static {
    /// Label shown instead of the one derived from the type name.
    const DISPLAY_NAME: Option<&'static str> = None;

    fn from_cfg(cfg: SolverCfg) -> Self;

    /// Bare type name, e.g. `"NewtonRaphsonMethod"`.
    fn type_name() -> &'static str {
        short_type_name::<Self>()
    }
}


/// Last path segment of [`std::any::type_name`], generics dropped.
///
/// `std::any::type_name` is diagnostic-quality; types whose name matters for
/// lookups can pin it through [`RootFinderClass::type_name`].
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let path = full.split('<').next().unwrap_or(full);
    path.rsplit("::").next().unwrap_or(path)
}
