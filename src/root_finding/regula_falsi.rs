use super::algorithms::{Algorithm, BracketFamily, RegulaFalsiVariant};
use super::bracket::{midpoint, opposite_sign, same_sign, secant_intercept, valid_bounds};
use super::config::{SolverCfg, impl_common_cfg};
use super::errors::{RootFindingError, SolveError, ToleranceError};
use super::eval::Evaluator;
use super::tolerances::width_tolerance;
use super::finder::{RootFinder, RootFinderClass, RootProblem};
use super::report::{RootFindingReport, Stencil, ToleranceSatisfied};
use thiserror::Error;


#[derive(Debug, Error)]
pub enum RegulaFalsiError {
    #[error(transparent)]
    RootFinding(#[from] RootFindingError),

    #[error(transparent)]
    Tolerance(#[from] ToleranceError),

    #[error("no sign change on [{a}, {b}]: sign(f(a)) = sign(f(b))")]
    NoSignChange  { a: f64, b: f64 },

    #[error("invalid bounds: a and b must be finite with a < b. got [{a}, {b}]")]
    InvalidBounds { a: f64, b: f64 },
}


/// Regula falsi configuration.
///
/// # Fields
/// - `common`  : [`SolverCfg`] with tolerances and optional `max_iter`
/// - `variant` : [`RegulaFalsiVariant`], [`RegulaFalsiVariant::Illinois`] by default
///
/// # Defaults
/// - With `max_iter` unset the cap is [`Algorithm::default_max_iter`] for the
///   variant (200 pure, 100 otherwise).
#[derive(Debug, Copy, Clone, Default)]
pub struct RegulaFalsiCfg {
    common: SolverCfg,
    variant: RegulaFalsiVariant,
}

impl RegulaFalsiCfg {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn with_variant(mut self, variant: RegulaFalsiVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn variant(&self) -> RegulaFalsiVariant { self.variant }

    pub fn algorithm(&self) -> Algorithm {
        Algorithm::Bracket(BracketFamily::RegulaFalsi(self.variant))
    }
}
impl_common_cfg!(RegulaFalsiCfg);

impl From<SolverCfg> for RegulaFalsiCfg {
    fn from(common: SolverCfg) -> Self {
        Self { common, variant: RegulaFalsiVariant::default() }
    }
}


#[derive(Clone, Copy, PartialEq, Eq)]
enum Side { Left, Right }

/// Rescales the function value of the endpoint that survived a second
/// consecutive update. `f_new` is the value at the new estimate, `f_replaced`
/// the value at the endpoint it replaced.
#[inline]
fn rescale(variant: RegulaFalsiVariant, f_kept: f64, f_new: f64, f_replaced: f64) -> f64 {
    match variant {
        RegulaFalsiVariant::Pure     => f_kept,
        RegulaFalsiVariant::Illinois => f_kept * 0.5,
        RegulaFalsiVariant::Pegasus  => f_kept * f_replaced / (f_replaced + f_new),
        RegulaFalsiVariant::AndersonBjorck => {
            let ratio = 1.0 - f_new / f_replaced;
            if ratio > 0.0 { f_kept * ratio } else { f_kept * 0.5 }
        }
    }
}


/// Finds a root of `func` on `[a, b]` by
/// [false position](https://en.wikipedia.org/wiki/Regula_falsi).
///
/// The next estimate is where the chord through `(a, f(a))` and `(b, f(b))`
/// crosses zero; a degenerate chord falls back to the midpoint. The non-pure
/// variants rescale a retained endpoint so it cannot stall convergence.
///
/// # Errors
/// ┌ [`RegulaFalsiError::InvalidBounds`] - `a`/`b` non-finite or `a >= b`
/// ├ [`RegulaFalsiError::NoSignChange`]  - `f(a)` and `f(b)` share a sign
/// ├ [`RootFindingError::NonFiniteEvaluation`] via [`RegulaFalsiError::RootFinding`]
/// └ [`ToleranceError::InvalidTolerance`]       via [`RegulaFalsiError::Tolerance`]
pub fn regula_falsi<F>(
    func: F,
    mut a: f64,
    mut b: f64,
    cfg: RegulaFalsiCfg
) -> Result<RootFindingReport, RegulaFalsiError>
where F: FnMut(f64) -> f64 {

    if !valid_bounds(a, b) {
        return Err(RegulaFalsiError::InvalidBounds { a, b });
    }

    let algorithm = cfg.algorithm();
    let common    = cfg.common;
    let abs_fx    = common.abs_fx();
    let width_tol = width_tolerance(a, b, &common)?;
    let num_iter  = algorithm.resolve_max_iter(&common, None)?;

    let mut f = Evaluator::new(func);

    let mut fa = f.eval(a)?;
    if fa.abs() <= abs_fx {
        return Ok(RootFindingReport::converged(
            algorithm, ToleranceSatisfied::AbsFxReached, (a, fa), 0, f.evals(), Stencil::bracket(a, b),
        ));
    }
    let mut fb = f.eval(b)?;
    if fb.abs() <= abs_fx {
        return Ok(RootFindingReport::converged(
            algorithm, ToleranceSatisfied::AbsFxReached, (b, fb), 0, f.evals(), Stencil::bracket(a, b),
        ));
    }

    if same_sign(fa, fb) {
        return Err(RegulaFalsiError::NoSignChange { a, b });
    }

    let estimate = |a: f64, fa: f64, b: f64, fb: f64| {
        secant_intercept((a, fa), (b, fb))
            .filter(|x| *x > a && *x < b)
            .unwrap_or_else(|| midpoint(a, b))
    };

    if b - a <= width_tol {
        let x  = estimate(a, fa, b, fb);
        let fx = f.eval(x)?;
        return Ok(RootFindingReport::converged(
            algorithm, ToleranceSatisfied::WidthTolReached, (x, fx), 0, f.evals(), Stencil::bracket(a, b),
        ));
    }

    let variant = cfg.variant;
    let mut last_side: Option<Side> = None;
    let mut best = (a, fa);
    for iter in 1..=num_iter {
        let x  = estimate(a, fa, b, fb);
        let fx = f.eval(x)?;
        best = (x, fx);

        if fx.abs() <= abs_fx {
            return Ok(RootFindingReport::converged(
                algorithm, ToleranceSatisfied::AbsFxReached, best, iter, f.evals(), Stencil::bracket(a, b),
            ));
        }

        if opposite_sign(fa, fx) {
            // root in [a, x]: b is replaced, a retained
            if last_side == Some(Side::Right) {
                fa = rescale(variant, fa, fx, fb);
            }
            b  = x;
            fb = fx;
            last_side = Some(Side::Right);
        } else {
            // root in [x, b]: a is replaced, b retained
            if last_side == Some(Side::Left) {
                fb = rescale(variant, fb, fx, fa);
            }
            a  = x;
            fa = fx;
            last_side = Some(Side::Left);
        }

        if b - a <= width_tolerance(a, b, &common)? {
            let x  = estimate(a, fa, b, fb);
            let fx = f.eval(x)?;
            return Ok(RootFindingReport::converged(
                algorithm, ToleranceSatisfied::WidthTolReached, (x, fx), iter, f.evals(), Stencil::bracket(a, b),
            ));
        }
    }

    Ok(RootFindingReport::exhausted(algorithm, best, num_iter, f.evals(), Stencil::bracket(a, b)))
}


/// Registry handler for [`regula_falsi`].
#[derive(Debug, Copy, Clone, Default)]
pub struct RegulaFalsiMethod {
    cfg: RegulaFalsiCfg,
}

impl RegulaFalsiMethod {
    pub fn new(cfg: RegulaFalsiCfg) -> Self { Self { cfg } }
}

impl RootFinder for RegulaFalsiMethod {
    fn algorithm(&self) -> Algorithm { self.cfg.algorithm() }

    #[tracing::instrument(level = "debug", skip_all, fields(algorithm = %self.cfg.algorithm()))]
    fn find_root(&self, problem: &RootProblem<'_>) -> Result<RootFindingReport, SolveError> {
        let (a, b) = problem.require_bracket(self.algorithm())?;
        let report = regula_falsi(problem.func(), a, b, self.cfg)?;
        tracing::debug!(%report, "regula falsi finished");
        Ok(report)
    }
}

impl RootFinderClass for RegulaFalsiMethod {
    fn from_cfg(cfg: SolverCfg) -> Self { Self::new(cfg.into()) }
}
