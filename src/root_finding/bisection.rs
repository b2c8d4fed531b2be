use super::algorithms::{Algorithm, BracketFamily};
use super::bracket::{midpoint, opposite_sign, same_sign, valid_bounds};
use super::config::SolverCfg;
use super::errors::{RootFindingError, SolveError, ToleranceError};
use super::eval::Evaluator;
use super::finder::{RootFinder, RootFinderClass, RootProblem};
use super::report::{RootFindingReport, Stencil, ToleranceSatisfied};
use super::tolerances::{bisection_bound, width_tolerance};
use thiserror::Error;

const ALGORITHM: Algorithm = Algorithm::Bracket(BracketFamily::Bisection);


#[derive(Debug, Error)]
pub enum BisectionError {
    #[error(transparent)]
    RootFinding(#[from] RootFindingError),

    #[error(transparent)]
    Tolerance(#[from] ToleranceError),

    #[error("no sign change on [{a}, {b}]: sign(f(a)) = sign(f(b))")]
    NoSignChange  { a: f64, b: f64 },

    #[error("invalid bounds: a and b must be finite with a < b. got [{a}, {b}]")]
    InvalidBounds { a: f64, b: f64 },
}


/// Finds a root of `func` on `[a, b]` by the
/// [bisection method](https://en.wikipedia.org/wiki/Bisection_method).
///
/// # Arguments
/// ┌ `func` - continuous on `[a, b]` with `f(a)`, `f(b)` of opposite sign
/// ├ `a`    - finite lower bound, `a < b`
/// ├ `b`    - finite upper bound
/// └ `cfg`  - [`SolverCfg`]; with `max_iter` unset, the cap is the number of
///            halvings needed to reach the smallest width tolerance, `abs_x + rel_x`
///
/// # Returns
/// [`RootFindingReport`] with a [`Stencil::Bracket`] of the final interval.
/// On width success the midpoint is reported, costing one extra evaluation.
///
/// # Errors
/// ┌ [`BisectionError::InvalidBounds`] - `a`/`b` non-finite or `a >= b`
/// ├ [`BisectionError::NoSignChange`]  - `f(a)` and `f(b)` share a sign
/// ├ [`RootFindingError::NonFiniteEvaluation`] via [`BisectionError::RootFinding`]
/// └ [`ToleranceError::InvalidTolerance`]       via [`BisectionError::Tolerance`]
///
/// # Warning
/// └ A sign change is required even when `b - a` already meets the tolerance.
pub fn bisection<F>(
    func: F,
    mut a: f64,
    mut b: f64,
    cfg: SolverCfg
) -> Result<RootFindingReport, BisectionError>
where F: FnMut(f64) -> f64 {

    if !valid_bounds(a, b) {
        return Err(BisectionError::InvalidBounds { a, b });
    }

    let abs_fx    = cfg.abs_fx();
    let width_tol = width_tolerance(a, b, &cfg)?;
    let num_iter  = ALGORITHM.resolve_max_iter(&cfg, Some(bisection_bound(a, b, &cfg)?))?;

    let mut f = Evaluator::new(func);

    // endpoints already roots
    let mut fa = f.eval(a)?;
    if fa.abs() <= abs_fx {
        return Ok(RootFindingReport::converged(
            ALGORITHM, ToleranceSatisfied::AbsFxReached, (a, fa), 0, f.evals(), Stencil::bracket(a, b),
        ));
    }
    let fb = f.eval(b)?;
    if fb.abs() <= abs_fx {
        return Ok(RootFindingReport::converged(
            ALGORITHM, ToleranceSatisfied::AbsFxReached, (b, fb), 0, f.evals(), Stencil::bracket(a, b),
        ));
    }

    if same_sign(fa, fb) {
        return Err(BisectionError::NoSignChange { a, b });
    }

    if b - a <= width_tol {
        let m  = midpoint(a, b);
        let fm = f.eval(m)?;
        return Ok(RootFindingReport::converged(
            ALGORITHM, ToleranceSatisfied::WidthTolReached, (m, fm), 0, f.evals(), Stencil::bracket(a, b),
        ));
    }

    let mut best = (a, fa);
    for iter in 1..=num_iter {
        let m  = midpoint(a, b);
        let fm = f.eval(m)?;
        best = (m, fm);

        if fm.abs() <= abs_fx {
            return Ok(RootFindingReport::converged(
                ALGORITHM, ToleranceSatisfied::AbsFxReached, best, iter, f.evals(), Stencil::bracket(a, b),
            ));
        }

        if opposite_sign(fa, fm) {
            b = m;
        } else {
            a  = m;
            fa = fm;
        }

        if b - a <= width_tolerance(a, b, &cfg)? {
            let m  = midpoint(a, b);
            let fm = f.eval(m)?;
            return Ok(RootFindingReport::converged(
                ALGORITHM, ToleranceSatisfied::WidthTolReached, (m, fm), iter, f.evals(), Stencil::bracket(a, b),
            ));
        }
    }

    Ok(RootFindingReport::exhausted(ALGORITHM, best, num_iter, f.evals(), Stencil::bracket(a, b)))
}


/// Registry handler for [`bisection`].
#[derive(Debug, Copy, Clone, Default)]
pub struct BisectionMethod {
    cfg: SolverCfg,
}

impl BisectionMethod {
    pub fn new(cfg: SolverCfg) -> Self { Self { cfg } }
}

impl RootFinder for BisectionMethod {
    fn algorithm(&self) -> Algorithm { ALGORITHM }

    #[tracing::instrument(level = "debug", skip_all, fields(algorithm = %ALGORITHM))]
    fn find_root(&self, problem: &RootProblem<'_>) -> Result<RootFindingReport, SolveError> {
        let (a, b) = problem.require_bracket(ALGORITHM)?;
        let report = bisection(problem.func(), a, b, self.cfg)?;
        tracing::debug!(%report, "bisection finished");
        Ok(report)
    }
}

impl RootFinderClass for BisectionMethod {
    fn from_cfg(cfg: SolverCfg) -> Self { Self::new(cfg) }
}
