use super::algorithms::{Algorithm, OpenFamily};
use super::bracket::secant_intercept;
use super::config::SolverCfg;
use super::errors::{RootFindingError, SolveError, ToleranceError};
use super::eval::Evaluator;
use super::tolerances::step_tolerance;
use super::finder::{RootFinder, RootFinderClass, RootProblem};
use super::report::{RootFindingReport, Stencil, ToleranceSatisfied};
use thiserror::Error;

const ALGORITHM: Algorithm = Algorithm::Open(OpenFamily::Secant);


#[derive(Debug, Error)]
pub enum SecantError {
    #[error(transparent)]
    RootFinding(#[from] RootFindingError),

    #[error(transparent)]
    Tolerance(#[from] ToleranceError),

    #[error("invalid initial guesses: x0 and x1 must be finite and distinct. got {x0}, {x1}")]
    InvalidGuess { x0: f64, x1: f64 },
}


/// Finds a root of `func` by the
/// [secant method](https://en.wikipedia.org/wiki/Secant_method).
///
/// # Arguments
/// - `x0`, `x1` : finite, distinct starting points
/// - `cfg`      : [`SolverCfg`]; `max_iter` defaults to 100
///
/// # Behavior
/// - Update: `x_{k+1} = x_k - f(x_k) (x_k - x_{k-1}) / (f(x_k) - f(x_{k-1}))`.
///   When the denominator collapses, a half step toward `x_{k-1}` is taken.
/// - Stops on `|f(x)| <= abs_fx` or `|x_{k+1} - x_k| <=` step tolerance.
/// - Stencil holds `{x_k, x_{k-1}}` that produced the last step; on an
///   immediate `|f|` hit it is the single guess that hit.
///
/// # Errors
/// - [`SecantError::InvalidGuess`]
/// - [`RootFindingError::NonFiniteEvaluation`] via [`SecantError::RootFinding`]
///
/// # Warning
/// - Local method; poor guesses may diverge. Prefer a bracketing method when
///   a sign change is known.
pub fn secant<F>(
    func: F,
    x0: f64,
    x1: f64,
    cfg: SolverCfg
) -> Result<RootFindingReport, SecantError>
where F: FnMut(f64) -> f64 {

    if !(x0.is_finite() && x1.is_finite()) || x0 == x1 {
        return Err(SecantError::InvalidGuess { x0, x1 });
    }

    let abs_fx   = cfg.abs_fx();
    let num_iter = ALGORITHM.resolve_max_iter(&cfg, None)?;

    let mut f = Evaluator::new(func);

    let fx0 = f.eval(x0)?;
    if fx0.abs() <= abs_fx {
        return Ok(RootFindingReport::converged(
            ALGORITHM, ToleranceSatisfied::AbsFxReached, (x0, fx0), 0, f.evals(), Stencil::singleton(x0),
        ));
    }
    let fx1 = f.eval(x1)?;
    if fx1.abs() <= abs_fx {
        return Ok(RootFindingReport::converged(
            ALGORITHM, ToleranceSatisfied::AbsFxReached, (x1, fx1), 0, f.evals(), Stencil::singleton(x1),
        ));
    }

    if (x1 - x0).abs() <= step_tolerance(x0, x1, &cfg)? {
        return Ok(RootFindingReport::converged(
            ALGORITHM, ToleranceSatisfied::StepSizeReached, (x1, fx1), 0, f.evals(), Stencil::doubleton(x0, x1),
        ));
    }

    // (x_k, f_k) and (x_{k-1}, f_{k-1})
    let (mut xk, mut fk) = (x1, fx1);
    let (mut xp, mut fp) = (x0, fx0);
    for iter in 1..=num_iter {
        let x_next = secant_intercept((xk, fk), (xp, fp))
            .unwrap_or_else(|| xk - (xk - xp) * 0.5);
        let f_next = f.eval(x_next)?;
        let stencil = Stencil::doubleton(xk, xp);

        if f_next.abs() <= abs_fx {
            return Ok(RootFindingReport::converged(
                ALGORITHM, ToleranceSatisfied::AbsFxReached, (x_next, f_next), iter, f.evals(), stencil,
            ));
        }

        if (x_next - xk).abs() <= step_tolerance(x_next, xk, &cfg)? {
            return Ok(RootFindingReport::converged(
                ALGORITHM, ToleranceSatisfied::StepSizeReached, (x_next, f_next), iter, f.evals(), stencil,
            ));
        }

        (xp, fp) = (xk, fk);
        (xk, fk) = (x_next, f_next);
    }

    Ok(RootFindingReport::exhausted(ALGORITHM, (xk, fk), num_iter, f.evals(), Stencil::doubleton(xk, xp)))
}


/// Registry handler for [`secant`].
#[derive(Debug, Copy, Clone, Default)]
pub struct SecantMethod {
    cfg: SolverCfg,
}

impl SecantMethod {
    pub fn new(cfg: SolverCfg) -> Self { Self { cfg } }
}

impl RootFinder for SecantMethod {
    fn algorithm(&self) -> Algorithm { ALGORITHM }

    #[tracing::instrument(level = "debug", skip_all, fields(algorithm = %ALGORITHM))]
    fn find_root(&self, problem: &RootProblem<'_>) -> Result<RootFindingReport, SolveError> {
        let (x0, x1) = problem.require_guess_pair(ALGORITHM)?;
        let report = secant(problem.func(), x0, x1, self.cfg)?;
        tracing::debug!(%report, "secant finished");
        Ok(report)
    }
}

impl RootFinderClass for SecantMethod {
    fn from_cfg(cfg: SolverCfg) -> Self { Self::new(cfg) }
}
