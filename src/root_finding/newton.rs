//! Newton-Raphson method

use super::algorithms::{Algorithm, OpenFamily};
use super::config::{SolverCfg, impl_common_cfg};
use super::errors::{RootFindingError, SolveError, ToleranceError};
use super::eval::Evaluator;
use super::tolerances::step_tolerance;
use super::finder::{RootFinder, RootFinderClass, RootProblem};
use super::report::{RootFindingReport, Stencil, TerminationReason, ToleranceSatisfied};
use thiserror::Error;

const ALGORITHM: Algorithm = Algorithm::Open(OpenFamily::Newton);


#[derive(Debug, Error)]
pub enum NewtonError {
    #[error(transparent)]
    RootFinding(#[from] RootFindingError),

    #[error(transparent)]
    Tolerance(#[from] ToleranceError),

    #[error("invalid initial guess: x0={x0} must be finite")]
    InvalidGuess { x0: f64 },

    #[error("invalid max step, must be > 0 or f64::INFINITY. got {step}")]
    InvalidMaxStep { step: f64 },

    #[error("step non-finite at x={x}, step={step}; x + step undefined")]
    StepNotFinite { x: f64, step: f64 },

    #[error("step non-finite from vanishing derivative at x={x}, f'(x)={dfx}")]
    DerivativeTooSmall { x: f64, dfx: f64 },

    #[error("derivative non-finite at x={x}, f'(x)={dfx}")]
    DerivativeNotFinite { x: f64, dfx: f64 },

    #[error("finite-difference step not representable at x={x}, h={h}; \
             try smaller |x| scaling or analytic derivative")]
    FiniteDifferenceStepUnrepresentable { x: f64, h: f64 }
}


/// Newton configuration.
///
/// # Fields
/// - `common`   : [`SolverCfg`]; `max_iter` defaults to 50
/// - `max_step` : cap on `|x_{k+1} - x_k|`, unbounded by default
#[derive(Debug, Copy, Clone)]
pub struct NewtonCfg {
    common: SolverCfg,
    max_step: f64
}

impl Default for NewtonCfg {
    fn default() -> Self {
        Self { common: SolverCfg::new(), max_step: f64::INFINITY }
    }
}

impl NewtonCfg {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    pub fn set_max_step(mut self, v: f64) -> Result<Self, NewtonError> {
        if v.is_nan() || v <= 0.0 {
            return Err(NewtonError::InvalidMaxStep { step: v });
        }
        self.max_step = v;
        Ok(self)
    }

    pub fn max_step(&self) -> f64 { self.max_step }
}
impl_common_cfg!(NewtonCfg);

impl From<SolverCfg> for NewtonCfg {
    fn from(common: SolverCfg) -> Self {
        Self { common, max_step: f64::INFINITY }
    }
}


/// Central difference `(f(x+h) - f(x-h)) / 2h` with `h = eps^{1/3} max(|x|, 1)`.
///
/// If `x ± h` is not representable or collapses onto `x`, the neighbouring
/// floats of `x` are used instead.
fn finite_difference<F>(f: &mut Evaluator<F>, x: f64) -> Result<f64, NewtonError>
where F: FnMut(f64) -> f64 {
    let mut h  = f64::EPSILON.cbrt() * x.abs().max(1.0);
    let mut xp = x + h;
    let mut xm = x - h;

    let collapsed = |xp: f64, xm: f64| !xp.is_finite() || !xm.is_finite() || xp == x || xm == x;
    if collapsed(xp, xm) {
        xp = next_up(x);
        xm = next_down(x);
        h  = 0.5 * (xp - xm);
        if collapsed(xp, xm) {
            return Err(NewtonError::FiniteDifferenceStepUnrepresentable { x, h });
        }
    }

    let dfx = (f.eval(xp)? - f.eval(xm)?) / (2.0 * h);
    if !dfx.is_finite() {
        return Err(NewtonError::DerivativeNotFinite { x, dfx });
    }

    Ok(dfx)
}

#[inline]
fn next_up(x: f64) -> f64 {
    if x.is_nan() || x == f64::INFINITY { return x; }
    if x == 0.0 { return f64::from_bits(1); }
    let bits = x.to_bits();
    f64::from_bits(if x > 0.0 { bits + 1 } else { bits - 1 })
}

#[inline]
fn next_down(x: f64) -> f64 {
    -next_up(-x)
}


/// Finds a root of `func` with the
/// [Newton–Raphson method](https://en.wikipedia.org/wiki/Newton%27s_method).
///
/// # Arguments
/// - `dfunc` : analytic derivative; `None` uses a central finite difference
/// - `x0`    : finite initial guess
///
/// # Behavior
/// - raw step `-f/f'`; non-finite → [`NewtonError::DerivativeTooSmall`]
/// - step clipped to `max_step`
/// - `x + step == x` ends with [`TerminationReason::MachinePrecisionReached`]
/// - stencil is the iterate the last step was taken from
///
/// # Errors
/// - [`NewtonError::InvalidGuess`], [`NewtonError::StepNotFinite`],
///   [`NewtonError::DerivativeTooSmall`], [`NewtonError::DerivativeNotFinite`],
///   [`NewtonError::FiniteDifferenceStepUnrepresentable`]
/// - [`RootFindingError::NonFiniteEvaluation`] via [`NewtonError::RootFinding`]
///
/// # Notes
/// - Evaluation count includes derivative calls (two `f` calls per finite
///   difference).
pub fn newton<F, G>(
    func: F,
    mut dfunc: Option<G>,
    x0: f64,
    cfg: NewtonCfg,
) -> Result<RootFindingReport, NewtonError>
where
    F: FnMut(f64) -> f64,
    G: FnMut(f64) -> f64
{
    if !x0.is_finite() {
        return Err(NewtonError::InvalidGuess { x0 });
    }

    let common   = cfg.common;
    let abs_fx   = common.abs_fx();
    let num_iter = ALGORITHM.resolve_max_iter(&common, None)?;

    let mut f = Evaluator::new(func);

    let mut x  = x0;
    let mut fx = f.eval(x)?;
    if fx.abs() <= abs_fx {
        return Ok(RootFindingReport::converged(
            ALGORITHM, ToleranceSatisfied::AbsFxReached, (x, fx), 0, f.evals(), Stencil::singleton(x),
        ));
    }

    let mut prev_x = x;
    for iter in 1..=num_iter {
        let dfx = match dfunc.as_mut() {
            Some(df) => {
                f.count_external();
                let dfx = df(x);
                if !dfx.is_finite() {
                    return Err(NewtonError::DerivativeNotFinite { x, dfx });
                }
                dfx
            }
            None => finite_difference(&mut f, x)?,
        };

        let mut step = -fx / dfx;
        if !step.is_finite() {
            return Err(NewtonError::DerivativeTooSmall { x, dfx });
        }
        if step.abs() > cfg.max_step {
            step = cfg.max_step.copysign(step);
        }

        let x_next = x + step;
        if !x_next.is_finite() {
            return Err(NewtonError::StepNotFinite { x, step });
        }

        if x_next == x {
            return Ok(RootFindingReport {
                termination_reason: TerminationReason::MachinePrecisionReached,
                ..RootFindingReport::converged(
                    ALGORITHM, ToleranceSatisfied::StepSizeReached, (x, fx), iter, f.evals(), Stencil::singleton(x),
                )
            });
        }

        let fx_next = f.eval(x_next)?;
        if fx_next.abs() <= abs_fx {
            return Ok(RootFindingReport::converged(
                ALGORITHM, ToleranceSatisfied::AbsFxReached, (x_next, fx_next), iter, f.evals(), Stencil::singleton(x),
            ));
        }

        if (x_next - x).abs() <= step_tolerance(x, x_next, &common)? {
            return Ok(RootFindingReport::converged(
                ALGORITHM, ToleranceSatisfied::StepSizeReached, (x_next, fx_next), iter, f.evals(), Stencil::singleton(x),
            ));
        }

        prev_x = x;
        x  = x_next;
        fx = fx_next;
    }

    Ok(RootFindingReport::exhausted(ALGORITHM, (x, fx), num_iter, f.evals(), Stencil::singleton(prev_x)))
}


/// Registry handler for [`newton`].
///
/// Uses the problem's derivative when one is supplied.
#[derive(Debug, Copy, Clone, Default)]
pub struct NewtonRaphsonMethod {
    cfg: NewtonCfg,
}

impl NewtonRaphsonMethod {
    pub fn new(cfg: NewtonCfg) -> Self { Self { cfg } }
}

impl RootFinder for NewtonRaphsonMethod {
    fn algorithm(&self) -> Algorithm { ALGORITHM }

    #[tracing::instrument(level = "debug", skip_all, fields(algorithm = %ALGORITHM))]
    fn find_root(&self, problem: &RootProblem<'_>) -> Result<RootFindingReport, SolveError> {
        let x0 = problem.require_guess(ALGORITHM)?;
        let report = newton(problem.func(), problem.derivative(), x0, self.cfg)?;
        tracing::debug!(%report, analytic = problem.derivative().is_some(), "newton finished");
        Ok(report)
    }
}

impl RootFinderClass for NewtonRaphsonMethod {
    fn from_cfg(cfg: SolverCfg) -> Self { Self::new(cfg.into()) }
}
