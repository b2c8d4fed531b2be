use super::algorithms::{Algorithm, CompoundFamily};
use super::bracket::{midpoint, opposite_sign, same_sign, valid_bounds};
use super::config::SolverCfg;
use super::errors::{RootFindingError, SolveError, ToleranceError};
use super::eval::Evaluator;
use super::finder::{RootFinder, RootFinderClass, RootProblem};
use super::report::{RootFindingReport, Stencil, ToleranceSatisfied};
use super::tolerances::{bisection_bound, step_tolerance, width_tolerance};
use thiserror::Error;

const ALGORITHM: Algorithm = Algorithm::Compound(CompoundFamily::Brent);


#[derive(Debug, Error)]
pub enum BrentError {
    #[error(transparent)]
    RootFinding(#[from] RootFindingError),

    #[error(transparent)]
    Tolerance(#[from] ToleranceError),

    #[error("invalid bounds: a and b must be finite with a < b. got [{a}, {b}]")]
    InvalidBounds { a: f64, b: f64 },

    #[error("no sign change on [{a}, {b}]: sign(f(a)) = sign(f(b))")]
    NoSignChange { a: f64, b: f64 },
}


#[inline]
fn near_equal(x: f64, y: f64) -> bool {
    (x - y).abs() <= 8.0 * f64::EPSILON * (x.abs() + y.abs()).max(1.0)
}

/// Inverse quadratic interpolation through three distinct points.
/// `None` on any degeneracy (repeated abscissae or ordinates, zero denominator).
#[inline]
fn iqi((a, fa): (f64, f64), (b, fb): (f64, f64), (c, fc): (f64, f64)) -> Option<f64> {
    if near_equal(a, b) || near_equal(a, c) || near_equal(b, c) {
        return None;
    }
    if near_equal(fa, fb) || near_equal(fa, fc) || near_equal(fb, fc) {
        return None;
    }

    let q = fa / fc;
    let r = fb / fc;
    let t = fb / fa;

    let p  = t * ((c - b) * q * (q - r) - (b - a) * (r - 1.0));
    let qd = (q - 1.0) * (r - 1.0) * (t - 1.0);
    if !p.is_finite() || !qd.is_finite() || qd == 0.0 {
        return None;
    }

    let s = b + p / qd;
    s.is_finite().then_some(s)
}

/// Secant through `(b, fb)` and `(c, fc)`.
#[inline]
fn secant_step((b, fb): (f64, f64), (c, fc): (f64, f64)) -> Option<f64> {
    if near_equal(fb, fc) {
        return None;
    }
    let s = (b * fc - c * fb) / (fc - fb);
    s.is_finite().then_some(s)
}

/// `s` lies strictly between `(3a + b) / 4` and `b`.
#[inline]
fn interior_window_ok(a: f64, b: f64, s: f64) -> bool {
    let lower = (3.0 * a + b) / 4.0;
    if lower < b { s > lower && s < b } else { s < lower && s > b }
}


/// Finds a root of `func` on `[a, b]` with
/// [Brent's method](https://en.wikipedia.org/wiki/Brent%27s_method).
///
/// Each step tries inverse quadratic interpolation, then a secant step, and
/// falls back to bisection whenever the candidate leaves the interior window
/// or fails to shrink fast enough. `b` is kept as the best point
/// (`|f(b)| <= |f(a)|`).
///
/// # Errors
/// - [`BrentError::InvalidBounds`] : `a`/`b` non-finite or `a >= b`
/// - [`BrentError::NoSignChange`]  : `f(a)` and `f(b)` share a sign
/// - [`RootFindingError::NonFiniteEvaluation`] via [`BrentError::RootFinding`]
///
/// # Notes
/// - With `max_iter` unset the cap is the pure-bisection bound down to
///   `abs_x + rel_x`, capped at the global fallback.
pub fn brent<F>(
    func: F,
    mut a: f64,
    mut b: f64,
    cfg: SolverCfg
) -> Result<RootFindingReport, BrentError>
where F: FnMut(f64) -> f64 {

    if !valid_bounds(a, b) {
        return Err(BrentError::InvalidBounds { a, b });
    }

    let abs_fx = cfg.abs_fx();
    let mut f  = Evaluator::new(func);

    let mut fa = f.eval(a)?;
    if fa.abs() <= abs_fx {
        return Ok(RootFindingReport::converged(
            ALGORITHM, ToleranceSatisfied::AbsFxReached, (a, fa), 0, f.evals(), Stencil::bracket(a, b),
        ));
    }
    let mut fb = f.eval(b)?;
    if fb.abs() <= abs_fx {
        return Ok(RootFindingReport::converged(
            ALGORITHM, ToleranceSatisfied::AbsFxReached, (b, fb), 0, f.evals(), Stencil::bracket(a, b),
        ));
    }

    if same_sign(fa, fb) {
        return Err(BrentError::NoSignChange { a, b });
    }

    let mut width_tol = width_tolerance(a, b, &cfg)?;
    let num_iter = ALGORITHM.resolve_max_iter(&cfg, Some(bisection_bound(a, b, &cfg)?))?;

    if (b - a).abs() <= width_tol {
        let m  = midpoint(a, b);
        let fm = f.eval(m)?;
        return Ok(RootFindingReport::converged(
            ALGORITHM, ToleranceSatisfied::WidthTolReached, (m, fm), 0, f.evals(), Stencil::bracket(a, b),
        ));
    }

    if fa.abs() < fb.abs() {
        std::mem::swap(&mut a, &mut b);
        std::mem::swap(&mut fa, &mut fb);
    }

    let (mut c, mut fc) = (a, fa);
    let mut d = c;
    let mut bisected = true;

    for iter in 1..=num_iter {
        let mut s = iqi((a, fa), (b, fb), (c, fc))
            .or_else(|| secant_step((b, fb), (c, fc)))
            .unwrap_or_else(|| midpoint(a, b));

        let step_bc = (b - c).abs();
        let step_cd = (c - d).abs();
        let reject = !interior_window_ok(a, b, s)
            || ( bisected && (s - b).abs() >= 0.5 * step_bc)
            || (!bisected && (s - b).abs() >= 0.5 * step_cd)
            || ( bisected && step_bc < width_tol)
            || (!bisected && step_cd < step_tolerance(c, d, &cfg)?);

        if reject {
            s = midpoint(a, b);
        }
        bisected = reject;

        let fs = f.eval(s)?;
        d = c;
        (c, fc) = (b, fb);

        if opposite_sign(fa, fs) {
            (b, fb) = (s, fs);
        } else {
            (a, fa) = (s, fs);
        }

        if fa.abs() < fb.abs() {
            std::mem::swap(&mut a, &mut b);
            std::mem::swap(&mut fa, &mut fb);
        }

        if fb.abs() <= abs_fx {
            return Ok(RootFindingReport::converged(
                ALGORITHM, ToleranceSatisfied::AbsFxReached, (b, fb), iter, f.evals(), Stencil::bracket(a, b),
            ));
        }

        width_tol = width_tolerance(a, b, &cfg)?;
        if (b - a).abs() <= width_tol {
            return Ok(RootFindingReport::converged(
                ALGORITHM, ToleranceSatisfied::WidthTolReached, (b, fb), iter, f.evals(), Stencil::bracket(a, b),
            ));
        }
    }

    Ok(RootFindingReport::exhausted(ALGORITHM, (b, fb), num_iter, f.evals(), Stencil::bracket(a, b)))
}


/// Registry handler for [`brent`].
#[derive(Debug, Copy, Clone, Default)]
pub struct BrentMethod {
    cfg: SolverCfg,
}

impl BrentMethod {
    pub fn new(cfg: SolverCfg) -> Self { Self { cfg } }
}

impl RootFinder for BrentMethod {
    fn algorithm(&self) -> Algorithm { ALGORITHM }

    #[tracing::instrument(level = "debug", skip_all, fields(algorithm = %ALGORITHM))]
    fn find_root(&self, problem: &RootProblem<'_>) -> Result<RootFindingReport, SolveError> {
        let (a, b) = problem.require_bracket(ALGORITHM)?;
        let report = brent(problem.func(), a, b, self.cfg)?;
        tracing::debug!(%report, "brent finished");
        Ok(report)
    }
}

impl RootFinderClass for BrentMethod {
    const DISPLAY_NAME: Option<&'static str> = Some("Brent's Method");

    fn from_cfg(cfg: SolverCfg) -> Self { Self::new(cfg) }
}
