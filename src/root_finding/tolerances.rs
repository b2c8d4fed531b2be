//! Stopping tolerances and iteration caps.
//!
//! Both tolerances are `abs_x + rel_x * scale`, recomputed every iteration
//! from the current points:
//! - width : `scale = max(|a|, |b|, 1)`, bracketing and compound methods
//! - step  : `scale = max(|x1|, |x2|, 1)`, open and compound methods

use super::algorithms::{Algorithm, GLOBAL_MAX_ITER_FALLBACK};
use super::config::SolverCfg;
use super::errors::{RootFindingError, ToleranceError};


#[inline]
fn scaled(scale: f64, cfg: &SolverCfg) -> Result<f64, ToleranceError> {
    let tol = cfg.abs_x() + cfg.rel_x() * scale.max(1.0);
    if !tol.is_finite() || tol <= 0.0 {
        return Err(ToleranceError::InvalidTolerance { got: tol });
    }

    Ok(tol)
}

/// # Errors
/// - [`ToleranceError::InvalidTolerance`] if the result is non-finite or <= 0
pub(crate) fn width_tolerance(a: f64, b: f64, cfg: &SolverCfg) -> Result<f64, ToleranceError> {
    scaled(a.abs().max(b.abs()), cfg)
}

pub(crate) fn step_tolerance(x1: f64, x2: f64, cfg: &SolverCfg) -> Result<f64, ToleranceError> {
    scaled(x1.abs().max(x2.abs()), cfg)
}


impl Algorithm {
    /// Iteration cap for a run.
    ///
    /// ├ configured `max_iter` wins
    /// ├ then [`Algorithm::default_max_iter`]
    /// └ then `bracket_bound` (theoretical, bracketing methods only), capped at
    ///   [`GLOBAL_MAX_ITER_FALLBACK`]
    pub(crate) fn resolve_max_iter(
        &self,
        cfg: &SolverCfg,
        bracket_bound: Option<usize>
    ) -> Result<usize, RootFindingError> {
        match cfg.max_iter() {
            Some(0) => Err(RootFindingError::InvalidMaxIter { got: 0 }),
            Some(n) => Ok(n),
            None    => Ok(self
                .default_max_iter()
                .or_else(|| bracket_bound.map(|n| n.min(GLOBAL_MAX_ITER_FALLBACK)))
                .unwrap_or(GLOBAL_MAX_ITER_FALLBACK)),
        }
    }
}


/// Number of halvings needed to shrink `[a, b]` below `width_tol`.
fn theoretical_iter(a: f64, b: f64, width_tol: f64) -> Result<usize, ToleranceError> {
    if !(width_tol.is_finite() && width_tol > 0.0) {
        return Err(ToleranceError::InvalidTolerance { got: width_tol });
    }
    let w0 = (b - a).abs();
    if w0 <= width_tol {
        return Ok(0);
    }

    Ok((w0 / width_tol).log2().ceil() as usize)
}

/// Halvings of `[a, b]` guaranteed to meet the width tolerance wherever the
/// bracket ends up.
///
/// The width tolerance shrinks with `max(|a|, |b|)` but never below
/// `abs_x + rel_x`, so that floor bounds the count.
pub(crate) fn bisection_bound(a: f64, b: f64, cfg: &SolverCfg) -> Result<usize, ToleranceError> {
    theoretical_iter(a, b, scaled(0.0, cfg)?)
}
