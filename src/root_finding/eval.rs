//! Counted, finite-checked function evaluation shared by all solvers.

use super::errors::RootFindingError;


/// Wraps `f`, counting calls and rejecting NaN/inf results.
pub(crate) struct Evaluator<F> {
    func: F,
    evals: usize,
}

impl<F> Evaluator<F> where F: FnMut(f64) -> f64 {
    pub fn new(func: F) -> Self {
        Self { func, evals: 0 }
    }

    #[inline]
    pub fn eval(&mut self, x: f64) -> Result<f64, RootFindingError> {
        self.evals += 1;
        let fx = (self.func)(x);
        if !fx.is_finite() {
            return Err(RootFindingError::NonFiniteEvaluation { x, fx });
        }

        Ok(fx)
    }

    /// Counts an evaluation made outside [`Evaluator::eval`] (e.g. `f'(x)`).
    #[inline]
    pub fn count_external(&mut self) {
        self.evals += 1;
    }

    #[inline]
    pub fn evals(&self) -> usize {
        self.evals
    }
}
