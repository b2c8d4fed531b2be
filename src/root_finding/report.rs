//! [`RootFindingReport`], the success value of every solver.

use super::algorithms::Algorithm;


/// Why a solver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    ToleranceReached,
    IterationLimit,
    MachinePrecisionReached,
}


/// Which stopping test fired.
/// ├ [`ToleranceSatisfied::AbsFxReached`]        : |f(x)| <= abs_fx (all methods)
/// ├ [`ToleranceSatisfied::WidthTolReached`]     : bracket width <= width tolerance
/// ├ [`ToleranceSatisfied::StepSizeReached`]     : |x_{k+1} - x_k| <= step tolerance
/// └ [`ToleranceSatisfied::ToleranceNotReached`] : paired with [`TerminationReason::IterationLimit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToleranceSatisfied {
    AbsFxReached,
    WidthTolReached,
    StepSizeReached,
    ToleranceNotReached
}


/// Points behind the final estimate.
/// - [`Stencil::Bracket`] : final `[left, right]` interval
/// - [`Stencil::Open`]    : last iterates fed to the update formula
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Stencil {
    Bracket { bounds: [f64; 2] },
    Open    { x: [f64; 3], len: usize },
}

impl Stencil {
    pub fn stencil(&self) -> &[f64] {
        match self {
            Stencil::Bracket { bounds } => &bounds[..],
            Stencil::Open { x, len }    => &x[..*len],
        }
    }
    pub fn bracket(a: f64, b: f64) -> Self {
        Stencil::Bracket { bounds: [a.min(b), a.max(b)] }
    }
    pub fn singleton(x: f64) -> Self {
        Stencil::Open { x: [x, 0.0, 0.0], len: 1 }
    }
    pub fn doubleton(x1: f64, x2: f64) -> Self {
        Stencil::Open { x: [x1, x2, 0.0], len: 2 }
    }
}


/// Outcome of a successful solve.
///
/// - `root`, `f_root`      : best estimate and its residual
/// - `iterations`          : update steps taken (0 on early exit)
/// - `evaluations`         : calls to `f` and, for newton, `f'`
/// - `termination_reason`  : see [`TerminationReason`]
/// - `tolerance_satisfied` : see [`ToleranceSatisfied`]
/// - `stencil`             : see [`Stencil`]
/// - `algorithm_name`      : e.g. `"bisection"`
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RootFindingReport {
    pub root                : f64,
    pub f_root              : f64,
    pub iterations          : usize,
    pub evaluations         : usize,
    pub termination_reason  : TerminationReason,
    pub tolerance_satisfied : ToleranceSatisfied,
    pub stencil             : Stencil,
    pub algorithm_name      : &'static str,
}

impl RootFindingReport {
    /// A stopping test fired.
    pub(crate) fn converged(
        algorithm: Algorithm,
        satisfied: ToleranceSatisfied,
        (root, f_root): (f64, f64),
        iterations: usize,
        evaluations: usize,
        stencil: Stencil,
    ) -> Self {
        Self {
            root,
            f_root,
            iterations,
            evaluations,
            termination_reason  : TerminationReason::ToleranceReached,
            tolerance_satisfied : satisfied,
            stencil,
            algorithm_name      : algorithm.algorithm_name(),
        }
    }

    /// Ran out of iterations.
    pub(crate) fn exhausted(
        algorithm: Algorithm,
        (root, f_root): (f64, f64),
        iterations: usize,
        evaluations: usize,
        stencil: Stencil,
    ) -> Self {
        Self {
            root,
            f_root,
            iterations,
            evaluations,
            termination_reason  : TerminationReason::IterationLimit,
            tolerance_satisfied : ToleranceSatisfied::ToleranceNotReached,
            stencil,
            algorithm_name      : algorithm.algorithm_name(),
        }
    }

    /// `true` unless the iteration cap was hit.
    pub fn is_converged(&self) -> bool {
        self.termination_reason != TerminationReason::IterationLimit
    }
}

impl std::fmt::Display for RootFindingReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: root={} f(root)={} after {} iterations ({} evaluations, {:?})",
            self.algorithm_name,
            self.root,
            self.f_root,
            self.iterations,
            self.evaluations,
            self.tolerance_satisfied,
        )
    }
}
