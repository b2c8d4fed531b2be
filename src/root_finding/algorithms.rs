//! Algorithm identities for the built-in solvers.
//!
//! [`Algorithm`] tags every [`RootFindingReport`] and selects which dynamic
//! tolerance applies (width for bracketing, step for open, both for compound).
//!
//! [`RootFindingReport`]: super::report::RootFindingReport


/// Ceiling on automatically derived iteration counts.
///
/// Only consulted when `max_iter` is unset and the method's own default
/// (heuristic or theoretical) is unavailable or larger than this.
pub const GLOBAL_MAX_ITER_FALLBACK: usize = 500;


/// Solver families.
/// ├ [`Algorithm::Bracket`]  : keeps a sign-change interval
/// ├ [`Algorithm::Open`]     : iterates from one or two guesses
/// └ [`Algorithm::Compound`] : bracketing with open-method steps
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Algorithm {
    Bracket(BracketFamily),
    Open(OpenFamily),
    Compound(CompoundFamily)
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BracketFamily {
    Bisection,
    RegulaFalsi(RegulaFalsiVariant),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OpenFamily {
    Secant,
    Newton
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CompoundFamily {
    Brent
}


/// False-position endpoint treatment.
///
/// When the same endpoint survives two updates in a row, the non-pure
/// variants rescale its function value so it cannot freeze in place.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum RegulaFalsiVariant {
    /// no rescaling
    Pure,
    /// halve the retained value
    #[default]
    Illinois,
    /// scale by `f(x_k) / (f(x_k) + f(prev))`
    Pegasus,
    /// scale by `1 - f(x_k) / f(prev)`, halving when that is not positive
    AndersonBjorck,
}


impl Algorithm {
    /// Iteration cap used when `max_iter` is unset.
    ///
    /// `None` means "derive from the bracket": halvings of the initial width
    /// down to `abs_x + rel_x`, capped at [`GLOBAL_MAX_ITER_FALLBACK`].
    pub const fn default_max_iter(self) -> Option<usize> {
        match self {
            Algorithm::Bracket(BracketFamily::Bisection) => None,
            Algorithm::Bracket(BracketFamily::RegulaFalsi(RegulaFalsiVariant::Pure)) => Some(200),
            Algorithm::Bracket(BracketFamily::RegulaFalsi(_)) => Some(100),
            Algorithm::Open(OpenFamily::Secant)               => Some(100),
            Algorithm::Open(OpenFamily::Newton)               => Some(50),
            Algorithm::Compound(CompoundFamily::Brent)        => None,
        }
    }

    /// Name recorded in [`RootFindingReport::algorithm_name`].
    ///
    /// [`RootFindingReport::algorithm_name`]: super::report::RootFindingReport::algorithm_name
    pub const fn algorithm_name(self) -> &'static str {
        match self {
            Algorithm::Bracket(BracketFamily::Bisection) => "bisection",
            Algorithm::Bracket(BracketFamily::RegulaFalsi(variant)) => match variant {
                RegulaFalsiVariant::Pure           => "regula_falsi_pure",
                RegulaFalsiVariant::Illinois       => "regula_falsi_illinois",
                RegulaFalsiVariant::Pegasus        => "regula_falsi_pegasus",
                RegulaFalsiVariant::AndersonBjorck => "regula_falsi_anderson_bjorck",
            },
            Algorithm::Open(OpenFamily::Secant)        => "secant",
            Algorithm::Open(OpenFamily::Newton)        => "newton",
            Algorithm::Compound(CompoundFamily::Brent) => "brent",
        }
    }

    /// `true` for methods that require a sign-change bracket.
    pub const fn needs_bracket(self) -> bool {
        matches!(self, Algorithm::Bracket(_) | Algorithm::Compound(_))
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.algorithm_name())
    }
}
