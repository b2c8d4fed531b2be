use root_methods::root_finding::algorithms::{Algorithm, BracketFamily, RegulaFalsiVariant};
use root_methods::root_finding::errors::RootFindingError;
use root_methods::root_finding::regula_falsi::{regula_falsi, RegulaFalsiCfg, RegulaFalsiError};
use root_methods::root_finding::report::{RootFindingReport, Stencil, TerminationReason, ToleranceSatisfied};

type TestResult = Result<(), RegulaFalsiError>;

const VARIANTS: [RegulaFalsiVariant; 4] = [
    RegulaFalsiVariant::Pure,
    RegulaFalsiVariant::Illinois,
    RegulaFalsiVariant::Pegasus,
    RegulaFalsiVariant::AndersonBjorck,
];

fn tight_cfg(variant: RegulaFalsiVariant, tol: f64, max_iter: usize) -> Result<RegulaFalsiCfg, RegulaFalsiError> {
    Ok(RegulaFalsiCfg::new()
        .with_variant(variant)
        .set_abs_fx(tol)?
        .set_abs_x(tol)?
        .set_rel_x(0.0)?
        .set_max_iter(max_iter)?)
}

fn bounds(res: &RootFindingReport) -> (f64, f64) {
    match res.stencil {
        Stencil::Bracket { bounds } => (bounds[0], bounds[1]),
        _ => panic!("expected Bracket stencil"),
    }
}

fn assert_bracket_invariant<F: Fn(f64) -> f64>(f: &F, a: f64, b: f64) {
    let fa = f(a);
    let fb = f(b);

    assert!(fa.is_finite() && fb.is_finite());
    assert!(a <= b);
    assert!(fa * fb <= 0.0);
}


#[test]
fn sqrt2_all() -> TestResult {
    let f = |x: f64| x * x - 2.0;

    for variant in VARIANTS {
        let res = regula_falsi(f, 0.0, 2.0, tight_cfg(variant, 1e-10, 200)?)?;

        assert_eq!(res.termination_reason, TerminationReason::ToleranceReached, "{variant:?}");
        assert!((res.root - 2.0_f64.sqrt()).abs() <= 1e-8, "{variant:?}: {}", res.root);

        let (a, b) = bounds(&res);
        assert_bracket_invariant(&f, a, b);
    }
    Ok(())
}

#[test]
fn algorithm_name_carries_variant() -> TestResult {
    let f = |x: f64| x - 0.3;

    for variant in VARIANTS {
        let cfg = RegulaFalsiCfg::new().with_variant(variant);
        let res = regula_falsi(f, 0.0, 1.0, cfg)?;

        let expected = Algorithm::Bracket(BracketFamily::RegulaFalsi(variant)).algorithm_name();
        assert_eq!(res.algorithm_name, expected);
        assert_eq!(cfg.algorithm(), Algorithm::Bracket(BracketFamily::RegulaFalsi(variant)));
    }
    Ok(())
}

#[test]
fn default_variant_is_illinois() {
    assert_eq!(RegulaFalsiCfg::new().variant(), RegulaFalsiVariant::Illinois);
}

#[test]
fn pure_stalls_where_illinois_converges() -> TestResult {
    // strongly convex: pure false position keeps the right endpoint forever
    let f = |x: f64| x.powi(10) - 1.0;

    let pure     = regula_falsi(f, 0.0, 1.3, tight_cfg(RegulaFalsiVariant::Pure, 1e-12, 50)?)?;
    let illinois = regula_falsi(f, 0.0, 1.3, tight_cfg(RegulaFalsiVariant::Illinois, 1e-12, 50)?)?;

    assert_eq!(pure.termination_reason, TerminationReason::IterationLimit);
    assert_eq!(pure.tolerance_satisfied, ToleranceSatisfied::ToleranceNotReached);
    assert_eq!(pure.iterations, 50);

    assert!(illinois.is_converged());
    assert!((illinois.root - 1.0).abs() <= 1e-10);
    assert!(illinois.iterations < 50);
    Ok(())
}

#[test]
fn linear_function_one_step() -> TestResult {
    let f = |x: f64| 4.0 * x - 1.0;

    for variant in VARIANTS {
        let res = regula_falsi(f, 0.0, 1.0, RegulaFalsiCfg::new().with_variant(variant))?;

        assert_eq!(res.tolerance_satisfied, ToleranceSatisfied::AbsFxReached);
        assert_eq!(res.iterations, 1);
        assert!((res.root - 0.25).abs() <= 1e-12);
    }
    Ok(())
}

#[test]
fn endpoint_roots() -> TestResult {
    let f = |x: f64| x * (x - 2.0);

    let res = regula_falsi(f, 0.0, 1.0, RegulaFalsiCfg::new())?;
    assert_eq!(res.root, 0.0);
    assert_eq!(res.iterations, 0);
    assert_eq!(res.evaluations, 1);

    let res = regula_falsi(f, 1.0, 2.0, RegulaFalsiCfg::new())?;
    assert_eq!(res.root, 2.0);
    assert_eq!(res.evaluations, 2);
    Ok(())
}

#[test]
fn no_sign_change_all() -> TestResult {
    let f = |x: f64| x * x + 1.0;

    for variant in VARIANTS {
        let err = regula_falsi(f, -1.0, 1.0, RegulaFalsiCfg::new().with_variant(variant)).unwrap_err();
        assert!(matches!(err, RegulaFalsiError::NoSignChange { .. }));
    }
    Ok(())
}

#[test]
fn invalid_bounds_all() -> TestResult {
    let f = |x: f64| x;

    for variant in VARIANTS {
        let cfg = RegulaFalsiCfg::new().with_variant(variant);
        assert!(matches!(
            regula_falsi(f, 1.0, 1.0, cfg).unwrap_err(),
            RegulaFalsiError::InvalidBounds { .. }
        ));
        assert!(matches!(
            regula_falsi(f, 0.0, f64::INFINITY, cfg).unwrap_err(),
            RegulaFalsiError::InvalidBounds { .. }
        ));
    }
    Ok(())
}

#[test]
fn non_finite_endpoint() -> TestResult {
    let f   = |x: f64| if x < 0.0 { f64::NAN } else { x - 1.0 };
    let err = regula_falsi(f, -1.0, 2.0, RegulaFalsiCfg::new()).unwrap_err();

    assert!(matches!(
        err,
        RegulaFalsiError::RootFinding(RootFindingError::NonFiniteEvaluation { x, .. }) if x == -1.0
    ));
    Ok(())
}

#[test]
fn setter_errors() {
    assert!(RegulaFalsiCfg::new().set_abs_fx(-1.0).is_err());
    assert!(RegulaFalsiCfg::new().set_max_iter(0).is_err());
    assert!(RegulaFalsiCfg::new().set_abs_x(1e-6).and_then(|c| c.set_rel_x(0.0)).is_ok());
}
