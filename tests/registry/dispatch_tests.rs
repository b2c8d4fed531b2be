//! Resolving identifiers to solvers and running them.
use root_methods::root_finding::algorithms::{Algorithm, CompoundFamily, OpenFamily};
use root_methods::root_finding::config::{MethodSettings, SolverCfg};
use root_methods::root_finding::errors::{ProblemInput, SolveError};
use root_methods::{MethodClass, MethodRegistry, RegistryError, RootFinder, RootProblem};

use crate::support::NotASolver;

#[test]
fn every_builtin_solves_sqrt_2() {
    let registry = MethodRegistry::with_builtin();

    let f  = |x: f64| x * x - 2.0;
    let df = |x: f64| 2.0 * x;
    let problem = RootProblem::new(&f)
        .with_derivative(&df)
        .with_bracket(1.0, 2.0)
        .with_guess(1.5);

    for (id, _) in registry.get_all_methods() {
        let solver = registry.instantiate(id, SolverCfg::new()).unwrap();
        let report = solver.find_root(&problem).unwrap();

        assert!(report.is_converged(), "{id}: {report}");
        assert!((report.root - 2.0_f64.sqrt()).abs() <= 1e-8, "{id}: {report}");
    }
}

#[test]
fn instantiated_solver_reports_its_algorithm() {
    let registry = MethodRegistry::with_builtin();

    let secant = registry.instantiate("secantmethod", SolverCfg::new()).unwrap();
    let brent  = registry.instantiate("brentmethod", SolverCfg::new()).unwrap();

    assert_eq!(secant.algorithm(), Algorithm::Open(OpenFamily::Secant));
    assert_eq!(brent.algorithm(), Algorithm::Compound(CompoundFamily::Brent));
}

#[test]
fn configuration_reaches_the_solver() {
    let registry = MethodRegistry::with_builtin();
    let cfg      = SolverCfg::new().set_max_iter(3).unwrap();

    let f       = |x: f64| x * x - 2.0;
    let problem = RootProblem::new(&f).with_bracket(0.0, 2.0);

    let report = registry.instantiate("bisectionmethod", cfg).unwrap().find_root(&problem).unwrap();

    assert!(!report.is_converged());
    assert_eq!(report.iterations, 3);
}

#[test]
fn unknown_identifier() {
    let registry = MethodRegistry::with_builtin();

    let err = registry.instantiate("illinoismethod", SolverCfg::new()).err();
    assert_eq!(err, Some(RegistryError::UnknownMethod { identifier: "illinoismethod".to_owned() }));

    let err = registry.instantiate("BrentMethod", SolverCfg::new()).err();
    assert!(matches!(err, Some(RegistryError::UnknownMethod { .. })));
}

#[test]
fn descriptor_without_capability_cannot_be_built() {
    let err = MethodClass::of::<NotASolver>().instantiate(SolverCfg::new()).err();
    assert_eq!(err, Some(RegistryError::TypeConstraint { type_name: "NotASolver" }));
}

#[test]
fn missing_problem_input() {
    let registry = MethodRegistry::with_builtin();

    let f    = |x: f64| x - 1.0;
    let bare = RootProblem::new(&f);

    for (id, _) in registry.get_all_methods() {
        let solver = registry.instantiate(id, SolverCfg::new()).unwrap();
        let err    = solver.find_root(&bare).unwrap_err();

        let expected = if solver.algorithm().needs_bracket() {
            ProblemInput::Bracket
        } else {
            ProblemInput::InitialGuess
        };
        assert!(
            matches!(err, SolveError::MissingInput { input, .. } if input == expected),
            "{id}: {err}"
        );
    }
}

#[test]
fn guess_alone_does_not_satisfy_bracketing_methods() {
    let registry = MethodRegistry::with_builtin();

    let f       = |x: f64| x - 1.0;
    let problem = RootProblem::new(&f).with_guess(0.0);

    for id in ["bisectionmethod", "regulafalsimethod", "brentmethod"] {
        let err = registry.instantiate(id, SolverCfg::new()).unwrap().find_root(&problem).unwrap_err();
        assert!(
            matches!(err, SolveError::MissingInput { input: ProblemInput::Bracket, .. }),
            "{id}: {err}"
        );
    }
}

#[test]
fn solver_from_settings() {
    let registry = MethodRegistry::with_builtin();
    let settings = MethodSettings::from_toml_str(
        r#"
        method = "newtonraphsonmethod"

        [tolerances]
        abs_fx = 1e-14
        "#,
    )
    .unwrap();

    let solver = registry.solver_for(&settings).unwrap();
    assert_eq!(solver.algorithm(), Algorithm::Open(OpenFamily::Newton));

    let f      = |x: f64| x * x - 2.0;
    let report = solver.find_root(&RootProblem::new(&f).with_guess(1.0)).unwrap();
    assert!(report.f_root.abs() <= 1e-14);
}

#[test]
fn settings_naming_unknown_method() {
    let registry = MethodRegistry::with_builtin();
    let settings = MethodSettings::from_toml_str(r#"method = "ridders""#).unwrap();

    let err = registry.solver_for(&settings).err();
    assert_eq!(err, Some(RegistryError::UnknownMethod { identifier: "ridders".to_owned() }));
}
