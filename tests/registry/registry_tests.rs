use pretty_assertions::assert_eq;

use root_methods::root_finding::bisection::BisectionMethod;
use root_methods::root_finding::brent::BrentMethod;
use root_methods::root_finding::newton::NewtonRaphsonMethod;
use root_methods::root_finding::regula_falsi::RegulaFalsiMethod;
use root_methods::root_finding::secant::SecantMethod;
use root_methods::{MethodClass, MethodRegistry, RegistryError};

use crate::support::{shadow, halving, Bisection, HalvingMethod, NotASolver};

type TestResult = Result<(), RegistryError>;


#[test]
fn empty_registry() {
    let registry = MethodRegistry::new();

    assert!(registry.is_empty());
    assert_eq!(registry.len(), 0);
    assert_eq!(registry.get_method("bisectionmethod"), None);
    assert_eq!(registry.get_all_methods().len(), 0);
    assert!(registry.get_method_choices().is_empty());
}

#[test]
fn register_keys_by_lowercased_type_name() -> TestResult {
    let mut registry = MethodRegistry::new();
    let class = MethodClass::root_finder::<NewtonRaphsonMethod>();

    let returned = registry.register(class)?;

    assert_eq!(returned, class);
    assert_eq!(registry.len(), 1);
    assert!(registry.contains("newtonraphsonmethod"));
    assert_eq!(registry.get_method("newtonraphsonmethod"), Some(&class));
    Ok(())
}

#[test]
fn register_type_matches_register() {
    let mut by_type  = MethodRegistry::new();
    let mut by_class = MethodRegistry::new();

    let a = by_type.register_type::<SecantMethod>();
    let b = by_class.register(MethodClass::root_finder::<SecantMethod>());

    assert_eq!(Ok(a), b);
    assert_eq!(by_type.get_method("secantmethod"), by_class.get_method("secantmethod"));
}

#[test]
fn lookup_is_case_sensitive() {
    let mut registry = MethodRegistry::new();
    registry.register_type::<NewtonRaphsonMethod>();

    assert_eq!(registry.get_method("NewtonRaphsonMethod"), None);
    assert_eq!(registry.get_method("NEWTONRAPHSONMETHOD"), None);
    assert!(registry.get_method("newtonraphsonmethod").is_some());
}

#[test]
fn unknown_identifier_is_none() {
    let registry = MethodRegistry::with_builtin();

    assert_eq!(registry.get_method("unknown"), None);
    assert_eq!(registry.get_method(""), None);
    assert!(!registry.contains("unknown"));
}

#[test]
fn rejects_type_without_capability() -> TestResult {
    let mut registry = MethodRegistry::new();
    registry.register_type::<BisectionMethod>();

    let err = registry.register(MethodClass::of::<NotASolver>()).unwrap_err();
    assert_eq!(err, RegistryError::TypeConstraint { type_name: "NotASolver" });

    let err = registry.register(MethodClass::of::<String>()).unwrap_err();
    assert_eq!(err, RegistryError::TypeConstraint { type_name: "String" });

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get_method("notasolver"), None);
    assert_eq!(registry.get_method("string"), None);
    Ok(())
}

#[test]
fn class_descriptor() {
    let class = MethodClass::root_finder::<HalvingMethod>();
    assert_eq!(class.name(), "HalvingMethod");
    assert_eq!(class.identifier(), "halvingmethod");
    assert!(class.is_root_finder());
    assert_eq!(class.explicit_display_name(), None);

    let plain = MethodClass::of::<NotASolver>();
    assert!(!plain.is_root_finder());
    assert_ne!(plain.type_id(), class.type_id());
}

#[test]
fn reregistering_same_type_is_idempotent() {
    let mut registry = MethodRegistry::new();
    registry.register_type::<BisectionMethod>();
    registry.register_type::<BisectionMethod>();

    assert_eq!(registry.len(), 1);
}

#[test]
fn colliding_identifier_overwrites_in_place() {
    let mut registry = MethodRegistry::with_builtin();
    let before: Vec<String> = registry.get_all_methods().map(|(id, _)| id.to_owned()).collect();

    let shadow = registry.register_type::<shadow::BisectionMethod>();

    let after: Vec<String> = registry.get_all_methods().map(|(id, _)| id.to_owned()).collect();
    assert_eq!(before, after);
    assert_eq!(registry.len(), 5);
    assert_eq!(registry.get_method("bisectionmethod"), Some(&shadow));
    assert_ne!(shadow, MethodClass::root_finder::<BisectionMethod>());

    let choices = registry.get_method_choices();
    assert_eq!(choices[0], ("bisectionmethod".to_owned(), "Shadow Bisection".to_owned()));
}

#[test]
fn later_registration_wins() {
    let mut registry = MethodRegistry::new();
    registry.register_type::<HalvingMethod>();
    registry.register_type::<Bisection>();
    registry.register_type::<halving::HalvingMethod>();

    assert_eq!(registry.len(), 2);
    assert_eq!(
        registry.get_method("halvingmethod"),
        Some(&MethodClass::root_finder::<halving::HalvingMethod>())
    );

    let ids: Vec<&str> = registry.get_all_methods().map(|(id, _)| id).collect();
    assert_eq!(ids, vec!["halvingmethod", "bisection"]);
}

#[test]
fn builtin_registry_order_and_contents() {
    let registry = MethodRegistry::with_builtin();

    let ids: Vec<&str> = registry.get_all_methods().map(|(id, _)| id).collect();
    assert_eq!(
        ids,
        vec!["bisectionmethod", "regulafalsimethod", "secantmethod", "newtonraphsonmethod", "brentmethod"]
    );

    assert_eq!(registry.get_method("regulafalsimethod"), Some(&MethodClass::root_finder::<RegulaFalsiMethod>()));
    assert_eq!(registry.get_method("brentmethod"), Some(&MethodClass::root_finder::<BrentMethod>()));
}

#[test]
fn all_methods_pairs_identifier_with_class() {
    let registry = MethodRegistry::with_builtin();

    for (id, class) in registry.get_all_methods() {
        assert_eq!(id, class.identifier());
        assert_eq!(registry.get_method(id), Some(class));
    }
}

#[test]
fn builtin_choices() {
    let registry = MethodRegistry::with_builtin();

    let expected: Vec<(String, String)> = [
        ("bisectionmethod",     "Bisection"),
        ("regulafalsimethod",   "Regula Falsi"),
        ("secantmethod",        "Secant"),
        ("newtonraphsonmethod", "Newton Raphson"),
        ("brentmethod",         "Brent's Method"),
    ]
    .into_iter()
    .map(|(id, label)| (id.to_owned(), label.to_owned()))
    .collect();

    assert_eq!(registry.get_method_choices(), expected);
}
