//! Registry of root-finding methods.
//!
//! [`MethodRegistry`] maps an identifier (the lower-cased type name of a
//! handler, e.g. `"newtonraphsonmethod"`) to a [`MethodClass`]. Presentation
//! layers list [`MethodRegistry::get_method_choices`]; dispatch layers resolve
//! a chosen identifier through [`MethodRegistry::get_method`] or
//! [`MethodRegistry::instantiate`].
//!
//! The registry is an ordinary value: build it once at startup (usually with
//! [`MethodRegistry::with_builtin`]) and hand out references.

pub mod class;
pub mod display;
pub mod errors;

pub use class::{Factory, MethodClass};
pub use display::display_name;
pub use errors::RegistryError;

use rustc_hash::FxHashMap;
use crate::root_finding::bisection::BisectionMethod;
use crate::root_finding::brent::BrentMethod;
use crate::root_finding::config::{MethodSettings, SolverCfg};
use crate::root_finding::finder::{RootFinder, RootFinderClass};
use crate::root_finding::newton::NewtonRaphsonMethod;
use crate::root_finding::regula_falsi::RegulaFalsiMethod;
use crate::root_finding::secant::SecantMethod;


/// Identifier → [`MethodClass`] table, enumerated in registration order.
///
/// Re-registering an identifier replaces the class but keeps the original
/// position.
#[derive(Debug, Clone, Default)]
pub struct MethodRegistry {
    entries: Vec<(String, MethodClass)>,
    index: FxHashMap<String, usize>,
}

impl MethodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in solver.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register_type::<BisectionMethod>();
        registry.register_type::<RegulaFalsiMethod>();
        registry.register_type::<SecantMethod>();
        registry.register_type::<NewtonRaphsonMethod>();
        registry.register_type::<BrentMethod>();
        registry
    }

    /// Adds `class` under its identifier and hands it back.
    ///
    /// # Errors
    /// - [`RegistryError::TypeConstraint`] if `class` is not a root finder;
    ///   the table is left unchanged.
    pub fn register(&mut self, class: MethodClass) -> Result<MethodClass, RegistryError> {
        if !class.is_root_finder() {
            return Err(RegistryError::TypeConstraint { type_name: class.name() });
        }
        self.insert(class);
        Ok(class)
    }

    /// Registers a root-finder type; the capability is checked by the compiler.
    pub fn register_type<M: RootFinderClass>(&mut self) -> MethodClass {
        let class = MethodClass::root_finder::<M>();
        self.insert(class);
        class
    }

    fn insert(&mut self, class: MethodClass) {
        let identifier = class.identifier();
        match self.index.get(&identifier) {
            Some(&slot) => {
                tracing::debug!(
                    %identifier,
                    replaced = self.entries[slot].1.name(),
                    by = class.name(),
                    "method identifier re-registered"
                );
                self.entries[slot].1 = class;
            }
            None => {
                tracing::debug!(%identifier, type_name = class.name(), "method registered");
                self.index.insert(identifier.clone(), self.entries.len());
                self.entries.push((identifier, class));
            }
        }
    }

    /// Exact, case-sensitive lookup. Unknown identifiers give `None`.
    pub fn get_method(&self, identifier: &str) -> Option<&MethodClass> {
        self.index.get(identifier).map(|&slot| &self.entries[slot].1)
    }

    /// Every `(identifier, class)` pair, in registration order.
    pub fn get_all_methods(&self) -> impl ExactSizeIterator<Item = (&str, &MethodClass)> + '_ {
        self.entries.iter().map(|(id, class)| (id.as_str(), class))
    }

    /// `(identifier, display name)` for each entry, in registration order.
    pub fn get_method_choices(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|(id, class)| (id.clone(), display_name(class)))
            .collect()
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.index.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up `identifier` and builds a solver configured with `cfg`.
    ///
    /// # Errors
    /// - [`RegistryError::UnknownMethod`] if nothing is registered under `identifier`
    pub fn instantiate(&self, identifier: &str, cfg: SolverCfg) -> Result<Box<dyn RootFinder>, RegistryError> {
        let class = self.get_method(identifier).ok_or_else(|| RegistryError::UnknownMethod {
            identifier: identifier.to_owned(),
        })?;
        tracing::trace!(identifier, type_name = class.name(), "instantiating method");
        class.instantiate(cfg)
    }

    /// [`MethodRegistry::instantiate`] driven by loaded [`MethodSettings`].
    pub fn solver_for(&self, settings: &MethodSettings) -> Result<Box<dyn RootFinder>, RegistryError> {
        self.instantiate(&settings.method, settings.tolerances)
    }
}
