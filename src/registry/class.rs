//! [`MethodClass`]: a handler type, described as a value.

use std::any::{Any, TypeId};
use crate::root_finding::config::SolverCfg;
use crate::root_finding::finder::{short_type_name, RootFinder, RootFinderClass};
use super::errors::RegistryError;

/// Builds a boxed solver for a registered class.
pub type Factory = fn(SolverCfg) -> Box<dyn RootFinder>;

fn build<M: RootFinderClass>(cfg: SolverCfg) -> Box<dyn RootFinder> {
    Box::new(M::from_cfg(cfg))
}


/// Type identity, name, optional explicit display name and, for root
/// finders, a constructor.
///
/// ┌ [`MethodClass::root_finder`] : a [`RootFinderClass`] type; registrable
/// └ [`MethodClass::of`]          : any type; carries no root-finder
///                                  capability and is rejected by the registry
#[derive(Clone, Copy)]
pub struct MethodClass {
    type_id: TypeId,
    name: &'static str,
    display_name: Option<&'static str>,
    factory: Option<Factory>,
}

impl MethodClass {
    pub fn root_finder<M: RootFinderClass>() -> Self {
        Self {
            type_id: TypeId::of::<M>(),
            name: M::type_name(),
            display_name: M::DISPLAY_NAME,
            factory: Some(build::<M>),
        }
    }

    pub fn of<T: Any>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            name: short_type_name::<T>(),
            display_name: None,
            factory: None,
        }
    }

    #[must_use]
    pub fn with_display_name(mut self, label: &'static str) -> Self {
        self.display_name = Some(label);
        self
    }

    pub fn type_id(&self) -> TypeId { self.type_id }

    /// Bare type name, e.g. `"BisectionMethod"`.
    pub fn name(&self) -> &'static str { self.name }

    /// Registry key: the lower-cased type name.
    pub fn identifier(&self) -> String { self.name.to_lowercase() }

    pub fn explicit_display_name(&self) -> Option<&'static str> { self.display_name }

    pub fn display_name(&self) -> String { super::display::display_name(self) }

    pub fn is_root_finder(&self) -> bool { self.factory.is_some() }

    pub fn instantiate(&self, cfg: SolverCfg) -> Result<Box<dyn RootFinder>, RegistryError> {
        match self.factory {
            Some(factory) => Ok(factory(cfg)),
            None => Err(RegistryError::TypeConstraint { type_name: self.name }),
        }
    }
}

impl PartialEq for MethodClass {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
            && self.name == other.name
            && self.display_name == other.display_name
    }
}
impl Eq for MethodClass {}

impl std::fmt::Debug for MethodClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodClass")
            .field("name", &self.name)
            .field("display_name", &self.display_name)
            .field("root_finder", &self.is_root_finder())
            .finish()
    }
}
