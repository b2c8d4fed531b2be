//! Root-finding methods and a registry for looking them up by identifier.
//!
//! ┌ [`root_finding`] : solvers, shared configuration, reports and errors
//! └ [`registry`]     : [`MethodRegistry`] mapping identifiers to method classes

pub mod root_finding;
pub mod registry;

pub use registry::{MethodRegistry, MethodClass, RegistryError};
pub use root_finding::finder::{RootFinder, RootFinderClass, RootProblem};
