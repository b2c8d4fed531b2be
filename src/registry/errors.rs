use thiserror::Error;

/// Registry failures.
///
/// ┌ [`RegistryError::TypeConstraint`] : registering a type without the
/// │                                     root-finder capability
/// └ [`RegistryError::UnknownMethod`]  : dispatching an unregistered identifier
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("method must implement RootFinder: got `{type_name}`")]
    TypeConstraint { type_name: &'static str },

    #[error("no method registered as `{identifier}`")]
    UnknownMethod { identifier: String },
}
