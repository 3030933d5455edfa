use std::sync::Arc;

use thiserror::Error;

use crate::{
    dependency_graph::DependencyGraphError,
    types::{DynError, TypeInfo},
};

/// Errors while resolving a single constructor argument
#[derive(Error, Debug)]
pub enum InjectError {
    /// Could not require the type
    #[error(transparent)]
    RequireError(#[from] RequireError),
    /// The constructor asked for more arguments than were resolved for it
    #[error("No resolved argument left for '{0}'")]
    ArgumentsExhausted(&'static str),
    /// Generic error during Injection
    #[error("Error during injection: {0}")]
    Other(DynError),
}

/// Errors when trying to require a certain type
#[derive(Error, Debug, Clone)]
pub enum RequireError {
    /// The required type is not bound in the container
    #[error("The required type '{0}' is not known.")]
    NotFound(&'static str),

    #[error("Failed to downcast, required: '{required_type}' actual: '{actual_type}'")]
    DowncastFailed {
        required_type: &'static str,
        actual_type: &'static str,
    },
}

/// Errors while registering components
#[derive(Error, Debug, Clone)]
pub enum RegisterError {
    /// A concrete component needs exactly one constructor
    #[error("'{component}' must have exactly one constructor, found {found}")]
    AmbiguousConstructor { component: TypeInfo, found: usize },
    /// A Type has been registered twice
    #[error("A Type has been registered twice: '{0}'")]
    DuplicateRegistration(TypeInfo),
}

/// Errors while wiring the registered components
#[derive(Error, Debug, Clone)]
pub enum InitError {
    /// Wiring reached a fixed point with components left over
    #[error(transparent)]
    UnmetDependency(#[from] UnmetDependencies),

    /// Two components want to be bound under the same type
    #[error("'{binding}' is provided by both '{existing}' and '{conflicting}'")]
    DuplicateBinding {
        binding: TypeInfo,
        existing: TypeInfo,
        conflicting: TypeInfo,
    },

    /// A constructor failed
    #[error("Construction of '{component}' failed - error: {error}")]
    ConstructionFailed {
        component: TypeInfo,
        error: Arc<DynError>,
    },
}

/// A component that could not be constructed, and the dependencies it was waiting for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedComponent {
    pub component: TypeInfo,
    pub missing: Vec<TypeInfo>,
}

/// All components left over when wiring got stuck
#[derive(Error, Debug, Clone)]
pub struct UnmetDependencies {
    /// Stuck components in registration order
    pub unresolved: Vec<UnresolvedComponent>,
    /// Root causes found in the dependency graph
    pub causes: Vec<DependencyGraphError>,
}
impl UnmetDependencies {
    /// Identities of all stuck components
    pub fn components(&self) -> impl Iterator<Item = TypeInfo> + '_ {
        self.unresolved.iter().map(|entry| entry.component)
    }
}
impl std::fmt::Display for UnmetDependencies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut display = Vec::new();
        display.push(format!(
            "Unmet dependencies, {} component(s) could not be constructed:",
            self.unresolved.len()
        ));
        for entry in &self.unresolved {
            let missing: Vec<_> = entry.missing.iter().map(|info| info.type_name).collect();
            display.push(format!(
                "- '{}' is waiting for [{}]",
                entry.component,
                missing.join(", ")
            ));
        }
        for cause in &self.causes {
            display.push(format!("- {}", cause));
        }
        f.write_str(&display.join("\n"))
    }
}

/// Any error the container can produce
///
/// Convenience for composition roots which want to use a single error type.
#[derive(Error, Debug, Clone)]
pub enum DiError {
    #[error(transparent)]
    Register(#[from] RegisterError),
    #[error(transparent)]
    Init(#[from] InitError),
    #[error(transparent)]
    Require(#[from] RequireError),
}
