use std::{any::type_name, fmt::Debug, sync::Arc};

use crate::{
    dependency_graph::DependencyGraph,
    errors::RequireError,
    store::InstanceStore,
    types::{Injectable, TypeInfo},
};

/// Container holding all wired instances
///
/// Immutable once built, cloning only clones the handle.
#[derive(Clone)]
pub struct DiContainer(Arc<DiContainerInner>);
struct DiContainerInner {
    store: InstanceStore,
    graph: DependencyGraph,
    construction_order: Vec<TypeInfo>,
}
impl Debug for DiContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_struct("DiContainer");
        for binding in self.0.store.bindings() {
            map.field(binding.info.type_name, &binding.provider.type_name);
        }
        map.finish()
    }
}

impl DiContainer {
    pub(crate) fn new(
        store: InstanceStore,
        graph: DependencyGraph,
        construction_order: Vec<TypeInfo>,
    ) -> Self {
        Self(Arc::new(DiContainerInner {
            store,
            graph,
            construction_order,
        }))
    }

    /// Attempts to get the requested type
    ///
    /// `T` is either a concrete component or an interface such as `dyn Logger`.
    /// Every call returns the same shared instance.
    pub fn require<T: ?Sized + Injectable>(&self) -> Result<Arc<T>, RequireError> {
        match self.0.store.get(&TypeInfo::of::<T>()) {
            Some(binding) => {
                binding
                    .instance
                    .downcast()
                    .map_err(|actual_type| RequireError::DowncastFailed {
                        required_type: type_name::<T>(),
                        actual_type,
                    })
            }
            None => Err(RequireError::NotFound(type_name::<T>())),
        }
    }

    pub fn contains<T: ?Sized + Injectable>(&self) -> bool {
        self.0.store.contains(&TypeInfo::of::<T>())
    }

    /// Every type something is bound under
    pub fn types(&self) -> impl Iterator<Item = TypeInfo> + '_ {
        self.0.store.types()
    }

    /// Component which provides the given type
    pub fn provider_of(&self, info: &TypeInfo) -> Option<TypeInfo> {
        self.0.store.get(info).map(|binding| binding.provider)
    }

    /// Concrete components in the order they were constructed
    pub fn construction_order(&self) -> &[TypeInfo] {
        &self.0.construction_order
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.0.graph
    }
}
