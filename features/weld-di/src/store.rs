use std::{
    any::TypeId,
    collections::{hash_map::Entry, HashMap, HashSet},
};

use crate::{
    errors::InitError,
    types::{Instance, TypeInfo},
};

/// A single entry of the [InstanceStore]
#[derive(Clone)]
pub struct Binding {
    /// Type the instance is bound under
    pub info: TypeInfo,
    /// Component which produced the instance
    pub provider: TypeInfo,
    pub instance: Instance,
}

/// All instances produced during wiring, keyed by the type they satisfy
///
/// Additive only: a key is bound at most once and never replaced.
#[derive(Default)]
pub struct InstanceStore {
    bindings: HashMap<TypeId, Binding>,
}

impl InstanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, info: &TypeInfo) -> Option<&Binding> {
        self.bindings.get(&info.type_id)
    }

    pub fn contains(&self, info: &TypeInfo) -> bool {
        self.bindings.contains_key(&info.type_id)
    }

    /// Looks up all dependencies, in order
    ///
    /// Returns `None` unless every single dependency is bound.
    pub fn resolve_all(&self, dependencies: &[TypeInfo]) -> Option<Vec<Instance>> {
        dependencies
            .iter()
            .map(|dependency| self.get(dependency).map(|binding| binding.instance.clone()))
            .collect()
    }

    /// Dependencies which are not bound yet
    pub fn missing(&self, dependencies: &[TypeInfo]) -> Vec<TypeInfo> {
        dependencies
            .iter()
            .filter(|dependency| !self.contains(dependency))
            .copied()
            .collect()
    }

    /// Binds all instances produced by one component
    ///
    /// Either every instance is bound or, if any key is already taken, none is.
    pub fn bind_all(
        &mut self,
        provider: TypeInfo,
        instances: Vec<Instance>,
    ) -> Result<(), InitError> {
        let mut keys = HashSet::with_capacity(instances.len());
        for instance in &instances {
            let binding = instance.info;
            let existing = match self.bindings.get(&binding.type_id) {
                Some(existing) => Some(existing.provider),
                None if !keys.insert(binding.type_id) => Some(provider),
                None => None,
            };
            if let Some(existing) = existing {
                return Err(InitError::DuplicateBinding {
                    binding,
                    existing,
                    conflicting: provider,
                });
            }
        }

        for instance in instances {
            let info = instance.info;
            if let Entry::Vacant(entry) = self.bindings.entry(info.type_id) {
                tracing::trace!("Binding '{}' provided by '{}'", info, provider);
                entry.insert(Binding {
                    info,
                    provider,
                    instance,
                });
            }
        }

        Ok(())
    }

    /// All bound types
    pub fn types(&self) -> impl Iterator<Item = TypeInfo> + '_ {
        self.bindings.values().map(|binding| binding.info)
    }

    pub fn bindings(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.values()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use rstest::rstest;

    trait Sink: Send + Sync {}
    struct FileSink;
    impl Sink for FileSink {}
    struct NetSink;
    impl Sink for NetSink {}

    fn bound_store() -> InstanceStore {
        let mut store = InstanceStore::new();
        let sink = Arc::new(FileSink);
        let as_sink: Arc<dyn Sink> = sink.clone();
        store
            .bind_all(
                TypeInfo::of::<FileSink>(),
                vec![Instance::new(sink), Instance::new(as_sink)],
            )
            .unwrap();
        store
    }

    #[rstest]
    fn resolve_all_is_all_or_nothing() {
        // Arrange
        let store = bound_store();

        // Act
        let complete = store.resolve_all(&[TypeInfo::of::<dyn Sink>(), TypeInfo::of::<FileSink>()]);
        let partial = store.resolve_all(&[TypeInfo::of::<FileSink>(), TypeInfo::of::<NetSink>()]);

        // Assert
        assert_eq!(complete.map(|args| args.len()), Some(2));
        assert!(partial.is_none());
        assert_eq!(
            store.missing(&[TypeInfo::of::<FileSink>(), TypeInfo::of::<NetSink>()]),
            vec![TypeInfo::of::<NetSink>()]
        );
    }

    #[rstest]
    fn resolve_all_without_dependencies_is_empty() {
        let store = InstanceStore::new();

        assert_eq!(store.resolve_all(&[]).map(|args| args.len()), Some(0));
    }

    #[rstest]
    fn second_provider_of_interface_is_rejected() {
        // Arrange
        let mut store = bound_store();
        let net: Arc<dyn Sink> = Arc::new(NetSink);

        // Act
        let result = store.bind_all(
            TypeInfo::of::<NetSink>(),
            vec![Instance::new(Arc::new(NetSink)), Instance::new(net)],
        );

        // Assert
        match result {
            Err(InitError::DuplicateBinding {
                binding,
                existing,
                conflicting,
            }) => {
                assert_eq!(binding, TypeInfo::of::<dyn Sink>());
                assert_eq!(existing, TypeInfo::of::<FileSink>());
                assert_eq!(conflicting, TypeInfo::of::<NetSink>());
            }
            other => panic!("expected duplicate binding, got {:?}", other.err()),
        }
        // Nothing of the rejected component was bound
        assert!(!store.contains(&TypeInfo::of::<NetSink>()));
        assert_eq!(store.len(), 2);
    }

    #[rstest]
    fn first_binding_is_kept() {
        // Arrange
        let mut store = bound_store();
        let original = store
            .get(&TypeInfo::of::<dyn Sink>())
            .unwrap()
            .instance
            .downcast::<dyn Sink>()
            .unwrap();

        // Act
        let _ = store.bind_all(
            TypeInfo::of::<NetSink>(),
            vec![Instance::new(Arc::new(NetSink) as Arc<dyn Sink>)],
        );

        // Assert
        let current = store
            .get(&TypeInfo::of::<dyn Sink>())
            .unwrap()
            .instance
            .downcast::<dyn Sink>()
            .unwrap();
        assert!(Arc::ptr_eq(&original, &current));
    }
}
