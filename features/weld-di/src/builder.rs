use crate::{
    component::{Component, ComponentBuilder},
    container::DiContainer,
    dependency_graph::DependencyGraph,
    errors::{InitError, RegisterError},
    factories::InstanceFactory,
    initiator::DiInitiator,
    types::Injectable,
};

//////////////////////////////////////////////////////////////////////
///
/// The DI consists of three parts.
/// 1. The DiBuilder where one registers all components
/// 2. Wiring, where the DiInitiator constructs every component once
/// 3. The DiContainer, holding the constructed instances
pub struct DiBuilder {
    /// Registered components, in registration order
    pub(crate) components: Vec<Component>,
    /// Graph of all registered components
    pub(crate) graph: DependencyGraph,
}
impl Default for DiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DiBuilder {
    pub fn new() -> Self {
        DiBuilder {
            components: Vec::new(),
            graph: DependencyGraph::new(),
        }
    }
}
impl DiBuilder {
    /// Registers a component
    ///
    /// Fails if a component of the same type is already registered, in which case the
    /// builder is left untouched.
    pub fn register(&mut self, component: Component) -> Result<&mut Self, RegisterError> {
        self.graph.add(
            component.info(),
            component.dependencies().to_vec(),
            &component.provides(),
        )?;

        tracing::trace!("Registered {:?}", component);
        self.components.push(component);
        Ok(self)
    }

    /// Builds and registers a component
    pub fn add_component<T: Injectable>(
        &mut self,
        component: ComponentBuilder<T>,
    ) -> Result<&mut Self, RegisterError> {
        self.register(component.build()?)
    }

    /// Registers an already created instance
    pub fn add_instance<T: Injectable>(&mut self, instance: T) -> Result<&mut Self, RegisterError> {
        self.add_component(Component::builder::<T>().constructor(move || instance))
    }

    pub fn add_factory<Factory: InstanceFactory>(
        &mut self,
        factory: Factory,
    ) -> Result<&mut Self, RegisterError> {
        self.add_component(Component::builder::<Factory::Provides>().factory(factory))
    }

    /// Registers an interface declaration, see [Component::interface]
    pub fn declare_interface<I: ?Sized + Injectable>(
        &mut self,
    ) -> Result<&mut Self, RegisterError> {
        self.register(Component::interface::<I>())
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Wires all registered components
    ///
    /// Consumes the builder, a failed wiring can not be retried.
    pub fn build(self) -> Result<DiContainer, InitError> {
        DiInitiator::new().initiate(self)
    }
}
