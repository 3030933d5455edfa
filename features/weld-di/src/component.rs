use std::{marker::PhantomData, sync::Arc};

use crate::{
    errors::RegisterError,
    factories::{
        Constructor, DynFactory, FnFactory, InstanceFactory, TryConstructor, TryFnFactory,
    },
    resolver::Arguments,
    types::{DynError, Injectable, Instance, TypeInfo},
};

/// Registration record of a single type
///
/// Describes what the type needs to be constructed and which interfaces it is bound
/// under. Created through [Component::builder] or [Component::interface], immutable afterwards.
pub struct Component {
    info: TypeInfo,
    dependencies: Vec<TypeInfo>,
    interfaces: Vec<TypeInfo>,
    /// None for interface declarations, which are never constructed
    factory: Option<Box<dyn Instantiate>>,
}

impl Component {
    /// Starts describing a concrete component
    pub fn builder<T: Injectable>() -> ComponentBuilder<T> {
        ComponentBuilder::new()
    }

    /// Declares an interface type
    ///
    /// Interface declarations take part in registration but are skipped when wiring,
    /// instances are bound under an interface by the components that provide it.
    pub fn interface<I: ?Sized + Injectable>() -> Component {
        Component {
            info: TypeInfo::of::<I>(),
            dependencies: Vec::new(),
            interfaces: Vec::new(),
            factory: None,
        }
    }

    pub fn info(&self) -> TypeInfo {
        self.info
    }

    /// Constructor parameters, in declaration order
    pub fn dependencies(&self) -> &[TypeInfo] {
        &self.dependencies
    }

    /// Interfaces the component is bound under, besides its own type
    pub fn interfaces(&self) -> &[TypeInfo] {
        &self.interfaces
    }

    pub fn is_constructible(&self) -> bool {
        self.factory.is_some()
    }

    /// All keys an instance of this component is bound under
    pub fn provides(&self) -> Vec<TypeInfo> {
        if !self.is_constructible() {
            return Vec::new();
        }

        std::iter::once(self.info)
            .chain(self.interfaces.iter().copied())
            .collect()
    }

    /// Runs the constructor
    ///
    /// Returns the instance bound under its own type first, followed by one instance per
    /// interface. Returns `None` for interface declarations.
    pub(crate) fn instantiate(
        self,
        args: &mut Arguments,
    ) -> Result<Option<Vec<Instance>>, DynError> {
        match self.factory {
            Some(factory) => factory.instantiate(args).map(Some),
            None => Ok(None),
        }
    }
}

impl std::fmt::Debug for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names =
            |infos: &[TypeInfo]| infos.iter().map(|info| info.type_name).collect::<Vec<_>>();
        f.debug_struct("Component")
            .field("type", &self.info.type_name)
            .field("dependencies", &names(&self.dependencies))
            .field("interfaces", &names(&self.interfaces))
            .field("constructible", &self.is_constructible())
            .finish()
    }
}

type Cast<T> = Box<dyn Fn(&Arc<T>) -> Instance>;

/// Builder for a concrete [Component]
///
/// Exactly one of [ComponentBuilder::constructor], [ComponentBuilder::try_constructor] or
/// [ComponentBuilder::factory] must be called before [ComponentBuilder::build].
///
/// # Example
/// ```rust
/// use std::sync::Arc;
/// use weld_di::Component;
///
/// trait Logger: Send + Sync {}
/// struct ConsoleLogger;
/// impl Logger for ConsoleLogger {}
///
/// struct Repository {
///     logger: Arc<dyn Logger>,
/// }
///
/// let logger = Component::builder::<ConsoleLogger>()
///     .constructor(|| ConsoleLogger)
///     .provides::<dyn Logger>(|logger| logger)
///     .build()
///     .unwrap();
///
/// let repository = Component::builder::<Repository>()
///     .constructor(|logger: Arc<dyn Logger>| Repository { logger })
///     .build()
///     .unwrap();
///
/// assert_eq!(repository.dependencies(), logger.interfaces());
/// ```
pub struct ComponentBuilder<T: Injectable> {
    constructors: Vec<Box<dyn DynFactory<T>>>,
    interfaces: Vec<(TypeInfo, Cast<T>)>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Injectable> ComponentBuilder<T> {
    fn new() -> Self {
        Self {
            constructors: Vec::new(),
            interfaces: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Constructs the component with a function of its dependencies
    pub fn constructor<Args: 'static, C>(self, constructor: C) -> Self
    where
        C: Constructor<Args, Output = T>,
    {
        self.factory(FnFactory::new(constructor))
    }

    /// Constructs the component with a fallible function of its dependencies
    pub fn try_constructor<Args: 'static, C>(self, constructor: C) -> Self
    where
        C: TryConstructor<Args, Output = T>,
    {
        self.factory(TryFnFactory::new(constructor))
    }

    /// Constructs the component with an [InstanceFactory]
    pub fn factory<F: InstanceFactory<Provides = T>>(mut self, factory: F) -> Self {
        self.constructors.push(Box::new(factory));
        self
    }

    /// Binds the component under the interface `I` as well
    ///
    /// `cast` turns the shared instance into the interface, usually `|it| it`.
    pub fn provides<I: ?Sized + Injectable>(
        mut self,
        cast: impl Fn(Arc<T>) -> Arc<I> + 'static,
    ) -> Self {
        let interface = TypeInfo::of::<I>();
        if interface == TypeInfo::of::<T>() {
            tracing::warn!(
                "'{interface}' is always bound under its own type, ignoring it as an interface"
            );
            return self;
        }
        if self.interfaces.iter().any(|(info, _)| *info == interface) {
            tracing::warn!(
                "'{}' declares interface '{}' more than once, keeping the first",
                std::any::type_name::<T>(),
                interface
            );
            return self;
        }

        let cast: Cast<T> =
            Box::new(move |instance: &Arc<T>| Instance::new(cast(Arc::clone(instance))));
        self.interfaces.push((interface, cast));
        self
    }

    /// Validates the description and builds the [Component]
    pub fn build(self) -> Result<Component, RegisterError> {
        let info = TypeInfo::of::<T>();
        let ComponentBuilder {
            constructors,
            interfaces,
            ..
        } = self;

        let [factory]: [Box<dyn DynFactory<T>>; 1] =
            constructors
                .try_into()
                .map_err(|rejected: Vec<_>| RegisterError::AmbiguousConstructor {
                    component: info,
                    found: rejected.len(),
                })?;

        let (interface_infos, casts) = interfaces.into_iter().unzip();

        Ok(Component {
            info,
            dependencies: factory.dependencies(),
            interfaces: interface_infos,
            factory: Some(Box::new(Blueprint { factory, casts })),
        })
    }
}

/// Type erased construction of a component and its interface bindings
pub(crate) trait Instantiate {
    fn instantiate(self: Box<Self>, args: &mut Arguments) -> Result<Vec<Instance>, DynError>;
}

struct Blueprint<T> {
    factory: Box<dyn DynFactory<T>>,
    casts: Vec<Cast<T>>,
}
impl<T: Injectable> Instantiate for Blueprint<T> {
    fn instantiate(self: Box<Self>, args: &mut Arguments) -> Result<Vec<Instance>, DynError> {
        let Blueprint { factory, casts } = *self;
        let product = Arc::new(factory.construct(args)?);

        let mut instances = Vec::with_capacity(casts.len() + 1);
        instances.push(Instance::new(Arc::clone(&product)));
        instances.extend(casts.iter().map(|cast| cast(&product)));
        Ok(instances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    trait Named: Send + Sync {
        fn name(&self) -> &str;
    }
    trait Audited: Send + Sync {}

    struct Account {
        name: String,
    }
    impl Named for Account {
        fn name(&self) -> &str {
            &self.name
        }
    }
    impl Audited for Account {}

    fn account_builder() -> ComponentBuilder<Account> {
        Component::builder::<Account>()
    }

    #[rstest]
    fn missing_constructor_is_ambiguous() {
        // Act
        let result = account_builder().build();

        // Assert
        assert!(matches!(
            result,
            Err(RegisterError::AmbiguousConstructor { component, found: 0 })
                if component == TypeInfo::of::<Account>()
        ));
    }

    #[rstest]
    fn two_constructors_are_ambiguous() {
        // Act
        let result = account_builder()
            .constructor(|| Account {
                name: "a".to_string(),
            })
            .try_constructor(|| {
                Ok::<_, std::io::Error>(Account {
                    name: "b".to_string(),
                })
            })
            .build();

        // Assert
        assert!(matches!(
            result,
            Err(RegisterError::AmbiguousConstructor { found: 2, .. })
        ));
    }

    #[rstest]
    fn dependencies_follow_parameter_order() {
        // Act
        let component = account_builder()
            .constructor(|prefix: Arc<String>, id: Arc<u64>| Account {
                name: format!("{prefix}-{id}"),
            })
            .build()
            .unwrap();

        // Assert
        assert_eq!(
            component.dependencies(),
            &[TypeInfo::of::<String>(), TypeInfo::of::<u64>()]
        );
        assert!(component.is_constructible());
    }

    #[rstest]
    fn provides_lists_own_type_and_interfaces_once() {
        // Act
        let component = account_builder()
            .constructor(|| Account {
                name: "a".to_string(),
            })
            .provides::<dyn Named>(|account| account)
            .provides::<dyn Audited>(|account| account)
            .provides::<dyn Named>(|account| account)
            .build()
            .unwrap();

        // Assert
        assert_eq!(
            component.provides(),
            vec![
                TypeInfo::of::<Account>(),
                TypeInfo::of::<dyn Named>(),
                TypeInfo::of::<dyn Audited>(),
            ]
        );
    }

    #[rstest]
    fn own_type_is_not_an_interface() {
        // Act
        let component = account_builder()
            .constructor(|| Account {
                name: "a".to_string(),
            })
            .provides::<Account>(|account| account)
            .build()
            .unwrap();

        // Assert
        assert!(component.interfaces().is_empty());
        assert_eq!(component.provides(), vec![TypeInfo::of::<Account>()]);
    }

    #[rstest]
    fn instantiate_binds_same_value_under_all_keys() {
        // Arrange
        let component = account_builder()
            .constructor(|| Account {
                name: "shared".to_string(),
            })
            .provides::<dyn Named>(|account| account)
            .build()
            .unwrap();

        // Act
        let instances = component
            .instantiate(&mut Arguments::new(vec![]))
            .unwrap()
            .unwrap();

        // Assert
        let concrete = instances[0].downcast::<Account>().unwrap();
        let named = instances[1].downcast::<dyn Named>().unwrap();
        assert_eq!(named.name(), "shared");
        assert_eq!(
            Arc::as_ptr(&concrete) as *const u8,
            Arc::as_ptr(&named) as *const u8
        );
    }

    #[rstest]
    fn interface_declaration_is_skipped() {
        // Arrange
        let component = Component::interface::<dyn Named>();

        // Act
        let instances = component.instantiate(&mut Arguments::new(vec![])).unwrap();

        // Assert
        assert!(instances.is_none());
    }

    #[rstest]
    fn interface_declaration_provides_nothing() {
        let component = Component::interface::<dyn Named>();

        assert!(!component.is_constructible());
        assert!(component.provides().is_empty());
        assert_eq!(component.info(), TypeInfo::of::<dyn Named>());
    }
}
