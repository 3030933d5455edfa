use std::{ops::Deref, sync::Arc};

use weld_di::{
    errors::InjectError,
    resolver::{Arguments, Resolver},
    types::{Injectable, TypeInfo},
};

use crate::provider::ConfigProvider;

/// A wrapper type to allow for config injections
///
/// This provides a simple way to retrieve configs from the config registry,
/// and take them as a constructor parameter. The component then depends on
/// the [ConfigProvider], which must be registered as an instance.
///
/// # Example
/// ```rust
/// use weld_config::{config::Config, provider::ConfigProvider};
/// use weld_di::{Component, DiBuilder};
///
/// pub struct ServerConfig {
///     port: u16,
/// }
///
/// pub struct Server {
///     port: u16,
/// }
///
/// let mut configs = ConfigProvider::new();
/// configs.add_config(ServerConfig { port: 8080 }).unwrap();
///
/// let mut builder = DiBuilder::new();
/// builder
///     .add_instance(configs)
///     .unwrap()
///     .add_component(
///         Component::builder::<Server>()
///             .constructor(|config: Config<ServerConfig>| Server { port: config.port }),
///     )
///     .unwrap();
///
/// let container = builder.build().unwrap();
/// assert_eq!(container.require::<Server>().unwrap().port, 8080);
/// ```
pub struct Config<T> {
    inner: Arc<T>,
}
impl<T> Deref for Config<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
impl<T> Config<T> {
    pub fn inner(&self) -> Arc<T> {
        self.inner.clone()
    }

    pub fn into_inner(self) -> Arc<T> {
        self.inner
    }
}

impl<T: Injectable> Resolver for Config<T> {
    fn resolve(args: &mut Arguments) -> Result<Self, InjectError>
    where
        Self: Sized,
    {
        let config_provider = <Arc<ConfigProvider>>::resolve(args)?;
        let inner = config_provider.get_config::<T>()?;
        Ok(Config { inner })
    }

    fn dependency_info() -> TypeInfo {
        TypeInfo::of::<ConfigProvider>()
    }
}
