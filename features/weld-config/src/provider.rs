use std::{
    any::Any,
    collections::{btree_map::Entry, BTreeMap},
    sync::Arc,
};

use weld_di::types::{Injectable, TypeInfo};

use crate::errors::ConfigError;

type ConfigValue = Arc<dyn Any + Send + Sync>;

/// A typed registry of config values.
///
/// Each config type is stored once, under its [TypeInfo]. Register the provider itself with
/// `DiBuilder::add_instance` so components can take configs as [Config](crate::config::Config)
/// parameters.
#[derive(Default)]
pub struct ConfigProvider {
    configs: BTreeMap<TypeInfo, ConfigValue>,
}

impl ConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the config of type `T`.
    ///
    /// Fails with [ConfigError::Missing] naming `T` if it was never added.
    pub fn get_config<T: Injectable>(&self) -> Result<Arc<T>, ConfigError> {
        let info = TypeInfo::of::<T>();
        // Values are keyed by their own type, so the downcast only fails for absent keys
        self.configs
            .get(&info)
            .and_then(|value| Arc::clone(value).downcast::<T>().ok())
            .ok_or(ConfigError::Missing(info))
    }

    /// Adds a config, rejecting a second value of the same type.
    pub fn add_config<T: Injectable>(&mut self, config: T) -> Result<&mut Self, ConfigError> {
        match self.configs.entry(TypeInfo::of::<T>()) {
            Entry::Occupied(entry) => Err(ConfigError::AlreadyRegistered(*entry.key())),
            Entry::Vacant(entry) => {
                tracing::trace!("Added config '{}'", entry.key());
                entry.insert(Arc::new(config));
                Ok(self)
            }
        }
    }

    /// Adds the config if there is one, otherwise leaves the registry unchanged.
    pub fn maybe_add_config<T: Injectable>(
        &mut self,
        config: Option<T>,
    ) -> Result<&mut Self, ConfigError> {
        match config {
            Some(config) => self.add_config(config),
            None => Ok(self),
        }
    }

    pub fn contains<T: Injectable>(&self) -> bool {
        self.configs.contains_key(&TypeInfo::of::<T>())
    }

    /// The registered config types, sorted by name
    pub fn types(&self) -> impl Iterator<Item = TypeInfo> + '_ {
        self.configs.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[derive(Clone, Debug, PartialEq)]
    struct AppConfig {
        host: String,
        port: u16,
    }

    struct LogConfig;

    #[fixture]
    fn app_config() -> AppConfig {
        AppConfig {
            host: "localhost".to_string(),
            port: 8080,
        }
    }

    #[rstest]
    fn added_config_can_be_retrieved(app_config: AppConfig) {
        // Arrange
        let mut provider = ConfigProvider::new();
        provider.add_config(app_config.clone()).unwrap();

        // Act
        let retrieved = provider.get_config::<AppConfig>().unwrap();

        // Assert
        assert_eq!(*retrieved, app_config);
        assert!(provider.contains::<AppConfig>());
    }

    #[rstest]
    fn unknown_config_is_missing_by_type() {
        // Arrange
        let provider = ConfigProvider::new();

        // Act
        let result = provider.get_config::<AppConfig>();

        // Assert
        match result {
            Err(ConfigError::Missing(info)) => {
                assert_eq!(info, TypeInfo::of::<AppConfig>());
                assert!(info.type_name.ends_with("AppConfig"));
            }
            Err(other) => panic!("expected a missing config, got {other}"),
            Ok(_) => panic!("expected a missing config"),
        }
    }

    #[rstest]
    fn config_can_only_be_added_once(app_config: AppConfig) {
        // Arrange
        let mut provider = ConfigProvider::new();
        provider.add_config(app_config.clone()).unwrap();

        // Act
        let result = provider.add_config(app_config).map(|_| ());

        // Assert
        assert!(matches!(
            result,
            Err(ConfigError::AlreadyRegistered(info)) if info == TypeInfo::of::<AppConfig>()
        ));
        assert_eq!(provider.len(), 1);
    }

    #[rstest]
    #[case(true, 1)]
    #[case(false, 0)]
    fn maybe_add_config_skips_none(
        app_config: AppConfig,
        #[case] present: bool,
        #[case] expected: usize,
    ) {
        // Arrange
        let mut provider = ConfigProvider::new();

        // Act
        provider.maybe_add_config(present.then_some(app_config)).unwrap();

        // Assert
        assert_eq!(provider.len(), expected);
    }

    #[rstest]
    fn types_lists_every_config(app_config: AppConfig) {
        // Arrange
        let mut provider = ConfigProvider::new();
        provider
            .add_config(LogConfig)
            .unwrap()
            .add_config(app_config)
            .unwrap();

        // Act
        let mut types = provider.types().collect::<Vec<_>>();
        types.sort();

        // Assert
        let mut expected = vec![TypeInfo::of::<AppConfig>(), TypeInfo::of::<LogConfig>()];
        expected.sort();
        assert_eq!(types, expected);
    }
}
