use weld_di::{
    errors::{InjectError, RequireError},
    types::TypeInfo,
};

/// Errors of the [ConfigProvider](crate::provider::ConfigProvider)
#[derive(thiserror::Error, Debug, Clone)]
pub enum ConfigError {
    /// No config of this type was added
    #[error("The required Config type '{0}' is not known")]
    Missing(TypeInfo),
    #[error("The Config type '{0}' is already registered")]
    AlreadyRegistered(TypeInfo),
}

/// A missing config is a missing constructor argument
impl From<ConfigError> for InjectError {
    fn from(error: ConfigError) -> Self {
        match error {
            ConfigError::Missing(info) => RequireError::NotFound(info.type_name).into(),
            other => InjectError::Other(Box::new(other)),
        }
    }
}
