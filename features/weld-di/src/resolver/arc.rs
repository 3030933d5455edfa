use std::{any::type_name, sync::Arc};

use crate::{
    errors::{InjectError, RequireError},
    resolver::{Arguments, Resolver},
    types::{Injectable, TypeInfo},
};

impl<T: ?Sized + Injectable> Resolver for Arc<T> {
    fn resolve(args: &mut Arguments) -> Result<Self, InjectError> {
        let resolved = args.take(type_name::<T>())?;
        let downcasted = resolved
            .downcast::<T>()
            .map_err(|actual_type| RequireError::DowncastFailed {
                required_type: type_name::<T>(),
                actual_type,
            })?;

        Ok(downcasted)
    }

    fn dependency_info() -> TypeInfo {
        TypeInfo::of::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Instance;
    use rstest::rstest;

    trait Clock: Send + Sync {}
    struct SystemClock;
    impl Clock for SystemClock {}

    #[rstest]
    fn resolves_arguments_in_order() {
        // Arrange
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let name = Arc::new(String::from("weld"));
        let mut args = Arguments::new(vec![Instance::new(clock), Instance::new(Arc::clone(&name))]);

        // Act
        let first = <Arc<dyn Clock>>::resolve(&mut args);
        let second = <Arc<String>>::resolve(&mut args).unwrap();

        // Assert
        assert!(first.is_ok());
        assert!(Arc::ptr_eq(&second, &name));
        assert_eq!(args.remaining(), 0);
    }

    #[rstest]
    fn wrong_argument_type_fails_downcast() {
        // Arrange
        let mut args = Arguments::new(vec![Instance::new(Arc::new(SystemClock))]);

        // Act
        let result = <Arc<String>>::resolve(&mut args);

        // Assert
        assert!(matches!(
            result,
            Err(InjectError::RequireError(RequireError::DowncastFailed { .. }))
        ));
    }

    #[rstest]
    fn exhausted_arguments_are_reported() {
        let mut args = Arguments::new(vec![]);

        let result = <Arc<String>>::resolve(&mut args);

        assert!(matches!(result, Err(InjectError::ArgumentsExhausted(_))));
    }

    #[rstest]
    fn dependency_info_of_interface() {
        assert_eq!(
            <Arc<dyn Clock>>::dependency_info(),
            TypeInfo::of::<dyn Clock>()
        );
    }
}
