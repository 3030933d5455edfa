use std::collections::VecDeque;

use crate::{
    errors::InjectError,
    types::{Instance, TypeInfo},
};

pub mod arc;

/// A type which can appear as a constructor parameter
///
/// Each resolver declares the single container binding it depends on, and turns the
/// instance resolved for that binding into the parameter value.
pub trait Resolver {
    fn resolve(args: &mut Arguments) -> Result<Self, InjectError>
    where
        Self: Sized;

    fn dependency_info() -> TypeInfo;
}

/// Resolved instances for one constructor call, in declared parameter order
pub struct Arguments {
    values: VecDeque<Instance>,
}
impl Arguments {
    pub(crate) fn new(values: Vec<Instance>) -> Self {
        Self {
            values: values.into(),
        }
    }

    /// Takes the next argument
    pub fn take(&mut self, for_type: &'static str) -> Result<Instance, InjectError> {
        self.values
            .pop_front()
            .ok_or(InjectError::ArgumentsExhausted(for_type))
    }

    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}
