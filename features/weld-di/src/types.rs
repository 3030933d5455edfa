use std::{
    any::{Any, TypeId},
    sync::Arc,
};

/// All errors must be shareable between threads
pub type DynError = Box<dyn std::error::Error + Send + Sync>;

/// Anything stored in the container is shared behind an `Arc` and handed out
/// freely after wiring, so it needs to be Send + Sync + 'static.
///
/// Also implemented for trait objects such as `dyn Logger` as long as the trait
/// has `Send + Sync` as supertraits.
pub trait Injectable: Send + Sync + 'static {}
impl<T: ?Sized + Send + Sync + 'static> Injectable for T {}

/// Type-erased instance bound under a single key
///
/// Holds an `Arc<T>` where `T` is the key type, which may be unsized (`dyn Trait`).
/// Cloning an `Instance` never clones the value itself.
#[derive(Clone)]
pub struct Instance {
    pub info: TypeInfo,
    instance: Arc<dyn Any + Send + Sync>,
}

impl Instance {
    pub(crate) fn new<T: ?Sized + Injectable>(instance: Arc<T>) -> Self {
        Instance {
            info: TypeInfo::of::<T>(),
            instance: Arc::new(instance),
        }
    }

    /// Recovers the `Arc<T>` the instance was created from
    ///
    /// Returns the name of the contained type on mismatch.
    pub fn downcast<T: ?Sized + Injectable>(&self) -> Result<Arc<T>, &'static str> {
        match self.instance.downcast_ref::<Arc<T>>() {
            Some(downcasted) => Ok(Arc::clone(downcasted)),
            None => Err(self.info.type_name),
        }
    }
}

/// Type Name and Type Id
///
/// The identity of a concrete type or an interface (trait object) inside the container.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct TypeInfo {
    pub type_name: &'static str,
    pub type_id: TypeId,
}
impl std::fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name)
    }
}
impl TypeInfo {
    pub fn of<T: 'static + ?Sized>() -> TypeInfo {
        TypeInfo {
            type_name: std::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
        }
    }
}
