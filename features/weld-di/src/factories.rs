use std::marker::PhantomData;

use crate::{
    resolver::{Arguments, Resolver},
    types::{DynError, Injectable, TypeInfo},
};

/// A Factory providing an instance of a given type
pub trait InstanceFactory: 'static {
    type Provides: Injectable;

    /// Returns the typeinfo about the factory's provided type
    fn supplies() -> TypeInfo {
        TypeInfo::of::<Self::Provides>()
    }

    /// Returns the factory's constructor parameters, in the order `construct` takes them
    fn get_dependencies() -> Vec<TypeInfo>;

    /// Constructs the factory's provided type
    ///
    /// `args` holds one resolved instance per entry of [InstanceFactory::get_dependencies].
    fn construct(
        self,
        args: &mut Arguments,
    ) -> Result<Self::Provides, impl Into<DynError>>;
}

/// Boxable form of [InstanceFactory]
pub(crate) trait DynFactory<T> {
    fn dependencies(&self) -> Vec<TypeInfo>;

    fn construct(self: Box<Self>, args: &mut Arguments) -> Result<T, DynError>;
}
// Impl DynFactory for any InstanceFactory
impl<T: Injectable, SpecificFactory: InstanceFactory<Provides = T>> DynFactory<T>
    for SpecificFactory
{
    fn dependencies(&self) -> Vec<TypeInfo> {
        SpecificFactory::get_dependencies()
    }

    fn construct(self: Box<Self>, args: &mut Arguments) -> Result<T, DynError> {
        // Forward the call to the specific implementation
        SpecificFactory::construct(*self, args).map_err(|e| e.into())
    }
}

/// A function which constructs a component from its resolved parameters
///
/// Implemented for closures of up to 8 parameters, where every parameter is a [Resolver].
pub trait Constructor<Args>: 'static {
    type Output: Injectable;

    fn dependencies() -> Vec<TypeInfo>;

    fn call(self, args: &mut Arguments) -> Result<Self::Output, DynError>;
}

/// Same as [Constructor] for functions returning a `Result`
pub trait TryConstructor<Args>: 'static {
    type Output: Injectable;

    fn dependencies() -> Vec<TypeInfo>;

    fn call(self, args: &mut Arguments) -> Result<Self::Output, DynError>;
}

macro_rules! impl_constructors {
    ($($arg:ident),*) => {
        impl<Fun, Out, $($arg,)*> Constructor<($($arg,)*)> for Fun
        where
            Fun: FnOnce($($arg),*) -> Out + 'static,
            Out: Injectable,
            $($arg: Resolver,)*
        {
            type Output = Out;

            fn dependencies() -> Vec<TypeInfo> {
                vec![$($arg::dependency_info()),*]
            }

            #[allow(non_snake_case, unused_variables)]
            fn call(self, args: &mut Arguments) -> Result<Out, DynError> {
                $(let $arg = $arg::resolve(args)?;)*
                Ok(self($($arg),*))
            }
        }

        impl<Fun, Out, Err, $($arg,)*> TryConstructor<($($arg,)*)> for Fun
        where
            Fun: FnOnce($($arg),*) -> Result<Out, Err> + 'static,
            Out: Injectable,
            Err: Into<DynError>,
            $($arg: Resolver,)*
        {
            type Output = Out;

            fn dependencies() -> Vec<TypeInfo> {
                vec![$($arg::dependency_info()),*]
            }

            #[allow(non_snake_case, unused_variables)]
            fn call(self, args: &mut Arguments) -> Result<Out, DynError> {
                $(let $arg = $arg::resolve(args)?;)*
                self($($arg),*).map_err(Into::into)
            }
        }
    };
}

impl_constructors!();
impl_constructors!(A1);
impl_constructors!(A1, A2);
impl_constructors!(A1, A2, A3);
impl_constructors!(A1, A2, A3, A4);
impl_constructors!(A1, A2, A3, A4, A5);
impl_constructors!(A1, A2, A3, A4, A5, A6);
impl_constructors!(A1, A2, A3, A4, A5, A6, A7);
impl_constructors!(A1, A2, A3, A4, A5, A6, A7, A8);

/// Adapts a [Constructor] into an [InstanceFactory]
pub(crate) struct FnFactory<Fun, Args> {
    constructor: Fun,
    _args: PhantomData<fn(Args)>,
}
impl<Fun: Constructor<Args>, Args> FnFactory<Fun, Args> {
    pub(crate) fn new(constructor: Fun) -> Self {
        Self {
            constructor,
            _args: PhantomData,
        }
    }
}
impl<Fun: Constructor<Args>, Args: 'static> InstanceFactory for FnFactory<Fun, Args> {
    type Provides = Fun::Output;

    fn get_dependencies() -> Vec<TypeInfo> {
        Fun::dependencies()
    }

    #[allow(refining_impl_trait)]
    fn construct(self, args: &mut Arguments) -> Result<Self::Provides, DynError> {
        self.constructor.call(args)
    }
}

/// Adapts a [TryConstructor] into an [InstanceFactory]
pub(crate) struct TryFnFactory<Fun, Args> {
    constructor: Fun,
    _args: PhantomData<fn(Args)>,
}
impl<Fun: TryConstructor<Args>, Args> TryFnFactory<Fun, Args> {
    pub(crate) fn new(constructor: Fun) -> Self {
        Self {
            constructor,
            _args: PhantomData,
        }
    }
}
impl<Fun: TryConstructor<Args>, Args: 'static> InstanceFactory for TryFnFactory<Fun, Args> {
    type Provides = Fun::Output;

    fn get_dependencies() -> Vec<TypeInfo> {
        Fun::dependencies()
    }

    #[allow(refining_impl_trait)]
    fn construct(self, args: &mut Arguments) -> Result<Self::Provides, DynError> {
        self.constructor.call(args)
    }
}
