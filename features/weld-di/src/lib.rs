//! Weld DI wires an application out of components.
//!
//! Every component is registered with a constructor whose parameters are its dependencies.
//! Wiring constructs each component exactly once, as soon as all of its dependencies exist,
//! and binds the instance under its own type and under every interface it provides.
//!
//! ```rust
//! use std::sync::Arc;
//! use weld_di::{Component, DiBuilder};
//!
//! trait Logger: Send + Sync {
//!     fn log(&self, message: &str);
//! }
//!
//! struct ConsoleLogger;
//! impl Logger for ConsoleLogger {
//!     fn log(&self, message: &str) {
//!         println!("{message}");
//!     }
//! }
//!
//! struct Service {
//!     logger: Arc<dyn Logger>,
//! }
//!
//! let mut builder = DiBuilder::new();
//! builder
//!     .add_component(
//!         Component::builder::<Service>()
//!             .constructor(|logger: Arc<dyn Logger>| Service { logger }),
//!     )
//!     .unwrap()
//!     .add_component(
//!         Component::builder::<ConsoleLogger>()
//!             .constructor(|| ConsoleLogger)
//!             .provides::<dyn Logger>(|logger| logger),
//!     )
//!     .unwrap();
//!
//! let container = builder.build().unwrap();
//! let service = container.require::<Service>().unwrap();
//! service.logger.log("wired");
//! ```
//!
//! Weld DI consists of the following components:
//!
//! 1. Component - for describing a type, its constructor and its interfaces
//! 2. DiBuilder - for registering components
//! 3. Initiator - for constructing all components in dependency order
//! 4. DiContainer - for retrieving the constructed instances
//! 5. Errors - for registration, wiring and lookup errors

pub mod builder;
pub mod component;
pub mod container;
pub mod dependency_graph;
pub mod errors;
pub mod factories;
pub(crate) mod initiator;
pub mod resolver;
pub mod store;
pub mod types;

pub use builder::DiBuilder;
pub use component::{Component, ComponentBuilder};
pub use container::DiContainer;
pub use errors::{
    DiError, InitError, InjectError, RegisterError, RequireError, UnmetDependencies,
    UnresolvedComponent,
};
pub use factories::{Constructor, InstanceFactory, TryConstructor};
pub use resolver::{Arguments, Resolver};
pub use types::{DynError, Injectable, Instance, TypeInfo};
