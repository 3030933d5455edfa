use std::sync::Arc;

use crate::{
    builder::DiBuilder,
    component::Component,
    container::DiContainer,
    errors::{InitError, UnmetDependencies, UnresolvedComponent},
    resolver::Arguments,
    store::InstanceStore,
    types::{Instance, TypeInfo},
};

/// Initiates the DiContainer
///
/// Wiring runs in passes over the pending components. A component is constructed as soon
/// as every one of its dependencies is bound. Wiring stops once nothing is pending, or
/// fails once a full pass constructs nothing.
pub(crate) struct DiInitiator {
    /// All produced instances
    store: InstanceStore,
    /// Concrete components in the order they were constructed
    construction_order: Vec<TypeInfo>,
}

/// Result of a single pass over the pending components
struct Pass {
    resolved: usize,
    still_pending: Vec<Component>,
}

impl DiInitiator {
    pub(crate) fn new() -> DiInitiator {
        DiInitiator {
            store: InstanceStore::new(),
            construction_order: Vec::new(),
        }
    }

    pub fn initiate(mut self, blueprint: DiBuilder) -> Result<DiContainer, InitError> {
        let DiBuilder { components, graph } = blueprint;

        tracing::debug!("Wiring application with {} components", components.len());

        let mut pending = components;
        let mut pass_count = 0;
        while !pending.is_empty() {
            pass_count += 1;
            tracing::debug!(
                "Starting pass {pass_count} with {} pending components",
                pending.len()
            );

            let pass = self.run_pass(pending)?;
            if pass.resolved == 0 {
                let unresolved: Vec<_> = pass
                    .still_pending
                    .iter()
                    .map(|component| UnresolvedComponent {
                        component: component.info(),
                        missing: self.store.missing(component.dependencies()),
                    })
                    .collect();
                let stuck: Vec<_> = unresolved.iter().map(|entry| entry.component).collect();
                let error = UnmetDependencies {
                    unresolved,
                    causes: graph.diagnose(&stuck),
                };

                tracing::error!("{error}");
                return Err(error.into());
            }

            pending = pass.still_pending;
        }

        tracing::debug!(
            "All {} components constructed in {pass_count} passes, {} bindings",
            self.construction_order.len(),
            self.store.len()
        );

        Ok(DiContainer::new(self.store, graph, self.construction_order))
    }

    /// Tries to construct each pending component once, in order
    ///
    /// Instances created earlier in the pass are available to later components.
    fn run_pass(&mut self, pending: Vec<Component>) -> Result<Pass, InitError> {
        let mut resolved = 0;
        let mut still_pending = Vec::with_capacity(pending.len());

        for component in pending {
            match self.store.resolve_all(component.dependencies()) {
                Some(arguments) => {
                    self.instantiate(component, arguments)?;
                    resolved += 1;
                }
                None => still_pending.push(component),
            }
        }

        Ok(Pass {
            resolved,
            still_pending,
        })
    }

    /// Constructs a component and binds its instances
    fn instantiate(
        &mut self,
        component: Component,
        arguments: Vec<Instance>,
    ) -> Result<(), InitError> {
        let info = component.info();
        let mut arguments = Arguments::new(arguments);

        let instances = match component.instantiate(&mut arguments) {
            Ok(Some(instances)) => instances,
            Ok(None) => {
                tracing::debug!("Skipping interface declaration {}", info.type_name);
                return Ok(());
            }
            Err(error) => {
                tracing::error!("Construction of {} failed: {}", info.type_name, error);
                return Err(InitError::ConstructionFailed {
                    component: info,
                    error: Arc::new(error),
                });
            }
        };

        self.store
            .bind_all(info, instances)
            .inspect_err(|error| tracing::error!("{error}"))?;
        self.construction_order.push(info);

        tracing::debug!("Constructed instance of {}", info.type_name);
        Ok(())
    }
}
