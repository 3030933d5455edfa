use std::{
    any::TypeId,
    collections::{BTreeMap, HashMap, HashSet},
};

use thiserror::Error;

use crate::{errors::RegisterError, types::TypeInfo};

/// Graph of all registered components
///
/// Records which component provides which type, and what each component depends on.
/// Used to reject duplicate registrations and to explain why wiring got stuck.
#[derive(Default)]
pub struct DependencyGraph {
    map: BTreeMap<TypeId, DependencyGraphEntry>,
    /// Bound type (concrete or interface) -> components providing it, in registration order
    providers: HashMap<TypeId, Vec<TypeInfo>>,
}
impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a component
    ///
    /// `provides` lists every key the component will be bound under, empty for
    /// interface declarations.
    pub fn add(
        &mut self,
        info: TypeInfo,
        dependencies: Vec<TypeInfo>,
        provides: &[TypeInfo],
    ) -> Result<(), RegisterError> {
        if self.map.contains_key(&info.type_id) {
            return Err(RegisterError::DuplicateRegistration(info));
        }

        self.map
            .insert(info.type_id, DependencyGraphEntry { info, dependencies });
        for provided in provides {
            self.providers
                .entry(provided.type_id)
                .or_default()
                .push(info);
        }

        Ok(())
    }

    /// Direct dependencies of a registered component, in constructor order
    pub fn dependencies_of(&self, component: &TypeInfo) -> Option<&[TypeInfo]> {
        self.map
            .get(&component.type_id)
            .map(|entry| entry.dependencies.as_slice())
    }

    /// Components which will be bound under the given type
    pub fn providers_of(&self, binding: &TypeInfo) -> &[TypeInfo] {
        self.providers
            .get(&binding.type_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Finds the root causes keeping the given components from being constructed
    ///
    /// Only edges between the stuck components are followed, everything else is
    /// assumed to be constructed already.
    pub fn diagnose(&self, stuck: &[TypeInfo]) -> Vec<DependencyGraphError> {
        let stuck_ids: HashSet<TypeId> = stuck.iter().map(|info| info.type_id).collect();
        let mut checked = HashSet::new();
        let mut errors = Vec::new();
        for info in stuck {
            let Some(entry) = self.map.get(&info.type_id) else {
                continue;
            };
            let mut dependency_chain = Vec::new();
            diagnose_recurse(
                self,
                &stuck_ids,
                &mut checked,
                &mut errors,
                &mut dependency_chain,
                entry,
            );
        }

        return errors;

        fn diagnose_recurse(
            graph: &DependencyGraph,
            stuck: &HashSet<TypeId>,
            checked: &mut HashSet<TypeId>,
            errors: &mut Vec<DependencyGraphError>,
            dependency_chain: &mut Vec<TypeInfo>,
            entry: &DependencyGraphEntry,
        ) {
            // Circular Dependency Check
            if let Some(start) = dependency_chain.iter().position(|info| *info == entry.info) {
                let mut chain = dependency_chain[start..].to_vec();
                chain.push(entry.info);
                errors.push(DependencyGraphError::CircularDependency {
                    chain: DependencyChain(chain),
                });
                return;
            }

            if !checked.insert(entry.info.type_id) {
                return;
            }

            dependency_chain.push(entry.info);

            for dependency in &entry.dependencies {
                let providers = graph.providers_of(dependency);
                if providers.is_empty() {
                    errors.push(DependencyGraphError::MissingDependency {
                        dependency: *dependency,
                        required_by: entry.info,
                    });
                    continue;
                }

                for provider in providers {
                    if !stuck.contains(&provider.type_id) {
                        continue;
                    }
                    if let Some(next_entry) = graph.map.get(&provider.type_id) {
                        diagnose_recurse(
                            graph,
                            stuck,
                            checked,
                            errors,
                            dependency_chain,
                            next_entry,
                        );
                    }
                }
            }

            dependency_chain.pop();
        }
    }
}

struct DependencyGraphEntry {
    info: TypeInfo,
    dependencies: Vec<TypeInfo>,
}

/// Ordered list of components, each depending on the next
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyChain(pub Vec<TypeInfo>);
impl std::fmt::Display for DependencyChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.0.iter().map(|info| info.type_name).collect();
        f.write_str(&names.join(" -> "))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DependencyGraphError {
    #[error("'{required_by}' needs '{dependency}' but nothing registered provides it")]
    MissingDependency {
        dependency: TypeInfo,
        required_by: TypeInfo,
    },
    #[error("A Circular Dependency exists: {chain}")]
    CircularDependency { chain: DependencyChain },
}
