//! Customization hooks and flavors
//!
//! Hooks are attached to a component programmatically and run after the
//! standard objects are built, one per [`Stage`], in stage order. Flavors are
//! named bundles of customization looked up in a host-provided
//! [`FlavorRegistry`] and applied before any hook runs.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::k8s::{Container, ContainerPort, PodSpec, ServicePort, ServiceSpec};
use crate::resources::AppComponentResources;

// =============================================================================
// Stages
// =============================================================================

/// Pipeline stage a hook runs at. Ordering is execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// Service ports and container port lists
    Ports,
    /// The pod's container list
    Containers,
    /// The deployment's pod spec
    Pod,
    /// The service spec
    Service,
    /// The whole resource bundle
    General,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ports => "ports",
            Self::Containers => "containers",
            Self::Pod => "pod",
            Self::Service => "service",
            Self::General => "general",
        };
        f.write_str(s)
    }
}

// =============================================================================
// Hooks
// =============================================================================

/// Hook over the service ports and every container's port list
pub type PortsHook = dyn Fn(&mut Vec<ServicePort>, &mut [&mut Vec<ContainerPort>]) + Send + Sync;
/// Hook over the pod's container list
pub type ContainersHook = dyn Fn(&mut Vec<Container>) + Send + Sync;
/// Hook over the deployment's pod spec
pub type PodHook = dyn Fn(&mut PodSpec) + Send + Sync;
/// Hook over the service spec
pub type ServiceHook = dyn Fn(&mut ServiceSpec) + Send + Sync;
/// Hook over the whole resource bundle
pub type GeneralHook = dyn Fn(&mut AppComponentResources) + Send + Sync;

/// A single customization hook tagged with its stage
#[derive(Clone)]
pub enum Customizer {
    /// Runs at [`Stage::Ports`]
    Ports(Arc<PortsHook>),
    /// Runs at [`Stage::Containers`]
    Containers(Arc<ContainersHook>),
    /// Runs at [`Stage::Pod`]
    Pod(Arc<PodHook>),
    /// Runs at [`Stage::Service`]
    Service(Arc<ServiceHook>),
    /// Runs at [`Stage::General`]
    General(Arc<GeneralHook>),
}

impl Customizer {
    /// Hook over service ports and container port lists
    pub fn ports<F>(f: F) -> Self
    where
        F: Fn(&mut Vec<ServicePort>, &mut [&mut Vec<ContainerPort>]) + Send + Sync + 'static,
    {
        Self::Ports(Arc::new(f))
    }

    /// Hook over the pod's container list
    pub fn containers<F>(f: F) -> Self
    where
        F: Fn(&mut Vec<Container>) + Send + Sync + 'static,
    {
        Self::Containers(Arc::new(f))
    }

    /// Hook over the deployment's pod spec
    pub fn pod<F>(f: F) -> Self
    where
        F: Fn(&mut PodSpec) + Send + Sync + 'static,
    {
        Self::Pod(Arc::new(f))
    }

    /// Hook over the service spec
    pub fn service<F>(f: F) -> Self
    where
        F: Fn(&mut ServiceSpec) + Send + Sync + 'static,
    {
        Self::Service(Arc::new(f))
    }

    /// Hook over the whole resource bundle
    pub fn general<F>(f: F) -> Self
    where
        F: Fn(&mut AppComponentResources) + Send + Sync + 'static,
    {
        Self::General(Arc::new(f))
    }

    /// Stage this hook runs at
    pub fn stage(&self) -> Stage {
        match self {
            Self::Ports(_) => Stage::Ports,
            Self::Containers(_) => Stage::Containers,
            Self::Pod(_) => Stage::Pod,
            Self::Service(_) => Stage::Service,
            Self::General(_) => Stage::General,
        }
    }

    /// Whether both values share the same underlying hook
    pub fn same_hook(&self, other: &Customizer) -> bool {
        self.data_ptr() == other.data_ptr()
    }

    fn data_ptr(&self) -> *const () {
        match self {
            Self::Ports(f) => Arc::as_ptr(f) as *const (),
            Self::Containers(f) => Arc::as_ptr(f) as *const (),
            Self::Pod(f) => Arc::as_ptr(f) as *const (),
            Self::Service(f) => Arc::as_ptr(f) as *const (),
            Self::General(f) => Arc::as_ptr(f) as *const (),
        }
    }
}

impl fmt::Debug for Customizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Customizer({})", self.stage())
    }
}

/// At most one hook per stage
#[derive(Clone, Default)]
pub struct Customizers {
    hooks: BTreeMap<Stage, Customizer>,
}

impl Customizers {
    /// Empty hook set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hook, returning the one it replaced at the same stage
    pub fn insert(&mut self, customizer: Customizer) -> Option<Customizer> {
        self.hooks.insert(customizer.stage(), customizer)
    }

    /// Hook registered for a stage
    pub fn get(&self, stage: Stage) -> Option<&Customizer> {
        self.hooks.get(&stage)
    }

    /// Hooks in execution order
    pub fn iter(&self) -> impl Iterator<Item = &Customizer> {
        self.hooks.values()
    }

    /// Stages that have a hook, in execution order
    pub fn stages(&self) -> impl Iterator<Item = Stage> + '_ {
        self.hooks.keys().copied()
    }

    /// Whether no hook is registered
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl fmt::Debug for Customizers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.hooks.keys()).finish()
    }
}

impl PartialEq for Customizers {
    fn eq(&self, other: &Self) -> bool {
        self.hooks.len() == other.hooks.len()
            && self
                .hooks
                .iter()
                .zip(other.hooks.iter())
                .all(|((a_stage, a), (b_stage, b))| a_stage == b_stage && a.same_hook(b))
    }
}

// =============================================================================
// Flavors
// =============================================================================

/// Named bundle of customization applied to a freshly built resource bundle
pub trait Flavor: Send + Sync {
    /// Adjust the bundle in place
    fn apply(&self, resources: &mut AppComponentResources);
}

impl<F> Flavor for F
where
    F: Fn(&mut AppComponentResources) + Send + Sync,
{
    fn apply(&self, resources: &mut AppComponentResources) {
        self(resources)
    }
}

/// Flavors available to an app, keyed by name
#[derive(Clone, Default)]
pub struct FlavorRegistry {
    flavors: BTreeMap<String, Arc<dyn Flavor>>,
}

impl FlavorRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a flavor under a name, replacing any previous one
    pub fn register(&mut self, name: impl Into<String>, flavor: impl Flavor + 'static) {
        self.flavors.insert(name.into(), Arc::new(flavor));
    }

    /// Builder form of [`FlavorRegistry::register`]
    pub fn with(mut self, name: impl Into<String>, flavor: impl Flavor + 'static) -> Self {
        self.register(name, flavor);
        self
    }

    /// Look up a flavor by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Flavor>> {
        self.flavors.get(name)
    }

    /// Registered flavor names
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.flavors.keys().map(String::as_str)
    }
}

impl fmt::Debug for FlavorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.flavors.keys()).finish()
    }
}
