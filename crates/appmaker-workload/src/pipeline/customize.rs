//! Flavor and customization hook execution

use tracing::debug;

use crate::customize::{Customizer, Customizers, Flavor};
use crate::k8s::ContainerPort;
use crate::resources::AppComponentResources;

/// Apply a resolved flavor to a freshly built bundle
pub fn apply_flavor(resources: &mut AppComponentResources, flavor: &dyn Flavor) {
    let manifest = resources.manifest();
    debug!(
        component = %manifest.derived_name(),
        flavor = manifest.flavor.as_deref().unwrap_or_default(),
        "applying flavor"
    );
    flavor.apply(resources);
}

/// Run every registered hook in stage order.
///
/// Hooks whose target object does not exist are skipped. The ports hook only
/// runs when ports are enabled; without a service it edits a scratch list.
pub fn run_hooks(resources: &mut AppComponentResources, hooks: &Customizers) {
    let ports_enabled = resources.manifest().ports_enabled();

    for hook in hooks.iter() {
        let stage = hook.stage();
        match hook {
            Customizer::Ports(f) => {
                if !ports_enabled {
                    debug!(%stage, "ports disabled, skipping hook");
                    continue;
                }
                let (service_ports, containers) = resources.ports_and_containers_mut();
                let mut scratch = Vec::new();
                let service_ports = service_ports.unwrap_or(&mut scratch);
                let mut container_ports: Vec<&mut Vec<ContainerPort>> = containers
                    .into_iter()
                    .flat_map(|containers| containers.iter_mut())
                    .map(|container| &mut container.ports)
                    .collect();
                f(service_ports, container_ports.as_mut_slice());
            }
            Customizer::Containers(f) => match resources.containers_mut() {
                Some(containers) => f(containers),
                None => debug!(%stage, "no deployment, skipping hook"),
            },
            Customizer::Pod(f) => match resources.pod_spec_mut() {
                Some(spec) => f(spec),
                None => debug!(%stage, "no deployment, skipping hook"),
            },
            Customizer::Service(f) => match resources.service_mut() {
                Some(service) => f(&mut service.spec),
                None => debug!(%stage, "no service, skipping hook"),
            },
            Customizer::General(f) => f(resources),
        }
    }
}
