//! Per-component compilation output

use std::collections::BTreeMap;

use crate::app::AppComponent;
use crate::k8s::{Container, Deployment, PodSpec, Service, ServicePort};
use crate::list::{ResourceList, ResourceObject};

/// Objects compiled from one component, together with the fully resolved
/// component that produced them.
///
/// Flavors and general customizers receive this bundle mutably and have the
/// final say over its contents.
#[derive(Clone, Debug, PartialEq)]
pub struct AppComponentResources {
    deployment: Option<Deployment>,
    service: Option<Service>,
    manifest: AppComponent,
}

impl AppComponentResources {
    /// Empty bundle for a resolved component
    pub fn new(manifest: AppComponent) -> Self {
        Self {
            deployment: None,
            service: None,
            manifest,
        }
    }

    /// Builder form setting the deployment
    pub fn with_deployment(mut self, deployment: Deployment) -> Self {
        self.deployment = Some(deployment);
        self
    }

    /// Builder form setting the service
    pub fn with_service(mut self, service: Service) -> Self {
        self.service = Some(service);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Compiled deployment, absent for unsupported kinds
    pub fn deployment(&self) -> Option<&Deployment> {
        self.deployment.as_ref()
    }

    /// Mutable compiled deployment
    pub fn deployment_mut(&mut self) -> Option<&mut Deployment> {
        self.deployment.as_mut()
    }

    /// Remove and return the deployment
    pub fn remove_deployment(&mut self) -> Option<Deployment> {
        self.deployment.take()
    }

    /// Compiled service, absent when suppressed
    pub fn service(&self) -> Option<&Service> {
        self.service.as_ref()
    }

    /// Mutable compiled service
    pub fn service_mut(&mut self) -> Option<&mut Service> {
        self.service.as_mut()
    }

    /// Remove and return the service
    pub fn remove_service(&mut self) -> Option<Service> {
        self.service.take()
    }

    /// Resolved component the objects were compiled from
    pub fn manifest(&self) -> &AppComponent {
        &self.manifest
    }

    /// Pod spec of the deployment's template
    pub fn pod_spec(&self) -> Option<&PodSpec> {
        self.deployment.as_ref().map(|d| &d.spec.template.spec)
    }

    /// Mutable pod spec of the deployment's template
    pub fn pod_spec_mut(&mut self) -> Option<&mut PodSpec> {
        self.deployment.as_mut().map(|d| &mut d.spec.template.spec)
    }

    /// Containers of the deployment's pod, empty without a deployment
    pub fn containers(&self) -> &[Container] {
        self.pod_spec()
            .map(|spec| spec.containers.as_slice())
            .unwrap_or_default()
    }

    /// Mutable container list of the deployment's pod
    pub fn containers_mut(&mut self) -> Option<&mut Vec<Container>> {
        self.pod_spec_mut().map(|spec| &mut spec.containers)
    }

    /// Service ports and pod containers, borrowed together
    pub(crate) fn ports_and_containers_mut(
        &mut self,
    ) -> (Option<&mut Vec<ServicePort>>, Option<&mut Vec<Container>>) {
        (
            self.service.as_mut().map(|s| &mut s.spec.ports),
            self.deployment
                .as_mut()
                .map(|d| &mut d.spec.template.spec.containers),
        )
    }

    // =========================================================================
    // Bulk helpers
    // =========================================================================

    /// Add a container to the pod; no-op without a deployment
    pub fn append_container(&mut self, container: Container) -> &mut Self {
        if let Some(containers) = self.containers_mut() {
            containers.push(container);
        }
        self
    }

    /// Add labels to the metadata of every object and to the pod template.
    /// Selectors are left alone.
    pub fn with_extra_labels(&mut self, labels: &BTreeMap<String, String>) -> &mut Self {
        if let Some(deployment) = self.deployment.as_mut() {
            extend(&mut deployment.metadata.labels, labels);
            extend(&mut deployment.spec.template.metadata.labels, labels);
        }
        if let Some(service) = self.service.as_mut() {
            extend(&mut service.metadata.labels, labels);
        }
        self
    }

    /// Add annotations to the metadata of every object and to the pod template
    pub fn with_extra_annotations(&mut self, annotations: &BTreeMap<String, String>) -> &mut Self {
        if let Some(deployment) = self.deployment.as_mut() {
            extend(&mut deployment.metadata.annotations, annotations);
            extend(&mut deployment.spec.template.metadata.annotations, annotations);
        }
        if let Some(service) = self.service.as_mut() {
            extend(&mut service.metadata.annotations, annotations);
        }
        self
    }

    /// Run the pod in the host's network namespace
    pub fn use_host_network(&mut self) -> &mut Self {
        if let Some(spec) = self.pod_spec_mut() {
            spec.host_network = Some(true);
        }
        self
    }

    /// Run the pod in the host's PID namespace
    pub fn use_host_pid(&mut self) -> &mut Self {
        if let Some(spec) = self.pod_spec_mut() {
            spec.host_pid = Some(true);
        }
        self
    }

    // =========================================================================
    // Flattening
    // =========================================================================

    /// Objects in emission order: deployment, then service
    pub fn into_items(self) -> Vec<ResourceObject> {
        self.deployment
            .map(ResourceObject::Deployment)
            .into_iter()
            .chain(self.service.map(ResourceObject::Service))
            .collect()
    }

    /// Wrap this bundle's objects in a list
    pub fn into_list(self) -> ResourceList {
        ResourceList::new(self.into_items())
    }
}

fn extend(dst: &mut BTreeMap<String, String>, src: &BTreeMap<String, String>) {
    dst.extend(src.iter().map(|(k, v)| (k.clone(), v.clone())));
}
