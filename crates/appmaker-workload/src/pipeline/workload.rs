//! Deployment and Service compilation

use appmaker_common::kube_utils::ObjectMeta;

use crate::app::AppComponent;
use crate::k8s::{
    Deployment, DeploymentSpec, LabelSelector, PodTemplateSpec, Service, ServicePort,
    ServiceSpec,
};
use crate::params::AppParams;

/// Compile the Deployment wrapping a pod template
pub fn compile_deployment(
    component: &AppComponent,
    params: &AppParams,
    template: PodTemplateSpec,
) -> Deployment {
    let (name, labels) = component.name_and_labels();
    Deployment::new(
        ObjectMeta::new(name, params.namespace.clone()),
        DeploymentSpec {
            replicas: component.replicas_or(params.default_replicas),
            selector: LabelSelector {
                match_labels: labels,
            },
            template,
        },
    )
}

/// Compile the Service exposing the component's port
pub fn compile_service(component: &AppComponent, params: &AppParams) -> Service {
    let (name, labels) = component.name_and_labels();
    Service::new(
        ObjectMeta::new(name, params.namespace.clone()),
        ServiceSpec {
            selector: labels,
            ports: vec![ServicePort::new(component.port_or(params.default_port))],
            type_: None,
        },
    )
}
