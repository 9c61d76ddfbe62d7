//! Container and pod template compilation

use appmaker_common::{ANNOTATION_SCRAPE, ANNOTATION_SCRAPE_PATH, ANNOTATION_SCRAPE_PORT};

use crate::app::AppComponent;
use crate::k8s::{Container, ContainerPort, PodMeta, PodSpec, PodTemplateSpec};
use crate::params::{AppParams, METRICS_PATH};
use crate::pipeline::env;

/// Compile the single container of a component
pub fn compile_container(component: &AppComponent, params: &AppParams) -> Container {
    let name = component.derived_name();
    let port = component.port_or(params.default_port);

    let mut container = Container::new(name.clone(), component.image.clone());
    container.env = env::compile(&component.env);

    if component.ports_enabled() {
        container.ports.push(ContainerPort {
            name: Some(name),
            container_port: port,
            protocol: None,
        });

        if !component.opts.without_standard_probes {
            let (health_path, liveness_path) = if params.health_path_overrides {
                (
                    component.opts.health_path.as_deref(),
                    component.opts.liveness_path.as_deref(),
                )
            } else {
                (None, None)
            };
            container.readiness_probe = Some(params.readiness_probe.to_probe(port, health_path));
            container.liveness_probe = Some(params.liveness_probe.to_probe(port, liveness_path));
        }
    }

    container
}

/// Compile the pod template wrapping the component's container
pub fn compile(component: &AppComponent, params: &AppParams) -> PodTemplateSpec {
    let (_, labels) = component.name_and_labels();
    let mut metadata = PodMeta {
        labels,
        ..Default::default()
    };

    if component.opts.prometheus_scrape {
        let port = component.port_or(params.default_port);
        let path = component
            .opts
            .prometheus_path
            .as_deref()
            .unwrap_or(METRICS_PATH);
        metadata
            .annotations
            .insert(ANNOTATION_SCRAPE.to_string(), "true".to_string());
        metadata
            .annotations
            .insert(ANNOTATION_SCRAPE_PORT.to_string(), port.to_string());
        metadata
            .annotations
            .insert(ANNOTATION_SCRAPE_PATH.to_string(), path.to_string());
    }

    PodTemplateSpec {
        metadata,
        spec: PodSpec {
            containers: vec![compile_container(component, params)],
            ..Default::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{App, ComponentOpts};
    use crate::options::CompileOptions;

    fn params() -> AppParams {
        AppParams::from_app(&App::new("shop"), &CompileOptions::default())
    }

    #[test]
    fn container_gets_named_port_and_standard_probes() {
        let component = AppComponent::new("registry/org/api:v2").with_port(8080);
        let container = compile_container(&component, &params());

        assert_eq!(container.name, "api");
        assert_eq!(container.image, "registry/org/api:v2");
        assert_eq!(container.ports.len(), 1);
        assert_eq!(container.ports[0].name.as_deref(), Some("api"));
        assert_eq!(container.ports[0].container_port, 8080);

        let readiness = container.readiness_probe.expect("readiness probe");
        assert_eq!(readiness.initial_delay_seconds, Some(180));
        assert_eq!(readiness.period_seconds, Some(3));
        let http = readiness.http_get.expect("http probe");
        assert_eq!(http.path, "/health");
        assert_eq!(http.port, 8080);

        let liveness = container.liveness_probe.expect("liveness probe");
        assert_eq!(liveness.initial_delay_seconds, Some(300));
    }

    #[test]
    fn suppressed_ports_drop_probes_too() {
        let component = AppComponent::new("api").with_opts(ComponentOpts {
            without_ports: true,
            without_standard_probes: false,
            ..Default::default()
        });
        let container = compile_container(&component, &params());
        assert!(container.ports.is_empty());
        assert!(container.readiness_probe.is_none());
        assert!(container.liveness_probe.is_none());
    }

    #[test]
    fn suppressed_probes_keep_port() {
        let component = AppComponent::new("api").with_opts(ComponentOpts {
            without_standard_probes: true,
            ..Default::default()
        });
        let container = compile_container(&component, &params());
        assert_eq!(container.ports[0].container_port, 80);
        assert!(container.readiness_probe.is_none());
        assert!(container.liveness_probe.is_none());
    }

    fn http_path(check: Option<crate::k8s::ProbeSpec>) -> String {
        check.and_then(|p| p.http_get).map(|h| h.path).expect("path")
    }

    fn component_with_health_paths() -> AppComponent {
        AppComponent::new("api").with_opts(ComponentOpts {
            health_path: Some("/ready".to_string()),
            liveness_path: Some("/alive".to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn health_paths_stay_standard_by_default() {
        let container = compile_container(&component_with_health_paths(), &params());
        assert_eq!(http_path(container.readiness_probe), "/health");
        assert_eq!(http_path(container.liveness_probe), "/health");
    }

    #[test]
    fn health_paths_follow_overrides_when_enabled() {
        let params = AppParams::from_app(
            &App::new("shop"),
            &CompileOptions::default().health_path_overrides(true),
        );
        let container = compile_container(&component_with_health_paths(), &params);
        assert_eq!(http_path(container.readiness_probe), "/ready");
        assert_eq!(http_path(container.liveness_probe), "/alive");
    }

    #[test]
    fn pod_template_carries_labels_and_one_container() {
        let template = compile(&AppComponent::new("api").with_name("frontend"), &params());
        assert_eq!(template.metadata.labels.len(), 1);
        assert_eq!(template.metadata.labels["name"], "frontend");
        assert!(template.metadata.annotations.is_empty());
        assert_eq!(template.spec.containers.len(), 1);
    }

    #[test]
    fn scrape_annotations_use_resolved_port_and_default_path() {
        let component = AppComponent::new("api").with_port(9090).with_opts(ComponentOpts {
            prometheus_scrape: true,
            ..Default::default()
        });
        let template = compile(&component, &params());
        let annotations = &template.metadata.annotations;
        assert_eq!(annotations["prometheus.io/scrape"], "true");
        assert_eq!(annotations["prometheus.io/port"], "9090");
        assert_eq!(annotations["prometheus.io/path"], "/metrics");
    }

    #[test]
    fn scrape_path_can_be_overridden() {
        let component = AppComponent::new("api").with_opts(ComponentOpts {
            prometheus_scrape: true,
            prometheus_path: Some("/stats".to_string()),
            ..Default::default()
        });
        let template = compile(&component, &params());
        assert_eq!(template.metadata.annotations["prometheus.io/path"], "/stats");
        assert_eq!(template.metadata.annotations["prometheus.io/port"], "80");
    }
}
