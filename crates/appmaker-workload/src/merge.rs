//! Override merge
//!
//! A component inherits every field it leaves unset from its base. Set
//! fields always win; maps are merged key by key with the component's
//! entries taking precedence. Unset means empty string, zero port, `None`,
//! `false`, or an empty collection.

use std::collections::BTreeMap;

use crate::app::{AppComponent, ComponentOpts};
use crate::customize::Customizers;

/// Fill unset fields from a base value
pub trait Merge {
    /// Copy every field of `base` that is unset in `self`
    fn merge_from(&mut self, base: &Self);
}

fn merge_string(dst: &mut String, base: &str) {
    if dst.is_empty() {
        dst.push_str(base);
    }
}

fn merge_option<T: Clone>(dst: &mut Option<T>, base: &Option<T>) {
    if dst.is_none() {
        dst.clone_from(base);
    }
}

fn merge_map(dst: &mut BTreeMap<String, String>, base: &BTreeMap<String, String>) {
    for (key, value) in base {
        dst.entry(key.clone()).or_insert_with(|| value.clone());
    }
}

impl Merge for ComponentOpts {
    fn merge_from(&mut self, base: &Self) {
        merge_option(&mut self.prometheus_path, &base.prometheus_path);
        self.prometheus_scrape |= base.prometheus_scrape;
        self.without_ports |= base.without_ports;
        self.without_standard_probes |= base.without_standard_probes;
        self.without_standard_security_context |= base.without_standard_security_context;
        merge_option(&mut self.health_path, &base.health_path);
        merge_option(&mut self.liveness_path, &base.liveness_path);
        self.without_service |= base.without_service;
    }
}

impl Merge for AppComponent {
    fn merge_from(&mut self, base: &Self) {
        merge_string(&mut self.image, &base.image);
        merge_option(&mut self.name, &base.name);
        if self.port == 0 {
            self.port = base.port;
        }
        merge_option(&mut self.replicas, &base.replicas);
        merge_option(&mut self.flavor, &base.flavor);
        merge_option(&mut self.kind, &base.kind);
        self.opts.merge_from(&base.opts);
        merge_map(&mut self.env, &base.env);
        if self.common_env.is_empty() {
            self.common_env.clone_from(&base.common_env);
        }
        merge_option(&mut self.based_on, &base.based_on);
        self.customizers.merge_from(&base.customizers);
    }
}

impl Merge for Customizers {
    fn merge_from(&mut self, base: &Self) {
        for customizer in base.iter() {
            if self.get(customizer.stage()).is_none() {
                self.insert(customizer.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::WorkloadKind;
    use crate::customize::{Customizer, Stage};

    fn template() -> AppComponent {
        AppComponent::new("nginx:1.25")
            .with_port(8080)
            .with_replicas(3)
            .with_kind(WorkloadKind::Deployment)
            .with_env("A", "template")
            .with_env("B", "template")
            .with_common_env("LOG_LEVEL")
            .with_opts(ComponentOpts {
                prometheus_scrape: true,
                health_path: Some("/ready".to_string()),
                ..Default::default()
            })
    }

    #[test]
    fn unset_fields_are_inherited() {
        let mut component = AppComponent::default().based_on("web");
        component.merge_from(&template());

        assert_eq!(component.image, "nginx:1.25");
        assert_eq!(component.port, 8080);
        assert_eq!(component.replicas, Some(3));
        assert_eq!(component.kind, Some(WorkloadKind::Deployment));
        assert_eq!(component.common_env, vec!["LOG_LEVEL".to_string()]);
        assert!(component.opts.prometheus_scrape);
        assert_eq!(component.opts.health_path.as_deref(), Some("/ready"));
        assert_eq!(component.based_on.as_deref(), Some("web"));
    }

    #[test]
    fn set_fields_win() {
        let mut component = AppComponent::new("nginx:1.26")
            .with_port(9090)
            .with_replicas(1)
            .with_common_env("REGION");
        component.merge_from(&template());

        assert_eq!(component.image, "nginx:1.26");
        assert_eq!(component.port, 9090);
        assert_eq!(component.replicas, Some(1));
        assert_eq!(component.common_env, vec!["REGION".to_string()]);
    }

    #[test]
    fn env_is_merged_key_by_key() {
        let mut component = AppComponent::default()
            .with_env("A", "component")
            .with_env("C", "component");
        component.merge_from(&template());

        assert_eq!(component.env.len(), 3);
        assert_eq!(component.env["A"], "component");
        assert_eq!(component.env["B"], "template");
        assert_eq!(component.env["C"], "component");
    }

    #[test]
    fn false_cannot_override_true() {
        let mut component = AppComponent::default();
        component.opts.prometheus_scrape = false;
        component.merge_from(&template());
        assert!(component.opts.prometheus_scrape);
    }

    #[test]
    fn merging_twice_is_stable() {
        let mut once = AppComponent::default().with_env("A", "component");
        once.merge_from(&template());
        let mut twice = once.clone();
        twice.merge_from(&template());
        assert_eq!(once, twice);
    }

    #[test]
    fn customizers_are_inherited_per_stage() {
        let base = AppComponent::default()
            .with_customizer(Customizer::containers(|_| {}))
            .with_customizer(Customizer::pod(|_| {}));
        let own = Customizer::pod(|spec| spec.host_network = Some(true));

        let mut component = AppComponent::default().with_customizer(own.clone());
        component.merge_from(&base);

        let stages: Vec<Stage> = component.customizers.stages().collect();
        assert_eq!(stages, vec![Stage::Containers, Stage::Pod]);
        assert!(component
            .customizers
            .get(Stage::Pod)
            .is_some_and(|hook| hook.same_hook(&own)));
    }
}
