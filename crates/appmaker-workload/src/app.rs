//! Declarative app description
//!
//! An [`App`] lists its components in three surface forms: explicit
//! components, components built from a bare image, and components derived
//! from a named template. All three normalize to the canonical
//! [`AppComponent`] before compilation.

use std::collections::BTreeMap;
use std::fmt;

use appmaker_common::LABEL_NAME;
use serde::{Deserialize, Serialize};

use crate::customize::{Customizer, Customizers};
use crate::merge::Merge;

// =============================================================================
// App
// =============================================================================

/// Top-level app descriptor
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct App {
    /// Group name, used as the namespace of every compiled object
    pub group_name: String,
    /// Explicit components
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<AppComponent>,
    /// Components built from an image plus defaults
    #[serde(
        rename = "component_from_image",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub components_from_images: Vec<ComponentFromImage>,
    /// Named templates other components can be based on
    #[serde(rename = "component_template", skip_serializing_if = "Vec::is_empty")]
    pub templates: Vec<ComponentTemplate>,
    /// Components derived from a named template
    #[serde(
        rename = "component_from_template",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub components_from_templates: Vec<ComponentFromTemplate>,
    /// Environment shared by reference across components
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub common_env: BTreeMap<String, String>,
}

impl App {
    /// Create an empty app for the given group
    pub fn new(group_name: impl Into<String>) -> Self {
        Self {
            group_name: group_name.into(),
            ..Default::default()
        }
    }

    /// Add an explicit component
    pub fn with_component(mut self, component: AppComponent) -> Self {
        self.components.push(component);
        self
    }

    /// Add an image-only component
    pub fn with_component_from_image(mut self, component: ComponentFromImage) -> Self {
        self.components_from_images.push(component);
        self
    }

    /// Add a named template
    pub fn with_template(mut self, template: ComponentTemplate) -> Self {
        self.templates.push(template);
        self
    }

    /// Add a template-reference component
    pub fn with_component_from_template(mut self, component: ComponentFromTemplate) -> Self {
        self.components_from_templates.push(component);
        self
    }

    /// Add a common environment entry
    pub fn with_common_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.common_env.insert(key.into(), value.into());
        self
    }

    /// Total number of declared components across all three forms
    pub fn component_count(&self) -> usize {
        self.components.len()
            + self.components_from_images.len()
            + self.components_from_templates.len()
    }
}

// =============================================================================
// Workload kind
// =============================================================================

/// Kind of workload a component compiles to.
///
/// Only `Deployment` has a synthesizer; the others are reserved.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum WorkloadKind {
    /// Replicated, rolling-updatable workload
    #[default]
    Deployment,
    /// Replicated workload without rollouts
    ReplicaSet,
    /// One pod per node
    DaemonSet,
    /// Workload with stable identity
    StatefulSet,
    /// Network service only
    Service,
    /// Configuration object
    ConfigMap,
    /// Secret object
    Secret,
}

impl fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Deployment => "Deployment",
            Self::ReplicaSet => "ReplicaSet",
            Self::DaemonSet => "DaemonSet",
            Self::StatefulSet => "StatefulSet",
            Self::Service => "Service",
            Self::ConfigMap => "ConfigMap",
            Self::Secret => "Secret",
        };
        f.write_str(s)
    }
}

// =============================================================================
// Options
// =============================================================================

/// High-level switches that map onto non-trivial settings deep inside the
/// compiled objects.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ComponentOpts {
    /// Metrics path advertised to the scraper (defaults to `/metrics`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prometheus_path: Option<String>,
    /// Annotate the pod template for metrics scraping
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub prometheus_scrape: bool,
    /// Omit container ports (and with them the standard probes)
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub without_ports: bool,
    /// Omit the standard readiness and liveness probes
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub without_standard_probes: bool,
    /// Reserved; no standard security context is applied yet
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub without_standard_security_context: bool,
    /// Readiness probe path, honored when health path overrides are enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_path: Option<String>,
    /// Liveness probe path, honored when health path overrides are enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liveness_path: Option<String>,
    /// Do not build a Service
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub without_service: bool,
}

// =============================================================================
// Canonical component
// =============================================================================

/// Canonical component every declaration form normalizes to
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppComponent {
    /// Image reference
    #[serde(skip_serializing_if = "String::is_empty")]
    pub image: String,
    /// Explicit name; derived from the image when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Network port, 0 means unset
    #[serde(skip_serializing_if = "is_unset_port")]
    pub port: u16,
    /// Replica count override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicas: Option<u32>,
    /// Name of a flavor in the host's registry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flavor: Option<String>,
    /// Workload kind, `Deployment` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<WorkloadKind>,
    /// Option switches
    #[serde(skip_serializing_if = "is_default_opts")]
    pub opts: ComponentOpts,
    /// Environment table
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
    /// Keys to pull in from the app's common environment
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub common_env: Vec<String>,
    /// Name of the template this component inherits from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub based_on: Option<String>,
    /// Customization hooks, supplied programmatically by the host
    #[serde(skip)]
    pub customizers: Customizers,
}

fn is_unset_port(port: &u16) -> bool {
    *port == 0
}

fn is_default_opts(opts: &ComponentOpts) -> bool {
    *opts == ComponentOpts::default()
}

impl AppComponent {
    /// Create a component for the given image
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            ..Default::default()
        }
    }

    /// Set an explicit name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the network port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the replica count
    pub fn with_replicas(mut self, replicas: u32) -> Self {
        self.replicas = Some(replicas);
        self
    }

    /// Select a flavor by name
    pub fn with_flavor(mut self, flavor: impl Into<String>) -> Self {
        self.flavor = Some(flavor.into());
        self
    }

    /// Set the workload kind
    pub fn with_kind(mut self, kind: WorkloadKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Replace the option switches
    pub fn with_opts(mut self, opts: ComponentOpts) -> Self {
        self.opts = opts;
        self
    }

    /// Add an environment entry
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Pull a key in from the app's common environment
    pub fn with_common_env(mut self, key: impl Into<String>) -> Self {
        self.common_env.push(key.into());
        self
    }

    /// Inherit from a named template
    pub fn based_on(mut self, template: impl Into<String>) -> Self {
        self.based_on = Some(template.into());
        self
    }

    /// Register a customization hook, replacing any hook of the same stage
    pub fn with_customizer(mut self, customizer: Customizer) -> Self {
        self.customizers.insert(customizer);
        self
    }

    /// Name used for every object compiled from this component
    pub fn derived_name(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => name_from_image(&self.image).to_string(),
        }
    }

    /// Derived name together with the labels selecting this component's pods
    pub fn name_and_labels(&self) -> (String, BTreeMap<String, String>) {
        let name = self.derived_name();
        let mut labels = BTreeMap::new();
        labels.insert(LABEL_NAME.to_string(), name.clone());
        (name, labels)
    }

    /// Explicit port if set, else the given default
    pub fn port_or(&self, default: u16) -> u16 {
        if self.port != 0 {
            self.port
        } else {
            default
        }
    }

    /// Explicit replica count if set, else the given default
    pub fn replicas_or(&self, default: u32) -> u32 {
        self.replicas.unwrap_or(default)
    }

    /// Effective workload kind
    pub fn workload_kind(&self) -> WorkloadKind {
        self.kind.unwrap_or_default()
    }

    /// Whether container ports (and the port customizer) are enabled
    pub fn ports_enabled(&self) -> bool {
        !self.opts.without_ports
    }
}

/// Final path segment of an image reference with any tag or digest removed.
///
/// `registry:5000/org/app:v2` yields `app`.
pub fn name_from_image(image: &str) -> &str {
    let last = image.rsplit('/').next().unwrap_or(image);
    let last = last.split('@').next().unwrap_or(last);
    last.split(':').next().unwrap_or(last)
}

// =============================================================================
// Declaration forms
// =============================================================================

/// Component declared by image, with every other field defaulted
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ComponentFromImage {
    /// Image reference
    pub image: String,
    /// Remaining component fields
    #[serde(flatten)]
    pub component: AppComponent,
}

impl ComponentFromImage {
    /// Create an image-only declaration
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            component: AppComponent::default(),
        }
    }

    /// Set the remaining component fields
    pub fn with_component(mut self, component: AppComponent) -> Self {
        self.component = component;
        self
    }

    /// Normalize into a canonical component seeded with the declared image
    pub fn to_component(&self) -> AppComponent {
        let mut component = AppComponent::new(self.image.clone());
        component.merge_from(&self.component);
        component
    }
}

/// Named, partially specified component used as an inheritance base
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ComponentTemplate {
    /// Template name
    pub template_name: String,
    /// Image reference
    #[serde(default)]
    pub image: String,
    /// Remaining component fields
    #[serde(flatten)]
    pub component: AppComponent,
}

impl ComponentTemplate {
    /// Create a template for the given image
    pub fn new(template_name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            template_name: template_name.into(),
            image: image.into(),
            component: AppComponent::default(),
        }
    }

    /// Set the remaining component fields
    pub fn with_component(mut self, component: AppComponent) -> Self {
        self.component = component;
        self
    }

    /// Default the template against an empty component seeded with its image
    pub fn to_component(&self) -> AppComponent {
        let mut component = AppComponent::new(self.image.clone());
        component.merge_from(&self.component);
        component
    }
}

/// Component derived from a named template plus overrides
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ComponentFromTemplate {
    /// Name of the template to inherit from
    pub template_name: String,
    /// Image override; inherited from the template when empty
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image: String,
    /// Overrides
    #[serde(flatten)]
    pub component: AppComponent,
}

impl ComponentFromTemplate {
    /// Create a declaration inheriting everything from the named template
    pub fn new(template_name: impl Into<String>) -> Self {
        Self {
            template_name: template_name.into(),
            image: String::new(),
            component: AppComponent::default(),
        }
    }

    /// Set the overrides
    pub fn with_component(mut self, component: AppComponent) -> Self {
        self.component = component;
        self
    }

    /// Normalize into a canonical component that references its template
    pub fn to_component(&self) -> AppComponent {
        let mut component = AppComponent::new(self.image.clone()).based_on(&self.template_name);
        component.merge_from(&self.component);
        component
    }
}
