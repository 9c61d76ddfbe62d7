//! App-wide parameters derived once per compilation

use std::collections::BTreeMap;

use tracing::warn;

use crate::app::{App, AppComponent};
use crate::k8s::{HttpGetAction, ProbeSpec};
use crate::options::CompileOptions;

/// Default path served by the standard health endpoint
pub const HEALTH_PATH: &str = "/health";

/// Default metrics path advertised to the scraper
pub const METRICS_PATH: &str = "/metrics";

/// HTTP probe settings applied to every container with ports
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StandardProbe {
    /// Request path
    pub path: String,
    /// Seconds between attempts
    pub period_seconds: i32,
    /// Seconds after start before the first attempt
    pub initial_delay_seconds: i32,
}

impl StandardProbe {
    /// Standard readiness probe
    pub fn readiness() -> Self {
        Self {
            path: HEALTH_PATH.to_string(),
            period_seconds: 3,
            initial_delay_seconds: 180,
        }
    }

    /// Standard liveness probe
    pub fn liveness() -> Self {
        Self {
            path: HEALTH_PATH.to_string(),
            period_seconds: 3,
            initial_delay_seconds: 300,
        }
    }

    /// Render against a port, optionally replacing the path
    pub fn to_probe(&self, port: u16, path_override: Option<&str>) -> ProbeSpec {
        ProbeSpec {
            http_get: Some(HttpGetAction {
                path: path_override.unwrap_or(&self.path).to_string(),
                port,
            }),
            initial_delay_seconds: Some(self.initial_delay_seconds),
            period_seconds: Some(self.period_seconds),
        }
    }
}

/// Parameters shared by every component of one app
#[derive(Clone, Debug)]
pub struct AppParams {
    /// Namespace of every compiled object
    pub namespace: String,
    /// Replica count for components that leave it unset
    pub default_replicas: u32,
    /// Port for components that leave it unset
    pub default_port: u16,
    /// Readiness probe template
    pub readiness_probe: StandardProbe,
    /// Liveness probe template
    pub liveness_probe: StandardProbe,
    /// Whether components may replace the standard health path
    pub health_path_overrides: bool,
    templates: BTreeMap<String, AppComponent>,
    common_env: BTreeMap<String, String>,
}

impl AppParams {
    /// Derive parameters from an app.
    ///
    /// Templates are normalized here; a later template with a duplicate
    /// name replaces the earlier one.
    pub fn from_app(app: &App, options: &CompileOptions) -> Self {
        let mut templates = BTreeMap::new();
        for template in &app.templates {
            if templates
                .insert(template.template_name.clone(), template.to_component())
                .is_some()
            {
                warn!(template = %template.template_name, "duplicate template name, keeping the last");
            }
        }

        Self {
            namespace: app.group_name.clone(),
            default_replicas: options.default_replicas,
            default_port: options.default_port,
            readiness_probe: StandardProbe::readiness(),
            liveness_probe: StandardProbe::liveness(),
            health_path_overrides: options.health_path_overrides,
            templates,
            common_env: app.common_env.clone(),
        }
    }

    /// Normalized template by name
    pub fn template(&self, name: &str) -> Option<&AppComponent> {
        self.templates.get(name)
    }

    /// Names of every declared template
    pub fn template_names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    /// Common environment table
    pub fn common_env(&self) -> &BTreeMap<String, String> {
        &self.common_env
    }
}
