//! Compilation options

use serde::{Deserialize, Serialize};

/// Default network port for components that do not set one
pub const DEFAULT_PORT: u16 = 80;

/// Default replica count for components that do not set one
pub const DEFAULT_REPLICAS: u32 = 1;

/// Knobs controlling how an app is compiled
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct CompileOptions {
    /// Fail on unknown templates, unknown flavors and unsupported kinds
    /// instead of logging a warning
    pub strict: bool,
    /// Port used when a component leaves it unset
    pub default_port: u16,
    /// Replica count used when a component leaves it unset
    pub default_replicas: u32,
    /// Setting `without_ports` also suppresses the service and the
    /// standard probes
    pub couple_port_suppression: bool,
    /// Honor `health_path` and `liveness_path` instead of always using
    /// the standard health path
    pub health_path_overrides: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            strict: false,
            default_port: DEFAULT_PORT,
            default_replicas: DEFAULT_REPLICAS,
            couple_port_suppression: false,
            health_path_overrides: false,
        }
    }
}

impl CompileOptions {
    /// Enable or disable strict mode
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Override the default port
    pub fn with_default_port(mut self, port: u16) -> Self {
        self.default_port = port;
        self
    }

    /// Override the default replica count
    pub fn with_default_replicas(mut self, replicas: u32) -> Self {
        self.default_replicas = replicas;
        self
    }

    /// Enable or disable port/service suppression coupling
    pub fn couple_port_suppression(mut self, couple: bool) -> Self {
        self.couple_port_suppression = couple;
        self
    }

    /// Enable or disable per-component health path overrides
    pub fn health_path_overrides(mut self, enabled: bool) -> Self {
        self.health_path_overrides = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = CompileOptions::default();
        assert!(!options.strict);
        assert_eq!(options.default_port, 80);
        assert_eq!(options.default_replicas, 1);
        assert!(!options.couple_port_suppression);
        assert!(!options.health_path_overrides);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let options: CompileOptions = serde_json::from_str(r#"{"strict": true}"#).unwrap();
        assert!(options.strict);
        assert_eq!(options.default_port, 80);
    }
}
