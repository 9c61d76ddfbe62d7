//! CLI commands

use std::path::{Path, PathBuf};

use appmaker_common::kube_utils::{to_json, to_yaml};
use appmaker_workload::{App, CompileOptions};
use clap::{Args, ValueEnum};
use serde::Serialize;
use tracing::debug;

use crate::{Error, Result};

pub mod render;
pub mod resolve;

/// Arguments shared by every command that compiles an app
#[derive(Args, Debug, Clone)]
pub struct CompileArgs {
    /// App description (`.json` is read as JSON, anything else as YAML)
    pub file: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "yaml")]
    pub output: OutputFormat,

    /// Fail on unknown templates, unknown flavors and unsupported kinds
    #[arg(long, env = "APPMAKER_STRICT")]
    pub strict: bool,

    /// Port for components that do not set one
    #[arg(long, env = "APPMAKER_DEFAULT_PORT", default_value_t = appmaker_workload::options::DEFAULT_PORT)]
    pub default_port: u16,

    /// Replica count for components that do not set one
    #[arg(long, env = "APPMAKER_DEFAULT_REPLICAS", default_value_t = appmaker_workload::options::DEFAULT_REPLICAS)]
    pub default_replicas: u32,

    /// Make `without_ports` also drop the service and the standard probes
    #[arg(long, env = "APPMAKER_COUPLE_PORT_SUPPRESSION")]
    pub couple_port_suppression: bool,

    /// Honor per-component `health_path` and `liveness_path`
    #[arg(long, env = "APPMAKER_HEALTH_PATH_OVERRIDES")]
    pub health_path_overrides: bool,
}

impl CompileArgs {
    /// Compile options selected by the flags
    pub fn options(&self) -> CompileOptions {
        CompileOptions::default()
            .strict(self.strict)
            .with_default_port(self.default_port)
            .with_default_replicas(self.default_replicas)
            .couple_port_suppression(self.couple_port_suppression)
            .health_path_overrides(self.health_path_overrides)
    }
}

/// Output format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// YAML (default)
    #[default]
    Yaml,
    /// Pretty-printed JSON
    Json,
}

impl OutputFormat {
    /// Serialize a value in this format
    pub fn render<T: Serialize>(self, value: &T) -> Result<String> {
        let rendered = match self {
            OutputFormat::Yaml => to_yaml(value)?,
            OutputFormat::Json => to_json(value)?,
        };
        Ok(rendered)
    }
}

/// Read and parse an app description
pub fn load_app(path: &Path) -> Result<App> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::read_input(path, e))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    debug!(path = %path.display(), json = is_json, "loading app");

    let app = if is_json {
        serde_json::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };
    Ok(app)
}
