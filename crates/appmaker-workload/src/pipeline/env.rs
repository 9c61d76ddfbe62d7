//! Environment variable compilation
//!
//! Pulls referenced common-env keys into a component's own table and emits
//! the table as a container env list sorted by key.

use std::collections::BTreeMap;

use tracing::debug;

use crate::app::AppComponent;
use crate::k8s::EnvVar;

/// Copy each referenced common-env key into the component's env table.
///
/// Common values overwrite same-named component entries. Keys missing from
/// the common table are skipped.
pub fn resolve_common(component: &mut AppComponent, common: &BTreeMap<String, String>) {
    for key in &component.common_env {
        match common.get(key) {
            Some(value) => {
                component.env.insert(key.clone(), value.clone());
            }
            None => debug!(key = %key, "common env key not declared, skipping"),
        }
    }
}

/// Emit an env table as container env vars, ordered by key
pub fn compile(env: &BTreeMap<String, String>) -> Vec<EnvVar> {
    env.iter().map(|(k, v)| EnvVar::literal(k, v)).collect()
}
