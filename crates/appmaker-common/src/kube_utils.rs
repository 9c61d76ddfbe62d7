//! Kubernetes object helpers shared by every compiled resource
//!
//! appmaker never talks to an API server, so this module only carries the
//! pieces of the object model that show up in rendered manifests: metadata,
//! the `apiVersion`/`kind` pair of each resource type, and serialization of
//! finished objects.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Result;

// =============================================================================
// ObjectMeta - Canonical Kubernetes metadata for all compiled resources
// =============================================================================

/// Standard Kubernetes ObjectMeta for compiled resources.
///
/// The namespace is omitted from rendered output when empty, so objects
/// compiled for an app without a group name stay namespace-agnostic.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    /// Resource name
    pub name: String,
    /// Resource namespace
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    /// Labels
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    /// Annotations
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

impl ObjectMeta {
    /// Create new metadata carrying the standard name label
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        let name = name.into();
        let mut labels = BTreeMap::new();
        labels.insert(crate::LABEL_NAME.to_string(), name.clone());
        Self {
            name,
            namespace: namespace.into(),
            labels,
            annotations: BTreeMap::new(),
        }
    }

    /// Add a label
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Add an annotation
    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }
}

// =============================================================================
// HasApiResource Trait
// =============================================================================

/// Trait for types that have a known API version and kind.
///
/// Constructors read these constants so the `apiVersion`/`kind` fields of a
/// rendered object always agree with its Rust type.
pub trait HasApiResource {
    /// API version (e.g., "apps/v1")
    const API_VERSION: &'static str;
    /// Kind (e.g., "Deployment")
    const KIND: &'static str;
}

// =============================================================================
// Serialization
// =============================================================================

/// Render a compiled object as YAML.
pub fn to_yaml<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_yaml::to_string(value)?)
}

/// Render a compiled object as pretty-printed JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_metadata_carries_name_label() {
        let meta = ObjectMeta::new("api", "shop");
        assert_eq!(meta.name, "api");
        assert_eq!(meta.namespace, "shop");
        assert_eq!(meta.labels.get(crate::LABEL_NAME), Some(&"api".to_string()));
        assert_eq!(meta.labels.len(), 1);
        assert!(meta.annotations.is_empty());
    }

    #[test]
    fn builder_methods_add_labels_and_annotations() {
        let meta = ObjectMeta::new("api", "")
            .with_label("tier", "backend")
            .with_annotation("owner", "platform");
        assert_eq!(meta.labels.get("tier"), Some(&"backend".to_string()));
        assert_eq!(meta.annotations.get("owner"), Some(&"platform".to_string()));
    }

    #[test]
    fn empty_namespace_is_not_serialized() {
        let json = serde_json::to_value(ObjectMeta::new("api", "")).unwrap();
        assert!(json.get("namespace").is_none());
        assert_eq!(json["labels"]["name"], "api");

        let json = serde_json::to_value(ObjectMeta::new("api", "shop")).unwrap();
        assert_eq!(json["namespace"], "shop");
    }

    #[test]
    fn to_yaml_renders_camel_case_keys() {
        let yaml = to_yaml(&ObjectMeta::new("api", "shop")).unwrap();
        assert!(yaml.contains("name: api"));
        assert!(yaml.contains("namespace: shop"));
    }

    #[test]
    fn to_json_is_pretty() {
        let json = to_json(&ObjectMeta::new("api", "shop")).unwrap();
        assert!(json.contains('\n'));
        assert!(json.contains("\"namespace\": \"shop\""));
    }
}
