//! Flattened output of a whole app

use appmaker_common::kube_utils::HasApiResource;
use serde::{Deserialize, Serialize};

use crate::k8s::{Deployment, Service};

/// Any object appmaker emits
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ResourceObject {
    /// Workload
    Deployment(Deployment),
    /// Service
    Service(Service),
}

impl ResourceObject {
    /// Object kind
    pub fn kind(&self) -> &str {
        match self {
            Self::Deployment(d) => &d.kind,
            Self::Service(s) => &s.kind,
        }
    }

    /// Object API version
    pub fn api_version(&self) -> &str {
        match self {
            Self::Deployment(d) => &d.api_version,
            Self::Service(s) => &s.api_version,
        }
    }

    /// Object name
    pub fn name(&self) -> &str {
        match self {
            Self::Deployment(d) => &d.metadata.name,
            Self::Service(s) => &s.metadata.name,
        }
    }
}

/// `v1 List` wrapping every emitted object in order
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceList {
    /// API version
    pub api_version: String,
    /// Kind
    pub kind: String,
    /// Items
    pub items: Vec<ResourceObject>,
}

impl HasApiResource for ResourceList {
    const API_VERSION: &'static str = "v1";
    const KIND: &'static str = "List";
}

impl ResourceList {
    /// Wrap items in a list
    pub fn new(items: Vec<ResourceObject>) -> Self {
        Self {
            api_version: Self::API_VERSION.to_string(),
            kind: Self::KIND.to_string(),
            items,
        }
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
