//! Errors raised while compiling an app

use thiserror::Error;

use crate::app::WorkloadKind;

/// Error compiling a single component
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompilationError {
    /// Component is based on a template the app does not declare
    #[error("component '{component}' is based on unknown template '{template}'")]
    UnknownTemplate {
        /// Derived component name
        component: String,
        /// Referenced template name
        template: String,
    },

    /// Component selects a flavor the registry does not contain
    #[error("component '{component}' selects unknown flavor '{flavor}'")]
    UnknownFlavor {
        /// Derived component name
        component: String,
        /// Selected flavor name
        flavor: String,
    },

    /// Component requests a workload kind with no synthesizer
    #[error("component '{component}' requests unsupported workload kind {kind}")]
    UnsupportedKind {
        /// Derived component name
        component: String,
        /// Requested kind
        kind: WorkloadKind,
    },
}

impl CompilationError {
    /// Name of the component that failed
    pub fn component(&self) -> &str {
        match self {
            Self::UnknownTemplate { component, .. }
            | Self::UnknownFlavor { component, .. }
            | Self::UnsupportedKind { component, .. } => component,
        }
    }
}

impl From<CompilationError> for appmaker_common::Error {
    fn from(err: CompilationError) -> Self {
        let field = match &err {
            CompilationError::UnknownTemplate { .. } => "based_on",
            CompilationError::UnknownFlavor { .. } => "flavor",
            CompilationError::UnsupportedKind { .. } => "kind",
        };
        appmaker_common::Error::validation_for_field(err.component().to_string(), field, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_component_and_reference() {
        let err = CompilationError::UnknownTemplate {
            component: "frontend".to_string(),
            template: "web".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "component 'frontend' is based on unknown template 'web'"
        );

        let err = CompilationError::UnsupportedKind {
            component: "agent".to_string(),
            kind: WorkloadKind::DaemonSet,
        };
        assert!(err.to_string().contains("DaemonSet"));
    }

    #[test]
    fn converts_into_validation_error() {
        let err: appmaker_common::Error = CompilationError::UnknownFlavor {
            component: "api".to_string(),
            flavor: "gpu".to_string(),
        }
        .into();
        assert_eq!(err.component(), Some("api"));
        assert!(err.to_string().contains("gpu"));
    }
}
