//! Common types for appmaker: object metadata, errors, and utilities

#![deny(missing_docs)]

pub mod error;
pub mod kube_utils;
pub mod telemetry;

pub use error::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Label key carrying the component name; also the only selector label
pub const LABEL_NAME: &str = "name";

/// Annotation enabling metrics scraping on a pod template
pub const ANNOTATION_SCRAPE: &str = "prometheus.io/scrape";

/// Annotation carrying the metrics port of a pod template
pub const ANNOTATION_SCRAPE_PORT: &str = "prometheus.io/port";

/// Annotation carrying the metrics path of a pod template
pub const ANNOTATION_SCRAPE_PATH: &str = "prometheus.io/path";
