//! Internal compilation pipeline stages

pub(crate) mod customize;
pub(crate) mod env;
pub(crate) mod pod_template;
pub(crate) mod workload;
