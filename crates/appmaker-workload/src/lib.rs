//! App compilation pipeline for appmaker
//!
//! Compiles a declarative [`App`] (explicit, image-only and template-derived
//! components) into Kubernetes Deployments and Services, runs the
//! host-supplied flavors and customization hooks over each component's
//! objects, and flattens everything into a `v1 List`.
//!
//! # Usage
//!
//! ```rust,ignore
//! let list = AppCompiler::new(&app)
//!     .with_flavors(&registry)
//!     .with_options(CompileOptions::default().strict(true))
//!     .compile_list()?;
//! ```

pub mod app;
mod compiler;
pub mod customize;
pub mod error;
pub mod k8s;
pub mod list;
pub mod merge;
pub mod options;
pub mod params;
mod resources;

mod pipeline;

pub use app::{
    App, AppComponent, ComponentFromImage, ComponentFromTemplate, ComponentOpts,
    ComponentTemplate, WorkloadKind,
};
pub use compiler::{AppCompiler, ComponentCompiler};
pub use customize::{Customizer, Customizers, Flavor, FlavorRegistry, Stage};
pub use error::CompilationError;
pub use list::{ResourceList, ResourceObject};
pub use merge::Merge;
pub use options::CompileOptions;
pub use params::{AppParams, StandardProbe};
pub use resources::AppComponentResources;
