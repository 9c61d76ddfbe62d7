//! AppCompiler orchestrates the full compilation pipeline
//!
//! This is the single entry point for turning an [`App`] into Kubernetes
//! objects. Every component runs through the same fixed sequence: template
//! resolution, common-env resolution, base synthesis, flavor, then the
//! stage-ordered customization hooks.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::app::{App, AppComponent, WorkloadKind};
use crate::customize::{Flavor, FlavorRegistry};
use crate::error::CompilationError;
use crate::list::ResourceList;
use crate::merge::Merge;
use crate::options::CompileOptions;
use crate::params::AppParams;
use crate::pipeline::{customize, env, pod_template, workload};
use crate::resources::AppComponentResources;

/// Compiles every component of an app.
///
/// Uses a builder pattern for optional features:
///
/// ```rust,ignore
/// let list = AppCompiler::new(&app)
///     .with_flavors(&registry)
///     .with_options(CompileOptions::default().strict(true))
///     .compile_list()?;
/// ```
pub struct AppCompiler<'a> {
    app: &'a App,
    flavors: Option<&'a FlavorRegistry>,
    options: CompileOptions,
}

impl<'a> AppCompiler<'a> {
    /// Create a compiler with default options and no flavors
    pub fn new(app: &'a App) -> Self {
        Self {
            app,
            flavors: None,
            options: CompileOptions::default(),
        }
    }

    /// Set the flavor registry components can select from
    pub fn with_flavors(mut self, flavors: &'a FlavorRegistry) -> Self {
        self.flavors = Some(flavors);
        self
    }

    /// Set compilation options
    pub fn with_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    /// Parameters shared by every component of this compilation
    pub fn params(&self) -> AppParams {
        AppParams::from_app(self.app, &self.options)
    }

    /// Canonical components in output order: explicit, then image-only,
    /// then template-reference
    fn components(&self) -> impl Iterator<Item = AppComponent> + '_ {
        self.app
            .components
            .iter()
            .cloned()
            .chain(
                self.app
                    .components_from_images
                    .iter()
                    .map(|c| c.to_component()),
            )
            .chain(
                self.app
                    .components_from_templates
                    .iter()
                    .map(|c| c.to_component()),
            )
    }

    /// Resolve every component without synthesizing objects
    pub fn resolve(&self) -> Result<Vec<AppComponent>, CompilationError> {
        let params = self.params();
        let compiler = self.component_compiler(&params);
        self.components().map(|c| compiler.resolve(c)).collect()
    }

    /// Compile every component into its resource bundle.
    ///
    /// The first error aborts the whole compilation.
    pub fn compile(&self) -> Result<Vec<AppComponentResources>, CompilationError> {
        let params = self.params();
        info!(
            group = %params.namespace,
            components = self.app.component_count(),
            strict = self.options.strict,
            "compiling app"
        );
        let compiler = self.component_compiler(&params);
        self.components().map(|c| compiler.compile(c)).collect()
    }

    /// Compile every component and flatten the objects into one list
    pub fn compile_list(&self) -> Result<ResourceList, CompilationError> {
        let items = self
            .compile()?
            .into_iter()
            .flat_map(AppComponentResources::into_items)
            .collect();
        Ok(ResourceList::new(items))
    }

    fn component_compiler<'p>(&'p self, params: &'p AppParams) -> ComponentCompiler<'p> {
        let compiler = ComponentCompiler::new(params, &self.options);
        match self.flavors {
            Some(flavors) => compiler.with_flavors(flavors),
            None => compiler,
        }
    }
}

/// Compiles a single canonical component against frozen app parameters
pub struct ComponentCompiler<'a> {
    params: &'a AppParams,
    options: &'a CompileOptions,
    flavors: Option<&'a FlavorRegistry>,
}

impl<'a> ComponentCompiler<'a> {
    /// Create a compiler for components of one app
    pub fn new(params: &'a AppParams, options: &'a CompileOptions) -> Self {
        Self {
            params,
            options,
            flavors: None,
        }
    }

    /// Set the flavor registry
    pub fn with_flavors(mut self, flavors: &'a FlavorRegistry) -> Self {
        self.flavors = Some(flavors);
        self
    }

    /// Resolve template inheritance, suppression coupling and common env
    pub fn resolve(&self, mut component: AppComponent) -> Result<AppComponent, CompilationError> {
        if let Some(template_name) = component.based_on.clone() {
            match self.params.template(&template_name) {
                Some(template) => component.merge_from(template),
                None => self.tolerate(CompilationError::UnknownTemplate {
                    component: component.derived_name(),
                    template: template_name,
                })?,
            }
        }

        if self.options.couple_port_suppression && component.opts.without_ports {
            component.opts.without_service = true;
            component.opts.without_standard_probes = true;
        }

        env::resolve_common(&mut component, self.params.common_env());
        Ok(component)
    }

    /// Run the full pipeline for one component
    pub fn compile(&self, component: AppComponent) -> Result<AppComponentResources, CompilationError> {
        let component = self.resolve(component)?;
        let name = component.derived_name();
        let flavor = self.lookup_flavor(&component, &name)?;

        let deployment = match component.workload_kind() {
            WorkloadKind::Deployment => {
                let template = pod_template::compile(&component, self.params);
                Some(workload::compile_deployment(&component, self.params, template))
            }
            kind => {
                self.tolerate(CompilationError::UnsupportedKind {
                    component: name.clone(),
                    kind,
                })?;
                None
            }
        };

        let service =
            (!component.opts.without_service).then(|| workload::compile_service(&component, self.params));

        let hooks = component.customizers.clone();
        let mut resources = AppComponentResources::new(component);
        if let Some(deployment) = deployment {
            resources = resources.with_deployment(deployment);
        }
        if let Some(service) = service {
            resources = resources.with_service(service);
        }

        if let Some(flavor) = flavor {
            customize::apply_flavor(&mut resources, flavor.as_ref());
        }
        customize::run_hooks(&mut resources, &hooks);

        debug!(
            component = %name,
            deployment = resources.deployment().is_some(),
            service = resources.service().is_some(),
            hooks = ?hooks,
            "compiled component"
        );
        Ok(resources)
    }

    /// Compile one component straight into a list
    pub fn make_list(&self, component: AppComponent) -> Result<ResourceList, CompilationError> {
        Ok(self.compile(component)?.into_list())
    }

    fn lookup_flavor(
        &self,
        component: &AppComponent,
        name: &str,
    ) -> Result<Option<Arc<dyn Flavor>>, CompilationError> {
        let Some(flavor_name) = component.flavor.as_deref() else {
            return Ok(None);
        };
        match self.flavors.and_then(|flavors| flavors.get(flavor_name)) {
            Some(flavor) => Ok(Some(Arc::clone(flavor))),
            None => {
                self.tolerate(CompilationError::UnknownFlavor {
                    component: name.to_string(),
                    flavor: flavor_name.to_string(),
                })?;
                Ok(None)
            }
        }
    }

    /// Fail in strict mode, warn and carry on otherwise
    fn tolerate(&self, err: CompilationError) -> Result<(), CompilationError> {
        if self.options.strict {
            return Err(err);
        }
        warn!(component = %err.component(), error = %err, "continuing in lenient mode");
        Ok(())
    }
}
