//! Resolve command

use appmaker_workload::AppCompiler;

use super::{load_app, CompileArgs};
use crate::Result;

/// Resolve templates and common env and return the canonical components
pub fn resolve(args: &CompileArgs) -> Result<String> {
    let app = load_app(&args.file)?;
    let components = AppCompiler::new(&app)
        .with_options(args.options())
        .resolve()?;
    args.output.render(&components)
}

pub fn run(args: CompileArgs) -> Result<()> {
    println!("{}", resolve(&args)?.trim_end());
    Ok(())
}
