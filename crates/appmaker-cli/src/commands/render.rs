//! Render command

use appmaker_workload::AppCompiler;
use tracing::info;

use super::{load_app, CompileArgs};
use crate::Result;

/// Compile the app and return the rendered List
pub fn render(args: &CompileArgs) -> Result<String> {
    let app = load_app(&args.file)?;
    let list = AppCompiler::new(&app)
        .with_options(args.options())
        .compile_list()?;
    info!(
        file = %args.file.display(),
        objects = list.len(),
        "rendered app"
    );
    args.output.render(&list)
}

pub fn run(args: CompileArgs) -> Result<()> {
    println!("{}", render(&args)?.trim_end());
    Ok(())
}
