//! appmaker CLI
//!
//! Renders declarative app descriptions into Kubernetes manifests.

use clap::Parser;

use appmaker_cli::{Cli, Result};
use appmaker_common::telemetry::init_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_config())?;
    cli.run()
}
