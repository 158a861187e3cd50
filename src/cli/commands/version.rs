use anyhow::Result;
use clap::Args;

use crate::config::StepConfig;

#[derive(Args)]
pub struct VersionArgs {
    /// Show detailed version information
    #[arg(long = "detailed")]
    pub detailed: bool,
}

pub fn execute(args: VersionArgs, config_path: Option<&str>) -> Result<()> {
    println!("rqc-step {}", env!("CARGO_PKG_VERSION"));

    if args.detailed {
        let settings = StepConfig::load(config_path)?.settings()?;
        println!("BBTools service: {}", settings.service.bbtools_version);
        println!("DataFileUtil service: {}", settings.service.datafileutil_version);
        println!("License: {}", env!("CARGO_PKG_LICENSE"));
        println!("Description: {}", env!("CARGO_PKG_DESCRIPTION"));
    }
    Ok(())
}
