use anyhow::{Context, Result};
use clap::Args;
use console::style;
use std::path::PathBuf;

use crate::cli::{OutputFormat, Output};
use crate::clients::{BbToolsClient, DataFileUtilClient, LocalPacker, RpcClient};
use crate::config::{Settings, StepConfig};
use crate::filter::{FilterResult, FilterStep};

#[derive(Args)]
pub struct RunArgs {
    /// FASTQ reads file to filter
    #[arg(value_name = "READS_FILE")]
    pub reads_file: PathBuf,

    /// Skip RQCFilter and only gzip the reads into a new output directory
    #[arg(long)]
    pub skip_rqcfilter: bool,

    /// Set the pipeline debug flag
    #[arg(long)]
    pub debug: bool,

    /// Scratch directory for step output
    #[arg(long, value_name = "DIR")]
    pub scratch_dir: Option<PathBuf>,

    /// Callback server URL (defaults to $SDK_CALLBACK_URL)
    #[arg(long, value_name = "URL")]
    pub callback_url: Option<String>,

    /// Gzip locally instead of calling DataFileUtil
    #[arg(long)]
    pub local_pack: bool,

    /// Result output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl RunArgs {
    /// CLI flags win over every config layer.
    fn apply(&self, settings: &mut Settings) {
        if self.skip_rqcfilter {
            settings.filter.skip_rqcfilter = true;
        }
        if self.debug {
            settings.filter.debug = true;
        }
        if self.local_pack {
            settings.filter.local_pack = true;
        }
        if let Some(dir) = &self.scratch_dir {
            settings.filter.scratch_dir = dir.clone();
        }
        if let Some(url) = &self.callback_url {
            settings.service.callback_url = url.clone();
        }
    }
}

pub fn execute(args: RunArgs, config_path: Option<&str>, output: &Output) -> Result<()> {
    let mut settings = StepConfig::load(config_path)?.settings()?;
    args.apply(&mut settings);

    let step = build_step(&settings)?;
    if args.format == OutputFormat::Text {
        output.header("RQCFilter");
        if step.is_skipping() {
            output.step("Skipping RQCFilter, packing reads as-is");
        } else {
            output.step(&format!("Filtering via {}", settings.service.callback_url));
        }
        output.verbose(&format!("Scratch directory: {}", settings.filter.scratch_dir.display()));
        output.verbose(&format!("BBTools version: {}", settings.service.bbtools_version));
    }

    let result = step
        .execute(&args.reads_file)
        .with_context(|| format!("RQCFilter step failed for {}", args.reads_file.display()))?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => print_result(&result, output),
    }
    Ok(())
}

pub fn build_step(settings: &Settings) -> Result<FilterStep> {
    let config = settings.filter_config();
    let rpc = RpcClient::new(
        settings.service.callback_url.clone(),
        settings.service.token.clone(),
    )?;
    let filter = BbToolsClient::new(rpc.clone(), &settings.service.bbtools_version);

    let step = if settings.filter.local_pack {
        let packer = LocalPacker::new(&settings.filter.scratch_dir);
        FilterStep::with_clients(config, filter, packer)
    } else {
        let packer = DataFileUtilClient::new(rpc, &settings.service.datafileutil_version);
        FilterStep::with_clients(config, filter, packer)
    };
    Ok(step)
}

/// The paths are the command's result, so they print even with `--quiet`.
fn print_result(result: &FilterResult, output: &Output) {
    output.success("RQCFilter step complete");
    for (key, path) in [
        ("output_directory", &result.output_directory),
        ("filtered_fastq_file", &result.filtered_fastq_file),
        ("run_log", &result.run_log),
    ] {
        println!("  {:<22} {}", style(key).dim(), path.display());
    }
}
