//! Configuration command implementations

use anyhow::Result;

use crate::cli::{ConfigCommands, Output};
use crate::config::{ConfigFormat, StepConfig};

/// Execute config commands
pub fn execute(cmd: ConfigCommands, config_path: Option<&str>, output: &Output) -> Result<()> {
    let config = StepConfig::load(config_path)?;
    match cmd {
        ConfigCommands::Show { json } => show(&config, json),
        ConfigCommands::Validate => validate(&config, output),
    }
}

fn show(config: &StepConfig, json: bool) -> Result<()> {
    let format = if json {
        ConfigFormat::Json
    } else {
        ConfigFormat::Toml
    };
    println!("{}", config.export_config(format)?);
    Ok(())
}

fn validate(config: &StepConfig, output: &Output) -> Result<()> {
    output.header("Validating Configuration");

    let settings = config.settings()?;
    output.success("Configuration is valid");
    output.blank_line();

    output.step("Configuration Summary");
    output.table_row("Callback URL", &settings.service.callback_url);
    output.table_row("BBTools version", &settings.service.bbtools_version);
    output.table_row("DataFileUtil version", &settings.service.datafileutil_version);
    output.table_row(
        "Auth token",
        if settings.service.token.as_deref().is_some_and(|t| !t.is_empty()) {
            "set"
        } else {
            "not set"
        },
    );
    output.table_row("Scratch directory", &settings.filter.scratch_dir.display().to_string());
    output.table_row("Skip RQCFilter", &settings.filter.skip_rqcfilter.to_string());
    output.table_row("Local packing", &settings.filter.local_pack.to_string());

    if !settings.filter.scratch_dir.is_dir() {
        output.warning("Scratch directory does not exist yet; it will be created on first skipped run");
    }
    Ok(())
}
