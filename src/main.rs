use anyhow::Result;
use clap::Parser;

use rqc_step::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
