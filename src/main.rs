use anyhow::Result;
use clap::Parser;

use beeline_cli::settings::init_logger;

#[tokio::main]
async fn main() -> Result<()> {
    init_logger()?;
    let cli = beeline_cli::cli::Cli::parse();
    beeline_cli::run(cli).await?;
    Ok(())
}
