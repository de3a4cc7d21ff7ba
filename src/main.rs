use anyhow::Result;
use clap::Parser;
use tr_docs::cli::Cli;
use tr_docs::config::Config;
use tr_docs::pipeline::{self, StagePlan};
use tracing::debug;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Config keys may come from a .env file in the working directory;
    // a missing file is fine, the environment alone is enough.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }

    let plan = StagePlan::from_cli(&cli);
    debug!("stage plan: {:?}", plan);

    let config = Config::from_env(&plan)?;
    pipeline::run(&plan, cli.ffc, &config).await
}
