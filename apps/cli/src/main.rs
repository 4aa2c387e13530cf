mod cli;
mod config;
mod main_lib;

use clap::Parser;
use cli::CliArgs;
use config::Config;
use main_lib::{init_tracing, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let config = Config::from_env()?;
    init_tracing();
    run(config, args).await
}
