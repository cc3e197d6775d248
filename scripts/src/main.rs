use clap::Parser;
use eyre::Result;
use neon_scripts::{cli::Cli, utils::setup_context};

#[tokio::main]
async fn main() -> Result<()> {
    // Load a `.env` file if present, so that its variables are visible to the CLI
    dotenvy::dotenv().ok();

    let Cli {
        network,
        rpc_url,
        priv_key,
        artifacts,
        deployments,
        command,
    } = Cli::parse();

    tracing_subscriber::fmt().pretty().init();

    let ctx = setup_context(&network, rpc_url, priv_key, artifacts, deployments).await?;

    command.run(&ctx).await?;
    Ok(())
}
