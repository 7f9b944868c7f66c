use clap::Parser;
use crypt_scripts::{cli::Cli, errors::ScriptError, utils::setup_client};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), ScriptError> {
    let cli = Cli::parse();

    // Logs go to stderr, leaving stdout for the deployed addresses
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let client = setup_client(
        &cli.priv_key,
        &cli.rpc_url,
        cli.confirmations,
        cli.tx_timeout(),
    )
    .await?;

    let context = cli.context();
    cli.command.run(&client, &context).await
}
