//! Definitions of CLI arguments and commands for deploy scripts

use std::{path::PathBuf, time::Duration};

use clap::{Args, Parser, Subcommand};

use crate::{
    chain::ChainClient,
    commands::{deploy_all, deploy_strategy, deploy_vault, initialize_vault},
    constants::{
        DEFAULT_ARTIFACTS_DIR, DEFAULT_DEPLOYMENTS_PATH, DEFAULT_DEPOSIT_FEE, DEFAULT_GAS_LIMIT,
        DEFAULT_GAS_PRICE, DEFAULT_NUM_CONFIRMATIONS, DEFAULT_PAYMENT_SPLITTER_ADDRESS,
        DEFAULT_POOL_ID, DEFAULT_RPC_URL, DEFAULT_STRATEGIST_ADDRESSES, DEFAULT_TOKEN_NAME,
        DEFAULT_TOKEN_SYMBOL, DEFAULT_TREASURY_ADDRESS, DEFAULT_TVL_CAP, DEFAULT_WANT_ADDRESS,
    },
    errors::ScriptError,
    types::TxOptions,
};

/// Deploy and initialize a vault & its yield-farming strategy
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Private key of the deployer
    #[arg(short, long, env = "PKEY")]
    pub priv_key: String,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// Directory containing the compiled Hardhat artifacts
    #[arg(long, default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts_dir: PathBuf,

    /// Path to a compiled ERC1967Proxy artifact. Searched for under the
    /// artifacts directory & the OpenZeppelin packages if unset
    #[arg(long)]
    pub proxy_artifact: Option<PathBuf>,

    /// Path to the file in which deployed addresses are recorded
    #[arg(short, long, default_value = DEFAULT_DEPLOYMENTS_PATH)]
    pub deployments_path: PathBuf,

    /// Gas price, in wei, for every transaction sent
    #[arg(long, default_value_t = DEFAULT_GAS_PRICE)]
    pub gas_price: u128,

    /// Gas limit for every transaction sent
    #[arg(long, default_value_t = DEFAULT_GAS_LIMIT)]
    pub gas_limit: u64,

    /// Number of confirmations to wait for on each transaction
    #[arg(long, default_value_t = DEFAULT_NUM_CONFIRMATIONS)]
    pub confirmations: u64,

    /// Seconds to wait for each transaction receipt.
    /// Waits indefinitely if unset
    #[arg(long)]
    pub tx_timeout: Option<u64>,

    /// The deploy step to run
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// The gas options given on the command line
    pub fn tx_options(&self) -> TxOptions {
        TxOptions {
            gas_price: self.gas_price,
            gas_limit: self.gas_limit,
        }
    }

    /// The receipt timeout given on the command line
    pub fn tx_timeout(&self) -> Option<Duration> {
        self.tx_timeout.map(Duration::from_secs)
    }

    /// The settings shared by every command
    pub fn context(&self) -> ScriptContext {
        ScriptContext {
            artifacts_dir: self.artifacts_dir.clone(),
            proxy_artifact: self.proxy_artifact.clone(),
            deployments_path: self.deployments_path.clone(),
            tx_options: self.tx_options(),
        }
    }
}

/// The settings shared by every command
#[derive(Clone, Debug)]
pub struct ScriptContext {
    /// Directory containing the compiled Hardhat artifacts
    pub artifacts_dir: PathBuf,
    /// Explicit path to the proxy artifact, if given
    pub proxy_artifact: Option<PathBuf>,
    /// Path to the deployments file
    pub deployments_path: PathBuf,
    /// Gas options for every transaction sent
    pub tx_options: TxOptions,
}

/// The deploy steps, meant to be run once each, in order
#[derive(Subcommand)]
pub enum Command {
    /// Step 1: deploy the vault
    DeployVault(VaultArgs),
    /// Step 2: deploy the strategy behind a UUPS proxy
    DeployStrategy(DeployStrategyArgs),
    /// Step 3: link the vault to its strategy
    Initialize(InitializeArgs),
    /// Run all three steps in order
    DeployAll(DeployAllArgs),
}

impl Command {
    /// Run the command against the given chain
    pub async fn run(
        self,
        client: &impl ChainClient,
        context: &ScriptContext,
    ) -> Result<(), ScriptError> {
        match self {
            Command::DeployVault(args) => deploy_vault(&args, client, context).await.map(drop),
            Command::DeployStrategy(args) => {
                deploy_strategy(&args, client, context).await.map(drop)
            }
            Command::Initialize(args) => initialize_vault(&args, client, context).await,
            Command::DeployAll(args) => deploy_all(&args, client, context).await,
        }
    }
}

/// The vault's constructor arguments
#[derive(Args, Clone, Debug)]
pub struct VaultArgs {
    /// Address of the token the vault accepts
    #[arg(long, default_value = DEFAULT_WANT_ADDRESS)]
    pub want: String,

    /// Name of the vault's share token
    #[arg(long, default_value = DEFAULT_TOKEN_NAME)]
    pub token_name: String,

    /// Symbol of the vault's share token
    #[arg(long, default_value = DEFAULT_TOKEN_SYMBOL)]
    pub token_symbol: String,

    /// Deposit fee, in basis points
    #[arg(long, default_value_t = DEFAULT_DEPOSIT_FEE)]
    pub deposit_fee: u64,

    /// TVL cap, in whole tokens (scaled by 10^18)
    #[arg(long, default_value = DEFAULT_TVL_CAP)]
    pub tvl_cap: String,
}

/// The strategy's initializer arguments, other than the vault & want token
#[derive(Args, Clone, Debug)]
pub struct StrategyArgs {
    /// Address of the treasury, the first fee remitter
    #[arg(long, default_value = DEFAULT_TREASURY_ADDRESS)]
    pub treasury: String,

    /// Address of the strategists' payment splitter, the second fee remitter
    #[arg(long, default_value = DEFAULT_PAYMENT_SPLITTER_ADDRESS)]
    pub payment_splitter: String,

    /// Comma-separated addresses of the strategists
    #[arg(long, value_delimiter = ',', default_values = DEFAULT_STRATEGIST_ADDRESSES)]
    pub strategists: Vec<String>,

    /// Id of the farm pool the strategy stakes in
    #[arg(long, default_value_t = DEFAULT_POOL_ID)]
    pub pool_id: u64,
}

/// Deploy the strategy implementation and an ERC-1967 proxy in front of it,
/// initializing the strategy through the proxy's constructor
#[derive(Args, Clone, Debug)]
pub struct DeployStrategyArgs {
    /// Address of the vault, read from the deployments file if unset
    #[arg(long)]
    pub vault: Option<String>,

    /// Address of the token the strategy farms with
    #[arg(long, default_value = DEFAULT_WANT_ADDRESS)]
    pub want: String,

    /// The remaining initializer arguments
    #[command(flatten)]
    pub strategy: StrategyArgs,
}

/// Link a deployed vault to its strategy
#[derive(Args, Clone, Debug)]
pub struct InitializeArgs {
    /// Address of the vault, read from the deployments file if unset
    #[arg(long)]
    pub vault: Option<String>,

    /// Address of the strategy proxy, read from the deployments file if unset
    #[arg(long)]
    pub strategy: Option<String>,
}

/// Deploy the vault & strategy, then link them. The strategy farms the
/// vault's want token
#[derive(Args, Clone, Debug)]
pub struct DeployAllArgs {
    /// The vault's constructor arguments
    #[command(flatten)]
    pub vault: VaultArgs,

    /// The strategy's initializer arguments
    #[command(flatten)]
    pub strategy: StrategyArgs,
}
