//! Implementations of the various deploy scripts

use alloy::{
    primitives::{Address, B256, U256},
    sol_types::SolCall,
};
use tracing::{debug, info};

use crate::{
    artifacts::{proxy_search_dirs, ContractArtifact},
    chain::ChainClient,
    cli::{DeployAllArgs, DeployStrategyArgs, InitializeArgs, ScriptContext, VaultArgs},
    constants::{
        PROXY_CONTRACT_NAME, PROXY_IMPLEMENTATION_STORAGE_SLOT, STRATEGY_CONTRACT_NAME,
        STRATEGY_IMPLEMENTATION_CONTRACT_KEY, STRATEGY_PROXY_CONTRACT_KEY, VAULT_CONTRACT_KEY,
        VAULT_CONTRACT_NAME,
    },
    deployments::{resolve_address, write_deployment},
    errors::ScriptError,
    solidity::IReaperVault,
    types::{proxy_constructor_args, ProxyDeployment, StrategyParams, VaultParams},
    utils::parse_address,
};

/// The number of arguments the ERC-1967 proxy constructor takes
const NUM_PROXY_CONSTRUCTOR_ARGS: usize = 2;

/// The checked bytecode of the strategy implementation & its proxy
struct StrategyBytecode {
    /// Creation code of the implementation, which takes no constructor arguments
    implementation: Vec<u8>,
    /// Bytecode of the proxy, without its constructor arguments
    proxy: Vec<u8>,
}

impl StrategyBytecode {
    /// Load both artifacts, preferring an explicitly given proxy artifact
    fn load(context: &ScriptContext) -> Result<Self, ScriptError> {
        let strategy_artifact =
            ContractArtifact::load(&context.artifacts_dir, STRATEGY_CONTRACT_NAME)?;
        let proxy_artifact = match &context.proxy_artifact {
            Some(path) => ContractArtifact::from_file(path)?,
            None => ContractArtifact::load_first(
                &proxy_search_dirs(&context.artifacts_dir),
                PROXY_CONTRACT_NAME,
            )?,
        };

        Ok(Self {
            implementation: strategy_artifact.creation_code(0 /* num_args */, &[])?,
            proxy: proxy_artifact.checked_bytecode(NUM_PROXY_CONSTRUCTOR_ARGS)?,
        })
    }
}

/// Deploy the vault contract, returning its address
pub async fn deploy_vault(
    args: &VaultArgs,
    client: &impl ChainClient,
    context: &ScriptContext,
) -> Result<Address, ScriptError> {
    let params = VaultParams::try_from(args)?;
    let creation_code = vault_creation_code(&params, context)?;

    send_vault(&params, creation_code, client, context).await
}

/// Deploy the strategy behind a UUPS proxy for the vault given on the
/// command line or recorded in the deployments file
pub async fn deploy_strategy(
    args: &DeployStrategyArgs,
    client: &impl ChainClient,
    context: &ScriptContext,
) -> Result<ProxyDeployment, ScriptError> {
    let vault_address = resolve_address(
        args.vault.as_deref(),
        &context.deployments_path,
        VAULT_CONTRACT_KEY,
    )?;
    let params = StrategyParams::from_args(vault_address, args)?;
    let bytecode = StrategyBytecode::load(context)?;

    deploy_strategy_proxy(&params, bytecode, client, context).await
}

/// Link the vault to its strategy, each given on the command line or
/// recorded in the deployments file
pub async fn initialize_vault(
    args: &InitializeArgs,
    client: &impl ChainClient,
    context: &ScriptContext,
) -> Result<(), ScriptError> {
    let vault_address = resolve_address(
        args.vault.as_deref(),
        &context.deployments_path,
        VAULT_CONTRACT_KEY,
    )?;
    let strategy_address = resolve_address(
        args.strategy.as_deref(),
        &context.deployments_path,
        STRATEGY_PROXY_CONTRACT_KEY,
    )?;

    link_vault(vault_address, strategy_address, client, context).await
}

/// Deploy the vault, deploy its strategy, and link the two
pub async fn deploy_all(
    args: &DeployAllArgs,
    client: &impl ChainClient,
    context: &ScriptContext,
) -> Result<(), ScriptError> {
    // Parse & load everything up front so that a typo or a missing artifact
    // does not leave a half-deployed system
    let vault_params = VaultParams::try_from(&args.vault)?;
    let want = parse_address(&args.vault.want)?;
    StrategyParams::new(Address::ZERO, want, &args.strategy)?;
    let vault_code = vault_creation_code(&vault_params, context)?;
    let strategy_bytecode = StrategyBytecode::load(context)?;

    let vault_address = send_vault(&vault_params, vault_code, client, context).await?;

    let params = StrategyParams::new(vault_address, want, &args.strategy)?;
    let strategy = deploy_strategy_proxy(&params, strategy_bytecode, client, context).await?;

    link_vault(vault_address, strategy.proxy, client, context).await
}

/// Load the vault artifact & append the constructor arguments
fn vault_creation_code(
    params: &VaultParams,
    context: &ScriptContext,
) -> Result<Vec<u8>, ScriptError> {
    let artifact = ContractArtifact::load(&context.artifacts_dir, VAULT_CONTRACT_NAME)?;
    artifact.creation_code(VaultParams::NUM_CONSTRUCTOR_ARGS, &params.constructor_args())
}

/// Deploy the vault from its creation code & record its address
async fn send_vault(
    params: &VaultParams,
    creation_code: Vec<u8>,
    client: &impl ChainClient,
    context: &ScriptContext,
) -> Result<Address, ScriptError> {
    debug!("Deploying vault contract...");
    let vault_address = client.deploy(creation_code, context.tx_options).await?;

    info!(
        "Vault contract successfully deployed!\n\
        Vault contract address: {vault_address}\n\
        Share token: {} ({})\n\
        TVL cap: {}\n",
        params.token_name, params.token_symbol, params.tvl_cap,
    );
    println!("Vault deployed to: {vault_address}");

    write_deployment(&context.deployments_path, VAULT_CONTRACT_KEY, vault_address)?;
    Ok(vault_address)
}

/// Deploy the strategy implementation, then an ERC-1967 proxy whose
/// constructor delegates the strategy's `initialize` call to it
async fn deploy_strategy_proxy(
    params: &StrategyParams,
    bytecode: StrategyBytecode,
    client: &impl ChainClient,
    context: &ScriptContext,
) -> Result<ProxyDeployment, ScriptError> {
    // Deploy the implementation, which is only ever initialized through the proxy
    debug!("Deploying strategy implementation contract...");
    let implementation = client
        .deploy(bytecode.implementation, context.tx_options)
        .await?;
    info!("Strategy implementation deployed at {implementation}");

    debug!("Deploying strategy proxy contract...");
    let mut proxy_code = bytecode.proxy;
    proxy_code.extend(proxy_constructor_args(
        implementation,
        params.initialize_calldata(),
    ));
    let proxy = client
        .deploy(proxy_code, context.tx_options)
        .await
        .map_err(|e| match e {
            ScriptError::ContractDeployment(msg) => ScriptError::ContractDeployment(format!(
                "proxy for strategy implementation {implementation}: {msg}"
            )),
            e => e,
        })?;

    // Make sure the proxy points at the implementation we just deployed
    let slot = U256::from_be_bytes(PROXY_IMPLEMENTATION_STORAGE_SLOT.0);
    let slot_value = client.storage_at(proxy, slot).await?;
    let stored_implementation = Address::from_word(B256::from(slot_value.to_be_bytes::<32>()));
    if stored_implementation != implementation {
        return Err(ScriptError::ContractDeployment(format!(
            "proxy {proxy} points at {stored_implementation}, expected {implementation}"
        )));
    }

    info!(
        "Strategy contract successfully deployed!\n\
        Strategy proxy address: {proxy}\n\
        Strategy implementation address: {implementation}\n\
        Vault address: {}\n",
        params.vault,
    );
    println!("Strategy deployed to: {proxy}");

    write_deployment(
        &context.deployments_path,
        STRATEGY_IMPLEMENTATION_CONTRACT_KEY,
        implementation,
    )?;
    write_deployment(&context.deployments_path, STRATEGY_PROXY_CONTRACT_KEY, proxy)?;

    Ok(ProxyDeployment {
        proxy,
        implementation,
    })
}

/// Call the vault's one-time `initialize` with the strategy, then read the
/// strategy back to confirm the link
async fn link_vault(
    vault_address: Address,
    strategy_address: Address,
    client: &impl ChainClient,
    context: &ScriptContext,
) -> Result<(), ScriptError> {
    let code = client.code_at(vault_address).await?;
    if code.is_empty() {
        return Err(ScriptError::ContractInteraction(format!(
            "no contract deployed at vault address {vault_address}"
        )));
    }

    debug!("Initializing vault contract...");
    let calldata = IReaperVault::initializeCall {
        _strategy: strategy_address,
    }
    .abi_encode();
    let tx_hash = client
        .send(vault_address, calldata, context.tx_options)
        .await?;

    let return_data = client
        .call(vault_address, IReaperVault::strategyCall {}.abi_encode())
        .await?;
    let linked_strategy = IReaperVault::strategyCall::abi_decode_returns(&return_data)
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
    if linked_strategy != strategy_address {
        return Err(ScriptError::ContractInteraction(format!(
            "vault {vault_address} reports strategy {linked_strategy}, expected {strategy_address}"
        )));
    }

    info!(
        "Vault contract initialized!\n\
        Strategy address: {strategy_address}\n\
        Transaction hash: {tx_hash:#x}\n",
    );
    println!("Vault initialized: {vault_address}");

    Ok(())
}
