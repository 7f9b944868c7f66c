//! Constants used in the deploy scripts

use alloy::primitives::{b256, B256};

// ----------------
// | Client Setup |
// ----------------

/// The default RPC URL, a locally running node
pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";

/// The default path of the deployments file
pub const DEFAULT_DEPLOYMENTS_PATH: &str = "deployments.json";

/// The default directory holding the compiled contract artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// The number of confirmations to wait for on each transaction
pub const DEFAULT_NUM_CONFIRMATIONS: u64 = 1;

/// The default gas price, in wei, attached to every transaction
pub const DEFAULT_GAS_PRICE: u128 = 300_000_000_000;

/// The default gas limit attached to every transaction
pub const DEFAULT_GAS_LIMIT: u64 = 9_000_000;

// -------------
// | Artifacts |
// -------------

/// The name of the vault contract
pub const VAULT_CONTRACT_NAME: &str = "ReaperVaultv1_3";

/// The name of the strategy contract
pub const STRATEGY_CONTRACT_NAME: &str = "ReaperAutoCompoundExcaliburFarmer";

/// The name of the proxy contract fronting the strategy.
///
/// The strategy is a UUPS implementation, so the proxy itself is a plain
/// ERC-1967 proxy
pub const PROXY_CONTRACT_NAME: &str = "ERC1967Proxy";

/// Directories, relative to the project root, holding the prebuilt ERC-1967
/// proxy artifact that ships with the OpenZeppelin packages.
///
/// `@openzeppelin/hardhat-upgrades` pulls in `upgrades-core`, so a project
/// deploying with it has the proxy here even if none of its own contracts
/// import it
pub const OPENZEPPELIN_PROXY_ARTIFACT_DIRS: [&str; 2] = [
    "node_modules/@openzeppelin/upgrades-core/artifacts",
    "node_modules/@openzeppelin/contracts/build/contracts",
];

/// The extension of a compiled artifact file
pub const ARTIFACT_EXTENSION: &str = "json";

/// The marker solc leaves in bytecode that still needs library linking
pub const UNLINKED_LIBRARY_MARKER: &str = "__$";

/// The storage slot containing the implementation address of an ERC-1967 proxy.
///
/// This is specified in EIP1967: https://eips.ethereum.org/EIPS/eip-1967#logic-contract-address
pub const PROXY_IMPLEMENTATION_STORAGE_SLOT: B256 =
    b256!("0x360894a13ba1a3210667c828492db98dca3e2076cc3735a920a3ca505d382bbc");

// ---------------
// | Deployments |
// ---------------

/// The deployments key in the `deployments.json` file
pub const DEPLOYMENTS_KEY: &str = "deployments";

/// The vault contract key in the `deployments.json` file
pub const VAULT_CONTRACT_KEY: &str = "vault_contract";

/// The strategy proxy contract key in the `deployments.json` file
pub const STRATEGY_PROXY_CONTRACT_KEY: &str = "strategy_proxy_contract";

/// The strategy implementation contract key in the `deployments.json` file
pub const STRATEGY_IMPLEMENTATION_CONTRACT_KEY: &str = "strategy_implementation_contract";

// ------------------
// | Vault Defaults |
// ------------------

/// The token the vault accepts deposits in (the FTM-UST Excalibur LP)
pub const DEFAULT_WANT_ADDRESS: &str = "0x66402fdF9CF83Cdd54bfBB231162eEdA1B611925";

/// The name of the vault's share token
pub const DEFAULT_TOKEN_NAME: &str = "FTM-UST Excalibur Crypt";

/// The symbol of the vault's share token
pub const DEFAULT_TOKEN_SYMBOL: &str = "rf-EXC-V1-FTM-UST";

/// The vault's deposit fee, in basis points
pub const DEFAULT_DEPOSIT_FEE: u64 = 0;

/// The vault's TVL cap, in whole tokens
pub const DEFAULT_TVL_CAP: &str = "2000";

// ---------------------
// | Strategy Defaults |
// ---------------------

/// The treasury receiving protocol fees
pub const DEFAULT_TREASURY_ADDRESS: &str = "0x0e7c5313E9BB80b654734d9b7aB1FB01468deE3b";

/// The payment splitter receiving strategist fees
pub const DEFAULT_PAYMENT_SPLITTER_ADDRESS: &str = "0x63cbd4134c2253041F370472c130e92daE4Ff174";

/// The strategists allowed to manage the strategy
pub const DEFAULT_STRATEGIST_ADDRESSES: [&str; 3] = [
    "0x1E71AEE6081f62053123140aacC7a06021D77348",
    "0x81876677843D00a7D792E1617459aC2E93202576",
    "0x1A20D7A31e5B3Bc5f02c8A146EF6f394502a10c4",
];

/// The id of the farm pool the strategy stakes in
pub const DEFAULT_POOL_ID: u64 = 2;
