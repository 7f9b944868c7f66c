//! Utilities for the deploy scripts.

use std::{str::FromStr, time::Duration};

use alloy::{
    primitives::Address,
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use tracing::info;

use crate::{chain::RpcClient, errors::ScriptError};

/// Sets up the RPC client with which the scripts send transactions, signing
/// with the given private key.
///
/// Fetches the chain ID so that an unreachable node fails here rather than
/// midway through a deployment.
pub async fn setup_client(
    priv_key: &str,
    rpc_url: &str,
    confirmations: u64,
    tx_timeout: Option<Duration>,
) -> Result<RpcClient, ScriptError> {
    let signer = PrivateKeySigner::from_str(priv_key)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let deployer = signer.address();

    let url = Url::parse(rpc_url).map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let provider = ProviderBuilder::new().wallet(signer).connect_http(url);

    let chain_id = provider
        .get_chain_id()
        .await
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    info!("Connected to chain {chain_id} as {deployer}");

    Ok(RpcClient::new(
        DynProvider::new(provider),
        confirmations,
        tx_timeout,
    ))
}

/// Parse a hex-encoded address given on the command line or read from a file
pub fn parse_address(address: &str) -> Result<Address, ScriptError> {
    Address::from_str(address)
        .map_err(|e| ScriptError::CalldataConstruction(format!("invalid address {address}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address_accepts_mixed_case() {
        let address = parse_address("0x66402fdF9CF83Cdd54bfBB231162eEdA1B611925").unwrap();
        assert_eq!(
            address,
            parse_address("0x66402fdf9cf83cdd54bfbb231162eeda1b611925").unwrap()
        );
    }

    #[test]
    fn test_parse_address_rejects_short_input() {
        let err = parse_address("0x66402f").unwrap_err();
        assert!(err.to_string().contains("0x66402f"));
    }
}
