//! The interface through which the scripts talk to the chain

use std::time::Duration;

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, TxHash, U256},
    providers::{DynProvider, Provider},
    rpc::types::{TransactionReceipt, TransactionRequest},
};
use async_trait::async_trait;
use tracing::debug;

use crate::{errors::ScriptError, types::TxOptions};

/// The chain operations the deploy scripts rely on
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Send a contract creation transaction and wait for it to be mined,
    /// returning the address of the new contract
    async fn deploy(
        &self,
        creation_code: Vec<u8>,
        options: TxOptions,
    ) -> Result<Address, ScriptError>;

    /// Send a transaction calling `to` and wait for it to be mined
    async fn send(
        &self,
        to: Address,
        calldata: Vec<u8>,
        options: TxOptions,
    ) -> Result<TxHash, ScriptError>;

    /// Execute a read-only call against the latest block
    async fn call(&self, to: Address, calldata: Vec<u8>) -> Result<Bytes, ScriptError>;

    /// Fetch the runtime code deployed at the given address
    async fn code_at(&self, address: Address) -> Result<Bytes, ScriptError>;

    /// Read a raw storage slot of the given contract
    async fn storage_at(&self, address: Address, slot: U256) -> Result<U256, ScriptError>;
}

/// A [`ChainClient`] backed by a JSON-RPC node, signing with a local wallet
pub struct RpcClient {
    /// The underlying provider, with the deployer's wallet attached
    provider: DynProvider,
    /// The number of confirmations to wait for on each transaction
    confirmations: u64,
    /// How long to wait for a receipt, `None` waits indefinitely
    tx_timeout: Option<Duration>,
}

impl RpcClient {
    /// Wrap the given provider
    pub fn new(provider: DynProvider, confirmations: u64, tx_timeout: Option<Duration>) -> Self {
        Self {
            provider,
            confirmations,
            tx_timeout,
        }
    }

    /// Attach the gas options to the transaction, send it, and wait for a
    /// successful receipt
    async fn submit(
        &self,
        tx: TransactionRequest,
        options: TxOptions,
    ) -> Result<TransactionReceipt, String> {
        let pending_tx = self
            .provider
            .send_transaction(with_tx_options(tx, options))
            .await
            .map_err(|e| e.to_string())?;
        debug!("Sent transaction {:#x}", pending_tx.tx_hash());

        let receipt = pending_tx
            .with_required_confirmations(self.confirmations)
            .with_timeout(self.tx_timeout)
            .get_receipt()
            .await
            .map_err(|e| e.to_string())?;

        check_receipt(receipt)
    }
}

/// Attach the gas options to the transaction
fn with_tx_options(tx: TransactionRequest, options: TxOptions) -> TransactionRequest {
    tx.with_gas_price(options.gas_price)
        .with_gas_limit(options.gas_limit)
}

/// Fail if the transaction was mined but reverted
fn check_receipt(receipt: TransactionReceipt) -> Result<TransactionReceipt, String> {
    if !receipt.status() {
        return Err(format!(
            "transaction {:#x} reverted",
            receipt.transaction_hash
        ));
    }

    Ok(receipt)
}

/// The address of the contract created by the receipt's transaction
fn created_contract(receipt: &TransactionReceipt) -> Result<Address, ScriptError> {
    receipt.contract_address.ok_or_else(|| {
        ScriptError::ContractDeployment(format!(
            "no contract address in receipt of {:#x}",
            receipt.transaction_hash
        ))
    })
}

#[async_trait]
impl ChainClient for RpcClient {
    async fn deploy(
        &self,
        creation_code: Vec<u8>,
        options: TxOptions,
    ) -> Result<Address, ScriptError> {
        let tx = TransactionRequest::default().with_deploy_code(creation_code);
        let receipt = self
            .submit(tx, options)
            .await
            .map_err(ScriptError::ContractDeployment)?;

        created_contract(&receipt)
    }

    async fn send(
        &self,
        to: Address,
        calldata: Vec<u8>,
        options: TxOptions,
    ) -> Result<TxHash, ScriptError> {
        let tx = TransactionRequest::default()
            .with_to(to)
            .with_input(calldata);
        let receipt = self
            .submit(tx, options)
            .await
            .map_err(ScriptError::ContractInteraction)?;

        Ok(receipt.transaction_hash)
    }

    async fn call(&self, to: Address, calldata: Vec<u8>) -> Result<Bytes, ScriptError> {
        let tx = TransactionRequest::default()
            .with_to(to)
            .with_input(calldata);

        self.provider
            .call(tx)
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))
    }

    async fn code_at(&self, address: Address) -> Result<Bytes, ScriptError> {
        self.provider
            .get_code_at(address)
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))
    }

    async fn storage_at(&self, address: Address, slot: U256) -> Result<U256, ScriptError> {
        self.provider
            .get_storage_at(address, slot)
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))
    }
}
