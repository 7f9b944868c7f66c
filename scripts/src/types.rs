//! Type definitions used throughout the scripts

use alloy::{
    primitives::{utils::parse_ether, Address, Bytes, U256},
    sol_types::{SolCall, SolValue},
};

use crate::{
    cli::{DeployStrategyArgs, StrategyArgs, VaultArgs},
    errors::ScriptError,
    solidity::IReaperStrategy,
    utils::parse_address,
};

/// Gas parameters attached to every transaction a script sends
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TxOptions {
    /// The gas price, in wei
    pub gas_price: u128,
    /// The gas limit
    pub gas_limit: u64,
}

/// The constructor arguments of the vault contract
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VaultParams {
    /// The token the vault accepts deposits in
    pub want: Address,
    /// The name of the vault's share token
    pub token_name: String,
    /// The symbol of the vault's share token
    pub token_symbol: String,
    /// The deposit fee, in basis points
    pub deposit_fee: U256,
    /// The TVL cap, scaled to 18 decimals
    pub tvl_cap: U256,
}

impl VaultParams {
    /// The number of arguments the vault constructor takes
    pub const NUM_CONSTRUCTOR_ARGS: usize = 5;

    /// ABI-encode the constructor arguments, to be appended to the creation code
    pub fn constructor_args(&self) -> Vec<u8> {
        (
            self.want,
            self.token_name.clone(),
            self.token_symbol.clone(),
            self.deposit_fee,
            self.tvl_cap,
        )
            .abi_encode_params()
    }
}

impl TryFrom<&VaultArgs> for VaultParams {
    type Error = ScriptError;

    fn try_from(args: &VaultArgs) -> Result<Self, Self::Error> {
        let tvl_cap = parse_ether(&args.tvl_cap)
            .map_err(|e| ScriptError::CalldataConstruction(e.to_string()))?;

        Ok(VaultParams {
            want: parse_address(&args.want)?,
            token_name: args.token_name.clone(),
            token_symbol: args.token_symbol.clone(),
            deposit_fee: U256::from(args.deposit_fee),
            tvl_cap,
        })
    }
}

/// The initializer arguments of the strategy contract
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StrategyParams {
    /// The vault the strategy reports to
    pub vault: Address,
    /// The addresses receiving fees, treasury first
    pub fee_remitters: Vec<Address>,
    /// The strategists allowed to manage the strategy
    pub strategists: Vec<Address>,
    /// The token the strategy farms with
    pub want: Address,
    /// The id of the farm pool
    pub pool_id: U256,
}

impl StrategyParams {
    /// Build the strategy parameters for the given vault & want token
    pub fn new(vault: Address, want: Address, args: &StrategyArgs) -> Result<Self, ScriptError> {
        let fee_remitters =
            vec![parse_address(&args.treasury)?, parse_address(&args.payment_splitter)?];
        let strategists = args
            .strategists
            .iter()
            .map(|s| parse_address(s))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(StrategyParams {
            vault,
            fee_remitters,
            strategists,
            want,
            pool_id: U256::from(args.pool_id),
        })
    }

    /// Build the strategy parameters from the `deploy-strategy` arguments,
    /// with the vault address already resolved
    pub fn from_args(vault: Address, args: &DeployStrategyArgs) -> Result<Self, ScriptError> {
        StrategyParams::new(vault, parse_address(&args.want)?, &args.strategy)
    }

    /// Prepare calldata for the strategy's `initialize` method
    pub fn initialize_calldata(&self) -> Vec<u8> {
        IReaperStrategy::initializeCall {
            _vault: self.vault,
            _feeRemitters: self.fee_remitters.clone(),
            _strategists: self.strategists.clone(),
            _want: self.want,
            _poolId: self.pool_id,
        }
        .abi_encode()
    }
}

/// ABI-encode the constructor arguments of an ERC-1967 proxy, which calls
/// `implementation` with `init_data` in the same transaction
pub fn proxy_constructor_args(implementation: Address, init_data: Vec<u8>) -> Vec<u8> {
    (implementation, Bytes::from(init_data)).abi_encode_params()
}

/// The addresses produced by a proxy deployment
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProxyDeployment {
    /// The proxy, which is the address users interact with
    pub proxy: Address,
    /// The implementation the proxy delegates to
    pub implementation: Address,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{
        DEFAULT_PAYMENT_SPLITTER_ADDRESS, DEFAULT_STRATEGIST_ADDRESSES, DEFAULT_TREASURY_ADDRESS,
        DEFAULT_WANT_ADDRESS,
    };

    fn vault_args() -> VaultArgs {
        VaultArgs {
            want: DEFAULT_WANT_ADDRESS.to_string(),
            token_name: "FTM-UST Excalibur Crypt".to_string(),
            token_symbol: "rf-EXC-V1-FTM-UST".to_string(),
            deposit_fee: 0,
            tvl_cap: "2000".to_string(),
        }
    }

    fn strategy_args() -> StrategyArgs {
        StrategyArgs {
            treasury: DEFAULT_TREASURY_ADDRESS.to_string(),
            payment_splitter: DEFAULT_PAYMENT_SPLITTER_ADDRESS.to_string(),
            strategists: DEFAULT_STRATEGIST_ADDRESSES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            pool_id: 2,
        }
    }

    #[test]
    fn test_vault_params_scale_tvl_cap() {
        let params = VaultParams::try_from(&vault_args()).unwrap();

        let expected_cap = U256::from(2000u64) * U256::from(10u64).pow(U256::from(18u64));
        assert_eq!(params.tvl_cap, expected_cap);
        assert_eq!(params.deposit_fee, U256::ZERO);
        assert_eq!(params.want, DEFAULT_WANT_ADDRESS.parse::<Address>().unwrap());
    }

    #[test]
    fn test_vault_params_invalid_want() {
        let mut args = vault_args();
        args.want = "0x1234".to_string();

        let err = VaultParams::try_from(&args).unwrap_err();
        assert!(matches!(err, ScriptError::CalldataConstruction(_)));
    }

    #[test]
    fn test_vault_params_invalid_tvl_cap() {
        let mut args = vault_args();
        args.tvl_cap = "two thousand".to_string();

        let err = VaultParams::try_from(&args).unwrap_err();
        assert!(matches!(err, ScriptError::CalldataConstruction(_)));
    }

    #[test]
    fn test_vault_constructor_args_pass_through() {
        let params = VaultParams::try_from(&vault_args()).unwrap();
        let encoded = params.constructor_args();

        let (want, name, symbol, fee, cap) =
            <(Address, String, String, U256, U256)>::abi_decode_params(&encoded).unwrap();
        assert_eq!(want, params.want);
        assert_eq!(name, "FTM-UST Excalibur Crypt");
        assert_eq!(symbol, "rf-EXC-V1-FTM-UST");
        assert_eq!(fee, params.deposit_fee);
        assert_eq!(cap, params.tvl_cap);
    }

    #[test]
    fn test_strategy_initialize_calldata_pass_through() {
        let vault = Address::repeat_byte(0xaa);
        let want = DEFAULT_WANT_ADDRESS.parse::<Address>().unwrap();
        let params = StrategyParams::new(vault, want, &strategy_args()).unwrap();

        let call =
            IReaperStrategy::initializeCall::abi_decode(&params.initialize_calldata()).unwrap();
        assert_eq!(call._vault, vault);
        assert_eq!(
            call._feeRemitters,
            vec![
                DEFAULT_TREASURY_ADDRESS.parse::<Address>().unwrap(),
                DEFAULT_PAYMENT_SPLITTER_ADDRESS.parse::<Address>().unwrap(),
            ]
        );
        assert_eq!(call._strategists.len(), 3);
        assert_eq!(
            call._strategists[2],
            DEFAULT_STRATEGIST_ADDRESSES[2].parse::<Address>().unwrap()
        );
        assert_eq!(call._want, want);
        assert_eq!(call._poolId, U256::from(2u64));
    }

    #[test]
    fn test_strategy_params_invalid_strategist() {
        let mut args = strategy_args();
        args.strategists.push("not-an-address".to_string());

        let err = StrategyParams::new(Address::ZERO, Address::ZERO, &args).unwrap_err();
        assert!(matches!(err, ScriptError::CalldataConstruction(_)));
    }

    #[test]
    fn test_proxy_constructor_args() {
        let implementation = Address::repeat_byte(0x11);
        let init_data = vec![0xde, 0xad, 0xbe, 0xef];

        let encoded = proxy_constructor_args(implementation, init_data.clone());
        let (decoded_impl, decoded_data) =
            <(Address, Bytes)>::abi_decode_params(&encoded).unwrap();
        assert_eq!(decoded_impl, implementation);
        assert_eq!(decoded_data.to_vec(), init_data);
    }
}
